//! Extraction tests: minimal in-memory DOCX fixtures, plain-text
//! normalization and the error cases the corpus run has to survive.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use tempfile::tempdir;
use zip::CompressionMethod;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

use manifesto_analysis::{ExtractError, document_id, extract_document};

/// Minimal DOCX: a ZIP holding only "word/document.xml".
fn write_docx_with_xml(target: &Path, document_xml: &str) {
    let file = File::create(target).expect("create docx file");
    let mut zip = ZipWriter::new(file);
    let deflated = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    zip.add_directory("word", deflated).expect("add word dir");
    zip.start_file("word/document.xml", deflated)
        .expect("start document.xml");
    zip.write_all(document_xml.as_bytes())
        .expect("write document.xml");
    zip.finish().expect("finish docx zip");
}

fn write_docx_with_body(target: &Path, body: &str) {
    let document_xml = format!(
        r##"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
  <w:body>
    <w:p><w:r><w:t>{}</w:t></w:r></w:p>
  </w:body>
</w:document>"##,
        body
    );
    write_docx_with_xml(target, &document_xml);
}

#[test]
fn docx_text_is_lowercased() {
    let dir = tempdir().expect("create tempdir");
    let path = dir.path().join("programm.docx");
    write_docx_with_body(&path, "Hallo DOCX");

    let extracted = extract_document(&path).expect("extract docx");
    assert_eq!(extracted, "hallo docx");
}

#[test]
fn docx_breaks_and_paragraphs_become_lines() {
    let dir = tempdir().expect("create tempdir");
    let path = dir.path().join("programm.docx");

    // one paragraph with an explicit line break, then a second paragraph
    let xml = r##"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
  <w:body>
    <w:p>
      <w:r><w:t>Zeile eins</w:t></w:r>
      <w:r><w:br/></w:r>
      <w:r><w:t>Zeile zwei</w:t></w:r>
    </w:p>
    <w:p><w:r><w:t>Absatz zwei</w:t></w:r></w:p>
  </w:body>
</w:document>"##;
    write_docx_with_xml(&path, xml);

    let extracted = extract_document(&path).expect("extract docx");
    assert_eq!(extracted, "zeile eins\nzeile zwei\nabsatz zwei");
}

#[test]
fn txt_is_trimmed_and_lowercased() {
    let dir = tempdir().expect("create tempdir");
    let path = dir.path().join("spd.txt");
    let mut file = File::create(&path).expect("create txt");
    file.write_all("  Erste ZEILE \n\n Zweite \n".as_bytes())
        .expect("write txt");

    let extracted = extract_document(&path).expect("extract txt");
    assert_eq!(extracted, "erste zeile\nzweite");
}

#[test]
fn docx_that_is_not_a_zip_fails() {
    let dir = tempdir().expect("create tempdir");
    let path = dir.path().join("kaputt.docx");
    let mut file = File::create(&path).expect("create file");
    file.write_all(b"kein zip archiv").expect("write file");

    let err = extract_document(&path).unwrap_err();
    assert!(matches!(err, ExtractError::Read { .. }));
    assert!(err.to_string().contains("kaputt.docx"));
}

#[test]
fn missing_file_fails() {
    let dir = tempdir().expect("create tempdir");
    let missing = dir.path().join("fehlt.txt");
    assert!(extract_document(&missing).is_err());
}

#[test]
fn unknown_extension_is_unsupported() {
    let dir = tempdir().expect("create tempdir");
    let path = dir.path().join("programm.odt");
    File::create(&path).expect("create file");

    let err = extract_document(&path).unwrap_err();
    assert!(matches!(err, ExtractError::UnsupportedFormat(_)));
}

#[test]
fn document_id_is_the_lowercased_stem() {
    assert_eq!(document_id(Path::new("programme/AfD.pdf")), "afd");
    assert_eq!(document_id(Path::new("GRUENE.docx")), "gruene");
}
