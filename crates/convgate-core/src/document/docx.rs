//! Plain-text paragraph extraction from DOCX packages.
//!
//! Only paragraphs that sit directly in the document body are kept, and only
//! the text of their own runs (including runs wrapped in a hyperlink).
//! Tables, content controls, text boxes and drawings are dropped.

use std::io::{Cursor, Read};

use quick_xml::events::{BytesStart, Event};
use quick_xml::name::{Namespace, ResolveResult};
use quick_xml::NsReader;
use zip::ZipArchive;

use crate::error::{ConvertError, Result};

const DOCUMENT_PART: &str = "word/document.xml";
const WORDML_NS: &[u8] = b"http://schemas.openxmlformats.org/wordprocessingml/2006/main";

/// Subtrees whose text never belongs to the enclosing paragraph. Word writes
/// text boxes twice, under `mc:Choice` and `mc:Fallback`.
const OPAQUE_ELEMENTS: &[&[u8]] = &[b"AlternateContent", b"drawing", b"pict", b"object", b"txbxContent"];

fn decode_err(e: impl std::fmt::Display) -> ConvertError {
    ConvertError::Decode(format!("invalid DOCX: {e}"))
}

/// Read the main document part of a DOCX package and return its paragraphs,
/// each trimmed. Empty paragraphs are kept as empty strings.
pub fn extract_paragraphs(data: &[u8]) -> Result<Vec<String>> {
    let mut archive = ZipArchive::new(Cursor::new(data)).map_err(decode_err)?;
    let mut xml = String::new();
    archive
        .by_name(DOCUMENT_PART)
        .map_err(decode_err)?
        .read_to_string(&mut xml)
        .map_err(decode_err)?;
    parse_document_xml(&xml)
}

/// Where an open element sits relative to the body text we collect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Scope {
    Document,
    Body,
    Paragraph,
    Hyperlink,
    Run,
    Text,
    Opaque,
    Other,
}

fn is_wordml(ns: &ResolveResult<'_>) -> bool {
    matches!(ns, ResolveResult::Bound(Namespace(uri)) if *uri == WORDML_NS)
}

fn open_scope(parent: Option<Scope>, ns: &ResolveResult<'_>, e: &BytesStart<'_>) -> Scope {
    let local = e.local_name();
    let local = local.as_ref();
    if parent == Some(Scope::Opaque) || OPAQUE_ELEMENTS.contains(&local) {
        return Scope::Opaque;
    }
    if !is_wordml(ns) {
        return Scope::Other;
    }
    match (parent, local) {
        (None, b"document") => Scope::Document,
        (Some(Scope::Document), b"body") => Scope::Body,
        (Some(Scope::Body), b"p") => Scope::Paragraph,
        (Some(Scope::Paragraph), b"hyperlink") => Scope::Hyperlink,
        (Some(Scope::Paragraph | Scope::Hyperlink), b"r") => Scope::Run,
        (Some(Scope::Run), b"t") => Scope::Text,
        _ => Scope::Other,
    }
}

/// Text contributed by an empty run child such as `<w:tab/>`.
fn run_marker(e: &BytesStart<'_>) -> Option<char> {
    match e.local_name().as_ref() {
        b"tab" | b"ptab" => Some('\t'),
        b"cr" => Some('\n'),
        b"noBreakHyphen" => Some('-'),
        // Page and column breaks carry no text.
        b"br" => {
            let kind = e
                .attributes()
                .flatten()
                .find(|a| a.key.local_name().as_ref() == b"type")
                .map(|a| a.value.into_owned());
            match kind.as_deref() {
                None | Some(b"textWrapping") => Some('\n'),
                Some(_) => None,
            }
        }
        _ => None,
    }
}

pub(crate) fn parse_document_xml(xml: &str) -> Result<Vec<String>> {
    let mut reader = NsReader::from_str(xml);
    let mut stack: Vec<Scope> = Vec::new();
    let mut paragraphs = Vec::new();
    let mut current = String::new();

    loop {
        let (ns, event) = reader.read_resolved_event().map_err(decode_err)?;
        let parent = stack.last().copied();
        match event {
            Event::Start(e) => {
                let scope = open_scope(parent, &ns, &e);
                if scope == Scope::Paragraph {
                    current.clear();
                }
                stack.push(scope);
            }
            Event::Empty(e) => match open_scope(parent, &ns, &e) {
                Scope::Paragraph => paragraphs.push(String::new()),
                Scope::Other if parent == Some(Scope::Run) && is_wordml(&ns) => {
                    current.extend(run_marker(&e));
                }
                _ => {}
            },
            Event::Text(t) if parent == Some(Scope::Text) => {
                current.push_str(&t.unescape().map_err(decode_err)?);
            }
            Event::End(_) => {
                if stack.pop() == Some(Scope::Paragraph) {
                    paragraphs.push(current.trim().to_owned());
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(paragraphs)
}

#[cfg(test)]
pub(crate) mod test {
    use std::io::Write;

    use zip::write::SimpleFileOptions;
    use zip::ZipWriter;

    use super::*;

    fn escape(text: &str) -> String {
        text.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
    }

    pub(crate) fn document_xml(body: &str) -> String {
        format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>{body}<w:sectPr/></w:body></w:document>"#
        )
    }

    pub(crate) fn paragraph(text: &str) -> String {
        if text.is_empty() {
            return "<w:p/>".to_owned();
        }
        format!(
            r#"<w:p><w:pPr><w:tabs><w:tab w:val="left" w:pos="720"/></w:tabs></w:pPr><w:r><w:rPr><w:b/></w:rPr><w:t xml:space="preserve">{}</w:t></w:r></w:p>"#,
            escape(text)
        )
    }

    /// Minimal DOCX package holding one paragraph per entry of `paragraphs`.
    pub(crate) fn docx_bytes(paragraphs: &[&str]) -> Vec<u8> {
        let body: String = paragraphs.iter().map(|p| paragraph(p)).collect();
        package(&document_xml(&body))
    }

    pub(crate) fn package(document: &str) -> Vec<u8> {
        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        zip.start_file(DOCUMENT_PART, SimpleFileOptions::default()).unwrap();
        zip.write_all(document.as_bytes()).unwrap();
        zip.finish().unwrap().into_inner()
    }

    #[test]
    fn extracts_paragraph_text_in_order() {
        let data = docx_bytes(&["Hello, Web Converter!", "", "  second & last  "]);
        let paragraphs = extract_paragraphs(&data).expect("extract");
        assert_eq!(paragraphs, vec!["Hello, Web Converter!", "", "second & last"]);
    }

    #[test]
    fn runs_are_concatenated_with_tabs_and_breaks() {
        let xml = document_xml(
            r#"<w:p><w:r><w:t>one</w:t></w:r><w:r><w:tab/><w:t>two</w:t><w:br/><w:t>three</w:t></w:r></w:p>"#,
        );
        let paragraphs = parse_document_xml(&xml).unwrap();
        assert_eq!(paragraphs, vec!["one\ttwo\nthree"]);
    }

    #[test]
    fn table_paragraphs_are_skipped() {
        let body = format!(
            "{}<w:tbl><w:tr><w:tc>{}</w:tc></w:tr></w:tbl>{}",
            paragraph("before"),
            paragraph("in a cell"),
            paragraph("after")
        );
        let paragraphs = parse_document_xml(&document_xml(&body)).unwrap();
        assert_eq!(paragraphs, vec!["before", "after"]);
    }

    #[test]
    fn text_box_content_stays_out_of_the_anchor_paragraph() {
        let text_box = r#"<w:txbxContent><w:p><w:r><w:t>Box</w:t></w:r></w:p></w:txbxContent>"#;
        let body = format!(
            r#"<w:p><w:r><w:t>Before</w:t></w:r><w:r><mc:AlternateContent xmlns:mc="http://schemas.openxmlformats.org/markup-compatibility/2006" xmlns:wps="http://schemas.microsoft.com/office/word/2010/wordprocessingShape"><mc:Choice Requires="wps"><w:drawing><wps:txbx>{text_box}</wps:txbx></w:drawing></mc:Choice><mc:Fallback><w:pict><v:textbox xmlns:v="urn:schemas-microsoft-com:vml">{text_box}</v:textbox></w:pict></mc:Fallback></mc:AlternateContent></w:r><w:r><w:tab/><w:t>After</w:t></w:r></w:p>"#
        );
        let paragraphs = parse_document_xml(&document_xml(&body)).unwrap();
        assert_eq!(paragraphs, vec!["Before\tAfter"]);
    }

    #[test]
    fn content_control_paragraphs_are_not_body_paragraphs() {
        let body = format!(
            "{}<w:sdt><w:sdtPr/><w:sdtContent>{}</w:sdtContent></w:sdt>{}",
            paragraph("title"),
            paragraph("inside a control"),
            paragraph("")
        );
        let paragraphs = parse_document_xml(&document_xml(&body)).unwrap();
        assert_eq!(paragraphs, vec!["title", ""]);
    }

    #[test]
    fn hyperlink_runs_belong_to_their_paragraph() {
        let xml = document_xml(
            r#"<w:p><w:r><w:t xml:space="preserve">see </w:t></w:r><w:hyperlink w:history="1"><w:r><w:t>docs</w:t></w:r></w:hyperlink></w:p>"#,
        );
        assert_eq!(parse_document_xml(&xml).unwrap(), vec!["see docs"]);
    }

    #[test]
    fn only_wordprocessing_text_elements_count() {
        let xml = document_xml(
            r#"<w:p><w:r><w:t>kept</w:t><x:t xmlns:x="urn:example:other">dropped</x:t><x:tab xmlns:x="urn:example:other"/></w:r></w:p>"#,
        );
        assert_eq!(parse_document_xml(&xml).unwrap(), vec!["kept"]);
    }

    #[test]
    fn page_breaks_add_no_text() {
        let xml = document_xml(
            r#"<w:p><w:r><w:t>end</w:t><w:br w:type="page"/><w:t>start</w:t><w:cr/><w:t>x</w:t></w:r></w:p>"#,
        );
        assert_eq!(parse_document_xml(&xml).unwrap(), vec!["endstart\nx"]);
    }

    #[test]
    fn non_zip_payload_is_a_decode_error() {
        let err = extract_paragraphs(b"plain text, not a package").unwrap_err();
        assert!(matches!(err, ConvertError::Decode(_)));
    }

    #[test]
    fn package_without_document_part_is_a_decode_error() {
        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        zip.start_file("other.xml", SimpleFileOptions::default()).unwrap();
        zip.write_all(b"<x/>").unwrap();
        let data = zip.finish().unwrap().into_inner();
        assert!(matches!(extract_paragraphs(&data), Err(ConvertError::Decode(_))));
    }

    #[test]
    fn malformed_xml_is_a_decode_error() {
        let data = package("<w:document><w:body><w:p></w:body>");
        assert!(matches!(extract_paragraphs(&data), Err(ConvertError::Decode(_))));
    }
}
