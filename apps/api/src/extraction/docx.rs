use std::io::{Cursor, Read};
use std::sync::LazyLock;

use regex::{Captures, Regex};
use zip::ZipArchive;

use super::ExtractError;

const DOCUMENT_PART: &str = "word/document.xml";

/// A body paragraph, either self-closing (empty) or with content.
static PARAGRAPH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)<w:p(?:\s[^>]*)?/>|<w:p(?:\s[^>]*)?>(.*?)</w:p>").expect("valid regex")
});

/// Paragraph properties carry `<w:tab/>` tab-stop definitions that are not content.
static PARAGRAPH_PROPERTIES: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)<w:pPr(?:\s[^>]*)?>.*?</w:pPr>").expect("valid regex")
});

/// Run text, tabs and breaks. An empty self-closing `<w:t/>` is tried first so it
/// matches on its own and contributes nothing.
static RUN_CONTENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?s)<w:t(?:\s[^>]*)?/>|<w:t(?:\s[^>]*)?>(.*?)</w:t>|<w:(tab|br|cr)(?:\s[^>]*)?/>",
    )
    .expect("valid regex")
});

static ENTITY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"&(#x[0-9a-fA-F]+|#[0-9]+|amp|lt|gt|quot|apos);").expect("valid regex")
});

fn decode_error(message: impl ToString) -> ExtractError {
    ExtractError::Decode {
        format: "DOCX",
        message: message.to_string(),
    }
}

/// Extracts paragraph text from a `.docx` package, one paragraph per line.
pub fn extract_text(bytes: &[u8]) -> Result<String, ExtractError> {
    let mut archive = ZipArchive::new(Cursor::new(bytes)).map_err(|e| decode_error(e))?;

    let mut xml = String::new();
    archive
        .by_name(DOCUMENT_PART)
        .map_err(|e| decode_error(format!("{DOCUMENT_PART}: {e}")))?
        .read_to_string(&mut xml)
        .map_err(|e| decode_error(format!("{DOCUMENT_PART}: {e}")))?;

    Ok(paragraphs_from_xml(&xml).join("\n"))
}

fn paragraphs_from_xml(xml: &str) -> Vec<String> {
    PARAGRAPH
        .captures_iter(xml)
        .map(|caps| caps.get(1).map(|m| paragraph_text(m.as_str())).unwrap_or_default())
        .collect()
}

fn paragraph_text(body: &str) -> String {
    let body = PARAGRAPH_PROPERTIES.replace_all(body, "");
    let mut text = String::new();
    for caps in RUN_CONTENT.captures_iter(&body) {
        match (caps.get(1), caps.get(2).map(|m| m.as_str())) {
            (Some(run), _) => text.push_str(&unescape_xml(run.as_str())),
            (None, Some("tab")) => text.push('\t'),
            (None, Some(_)) => text.push('\n'),
            (None, None) => {}
        }
    }
    text
}

fn unescape_xml(raw: &str) -> String {
    ENTITY
        .replace_all(raw, |caps: &Captures| {
            let entity = &caps[1];
            let decoded = match entity {
                "amp" => Some('&'),
                "lt" => Some('<'),
                "gt" => Some('>'),
                "quot" => Some('"'),
                "apos" => Some('\''),
                _ => entity
                    .strip_prefix("#x")
                    .map(|hex| u32::from_str_radix(hex, 16))
                    .unwrap_or_else(|| entity[1..].parse::<u32>())
                    .ok()
                    .and_then(char::from_u32),
            };
            decoded
                .map(String::from)
                .unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}

#[cfg(test)]
pub(crate) mod fixtures {
    use std::io::{Cursor, Write};

    use zip::write::SimpleFileOptions;
    use zip::ZipWriter;

    /// Packs `document_xml` as the main part of a minimal `.docx`.
    pub fn docx_with_document_xml(document_xml: &str) -> Vec<u8> {
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        writer
            .start_file("[Content_Types].xml", SimpleFileOptions::default())
            .unwrap();
        writer
            .write_all(br#"<?xml version="1.0" encoding="UTF-8"?><Types/>"#)
            .unwrap();
        writer
            .start_file("word/document.xml", SimpleFileOptions::default())
            .unwrap();
        writer.write_all(document_xml.as_bytes()).unwrap();
        writer.finish().unwrap().into_inner()
    }

    /// Wraps plain paragraphs in WordprocessingML.
    pub fn docx_with_paragraphs(paragraphs: &[&str]) -> Vec<u8> {
        let body: String = paragraphs
            .iter()
            .map(|p| format!(r#"<w:p w:rsidR="00A1"><w:r><w:t xml:space="preserve">{p}</w:t></w:r></w:p>"#))
            .collect();
        docx_with_document_xml(&format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>{body}<w:sectPr/></w:body></w:document>"#
        ))
    }
}
