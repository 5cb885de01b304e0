//! Structural check of rendered sitemap XML

use quick_xml::events::Event;
use quick_xml::Reader;

use super::is_xml_char;
use crate::errors::{AppError, AppResult};

fn reject_illegal_chars(text: &str, context: &str) -> AppResult<()> {
    match text.char_indices().find(|(_, c)| !is_xml_char(*c)) {
        Some((offset, c)) => Err(AppError::invalid_document(format!(
            "character U+{:04X} is not allowed in XML ({context}, offset {offset})",
            c as u32
        ))),
        None => Ok(()),
    }
}

/// What a successful check observed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DocumentCheck {
    pub url_blocks: usize,
    pub media_elements: usize,
}

/// Re-read rendered XML and confirm it is well-formed with a single `urlset` root
/// declaring at most one media extension namespace.
pub fn validate_document(xml: &str) -> AppResult<DocumentCheck> {
    reject_illegal_chars(xml, "document")?;

    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut stack: Vec<Vec<u8>> = Vec::new();
    let mut seen_root = false;
    let mut check = DocumentCheck::default();

    loop {
        let event = reader.read_event().map_err(|e| {
            AppError::invalid_document(format!(
                "malformed XML at byte {}: {e}",
                reader.buffer_position()
            ))
        })?;

        match event {
            Event::Start(element) => {
                let name = element.name().as_ref().to_vec();
                if stack.is_empty() {
                    if seen_root {
                        return Err(AppError::invalid_document("more than one root element"));
                    }
                    if name != b"urlset" {
                        return Err(AppError::invalid_document(format!(
                            "root element is <{}>, expected <urlset>",
                            String::from_utf8_lossy(&name)
                        )));
                    }
                    seen_root = true;

                    let extensions = element
                        .attributes()
                        .filter_map(Result::ok)
                        .filter(|attr| {
                            matches!(attr.key.as_ref(), b"xmlns:image" | b"xmlns:video")
                        })
                        .count();
                    if extensions > 1 {
                        return Err(AppError::invalid_document(
                            "document declares more than one media extension namespace",
                        ));
                    }
                }

                match name.as_slice() {
                    b"url" => check.url_blocks += 1,
                    b"image:image" | b"video:video" => check.media_elements += 1,
                    _ => {}
                }
                stack.push(name);
            }
            Event::End(element) => {
                let expected = stack.pop();
                if expected.as_deref() != Some(element.name().as_ref()) {
                    return Err(AppError::invalid_document(format!(
                        "unexpected closing tag </{}>",
                        String::from_utf8_lossy(element.name().as_ref())
                    )));
                }
            }
            Event::Empty(_) if stack.is_empty() => {
                return Err(AppError::invalid_document("root element <urlset> is empty"));
            }
            Event::Text(text) => {
                if stack.is_empty() {
                    return Err(AppError::invalid_document("text outside the root element"));
                }
                let decoded = text.unescape().map_err(|e| {
                    AppError::invalid_document(format!("invalid character reference: {e}"))
                })?;
                reject_illegal_chars(&decoded, "character reference")?;
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if !seen_root {
        return Err(AppError::invalid_document("document has no root element"));
    }
    if let Some(open) = stack.last() {
        return Err(AppError::invalid_document(format!(
            "unclosed element <{}>",
            String::from_utf8_lossy(open)
        )));
    }

    Ok(check)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sitemap::{render, ImageDescriptor, SitemapDocument, UrlGroup};

    #[test]
    fn test_rendered_document_validates() {
        let mut doc = SitemapDocument::new();
        doc.push_group(UrlGroup::new(
            "https://x/blogs/news/a&b",
            vec![ImageDescriptor {
                loc: "https://x/1.png".to_string(),
                title: "Robin & Sons <Ltd>".to_string(),
                caption: "It's \"fine\"".to_string(),
            }],
        ));
        let check = validate_document(&render(&doc)).unwrap();
        assert_eq!(
            check,
            DocumentCheck {
                url_blocks: 1,
                media_elements: 1
            }
        );
    }

    #[test]
    fn test_rejects_unescaped_text() {
        let xml = "<urlset><url><loc>a & b</loc></url></urlset>";
        assert!(validate_document(xml).is_err());
    }

    #[test]
    fn test_rejects_wrong_root() {
        let err = validate_document("<sitemapindex></sitemapindex>").unwrap_err();
        assert!(err.to_string().contains("expected <urlset>"));
    }

    #[test]
    fn test_rejects_unclosed_element() {
        assert!(validate_document("<urlset><url>").is_err());
    }

    #[test]
    fn test_rejects_mismatched_closing_tag() {
        assert!(validate_document("<urlset><url></loc></urlset>").is_err());
    }

    #[test]
    fn test_rejects_both_extension_namespaces() {
        let xml = r#"<urlset xmlns:image="i" xmlns:video="v"></urlset>"#;
        assert!(validate_document(xml).is_err());
    }

    #[test]
    fn test_rejects_illegal_raw_character() {
        let xml = "<urlset><url><loc>Bad\u{1}title</loc></url></urlset>";
        let err = validate_document(xml).unwrap_err();
        assert!(matches!(err, AppError::InvalidDocument { .. }));
        assert!(err.to_string().contains("U+0001"));
    }

    #[test]
    fn test_rejects_illegal_character_reference() {
        let xml = "<urlset><url><loc>Bad&#1;title</loc></url></urlset>";
        assert!(validate_document(xml).is_err());
    }

    #[test]
    fn test_illegal_title_is_dropped_before_validation() {
        let mut doc = SitemapDocument::new();
        doc.push_group(UrlGroup::new(
            "https://x/a",
            vec![ImageDescriptor {
                loc: "https://x/1.png".to_string(),
                title: "Bad\u{1}title".to_string(),
                caption: "c".to_string(),
            }],
        ));
        let xml = render(&doc);
        assert!(!xml.contains('\u{1}'));
        assert!(xml.contains("<image:title>Badtitle</image:title>"));
        assert!(validate_document(&xml).is_ok());
    }

    #[test]
    fn test_rejects_empty_input() {
        assert!(validate_document("").is_err());
    }
}
