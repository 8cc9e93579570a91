//! Normalization of the loosely-typed list fields (`paragraphs`, `authors`).
//!
//! JSON bodies carry these as arrays; multipart forms carry them as JSON
//! encoded strings. Both shapes normalize to the same typed list.

use serde_json::Value;

use crate::domain::Paragraph;
use crate::error::DomainError;
use crate::media::public_id_from_url;

/// `true` for values a client sends to mean "nothing": absent, `null`,
/// `false`, `0` and the empty string.
pub fn is_blank(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) | Some(Value::Bool(false)) => true,
        Some(Value::String(s)) => s.is_empty(),
        Some(Value::Number(n)) => n.as_f64() == Some(0.0),
        Some(_) => false,
    }
}

/// Parse and validate a paragraph list, deriving the media identifier of
/// every illustrated paragraph that does not carry one.
///
/// Order and length are preserved.
pub fn normalize_paragraphs(raw: Option<&Value>) -> Result<Vec<Paragraph>, DomainError> {
    normalize_paragraphs_with(raw, |_| None)
}

/// Like [`normalize_paragraphs`], but an illustrated paragraph without an
/// identifier first takes the one `known` holds for its image URL, so images
/// already on record keep their stored identifier.
pub fn normalize_paragraphs_with(
    raw: Option<&Value>,
    known: impl Fn(&str) -> Option<String>,
) -> Result<Vec<Paragraph>, DomainError> {
    let Some(items) = parse_list(raw, "paragraphs must be a valid JSON array")? else {
        return Ok(Vec::new());
    };
    let Value::Array(items) = items else {
        return Err(DomainError::validation("paragraphs must be an array"));
    };

    items
        .into_iter()
        .map(|item| {
            if !item.is_object() {
                return Err(DomainError::validation("each paragraph must be an object"));
            }
            let mut paragraph: Paragraph = serde_json::from_value(item)
                .map_err(|e| DomainError::validation(format!("invalid paragraph: {e}")))?;
            let has_id = paragraph
                .image_public_id
                .as_deref()
                .is_some_and(|id| !id.is_empty());
            if !has_id {
                paragraph.image_public_id = paragraph
                    .image
                    .as_deref()
                    .and_then(|image| known(image).or_else(|| public_id_from_url(image)));
            }
            Ok(paragraph)
        })
        .collect()
}

/// Parse an author list. `None` means the client did not supply one.
pub fn normalize_authors(raw: Option<&Value>) -> Result<Option<Vec<String>>, DomainError> {
    let Some(items) = parse_list(
        raw,
        "Invalid authors format. Authors must be a valid JSON array.",
    )?
    else {
        return Ok(None);
    };
    let Value::Array(items) = items else {
        return Err(DomainError::validation("authors must be an array"));
    };

    items
        .into_iter()
        .map(|item| match item {
            Value::String(author) => Ok(author),
            _ => Err(DomainError::validation("each author must be a string")),
        })
        .collect::<Result<Vec<_>, _>>()
        .map(Some)
}

/// Blank input becomes `None`; strings are decoded as JSON.
fn parse_list(raw: Option<&Value>, parse_error: &str) -> Result<Option<Value>, DomainError> {
    if is_blank(raw) {
        return Ok(None);
    }
    match raw {
        Some(Value::String(encoded)) => serde_json::from_str(encoded)
            .map(Some)
            .map_err(|_| DomainError::validation(parse_error)),
        other => Ok(other.cloned()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const IMG_A: &str = "https://res.cloudinary.com/lab/image/upload/v1/posts/a.jpg";
    const IMG_B: &str = "https://res.cloudinary.com/lab/image/upload/v1/posts/b.png";

    fn message(err: DomainError) -> String {
        match err {
            DomainError::Validation(msg) => msg,
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_blank_input_normalizes_to_empty_list() {
        for raw in [None, Some(json!(null)), Some(json!("")), Some(json!(false)), Some(json!(0))] {
            assert!(normalize_paragraphs(raw.as_ref()).unwrap().is_empty());
        }
    }

    #[test]
    fn test_string_input_is_parsed_as_json() {
        let raw = json!(format!(r#"[{{"content":"intro","image":"{IMG_A}"}}]"#));
        let paragraphs = normalize_paragraphs(Some(&raw)).unwrap();

        assert_eq!(paragraphs.len(), 1);
        assert_eq!(paragraphs[0].content, "intro");
        assert_eq!(paragraphs[0].image_public_id.as_deref(), Some("posts/a"));
    }

    #[test]
    fn test_malformed_json_string_fails() {
        let err = normalize_paragraphs(Some(&json!("[{not json"))).unwrap_err();
        assert_eq!(message(err), "paragraphs must be a valid JSON array");
    }

    #[test]
    fn test_non_array_fails() {
        let err = normalize_paragraphs(Some(&json!({"content": "x"}))).unwrap_err();
        assert_eq!(message(err), "paragraphs must be an array");

        let err = normalize_paragraphs(Some(&json!("\"just a string\""))).unwrap_err();
        assert_eq!(message(err), "paragraphs must be an array");
    }

    #[test]
    fn test_null_or_scalar_elements_fail() {
        let err = normalize_paragraphs(Some(&json!([{"content": "ok"}, null]))).unwrap_err();
        assert_eq!(message(err), "each paragraph must be an object");

        assert!(normalize_paragraphs(Some(&json!(["text"]))).is_err());
    }

    #[test]
    fn test_explicit_identifier_is_kept() {
        let raw = json!([{"content": "c", "image": IMG_A, "imagePublicId": "uploaded/explicit"}]);
        let paragraphs = normalize_paragraphs(Some(&raw)).unwrap();
        assert_eq!(paragraphs[0].image_public_id.as_deref(), Some("uploaded/explicit"));
    }

    #[test]
    fn test_order_and_length_preserved() {
        let raw = json!([
            {"content": "one", "image": IMG_B},
            {"content": "two"},
            {"content": "three", "image": IMG_A, "imageCaption": "Figure 3"},
        ]);
        let paragraphs = normalize_paragraphs(Some(&raw)).unwrap();

        let contents: Vec<_> = paragraphs.iter().map(|p| p.content.as_str()).collect();
        assert_eq!(contents, ["one", "two", "three"]);
        assert_eq!(paragraphs[0].image_public_id.as_deref(), Some("posts/b"));
        assert_eq!(paragraphs[1].image_public_id, None);
        assert_eq!(paragraphs[2].image_caption.as_deref(), Some("Figure 3"));
    }

    #[test]
    fn test_known_identifier_wins_over_derived_one() {
        let raw = json!([
            {"content": "kept", "image": "https://cdn.example.org/figures/fig1.png"},
            {"content": "derived", "image": IMG_A},
            {"content": "explicit", "image": IMG_B, "imagePublicId": "uploaded/b"},
        ]);
        let known = |url: &str| match url {
            "https://cdn.example.org/figures/fig1.png" => Some("lab/fig1".to_string()),
            _ if url == IMG_B => Some("stale/b".to_string()),
            _ => None,
        };

        let paragraphs = normalize_paragraphs_with(Some(&raw), known).unwrap();

        assert_eq!(paragraphs[0].image_public_id.as_deref(), Some("lab/fig1"));
        assert_eq!(paragraphs[1].image_public_id.as_deref(), Some("posts/a"));
        assert_eq!(paragraphs[2].image_public_id.as_deref(), Some("uploaded/b"));
    }

    #[test]
    fn test_authors_accept_array_and_encoded_string() {
        assert_eq!(
            normalize_authors(Some(&json!(["Ada", "Grace"]))).unwrap(),
            Some(vec!["Ada".to_string(), "Grace".to_string()])
        );
        assert_eq!(
            normalize_authors(Some(&json!(r#"["Ada"]"#))).unwrap(),
            Some(vec!["Ada".to_string()])
        );
        assert_eq!(normalize_authors(Some(&json!([]))).unwrap(), Some(vec![]));
        assert_eq!(normalize_authors(None).unwrap(), None);
    }

    #[test]
    fn test_authors_reject_bad_input() {
        let err = normalize_authors(Some(&json!("[Ada"))).unwrap_err();
        assert_eq!(
            message(err),
            "Invalid authors format. Authors must be a valid JSON array."
        );
        assert!(normalize_authors(Some(&json!({"name": "Ada"}))).is_err());
        assert!(normalize_authors(Some(&json!([1, 2]))).is_err());
    }
}
