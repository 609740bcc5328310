//! Validation for annotated-PDF markup payloads.
//!
//! The markup payload is opaque to this system beyond its outer shape: a
//! JSON array of shape/markup objects produced by the viewer. Per-shape
//! schemas belong to the client; the server only refuses payloads it could
//! not round-trip.

use crate::error::CoreError;

/// Parse and validate an annotations payload submitted as a JSON string.
///
/// The string must parse as JSON and the top-level value must be an array
/// whose elements are objects. Returns the parsed value so callers bind
/// exactly what was validated.
pub fn parse_annotations(raw: &str) -> Result<serde_json::Value, CoreError> {
    let value: serde_json::Value = serde_json::from_str(raw)
        .map_err(|e| CoreError::Validation(format!("annotations is not valid JSON: {e}")))?;
    validate_annotations(&value)?;
    Ok(value)
}

/// Validate an already-parsed annotations payload.
pub fn validate_annotations(value: &serde_json::Value) -> Result<(), CoreError> {
    let arr = value
        .as_array()
        .ok_or_else(|| CoreError::Validation("annotations must be a JSON array".to_string()))?;

    for (i, item) in arr.iter().enumerate() {
        if !item.is_object() {
            return Err(CoreError::Validation(format!(
                "annotations[{i}] must be a JSON object"
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn array_of_objects_accepted() {
        let value = parse_annotations(r#"[{"type":"rect","x":1},{"type":"ink","points":[]}]"#)
            .unwrap();
        assert_eq!(value.as_array().unwrap().len(), 2);
    }

    #[test]
    fn empty_array_accepted() {
        assert!(parse_annotations("[]").is_ok());
    }

    #[test]
    fn invalid_json_rejected() {
        let err = parse_annotations("{not json").unwrap_err();
        assert!(err.to_string().contains("not valid JSON"));
    }

    #[test]
    fn non_array_rejected() {
        let err = parse_annotations(r#"{"type":"rect"}"#).unwrap_err();
        assert!(err.to_string().contains("must be a JSON array"));
    }

    #[test]
    fn non_object_element_rejected() {
        let err = validate_annotations(&json!(["rect"])).unwrap_err();
        assert!(err.to_string().contains("annotations[0]"));
    }
}
