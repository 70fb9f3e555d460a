use serde_json::Value;
use std::fmt;
use crate::models::employee::Record;

#[derive(Debug)]
pub enum DecodeError {
    Malformed(serde_json::Error),
    NotASequence,
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodeError::Malformed(err) => write!(f, "Malformed store content: {}", err),
            DecodeError::NotASequence => write!(f, "Store content is not a JSON array"),
        }
    }
}

impl std::error::Error for DecodeError {}

/// Parses stored text. Blank input is an empty collection, not an error.
pub fn decode(raw: &str) -> Result<Vec<Record>, DecodeError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(Vec::new());
    }

    match serde_json::from_str::<Value>(raw).map_err(DecodeError::Malformed)? {
        Value::Array(records) => Ok(records),
        _ => Err(DecodeError::NotASequence),
    }
}

/// Like [`decode`], but a bad store reads as empty.
pub fn decode_or_empty(raw: &str) -> Vec<Record> {
    decode(raw).unwrap_or_else(|err| {
        log::warn!("{}; treating store as empty", err);
        Vec::new()
    })
}

/// Pretty-printed JSON array with a trailing newline.
pub fn encode(records: &[Record]) -> Result<String, serde_json::Error> {
    let mut text = serde_json::to_string_pretty(records)?;
    text.push('\n');
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn blank_input_is_empty() {
        assert!(decode("").unwrap().is_empty());
        assert!(decode("  \n").unwrap().is_empty());
    }

    #[test]
    fn truncated_input_is_malformed() {
        let err = decode("[{\"id\": 1,").unwrap_err();
        assert!(matches!(err, DecodeError::Malformed(_)));
        assert!(decode_or_empty("[{\"id\": 1,").is_empty());
    }

    #[test]
    fn non_array_is_rejected() {
        assert!(matches!(decode("{\"id\": 1}"), Err(DecodeError::NotASequence)));
        assert!(decode_or_empty("42").is_empty());
        assert!(decode_or_empty("not json at all").is_empty());
    }

    #[test]
    fn encode_is_pretty_with_trailing_newline() {
        let text = encode(&[json!({"id": 1})]).unwrap();
        assert_eq!(text, "[\n  {\n    \"id\": 1\n  }\n]\n");
        assert_eq!(encode(&[]).unwrap(), "[]\n");
    }

    #[test]
    fn round_trip_keeps_order_and_fields() {
        let records = vec![
            json!({"id": 2, "employee_name": "B", "date_of_birth": null, "learning": []}),
            json!({"id": 1, "employee_name": "A", "date_of_birth": "1990-01-01", "careerGrowth": []}),
        ];

        let text = encode(&records).unwrap();
        assert_eq!(decode(&text).unwrap(), records);

        // Field order inside each record is preserved too.
        let id_pos = text.find("\"id\"").unwrap();
        let name_pos = text.find("\"employee_name\"").unwrap();
        assert!(id_pos < name_pos);
    }
}
