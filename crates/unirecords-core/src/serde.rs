//! Serde helpers for loosely typed backend payloads.

use serde::{Deserialize, Deserializer};

/// Deserializes an optional string, treating `""` as `None`.
///
/// The backend sends empty strings for cleared optional text columns
/// (descriptions, positions, phone numbers).
pub fn deserialize_optional_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt: Option<String> = Option::deserialize(deserializer)?;
    Ok(opt.filter(|s| !s.trim().is_empty()))
}

/// Deserializes a number that may arrive as a JSON number or a numeric string.
///
/// Decimal columns (CGPA, grade points) are serialized as strings by some
/// backend drivers.
pub fn deserialize_optional_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumberOrString {
        Number(f64),
        String(String),
    }

    match Option::<NumberOrString>::deserialize(deserializer)? {
        None => Ok(None),
        Some(NumberOrString::Number(n)) => Ok(Some(n)),
        Some(NumberOrString::String(s)) if s.trim().is_empty() => Ok(None),
        Some(NumberOrString::String(s)) => s
            .trim()
            .parse::<f64>()
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Row {
        #[serde(default, deserialize_with = "deserialize_optional_string")]
        position: Option<String>,
        #[serde(default, deserialize_with = "deserialize_optional_f64")]
        cgpa: Option<f64>,
    }

    #[test]
    fn test_empty_string_is_none() {
        let row: Row = serde_json::from_str(r#"{"position":""}"#).unwrap();
        assert_eq!(row.position, None);
    }

    #[test]
    fn test_numeric_string_is_parsed() {
        let row: Row = serde_json::from_str(r#"{"cgpa":"4.25"}"#).unwrap();
        assert_eq!(row.cgpa, Some(4.25));

        let row: Row = serde_json::from_str(r#"{"cgpa":3.5}"#).unwrap();
        assert_eq!(row.cgpa, Some(3.5));
    }

    #[test]
    fn test_missing_fields_default_to_none() {
        let row: Row = serde_json::from_str("{}").unwrap();
        assert_eq!(row.position, None);
        assert_eq!(row.cgpa, None);
    }

    #[test]
    fn test_garbage_number_is_an_error() {
        assert!(serde_json::from_str::<Row>(r#"{"cgpa":"n/a"}"#).is_err());
    }
}
