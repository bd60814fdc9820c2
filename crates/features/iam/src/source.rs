//! Reading definitions documents.
//!
//! A document is either a bare JSON array of records or the envelope used by the
//! predefinitions export: `{"TypeFullName": "...", "Definitions": [...]}`.

use crate::error::{IamError, IamErrorExt};
use ccentral_kernel::domain::constants::PERMISSION_GROUP_TYPE;
use ccentral_kernel::domain::permission::DefinitionsDocument;
use serde_json::Value;
use std::fs;
use std::path::Path;
use tracing::debug;

const BOM: char = '\u{feff}';

/// Splits a definitions document into its raw records.
///
/// # Errors
/// * [`IamError::Json`] if `json` is not valid JSON.
/// * [`IamError::MalformedRecord`] if the document is neither an array nor an envelope, or the
///   envelope declares a type other than permission groups.
pub fn parse_document(json: &str) -> Result<Vec<Value>, IamError> {
    let json = json.strip_prefix(BOM).unwrap_or(json);
    let value: Value = serde_json::from_str(json).context("Parsing definitions document")?;

    match value {
        Value::Array(records) => Ok(records),
        Value::Object(_) => {
            let document: DefinitionsDocument<Value> =
                serde_json::from_value(value).map_err(|e| malformed(e.to_string()))?;

            if let Some(type_name) = document.type_full_name.as_deref()
                && type_name != PERMISSION_GROUP_TYPE
            {
                return Err(malformed(format!(
                    "expected definitions of '{PERMISSION_GROUP_TYPE}', found '{type_name}'"
                )));
            }

            Ok(document.definitions)
        },
        _ => Err(malformed("expected an array of records or a definitions envelope".to_owned())),
    }
}

/// Reads and splits the definitions document at `path`.
///
/// # Errors
/// [`IamError::Io`] if the file cannot be read, otherwise as [`parse_document`].
pub fn read_definitions(path: &Path) -> Result<Vec<Value>, IamError> {
    let json = fs::read_to_string(path).context(format!("Reading {}", path.display()))?;
    let records = parse_document(&json).context(format!("Parsing {}", path.display()))?;
    debug!(path = %path.display(), records = records.len(), "Definitions document read");
    Ok(records)
}

fn malformed(message: String) -> IamError {
    IamError::MalformedRecord { location: "document".into(), message: message.into(), context: None }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_array_and_envelope_are_equivalent() {
        let bare = parse_document(r#"[{"Name":"A","AccessLevels":{}}]"#).unwrap();
        let envelope = parse_document(
            r#"{"TypeFullName":"CommandCentral.Authorization.PermissionGroup",
                "Definitions":[{"Name":"A","AccessLevels":{}}]}"#,
        )
        .unwrap();
        assert_eq!(bare, envelope);
    }

    #[test]
    fn envelope_without_type_is_accepted() {
        let records = parse_document(r#"{"Definitions":[]}"#).unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn leading_bom_is_ignored() {
        let records = parse_document("\u{feff}[]").unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn foreign_envelope_is_rejected() {
        let err = parse_document(r#"{"TypeFullName":"CommandCentral.News","Definitions":[]}"#)
            .unwrap_err();
        assert!(matches!(err, IamError::MalformedRecord { ref location, .. } if location == "document"));
    }

    #[test]
    fn scalar_document_is_rejected() {
        assert!(matches!(parse_document("42").unwrap_err(), IamError::MalformedRecord { .. }));
        assert!(matches!(parse_document("{not json").unwrap_err(), IamError::Json { .. }));
    }
}
