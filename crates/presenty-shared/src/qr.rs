//! QR payload codec.
//!
//! A teacher screen renders a [`SessionReference`] as a compact JSON object;
//! the student scanner decodes it back. Decoding is strict: every field must
//! be present and a string, and values are returned exactly as scanned.

use serde_json::{Map, Value};

use crate::error::DecodeError;
use crate::types::SessionReference;

const FIELD_SESSION_ID: &str = "sessionId";
const FIELD_DIVISION: &str = "division";
const FIELD_DATE: &str = "date";
const FIELD_YEAR: &str = "year";

/// Decode scanned QR text into a session reference.
pub fn decode(raw: &str) -> Result<SessionReference, DecodeError> {
    // Cheap rejection of barcodes that are obviously not ours.
    if !raw.trim_start().starts_with('{') {
        return Err(DecodeError::Format);
    }

    let value: Value = serde_json::from_str(raw).map_err(|e| DecodeError::Parse(e.to_string()))?;
    let Value::Object(fields) = value else {
        return Err(DecodeError::Format);
    };

    Ok(SessionReference {
        session_id: required(&fields, FIELD_SESSION_ID)?,
        division: required(&fields, FIELD_DIVISION)?,
        date: required(&fields, FIELD_DATE)?,
        year: required(&fields, FIELD_YEAR)?,
    })
}

/// Encode a session reference as the text shown in the QR code.
///
/// Fields come out in declaration order: `sessionId, division, date, year`.
/// A struct of plain strings always serializes, so this cannot fail.
pub fn encode(reference: &SessionReference) -> String {
    serde_json::to_string(reference).expect("session reference serialization")
}

fn required(fields: &Map<String, Value>, name: &'static str) -> Result<String, DecodeError> {
    fields
        .get(name)
        .and_then(Value::as_str)
        .map(str::to_owned)
        .ok_or(DecodeError::Schema(name))
}
