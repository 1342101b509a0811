//! Wire payloads of the `/contacts` endpoint.
//!
//! Bodies are parsed here rather than by an axum extractor so that every
//! malformed body reaches the handler and ends in the generic error reply.

use contacts_core::{ContactDraft, ContactId};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use std::error::Error;
use std::fmt::{Display, Formatter};

#[derive(Debug)]
pub enum PayloadError {
    Malformed(serde_json::Error),
    /// Valid JSON whose top-level value is not an object.
    NotAnObject,
    InvalidId(String),
}

impl Display for PayloadError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Malformed(err) => write!(f, "malformed payload: {err}"),
            Self::NotAnObject => write!(f, "payload is not a JSON object"),
            Self::InvalidId(raw) => write!(f, "id `{raw}` is not an integer"),
        }
    }
}

impl Error for PayloadError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Malformed(err) => Some(err),
            Self::NotAnObject | Self::InvalidId(_) => None,
        }
    }
}

impl From<serde_json::Error> for PayloadError {
    fn from(value: serde_json::Error) -> Self {
        Self::Malformed(value)
    }
}

/// An `id` as clients send it: a number or a numeric string.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawContactId {
    Integer(i64),
    Float(f64),
    Text(String),
}

impl RawContactId {
    fn coerce(self) -> Result<ContactId, PayloadError> {
        match self {
            Self::Integer(id) => Ok(id),
            Self::Float(value) => {
                whole_id(value).ok_or_else(|| PayloadError::InvalidId(value.to_string()))
            }
            Self::Text(text) => coerce_numeric_text(&text),
        }
    }
}

/// Reads a string id the way a JavaScript `Number(...)` call would, keeping
/// only results that are whole numbers.
fn coerce_numeric_text(text: &str) -> Result<ContactId, PayloadError> {
    let invalid = || PayloadError::InvalidId(text.to_string());
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Ok(0);
    }
    if let Ok(id) = trimmed.parse::<i64>() {
        return Ok(id);
    }

    let radix_digits = [("0x", 16), ("0o", 8), ("0b", 2)]
        .into_iter()
        .find_map(|(prefix, radix)| {
            let head = trimmed.get(..2)?;
            head.eq_ignore_ascii_case(prefix)
                .then(|| (&trimmed[2..], radix))
        });
    if let Some((digits, radix)) = radix_digits {
        // `from_str_radix` tolerates a leading sign, `Number` does not.
        if !digits.chars().all(|c| c.is_digit(radix)) {
            return Err(invalid());
        }
        return i64::from_str_radix(digits, radix).map_err(|_| invalid());
    }

    // Rust also accepts `inf`/`nan` spellings; the whole-number check drops them.
    let value = trimmed.parse::<f64>().map_err(|_| invalid())?;
    whole_id(value).ok_or_else(invalid)
}

fn whole_id(value: f64) -> Option<ContactId> {
    // `i64::MAX as f64` rounds up to 2^63, which is already out of range.
    let in_range = value >= i64::MIN as f64 && value < i64::MAX as f64;
    (value.fract() == 0.0 && in_range).then(|| value as i64)
}

#[derive(Debug, Deserialize)]
struct UpdateBody {
    name: String,
    email: String,
    phone: String,
    #[serde(default)]
    company: Option<String>,
    id: RawContactId,
}

#[derive(Debug, Deserialize)]
struct DeleteBody {
    id: RawContactId,
}

/// Deserializes `body` only when it is a JSON object; derived struct impls
/// would otherwise also accept a positional array.
fn parse_object<T: DeserializeOwned>(body: &[u8]) -> Result<T, PayloadError> {
    match serde_json::from_slice::<Value>(body)? {
        object @ Value::Object(_) => Ok(serde_json::from_value(object)?),
        _ => Err(PayloadError::NotAnObject),
    }
}

/// Parses a create body `{name, email, phone, company}`.
pub fn parse_create(body: &[u8]) -> Result<ContactDraft, PayloadError> {
    parse_object(body)
}

/// Parses an update body `{name, email, phone, company, id}`.
pub fn parse_update(body: &[u8]) -> Result<(ContactId, ContactDraft), PayloadError> {
    let body: UpdateBody = parse_object(body)?;
    let id = body.id.coerce()?;
    Ok((
        id,
        ContactDraft::new(body.name, body.email, body.phone, body.company),
    ))
}

/// Parses a delete body `{id}`.
pub fn parse_delete(body: &[u8]) -> Result<ContactId, PayloadError> {
    let body: DeleteBody = parse_object(body)?;
    body.id.coerce()
}
