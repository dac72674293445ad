use domain::NewUser;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email regex"));

/// One field-level validation failure, serialized into the 400 body.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Raw request body before validation. Every field is optional so a
/// missing or mistyped field becomes a `FieldError` instead of a
/// deserialization rejection with the wrong response shape.
#[derive(Debug, Default, Deserialize)]
pub struct RawUserPayload {
    pub name: Option<String>,
    pub email: Option<String>,
    pub age: Option<Value>,
}

/// Path ids arrive as raw text and must parse as an integer.
pub fn parse_id(raw: &str) -> Result<i32, FieldError> {
    raw.parse::<i32>()
        .map_err(|_| FieldError::new("id", "id must be an integer"))
}

fn check_name(name: Option<&str>) -> Result<String, FieldError> {
    match name {
        Some(name) if !name.trim().is_empty() => Ok(name.to_string()),
        _ => Err(FieldError::new("name", "name must not be empty")),
    }
}

fn check_email(email: Option<&str>) -> Result<String, FieldError> {
    match email {
        Some(email) if EMAIL_RE.is_match(email) => Ok(email.to_string()),
        _ => Err(FieldError::new(
            "email",
            "email must be a valid email address",
        )),
    }
}

// JSON integers and numeric strings both pass; floats and negatives do not.
fn check_age(age: Option<&Value>) -> Result<i32, FieldError> {
    let err = || {
        FieldError::new(
            "age",
            "age must be an integer greater than or equal to 0",
        )
    };

    let age = match age {
        Some(Value::Number(n)) => n.as_i64().ok_or_else(err)?,
        Some(Value::String(s)) => s.trim().parse::<i64>().map_err(|_| err())?,
        _ => return Err(err()),
    };

    if age < 0 {
        return Err(err());
    }
    i32::try_from(age).map_err(|_| err())
}

/// Run every field checker, aggregating failures before rejecting, so a
/// single 400 reports all offending fields at once.
pub fn validate_user_payload(payload: &RawUserPayload) -> Result<NewUser, Vec<FieldError>> {
    let mut errors = Vec::new();

    let name = check_name(payload.name.as_deref())
        .map_err(|e| errors.push(e))
        .ok();
    let email = check_email(payload.email.as_deref())
        .map_err(|e| errors.push(e))
        .ok();
    let age = check_age(payload.age.as_ref())
        .map_err(|e| errors.push(e))
        .ok();

    match (name, email, age) {
        (Some(name), Some(email), Some(age)) => Ok(NewUser::new(name, email, age)),
        _ => Err(errors),
    }
}
