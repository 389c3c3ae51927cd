//! Feedback submission - typed request body and validated input
//!
//! Validation runs in a fixed order and stops at the first failure:
//! body, field presence (name, subject, message), then content rules.

use serde::Deserialize;
use serde_json::Value;

use super::ValidationError;

/// Minimum message length, counted in characters after trimming
pub const MIN_MESSAGE_LEN: usize = 10;

/// Raw `POST /feedback` body.
///
/// Every field is optional here so that absence, `null` and wrong types
/// are reported with the field name instead of a generic parse error.
#[derive(Debug, Default, Deserialize)]
pub struct FeedbackPayload {
    #[serde(default)]
    pub name: Option<Value>,
    #[serde(default)]
    pub subject: Option<Value>,
    #[serde(default)]
    pub message: Option<Value>,
}

impl FeedbackPayload {
    /// Parse a request body.
    ///
    /// Anything that is not a non-empty JSON object is rejected with
    /// [`ValidationError::BodyRequired`].
    pub fn from_slice(body: &[u8]) -> Result<Self, ValidationError> {
        let value: Value =
            serde_json::from_slice(body).map_err(|_| ValidationError::BodyRequired)?;

        match value {
            Value::Object(map) if !map.is_empty() => {
                serde_json::from_value(Value::Object(map)).map_err(|_| ValidationError::BodyRequired)
            }
            _ => Err(ValidationError::BodyRequired),
        }
    }
}

/// Validated feedback, trimmed and ready to persist
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewFeedback {
    name: String,
    subject: String,
    message: String,
}

impl NewFeedback {
    /// Validate and trim the three fields.
    ///
    /// # Example
    /// ```
    /// use feedback_server::models::NewFeedback;
    ///
    /// let fb = NewFeedback::new("  Ada ", "Docs", "Great tutorial!").unwrap();
    /// assert_eq!(fb.name(), "Ada");
    /// assert!(NewFeedback::new("Ada", "Docs", "too short").is_err());
    /// ```
    pub fn new(name: &str, subject: &str, message: &str) -> Result<Self, ValidationError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ValidationError::Empty { field: "Name" });
        }

        let subject = subject.trim();
        if subject.is_empty() {
            return Err(ValidationError::Empty { field: "Subject" });
        }

        let message = message.trim();
        if message.chars().count() < MIN_MESSAGE_LEN {
            return Err(ValidationError::TooShort {
                field: "Message",
                min: MIN_MESSAGE_LEN,
            });
        }

        Ok(Self {
            name: name.to_owned(),
            subject: subject.to_owned(),
            message: message.to_owned(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl TryFrom<FeedbackPayload> for NewFeedback {
    type Error = ValidationError;

    fn try_from(payload: FeedbackPayload) -> Result<Self, Self::Error> {
        let name = required_str("name", payload.name.as_ref())?;
        let subject = required_str("subject", payload.subject.as_ref())?;
        let message = required_str("message", payload.message.as_ref())?;

        Self::new(name, subject, message)
    }
}

/// A required field must be a non-empty string.
fn required_str<'a>(
    field: &'static str,
    value: Option<&'a Value>,
) -> Result<&'a str, ValidationError> {
    match value {
        Some(Value::String(s)) if !s.is_empty() => Ok(s),
        _ => Err(ValidationError::MissingField { field }),
    }
}
