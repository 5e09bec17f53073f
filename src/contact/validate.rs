use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;

const MIN_NAME_CHARS: usize = 2;
const MIN_MESSAGE_CHARS: usize = 10;

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is a valid regex")
});

/// A contact form submission. Never persisted.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ContactSubmission {
    /// Sender name.
    pub name: String,
    /// Reply address.
    pub email: String,
    /// Message body.
    pub message: String,
}

/// Form field a validation message belongs to.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum ContactField {
    /// `name`
    Name,
    /// `email`
    Email,
    /// `message`
    Message,
}

/// Validation messages grouped by field. Only failing fields are present.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct FieldErrors(pub BTreeMap<ContactField, Vec<String>>);

impl FieldErrors {
    /// `true` when every field passed.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Messages for `field`.
    pub fn field(&self, field: ContactField) -> &[String] {
        self.0.get(&field).map(Vec::as_slice).unwrap_or(&[])
    }

    fn push(&mut self, field: ContactField, msg: impl Into<String>) {
        self.0.entry(field).or_default().push(msg.into());
    }
}

impl ContactSubmission {
    /// Create a submission.
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            message: message.into(),
        }
    }

    /// Check every field, collecting all failures.
    ///
    /// Lengths count Unicode scalar values.
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::default();
        if self.name.chars().count() < MIN_NAME_CHARS {
            errors.push(
                ContactField::Name,
                format!("Name must be at least {MIN_NAME_CHARS} characters"),
            );
        }
        if !EMAIL_RE.is_match(&self.email) {
            errors.push(ContactField::Email, "Invalid email address");
        }
        if self.message.chars().count() < MIN_MESSAGE_CHARS {
            errors.push(
                ContactField::Message,
                format!("Message must be at least {MIN_MESSAGE_CHARS} characters"),
            );
        }
        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/contact/validate.rs"]
mod tests;
