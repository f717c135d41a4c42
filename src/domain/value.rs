use crate::domain::validation::ValidationError;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Destination phone number, kept exactly as the caller supplied it.
///
/// Invariant: non-empty after trimming. No format validation is performed
/// here; the REST backend is the authority on what counts as a valid number
/// and signals rejection with `{"error": "invalid-phonenumber"}`.
pub struct PhoneNumber(String);

impl PhoneNumber {
    /// JSON field name used on the wire (`to`).
    pub const FIELD: &'static str = "to";

    /// Create a validated [`PhoneNumber`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the number as it will be sent.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// SMS message text.
///
/// Invariant: must not be empty (whitespace is preserved and allowed).
pub struct MessageText(String);

impl MessageText {
    /// JSON field name used on the wire (`message`).
    pub const FIELD: &'static str = "message";

    /// Create a validated [`MessageText`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(value))
    }

    /// Borrow the message text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}
