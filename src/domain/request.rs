use crate::domain::value::{MessageText, PhoneNumber};

#[derive(Debug, Clone, PartialEq, Eq)]
/// A single outbound SMS: one destination number and one message text.
///
/// Built per call and discarded once the request completes. The adapter keeps
/// no copy of it between invocations.
pub struct SendSms {
    to: PhoneNumber,
    message: MessageText,
}

impl SendSms {
    /// Pair a destination with a message.
    pub fn new(to: PhoneNumber, message: MessageText) -> Self {
        Self { to, message }
    }

    /// Destination phone number.
    pub fn to(&self) -> &PhoneNumber {
        &self.to
    }

    /// Message text.
    pub fn message(&self) -> &MessageText {
        &self.message
    }
}
