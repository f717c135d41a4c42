//! SMS sender adapter for generic REST backends.
//!
//! The backend contract is deliberately small: the adapter POSTs a JSON
//! `{"to": ..., "message": ...}` envelope to a configured endpoint and reads
//! the HTTP status back. A 200 means the message was accepted, a 400 with
//! `{"error": "invalid-phonenumber"}` means the destination number was
//! rejected (a normal outcome, reported as `Ok(false)`), and anything else is
//! an external service fault.
//!
//! ```rust,no_run
//! use smsrest::{MessageText, PhoneNumber, SendSms, SmsRestClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), smsrest::SmsRestError> {
//!     let client = SmsRestClient::new("https://sms.example.com/send");
//!     let request = SendSms::new(
//!         PhoneNumber::new("+46701234567")?,
//!         MessageText::new("Your verification code is 123456")?,
//!     );
//!     if client.send_sms(request).await? {
//!         println!("accepted");
//!     } else {
//!         println!("rejected: invalid phone number");
//!     }
//!     Ok(())
//! }
//! ```
#![forbid(unsafe_code)]

pub mod client;
pub mod domain;
mod transport;

pub use client::{SmsRestClient, SmsRestClientBuilder, SmsRestError};
pub use domain::{MessageText, PhoneNumber, SendSms, ValidationError};
