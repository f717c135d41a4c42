//! Domain layer: strong types with validation and invariants (no I/O).

mod request;
mod validation;
mod value;

pub use request::SendSms;
pub use validation::ValidationError;
pub use value::{MessageText, PhoneNumber};
