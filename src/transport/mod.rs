//! Transport layer: wire-format details (serialization/deserialization).

mod send_sms;

pub use send_sms::{decode_error_code, encode_send_sms_json};
