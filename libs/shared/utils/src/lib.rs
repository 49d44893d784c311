pub mod redact;
pub mod test_utils;

pub use redact::redact_sensitive;
