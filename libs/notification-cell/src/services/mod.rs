pub mod email;
pub mod template;

pub use email::{ConfirmationMailer, SmtpEmailService};
