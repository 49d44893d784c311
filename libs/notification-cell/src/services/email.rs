use std::fmt::Display;

use async_trait::async_trait;
use chrono::Utc;
use lettre::message::{Mailbox, MultiPart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Address, AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use tracing::{debug, error, info};
use uuid::Uuid;

use shared_config::AppConfig;

use crate::models::{ConfirmationEmail, EmailReceipt, NotificationError};
use crate::services::template::{self, SHOP_NAME};

/// Delivers appointment confirmation emails.
#[async_trait]
pub trait ConfirmationMailer: Send + Sync {
    async fn send_confirmation_email(
        &self,
        email: &ConfirmationEmail,
    ) -> Result<EmailReceipt, NotificationError>;
}

/// Sends confirmations as `multipart/alternative` mail through an SMTP
/// submission server (implicit TLS, authenticated).
pub struct SmtpEmailService<T = AsyncSmtpTransport<Tokio1Executor>> {
    transport: T,
    from: Mailbox,
}

impl SmtpEmailService {
    pub fn new(config: &AppConfig) -> Result<Self, NotificationError> {
        if !config.is_email_configured() {
            return Err(NotificationError::NotConfigured);
        }

        let transport = AsyncSmtpTransport::<Tokio1Executor>::relay(&config.smtp_host)
            .map_err(|e| {
                error!(host = %config.smtp_host, "Invalid SMTP relay: {}", e);
                NotificationError::NotConfigured
            })?
            .port(config.smtp_port)
            .credentials(Credentials::new(
                config.smtp_username.clone(),
                config.smtp_password.clone(),
            ))
            .build();

        info!(
            host = %config.smtp_host,
            port = config.smtp_port,
            user = %config.smtp_username,
            "SMTP transport configured"
        );

        Self::with_transport(transport, &config.email_from)
    }
}

impl<T> SmtpEmailService<T> {
    pub fn with_transport(transport: T, from: &str) -> Result<Self, NotificationError> {
        Ok(Self {
            transport,
            from: Mailbox::new(Some(SHOP_NAME.to_string()), parse_address(from)?),
        })
    }

    /// Returns the generated `Message-ID` together with the message.
    fn build_message(&self, email: &ConfirmationEmail) -> Result<(String, Message), NotificationError> {
        let to = Mailbox::new(
            Some(email.customer_name.clone()),
            parse_address(&email.customer_email)?,
        );
        let message_id = format!("<{}@{}>", Uuid::new_v4(), self.from.email.domain());

        let message = Message::builder()
            .from(self.from.clone())
            .to(to)
            .subject(template::subject(email))
            .message_id(Some(message_id.clone()))
            .multipart(MultiPart::alternative_plain_html(
                template::render_text(email),
                template::render_html(email),
            ))
            .map_err(|e| NotificationError::SendFailed(e.to_string()))?;

        Ok((message_id, message))
    }
}

fn parse_address(address: &str) -> Result<Address, NotificationError> {
    address
        .trim()
        .parse::<Address>()
        .map_err(|_| NotificationError::InvalidAddress(address.to_string()))
}

#[async_trait]
impl<T> ConfirmationMailer for SmtpEmailService<T>
where
    T: AsyncTransport + Send + Sync,
    T::Ok: Send,
    T::Error: Display + Send,
{
    async fn send_confirmation_email(
        &self,
        email: &ConfirmationEmail,
    ) -> Result<EmailReceipt, NotificationError> {
        info!(
            confirmation_code = %email.confirmation_code,
            date = %email.date,
            time = %email.time,
            "Sending confirmation email"
        );

        let (message_id, message) = self.build_message(email)?;
        debug!(message_id = %message_id, from = %self.from, "Email content prepared");

        self.transport.send(message).await.map_err(|e| {
            error!(
                confirmation_code = %email.confirmation_code,
                "Error sending email: {}", e
            );
            NotificationError::SendFailed(e.to_string())
        })?;

        info!(
            message_id = %message_id,
            confirmation_code = %email.confirmation_code,
            "Email sent successfully"
        );

        Ok(EmailReceipt {
            message_id,
            sent_at: Utc::now(),
        })
    }
}
