use assert_matches::assert_matches;

use notification_cell::{NotificationError, SmtpEmailService};
use shared_models::error::AppError;
use shared_utils::test_utils::TestConfig;

#[test]
fn test_service_fails_without_credentials() {
    let mut config = TestConfig::default().to_app_config();
    config.smtp_password = "".to_string();

    let service = SmtpEmailService::new(&config);
    assert_matches!(service.err(), Some(NotificationError::NotConfigured));
}

#[test]
fn test_service_fails_without_sender() {
    let mut config = TestConfig::default().to_app_config();
    config.email_from = "".to_string();

    assert_matches!(SmtpEmailService::new(&config).err(), Some(NotificationError::NotConfigured));
}

#[tokio::test]
async fn test_service_builds_from_config() {
    let config = TestConfig::default().to_app_config();

    // Building the transport does not open a connection.
    assert!(SmtpEmailService::new(&config).is_ok());
}

#[tokio::test]
async fn test_malformed_sender_is_rejected() {
    let mut config = TestConfig::default().to_app_config();
    config.email_from = "Distrito Barbearia".to_string();

    assert_matches!(
        SmtpEmailService::new(&config).err(),
        Some(NotificationError::InvalidAddress(ref a)) if a == "Distrito Barbearia"
    );
}

#[test]
fn test_delivery_errors_map_to_email_send_failed() {
    for err in [
        NotificationError::NotConfigured,
        NotificationError::InvalidAddress("x".to_string()),
        NotificationError::SendFailed("535 authentication failed".to_string()),
    ] {
        assert_matches!(AppError::from(err), AppError::EmailSendFailed);
    }
}
