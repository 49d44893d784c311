use std::env;
use std::str::FromStr;
use tracing::warn;

pub const DEFAULT_BUSINESS_OPEN_MINUTES: u32 = 540;
pub const DEFAULT_BUSINESS_CLOSE_MINUTES: u32 = 1080;
pub const DEFAULT_SLOT_BUFFER_MINUTES: u32 = 15;
pub const DEFAULT_SMTP_HOST: &str = "smtp.gmail.com";
pub const DEFAULT_SMTP_PORT: u16 = 465;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub document_store_url: String,
    pub document_store_api_key: String,
    pub appointments_collection: String,
    pub smtp_host: String,
    pub smtp_port: u16,
    pub smtp_username: String,
    pub smtp_password: String,
    pub email_from: String,
    pub barbers_catalog_path: Option<String>,
    pub services_catalog_path: Option<String>,
    pub business_open_minutes: u32,
    pub business_close_minutes: u32,
    pub slot_buffer_minutes: u32,
    pub port: u16,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            document_store_url: String::new(),
            document_store_api_key: String::new(),
            appointments_collection: "appointments".to_string(),
            smtp_host: DEFAULT_SMTP_HOST.to_string(),
            smtp_port: DEFAULT_SMTP_PORT,
            smtp_username: String::new(),
            smtp_password: String::new(),
            email_from: String::new(),
            barbers_catalog_path: None,
            services_catalog_path: None,
            business_open_minutes: DEFAULT_BUSINESS_OPEN_MINUTES,
            business_close_minutes: DEFAULT_BUSINESS_CLOSE_MINUTES,
            slot_buffer_minutes: DEFAULT_SLOT_BUFFER_MINUTES,
            port: 3000,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let smtp_username = env_with_fallback("SMTP_USERNAME", "GMAIL_USER").unwrap_or_else(|| {
            warn!("SMTP_USERNAME not set, confirmation emails are disabled");
            String::new()
        });

        let config = Self {
            document_store_url: env::var("DOCUMENT_STORE_URL")
                .unwrap_or_else(|_| {
                    warn!("DOCUMENT_STORE_URL not set, using empty value");
                    String::new()
                }),
            document_store_api_key: env::var("DOCUMENT_STORE_API_KEY")
                .unwrap_or_else(|_| {
                    warn!("DOCUMENT_STORE_API_KEY not set, using empty value");
                    String::new()
                }),
            appointments_collection: env::var("APPOINTMENTS_COLLECTION")
                .unwrap_or(defaults.appointments_collection),
            smtp_host: env::var("SMTP_HOST").unwrap_or(defaults.smtp_host),
            smtp_port: parse_or("SMTP_PORT", defaults.smtp_port),
            smtp_username: smtp_username.clone(),
            smtp_password: env_with_fallback("SMTP_PASSWORD", "GMAIL_APP_PASSWORD").unwrap_or_else(|| {
                warn!("SMTP_PASSWORD not set, confirmation emails are disabled");
                String::new()
            }),
            // The authenticated mailbox sends unless another sender is given.
            email_from: env::var("EMAIL_FROM").unwrap_or(smtp_username),
            barbers_catalog_path: env::var("BARBERS_CATALOG_PATH").ok(),
            services_catalog_path: env::var("SERVICES_CATALOG_PATH").ok(),
            business_open_minutes: parse_or("BUSINESS_OPEN_MINUTES", defaults.business_open_minutes),
            business_close_minutes: parse_or("BUSINESS_CLOSE_MINUTES", defaults.business_close_minutes),
            slot_buffer_minutes: parse_or("SLOT_BUFFER_MINUTES", defaults.slot_buffer_minutes),
            port: parse_or("PORT", defaults.port),
        };

        if !config.is_configured() {
            warn!("Application not fully configured - missing document store environment variables");
        }

        config
    }

    pub fn is_configured(&self) -> bool {
        !self.document_store_url.is_empty() && !self.document_store_api_key.is_empty()
    }

    pub fn is_email_configured(&self) -> bool {
        !self.smtp_host.is_empty()
            && !self.smtp_username.is_empty()
            && !self.smtp_password.is_empty()
            && !self.email_from.is_empty()
    }
}

fn env_with_fallback(key: &str, legacy_key: &str) -> Option<String> {
    env::var(key).or_else(|_| env::var(legacy_key)).ok().filter(|v| !v.is_empty())
}

fn parse_or<T>(key: &str, default: T) -> T
where
    T: FromStr + std::fmt::Display,
{
    match env::var(key) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!("{} has invalid value {:?}, using default {}", key, raw, default);
            default
        }),
        Err(_) => default,
    }
}
