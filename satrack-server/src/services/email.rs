//! Email Service
//!
//! SMTP delivery of password-reset codes. When SMTP is not configured the
//! mailer degrades to a no-op so development setups can still exercise
//! the reset flow (the code is visible in the debug log only).

use crate::utils::AppError;
use lettre::message::{Mailbox, header::ContentType};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

/// SMTP connection settings
#[derive(Debug, Clone)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub pass: String,
    pub from: String,
}

impl SmtpConfig {
    /// Load from SMTP_* environment variables; None when the required
    /// variables are missing
    pub fn from_env() -> Option<Self> {
        let host = std::env::var("SMTP_HOST").ok()?;
        let user = std::env::var("SMTP_USER").ok()?;
        let pass = std::env::var("SMTP_PASS").ok()?;
        let port = std::env::var("SMTP_PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(587);
        let from = std::env::var("SMTP_FROM").unwrap_or_else(|_| format!("SATRACK <{}>", user));

        Some(Self {
            host,
            port,
            user,
            pass,
            from,
        })
    }
}

/// Outbound mailer
#[derive(Clone)]
pub struct Mailer {
    transport: Option<AsyncSmtpTransport<Tokio1Executor>>,
    from: Option<Mailbox>,
}

impl Mailer {
    pub fn new(config: Option<SmtpConfig>) -> Self {
        let Some(config) = config else {
            tracing::warn!("SMTP not configured; password reset emails are disabled");
            return Self {
                transport: None,
                from: None,
            };
        };

        let from = match config.from.parse::<Mailbox>() {
            Ok(mailbox) => mailbox,
            Err(e) => {
                tracing::warn!(error = %e, "Invalid SMTP_FROM address; mailer disabled");
                return Self {
                    transport: None,
                    from: None,
                };
            }
        };

        match AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host) {
            Ok(builder) => {
                let transport = builder
                    .port(config.port)
                    .credentials(Credentials::new(config.user, config.pass))
                    .build();
                tracing::info!(host = %config.host, port = config.port, "SMTP mailer ready");
                Self {
                    transport: Some(transport),
                    from: Some(from),
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to build SMTP transport; mailer disabled");
                Self {
                    transport: None,
                    from: None,
                }
            }
        }
    }

    /// Deliver a password-reset code to the given address
    pub async fn send_reset_code(&self, to: &str, code: &str) -> Result<(), AppError> {
        let (Some(transport), Some(from)) = (&self.transport, &self.from) else {
            tracing::debug!(code = %code, "Mailer disabled; reset code not emailed");
            return Ok(());
        };

        let email = Message::builder()
            .from(from.clone())
            .to(to
                .parse()
                .map_err(|e| AppError::validation(format!("Invalid email address: {}", e)))?)
            .subject("SATRACK password reset code")
            .header(ContentType::TEXT_HTML)
            .body(format!(
                "<p>Your password reset code is <b>{}</b>.</p>\
                 <p>The code expires in 10 minutes. If you did not request a reset, ignore this message.</p>",
                code
            ))
            .map_err(|e| AppError::internal(format!("Failed to build email: {}", e)))?;

        transport
            .send(email)
            .await
            .map_err(|e| AppError::internal(format!("Failed to send email: {}", e)))?;

        tracing::info!(to = %to, "Password reset email sent");
        Ok(())
    }
}
