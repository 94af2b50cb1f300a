//! Notification transport seam. The core hands `(recipient, subject, body)`
//! to a `Notifier`; delivery mechanics live behind this trait.

use async_trait::async_trait;
use libroster_core::config::SmtpConfig;
use libroster_core::{Result, RosterError};

#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send(&self, recipient: &str, subject: &str, body: &str) -> Result<()>;
}

/// SMTP delivery via async lettre (STARTTLS relay). Works with Gmail,
/// Outlook, or any custom relay.
pub struct SmtpNotifier {
    config: SmtpConfig,
}

impl SmtpNotifier {
    pub fn new(config: SmtpConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl Notifier for SmtpNotifier {
    async fn send(&self, recipient: &str, subject: &str, body: &str) -> Result<()> {
        use lettre::{
            AsyncSmtpTransport, AsyncTransport, Message, message::Mailbox,
            message::header::ContentType, transport::smtp::authentication::Credentials,
        };

        let from_name = self.config.display_name.as_deref().unwrap_or("Library Roster");
        let from_mailbox: Mailbox = format!("{from_name} <{}>", self.config.email)
            .parse()
            .map_err(|e| RosterError::Notify(format!("Invalid from: {e}")))?;

        let to_mailbox: Mailbox = recipient
            .parse()
            .map_err(|e| RosterError::Notify(format!("Invalid to: {e}")))?;

        let email = Message::builder()
            .from(from_mailbox)
            .to(to_mailbox)
            .subject(subject)
            .header(ContentType::TEXT_PLAIN)
            .body(body.to_string())
            .map_err(|e| RosterError::Notify(format!("Build email: {e}")))?;

        let creds = Credentials::new(self.config.email.clone(), self.config.password.clone());

        let mailer = AsyncSmtpTransport::<lettre::Tokio1Executor>::starttls_relay(&self.config.host)
            .map_err(|e| RosterError::Notify(format!("SMTP relay: {e}")))?
            .port(self.config.port)
            .credentials(creds)
            .build();

        mailer
            .send(email)
            .await
            .map_err(|e| RosterError::Notify(format!("SMTP send: {e}")))?;

        tracing::info!("📤 Email sent to: {recipient}");
        Ok(())
    }
}

/// Logs instead of delivering. Used when SMTP is not configured so digest
/// endpoints still work in development.
pub struct NullNotifier;

#[async_trait]
impl Notifier for NullNotifier {
    async fn send(&self, recipient: &str, subject: &str, _body: &str) -> Result<()> {
        tracing::info!("📭 SMTP disabled — would send to {recipient}: {subject}");
        Ok(())
    }
}
