//! Report delivery over SMTP.
//!
//! The pipeline only knows [`ReportDispatcher`]; the production
//! implementation sends the digest as a plain-text email where the recipient
//! is the sending account itself.

use lettre::message::Mailbox;
use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use tracing::{info, instrument};

use crate::error::DeliveryError;

/// Capability to hand the finished digest to the outside world.
pub trait ReportDispatcher {
    async fn deliver(&self, subject: &str, body: &str) -> Result<(), DeliveryError>;
}

/// Delivers the digest via an implicit-TLS SMTP relay (port 465).
pub struct SmtpDispatcher {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    mailbox: Mailbox,
}

impl SmtpDispatcher {
    /// Build a dispatcher for `email`, authenticating against `smtp_host`
    /// with an app password. The mailbox is parsed here so a bad address
    /// fails at startup, not after a full scrape.
    pub fn new(smtp_host: &str, email: &str, app_password: &str) -> Result<Self, DeliveryError> {
        let mailbox: Mailbox = email
            .parse()
            .map_err(|e| DeliveryError::Message(Box::new(e)))?;

        let transport = AsyncSmtpTransport::<Tokio1Executor>::relay(smtp_host)
            .map_err(|e| DeliveryError::Transport(Box::new(e)))?
            .credentials(Credentials::new(
                email.to_string(),
                app_password.to_string(),
            ))
            .build();

        Ok(Self { transport, mailbox })
    }
}

impl ReportDispatcher for SmtpDispatcher {
    #[instrument(level = "info", skip_all)]
    async fn deliver(&self, subject: &str, body: &str) -> Result<(), DeliveryError> {
        let message = Message::builder()
            .from(self.mailbox.clone())
            .to(self.mailbox.clone())
            .subject(subject)
            .header(ContentType::TEXT_PLAIN)
            .body(body.to_string())
            .map_err(|e| DeliveryError::Message(Box::new(e)))?;

        self.transport
            .send(message)
            .await
            .map_err(|e| DeliveryError::Transport(Box::new(e)))?;

        info!(subject, bytes = body.len(), "digest email sent");
        Ok(())
    }
}
