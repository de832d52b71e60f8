//! Outgoing mail.

use async_trait::async_trait;
use lettre::message::{Mailbox, MultiPart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use obf_common::config::EmailSettings;
use obf_common::{AppError, AppResult};
use tracing::{debug, info};

/// SMTP port using implicit TLS; other ports use STARTTLS.
const SMTPS_PORT: u16 = 465;

/// A message with HTML and plain-text bodies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingEmail {
    pub to: Vec<String>,
    pub subject: String,
    pub html: String,
    pub text: String,
    pub reply_to: Option<String>,
}

/// Anything that can deliver an [`OutgoingEmail`].
#[async_trait]
pub trait Mailer: Send + Sync {
    /// Deliver the message to every recipient.
    async fn send(&self, email: OutgoingEmail) -> AppResult<()>;
}

/// SMTP mailer. Disabled when no email settings are configured.
#[derive(Clone)]
pub struct EmailService {
    transport: Option<AsyncSmtpTransport<Tokio1Executor>>,
    from: Option<Mailbox>,
}

impl EmailService {
    /// Build the mailer from settings.
    pub fn new(settings: Option<&EmailSettings>) -> AppResult<Self> {
        let Some(settings) = settings else {
            info!("Email is not configured, outgoing mail is disabled");
            return Ok(Self::disabled());
        };

        let builder = if settings.port == SMTPS_PORT {
            AsyncSmtpTransport::<Tokio1Executor>::relay(&settings.host)
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&settings.host)
        }
        .map_err(|e| AppError::Config(format!("Invalid SMTP host: {e}")))?;

        let builder = match (&settings.username, &settings.password) {
            (Some(username), Some(password)) => {
                builder.credentials(Credentials::new(username.clone(), password.clone()))
            }
            _ => builder,
        };

        let from = format!("{} <{}>", settings.from_name, settings.from_address)
            .parse::<Mailbox>()
            .map_err(|e| AppError::Config(format!("Invalid sender address: {e}")))?;

        Ok(Self {
            transport: Some(builder.port(settings.port).build()),
            from: Some(from),
        })
    }

    /// A mailer that refuses to send.
    #[must_use]
    pub const fn disabled() -> Self {
        Self {
            transport: None,
            from: None,
        }
    }

    /// Whether outgoing mail is configured.
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.transport.is_some()
    }
}

#[async_trait]
impl Mailer for EmailService {
    async fn send(&self, email: OutgoingEmail) -> AppResult<()> {
        let (Some(transport), Some(from)) = (&self.transport, &self.from) else {
            return Err(AppError::Email("Email is not configured".to_string()));
        };

        let message = build_message(from.clone(), &email)?;

        transport
            .send(message)
            .await
            .map_err(|e| AppError::Email(e.to_string()))?;

        debug!(recipients = email.to.len(), subject = %email.subject, "Email sent");
        Ok(())
    }
}

fn build_message(from: Mailbox, email: &OutgoingEmail) -> AppResult<Message> {
    if email.to.is_empty() {
        return Err(AppError::Email("No recipients".to_string()));
    }

    let mut builder = Message::builder().from(from).subject(email.subject.as_str());

    for recipient in &email.to {
        builder = builder.to(parse_mailbox(recipient)?);
    }
    if let Some(reply_to) = &email.reply_to {
        builder = builder.reply_to(parse_mailbox(reply_to)?);
    }

    builder
        .multipart(MultiPart::alternative_plain_html(
            email.text.clone(),
            email.html.clone(),
        ))
        .map_err(|e| AppError::Email(e.to_string()))
}

fn parse_mailbox(address: &str) -> AppResult<Mailbox> {
    address
        .parse()
        .map_err(|e| AppError::Email(format!("Invalid address {address}: {e}")))
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use std::sync::Mutex;

    /// Mailer that records messages, optionally failing every send.
    #[derive(Default)]
    pub struct RecordingMailer {
        pub sent: Mutex<Vec<OutgoingEmail>>,
        pub fail: bool,
    }

    impl RecordingMailer {
        pub fn failing() -> Self {
            Self {
                fail: true,
                ..Self::default()
            }
        }

        pub fn sent(&self) -> Vec<OutgoingEmail> {
            self.sent.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Mailer for RecordingMailer {
        async fn send(&self, email: OutgoingEmail) -> AppResult<()> {
            if self.fail {
                return Err(AppError::Email("relay refused".to_string()));
            }
            self.sent.lock().unwrap().push(email);
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn email(to: &[&str]) -> OutgoingEmail {
        OutgoingEmail {
            to: to.iter().map(ToString::to_string).collect(),
            subject: "Hello".to_string(),
            html: "<p>Hi</p>".to_string(),
            text: "Hi".to_string(),
            reply_to: Some("visitor@example.com".to_string()),
        }
    }

    fn sender() -> Mailbox {
        "T9L Venture <hello@t9l.com>".parse().unwrap()
    }

    #[tokio::test]
    async fn test_disabled_mailer_refuses() {
        let mailer = EmailService::disabled();
        assert!(!mailer.is_enabled());
        assert!(matches!(
            mailer.send(email(&["a@example.com"])).await,
            Err(AppError::Email(_))
        ));
    }

    #[test]
    fn test_message_requires_valid_recipients() {
        assert!(build_message(sender(), &email(&["a@example.com", "b@example.com"])).is_ok());
        assert!(build_message(sender(), &email(&[])).is_err());
        assert!(build_message(sender(), &email(&["not an address"])).is_err());
    }
}
