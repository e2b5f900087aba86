//! Contact-form mailer.

use std::sync::Arc;

use lettre::address::Envelope;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::{Address, Message};

use crate::config::MailConfig;
use crate::contact::{sender_address, ContactRequest};
use crate::error::MailError;
use crate::transport::MailTransport;

/// Renders contact requests and sends them to the configured recipient.
///
/// The envelope sender is the visitor's own address, so bounces and replies
/// go back to them. The configured account only appears in the `Sender`
/// header.
pub struct ContactMailer {
    config: MailConfig,
    transport: Arc<dyn MailTransport>,
}

impl ContactMailer {
    pub fn new(config: MailConfig, transport: Arc<dyn MailTransport>) -> Self {
        Self { config, transport }
    }

    pub fn config(&self) -> &MailConfig {
        &self.config
    }

    /// Build the message without sending it.
    pub fn compose(&self, contact: &ContactRequest) -> Result<Message, MailError> {
        let sender = sender_address(&contact.email)?;
        let recipient: Address = self.config.effective_recipient().parse()?;
        let account: Address = self.config.default_from.parse()?;
        let visitor = Mailbox::new(Some(contact.full_name()), sender.clone());

        let message = Message::builder()
            .from(visitor.clone())
            .reply_to(visitor)
            .sender(Mailbox::new(None, account))
            .to(Mailbox::new(None, recipient.clone()))
            .subject(contact.subject())
            .header(ContentType::TEXT_HTML)
            .envelope(Envelope::new(Some(sender), vec![recipient])?)
            .body(contact.render_html())?;

        Ok(message)
    }

    /// Compose and dispatch. Failures are returned as is and never retried.
    pub async fn send(&self, contact: &ContactRequest) -> Result<(), MailError> {
        let message = self.compose(contact)?;
        self.transport.send(message).await?;

        tracing::info!(
            from = %contact.email,
            to = self.config.effective_recipient(),
            "Contact email sent"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use assert_matches::assert_matches;
    use async_trait::async_trait;

    use super::*;

    #[derive(Default)]
    struct Outbox {
        sent: Mutex<Vec<Message>>,
        fail: bool,
    }

    #[async_trait]
    impl MailTransport for Outbox {
        async fn send(&self, message: Message) -> Result<(), MailError> {
            if self.fail {
                return Err(MailError::Build("connection refused".into()));
            }
            self.sent.lock().unwrap().push(message);
            Ok(())
        }
    }

    fn config() -> MailConfig {
        MailConfig {
            smtp_host: "smtp.example.com".into(),
            smtp_port: 587,
            smtp_secure: false,
            smtp_user: "mailer@example.com".into(),
            smtp_password: "secret".into(),
            default_from: "mailer@example.com".into(),
            recipient: "office@example.com".into(),
            recipient_override: None,
        }
    }

    fn contact() -> ContactRequest {
        ContactRequest {
            firstname: "A".into(),
            lastname: "B".into(),
            email: "a@b.com".into(),
            message: "hi".into(),
        }
    }

    #[tokio::test]
    async fn envelope_runs_from_visitor_to_recipient() {
        let outbox = Arc::new(Outbox::default());
        let mailer = ContactMailer::new(config(), outbox.clone());

        mailer.send(&contact()).await.unwrap();

        let sent = outbox.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        let envelope = sent[0].envelope();
        assert_eq!(envelope.from().unwrap().to_string(), "a@b.com");
        let to: Vec<String> = envelope.to().iter().map(ToString::to_string).collect();
        assert_eq!(to, vec!["office@example.com"]);
        let subject = sent[0].headers().get_raw("Subject").unwrap();
        assert!(subject.contains("A B"));
    }

    #[tokio::test]
    async fn override_recipient_wins() {
        let mut cfg = config();
        cfg.recipient_override = Some("qa@example.com".into());
        let mailer = ContactMailer::new(cfg, Arc::new(Outbox::default()));

        let message = mailer.compose(&contact()).unwrap();
        let to: Vec<String> = message
            .envelope()
            .to()
            .iter()
            .map(ToString::to_string)
            .collect();
        assert_eq!(to, vec!["qa@example.com"]);
    }

    #[tokio::test]
    async fn transport_failure_is_returned() {
        let outbox = Arc::new(Outbox {
            fail: true,
            ..Default::default()
        });
        let mailer = ContactMailer::new(config(), outbox);
        let err = mailer.send(&contact()).await.unwrap_err();
        assert_matches!(err, MailError::Build(msg) if msg == "connection refused");
    }
}
