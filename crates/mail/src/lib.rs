//! Contact-form email delivery.
//!
//! [`ContactMailer`] renders a [`ContactRequest`] into an HTML message and
//! hands it to a [`MailTransport`]. Production uses [`SmtpTransport`]
//! (`lettre` over SMTP); tests plug in an in-memory transport.

pub mod config;
pub mod contact;
pub mod error;
pub mod mailer;
pub mod transport;

pub use config::MailConfig;
pub use contact::ContactRequest;
pub use error::MailError;
pub use mailer::ContactMailer;
pub use transport::{MailTransport, SmtpTransport};
