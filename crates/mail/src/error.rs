/// Why a contact request could not be delivered.
///
/// Every variant's message is shown to the caller, so it names the cause
/// without echoing credentials.
#[derive(Debug, thiserror::Error)]
pub enum MailError {
    /// The SMTP server refused the connection, the login or the message.
    #[error("SMTP transport error: {0}")]
    Transport(#[from] lettre::transport::smtp::Error),

    /// A sender or recipient is not a usable mailbox.
    #[error("Email address parse error: {0}")]
    Address(#[from] lettre::address::AddressError),

    /// Message or envelope assembly failed.
    #[error("Email build error: {0}")]
    Build(String),
}

impl From<lettre::error::Error> for MailError {
    fn from(err: lettre::error::Error) -> Self {
        MailError::Build(err.to_string())
    }
}
