//! Contact request DTO and its HTML rendering.

use counsel_core::validation::non_blank;
use lettre::address::Envelope;
use lettre::Address;
use serde::Deserialize;
use validator::{Validate, ValidationError};

use crate::error::MailError;

/// Static HTML body; `{{placeholders}}` are filled by [`render_html`].
const TEMPLATE: &str = include_str!("../templates/contact.html");

/// Body of `POST /email`.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct ContactRequest {
    #[validate(custom(function = "non_blank"))]
    pub firstname: String,
    #[validate(custom(function = "non_blank"))]
    pub lastname: String,
    #[validate(custom(function = "valid_sender"))]
    pub email: String,
    #[validate(custom(function = "non_blank"))]
    pub message: String,
}

/// Parse the visitor's address the way the envelope needs it.
///
/// Domain literals (`user@[127.0.0.1]`) are refused: lettre parses them but
/// cannot use them as an envelope sender.
pub fn sender_address(raw: &str) -> Result<Address, MailError> {
    let address: Address = raw.trim().parse()?;
    if address.domain().starts_with('[') {
        return Err(MailError::Build(format!(
            "'{raw}' cannot be used as an envelope sender"
        )));
    }
    Envelope::new(Some(address.clone()), vec![address.clone()])?;
    Ok(address)
}

fn valid_sender(raw: &str) -> Result<(), ValidationError> {
    sender_address(raw).map(|_| ()).map_err(|_| {
        ValidationError::new("email").with_message("must be a valid email address".into())
    })
}

impl ContactRequest {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.firstname.trim(), self.lastname.trim())
    }

    pub fn subject(&self) -> String {
        format!("New contact request from {}", self.full_name())
    }

    /// Fill the template. Every value is HTML-escaped and message newlines
    /// become `<br>`.
    pub fn render_html(&self) -> String {
        let message = escape_html(&self.message)
            .replace("\r\n", "\n")
            .replace('\n', "<br>\n");
        render(
            TEMPLATE,
            &[
                ("first_name", escape_html(self.firstname.trim())),
                ("last_name", escape_html(self.lastname.trim())),
                ("email", escape_html(self.email.trim())),
                ("message", message),
            ],
        )
    }
}

/// Single-pass `{{key}}` substitution, so values containing placeholder
/// syntax are never expanded a second time. Unknown keys are left as is.
fn render(template: &str, values: &[(&str, String)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        match after.find("}}") {
            Some(end) => {
                let key = &after[..end];
                match values.iter().find(|(k, _)| *k == key) {
                    Some((_, value)) => out.push_str(value),
                    None => {
                        out.push_str("{{");
                        out.push_str(key);
                        out.push_str("}}");
                    }
                }
                rest = &after[end + 2..];
            }
            None => {
                out.push_str(&rest[start..]);
                rest = "";
            }
        }
    }
    out.push_str(rest);
    out
}

fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}
