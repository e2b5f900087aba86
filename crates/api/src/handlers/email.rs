//! Handler for the contact form.

use axum::extract::State;
use axum::Json;
use counsel_mail::ContactRequest;

use crate::error::AppResult;
use crate::extract::ValidJson;
use crate::response::MessageOnly;
use crate::state::AppState;

/// POST /email
pub async fn send_contact(
    State(state): State<AppState>,
    ValidJson(contact): ValidJson<ContactRequest>,
) -> AppResult<Json<MessageOnly>> {
    state.mailer.send(&contact).await?;
    Ok(Json(MessageOnly {
        message: "Email sent successfully".to_string(),
    }))
}
