//! Teacher session screen: issue a QR code and open or close scanning.

use tracing::info;

use presenty_shared::{encode, IssuedSession};

use crate::error::ClientError;
use crate::events::Notice;
use crate::remote::SessionControl;
use crate::state::AppState;

/// A session issued by the backend together with the text to render as a QR
/// code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedQr {
    pub session: IssuedSession,
    pub payload: String,
}

pub async fn issue_qr<C>(
    state: &AppState,
    control: &C,
    division: &str,
) -> Result<IssuedQr, ClientError>
where
    C: SessionControl + ?Sized,
{
    let teacher = state.context.teacher().ok_or(ClientError::NotSignedIn)?;
    if !state.config.allows_division(division) {
        return Err(ClientError::UnknownDivision(division.to_string()));
    }

    let session = control
        .generate_session(&teacher.profile, division)
        .await
        .map_err(ClientError::remote("QR generation failed"))?;

    info!(
        teacher = %teacher.profile.teacher_id,
        session = %session.reference.session_id,
        division,
        "Session QR issued"
    );
    let payload = encode(&session.reference);
    Ok(IssuedQr { session, payload })
}

/// Flip whether students may scan into this teacher's sessions.
pub async fn toggle_presenty<C>(state: &mut AppState, control: &C) -> Result<Notice, ClientError>
where
    C: SessionControl + ?Sized,
{
    let teacher = state
        .context
        .teacher_mut()
        .ok_or(ClientError::NotSignedIn)?;
    let active = !teacher.presenty_active;

    let message = control
        .set_presenty(&teacher.profile.teacher_id, active)
        .await
        .map_err(ClientError::remote("Failed to toggle presenty"))?;

    teacher.presenty_active = active;
    info!(teacher = %teacher.profile.teacher_id, active, "Presenty toggled");
    Ok(Notice::success(message))
}
