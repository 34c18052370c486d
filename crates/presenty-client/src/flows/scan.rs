//! Student scanning flow.

use chrono::{DateTime, Utc};
use tracing::{debug, error, info};

use presenty_shared::{check_scope, decode, evaluate, Cooldown, Rejection, SessionReference};

use crate::cooldown::{load_cooldown, save_cooldown, CooldownStore};
use crate::error::ClientError;
use crate::events::{Notice, MSG_ATTENDANCE_MARKED};
use crate::remote::{ScanRecorder, SessionOracle, StudentDirectory};
use crate::state::AppState;

/// What the scanner screen shows when it opens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScannerStatus {
    Ready,
    Blocked { remaining_minutes: i64 },
}

/// Result of an accepted scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanOutcome {
    pub session: SessionReference,
    /// Block now stored for this device.
    pub cooldown: Cooldown,
}

impl ScanOutcome {
    pub fn notice(&self) -> Notice {
        Notice::success(MSG_ATTENDANCE_MARKED)
    }
}

/// Prepare the scanner: load the student profile once and report whether a
/// previous scan still blocks this device.
pub async fn open_scanner<D>(
    state: &mut AppState,
    directory: &D,
    cooldowns: &dyn CooldownStore,
    now: DateTime<Utc>,
) -> Result<ScannerStatus, ClientError>
where
    D: StudentDirectory + ?Sized,
{
    let session = state
        .context
        .student_mut()
        .ok_or(ClientError::NotSignedIn)?;

    if session.identity.is_none() {
        let identity = directory
            .student(&session.student_id)
            .await
            .map_err(ClientError::remote("Student not loaded"))?;
        info!(student = %identity.id, roll_no = %identity.roll_no, "Student profile loaded");
        session.identity = Some(identity);
    }

    let cooldown = load_cooldown(cooldowns, now).await?;
    Ok(match cooldown.remaining_minutes(now) {
        Some(remaining_minutes) => ScannerStatus::Blocked { remaining_minutes },
        None => ScannerStatus::Ready,
    })
}

/// Handle one scanned barcode.
///
/// Order of checks: payload, signed-in profile, year and division, session
/// activity (remote), cooldown. The scan is recorded only when all pass; the
/// cooldown is then stored and the student is signed out, as a device is
/// shared between students.
pub async fn submit_scan<R>(
    state: &mut AppState,
    remote: &R,
    cooldowns: &dyn CooldownStore,
    raw: &str,
    now: DateTime<Utc>,
) -> Result<ScanOutcome, ClientError>
where
    R: SessionOracle + ScanRecorder + ?Sized,
{
    let decoded = decode(raw);
    if let Err(e) = &decoded {
        debug!(error = %e, "Scanned text is not a session payload");
        return Err(Rejection::Invalid(e.clone()).into());
    }

    let identity = state
        .context
        .student()
        .ok_or(ClientError::NotSignedIn)?
        .identity
        .clone()
        .ok_or(ClientError::IdentityNotLoaded)?;

    let session = match check_scope(&identity, &decoded) {
        Ok(session) => session.clone(),
        Err(rejection) => {
            info!(student = %identity.id, reason = %rejection, "Scan out of scope");
            return Err(rejection.into());
        }
    };

    let active = remote
        .is_session_active(&session.session_id)
        .await
        .map_err(ClientError::remote("Failed to validate session"))?;

    let cooldown = load_cooldown(cooldowns, now).await?;
    if let Err(rejection) = evaluate(&identity, &decoded, &cooldown, active, now) {
        info!(
            student = %identity.id,
            session = %session.session_id,
            reason = %rejection,
            "Scan rejected"
        );
        return Err(rejection.into());
    }

    remote
        .record_scan(&identity.id, &session)
        .await
        .map_err(ClientError::remote("Invalid or expired QR"))?;

    let next = Cooldown::after_scan(now);
    if let Err(e) = save_cooldown(cooldowns, &next).await {
        // The backend already holds the record; only the local block is lost.
        error!(error = %e, "Failed to store scan cooldown");
    }

    info!(
        student = %identity.id,
        session = %session.session_id,
        until = ?next.blocked_until,
        "Attendance recorded"
    );

    state.sign_out();

    Ok(ScanOutcome {
        session,
        cooldown: next,
    })
}
