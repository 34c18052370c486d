//! Scan admission guard.
//!
//! Decides whether a student may submit a scan. The guard never touches
//! storage or the network: the caller resolves the session-activity flag and
//! the stored cooldown first, then asks [`evaluate`]. Time is always passed in
//! explicitly so an expired block is noticed on the next interaction instead
//! of depending on a timer.

use std::time::Duration as StdDuration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::{scan_cooldown, MILLIS_PER_MINUTE, MISMATCH_RESCAN_DELAY_SECS};
use crate::error::{DecodeError, Rejection};
use crate::types::{SessionReference, StudentIdentity};

/// "This student may not scan again before `blocked_until`."
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cooldown {
    pub blocked_until: Option<DateTime<Utc>>,
}

impl Cooldown {
    pub fn none() -> Self {
        Self { blocked_until: None }
    }

    pub fn until(blocked_until: DateTime<Utc>) -> Self {
        Self {
            blocked_until: Some(blocked_until),
        }
    }

    /// Cooldown to store once a scan at `now` has been recorded.
    pub fn after_scan(now: DateTime<Utc>) -> Self {
        Self::until(now + scan_cooldown())
    }

    pub fn is_active(&self, now: DateTime<Utc>) -> bool {
        matches!(self.blocked_until, Some(until) if now < until)
    }

    /// A block is set but has run out; callers clear it from storage.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        matches!(self.blocked_until, Some(until) if until <= now)
    }

    /// Whole minutes left, rounded up. `None` when not blocked.
    pub fn remaining_minutes(&self, now: DateTime<Utc>) -> Option<i64> {
        let until = self.blocked_until?;
        if now >= until {
            return None;
        }
        let millis = (until - now).num_milliseconds();
        Some(((millis + MILLIS_PER_MINUTE - 1) / MILLIS_PER_MINUTE).max(1))
    }
}

/// What the scanner should do after a rejection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RescanPolicy {
    /// Accept the next barcode right away.
    Immediate,
    /// Ignore barcodes for a short while, then re-arm.
    AfterDelay(StdDuration),
    /// Stay disarmed until time passes or the teacher opens the session.
    Held,
}

impl Rejection {
    /// Short text shown to the student.
    pub fn message(&self) -> String {
        match self {
            Rejection::Invalid(DecodeError::Format) => "Invalid QR format".to_string(),
            Rejection::Invalid(DecodeError::Parse(_)) => "QR data corrupted".to_string(),
            Rejection::Invalid(DecodeError::Schema(_)) => "Invalid or expired QR".to_string(),
            Rejection::YearMismatch { .. } => "Year mismatch".to_string(),
            Rejection::DivisionMismatch { .. } => "Division mismatch".to_string(),
            Rejection::SessionNotActive => "Presenty not active by teacher".to_string(),
            Rejection::Blocked { remaining_minutes } => {
                format!("Wait {remaining_minutes} min(s) before next scan")
            }
        }
    }

    pub fn rescan_policy(&self) -> RescanPolicy {
        match self {
            Rejection::Invalid(_) => RescanPolicy::Immediate,
            Rejection::YearMismatch { .. } | Rejection::DivisionMismatch { .. } => {
                RescanPolicy::AfterDelay(StdDuration::from_secs(MISMATCH_RESCAN_DELAY_SECS))
            }
            Rejection::SessionNotActive | Rejection::Blocked { .. } => RescanPolicy::Held,
        }
    }
}

/// Checks that need no remote answer: the payload decoded and the session
/// belongs to the student's year and division.
pub fn check_scope<'a>(
    identity: &StudentIdentity,
    decoded: &'a Result<SessionReference, DecodeError>,
) -> Result<&'a SessionReference, Rejection> {
    let session = decoded
        .as_ref()
        .map_err(|e| Rejection::Invalid(e.clone()))?;

    if identity.year != session.year {
        return Err(Rejection::YearMismatch {
            student: identity.year.clone(),
            session: session.year.clone(),
        });
    }

    if identity.division != session.division {
        return Err(Rejection::DivisionMismatch {
            student: identity.division.clone(),
            session: session.division.clone(),
        });
    }

    Ok(session)
}

/// Full admission decision; the first failing check wins.
pub fn evaluate(
    identity: &StudentIdentity,
    decoded: &Result<SessionReference, DecodeError>,
    cooldown: &Cooldown,
    session_is_active: bool,
    now: DateTime<Utc>,
) -> Result<(), Rejection> {
    check_scope(identity, decoded)?;

    if !session_is_active {
        return Err(Rejection::SessionNotActive);
    }

    if let Some(remaining_minutes) = cooldown.remaining_minutes(now) {
        return Err(Rejection::Blocked { remaining_minutes });
    }

    Ok(())
}
