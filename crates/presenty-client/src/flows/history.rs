//! Attendance history for the signed-in teacher.

use tracing::{info, warn};

use presenty_shared::{reconcile_history, AttendanceGrid, ReconciledSession};

use crate::error::ClientError;
use crate::remote::{HistoryProvider, RosterProvider};
use crate::state::AppState;

/// Every past session for one division, reconciled against the class roster,
/// plus the student-by-session grid built from them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttendanceHistory {
    pub division: String,
    pub sessions: Vec<ReconciledSession>,
    pub grid: AttendanceGrid,
}

/// Fetch history and roster concurrently and reconcile them.
///
/// A missing roster is not fatal: sessions are then shown with only the
/// students the backend listed.
pub async fn load_history<R>(
    state: &AppState,
    remote: &R,
    division: &str,
) -> Result<AttendanceHistory, ClientError>
where
    R: HistoryProvider + RosterProvider + ?Sized,
{
    let teacher = &state
        .context
        .teacher()
        .ok_or(ClientError::NotSignedIn)?
        .profile;
    if !state.config.allows_division(division) {
        return Err(ClientError::UnknownDivision(division.to_string()));
    }

    let (records, roster) = tokio::join!(
        remote.history(&teacher.teacher_id, division, &teacher.year),
        remote.roster(&teacher.year, division),
    );

    let records = records.map_err(ClientError::remote("Failed to load history"))?;
    let roster = roster.unwrap_or_else(|e| {
        warn!(error = %e, year = %teacher.year, division, "Roster unavailable, showing listed students only");
        Vec::new()
    });

    let sessions = reconcile_history(&records, &roster);
    let grid = AttendanceGrid::build(&sessions);
    info!(
        teacher = %teacher.teacher_id,
        division,
        sessions = sessions.len(),
        students = grid.rows.len(),
        "History loaded"
    );

    Ok(AttendanceHistory {
        division: division.to_string(),
        sessions,
        grid,
    })
}
