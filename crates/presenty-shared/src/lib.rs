// Attendance core shared by the student and teacher clients.

pub mod admission;
pub mod constants;
pub mod error;
pub mod qr;
pub mod roster;
pub mod types;
pub mod wire;

pub use admission::{check_scope, evaluate, Cooldown, RescanPolicy};
pub use error::{DecodeError, PresentyError, Rejection, WireError};
pub use qr::{decode, encode};
pub use roster::{reconcile, reconcile_history, AttendanceGrid, ReconciledSession, Reconciliation};
pub use types::{
    AttendanceEntry, AttendanceRecord, AttendanceStatus, IssuedSession, RollNo, RosterEntry,
    SessionReference, StudentIdentity, TeacherProfile,
};
