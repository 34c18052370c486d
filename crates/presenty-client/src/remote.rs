//! Collaborator interfaces.
//!
//! The flows never talk to the network directly. Each backend capability is
//! a trait so screens can be driven by [`crate::api::ApiClient`] in the app
//! and by in-memory fakes in tests.

use async_trait::async_trait;
use serde_json::Value;

use presenty_shared::wire::{StudentRegistration, TeacherRegistration};
use presenty_shared::{
    AttendanceRecord, IssuedSession, RosterEntry, SessionReference, StudentIdentity,
    TeacherProfile,
};

use crate::error::{RemoteError, TransportError};

/// HTTP plumbing provided by the host application.
#[async_trait]
pub trait Transport: Send + Sync {
    /// GET `url`, returning the response body of a 2xx reply.
    async fn get(&self, url: &str) -> Result<String, TransportError>;

    /// POST `body` as JSON to `url`, returning the response body of a 2xx reply.
    async fn post(&self, url: &str, body: Value) -> Result<String, TransportError>;
}

#[async_trait]
pub trait StudentDirectory: Send + Sync {
    async fn student(&self, student_id: &str) -> Result<StudentIdentity, RemoteError>;
}

/// Answers whether the teacher currently accepts scans for a session.
#[async_trait]
pub trait SessionOracle: Send + Sync {
    async fn is_session_active(&self, session_id: &str) -> Result<bool, RemoteError>;
}

#[async_trait]
pub trait ScanRecorder: Send + Sync {
    async fn record_scan(
        &self,
        student_id: &str,
        session: &SessionReference,
    ) -> Result<(), RemoteError>;
}

#[async_trait]
pub trait RosterProvider: Send + Sync {
    async fn roster(&self, year: &str, division: &str) -> Result<Vec<RosterEntry>, RemoteError>;
}

#[async_trait]
pub trait HistoryProvider: Send + Sync {
    async fn history(
        &self,
        teacher_id: &str,
        division: &str,
        year: &str,
    ) -> Result<Vec<AttendanceRecord>, RemoteError>;
}

/// Teacher-side session management.
#[async_trait]
pub trait SessionControl: Send + Sync {
    async fn generate_session(
        &self,
        teacher: &TeacherProfile,
        division: &str,
    ) -> Result<IssuedSession, RemoteError>;

    /// Open or close scanning for the teacher's sessions. Returns the
    /// backend's confirmation text.
    async fn set_presenty(&self, teacher_id: &str, active: bool) -> Result<String, RemoteError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudentLogin {
    pub token: String,
    pub student_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeacherLogin {
    pub token: String,
    pub profile: TeacherProfile,
}

#[async_trait]
pub trait Authenticator: Send + Sync {
    async fn login_student(&self, email: &str, password: &str)
        -> Result<StudentLogin, RemoteError>;

    async fn login_teacher(&self, email: &str, password: &str)
        -> Result<TeacherLogin, RemoteError>;

    async fn register_student(&self, form: &StudentRegistration) -> Result<(), RemoteError>;

    async fn register_teacher(&self, form: &TeacherRegistration) -> Result<(), RemoteError>;
}
