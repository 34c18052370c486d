//! Application state shared by every flow.
//!
//! The signed-in principal is loaded once (at login, and for students when
//! the scanner first opens) and then passed around explicitly as part of
//! [`AppState`] instead of being re-read from storage by each screen.

use presenty_shared::{StudentIdentity, TeacherProfile};

use crate::config::ClientConfig;

/// A signed-in student.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudentSession {
    pub token: String,
    pub student_id: String,
    /// Full profile, fetched when the scanner opens.
    pub identity: Option<StudentIdentity>,
}

/// A signed-in teacher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeacherSession {
    pub token: String,
    pub profile: TeacherProfile,
    /// Whether this client last opened scanning for the teacher's sessions.
    pub presenty_active: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SessionContext {
    #[default]
    SignedOut,
    Student(StudentSession),
    Teacher(TeacherSession),
}

impl SessionContext {
    pub fn student(&self) -> Option<&StudentSession> {
        match self {
            SessionContext::Student(s) => Some(s),
            _ => None,
        }
    }

    pub fn student_mut(&mut self) -> Option<&mut StudentSession> {
        match self {
            SessionContext::Student(s) => Some(s),
            _ => None,
        }
    }

    pub fn teacher(&self) -> Option<&TeacherSession> {
        match self {
            SessionContext::Teacher(t) => Some(t),
            _ => None,
        }
    }

    pub fn teacher_mut(&mut self) -> Option<&mut TeacherSession> {
        match self {
            SessionContext::Teacher(t) => Some(t),
            _ => None,
        }
    }

    pub fn is_signed_in(&self) -> bool {
        !matches!(self, SessionContext::SignedOut)
    }
}

/// Central application state.
#[derive(Debug, Clone)]
pub struct AppState {
    pub config: ClientConfig,
    pub context: SessionContext,
}

impl AppState {
    pub fn new(config: ClientConfig) -> Self {
        Self {
            config,
            context: SessionContext::SignedOut,
        }
    }

    pub fn sign_out(&mut self) {
        self.context = SessionContext::SignedOut;
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(ClientConfig::default())
    }
}
