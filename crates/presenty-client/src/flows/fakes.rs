use std::collections::HashSet;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};

use presenty_shared::wire::{StudentRegistration, TeacherRegistration};
use presenty_shared::{
    AttendanceRecord, IssuedSession, RollNo, RosterEntry, SessionReference, StudentIdentity,
    TeacherProfile,
};

use crate::error::{RemoteError, TransportError};
use crate::remote::{
    Authenticator, HistoryProvider, RosterProvider, ScanRecorder, SessionControl, SessionOracle,
    StudentDirectory, StudentLogin, TeacherLogin,
};

pub fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 7, 28, 9, 0, 0).unwrap()
}

pub fn offline() -> RemoteError {
    RemoteError::Transport(TransportError::unreachable("offline"))
}

pub fn asha() -> StudentIdentity {
    StudentIdentity {
        id: "stu-1".to_string(),
        name: "Asha".to_string(),
        roll_no: RollNo::from("14"),
        year: "TE".to_string(),
        division: "A".to_string(),
    }
}

pub fn rao() -> TeacherProfile {
    TeacherProfile {
        teacher_id: "T1".to_string(),
        name: "Rao".to_string(),
        year: "TE".to_string(),
        subject: "DBMS".to_string(),
    }
}

pub fn qr(session_id: &str, year: &str, division: &str) -> String {
    presenty_shared::encode(&SessionReference {
        session_id: session_id.to_string(),
        division: division.to_string(),
        date: "2025-07-28".to_string(),
        year: year.to_string(),
    })
}

/// In-memory backend with switchable failures.
#[derive(Default)]
pub struct FakeBackend {
    pub student: Option<StudentIdentity>,
    pub active_sessions: HashSet<String>,
    pub oracle_down: bool,
    pub recorder_down: bool,
    pub roster: Vec<RosterEntry>,
    pub roster_down: bool,
    pub history: Vec<AttendanceRecord>,
    pub history_down: bool,
    pub login_down: bool,

    pub oracle_calls: Mutex<u32>,
    pub recorded: Mutex<Vec<(String, SessionReference)>>,
    pub presenty_calls: Mutex<Vec<bool>>,
    pub registrations: Mutex<u32>,
}

impl FakeBackend {
    pub fn with_student(student: StudentIdentity) -> Self {
        Self {
            student: Some(student),
            ..Self::default()
        }
    }

    pub fn open(mut self, session_id: &str) -> Self {
        self.active_sessions.insert(session_id.to_string());
        self
    }
}

#[async_trait]
impl StudentDirectory for FakeBackend {
    async fn student(&self, student_id: &str) -> Result<StudentIdentity, RemoteError> {
        self.student
            .clone()
            .filter(|s| s.id == student_id)
            .ok_or_else(|| RemoteError::Transport(TransportError::status(404, "{}")))
    }
}

#[async_trait]
impl SessionOracle for FakeBackend {
    async fn is_session_active(&self, session_id: &str) -> Result<bool, RemoteError> {
        *self.oracle_calls.lock().unwrap() += 1;
        if self.oracle_down {
            return Err(offline());
        }
        Ok(self.active_sessions.contains(session_id))
    }
}

#[async_trait]
impl ScanRecorder for FakeBackend {
    async fn record_scan(
        &self,
        student_id: &str,
        session: &SessionReference,
    ) -> Result<(), RemoteError> {
        if self.recorder_down {
            return Err(offline());
        }
        self.recorded
            .lock()
            .unwrap()
            .push((student_id.to_string(), session.clone()));
        Ok(())
    }
}

#[async_trait]
impl RosterProvider for FakeBackend {
    async fn roster(&self, _year: &str, _division: &str) -> Result<Vec<RosterEntry>, RemoteError> {
        if self.roster_down {
            return Err(offline());
        }
        Ok(self.roster.clone())
    }
}

#[async_trait]
impl HistoryProvider for FakeBackend {
    async fn history(
        &self,
        _teacher_id: &str,
        _division: &str,
        _year: &str,
    ) -> Result<Vec<AttendanceRecord>, RemoteError> {
        if self.history_down {
            return Err(offline());
        }
        Ok(self.history.clone())
    }
}

#[async_trait]
impl SessionControl for FakeBackend {
    async fn generate_session(
        &self,
        teacher: &TeacherProfile,
        division: &str,
    ) -> Result<IssuedSession, RemoteError> {
        Ok(IssuedSession {
            reference: SessionReference {
                session_id: format!("{}-{}", teacher.teacher_id, division),
                division: division.to_string(),
                date: "2025-07-28".to_string(),
                year: teacher.year.clone(),
            },
            subject: teacher.subject.clone(),
        })
    }

    async fn set_presenty(&self, _teacher_id: &str, active: bool) -> Result<String, RemoteError> {
        self.presenty_calls.lock().unwrap().push(active);
        Ok(if active {
            "Presenty activated".to_string()
        } else {
            "Presenty deactivated".to_string()
        })
    }
}

#[async_trait]
impl Authenticator for FakeBackend {
    async fn login_student(
        &self,
        _email: &str,
        _password: &str,
    ) -> Result<StudentLogin, RemoteError> {
        if self.login_down {
            return Err(offline());
        }
        Ok(StudentLogin {
            token: "stu-token".to_string(),
            student_id: "stu-1".to_string(),
        })
    }

    async fn login_teacher(
        &self,
        _email: &str,
        _password: &str,
    ) -> Result<TeacherLogin, RemoteError> {
        if self.login_down {
            return Err(offline());
        }
        Ok(TeacherLogin {
            token: "teach-token".to_string(),
            profile: rao(),
        })
    }

    async fn register_student(&self, _form: &StudentRegistration) -> Result<(), RemoteError> {
        *self.registrations.lock().unwrap() += 1;
        Ok(())
    }

    async fn register_teacher(&self, _form: &TeacherRegistration) -> Result<(), RemoteError> {
        *self.registrations.lock().unwrap() += 1;
        Ok(())
    }
}
