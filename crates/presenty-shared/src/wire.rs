//! Backend request and response bodies.
//!
//! Responses are deserialized into these DTOs and then validated into the
//! domain types of [`crate::types`]; nothing duck-typed goes past this module.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::constants::UNKNOWN_SUBJECT;
use crate::error::WireError;
use crate::types::{
    AttendanceEntry, AttendanceRecord, AttendanceStatus, IssuedSession, RollNo, RosterEntry,
    SessionReference, StudentIdentity, TeacherProfile,
};

/// Parse a response body into a DTO.
pub fn parse<T: DeserializeOwned>(body: &str) -> Result<T, WireError> {
    Ok(serde_json::from_str(body)?)
}

/// The `message` field the backend attaches to errors and confirmations.
pub fn error_message(body: &str) -> Option<String> {
    parse::<MessageBody>(body).ok().and_then(|m| m.message)
}

// ---------------------------------------------------------------------------
// Shared pieces
// ---------------------------------------------------------------------------

/// Roll numbers come back as numbers from some endpoints and strings from
/// others. Anything else is kept in its JSON text form.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum WireRollNo {
    Int(i64),
    Text(String),
    Other(Value),
}

impl From<WireRollNo> for RollNo {
    fn from(raw: WireRollNo) -> Self {
        match raw {
            WireRollNo::Int(n) => RollNo::from(n),
            WireRollNo::Text(s) => RollNo(s),
            WireRollNo::Other(v) => RollNo(v.to_string()),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct MessageBody {
    #[serde(default)]
    pub message: Option<String>,
}

// ---------------------------------------------------------------------------
// Student side
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentBody {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub roll_no: WireRollNo,
    pub year: String,
    pub division: String,
}

impl From<StudentBody> for StudentIdentity {
    fn from(body: StudentBody) -> Self {
        Self {
            id: body.id,
            name: body.name,
            roll_no: body.roll_no.into(),
            year: body.year,
            division: body.division,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionValidityBody {
    #[serde(default)]
    pub presenty_active: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanRequest<'a> {
    pub student_id: &'a str,
    pub qr_data: &'a SessionReference,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StudentLoginBody {
    pub token: String,
    pub student: StudentRef,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StudentRef {
    #[serde(rename = "_id")]
    pub id: String,
}

// ---------------------------------------------------------------------------
// Teacher side
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct TeacherLoginBody {
    pub token: String,
    pub teacher: TeacherProfile,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateQrRequest<'a> {
    pub teacher_id: &'a str,
    pub year: &'a str,
    pub subject: &'a str,
    pub division: &'a str,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateQrBody {
    pub qr_data: Option<IssuedSessionBody>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct IssuedSessionBody {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub subject: Option<String>,
    pub division: String,
    pub date: String,
    pub year: String,
}

impl GenerateQrBody {
    pub fn into_session(self) -> Result<IssuedSession, WireError> {
        let data = self.qr_data.ok_or(WireError::MissingField("qrData"))?;
        Ok(IssuedSession {
            reference: SessionReference {
                session_id: data.id,
                division: data.division,
                date: data.date,
                year: data.year,
            },
            subject: data.subject.unwrap_or_else(|| UNKNOWN_SUBJECT.to_string()),
        })
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TogglePresentyRequest<'a> {
    pub teacher_id: &'a str,
    pub active: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HistoryBody {
    #[serde(default)]
    pub history: Vec<HistorySessionBody>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HistorySessionBody {
    #[serde(default)]
    pub subject: Option<String>,
    pub date: String,
    #[serde(default)]
    pub students: Vec<HistoryStudentBody>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryStudentBody {
    pub roll_no: WireRollNo,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub status: Option<String>,
}

impl HistoryBody {
    /// Status codes other than `P` and `A` are kept as absent rather than
    /// failing the whole history.
    pub fn into_records(self) -> Vec<AttendanceRecord> {
        self.history
            .into_iter()
            .map(HistorySessionBody::into_record)
            .collect()
    }
}

impl HistorySessionBody {
    fn into_record(self) -> AttendanceRecord {
        let students = self
            .students
            .into_iter()
            .map(|s| {
                let roll_no: RollNo = s.roll_no.into();
                let status = match s.status {
                    None => AttendanceStatus::Present,
                    Some(code) => AttendanceStatus::from_code(&code).unwrap_or_else(|| {
                        warn!(%roll_no, status = %code, date = %self.date, "Unknown attendance status, counting as absent");
                        AttendanceStatus::Absent
                    }),
                };
                AttendanceEntry {
                    roll_no,
                    name: s.name,
                    status,
                }
            })
            .collect();

        AttendanceRecord {
            subject: self
                .subject
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| UNKNOWN_SUBJECT.to_string()),
            date: self.date,
            students,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RosterBody {
    #[serde(default)]
    pub students: Vec<RosterStudentBody>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RosterStudentBody {
    pub roll_no: WireRollNo,
    #[serde(default)]
    pub name: String,
}

impl From<RosterBody> for Vec<RosterEntry> {
    fn from(body: RosterBody) -> Self {
        body.students
            .into_iter()
            .map(|s| RosterEntry {
                roll_no: s.roll_no.into(),
                name: s.name,
            })
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Authentication
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentRegistration {
    pub name: String,
    pub email: String,
    pub password: String,
    pub year: String,
    pub department: String,
    pub division: String,
    pub roll_no: String,
}

impl StudentRegistration {
    /// First required field left blank, if any.
    pub fn first_missing(&self) -> Option<&'static str> {
        first_blank(&[
            ("name", &self.name),
            ("email", &self.email),
            ("password", &self.password),
            ("year", &self.year),
            ("department", &self.department),
            ("division", &self.division),
            ("rollNo", &self.roll_no),
        ])
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeacherRegistration {
    pub name: String,
    pub email: String,
    pub password: String,
    pub teacher_id: String,
    pub subject: String,
    pub year: String,
}

impl TeacherRegistration {
    pub fn first_missing(&self) -> Option<&'static str> {
        first_blank(&[
            ("name", &self.name),
            ("email", &self.email),
            ("password", &self.password),
            ("teacherId", &self.teacher_id),
            ("subject", &self.subject),
            ("year", &self.year),
        ])
    }
}

fn first_blank(fields: &[(&'static str, &String)]) -> Option<&'static str> {
    fields
        .iter()
        .find(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| *name)
}
