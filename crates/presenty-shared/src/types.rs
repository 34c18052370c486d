use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

// Roll numbers arrive as JSON numbers or strings; the string form is canonical.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct RollNo(pub String);

impl RollNo {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Integer value, if the roll number is purely numeric.
    pub fn numeric(&self) -> Option<i64> {
        self.0.trim().parse().ok()
    }
}

impl Ord for RollNo {
    /// Numeric roll numbers sort by value and ahead of non-numeric ones,
    /// which sort by plain string comparison.
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.numeric(), other.numeric()) {
            (Some(a), Some(b)) => a.cmp(&b).then_with(|| self.0.cmp(&other.0)),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => self.0.cmp(&other.0),
        }
    }
}

impl PartialOrd for RollNo {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl From<i64> for RollNo {
    fn from(n: i64) -> Self {
        Self(n.to_string())
    }
}

impl From<&str> for RollNo {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl std::fmt::Display for RollNo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum AttendanceStatus {
    #[default]
    #[serde(rename = "P")]
    Present,
    #[serde(rename = "A")]
    Absent,
}

impl AttendanceStatus {
    pub fn code(&self) -> &'static str {
        match self {
            Self::Present => crate::constants::STATUS_PRESENT,
            Self::Absent => crate::constants::STATUS_ABSENT,
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim() {
            "P" => Some(Self::Present),
            "A" => Some(Self::Absent),
            _ => None,
        }
    }

    pub fn is_present(&self) -> bool {
        matches!(self, Self::Present)
    }
}

/// A logged-in student, fetched once per scanning session.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct StudentIdentity {
    pub id: String,
    pub name: String,
    pub roll_no: RollNo,
    pub year: String,
    pub division: String,
}

/// A logged-in teacher as returned at login.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TeacherProfile {
    pub teacher_id: String,
    pub name: String,
    pub year: String,
    pub subject: String,
}

/// Decoded QR payload. Field values are compared verbatim.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SessionReference {
    pub session_id: String,
    pub division: String,
    pub date: String,
    pub year: String,
}

/// A session freshly issued for a teacher, ready to be shown as a QR code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedSession {
    pub reference: SessionReference,
    pub subject: String,
}

/// One student line of a session: either from the backend's present list or
/// synthesised for an absentee.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceEntry {
    pub roll_no: RollNo,
    pub name: String,
    pub status: AttendanceStatus,
}

/// Backend view of one past session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttendanceRecord {
    pub subject: String,
    pub date: String,
    pub students: Vec<AttendanceEntry>,
}

/// One student of the authoritative class list for a (year, division).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RosterEntry {
    pub roll_no: RollNo,
    pub name: String,
}
