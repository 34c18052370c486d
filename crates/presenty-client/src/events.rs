use serde::Serialize;

pub const MSG_ATTENDANCE_MARKED: &str = "Attendance marked";
pub const MSG_STUDENT_LOGGED_IN: &str = "Login successful";
pub const MSG_TEACHER_LOGGED_IN: &str = "Teacher logged in";
pub const MSG_STUDENT_REGISTERED: &str = "Registered! Now login";
pub const MSG_TEACHER_REGISTERED: &str = "Teacher registered successfully!";
pub const MSG_LOGGED_OUT: &str = "Logged out successfully";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeKind {
    Success,
    Error,
}

/// Short user-facing message, rendered by the host UI as a toast.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: String,
}

impl Notice {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            text: text.into(),
        }
    }
}
