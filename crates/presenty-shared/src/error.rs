use thiserror::Error;

#[derive(Error, Debug)]
pub enum PresentyError {
    #[error("QR decode error: {0}")]
    Decode(#[from] DecodeError),

    #[error("Scan rejected: {0}")]
    Rejected(#[from] Rejection),

    #[error("Wire error: {0}")]
    Wire(#[from] WireError),
}

/// Why scanned text is not a session reference.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("QR text is empty or not a JSON object")]
    Format,

    #[error("QR text is not valid JSON: {0}")]
    Parse(String),

    #[error("QR payload field `{0}` is missing or not a string")]
    Schema(&'static str),
}

/// Machine-readable reason a scan attempt was refused.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    #[error("invalid session payload: {0}")]
    Invalid(DecodeError),

    #[error("session is for year {session}, student is in year {student}")]
    YearMismatch { student: String, session: String },

    #[error("session is for division {session}, student is in division {student}")]
    DivisionMismatch { student: String, session: String },

    #[error("attendance is not open for this session")]
    SessionNotActive,

    #[error("scanning blocked for {remaining_minutes} more minute(s)")]
    Blocked { remaining_minutes: i64 },
}

/// Malformed backend response body.
#[derive(Error, Debug)]
pub enum WireError {
    #[error("Malformed response body: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Response is missing `{0}`")]
    MissingField(&'static str),
}
