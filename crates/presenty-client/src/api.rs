//! Backend API client.
//!
//! [`ApiClient`] implements every collaborator trait on top of a host-provided
//! [`Transport`], building the endpoint URLs and validating each response
//! body through `presenty_shared::wire` before handing it to a flow.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use presenty_shared::wire::{
    self, GenerateQrBody, GenerateQrRequest, HistoryBody, LoginRequest, MessageBody, RosterBody,
    ScanRequest, SessionValidityBody, StudentBody, StudentLoginBody, StudentRegistration,
    TeacherLoginBody, TeacherRegistration, TogglePresentyRequest,
};
use presenty_shared::{
    AttendanceRecord, IssuedSession, RosterEntry, SessionReference, StudentIdentity,
    TeacherProfile, WireError,
};

use crate::config::ClientConfig;
use crate::error::RemoteError;
use crate::remote::{
    Authenticator, HistoryProvider, RosterProvider, ScanRecorder, SessionControl, SessionOracle,
    StudentDirectory, StudentLogin, TeacherLogin, Transport,
};

pub struct ApiClient<T> {
    transport: T,
    base_url: String,
}

impl<T: Transport> ApiClient<T> {
    pub fn new(transport: T, config: &ClientConfig) -> Self {
        Self {
            transport,
            base_url: config.api_base_url.clone(),
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get_json<B: DeserializeOwned>(&self, path: &str) -> Result<B, RemoteError> {
        let url = self.url(path);
        debug!(%url, "GET");
        let body = self.transport.get(&url).await?;
        Ok(wire::parse(&body)?)
    }

    async fn post_json<R, B>(&self, path: &str, request: &R) -> Result<B, RemoteError>
    where
        R: Serialize + Sync,
        B: DeserializeOwned,
    {
        let url = self.url(path);
        let payload = serde_json::to_value(request).map_err(WireError::from)?;
        debug!(%url, "POST");
        let body = self.transport.post(&url, payload).await?;
        Ok(wire::parse(&body)?)
    }

    /// POST where any 2xx reply means success; the body is not read.
    async fn post_ack<R>(&self, path: &str, request: &R) -> Result<(), RemoteError>
    where
        R: Serialize + Sync,
    {
        let url = self.url(path);
        let payload = serde_json::to_value(request).map_err(WireError::from)?;
        debug!(%url, "POST");
        self.transport.post(&url, payload).await?;
        Ok(())
    }
}

fn encode(value: &str) -> String {
    urlencoding::encode(value).into_owned()
}

#[async_trait]
impl<T: Transport> StudentDirectory for ApiClient<T> {
    async fn student(&self, student_id: &str) -> Result<StudentIdentity, RemoteError> {
        let body: StudentBody = self
            .get_json(&format!("/students/{}", encode(student_id)))
            .await?;
        Ok(body.into())
    }
}

#[async_trait]
impl<T: Transport> SessionOracle for ApiClient<T> {
    async fn is_session_active(&self, session_id: &str) -> Result<bool, RemoteError> {
        let body: SessionValidityBody = self
            .get_json(&format!("/teachers/validate-session/{}", encode(session_id)))
            .await?;
        Ok(body.presenty_active)
    }
}

#[async_trait]
impl<T: Transport> ScanRecorder for ApiClient<T> {
    async fn record_scan(
        &self,
        student_id: &str,
        session: &SessionReference,
    ) -> Result<(), RemoteError> {
        let request = ScanRequest {
            student_id,
            qr_data: session,
        };
        self.post_ack("/students/scan", &request).await
    }
}

#[async_trait]
impl<T: Transport> RosterProvider for ApiClient<T> {
    async fn roster(&self, year: &str, division: &str) -> Result<Vec<RosterEntry>, RemoteError> {
        let body: RosterBody = self
            .get_json(&format!(
                "/students/template?division={}&year={}",
                encode(division),
                encode(year)
            ))
            .await?;
        Ok(body.into())
    }
}

#[async_trait]
impl<T: Transport> HistoryProvider for ApiClient<T> {
    async fn history(
        &self,
        teacher_id: &str,
        division: &str,
        year: &str,
    ) -> Result<Vec<AttendanceRecord>, RemoteError> {
        let body: HistoryBody = self
            .get_json(&format!(
                "/teachers/history/{}?division={}&year={}",
                encode(teacher_id),
                encode(division),
                encode(year)
            ))
            .await?;
        Ok(body.into_records())
    }
}

#[async_trait]
impl<T: Transport> SessionControl for ApiClient<T> {
    async fn generate_session(
        &self,
        teacher: &TeacherProfile,
        division: &str,
    ) -> Result<IssuedSession, RemoteError> {
        let request = GenerateQrRequest {
            teacher_id: &teacher.teacher_id,
            year: &teacher.year,
            subject: &teacher.subject,
            division,
        };
        let body: GenerateQrBody = self.post_json("/teachers/generate-qr", &request).await?;
        Ok(body.into_session()?)
    }

    async fn set_presenty(&self, teacher_id: &str, active: bool) -> Result<String, RemoteError> {
        let request = TogglePresentyRequest { teacher_id, active };
        let body: MessageBody = self
            .post_json("/teachers/toggle-presenty", &request)
            .await?;
        Ok(body.message.unwrap_or_default())
    }
}

#[async_trait]
impl<T: Transport> Authenticator for ApiClient<T> {
    async fn login_student(
        &self,
        email: &str,
        password: &str,
    ) -> Result<StudentLogin, RemoteError> {
        let body: StudentLoginBody = self
            .post_json("/students/login", &LoginRequest { email, password })
            .await?;
        Ok(StudentLogin {
            token: body.token,
            student_id: body.student.id,
        })
    }

    async fn login_teacher(
        &self,
        email: &str,
        password: &str,
    ) -> Result<TeacherLogin, RemoteError> {
        let body: TeacherLoginBody = self
            .post_json("/teachers/login", &LoginRequest { email, password })
            .await?;
        Ok(TeacherLogin {
            token: body.token,
            profile: body.teacher,
        })
    }

    async fn register_student(&self, form: &StudentRegistration) -> Result<(), RemoteError> {
        self.post_ack("/students/register", form).await
    }

    async fn register_teacher(&self, form: &TeacherRegistration) -> Result<(), RemoteError> {
        self.post_ack("/teachers/register", form).await
    }
}
