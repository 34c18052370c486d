//! Sign-in, registration and sign-out.

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use presenty_shared::wire::{StudentRegistration, TeacherRegistration};

use crate::cooldown::{load_cooldown, CooldownStore};
use crate::error::ClientError;
use crate::events::{
    Notice, MSG_LOGGED_OUT, MSG_STUDENT_LOGGED_IN, MSG_STUDENT_REGISTERED, MSG_TEACHER_LOGGED_IN,
    MSG_TEACHER_REGISTERED,
};
use crate::remote::Authenticator;
use crate::state::{AppState, SessionContext, StudentSession, TeacherSession};

fn require(field: &'static str, value: &str) -> Result<(), ClientError> {
    if value.trim().is_empty() {
        return Err(ClientError::MissingField(field));
    }
    Ok(())
}

/// Minutes the device stays locked for student sign-in, if a scan cooldown
/// is running.
pub async fn login_block(
    cooldowns: &dyn CooldownStore,
    now: DateTime<Utc>,
) -> Result<Option<i64>, ClientError> {
    Ok(load_cooldown(cooldowns, now).await?.remaining_minutes(now))
}

/// Student sign-in. A device that recorded a scan less than the cooldown ago
/// refuses the next student even when the credentials are good.
pub async fn login_student<A>(
    state: &mut AppState,
    auth: &A,
    cooldowns: &dyn CooldownStore,
    email: &str,
    password: &str,
    now: DateTime<Utc>,
) -> Result<Notice, ClientError>
where
    A: Authenticator + ?Sized,
{
    require("email", email)?;
    require("password", password)?;

    let login = auth
        .login_student(email.trim(), password)
        .await
        .map_err(ClientError::remote("Error occurred"))?;

    if let Some(remaining_minutes) = login_block(cooldowns, now).await? {
        warn!(student = %login.student_id, remaining_minutes, "Sign-in refused, device blocked");
        return Err(ClientError::LoginBlocked { remaining_minutes });
    }

    info!(student = %login.student_id, "Student signed in");
    state.context = SessionContext::Student(StudentSession {
        token: login.token,
        student_id: login.student_id,
        identity: None,
    });
    Ok(Notice::success(MSG_STUDENT_LOGGED_IN))
}

pub async fn login_teacher<A>(
    state: &mut AppState,
    auth: &A,
    email: &str,
    password: &str,
) -> Result<Notice, ClientError>
where
    A: Authenticator + ?Sized,
{
    require("email", email)?;
    require("password", password)?;

    let login = auth
        .login_teacher(email.trim(), password)
        .await
        .map_err(ClientError::remote("Login error"))?;

    info!(teacher = %login.profile.teacher_id, subject = %login.profile.subject, "Teacher signed in");
    state.context = SessionContext::Teacher(TeacherSession {
        token: login.token,
        profile: login.profile,
        presenty_active: false,
    });
    Ok(Notice::success(MSG_TEACHER_LOGGED_IN))
}

pub async fn register_student<A>(auth: &A, form: &StudentRegistration) -> Result<Notice, ClientError>
where
    A: Authenticator + ?Sized,
{
    if let Some(field) = form.first_missing() {
        return Err(ClientError::MissingField(field));
    }
    auth.register_student(form)
        .await
        .map_err(ClientError::remote("Registration failed"))?;
    info!(year = %form.year, division = %form.division, "Student registered");
    Ok(Notice::success(MSG_STUDENT_REGISTERED))
}

pub async fn register_teacher<A>(auth: &A, form: &TeacherRegistration) -> Result<Notice, ClientError>
where
    A: Authenticator + ?Sized,
{
    if let Some(field) = form.first_missing() {
        return Err(ClientError::MissingField(field));
    }
    auth.register_teacher(form)
        .await
        .map_err(ClientError::remote("Registration failed"))?;
    info!(teacher = %form.teacher_id, "Teacher registered");
    Ok(Notice::success(MSG_TEACHER_REGISTERED))
}

pub fn logout(state: &mut AppState) -> Notice {
    state.sign_out();
    info!("Signed out");
    Notice::success(MSG_LOGGED_OUT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cooldown::MemoryCooldownStore;
    use crate::events::NoticeKind;
    use crate::flows::fakes::{rao, t0, FakeBackend};
    use chrono::Duration;

    #[tokio::test]
    async fn test_student_login_sets_context() {
        let mut state = AppState::default();
        let backend = FakeBackend::default();
        let store = MemoryCooldownStore::new();

        let notice = login_student(&mut state, &backend, &store, "asha@x", "pw", t0())
            .await
            .unwrap();
        assert_eq!(notice.kind, NoticeKind::Success);
        let session = state.context.student().unwrap();
        assert_eq!(session.student_id, "stu-1");
        assert!(session.identity.is_none());
    }

    #[tokio::test]
    async fn test_student_login_refused_while_blocked() {
        let mut state = AppState::default();
        let backend = FakeBackend::default();
        let store = MemoryCooldownStore::new();
        store.set(t0() + Duration::seconds(90)).await.unwrap();

        let err = login_student(&mut state, &backend, &store, "asha@x", "pw", t0())
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::LoginBlocked { remaining_minutes: 2 }));
        assert_eq!(err.notice().text, "Blocked. Try again in 2 minute(s)");
        assert!(!state.context.is_signed_in());

        let later = t0() + Duration::minutes(2);
        login_student(&mut state, &backend, &store, "asha@x", "pw", later)
            .await
            .unwrap();
        assert!(state.context.is_signed_in());
        assert_eq!(store.get().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_blank_credentials_rejected_locally() {
        let mut state = AppState::default();
        let mut backend = FakeBackend::default();
        backend.login_down = true;
        let store = MemoryCooldownStore::new();

        let err = login_student(&mut state, &backend, &store, " ", "pw", t0())
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::MissingField("email")));

        let err = login_teacher(&mut state, &backend, "t@x", "").await.unwrap_err();
        assert_eq!(err.notice().text, "Please fill all fields");
    }

    #[tokio::test]
    async fn test_teacher_login_and_logout() {
        let mut state = AppState::default();
        let backend = FakeBackend::default();

        login_teacher(&mut state, &backend, "rao@x", "pw").await.unwrap();
        let teacher = state.context.teacher().unwrap();
        assert_eq!(teacher.profile, rao());
        assert!(!teacher.presenty_active);

        assert_eq!(logout(&mut state).text, "Logged out successfully");
        assert_eq!(state.context, SessionContext::SignedOut);
    }

    #[tokio::test]
    async fn test_login_failure_uses_fallback_text() {
        let mut state = AppState::default();
        let mut backend = FakeBackend::default();
        backend.login_down = true;

        let err = login_teacher(&mut state, &backend, "rao@x", "pw").await.unwrap_err();
        assert_eq!(err.notice().text, "Login error");
    }

    #[tokio::test]
    async fn test_registration_checks_every_field() {
        let backend = FakeBackend::default();
        let mut form = StudentRegistration {
            name: "Asha".into(),
            email: "asha@x".into(),
            password: "pw".into(),
            year: "TE".into(),
            department: "Comp".into(),
            division: "A".into(),
            roll_no: String::new(),
        };

        let err = register_student(&backend, &form).await.unwrap_err();
        assert!(matches!(err, ClientError::MissingField("rollNo")));
        assert_eq!(*backend.registrations.lock().unwrap(), 0);

        form.roll_no = "14".into();
        let notice = register_student(&backend, &form).await.unwrap();
        assert_eq!(notice.text, "Registered! Now login");
        assert_eq!(*backend.registrations.lock().unwrap(), 1);

        let err = register_teacher(&backend, &TeacherRegistration::default())
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::MissingField("name")));
    }
}
