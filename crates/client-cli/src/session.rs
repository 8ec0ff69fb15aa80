//! Process-wide session state and the operations that mutate it.
//!
//! One [`Session`] exists for the life of the process; views read the current
//! identity through it and never write it directly. The identity changes only
//! through the fixed operation set below, or through the secure client's
//! 401/403 interception.

use std::sync::{Arc, Mutex};

use serde::Serialize;
use shared::{ProfileUpdate, RegisterPayload, User};

use crate::http::{ApiClient, ApiError};

/// Shared handle to the session state; also held by the secure client so it
/// can clear the identity when an authenticated call is rejected.
pub type SessionHandle = Arc<Mutex<SessionState>>;

#[derive(Debug, Default)]
pub struct SessionState {
    user: Option<User>,
    /// True until the startup identity check has completed. Role gates must
    /// not redirect to login while this is set.
    loading: bool,
    /// Set by the 401/403 interception; the command loop routes to login.
    expired: bool,
}

impl SessionState {
    fn starting() -> Self {
        Self {
            user: None,
            loading: true,
            expired: false,
        }
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn was_expired(&self) -> bool {
        self.expired
    }

    /// A fresh identity arrived from the server (login, register, profile
    /// update, or the startup check).
    pub fn apply_identity(&mut self, user: User) {
        self.user = Some(user);
        self.loading = false;
        self.expired = false;
    }

    /// The identity check failed; the session is anonymous.
    pub fn apply_absent(&mut self) {
        self.user = None;
        self.loading = false;
    }

    /// Local logout. Applied whether or not the server call succeeded.
    pub fn apply_logout(&mut self) {
        self.user = None;
        self.loading = false;
        self.expired = false;
    }

    /// An authenticated call came back 401/403: drop the identity and flag
    /// the expiry so the caller is routed to login.
    pub fn force_expire(&mut self) {
        self.user = None;
        self.loading = false;
        self.expired = true;
    }
}

#[derive(Serialize)]
struct LoginPayload<'a> {
    email: &'a str,
    password: &'a str,
}

/// The session accessor. Uses the base client: `/users/*` issues and clears
/// the cookie itself and must not run through the 401 interception (a wrong
/// password is a form error, not a session teardown).
pub struct Session {
    api: ApiClient,
    state: SessionHandle,
}

impl Session {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            state: Arc::new(Mutex::new(SessionState::starting())),
        }
    }

    pub fn handle(&self) -> SessionHandle {
        Arc::clone(&self.state)
    }

    pub fn current_user(&self) -> Option<User> {
        self.state.lock().expect("session lock").user().cloned()
    }

    pub fn is_loading(&self) -> bool {
        self.state.lock().expect("session lock").is_loading()
    }

    /// Startup identity check against `/users/me`. Any failure, including a
    /// network error, leaves the session anonymous; this never propagates an
    /// error because an anonymous session is a valid outcome.
    pub async fn check_user(&self) -> Option<User> {
        match self.api.get::<User>("/users/me").await {
            Ok(user) => {
                tracing::debug!(email = %user.email, "session identity confirmed");
                self.state
                    .lock()
                    .expect("session lock")
                    .apply_identity(user.clone());
                Some(user)
            }
            Err(err) => {
                tracing::debug!("no active session: {err}");
                self.state.lock().expect("session lock").apply_absent();
                None
            }
        }
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<User, ApiError> {
        let user: User = self
            .api
            .post("/users/login", &LoginPayload { email, password })
            .await?;
        self.state
            .lock()
            .expect("session lock")
            .apply_identity(user.clone());
        Ok(user)
    }

    pub async fn register(&self, payload: &RegisterPayload) -> Result<User, ApiError> {
        let user: User = self.api.post("/users/register", payload).await?;
        self.state
            .lock()
            .expect("session lock")
            .apply_identity(user.clone());
        Ok(user)
    }

    /// Logout always succeeds locally. A failed server call is logged and
    /// swallowed so the user is never trapped in a broken logged-in state.
    pub async fn logout(&self) {
        if let Err(err) = self.api.post_empty("/users/logout").await {
            tracing::warn!("logout call failed, clearing local session anyway: {err}");
        }
        self.state.lock().expect("session lock").apply_logout();
    }

    /// The server is authoritative for the merged profile; its response
    /// replaces the stored identity wholesale.
    pub async fn update_user(&self, update: &ProfileUpdate) -> Result<User, ApiError> {
        let user: User = self.api.put("/users/profile", update).await?;
        self.state
            .lock()
            .expect("session lock")
            .apply_identity(user.clone());
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::Role;

    fn sample_user() -> User {
        User {
            id: "u-1".to_string(),
            name: "Amina".to_string(),
            email: "amina@example.com".to_string(),
            role: Role::Hr,
            date_of_birth: None,
            profile_image: None,
            company_name: Some("Acme".to_string()),
            company_logo: None,
            package_name: None,
            employee_limit: Some(5),
            current_employees: None,
        }
    }

    #[test]
    fn test_starts_loading_and_anonymous() {
        let state = SessionState::starting();
        assert!(state.is_loading());
        assert!(state.user().is_none());
        assert!(!state.was_expired());
    }

    #[test]
    fn test_identity_clears_loading() {
        let mut state = SessionState::starting();
        state.apply_identity(sample_user());
        assert!(!state.is_loading());
        assert_eq!(state.user().unwrap().email, "amina@example.com");
    }

    #[test]
    fn test_failed_check_clears_loading() {
        let mut state = SessionState::starting();
        state.apply_absent();
        assert!(!state.is_loading());
        assert!(state.user().is_none());
    }

    #[test]
    fn test_logout_clears_identity() {
        let mut state = SessionState::starting();
        state.apply_identity(sample_user());
        state.apply_logout();
        assert!(state.user().is_none());
        assert!(!state.was_expired());
    }

    #[test]
    fn test_force_expire_flags_redirect() {
        let mut state = SessionState::starting();
        state.apply_identity(sample_user());
        state.force_expire();
        assert!(state.user().is_none());
        assert!(state.was_expired());
    }

    #[test]
    fn test_new_identity_clears_expiry() {
        let mut state = SessionState::starting();
        state.force_expire();
        state.apply_identity(sample_user());
        assert!(!state.was_expired());
        assert!(state.user().is_some());
    }

    #[test]
    fn test_session_handle_shares_state() {
        let api = ApiClient::new("https://api.example.com").unwrap();
        let session = Session::new(api);
        let handle = session.handle();

        handle.lock().unwrap().apply_identity(sample_user());
        assert_eq!(session.current_user().unwrap().id, "u-1");

        handle.lock().unwrap().force_expire();
        assert!(session.current_user().is_none());
    }
}
