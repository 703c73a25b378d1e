//! Async driver for the session machine.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::warn;

use shophub_core::result::AppResult;
use shophub_entity::profile::RoleAssignment;

use crate::machine::{Effect, Identity, SessionEvent, SessionState};

/// Result of a successful sign-in: the token to present on later
/// requests plus the identity it belongs to.
#[derive(Debug, Clone)]
pub struct ClientSession {
    /// Bearer token.
    pub access_token: String,
    /// The signed-in identity.
    pub user: Identity,
}

/// Credential operations against the API.
#[async_trait]
pub trait AuthGateway: Send + Sync {
    /// Sign in with email and password.
    async fn sign_in(&self, email: &str, password: &str) -> AppResult<ClientSession>;
}

/// Role resolution against the API.
#[async_trait]
pub trait RoleGateway: Send + Sync {
    /// Fetch the role assignment for the bearer of `token`.
    async fn fetch_role(&self, token: &str) -> AppResult<RoleAssignment>;
}

/// Drives the pure [`SessionState`] machine against the gateways.
///
/// Every role fetch runs under an explicit timeout, so a hung upstream
/// can never leave the machine loading forever. Manual mode is entered
/// before the first await of [`sign_in`] and is cleared on every exit
/// path, success or failure.
///
/// [`sign_in`]: SessionController::sign_in
pub struct SessionController {
    auth: Arc<dyn AuthGateway>,
    roles: Arc<dyn RoleGateway>,
    state: Mutex<SessionState>,
    token: Mutex<Option<String>>,
    fetch_timeout: Duration,
}

impl SessionController {
    /// Create a controller in the unauthenticated state.
    pub fn new(
        auth: Arc<dyn AuthGateway>,
        roles: Arc<dyn RoleGateway>,
        fetch_timeout: Duration,
    ) -> Self {
        Self {
            auth,
            roles,
            state: Mutex::new(SessionState::Unauthenticated),
            token: Mutex::new(None),
            fetch_timeout,
        }
    }

    /// Snapshot of the current state.
    pub async fn state(&self) -> SessionState {
        self.state.lock().await.clone()
    }

    /// Run the explicit sign-in flow end to end.
    ///
    /// The machine enters manual mode synchronously, before the
    /// credential call suspends, so a broadcast firing for this same
    /// login can never start a competing role fetch.
    pub async fn sign_in(&self, email: &str, password: &str) -> AppResult<SessionState> {
        self.dispatch(SessionEvent::ManualSignInStarted).await;

        let session = match self.auth.sign_in(email, password).await {
            Ok(session) => session,
            Err(e) => {
                self.dispatch(SessionEvent::ManualSignInFailed).await;
                return Err(e);
            }
        };

        *self.token.lock().await = Some(session.access_token.clone());
        let effect = self
            .dispatch(SessionEvent::ManualSignInSucceeded(session.user))
            .await;
        self.run_effect(effect).await;

        Ok(self.state().await)
    }

    /// Handle a session-changed broadcast from the auth service.
    pub async fn on_broadcast(&self, user: Option<Identity>) {
        let event = match user {
            Some(user) => SessionEvent::BroadcastSignedIn(user),
            None => SessionEvent::BroadcastSignedOut,
        };
        let effect = self.dispatch(event).await;
        self.run_effect(effect).await;
    }

    /// Retry role resolution from `Ready { role: None }`.
    pub async fn refresh(&self) -> SessionState {
        let effect = self.dispatch(SessionEvent::RefreshRequested).await;
        self.run_effect(effect).await;
        self.state().await
    }

    /// Sign out locally and forget the token.
    pub async fn sign_out(&self) {
        *self.token.lock().await = None;
        self.dispatch(SessionEvent::SignedOut).await;
    }

    async fn dispatch(&self, event: SessionEvent) -> Effect {
        self.state.lock().await.apply(event)
    }

    /// Carry out a transition's effect. The fetch resolves or fails
    /// within the timeout, and either way feeds a terminating event
    /// back into the machine.
    async fn run_effect(&self, effect: Effect) {
        let Effect::FetchRole(user) = effect else {
            return;
        };

        let token = self.token.lock().await.clone();
        let Some(token) = token else {
            warn!(user = %user.id, "role fetch requested without a token");
            self.dispatch(SessionEvent::RoleResolutionFailed(user.id)).await;
            return;
        };

        let outcome = tokio::time::timeout(self.fetch_timeout, self.roles.fetch_role(&token)).await;

        match outcome {
            Ok(Ok(role)) => {
                self.dispatch(SessionEvent::RoleResolved(role)).await;
            }
            Ok(Err(error)) => {
                warn!(user = %user.id, %error, "role resolution failed");
                self.dispatch(SessionEvent::RoleResolutionFailed(user.id)).await;
            }
            Err(_) => {
                warn!(user = %user.id, "role resolution timed out");
                self.dispatch(SessionEvent::RoleResolutionFailed(user.id)).await;
            }
        }
    }
}
