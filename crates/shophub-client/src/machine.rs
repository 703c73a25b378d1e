//! The pure session state machine.
//!
//! Two triggers can race for the same login: the explicit sign-in flow
//! and the session-changed broadcast the auth service fires for it.
//! Instead of a boolean side-flag on an independent reducer, manual
//! mode is encoded in the states themselves, so "suppress role
//! overwrite" and "who owns clearing the loading indicator" live in one
//! transition table. While manual mode holds, broadcast events update
//! the raw identity pointer only; they never start or finish a role
//! fetch and never touch loading ownership.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use shophub_entity::profile::RoleAssignment;

/// The signed-in identity as the client knows it before role
/// resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// The user's id.
    pub id: Uuid,
    /// The user's email.
    pub email: String,
}

/// Which flow owns the in-flight role fetch, and therefore the duty to
/// clear the loading state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOwner {
    /// The explicit, user-driven sign-in flow.
    ManualLogin,
    /// A session-changed broadcast or a refresh.
    Background,
}

/// Session state, tagged so illegal combinations are unrepresentable.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionState {
    /// Nobody is signed in.
    Unauthenticated,
    /// A manual sign-in is in flight; `user` tracks the identity a
    /// concurrent broadcast may have delivered early.
    Authenticating { user: Option<Identity> },
    /// Identity known, role fetch in flight.
    RoleResolving { user: Identity, owner: LoadOwner },
    /// Role resolution finished. `role: None` is the failed-resolution
    /// state with a retry affordance.
    Ready {
        user: Identity,
        role: Option<RoleAssignment>,
    },
}

/// Everything that can happen to the session.
#[derive(Debug, Clone)]
pub enum SessionEvent {
    /// The user pressed sign-in; set before the first await.
    ManualSignInStarted,
    /// The manual flow's credentials were accepted.
    ManualSignInSucceeded(Identity),
    /// The manual flow's credentials were rejected or errored.
    ManualSignInFailed,
    /// The auth service broadcast a session for this identity.
    BroadcastSignedIn(Identity),
    /// The auth service broadcast a sign-out.
    BroadcastSignedOut,
    /// A fetch resolved a role; `user_id` inside names who it is for.
    RoleResolved(RoleAssignment),
    /// A fetch for this user failed or timed out.
    RoleResolutionFailed(Uuid),
    /// The user asked to retry role resolution.
    RefreshRequested,
    /// The user signed out locally.
    SignedOut,
}

/// What the driver must do after a transition.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Nothing; the transition was self-contained.
    None,
    /// Start a role fetch for this identity. Exactly the transitions
    /// that enter `RoleResolving` emit this, so every loading state has
    /// one unambiguous owner responsible for ending it.
    FetchRole(Identity),
}

impl SessionState {
    /// A manual sign-in currently owns the session.
    pub fn is_manual_mode(&self) -> bool {
        matches!(
            self,
            Self::Authenticating { .. }
                | Self::RoleResolving {
                    owner: LoadOwner::ManualLogin,
                    ..
                }
        )
    }

    /// Something is in flight; UIs show a spinner.
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Authenticating { .. } | Self::RoleResolving { .. })
    }

    /// The identity currently attached to the session, if any.
    pub fn identity(&self) -> Option<&Identity> {
        match self {
            Self::Unauthenticated => None,
            Self::Authenticating { user } => user.as_ref(),
            Self::RoleResolving { user, .. } | Self::Ready { user, .. } => Some(user),
        }
    }

    /// The resolved role, if the session is ready and has one.
    pub fn role(&self) -> Option<&RoleAssignment> {
        match self {
            Self::Ready { role, .. } => role.as_ref(),
            _ => None,
        }
    }

    /// Apply one event, mutating the state and returning the effect the
    /// caller must carry out. Pure and synchronous.
    pub fn apply(&mut self, event: SessionEvent) -> Effect {
        match event {
            SessionEvent::ManualSignInStarted => {
                *self = Self::Authenticating { user: None };
                Effect::None
            }

            SessionEvent::ManualSignInSucceeded(user) => {
                *self = Self::RoleResolving {
                    user: user.clone(),
                    owner: LoadOwner::ManualLogin,
                };
                Effect::FetchRole(user)
            }

            SessionEvent::ManualSignInFailed => {
                *self = Self::Unauthenticated;
                Effect::None
            }

            SessionEvent::BroadcastSignedIn(user) => {
                if self.is_manual_mode() {
                    // The manual flow owns this login; record the
                    // identity but leave fetch ownership alone.
                    if let Self::Authenticating { user: slot } = self {
                        *slot = Some(user);
                    }
                    return Effect::None;
                }
                *self = Self::RoleResolving {
                    user: user.clone(),
                    owner: LoadOwner::Background,
                };
                Effect::FetchRole(user)
            }

            SessionEvent::BroadcastSignedOut => {
                if self.is_manual_mode() {
                    if let Self::Authenticating { user: slot } = self {
                        *slot = None;
                    }
                    return Effect::None;
                }
                *self = Self::Unauthenticated;
                Effect::None
            }

            SessionEvent::RoleResolved(role) => {
                // A fetch that lost ownership can finish late; its result
                // must not be attached to whoever occupies the session now.
                if let Self::RoleResolving { user, .. } = self {
                    if role.user_id == user.id {
                        *self = Self::Ready {
                            user: user.clone(),
                            role: Some(role),
                        };
                    }
                }
                Effect::None
            }

            SessionEvent::RoleResolutionFailed(for_user) => {
                if let Self::RoleResolving { user, .. } = self {
                    if for_user == user.id {
                        *self = Self::Ready {
                            user: user.clone(),
                            role: None,
                        };
                    }
                }
                Effect::None
            }

            SessionEvent::RefreshRequested => {
                if let Self::Ready { user, .. } = self {
                    let user = user.clone();
                    *self = Self::RoleResolving {
                        user: user.clone(),
                        owner: LoadOwner::Background,
                    };
                    return Effect::FetchRole(user);
                }
                Effect::None
            }

            SessionEvent::SignedOut => {
                *self = Self::Unauthenticated;
                Effect::None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use shophub_entity::role::{Role, RoleId};

    fn identity() -> Identity {
        Identity {
            id: Uuid::new_v4(),
            email: "alice@example.com".to_string(),
        }
    }

    fn assignment(user: &Identity, role_id: RoleId) -> RoleAssignment {
        RoleAssignment {
            user_id: user.id,
            email: user.email.clone(),
            full_name: None,
            role: Role {
                id: role_id,
                name: role_id.name().to_string(),
                description: None,
                created_at: Utc::now(),
            },
        }
    }

    #[test]
    fn test_manual_login_happy_path() {
        let user = identity();
        let mut state = SessionState::Unauthenticated;

        assert_eq!(state.apply(SessionEvent::ManualSignInStarted), Effect::None);
        assert!(state.is_manual_mode());
        assert!(state.is_loading());

        let effect = state.apply(SessionEvent::ManualSignInSucceeded(user.clone()));
        assert_eq!(effect, Effect::FetchRole(user.clone()));
        assert!(state.is_manual_mode());

        state.apply(SessionEvent::RoleResolved(assignment(&user, RoleId::USER)));
        assert!(!state.is_loading());
        assert!(!state.is_manual_mode());
        assert_eq!(state.role().map(|r| r.role.id), Some(RoleId::USER));
    }

    #[test]
    fn test_broadcast_during_manual_authenticating_is_suppressed() {
        let user = identity();
        let mut state = SessionState::Unauthenticated;
        state.apply(SessionEvent::ManualSignInStarted);

        // The broadcast for the same login lands before the manual flow
        // finishes; it must not start its own fetch.
        let effect = state.apply(SessionEvent::BroadcastSignedIn(user.clone()));
        assert_eq!(effect, Effect::None);
        assert_eq!(state.identity(), Some(&user));
        assert!(state.is_manual_mode());
        assert!(state.is_loading());
    }

    #[test]
    fn test_broadcast_during_manual_role_fetch_keeps_ownership() {
        let user = identity();
        let mut state = SessionState::Unauthenticated;
        state.apply(SessionEvent::ManualSignInStarted);
        state.apply(SessionEvent::ManualSignInSucceeded(user.clone()));

        let effect = state.apply(SessionEvent::BroadcastSignedIn(user.clone()));
        assert_eq!(effect, Effect::None);
        assert_eq!(
            state,
            SessionState::RoleResolving {
                user: user.clone(),
                owner: LoadOwner::ManualLogin,
            }
        );
    }

    #[test]
    fn test_broadcast_outside_manual_mode_starts_background_fetch() {
        let user = identity();
        let mut state = SessionState::Unauthenticated;

        let effect = state.apply(SessionEvent::BroadcastSignedIn(user.clone()));
        assert_eq!(effect, Effect::FetchRole(user.clone()));
        assert!(!state.is_manual_mode());
        assert!(state.is_loading());
    }

    #[test]
    fn test_failed_resolution_ends_loading_with_retry_affordance() {
        let user = identity();
        let mut state = SessionState::Unauthenticated;
        state.apply(SessionEvent::BroadcastSignedIn(user.clone()));

        state.apply(SessionEvent::RoleResolutionFailed(user.id));
        assert!(!state.is_loading());
        assert_eq!(
            state,
            SessionState::Ready {
                user: user.clone(),
                role: None,
            }
        );

        // Retry restarts the fetch.
        let effect = state.apply(SessionEvent::RefreshRequested);
        assert_eq!(effect, Effect::FetchRole(user));
        assert!(state.is_loading());
    }

    #[test]
    fn test_manual_failure_clears_manual_mode_and_loading() {
        let mut state = SessionState::Unauthenticated;
        state.apply(SessionEvent::ManualSignInStarted);
        state.apply(SessionEvent::ManualSignInFailed);
        assert_eq!(state, SessionState::Unauthenticated);
        assert!(!state.is_manual_mode());
        assert!(!state.is_loading());
    }

    #[test]
    fn test_broadcast_signout_during_manual_mode_only_clears_identity() {
        let user = identity();
        let mut state = SessionState::Unauthenticated;
        state.apply(SessionEvent::ManualSignInStarted);
        state.apply(SessionEvent::BroadcastSignedIn(user));

        let effect = state.apply(SessionEvent::BroadcastSignedOut);
        assert_eq!(effect, Effect::None);
        assert!(state.is_manual_mode());
        assert_eq!(state.identity(), None);
    }

    #[test]
    fn test_broadcast_signout_outside_manual_mode_resets() {
        let user = identity();
        let mut state = SessionState::Ready {
            user,
            role: None,
        };
        state.apply(SessionEvent::BroadcastSignedOut);
        assert_eq!(state, SessionState::Unauthenticated);
    }

    #[test]
    fn test_stale_resolution_events_are_ignored_when_not_loading() {
        let user = identity();
        let mut state = SessionState::Ready {
            user: user.clone(),
            role: None,
        };

        // A fetch that lost ownership finishing late must not clobber.
        state.apply(SessionEvent::RoleResolved(assignment(&user, RoleId::ADMIN)));
        assert_eq!(state.role(), None);

        let mut state = SessionState::Unauthenticated;
        state.apply(SessionEvent::RoleResolutionFailed(user.id));
        assert_eq!(state, SessionState::Unauthenticated);
    }

    #[test]
    fn test_stale_fetch_for_previous_identity_is_ignored() {
        let alice = identity();
        let bob = identity();
        let mut state = SessionState::Unauthenticated;

        // Alice's broadcast starts a fetch, then Bob's replaces her
        // before it completes.
        state.apply(SessionEvent::BroadcastSignedIn(alice.clone()));
        state.apply(SessionEvent::BroadcastSignedIn(bob.clone()));

        // Alice's fetch finishing late must not attach her role to Bob.
        let effect = state.apply(SessionEvent::RoleResolved(assignment(&alice, RoleId::ADMIN)));
        assert_eq!(effect, Effect::None);
        assert!(state.is_loading());
        assert_eq!(state.identity(), Some(&bob));

        // Bob's own fetch still terminates the loading state.
        state.apply(SessionEvent::RoleResolved(assignment(&bob, RoleId::USER)));
        assert_eq!(state.role().map(|r| r.user_id), Some(bob.id));
    }

    #[test]
    fn test_stale_failure_for_previous_identity_is_ignored() {
        let alice = identity();
        let bob = identity();
        let mut state = SessionState::Unauthenticated;
        state.apply(SessionEvent::BroadcastSignedIn(alice.clone()));
        state.apply(SessionEvent::BroadcastSignedIn(bob.clone()));

        // Alice's fetch timing out must not end Bob's loading state.
        state.apply(SessionEvent::RoleResolutionFailed(alice.id));
        assert!(state.is_loading());

        state.apply(SessionEvent::RoleResolutionFailed(bob.id));
        assert_eq!(
            state,
            SessionState::Ready {
                user: bob,
                role: None,
            }
        );
    }
}
