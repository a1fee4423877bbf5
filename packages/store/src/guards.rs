//! Route access rules.
//!
//! Pure decisions over an [`AuthState`] snapshot; the UI turns a
//! [`GuardDecision::Redirect`] into a navigation and renders nothing for
//! [`GuardDecision::Wait`].

use crate::auth::AuthState;

pub const HOME_PATH: &str = "/";
pub const LOGIN_PATH: &str = "/login";
pub const PREFERENCE_SETUP_PATH: &str = "/user-preference/setup";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Guard {
    /// Signed-in users only.
    Session,
    /// Signed-in users must have finished preference setup. Guests pass.
    Preferences,
    /// Guests only (login and signup pages).
    PublicOnly,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GuardDecision {
    Render,
    Redirect(&'static str),
    /// The first session check has not finished yet.
    Wait,
}

impl Guard {
    pub fn evaluate(self, auth: &AuthState) -> GuardDecision {
        if !auth.session_checked {
            return GuardDecision::Wait;
        }
        let signed_in = auth.is_authenticated();
        match self {
            Guard::Session if !signed_in => GuardDecision::Redirect(LOGIN_PATH),
            Guard::Preferences if signed_in && !auth.has_preference => {
                GuardDecision::Redirect(PREFERENCE_SETUP_PATH)
            }
            Guard::PublicOnly if signed_in => GuardDecision::Redirect(HOME_PATH),
            _ => GuardDecision::Render,
        }
    }
}

/// Apply guards in order; the first one that does not render decides.
pub fn evaluate_all(guards: &[Guard], auth: &AuthState) -> GuardDecision {
    guards
        .iter()
        .map(|g| g.evaluate(auth))
        .find(|d| *d != GuardDecision::Render)
        .unwrap_or(GuardDecision::Render)
}
