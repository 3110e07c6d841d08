//! Shared-secret access control for score editing
//!
//! The controller holds a single authorization flag. Guests can read every
//! board; only a coordinator, unlocked with the clearance code, can change
//! scores. A denied mutation raises the login prompt instead of failing.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

/// The access level derived from the authorization flag
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, derive_more::Display,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    /// Read-only visitor
    #[default]
    #[display("GUEST")]
    Guest,
    /// Event coordinator allowed to edit scores and teams
    #[display("COORDINATOR")]
    Coordinator,
}

/// Errors reported by the access controller
#[derive(Error, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The submitted clearance code does not match the secret
    #[error("invalid clearance code, access denied")]
    InvalidCredential,
    /// A gated action was attempted without authorization
    #[error("action requires coordinator access")]
    MutationDenied,
}

/// Holds the authorization flag and the pending login prompt
///
/// Only the flag is persisted; the prompt belongs to the running session.
#[derive(Debug, Clone)]
pub struct AccessController {
    secret: String,
    authorized: bool,
    prompt_pending: bool,
}

impl AccessController {
    /// Creates a controller for `secret` in the given authorization state
    ///
    /// Use `authorized = true` to restore a session persisted earlier.
    pub fn new(secret: impl Into<String>, authorized: bool) -> Self {
        Self {
            secret: secret.into(),
            authorized,
            prompt_pending: false,
        }
    }

    /// Checks a clearance code and unlocks coordinator access on match
    ///
    /// The comparison is exact and case-sensitive. There is no retry limit.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidCredential` if the code does not match; the
    /// state is left unchanged.
    pub fn attempt_login(&mut self, code: &str) -> Result<(), Error> {
        self.verify(code)?;
        self.authorized = true;
        self.prompt_pending = false;
        info!("coordinator session started");
        Ok(())
    }

    /// Checks a clearance code without changing any state
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidCredential` if the code does not match.
    pub fn verify(&self, code: &str) -> Result<(), Error> {
        if code != self.secret {
            warn!("rejected clearance code");
            return Err(Error::InvalidCredential);
        }
        Ok(())
    }

    /// Drops back to guest access
    pub fn logout(&mut self) {
        if self.authorized {
            info!("coordinator session ended");
        }
        self.authorized = false;
    }

    /// Runs `action` only if a coordinator is logged in
    ///
    /// When unauthorized the action is not run and the login prompt is
    /// raised.
    ///
    /// # Errors
    ///
    /// Returns `Error::MutationDenied` if the controller is not authorized.
    pub fn guard<T, F: FnOnce() -> T>(&mut self, action: F) -> Result<T, Error> {
        if self.authorized {
            Ok(action())
        } else {
            warn!("gated action attempted without access");
            self.prompt_pending = true;
            Err(Error::MutationDenied)
        }
    }

    /// Returns whether a coordinator is logged in
    pub fn is_authorized(&self) -> bool {
        self.authorized
    }

    /// Returns the current role
    pub fn role(&self) -> Role {
        if self.authorized {
            Role::Coordinator
        } else {
            Role::Guest
        }
    }

    /// Returns whether the login prompt should be shown
    pub fn prompt_pending(&self) -> bool {
        self.prompt_pending
    }

    /// Raises the login prompt
    pub fn request_prompt(&mut self) {
        self.prompt_pending = true;
    }

    /// Closes the login prompt without logging in
    pub fn dismiss_prompt(&mut self) {
        self.prompt_pending = false;
    }
}
