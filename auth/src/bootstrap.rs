//! # Session bootstrap — the sign-up/sign-in state machine
//!
//! One attempt moves `Idle -> Submitting -> Success | Failure`. The flow is
//! the same for both paths: validate the form, close the [`LoadingGate`],
//! perform the single remote operation, interpret the outcome, and on
//! success write the local [`Session`] before the gate reopens.
//!
//! ## Paths
//!
//! | Path | Remote operation | Success interpretation |
//! |------|------------------|------------------------|
//! | [`sign_up`](SessionBootstrapper::sign_up) | create a user document from the form fields | session from the newly assigned id and the form's name/image |
//! | [`sign_in`](SessionBootstrapper::sign_in) | equality query on email AND password | session from the first matching document |
//!
//! ## Guarantees
//!
//! - The gate closes before the remote call is issued and reopens only
//!   after the outcome is applied; a second submit while it is closed
//!   returns [`AuthError::InFlight`] without touching the remote store.
//! - The session is written only on success, as one
//!   [`Preferences::store_session`] call; every failure leaves it untouched.
//! - No cancellation: an in-flight attempt always runs to completion.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use tracing::{debug, info, warn};

use crate::config::AuthConfig;
use crate::error::AuthError;
use crate::remote::{
    DocumentStore, RemoteError, FIELD_EMAIL, FIELD_IMAGE, FIELD_NAME, FIELD_PASSWORD,
};
use crate::validate::{validate_sign_in, validate_sign_up};
use store::{PrefStore, Preferences, Session};

/// Observable state of the current attempt, for UI binding.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Phase {
    #[default]
    Idle,
    Submitting,
    Success,
    Failure,
}

/// Two-state toggle guarding the submit affordance.
///
/// `try_enter` flips Idle -> Busy and hands back a guard; dropping the
/// guard flips Busy -> Idle, so the gate reopens on success and failure
/// alike, with no cancellation path in between.
#[derive(Debug, Default)]
pub struct LoadingGate {
    busy: AtomicBool,
}

impl LoadingGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a submission is in flight. Frontends disable the submit
    /// button and show a spinner while this holds.
    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    /// Enter the busy state; `None` when a submission is already in flight.
    pub fn try_enter(&self) -> Option<GateGuard<'_>> {
        self.busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| GateGuard { gate: self })
    }
}

/// Open-gate token; reopens the gate when dropped.
#[derive(Debug)]
pub struct GateGuard<'a> {
    gate: &'a LoadingGate,
}

impl Drop for GateGuard<'_> {
    fn drop(&mut self) {
        self.gate.busy.store(false, Ordering::Release);
    }
}

/// Sign-up form contents at submit time. `image` is the blob previously
/// produced by [`crate::image::encode_image`]; `None` means the user never
/// picked a photo.
#[derive(Clone, Debug, Default)]
pub struct SignUpForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub image: Option<String>,
}

/// Runs the sign-up and sign-in flows against a remote [`DocumentStore`]
/// and a local [`PrefStore`].
pub struct SessionBootstrapper<D: DocumentStore, P: PrefStore> {
    remote: D,
    prefs: Preferences<P>,
    gate: LoadingGate,
    phase: Mutex<Phase>,
    config: AuthConfig,
}

impl<D: DocumentStore, P: PrefStore> SessionBootstrapper<D, P> {
    pub fn new(remote: D, prefs: P) -> Self {
        Self::with_config(remote, prefs, AuthConfig::default())
    }

    pub fn with_config(remote: D, prefs: P, config: AuthConfig) -> Self {
        Self {
            remote,
            prefs: Preferences::new(prefs),
            gate: LoadingGate::new(),
            phase: Mutex::new(Phase::Idle),
            config,
        }
    }

    /// Phase of the most recent attempt.
    pub fn phase(&self) -> Phase {
        *self.phase.lock().unwrap()
    }

    /// Whether the submit affordance should be disabled.
    pub fn is_busy(&self) -> bool {
        self.gate.is_busy()
    }

    /// The local session view, for launch-time signed-in checks.
    pub fn preferences(&self) -> &Preferences<P> {
        &self.prefs
    }

    fn set_phase(&self, phase: Phase) {
        *self.phase.lock().unwrap() = phase;
        debug!(?phase, "attempt phase");
    }

    /// Register a new account and establish the local session.
    ///
    /// On a rejected create, the backend's message is surfaced verbatim and
    /// the session is left untouched.
    pub async fn sign_up(&self, form: &SignUpForm) -> Result<Session, AuthError> {
        validate_sign_up(
            form.image.is_some(),
            &form.name,
            &form.email,
            &form.password,
            &form.confirm_password,
        )?;
        let _gate = self.gate.try_enter().ok_or(AuthError::InFlight)?;
        self.set_phase(Phase::Submitting);

        let mut fields = HashMap::from([
            (FIELD_NAME.to_string(), form.name.clone()),
            (FIELD_EMAIL.to_string(), form.email.clone()),
            (FIELD_PASSWORD.to_string(), form.password.clone()),
        ]);
        if let Some(image) = &form.image {
            fields.insert(FIELD_IMAGE.to_string(), image.clone());
        }

        let user_id = match self.remote.create(&self.config.users_collection, fields).await {
            Ok(id) => id,
            Err(err) => {
                self.set_phase(Phase::Failure);
                warn!(error = %err, "sign-up create rejected");
                return Err(err.into());
            }
        };

        let session = Session {
            user_id,
            name: form.name.clone(),
            image: form.image.clone(),
        };
        self.establish(session).await
    }

    /// Look up an existing account by exact email/password match and
    /// establish the local session from the first matching document.
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<Session, AuthError> {
        validate_sign_in(email, password)?;
        let _gate = self.gate.try_enter().ok_or(AuthError::InFlight)?;
        self.set_phase(Phase::Submitting);

        let filters = [(FIELD_EMAIL, email), (FIELD_PASSWORD, password)];
        let matches = match self
            .remote
            .query_equal(&self.config.users_collection, &filters)
            .await
        {
            Ok(documents) => documents,
            Err(_) => {
                // Transport failure and no-match read the same to the user,
                // so a failed attempt never reveals which credential was
                // wrong.
                self.set_phase(Phase::Failure);
                warn!("sign-in query failed");
                return Err(RemoteError::QueryFailed.into());
            }
        };

        // First document wins when several match; order is the backend's.
        let Some(document) = matches.into_iter().next() else {
            self.set_phase(Phase::Failure);
            return Err(RemoteError::NoMatch.into());
        };

        let session = Session {
            user_id: document.id.clone(),
            name: document.field(FIELD_NAME).unwrap_or_default().to_string(),
            image: document.field(FIELD_IMAGE).map(str::to_string),
        };
        self.establish(session).await
    }

    async fn establish(&self, session: Session) -> Result<Session, AuthError> {
        if let Err(err) = self.prefs.store_session(&session).await {
            self.set_phase(Phase::Failure);
            return Err(err.into());
        }
        self.set_phase(Phase::Success);
        info!(user_id = %session.user_id, "session established");
        Ok(session)
    }
}
