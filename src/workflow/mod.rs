//! Account deletion workflow.
//!
//! A [`Workflow`] is the whole state of one deletion attempt: the phase, the
//! signed-in principal, the confirmation gate and the banners shown to the
//! user. The front end owns it and drives it through four commands:
//! [`Workflow::authenticate`], [`Workflow::confirm_checkbox`],
//! [`Workflow::delete_account`] and [`Workflow::cancel`].
//!
//! ```text
//! AwaitingCredentials --authenticate--> ConfirmingDeletion --delete_account--> Deleted
//!          ^                                    |
//!          +--------------cancel----------------+
//! ```
//!
//! Failures never escape a command. They are turned into banner text, the
//! phase is left unchanged, and the error is kept in [`Workflow::last_error`]
//! so the caller can log it.

pub mod erase;
pub mod error;
pub mod messages;
pub mod view;

use crate::{
    datastore::DataStore,
    identity::{IdentityProvider, Principal},
};
use futures::future::try_join_all;
use secrecy::SecretString;
use std::fmt;
use tracing::{debug, error, info, instrument};

pub use self::{
    erase::ErasePlan,
    error::WorkflowError,
    messages::Messages,
    view::{Section, View},
};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Phase {
    #[default]
    AwaitingCredentials,
    ConfirmingDeletion,
    Deleted,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::AwaitingCredentials => "awaiting-credentials",
            Self::ConfirmingDeletion => "confirming-deletion",
            Self::Deleted => "deleted",
        };
        f.write_str(name)
    }
}

/// Both acknowledgements required before anything is deleted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ConfirmationGate {
    pub checkbox: bool,
    pub prompt: bool,
}

impl ConfirmationGate {
    #[must_use]
    pub fn is_satisfied(&self) -> bool {
        self.checkbox && self.prompt
    }

    fn reset(&mut self) {
        *self = Self::default();
    }
}

/// The final, synchronous "are you sure?" asked right before deleting.
pub trait Confirmer {
    fn confirm(&self, prompt: &str) -> bool;
}

impl<F> Confirmer for F
where
    F: Fn(&str) -> bool,
{
    fn confirm(&self, prompt: &str) -> bool {
        self(prompt)
    }
}

type Observer = Box<dyn Fn(&View) + Send + Sync>;

pub struct Workflow<I, D> {
    identity: I,
    store: D,
    messages: Messages,
    erase_plan: ErasePlan,
    phase: Phase,
    session: Option<Principal>,
    gate: ConfirmationGate,
    sign_in_error: Option<String>,
    delete_error: Option<String>,
    signing_in: bool,
    deleting: bool,
    last_error: Option<WorkflowError>,
    observer: Option<Observer>,
}

impl<I, D> Workflow<I, D>
where
    I: IdentityProvider,
    D: DataStore,
{
    #[must_use]
    pub fn new(identity: I, store: D, messages: Messages, erase_plan: ErasePlan) -> Self {
        Self {
            identity,
            store,
            messages,
            erase_plan,
            phase: Phase::default(),
            session: None,
            gate: ConfirmationGate::default(),
            sign_in_error: None,
            delete_error: None,
            signing_in: false,
            deleting: false,
            last_error: None,
            observer: None,
        }
    }

    /// Call `observer` with a fresh [`View`] after every visible change,
    /// including the loading flags flipping around network calls.
    #[must_use]
    pub fn with_observer(mut self, observer: impl Fn(&View) + Send + Sync + 'static) -> Self {
        self.observer = Some(Box::new(observer));
        self
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub fn session(&self) -> Option<&Principal> {
        self.session.as_ref()
    }

    #[must_use]
    pub fn gate(&self) -> ConfirmationGate {
        self.gate
    }

    #[must_use]
    pub fn messages(&self) -> &Messages {
        &self.messages
    }

    #[must_use]
    pub fn last_error(&self) -> Option<&WorkflowError> {
        self.last_error.as_ref()
    }

    #[must_use]
    pub fn view(&self) -> View {
        View {
            section: Section::from(self.phase),
            email: self.session.as_ref().map(|p| p.email.clone()),
            sign_in_error: self.sign_in_error.clone(),
            delete_error: self.delete_error.clone(),
            signing_in: self.signing_in,
            deleting: self.deleting,
            confirm_checked: self.gate.checkbox,
        }
    }

    fn notify(&self) {
        if let Some(observer) = &self.observer {
            observer(&self.view());
        }
    }

    fn enter(&mut self, phase: Phase) {
        if self.phase != phase {
            info!("workflow {} -> {}", self.phase, phase);
        }
        self.phase = phase;
        self.notify();
    }

    /// Sign in with `email` and `password`. Only valid while awaiting credentials.
    #[instrument(skip_all)]
    pub async fn authenticate(&mut self, email: &str, password: &SecretString) {
        if self.phase != Phase::AwaitingCredentials || self.signing_in {
            debug!("authenticate ignored in phase {}", self.phase);
            return;
        }

        self.sign_in_error = None;
        self.signing_in = true;
        self.notify();

        let result = self.identity.sign_in(email, password).await;

        self.signing_in = false;

        match result {
            Ok(principal) => {
                info!(uid = %principal.uid, "signed in");

                self.last_error = None;
                self.session = Some(principal);
                self.gate.reset();
                self.enter(Phase::ConfirmingDeletion);
            }
            Err(e) => {
                error!("Sign-in failed: {}", e.code());

                self.sign_in_error = Some(self.messages.sign_in(&e).to_string());
                self.last_error = Some(WorkflowError::from(e));
                self.notify();
            }
        }
    }

    /// Tick or untick the acknowledgement checkbox.
    pub fn confirm_checkbox(&mut self, checked: bool) {
        if self.phase != Phase::ConfirmingDeletion {
            debug!("checkbox ignored in phase {}", self.phase);
            return;
        }

        self.gate.checkbox = checked;
        self.notify();
    }

    /// Leave the confirmation step: sign out and go back to the credential form.
    pub async fn cancel(&mut self) {
        match self.phase {
            Phase::Deleted => {
                debug!("cancel ignored, account already deleted");
                return;
            }
            Phase::ConfirmingDeletion => self.identity.sign_out().await,
            Phase::AwaitingCredentials => {}
        }

        self.session = None;
        self.gate.reset();
        self.sign_in_error = None;
        self.delete_error = None;
        self.enter(Phase::AwaitingCredentials);
    }

    /// Erase the user's data, then the account.
    ///
    /// Does nothing unless the checkbox is ticked and a user is signed in; only
    /// then is `confirmer` asked, and a refusal also does nothing.
    #[instrument(skip_all)]
    pub async fn delete_account(&mut self, confirmer: &impl Confirmer) {
        if self.phase != Phase::ConfirmingDeletion || !self.gate.checkbox || self.deleting {
            debug!("delete ignored, confirmation incomplete");
            return;
        }

        let Some(principal) = self.session.clone() else {
            debug!("delete ignored, no session");
            return;
        };

        self.gate.prompt = confirmer.confirm(self.messages.confirm_prompt());
        if !self.gate.is_satisfied() {
            debug!("delete declined at prompt");
            return;
        }

        self.delete_error = None;
        self.deleting = true;
        self.notify();

        let result = self.erase(&principal).await;

        self.deleting = false;
        self.gate.prompt = false;

        match result {
            Ok(()) => {
                info!(uid = %principal.uid, "account deleted");

                self.last_error = None;
                self.session = None;
                self.gate.reset();
                self.enter(Phase::Deleted);
            }
            Err(e) => {
                error!(uid = %principal.uid, "Failed to delete account: {}", e);

                self.delete_error = Some(self.messages.describe(&e));
                self.last_error = Some(e);
                self.notify();
            }
        }
    }

    /// Data first, account second; the account is only touched once every
    /// data path is gone.
    async fn erase(&self, principal: &Principal) -> Result<(), WorkflowError> {
        let paths = self.erase_plan.paths_for(&principal.uid)?;

        debug!("erasing {} data path(s)", paths.len());

        try_join_all(
            paths
                .iter()
                .map(|path| self.store.delete_at_path(principal, path)),
        )
        .await?;

        self.identity.delete_account(principal).await?;

        Ok(())
    }
}
