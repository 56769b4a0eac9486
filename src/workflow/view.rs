//! Snapshot of what the user should see. Front ends render this and nothing
//! else; every field is derived from the workflow state.

use super::Phase;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Section {
    #[default]
    Credentials,
    Confirmation,
    Success,
}

impl From<Phase> for Section {
    fn from(phase: Phase) -> Self {
        match phase {
            Phase::AwaitingCredentials => Self::Credentials,
            Phase::ConfirmingDeletion => Self::Confirmation,
            Phase::Deleted => Self::Success,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct View {
    pub section: Section,
    /// Email of the signed-in user, shown on the confirmation section.
    pub email: Option<String>,
    pub sign_in_error: Option<String>,
    pub delete_error: Option<String>,
    pub signing_in: bool,
    pub deleting: bool,
    pub confirm_checked: bool,
}

impl View {
    #[must_use]
    pub fn sign_in_enabled(&self) -> bool {
        self.section == Section::Credentials && !self.signing_in
    }

    #[must_use]
    pub fn delete_enabled(&self) -> bool {
        self.section == Section::Confirmation && self.confirm_checked && !self.deleting
    }

    #[must_use]
    pub fn cancel_enabled(&self) -> bool {
        self.section == Section::Confirmation && !self.deleting
    }
}
