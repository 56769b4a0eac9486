use crate::{datastore::DataStoreError, identity::AccountErasureError, identity::SignInError};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WorkflowError {
    #[error("authentication failed: {0}")]
    Authentication(SignInError),
    #[error("reauthentication required")]
    ReauthenticationRequired,
    #[error("data erasure failed: {0}")]
    DataErasure(String),
    #[error("account erasure failed: {0}")]
    AccountErasure(String),
}

impl WorkflowError {
    /// Failure detail without the category prefix, as shown to the user.
    #[must_use]
    pub fn detail(&self) -> String {
        match self {
            Self::Authentication(e) => e.to_string(),
            Self::ReauthenticationRequired => "requires recent login".to_string(),
            Self::DataErasure(detail) | Self::AccountErasure(detail) => detail.clone(),
        }
    }
}

impl From<SignInError> for WorkflowError {
    fn from(e: SignInError) -> Self {
        Self::Authentication(e)
    }
}

impl From<DataStoreError> for WorkflowError {
    fn from(e: DataStoreError) -> Self {
        Self::DataErasure(e.0)
    }
}

impl From<AccountErasureError> for WorkflowError {
    fn from(e: AccountErasureError) -> Self {
        match e {
            AccountErasureError::RequiresRecentLogin => Self::ReauthenticationRequired,
            AccountErasureError::Other(detail) => Self::AccountErasure(detail),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recent_login_maps_to_reauthentication() {
        assert_eq!(
            WorkflowError::from(AccountErasureError::RequiresRecentLogin),
            WorkflowError::ReauthenticationRequired
        );
        assert_eq!(
            WorkflowError::from(AccountErasureError::Other("boom".to_string())),
            WorkflowError::AccountErasure("boom".to_string())
        );
    }

    #[test]
    fn detail_drops_category() {
        let e = WorkflowError::from(DataStoreError("401 Unauthorized, Permission denied".to_string()));
        assert_eq!(e.detail(), "401 Unauthorized, Permission denied");
        assert_eq!(
            e.to_string(),
            "data erasure failed: 401 Unauthorized, Permission denied"
        );
    }
}
