//! Which data store paths hold a user's records.
//!
//! Each path is a template containing `{uid}`. Records keyed by anything other
//! than the uid (device ids, for instance) cannot be reached from here: there is
//! no index from those keys back to the user.

use super::error::WorkflowError;
use anyhow::{anyhow, Result};
use once_cell::sync::Lazy;
use regex::Regex;

pub const UID_PLACEHOLDER: &str = "{uid}";
pub const DEFAULT_ERASE_PATH: &str = "users/{uid}";

static UID_PATTERN: Lazy<Option<Regex>> = Lazy::new(|| Regex::new(r"^[^./#$\[\]\s]+$").ok());

/// A uid must be a single, non-empty database key.
fn valid_uid(uid: &str) -> bool {
    UID_PATTERN.as_ref().is_some_and(|re| re.is_match(uid))
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ErasePlan {
    templates: Vec<String>,
}

impl Default for ErasePlan {
    fn default() -> Self {
        Self {
            templates: vec![DEFAULT_ERASE_PATH.to_string()],
        }
    }
}

impl ErasePlan {
    /// # Errors
    /// Returns an error if no template is given or a template does not contain `{uid}`.
    pub fn new<I, S>(templates: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let templates: Vec<String> = templates
            .into_iter()
            .map(Into::into)
            .map(|t| t.trim().trim_matches('/').to_string())
            .filter(|t| !t.is_empty())
            .collect();

        if templates.is_empty() {
            return Err(anyhow!("at least one erase path is required"));
        }

        // A template without the uid would delete records of every user.
        if let Some(template) = templates.iter().find(|t| !t.contains(UID_PLACEHOLDER)) {
            return Err(anyhow!(
                "erase path '{template}' must contain {UID_PLACEHOLDER}"
            ));
        }

        Ok(Self { templates })
    }

    #[must_use]
    pub fn templates(&self) -> &[String] {
        &self.templates
    }

    /// Concrete paths for `uid`.
    /// # Errors
    /// Returns [`WorkflowError::DataErasure`] if `uid` is not a valid single path segment.
    pub fn paths_for(&self, uid: &str) -> Result<Vec<String>, WorkflowError> {
        if !valid_uid(uid) {
            return Err(WorkflowError::DataErasure(format!(
                "invalid user id '{uid}'"
            )));
        }

        Ok(self
            .templates
            .iter()
            .map(|t| t.replace(UID_PLACEHOLDER, uid))
            .collect())
    }
}
