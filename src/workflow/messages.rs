//! User-facing text. The defaults can be overridden from a JSON file so the
//! tool can be localized without rebuilding, for example:
//!
//! ```json
//! {
//!   "auth": { "auth/wrong-password": "Mot de passe incorrect." },
//!   "fallback": "Une erreur est survenue."
//! }
//! ```
//!
//! Keys that are missing or blank keep their default value.

use super::error::WorkflowError;
use crate::identity::SignInError;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::{collections::HashMap, fs, path::Path};

const AUTH_MESSAGES: [(&str, &str); 7] = [
    ("auth/invalid-email", "Invalid email address."),
    ("auth/user-disabled", "This account has been disabled."),
    ("auth/user-not-found", "No account found with this email."),
    ("auth/wrong-password", "Incorrect password."),
    (
        "auth/too-many-requests",
        "Too many failed attempts. Please try again later.",
    ),
    (
        "auth/network-request-failed",
        "Network error. Please check your connection.",
    ),
    ("auth/invalid-credential", "Invalid email or password."),
];

const FALLBACK: &str = "An error occurred. Please try again.";
const REAUTHENTICATE: &str =
    "For security reasons, please sign out and sign in again before deleting your account.";
const DELETE_FAILED: &str = "Failed to delete account: ";
const CONFIRM_PROMPT: &str =
    "Are you absolutely sure you want to delete your account? This action cannot be undone.";
const SUCCESS: &str = "Your account and all associated data have been permanently deleted.";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Messages {
    auth: HashMap<String, String>,
    fallback: String,
    reauthenticate: String,
    delete_failed: String,
    confirm_prompt: String,
    success: String,
}

impl Default for Messages {
    fn default() -> Self {
        Self {
            auth: AUTH_MESSAGES
                .iter()
                .map(|(code, text)| ((*code).to_string(), (*text).to_string()))
                .collect(),
            fallback: FALLBACK.to_string(),
            reauthenticate: REAUTHENTICATE.to_string(),
            delete_failed: DELETE_FAILED.to_string(),
            confirm_prompt: CONFIRM_PROMPT.to_string(),
            success: SUCCESS.to_string(),
        }
    }
}

#[derive(Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct Overrides {
    auth: HashMap<String, String>,
    fallback: Option<String>,
    reauthenticate: Option<String>,
    delete_failed: Option<String>,
    confirm_prompt: Option<String>,
    success: Option<String>,
}

fn normalize(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn apply_overrides(messages: &mut Messages, overrides: Overrides) {
    for (code, text) in overrides.auth {
        if let Some(text) = normalize(Some(text)) {
            messages.auth.insert(code, text);
        }
    }
    if let Some(value) = normalize(overrides.fallback) {
        messages.fallback = value;
    }
    if let Some(value) = normalize(overrides.reauthenticate) {
        messages.reauthenticate = value;
    }
    if let Some(value) = normalize(overrides.delete_failed) {
        messages.delete_failed = value;
    }
    if let Some(value) = normalize(overrides.confirm_prompt) {
        messages.confirm_prompt = value;
    }
    if let Some(value) = normalize(overrides.success) {
        messages.success = value;
    }
}

impl Messages {
    /// Defaults with the overrides from a JSON document applied.
    /// # Errors
    /// Returns an error if the document is not valid JSON or has unknown keys.
    pub fn from_json(json: &str) -> Result<Self> {
        let overrides: Overrides =
            serde_json::from_str(json).context("invalid messages document")?;

        let mut messages = Self::default();
        apply_overrides(&mut messages, overrides);

        Ok(messages)
    }

    /// # Errors
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path)
            .with_context(|| format!("Failed to read messages file at {}", path.display()))?;

        Self::from_json(&json)
    }

    /// Banner text for a rejected sign-in.
    #[must_use]
    pub fn sign_in(&self, error: &SignInError) -> &str {
        self.auth
            .get(error.code())
            .map_or(self.fallback.as_str(), String::as_str)
    }

    /// Banner text for any workflow failure.
    #[must_use]
    pub fn describe(&self, error: &WorkflowError) -> String {
        match error {
            WorkflowError::Authentication(e) => self.sign_in(e).to_string(),
            WorkflowError::ReauthenticationRequired => self.reauthenticate.clone(),
            WorkflowError::DataErasure(_) | WorkflowError::AccountErasure(_) => {
                format!("{}{}", self.delete_failed, error.detail())
            }
        }
    }

    #[must_use]
    pub fn confirm_prompt(&self) -> &str {
        &self.confirm_prompt
    }

    #[must_use]
    pub fn success(&self) -> &str {
        &self.success
    }
}
