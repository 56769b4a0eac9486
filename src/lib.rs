//! # Expunge (self-service account deletion)
//!
//! `expunge` lets a user permanently remove their account and the data stored
//! for it. The user signs in against the identity service, acknowledges the
//! consequences twice (an explicit checkbox and a final confirmation prompt),
//! and the tool then erases the user's records from the database before
//! erasing the account itself.
//!
//! ## Ordering
//!
//! Data erasure always completes before account erasure starts. If erasing the
//! data fails, the account is left untouched so the user can retry; the reverse
//! state (account gone, data orphaned) is never produced by this tool.
//!
//! ## Known gap
//!
//! Only records addressed by the user's uid are erased. Records stored under a
//! different key (for example per-device records) cannot be found from the uid
//! because no reverse index exists, and are therefore left in place.
//!
//! ## Layout
//!
//! - [`workflow`]: the deletion state machine and the UI state it drives.
//! - [`identity`]: the identity provider seam and its REST client.
//! - [`datastore`]: the data store seam and its REST client.
//! - [`cli`]: argument parsing, telemetry and the terminal controller.

pub mod cli;
pub mod datastore;
pub mod http;
pub mod identity;
pub mod workflow;

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};

pub const APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"),);
