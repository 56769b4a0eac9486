use crate::{
    cli::{
        actions::{delete::Args, Action},
        commands::{
            ARG_API_KEY, ARG_AUTH_URL, ARG_DATABASE_URL, ARG_EMAIL, ARG_ERASE_PATH, ARG_MESSAGES,
        },
        globals::GlobalArgs,
    },
    http,
    identity::rest::DEFAULT_AUTH_URL,
    workflow::ErasePlan,
};
use anyhow::{Context, Result};
use secrecy::SecretString;
use std::path::PathBuf;

/// # Errors
/// Returns an error if required arguments are missing or invalid.
pub fn handler(matches: &clap::ArgMatches) -> Result<Action> {
    let api_key = matches
        .get_one::<String>(ARG_API_KEY)
        .cloned()
        .context("missing required argument: --api-key")?;

    let auth_url = matches
        .get_one::<String>(ARG_AUTH_URL)
        .cloned()
        .unwrap_or_else(|| DEFAULT_AUTH_URL.to_string());
    http::base_url(&auth_url).context("invalid EXPUNGE_AUTH_URL")?;

    let database_url = matches
        .get_one::<String>(ARG_DATABASE_URL)
        .cloned()
        .context("missing required argument: --database-url")?;
    http::base_url(&database_url).context("invalid EXPUNGE_DATABASE_URL")?;

    let erase_paths: Vec<String> = matches
        .get_many::<String>(ARG_ERASE_PATH)
        .map(|paths| paths.cloned().collect())
        .unwrap_or_default();
    let erase_plan = if erase_paths.is_empty() {
        ErasePlan::default()
    } else {
        ErasePlan::new(erase_paths).context("invalid --erase-path")?
    };

    let messages = matches.get_one::<PathBuf>(ARG_MESSAGES).cloned();
    let email = matches.get_one::<String>(ARG_EMAIL).cloned();

    Ok(Action::Delete(Args {
        globals: GlobalArgs::new(auth_url, SecretString::from(api_key), database_url),
        erase_plan,
        messages,
        email,
    }))
}
