pub mod logging;

use crate::{identity::rest::DEFAULT_AUTH_URL, workflow::erase::DEFAULT_ERASE_PATH};
use clap::{
    builder::styling::{AnsiColor, Effects, Styles},
    Arg, ArgAction, ColorChoice, Command,
};
use std::path::PathBuf;

pub const ARG_API_KEY: &str = "api-key";
pub const ARG_AUTH_URL: &str = "auth-url";
pub const ARG_DATABASE_URL: &str = "database-url";
pub const ARG_ERASE_PATH: &str = "erase-path";
pub const ARG_MESSAGES: &str = "messages";
pub const ARG_EMAIL: &str = "email";

#[must_use]
pub fn new() -> Command {
    let styles = Styles::styled()
        .header(AnsiColor::Yellow.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Blue.on_default() | Effects::BOLD)
        .placeholder(AnsiColor::Green.on_default());

    let long_version: &'static str = Box::leak(
        format!("{} - {}", env!("CARGO_PKG_VERSION"), crate::GIT_COMMIT_HASH).into_boxed_str(),
    );

    let command = Command::new("expunge")
        .about("Self-service account and data deletion")
        .version(env!("CARGO_PKG_VERSION"))
        .long_version(long_version)
        .color(ColorChoice::Auto)
        .styles(styles)
        .arg(
            Arg::new(ARG_API_KEY)
                .long(ARG_API_KEY)
                .help("Identity service API key")
                .env("EXPUNGE_API_KEY")
                .hide_env_values(true)
                .required(true),
        )
        .arg(
            Arg::new(ARG_AUTH_URL)
                .long(ARG_AUTH_URL)
                .help("Identity Toolkit base URL")
                .default_value(DEFAULT_AUTH_URL)
                .env("EXPUNGE_AUTH_URL"),
        )
        .arg(
            Arg::new(ARG_DATABASE_URL)
                .long(ARG_DATABASE_URL)
                .help("Realtime Database URL, example: https://<project>.firebaseio.com")
                .env("EXPUNGE_DATABASE_URL")
                .required(true),
        )
        .arg(
            Arg::new(ARG_ERASE_PATH)
                .long(ARG_ERASE_PATH)
                .help("Database path holding the user's records, must contain {uid}")
                .long_help(
                    "Database path holding the user's records, must contain {uid}. Repeat the flag or separate with commas to erase several paths; all of them are erased before the account.",
                )
                .env("EXPUNGE_ERASE_PATHS")
                .value_delimiter(',')
                .action(ArgAction::Append)
                .default_value(DEFAULT_ERASE_PATH),
        )
        .arg(
            Arg::new(ARG_MESSAGES)
                .long(ARG_MESSAGES)
                .help("JSON file overriding the user-facing messages")
                .env("EXPUNGE_MESSAGES")
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .arg(
            Arg::new(ARG_EMAIL)
                .short('e')
                .long(ARG_EMAIL)
                .help("Prefill the sign-in email")
                .env("EXPUNGE_EMAIL"),
        );

    logging::with_args(command)
}
