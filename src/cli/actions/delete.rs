//! Interactive terminal front end for the deletion workflow.
//!
//! Each loop iteration renders the section matching the current phase and
//! maps the user's answer to exactly one workflow command.

use crate::{
    cli::globals::GlobalArgs,
    datastore::{DataStore, RestDataStore},
    identity::{IdentityProvider, RestIdentityProvider},
    workflow::{Confirmer, ErasePlan, Messages, Phase, View, Workflow},
};
use anyhow::Result;
use dialoguer::{theme::ColorfulTheme, Confirm, Input, Password, Select};
use secrecy::SecretString;
use std::path::PathBuf;
use tracing::{debug, warn};

const ACKNOWLEDGEMENT: &str =
    "I understand that my account and all of its data will be permanently deleted";

#[derive(Debug)]
pub struct Args {
    pub globals: GlobalArgs,
    pub erase_plan: ErasePlan,
    pub messages: Option<PathBuf>,
    pub email: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Choice {
    Delete,
    Cancel,
    Quit,
}

impl Choice {
    const fn label(self) -> &'static str {
        match self {
            Self::Delete => "Delete my account",
            Self::Cancel => "Cancel and sign out",
            Self::Quit => "Quit",
        }
    }
}

/// Delete is only offered once the acknowledgement is ticked.
fn choices(view: &View) -> Vec<Choice> {
    let mut choices = Vec::with_capacity(3);
    if view.delete_enabled() {
        choices.push(Choice::Delete);
    }
    if view.cancel_enabled() {
        choices.push(Choice::Cancel);
    }
    choices.push(Choice::Quit);
    choices
}

/// Email prefill for the sign-in prompt. Keeps what the user typed across
/// failed attempts and goes back to the `--email` value on cancel.
#[derive(Debug, Default)]
struct CredentialForm {
    initial: String,
    email: String,
}

impl CredentialForm {
    fn new(initial: Option<String>) -> Self {
        let initial = initial.unwrap_or_default();
        Self {
            email: initial.clone(),
            initial,
        }
    }

    fn email(&self) -> &str {
        &self.email
    }

    fn remember(&mut self, email: String) {
        self.email = email;
    }

    fn reset(&mut self) {
        self.email.clone_from(&self.initial);
    }
}

fn render_progress(view: &View) {
    if view.signing_in {
        println!("Signing in...");
    } else if view.deleting {
        println!("Deleting account...");
    }
}

struct TerminalConfirmer<'a> {
    theme: &'a ColorfulTheme,
}

impl Confirmer for TerminalConfirmer<'_> {
    fn confirm(&self, prompt: &str) -> bool {
        Confirm::with_theme(self.theme)
            .with_prompt(prompt)
            .default(false)
            .interact()
            .unwrap_or_else(|e| {
                warn!("confirmation prompt failed: {}", e);
                false
            })
    }
}

/// Run the interactive deletion session.
/// # Errors
/// Returns an error if the configuration is invalid or the terminal cannot be read.
pub async fn handle(args: Args) -> Result<()> {
    let messages = match &args.messages {
        Some(path) => Messages::load(path)?,
        None => Messages::default(),
    };

    debug!("connection settings: {:?}", args.globals);

    let identity = RestIdentityProvider::new(&args.globals.auth_url, args.globals.api_key.clone())?;
    let store = RestDataStore::new(&args.globals.database_url)?;

    let workflow =
        Workflow::new(identity, store, messages, args.erase_plan).with_observer(render_progress);

    run(workflow, args.email).await
}

async fn run<I, D>(mut workflow: Workflow<I, D>, email: Option<String>) -> Result<()>
where
    I: IdentityProvider,
    D: DataStore,
{
    let theme = ColorfulTheme::default();
    let mut form = CredentialForm::new(email);

    loop {
        let view = workflow.view();

        match workflow.phase() {
            Phase::AwaitingCredentials => {
                if let Some(error) = &view.sign_in_error {
                    eprintln!("{error}");
                }

                let email: String = Input::with_theme(&theme)
                    .with_prompt("Email (leave empty to quit)")
                    .with_initial_text(form.email())
                    .allow_empty(true)
                    .interact_text()?;
                let email = email.trim().to_string();
                if email.is_empty() {
                    return Ok(());
                }

                let password = Password::with_theme(&theme)
                    .with_prompt("Password")
                    .interact()?;

                workflow
                    .authenticate(&email, &SecretString::from(password))
                    .await;
                form.remember(email);
            }

            Phase::ConfirmingDeletion => {
                println!(
                    "Signed in as {}",
                    view.email.as_deref().unwrap_or_default()
                );
                if let Some(error) = &view.delete_error {
                    eprintln!("{error}");
                }

                let checked = Confirm::with_theme(&theme)
                    .with_prompt(ACKNOWLEDGEMENT)
                    .default(view.confirm_checked)
                    .interact()?;
                workflow.confirm_checkbox(checked);

                let choices = choices(&workflow.view());
                let labels: Vec<&str> = choices.iter().map(|c| c.label()).collect();
                let selection = Select::with_theme(&theme)
                    .items(&labels)
                    .default(0)
                    .interact()?;

                match choices.get(selection).copied().unwrap_or(Choice::Quit) {
                    Choice::Delete => {
                        workflow
                            .delete_account(&TerminalConfirmer { theme: &theme })
                            .await;
                    }
                    Choice::Cancel => {
                        workflow.cancel().await;
                        form.reset();
                    }
                    Choice::Quit => {
                        workflow.cancel().await;
                        return Ok(());
                    }
                }
            }

            Phase::Deleted => {
                println!("{}", workflow.messages().success());
                return Ok(());
            }
        }

        if let Some(error) = workflow.last_error() {
            debug!("last workflow error: {}", error);
        }
    }
}
