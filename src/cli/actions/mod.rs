pub mod delete;

mod run;

#[derive(Debug)]
pub enum Action {
    Delete(delete::Args),
}

impl Action {
    /// Execute the action.
    /// # Errors
    /// Returns an error if the action fails.
    pub async fn execute(self) -> anyhow::Result<()> {
        run::execute(self).await
    }
}
