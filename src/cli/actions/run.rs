use super::{delete, Action};
use anyhow::Result;

pub(super) async fn execute(action: Action) -> Result<()> {
    match action {
        Action::Delete(args) => delete::handle(args).await,
    }
}
