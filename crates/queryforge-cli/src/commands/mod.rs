mod render;
mod validate;

use crate::Cli;
use crate::CommandResult;
use queryforge::engine::Engine;
use queryforge::oracle::NullOracle;
use queryforge::oracle::SchemaCatalog;
use queryforge::oracle::TypeOracle;
use queryforge::store::InMemorySessionStore;
use render::RenderCmd;
use std::path::Path;
use std::sync::Arc;
use validate::ValidateCmd;

#[derive(Debug, clap::Parser)]
#[command(name = "queryforge")]
pub(crate) enum CommandEnum {
    Render(Box<RenderCmd>),
    Validate(Box<ValidateCmd>),
}
impl CommandEnum {
    pub(crate) async fn run(self, cli: Cli) -> CommandResult {
        match self {
            Self::Render(cmd) => cmd.run(cli).await,
            Self::Validate(cmd) => cmd.run(cli).await,
        }
    }
}

/// Build an engine over an in-memory store, resolving types through the
/// given SDL schema file when one is provided.
pub(crate) fn build_engine(schema_path: Option<&Path>) -> anyhow::Result<Engine> {
    let oracle: Arc<dyn TypeOracle> = match schema_path {
        Some(path) => {
            log::debug!("Loading schema SDL from {path:#?}.");
            let sdl = std::fs::read_to_string(path)?;
            Arc::new(SchemaCatalog::from_sdl(&sdl)?)
        },
        None => Arc::new(NullOracle),
    };
    Ok(Engine::new(Arc::new(InMemorySessionStore::default()), oracle))
}
