use crate::commands;
use crate::output_utils;
use crate::script;
use crate::Cli;
use crate::CommandResult;
use crate::RunnableCommand;
use std::path::PathBuf;

/// Replay a build script and print the rendered GraphQL document.
#[derive(Debug, clap::Args)]
pub(crate) struct RenderCmd {
    #[arg(
        help="Path to an SDL schema file used to resolve argument and \
             variable types. Schema-aware checks are skipped without one.",
        long,
    )]
    schema: Option<PathBuf>,

    #[arg(
        help="Path to a JSON build script describing the operation.",
        name="SCRIPT_PATH",
        required=true,
    )]
    script_path: PathBuf,
}

#[inherent::inherent]
impl RunnableCommand for RenderCmd {
    pub async fn run(self, _cli: Cli) -> CommandResult {
        let outcome = async {
            let engine = commands::build_engine(self.schema.as_deref())?;
            let loaded = script::load(&self.script_path)?;
            let session_id = script::replay(&engine, loaded).await?;
            anyhow::Ok(engine.get_current_query(&session_id).await?)
        }
        .await;

        match outcome {
            Ok(current) => CommandResult::stdout(format_args!(
                "{}\n\n# fields: {}, depth: {}, score: {}",
                current.query_string,
                current.complexity.field_count,
                current.complexity.depth,
                current.complexity.score,
            )),

            Err(e) => CommandResult::stderr(format_args!(
                "{} Failed to render the operation: {e:#}",
                output_utils::RED_X,
            )),
        }
    }
}
