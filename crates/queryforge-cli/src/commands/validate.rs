use crate::commands;
use crate::output_utils;
use crate::script;
use crate::Cli;
use crate::CommandResult;
use crate::RunnableCommand;
use std::path::PathBuf;

/// Replay a build script and report the full validation verdict.
#[derive(Debug, clap::Args)]
pub(crate) struct ValidateCmd {
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
impl RunnableCommand for ValidateCmd {
    pub async fn run(self, _cli: Cli) -> CommandResult {
        let outcome = async {
            let engine = commands::build_engine(self.schema.as_deref())?;
            let loaded = script::load(&self.script_path)?;
            let session_id = script::replay(&engine, loaded).await?;
            anyhow::Ok(engine.validate_query(&session_id).await?)
        }
        .await;

        let report = match outcome {
            Ok(report) => report,
            Err(e) => {
                return CommandResult::stderr(format_args!(
                    "{} Failed to build the operation: {e:#}",
                    output_utils::RED_X,
                ));
            },
        };

        let warnings = report.warnings.iter()
            .map(|warning| format!(
                "  {} {warning}",
                output_utils::WARN_SIGN,
            ))
            .collect::<Vec<_>>()
            .join("\n");

        if report.valid {
            CommandResult::stdout(format_args!(
                "{} The operation validated successfully.{}{}",
                output_utils::GREEN_CHECK,
                if warnings.is_empty() { "" } else { "\n" },
                warnings,
            ))
        } else {
            CommandResult::stderr(format_args!(
                "{} The operation failed validation:\n{}{}{}",
                output_utils::RED_X,
                report.errors.iter()
                    .map(|error| format!("  * {error}"))
                    .collect::<Vec<_>>()
                    .join("\n"),
                if warnings.is_empty() { "" } else { "\n" },
                warnings,
            ))
        }
    }
}
