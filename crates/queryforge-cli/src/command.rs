use crate::Cli;
use crate::CommandResult;

/// Implemented by each subcommand; consumed via `inherent` so call sites
/// need no trait import.
pub(crate) trait RunnableCommand: std::fmt::Debug {
    async fn run(self, cli: Cli) -> CommandResult;
}
