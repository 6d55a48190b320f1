use crate::cli::command_handlers::{BillingHandler, OAuthHandler};
use crate::cli::main_types::Commands;
use crate::core::services::{Collaborators, Outcome};
use crate::error::AppError;

/// Routes a parsed command to its handler. Every command ends in exactly one
/// `Outcome` or one error; the caller turns that into the exit status.
pub struct Dispatcher<'a> {
    deps: Collaborators<'a>,
    verbose: bool,
}

impl<'a> Dispatcher<'a> {
    pub fn new(deps: Collaborators<'a>, verbose: bool) -> Self {
        Self { deps, verbose }
    }

    pub async fn dispatch(&self, command: Commands) -> Result<Outcome, AppError> {
        match command {
            Commands::Billing { command } => {
                BillingHandler::new()
                    .handle(command, self.deps, self.verbose)
                    .await
            }
            Commands::Oauth(args) => {
                OAuthHandler::new()
                    .handle(args, self.deps, self.verbose)
                    .await
            }
        }
    }
}
