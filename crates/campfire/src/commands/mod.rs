//! Command handlers, one module per command group.

pub mod catalog;
pub mod comment;
pub mod config_cmd;
pub mod favorites;
pub mod home;
pub mod status;
pub mod util;

use campfire_core::Controller;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;
use crate::output;

/// Dispatch a command that needs the controller to the appropriate handler.
pub async fn dispatch(
    cmd: Command,
    controller: &Controller,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match cmd {
        Command::Home => home::handle(controller, global).await,
        Command::Campsites(args) => catalog::campsites(controller, &args, global).await,
        Command::Campsite { id } => catalog::campsite(controller, id, global).await,
        Command::Comments { campsite_id } => catalog::comments(controller, campsite_id, global).await,
        Command::Partners => catalog::partners(controller, global).await,
        Command::Promotions => catalog::promotions(controller, global).await,
        Command::Favorite { id } => favorites::toggle(controller, id, global),
        Command::Comment(args) => comment::handle(controller, args, global).await,
        Command::Status => status::handle(controller, global),
        Command::Purge => {
            controller.purge().await?;
            output::notice("Saved state purged", global.quiet);
            Ok(())
        }
        // Config and Completions are handled before dispatch
        Command::Config(_) | Command::Completions(_) => Ok(()),
    }
}
