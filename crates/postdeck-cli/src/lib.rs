//! Postdeck command-line front end
//!
//! Each invocation opens the data directory, applies one command and, for
//! commands that change state, commits a new snapshot.

pub mod commands;
pub mod error;
pub mod logging;
pub mod output;
pub mod router;
pub mod workflow;
pub mod workspace;

pub use error::{CliError, CliResult};
pub use router::{Cli, CommandRouter, Commands};
pub use workflow::Workflow;
pub use workspace::Workspace;
