// Command routing and dispatch

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::debug;

use postdeck_config::{ConfigManager, ConfigSource, PostdeckConfig};

use crate::commands::*;
use crate::error::CliResult;
use crate::output::OutputStyle;
use crate::workspace::Workspace;

/// Postdeck - rotate a shared list of posts across posting accounts
#[derive(Parser, Debug)]
#[command(name = "postdeck")]
#[command(bin_name = "postdeck")]
#[command(about = "Rotate a shared list of posts across posting accounts")]
#[command(
    long_about = "Postdeck keeps prioritized post lists and the accounts that post from them.\n\nEvery change is saved as a snapshot, so any change can be undone and redone.\n\nQuick Start:\n  • postdeck list add Blog\n  • postdeck post add --list 0 --title Hello --url https://example.com\n  • postdeck account add Mastodon\n  • postdeck accept"
)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file (default: ./postdeck.toml or the user config dir)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Directory holding snapshots, overrides the configuration
    #[arg(long, global = true, value_name = "PATH")]
    pub data_dir: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Minimize output
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Show accounts, post lists and history
    #[command(about = "Show accounts, post lists and undo/redo availability")]
    Status,

    /// Undo the last change
    #[command(about = "Restore the state before the last change")]
    Undo,

    /// Redo the last undone change
    #[command(about = "Reapply the most recently undone change")]
    Redo,

    /// Manage posts
    #[command(about = "Add, edit, remove and show posts")]
    Post {
        #[command(subcommand)]
        action: PostSubcommand,
    },

    /// Manage post lists
    #[command(about = "Add, remove and show post lists")]
    List {
        #[command(subcommand)]
        action: ListSubcommand,
    },

    /// Manage posting accounts
    #[command(about = "Add, configure and switch posting accounts")]
    Account {
        #[command(subcommand)]
        action: AccountSubcommand,
    },

    /// Show an account's queue
    #[command(about = "List the posts an account can post, in order")]
    Queue {
        /// Account id (default: current account)
        #[arg(value_name = "ACCOUNT")]
        account: Option<u32>,
    },

    /// Accept the current post
    #[command(about = "Print the current post for posting and move it to the end of the list")]
    Accept {
        /// Account id (default: current account)
        #[arg(value_name = "ACCOUNT")]
        account: Option<u32>,
    },

    /// Decline the current post
    #[command(about = "Move the current post to the end of the list without posting it")]
    Decline {
        /// Account id (default: current account)
        #[arg(value_name = "ACCOUNT")]
        account: Option<u32>,
    },

    /// Defer the current post
    #[command(about = "Move the current post a few positions further back")]
    Defer {
        /// Account id (default: current account)
        #[arg(value_name = "ACCOUNT")]
        account: Option<u32>,

        /// Positions to move back (default: defer_positions from the configuration)
        #[arg(short, long)]
        positions: Option<usize>,
    },

    /// Select the current post of an account
    #[command(about = "Make a post the account's current post")]
    Select {
        #[arg(value_name = "ACCOUNT")]
        account: u32,

        #[arg(value_name = "POST")]
        post: u32,
    },
}

#[derive(Subcommand, Debug, Clone)]
pub enum PostSubcommand {
    /// Add a post to the front of a list
    Add {
        /// Post list id
        #[arg(long)]
        list: u32,
        #[arg(long)]
        title: String,
        #[arg(long)]
        url: String,
        #[arg(long, default_value = "")]
        text: String,
    },
    /// Edit a post in place
    Edit {
        #[arg(value_name = "ID")]
        id: u32,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        url: Option<String>,
        #[arg(long)]
        text: Option<String>,
    },
    /// Remove a post from every list and account
    Remove {
        #[arg(value_name = "ID")]
        id: u32,
    },
    /// Print a post's posting text
    Show {
        #[arg(value_name = "ID")]
        id: u32,
    },
}

#[derive(Subcommand, Debug, Clone)]
pub enum ListSubcommand {
    /// Create an empty post list
    Add {
        #[arg(value_name = "TITLE")]
        title: String,
    },
    /// Remove a post list no account uses
    Remove {
        #[arg(value_name = "ID")]
        id: u32,
    },
    /// Show a post list's posts in order
    Show {
        #[arg(value_name = "ID")]
        id: u32,
    },
    /// Add an existing post to the front of a list
    Attach {
        #[arg(value_name = "ID")]
        id: u32,
        #[arg(value_name = "POST")]
        post: u32,
    },
}

#[derive(Subcommand, Debug, Clone)]
pub enum AccountSubcommand {
    /// Create an account and make it current
    Add {
        #[arg(value_name = "TITLE")]
        title: String,
        /// Post list id (default: the current account's list, else the first list)
        #[arg(long)]
        list: Option<u32>,
    },
    /// Rename an account
    Rename {
        #[arg(value_name = "ID")]
        id: u32,
        #[arg(value_name = "TITLE")]
        title: String,
    },
    /// Remove an account
    Remove {
        #[arg(value_name = "ID")]
        id: u32,
    },
    /// Make an account current
    Use {
        #[arg(value_name = "ID")]
        id: u32,
    },
    /// Point an account at another post list
    Assign {
        #[arg(value_name = "ID")]
        id: u32,
        #[arg(value_name = "LIST")]
        list: u32,
    },
    /// Hide a post from an account
    Filter {
        #[arg(value_name = "ID")]
        id: u32,
        #[arg(value_name = "POST")]
        post: u32,
    },
    /// Show a hidden post to an account again
    Unfilter {
        #[arg(value_name = "ID")]
        id: u32,
        #[arg(value_name = "POST")]
        post: u32,
    },
}

/// Command router
pub struct CommandRouter;

impl CommandRouter {
    /// Parse CLI arguments and route to appropriate handler
    pub fn route() -> CliResult<String> {
        let cli = Cli::parse();

        // Initialize logging based on CLI flags
        crate::logging::init_logging(cli.verbose, cli.quiet);

        let config = Self::load_config(&cli)?;
        Self::execute(&cli, config, &OutputStyle::default())
    }

    /// Configuration from file and environment, with CLI overrides applied
    pub fn load_config(cli: &Cli) -> CliResult<PostdeckConfig> {
        let manager = match &cli.config {
            Some(path) => ConfigManager::with_path(path),
            None => ConfigManager::new(),
        };
        let mut config = manager.load_config()?;
        if let Some(dir) = &cli.data_dir {
            config.data_dir = dir.clone();
        }
        debug!(data_dir = %config.data_dir.display(), "Resolved configuration");
        Ok(config)
    }

    /// Execute a command against the workspace described by `config`
    pub fn execute(cli: &Cli, config: PostdeckConfig, style: &OutputStyle) -> CliResult<String> {
        let mut workspace = Workspace::open(config)?;
        let command = Self::command(&cli.command);
        command.execute(&mut workspace, style)
    }

    fn command(command: &Commands) -> Box<dyn Command> {
        match command.clone() {
            Commands::Status => Box::new(StatusCommand),
            Commands::Undo => Box::new(HistoryCommand::new(HistoryAction::Undo)),
            Commands::Redo => Box::new(HistoryCommand::new(HistoryAction::Redo)),
            Commands::Post { action } => Box::new(PostCommand::new(match action {
                PostSubcommand::Add {
                    list,
                    title,
                    url,
                    text,
                } => PostAction::Add {
                    list,
                    title,
                    url,
                    text,
                },
                PostSubcommand::Edit {
                    id,
                    title,
                    url,
                    text,
                } => PostAction::Edit {
                    id,
                    title,
                    url,
                    text,
                },
                PostSubcommand::Remove { id } => PostAction::Remove { id },
                PostSubcommand::Show { id } => PostAction::Show { id },
            })),
            Commands::List { action } => Box::new(ListCommand::new(match action {
                ListSubcommand::Add { title } => ListAction::Add { title },
                ListSubcommand::Remove { id } => ListAction::Remove { id },
                ListSubcommand::Show { id } => ListAction::Show { id },
                ListSubcommand::Attach { id, post } => ListAction::Attach { id, post },
            })),
            Commands::Account { action } => Box::new(AccountCommand::new(match action {
                AccountSubcommand::Add { title, list } => AccountAction::Add { title, list },
                AccountSubcommand::Rename { id, title } => AccountAction::Rename { id, title },
                AccountSubcommand::Remove { id } => AccountAction::Remove { id },
                AccountSubcommand::Use { id } => AccountAction::Use { id },
                AccountSubcommand::Assign { id, list } => AccountAction::Assign { id, list },
                AccountSubcommand::Filter { id, post } => AccountAction::Filter { id, post },
                AccountSubcommand::Unfilter { id, post } => AccountAction::Unfilter { id, post },
            })),
            Commands::Queue { account } => Box::new(QueueCommand::new(account)),
            Commands::Accept { account } => {
                Box::new(PostingCommand::new(account, PostingAction::Accept))
            }
            Commands::Decline { account } => {
                Box::new(PostingCommand::new(account, PostingAction::Decline))
            }
            Commands::Defer { account, positions } => Box::new(PostingCommand::new(
                account,
                PostingAction::Defer { positions },
            )),
            Commands::Select { account, post } => Box::new(PostingCommand::new(
                Some(account),
                PostingAction::Select { post },
            )),
        }
    }
}
