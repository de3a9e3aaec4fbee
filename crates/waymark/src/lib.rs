//! Help-request handling for clap-based CLIs.
//!
//! `waymark` owns the part of argument parsing that deals with "show me the
//! help": the `help` subcommand, the `--help` family of flags, resolving the
//! command path the user asked about, and rendering help text for it.
//!
//! # Features
//!
//! - **Path resolution**: [`resolve_path`] walks subcommand names through a
//!   [`CommandNode`] tree and degrades to the deepest known ancestor
//! - **Help as control flow**: [`HelpCommand::run`] never succeeds; it
//!   returns [`Interrupt::HelpRequested`], which `?` carries out through any
//!   number of dispatch layers
//! - **Visibility and search**: requests carry a [`Visibility`] filter and an
//!   optional search term to the renderer
//! - **Styled help**: [`TextHelpRenderer`] lays help out through a template,
//!   wraps to the terminal width and applies a [`HelpTheme`]
//! - **Clap integration**: [`App`] augments a clap `Command`, intercepts help
//!   and dispatches everything else to registered handlers
//!
//! # Help Is Not An Error
//!
//! Help travels the error channel but is not a failure. The driver matches
//! [`Interrupt`] exhaustively:
//!
//! ```rust
//! use waymark::{CommandContext, CommandNode, HelpCommand, Interrupt};
//!
//! let root = CommandNode::new("app")
//!     .subcommand(CommandNode::new("config").subcommand(CommandNode::new("set")))
//!     .into_shared();
//! let ctx = CommandContext::new(root);
//!
//! let mut help = HelpCommand::new(["config", "bogus"]);
//! let exit_code = match help.run(&ctx) {
//!     Ok(never) => match never {},
//!     Err(Interrupt::HelpRequested(request)) => {
//!         // Unknown names fall back to the deepest command that exists.
//!         assert_eq!(request.path_names(), vec!["config"]);
//!         0
//!     }
//!     Err(Interrupt::Usage(e)) => e.exit_code(),
//!     Err(Interrupt::Failed(_)) => 1,
//! };
//! assert_eq!(exit_code, 0);
//! ```

mod app;
mod command;
mod dispatch;
mod error;
mod handler;
mod help;
mod node;
mod request;
mod resolve;
mod visibility;

pub use app::{App, AppBuilder};
pub use command::{HelpCommand, HELP_COMMAND_NAME};
pub use dispatch::{
    extract_command_path, get_deepest_matches, help_matches, path_to_string, scan_help_flag,
    HelpFlag, HELP_FLAGS, HELP_HIDDEN_FLAG,
};
pub use error::{DecodeError, Interrupt, RenderError};
pub use handler::{CommandContext, HandlerResult, RunResult};
pub use help::{
    default_help_theme, render_help, HelpConfig, HelpRenderer, HelpTheme, TextHelpRenderer,
    TextMode,
};
pub use node::{ArgSpec, CommandNode};
pub use request::HelpRequest;
pub use resolve::{path_target, resolve_path};
pub use visibility::Visibility;
