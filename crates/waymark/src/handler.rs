//! Command handler types.
//!
//! Handlers receive the parsed arguments of the command they are registered
//! for plus a [`CommandContext`] describing where in the command tree they
//! run. They return a [`HandlerResult`]: the text to print, or an
//! [`Interrupt`] that stops dispatch.
//!
//! Raising help from a handler is ordinary error propagation:
//!
//! ```rust
//! use waymark::{CommandContext, HandlerResult, HelpCommand, Visibility};
//!
//! fn status(ctx: &CommandContext) -> HandlerResult {
//!     // Nothing to do without arguments: show this command's help instead.
//!     let mut help = HelpCommand::for_path(ctx.command_path.clone(), Visibility::Default, None);
//!     match help.run(ctx)? {}
//! }
//! ```

use crate::error::Interrupt;
use crate::node::CommandNode;
use crate::resolve::{path_target, resolve_path};
use clap::ArgMatches;
use std::sync::Arc;

/// Where in the command tree a command is running.
#[derive(Debug, Clone)]
pub struct CommandContext {
    /// Root of the command hierarchy.
    pub root: Arc<CommandNode>,
    /// Commands selected so far, root excluded.
    pub command_path: Vec<Arc<CommandNode>>,
}

impl CommandContext {
    /// A context at the root command.
    pub fn new(root: Arc<CommandNode>) -> Self {
        Self {
            root,
            command_path: Vec::new(),
        }
    }

    /// A context at the command reached by following `names` from the root.
    ///
    /// Names that do not resolve are dropped the same way help resolution
    /// drops them.
    pub fn at_path<S: AsRef<str>>(root: Arc<CommandNode>, names: &[S]) -> Self {
        let command_path = resolve_path(names, &root);
        Self { root, command_path }
    }

    /// The command this context points at.
    pub fn current(&self) -> &Arc<CommandNode> {
        path_target(&self.root, &self.command_path)
    }

    /// Names along the command path, root excluded.
    pub fn path_names(&self) -> Vec<String> {
        self.command_path
            .iter()
            .map(|n| n.name().to_string())
            .collect()
    }
}

/// The result type for command handlers.
///
/// Enables use of the `?` operator for both failures and help requests.
pub type HandlerResult = Result<String, Interrupt>;

/// A boxed handler as stored by the [`App`](crate::App).
pub(crate) type DispatchFn = Box<dyn FnMut(&ArgMatches, &CommandContext) -> HandlerResult>;

/// Result of running the CLI driver.
#[derive(Debug)]
pub enum RunResult {
    /// A handler processed the command; contains its output.
    Handled(String),
    /// Help was requested and rendered.
    Help(String),
    /// The command line was rejected by the parser.
    Usage(clap::Error),
    /// A handler failed.
    Failed(anyhow::Error),
    /// No handler matched; contains the ArgMatches for manual handling.
    NoMatch(ArgMatches),
}

impl RunResult {
    /// Returns true if a handler processed the command.
    pub fn is_handled(&self) -> bool {
        matches!(self, RunResult::Handled(_))
    }

    /// Returns true if help was rendered.
    pub fn is_help(&self) -> bool {
        matches!(self, RunResult::Help(_))
    }

    /// Returns true for usage errors and handler failures.
    pub fn is_error(&self) -> bool {
        matches!(self, RunResult::Usage(_) | RunResult::Failed(_))
    }

    /// Returns the handler output or rendered help, if any.
    pub fn output(&self) -> Option<&str> {
        match self {
            RunResult::Handled(s) | RunResult::Help(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the matches if unhandled.
    pub fn matches(&self) -> Option<&ArgMatches> {
        match self {
            RunResult::NoMatch(m) => Some(m),
            _ => None,
        }
    }

    /// The process exit status for this result.
    ///
    /// Help is a successful outcome. Usage errors use clap's code (which is
    /// 0 for `--version`), handler failures exit with 1.
    pub fn exit_code(&self) -> i32 {
        match self {
            RunResult::Handled(_) | RunResult::Help(_) | RunResult::NoMatch(_) => 0,
            RunResult::Usage(e) => e.exit_code(),
            RunResult::Failed(_) => 1,
        }
    }
}
