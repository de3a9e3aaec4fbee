//! The `help` subcommand.
//!
//! [`HelpCommand`] is a command that never does any work. Running it
//! resolves the subcommand names it was given into a command path and
//! returns [`Interrupt::HelpRequested`] carrying that path, so the driver
//! renders help instead of dispatching.
//!
//! Instances come from two places:
//!
//! - The parser, when the user types `app help config set`. Fields are bound
//!   from clap through the derived [`Args`] implementation and the command
//!   path is resolved when the command runs.
//! - Code that already knows the path (help flags, group commands without a
//!   handler), via [`HelpCommand::for_path`].

use crate::error::{DecodeError, Interrupt, RenderError};
use crate::handler::CommandContext;
use crate::help::HelpRenderer;
use crate::node::CommandNode;
use crate::request::HelpRequest;
use crate::resolve::resolve_path;
use crate::visibility::Visibility;
use clap::{Args, Command};
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::sync::Arc;
use tracing::debug;

/// Name under which the help subcommand is registered.
pub const HELP_COMMAND_NAME: &str = "help";

/// Show subcommand help information.
#[derive(Debug, Clone, Default, Args, Serialize, Deserialize)]
pub struct HelpCommand {
    /// The subcommand to show help for
    #[arg(value_name = "SUBCOMMAND")]
    pub subcommands: Vec<String>,

    /// Absorbs a redundant `-h`/`--help` after `help`; has no effect.
    #[arg(short = 'h', long = "help", hide = true)]
    #[serde(default)]
    pub help: bool,

    /// Search for a string in the commands' help output
    #[arg(short = 's', long = "search", value_name = "TERM")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,

    #[arg(skip)]
    #[serde(skip)]
    command_stack: Vec<Arc<CommandNode>>,

    #[arg(skip)]
    #[serde(skip)]
    visibility: Visibility,

    #[arg(skip)]
    #[serde(skip)]
    resolved: bool,
}

impl PartialEq for HelpCommand {
    /// Compares the user-facing fields only; derived state is ignored.
    fn eq(&self, other: &Self) -> bool {
        self.subcommands == other.subcommands
            && self.help == other.help
            && self.search == other.search
    }
}

impl HelpCommand {
    /// A help command for the given subcommand names, as the parser would
    /// build it.
    pub fn new<I, S>(subcommands: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            subcommands: subcommands.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Sets the search term.
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    /// A help command for a path that is already known.
    ///
    /// The instance counts as resolved: running it reports `command_stack`
    /// as given instead of resolving `subcommands` again.
    pub fn for_path(
        command_stack: Vec<Arc<CommandNode>>,
        visibility: Visibility,
        search: Option<String>,
    ) -> Self {
        Self {
            subcommands: command_stack.iter().map(|n| n.name().to_string()).collect(),
            help: false,
            search,
            command_stack,
            visibility,
            resolved: true,
        }
    }

    /// The clap definition of the `help` subcommand.
    ///
    /// clap's own help flag is disabled so `-h`/`--help` bind to
    /// [`HelpCommand::help`].
    pub fn clap_command() -> Command {
        HelpCommand::augment_args(
            Command::new(HELP_COMMAND_NAME)
                .about("Show subcommand help information.")
                .disable_help_flag(true),
        )
    }

    /// The resolved command path. Empty until [`build_command_stack`] or
    /// [`run`] has been called on a parsed instance.
    ///
    /// [`build_command_stack`]: HelpCommand::build_command_stack
    /// [`run`]: HelpCommand::run
    pub fn command_stack(&self) -> &[Arc<CommandNode>] {
        &self.command_stack
    }

    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    pub fn is_resolved(&self) -> bool {
        self.resolved
    }

    /// Resolves `subcommands` relative to the context's current command.
    ///
    /// The stored stack is the context path followed by the resolved names,
    /// so `help set` run inside `config` yields `[config, set]`.
    pub fn build_command_stack(&mut self, ctx: &CommandContext) {
        let mut stack = ctx.command_path.clone();
        stack.extend(resolve_path(&self.subcommands, ctx.current()));
        self.command_stack = stack;
        self.resolved = true;
    }

    /// Runs the help command.
    ///
    /// Never succeeds: the return value is always
    /// [`Interrupt::HelpRequested`]. Propagate it with `?` and match on the
    /// uninhabited success value:
    ///
    /// ```rust
    /// use waymark::{CommandContext, CommandNode, HelpCommand, Interrupt};
    ///
    /// let root = CommandNode::new("app")
    ///     .subcommand(CommandNode::new("config"))
    ///     .into_shared();
    /// let ctx = CommandContext::new(root);
    ///
    /// let mut help = HelpCommand::new(["config"]);
    /// let Err(Interrupt::HelpRequested(request)) = help.run(&ctx) else {
    ///     unreachable!()
    /// };
    /// assert_eq!(request.path_names(), vec!["config"]);
    /// ```
    pub fn run(&mut self, ctx: &CommandContext) -> Result<Infallible, Interrupt> {
        if !self.resolved {
            self.build_command_stack(ctx);
        }
        let request = self.request(Arc::clone(&ctx.root));
        debug!(
            command = %request.qualified_name(),
            visibility = %request.visibility(),
            search = ?request.search(),
            "help requested"
        );
        Err(Interrupt::HelpRequested(request))
    }

    /// Renders help for the resolved stack directly, bypassing the driver.
    pub fn generate_help(
        &self,
        root: &Arc<CommandNode>,
        renderer: &dyn HelpRenderer,
        screen_width: usize,
    ) -> Result<String, RenderError> {
        renderer.render(&self.request(Arc::clone(root)), screen_width)
    }

    fn request(&self, root: Arc<CommandNode>) -> HelpRequest {
        HelpRequest::new(
            root,
            self.command_stack.clone(),
            self.visibility,
            self.search.clone(),
        )
    }

    /// Encodes the user-facing fields as JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Decodes a help command from JSON. The result is unresolved.
    pub fn from_json(input: &str) -> Result<Self, DecodeError> {
        Ok(serde_json::from_str(input)?)
    }

    /// Encodes the user-facing fields as YAML.
    pub fn to_yaml(&self) -> Result<String, serde_yaml::Error> {
        serde_yaml::to_string(self)
    }

    /// Decodes a help command from YAML. The result is unresolved.
    pub fn from_yaml(input: &str) -> Result<Self, DecodeError> {
        Ok(serde_yaml::from_str(input)?)
    }
}
