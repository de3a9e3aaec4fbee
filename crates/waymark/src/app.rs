//! App struct and implementation for CLI integration.
//!
//! [`App`] is the outermost driver. It prepares a clap command for waymark
//! help handling, parses arguments, dispatches to registered handlers and
//! turns every [`Interrupt`] into a [`RunResult`]. It is the only place that
//! matches on `Interrupt::HelpRequested`.
//!
//! ```rust
//! use clap::{Arg, Command};
//! use waymark::{App, HelpConfig, TextMode};
//!
//! let mut app = App::builder()
//!     .command("config.get", |matches, _ctx| {
//!         let key = matches.get_one::<String>("key").cloned().unwrap_or_default();
//!         Ok(format!("{key} = 42"))
//!     })
//!     .help_config(HelpConfig::new().text_mode(TextMode::Plain).width(80))
//!     .build();
//!
//! let cmd = Command::new("app").subcommand(
//!     Command::new("config").subcommand(Command::new("get").arg(Arg::new("key"))),
//! );
//!
//! let result = app.run_from(cmd.clone(), ["app", "config", "get", "depth"]);
//! assert_eq!(result.output(), Some("depth = 42"));
//!
//! let result = app.run_from(cmd, ["app", "help", "config"]);
//! assert!(result.is_help());
//! assert_eq!(result.exit_code(), 0);
//! ```

use crate::command::HelpCommand;
use crate::dispatch::{
    extract_command_path, get_deepest_matches, help_matches, path_to_string, scan_help_flag,
};
use crate::error::Interrupt;
use crate::handler::{CommandContext, DispatchFn, HandlerResult, RunResult};
use crate::help::{HelpConfig, HelpRenderer, TextHelpRenderer};
use crate::node::CommandNode;
use crate::resolve::resolve_path;
use crate::visibility::Visibility;
use clap::{ArgMatches, Command, FromArgMatches};
use std::collections::HashMap;
use std::ffi::OsString;
use std::sync::Arc;
use tracing::{debug, warn};

/// Main entry point: help interception plus handler dispatch.
///
/// # Single-Threaded Design
///
/// CLI applications are single-threaded: parse args → run one handler →
/// output → exit. Handlers are `FnMut` and the app is driven through
/// `&mut self`.
pub struct App {
    handlers: HashMap<String, DispatchFn>,
    help_config: HelpConfig,
    renderer: Box<dyn HelpRenderer>,
}

impl App {
    /// Creates a new builder for constructing an App instance.
    pub fn builder() -> AppBuilder {
        AppBuilder::new()
    }

    /// Creates an App with no handlers and the default help renderer.
    pub fn new() -> Self {
        AppBuilder::new().build()
    }

    pub fn help_config(&self) -> &HelpConfig {
        &self.help_config
    }

    /// Prepares a clap command for waymark help handling.
    ///
    /// At every level of the tree:
    /// - clap's help flag and help subcommand are disabled
    /// - commands with subcommands get the waymark `help` subcommand
    pub fn augment_command(&self, cmd: Command) -> Command {
        augment(cmd)
    }

    /// Runs the app against the process arguments, prints the outcome and
    /// returns the exit code.
    pub fn run(&mut self, cmd: Command) -> i32 {
        let result = self.run_from(cmd, std::env::args_os());
        match &result {
            RunResult::Handled(out) | RunResult::Help(out) => {
                if out.ends_with('\n') {
                    print!("{}", out);
                } else {
                    println!("{}", out);
                }
            }
            RunResult::Usage(e) => {
                if let Err(err) = e.print() {
                    debug!(error = %err, "could not print usage error");
                }
            }
            RunResult::Failed(e) => eprintln!("Error: {:#}", e),
            RunResult::NoMatch(_) => {}
        }
        result.exit_code()
    }

    /// Like [`run`](App::run), but takes arguments from an iterator and
    /// returns the result instead of printing it.
    pub fn run_from<I, T>(&mut self, cmd: Command, args: I) -> RunResult
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let args: Vec<OsString> = args.into_iter().map(Into::into).collect();

        // Mirror the built command so actions, globals and `--version` are
        // in their final form.
        let mut cmd = self.augment_command(cmd);
        cmd.build();
        let root = Arc::new(CommandNode::from_clap(&cmd));

        match self.execute(cmd, args, &root) {
            Ok(result) => result,
            Err(interrupt) => self.finish(interrupt),
        }
    }

    /// `cmd` must already be augmented.
    fn execute(
        &mut self,
        cmd: Command,
        args: Vec<OsString>,
        root: &Arc<CommandNode>,
    ) -> Result<RunResult, Interrupt> {
        let tokens: Vec<String> = args
            .iter()
            .map(|a| a.to_string_lossy().into_owned())
            .collect();

        if let Some(flag) = scan_help_flag(&tokens, root) {
            let stack = resolve_path(&flag.tokens, root);
            let ctx = CommandContext::new(Arc::clone(root));
            let mut help = HelpCommand::for_path(stack, flag.visibility, None);
            match help.run(&ctx)? {}
        }

        let matches = cmd.try_get_matches_from(long_help_flags(args))?;
        let path = extract_command_path(&matches);
        let ctx = CommandContext::at_path(Arc::clone(root), &path);

        if let Some(sub) = help_matches(&matches) {
            let mut help = HelpCommand::from_arg_matches(sub)?;
            match help.run(&ctx)? {}
        }

        let key = path_to_string(&path);
        if let Some(handler) = self.handlers.get_mut(&key) {
            debug!(command = %key, "dispatching");
            let output = handler(get_deepest_matches(&matches), &ctx)?;
            return Ok(RunResult::Handled(output));
        }

        // A group command without a handler shows its own help.
        if ctx.current().has_children() {
            let mut help =
                HelpCommand::for_path(ctx.command_path.clone(), Visibility::Default, None);
            match help.run(&ctx)? {}
        }

        Ok(RunResult::NoMatch(matches))
    }

    fn finish(&self, interrupt: Interrupt) -> RunResult {
        match interrupt {
            Interrupt::HelpRequested(request) => {
                let width = self.help_config.screen_width();
                match self.renderer.render(&request, width) {
                    Ok(text) => RunResult::Help(text),
                    Err(e) => RunResult::Failed(e.into()),
                }
            }
            Interrupt::Usage(e) => RunResult::Usage(e),
            Interrupt::Failed(e) => RunResult::Failed(e),
        }
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

fn augment(cmd: Command) -> Command {
    let names: Vec<String> = cmd
        .get_subcommands()
        .map(|s| s.get_name().to_string())
        .collect();

    let mut cmd = cmd.disable_help_flag(true).disable_help_subcommand(true);
    if names.is_empty() {
        return cmd;
    }
    for name in names {
        cmd = cmd.mut_subcommand(name, augment);
    }
    cmd.subcommand(HelpCommand::clap_command())
}

/// Rewrites `-help` into `--help`.
///
/// clap cannot declare a single-dash long flag. Any `-help` still present
/// after the pre-parse scan sits behind the `help` subcommand, whose inert
/// `--help` flag absorbs it.
fn long_help_flags(args: Vec<OsString>) -> Vec<OsString> {
    let mut escaped = false;
    args.into_iter()
        .map(|arg| match arg.to_str() {
            Some("--") => {
                escaped = true;
                arg
            }
            Some("-help") if !escaped => OsString::from("--help"),
            _ => arg,
        })
        .collect()
}

/// Builder for constructing an App instance.
pub struct AppBuilder {
    handlers: HashMap<String, DispatchFn>,
    help_config: HelpConfig,
    renderer: Option<Box<dyn HelpRenderer>>,
}

impl AppBuilder {
    pub fn new() -> Self {
        Self {
            handlers: HashMap::new(),
            help_config: HelpConfig::default(),
            renderer: None,
        }
    }

    /// Registers a handler for a dot-separated command path (`"config.set"`).
    ///
    /// The empty path registers a handler for the root command.
    pub fn command<F>(mut self, path: &str, handler: F) -> Self
    where
        F: FnMut(&ArgMatches, &CommandContext) -> HandlerResult + 'static,
    {
        if self
            .handlers
            .insert(path.to_string(), Box::new(handler))
            .is_some()
        {
            warn!(command = path, "handler registered twice, keeping the last one");
        }
        self
    }

    /// Sets the configuration for the default help renderer and the screen
    /// width passed to any renderer.
    pub fn help_config(mut self, config: HelpConfig) -> Self {
        self.help_config = config;
        self
    }

    /// Replaces the default help renderer.
    pub fn renderer<R: HelpRenderer + 'static>(mut self, renderer: R) -> Self {
        self.renderer = Some(Box::new(renderer));
        self
    }

    pub fn build(self) -> App {
        let renderer = self
            .renderer
            .unwrap_or_else(|| Box::new(TextHelpRenderer::new(self.help_config.clone())));
        App {
            handlers: self.handlers,
            help_config: self.help_config,
            renderer,
        }
    }
}

impl Default for AppBuilder {
    fn default() -> Self {
        Self::new()
    }
}
