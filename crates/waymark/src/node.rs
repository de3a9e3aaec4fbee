//! Command hierarchy model.
//!
//! A [`CommandNode`] describes one command in the tree: its name, aliases,
//! about text, declared arguments and named children. Nodes are immutable
//! once built and shared through [`Arc`], so a resolved command path can be
//! carried around without borrowing the tree it came from.
//!
//! Trees are either assembled with the builder methods or mirrored from a
//! clap [`Command`] via [`CommandNode::from_clap`].

use crate::command::HELP_COMMAND_NAME;
use crate::visibility::Visibility;
use clap::{Arg, Command};
use std::sync::Arc;

/// One declared argument of a command, as seen by the help renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArgSpec {
    id: String,
    short: Option<char>,
    long: Option<String>,
    value_name: Option<String>,
    help: String,
    visibility: Visibility,
    positional: bool,
}

impl ArgSpec {
    /// Creates a flag-style argument with the given id and no names.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            short: None,
            long: None,
            value_name: None,
            help: String::new(),
            visibility: Visibility::Default,
            positional: false,
        }
    }

    /// Creates a positional argument.
    pub fn positional(id: impl Into<String>) -> Self {
        Self {
            positional: true,
            ..Self::new(id)
        }
    }

    pub fn short(mut self, short: char) -> Self {
        self.short = Some(short);
        self
    }

    pub fn long(mut self, long: impl Into<String>) -> Self {
        self.long = Some(long.into());
        self
    }

    /// Sets the placeholder shown for the argument's value (`<VALUE>`).
    pub fn value_name(mut self, name: impl Into<String>) -> Self {
        self.value_name = Some(name.into());
        self
    }

    pub fn help(mut self, help: impl Into<String>) -> Self {
        self.help = help.into();
        self
    }

    pub fn visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn help_text(&self) -> &str {
        &self.help
    }

    pub fn visibility_level(&self) -> Visibility {
        self.visibility
    }

    pub fn is_positional(&self) -> bool {
        self.positional
    }

    /// The name as it appears in the left column of help output.
    ///
    /// Positionals render as `<NAME>`; options as `-s, --search <TERM>`.
    pub fn display_name(&self) -> String {
        if self.positional {
            let name = self
                .value_name
                .clone()
                .unwrap_or_else(|| self.id.to_uppercase());
            return format!("<{}>", name);
        }

        let mut name = String::new();
        if let Some(short) = self.short {
            name.push_str(&format!("-{}", short));
        }
        if let Some(long) = &self.long {
            if !name.is_empty() {
                name.push_str(", ");
            }
            name.push_str(&format!("--{}", long));
        }
        if name.is_empty() {
            name = self.id.clone();
        }
        if let Some(value) = &self.value_name {
            name.push_str(&format!(" <{}>", value));
        }
        name
    }

    /// Mirrors a clap argument.
    pub fn from_clap(arg: &Arg) -> Self {
        let positional = arg.is_positional();
        let takes_value = arg.get_action().takes_values();
        let value_name = if takes_value {
            Some(
                arg.get_value_names()
                    .and_then(|names| names.first())
                    .map(|n| n.to_string())
                    .unwrap_or_else(|| arg.get_id().as_str().to_uppercase()),
            )
        } else {
            None
        };

        Self {
            id: arg.get_id().as_str().to_string(),
            short: arg.get_short(),
            long: arg.get_long().map(str::to_string),
            value_name,
            help: arg.get_help().map(|s| s.to_string()).unwrap_or_default(),
            visibility: if arg.is_hide_set() {
                Visibility::Hidden
            } else {
                Visibility::Default
            },
            positional,
        }
    }
}

/// A command descriptor: one node in the command hierarchy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandNode {
    name: String,
    about: String,
    aliases: Vec<String>,
    visibility: Visibility,
    args: Vec<ArgSpec>,
    children: Vec<Arc<CommandNode>>,
}

impl CommandNode {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            about: String::new(),
            aliases: Vec::new(),
            visibility: Visibility::Default,
            args: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn about(mut self, about: impl Into<String>) -> Self {
        self.about = about.into();
        self
    }

    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.aliases.push(alias.into());
        self
    }

    pub fn visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    pub fn arg(mut self, arg: ArgSpec) -> Self {
        self.args.push(arg);
        self
    }

    /// Adds a child command. Declaration order is display order.
    pub fn subcommand(mut self, child: CommandNode) -> Self {
        self.children.push(Arc::new(child));
        self
    }

    /// Wraps the finished tree for sharing.
    pub fn into_shared(self) -> Arc<CommandNode> {
        Arc::new(self)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn about_text(&self) -> &str {
        &self.about
    }

    pub fn aliases(&self) -> &[String] {
        &self.aliases
    }

    pub fn visibility_level(&self) -> Visibility {
        self.visibility
    }

    pub fn args(&self) -> &[ArgSpec] {
        &self.args
    }

    pub fn children(&self) -> &[Arc<CommandNode>] {
        &self.children
    }

    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    /// Returns true if `token` names this command, directly or via an alias.
    pub fn matches(&self, token: &str) -> bool {
        self.name == token || self.aliases.iter().any(|a| a == token)
    }

    /// Looks up a direct child by name or alias.
    pub fn find_child(&self, token: &str) -> Option<&Arc<CommandNode>> {
        self.children.iter().find(|c| c.matches(token))
    }

    /// Mirrors a clap command tree.
    ///
    /// Hidden clap commands and arguments become [`Visibility::Hidden`].
    /// The `help` subcommand and clap's own help flag are skipped: help is
    /// not something you ask help about.
    pub fn from_clap(cmd: &Command) -> Self {
        let args = cmd
            .get_arguments()
            .filter(|a| a.get_id().as_str() != "help")
            .map(ArgSpec::from_clap)
            .collect();

        let children = cmd
            .get_subcommands()
            .filter(|s| s.get_name() != HELP_COMMAND_NAME)
            .map(|s| Arc::new(CommandNode::from_clap(s)))
            .collect();

        Self {
            name: cmd.get_name().to_string(),
            about: cmd.get_about().map(|s| s.to_string()).unwrap_or_default(),
            aliases: cmd.get_all_aliases().map(str::to_string).collect(),
            visibility: if cmd.is_hide_set() {
                Visibility::Hidden
            } else {
                Visibility::Default
            },
            args,
            children,
        }
    }
}
