//! Command dispatch logic.
//!
//! Utilities for extracting command paths from clap `ArgMatches`, locating
//! the `help` subcommand in a match chain, and spotting help flags in raw
//! arguments before clap sees them.

use crate::command::HELP_COMMAND_NAME;
use crate::node::CommandNode;
use crate::visibility::Visibility;
use clap::ArgMatches;
use std::sync::Arc;

/// Flags that request help at the default visibility.
pub const HELP_FLAGS: [&str; 3] = ["-h", "--help", "-help"];

/// Flag that requests help including hidden commands and arguments.
pub const HELP_HIDDEN_FLAG: &str = "--help-hidden";

/// Extracts the command path from ArgMatches by following the subcommand chain.
///
/// For example, `myapp db migrate` produces `["db", "migrate"]`. The chain
/// stops before `help`, so `myapp db help migrate` produces `["db"]`.
pub fn extract_command_path(matches: &ArgMatches) -> Vec<String> {
    let mut path = Vec::new();
    let mut current = matches;

    while let Some((name, sub)) = current.subcommand() {
        if name == HELP_COMMAND_NAME {
            break;
        }
        path.push(name.to_string());
        current = sub;
    }

    path
}

/// Gets the deepest subcommand matches, stopping before `help`.
pub fn get_deepest_matches(matches: &ArgMatches) -> &ArgMatches {
    let mut current = matches;

    while let Some((name, sub)) = current.subcommand() {
        if name == HELP_COMMAND_NAME {
            break;
        }
        current = sub;
    }

    current
}

/// Returns the matches of the `help` subcommand if the chain ends in one.
pub fn help_matches(matches: &ArgMatches) -> Option<&ArgMatches> {
    match get_deepest_matches(matches).subcommand() {
        Some((name, sub)) if name == HELP_COMMAND_NAME => Some(sub),
        _ => None,
    }
}

/// Converts a command path vector to a dot-separated string.
///
/// For example, `["db", "migrate"]` becomes `"db.migrate"`.
pub fn path_to_string(path: &[String]) -> String {
    path.join(".")
}

/// A help flag found in raw arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HelpFlag {
    /// Non-flag tokens before the help flag, in order.
    pub tokens: Vec<String>,
    /// Visibility the flag asks for.
    pub visibility: Visibility,
}

/// Looks for a help flag in `args` (program name first).
///
/// Scanning stops at `--`, and at a `help` token in a position where the
/// `help` subcommand would be selected: in that case the subcommand absorbs
/// any trailing `-h` itself. Tokens starting with `-` are skipped; everything
/// else is collected for best-effort path resolution, so option values may
/// end up in `tokens` and simply fail to resolve.
pub fn scan_help_flag(args: &[String], root: &Arc<CommandNode>) -> Option<HelpFlag> {
    let mut tokens = Vec::new();
    let mut current = Some(root);

    for arg in args.iter().skip(1) {
        let arg = arg.as_str();
        if arg == "--" {
            return None;
        }
        if HELP_FLAGS.contains(&arg) {
            return Some(HelpFlag {
                tokens,
                visibility: Visibility::Default,
            });
        }
        if arg == HELP_HIDDEN_FLAG {
            return Some(HelpFlag {
                tokens,
                visibility: Visibility::Hidden,
            });
        }
        if arg.starts_with('-') {
            continue;
        }

        if let Some(node) = current {
            if arg == HELP_COMMAND_NAME && node.has_children() && node.find_child(arg).is_none() {
                return None;
            }
            current = node.find_child(arg);
        }
        tokens.push(arg.to_string());
    }

    None
}
