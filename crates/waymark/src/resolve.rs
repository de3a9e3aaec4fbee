//! Command path resolution.
//!
//! Turns a sequence of subcommand name tokens into the ordered list of
//! commands they name. Resolution is best-effort: the first token that names
//! no child ends the walk, and whatever was matched up to that point is the
//! answer. Help for `app config bogus` is help for `config`, never an error.

use crate::node::CommandNode;
use std::sync::Arc;
use tracing::debug;

/// Resolves `tokens` against the children of `root`, left to right.
///
/// Returns the matched commands in token order, not including `root`
/// itself. An empty token list resolves to an empty path.
pub fn resolve_path<S: AsRef<str>>(
    tokens: &[S],
    root: &Arc<CommandNode>,
) -> Vec<Arc<CommandNode>> {
    let mut path = Vec::with_capacity(tokens.len());
    let mut current = root;

    for (index, token) in tokens.iter().enumerate() {
        let token = token.as_ref();
        match current.find_child(token) {
            Some(child) => {
                path.push(Arc::clone(child));
                current = child;
            }
            None => {
                debug!(
                    token,
                    parent = current.name(),
                    matched = index,
                    "unknown subcommand, resolving to deepest known ancestor"
                );
                break;
            }
        }
    }

    path
}

/// Returns the node a path ends at, or `root` for the empty path.
pub fn path_target<'a>(
    root: &'a Arc<CommandNode>,
    path: &'a [Arc<CommandNode>],
) -> &'a Arc<CommandNode> {
    path.last().unwrap_or(root)
}
