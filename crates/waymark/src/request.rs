//! The help request signal.

use crate::node::CommandNode;
use crate::resolve::path_target;
use crate::visibility::Visibility;
use std::sync::Arc;

/// Everything needed to render help for one position in the command tree.
///
/// Built once when help is requested and handed to a
/// [`HelpRenderer`](crate::HelpRenderer). The command stack is anchored at
/// `root` and does not include it; an empty stack means help for the root
/// command itself.
#[derive(Debug, Clone)]
pub struct HelpRequest {
    root: Arc<CommandNode>,
    command_stack: Vec<Arc<CommandNode>>,
    visibility: Visibility,
    search: Option<String>,
}

impl HelpRequest {
    pub fn new(
        root: Arc<CommandNode>,
        command_stack: Vec<Arc<CommandNode>>,
        visibility: Visibility,
        search: Option<String>,
    ) -> Self {
        Self {
            root,
            command_stack,
            visibility,
            search,
        }
    }

    pub fn root(&self) -> &Arc<CommandNode> {
        &self.root
    }

    pub fn command_stack(&self) -> &[Arc<CommandNode>] {
        &self.command_stack
    }

    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    pub fn search(&self) -> Option<&str> {
        self.search.as_deref()
    }

    /// The command help is being rendered for.
    pub fn target(&self) -> &CommandNode {
        path_target(&self.root, &self.command_stack)
    }

    /// Names along the command stack, root excluded.
    pub fn path_names(&self) -> Vec<&str> {
        self.command_stack.iter().map(|n| n.name()).collect()
    }

    /// The full invocation name, e.g. `app config set`.
    pub fn qualified_name(&self) -> String {
        std::iter::once(self.root.name())
            .chain(self.command_stack.iter().map(|n| n.name()))
            .collect::<Vec<_>>()
            .join(" ")
    }
}
