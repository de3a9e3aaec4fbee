//! Visibility levels for commands and arguments.

use serde::{Deserialize, Serialize};
use std::fmt;

/// How visible a command or argument is in rendered help.
///
/// Levels are ordered from most to least visible. Used as a filter, a level
/// includes every item declared at that level or a more visible one, so
/// `Hidden` shows default and hidden items but not private ones.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    /// Shown in regular help output.
    #[default]
    Default,
    /// Shown only when hidden help is requested (`--help-hidden`).
    Hidden,
    /// Never shown to end users; reserved for internal plumbing.
    Private,
}

impl Visibility {
    /// Returns true if an item declared with `declared` passes this filter.
    pub fn includes(self, declared: Visibility) -> bool {
        declared <= self
    }
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Visibility::Default => "default",
            Visibility::Hidden => "hidden",
            Visibility::Private => "private",
        };
        f.write_str(name)
    }
}
