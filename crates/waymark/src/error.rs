//! Error and control-flow types.

use crate::request::HelpRequest;
use thiserror::Error;

/// Why normal command dispatch stopped.
///
/// Handlers and the help command return `Result<_, Interrupt>` and propagate
/// it with `?`. Intermediate layers pass it through untouched; only the
/// outermost driver matches on the variant. `HelpRequested` is not a failure:
/// the driver renders help and exits with status 0.
#[derive(Debug, Error)]
pub enum Interrupt {
    /// The user asked for help.
    #[error("help requested for '{}'", .0.qualified_name())]
    HelpRequested(HelpRequest),

    /// The command line could not be parsed (missing or invalid arguments).
    #[error(transparent)]
    Usage(#[from] clap::Error),

    /// A command ran and failed.
    #[error(transparent)]
    Failed(#[from] anyhow::Error),
}

impl Interrupt {
    /// Returns true if this is a help request rather than an error.
    pub fn is_help(&self) -> bool {
        matches!(self, Interrupt::HelpRequested(_))
    }

    /// Returns the help request, if this is one.
    pub fn help_request(&self) -> Option<&HelpRequest> {
        match self {
            Interrupt::HelpRequested(request) => Some(request),
            _ => None,
        }
    }

    /// Consumes the interrupt, returning the help request if this is one.
    pub fn into_help_request(self) -> Option<HelpRequest> {
        match self {
            Interrupt::HelpRequested(request) => Some(request),
            _ => None,
        }
    }
}

/// Errors decoding a persisted help command.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("invalid JSON help command: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid YAML help command: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Errors rendering help text.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The help template failed to render.
    #[error("help template error: {0}")]
    Template(#[from] minijinja::Error),
}
