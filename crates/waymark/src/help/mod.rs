//! Help rendering.
//!
//! This module turns a [`HelpRequest`](crate::HelpRequest) into text:
//!
//! - [`HelpRenderer`]: the rendering contract the driver calls
//! - [`TextHelpRenderer`]: the default template-based renderer
//! - [`render_help`]: one-shot rendering with an optional [`HelpConfig`]
//! - [`HelpConfig`], [`HelpTheme`], [`TextMode`]: rendering configuration

mod config;
pub(crate) mod data;
mod render;

pub use config::{default_help_theme, HelpConfig, HelpTheme, TextMode};
pub use render::{render_help, HelpRenderer, TextHelpRenderer};
