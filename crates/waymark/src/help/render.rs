//! Help rendering functions.

use crate::error::RenderError;
use crate::request::HelpRequest;
use minijinja::Environment;

use super::config::{default_help_theme, HelpConfig, HelpTheme};
use super::data::extract_help_data;

const DEFAULT_TEMPLATE: &str = include_str!("template.txt");

/// Turns a help request into text.
///
/// The driver calls this with a resolved (possibly empty) command path, a
/// visibility filter, an optional search term and a positive screen width.
pub trait HelpRenderer {
    fn render(&self, request: &HelpRequest, screen_width: usize) -> Result<String, RenderError>;
}

impl<F> HelpRenderer for F
where
    F: Fn(&HelpRequest, usize) -> Result<String, RenderError>,
{
    fn render(&self, request: &HelpRequest, screen_width: usize) -> Result<String, RenderError> {
        self(request, screen_width)
    }
}

/// The default renderer: a minijinja template over the extracted help data.
#[derive(Debug, Clone, Default)]
pub struct TextHelpRenderer {
    config: HelpConfig,
}

impl TextHelpRenderer {
    pub fn new(config: HelpConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &HelpConfig {
        &self.config
    }

    fn environment(&self) -> Environment<'static> {
        let theme = self.config.theme.clone().unwrap_or_else(default_help_theme);
        let styled = self.config.text_mode.is_styled();

        let mut env = Environment::new();
        env.set_trim_blocks(true);
        env.add_filter("style", move |value: String, name: String| {
            apply_style(&theme, styled, &name, &value)
        });
        env
    }
}

impl HelpRenderer for TextHelpRenderer {
    fn render(&self, request: &HelpRequest, screen_width: usize) -> Result<String, RenderError> {
        let template = self.config.template.as_deref().unwrap_or(DEFAULT_TEMPLATE);
        let data = extract_help_data(request, screen_width);
        let env = self.environment();
        Ok(env.render_str(template, &data)?)
    }
}

/// Styles each line separately so wrapped text keeps its indentation.
fn apply_style(theme: &HelpTheme, styled: bool, name: &str, value: &str) -> String {
    match theme.get(name) {
        Some(style) if styled => value
            .split('\n')
            .map(|line| {
                let trimmed = line.trim_start();
                let indent = &line[..line.len() - trimmed.len()];
                if trimmed.is_empty() {
                    line.to_string()
                } else {
                    format!(
                        "{}{}",
                        indent,
                        style.clone().force_styling(true).apply_to(trimmed)
                    )
                }
            })
            .collect::<Vec<_>>()
            .join("\n"),
        _ => value.to_string(),
    }
}

/// Renders help for a request using the default renderer.
///
/// The screen width comes from the config, then the terminal, then 80.
pub fn render_help(
    request: &HelpRequest,
    config: Option<HelpConfig>,
) -> Result<String, RenderError> {
    let config = config.unwrap_or_default();
    let width = config.screen_width();
    TextHelpRenderer::new(config).render(request, width)
}
