//! Help rendering configuration.

use console::{Style, Term};

/// Width used when neither the config nor the terminal provides one.
pub const DEFAULT_SCREEN_WIDTH: usize = 80;

/// Gets the current terminal width, or None if not available.
pub(crate) fn terminal_width() -> Option<usize> {
    terminal_size::terminal_size().map(|(w, _)| w.0 as usize)
}

/// Whether rendered help carries ANSI styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextMode {
    /// Style when stdout is a terminal.
    #[default]
    Auto,
    /// Always style.
    Styled,
    /// Never style.
    Plain,
}

impl TextMode {
    /// Resolves `Auto` by checking whether stdout is a terminal.
    pub fn resolve(self) -> TextMode {
        match self {
            TextMode::Auto => {
                if Term::stdout().is_term() {
                    TextMode::Styled
                } else {
                    TextMode::Plain
                }
            }
            other => other,
        }
    }

    pub fn is_styled(self) -> bool {
        self.resolve() == TextMode::Styled
    }
}

/// Styles applied to the parts of help output.
#[derive(Debug, Clone)]
pub struct HelpTheme {
    /// Section titles (`USAGE:`, `OPTIONS:`, ...).
    pub header: Style,
    /// Names in the left column.
    pub item: Style,
    /// The usage line.
    pub usage: Style,
    /// Description text.
    pub desc: Style,
}

impl HelpTheme {
    /// Returns the style registered under `name`.
    pub fn get(&self, name: &str) -> Option<&Style> {
        match name {
            "header" => Some(&self.header),
            "item" => Some(&self.item),
            "usage" => Some(&self.usage),
            "desc" => Some(&self.desc),
            _ => None,
        }
    }
}

impl Default for HelpTheme {
    fn default() -> Self {
        default_help_theme()
    }
}

/// Returns the default theme for help rendering.
pub fn default_help_theme() -> HelpTheme {
    HelpTheme {
        header: Style::new().bold().underlined(),
        item: Style::new().bold(),
        usage: Style::new(),
        desc: Style::new(),
    }
}

/// Configuration for help rendering.
#[derive(Debug, Clone, Default)]
pub struct HelpConfig {
    /// Custom template string. If None, uses the default template.
    pub template: Option<String>,
    /// Custom theme. If None, uses the default theme.
    pub theme: Option<HelpTheme>,
    /// Styling mode.
    pub text_mode: TextMode,
    /// Screen width. If None, uses the terminal width.
    pub width: Option<usize>,
}

impl HelpConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn template(mut self, template: impl Into<String>) -> Self {
        self.template = Some(template.into());
        self
    }

    pub fn theme(mut self, theme: HelpTheme) -> Self {
        self.theme = Some(theme);
        self
    }

    pub fn text_mode(mut self, mode: TextMode) -> Self {
        self.text_mode = mode;
        self
    }

    pub fn width(mut self, width: usize) -> Self {
        self.width = Some(width);
        self
    }

    /// The width to render at: configured, then terminal, then 80 columns.
    /// Never zero.
    pub fn screen_width(&self) -> usize {
        self.width
            .or_else(terminal_width)
            .unwrap_or(DEFAULT_SCREEN_WIDTH)
            .max(1)
    }
}
