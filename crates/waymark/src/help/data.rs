//! Help data extraction from a help request.
//!
//! Produces the serializable view the help template renders: sections of
//! name/description rows, already filtered by visibility and search term and
//! already wrapped to the screen width.

use crate::node::{ArgSpec, CommandNode};
use crate::request::HelpRequest;
use crate::visibility::Visibility;
use serde::Serialize;
use unicode_width::UnicodeWidthStr;

/// Minimum width for the name column in help output.
pub(crate) const NAME_COLUMN_WIDTH: usize = 14;
/// Names wider than this push their description to the next line.
const MAX_NAME_COLUMN_WIDTH: usize = 28;
const INDENT: usize = 2;
const MIN_DESC_WIDTH: usize = 20;

#[derive(Debug, Serialize)]
pub(crate) struct HelpData {
    pub name: String,
    pub about: String,
    pub usage: String,
    pub sections: Vec<Section>,
    pub search: Option<String>,
    pub no_matches: bool,
}

#[derive(Debug, Serialize)]
pub(crate) struct Section {
    pub title: String,
    pub items: Vec<Item>,
}

#[derive(Debug, Serialize)]
pub(crate) struct Item {
    pub name: String,
    pub padding: String,
    pub help: String,
}

/// Case-insensitive substring matcher for the search term.
///
/// An absent or empty term matches everything.
struct Matcher {
    term: Option<String>,
}

impl Matcher {
    fn new(search: Option<&str>) -> Self {
        Self {
            term: search.filter(|s| !s.is_empty()).map(str::to_lowercase),
        }
    }

    fn is_active(&self) -> bool {
        self.term.is_some()
    }

    fn hit(&self, text: &str) -> bool {
        match &self.term {
            Some(term) => text.to_lowercase().contains(term.as_str()),
            None => true,
        }
    }

    fn arg(&self, arg: &ArgSpec) -> bool {
        self.hit(&arg.display_name()) || self.hit(arg.help_text())
    }

    /// A command matches if it, one of its visible arguments, or one of its
    /// visible descendants matches.
    fn command(&self, node: &CommandNode, visibility: Visibility) -> bool {
        if !self.is_active() {
            return true;
        }
        self.hit(node.name())
            || node.aliases().iter().any(|a| self.hit(a))
            || self.hit(node.about_text())
            || node
                .args()
                .iter()
                .filter(|a| visibility.includes(a.visibility_level()))
                .any(|a| self.arg(a))
            || node
                .children()
                .iter()
                .filter(|c| visibility.includes(c.visibility_level()))
                .any(|c| self.command(c, visibility))
    }
}

pub(crate) fn extract_help_data(request: &HelpRequest, screen_width: usize) -> HelpData {
    let target = request.target();
    let visibility = request.visibility();
    let matcher = Matcher::new(request.search());
    let name = request.qualified_name();

    let args: Vec<&ArgSpec> = target
        .args()
        .iter()
        .filter(|a| visibility.includes(a.visibility_level()))
        .collect();
    let children: Vec<&CommandNode> = target
        .children()
        .iter()
        .map(|c| &**c)
        .filter(|c| visibility.includes(c.visibility_level()))
        .collect();

    let usage = usage_line(&name, &args, !children.is_empty());

    let mut rows: Vec<(&str, Vec<(String, String)>)> = Vec::new();

    let positionals: Vec<(String, String)> = args
        .iter()
        .filter(|a| a.is_positional() && matcher.arg(a))
        .map(|a| (a.display_name(), a.help_text().to_string()))
        .collect();
    rows.push(("ARGUMENTS:", positionals));

    let options: Vec<(String, String)> = args
        .iter()
        .filter(|a| !a.is_positional() && matcher.arg(a))
        .map(|a| (a.display_name(), a.help_text().to_string()))
        .collect();
    rows.push(("OPTIONS:", options));

    let subcommands: Vec<(String, String)> = children
        .iter()
        .filter(|c| matcher.command(c, visibility))
        .map(|c| (c.name().to_string(), c.about_text().to_string()))
        .collect();
    rows.push(("SUBCOMMANDS:", subcommands));

    let column = rows
        .iter()
        .flat_map(|(_, items)| items.iter().map(|(n, _)| n.width() + INDENT))
        .max()
        .unwrap_or(0)
        .clamp(NAME_COLUMN_WIDTH, MAX_NAME_COLUMN_WIDTH);
    let desc_width = screen_width
        .saturating_sub(INDENT + column)
        .max(MIN_DESC_WIDTH);

    let sections: Vec<Section> = rows
        .into_iter()
        .filter(|(_, items)| !items.is_empty())
        .map(|(title, items)| Section {
            title: title.to_string(),
            items: items
                .into_iter()
                .map(|(name, help)| layout_item(name, &help, column, desc_width))
                .collect(),
        })
        .collect();

    let no_matches = matcher.is_active() && sections.is_empty();

    HelpData {
        name,
        about: wrap(target.about_text(), screen_width.max(MIN_DESC_WIDTH)).join("\n"),
        usage,
        sections,
        search: request.search().map(str::to_string),
        no_matches,
    }
}

fn usage_line(name: &str, args: &[&ArgSpec], has_subcommands: bool) -> String {
    let mut usage = name.to_string();
    if args.iter().any(|a| !a.is_positional()) {
        usage.push_str(" [OPTIONS]");
    }
    for arg in args.iter().filter(|a| a.is_positional()) {
        usage.push(' ');
        usage.push_str(&arg.display_name());
    }
    if has_subcommands {
        usage.push_str(" <SUBCOMMAND>");
    }
    usage
}

fn layout_item(name: String, help: &str, column: usize, desc_width: usize) -> Item {
    let continuation = format!("\n{}", " ".repeat(INDENT + column));
    let lines = wrap(help, desc_width);
    let name_width = name.width();

    let padding = if name_width + INDENT <= column {
        " ".repeat(column - name_width)
    } else if lines.is_empty() {
        String::new()
    } else {
        continuation.clone()
    };

    Item {
        name,
        padding,
        help: lines.join(&continuation),
    }
}

/// Greedy word wrap by display width. Existing line breaks are kept; a word
/// wider than `width` gets a line of its own.
pub(crate) fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    for paragraph in text.lines() {
        let mut line = String::new();
        for word in paragraph.split_whitespace() {
            if !line.is_empty() && line.width() + 1 + word.width() > width {
                lines.push(std::mem::take(&mut line));
            }
            if !line.is_empty() {
                line.push(' ');
            }
            line.push_str(word);
        }
        lines.push(line);
    }
    while lines.last().is_some_and(|l| l.is_empty()) {
        lines.pop();
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolve::resolve_path;
    use std::sync::Arc;

    fn tree() -> Arc<CommandNode> {
        CommandNode::new("app")
            .about("Manage things")
            .arg(
                ArgSpec::new("verbose")
                    .short('v')
                    .long("verbose")
                    .help("Print more"),
            )
            .arg(ArgSpec::new("trace").long("trace").visibility(Visibility::Hidden))
            .subcommand(
                CommandNode::new("config")
                    .about("Read and write settings")
                    .subcommand(
                        CommandNode::new("set")
                            .about("Set a value")
                            .arg(ArgSpec::positional("key").help("Setting name"))
                            .arg(
                                ArgSpec::new("timeout")
                                    .long("timeout")
                                    .value_name("SECS")
                                    .help("Connection timeout"),
                            ),
                    ),
            )
            .subcommand(CommandNode::new("remote").about("Manage remotes"))
            .subcommand(
                CommandNode::new("debug")
                    .about("Internal diagnostics")
                    .visibility(Visibility::Hidden),
            )
            .subcommand(
                CommandNode::new("plumbing")
                    .about("Never listed")
                    .visibility(Visibility::Private),
            )
            .into_shared()
    }

    fn request(tokens: &[&str], visibility: Visibility, search: Option<&str>) -> HelpRequest {
        let root = tree();
        let stack = resolve_path(tokens, &root);
        HelpRequest::new(root, stack, visibility, search.map(str::to_string))
    }

    fn section<'a>(data: &'a HelpData, title: &str) -> Option<&'a Section> {
        data.sections.iter().find(|s| s.title == title)
    }

    fn item_names(section: &Section) -> Vec<&str> {
        section.items.iter().map(|i| i.name.as_str()).collect()
    }

    #[test]
    fn test_root_sections() {
        let data = extract_help_data(&request(&[], Visibility::Default, None), 80);
        assert_eq!(data.name, "app");
        assert_eq!(data.about, "Manage things");
        assert_eq!(data.usage, "app [OPTIONS] <SUBCOMMAND>");

        let subs = section(&data, "SUBCOMMANDS:").unwrap();
        assert_eq!(item_names(subs), vec!["config", "remote"]);
        let opts = section(&data, "OPTIONS:").unwrap();
        assert_eq!(item_names(opts), vec!["-v, --verbose"]);
        assert!(section(&data, "ARGUMENTS:").is_none());
    }

    #[test]
    fn test_hidden_visibility_shows_hidden_not_private() {
        let data = extract_help_data(&request(&[], Visibility::Hidden, None), 80);
        let subs = section(&data, "SUBCOMMANDS:").unwrap();
        assert_eq!(item_names(subs), vec!["config", "remote", "debug"]);
        let opts = section(&data, "OPTIONS:").unwrap();
        assert_eq!(item_names(opts), vec!["-v, --verbose", "--trace"]);
    }

    #[test]
    fn test_private_visibility_shows_everything() {
        let data = extract_help_data(&request(&[], Visibility::Private, None), 80);
        let subs = section(&data, "SUBCOMMANDS:").unwrap();
        assert_eq!(subs.items.len(), 4);
    }

    #[test]
    fn test_leaf_usage_and_arguments() {
        let data = extract_help_data(&request(&["config", "set"], Visibility::Default, None), 80);
        assert_eq!(data.name, "app config set");
        assert_eq!(data.usage, "app config set [OPTIONS] <KEY>");
        let args = section(&data, "ARGUMENTS:").unwrap();
        assert_eq!(item_names(args), vec!["<KEY>"]);
        let opts = section(&data, "OPTIONS:").unwrap();
        assert_eq!(item_names(opts), vec!["--timeout <SECS>"]);
        assert!(section(&data, "SUBCOMMANDS:").is_none());
    }

    #[test]
    fn test_search_keeps_commands_with_matching_descendants() {
        let data = extract_help_data(&request(&[], Visibility::Default, Some("TIMEOUT")), 80);
        let subs = section(&data, "SUBCOMMANDS:").unwrap();
        assert_eq!(item_names(subs), vec!["config"]);
        assert!(section(&data, "OPTIONS:").is_none());
        assert!(!data.no_matches);
    }

    #[test]
    fn test_search_does_not_reach_hidden_items_at_default_visibility() {
        let data = extract_help_data(&request(&[], Visibility::Default, Some("diagnostics")), 80);
        assert!(data.sections.is_empty());
        assert!(data.no_matches);
    }

    #[test]
    fn test_empty_search_matches_everything() {
        let data = extract_help_data(&request(&[], Visibility::Default, Some("")), 80);
        assert_eq!(data.search.as_deref(), Some(""));
        assert!(!data.no_matches);
        assert_eq!(section(&data, "SUBCOMMANDS:").unwrap().items.len(), 2);
    }

    #[test]
    fn test_padding_aligns_across_sections() {
        let data = extract_help_data(&request(&[], Visibility::Default, None), 80);
        let widths: Vec<usize> = data
            .sections
            .iter()
            .flat_map(|s| s.items.iter())
            .map(|i| i.name.width() + i.padding.len())
            .collect();

        // "-v, --verbose" is the widest name: 13 columns plus the gap.
        assert!(widths.iter().all(|w| *w == 15), "widths: {widths:?}");
    }

    #[test]
    fn test_short_names_use_minimum_column() {
        let data = extract_help_data(&request(&["config"], Visibility::Default, None), 80);
        let set = &section(&data, "SUBCOMMANDS:").unwrap().items[0];
        assert_eq!(set.name.len() + set.padding.len(), NAME_COLUMN_WIDTH);
    }

    #[test]
    fn test_wrap_breaks_on_width() {
        let lines = wrap("one two three four", 9);
        assert_eq!(lines, vec!["one two", "three", "four"]);
    }

    #[test]
    fn test_wrap_keeps_long_words_whole() {
        let lines = wrap("a supercalifragilistic word", 5);
        assert_eq!(lines, vec!["a", "supercalifragilistic", "word"]);
    }

    #[test]
    fn test_wrap_empty_text() {
        assert!(wrap("", 10).is_empty());
    }

    #[test]
    fn test_long_help_wraps_with_indent() {
        let root = CommandNode::new("app")
            .arg(
                ArgSpec::new("x")
                    .long("x")
                    .help("alpha beta gamma delta epsilon zeta eta theta"),
            )
            .into_shared();
        let request = HelpRequest::new(root, vec![], Visibility::Default, None);
        // 2 indent + 14 column leaves 20 columns of description.
        let data = extract_help_data(&request, 36);
        let item = &data.sections[0].items[0];
        let lines: Vec<&str> = item.help.split('\n').collect();
        assert!(lines.len() > 1);
        assert!(lines[1].starts_with(&" ".repeat(16)));
        assert!(lines.iter().all(|l| l.trim_start().width() <= 20));
    }
}
