//! End-to-end help handling through the App driver.

use clap::{Arg, ArgAction, Command};
use waymark::{
    App, CommandContext, HandlerResult, HelpCommand, HelpConfig, HelpRequest, Interrupt,
    RenderError, RunResult, TextMode, Visibility,
};

fn cli() -> Command {
    Command::new("app")
        .about("Demo application")
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .action(ArgAction::SetTrue)
                .help("Print more output"),
        )
        .subcommand(
            Command::new("config")
                .about("Read and write settings")
                .alias("cfg")
                .subcommand(
                    Command::new("set")
                        .about("Set a value")
                        .arg(Arg::new("key").required(true).help("Setting name"))
                        .arg(Arg::new("value").required(true).help("New value"))
                        .arg(
                            Arg::new("timeout")
                                .long("timeout")
                                .value_name("SECS")
                                .help("Connection timeout in seconds"),
                        ),
                )
                .subcommand(Command::new("get").about("Read a value").arg(Arg::new("key"))),
        )
        .subcommand(Command::new("remote").about("Manage remotes"))
        .subcommand(
            Command::new("debug")
                .about("Internal diagnostics")
                .hide(true),
        )
}

fn app() -> App {
    App::builder()
        .command("config.get", |m, _ctx| {
            let key = m.get_one::<String>("key").cloned().unwrap_or_default();
            Ok(format!("{key}=on"))
        })
        .command("remote", |_m, _ctx| Ok("origin".to_string()))
        .help_config(HelpConfig::new().text_mode(TextMode::Plain).width(80))
        .build()
}

fn help_text(result: RunResult) -> String {
    match result {
        RunResult::Help(text) => text,
        other => panic!("expected help, got {other:?}"),
    }
}

#[test]
fn test_help_subcommand_alone_shows_root_help() {
    let output = help_text(app().run_from(cli(), ["app", "help"]));

    assert!(output.contains("Demo application"), "output:\n{output}");
    assert!(output.contains("USAGE: app [OPTIONS] <SUBCOMMAND>"), "output:\n{output}");
    assert!(output.contains("config"), "output:\n{output}");
    assert!(output.contains("remote"), "output:\n{output}");
    assert!(!output.contains("debug"), "output:\n{output}");
}

#[test]
fn test_help_for_nested_command() {
    let output = help_text(app().run_from(cli(), ["app", "help", "config", "set"]));

    assert!(output.contains("USAGE: app config set [OPTIONS] <KEY> <VALUE>"), "output:\n{output}");
    assert!(output.contains("Setting name"), "output:\n{output}");
    assert!(output.contains("--timeout <SECS>"), "output:\n{output}");
}

#[test]
fn test_help_for_unknown_path_falls_back_to_ancestor() {
    let result = app().run_from(cli(), ["app", "help", "config", "bogus"]);
    assert_eq!(result.exit_code(), 0);

    let output = help_text(result);
    assert!(output.contains("USAGE: app config <SUBCOMMAND>"), "output:\n{output}");
    assert!(output.contains("Read and write settings"), "output:\n{output}");
}

#[test]
fn test_help_inside_subcommand_is_relative() {
    let output = help_text(app().run_from(cli(), ["app", "config", "help", "get"]));
    assert!(output.contains("USAGE: app config get"), "output:\n{output}");
}

#[test]
fn test_help_resolves_aliases() {
    let output = help_text(app().run_from(cli(), ["app", "help", "cfg"]));
    assert!(output.contains("USAGE: app config <SUBCOMMAND>"), "output:\n{output}");
}

#[test]
fn test_stray_help_flag_after_help_is_absorbed() {
    let output = help_text(app().run_from(cli(), ["app", "help", "remote", "-h"]));
    assert!(output.contains("USAGE: app remote"), "output:\n{output}");
}

#[test]
fn test_single_dash_help_after_help_is_absorbed() {
    let result = app().run_from(cli(), ["app", "help", "remote", "-help"]);
    assert_eq!(result.exit_code(), 0);
    let output = help_text(result);
    assert!(output.contains("USAGE: app remote"), "output:\n{output}");
}

#[test]
fn test_global_and_valueless_flags_in_subcommand_help() {
    let cmd = Command::new("app")
        .version("1.2.3")
        .arg(
            Arg::new("quiet")
                .long("quiet")
                .num_args(0)
                .global(true)
                .help("Print less output"),
        )
        .subcommand(Command::new("remote").about("Manage remotes"));

    let output = help_text(app().run_from(cmd.clone(), ["app", "remote", "--help"]));
    assert!(output.contains("USAGE: app remote [OPTIONS]"), "output:\n{output}");
    assert!(output.contains("--quiet"), "output:\n{output}");
    assert!(!output.contains("<QUIET>"), "output:\n{output}");

    let output = help_text(app().run_from(cmd, ["app", "--help"]));
    assert!(output.contains("-V, --version"), "output:\n{output}");
}

#[test]
fn test_help_search_filters_output() {
    let output = help_text(app().run_from(cli(), ["app", "help", "-s", "timeout"]));
    assert!(output.contains("config"), "output:\n{output}");
    assert!(!output.contains("remote"), "output:\n{output}");
}

#[test]
fn test_help_search_without_matches() {
    let output = help_text(app().run_from(cli(), ["app", "help", "--search", "nothing-here"]));
    assert!(output.contains("No matches for 'nothing-here'"), "output:\n{output}");
}

#[test]
fn test_help_flag_on_nested_command() {
    let output = help_text(app().run_from(cli(), ["app", "config", "set", "--help"]));
    assert!(output.contains("USAGE: app config set"), "output:\n{output}");
}

#[test]
fn test_help_flag_skips_required_argument_checks() {
    // `set` requires two positionals; asking for help must not trip that.
    let result = app().run_from(cli(), ["app", "config", "set", "-h"]);
    assert!(result.is_help());
}

#[test]
fn test_help_flag_with_unknown_path() {
    let output = help_text(app().run_from(cli(), ["app", "config", "bogus", "--help"]));
    assert!(output.contains("USAGE: app config <SUBCOMMAND>"), "output:\n{output}");
}

#[test]
fn test_help_hidden_flag_shows_hidden_commands() {
    let output = help_text(app().run_from(cli(), ["app", "--help-hidden"]));
    assert!(output.contains("debug"), "output:\n{output}");
    assert!(output.contains("Internal diagnostics"), "output:\n{output}");
}

#[test]
fn test_handlers_still_dispatch() {
    let result = app().run_from(cli(), ["app", "config", "get", "color"]);
    assert!(result.is_handled());
    assert_eq!(result.output(), Some("color=on"));
    assert_eq!(result.exit_code(), 0);
}

#[test]
fn test_usage_error_is_not_help() {
    let result = app().run_from(cli(), ["app", "config", "set", "only-key"]);
    assert!(result.is_error());
    assert!(!result.is_help());
    assert_eq!(result.exit_code(), 2);
}

#[test]
fn test_unknown_flag_is_usage_error() {
    let result = app().run_from(cli(), ["app", "--nope"]);
    assert!(matches!(result, RunResult::Usage(_)));
}

#[test]
fn test_handler_failure_exits_nonzero() {
    let mut app = App::builder()
        .command("remote", |_m, _ctx| {
            Err(anyhow::anyhow!("remote unreachable").into())
        })
        .build();
    let result = app.run_from(cli(), ["app", "remote"]);
    assert!(matches!(result, RunResult::Failed(_)));
    assert_eq!(result.exit_code(), 1);
}

// Nested layers that only pass the interrupt along with `?`.
fn innermost(ctx: &CommandContext) -> Result<(), Interrupt> {
    let mut help = HelpCommand::for_path(
        ctx.command_path.clone(),
        Visibility::Default,
        Some("url".to_string()),
    );
    match help.run(ctx)? {}
}

fn middle(ctx: &CommandContext) -> Result<u32, Interrupt> {
    innermost(ctx)?;
    Ok(7)
}

fn outer(ctx: &CommandContext) -> HandlerResult {
    let n = middle(ctx)?;
    Ok(format!("never {n}"))
}

#[test]
fn test_help_propagates_through_nested_layers() {
    let mut app = App::builder()
        .command("remote", |_m, ctx| outer(ctx))
        .help_config(HelpConfig::new().text_mode(TextMode::Plain).width(80))
        .build();

    let result = app.run_from(cli(), ["app", "remote"]);
    let output = help_text(result);
    assert!(output.contains("USAGE: app remote"), "output:\n{output}");
}

#[test]
fn test_custom_renderer_receives_request() {
    let renderer = |request: &HelpRequest, width: usize| -> Result<String, RenderError> {
        Ok(format!(
            "{}|{}|{:?}|{}",
            request.path_names().join("/"),
            request.visibility(),
            request.search(),
            width
        ))
    };
    let mut app = App::builder()
        .renderer(renderer)
        .help_config(HelpConfig::new().width(60))
        .build();

    let result = app.run_from(cli(), ["app", "help", "config", "set", "-s", "Time Out"]);
    assert_eq!(
        result.output(),
        Some("config/set|default|Some(\"Time Out\")|60")
    );
}

#[test]
fn test_hidden_flag_request_reaches_renderer() {
    let renderer = |request: &HelpRequest, _width: usize| -> Result<String, RenderError> {
        Ok(request.visibility().to_string())
    };
    let mut app = App::builder().renderer(renderer).build();

    let result = app.run_from(cli(), ["app", "config", "--help-hidden"]);
    assert_eq!(result.output(), Some("hidden"));
}
