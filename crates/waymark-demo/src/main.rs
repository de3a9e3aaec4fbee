//! `wmk`: a toy settings manager wired through waymark.
//!
//! Try:
//!
//! ```text
//! wmk help
//! wmk help config set
//! wmk config help get
//! wmk help -s url
//! wmk remote add origin --help
//! wmk --help-hidden
//! WAYMARK_LOG=debug wmk help config bogus
//! ```

use anyhow::{anyhow, bail};
use clap::{Args, CommandFactory, FromArgMatches, Parser, Subcommand};
use std::collections::BTreeMap;
use tracing_subscriber::EnvFilter;
use waymark::{App, CommandContext, HandlerResult, HelpCommand, Visibility};

/// Manage settings and remotes.
///
/// Only the clap command built from this is used; waymark does the parsing.
#[allow(dead_code)]
#[derive(Parser)]
#[command(name = "wmk", version)]
struct Cli {
    /// Print more output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[allow(dead_code)]
#[derive(Subcommand)]
enum Commands {
    /// Read and write settings
    #[command(subcommand, visible_alias = "cfg")]
    Config(ConfigCommands),

    /// Manage remotes
    #[command(subcommand)]
    Remote(RemoteCommands),

    /// Internal diagnostics
    #[command(hide = true)]
    Debug,
}

#[allow(dead_code)]
#[derive(Subcommand)]
enum ConfigCommands {
    /// Print one setting
    Get(KeyArgs),
    /// Change one setting
    Set(SetArgs),
    /// Print every setting
    List,
}

#[allow(dead_code)]
#[derive(Subcommand)]
enum RemoteCommands {
    /// Register a remote
    Add(AddArgs),
    /// Forget a remote
    Remove(NameArgs),
}

#[derive(Args)]
struct KeyArgs {
    /// Setting name
    key: String,
}

#[derive(Args)]
struct SetArgs {
    /// Setting name
    key: String,
    /// New value
    value: String,
}

#[derive(Args)]
struct AddArgs {
    /// Remote name
    name: String,
    /// Remote url (http or https)
    url: String,
}

#[derive(Args)]
struct NameArgs {
    /// Remote name
    name: String,
}

fn defaults() -> BTreeMap<&'static str, &'static str> {
    BTreeMap::from([("color", "auto"), ("editor", "vi"), ("pager", "less")])
}

fn config_get(key: &str) -> HandlerResult {
    match defaults().get(key) {
        Some(value) => Ok(format!("{key} = {value}")),
        None => Err(anyhow!("unknown setting '{key}'").into()),
    }
}

fn config_list() -> HandlerResult {
    let lines: Vec<String> = defaults()
        .iter()
        .map(|(key, value)| format!("{key} = {value}"))
        .collect();
    Ok(lines.join("\n"))
}

fn remote_add(args: &AddArgs) -> anyhow::Result<String> {
    if !(args.url.starts_with("http://") || args.url.starts_with("https://")) {
        bail!("'{}' is not an http(s) url", args.url);
    }
    Ok(format!("added {} -> {}", args.name, args.url))
}

/// Lists every command, hidden ones included, by asking for hidden help on
/// the root.
fn debug(ctx: &CommandContext) -> HandlerResult {
    let mut help = HelpCommand::for_path(Vec::new(), Visibility::Hidden, None);
    match help.run(ctx)? {}
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_env("WAYMARK_LOG"))
        .with_writer(std::io::stderr)
        .init();

    let mut app = App::builder()
        .command("config.get", |m, _ctx| {
            let args = KeyArgs::from_arg_matches(m)?;
            config_get(&args.key)
        })
        .command("config.set", |m, _ctx| {
            let args = SetArgs::from_arg_matches(m)?;
            if !defaults().contains_key(args.key.as_str()) {
                return Err(anyhow!("unknown setting '{}'", args.key).into());
            }
            Ok(format!("{} = {} (not persisted)", args.key, args.value))
        })
        .command("config.list", |_m, _ctx| config_list())
        .command("remote.add", |m, _ctx| {
            let args = AddArgs::from_arg_matches(m)?;
            Ok(remote_add(&args)?)
        })
        .command("remote.remove", |m, _ctx| {
            let args = NameArgs::from_arg_matches(m)?;
            Err(anyhow!("no remote named '{}'", args.name).into())
        })
        .command("debug", |_m, ctx| debug(ctx))
        .build();

    std::process::exit(app.run(Cli::command()));
}
