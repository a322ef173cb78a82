use std::ffi::OsString;
use std::io::IsTerminal;
use std::path::PathBuf;

use anyhow::anyhow;
use board_shared::{TaskPriority, TaskStatus};
use clap::{ArgAction, Args, Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone)]
pub struct PreprocessedArgs {
    pub cleaned_args: Vec<OsString>,
    pub rc_overrides: Vec<(String, String)>,
}

#[derive(Debug, Clone)]
pub struct KeyVal {
    pub key: String,
    pub value: String,
}

impl std::str::FromStr for KeyVal {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (k, v) = s
            .split_once('=')
            .ok_or_else(|| anyhow!("expected KEY=VALUE, got: {s}"))?;
        Ok(Self {
            key: k.trim().to_string(),
            value: v.trim().to_string(),
        })
    }
}

fn parse_status(raw: &str) -> Result<TaskStatus, String> {
    TaskStatus::parse(raw)
        .ok_or_else(|| format!("unknown status '{raw}' (expected todo, in_progress or done)"))
}

fn parse_priority(raw: &str) -> Result<TaskPriority, String> {
    TaskPriority::parse(raw)
        .ok_or_else(|| format!("unknown priority '{raw}' (expected high, medium or low)"))
}

#[derive(Parser, Debug, Clone)]
#[command(
    name = "board",
    version,
    about = "Command line client for the task board",
    disable_help_subcommand = true
)]
pub struct GlobalCli {
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[arg(short = 'q', long = "quiet", action = ArgAction::Count, global = true)]
    pub quiet: u8,

    #[arg(
        long = "rc",
        value_parser = clap::builder::ValueParser::new(|s: &str| s.parse::<KeyVal>()),
        action = ArgAction::Append,
        global = true
    )]
    pub rc_overrides: Vec<KeyVal>,

    #[arg(long = "boardrc", global = true)]
    pub boardrc: Option<PathBuf>,

    /// Board server base URL; wins over `api.url`.
    #[arg(long = "api", global = true)]
    pub api: Option<String>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Show the board, optionally filtered.
    List(ListArgs),
    Stats,
    Tags,
    /// Create a todo task.
    Add(AddArgs),
    /// Change fields of an existing task.
    Edit(EditArgs),
    /// Move a task to another column.
    Move {
        id: String,
        #[arg(value_parser = parse_status)]
        status: TaskStatus,
    },
    Delete {
        id: String,
        #[arg(short = 'y', long = "yes")]
        yes: bool,
    },
    /// List archived tasks.
    Archives {
        /// Only this archive month, YYYY-MM.
        #[arg(long = "month")]
        month: Option<String>,
    },
    /// Put an archived task back on the board.
    Restore { id: String },
    /// Permanently delete an archived task.
    Purge {
        id: String,
        #[arg(short = 'y', long = "yes")]
        yes: bool,
    },
    /// Start the most urgent todo task when nothing is in progress.
    Autostart {
        #[arg(long = "dry-run")]
        dry_run: bool,
    },
    /// Warn about tasks that have been in progress too long.
    Remind {
        /// Reference time instead of the local clock.
        #[arg(long = "now")]
        now: Option<String>,
    },
    /// Write the board as a static HTML page.
    Export {
        path: PathBuf,
        #[arg(long = "no-archives")]
        no_archives: bool,
    },
    /// Print the effective configuration.
    Config,
}

#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct ListArgs {
    #[arg(long = "status", value_parser = parse_status)]
    pub status: Option<TaskStatus>,

    /// Case-insensitive match on title or description.
    #[arg(long = "query")]
    pub query: Option<String>,

    #[arg(short = 'p', long = "priority", value_parser = parse_priority)]
    pub priority: Option<TaskPriority>,

    #[arg(short = 't', long = "tag")]
    pub tag: Option<String>,
}

#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct AddArgs {
    pub title: String,

    #[arg(short = 'd', long = "description")]
    pub description: Option<String>,

    #[arg(short = 'p', long = "priority", value_parser = parse_priority)]
    pub priority: Option<TaskPriority>,

    #[arg(long = "due")]
    pub due: Option<String>,

    /// Comma separated.
    #[arg(long = "tags")]
    pub tags: Option<String>,
}

#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct EditArgs {
    pub id: String,

    #[arg(long = "title")]
    pub title: Option<String>,

    #[arg(short = 'd', long = "description")]
    pub description: Option<String>,

    #[arg(short = 'p', long = "priority", value_parser = parse_priority)]
    pub priority: Option<TaskPriority>,

    /// Empty string clears the due date.
    #[arg(long = "due")]
    pub due: Option<String>,

    /// Replaces the tag list; empty string clears it.
    #[arg(long = "tags")]
    pub tags: Option<String>,
}

pub fn init_tracing(verbose: u8, quiet: u8) -> anyhow::Result<()> {
    let default_level = if quiet >= 2 {
        "error"
    } else if quiet == 1 {
        "warn"
    } else if verbose >= 3 {
        "trace"
    } else if verbose == 2 {
        "debug"
    } else if verbose == 1 {
        "info"
    } else {
        "warn"
    };

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .map_err(|e| anyhow!("invalid RUST_LOG / log filter: {e}"))?;

    let init_result = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .with_level(true)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .try_init();

    if let Err(err) = init_result {
        debug!(error = %err, "tracing subscriber already set, continuing");
    }

    Ok(())
}

/// Pulls positional `rc.key=value` (or `rc.key:value`) overrides out of the
/// argument list before clap sees it.
#[tracing::instrument(skip_all)]
pub fn preprocess_args(raw: &[OsString]) -> anyhow::Result<PreprocessedArgs> {
    let mut cleaned = Vec::with_capacity(raw.len());
    let mut overrides: Vec<(String, String)> = Vec::new();

    let mut iter = raw.iter().cloned();
    if let Some(bin) = iter.next() {
        cleaned.push(bin);
    }

    for arg in iter {
        let s = arg.to_string_lossy();
        if let Some(rest) = s.strip_prefix("rc.") {
            let parsed = rest
                .split_once('=')
                .or_else(|| rest.split_once(':'))
                .map(|(k, v)| (format!("rc.{k}"), v.to_string()));

            if let Some((k, v)) = parsed {
                debug!(key = %k, value = %v, "captured positional rc override");
                overrides.push((k, v));
                continue;
            }
        }

        cleaned.push(arg);
    }

    Ok(PreprocessedArgs {
        cleaned_args: cleaned,
        rc_overrides: overrides,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn os(args: &[&str]) -> Vec<OsString> {
        args.iter().map(OsString::from).collect()
    }

    #[test]
    fn positional_rc_overrides_are_removed() {
        let pre = preprocess_args(&os(&[
            "board",
            "rc.api.url=http://lan:5000",
            "list",
            "rc.color:off",
        ]))
        .expect("preprocess");
        assert_eq!(pre.cleaned_args, os(&["board", "list"]));
        assert_eq!(
            pre.rc_overrides,
            vec![
                ("rc.api.url".to_string(), "http://lan:5000".to_string()),
                ("rc.color".to_string(), "off".to_string()),
            ]
        );
    }

    #[test]
    fn parses_subcommands_and_globals() {
        let cli = GlobalCli::parse_from(os(&[
            "board",
            "move",
            "42",
            "in-progress",
            "-vv",
            "--rc",
            "http.timeout_secs=3",
        ]));
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.rc_overrides[0].key, "http.timeout_secs");
        assert_eq!(
            cli.command,
            Some(Command::Move {
                id: "42".to_string(),
                status: TaskStatus::InProgress,
            })
        );
    }

    #[test]
    fn list_filters_and_bad_priority() {
        let cli = GlobalCli::parse_from(os(&["board", "list", "-p", "h", "--tag", "ops"]));
        let Some(Command::List(args)) = cli.command else {
            panic!("expected list");
        };
        assert_eq!(args.priority, Some(TaskPriority::High));
        assert_eq!(args.tag.as_deref(), Some("ops"));

        assert!(GlobalCli::try_parse_from(os(&["board", "add", "x", "-p", "urgent"])).is_err());
    }

    #[test]
    fn no_subcommand_is_allowed() {
        let cli = GlobalCli::parse_from(os(&["board"]));
        assert!(cli.command.is_none());
    }
}
