//! CLI argument definitions for the `quill` editor.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use quill_cli::logging::LogFormat;
use quill_model::{DraftPatch, Field};
use tracing::level_filters::LevelFilter;

#[derive(Parser)]
#[command(
    name = "quill",
    version,
    about = "Quill Studio - write and manage short blog posts",
    long_about = "Write and manage short blog posts from the terminal.\n\n\
                  Posts are written through a three-step editor (basics, content, details)\n\
                  and stored per user in a local data directory."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Allow post titles and text to appear in logs.
    #[arg(long = "log-content", global = true)]
    pub log_content: bool,

    /// Settings file to use instead of the platform default.
    #[arg(long = "settings", value_name = "PATH", global = true)]
    pub settings: Option<PathBuf>,

    /// Directory holding sessions and posts (overrides settings).
    #[arg(long = "data-dir", value_name = "DIR", global = true)]
    pub data_dir: Option<PathBuf>,

    /// Do not fetch placeholder posts from the demo API.
    #[arg(long = "offline", global = true)]
    pub offline: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Create an account and sign in.
    Register(RegisterArgs),

    /// Sign in (demo account: demo@example.com / demo123).
    Login(LoginArgs),

    /// Sign out.
    Logout,

    /// Show the signed-in user.
    Whoami,

    /// List your posts.
    List,

    /// Show one post.
    Show(PostRef),

    /// Write a new post.
    New(PostFields),

    /// Edit one of your posts.
    Edit(EditArgs),

    /// Delete one of your posts.
    Delete(DeleteArgs),

    /// Print the settings file location and effective settings.
    Config,
}

#[derive(Args)]
pub struct RegisterArgs {
    #[arg(long)]
    pub name: Option<String>,

    #[arg(long)]
    pub email: Option<String>,

    /// Password (prompted when omitted).
    #[arg(long)]
    pub password: Option<String>,
}

#[derive(Args)]
pub struct LoginArgs {
    #[arg(long)]
    pub email: Option<String>,

    /// Password (prompted when omitted).
    #[arg(long)]
    pub password: Option<String>,
}

#[derive(Args)]
pub struct PostRef {
    /// Post id as shown by `quill list`.
    #[arg(value_name = "ID")]
    pub id: String,
}

/// Field values for scripted editing. Without any of these the editor
/// prompts step by step.
#[derive(Args, Default)]
pub struct PostFields {
    #[arg(long)]
    pub title: Option<String>,

    #[arg(long)]
    pub category: Option<String>,

    #[arg(long)]
    pub description: Option<String>,

    /// Comma-separated tags.
    #[arg(long)]
    pub tags: Option<String>,

    #[arg(long = "author")]
    pub author_name: Option<String>,
}

impl PostFields {
    pub fn to_patch(&self) -> DraftPatch {
        let mut patch = DraftPatch::new();
        let values = [
            (Field::Title, &self.title),
            (Field::Category, &self.category),
            (Field::Description, &self.description),
            (Field::Tags, &self.tags),
            (Field::AuthorName, &self.author_name),
        ];
        for (field, value) in values {
            if let Some(value) = value {
                patch.set(field, value.as_str());
            }
        }
        patch
    }
}

#[derive(Args)]
pub struct EditArgs {
    #[command(flatten)]
    pub post: PostRef,

    #[command(flatten)]
    pub fields: PostFields,
}

#[derive(Args)]
pub struct DeleteArgs {
    #[command(flatten)]
    pub post: PostRef,

    /// Skip the confirmation prompt.
    #[arg(long, short = 'y')]
    pub yes: bool,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

impl From<LogLevelArg> for LevelFilter {
    fn from(level: LogLevelArg) -> Self {
        match level {
            LogLevelArg::Error => Self::ERROR,
            LogLevelArg::Warn => Self::WARN,
            LogLevelArg::Info => Self::INFO,
            LogLevelArg::Debug => Self::DEBUG,
            LogLevelArg::Trace => Self::TRACE,
        }
    }
}

impl From<LogFormatArg> for LogFormat {
    fn from(format: LogFormatArg) -> Self {
        match format {
            LogFormatArg::Pretty => Self::Pretty,
            LogFormatArg::Compact => Self::Compact,
            LogFormatArg::Json => Self::Json,
        }
    }
}
