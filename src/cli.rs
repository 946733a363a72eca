//! CLI definitions for Slightly Warmer.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Slightly Warmer CLI.
#[derive(Parser)]
#[command(name = "warmer")]
#[command(about = "Generate social media replies in your own tone")]
#[command(version)]
pub(crate) struct Cli {
    /// Configuration file path (default: ~/.warmer/config.toml)
    #[arg(short, long, global = true, env = "WARMER_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    #[command(flatten)]
    Store(StoreCommand),

    /// Configuration file commands
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Commands that work against the settings store.
#[derive(Subcommand)]
pub(crate) enum StoreCommand {
    /// Generate a reply through the popup flow
    Generate {
        /// Text of the post to respond to
        text: String,
    },

    /// Generate a reply through the context-menu flow
    Select {
        /// Selected text of the post
        text: String,
    },

    /// Analyze writing samples and use the result as your tone
    Analyze {
        /// Text files containing your own writing
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },

    /// Drop a sample from the stored analysis
    RemoveSample {
        /// File name as listed by `warmer settings show`
        name: String,
    },

    /// API key management
    Key {
        #[command(subcommand)]
        action: KeyAction,
    },

    /// Style preferences
    Settings {
        #[command(subcommand)]
        action: SettingsAction,
    },

    /// Show which setup steps are complete
    Status {
        /// Output format (text, json)
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Remove the stored API key and preferences
    Reset {
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
pub(crate) enum KeyAction {
    /// Store the API key
    Set {
        /// OpenAI API key
        key: String,
    },
}

#[derive(Subcommand)]
pub(crate) enum SettingsAction {
    /// Print the stored preferences
    Show {
        /// Output format (text, json)
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Update preferences; unspecified fields are kept
    Set {
        /// Describe your writing style
        #[arg(long)]
        style: Option<String>,

        /// Tone source (manual, upload)
        #[arg(long)]
        tone: Option<String>,

        /// Allow emojis in replies
        #[arg(long)]
        emoji: Option<bool>,

        /// Comma-separated words to avoid
        #[arg(long)]
        banned_words: Option<String>,
    },
}

#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Write a default configuration file if none exists
    Init,

    /// Validate the configuration file
    Check,
}
