//! Settings, key and config subcommand handlers.

use std::io::{BufRead, Write};
use std::path::Path;

use warmer_config::{Config, ConfigLoader, ConfigValidator};
use warmer_core::SetupStatus;
use warmer_protocols::{GenerationError, Preferences, ToneMethod};

use crate::app::App;
use crate::cli::{ConfigAction, KeyAction, SettingsAction};

type CmdResult = Result<(), Box<dyn std::error::Error>>;

fn user_error(e: GenerationError) -> Box<dyn std::error::Error> {
    e.user_message().into()
}

/// Handle key subcommands.
pub(crate) async fn handle_key_command(app: &App, action: KeyAction) -> CmdResult {
    match action {
        KeyAction::Set { key } => {
            app.settings().save_credential(&key).await.map_err(user_error)?;
            println!("API key saved.");
            Ok(())
        }
    }
}

/// Handle settings subcommands.
pub(crate) async fn handle_settings_command(app: &App, action: SettingsAction) -> CmdResult {
    match action {
        SettingsAction::Show { format } => settings_show(app, &format).await,
        SettingsAction::Set {
            style,
            tone,
            emoji,
            banned_words,
        } => settings_set(app, style, tone, emoji, banned_words).await,
    }
}

fn render_preferences(preferences: &Preferences) -> String {
    let mut lines = vec![
        format!("Tone method:   {}", preferences.tone_method.as_str()),
        format!(
            "Writing style: {}",
            if preferences.writing_style.is_empty() {
                "-"
            } else {
                preferences.writing_style.as_str()
            }
        ),
        format!("Emoji:         {}", if preferences.enable_emoji { "on" } else { "off" }),
        format!(
            "Banned words:  {}",
            if preferences.banned_words.trim().is_empty() {
                "-"
            } else {
                preferences.banned_words.as_str()
            }
        ),
    ];

    match &preferences.style_analysis {
        Some(analysis) => {
            lines.push(format!("Samples:       {}", analysis.source_files.join(", ")));
            lines.push(format!("Analysis:      {}", analysis.analysis));
        }
        None => lines.push("Analysis:      -".to_string()),
    }

    lines.join("\n")
}

async fn settings_show(app: &App, format: &str) -> CmdResult {
    let preferences = app.settings().preferences().await.map_err(user_error)?;
    match format {
        "json" => println!("{}", serde_json::to_string_pretty(&preferences)?),
        _ => println!("{}", render_preferences(&preferences)),
    }
    Ok(())
}

fn apply_changes(
    mut preferences: Preferences,
    style: Option<String>,
    tone: Option<String>,
    emoji: Option<bool>,
    banned_words: Option<String>,
) -> Result<Preferences, String> {
    if let Some(style) = style {
        preferences.writing_style = style;
    }
    if let Some(tone) = tone {
        preferences.tone_method = tone.parse::<ToneMethod>()?;
    }
    if let Some(emoji) = emoji {
        preferences.enable_emoji = emoji;
    }
    if let Some(banned_words) = banned_words {
        preferences.banned_words = banned_words;
    }
    Ok(preferences)
}

async fn settings_set(
    app: &App,
    style: Option<String>,
    tone: Option<String>,
    emoji: Option<bool>,
    banned_words: Option<String>,
) -> CmdResult {
    let settings = app.settings();
    let current = settings.preferences().await.map_err(user_error)?;
    let updated = apply_changes(current, style, tone, emoji, banned_words)?;

    settings
        .save_preferences(updated)
        .await
        .map_err(user_error)?;
    println!("Settings saved successfully!");
    Ok(())
}

/// Drop one sample from the stored analysis.
pub(crate) async fn remove_sample(app: &App, name: &str) -> CmdResult {
    let preferences = app
        .settings()
        .remove_source_file(name)
        .await
        .map_err(user_error)?;

    match &preferences.style_analysis {
        Some(analysis) => println!("Remaining samples: {}", analysis.source_files.join(", ")),
        None => println!("No samples left; the style analysis was cleared."),
    }
    Ok(())
}

fn render_status(status: &SetupStatus) -> String {
    let mark = |done: bool| if done { "x" } else { " " };
    let next = match status.next_step() {
        Some(step) => format!("Next: {step}"),
        None => "Ready to generate replies.".to_string(),
    };
    format!(
        "[{}] API key\n[{}] Personal tone\n\n{next}",
        mark(status.has_credential),
        mark(status.has_tone)
    )
}

/// Print the onboarding state.
pub(crate) async fn status(app: &App, format: &str) -> CmdResult {
    let status = app.settings().status().await.map_err(user_error)?;
    match format {
        "json" => println!("{}", serde_json::to_string_pretty(&status)?),
        _ => println!("{}", render_status(&status)),
    }
    Ok(())
}

fn confirm(prompt: &str) -> std::io::Result<bool> {
    print!("{prompt} [y/N] ");
    std::io::stdout().flush()?;

    let mut answer = String::new();
    std::io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(answer.trim(), "y" | "Y" | "yes"))
}

/// Remove the API key and preferences.
pub(crate) async fn reset(app: &App, yes: bool) -> CmdResult {
    if !yes && !confirm("This removes your API key and all settings. Continue?")? {
        println!("Aborted.");
        return Ok(());
    }
    app.settings().reset().await.map_err(user_error)?;
    println!("Settings reset.");
    Ok(())
}

/// Handle config subcommands.
pub(crate) fn handle_config_command(action: ConfigAction, path: &Path, config: &Config) -> CmdResult {
    match action {
        ConfigAction::Init => {
            if ConfigLoader::write_default(path)? {
                println!("Wrote default configuration to {}", path.display());
            } else {
                println!("Configuration already exists at {}", path.display());
            }
            Ok(())
        }
        ConfigAction::Check => {
            let result = ConfigValidator::validate(config);
            for warning in &result.warnings {
                println!("warning: {}: {}", warning.path, warning.message);
            }
            for error in &result.errors {
                println!("error: {}: {}", error.path, error.message);
            }
            if result.is_valid() {
                println!("Configuration OK ({})", path.display());
                Ok(())
            } else {
                Err(format!("{} configuration error(s)", result.errors.len()).into())
            }
        }
    }
}
