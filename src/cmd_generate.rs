//! Generation subcommand handlers.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::info;

use warmer_core::{
    BackgroundService, ContentContext, PopupContext, WritingSample, MAX_SAMPLE_BYTES,
};
use warmer_protocols::{ContextKind, GenerationError, GenerationResult};

use crate::app::App;
use crate::surface::TerminalSurface;

/// Turn a failed result into the command's error.
fn finish(result: GenerationResult) -> Result<(), Box<dyn std::error::Error>> {
    match result {
        GenerationResult::Success { .. } => Ok(()),
        GenerationResult::Failure {
            error_kind,
            message,
        } => Err(format!("{message} ({error_kind})").into()),
    }
}

/// Popup flow: request a reply from the background context and print it.
pub(crate) async fn generate(app: &App, text: &str) -> Result<(), Box<dyn std::error::Error>> {
    let relay = app.relay();
    let background = Arc::new(BackgroundService::new(relay.clone(), app.generator()));
    tokio::spawn(background.serve(relay.register(ContextKind::Background)));

    let mut popup = PopupContext::new(
        relay.register(ContextKind::Popup),
        Arc::new(TerminalSurface),
    );
    let result = popup.generate(text).await;
    if let Some(reply) = result.text() {
        println!("{reply}");
    }
    finish(result)
}

/// Context-menu flow: the background context pushes notifications and the
/// reply to the content context, which renders them on the terminal.
pub(crate) async fn select(app: &App, text: &str) -> Result<(), Box<dyn std::error::Error>> {
    let relay = app.relay();
    let mut content = ContentContext::new(
        relay.register(ContextKind::Content),
        Arc::new(TerminalSurface),
    );

    let background = BackgroundService::new(relay.clone(), app.generator());
    let result = background.on_selection(text).await;
    content.until_settled().await;

    finish(result)
}

fn sample_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

async fn read_sample(path: &Path) -> Result<WritingSample, Box<dyn std::error::Error>> {
    let name = sample_name(path);
    let size = tokio::fs::metadata(path).await?.len();
    if size > MAX_SAMPLE_BYTES as u64 {
        return Err(format!("{name}: File size must be less than 1MB").into());
    }
    let content = tokio::fs::read_to_string(path).await?;
    Ok(WritingSample::new(name, content))
}

/// Analyze writing samples and store the result as the active tone.
pub(crate) async fn analyze(
    app: &App,
    files: &[PathBuf],
) -> Result<(), Box<dyn std::error::Error>> {
    let mut samples = Vec::with_capacity(files.len());
    for path in files {
        samples.push(read_sample(path).await?);
    }

    let analysis = app
        .analyzer()
        .analyze(&samples)
        .await
        .map_err(|e: GenerationError| e.analysis_message())?;

    info!(files = analysis.source_files.len(), "Style analysis complete");
    println!("Writing style analysis:");
    println!("{}", analysis.analysis);
    println!();
    println!("Tone method switched to upload.");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_name_uses_file_name() {
        assert_eq!(sample_name(Path::new("/tmp/posts/linkedin.txt")), "linkedin.txt");
    }

    #[test]
    fn test_finish_failure_is_error() {
        let result = GenerationResult::failure(
            warmer_protocols::ErrorKind::Auth,
            "Invalid API key. Please check your API key in settings",
        );
        let err = finish(result).unwrap_err();
        assert!(err.to_string().contains("Invalid API key"));
        assert!(err.to_string().contains("auth"));
    }

    #[tokio::test]
    async fn test_read_sample_rejects_large_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("big.txt");
        std::fs::write(&path, vec![b'a'; MAX_SAMPLE_BYTES + 1]).unwrap();

        let err = read_sample(&path).await.unwrap_err();
        assert!(err.to_string().contains("big.txt"));
    }

    #[tokio::test]
    async fn test_analyze_failure_has_analysis_message() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("post.txt");
        std::fs::write(&path, "Shipped it.").unwrap();

        let client = warmer_provider_openai::OpenAIClient::with_url(
            "http://127.0.0.1:1/v1/chat/completions",
        )
        .with_timeout(std::time::Duration::from_secs(2));
        let app = App::with_parts(
            warmer_config::Config::default(),
            Arc::new(warmer_core::MemorySettingsStore::new()),
            Arc::new(client),
        );
        app.settings().save_credential("sk-test").await.unwrap();

        let err = analyze(&app, &[path]).await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "Failed to analyze writing style. Please try again"
        );
    }

    #[tokio::test]
    async fn test_read_sample() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("post.txt");
        std::fs::write(&path, "Shipped it.").unwrap();

        let sample = read_sample(&path).await.unwrap();
        assert_eq!(sample, WritingSample::new("post.txt", "Shipped it."));
    }
}
