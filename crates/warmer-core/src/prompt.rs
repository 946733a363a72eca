//! Prompt construction.
//!
//! Turns the selected text and the stored preferences into a
//! [`GenerationRequest`], and renders that request into the exact prompt
//! sent to the completion service. Pure: no I/O, no clock, no randomness.

use warmer_protocols::{ChatRequest, EmojiPolicy, GenerationRequest, Preferences, ValidationError};

/// System message paired with every reply prompt.
pub const SYSTEM_PROMPT: &str =
    "You are an AI assistant that helps write engaging social media responses.";

const INSTRUCTIONS: &str = "Generate a LinkedIn comment that sounds like a real person engaging authentically. Keep it conversational, concise, and natural\u{2014}like something you'd actually type, not a corporate press release. Never summarize or restate what's in the original post. Instead, add a genuine thought, a light observation, or a relevant question to contribute to the discussion. Avoid overly formal, polished, or clich\u{e9} phrases like 'fascinating insights' or 'exciting times ahead.' Prioritize clarity over fluff, and keep the tone warm and approachable. If the post is insightful, acknowledge it without excessive enthusiasm. If relevant, add a short personal perspective, question, or light humor to make it more engaging.";

const ALLOW_EMOJI: &str = "Feel free to include appropriate emojis in your response";
const FORBID_EMOJI: &str = "Do not use any emojis in your response";
const CLOSING: &str = "Provide a natural, engaging response to this content:";

/// Split a comma-separated banned-word list.
///
/// Entries are trimmed and empty ones dropped. Order and case are kept and
/// duplicates are not removed.
pub fn parse_banned_words(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|w| !w.is_empty())
        .map(str::to_string)
        .collect()
}

/// Builds generation requests and renders prompts.
pub struct PromptBuilder;

impl PromptBuilder {
    /// Validate the input and resolve the preferences into a request.
    pub fn build(
        source_text: &str,
        preferences: &Preferences,
    ) -> Result<GenerationRequest, ValidationError> {
        if source_text.trim().is_empty() {
            return Err(ValidationError::EmptySourceText);
        }

        let style = preferences
            .resolved_style()
            .ok_or(ValidationError::MissingTone)?;

        Ok(GenerationRequest {
            source_text: source_text.to_string(),
            resolved_style: Some(style.to_string()),
            banned_words: parse_banned_words(&preferences.banned_words),
            emoji_policy: EmojiPolicy::from(preferences.enable_emoji),
        })
    }

    /// Render the request into the final prompt.
    ///
    /// Sections appear in a fixed order, each at most once, separated by a
    /// blank line.
    pub fn render(request: &GenerationRequest) -> String {
        let mut sections: Vec<String> = Vec::with_capacity(6);
        sections.push(INSTRUCTIONS.to_string());

        if let Some(style) = &request.resolved_style {
            sections.push(format!("Write in the following style: {style}"));
        }

        if !request.banned_words.is_empty() {
            sections.push(format!(
                "Do not use these words: {}",
                request.banned_words.join(", ")
            ));
        }

        sections.push(
            match request.emoji_policy {
                EmojiPolicy::Allow => ALLOW_EMOJI,
                EmojiPolicy::Forbid => FORBID_EMOJI,
            }
            .to_string(),
        );

        sections.push(format!(
            "Content to respond to:\n\"{}\"",
            request.source_text
        ));
        sections.push(CLOSING.to_string());

        sections.join("\n\n")
    }

    /// Pair the rendered prompt with the system message.
    pub fn to_chat_request(request: &GenerationRequest) -> ChatRequest {
        ChatRequest::new(SYSTEM_PROMPT, Self::render(request))
    }
}

#[cfg(test)]
#[path = "prompt_tests.rs"]
mod tests;
