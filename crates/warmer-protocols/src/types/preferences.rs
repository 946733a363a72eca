//! User style preferences.

use serde::{Deserialize, Serialize};

/// Which strategy supplies the personal style instruction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToneMethod {
    /// The user described their style in words.
    #[default]
    Manual,
    /// The style comes from an analysis of uploaded writing samples.
    Upload,
}

impl ToneMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Manual => "manual",
            Self::Upload => "upload",
        }
    }
}

impl std::str::FromStr for ToneMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "manual" => Ok(Self::Manual),
            "upload" => Ok(Self::Upload),
            other => Err(format!("unknown tone method: {other}")),
        }
    }
}

/// A previously computed description of a writing sample's tone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleAnalysis {
    /// Milliseconds since the Unix epoch when the analysis was produced.
    pub timestamp: i64,
    /// Style description, usable verbatim as an instruction.
    pub analysis: String,
    /// Names of the samples the analysis was computed from, in upload order.
    #[serde(default)]
    pub source_files: Vec<String>,
}

impl StyleAnalysis {
    pub fn new(analysis: impl Into<String>, source_files: Vec<String>) -> Self {
        Self {
            timestamp: chrono::Utc::now().timestamp_millis(),
            analysis: analysis.into(),
            source_files,
        }
    }
}

/// Stored user preferences.
///
/// Exactly one of `writing_style` and `style_analysis.analysis` is
/// authoritative, selected by `tone_method`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Preferences {
    pub tone_method: ToneMethod,
    pub writing_style: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style_analysis: Option<StyleAnalysis>,
    pub enable_emoji: bool,
    /// Comma separated list of words the reply must avoid.
    pub banned_words: String,
}

impl Preferences {
    /// Create manual-tone preferences.
    pub fn manual(writing_style: impl Into<String>) -> Self {
        Self {
            tone_method: ToneMethod::Manual,
            writing_style: writing_style.into(),
            ..Default::default()
        }
    }

    /// Create upload-tone preferences backed by an analysis.
    pub fn upload(analysis: StyleAnalysis) -> Self {
        Self {
            tone_method: ToneMethod::Upload,
            style_analysis: Some(analysis),
            ..Default::default()
        }
    }

    pub fn with_emoji(mut self, enable: bool) -> Self {
        self.enable_emoji = enable;
        self
    }

    pub fn with_banned_words(mut self, banned_words: impl Into<String>) -> Self {
        self.banned_words = banned_words.into();
        self
    }

    /// The style instruction selected by `tone_method`, if usable.
    ///
    /// Blank values count as unset. The two sources are never mixed.
    pub fn resolved_style(&self) -> Option<&str> {
        let style = match self.tone_method {
            ToneMethod::Upload => self.style_analysis.as_ref().map(|a| a.analysis.as_str()),
            ToneMethod::Manual => Some(self.writing_style.as_str()),
        };
        style.filter(|s| !s.trim().is_empty())
    }

    pub fn has_tone(&self) -> bool {
        self.resolved_style().is_some()
    }
}

#[cfg(test)]
#[path = "preferences_tests.rs"]
mod tests;
