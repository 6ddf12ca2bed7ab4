//! Core types for the translation cascade.

use std::fmt;

/// One translation request. Language codes are trimmed and lower-cased.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationQuery {
    pub text: String,
    /// ISO-639-1 code, e.g. "en".
    pub source_lang: String,
    pub target_lang: String,
}

impl TranslationQuery {
    pub fn new(text: impl Into<String>, source_lang: impl Into<String>, target_lang: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            source_lang: normalize_lang(&source_lang.into()),
            target_lang: normalize_lang(&target_lang.into()),
        }
    }
}

fn normalize_lang(code: &str) -> String {
    code.trim().to_lowercase()
}

/// Which cascade step produced the answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TranslationSource {
    Identity,
    Dictionary,
    LibreTranslate,
    Google,
    Unavailable,
}

impl fmt::Display for TranslationSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Identity => write!(f, "Identity"),
            Self::Dictionary => write!(f, "Dictionary"),
            Self::LibreTranslate => write!(f, "LibreTranslate"),
            Self::Google => write!(f, "Google"),
            Self::Unavailable => write!(f, "Unavailable"),
        }
    }
}

/// Outcome of a single strategy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Attempt {
    Translated(String),
    NoResult,
}

impl Attempt {
    /// Blank text counts as no result.
    pub fn from_text(text: impl Into<String>) -> Self {
        let text = text.into();
        if text.trim().is_empty() {
            Self::NoResult
        } else {
            Self::Translated(text)
        }
    }
}

/// Final answer with provenance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Translation {
    pub text: String,
    pub source: TranslationSource,
}
