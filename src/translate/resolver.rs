//! Translation resolver: orchestrates the fallback chain.
//!
//! Identity → phrase dictionary → LibreTranslate → Google → fixed message
//!
//! Earlier steps always win; a failed step is never retried.

use super::dictionary::PhraseDictionary;
use super::providers;
use super::types::{Attempt, Translation, TranslationQuery, TranslationSource};
use crate::config::TranslationConfig;
use crate::remote::ProviderClient;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// One step of the cascade.
pub trait TranslationStrategy: Send + Sync {
    fn source(&self) -> TranslationSource;
    fn attempt(&self, query: &TranslationQuery) -> Attempt;
}

/// Same language on both sides: echo the text.
pub struct Identity;

impl TranslationStrategy for Identity {
    fn source(&self) -> TranslationSource {
        TranslationSource::Identity
    }

    fn attempt(&self, query: &TranslationQuery) -> Attempt {
        if query.source_lang == query.target_lang {
            Attempt::Translated(query.text.clone())
        } else {
            Attempt::NoResult
        }
    }
}

/// Zero-latency lookup in the phrasebook.
pub struct DictionaryLookup {
    dictionary: PhraseDictionary,
}

impl DictionaryLookup {
    pub fn new(dictionary: PhraseDictionary) -> Self {
        Self { dictionary }
    }
}

impl TranslationStrategy for DictionaryLookup {
    fn source(&self) -> TranslationSource {
        TranslationSource::Dictionary
    }

    fn attempt(&self, query: &TranslationQuery) -> Attempt {
        match self.dictionary.lookup(&query.source_lang, &query.target_lang, &query.text) {
            Some(t) => Attempt::Translated(t.to_string()),
            None => Attempt::NoResult,
        }
    }
}

/// Which remote API a [`RemoteTranslator`] speaks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoteApi {
    LibreTranslate,
    Google,
}

/// A remote translator. Every failure collapses into `NoResult`.
pub struct RemoteTranslator {
    api: RemoteApi,
    client: Arc<dyn ProviderClient>,
    url: String,
    timeout: Duration,
}

impl RemoteTranslator {
    pub fn new(api: RemoteApi, client: Arc<dyn ProviderClient>, url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            api,
            client,
            url: url.into(),
            timeout,
        }
    }
}

impl TranslationStrategy for RemoteTranslator {
    fn source(&self) -> TranslationSource {
        match self.api {
            RemoteApi::LibreTranslate => TranslationSource::LibreTranslate,
            RemoteApi::Google => TranslationSource::Google,
        }
    }

    fn attempt(&self, query: &TranslationQuery) -> Attempt {
        let client = self.client.as_ref();
        let result = match self.api {
            RemoteApi::LibreTranslate => providers::libretranslate(client, &self.url, query, self.timeout),
            RemoteApi::Google => providers::google(client, &self.url, query, self.timeout),
        };

        match result {
            Ok(text) => {
                let attempt = Attempt::from_text(text);
                if attempt == Attempt::NoResult {
                    debug!(provider = %self.source(), "provider returned no text");
                }
                attempt
            }
            Err(e) => {
                warn!(provider = %self.source(), error = %e, "translation provider failed");
                Attempt::NoResult
            }
        }
    }
}

/// Runs the strategies in order and returns the first usable answer.
pub struct TranslationResolver {
    strategies: Vec<Box<dyn TranslationStrategy>>,
}

impl TranslationResolver {
    /// The standard chain: identity, dictionary, LibreTranslate, Google.
    pub fn new(client: Arc<dyn ProviderClient>, dictionary: PhraseDictionary, config: &TranslationConfig) -> Self {
        let timeout = Duration::from_secs(config.timeout_secs);
        let strategies: Vec<Box<dyn TranslationStrategy>> = vec![
            Box::new(Identity),
            Box::new(DictionaryLookup::new(dictionary)),
            Box::new(RemoteTranslator::new(
                RemoteApi::LibreTranslate,
                client.clone(),
                config.libretranslate_url.as_str(),
                timeout,
            )),
            Box::new(RemoteTranslator::new(RemoteApi::Google, client, config.google_url.as_str(), timeout)),
        ];
        Self::with_strategies(strategies)
    }

    /// A custom chain (for testing or offline deployments).
    pub fn with_strategies(strategies: Vec<Box<dyn TranslationStrategy>>) -> Self {
        Self { strategies }
    }

    /// Best-effort translation. Never fails.
    pub fn translate(&self, query: &TranslationQuery) -> String {
        self.resolve(query).text
    }

    /// Like [`translate`](Self::translate), but also reports which step answered.
    pub fn resolve(&self, query: &TranslationQuery) -> Translation {
        debug!(chars = query.text.chars().count(), from = %query.source_lang, to = %query.target_lang, "translating");

        for strategy in &self.strategies {
            if let Attempt::Translated(text) = strategy.attempt(query) {
                let source = strategy.source();
                info!(%source, from = %query.source_lang, to = %query.target_lang, "translation resolved");
                return Translation { text, source };
            }
        }

        info!(from = %query.source_lang, to = %query.target_lang, "no translation available");
        Translation {
            text: unavailable_message(&query.text),
            source: TranslationSource::Unavailable,
        }
    }
}

/// The last-resort answer when every step came up empty.
pub fn unavailable_message(text: &str) -> String {
    format!(
        "Translation not available for '{}'. Try common medical phrases like 'I have a headache' or 'Where does it hurt?'",
        text
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::remote::stub::StubClient;
    use crate::remote::CallError;
    use serde_json::json;

    const LIBRE: &str = "https://libretranslate.de";
    const GOOGLE: &str = "https://translate.googleapis.com";

    fn resolver(stub: StubClient) -> (TranslationResolver, Arc<StubClient>) {
        let stub = Arc::new(stub);
        let r = TranslationResolver::new(stub.clone(), PhraseDictionary::builtin(), &TranslationConfig::default());
        (r, stub)
    }

    #[test]
    fn test_identity_for_every_language() {
        let (r, stub) = resolver(StubClient::new());
        for lang in ["en", "es", "fr", "hi", "ta", "xx"] {
            let q = TranslationQuery::new("Where Does It Hurt?", lang, lang);
            let t = r.resolve(&q);
            assert_eq!(t.text, "Where Does It Hurt?");
            assert_eq!(t.source, TranslationSource::Identity);
        }
        assert_eq!(stub.call_count(), 0);
    }

    #[test]
    fn test_identity_keeps_empty_text() {
        let (r, _) = resolver(StubClient::new());
        assert_eq!(r.translate(&TranslationQuery::new("", "en", "en")), "");
    }

    #[test]
    fn test_dictionary_hit_makes_no_remote_calls() {
        let (r, stub) = resolver(
            StubClient::new()
                .respond(LIBRE, json!({"translatedText": "wrong"}))
                .respond(GOOGLE, json!([[["wrong", "x"]]])),
        );
        let t = r.resolve(&TranslationQuery::new("I have a headache", "en", "es"));
        assert_eq!(t.text, "tengo dolor de cabeza");
        assert_eq!(t.source, TranslationSource::Dictionary);
        assert_eq!(stub.call_count(), 0);
    }

    #[test]
    fn test_libretranslate_used_before_google() {
        let (r, stub) = resolver(
            StubClient::new()
                .respond(LIBRE, json!({"translatedText": "tengo un sarpullido"}))
                .respond(GOOGLE, json!([[["no debería usarse", "x"]]])),
        );
        let t = r.resolve(&TranslationQuery::new("I have a rash", "en", "es"));
        assert_eq!(t.text, "tengo un sarpullido");
        assert_eq!(t.source, TranslationSource::LibreTranslate);
        assert_eq!(stub.calls_to(LIBRE), 1);
        assert_eq!(stub.calls_to(GOOGLE), 0);
    }

    #[test]
    fn test_falls_through_to_google_on_failure() {
        let (r, stub) = resolver(
            StubClient::new()
                .fail(LIBRE, CallError::Timeout)
                .respond(GOOGLE, json!([[["tengo un sarpullido", "I have a rash"]], null, "en"])),
        );
        let t = r.resolve(&TranslationQuery::new("I have a rash", "en", "es"));
        assert_eq!(t.text, "tengo un sarpullido");
        assert_eq!(t.source, TranslationSource::Google);
        assert_eq!(stub.calls_to(LIBRE), 1);
        assert_eq!(stub.calls_to(GOOGLE), 1);
    }

    #[test]
    fn test_falls_through_to_google_on_empty_text() {
        let (r, _) = resolver(
            StubClient::new()
                .respond(LIBRE, json!({"translatedText": "  "}))
                .respond(GOOGLE, json!([[["hola", "hello"]]])),
        );
        let t = r.resolve(&TranslationQuery::new("hello there", "en", "es"));
        assert_eq!(t.source, TranslationSource::Google);
        assert_eq!(t.text, "hola");
    }

    #[test]
    fn test_everything_fails_returns_message() {
        let (r, stub) = resolver(
            StubClient::new()
                .fail(LIBRE, CallError::Status(503))
                .fail(GOOGLE, CallError::Connection("refused".into())),
        );
        let q = TranslationQuery::new("My ankle is swollen", "en", "es");
        let t = r.resolve(&q);
        // one call per provider, no retries
        assert_eq!(stub.call_count(), 2);
        assert_eq!(t.source, TranslationSource::Unavailable);
        assert!(!t.text.is_empty());
        assert!(t.text.contains("My ankle is swollen"));
        assert!(t.text.contains("I have a headache"));
        assert_eq!(r.translate(&q), unavailable_message("My ankle is swollen"));
        assert_eq!(stub.call_count(), 4);
    }

    #[test]
    fn test_language_codes_ignore_case() {
        let (r, stub) = resolver(StubClient::new());
        let t = r.resolve(&TranslationQuery::new("Hello", "EN", "en"));
        assert_eq!(t.source, TranslationSource::Identity);
        assert_eq!(t.text, "Hello");

        let t = r.resolve(&TranslationQuery::new("I have a cough", " En ", "ES"));
        assert_eq!(t.source, TranslationSource::Dictionary);
        assert_eq!(t.text, "tengo tos");
        assert_eq!(stub.call_count(), 0);
    }

    #[test]
    fn test_unsupported_pair_goes_remote() {
        let (r, stub) = resolver(StubClient::new().respond(LIBRE, json!({"translatedText": "hello"})));
        let t = r.resolve(&TranslationQuery::new("hola", "es", "en"));
        assert_eq!(t.source, TranslationSource::LibreTranslate);
        let call = &stub.calls()[0];
        assert_eq!(call.body.as_ref().unwrap()["source"], "es");
        assert_eq!(call.body.as_ref().unwrap()["target"], "en");
        assert_eq!(call.timeout, Duration::from_secs(10));
    }

    struct Fixed(TranslationSource, &'static str);

    impl TranslationStrategy for Fixed {
        fn source(&self) -> TranslationSource {
            self.0
        }
        fn attempt(&self, _: &TranslationQuery) -> Attempt {
            Attempt::from_text(self.1)
        }
    }

    #[test]
    fn test_custom_chain_order() {
        let chain: Vec<Box<dyn TranslationStrategy>> = vec![
            Box::new(Fixed(TranslationSource::Dictionary, "")),
            Box::new(Fixed(TranslationSource::Google, "second")),
            Box::new(Fixed(TranslationSource::LibreTranslate, "third")),
        ];
        let r = TranslationResolver::with_strategies(chain);
        let t = r.resolve(&TranslationQuery::new("x", "en", "es"));
        assert_eq!(t.text, "second");
        assert_eq!(t.source, TranslationSource::Google);
    }

    #[test]
    fn test_empty_chain_is_unavailable() {
        let r = TranslationResolver::with_strategies(Vec::new());
        let t = r.resolve(&TranslationQuery::new("x", "en", "es"));
        assert_eq!(t.source, TranslationSource::Unavailable);
    }
}
