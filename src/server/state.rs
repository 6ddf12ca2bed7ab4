use crate::config::{Config, ConfigError};
use crate::geo::GeoSearchResolver;
use crate::predict::{ProfileClassifier, SymptomClassifier, UnavailableClassifier};
use crate::remote::{HttpClient, ProviderClient};
use crate::translate::{PhraseDictionary, TranslationResolver};
use std::sync::Arc;
use tracing::{info, warn};

/// Immutable per-process state shared by all handlers.
pub struct AppState {
    pub translator: Arc<TranslationResolver>,
    pub hospitals: Arc<GeoSearchResolver>,
    pub classifier: Arc<dyn SymptomClassifier>,
}

impl AppState {
    /// Wire resolvers against the real network.
    ///
    /// A broken phrase file is fatal; a missing classifier artifact is not.
    pub fn from_config(config: &Config) -> Result<Self, ConfigError> {
        let client: Arc<dyn ProviderClient> = Arc::new(HttpClient::new(&config.user_agent));
        Self::with_client(config, client)
    }

    pub fn with_client(config: &Config, client: Arc<dyn ProviderClient>) -> Result<Self, ConfigError> {
        let dictionary = match &config.translation.phrases_path {
            Some(path) => PhraseDictionary::builtin_with_file(path)?,
            None => PhraseDictionary::builtin(),
        };
        info!(phrases = dictionary.len(), "phrase dictionary loaded");

        let classifier: Arc<dyn SymptomClassifier> = match &config.classifier.artifact_path {
            Some(path) => match ProfileClassifier::open(path) {
                Ok(c) => {
                    info!(path = %path.display(), "classifier artifact loaded");
                    Arc::new(c)
                }
                Err(e) => {
                    warn!(error = %e, "classifier unavailable");
                    Arc::new(UnavailableClassifier::new(e.to_string()))
                }
            },
            None => Arc::new(UnavailableClassifier::new("please check backend setup")),
        };

        Ok(Self {
            translator: Arc::new(TranslationResolver::new(client.clone(), dictionary, &config.translation)),
            hospitals: Arc::new(GeoSearchResolver::new(client, config.places.clone())),
            classifier,
        })
    }
}
