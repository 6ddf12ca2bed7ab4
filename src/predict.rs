//! Disease prediction from a symptom list.
//!
//! The classifier is a collaborator behind [`SymptomClassifier`]. The
//! bundled implementation scores disease profiles loaded from a JSON
//! artifact:
//!
//! ```json
//! {"diseases": [{"label": "Common Cold", "symptoms": ["cough", "runny_nose"]}]}
//! ```

use serde::Deserialize;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::warn;

#[derive(Debug, Error)]
pub enum ClassifierError {
    #[error("Model not available - {0}")]
    Unavailable(String),
    #[error("cannot read classifier artifact {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid classifier artifact {path}: {source}")]
    Format {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("classifier artifact {0} has no disease profiles")]
    Empty(PathBuf),
    #[error("none of the given symptoms are known to the model")]
    NoKnownSymptoms,
}

pub trait SymptomClassifier: Send + Sync {
    fn predict(&self, symptoms: &[String]) -> Result<String, ClassifierError>;
}

/// Stand-in when no artifact could be loaded.
pub struct UnavailableClassifier {
    reason: String,
}

impl UnavailableClassifier {
    pub fn new(reason: impl Into<String>) -> Self {
        Self { reason: reason.into() }
    }
}

impl SymptomClassifier for UnavailableClassifier {
    fn predict(&self, _symptoms: &[String]) -> Result<String, ClassifierError> {
        Err(ClassifierError::Unavailable(self.reason.clone()))
    }
}

#[derive(Debug, Clone, Deserialize)]
struct Artifact {
    diseases: Vec<DiseaseProfile>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DiseaseProfile {
    pub label: String,
    pub symptoms: Vec<String>,
}

/// Picks the disease whose profile best covers the reported symptoms.
pub struct ProfileClassifier {
    profiles: Vec<DiseaseProfile>,
    vocabulary: HashSet<String>,
}

impl ProfileClassifier {
    pub fn from_profiles(profiles: Vec<DiseaseProfile>) -> Self {
        let vocabulary = profiles
            .iter()
            .flat_map(|p| p.symptoms.iter().cloned())
            .collect();
        Self { profiles, vocabulary }
    }

    /// Load a JSON artifact from disk.
    pub fn open(path: &Path) -> Result<Self, ClassifierError> {
        let data = fs::read_to_string(path).map_err(|source| ClassifierError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let artifact: Artifact = serde_json::from_str(&data).map_err(|source| ClassifierError::Format {
            path: path.to_path_buf(),
            source,
        })?;
        if artifact.diseases.is_empty() {
            return Err(ClassifierError::Empty(path.to_path_buf()));
        }
        Ok(Self::from_profiles(artifact.diseases))
    }
}

impl SymptomClassifier for ProfileClassifier {
    fn predict(&self, symptoms: &[String]) -> Result<String, ClassifierError> {
        let mut present = HashSet::new();
        for s in symptoms {
            let s = s.trim();
            if self.vocabulary.contains(s) {
                present.insert(s);
            } else {
                warn!(symptom = s, "symptom not in model vocabulary, ignored");
            }
        }

        if present.is_empty() {
            return Err(ClassifierError::NoKnownSymptoms);
        }

        let mut best: Option<(&DiseaseProfile, f64)> = None;
        for profile in &self.profiles {
            if profile.symptoms.is_empty() {
                continue;
            }
            let matched = profile.symptoms.iter().filter(|s| present.contains(s.as_str())).count();
            let score = matched as f64 / profile.symptoms.len() as f64;
            // strict > keeps the earlier profile on ties
            if best.map_or(true, |(_, b)| score > b) {
                best = Some((profile, score));
            }
        }

        best.map(|(p, _)| p.label.clone())
            .ok_or(ClassifierError::NoKnownSymptoms)
    }
}
