//! Built-in phrasebook of common clinical phrases.
//!
//! Keys are normalized (trimmed, lower-cased). Operators can merge extra
//! phrases from a TOML file shaped as:
//!
//! ```toml
//! [en.es]
//! "i have a sore throat" = "me duele la garganta"
//! ```

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::config::ConfigError;

type PhraseTable = HashMap<String, String>;

const EN_ES: &[(&str, &str)] = &[
    ("hello", "hola"),
    ("i have a headache", "tengo dolor de cabeza"),
    ("i have a fever", "tengo fiebre"),
    ("i have chest pain", "tengo dolor en el pecho"),
    ("where does it hurt", "dónde duele"),
    ("take this medicine", "tome esta medicina"),
    ("twice daily", "dos veces al día"),
    ("i feel sick", "me siento enfermo"),
    ("i have nausea", "tengo náuseas"),
    ("i have a cough", "tengo tos"),
    ("i have a cold", "tengo un resfriado"),
    ("i have joint pain", "tengo dolor en las articulaciones"),
    ("i have back pain", "tengo dolor de espalda"),
    ("i have stomach pain", "tengo dolor de estómago"),
];

const EN_FR: &[(&str, &str)] = &[
    ("hello", "bonjour"),
    ("i have a headache", "j'ai mal à la tête"),
    ("i have a fever", "j'ai de la fièvre"),
    ("i have chest pain", "j'ai mal à la poitrine"),
    ("where does it hurt", "où est-ce que ça fait mal"),
    ("take this medicine", "prenez ce médicament"),
    ("twice daily", "deux fois par jour"),
    ("i feel sick", "je me sens malade"),
    ("i have nausea", "j'ai des nausées"),
    ("i have a cough", "j'ai une toux"),
];

const EN_HI: &[(&str, &str)] = &[
    ("hello", "नमस्ते"),
    ("i have a headache", "मुझे सिरदर्द है"),
    ("i have a fever", "मुझे बुखार है"),
    ("i have chest pain", "मुझे छाती में दर्द है"),
    ("where does it hurt", "कहाँ दर्द हो रहा है"),
    ("take this medicine", "यह दवा लें"),
    ("twice daily", "दिन में दो बार"),
    ("i feel sick", "मैं बीमार महसूस कर रहा हूँ"),
    ("i have nausea", "मुझे मतली आ रही है"),
    ("i have a cough", "मुझे खांसी है"),
];

/// Read-only (source, target) → phrase → translation map.
#[derive(Debug, Clone, Default)]
pub struct PhraseDictionary {
    pairs: HashMap<(String, String), PhraseTable>,
}

/// Trim and lower-case a phrase for lookup.
pub fn normalize(text: &str) -> String {
    text.trim().to_lowercase()
}

impl PhraseDictionary {
    pub fn empty() -> Self {
        Self::default()
    }

    /// The built-in English → Spanish/French/Hindi phrasebook.
    pub fn builtin() -> Self {
        let mut dict = Self::empty();
        for (target, table) in [("es", EN_ES), ("fr", EN_FR), ("hi", EN_HI)] {
            for (phrase, translation) in table {
                dict.insert("en", target, phrase, translation);
            }
        }
        dict
    }

    /// Built-in phrases plus the file at `path`; file entries win.
    pub fn builtin_with_file(path: &Path) -> Result<Self, ConfigError> {
        let mut dict = Self::builtin();
        dict.merge_file(path)?;
        Ok(dict)
    }

    pub fn insert(&mut self, source: &str, target: &str, phrase: &str, translation: &str) {
        self.pairs
            .entry((source.to_lowercase(), target.to_lowercase()))
            .or_default()
            .insert(normalize(phrase), translation.to_string());
    }

    fn merge_file(&mut self, path: &Path) -> Result<(), ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let parsed: HashMap<String, HashMap<String, PhraseTable>> =
            toml::from_str(&text).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;

        for (source, targets) in parsed {
            for (target, phrases) in targets {
                for (phrase, translation) in phrases {
                    self.insert(&source, &target, &phrase, &translation);
                }
            }
        }
        Ok(())
    }

    /// Look up `text` for a language pair. Empty entries count as missing.
    pub fn lookup(&self, source: &str, target: &str, text: &str) -> Option<&str> {
        self.pairs
            .get(&(source.to_lowercase(), target.to_lowercase()))?
            .get(&normalize(text))
            .map(String::as_str)
            .filter(|t| !t.trim().is_empty())
    }

    /// Number of phrases across all language pairs.
    pub fn len(&self) -> usize {
        self.pairs.values().map(HashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
