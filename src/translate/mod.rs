//! Medical phrase translation.
//!
//! A phrasebook covers the common clinical phrases; anything else goes to
//! remote translators, with a fixed hint message as the last resort.

pub mod dictionary;
pub mod providers;
pub mod resolver;
pub mod types;

pub use dictionary::PhraseDictionary;
pub use resolver::{TranslationResolver, TranslationStrategy};
pub use types::{Attempt, Translation, TranslationQuery, TranslationSource};
