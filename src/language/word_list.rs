use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::TextError;

/// External word lists keyed by language, e.g. `{"english": ["car", "sky"]}`
#[derive(Deserialize, Clone, Debug, Default)]
#[serde(transparent)]
pub struct WordList {
    languages: HashMap<String, Vec<String>>,
}

impl WordList {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, TextError> {
        let path = path.as_ref();
        let bytes = fs::read(path).map_err(|source| TextError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_slice(&bytes).map_err(|source| TextError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Words for `language`. Entries are split on whitespace, so `"ice cream"` yields two words.
    pub fn words_for(&self, language: &str) -> Result<Vec<String>, TextError> {
        let words: Vec<String> = self
            .languages
            .get(language)
            .ok_or_else(|| TextError::UnknownLanguage(language.to_string()))?
            .iter()
            .flat_map(|w| w.split_whitespace().map(str::to_string))
            .collect();

        if words.is_empty() {
            return Err(TextError::EmptyWordList(language.to_string()));
        }
        Ok(words)
    }

    /// Language names in the file, sorted
    pub fn languages(&self) -> Vec<String> {
        let mut names: Vec<String> = self.languages.keys().cloned().collect();
        names.sort();
        names
    }
}
