use std::path::PathBuf;

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::info;

use crate::error::TextError;
use crate::language::{Language, WordList};

/// Configuration for practice text generation
#[derive(Debug, Clone, Default)]
pub struct WordGenConfig {
    pub number_of_words: usize,
    pub language: String,
    /// External word list in `{"language": [words]}` form; embedded lists otherwise
    pub words_file: Option<PathBuf>,
    pub custom_prompt: Option<String>,
}

/// Pick `count` words uniformly at random, with replacement
pub fn generate<R: Rng + ?Sized>(words: &[String], count: usize, rng: &mut R) -> Vec<String> {
    (0..count)
        .filter_map(|_| words.choose(rng).cloned())
        .collect()
}

/// Produces the word sequence for a session
#[derive(Debug)]
pub struct WordGenerator {
    config: WordGenConfig,
}

impl WordGenerator {
    pub fn new(config: WordGenConfig) -> Self {
        Self { config }
    }

    pub fn generate_prompt(&self) -> Result<Vec<String>, TextError> {
        self.generate_prompt_with(&mut rand::thread_rng())
    }

    pub fn generate_prompt_with<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
    ) -> Result<Vec<String>, TextError> {
        if let Some(ref custom_prompt) = self.config.custom_prompt {
            return Ok(custom_prompt.split_whitespace().map(str::to_string).collect());
        }

        let source = self.source_words()?;
        let words = generate(&source, self.config.number_of_words, rng);
        info!(
            target: "text",
            language = %self.config.language,
            words = words.len(),
            "practice text generated"
        );
        Ok(words)
    }

    fn source_words(&self) -> Result<Vec<String>, TextError> {
        match self.config.words_file {
            Some(ref path) => WordList::from_path(path)?.words_for(&self.config.language),
            None => Ok(Language::new(&self.config.language)?.words),
        }
    }
}
