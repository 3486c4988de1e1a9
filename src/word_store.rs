use crate::error::SessionError;

/// The immutable sequence of words the user has to type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordStore {
    words: Vec<Vec<char>>,
}

impl WordStore {
    /// Build a store from already separated words.
    ///
    /// Rejects an empty sequence and any empty word, so every later lookup by a valid
    /// index yields at least one character.
    pub fn new<I, S>(words: I) -> Result<Self, SessionError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let words = words
            .into_iter()
            .enumerate()
            .map(|(idx, w)| {
                let chars: Vec<char> = w.as_ref().chars().collect();
                if chars.is_empty() {
                    Err(SessionError::EmptyWord(idx))
                } else {
                    Ok(chars)
                }
            })
            .collect::<Result<Vec<_>, _>>()?;

        if words.is_empty() {
            return Err(SessionError::NoWords);
        }

        Ok(Self { words })
    }

    /// Split a practice string on whitespace
    pub fn from_text(text: &str) -> Result<Self, SessionError> {
        Self::new(text.split_whitespace())
    }

    pub fn get(&self, idx: usize) -> Option<&[char]> {
        self.words.get(idx).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &[char]> {
        self.words.iter().map(Vec::as_slice)
    }

    pub fn to_strings(&self) -> Vec<String> {
        self.words.iter().map(|w| w.iter().collect()).collect()
    }
}
