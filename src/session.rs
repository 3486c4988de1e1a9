use std::collections::BTreeSet;
use std::time::Duration;

use itertools::Itertools;

use crate::word_edit::WordEditState;
use crate::word_store::WordStore;

/// Per-character verdict handed to the renderer
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Classification {
    Correct,
    Incorrect,
    /// The next character to type
    Cursor,
    /// Ghost text: target characters not reached yet, and separators
    Untyped,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClassifiedSpan {
    pub text: String,
    pub class: Classification,
}

impl ClassifiedSpan {
    pub fn new(text: impl Into<String>, class: Classification) -> Self {
        Self {
            text: text.into(),
            class,
        }
    }
}

/// Merge consecutive characters with the same verdict into spans
pub fn collect_spans<I>(chars: I) -> Vec<ClassifiedSpan>
where
    I: IntoIterator<Item = (char, Classification)>,
{
    chars
        .into_iter()
        .chunk_by(|(_, class)| *class)
        .into_iter()
        .map(|(class, run)| ClassifiedSpan::new(run.map(|(c, _)| c).collect::<String>(), class))
        .collect()
}

/// What was typed for a word the user already moved past
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FinalizedWord {
    pub text: Vec<char>,
    pub incorrect: BTreeSet<usize>,
}

impl FinalizedWord {
    pub fn spans(&self) -> Vec<ClassifiedSpan> {
        collect_spans(self.text.iter().enumerate().map(|(idx, &c)| {
            let class = if self.incorrect.contains(&idx) {
                Classification::Incorrect
            } else {
                Classification::Correct
            };
            (c, class)
        }))
    }

    pub fn is_clean(&self) -> bool {
        self.incorrect.is_empty()
    }
}

/// Everything a single practice run knows about itself.
///
/// Mutation goes through [`crate::input`]; this type only aggregates.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionState {
    store: WordStore,
    word: WordEditState,
    finalized: Vec<FinalizedWord>,
    current_word_index: usize,
    finished_words: usize,
    wpm: u32,
}

impl SessionState {
    pub fn new(store: WordStore) -> Self {
        let word = store.get(0).map(WordEditState::new).unwrap_or_default();
        Self {
            store,
            word,
            finalized: Vec::new(),
            current_word_index: 0,
            finished_words: 0,
            wpm: 0,
        }
    }

    pub fn store(&self) -> &WordStore {
        &self.store
    }

    pub fn word(&self) -> &WordEditState {
        &self.word
    }

    pub(crate) fn word_mut(&mut self) -> &mut WordEditState {
        &mut self.word
    }

    /// Target of the active word, `None` once the session is complete
    pub fn target(&self) -> Option<&[char]> {
        self.store.get(self.current_word_index)
    }

    pub fn finalized(&self) -> &[FinalizedWord] {
        &self.finalized
    }

    pub fn current_word_index(&self) -> usize {
        self.current_word_index
    }

    pub fn finished_words(&self) -> usize {
        self.finished_words
    }

    pub fn wpm(&self) -> u32 {
        self.wpm
    }

    pub fn is_complete(&self) -> bool {
        self.current_word_index >= self.store.len()
    }

    pub(crate) fn count_finished_word(&mut self) {
        self.finished_words += 1;
    }

    /// Freeze the active word and move on to the next target (or to completion)
    pub(crate) fn advance(&mut self) {
        let word = std::mem::take(&mut self.word);
        self.finalized.push(FinalizedWord {
            text: word.buffer().to_vec(),
            incorrect: word.incorrect_positions().clone(),
        });
        self.current_word_index += 1;
        self.word = self.target().map(WordEditState::new).unwrap_or_default();
    }

    /// Words per minute from finished words and the elapsed time reading
    pub fn recompute_wpm(&mut self, elapsed: Duration) {
        let minutes = elapsed.as_secs_f64() / 60.0;
        if minutes > 0.0 {
            self.wpm = (self.finished_words as f64 / minutes).floor() as u32;
        }
    }

    /// Classified characters of the word at `idx`, whatever its stage
    pub fn word_spans(&self, idx: usize) -> Vec<ClassifiedSpan> {
        if let Some(done) = self.finalized.get(idx) {
            return done.spans();
        }
        let Some(target) = self.store.get(idx) else {
            return Vec::new();
        };
        if idx > self.current_word_index {
            return vec![ClassifiedSpan::new(
                target.iter().collect::<String>(),
                Classification::Untyped,
            )];
        }

        let word = &self.word;
        let typed = word.typed().iter().enumerate().map(|(i, &c)| {
            let class = if word.incorrect_positions().contains(&i) {
                Classification::Incorrect
            } else {
                Classification::Correct
            };
            (c, class)
        });
        let ghost = target
            .iter()
            .enumerate()
            .skip(word.pos())
            .map(|(i, &c)| {
                let class = if i == word.pos() {
                    Classification::Cursor
                } else {
                    Classification::Untyped
                };
                (c, class)
            });
        collect_spans(typed.chain(ghost))
    }

    /// The separator that follows the word at `idx`.
    /// Carries the cursor when the active word is typed to (or past) its end, unless the
    /// word closes its row.
    pub fn separator_span(&self, idx: usize, row_end: bool) -> ClassifiedSpan {
        let cursor_here = !row_end
            && idx == self.current_word_index
            && self
                .target()
                .is_some_and(|target| self.word.pos() >= target.len());
        let class = if cursor_here {
            Classification::Cursor
        } else {
            Classification::Untyped
        };
        ClassifiedSpan::new(" ", class)
    }
}
