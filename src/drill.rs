use tracing::{debug, info};

use crate::clock::{Clock, Stopwatch};
use crate::error::SessionError;
use crate::input::{self, KeyInput};
use crate::layout::{layout, scroll_window, word_offset};
use crate::session::{collect_spans, ClassifiedSpan, SessionState};
use crate::word_store::WordStore;

/// One display line of classified text
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ViewRow {
    pub spans: Vec<ClassifiedSpan>,
}

impl ViewRow {
    pub fn text(&self) -> String {
        self.spans.iter().map(|s| s.text.as_str()).collect()
    }
}

/// Everything the renderer needs for one frame
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct View {
    pub rows: Vec<ViewRow>,
    pub wpm: u32,
    pub finished_words: usize,
    pub total_words: usize,
    pub complete: bool,
}

/// A typing practice run: the session state plus its time source
#[derive(Debug)]
pub struct Drill<C: Clock = Stopwatch> {
    state: SessionState,
    clock: C,
}

impl<C: Clock + Default> Drill<C> {
    pub fn new<I, S>(words: I) -> Result<Self, SessionError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::with_clock(words, C::default())
    }

    pub fn from_text(text: &str) -> Result<Self, SessionError> {
        Ok(Self::from_store(WordStore::from_text(text)?, C::default()))
    }

    /// Replace the whole session; the old one is discarded
    pub fn reset<I, S>(&mut self, words: I) -> Result<(), SessionError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        *self = Self::new(words)?;
        info!(target: "session", words = self.state.store().len(), "session reset");
        Ok(())
    }
}

impl<C: Clock> Drill<C> {
    pub fn with_clock<I, S>(words: I, clock: C) -> Result<Self, SessionError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Ok(Self::from_store(WordStore::new(words)?, clock))
    }

    pub fn from_store(store: WordStore, clock: C) -> Self {
        Self {
            state: SessionState::new(store),
            clock,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn clock_mut(&mut self) -> &mut C {
        &mut self.clock
    }

    pub fn wpm(&self) -> u32 {
        self.state.wpm()
    }

    pub fn is_complete(&self) -> bool {
        self.state.is_complete()
    }

    pub fn has_started(&self) -> bool {
        self.clock.is_running() || self.state.current_word_index() > 0
    }

    /// Feed one key event through the engine
    pub fn submit_event(&mut self, event: KeyInput) {
        input::handle(&mut self.state, event);

        if matches!(event, KeyInput::PrintableChar(_))
            && self.state.current_word_index() == 0
            && self.state.word().pos() == 1
            && !self.clock.is_running()
        {
            self.clock.start();
            debug!(target: "session", "started stopwatch");
        }

        self.refresh_wpm();

        if self.state.is_complete() && self.clock.is_running() {
            self.clock.stop();
            info!(
                target: "session",
                wpm = self.state.wpm(),
                finished_words = self.state.finished_words(),
                "session complete"
            );
        }
    }

    /// Periodic timer callback; only refreshes derived values
    pub fn on_tick(&mut self) {
        self.refresh_wpm();
    }

    fn refresh_wpm(&mut self) {
        if self.clock.is_running() {
            self.state.recompute_wpm(self.clock.elapsed());
        }
    }

    /// Classified rows around the active word, wrapped to `display_width` columns
    pub fn current_view(&self, display_width: usize) -> View {
        let store = self.state.store();
        let rows = layout(store.iter(), display_width);

        // once complete, keep the last word in view
        let active = self
            .state
            .current_word_index()
            .min(store.len().saturating_sub(1));
        let window = scroll_window(&rows, word_offset(store.iter(), active));

        let rows = rows[window]
            .iter()
            .map(|row| {
                let last = row.words.end.saturating_sub(1);
                let chars = row.words.clone().flat_map(move |idx| {
                    self.state
                        .word_spans(idx)
                        .into_iter()
                        .chain(std::iter::once(self.state.separator_span(idx, idx == last)))
                        .flat_map(|span| {
                            let class = span.class;
                            span.text.chars().map(move |c| (c, class)).collect::<Vec<_>>()
                        })
                });
                ViewRow {
                    spans: collect_spans(chars),
                }
            })
            .collect();

        View {
            rows,
            wpm: self.state.wpm(),
            finished_words: self.state.finished_words(),
            total_words: store.len(),
            complete: self.state.is_complete(),
        }
    }
}
