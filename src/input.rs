//! Key-event state machine for the active word.
//!
//! Every transition is total: events that make no sense in the current state
//! (backspace at the start of a word, space on an empty word, anything after the
//! session is complete) leave the state untouched.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::debug;

use crate::session::SessionState;

/// How many characters may be typed past the end of a target word.
/// Positions `target.len()..target.len() + MAX_OVERFLOW` are the overflow region.
pub const MAX_OVERFLOW: usize = 8;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyInput {
    PrintableChar(char),
    Space,
    Backspace,
}

impl KeyInput {
    /// Translate a terminal key into engine input; shell keys yield `None`
    pub fn from_key_event(key: &KeyEvent) -> Option<Self> {
        if key
            .modifiers
            .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
        {
            return None;
        }
        match key.code {
            KeyCode::Char(' ') => Some(Self::Space),
            KeyCode::Char(c) if !c.is_control() => Some(Self::PrintableChar(c)),
            KeyCode::Backspace => Some(Self::Backspace),
            _ => None,
        }
    }
}

pub fn handle(state: &mut SessionState, event: KeyInput) {
    if state.is_complete() {
        return;
    }
    match event {
        KeyInput::PrintableChar(c) => write_char(state, c),
        KeyInput::Space => advance_word(state),
        KeyInput::Backspace => backspace(state),
    }
}

fn write_char(state: &mut SessionState, c: char) {
    let Some(target) = state.target() else {
        return;
    };
    let target_len = target.len();
    let pos = state.word().pos();

    if pos >= target_len + MAX_OVERFLOW {
        return;
    }
    // Overflow is never correct, whatever was typed
    let is_correct = target.get(pos).is_some_and(|&expected| expected == c);
    state.word_mut().put(c, is_correct);
}

fn advance_word(state: &mut SessionState) {
    let Some(target) = state.target() else {
        return;
    };
    let target_len = target.len();
    let pos = state.word().pos();

    if pos == 0 {
        return;
    }
    if state.word().is_clean_finish() {
        debug!(target: "input", index = state.current_word_index(), "finished word");
        state.count_finished_word();
    }
    if pos < target_len {
        state.word_mut().mark_skipped(pos, target_len);
    }
    state.advance();

    if state.is_complete() {
        debug!(
            target: "input",
            finished_words = state.finished_words(),
            "session complete"
        );
    }
}

fn backspace(state: &mut SessionState) {
    let Some(target) = state.target() else {
        return;
    };
    let target_len = target.len();
    let word = state.word();

    // A perfectly typed word is locked until space moves on
    if word.pos() == 0 || word.is_clean_finish() {
        return;
    }
    let shrink = word.is_overflowing(target_len);
    state.word_mut().retreat(shrink);
}
