use std::collections::BTreeSet;

/// Live buffer for the word currently being typed.
///
/// `typed` is seeded with a copy of the target word and overwritten in place, so it is
/// never shorter than `pos`. Characters typed past the end of the target are appended.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WordEditState {
    typed: Vec<char>,
    pos: usize,
    correct: BTreeSet<usize>,
    incorrect: BTreeSet<usize>,
}

impl WordEditState {
    pub fn new(target: &[char]) -> Self {
        Self {
            typed: target.to_vec(),
            ..Self::default()
        }
    }

    pub fn pos(&self) -> usize {
        self.pos
    }

    /// The whole buffer, including the seeded (not yet typed) tail
    pub fn buffer(&self) -> &[char] {
        &self.typed
    }

    /// Only what the user actually typed
    pub fn typed(&self) -> &[char] {
        &self.typed[..self.pos]
    }

    pub fn correct_positions(&self) -> &BTreeSet<usize> {
        &self.correct
    }

    pub fn incorrect_positions(&self) -> &BTreeSet<usize> {
        &self.incorrect
    }

    pub fn has_mistakes(&self) -> bool {
        !self.incorrect.is_empty()
    }

    /// Cursor sits at the end of the buffer with nothing marked wrong
    pub fn is_clean_finish(&self) -> bool {
        self.pos == self.typed.len() && self.incorrect.is_empty()
    }

    pub fn is_overflowing(&self, target_len: usize) -> bool {
        self.pos > target_len
    }

    /// Write `c` at the cursor, recording the outcome, and advance
    pub(crate) fn put(&mut self, c: char, is_correct: bool) {
        match self.typed.get_mut(self.pos) {
            Some(slot) => *slot = c,
            None => self.typed.push(c),
        }
        self.mark(self.pos, is_correct);
        self.pos += 1;
    }

    /// Step the cursor back one position and forget its outcome.
    /// `shrink` drops the last buffer element as well (overflow region).
    pub(crate) fn retreat(&mut self, shrink: bool) {
        if self.pos == 0 {
            return;
        }
        if shrink {
            self.typed.truncate(self.pos - 1);
        }
        self.pos -= 1;
        self.correct.remove(&self.pos);
        self.incorrect.remove(&self.pos);
    }

    /// Mark every position in `from..to` as incorrect (skipped characters)
    pub(crate) fn mark_skipped(&mut self, from: usize, to: usize) {
        for idx in from..to {
            self.mark(idx, false);
        }
    }

    fn mark(&mut self, idx: usize, is_correct: bool) {
        if is_correct {
            self.incorrect.remove(&idx);
            self.correct.insert(idx);
        } else {
            self.correct.remove(&idx);
            self.incorrect.insert(idx);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    #[test]
    fn test_new_seeds_buffer_with_target() {
        let w = WordEditState::new(&chars("cat"));

        assert_eq!(w.pos(), 0);
        assert_eq!(w.buffer(), &chars("cat")[..]);
        assert!(w.typed().is_empty());
        assert!(!w.is_clean_finish());
    }

    #[test]
    fn test_put_overwrites_then_appends() {
        let mut w = WordEditState::new(&chars("ab"));

        w.put('x', false);
        w.put('b', true);
        w.put('z', false);

        assert_eq!(w.buffer(), &chars("xbz")[..]);
        assert_eq!(w.typed(), &chars("xbz")[..]);
        assert_eq!(w.correct_positions().iter().copied().collect::<Vec<_>>(), vec![1]);
        assert_eq!(
            w.incorrect_positions().iter().copied().collect::<Vec<_>>(),
            vec![0, 2]
        );
    }

    #[test]
    fn test_retreat_forgets_outcome() {
        let mut w = WordEditState::new(&chars("ab"));
        w.put('x', false);

        w.retreat(false);

        assert_eq!(w.pos(), 0);
        assert!(!w.has_mistakes());
        assert_eq!(w.buffer().len(), 2);
    }

    #[test]
    fn test_retreat_with_shrink_drops_tail() {
        let mut w = WordEditState::new(&chars("a"));
        w.put('a', true);
        w.put('a', false);

        w.retreat(true);

        assert_eq!(w.buffer(), &chars("a")[..]);
        assert!(w.is_clean_finish());
    }

    #[test]
    fn test_mark_skipped_keeps_sets_disjoint() {
        let mut w = WordEditState::new(&chars("abc"));
        w.put('a', true);
        w.mark_skipped(0, 3);

        assert!(w.correct_positions().is_empty());
        assert_eq!(w.incorrect_positions().len(), 3);
    }
}
