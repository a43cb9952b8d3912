//! One play-through of a selected phase
//!
//! A `Session` is never edited in place by the state machine: every change
//! produces a new value, and a new load produces a brand new session with a
//! fresh generation.

/// Session progress
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Session {
    /// Load this session belongs to; delayed events carry it
    generation: u64,
    /// Lower-cased, shuffled sentences; never empty
    target_sentences: Vec<String>,
    current_index: usize,
    typed_text: String,
    score: u32,
}

impl Session {
    /// Returns `None` for an empty sentence list
    pub fn new(generation: u64, target_sentences: Vec<String>) -> Option<Self> {
        if target_sentences.is_empty() {
            return None;
        }
        Some(Session {
            generation,
            target_sentences,
            current_index: 0,
            typed_text: String::new(),
            score: 0,
        })
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    #[cfg(test)]
    pub fn target_sentences(&self) -> &[String] {
        &self.target_sentences
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn typed_text(&self) -> &str {
        &self.typed_text
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn len(&self) -> usize {
        self.target_sentences.len()
    }

    /// Sentence the learner is typing
    pub fn current_target(&self) -> &str {
        &self.target_sentences[self.current_index]
    }

    pub fn is_last(&self) -> bool {
        self.current_index + 1 >= self.target_sentences.len()
    }

    pub fn with_typed_text(self, typed_text: String) -> Self {
        Session { typed_text, ..self }
    }

    /// Credit the current sentence
    pub fn completed(self) -> Self {
        Session {
            score: self.score + 1,
            ..self
        }
    }

    /// Move to the next sentence with an empty input box.
    /// Stays put on the last sentence.
    pub fn advanced(self) -> Self {
        if self.is_last() {
            return self;
        }
        Session {
            current_index: self.current_index + 1,
            typed_text: String::new(),
            ..self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> Session {
        Session::new(1, vec!["hi there".into(), "good job".into()]).unwrap()
    }

    #[test]
    fn test_empty_session_rejected() {
        assert!(Session::new(1, vec![]).is_none());
    }

    #[test]
    fn test_new_session_starts_clean() {
        let s = session();
        assert_eq!(s.current_index(), 0);
        assert_eq!(s.score(), 0);
        assert_eq!(s.typed_text(), "");
        assert_eq!(s.current_target(), "hi there");
    }

    #[test]
    fn test_advance_clears_input() {
        let s = session().with_typed_text("hi there".into()).completed().advanced();
        assert_eq!(s.current_index(), 1);
        assert_eq!(s.typed_text(), "");
        assert_eq!(s.score(), 1);
        assert!(s.is_last());
    }

    #[test]
    fn test_advance_never_leaves_bounds() {
        let s = session().advanced().advanced().advanced();
        assert_eq!(s.current_index(), 1);
    }
}
