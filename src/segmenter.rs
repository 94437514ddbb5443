use std::sync::Arc;

// @module: Sentence boundary detection and segmentation

/// Punctuation marks that can terminate a sentence
pub const TERMINAL_MARKS: [char; 3] = ['.', '?', '!'];

/// Decides whether a terminal punctuation mark actually ends a sentence,
/// given the text on either side of it.
///
/// The engine ships with [`TitleAbbreviationPolicy`]; other locales or
/// exception sets can swap in their own implementation without touching
/// the rest of the pipeline.
pub trait BoundaryPolicy: Send + Sync {
    /// Returns true if `mark` is a sentence terminator in this context.
    /// `before` is everything preceding the mark, `after` everything
    /// following it (neither includes the mark itself).
    fn is_sentence_boundary(&self, before: &str, mark: char, after: &str) -> bool;
}

/// Default boundary policy: a terminal mark ends a sentence when it is
/// followed by whitespace and an upper-case letter, unless the word right
/// before the mark is a known title abbreviation.
///
/// The exception list is deliberately short. "Dr." or "etc." will still
/// mis-segment; widening the list is a configuration decision, not a parser
/// change.
pub struct TitleAbbreviationPolicy {
    abbreviations: Vec<String>,
}

impl TitleAbbreviationPolicy {
    pub fn new(abbreviations: Vec<String>) -> Self {
        TitleAbbreviationPolicy { abbreviations }
    }

    /// The word immediately before the mark: the trailing run of
    /// alphabetic characters in `before`.
    fn trailing_word(before: &str) -> &str {
        let boundary = before
            .char_indices()
            .rev()
            .take_while(|(_, c)| c.is_alphabetic())
            .last()
            .map(|(i, _)| i)
            .unwrap_or(before.len());
        &before[boundary..]
    }
}

impl Default for TitleAbbreviationPolicy {
    fn default() -> Self {
        Self::new(vec![
            "Mr".to_string(),
            "Ms".to_string(),
            "Mrs".to_string(),
        ])
    }
}

impl BoundaryPolicy for TitleAbbreviationPolicy {
    fn is_sentence_boundary(&self, before: &str, _mark: char, after: &str) -> bool {
        // The mark must be followed by whitespace and then a capital letter
        let mut rest = after.chars();
        match rest.next() {
            Some(c) if c.is_whitespace() => {}
            _ => return false,
        }
        let next_visible = rest.find(|c| !c.is_whitespace());
        match next_visible {
            Some(c) if c.is_uppercase() => {}
            _ => return false,
        }

        // A title abbreviation right before the mark suppresses the boundary
        let word = Self::trailing_word(before);
        !self.abbreviations.iter().any(|a| a == word)
    }
}

/// Splits a message into candidate sentences using a [`BoundaryPolicy`].
#[derive(Clone)]
pub struct SentenceSegmenter {
    policy: Arc<dyn BoundaryPolicy>,
}

impl SentenceSegmenter {
    pub fn new(policy: Arc<dyn BoundaryPolicy>) -> Self {
        SentenceSegmenter { policy }
    }

    /// Segment a message into an ordered, never-empty list of candidate
    /// sentences. Text with no internal boundary comes back as a single
    /// candidate. Candidates are trimmed; a whitespace-only message yields
    /// one empty candidate, which the transducer discards.
    pub fn segment(&self, message: &str) -> Vec<String> {
        let mut candidates = Vec::new();
        let mut start = 0;

        for (pos, ch) in message.char_indices() {
            if !TERMINAL_MARKS.contains(&ch) {
                continue;
            }
            let after_mark = pos + ch.len_utf8();
            if self
                .policy
                .is_sentence_boundary(&message[..pos], ch, &message[after_mark..])
            {
                candidates.push(message[start..after_mark].trim().to_string());
                start = after_mark;
            }
        }

        candidates.push(message[start..].trim().to_string());
        candidates
    }
}

impl Default for SentenceSegmenter {
    fn default() -> Self {
        Self::new(Arc::new(TitleAbbreviationPolicy::default()))
    }
}
