/// Characters credited and debited for one committed word.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Score {
    pub correct: usize,
    pub incorrect: usize,
}

impl Score {
    pub fn total(&self) -> usize {
        self.correct + self.incorrect
    }
}

/// Score a committed word, separator keystroke included.
///
/// Positions shared by both strings count one each way; every extra or
/// missing character is incorrect. The separator is credited only when the
/// typed word has exactly the target's length.
pub fn evaluate(target: &str, typed: &str) -> Score {
    let target_len = target.chars().count();
    let typed_len = typed.chars().count();

    let mut score = Score::default();
    for (expected, actual) in target.chars().zip(typed.chars()) {
        if expected == actual {
            score.correct += 1;
        } else {
            score.incorrect += 1;
        }
    }

    score.incorrect += target_len.abs_diff(typed_len);

    if typed_len == target_len {
        score.correct += 1;
    } else {
        score.incorrect += 1;
    }

    score
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CharMark {
    Correct,
    Incorrect,
    /// typed past the end of the target
    Extra,
    /// not typed yet
    Pending,
}

/// Per-character marks for rendering the active word.
///
/// Yields one mark per target character followed by one `Extra` per
/// overflowing typed character. Read-only: nothing is scored.
pub fn mark(target: &str, typed: &str) -> Vec<(char, CharMark)> {
    let mut typed_chars = typed.chars();
    let mut marks: Vec<(char, CharMark)> = target
        .chars()
        .map(|expected| match typed_chars.next() {
            Some(actual) if actual == expected => (expected, CharMark::Correct),
            Some(actual) => (actual, CharMark::Incorrect),
            None => (expected, CharMark::Pending),
        })
        .collect();

    marks.extend(typed_chars.map(|c| (c, CharMark::Extra)));
    marks
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_match_credits_separator() {
        assert_eq!(
            evaluate("cat", "cat"),
            Score {
                correct: 4,
                incorrect: 0
            }
        );
    }

    #[test]
    fn test_same_length_mismatch() {
        assert_eq!(
            evaluate("cat", "cap"),
            Score {
                correct: 3,
                incorrect: 1
            }
        );
    }

    #[test]
    fn test_short_word_counts_missing_and_separator() {
        assert_eq!(
            evaluate("hello", "helo"),
            Score {
                correct: 3,
                incorrect: 3
            }
        );
    }

    #[test]
    fn test_long_word_gets_no_separator_credit() {
        // c,a,t correct; 's' extra; separator incorrect
        assert_eq!(
            evaluate("cat", "cats"),
            Score {
                correct: 3,
                incorrect: 2
            }
        );
    }

    #[test]
    fn test_counts_unicode_scalars_not_bytes() {
        assert_eq!(evaluate("café", "café").correct, 5);
        assert_eq!(evaluate("café", "cafe").incorrect, 1);
    }

    #[test]
    fn test_total_is_longest_length_plus_separator() {
        let score = evaluate("about", "a");
        assert_eq!(score.total(), 6);
        assert_eq!(score.correct, 1);
    }

    #[test]
    fn test_evaluate_is_idempotent() {
        let first = evaluate("would", "woudl");
        for _ in 0..10 {
            assert_eq!(evaluate("would", "woudl"), first);
        }
    }

    #[test]
    fn test_mark_partial_input() {
        let marks = mark("time", "tx");
        assert_eq!(
            marks,
            vec![
                ('t', CharMark::Correct),
                ('x', CharMark::Incorrect),
                ('m', CharMark::Pending),
                ('e', CharMark::Pending),
            ]
        );
    }

    #[test]
    fn test_mark_overflow() {
        let marks = mark("go", "goes");
        assert_eq!(marks.len(), 4);
        assert_eq!(marks[2], ('e', CharMark::Extra));
        assert_eq!(marks[3], ('s', CharMark::Extra));
    }

    #[test]
    fn test_mark_empty_input_is_all_pending() {
        assert!(mark("year", "")
            .iter()
            .all(|(_, m)| *m == CharMark::Pending));
    }
}
