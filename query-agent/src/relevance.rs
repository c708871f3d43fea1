//! Relevance gate: decides whether retrieved context can ground an answer.

use wildlife_store::ContextFragment;

/// Returns true when the context set is substantial enough to ground an
/// answer: non-empty AND the fragment texts, joined by single spaces, exceed
/// `min_chars` characters.
///
/// This is a crude length proxy, not semantic scoring. A single very short
/// fragment is never relevant even if topically on-point; that coarseness is
/// deliberate.
pub fn grounded(fragments: &[ContextFragment], min_chars: usize) -> bool {
    if fragments.is_empty() {
        return false;
    }
    let joined_len: usize = fragments
        .iter()
        .map(|f| f.text.chars().count())
        .sum::<usize>()
        + fragments.len()
        - 1;
    joined_len > min_chars
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fragment(text: &str) -> ContextFragment {
        ContextFragment {
            score: 0.9,
            text: text.to_string(),
            source: None,
        }
    }

    #[test]
    fn empty_set_is_never_grounded() {
        assert!(!grounded(&[], 100));
    }

    #[test]
    fn short_context_is_not_grounded() {
        // 100 joined chars exactly: still below the strict threshold.
        let frags = vec![fragment(&"a".repeat(50)), fragment(&"b".repeat(49))];
        assert!(!grounded(&frags, 100));
    }

    #[test]
    fn context_above_threshold_is_grounded() {
        // 101 joined chars: 50 + separator + 50.
        let frags = vec![fragment(&"a".repeat(50)), fragment(&"b".repeat(50))];
        assert!(grounded(&frags, 100));
    }

    #[test]
    fn fragment_count_does_not_matter() {
        let one_long = vec![fragment(&"x".repeat(150))];
        assert!(grounded(&one_long, 100));

        let many_short = vec![fragment("hi"); 4];
        assert!(!grounded(&many_short, 100));
    }
}
