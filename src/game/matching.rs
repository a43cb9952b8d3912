//! Matching typed input against target sentences
//!
//! Matching is case-insensitive and exact: no trimming, no punctuation
//! tolerance, no partial credit.

use rand::Rng;

/// Case normalization applied to both targets and typed input
pub fn normalize(text: &str) -> String {
    text.to_lowercase()
}

/// True when the whole typed string equals the target after case folding
pub fn is_match(typed: &str, target: &str) -> bool {
    normalize(typed) == normalize(target)
}

/// In-place Fisher–Yates shuffle
pub fn fisher_yates<T, R: Rng + ?Sized>(items: &mut [T], rng: &mut R) {
    for i in (1..items.len()).rev() {
        let j = rng.gen_range(0..=i);
        items.swap(i, j);
    }
}

/// Sentences still to type, counting the active one unless it is completed
pub fn remaining_count(total: usize, current_index: usize, completed: bool) -> usize {
    let active = if completed { 0 } else { 1 };
    total.saturating_sub(current_index).saturating_sub(active)
}

/// Per-character state of the target while typing
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CharMark {
    Matched,
    Mismatched,
    Pending,
}

/// Mark each target character against what has been typed so far.
/// Case is folded per character so positions stay aligned.
pub fn mark_chars(target: &str, typed: &str, completed: bool) -> Vec<(char, CharMark)> {
    let typed: Vec<char> = typed.chars().collect();

    target
        .chars()
        .enumerate()
        .map(|(i, c)| {
            let mark = if completed {
                CharMark::Matched
            } else {
                match typed.get(i) {
                    Some(&t) if t.to_lowercase().eq(c.to_lowercase()) => CharMark::Matched,
                    Some(_) => CharMark::Mismatched,
                    None => CharMark::Pending,
                }
            };
            (c, mark)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_case_insensitive_match() {
        assert!(is_match("The Cat Sat", "the cat sat"));
        assert!(!is_match("the cat sa", "the cat sat"));
    }

    #[test]
    fn test_whitespace_is_significant() {
        assert!(!is_match("the cat sat ", "the cat sat"));
        assert!(!is_match(" the cat sat", "the cat sat"));
        assert!(!is_match("the  cat sat", "the cat sat"));
    }

    #[test]
    fn test_punctuation_is_significant() {
        assert!(!is_match("hello how are you", "hello, how are you?"));
        assert!(is_match("HELLO, how are you?", "hello, how are you?"));
    }

    #[test]
    fn test_shuffle_is_permutation() {
        let mut rng = StdRng::seed_from_u64(7);
        for len in 0..12 {
            let original: Vec<u32> = (0..len).collect();
            let mut shuffled = original.clone();
            fisher_yates(&mut shuffled, &mut rng);
            let mut sorted = shuffled.clone();
            sorted.sort();
            assert_eq!(sorted, original);
        }
    }

    #[test]
    fn test_shuffle_reaches_every_order() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..600 {
            let mut items = ['a', 'b', 'c'];
            fisher_yates(&mut items, &mut rng);
            seen.insert(items);
        }
        assert_eq!(seen.len(), 6);
    }

    #[test]
    fn test_remaining_count() {
        assert_eq!(remaining_count(2, 0, false), 1);
        assert_eq!(remaining_count(2, 0, true), 2);
        assert_eq!(remaining_count(2, 1, false), 0);
        assert_eq!(remaining_count(2, 1, true), 1);
        assert_eq!(remaining_count(0, 0, false), 0);
        assert_eq!(remaining_count(1, 5, false), 0);
    }

    #[test]
    fn test_mark_chars() {
        let marks = mark_chars("cat", "Cx", false);
        assert_eq!(
            marks,
            vec![
                ('c', CharMark::Matched),
                ('a', CharMark::Mismatched),
                ('t', CharMark::Pending),
            ]
        );

        let done = mark_chars("cat", "cat", true);
        assert!(done.iter().all(|(_, m)| *m == CharMark::Matched));
    }

    #[test]
    fn test_mark_chars_stays_aligned_with_multichar_lowercase() {
        // 'İ' lower-cases to two chars
        let marks = mark_chars("xab", "İaB", false);
        assert_eq!(
            marks,
            vec![
                ('x', CharMark::Mismatched),
                ('a', CharMark::Matched),
                ('b', CharMark::Matched),
            ]
        );
    }
}
