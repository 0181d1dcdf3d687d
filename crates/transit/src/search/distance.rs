//! Edit distance for fuzzy matching.

/// Classic dynamic-programming Levenshtein distance; insertion, deletion
/// and substitution each cost one. Two rows instead of the full matrix,
/// same recurrence.
pub fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    if a.is_empty() {
        return b.len();
    }

    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];

    for (i, ca) in a.iter().enumerate() {
        curr[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let substitution = prev[j] + usize::from(ca != cb);
            curr[j + 1] = substitution.min(prev[j + 1] + 1).min(curr[j] + 1);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_strings() {
        assert_eq!(levenshtein("kot", "kot"), 0);
        assert_eq!(levenshtein("", ""), 0);
    }

    #[test]
    fn test_known_distances() {
        assert_eq!(levenshtein("kot", "pies"), 4);
        assert_eq!(levenshtein("kot", "kos"), 1); // substitution
        assert_eq!(levenshtein("kot", "kort"), 1); // insertion
        assert_eq!(levenshtein("kort", "kot"), 1); // deletion
    }

    #[test]
    fn test_empty_against_word() {
        assert_eq!(levenshtein("", "abc"), 3);
        assert_eq!(levenshtein("abc", ""), 3);
    }

    #[test]
    fn test_symmetry() {
        assert_eq!(
            levenshtein("garbary", "gabary"),
            levenshtein("gabary", "garbary")
        );
    }
}
