//! Levenshtein edit distance algorithm.
//!
//! Used by the block-anchor matcher to score how closely the interior lines
//! of a candidate block agree with the requested text.

/// Compute the Levenshtein edit distance between two strings.
///
/// Returns the minimum number of single-character edits (insertions,
/// deletions, substitutions) required to transform `a` into `b`. Lengths
/// are counted in `char`s. If either input is empty the distance is the
/// length of the other.
pub fn distance(a: &str, b: &str) -> usize {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();
    let m = a_chars.len();
    let n = b_chars.len();

    if m == 0 {
        return n;
    }
    if n == 0 {
        return m;
    }

    // Use two rows instead of full matrix for O(min(m,n)) space.
    let mut prev: Vec<usize> = (0..=n).collect();
    let mut curr = vec![0usize; n + 1];

    for (i, a_ch) in a_chars.iter().enumerate() {
        curr[0] = i + 1;
        for (j, b_ch) in b_chars.iter().enumerate() {
            let cost = usize::from(a_ch != b_ch);
            curr[j + 1] = (prev[j + 1] + 1) // deletion
                .min(curr[j] + 1) // insertion
                .min(prev[j] + cost); // substitution
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[n]
}

/// Similarity of two lines after trimming surrounding whitespace
/// (0.0 = completely different, 1.0 = identical).
///
/// Returns `None` when both trimmed lines are empty; callers skip such pairs.
pub fn line_similarity(a: &str, b: &str) -> Option<f64> {
    let a = a.trim();
    let b = b.trim();
    let max_len = a.chars().count().max(b.chars().count());
    if max_len == 0 {
        return None;
    }
    let dist = distance(a, b);
    Some(1.0 - dist as f64 / max_len as f64)
}
