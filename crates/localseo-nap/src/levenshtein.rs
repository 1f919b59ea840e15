//! Edit distance over business-name sized strings.
//!
//! Uses the full `(m + 1) x (n + 1)` dynamic-programming matrix. Normalized
//! names rarely exceed ~60 characters, so the quadratic table is cheap.

/// Levenshtein edit distance, counting insertions, deletions and
/// substitutions as one edit each. Operates on `char`s, not bytes.
#[must_use]
pub fn levenshtein_distance(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    let mut matrix = vec![vec![0usize; b.len() + 1]; a.len() + 1];
    for (i, row) in matrix.iter_mut().enumerate() {
        row[0] = i;
    }
    for (j, cell) in matrix[0].iter_mut().enumerate() {
        *cell = j;
    }

    for i in 1..=a.len() {
        for j in 1..=b.len() {
            let cost = usize::from(a[i - 1] != b[j - 1]);
            matrix[i][j] = (matrix[i - 1][j] + 1)
                .min(matrix[i][j - 1] + 1)
                .min(matrix[i - 1][j - 1] + cost);
        }
    }

    matrix[a.len()][b.len()]
}

/// Similarity in `0.0..=1.0`: `1 - distance / max(len_a, len_b)`.
///
/// Two empty strings are identical and score `1.0`.
#[must_use]
pub fn levenshtein_similarity(a: &str, b: &str) -> f64 {
    let max_len = a.chars().count().max(b.chars().count());
    if max_len == 0 {
        return 1.0;
    }

    // Lengths are short strings; no precision loss in practice.
    #[allow(clippy::cast_precision_loss)]
    let ratio = levenshtein_distance(a, b) as f64 / max_len as f64;
    1.0 - ratio
}
