//! Bounded edit distance for fuzzy term matching.

/// Levenshtein distance between `a` and `b`, or `None` when it exceeds `max`.
///
/// Works on characters, and gives up as soon as every cell of a row is
/// already over the bound.
pub(crate) fn bounded_distance(a: &str, b: &str, max: usize) -> Option<usize> {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    if a.len().abs_diff(b.len()) > max {
        return None;
    }

    let mut previous: Vec<usize> = (0..=b.len()).collect();
    let mut current = vec![0; b.len() + 1];

    for (i, &ca) in a.iter().enumerate() {
        current[0] = i + 1;
        let mut row_min = current[0];
        for (j, &cb) in b.iter().enumerate() {
            let substitution = previous[j] + usize::from(ca != cb);
            current[j + 1] = substitution.min(previous[j + 1] + 1).min(current[j] + 1);
            row_min = row_min.min(current[j + 1]);
        }
        if row_min > max {
            return None;
        }
        std::mem::swap(&mut previous, &mut current);
    }

    let distance = previous[b.len()];
    (distance <= max).then_some(distance)
}

/// Largest edit distance tolerated for a query term.
///
/// `ratio` is a fraction of the term length, rounded, and never above six.
pub(crate) fn max_distance(term: &str, ratio: f64) -> usize {
    const CEILING: usize = 6;
    let allowed = (term.chars().count() as f64 * ratio).round();
    (allowed.max(0.0) as usize).min(CEILING)
}
