//! Ordered subsequence matching used for fuzzy repository lookup

/// Determine whether every character of `sequence` appears in `value`, in
/// order but not necessarily contiguously.
///
/// The search is greedy and never backtracks: each character is taken from
/// the earliest position after the previous match. "albuquerque" matches
/// "abq" but not "lab". Callers lowercase both sides for case-insensitive
/// matching.
pub fn matches(value: &str, sequence: &str) -> bool {
    if sequence.is_empty() {
        return true;
    }

    if value.len() < sequence.len() {
        return false;
    }

    let mut offset = 0;
    for c in sequence.chars() {
        match value[offset..].find(c) {
            Some(idx) => offset += idx + c.len_utf8(),
            None => return false,
        }
    }

    true
}
