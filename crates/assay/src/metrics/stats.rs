//! Order statistics over numeric samples.

/// Quantile `q` (0.0-1.0) of an ascending-sorted sample.
///
/// Interpolates linearly between the two closest ranks at position
/// `q × (n − 1)`. Returns `None` for an empty sample.
pub fn quantile(sorted: &[f64], q: f64) -> Option<f64> {
    if sorted.is_empty() {
        return None;
    }

    let q = q.clamp(0.0, 1.0);
    let pos = q * (sorted.len() - 1) as f64;
    let lower = pos.floor() as usize;
    let upper = pos.ceil() as usize;
    let weight = pos - lower as f64;

    // Equal neighbours (including equal infinities) need no interpolation
    if sorted[lower] == sorted[upper] {
        return Some(sorted[lower]);
    }
    Some(sorted[lower] + (sorted[upper] - sorted[lower]) * weight)
}

/// Sort a sample ascending. NaN is never present in parsed cells.
pub(crate) fn sorted(values: &[f64]) -> Vec<f64> {
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    sorted
}
