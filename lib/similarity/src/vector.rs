// Dense-vector cosine for externally supplied embeddings

use crate::score::ratio_to_score;

/// Dot product with two accumulators for better pipelining.
/// Callers guarantee equal lengths.
#[inline]
fn dot(a: &[f32], b: &[f32]) -> f64 {
    let mut sum1 = 0.0f64;
    let mut sum2 = 0.0f64;
    let chunks = a.len() / 2;

    for i in 0..chunks {
        let j = i * 2;
        sum1 += a[j] as f64 * b[j] as f64;
        sum2 += a[j + 1] as f64 * b[j + 1] as f64;
    }
    if a.len() % 2 == 1 {
        let last = a.len() - 1;
        sum1 += a[last] as f64 * b[last] as f64;
    }

    sum1 + sum2
}

#[inline]
fn norm(a: &[f32]) -> f64 {
    dot(a, a).sqrt()
}

/// Cosine similarity in `[-1, 1]`; `None` for empty, mismatched or zero vectors
pub fn cosine(a: &[f32], b: &[f32]) -> Option<f64> {
    if a.is_empty() || a.len() != b.len() {
        return None;
    }

    let norm_a = norm(a);
    let norm_b = norm(b);
    if norm_a == 0.0 || norm_b == 0.0 || !norm_a.is_finite() || !norm_b.is_finite() {
        return None;
    }

    Some(dot(a, b) / (norm_a * norm_b))
}

/// `round(100 * cos(a, b))`, clamped at 0.
///
/// Empty vectors, length mismatches and zero vectors score 0.
pub fn embedding_similarity(a: &[f32], b: &[f32]) -> u8 {
    cosine(a, b).map(ratio_to_score).unwrap_or(0)
}
