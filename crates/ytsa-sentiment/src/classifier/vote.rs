//! Discrete prediction helpers for ensemble voting.

/// Index of the largest logit; the lowest index wins ties.
///
/// `NaN` entries never win. Returns `None` for an empty or all-`NaN` slice.
#[must_use]
pub fn argmax(logits: &[f32]) -> Option<usize> {
    let mut best: Option<(usize, f32)> = None;
    for (index, &value) in logits.iter().enumerate() {
        if value.is_nan() {
            continue;
        }
        match best {
            Some((_, current)) if value <= current => {}
            _ => best = Some((index, value)),
        }
    }
    best.map(|(index, _)| index)
}

/// Label index with the most votes; ties go to the lowest index.
///
/// Votes outside `0..num_labels` are ignored. Returns `None` when no valid
/// vote was cast.
#[must_use]
pub fn majority_vote(votes: &[usize], num_labels: usize) -> Option<usize> {
    let mut counts = vec![0usize; num_labels];
    for &vote in votes {
        if let Some(count) = counts.get_mut(vote) {
            *count += 1;
        }
    }

    let max = counts.iter().copied().max().filter(|&m| m > 0)?;
    counts.iter().position(|&c| c == max)
}
