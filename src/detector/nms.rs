//! Greedy non-maximum suppression over horizontal window positions.
//!
//! Repeatedly picks the strongest remaining candidate, emits it, and
//! suppresses every neighbour closer than one window width. Candidates are
//! visited in strictly decreasing score order, so at most one detection
//! survives per `window_width`-wide neighbourhood. On an exact score tie the
//! leftmost candidate wins.
use crate::types::{Candidate, Detection};

pub fn suppress_non_max(
    candidates: &[Candidate],
    window_width: usize,
    threshold: f64,
) -> Vec<Detection> {
    let mut sorted: Vec<Candidate> = candidates.to_vec();
    // Stable: equal positions keep scan order.
    sorted.sort_by_key(|c| c.x);

    let mut suppressed = vec![false; sorted.len()];
    let mut detections = Vec::new();

    loop {
        let mut best: Option<usize> = None;
        for (i, cand) in sorted.iter().enumerate() {
            if suppressed[i] || !cand.score.is_finite() {
                continue;
            }
            if best.map_or(true, |b| cand.score > sorted[b].score) {
                best = Some(i);
            }
        }
        let Some(sel) = best else {
            break;
        };
        let selected = sorted[sel];
        if selected.score < threshold {
            break;
        }
        detections.push(Detection {
            x: selected.x,
            score: selected.score,
        });
        suppressed[sel] = true;

        let mut left = sel;
        while left > 0 && selected.x - sorted[left - 1].x < window_width {
            left -= 1;
            suppressed[left] = true;
        }
        let mut right = sel + 1;
        while right < sorted.len() && sorted[right].x - selected.x < window_width {
            suppressed[right] = true;
            right += 1;
        }
    }

    detections
}
