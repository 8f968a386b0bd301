//! Forward-fill of missing values in a historical series.
//!
//! Points are walked left to right. For each adjacent pair the close-to-close
//! gap ratio decides whether the pair is eligible: a large move is assumed to
//! be genuine and is never filled. In an eligible pair, every field that is
//! zero in the current point and non-zero in the previous one is copied
//! forward. Because the walk is sequential, a filled value can propagate to
//! the next point, but no fill ever looks more than one point back.

use crate::models::PricePoint;

/// Counters reported after a fill pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FillStats {
    /// Number of individual fields copied forward.
    pub filled_fields: usize,
    /// Number of adjacent pairs skipped because the gap ratio was too large.
    pub skipped_pairs: usize,
}

/// Relative close-to-close move; infinite when the previous close is zero.
pub fn gap_ratio(previous_close: f64, current_close: f64) -> f64 {
    if previous_close == 0.0 {
        return f64::INFINITY;
    }
    (current_close - previous_close).abs() / previous_close
}

/// Forward-fill zero fields across eligible adjacent pairs.
pub fn forward_fill(points: &mut [PricePoint], max_gap_ratio: f64) -> FillStats {
    let mut stats = FillStats::default();

    for i in 1..points.len() {
        let (head, tail) = points.split_at_mut(i);
        let previous = &head[i - 1];
        let current = &mut tail[0];

        if gap_ratio(previous.close, current.close) > max_gap_ratio {
            stats.skipped_pairs += 1;
            continue;
        }

        stats.filled_fields += fill_f64(&mut current.open, previous.open);
        stats.filled_fields += fill_f64(&mut current.high, previous.high);
        stats.filled_fields += fill_f64(&mut current.low, previous.low);
        stats.filled_fields += fill_f64(&mut current.close, previous.close);
        stats.filled_fields += fill_f64(&mut current.adj_close, previous.adj_close);
        if current.volume == 0 && previous.volume != 0 {
            current.volume = previous.volume;
            stats.filled_fields += 1;
        }
    }

    stats
}

fn fill_f64(current: &mut f64, previous: f64) -> usize {
    if *current == 0.0 && previous != 0.0 {
        *current = previous;
        1
    } else {
        0
    }
}
