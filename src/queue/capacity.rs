//! Capacity management for the queue buffer
//!
//! After every removal the queue compares its occupancy (`len / capacity`)
//! with a threshold that depends on how many elements it holds. Small queues
//! compact early; large queues tolerate almost no slack before shrinking, but
//! shrink by very little so that a burst of removals does not trigger a string
//! of reallocations.

/// One band of the shrink policy
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShrinkBand {
    /// Band applies while `len < upper_bound`
    pub upper_bound: usize,
    /// Occupancy below which the buffer is shrunk
    pub threshold: f64,
    /// Fraction of the current capacity kept after shrinking
    pub after_shrink: f64,
}

/// Bands ordered by size; the last band catches everything above 1e6
pub const SHRINK_BANDS: [ShrinkBand; 5] = [
    ShrinkBand {
        upper_bound: 1_000,
        threshold: 0.75,
        after_shrink: 0.8,
    },
    ShrinkBand {
        upper_bound: 10_000,
        threshold: 0.9,
        after_shrink: 0.95,
    },
    ShrinkBand {
        upper_bound: 100_000,
        threshold: 0.99,
        after_shrink: 0.995,
    },
    ShrinkBand {
        upper_bound: 1_000_000,
        threshold: 0.999,
        after_shrink: 0.9995,
    },
    ShrinkBand {
        upper_bound: usize::MAX,
        threshold: 0.9999,
        after_shrink: 0.99995,
    },
];

fn band_for(len: usize) -> &'static ShrinkBand {
    SHRINK_BANDS
        .iter()
        .find(|band| len < band.upper_bound)
        .unwrap_or(&SHRINK_BANDS[SHRINK_BANDS.len() - 1])
}

/// Occupancy ratio below which a shrink is triggered for a queue of `len` elements
pub fn shrink_threshold_ratio(len: usize) -> f64 {
    band_for(len).threshold
}

/// Fraction of the allocated capacity to keep when shrinking a queue of `len` elements
pub fn post_shrink_ratio(len: usize) -> f64 {
    band_for(len).after_shrink
}

/// New capacity for the buffer, or `None` if no shrink is due
///
/// Never returns a capacity below `len`.
pub fn shrink_target(len: usize, capacity: usize) -> Option<usize> {
    if capacity == 0 {
        return None;
    }
    if (len as f64) >= shrink_threshold_ratio(len) * capacity as f64 {
        return None;
    }

    let target = (post_shrink_ratio(len) * capacity as f64).ceil() as usize;
    let target = target.max(len);
    if target < capacity {
        Some(target)
    } else {
        None
    }
}
