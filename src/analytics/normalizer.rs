//! Counter normalizer
//!
//! Cumulative coin and payout counters only decrease when the hardware
//! counter is reset or replaced. A raw value lower than the previous one
//! therefore means "new counter", not "negative throughput": the previous
//! baseline is treated as zero and the delta is the raw value itself.

use crate::types::Reading;

/// Daily delta between two adjacent readings of the same machine.
///
/// `curr` must be the later reading of a date-sorted pair (not necessarily
/// the next calendar day). The reset rule is applied to each counter
/// independently; the result is always non-negative.
pub fn normalize(prev: &Reading, curr: &Reading) -> (u64, u64) {
    (
        counter_delta(prev.coins_in, curr.coins_in),
        counter_delta(prev.toys_payout, curr.toys_payout),
    )
}

fn counter_delta(prev: u64, curr: u64) -> u64 {
    if curr < prev {
        // counter reset: baseline becomes 0
        curr
    } else {
        curr - prev
    }
}
