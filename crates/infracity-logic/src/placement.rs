//! Building placement: uniform zone sampling and capped rejection sampling.

use crate::model::Position;
use crate::zones::Zone;
use rand::Rng;

/// Result of a spaced placement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub position: Position,
    /// Samples drawn, always in `1..=max_attempts`.
    pub attempts: u32,
    /// Whether `position` keeps `min_distance` from every occupied point.
    pub spaced: bool,
}

/// Sample a position in `zone` at least `min_distance` away from all of
/// `occupied`.
///
/// Draws at most `max_attempts` samples (at least one). If none of them
/// satisfies the spacing, the last sample is accepted anyway and the
/// placement is reported as not spaced.
pub fn place_apart(
    zone: &Zone,
    min_distance: f32,
    occupied: &[Position],
    max_attempts: u32,
    rng: &mut impl Rng,
) -> Placement {
    let max_attempts = max_attempts.max(1);
    let mut attempts = 0;
    loop {
        let candidate = zone.sample(rng);
        attempts += 1;
        let spaced = is_clear(candidate, min_distance, occupied);
        if spaced || attempts >= max_attempts {
            return Placement {
                position: candidate,
                attempts,
                spaced,
            };
        }
    }
}

/// True when `candidate` is at least `min_distance` from every occupied point.
pub fn is_clear(candidate: Position, min_distance: f32, occupied: &[Position]) -> bool {
    occupied
        .iter()
        .all(|other| candidate.distance(other) >= min_distance)
}

/// Smallest distance from `pos` to any occupied point, `None` if nothing is occupied.
pub fn nearest_distance(pos: Position, occupied: &[Position]) -> Option<f32> {
    occupied
        .iter()
        .map(|other| pos.distance(other))
        .min_by(|a, b| a.total_cmp(b))
}
