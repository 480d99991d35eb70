//! Straight-line movement at fixed speed.

use bn_core::Vec2;

/// Move `pos` toward `target` by at most `speed`.
///
/// Returns `true` (and snaps `pos` onto `target`) when `pos` was already
/// strictly within `arrival_radius`.  Otherwise the step never overshoots, so
/// a fast mover lands on the target and arrives on the following call.
pub fn step_toward(pos: &mut Vec2, target: Vec2, speed: f32, arrival_radius: f32) -> bool {
    let dist = pos.distance(target);
    if dist < arrival_radius || !dist.is_finite() {
        *pos = target;
        return true;
    }
    let step = speed.max(0.0).min(dist);
    *pos += (target - *pos) * (step / dist);
    false
}
