//! Constant-acceleration motion
//!
//! Closed-form integration shared by the live agent and the autopilot's
//! forward simulation, so both see exactly the same trajectory.

/// Advance `(position, velocity)` by `dt` under constant `acceleration`
///
/// Exact for constant acceleration: `p' = p + v·dt + ½·a·dt²`, `v' = v + a·dt`.
#[inline]
pub fn integrate(position: f32, velocity: f32, acceleration: f32, dt: f32) -> (f32, f32) {
    let position = position + velocity * dt + 0.5 * acceleration * dt * dt;
    let velocity = velocity + acceleration * dt;
    (position, velocity)
}

/// Replace the current velocity with `impulse`
///
/// A flap is absolute: whatever the body was doing (including falling fast),
/// its vertical speed becomes the impulse value.
#[inline]
pub fn apply_impulse(_velocity: f32, impulse: f32) -> f32 {
    impulse
}
