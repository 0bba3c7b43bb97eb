/// Fast mathematical operations using SIMD-accelerated `glam` types.
///
/// UI positions, sizes and anchor offsets are all [`Vec2`]; world transforms
/// handed to the renderer are [`Mat4`].
///
/// ```
/// use trellis_core::math::{Vec2, Mat4};
///
/// let position = Vec2::new(200.0, 0.0);
/// let size = Vec2::new(600.0, 600.0);
/// let world = Mat4::from_translation(position.extend(0.0))
///     * Mat4::from_scale(size.extend(1.0));
/// ```
pub mod fast {
    pub use glam::*;
}

pub use fast::*;
