use crate::paint::Color;

/// Narrow per-frame drawing capability.
///
/// `U` is the uniform block of the program behind the surface. A frame is
/// expected to run `clear`, `upload`, `draw`, `present` in that order;
/// implementations treat any call made while no frame target is available as
/// a no-op.
pub trait DrawSurface<U> {
    /// Clears the target to `color` before the next draw.
    fn clear(&mut self, color: Color);

    /// Replaces the uniform block used by subsequent draws.
    fn upload(&mut self, uniforms: &U);

    /// Draws the program's geometry once.
    fn draw(&mut self);

    /// Finishes the frame and hands it to the display.
    fn present(&mut self);
}
