//! Collision detection between axis-aligned rectangles

use super::geometry::Rect;

/// Check whether two rectangles overlap with positive area
///
/// Strict inequalities: rectangles that only share an edge or a corner
/// do not collide. Symmetric in its arguments.
#[inline]
pub fn collides(a: &Rect, b: &Rect) -> bool {
    a.x() < b.right() && a.right() > b.x() && a.y() < b.bottom() && a.bottom() > b.y()
}
