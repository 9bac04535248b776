use super::Vec2;

/// Axis-aligned rectangle given by two opposite corners, in pixels.
///
/// Corners are stored as given; `(x0, y0)` is normally the top-left corner.
/// `min`/`max` work for either order.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct PixelRect {
    pub x0: f32,
    pub y0: f32,
    pub x1: f32,
    pub y1: f32,
}

impl PixelRect {
    #[inline]
    pub const fn new(x0: f32, y0: f32, x1: f32, y1: f32) -> Self {
        Self { x0, y0, x1, y1 }
    }

    #[inline]
    pub fn min(self) -> Vec2 {
        Vec2::new(self.x0.min(self.x1), self.y0.min(self.y1))
    }

    #[inline]
    pub fn max(self) -> Vec2 {
        Vec2::new(self.x0.max(self.x1), self.y0.max(self.y1))
    }

    #[inline]
    pub fn width(self) -> f32 {
        self.x1 - self.x0
    }

    #[inline]
    pub fn height(self) -> f32 {
        self.y1 - self.y0
    }

    /// True when the rectangle has no positive area in corner order.
    #[inline]
    pub fn is_degenerate(self) -> bool {
        self.width() <= 0.0 || self.height() <= 0.0
    }

    /// Shrinks every edge by `thickness`.
    #[inline]
    pub fn inset(self, thickness: f32) -> Self {
        self.inset_xy(thickness, thickness)
    }

    /// Shrinks the left/right edges by `side` and the top/bottom edges by `top`.
    ///
    /// The result may be degenerate when the thickness exceeds half the size.
    #[inline]
    pub fn inset_xy(self, side: f32, top: f32) -> Self {
        Self::new(self.x0 + side, self.y0 + top, self.x1 - side, self.y1 - top)
    }

    /// Half-open containment: [min, max).
    #[inline]
    pub fn contains(self, p: Vec2) -> bool {
        let (lo, hi) = (self.min(), self.max());
        p.x >= lo.x && p.y >= lo.y && p.x < hi.x && p.y < hi.y
    }

    /// True when `other` lies entirely inside `self` (edges may touch).
    #[inline]
    pub fn contains_rect(self, other: PixelRect) -> bool {
        let (lo, hi) = (self.min(), self.max());
        let (olo, ohi) = (other.min(), other.max());
        olo.x >= lo.x && olo.y >= lo.y && ohi.x <= hi.x && ohi.y <= hi.y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn r(x0: f32, y0: f32, x1: f32, y1: f32) -> PixelRect {
        PixelRect::new(x0, y0, x1, y1)
    }

    #[test]
    fn min_max_ignore_corner_order() {
        let rect = r(10.0, 20.0, 1.0, 2.0);
        assert_eq!(rect.min(), Vec2::new(1.0, 2.0));
        assert_eq!(rect.max(), Vec2::new(10.0, 20.0));
    }

    // ── inset ─────────────────────────────────────────────────────────────

    #[test]
    fn inset_shrinks_each_edge() {
        assert_eq!(r(20.0, 20.0, 250.0, 500.0).inset(5.0), r(25.0, 25.0, 245.0, 495.0));
    }

    #[test]
    fn inset_of_sample_rects_stays_non_degenerate() {
        for outer in [r(20.0, 20.0, 250.0, 500.0), r(50.0, 50.0, 280.0, 530.0)] {
            let inner = outer.inset(5.0);
            assert!(inner.width() > 0.0);
            assert!(inner.height() > 0.0);
            assert!(outer.contains_rect(inner));
        }
    }

    #[test]
    fn inset_larger_than_half_size_degenerates() {
        assert!(r(0.0, 0.0, 8.0, 100.0).inset(5.0).is_degenerate());
    }

    #[test]
    fn inset_xy_uses_separate_thickness() {
        assert_eq!(r(0.0, 0.0, 100.0, 50.0).inset_xy(2.0, 7.0), r(2.0, 7.0, 98.0, 43.0));
    }

    // ── contains ──────────────────────────────────────────────────────────

    #[test]
    fn contains_top_left_inclusive_bottom_right_exclusive() {
        let rect = r(0.0, 0.0, 10.0, 10.0);
        assert!(rect.contains(Vec2::new(0.0, 0.0)));
        assert!(rect.contains(Vec2::new(5.0, 5.0)));
        assert!(!rect.contains(Vec2::new(10.0, 10.0)));
        assert!(!rect.contains(Vec2::new(-1.0, 5.0)));
    }

    #[test]
    fn contains_rect_rejects_overhang() {
        let outer = r(0.0, 0.0, 100.0, 100.0);
        assert!(outer.contains_rect(r(10.0, 10.0, 90.0, 90.0)));
        assert!(!outer.contains_rect(r(10.0, 10.0, 110.0, 90.0)));
    }
}
