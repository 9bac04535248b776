use super::Vec2;

/// Render-surface size in pixels.
///
/// Only used to convert pixel positions to NDC; it is not retained by meshes.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    #[inline]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn from_physical(width: u32, height: u32) -> Self {
        Self::new(width as f32, height as f32)
    }

    #[inline]
    pub fn is_valid(self) -> bool {
        self.width > 0.0 && self.height > 0.0 && self.width.is_finite() && self.height.is_finite()
    }

    /// Maps a pixel position to normalized device coordinates.
    ///
    /// The half-pixel offset puts sample positions on pixel centers; Y is flipped
    /// because pixel Y grows downward while NDC Y grows upward.
    #[inline]
    pub fn to_ndc(self, p: Vec2) -> Vec2 {
        Vec2::new(
            2.0 * (p.x - 0.5) / self.width - 1.0,
            1.0 - 2.0 * (p.y - 0.5) / self.height,
        )
    }

    /// Inverse of [`Viewport::to_ndc`].
    #[inline]
    pub fn to_pixel(self, ndc: Vec2) -> Vec2 {
        Vec2::new(
            (ndc.x + 1.0) * self.width / 2.0 + 0.5,
            (1.0 - ndc.y) * self.height / 2.0 + 0.5,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VP: Viewport = Viewport::new(800.0, 600.0);

    #[test]
    fn ndc_stays_in_unit_range_inside_surface() {
        // Starts at the first pixel center: x=0 maps to -1 - 1/w (-1.00125 at w=800).
        for px in [0.5, 1.0, 100.0, 400.0, 799.0, 800.0] {
            for py in [0.5, 1.0, 300.0, 599.0, 600.0] {
                let n = VP.to_ndc(Vec2::new(px, py));
                assert!((-1.0..=1.0).contains(&n.x), "x {px} -> {}", n.x);
                assert!((-1.0..=1.0).contains(&n.y), "y {py} -> {}", n.y);
            }
        }
    }

    #[test]
    fn pixel_zero_lies_half_a_pixel_outside() {
        let n = VP.to_ndc(Vec2::new(0.0, 0.0));
        assert!((n.x - (-1.0 - 1.0 / 800.0)).abs() < 1e-6, "{}", n.x);
        assert!((n.y - (1.0 + 1.0 / 600.0)).abs() < 1e-6, "{}", n.y);
    }

    #[test]
    fn ndc_x_increases_and_y_decreases() {
        let a = VP.to_ndc(Vec2::new(10.0, 10.0));
        let b = VP.to_ndc(Vec2::new(11.0, 11.0));
        assert!(b.x > a.x);
        assert!(b.y < a.y);
    }

    #[test]
    fn pixel_center_of_origin_maps_to_top_left_corner() {
        assert_eq!(VP.to_ndc(Vec2::new(0.5, 0.5)), Vec2::new(-1.0, 1.0));
    }

    #[test]
    fn to_pixel_inverts_to_ndc() {
        let p = Vec2::new(245.0, 495.0);
        let back = VP.to_pixel(VP.to_ndc(p));
        assert!((back.x - p.x).abs() < 1e-3);
        assert!((back.y - p.y).abs() < 1e-3);
    }

    #[test]
    fn zero_size_is_invalid() {
        assert!(!Viewport::new(0.0, 600.0).is_valid());
        assert!(VP.is_valid());
    }
}
