use std::path::PathBuf;

use nin_engine::coords::PixelRect;
use nin_engine::paint::Color;
use nin_engine::render::OutlineStyle;
use winit::dpi::PhysicalSize;

/// Sample scene parameters.
#[derive(Debug, Clone)]
pub struct DemoConfig {
    /// Client-area size; meshes are built once for this size.
    pub surface: PhysicalSize<u32>,
    /// The two overlapping rectangles of the outlined group, in pixels.
    pub rects: [PixelRect; 2],
    pub style: OutlineStyle,
    pub clear: Color,
    /// Overrides shader directory resolution when set.
    pub shader_dir: Option<PathBuf>,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            surface: PhysicalSize::new(800, 600),
            rects: [
                PixelRect::new(20.0, 20.0, 250.0, 500.0),
                PixelRect::new(50.0, 50.0, 280.0, 530.0),
            ],
            style: OutlineStyle {
                side_thickness: 5.0,
                top_thickness: 5.0,
                border: Color::GREEN,
                inset: Color::RED,
            },
            clear: Color::BLACK,
            shader_dir: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insets_stay_inside_their_rects() {
        let c = DemoConfig::default();
        for r in c.rects {
            let inner = r.inset_xy(c.style.side_thickness, c.style.top_thickness);
            assert!(!inner.is_degenerate());
            assert!(r.contains_rect(inner));
        }
    }
}
