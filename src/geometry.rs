use iced::{Point, Size};

use crate::error::ClockError;
use crate::pointer::PixelRatio;

/// The drawing surface as the host describes it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// On-screen size in layout units.
    pub size: Size,
    pub pixel_ratio: PixelRatio,
}

impl Viewport {
    pub fn new(size: Size, pixel_ratio: PixelRatio) -> Self {
        Self { size, pixel_ratio }
    }

    /// Check that the surface can be drawn on at all.
    pub fn validate(&self) -> Result<(), ClockError> {
        let Size { width, height } = self.size;
        if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
            return Err(ClockError::EmptySurface { width, height });
        }
        let ratio = self.pixel_ratio.value();
        if !(ratio.is_finite() && ratio > 0.0) {
            return Err(ClockError::InvalidPixelRatio(ratio));
        }
        Ok(())
    }
}

/// Pixel geometry of the dial, derived from the viewport.
///
/// All lengths are in surface pixels (layout units times the pixel ratio).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Geometry {
    pub ratio: f32,
    pub size: Size,
    pub center: Point,
    pub dial_radius: f32,
    /// Radius of the center dot and of the solid part of each handle.
    pub center_radius: f32,
    /// Radius of each handle's disc, which is also its hit zone.
    pub handle_radius: f32,
}

impl Geometry {
    pub fn new(viewport: &Viewport) -> Self {
        let ratio = viewport.pixel_ratio.value();
        let width = viewport.size.width * ratio;
        let height = viewport.size.height * ratio;
        let min_side = width.min(height);
        let center_radius = (min_side * 0.02).max(4.0).floor();

        Self {
            ratio,
            size: Size::new(width, height),
            center: Point::new((width / 2.0).floor(), (height / 2.0).floor()),
            dial_radius: (min_side * 0.49).floor(),
            center_radius,
            handle_radius: center_radius * 4.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scales_by_pixel_ratio() {
        let viewport = Viewport::new(Size::new(300.0, 201.0), PixelRatio::new(2.0, 1.0));
        let geometry = Geometry::new(&viewport);
        assert_eq!(geometry.size, Size::new(600.0, 402.0));
        assert_eq!(geometry.center, Point::new(300.0, 201.0));
        assert_eq!(geometry.dial_radius, 196.0);
        assert_eq!(geometry.center_radius, 8.0);
        assert_eq!(geometry.handle_radius, 32.0);
    }

    #[test]
    fn small_surfaces_keep_a_minimum_handle() {
        let viewport = Viewport::new(Size::new(100.0, 100.0), PixelRatio::IDENTITY);
        let geometry = Geometry::new(&viewport);
        assert_eq!(geometry.center_radius, 4.0);
        assert_eq!(geometry.handle_radius, 16.0);
    }

    #[test]
    fn rejects_degenerate_surfaces() {
        let empty = Viewport::new(Size::new(0.0, 100.0), PixelRatio::IDENTITY);
        assert!(matches!(
            empty.validate(),
            Err(ClockError::EmptySurface { .. })
        ));

        let bad_ratio = Viewport::new(Size::new(100.0, 100.0), PixelRatio::new(0.0, 1.0));
        assert_eq!(bad_ratio.validate(), Err(ClockError::InvalidPixelRatio(0.0)));
    }
}
