//! Mapping from rendered-image rectangles to page coordinates.

use layout_tagger_core::{DeviceRect, Error, PageRect, RenderingSettings, Result};

/// Converts device rectangles of a rendered page into page space.
///
/// The renderer that produced the page image owns this mapping; closures of
/// the right shape implement it too.
pub trait PageTransform {
    /// Map a device rectangle to page space.
    fn rect_to_page(&self, rect: &DeviceRect) -> PageRect;
}

impl<F> PageTransform for F
where
    F: Fn(&DeviceRect) -> PageRect,
{
    fn rect_to_page(&self, rect: &DeviceRect) -> PageRect {
        self(rect)
    }
}

/// Page view of an unrotated page rendered at a uniform zoom.
///
/// Device pixels are scaled down by the zoom and the y axis is flipped so the
/// result has a bottom-left origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomTransform {
    zoom: f64,
    page_height: f64,
}

impl ZoomTransform {
    /// Create a transform for a page of `page_height` units rendered at `zoom`.
    pub fn new(zoom: f64, page_height: f64) -> Result<Self> {
        RenderingSettings { zoom }.validate()?;
        if !page_height.is_finite() || page_height < 0.0 {
            return Err(Error::Config(format!(
                "page height must be a non-negative number, got {page_height}"
            )));
        }
        Ok(Self { zoom, page_height })
    }

    /// Zoom the page was rendered with.
    pub fn zoom(&self) -> f64 {
        self.zoom
    }
}

impl PageTransform for ZoomTransform {
    fn rect_to_page(&self, rect: &DeviceRect) -> PageRect {
        let x1 = f64::from(rect.left) / self.zoom;
        let x2 = f64::from(rect.right) / self.zoom;
        let y1 = self.page_height - f64::from(rect.top) / self.zoom;
        let y2 = self.page_height - f64::from(rect.bottom) / self.zoom;

        PageRect::new(x1.min(x2), y1.min(y2), x1.max(x2), y1.max(y2))
    }
}
