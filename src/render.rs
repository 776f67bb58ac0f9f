//! RGBA caption canvases and the glyph-rasteriser seam.
//!
//! Font rendering itself lives outside the core: the interpreter hands each
//! character to a [`GlyphRasterizer`] and composites the returned coverage.
//! Everything else drawn here (cell backgrounds, DRCS pixels, highlight
//! bars, underlines, outlines) needs no font.

use image::{GrayImage, Pixel, RgbaImage, imageops};

use crate::arib::palette::Color;

/// Turns one character into a greyscale coverage map.
pub trait GlyphRasterizer {
    /// Renders `text` centred into a `width x height` box. `None` when the
    /// face has no usable glyph; the cell then stays empty.
    fn rasterize(&mut self, text: &str, width: u32, height: u32) -> Option<GrayImage>;
}

/// Foreground/background canvas pair, allocated lazily on first draw so a
/// caption unit with no visible character produces no image at all.
pub struct CaptionCanvas {
    size: (u32, u32),
    fg: Option<RgbaImage>,
    bg: Option<RgbaImage>,
}

impl CaptionCanvas {
    pub fn new(size: (u32, u32)) -> Self {
        Self {
            size,
            fg: None,
            bg: None,
        }
    }

    /// Screen writing format changes only apply before the first draw.
    pub fn set_size(&mut self, size: (u32, u32)) {
        if self.fg.is_none() {
            self.size = size;
        }
    }

    pub fn size(&self) -> (u32, u32) {
        self.size
    }

    pub fn touched(&self) -> bool {
        self.fg.is_some()
    }

    fn prepare(&mut self) -> (&mut RgbaImage, &mut RgbaImage) {
        let (w, h) = self.size;
        (
            self.fg.get_or_insert_with(|| RgbaImage::new(w, h)),
            self.bg.get_or_insert_with(|| RgbaImage::new(w, h)),
        )
    }

    /// Paints the rectangle `[x0, x1) x [y0, y1)` on the foreground canvas,
    /// clipped to the screen.
    pub fn fill_fg(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, color: Color) {
        let size = self.size;
        let (fg, _) = self.prepare();
        fill(fg, size, x0, y0, x1, y1, color);
    }

    pub fn fill_bg(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, color: Color) {
        let size = self.size;
        let (_, bg) = self.prepare();
        fill(bg, size, x0, y0, x1, y1, color);
    }

    /// Blends a coverage map at `origin` in `color` onto the foreground.
    pub fn draw_coverage(&mut self, coverage: &GrayImage, origin: (i32, i32), color: Color) {
        let (sw, sh) = self.size;
        let (fg, _) = self.prepare();
        for (cx, cy, px) in coverage.enumerate_pixels() {
            let cov = px.0[0];
            if cov == 0 {
                continue;
            }
            let x = origin.0 + cx as i32;
            let y = origin.1 + cy as i32;
            if x < 0 || y < 0 || x >= sw as i32 || y >= sh as i32 {
                continue;
            }
            let mut src = color;
            src.0[3] = (u16::from(src.0[3]) * u16::from(cov) / 255) as u8;
            fg.get_pixel_mut(x as u32, y as u32).blend(&src);
        }
    }

    /// Background under foreground, sized to the screen writing format.
    /// `None` when nothing was drawn.
    pub fn compose(&self) -> Option<RgbaImage> {
        let fg = self.fg.as_ref()?;
        let mut out = self.bg.clone()?;
        imageops::overlay(&mut out, fg, 0, 0);
        Some(out)
    }
}

/// Rectangle fill replaces pixel values outright, like a paint call; only
/// glyph coverage is alpha-blended.
fn fill(
    image: &mut RgbaImage,
    size: (u32, u32),
    x0: i32,
    y0: i32,
    x1: i32,
    y1: i32,
    color: Color,
) {
    let x0 = x0.clamp(0, size.0 as i32) as u32;
    let y0 = y0.clamp(0, size.1 as i32) as u32;
    let x1 = x1.clamp(0, size.0 as i32) as u32;
    let y1 = y1.clamp(0, size.1 as i32) as u32;
    for y in y0..y1 {
        for x in x0..x1 {
            image.put_pixel(x, y, color);
        }
    }
}

/// Full-coverage block glyphs; stands in for a font in tests.
pub struct BlockRasterizer;

impl GlyphRasterizer for BlockRasterizer {
    fn rasterize(&mut self, _text: &str, width: u32, height: u32) -> Option<GrayImage> {
        Some(GrayImage::from_pixel(width, height, image::Luma([255])))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn untouched_canvas_composes_to_nothing() {
        let canvas = CaptionCanvas::new((960, 540));
        assert!(canvas.compose().is_none());
        assert!(!canvas.touched());
    }

    #[test]
    fn fills_are_clipped() {
        let mut canvas = CaptionCanvas::new((16, 16));
        canvas.fill_fg(-5, -5, 100, 2, Rgba([255, 0, 0, 255]));
        let out = canvas.compose().unwrap();
        assert_eq!(out.get_pixel(0, 0).0, [255, 0, 0, 255]);
        assert_eq!(out.get_pixel(15, 1).0, [255, 0, 0, 255]);
        assert_eq!(out.get_pixel(0, 2).0, [0, 0, 0, 0]);
    }

    #[test]
    fn background_sits_under_foreground() {
        let mut canvas = CaptionCanvas::new((4, 4));
        canvas.fill_bg(0, 0, 4, 4, Rgba([0, 0, 255, 255]));
        canvas.fill_fg(0, 0, 2, 4, Rgba([255, 255, 255, 255]));
        let out = canvas.compose().unwrap();
        assert_eq!(out.get_pixel(0, 0).0, [255, 255, 255, 255]);
        assert_eq!(out.get_pixel(3, 0).0, [0, 0, 255, 255]);
    }

    #[test]
    fn coverage_scales_alpha() {
        let mut canvas = CaptionCanvas::new((2, 1));
        let mut cov = GrayImage::new(2, 1);
        cov.put_pixel(0, 0, image::Luma([255]));
        cov.put_pixel(1, 0, image::Luma([0]));
        canvas.draw_coverage(&cov, (0, 0), Rgba([0, 255, 0, 255]));
        let out = canvas.compose().unwrap();
        assert_eq!(out.get_pixel(0, 0).0, [0, 255, 0, 255]);
        assert_eq!(out.get_pixel(1, 0).0[3], 0);
    }

    #[test]
    fn size_freezes_after_first_draw() {
        let mut canvas = CaptionCanvas::new((960, 540));
        canvas.set_size((1920, 1080));
        assert_eq!(canvas.size(), (1920, 1080));
        canvas.fill_fg(0, 0, 1, 1, Rgba([255, 255, 255, 255]));
        canvas.set_size((720, 480));
        assert_eq!(canvas.size(), (1920, 1080));
    }
}
