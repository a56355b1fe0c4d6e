//! # ARGB Widget Bitmaps
//!
//! The render target shared by every widget renderer: an owned 32-bit ARGB
//! framebuffer that implements [`DrawTarget`] so all drawing goes through
//! `embedded-graphics` primitives. The host surface consumes the raw pixel
//! data; development mode prints an ASCII preview instead.
//!
//! Widgets are composited over whatever wallpaper the host shows, so the
//! buffer keeps a real alpha channel and starts fully transparent.

use core::convert::Infallible;
use embedded_graphics::pixelcolor::raw::RawU32;
use embedded_graphics::pixelcolor::PixelColor;
use embedded_graphics::prelude::*;

/// 32-bit ARGB color with the alpha channel in the top byte.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct Argb(u32);

impl Argb {
    pub const TRANSPARENT: Argb = Argb(0x0000_0000);
    pub const BLACK: Argb = Argb(0xFF00_0000);
    pub const WHITE: Argb = Argb(0xFFFF_FFFF);

    /// Color from explicit channels.
    pub const fn new(a: u8, r: u8, g: u8, b: u8) -> Self {
        Argb((a as u32) << 24 | (r as u32) << 16 | (g as u32) << 8 | b as u32)
    }

    /// Color from a packed `0xAARRGGBB` word.
    pub const fn from_u32(value: u32) -> Self {
        Argb(value)
    }

    /// Packed `0xAARRGGBB` value.
    pub const fn value(self) -> u32 {
        self.0
    }

    pub const fn alpha(self) -> u8 {
        (self.0 >> 24) as u8
    }

    pub const fn red(self) -> u8 {
        (self.0 >> 16) as u8
    }

    pub const fn green(self) -> u8 {
        (self.0 >> 8) as u8
    }

    pub const fn blue(self) -> u8 {
        self.0 as u8
    }

    /// Source-in tint: keep this color's alpha, take the tint's channels.
    ///
    /// Used to recolor glyphs and condition icons to the widget text color.
    pub const fn with_rgb_of(self, tint: Argb) -> Argb {
        Argb((self.0 & 0xFF00_0000) | (tint.0 & 0x00FF_FFFF))
    }

    /// Source-over blend of `self` on top of `below`.
    pub fn over(self, below: Argb) -> Argb {
        let sa = self.alpha() as u32;
        if sa == 0xFF {
            return self;
        }
        if sa == 0 {
            return below;
        }
        let da = below.alpha() as u32;
        let inv = 0xFF - sa;
        let out_a = sa + da * inv / 0xFF;
        if out_a == 0 {
            return Argb::TRANSPARENT;
        }
        let blend = |s: u8, d: u8| -> u32 {
            let s = s as u32 * sa;
            let d = d as u32 * da * inv / 0xFF;
            (s + d) / out_a
        };
        Argb::new(
            out_a as u8,
            blend(self.red(), below.red()) as u8,
            blend(self.green(), below.green()) as u8,
            blend(self.blue(), below.blue()) as u8,
        )
    }
}

impl PixelColor for Argb {
    type Raw = RawU32;
}

impl From<RawU32> for Argb {
    fn from(raw: RawU32) -> Self {
        Argb(raw.into_inner())
    }
}

impl From<Argb> for RawU32 {
    fn from(color: Argb) -> Self {
        RawU32::new(color.0)
    }
}

/// Owned ARGB raster produced by the widget renderers.
///
/// Pixels start fully transparent. Drawing through [`DrawTarget`] replaces
/// pixels (shadow passes run before the main text, so replacement gives the
/// right stacking); icon compositing uses the alpha-aware [`blit`].
///
/// Zero-area bitmaps are legal: they hold no pixels and all drawing on them
/// is a no-op.
///
/// [`blit`]: WidgetBitmap::blit
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WidgetBitmap {
    width: u32,
    height: u32,
    pixels: Vec<Argb>,
}

impl WidgetBitmap {
    /// Transparent bitmap of the given dimensions.
    pub fn new(width: u32, height: u32) -> Self {
        WidgetBitmap {
            width,
            height,
            pixels: vec![Argb::TRANSPARENT; (width * height) as usize],
        }
    }

    /// Bitmap pre-filled with one color.
    pub fn filled(width: u32, height: u32, color: Argb) -> Self {
        WidgetBitmap {
            width,
            height,
            pixels: vec![color; (width * height) as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    /// Raw pixel row-major view, for the host surface.
    pub fn pixels(&self) -> &[Argb] {
        &self.pixels
    }

    /// Pixel at `(x, y)`, or `None` outside the raster.
    pub fn get(&self, x: i32, y: i32) -> Option<Argb> {
        if x < 0 || y < 0 || x as u32 >= self.width || y as u32 >= self.height {
            return None;
        }
        Some(self.pixels[(y as u32 * self.width + x as u32) as usize])
    }

    /// Replace the pixel at `(x, y)`; out-of-bounds writes are dropped.
    pub fn set(&mut self, x: i32, y: i32, color: Argb) {
        if x < 0 || y < 0 || x as u32 >= self.width || y as u32 >= self.height {
            return;
        }
        self.pixels[(y as u32 * self.width + x as u32) as usize] = color;
    }

    /// Source-over blend a single pixel.
    pub fn blend(&mut self, x: i32, y: i32, color: Argb) {
        if let Some(below) = self.get(x, y) {
            self.set(x, y, color.over(below));
        }
    }

    /// Composite `src` over this bitmap with its top-left at `origin`.
    ///
    /// Source pixels outside the destination are clipped.
    pub fn blit(&mut self, src: &WidgetBitmap, origin: Point) {
        for y in 0..src.height as i32 {
            for x in 0..src.width as i32 {
                if let Some(color) = src.get(x, y) {
                    if color.alpha() != 0 {
                        self.blend(origin.x + x, origin.y + y, color);
                    }
                }
            }
        }
    }

    /// Copy with every pixel recolored to `tint`, keeping alpha (source-in).
    pub fn tinted(&self, tint: Argb) -> WidgetBitmap {
        WidgetBitmap {
            width: self.width,
            height: self.height,
            pixels: self.pixels.iter().map(|p| p.with_rgb_of(tint)).collect(),
        }
    }

    /// Count of pixels with a non-zero alpha channel.
    pub fn opaque_pixels(&self) -> usize {
        self.pixels.iter().filter(|p| p.alpha() != 0).count()
    }

    /// ASCII-art preview for terminal development mode.
    ///
    /// Downsamples to at most `max_cols` columns; character cells are
    /// sampled two rows per column to roughly match terminal glyph aspect.
    pub fn ascii_art(&self, max_cols: u32) -> String {
        if self.is_empty() || max_cols == 0 {
            return String::new();
        }
        let step_x = self.width.div_ceil(max_cols).max(1);
        let step_y = step_x * 2;
        let mut out = String::new();
        let mut y = 0;
        while y < self.height {
            let mut x = 0;
            while x < self.width {
                let px = self.get(x as i32, y as i32).unwrap_or_default();
                out.push(shade_char(px));
                x += step_x;
            }
            out.push('\n');
            y += step_y;
        }
        out
    }
}

/// Map a pixel to a terminal shade by coverage (alpha-weighted luma).
fn shade_char(px: Argb) -> char {
    if px.alpha() < 0x20 {
        return ' ';
    }
    let luma =
        (px.red() as u32 * 77 + px.green() as u32 * 150 + px.blue() as u32 * 29) >> 8;
    let weighted = luma * px.alpha() as u32 / 0xFF;
    match weighted {
        0..=63 => '.',
        64..=127 => ':',
        128..=191 => '*',
        _ => '#',
    }
}

impl OriginDimensions for WidgetBitmap {
    fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}

impl DrawTarget for WidgetBitmap {
    type Color = Argb;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            self.set(point.x, point.y, color);
        }
        Ok(())
    }
}
