//! # Typeface Registry
//!
//! Widgets render with monospace bitmap fonts so output is identical on
//! every host. A typeface is a named family resolved to the face whose
//! pixel height is nearest the requested text size; per-widget preferences
//! store the family name, and unknown names surface as [`FontLoadError`]
//! so the call site can fall back to the default family.

use embedded_graphics::mono_font::ascii::{
    FONT_10X20, FONT_6X10, FONT_6X13, FONT_7X14, FONT_9X15, FONT_9X18,
};
use embedded_graphics::mono_font::MonoFont;
use profont::{
    PROFONT_10_POINT, PROFONT_12_POINT, PROFONT_14_POINT, PROFONT_18_POINT, PROFONT_24_POINT,
    PROFONT_7_POINT, PROFONT_9_POINT,
};
use thiserror::Error;

/// Family used when a preferred font cannot be loaded.
pub const DEFAULT_FAMILY: &str = "profont";

const PROFONT_FACES: &[&MonoFont<'static>] = &[
    &PROFONT_7_POINT,
    &PROFONT_9_POINT,
    &PROFONT_10_POINT,
    &PROFONT_12_POINT,
    &PROFONT_14_POINT,
    &PROFONT_18_POINT,
    &PROFONT_24_POINT,
];

const MONO_FACES: &[&MonoFont<'static>] = &[
    &FONT_6X10,
    &FONT_6X13,
    &FONT_7X14,
    &FONT_9X15,
    &FONT_9X18,
    &FONT_10X20,
];

const FAMILIES: &[(&str, &[&MonoFont<'static>])] =
    &[("profont", PROFONT_FACES), ("mono", MONO_FACES)];

/// Typeface loading failures.
///
/// The renderers never see these: callers resolve typefaces up front and
/// fall back to [`Typeface::default_for_size`] on error.
#[derive(Error, Debug)]
pub enum FontLoadError {
    /// The preference named a family this build does not carry
    #[error("unknown font family: {0}")]
    UnknownFamily(String),
}

/// A font family snapped to the face nearest a requested pixel size.
#[derive(Clone, Copy)]
pub struct Typeface {
    family: &'static str,
    font: &'static MonoFont<'static>,
}

impl core::fmt::Debug for Typeface {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Typeface")
            .field("family", &self.family)
            .field("line_height", &self.line_height())
            .finish()
    }
}

impl Typeface {
    /// Resolve `family` at the requested size.
    ///
    /// # Example
    /// ```
    /// use clock_widget_lib::typeface::Typeface;
    ///
    /// let face = Typeface::load("mono", 20).unwrap();
    /// assert_eq!(face.line_height(), 20);
    /// assert!(Typeface::load("comic-sans", 20).is_err());
    /// ```
    pub fn load(family: &str, size_px: u32) -> Result<Typeface, FontLoadError> {
        let &(name, faces) = FAMILIES
            .iter()
            .find(|(name, _)| *name == family)
            .ok_or_else(|| FontLoadError::UnknownFamily(family.to_string()))?;
        Ok(Typeface {
            family: name,
            font: nearest_face(faces, size_px),
        })
    }

    /// The default family at the requested size; cannot fail.
    pub fn default_for_size(size_px: u32) -> Typeface {
        Typeface::load(DEFAULT_FAMILY, size_px)
            .unwrap_or_else(|_| unreachable!("default family is always registered"))
    }

    /// Same family re-resolved at a different size (AM/PM suffix scale).
    pub fn scaled(&self, size_px: u32) -> Typeface {
        Typeface {
            family: self.family,
            font: nearest_face(faces_of(self.family), size_px),
        }
    }

    pub fn family(&self) -> &'static str {
        self.family
    }

    pub fn font(&self) -> &'static MonoFont<'static> {
        self.font
    }

    /// Height in pixels of the resolved face.
    pub fn line_height(&self) -> u32 {
        self.font.character_size.height
    }

    /// Advance width of one glyph, excluding inter-character gaps.
    pub fn char_width(&self) -> u32 {
        self.font.character_size.width
    }

    /// Rows below the baseline.
    pub fn descent(&self) -> i32 {
        self.font.character_size.height as i32 - 1 - self.font.baseline as i32
    }

    /// Gap in pixels between consecutive glyphs for the given tracking.
    ///
    /// `letter_spacing` is an em fraction of the glyph width; negative
    /// tracking tightens up to glyph overlap.
    pub fn char_gap(&self, letter_spacing: Option<f32>) -> i32 {
        let extra = match letter_spacing {
            Some(em) => (em * self.char_width() as f32).round() as i32,
            None => 0,
        };
        self.font.character_spacing as i32 + extra
    }

    /// Measured width in pixels of `text` under the given tracking.
    pub fn measure(&self, text: &str, letter_spacing: Option<f32>) -> u32 {
        let glyphs = text.chars().count() as i32;
        if glyphs == 0 {
            return 0;
        }
        let gaps = (glyphs - 1) * self.char_gap(letter_spacing);
        (glyphs * self.char_width() as i32 + gaps).max(0) as u32
    }

    /// Baseline row that vertically centers a glyph run in a band of
    /// `band_height` pixels: `band/2 + (line/2 − descent)`.
    pub fn centered_baseline(&self, band_height: u32) -> i32 {
        band_height as i32 / 2 + (self.line_height() as i32 / 2 - self.descent())
    }
}

fn faces_of(family: &str) -> &'static [&'static MonoFont<'static>] {
    FAMILIES
        .iter()
        .find(|(name, _)| *name == family)
        .map(|(_, faces)| *faces)
        .unwrap_or(PROFONT_FACES)
}

/// Face with pixel height nearest `size_px` (ties pick the smaller face).
fn nearest_face(
    faces: &'static [&'static MonoFont<'static>],
    size_px: u32,
) -> &'static MonoFont<'static> {
    faces
        .iter()
        .copied()
        .min_by_key(|f| (f.character_size.height as i32 - size_px as i32).abs())
        .expect("font family tables are non-empty")
}
