use crate::render::Canvas;
use thiserror::Error;

/// Glyphs from darkest to brightest
pub const PALETTE: &str = ".,-~:;=!*#$@";

#[derive(Error, Debug, PartialEq)]
pub enum RasterizerError {
    #[error("Palette must contain at least one glyph.")]
    EmptyPalette,
}

/// Turns luminance values into printable characters
pub trait Rasterizer {
    fn pixel_to_char(&self, luminance: f64) -> char;

    /// One string per row, glyphs separated by a single space
    fn pixels_to_lines(&self, pixels: &[f64], width: usize) -> Vec<String> {
        pixels
            .chunks(width.max(1))
            .map(|row| {
                let glyphs: Vec<String> = row
                    .iter()
                    .map(|&l| self.pixel_to_char(l).to_string())
                    .collect();
                glyphs.join(" ")
            })
            .collect()
    }

    fn canvas_to_lines(&self, canvas: &Canvas) -> Vec<String> {
        self.pixels_to_lines(&canvas.luminance, canvas.width())
    }
}

/// Assigns one glyph per unit of luminance.
/// Anything below zero gets the first glyph and anything past the end gets the last.
#[derive(Clone, Debug, PartialEq)]
pub struct PaletteRasterizer {
    gradient: Vec<char>,
}

impl PaletteRasterizer {
    pub fn new(gradient: Vec<char>) -> Result<Self, RasterizerError> {
        if gradient.is_empty() {
            return Err(RasterizerError::EmptyPalette);
        }
        Ok(Self { gradient })
    }
    pub fn gradient(&self) -> &[char] {
        &self.gradient
    }
}

impl Default for PaletteRasterizer {
    fn default() -> Self {
        Self {
            gradient: PALETTE.chars().collect(),
        }
    }
}

impl Rasterizer for PaletteRasterizer {
    fn pixel_to_char(&self, luminance: f64) -> char {
        let last = self.gradient.len() - 1;
        // NaN falls into the first branch
        if !(luminance >= 0.0) {
            self.gradient[0]
        } else if luminance > last as f64 {
            self.gradient[last]
        } else {
            self.gradient[luminance.floor() as usize]
        }
    }
}

/// Glyph for a luminance value using the default palette
pub fn glyph(luminance: f64) -> char {
    PaletteRasterizer::default().pixel_to_char(luminance)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::UNLIT;

    #[test]
    fn test_palette_boundaries() {
        assert_eq!(glyph(-0.0001), '.');
        assert_eq!(glyph(0.0), '.');
        assert_eq!(glyph(0.9999), '.');
        assert_eq!(glyph(1.0), ',');
        assert_eq!(glyph(5.47), ';');
        assert_eq!(glyph(10.5), '$');
        assert_eq!(glyph(11.0), '@');
        assert_eq!(glyph(11.0001), '@');
        assert_eq!(glyph(f64::INFINITY), '@');
    }

    #[test]
    fn test_unlit_and_nan_are_darkest() {
        assert_eq!(glyph(UNLIT), '.');
        assert_eq!(glyph(f64::NAN), '.');
    }

    #[test]
    fn test_every_index_maps_to_its_glyph() {
        let rasterizer = PaletteRasterizer::default();
        for (i, c) in PALETTE.chars().enumerate() {
            assert_eq!(rasterizer.pixel_to_char(i as f64 + 0.5), c);
        }
        assert_eq!(rasterizer.gradient().len(), 12);
    }

    #[test]
    fn test_empty_palette_error() {
        assert_eq!(
            PaletteRasterizer::new(vec![]),
            Err(RasterizerError::EmptyPalette)
        );
    }

    #[test]
    fn test_custom_palette() {
        let rasterizer = PaletteRasterizer::new(vec![' ', '#']).unwrap();
        assert_eq!(rasterizer.pixel_to_char(-3.0), ' ');
        assert_eq!(rasterizer.pixel_to_char(0.5), ' ');
        assert_eq!(rasterizer.pixel_to_char(1.0), '#');
        assert_eq!(rasterizer.pixel_to_char(7.0), '#');
    }

    #[test]
    fn test_pixels_to_lines() {
        let rasterizer = PaletteRasterizer::default();
        let pixels = vec![UNLIT, 1.0, 2.0, 11.5, 3.2, -1.0];
        let lines = rasterizer.pixels_to_lines(&pixels, 3);
        assert_eq!(lines, vec![". , -".to_string(), "@ ~ .".to_string()]);
    }
}
