//! Caption overlay using a built-in 5×7 bitmap font.

use crate::pixel::{Channel, Pixel};
use crate::raster::Raster;

const GLYPH_WIDTH: u32 = 5;
const GLYPH_HEIGHT: u32 = 7;
const GLYPH_SPACING: u32 = 1;

/// First character covered by [`GLYPHS`].
const FIRST_GLYPH: u8 = b' ';

/// Rows of each glyph from top to bottom; bit 4 is the leftmost column.
/// Covers ASCII 0x20..=0x5F. Lowercase letters are drawn as uppercase.
#[rustfmt::skip]
const GLYPHS: [[u8; 7]; 64] = [
    [0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00], // ' '
    [0x04, 0x04, 0x04, 0x04, 0x04, 0x00, 0x04], // '!'
    [0x0A, 0x0A, 0x0A, 0x00, 0x00, 0x00, 0x00], // '"'
    [0x0A, 0x0A, 0x1F, 0x0A, 0x1F, 0x0A, 0x0A], // '#'
    [0x04, 0x0F, 0x14, 0x0E, 0x05, 0x1E, 0x04], // '$'
    [0x18, 0x19, 0x02, 0x04, 0x08, 0x13, 0x03], // '%'
    [0x0C, 0x12, 0x14, 0x08, 0x15, 0x12, 0x0D], // '&'
    [0x0C, 0x04, 0x08, 0x00, 0x00, 0x00, 0x00], // '\''
    [0x02, 0x04, 0x08, 0x08, 0x08, 0x04, 0x02], // '('
    [0x08, 0x04, 0x02, 0x02, 0x02, 0x04, 0x08], // ')'
    [0x00, 0x04, 0x15, 0x0E, 0x15, 0x04, 0x00], // '*'
    [0x00, 0x04, 0x04, 0x1F, 0x04, 0x04, 0x00], // '+'
    [0x00, 0x00, 0x00, 0x00, 0x0C, 0x04, 0x08], // ','
    [0x00, 0x00, 0x00, 0x1F, 0x00, 0x00, 0x00], // '-'
    [0x00, 0x00, 0x00, 0x00, 0x00, 0x0C, 0x0C], // '.'
    [0x00, 0x01, 0x02, 0x04, 0x08, 0x10, 0x00], // '/'
    [0x0E, 0x11, 0x13, 0x15, 0x19, 0x11, 0x0E], // '0'
    [0x04, 0x0C, 0x04, 0x04, 0x04, 0x04, 0x0E], // '1'
    [0x0E, 0x11, 0x01, 0x02, 0x04, 0x08, 0x1F], // '2'
    [0x1F, 0x02, 0x04, 0x02, 0x01, 0x11, 0x0E], // '3'
    [0x02, 0x06, 0x0A, 0x12, 0x1F, 0x02, 0x02], // '4'
    [0x1F, 0x10, 0x1E, 0x01, 0x01, 0x11, 0x0E], // '5'
    [0x06, 0x08, 0x10, 0x1E, 0x11, 0x11, 0x0E], // '6'
    [0x1F, 0x01, 0x02, 0x04, 0x08, 0x08, 0x08], // '7'
    [0x0E, 0x11, 0x11, 0x0E, 0x11, 0x11, 0x0E], // '8'
    [0x0E, 0x11, 0x11, 0x0F, 0x01, 0x02, 0x0C], // '9'
    [0x00, 0x0C, 0x0C, 0x00, 0x0C, 0x0C, 0x00], // ':'
    [0x00, 0x0C, 0x0C, 0x00, 0x0C, 0x04, 0x08], // ';'
    [0x02, 0x04, 0x08, 0x10, 0x08, 0x04, 0x02], // '<'
    [0x00, 0x00, 0x1F, 0x00, 0x1F, 0x00, 0x00], // '='
    [0x08, 0x04, 0x02, 0x01, 0x02, 0x04, 0x08], // '>'
    [0x0E, 0x11, 0x01, 0x02, 0x04, 0x00, 0x04], // '?'
    [0x0E, 0x11, 0x01, 0x0D, 0x15, 0x15, 0x0E], // '@'
    [0x0E, 0x11, 0x11, 0x11, 0x1F, 0x11, 0x11], // 'A'
    [0x1E, 0x11, 0x11, 0x1E, 0x11, 0x11, 0x1E], // 'B'
    [0x0E, 0x11, 0x10, 0x10, 0x10, 0x11, 0x0E], // 'C'
    [0x1C, 0x12, 0x11, 0x11, 0x11, 0x12, 0x1C], // 'D'
    [0x1F, 0x10, 0x10, 0x1E, 0x10, 0x10, 0x1F], // 'E'
    [0x1F, 0x10, 0x10, 0x1E, 0x10, 0x10, 0x10], // 'F'
    [0x0E, 0x11, 0x10, 0x17, 0x11, 0x11, 0x0F], // 'G'
    [0x11, 0x11, 0x11, 0x1F, 0x11, 0x11, 0x11], // 'H'
    [0x0E, 0x04, 0x04, 0x04, 0x04, 0x04, 0x0E], // 'I'
    [0x07, 0x02, 0x02, 0x02, 0x02, 0x12, 0x0C], // 'J'
    [0x11, 0x12, 0x14, 0x18, 0x14, 0x12, 0x11], // 'K'
    [0x10, 0x10, 0x10, 0x10, 0x10, 0x10, 0x1F], // 'L'
    [0x11, 0x1B, 0x15, 0x15, 0x11, 0x11, 0x11], // 'M'
    [0x11, 0x11, 0x19, 0x15, 0x13, 0x11, 0x11], // 'N'
    [0x0E, 0x11, 0x11, 0x11, 0x11, 0x11, 0x0E], // 'O'
    [0x1E, 0x11, 0x11, 0x1E, 0x10, 0x10, 0x10], // 'P'
    [0x0E, 0x11, 0x11, 0x11, 0x15, 0x12, 0x0D], // 'Q'
    [0x1E, 0x11, 0x11, 0x1E, 0x14, 0x12, 0x11], // 'R'
    [0x0F, 0x10, 0x10, 0x0E, 0x01, 0x01, 0x1E], // 'S'
    [0x1F, 0x04, 0x04, 0x04, 0x04, 0x04, 0x04], // 'T'
    [0x11, 0x11, 0x11, 0x11, 0x11, 0x11, 0x0E], // 'U'
    [0x11, 0x11, 0x11, 0x11, 0x11, 0x0A, 0x04], // 'V'
    [0x11, 0x11, 0x11, 0x15, 0x15, 0x15, 0x0A], // 'W'
    [0x11, 0x11, 0x0A, 0x04, 0x0A, 0x11, 0x11], // 'X'
    [0x11, 0x11, 0x11, 0x0A, 0x04, 0x04, 0x04], // 'Y'
    [0x1F, 0x01, 0x02, 0x04, 0x08, 0x10, 0x1F], // 'Z'
    [0x0E, 0x08, 0x08, 0x08, 0x08, 0x08, 0x0E], // '['
    [0x00, 0x10, 0x08, 0x04, 0x02, 0x01, 0x00], // '\\'
    [0x0E, 0x02, 0x02, 0x02, 0x02, 0x02, 0x0E], // ']'
    [0x04, 0x0A, 0x11, 0x00, 0x00, 0x00, 0x00], // '^'
    [0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x1F], // '_'
];

/// Bitmap for `c`. Characters without a glyph are drawn as `?`.
fn glyph(c: char) -> &'static [u8; 7] {
    let c = c.to_ascii_uppercase();
    let index = if c.is_ascii() && (FIRST_GLYPH..FIRST_GLYPH + GLYPHS.len() as u8).contains(&(c as u8)) {
        (c as u8 - FIRST_GLYPH) as usize
    } else {
        (b'?' - FIRST_GLYPH) as usize
    };
    &GLYPHS[index]
}

/// How a caption is drawn.
#[derive(Debug, Clone, Copy)]
pub struct TextStyle<T: Channel> {
    /// Foreground color
    pub color: Pixel<T>,
    /// Opacity of the foreground, 0 = invisible, 1 = opaque
    pub alpha: f64,
    /// Integer magnification of the 5×7 glyphs
    pub scale: u32,
}

impl<T: Channel> TextStyle<T> {
    pub fn new(color: Pixel<T>) -> Self {
        Self {
            color,
            alpha: 1.0,
            scale: 1,
        }
    }

    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha.clamp(0.0, 1.0);
        self
    }

    pub fn with_scale(mut self, scale: u32) -> Self {
        self.scale = scale.max(1);
        self
    }
}

/// Size in pixels of `text` rendered at `scale`.
pub fn text_size(text: &str, scale: u32) -> (u32, u32) {
    let n = text.chars().count() as u32;
    let width = if n == 0 {
        0
    } else {
        (n * (GLYPH_WIDTH + GLYPH_SPACING) - GLYPH_SPACING) * scale
    };
    (width, GLYPH_HEIGHT * scale)
}

impl<T: Channel> Raster<T> {
    /// Blend `text` into the raster with its top-left corner at `(x, y)`.
    ///
    /// The position may be negative or partly outside the raster; glyph
    /// pixels that fall outside are skipped.
    pub fn draw_text(&mut self, x: i64, y: i64, text: &str, style: &TextStyle<T>) {
        let scale = style.scale.max(1) as i64;
        let advance = (GLYPH_WIDTH + GLYPH_SPACING) as i64 * scale;

        for (i, c) in text.chars().enumerate() {
            let origin_x = x + i as i64 * advance;
            for (row, bits) in glyph(c).iter().enumerate() {
                for col in 0..GLYPH_WIDTH {
                    if bits & (1 << (GLYPH_WIDTH - 1 - col)) == 0 {
                        continue;
                    }
                    let px = origin_x + col as i64 * scale;
                    let py = y + row as i64 * scale;
                    self.blend_block(px, py, scale, style);
                }
            }
        }
    }

    fn blend_block(&mut self, x: i64, y: i64, size: i64, style: &TextStyle<T>) {
        for dy in 0..size {
            for dx in 0..size {
                let (px, py) = (x + dx, y + dy);
                if px < 0 || py < 0 || px >= self.width() as i64 || py >= self.height() as i64 {
                    continue;
                }
                let (px, py) = (px as u32, py as u32);
                let under = self.get(px, py);
                let blended = Pixel::mix(style.color, under, style.alpha, 1.0 - style.alpha);
                self.set(px, py, blended);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pixel::Pixel8;

    #[test]
    fn test_glyph_lookup() {
        assert_eq!(glyph('a'), glyph('A'));
        assert_eq!(glyph('~'), glyph('?'));
        assert_eq!(glyph('é'), glyph('?'));
        assert_eq!(glyph(' '), &[0; 7]);
    }

    #[test]
    fn test_text_size() {
        assert_eq!(text_size("", 1), (0, 7));
        assert_eq!(text_size("A", 1), (5, 7));
        assert_eq!(text_size("AB", 2), (22, 14));
    }

    #[test]
    fn test_draw_opaque() {
        let mut raster = Raster::<u8>::new(12, 8);
        raster.draw_text(0, 0, "T", &TextStyle::new(Pixel8::white()));

        // Top bar of 'T'
        for x in 0..5 {
            assert_eq!(raster.get(x, 0), Pixel8::white());
        }
        // Stem
        assert_eq!(raster.get(2, 6), Pixel8::white());
        assert_eq!(raster.get(0, 6), Pixel8::black());
        // Nothing past the glyph
        assert_eq!(raster.get(6, 0), Pixel8::black());
    }

    #[test]
    fn test_draw_alpha_blends() {
        let mut raster = Raster::<u8>::new(5, 7);
        let style = TextStyle::new(Pixel8::white()).with_alpha(0.5);
        raster.draw_text(0, 0, "_", &style);
        assert_eq!(raster.get(0, 6), Pixel8::new(128, 128, 128));
        assert_eq!(raster.get(0, 5), Pixel8::black());
    }

    #[test]
    fn test_draw_clips_at_edges() {
        let mut raster = Raster::<u8>::new(4, 4);
        let style = TextStyle::new(Pixel8::white()).with_scale(3);
        raster.draw_text(-2, -2, "HELLO", &style);
        raster.draw_text(3, 3, "W", &style);
        assert_eq!(raster.get(3, 3), Pixel8::white());
    }
}
