//! A 3x5 bitmap font for drawing cell labels into a raster.
//!
//! Labels are short (a digit, a letter, occasionally a number like `12` or
//! `-1.5`), so the font covers digits, ASCII letters, `.` and `-`. Anything
//! else draws as `?`.

use image::{Rgba, RgbaImage};

/// Glyph width in font pixels
pub const GLYPH_WIDTH: u32 = 3;
/// Glyph height in font pixels
pub const GLYPH_HEIGHT: u32 = 5;
/// Blank columns between adjacent glyphs
const SPACING: u32 = 1;

/// One row per entry, bit 2 is the leftmost column.
type Glyph = [u8; 5];

const UNKNOWN: Glyph = [0b111, 0b001, 0b010, 0b000, 0b010];

fn glyph(c: char) -> Glyph {
    match c.to_ascii_uppercase() {
        '0' => [0b111, 0b101, 0b101, 0b101, 0b111],
        '1' => [0b010, 0b110, 0b010, 0b010, 0b111],
        '2' => [0b111, 0b001, 0b111, 0b100, 0b111],
        '3' => [0b111, 0b001, 0b111, 0b001, 0b111],
        '4' => [0b101, 0b101, 0b111, 0b001, 0b001],
        '5' => [0b111, 0b100, 0b111, 0b001, 0b111],
        '6' => [0b111, 0b100, 0b111, 0b101, 0b111],
        '7' => [0b111, 0b001, 0b001, 0b001, 0b001],
        '8' => [0b111, 0b101, 0b111, 0b101, 0b111],
        '9' => [0b111, 0b101, 0b111, 0b001, 0b111],
        'A' => [0b010, 0b101, 0b111, 0b101, 0b101],
        'B' => [0b110, 0b101, 0b110, 0b101, 0b110],
        'C' => [0b011, 0b100, 0b100, 0b100, 0b011],
        'D' => [0b110, 0b101, 0b101, 0b101, 0b110],
        'E' => [0b111, 0b100, 0b110, 0b100, 0b111],
        'F' => [0b111, 0b100, 0b110, 0b100, 0b100],
        'G' => [0b011, 0b100, 0b101, 0b101, 0b011],
        'H' => [0b101, 0b101, 0b111, 0b101, 0b101],
        'I' => [0b111, 0b010, 0b010, 0b010, 0b111],
        'J' => [0b001, 0b001, 0b001, 0b101, 0b010],
        'K' => [0b101, 0b101, 0b110, 0b101, 0b101],
        'L' => [0b100, 0b100, 0b100, 0b100, 0b111],
        'M' => [0b101, 0b111, 0b111, 0b101, 0b101],
        'N' => [0b110, 0b101, 0b101, 0b101, 0b101],
        'O' => [0b010, 0b101, 0b101, 0b101, 0b010],
        'P' => [0b110, 0b101, 0b110, 0b100, 0b100],
        'Q' => [0b010, 0b101, 0b101, 0b110, 0b011],
        'R' => [0b110, 0b101, 0b110, 0b101, 0b101],
        'S' => [0b011, 0b100, 0b010, 0b001, 0b110],
        'T' => [0b111, 0b010, 0b010, 0b010, 0b010],
        'U' => [0b101, 0b101, 0b101, 0b101, 0b111],
        'V' => [0b101, 0b101, 0b101, 0b101, 0b010],
        'W' => [0b101, 0b101, 0b111, 0b111, 0b101],
        'X' => [0b101, 0b101, 0b010, 0b101, 0b101],
        'Y' => [0b101, 0b101, 0b010, 0b010, 0b010],
        'Z' => [0b111, 0b001, 0b010, 0b100, 0b111],
        '.' => [0b000, 0b000, 0b000, 0b000, 0b010],
        '-' => [0b000, 0b000, 0b111, 0b000, 0b000],
        _ => UNKNOWN,
    }
}

/// Unscaled width of `text` in font pixels.
pub fn text_width(text: &str) -> u32 {
    let n = text.chars().count() as u32;
    if n == 0 {
        0
    } else {
        n * GLYPH_WIDTH + (n - 1) * SPACING
    }
}

/// Largest integer scale at which `text` fits in a `width` x `height` box
/// with a one pixel margin on every side. Zero means it does not fit.
pub fn fit_scale(text: &str, width: u32, height: u32) -> u32 {
    let w = text_width(text);
    if w == 0 {
        return 0;
    }
    let inner_w = width.saturating_sub(2);
    let inner_h = height.saturating_sub(2);
    (inner_w / w).min(inner_h / GLYPH_HEIGHT)
}

/// Draw `text` centered in the box at `(x, y)` of size `width` x `height`.
///
/// Returns `false` and draws nothing when the text does not fit even at
/// scale 1.
pub fn draw_text_centered(
    image: &mut RgbaImage,
    text: &str,
    x: u32,
    y: u32,
    width: u32,
    height: u32,
    color: Rgba<u8>,
) -> bool {
    let scale = fit_scale(text, width, height);
    if scale == 0 {
        return false;
    }

    let text_w = text_width(text) * scale;
    let text_h = GLYPH_HEIGHT * scale;
    let origin_x = x + (width - text_w) / 2;
    let origin_y = y + (height - text_h) / 2;

    for (i, c) in text.chars().enumerate() {
        let gx = origin_x + i as u32 * (GLYPH_WIDTH + SPACING) * scale;
        draw_glyph(image, glyph(c), gx, origin_y, scale, color);
    }
    true
}

fn draw_glyph(image: &mut RgbaImage, glyph: Glyph, x: u32, y: u32, scale: u32, color: Rgba<u8>) {
    for (row, bits) in glyph.iter().enumerate() {
        for col in 0..GLYPH_WIDTH {
            if bits & (0b100 >> col) == 0 {
                continue;
            }
            let px = x + col * scale;
            let py = y + row as u32 * scale;
            for dy in 0..scale {
                for dx in 0..scale {
                    if px + dx < image.width() && py + dy < image.height() {
                        image.put_pixel(px + dx, py + dy, color);
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const INK: Rgba<u8> = Rgba([0, 0, 0, 255]);
    const PAPER: Rgba<u8> = Rgba([255, 255, 255, 255]);

    fn ink_count(image: &RgbaImage) -> usize {
        image.pixels().filter(|p| **p == INK).count()
    }

    #[test]
    fn test_text_width() {
        assert_eq!(text_width(""), 0);
        assert_eq!(text_width("1"), 3);
        assert_eq!(text_width("12"), 7);
    }

    #[test]
    fn test_fit_scale() {
        // 20px cell, one glyph: min(18/3, 18/5) = 3
        assert_eq!(fit_scale("1", 20, 20), 3);
        // Too small for even scale 1
        assert_eq!(fit_scale("1", 5, 5), 0);
        assert_eq!(fit_scale("", 20, 20), 0);
    }

    #[test]
    fn test_draw_digit_one() {
        let mut image = RgbaImage::from_pixel(5, 7, PAPER);
        assert!(draw_text_centered(&mut image, "1", 0, 0, 5, 7, INK));
        // Glyph '1' has 1 + 2 + 1 + 1 + 3 lit pixels
        assert_eq!(ink_count(&image), 8);
        // Margin stays clear
        assert_eq!(*image.get_pixel(0, 0), PAPER);
        // Bottom row of the glyph is fully lit
        for x in 1..4 {
            assert_eq!(*image.get_pixel(x, 5), INK);
        }
    }

    #[test]
    fn test_draw_scaled() {
        let mut image = RgbaImage::from_pixel(20, 20, PAPER);
        assert!(draw_text_centered(&mut image, "-", 0, 0, 20, 20, INK));
        // '-' is 3 pixels, scaled 3x in each direction
        assert_eq!(ink_count(&image), 27);
    }

    #[test]
    fn test_draw_too_small() {
        let mut image = RgbaImage::from_pixel(4, 4, PAPER);
        assert!(!draw_text_centered(&mut image, "A", 0, 0, 4, 4, INK));
        assert_eq!(ink_count(&image), 0);
    }

    #[test]
    fn test_lowercase_and_unknown() {
        assert_eq!(glyph('a'), glyph('A'));
        assert_eq!(glyph('%'), UNKNOWN);
    }
}
