//! Tiny bitmap font
//!
//! Glyphs are 3x5 pixels on a 4x6 cell. Each row is three bits, leftmost
//! pixel in the high bit. Lowercase maps to uppercase; unknown characters
//! render as blanks but still advance.

/// Horizontal distance between characters
pub const CHAR_ADVANCE: i32 = 4;
/// Vertical distance between lines
pub const LINE_HEIGHT: i32 = 6;
pub const GLYPH_WIDTH: i32 = 3;
pub const GLYPH_HEIGHT: i32 = 5;

/// Rows of the glyph for `c`, top to bottom
pub fn glyph(c: char) -> [u8; 5] {
    match c.to_ascii_uppercase() {
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
        'U' => [0b101, 0b101, 0b101, 0b101, 0b011],
        'V' => [0b101, 0b101, 0b101, 0b010, 0b010],
        'W' => [0b101, 0b101, 0b111, 0b111, 0b101],
        'X' => [0b101, 0b101, 0b010, 0b101, 0b101],
        'Y' => [0b101, 0b101, 0b010, 0b010, 0b010],
        'Z' => [0b111, 0b001, 0b010, 0b100, 0b111],
        '0' => [0b111, 0b101, 0b101, 0b101, 0b111],
        '1' => [0b010, 0b110, 0b010, 0b010, 0b111],
        '2' => [0b110, 0b001, 0b010, 0b100, 0b111],
        '3' => [0b110, 0b001, 0b010, 0b001, 0b110],
        '4' => [0b101, 0b101, 0b111, 0b001, 0b001],
        '5' => [0b111, 0b100, 0b110, 0b001, 0b110],
        '6' => [0b011, 0b100, 0b111, 0b101, 0b111],
        '7' => [0b111, 0b001, 0b001, 0b010, 0b010],
        '8' => [0b111, 0b101, 0b111, 0b101, 0b111],
        '9' => [0b111, 0b101, 0b111, 0b001, 0b110],
        '!' => [0b010, 0b010, 0b010, 0b000, 0b010],
        '-' => [0b000, 0b000, 0b111, 0b000, 0b000],
        ':' => [0b000, 0b010, 0b000, 0b010, 0b000],
        '.' => [0b000, 0b000, 0b000, 0b000, 0b010],
        _ => [0; 5],
    }
}

/// Pixel offsets (relative to the top-left of the text) lit by `text`
pub fn text_pixels(text: &str) -> impl Iterator<Item = (i32, i32)> + '_ {
    let mut column = 0;
    let mut line = 0;
    text.chars().flat_map(move |c| {
        if c == '\n' {
            column = 0;
            line += 1;
            return Vec::new();
        }
        let origin = (column * CHAR_ADVANCE, line * LINE_HEIGHT);
        column += 1;
        glyph_pixels(glyph(c))
            .map(|(dx, dy)| (origin.0 + dx, origin.1 + dy))
            .collect()
    })
}

fn glyph_pixels(rows: [u8; 5]) -> impl Iterator<Item = (i32, i32)> {
    (0..GLYPH_HEIGHT).flat_map(move |dy| {
        (0..GLYPH_WIDTH).filter_map(move |dx| {
            let bit = 1 << (GLYPH_WIDTH - 1 - dx);
            (rows[dy as usize] & bit != 0).then_some((dx, dy))
        })
    })
}
