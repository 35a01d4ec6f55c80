//! The 16-color palette every pixel index refers to

/// RGB values, index = palette color
pub const PALETTE: [[u8; 3]; 16] = [
    [0x00, 0x00, 0x00], // 0 black
    [0x2B, 0x33, 0x5F], // 1 navy
    [0x7E, 0x20, 0x72], // 2 purple
    [0x19, 0x95, 0x9C], // 3 green
    [0x8B, 0x48, 0x52], // 4 brown
    [0x39, 0x5C, 0x98], // 5 dark blue
    [0xA9, 0xC1, 0xFF], // 6 light blue
    [0xEE, 0xEE, 0xEE], // 7 white
    [0xD4, 0x18, 0x6C], // 8 red
    [0xD3, 0x84, 0x41], // 9 orange
    [0xE9, 0xC3, 0x5B], // 10 yellow
    [0x70, 0xC6, 0xA9], // 11 lime
    [0x76, 0x96, 0xDE], // 12 cyan
    [0xA3, 0xA3, 0xA3], // 13 gray
    [0xFF, 0x97, 0x98], // 14 pink
    [0xED, 0xC7, 0xB0], // 15 peach
];

/// Palette color in linear RGB for an sRGB surface (index wraps at 16)
pub fn rgba_linear(index: u8) -> [f32; 4] {
    let [r, g, b] = PALETTE[(index & 0x0F) as usize];
    [srgb_to_linear(r), srgb_to_linear(g), srgb_to_linear(b), 1.0]
}

fn srgb_to_linear(c: u8) -> f32 {
    let c = c as f32 / 255.0;
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}
