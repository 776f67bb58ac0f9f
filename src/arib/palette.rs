//! Built-in colour tables (ARIB STD-B24 128-entry CLUT as eight 16-colour
//! rows).
//!
//! Row 0: the eight primary colours addressed by the BKF..WHF controls,
//! the transparent background default at index 8, and half-luminance tones.
//! Rows 1–3: the remaining four-level (0/85/170/255) component mixtures.
//! Rows 4–7: rows 0–3 at half opacity.

use image::Rgba;

pub type Color = Rgba<u8>;

const fn c(r: u8, g: u8, b: u8, a: u8) -> Color {
    Rgba([r, g, b, a])
}

pub const PALLETS: [[Color; 16]; 8] = [
    // pallet 0: primaries, transparent, half-luminance
    [
        c(0, 0, 0, 255),
        c(255, 0, 0, 255),
        c(0, 255, 0, 255),
        c(255, 255, 0, 255),
        c(0, 0, 255, 255),
        c(255, 0, 255, 255),
        c(0, 255, 255, 255),
        c(255, 255, 255, 255),
        c(0, 0, 0, 0),
        c(170, 0, 0, 255),
        c(0, 170, 0, 255),
        c(170, 170, 0, 255),
        c(0, 0, 170, 255),
        c(170, 0, 170, 255),
        c(0, 170, 170, 255),
        c(170, 170, 170, 255),
    ],
    // pallet 1
    [
        c(0, 0, 85, 255),
        c(0, 85, 0, 255),
        c(0, 85, 85, 255),
        c(0, 85, 170, 255),
        c(0, 85, 255, 255),
        c(0, 170, 85, 255),
        c(0, 170, 255, 255),
        c(0, 255, 85, 255),
        c(0, 255, 170, 255),
        c(85, 0, 0, 255),
        c(85, 0, 85, 255),
        c(85, 0, 170, 255),
        c(85, 0, 255, 255),
        c(85, 85, 0, 255),
        c(85, 85, 85, 255),
        c(85, 85, 170, 255),
    ],
    // pallet 2
    [
        c(85, 85, 255, 255),
        c(85, 170, 0, 255),
        c(85, 170, 85, 255),
        c(85, 170, 170, 255),
        c(85, 170, 255, 255),
        c(85, 255, 0, 255),
        c(85, 255, 85, 255),
        c(85, 255, 170, 255),
        c(85, 255, 255, 255),
        c(170, 0, 85, 255),
        c(170, 0, 255, 255),
        c(170, 85, 0, 255),
        c(170, 85, 85, 255),
        c(170, 85, 170, 255),
        c(170, 85, 255, 255),
        c(170, 170, 85, 255),
    ],
    // pallet 3
    [
        c(170, 170, 255, 255),
        c(170, 255, 0, 255),
        c(170, 255, 85, 255),
        c(170, 255, 170, 255),
        c(170, 255, 255, 255),
        c(255, 0, 85, 255),
        c(255, 0, 170, 255),
        c(255, 85, 0, 255),
        c(255, 85, 85, 255),
        c(255, 85, 170, 255),
        c(255, 85, 255, 255),
        c(255, 170, 0, 255),
        c(255, 170, 85, 255),
        c(255, 170, 170, 255),
        c(255, 170, 255, 255),
        c(255, 255, 85, 255),
    ],
    // pallets 4-7: half-opacity variants of 0-3
    [
        c(0, 0, 0, 128),
        c(255, 0, 0, 128),
        c(0, 255, 0, 128),
        c(255, 255, 0, 128),
        c(0, 0, 255, 128),
        c(255, 0, 255, 128),
        c(0, 255, 255, 128),
        c(255, 255, 255, 128),
        c(0, 0, 0, 0),
        c(170, 0, 0, 128),
        c(0, 170, 0, 128),
        c(170, 170, 0, 128),
        c(0, 0, 170, 128),
        c(170, 0, 170, 128),
        c(0, 170, 170, 128),
        c(170, 170, 170, 128),
    ],
    [
        c(0, 0, 85, 128),
        c(0, 85, 0, 128),
        c(0, 85, 85, 128),
        c(0, 85, 170, 128),
        c(0, 85, 255, 128),
        c(0, 170, 85, 128),
        c(0, 170, 255, 128),
        c(0, 255, 85, 128),
        c(0, 255, 170, 128),
        c(85, 0, 0, 128),
        c(85, 0, 85, 128),
        c(85, 0, 170, 128),
        c(85, 0, 255, 128),
        c(85, 85, 0, 128),
        c(85, 85, 85, 128),
        c(85, 85, 170, 128),
    ],
    [
        c(85, 85, 255, 128),
        c(85, 170, 0, 128),
        c(85, 170, 85, 128),
        c(85, 170, 170, 128),
        c(85, 170, 255, 128),
        c(85, 255, 0, 128),
        c(85, 255, 85, 128),
        c(85, 255, 170, 128),
        c(85, 255, 255, 128),
        c(170, 0, 85, 128),
        c(170, 0, 255, 128),
        c(170, 85, 0, 128),
        c(170, 85, 85, 128),
        c(170, 85, 170, 128),
        c(170, 85, 255, 128),
        c(170, 170, 85, 128),
    ],
    [
        c(170, 170, 255, 128),
        c(170, 255, 0, 128),
        c(170, 255, 85, 128),
        c(170, 255, 170, 128),
        c(170, 255, 255, 128),
        c(255, 0, 85, 128),
        c(255, 0, 170, 128),
        c(255, 85, 0, 128),
        c(255, 85, 85, 128),
        c(255, 85, 170, 128),
        c(255, 85, 255, 128),
        c(255, 170, 0, 128),
        c(255, 170, 85, 128),
        c(255, 170, 170, 128),
        c(255, 170, 255, 128),
        c(255, 255, 85, 128),
    ],
];

/// Foreground default: white of pallet 0.
pub const DEFAULT_FG: Color = PALLETS[0][7];
/// Background default: fully transparent black.
pub const DEFAULT_BG: Color = PALLETS[0][8];
