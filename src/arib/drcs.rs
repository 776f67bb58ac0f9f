//! Dynamically redefinable character sets.
//!
//! A caption unit may carry glyph bitmaps before the text that uses them:
//! sixteen one-byte banks (addressed through DRCS-1..15 designations) plus
//! one two-byte bank (DRCS-0). Only uncompressed fonts are supported.

use std::collections::HashMap;

use bitstream_io::{BigEndian, BitRead, BitReader};

use crate::error::{Error, Result};

/// A loaded glyph: packed pixel values, MSB first.
#[derive(Clone, Debug)]
pub struct DrcsGlyph {
    pub width: u32,
    pub height: u32,
    pub depth_bits: u32,
    pub data: Vec<u8>,
}

impl DrcsGlyph {
    /// Row-major pixel values; any non-zero value renders in the foreground
    /// colour.
    pub fn unpack(&self) -> Vec<u8> {
        let mut reader = BitReader::endian(&self.data[..], BigEndian);
        (0..self.width * self.height)
            .map(|_| reader.read_var::<u8>(self.depth_bits).unwrap_or(0))
            .collect()
    }

    /// Pixel value at (x, y) in an [`unpack`](Self::unpack)ed buffer.
    pub fn pixel_at(unpacked: &[u8], width: u32, x: u32, y: u32) -> u8 {
        unpacked[(y * width + x) as usize]
    }
}

#[derive(Default)]
pub struct DrcsBanks {
    glyphs: HashMap<(u8, u16), DrcsGlyph>,
}

impl DrcsBanks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, bank: u8, code: u16) -> Option<&DrcsGlyph> {
        self.glyphs.get(&(bank, code))
    }

    /// Loads the glyphs of one DRCS data unit (`code_size` 1 for parameter
    /// 0x30, 2 for 0x31).
    pub fn load_unit(&mut self, code_size: usize, data: &[u8]) -> Result<()> {
        if data.is_empty() {
            return Ok(());
        }
        let mut begin = 1; // NumberOfCode, the loop is bounded by the size
        while begin + 3 <= data.len() {
            let character_code = (u16::from(data[begin]) << 8) | u16::from(data[begin + 1]);
            let number_of_font = data[begin + 2];
            begin += 3;

            // One-byte banks are addressed by the designation's low nibble;
            // two-byte glyphs all land in bank 0.
            let (bank, code) = if code_size == 1 {
                ((character_code >> 8) as u8 & 0x0F, character_code & 0x007F)
            } else {
                (0, character_code & 0x7F7F)
            };

            for _ in 0..number_of_font {
                if begin + 4 > data.len() {
                    return Err(Error::Truncated {
                        what: "DRCS font header",
                        need: begin + 4,
                        have: data.len(),
                    });
                }
                let mode = data[begin] & 0x0F;
                if mode > 0b0001 {
                    // compressed / geometric fonts are not operated
                    return Err(Error::unsupported("DRCS font mode", mode));
                }
                let depth = u32::from(data[begin + 1]);
                let width = u32::from(data[begin + 2]);
                let height = u32::from(data[begin + 3]);
                let depth_bits = ceil_log2(depth + 2);
                let length = (width * height * depth_bits / 8) as usize;
                if begin + 4 + length > data.len() {
                    return Err(Error::Truncated {
                        what: "DRCS bitmap",
                        need: begin + 4 + length,
                        have: data.len(),
                    });
                }
                self.glyphs.insert(
                    (bank, code),
                    DrcsGlyph {
                        width,
                        height,
                        depth_bits,
                        data: data[begin + 4..begin + 4 + length].to_vec(),
                    },
                );
                begin += 4 + length;
            }
        }
        Ok(())
    }
}

fn ceil_log2(n: u32) -> u32 {
    debug_assert!(n >= 2);
    32 - (n - 1).leading_zeros()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn depth_bits_from_grey_levels() {
        assert_eq!(ceil_log2(2), 1); // depth 0: two levels, 1 bpp
        assert_eq!(ceil_log2(3), 2);
        assert_eq!(ceil_log2(4), 2); // depth 2: four levels, 2 bpp
        assert_eq!(ceil_log2(16), 4);
    }

    /// 4x4 one-bit glyph: a diagonal.
    fn unit_1byte(code: u8) -> Vec<u8> {
        vec![
            0x01, // NumberOfCode
            0x41,
            code, // character_code: bank 1
            0x01, // NumberOfFont
            0x00, // fontId 0, mode 0000
            0x00, // depth
            0x04, // width
            0x04, // height
            0b1000_0100,
            0b0010_0001,
        ]
    }

    #[test]
    fn loads_one_byte_glyph() {
        let mut banks = DrcsBanks::new();
        banks.load_unit(1, &unit_1byte(0x21)).unwrap();
        let glyph = banks.get(1, 0x21).expect("glyph");
        assert_eq!((glyph.width, glyph.height, glyph.depth_bits), (4, 4, 1));
        let px = glyph.unpack();
        for i in 0..4 {
            for j in 0..4 {
                assert_eq!(
                    DrcsGlyph::pixel_at(&px, 4, j, i) != 0,
                    i == j,
                    "pixel {j},{i}"
                );
            }
        }
    }

    #[test]
    fn two_byte_glyphs_land_in_bank_zero() {
        let data = vec![
            0x01, 0x21, 0x22, // character_code 0x2122
            0x01, 0x00, 0x00, 0x04, 0x02, // mode 0, depth 0, 4x2
            0b1100_0011,
        ];
        let mut banks = DrcsBanks::new();
        banks.load_unit(2, &data).unwrap();
        let glyph = banks.get(0, 0x2122).expect("glyph");
        assert_eq!(glyph.unpack(), vec![1, 1, 0, 0, 0, 0, 1, 1]);
    }

    #[test]
    fn geometric_font_is_unsupported() {
        let data = vec![0x01, 0x41, 0x21, 0x01, 0x02, 0x00, 0x04, 0x04];
        let mut banks = DrcsBanks::new();
        assert!(matches!(
            banks.load_unit(1, &data),
            Err(Error::UnsupportedFeature { .. })
        ));
    }

    #[test]
    fn multi_level_pixels() {
        // 2x2, depth 2 (four levels -> 2 bpp): values 3,2,1,0
        let data = vec![
            0x01, 0x42, 0x30, // bank 2, code 0x30
            0x01, 0x01, // mode 0001 (N bit)
            0x02, // depth 2
            0x02, 0x02, 0b1110_0100,
        ];
        let mut banks = DrcsBanks::new();
        banks.load_unit(1, &data).unwrap();
        let g = banks.get(2, 0x30).unwrap();
        assert_eq!(g.unpack(), vec![3, 2, 1, 0]);
    }
}
