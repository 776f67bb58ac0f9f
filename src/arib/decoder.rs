//! The JIS-8 caption interpreter.
//!
//! Consumes the data units of one caption statement and issues draw calls
//! against a [`CaptionCanvas`]. State lives for one rendered caption unit.
//!
//! Dispatch is a single `match` over byte classes: graphic ranges route
//! through the GL/GR registers, C0/C1 controls mutate cursor and style
//! state, and escape/CSI sequences are decoded in place.

use log::debug;

use crate::arib::caption::{self, caption_data_units};
use crate::arib::charset::{self, GBuffer, INITIAL_G};
use crate::arib::code::{c0, c1, csi, esc};
use crate::arib::drcs::{DrcsBanks, DrcsGlyph};
use crate::arib::palette::{Color, DEFAULT_BG, DEFAULT_FG, PALLETS};
use crate::error::{Error, Result};
use crate::pes::PesUnit;
use crate::render::{CaptionCanvas, GlyphRasterizer};

/// Initial presentation geometry (A-profile defaults; the stream normally
/// overrides them with CSI commands before the first character).
const DEFAULT_SWF: (u32, u32) = (960, 540);
const DEFAULT_SDF: (u32, u32) = (960, 540);
const DEFAULT_SSM: (u32, u32) = (36, 36);
const DEFAULT_SHS: u32 = 4;
const DEFAULT_SVS: u32 = 24;

pub struct CaptionDecoder<'r> {
    // character-set machinery
    g: [GBuffer; 4],
    gl: usize,
    gr: usize,
    drcs: DrcsBanks,

    // presentation geometry; the cursor is the bottom-left of the cell
    sdf: (u32, u32),
    sdp: (u32, u32),
    ssm: (u32, u32),
    shs: u32,
    svs: u32,
    scale: (f32, f32),
    pos: Option<(i32, i32)>,

    // style
    pallet: usize,
    fg: Color,
    bg: Color,
    orn: Option<Color>,
    stl: bool,
    hlc: u8,

    canvas: CaptionCanvas,
    rasterizer: &'r mut dyn GlyphRasterizer,
}

impl<'r> CaptionDecoder<'r> {
    pub fn new(rasterizer: &'r mut dyn GlyphRasterizer) -> Self {
        Self {
            g: INITIAL_G,
            gl: 0,
            gr: 2,
            drcs: DrcsBanks::new(),
            sdf: DEFAULT_SDF,
            sdp: (0, 0),
            ssm: DEFAULT_SSM,
            shs: DEFAULT_SHS,
            svs: DEFAULT_SVS,
            scale: (1.0, 1.0),
            pos: None,
            pallet: 0,
            fg: DEFAULT_FG,
            bg: DEFAULT_BG,
            orn: None,
            stl: false,
            hlc: 0,
            canvas: CaptionCanvas::new(DEFAULT_SWF),
            rasterizer,
        }
    }

    /// Interprets every data unit of the caption statement in `pes`.
    pub fn decode(&mut self, pes: &PesUnit) -> Result<()> {
        for unit in caption_data_units(pes)? {
            match unit.parameter {
                caption::UNIT_TEXT => self.parse_text(unit.payload)?,
                caption::UNIT_DRCS_1 => self.drcs.load_unit(1, unit.payload)?,
                caption::UNIT_DRCS_2 => self.drcs.load_unit(2, unit.payload)?,
                caption::UNIT_BITMAP => {
                    return Err(Error::unsupported("bitmap data unit", unit.parameter));
                }
                other => return Err(Error::unsupported("data unit", other)),
            }
        }
        Ok(())
    }

    /// The composed caption image, `None` when nothing was drawn.
    pub fn compose(&self) -> Option<image::RgbaImage> {
        self.canvas.compose()
    }

    pub fn screen_size(&self) -> (u32, u32) {
        self.canvas.size()
    }

    /* ── text data unit ── */

    fn parse_text(&mut self, data: &[u8]) -> Result<()> {
        let mut i = 0;
        while i < data.len() {
            let b = data[i];
            i += match b {
                0x21..=0x7E => self.draw_graphic(self.g[self.gl], data, i)?,
                0xA1..=0xFE => self.draw_graphic(self.g[self.gr], data, i)?,

                c0::SP => {
                    // full-width space from the kanji plane
                    self.draw_char("\u{3000}")?;
                    1
                }
                c0::NUL | c0::BEL | c0::CAN | c0::RS | c0::US | c0::DEL => 1,
                c0::APB => {
                    self.move_relative(-1, 0);
                    1
                }
                c0::APF => {
                    self.move_relative(1, 0);
                    1
                }
                c0::APD => {
                    self.move_relative(0, 1);
                    1
                }
                c0::APU => {
                    self.move_relative(0, -1);
                    1
                }
                c0::CS => {
                    debug!("CS ignored for still-image output");
                    1
                }
                c0::APR => {
                    self.newline();
                    1
                }
                c0::LS0 => {
                    self.gl = 0;
                    1
                }
                c0::LS1 => {
                    self.gl = 1;
                    1
                }
                c0::PAPF => {
                    let p = need(data, i + 1)? & 0x3F;
                    self.move_relative(i32::from(p), 0);
                    2
                }
                c0::SS2 => 1 + self.draw_graphic(self.g[2], data, i + 1)?,
                c0::SS3 => 1 + self.draw_graphic(self.g[3], data, i + 1)?,
                c0::APS => {
                    let y = need(data, i + 1)? & 0x3F;
                    let x = need(data, i + 2)? & 0x3F;
                    self.move_absolute_cell(i32::from(x), i32::from(y));
                    3
                }
                c0::ESC => self.handle_escape(data, i)?,

                0x80..=0x87 => {
                    self.fg = PALLETS[self.pallet][usize::from(b - c1::BKF)];
                    1
                }
                c1::SSZ => {
                    self.scale = (0.5, 0.5);
                    1
                }
                c1::MSZ => {
                    self.scale = (0.5, 1.0);
                    1
                }
                c1::NSZ => {
                    self.scale = (1.0, 1.0);
                    1
                }
                c1::COL => self.handle_col(data, i)?,
                c1::FLC => 2, // blink; one parameter, ignored
                c1::HLC => {
                    self.hlc = need(data, i + 1)? & 0x0F;
                    2
                }
                c1::SPL => {
                    self.stl = false;
                    1
                }
                c1::STL => {
                    self.stl = true;
                    1
                }
                c1::CSI => self.handle_csi(data, i)?,
                c1::TIME => {
                    if need(data, i + 1)? == 0x20 {
                        3 // presentation delay, meaningless for stills
                    } else {
                        return Err(Error::unsupported("TIME mode", need(data, i + 1)?));
                    }
                }
                c1::SZX | c1::CDC | c1::POL | c1::WMM | c1::MACRO | c1::RPC => {
                    return Err(Error::unsupported("control", b));
                }
                other => return Err(Error::unsupported("text byte", other)),
            };
        }
        Ok(())
    }

    /* ── graphic characters ── */

    /// Draws the character addressed at `data[at..]` through `buf`;
    /// returns the number of code bytes consumed.
    fn draw_graphic(&mut self, buf: GBuffer, data: &[u8], at: usize) -> Result<usize> {
        let size = buf.code_size();
        if at + size > data.len() {
            return Err(Error::Truncated {
                what: "graphic character",
                need: at + size,
                have: data.len(),
            });
        }
        let code = if size == 2 {
            (u16::from(data[at] & 0x7F) << 8) | u16::from(data[at + 1] & 0x7F)
        } else {
            u16::from(data[at] & 0x7F)
        };

        match buf {
            GBuffer::Text(set) => {
                let text = charset::decode_text(set, code)?;
                self.draw_char(&text)?;
            }
            GBuffer::Drcs(bank) => {
                let glyph = self
                    .drcs
                    .get(bank, code)
                    .ok_or(Error::unsupported("DRCS glyph", code as u8))?
                    .clone();
                self.draw_drcs(&glyph);
            }
            GBuffer::Macro => {
                self.g = charset::macro_expansion(code as u8)?;
                self.gl = 0;
                self.gr = 2;
            }
        }
        Ok(size)
    }

    fn draw_char(&mut self, text: &str) -> Result<()> {
        let (x, y) = self.ensure_pos();
        let (_, h) = self.cell();
        let inner_w = (self.ssm.0 as f32 * self.scale.0) as u32;
        let inner_h = (self.ssm.1 as f32 * self.scale.1) as u32;
        let origin = (
            x + ((self.shs as f32 * self.scale.0) as i32) / 2,
            y - h + ((self.svs as f32 * self.scale.1) as i32) / 2,
        );

        if let Some(coverage) = self.rasterizer.rasterize(text, inner_w.max(1), inner_h.max(1)) {
            if let Some(orn) = self.orn {
                for dy in -1..=1 {
                    for dx in -1..=1 {
                        if (dx, dy) != (0, 0) {
                            self.canvas
                                .draw_coverage(&coverage, (origin.0 + dx, origin.1 + dy), orn);
                        }
                    }
                }
            }
            self.canvas.draw_coverage(&coverage, origin, self.fg);
        }
        self.finish_cell();
        Ok(())
    }

    fn draw_drcs(&mut self, glyph: &DrcsGlyph) {
        let (x, y) = self.ensure_pos();
        let (_, h) = self.cell();
        let off_x = ((self.shs as f32 * self.scale.0) as i32) / 2;
        let off_y = ((self.svs as f32 * self.scale.1) as i32) / 2;

        let pixels = glyph.unpack();
        for gy in 0..glyph.height {
            for gx in 0..glyph.width {
                if DrcsGlyph::pixel_at(&pixels, glyph.width, gx, gy) != 0 {
                    let px = x + gx as i32 + off_x;
                    let py = y - h + gy as i32 + off_y;
                    self.canvas.fill_fg(px, py, px + 1, py + 1, self.fg);
                }
            }
        }
        self.finish_cell();
    }

    /// Highlight bars, underline, cell background, cursor advance.
    fn finish_cell(&mut self) {
        let (x, y) = self.ensure_pos();
        let (w, h) = self.cell();
        let bar = h / 24;

        if self.hlc & 0b0001 != 0 || self.stl {
            self.canvas.fill_fg(x, y - bar, x + w, y, self.fg);
        }
        if self.hlc & 0b0010 != 0 {
            self.canvas.fill_fg(x + w - bar, y - h, x + w, y, self.fg);
        }
        if self.hlc & 0b0100 != 0 {
            self.canvas.fill_fg(x, y - h, x + w, y - h + bar, self.fg);
        }
        if self.hlc & 0b1000 != 0 {
            self.canvas.fill_fg(x, y - h, x + bar, y, self.fg);
        }

        self.canvas.fill_bg(x, y - h, x + w, y, self.bg);
        self.move_relative(1, 0);
    }

    /* ── escape sequences ── */

    fn handle_escape(&mut self, data: &[u8], i: usize) -> Result<usize> {
        let b1 = need(data, i + 1)?;
        Ok(match b1 {
            esc::LS2 => {
                self.gl = 2;
                2
            }
            esc::LS3 => {
                self.gl = 3;
                2
            }
            esc::LS1R => {
                self.gr = 1;
                2
            }
            esc::LS2R => {
                self.gr = 2;
                2
            }
            esc::LS3R => {
                self.gr = 3;
                2
            }
            esc::G0..=esc::G3 => {
                let slot = usize::from(b1 - esc::G0);
                let b2 = need(data, i + 2)?;
                if b2 == esc::DRCS {
                    self.g[slot] = GBuffer::from_drcs_final(need(data, i + 3)?)?;
                    4
                } else {
                    self.g[slot] = GBuffer::from_static_final(b2)?;
                    3
                }
            }
            esc::TWO_BYTE => {
                let b2 = need(data, i + 2)?;
                match b2 {
                    esc::G0..=esc::G3 => {
                        let slot = usize::from(b2 - esc::G0);
                        let b3 = need(data, i + 3)?;
                        if b3 == esc::DRCS {
                            self.g[slot] = GBuffer::from_drcs_final(need(data, i + 4)?)?;
                            5
                        } else {
                            self.g[slot] = GBuffer::from_static_final(b3)?;
                            4
                        }
                    }
                    // ESC 0x24 F designates a two-byte set straight into G0
                    _ => {
                        self.g[0] = GBuffer::from_static_final(b2)?;
                        3
                    }
                }
            }
            other => return Err(Error::unsupported("escape", other)),
        })
    }

    /* ── colour control ── */

    fn handle_col(&mut self, data: &[u8], i: usize) -> Result<usize> {
        let p1 = need(data, i + 1)?;
        if p1 == 0x20 {
            self.pallet = usize::from(need(data, i + 2)? & 0x0F) & 0x07;
            return Ok(3);
        }
        let index = usize::from(p1 & 0x0F);
        match p1 & 0x70 {
            0x40 => self.fg = PALLETS[self.pallet][index],
            0x50 => self.bg = PALLETS[self.pallet][index],
            _ => debug!("COL middle byte 0x{p1:02X} ignored"),
        }
        Ok(2)
    }

    /* ── control sequences ── */

    fn handle_csi(&mut self, data: &[u8], i: usize) -> Result<usize> {
        let start = i + 1;
        let mut j = start;
        while j < data.len() && data[j] != 0x20 {
            j += 1;
        }
        let fin = need(data, j + 1)?;
        let raw = &data[start..j];
        let params = decimal_params(raw);
        let p = |n: usize| params.get(n).copied().unwrap_or(0);

        match fin {
            csi::SWF => {
                let swf = match p(0) {
                    5 => (1920, 1080),
                    7 => (960, 540),
                    9 => (720, 480),
                    other => return Err(Error::unsupported("writing format", other as u8)),
                };
                self.canvas.set_size(swf);
            }
            csi::SDF => self.sdf = (p(0), p(1)),
            csi::SSM => self.ssm = (p(0), p(1)),
            csi::SHS => self.shs = p(0),
            csi::SVS => self.svs = p(0),
            csi::SDP => self.sdp = (p(0), p(1)),
            csi::ACPS => self.pos = Some((p(0) as i32, p(1) as i32)),
            csi::ORN => self.handle_orn(raw)?,
            csi::RCS => debug!("RCS tolerated"), // raster fill instead of CS
            csi::GSM
            | csi::CCC
            | csi::PLD
            | csi::PLU
            | csi::GAA
            | csi::SRC
            | csi::TCC
            | csi::MDF
            | csi::CFS
            | csi::XCS
            | csi::SCR
            | csi::PRA
            | csi::ACS
            | csi::UED
            | csi::SCS => return Err(Error::unsupported("control sequence", fin)),
            other => return Err(Error::unsupported("control sequence", other)),
        }
        Ok(j + 2 - i)
    }

    /// Character outline: `0` disables; `1;PQ;RS` picks the colour as
    /// pallet-row and index, each given as two digit-nibbles summed.
    fn handle_orn(&mut self, raw: &[u8]) -> Result<()> {
        let mut parts = raw.split(|&b| b == 0x3B);
        match parts.next().and_then(|p| p.first().copied()) {
            Some(0x30) => {
                self.orn = None;
                Ok(())
            }
            Some(0x31) => {
                let sum = |part: Option<&[u8]>| {
                    part.map(|p| p.iter().map(|&b| usize::from(b & 0x0F)).sum())
                        .unwrap_or(0usize)
                };
                let row = sum(parts.next());
                let index = sum(parts.next());
                if row > 7 || index > 15 {
                    return Err(Error::unsupported("outline colour", row as u8));
                }
                self.orn = Some(PALLETS[row][index]);
                Ok(())
            }
            other => Err(Error::unsupported("outline mode", other.unwrap_or(0))),
        }
    }

    /* ── cursor geometry ── */

    /// One cell: composition size plus inter-character/inter-line gaps,
    /// scaled by the current character size.
    fn cell(&self) -> (i32, i32) {
        let w = ((self.shs + self.ssm.0) as f32 * self.scale.0) as i32;
        let h = ((self.svs + self.ssm.1) as f32 * self.scale.1) as i32;
        (w.max(1), h.max(1))
    }

    fn ensure_pos(&mut self) -> (i32, i32) {
        if self.pos.is_none() {
            self.move_absolute_cell(0, 0);
        }
        self.pos.unwrap_or_default()
    }

    fn move_absolute_cell(&mut self, x: i32, y: i32) {
        let (w, h) = self.cell();
        self.pos = Some((self.sdp.0 as i32 + x * w, self.sdp.1 as i32 + (y + 1) * h));
    }

    fn move_relative(&mut self, mut x: i32, mut y: i32) {
        let (mut px, mut py) = self.ensure_pos();
        let (w, h) = self.cell();
        let left = self.sdp.0 as i32;
        let right = self.sdp.0 as i32 + self.sdf.0 as i32;
        while x < 0 {
            x += 1;
            px -= w;
            if px < left {
                px = right - w;
                y -= 1;
            }
        }
        while x > 0 {
            x -= 1;
            px += w;
            if px >= right {
                px = left;
                y += 1;
            }
        }
        py += y * h;
        self.pos = Some((px, py));
    }

    fn newline(&mut self) {
        let (_, py) = self.ensure_pos();
        let (_, h) = self.cell();
        self.pos = Some((self.sdp.0 as i32, py + h));
    }

    /* ── test introspection ── */

    #[cfg(test)]
    pub(crate) fn registers(&self) -> (usize, usize, [GBuffer; 4]) {
        (self.gl, self.gr, self.g)
    }

    #[cfg(test)]
    pub(crate) fn cursor(&self) -> Option<(i32, i32)> {
        self.pos
    }

    #[cfg(test)]
    pub(crate) fn style(&self) -> (Color, Color, Option<Color>, bool, u8) {
        (self.fg, self.bg, self.orn, self.stl, self.hlc)
    }
}

fn need(data: &[u8], at: usize) -> Result<u8> {
    data.get(at).copied().ok_or(Error::Truncated {
        what: "text data unit",
        need: at + 1,
        have: data.len(),
    })
}

/// Decimal parameters separated by 0x3B, digits carried in the low nibble.
fn decimal_params(raw: &[u8]) -> Vec<u32> {
    raw.split(|&b| b == 0x3B)
        .map(|part| {
            part.iter()
                .filter(|b| (0x30..=0x39).contains(*b))
                .fold(0u32, |acc, &b| acc * 10 + u32::from(b & 0x0F))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arib::caption::{UNIT_DRCS_1, UNIT_TEXT, build_caption_pes};
    use crate::arib::charset::TextSet;
    use crate::render::BlockRasterizer;

    fn decode_text_bytes(bytes: &[u8]) -> CaptionDecoder<'static> {
        let mut dec = CaptionDecoder::new(Box::leak(Box::new(BlockRasterizer)));
        dec.parse_text(bytes).unwrap();
        dec
    }

    #[test]
    fn locking_shift_right_to_g3() {
        // LS3R, then a GR character fetched through G3 (designated KANJI)
        let mut r = BlockRasterizer;
        let mut dec = CaptionDecoder::new(&mut r);
        dec.parse_text(&[0x1B, 0x2B, 0x42, 0x1B, 0x7C, 0xA4, 0xA2]).unwrap();
        let (gl, gr, g) = dec.registers();
        assert_eq!((gl, gr), (0, 3));
        assert_eq!(g[3], GBuffer::Text(TextSet::Kanji));
        assert!(dec.compose().is_some()); // 0x2422 あ was drawn
    }

    #[test]
    fn macro_expansion_redesignates() {
        // GR is G2 initially; point G2 at the macro table, then invoke 0x61
        let dec = decode_text_bytes(&[0x1B, 0x2A, 0x70, 0xE1]);
        let (gl, gr, g) = dec.registers();
        assert_eq!((gl, gr), (0, 2));
        assert_eq!(g[1], GBuffer::Text(TextSet::Katakana));
        assert_eq!(g[0], GBuffer::Text(TextSet::Kanji));
        // a macro invocation draws nothing
        assert!(dec.compose().is_none());
    }

    #[test]
    fn aps_positions_cursor_in_cells() {
        // APS y=2 x=3 with default 40x60 cells
        let dec = decode_text_bytes(&[0x1C, 0x42, 0x43]);
        assert_eq!(dec.cursor(), Some((3 * 40, (2 + 1) * 60)));
    }

    #[test]
    fn papf_moves_right() {
        let dec = decode_text_bytes(&[0x1C, 0x40, 0x40, 0x16, 0x43]);
        assert_eq!(dec.cursor(), Some((3 * 40, 60)));
    }

    #[test]
    fn relative_moves_wrap_at_display_edge() {
        // to the left edge, then APB wraps to the rightmost cell one row up
        let dec = decode_text_bytes(&[0x1C, 0x41, 0x40, 0x08]);
        assert_eq!(dec.cursor(), Some((960 - 40, 60)));
    }

    #[test]
    fn colour_controls_pick_from_pallet() {
        let dec = decode_text_bytes(&[0x84]);
        assert_eq!(dec.style().0, PALLETS[0][4]); // blue
        // COL 0x48: foreground from index 8 of the selected pallet
        let dec = decode_text_bytes(&[0x90, 0x20, 0x31, 0x90, 0x48]);
        assert_eq!(dec.style().0, PALLETS[1][8]);
        // COL 0x55: background
        let dec = decode_text_bytes(&[0x90, 0x55]);
        assert_eq!(dec.style().1, PALLETS[0][5]);
    }

    #[test]
    fn character_sizes_scale_cells() {
        let dec = decode_text_bytes(&[0x88, 0x1C, 0x41, 0x41]); // SSZ then APS(1,1)
        assert_eq!(dec.cursor(), Some((20, 2 * 30)));
        let dec = decode_text_bytes(&[0x89, 0x1C, 0x41, 0x41]); // MSZ
        assert_eq!(dec.cursor(), Some((20, 2 * 60)));
    }

    #[test]
    fn csi_geometry_commands() {
        // SWF 5 -> 1920x1080, SDP (100, 200), SSM 24x24, SHS 2, SVS 12,
        // then APS(0,0): cell is 26x36 at origin (100, 200+36)
        let dec = decode_text_bytes(&[
            0x9B, 0x35, 0x20, 0x53, // SWF 5
            0x9B, 0x31, 0x30, 0x30, 0x3B, 0x32, 0x30, 0x30, 0x20, 0x5F, // SDP 100;200
            0x9B, 0x32, 0x34, 0x3B, 0x32, 0x34, 0x20, 0x57, // SSM 24;24
            0x9B, 0x32, 0x20, 0x58, // SHS 2
            0x9B, 0x31, 0x32, 0x20, 0x59, // SVS 12
            0x1C, 0x40, 0x40, // APS(0,0)
        ]);
        assert_eq!(dec.screen_size(), (1920, 1080));
        assert_eq!(dec.cursor(), Some((100, 236)));
    }

    #[test]
    fn acps_is_dot_addressed() {
        let dec = decode_text_bytes(&[0x9B, 0x33, 0x30, 0x3B, 0x34, 0x30, 0x20, 0x61]);
        assert_eq!(dec.cursor(), Some((30, 40)));
    }

    #[test]
    fn orn_parses_digit_sums() {
        // ORN 1;23;45: digit nibbles sum to pallet row 5, colour index 9
        let dec = decode_text_bytes(&[
            0x9B, 0x31, 0x3B, 0x32, 0x33, 0x3B, 0x34, 0x35, 0x20, 0x63,
        ]);
        assert_eq!(dec.style().2, Some(PALLETS[5][9]));
        // ORN 0 disables
        let dec = decode_text_bytes(&[
            0x9B, 0x31, 0x3B, 0x32, 0x33, 0x3B, 0x34, 0x35, 0x20, 0x63, 0x9B, 0x30, 0x20, 0x63,
        ]);
        assert_eq!(dec.style().2, None);
    }

    #[test]
    fn underline_and_highlight_state() {
        let dec = decode_text_bytes(&[0x9A, 0x97, 0x45]);
        let (_, _, _, stl, hlc) = dec.style();
        assert!(stl);
        assert_eq!(hlc, 0x05);
    }

    #[test]
    fn unsupported_control_aborts() {
        let mut r = BlockRasterizer;
        let mut dec = CaptionDecoder::new(&mut r);
        assert!(matches!(
            dec.parse_text(&[0x92]),
            Err(Error::UnsupportedFeature { .. })
        ));
        let mut dec = CaptionDecoder::new(&mut r);
        assert!(matches!(
            dec.parse_text(&[0x9B, 0x20, 0x42]), // GSM
            Err(Error::UnsupportedFeature { .. })
        ));
    }

    #[test]
    fn decodes_full_caption_unit() {
        // LS1 (GL=G1 alnum) then "A"
        let mut r = BlockRasterizer;
        let mut dec = CaptionDecoder::new(&mut r);
        let pes = build_caption_pes(0x01, 0, &[(UNIT_TEXT, &[0x0E, 0x41])]);
        dec.decode(&pes).unwrap();
        let image = dec.compose().expect("drawn image");
        assert_eq!(image.dimensions(), (960, 540));
        // glyph body lands inside the first cell (origin row 0)
        assert_eq!(image.get_pixel(2 + 5, 12 + 5).0, [255, 255, 255, 255]);
    }

    #[test]
    fn drcs_unit_then_glyph_draw() {
        let drcs_unit: &[u8] = &[
            0x01, // NumberOfCode
            0x41, 0x21, // bank 1, code 0x21
            0x01, // NumberOfFont
            0x00, 0x00, // mode 0, depth 0
            0x04, 0x04, // 4x4 diagonal
            0b1000_0100, 0b0010_0001,
        ];
        // designate G1 <- DRCS-1, LS1, draw code 0x21
        let text: &[u8] = &[0x1B, 0x29, 0x20, 0x41, 0x0E, 0x21];
        let mut r = BlockRasterizer;
        let mut dec = CaptionDecoder::new(&mut r);
        let pes = build_caption_pes(0x01, 0, &[(UNIT_DRCS_1, drcs_unit), (UNIT_TEXT, text)]);
        dec.decode(&pes).unwrap();
        assert!(dec.compose().is_some());
    }

    #[test]
    fn missing_drcs_glyph_is_unsupported() {
        let mut r = BlockRasterizer;
        let mut dec = CaptionDecoder::new(&mut r);
        assert!(matches!(
            dec.parse_text(&[0x1B, 0x29, 0x20, 0x41, 0x0E, 0x21]),
            Err(Error::UnsupportedFeature { .. })
        ));
    }
}
