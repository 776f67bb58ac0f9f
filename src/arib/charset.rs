//! Character-set registers and the static dictionaries behind them.
//!
//! A G-buffer points at a static dictionary, a DRCS bank, or the macro
//! table; GL/GR choose which buffer serves each half of the byte space.

use crate::error::{Error, Result};

/// Static coded-character sets designable into a G-buffer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextSet {
    /// JIS X 0208 kanji plane, two bytes per character.
    Kanji,
    Alnum,
    Hiragana,
    Katakana,
    MosaicA,
    MosaicB,
    MosaicC,
    MosaicD,
    PropAlnum,
    PropHiragana,
    PropKatakana,
    JisX0201Katakana,
}

impl TextSet {
    fn from_final(byte: u8) -> Result<Self> {
        Ok(match byte {
            0x42 => TextSet::Kanji,
            0x4A => TextSet::Alnum,
            0x30 => TextSet::Hiragana,
            0x31 => TextSet::Katakana,
            0x32 => TextSet::MosaicA,
            0x33 => TextSet::MosaicB,
            0x34 => TextSet::MosaicC,
            0x35 => TextSet::MosaicD,
            0x36 => TextSet::PropAlnum,
            0x37 => TextSet::PropHiragana,
            0x38 => TextSet::PropKatakana,
            0x49 => TextSet::JisX0201Katakana,
            _ => return Err(Error::unsupported("graphic-set designation", byte)),
        })
    }

    pub fn code_size(self) -> usize {
        match self {
            TextSet::Kanji => 2,
            _ => 1,
        }
    }
}

/// What a G-buffer currently designates.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GBuffer {
    Text(TextSet),
    /// DRCS bank; bank 0 holds two-byte characters, banks 1..15 one-byte.
    Drcs(u8),
    Macro,
}

impl GBuffer {
    /// Designation by the final byte of an escape sequence (static sets and
    /// the macro table share the namespace).
    pub fn from_static_final(byte: u8) -> Result<Self> {
        if byte == 0x70 {
            return Ok(GBuffer::Macro);
        }
        TextSet::from_final(byte).map(GBuffer::Text)
    }

    /// Designation after the DRCS intermediate (`ESC 0x28..0x2B 0x20 F`).
    pub fn from_drcs_final(byte: u8) -> Result<Self> {
        match byte {
            0x40..=0x4F => Ok(GBuffer::Drcs(byte & 0x0F)),
            0x70 => Ok(GBuffer::Macro),
            _ => Err(Error::unsupported("DRCS designation", byte)),
        }
    }

    pub fn code_size(self) -> usize {
        match self {
            GBuffer::Text(set) => set.code_size(),
            GBuffer::Drcs(0) => 2,
            GBuffer::Drcs(_) => 1,
            GBuffer::Macro => 1,
        }
    }
}

/// Initial register state: `G0=KANJI, G1=ALNUM, G2=HIRAGANA, G3=MACRO`.
pub const INITIAL_G: [GBuffer; 4] = [
    GBuffer::Text(TextSet::Kanji),
    GBuffer::Text(TextSet::Alnum),
    GBuffer::Text(TextSet::Hiragana),
    GBuffer::Macro,
];

const HIRAGANA_TAIL: [char; 8] = ['ゝ', 'ゞ', 'ー', '。', '「', '」', '、', '・'];
const KATAKANA_TAIL: [char; 8] = ['ヽ', 'ヾ', 'ー', '。', '「', '」', '、', '・'];

/// Looks a masked code point up in a static dictionary.
///
/// `code` carries one byte for the one-byte sets and two bytes (high, low)
/// for kanji, each already masked to the GL range.
pub fn decode_text(set: TextSet, code: u16) -> Result<String> {
    match set {
        TextSet::Kanji => decode_kanji(code),
        TextSet::Alnum => {
            let b = code as u8;
            Ok(char::from(b).to_string())
        }
        TextSet::Hiragana => decode_kana(code as u8, 0x3041, 0x73, &HIRAGANA_TAIL),
        TextSet::Katakana => decode_kana(code as u8, 0x30A1, 0x76, &KATAKANA_TAIL),
        _ => Err(Error::unsupported("graphic set", (code & 0x7F) as u8)),
    }
}

/// Contiguous kana block plus the ARIB tail row (iteration marks, long
/// vowel bar, punctuation).
fn decode_kana(code: u8, base: u32, block_end: u8, tail: &[char; 8]) -> Result<String> {
    match code {
        0x21..=0x76 if code <= block_end => {
            let ch = char::from_u32(base + u32::from(code) - 0x21)
                .ok_or(Error::unsupported("kana code", code))?;
            Ok(ch.to_string())
        }
        0x77..=0x7E => Ok(tail[usize::from(code) - 0x77].to_string()),
        _ => Ok('\u{3000}'.to_string()), // undefined cell renders as blank
    }
}

/// JIS X 0208 via its EUC-JP encoding: set the high bit of both bytes and
/// hand the pair to the decoder. Code points outside the plane (ARIB gaiji
/// rows) are reported unsupported.
fn decode_kanji(code: u16) -> Result<String> {
    let bytes = [(code >> 8) as u8 | 0x80, (code & 0xFF) as u8 | 0x80];
    let (text, _, had_errors) = encoding_rs::EUC_JP.decode(&bytes);
    if had_errors {
        return Err(Error::unsupported("kanji code", (code >> 8) as u8));
    }
    Ok(text.into_owned())
}

/// Default macro table: each entry re-designates all four G-buffers
/// (ARIB STD-B24 default macro set; expansion resets `GL=0, GR=2`).
pub fn macro_expansion(code: u8) -> Result<[GBuffer; 4]> {
    use GBuffer::{Drcs, Macro, Text};
    use TextSet::*;
    Ok(match code {
        0x60 => [Text(Kanji), Text(Alnum), Text(Hiragana), Macro],
        0x61 => [Text(Kanji), Text(Katakana), Text(Hiragana), Macro],
        0x62 => [Text(Kanji), Drcs(1), Text(Hiragana), Macro],
        0x63 => [Text(MosaicA), Text(MosaicC), Text(MosaicD), Macro],
        0x64 => [Text(MosaicA), Text(MosaicB), Text(MosaicD), Macro],
        0x65 => [Text(MosaicA), Drcs(1), Text(MosaicD), Macro],
        0x66 => [Drcs(1), Drcs(2), Drcs(3), Macro],
        0x67 => [Drcs(4), Drcs(5), Drcs(6), Macro],
        0x68 => [Drcs(7), Drcs(8), Drcs(9), Macro],
        0x69 => [Drcs(10), Drcs(11), Drcs(12), Macro],
        0x6A => [Drcs(13), Drcs(14), Drcs(15), Macro],
        0x6B => [Text(Kanji), Drcs(2), Text(Hiragana), Macro],
        0x6C => [Text(Kanji), Drcs(3), Text(Hiragana), Macro],
        0x6D => [Text(Kanji), Drcs(4), Text(Hiragana), Macro],
        0x6E => [Text(Kanji), Text(Katakana), Drcs(1), Macro],
        0x6F => [Text(Kanji), Drcs(1), Drcs(2), Macro],
        _ => return Err(Error::unsupported("macro code", code)),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kanji_through_euc_jp() {
        // 0x3021 is the first kanji row entry, 亜
        assert_eq!(decode_text(TextSet::Kanji, 0x3021).unwrap(), "亜");
        // 0x2121 is the ideographic space
        assert_eq!(decode_text(TextSet::Kanji, 0x2121).unwrap(), "\u{3000}");
        // 0x2422 hiragana あ lives in the kanji plane too
        assert_eq!(decode_text(TextSet::Kanji, 0x2422).unwrap(), "あ");
    }

    #[test]
    fn kana_blocks() {
        assert_eq!(decode_text(TextSet::Hiragana, 0x22).unwrap(), "あ");
        assert_eq!(decode_text(TextSet::Katakana, 0x22).unwrap(), "ア");
        assert_eq!(decode_text(TextSet::Hiragana, 0x79).unwrap(), "ー");
        assert_eq!(decode_text(TextSet::Katakana, 0x7E).unwrap(), "・");
    }

    #[test]
    fn alnum_is_ascii() {
        assert_eq!(decode_text(TextSet::Alnum, b'A'.into()).unwrap(), "A");
    }

    #[test]
    fn mosaic_is_unsupported() {
        assert!(decode_text(TextSet::MosaicA, 0x21).is_err());
    }

    #[test]
    fn designation_finals() {
        assert_eq!(
            GBuffer::from_static_final(0x42).unwrap(),
            GBuffer::Text(TextSet::Kanji)
        );
        assert_eq!(GBuffer::from_static_final(0x70).unwrap(), GBuffer::Macro);
        assert_eq!(GBuffer::from_drcs_final(0x41).unwrap(), GBuffer::Drcs(1));
        assert_eq!(GBuffer::from_drcs_final(0x40).unwrap(), GBuffer::Drcs(0));
        assert!(GBuffer::from_static_final(0x5A).is_err());
    }

    #[test]
    fn macro_table_redesignates_all_buffers() {
        let g = macro_expansion(0x61).unwrap();
        assert_eq!(g[0], GBuffer::Text(TextSet::Kanji));
        assert_eq!(g[1], GBuffer::Text(TextSet::Katakana));
        assert_eq!(g[3], GBuffer::Macro);
        assert!(macro_expansion(0x20).is_err());
    }
}
