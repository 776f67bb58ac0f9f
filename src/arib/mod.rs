//! ARIB closed-caption interpretation: data-group framing, the JIS-8
//! character-set machinery, DRCS glyph banks and the colour tables.

pub mod caption;
pub mod charset;
pub mod code;
pub mod decoder;
pub mod drcs;
pub mod palette;

pub use caption::caption_data_units;
pub use decoder::CaptionDecoder;
