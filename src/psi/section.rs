// psi/section.rs
//! Generic long-form header reader over an assembled section.

use crate::constants::{SECTION_CRC_SIZE, SECTION_HEADER_SIZE};
use crate::section::Section;

/// Returned by [`SectionReader::new`].
pub struct SectionReader<'a> {
    pub table_id: u8,
    pub version: u8,
    pub current_next: bool,
    pub section_number: u8,
    pub last_section: u8,
    pub table_id_extension: u16,
    pub body: &'a [u8], // bytes between fixed header & CRC
}

impl<'a> SectionReader<'a> {
    /// Validates the declared length against the buffer; the CRC was already
    /// checked by the assembler.
    pub fn new(section: &'a Section) -> anyhow::Result<Self> {
        let raw = section.as_bytes();
        if raw.len() < SECTION_HEADER_SIZE + SECTION_CRC_SIZE {
            anyhow::bail!("short section");
        }
        let end = 3 + section.section_length();
        if end > raw.len() {
            anyhow::bail!("truncated section");
        }
        if end < SECTION_HEADER_SIZE + SECTION_CRC_SIZE {
            anyhow::bail!("invalid section_length");
        }

        Ok(Self {
            table_id: section.table_id(),
            version: section.version(),
            current_next: section.current_next(),
            section_number: section.section_number(),
            last_section: section.last_section_number(),
            table_id_extension: section.table_id_extension(),
            body: &raw[SECTION_HEADER_SIZE..end - SECTION_CRC_SIZE],
        })
    }
}
