//! Transport-stream packet framing and header decoding.

use std::io::{ErrorKind, Read};

use log::warn;

use crate::constants::*;
use crate::error::Result;

/// One 188-byte transport packet, owned.
///
/// Accessors are pure views over the raw bytes; nothing is pre-decoded.
#[derive(Clone)]
pub struct TsPacket {
    raw: [u8; TS_PACKET_SIZE],
}

impl TsPacket {
    /// Wraps a full frame. The framer guarantees the sync byte; foreign
    /// buffers are checked.
    pub fn new(raw: [u8; TS_PACKET_SIZE]) -> Option<Self> {
        if raw[0] != TS_SYNC_BYTE {
            return None;
        }
        Some(Self { raw })
    }

    /// For frames built in-crate with the sync byte already in place.
    pub(crate) fn from_array(raw: [u8; TS_PACKET_SIZE]) -> Self {
        debug_assert_eq!(raw[0], TS_SYNC_BYTE);
        Self { raw }
    }

    pub fn bytes(&self) -> &[u8; TS_PACKET_SIZE] {
        &self.raw
    }

    pub fn pid(&self) -> u16 {
        (u16::from(self.raw[1] & 0x1F) << 8) | u16::from(self.raw[2])
    }

    pub fn payload_unit_start(&self) -> bool {
        self.raw[1] & 0x40 != 0
    }

    pub fn transport_error(&self) -> bool {
        self.raw[1] & 0x80 != 0
    }

    pub fn continuity_counter(&self) -> u8 {
        self.raw[3] & 0x0F
    }

    pub fn has_adaptation(&self) -> bool {
        self.raw[3] & 0x20 != 0
    }

    pub fn has_payload(&self) -> bool {
        self.raw[3] & 0x10 != 0
    }

    /// Offset of the first payload byte: 4, plus the adaptation field when
    /// one is present.
    pub fn payload_offset(&self) -> usize {
        if self.has_adaptation() {
            TS_HEADER_SIZE + 1 + usize::from(self.raw[4])
        } else {
            TS_HEADER_SIZE
        }
    }

    /// Payload bytes, empty when the adaptation field fills the packet or
    /// the header declares none.
    pub fn payload(&self) -> &[u8] {
        if !self.has_payload() {
            return &[];
        }
        let off = self.payload_offset();
        if off >= TS_PACKET_SIZE {
            return &[];
        }
        &self.raw[off..]
    }

    /// 33-bit 90 kHz PCR base, when the adaptation field carries one.
    pub fn pcr(&self) -> Option<u64> {
        if !self.has_adaptation() {
            return None;
        }
        let ad_len = usize::from(self.raw[4]);
        if ad_len < 7 || self.raw[5] & 0x10 == 0 {
            return None; // no PCR_flag
        }
        let p = &self.raw[6..12];
        let base = (u64::from(p[0]) << 25)
            | (u64::from(p[1]) << 17)
            | (u64::from(p[2]) << 9)
            | (u64::from(p[3]) << 1)
            | (u64::from(p[4]) >> 7);
        Some(base)
    }
}

/// Sync-locked framer over a raw byte stream.
///
/// On start-up and after any desync it scans byte-by-byte for `0x47`, then
/// reads the remaining 187 bytes of the frame. End of input mid-search is a
/// clean stop; end of input mid-packet discards the partial frame.
pub struct PacketReader<R> {
    input: R,
    resynced: u64,
}

impl<R: Read> PacketReader<R> {
    pub fn new(input: R) -> Self {
        Self { input, resynced: 0 }
    }

    /// Total bytes skipped while hunting for sync.
    pub fn skipped_bytes(&self) -> u64 {
        self.resynced
    }

    /// Next frame, or `None` at end of stream.
    pub fn next_packet(&mut self) -> Result<Option<TsPacket>> {
        let mut skipped = 0u64;
        loop {
            let mut byte = [0u8; 1];
            match self.input.read_exact(&mut byte) {
                Ok(()) => {}
                Err(e) if e.kind() == ErrorKind::UnexpectedEof => return Ok(None),
                Err(e) => return Err(e.into()),
            }
            if byte[0] == TS_SYNC_BYTE {
                break;
            }
            skipped += 1;
        }
        if skipped > 0 {
            self.resynced += skipped;
            warn!("resynchronised after skipping {skipped} bytes");
        }

        let mut raw = [0u8; TS_PACKET_SIZE];
        raw[0] = TS_SYNC_BYTE;
        match self.input.read_exact(&mut raw[1..]) {
            Ok(()) => Ok(Some(TsPacket { raw })),
            Err(e) if e.kind() == ErrorKind::UnexpectedEof => {
                warn!("discarding partial packet at end of stream");
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(pid: u16, pusi: bool, cc: u8, payload: &[u8]) -> [u8; TS_PACKET_SIZE] {
        let mut raw = [TS_STUFFING_BYTE; TS_PACKET_SIZE];
        raw[0] = TS_SYNC_BYTE;
        raw[1] = (if pusi { 0x40 } else { 0 }) | ((pid >> 8) as u8 & 0x1F);
        raw[2] = pid as u8;
        raw[3] = 0x10 | (cc & 0x0F);
        raw[4..4 + payload.len()].copy_from_slice(payload);
        raw
    }

    #[test]
    fn header_fields() {
        let pkt = TsPacket::new(frame(0x1234 & 0x1FFF, true, 7, &[1, 2, 3])).unwrap();
        assert_eq!(pkt.pid(), 0x1234 & 0x1FFF);
        assert!(pkt.payload_unit_start());
        assert_eq!(pkt.continuity_counter(), 7);
        assert!(!pkt.has_adaptation());
        assert_eq!(pkt.payload_offset(), 4);
        assert_eq!(pkt.payload().len(), 184);
    }

    #[test]
    fn pcr_extraction() {
        let mut raw = frame(0x100, false, 0, &[]);
        raw[3] = 0x30; // adaptation + payload
        raw[4] = 7; // adaptation_field_length
        raw[5] = 0x10; // PCR_flag
        // base = 2, extension = 0
        let base: u64 = 2;
        raw[6] = (base >> 25) as u8;
        raw[7] = (base >> 17) as u8;
        raw[8] = (base >> 9) as u8;
        raw[9] = (base >> 1) as u8;
        raw[10] = ((base & 1) as u8) << 7;
        raw[11] = 0;
        let pkt = TsPacket::new(raw).unwrap();
        assert_eq!(pkt.pcr(), Some(2));
        assert_eq!(pkt.payload_offset(), 12);
    }

    #[test]
    fn resync_and_clean_eof() {
        let mut data = vec![0x00, 0x12, 0x00];
        data.extend_from_slice(&frame(0x21, false, 0, &[0xAA]));
        // trailing garbage with no sync byte
        data.extend_from_slice(&[0x00, 0x01]);
        let mut reader = PacketReader::new(&data[..]);
        let pkt = reader.next_packet().unwrap().unwrap();
        assert_eq!(pkt.pid(), 0x21);
        assert_eq!(reader.skipped_bytes(), 3);
        assert!(reader.next_packet().unwrap().is_none());
    }

    #[test]
    fn partial_packet_discarded() {
        let mut data = vec![];
        data.extend_from_slice(&frame(0x21, false, 0, &[])[..100]);
        let mut reader = PacketReader::new(&data[..]);
        assert!(reader.next_packet().unwrap().is_none());
    }
}
