use crate::constants::{
    CAPTION_COMPONENT_TAG, PMT_TABLE_ID, STREAM_IDENTIFIER_DESCRIPTOR,
    STREAM_TYPE_PES_PRIVATE_DATA,
};
use crate::psi::section::SectionReader;
use crate::section::Section;

/// ─────────── PMT ───────────
#[derive(Clone)]
pub struct PmtSection {
    pub version: u8,
    pub program_number: u16,
    pub pcr_pid: u16,
    pub streams: Vec<EsInfo>,
}

#[derive(Clone)]
pub struct EsInfo {
    pub stream_type: u8,
    pub elementary_pid: u16,
    /// From the stream-identifier descriptor (tag 0x52), when present.
    pub component_tag: Option<u8>,
}

impl EsInfo {
    /// The default caption ES of an A-profile service.
    pub fn is_default_caption(&self) -> bool {
        self.stream_type == STREAM_TYPE_PES_PRIVATE_DATA
            && self.component_tag == Some(CAPTION_COMPONENT_TAG)
    }
}

impl PmtSection {
    /// PIDs a single-program stream must carry: PCR plus every ES.
    pub fn referenced_pids(&self) -> Vec<u16> {
        let mut pids = vec![self.pcr_pid];
        pids.extend(self.streams.iter().map(|s| s.elementary_pid));
        pids
    }

    pub fn caption_pid(&self) -> Option<u16> {
        self.streams
            .iter()
            .find(|s| s.is_default_caption())
            .map(|s| s.elementary_pid)
    }
}

pub fn parse_pmt(section: &Section) -> anyhow::Result<PmtSection> {
    let sec = SectionReader::new(section)?;
    if sec.table_id != PMT_TABLE_ID {
        anyhow::bail!("not PMT");
    }
    let b = sec.body;
    if b.len() < 4 {
        anyhow::bail!("PMT body too short");
    }

    /* ── fixed header inside the body ── */
    let pcr_pid = (u16::from(b[0] & 0x1F) << 8) | u16::from(b[1]);
    let prog_info_len = (usize::from(b[2] & 0x0F) << 8) | usize::from(b[3]);
    let mut idx = 4 + prog_info_len; // skip program descriptors

    /* ── ES loop ── */
    let mut streams = Vec::new();
    while idx + 5 <= b.len() {
        let stype = b[idx];
        let pid = (u16::from(b[idx + 1] & 0x1F) << 8) | u16::from(b[idx + 2]);
        let eslen = (usize::from(b[idx + 3] & 0x0F) << 8) | usize::from(b[idx + 4]);

        let mut component_tag = None;
        let mut d = idx + 5;
        let es_end = (idx + 5 + eslen).min(b.len());
        while d + 2 <= es_end {
            let tag = b[d];
            let len = usize::from(b[d + 1]);
            if tag == STREAM_IDENTIFIER_DESCRIPTOR && len >= 1 && d + 2 < es_end {
                component_tag = Some(b[d + 2]);
            }
            d += 2 + len;
        }

        streams.push(EsInfo {
            stream_type: stype,
            elementary_pid: pid,
            component_tag,
        });
        idx += 5 + eslen;
    }

    Ok(PmtSection {
        version: sec.version,
        program_number: sec.table_id_extension,
        pcr_pid,
        streams,
    })
}
