//! PAT→PMT walking and the per-service signalling record.

use log::info;

use crate::psi::{parse_pat, parse_pmt};
use crate::section::Section;

/// Everything the tools need to know about one service, learned from PAT and
/// PMT sections as they arrive. Fields hold `None` until discovered.
#[derive(Default)]
pub struct Signaling {
    sid: Option<u16>,
    pub pmt_pid: Option<u16>,
    pub pcr_pid: Option<u16>,
    pub subtitle_pid: Option<u16>,
    /// PCR PID plus every elementary PID of the service, re-learned from
    /// each PMT occurrence.
    pub referenced_pids: Vec<u16>,
}

impl Signaling {
    /// `sid == None` selects the first program announced by the PAT.
    pub fn new(sid: Option<u16>) -> Self {
        Self {
            sid,
            ..Self::default()
        }
    }

    pub fn service_id(&self) -> Option<u16> {
        self.sid
    }

    pub fn is_pmt_pid(&self, pid: u16) -> bool {
        self.pmt_pid == Some(pid)
    }

    pub fn handle_pat(&mut self, section: &Section) {
        let Ok(pat) = parse_pat(section) else { return };
        let entry = match self.sid {
            Some(sid) => pat.programs.iter().find(|e| e.program_number == sid),
            None => pat.programs.first(),
        };
        if let Some(entry) = entry {
            if self.pmt_pid != Some(entry.pmt_pid) {
                info!(
                    "program {} maps to PMT PID 0x{:04X}",
                    entry.program_number, entry.pmt_pid
                );
            }
            self.pmt_pid = Some(entry.pmt_pid);
        }
    }

    pub fn handle_pmt(&mut self, section: &Section) {
        let Ok(pmt) = parse_pmt(section) else { return };
        if self.pcr_pid != Some(pmt.pcr_pid) {
            info!("PCR rides on PID 0x{:04X}", pmt.pcr_pid);
        }
        self.pcr_pid = Some(pmt.pcr_pid);
        self.referenced_pids = pmt.referenced_pids();
        if let Some(pid) = pmt.caption_pid() {
            if self.subtitle_pid != Some(pid) {
                info!("caption ES on PID 0x{:04X}", pid);
            }
            self.subtitle_pid = Some(pid);
        }
    }
}
