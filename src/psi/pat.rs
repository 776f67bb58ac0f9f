use crate::constants::PAT_TABLE_ID;
use crate::psi::section::SectionReader;
use crate::section::Section;

/// ─────────── PAT ───────────
#[derive(Clone)]
pub struct PatSection {
    pub version: u8,
    pub current_next: bool,
    pub programs: Vec<PatEntry>,
}

#[derive(Clone)]
pub struct PatEntry {
    pub program_number: u16,
    pub pmt_pid: u16,
}

pub fn parse_pat(section: &Section) -> anyhow::Result<PatSection> {
    let sec = SectionReader::new(section)?;
    if sec.table_id != PAT_TABLE_ID {
        anyhow::bail!("not PAT");
    }

    let mut idx = 0;
    let mut programs = Vec::new();
    while idx + 4 <= sec.body.len() {
        let pn = u16::from_be_bytes(sec.body[idx..idx + 2].try_into()?);
        let pid = (u16::from(sec.body[idx + 2] & 0x1F) << 8) | u16::from(sec.body[idx + 3]);
        idx += 4;
        // program 0 points at the NIT, not a PMT
        if pn != 0 {
            programs.push(PatEntry {
                program_number: pn,
                pmt_pid: pid,
            });
        }
    }
    Ok(PatSection {
        version: sec.version,
        current_next: sec.current_next,
        programs,
    })
}
