// psi/eit.rs
//! EIT present/following reader (table_ids 0x4E / 0x4F): enough of the first
//! event to drive segmentation.

use chrono::NaiveDateTime;

use crate::clock::parse_mjd_time;
use crate::psi::section::SectionReader;
use crate::section::Section;

#[derive(Clone)]
pub struct EitPfSection {
    pub service_id: u16,
    pub section_number: u8,
    /// Start time of the first event in the loop; `None` when the loop is
    /// empty or the start time is undefined (all-ones).
    pub start_time: Option<NaiveDateTime>,
}

pub fn parse_eit_pf(section: &Section) -> anyhow::Result<(u8, EitPfSection)> {
    let sec = SectionReader::new(section)?;
    if sec.table_id != 0x4E && sec.table_id != 0x4F {
        anyhow::bail!("not EIT p/f");
    }

    // body: ts_id(2) orig_net_id(2) segment_last(1) last_table_id(1),
    // then the first event: event_id(2) start_time(5) ...
    let start_time = sec.body.get(8..13).and_then(parse_mjd_time);

    Ok((
        sec.table_id,
        EitPfSection {
            service_id: sec.table_id_extension,
            section_number: sec.section_number,
            start_time,
        },
    ))
}
