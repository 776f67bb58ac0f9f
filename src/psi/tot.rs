// psi/tot.rs
//! TOT (0x73) / TDT (0x70) time reader.
//!
//! Both carry the 5-byte MJD+BCD UTC field right after the short header.
//! TDT has no CRC of its own and therefore never clears the assembler's
//! residue gate; in ARIB streams the clock rides on TOT.

use chrono::NaiveDateTime;

use crate::clock::parse_mjd_time;
use crate::constants::{TDT_TABLE_ID, TOT_TABLE_ID};
use crate::section::Section;

pub fn parse_tot_tdt(section: &Section) -> anyhow::Result<(u8, NaiveDateTime)> {
    let tid = section.table_id();
    if tid != TOT_TABLE_ID && tid != TDT_TABLE_ID {
        anyhow::bail!("not TOT/TDT");
    }
    let time = section
        .as_bytes()
        .get(3..8)
        .and_then(parse_mjd_time)
        .ok_or_else(|| anyhow::anyhow!("undefined TOT time"))?;
    Ok((tid, time))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::section::CRC_MPEG;
    use chrono::NaiveDate;

    #[test]
    fn tot_time_field() {
        // TOT: header + MJD 58849 (2020-01-01) 01:02:03 + empty descriptor
        // loop + CRC.
        let mut raw = vec![
            0x73, 0x70, 0x0B, // section_length = 11
            0xE5, 0xE1, 0x01, 0x02, 0x03, // JST time
            0xF0, 0x00, // descriptors_loop_length = 0
        ];
        let crc = CRC_MPEG.checksum(&raw);
        raw.extend_from_slice(&crc.to_be_bytes());
        let section = Section::from_bytes(raw);
        let (tid, time) = parse_tot_tdt(&section).unwrap();
        assert_eq!(tid, TOT_TABLE_ID);
        assert_eq!(
            time,
            NaiveDate::from_ymd_opt(2020, 1, 1)
                .unwrap()
                .and_hms_opt(1, 2, 3)
                .unwrap()
        );
    }
}
