//! Wall-clock reconstruction from the 33-bit 90 kHz PCR/PTS counter and the
//! Modified-Julian-Date time field carried by TOT/EIT sections.

use chrono::{Duration, NaiveDate, NaiveDateTime};

use crate::constants::PCR_WRAP;

/// Two-digit binary-coded decimal.
pub fn bcd(byte: u8) -> u32 {
    u32::from(byte >> 4) * 10 + u32::from(byte & 0x0F)
}

/// MJD to calendar date (ETSI EN 300 468 annex C).
pub fn mjd_to_ymd(mjd: u16) -> (i32, u32, u32) {
    let mjd = f64::from(mjd);
    let y1 = ((mjd - 15_078.2) / 365.25).floor();
    let m1 = ((mjd - 14_956.1 - (y1 * 365.25).floor()) / 30.6001).floor();
    let day = mjd - 14_956.0 - (y1 * 365.25).floor() - (m1 * 30.6001).floor();
    let k = if m1 == 14.0 || m1 == 15.0 { 1.0 } else { 0.0 };
    let year = y1 + k + 1900.0;
    let month = m1 - 1.0 - k * 12.0;
    (year as i32, month as u32, day as u32)
}

/// Calendar date to MJD; inverse of [`mjd_to_ymd`].
pub fn ymd_to_mjd(year: i32, month: u32, day: u32) -> u16 {
    let l = if month == 1 || month == 2 { 1.0 } else { 0.0 };
    let mjd = 14_956.0
        + f64::from(day)
        + ((f64::from(year) - 1900.0 - l) * 365.25).floor()
        + ((f64::from(month) + 1.0 + l * 12.0) * 30.6001).floor();
    mjd as u16
}

/// Decodes the 5-byte MJD + BCD `HHMMSS` field used by TOT, TDT and EIT.
/// All-one bytes mean "undefined" and yield `None`.
pub fn parse_mjd_time(field: &[u8]) -> Option<NaiveDateTime> {
    if field.len() < 5 {
        return None;
    }
    let mjd = (u16::from(field[0]) << 8) | u16::from(field[1]);
    if mjd == 0xFFFF {
        return None;
    }
    let (year, month, day) = mjd_to_ymd(mjd);
    NaiveDate::from_ymd_opt(year, month, day)?.and_hms_opt(bcd(field[2]), bcd(field[3]), bcd(field[4]))
}

/// Ticks `later - earlier` on the wrapping 33-bit counter.
pub fn elapsed_ticks(earlier: u64, later: u64) -> u64 {
    later.wrapping_sub(earlier) & (PCR_WRAP - 1)
}

fn ticks_to_duration(ticks: u64) -> Duration {
    // 90 kHz ticks to microseconds without losing the fractional part.
    Duration::microseconds((ticks * 100 / 9) as i64)
}

/// Clock state built from the stream head.
///
/// The anchor pairs the first TOT with the PCR observed closest before it;
/// once both are in, the pair never changes. TOT sections arriving before
/// any PCR are ignored so that the pairing is always PCR-then-TOT.
#[derive(Default)]
pub struct ClockRecovery {
    first_pcr: Option<u64>,
    pre_tot_pcr: Option<u64>,
    post_tot_pcr: Option<u64>,
    tot: Option<NaiveDateTime>,
}

impl ClockRecovery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn observe_pcr(&mut self, pcr: u64) {
        if self.first_pcr.is_none() {
            self.first_pcr = Some(pcr);
        }
        if self.tot.is_none() {
            self.pre_tot_pcr = Some(pcr);
        } else if self.post_tot_pcr.is_none() {
            self.post_tot_pcr = Some(pcr);
        }
    }

    pub fn observe_tot(&mut self, time: NaiveDateTime) {
        if self.tot.is_none() && self.pre_tot_pcr.is_some() {
            self.tot = Some(time);
        }
    }

    /// Anchor is established once a TOT has landed after a PCR.
    pub fn ready(&self) -> bool {
        self.tot.is_some()
    }

    /// Maps a later PCR/PTS value onto the wall clock.
    pub fn wall_clock(&self, ticks: u64) -> Option<NaiveDateTime> {
        let tot = self.tot?;
        let anchor = self.pre_tot_pcr?;
        Some(tot + ticks_to_duration(elapsed_ticks(anchor, ticks)))
    }

    /// Wall-clock of the stream head: the first TOT pushed back by the span
    /// between the first PCR ever seen and the first PCR after that TOT.
    pub fn head_time(&self) -> Option<NaiveDateTime> {
        let tot = self.tot?;
        let span = elapsed_ticks(self.first_pcr?, self.post_tot_pcr?);
        Some(tot - ticks_to_duration(span))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::PTS_CLOCK_HZ;

    #[test]
    fn bcd_decodes_nibbles() {
        assert_eq!(bcd(0x23), 23);
        assert_eq!(bcd(0x00), 0);
        assert_eq!(bcd(0x59), 59);
    }

    #[test]
    fn mjd_epoch_examples() {
        assert_eq!(mjd_to_ymd(58849), (2020, 1, 1));
        assert_eq!(ymd_to_mjd(2020, 1, 1), 58849);
        // leap-year day and a year boundary
        assert_eq!(mjd_to_ymd(58908), (2020, 2, 29));
        assert_eq!(mjd_to_ymd(58118), (2017, 12, 31));
    }

    #[test]
    fn mjd_roundtrip_range() {
        for mjd in (40_000u16..60_000).step_by(17) {
            let (y, m, d) = mjd_to_ymd(mjd);
            assert_eq!(ymd_to_mjd(y, m, d), mjd, "mjd {mjd}");
        }
    }

    #[test]
    fn mjd_time_field() {
        // 2020-01-01 12:34:56
        let t = parse_mjd_time(&[0xE5, 0xE1, 0x12, 0x34, 0x56]).unwrap();
        assert_eq!(
            t,
            NaiveDate::from_ymd_opt(2020, 1, 1)
                .unwrap()
                .and_hms_opt(12, 34, 56)
                .unwrap()
        );
        assert!(parse_mjd_time(&[0xFF, 0xFF, 0xFF, 0xFF, 0xFF]).is_none());
    }

    #[test]
    fn wall_clock_ten_seconds_later() {
        let mut clock = ClockRecovery::new();
        clock.observe_pcr(100 * PTS_CLOCK_HZ);
        clock.observe_tot(
            NaiveDate::from_ymd_opt(2024, 1, 1)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap(),
        );
        let at = clock.wall_clock(110 * PTS_CLOCK_HZ).unwrap();
        assert_eq!(
            at,
            NaiveDate::from_ymd_opt(2024, 1, 1)
                .unwrap()
                .and_hms_opt(0, 0, 10)
                .unwrap()
        );
    }

    #[test]
    fn wall_clock_across_wrap() {
        let mut clock = ClockRecovery::new();
        let near_wrap = PCR_WRAP - 90_000; // one second before wrap
        clock.observe_pcr(near_wrap);
        clock.observe_tot(
            NaiveDate::from_ymd_opt(2024, 6, 1)
                .unwrap()
                .and_hms_opt(23, 59, 59)
                .unwrap(),
        );
        let at = clock.wall_clock(90_000).unwrap(); // two seconds later, wrapped
        assert_eq!(
            at,
            NaiveDate::from_ymd_opt(2024, 6, 2)
                .unwrap()
                .and_hms_opt(0, 0, 1)
                .unwrap()
        );
    }

    #[test]
    fn head_time_subtracts_lead_in() {
        let mut clock = ClockRecovery::new();
        clock.observe_pcr(0);
        clock.observe_pcr(5 * PTS_CLOCK_HZ);
        clock.observe_tot(
            NaiveDate::from_ymd_opt(2024, 1, 1)
                .unwrap()
                .and_hms_opt(0, 0, 30)
                .unwrap(),
        );
        assert!(clock.head_time().is_none());
        clock.observe_pcr(30 * PTS_CLOCK_HZ);
        assert_eq!(
            clock.head_time().unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 1)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap()
        );
    }

    #[test]
    fn tot_before_any_pcr_is_ignored() {
        let mut clock = ClockRecovery::new();
        clock.observe_tot(
            NaiveDate::from_ymd_opt(2024, 1, 1)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap(),
        );
        assert!(!clock.ready());
    }
}
