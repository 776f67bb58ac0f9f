pub mod eit;
pub mod pat;
pub mod pmt;
pub mod section;
pub mod tot;

pub use eit::{EitPfSection, parse_eit_pf};
pub use pat::{PatEntry, PatSection, parse_pat};
pub use pmt::{EsInfo, PmtSection, parse_pmt};
pub use section::SectionReader;
pub use tot::parse_tot_tdt;
