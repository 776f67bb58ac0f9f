//! JIS-8 control-code values (ARIB STD-B24 part 2).

/// C0 control set
pub mod c0 {
    pub const NUL: u8 = 0x00;
    pub const BEL: u8 = 0x07;
    pub const APB: u8 = 0x08;
    pub const APF: u8 = 0x09;
    pub const APD: u8 = 0x0A;
    pub const APU: u8 = 0x0B;
    pub const CS: u8 = 0x0C;
    pub const APR: u8 = 0x0D;
    pub const LS1: u8 = 0x0E;
    pub const LS0: u8 = 0x0F;
    pub const PAPF: u8 = 0x16;
    pub const CAN: u8 = 0x18;
    pub const SS2: u8 = 0x19;
    pub const ESC: u8 = 0x1B;
    pub const APS: u8 = 0x1C;
    pub const SS3: u8 = 0x1D;
    pub const RS: u8 = 0x1E;
    pub const US: u8 = 0x1F;
    pub const SP: u8 = 0x20;
    pub const DEL: u8 = 0x7F;
}

/// C1 control set
pub mod c1 {
    pub const BKF: u8 = 0x80;
    pub const WHF: u8 = 0x87;
    pub const SSZ: u8 = 0x88;
    pub const MSZ: u8 = 0x89;
    pub const NSZ: u8 = 0x8A;
    pub const SZX: u8 = 0x8B;
    pub const COL: u8 = 0x90;
    pub const FLC: u8 = 0x91;
    pub const CDC: u8 = 0x92;
    pub const POL: u8 = 0x93;
    pub const WMM: u8 = 0x94;
    pub const MACRO: u8 = 0x95;
    pub const HLC: u8 = 0x97;
    pub const RPC: u8 = 0x98;
    pub const SPL: u8 = 0x99;
    pub const STL: u8 = 0x9A;
    pub const CSI: u8 = 0x9B;
    pub const TIME: u8 = 0x9D;
}

/// Second byte of an escape sequence
pub mod esc {
    pub const LS2: u8 = 0x6E;
    pub const LS3: u8 = 0x6F;
    pub const LS1R: u8 = 0x7E;
    pub const LS2R: u8 = 0x7D;
    pub const LS3R: u8 = 0x7C;
    /// `0x28..=0x2B` designate a one-byte set into G0..G3.
    pub const G0: u8 = 0x28;
    pub const G3: u8 = 0x2B;
    /// Prefix for the two-byte-set designation variants.
    pub const TWO_BYTE: u8 = 0x24;
    /// After a designation byte, selects a DRCS bank instead of a static set.
    pub const DRCS: u8 = 0x20;
}

/// CSI final bytes
pub mod csi {
    pub const GSM: u8 = 0x42;
    pub const SWF: u8 = 0x53;
    pub const CCC: u8 = 0x54;
    pub const SDF: u8 = 0x56;
    pub const SSM: u8 = 0x57;
    pub const SHS: u8 = 0x58;
    pub const SVS: u8 = 0x59;
    pub const PLD: u8 = 0x5B;
    pub const PLU: u8 = 0x5C;
    pub const GAA: u8 = 0x5D;
    pub const SRC: u8 = 0x5E;
    pub const SDP: u8 = 0x5F;
    pub const ACPS: u8 = 0x61;
    pub const TCC: u8 = 0x62;
    pub const ORN: u8 = 0x63;
    pub const MDF: u8 = 0x64;
    pub const CFS: u8 = 0x65;
    pub const XCS: u8 = 0x66;
    pub const SCR: u8 = 0x67;
    pub const PRA: u8 = 0x68;
    pub const ACS: u8 = 0x69;
    pub const UED: u8 = 0x6A;
    pub const RCS: u8 = 0x6E;
    pub const SCS: u8 = 0x6F;
}
