//! Opcode metadata for the base (unprefixed) instruction set.
//!
//! Execution dispatches with a `match` in `exec.rs`; this table carries the
//! static properties of each opcode (length, cycle cost, flag effects) for
//! tracing and for checking the executor against the documented values.

use super::Flag;

/// Immediate operand that follows an opcode byte.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operand {
    None,
    /// Unsigned 8-bit immediate.
    D8,
    /// 16-bit little-endian immediate.
    D16,
    /// Signed 8-bit displacement.
    R8,
    /// Offset into the 0xFF00 page.
    A8,
    /// 16-bit little-endian address.
    A16,
}

impl Operand {
    pub const fn width(self) -> u8 {
        match self {
            Operand::None => 0,
            Operand::D8 | Operand::R8 | Operand::A8 => 1,
            Operand::D16 | Operand::A16 => 2,
        }
    }
}

/// How an instruction treats one flag.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FlagEffect {
    Unaffected,
    Reset,
    Set,
    /// Depends on the operands.
    Computed,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OpcodeInfo {
    pub mnemonic: &'static str,
    /// Encoded length in bytes, opcode included.
    pub length: u8,
    /// T-cycles; for conditional branches, the not-taken cost.
    pub cycles: u8,
    /// T-cycles when a conditional branch is taken.
    pub cycles_taken: u8,
    /// Z N H C effects: `-` unaffected, `0` reset, `1` set, a letter when
    /// computed.
    pub flags: &'static str,
    pub operand: Operand,
}

impl OpcodeInfo {
    /// `false` for the eleven unassigned opcodes.
    #[inline]
    pub fn is_defined(&self) -> bool {
        self.cycles != 0
    }

    #[inline]
    pub fn is_conditional(&self) -> bool {
        self.cycles != self.cycles_taken
    }

    pub fn flag_effect(&self, flag: Flag) -> FlagEffect {
        let index = match flag {
            Flag::Z => 0,
            Flag::N => 1,
            Flag::H => 2,
            Flag::C => 3,
        };
        match self.flags.as_bytes().get(index) {
            Some(b'-') | None => FlagEffect::Unaffected,
            Some(b'0') => FlagEffect::Reset,
            Some(b'1') => FlagEffect::Set,
            Some(_) => FlagEffect::Computed,
        }
    }
}

const fn op(
    mnemonic: &'static str,
    length: u8,
    cycles: u8,
    flags: &'static str,
    operand: Operand,
) -> OpcodeInfo {
    OpcodeInfo {
        mnemonic,
        length,
        cycles,
        cycles_taken: cycles,
        flags,
        operand,
    }
}

const fn branch(
    mnemonic: &'static str,
    length: u8,
    cycles: u8,
    cycles_taken: u8,
    operand: Operand,
) -> OpcodeInfo {
    OpcodeInfo {
        mnemonic,
        length,
        cycles,
        cycles_taken,
        flags: "----",
        operand,
    }
}

const UNDEFINED: OpcodeInfo = OpcodeInfo {
    mnemonic: "ILLEGAL",
    length: 1,
    cycles: 0,
    cycles_taken: 0,
    flags: "----",
    operand: Operand::None,
};

/// Base opcode table indexed by opcode byte.
pub static OPCODES: [OpcodeInfo; 256] = [
    /* 0x00 */ op("NOP", 1, 4, "----", Operand::None),
    /* 0x01 */ op("LD BC,d16", 3, 12, "----", Operand::D16),
    /* 0x02 */ op("LD (BC),A", 1, 8, "----", Operand::None),
    /* 0x03 */ op("INC BC", 1, 8, "----", Operand::None),
    /* 0x04 */ op("INC B", 1, 4, "Z0H-", Operand::None),
    /* 0x05 */ op("DEC B", 1, 4, "Z1H-", Operand::None),
    /* 0x06 */ op("LD B,d8", 2, 8, "----", Operand::D8),
    /* 0x07 */ op("RLCA", 1, 4, "000C", Operand::None),
    /* 0x08 */ op("LD (a16),SP", 3, 20, "----", Operand::A16),
    /* 0x09 */ op("ADD HL,BC", 1, 8, "-0HC", Operand::None),
    /* 0x0A */ op("LD A,(BC)", 1, 8, "----", Operand::None),
    /* 0x0B */ op("DEC BC", 1, 8, "----", Operand::None),
    /* 0x0C */ op("INC C", 1, 4, "Z0H-", Operand::None),
    /* 0x0D */ op("DEC C", 1, 4, "Z1H-", Operand::None),
    /* 0x0E */ op("LD C,d8", 2, 8, "----", Operand::D8),
    /* 0x0F */ op("RRCA", 1, 4, "000C", Operand::None),
    /* 0x10 */ op("STOP", 2, 4, "----", Operand::D8),
    /* 0x11 */ op("LD DE,d16", 3, 12, "----", Operand::D16),
    /* 0x12 */ op("LD (DE),A", 1, 8, "----", Operand::None),
    /* 0x13 */ op("INC DE", 1, 8, "----", Operand::None),
    /* 0x14 */ op("INC D", 1, 4, "Z0H-", Operand::None),
    /* 0x15 */ op("DEC D", 1, 4, "Z1H-", Operand::None),
    /* 0x16 */ op("LD D,d8", 2, 8, "----", Operand::D8),
    /* 0x17 */ op("RLA", 1, 4, "000C", Operand::None),
    /* 0x18 */ op("JR r8", 2, 12, "----", Operand::R8),
    /* 0x19 */ op("ADD HL,DE", 1, 8, "-0HC", Operand::None),
    /* 0x1A */ op("LD A,(DE)", 1, 8, "----", Operand::None),
    /* 0x1B */ op("DEC DE", 1, 8, "----", Operand::None),
    /* 0x1C */ op("INC E", 1, 4, "Z0H-", Operand::None),
    /* 0x1D */ op("DEC E", 1, 4, "Z1H-", Operand::None),
    /* 0x1E */ op("LD E,d8", 2, 8, "----", Operand::D8),
    /* 0x1F */ op("RRA", 1, 4, "000C", Operand::None),
    /* 0x20 */ branch("JR NZ,r8", 2, 8, 12, Operand::R8),
    /* 0x21 */ op("LD HL,d16", 3, 12, "----", Operand::D16),
    /* 0x22 */ op("LD (HL+),A", 1, 8, "----", Operand::None),
    /* 0x23 */ op("INC HL", 1, 8, "----", Operand::None),
    /* 0x24 */ op("INC H", 1, 4, "Z0H-", Operand::None),
    /* 0x25 */ op("DEC H", 1, 4, "Z1H-", Operand::None),
    /* 0x26 */ op("LD H,d8", 2, 8, "----", Operand::D8),
    /* 0x27 */ op("DAA", 1, 4, "Z-0C", Operand::None),
    /* 0x28 */ branch("JR Z,r8", 2, 8, 12, Operand::R8),
    /* 0x29 */ op("ADD HL,HL", 1, 8, "-0HC", Operand::None),
    /* 0x2A */ op("LD A,(HL+)", 1, 8, "----", Operand::None),
    /* 0x2B */ op("DEC HL", 1, 8, "----", Operand::None),
    /* 0x2C */ op("INC L", 1, 4, "Z0H-", Operand::None),
    /* 0x2D */ op("DEC L", 1, 4, "Z1H-", Operand::None),
    /* 0x2E */ op("LD L,d8", 2, 8, "----", Operand::D8),
    /* 0x2F */ op("CPL", 1, 4, "-11-", Operand::None),
    /* 0x30 */ branch("JR NC,r8", 2, 8, 12, Operand::R8),
    /* 0x31 */ op("LD SP,d16", 3, 12, "----", Operand::D16),
    /* 0x32 */ op("LD (HL-),A", 1, 8, "----", Operand::None),
    /* 0x33 */ op("INC SP", 1, 8, "----", Operand::None),
    /* 0x34 */ op("INC (HL)", 1, 12, "Z0H-", Operand::None),
    /* 0x35 */ op("DEC (HL)", 1, 12, "Z1H-", Operand::None),
    /* 0x36 */ op("LD (HL),d8", 2, 12, "----", Operand::D8),
    /* 0x37 */ op("SCF", 1, 4, "-001", Operand::None),
    /* 0x38 */ branch("JR C,r8", 2, 8, 12, Operand::R8),
    /* 0x39 */ op("ADD HL,SP", 1, 8, "-0HC", Operand::None),
    /* 0x3A */ op("LD A,(HL-)", 1, 8, "----", Operand::None),
    /* 0x3B */ op("DEC SP", 1, 8, "----", Operand::None),
    /* 0x3C */ op("INC A", 1, 4, "Z0H-", Operand::None),
    /* 0x3D */ op("DEC A", 1, 4, "Z1H-", Operand::None),
    /* 0x3E */ op("LD A,d8", 2, 8, "----", Operand::D8),
    /* 0x3F */ op("CCF", 1, 4, "-00C", Operand::None),
    /* 0x40 */ op("LD B,B", 1, 4, "----", Operand::None),
    /* 0x41 */ op("LD B,C", 1, 4, "----", Operand::None),
    /* 0x42 */ op("LD B,D", 1, 4, "----", Operand::None),
    /* 0x43 */ op("LD B,E", 1, 4, "----", Operand::None),
    /* 0x44 */ op("LD B,H", 1, 4, "----", Operand::None),
    /* 0x45 */ op("LD B,L", 1, 4, "----", Operand::None),
    /* 0x46 */ op("LD B,(HL)", 1, 8, "----", Operand::None),
    /* 0x47 */ op("LD B,A", 1, 4, "----", Operand::None),
    /* 0x48 */ op("LD C,B", 1, 4, "----", Operand::None),
    /* 0x49 */ op("LD C,C", 1, 4, "----", Operand::None),
    /* 0x4A */ op("LD C,D", 1, 4, "----", Operand::None),
    /* 0x4B */ op("LD C,E", 1, 4, "----", Operand::None),
    /* 0x4C */ op("LD C,H", 1, 4, "----", Operand::None),
    /* 0x4D */ op("LD C,L", 1, 4, "----", Operand::None),
    /* 0x4E */ op("LD C,(HL)", 1, 8, "----", Operand::None),
    /* 0x4F */ op("LD C,A", 1, 4, "----", Operand::None),
    /* 0x50 */ op("LD D,B", 1, 4, "----", Operand::None),
    /* 0x51 */ op("LD D,C", 1, 4, "----", Operand::None),
    /* 0x52 */ op("LD D,D", 1, 4, "----", Operand::None),
    /* 0x53 */ op("LD D,E", 1, 4, "----", Operand::None),
    /* 0x54 */ op("LD D,H", 1, 4, "----", Operand::None),
    /* 0x55 */ op("LD D,L", 1, 4, "----", Operand::None),
    /* 0x56 */ op("LD D,(HL)", 1, 8, "----", Operand::None),
    /* 0x57 */ op("LD D,A", 1, 4, "----", Operand::None),
    /* 0x58 */ op("LD E,B", 1, 4, "----", Operand::None),
    /* 0x59 */ op("LD E,C", 1, 4, "----", Operand::None),
    /* 0x5A */ op("LD E,D", 1, 4, "----", Operand::None),
    /* 0x5B */ op("LD E,E", 1, 4, "----", Operand::None),
    /* 0x5C */ op("LD E,H", 1, 4, "----", Operand::None),
    /* 0x5D */ op("LD E,L", 1, 4, "----", Operand::None),
    /* 0x5E */ op("LD E,(HL)", 1, 8, "----", Operand::None),
    /* 0x5F */ op("LD E,A", 1, 4, "----", Operand::None),
    /* 0x60 */ op("LD H,B", 1, 4, "----", Operand::None),
    /* 0x61 */ op("LD H,C", 1, 4, "----", Operand::None),
    /* 0x62 */ op("LD H,D", 1, 4, "----", Operand::None),
    /* 0x63 */ op("LD H,E", 1, 4, "----", Operand::None),
    /* 0x64 */ op("LD H,H", 1, 4, "----", Operand::None),
    /* 0x65 */ op("LD H,L", 1, 4, "----", Operand::None),
    /* 0x66 */ op("LD H,(HL)", 1, 8, "----", Operand::None),
    /* 0x67 */ op("LD H,A", 1, 4, "----", Operand::None),
    /* 0x68 */ op("LD L,B", 1, 4, "----", Operand::None),
    /* 0x69 */ op("LD L,C", 1, 4, "----", Operand::None),
    /* 0x6A */ op("LD L,D", 1, 4, "----", Operand::None),
    /* 0x6B */ op("LD L,E", 1, 4, "----", Operand::None),
    /* 0x6C */ op("LD L,H", 1, 4, "----", Operand::None),
    /* 0x6D */ op("LD L,L", 1, 4, "----", Operand::None),
    /* 0x6E */ op("LD L,(HL)", 1, 8, "----", Operand::None),
    /* 0x6F */ op("LD L,A", 1, 4, "----", Operand::None),
    /* 0x70 */ op("LD (HL),B", 1, 8, "----", Operand::None),
    /* 0x71 */ op("LD (HL),C", 1, 8, "----", Operand::None),
    /* 0x72 */ op("LD (HL),D", 1, 8, "----", Operand::None),
    /* 0x73 */ op("LD (HL),E", 1, 8, "----", Operand::None),
    /* 0x74 */ op("LD (HL),H", 1, 8, "----", Operand::None),
    /* 0x75 */ op("LD (HL),L", 1, 8, "----", Operand::None),
    /* 0x76 */ op("HALT", 1, 4, "----", Operand::None),
    /* 0x77 */ op("LD (HL),A", 1, 8, "----", Operand::None),
    /* 0x78 */ op("LD A,B", 1, 4, "----", Operand::None),
    /* 0x79 */ op("LD A,C", 1, 4, "----", Operand::None),
    /* 0x7A */ op("LD A,D", 1, 4, "----", Operand::None),
    /* 0x7B */ op("LD A,E", 1, 4, "----", Operand::None),
    /* 0x7C */ op("LD A,H", 1, 4, "----", Operand::None),
    /* 0x7D */ op("LD A,L", 1, 4, "----", Operand::None),
    /* 0x7E */ op("LD A,(HL)", 1, 8, "----", Operand::None),
    /* 0x7F */ op("LD A,A", 1, 4, "----", Operand::None),
    /* 0x80 */ op("ADD A,B", 1, 4, "Z0HC", Operand::None),
    /* 0x81 */ op("ADD A,C", 1, 4, "Z0HC", Operand::None),
    /* 0x82 */ op("ADD A,D", 1, 4, "Z0HC", Operand::None),
    /* 0x83 */ op("ADD A,E", 1, 4, "Z0HC", Operand::None),
    /* 0x84 */ op("ADD A,H", 1, 4, "Z0HC", Operand::None),
    /* 0x85 */ op("ADD A,L", 1, 4, "Z0HC", Operand::None),
    /* 0x86 */ op("ADD A,(HL)", 1, 8, "Z0HC", Operand::None),
    /* 0x87 */ op("ADD A,A", 1, 4, "Z0HC", Operand::None),
    /* 0x88 */ op("ADC A,B", 1, 4, "Z0HC", Operand::None),
    /* 0x89 */ op("ADC A,C", 1, 4, "Z0HC", Operand::None),
    /* 0x8A */ op("ADC A,D", 1, 4, "Z0HC", Operand::None),
    /* 0x8B */ op("ADC A,E", 1, 4, "Z0HC", Operand::None),
    /* 0x8C */ op("ADC A,H", 1, 4, "Z0HC", Operand::None),
    /* 0x8D */ op("ADC A,L", 1, 4, "Z0HC", Operand::None),
    /* 0x8E */ op("ADC A,(HL)", 1, 8, "Z0HC", Operand::None),
    /* 0x8F */ op("ADC A,A", 1, 4, "Z0HC", Operand::None),
    /* 0x90 */ op("SUB B", 1, 4, "Z1HC", Operand::None),
    /* 0x91 */ op("SUB C", 1, 4, "Z1HC", Operand::None),
    /* 0x92 */ op("SUB D", 1, 4, "Z1HC", Operand::None),
    /* 0x93 */ op("SUB E", 1, 4, "Z1HC", Operand::None),
    /* 0x94 */ op("SUB H", 1, 4, "Z1HC", Operand::None),
    /* 0x95 */ op("SUB L", 1, 4, "Z1HC", Operand::None),
    /* 0x96 */ op("SUB (HL)", 1, 8, "Z1HC", Operand::None),
    /* 0x97 */ op("SUB A", 1, 4, "Z1HC", Operand::None),
    /* 0x98 */ op("SBC A,B", 1, 4, "Z1HC", Operand::None),
    /* 0x99 */ op("SBC A,C", 1, 4, "Z1HC", Operand::None),
    /* 0x9A */ op("SBC A,D", 1, 4, "Z1HC", Operand::None),
    /* 0x9B */ op("SBC A,E", 1, 4, "Z1HC", Operand::None),
    /* 0x9C */ op("SBC A,H", 1, 4, "Z1HC", Operand::None),
    /* 0x9D */ op("SBC A,L", 1, 4, "Z1HC", Operand::None),
    /* 0x9E */ op("SBC A,(HL)", 1, 8, "Z1HC", Operand::None),
    /* 0x9F */ op("SBC A,A", 1, 4, "Z1HC", Operand::None),
    /* 0xA0 */ op("AND B", 1, 4, "Z010", Operand::None),
    /* 0xA1 */ op("AND C", 1, 4, "Z010", Operand::None),
    /* 0xA2 */ op("AND D", 1, 4, "Z010", Operand::None),
    /* 0xA3 */ op("AND E", 1, 4, "Z010", Operand::None),
    /* 0xA4 */ op("AND H", 1, 4, "Z010", Operand::None),
    /* 0xA5 */ op("AND L", 1, 4, "Z010", Operand::None),
    /* 0xA6 */ op("AND (HL)", 1, 8, "Z010", Operand::None),
    /* 0xA7 */ op("AND A", 1, 4, "Z010", Operand::None),
    /* 0xA8 */ op("XOR B", 1, 4, "Z000", Operand::None),
    /* 0xA9 */ op("XOR C", 1, 4, "Z000", Operand::None),
    /* 0xAA */ op("XOR D", 1, 4, "Z000", Operand::None),
    /* 0xAB */ op("XOR E", 1, 4, "Z000", Operand::None),
    /* 0xAC */ op("XOR H", 1, 4, "Z000", Operand::None),
    /* 0xAD */ op("XOR L", 1, 4, "Z000", Operand::None),
    /* 0xAE */ op("XOR (HL)", 1, 8, "Z000", Operand::None),
    /* 0xAF */ op("XOR A", 1, 4, "Z000", Operand::None),
    /* 0xB0 */ op("OR B", 1, 4, "Z000", Operand::None),
    /* 0xB1 */ op("OR C", 1, 4, "Z000", Operand::None),
    /* 0xB2 */ op("OR D", 1, 4, "Z000", Operand::None),
    /* 0xB3 */ op("OR E", 1, 4, "Z000", Operand::None),
    /* 0xB4 */ op("OR H", 1, 4, "Z000", Operand::None),
    /* 0xB5 */ op("OR L", 1, 4, "Z000", Operand::None),
    /* 0xB6 */ op("OR (HL)", 1, 8, "Z000", Operand::None),
    /* 0xB7 */ op("OR A", 1, 4, "Z000", Operand::None),
    /* 0xB8 */ op("CP B", 1, 4, "Z1HC", Operand::None),
    /* 0xB9 */ op("CP C", 1, 4, "Z1HC", Operand::None),
    /* 0xBA */ op("CP D", 1, 4, "Z1HC", Operand::None),
    /* 0xBB */ op("CP E", 1, 4, "Z1HC", Operand::None),
    /* 0xBC */ op("CP H", 1, 4, "Z1HC", Operand::None),
    /* 0xBD */ op("CP L", 1, 4, "Z1HC", Operand::None),
    /* 0xBE */ op("CP (HL)", 1, 8, "Z1HC", Operand::None),
    /* 0xBF */ op("CP A", 1, 4, "Z1HC", Operand::None),
    /* 0xC0 */ branch("RET NZ", 1, 8, 20, Operand::None),
    /* 0xC1 */ op("POP BC", 1, 12, "----", Operand::None),
    /* 0xC2 */ branch("JP NZ,a16", 3, 12, 16, Operand::A16),
    /* 0xC3 */ op("JP a16", 3, 16, "----", Operand::A16),
    /* 0xC4 */ branch("CALL NZ,a16", 3, 12, 24, Operand::A16),
    /* 0xC5 */ op("PUSH BC", 1, 16, "----", Operand::None),
    /* 0xC6 */ op("ADD A,d8", 2, 8, "Z0HC", Operand::D8),
    /* 0xC7 */ op("RST 00H", 1, 16, "----", Operand::None),
    /* 0xC8 */ branch("RET Z", 1, 8, 20, Operand::None),
    /* 0xC9 */ op("RET", 1, 16, "----", Operand::None),
    /* 0xCA */ branch("JP Z,a16", 3, 12, 16, Operand::A16),
    /* 0xCB */ op("PREFIX CB", 1, 4, "----", Operand::None),
    /* 0xCC */ branch("CALL Z,a16", 3, 12, 24, Operand::A16),
    /* 0xCD */ op("CALL a16", 3, 24, "----", Operand::A16),
    /* 0xCE */ op("ADC A,d8", 2, 8, "Z0HC", Operand::D8),
    /* 0xCF */ op("RST 08H", 1, 16, "----", Operand::None),
    /* 0xD0 */ branch("RET NC", 1, 8, 20, Operand::None),
    /* 0xD1 */ op("POP DE", 1, 12, "----", Operand::None),
    /* 0xD2 */ branch("JP NC,a16", 3, 12, 16, Operand::A16),
    /* 0xD3 */ UNDEFINED,
    /* 0xD4 */ branch("CALL NC,a16", 3, 12, 24, Operand::A16),
    /* 0xD5 */ op("PUSH DE", 1, 16, "----", Operand::None),
    /* 0xD6 */ op("SUB d8", 2, 8, "Z1HC", Operand::D8),
    /* 0xD7 */ op("RST 10H", 1, 16, "----", Operand::None),
    /* 0xD8 */ branch("RET C", 1, 8, 20, Operand::None),
    /* 0xD9 */ op("RETI", 1, 16, "----", Operand::None),
    /* 0xDA */ branch("JP C,a16", 3, 12, 16, Operand::A16),
    /* 0xDB */ UNDEFINED,
    /* 0xDC */ branch("CALL C,a16", 3, 12, 24, Operand::A16),
    /* 0xDD */ UNDEFINED,
    /* 0xDE */ op("SBC A,d8", 2, 8, "Z1HC", Operand::D8),
    /* 0xDF */ op("RST 18H", 1, 16, "----", Operand::None),
    /* 0xE0 */ op("LDH (a8),A", 2, 12, "----", Operand::A8),
    /* 0xE1 */ op("POP HL", 1, 12, "----", Operand::None),
    /* 0xE2 */ op("LD (C),A", 1, 8, "----", Operand::None),
    /* 0xE3 */ UNDEFINED,
    /* 0xE4 */ UNDEFINED,
    /* 0xE5 */ op("PUSH HL", 1, 16, "----", Operand::None),
    /* 0xE6 */ op("AND d8", 2, 8, "Z010", Operand::D8),
    /* 0xE7 */ op("RST 20H", 1, 16, "----", Operand::None),
    /* 0xE8 */ op("ADD SP,r8", 2, 16, "00HC", Operand::R8),
    /* 0xE9 */ op("JP (HL)", 1, 4, "----", Operand::None),
    /* 0xEA */ op("LD (a16),A", 3, 16, "----", Operand::A16),
    /* 0xEB */ UNDEFINED,
    /* 0xEC */ UNDEFINED,
    /* 0xED */ UNDEFINED,
    /* 0xEE */ op("XOR d8", 2, 8, "Z000", Operand::D8),
    /* 0xEF */ op("RST 28H", 1, 16, "----", Operand::None),
    /* 0xF0 */ op("LDH A,(a8)", 2, 12, "----", Operand::A8),
    /* 0xF1 */ op("POP AF", 1, 12, "ZNHC", Operand::None),
    /* 0xF2 */ op("LD A,(C)", 1, 8, "----", Operand::None),
    /* 0xF3 */ op("DI", 1, 4, "----", Operand::None),
    /* 0xF4 */ UNDEFINED,
    /* 0xF5 */ op("PUSH AF", 1, 16, "----", Operand::None),
    /* 0xF6 */ op("OR d8", 2, 8, "Z000", Operand::D8),
    /* 0xF7 */ op("RST 30H", 1, 16, "----", Operand::None),
    /* 0xF8 */ op("LD HL,SP+r8", 2, 12, "00HC", Operand::R8),
    /* 0xF9 */ op("LD SP,HL", 1, 8, "----", Operand::None),
    /* 0xFA */ op("LD A,(a16)", 3, 16, "----", Operand::A16),
    /* 0xFB */ op("EI", 1, 4, "----", Operand::None),
    /* 0xFC */ UNDEFINED,
    /* 0xFD */ UNDEFINED,
    /* 0xFE */ op("CP d8", 2, 8, "Z1HC", Operand::D8),
    /* 0xFF */ op("RST 38H", 1, 16, "----", Operand::None),
];

/// Total T-cycles of a 0xCB-prefixed instruction, prefix fetch included.
pub fn cb_cycles(cb: u8) -> u32 {
    let uses_hl = cb & 0x07 == 6;
    match (cb >> 6, uses_hl) {
        (_, false) => 8,
        // BIT b,(HL) only reads memory.
        (1, true) => 12,
        (_, true) => 16,
    }
}

/// Z N H C effects of a 0xCB-prefixed instruction, in the same notation as
/// [`OpcodeInfo::flags`].
pub fn cb_flags(cb: u8) -> &'static str {
    match cb >> 6 {
        0 if (cb >> 3) & 0x07 == 6 => "Z000",
        0 => "Z00C",
        1 => "Z01-",
        _ => "----",
    }
}
