//! The 256-entry opcode descriptor table.
//!
//! Every opcode byte maps to exactly one [`Opcode`]: mnemonic tag, addressing
//! mode, encoded length, and base cycle count. The 151 official instructions
//! carry their documented timings ([6502 instruction reference](https://www.nesdev.org/obelisk-6502-guide/reference.html));
//! the remaining slots fall back to [`Mnemonic::Ill`], which executes as a
//! one-byte, one-cycle no-op so a runaway program never halts the core.
//!
//! `page_penalty` is declared per opcode, not per mnemonic: `LDA $nnnn,X`
//! (0xBD) pays +1 cycle on a page cross while `STA $nnnn,X` (0x9D) and the
//! read-modify-write opcodes never do.

/// Addressing mode tag. Determines how many operand bytes follow the opcode
/// and how the effective address is formed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Implied,
    Accumulator,
    Immediate,
    ZeroPage,
    ZeroPageX,
    ZeroPageY,
    Relative,
    Absolute,
    AbsoluteX,
    AbsoluteY,
    Indirect,
    IndirectX,
    IndirectY,
}

/// Operation tag: the 56 official 6502 mnemonics plus the illegal-opcode
/// fallback. Dispatch in the CPU is a single match keyed on this.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mnemonic {
    Adc, And, Asl, Bcc, Bcs, Beq, Bit, Bmi, Bne, Bpl, Brk, Bvc, Bvs, Clc,
    Cld, Cli, Clv, Cmp, Cpx, Cpy, Dec, Dex, Dey, Eor, Inc, Inx, Iny, Jmp,
    Jsr, Lda, Ldx, Ldy, Lsr, Nop, Ora, Pha, Php, Pla, Plp, Rol, Ror, Rti,
    Rts, Sbc, Sec, Sed, Sei, Sta, Stx, Sty, Tax, Tay, Tsx, Txa, Txs, Tya,
    /// No official instruction for this opcode byte.
    Ill,
}

impl Mnemonic {
    /// Assembly mnemonic for trace output.
    pub const fn name(self) -> &'static str {
        match self {
            Mnemonic::Adc => "ADC", Mnemonic::And => "AND", Mnemonic::Asl => "ASL",
            Mnemonic::Bcc => "BCC", Mnemonic::Bcs => "BCS", Mnemonic::Beq => "BEQ",
            Mnemonic::Bit => "BIT", Mnemonic::Bmi => "BMI", Mnemonic::Bne => "BNE",
            Mnemonic::Bpl => "BPL", Mnemonic::Brk => "BRK", Mnemonic::Bvc => "BVC",
            Mnemonic::Bvs => "BVS", Mnemonic::Clc => "CLC", Mnemonic::Cld => "CLD",
            Mnemonic::Cli => "CLI", Mnemonic::Clv => "CLV", Mnemonic::Cmp => "CMP",
            Mnemonic::Cpx => "CPX", Mnemonic::Cpy => "CPY", Mnemonic::Dec => "DEC",
            Mnemonic::Dex => "DEX", Mnemonic::Dey => "DEY", Mnemonic::Eor => "EOR",
            Mnemonic::Inc => "INC", Mnemonic::Inx => "INX", Mnemonic::Iny => "INY",
            Mnemonic::Jmp => "JMP", Mnemonic::Jsr => "JSR", Mnemonic::Lda => "LDA",
            Mnemonic::Ldx => "LDX", Mnemonic::Ldy => "LDY", Mnemonic::Lsr => "LSR",
            Mnemonic::Nop => "NOP", Mnemonic::Ora => "ORA", Mnemonic::Pha => "PHA",
            Mnemonic::Php => "PHP", Mnemonic::Pla => "PLA", Mnemonic::Plp => "PLP",
            Mnemonic::Rol => "ROL", Mnemonic::Ror => "ROR", Mnemonic::Rti => "RTI",
            Mnemonic::Rts => "RTS", Mnemonic::Sbc => "SBC", Mnemonic::Sec => "SEC",
            Mnemonic::Sed => "SED", Mnemonic::Sei => "SEI", Mnemonic::Sta => "STA",
            Mnemonic::Stx => "STX", Mnemonic::Sty => "STY", Mnemonic::Tax => "TAX",
            Mnemonic::Tay => "TAY", Mnemonic::Tsx => "TSX", Mnemonic::Txa => "TXA",
            Mnemonic::Txs => "TXS", Mnemonic::Tya => "TYA",
            Mnemonic::Ill => "*??",
        }
    }
}

/// Immutable descriptor for one opcode value.
#[derive(Debug, Clone, Copy)]
pub struct Opcode {
    pub mnemonic: Mnemonic,
    pub mode: Mode,
    /// Encoded length including the opcode byte (1–3).
    pub bytes: u8,
    /// Base cycle count before any page-cross or branch penalty.
    pub cycles: u8,
    /// +1 cycle when the indexed effective address crosses a page.
    pub page_penalty: bool,
}

impl Opcode {
    const fn new(mnemonic: Mnemonic, mode: Mode, bytes: u8, cycles: u8, page_penalty: bool) -> Self {
        Self { mnemonic, mode, bytes, cycles, page_penalty }
    }
}

const ILLEGAL: Opcode = Opcode::new(Mnemonic::Ill, Mode::Implied, 1, 1, false);

const fn build_table() -> [Opcode; 256] {
    use Mnemonic::*;
    use Mode::*;

    let mut t = [ILLEGAL; 256];

    macro_rules! op {
        ($code:expr, $mn:expr, $mode:expr, $bytes:expr, $cycles:expr) => {
            t[$code] = Opcode::new($mn, $mode, $bytes, $cycles, false);
        };
        ($code:expr, $mn:expr, $mode:expr, $bytes:expr, $cycles:expr, +) => {
            t[$code] = Opcode::new($mn, $mode, $bytes, $cycles, true);
        };
    }

    // Load
    op!(0xA9, Lda, Immediate, 2, 2);
    op!(0xA5, Lda, ZeroPage, 2, 3);
    op!(0xB5, Lda, ZeroPageX, 2, 4);
    op!(0xAD, Lda, Absolute, 3, 4);
    op!(0xBD, Lda, AbsoluteX, 3, 4, +);
    op!(0xB9, Lda, AbsoluteY, 3, 4, +);
    op!(0xA1, Lda, IndirectX, 2, 6);
    op!(0xB1, Lda, IndirectY, 2, 5, +);
    op!(0xA2, Ldx, Immediate, 2, 2);
    op!(0xA6, Ldx, ZeroPage, 2, 3);
    op!(0xB6, Ldx, ZeroPageY, 2, 4);
    op!(0xAE, Ldx, Absolute, 3, 4);
    op!(0xBE, Ldx, AbsoluteY, 3, 4, +);
    op!(0xA0, Ldy, Immediate, 2, 2);
    op!(0xA4, Ldy, ZeroPage, 2, 3);
    op!(0xB4, Ldy, ZeroPageX, 2, 4);
    op!(0xAC, Ldy, Absolute, 3, 4);
    op!(0xBC, Ldy, AbsoluteX, 3, 4, +);

    // Store (indexed stores always take the fixed, higher count)
    op!(0x85, Sta, ZeroPage, 2, 3);
    op!(0x95, Sta, ZeroPageX, 2, 4);
    op!(0x8D, Sta, Absolute, 3, 4);
    op!(0x9D, Sta, AbsoluteX, 3, 5);
    op!(0x99, Sta, AbsoluteY, 3, 5);
    op!(0x81, Sta, IndirectX, 2, 6);
    op!(0x91, Sta, IndirectY, 2, 6);
    op!(0x86, Stx, ZeroPage, 2, 3);
    op!(0x96, Stx, ZeroPageY, 2, 4);
    op!(0x8E, Stx, Absolute, 3, 4);
    op!(0x84, Sty, ZeroPage, 2, 3);
    op!(0x94, Sty, ZeroPageX, 2, 4);
    op!(0x8C, Sty, Absolute, 3, 4);

    // Transfer
    op!(0xAA, Tax, Implied, 1, 2);
    op!(0xA8, Tay, Implied, 1, 2);
    op!(0xBA, Tsx, Implied, 1, 2);
    op!(0x8A, Txa, Implied, 1, 2);
    op!(0x9A, Txs, Implied, 1, 2);
    op!(0x98, Tya, Implied, 1, 2);

    // Arithmetic
    op!(0x69, Adc, Immediate, 2, 2);
    op!(0x65, Adc, ZeroPage, 2, 3);
    op!(0x75, Adc, ZeroPageX, 2, 4);
    op!(0x6D, Adc, Absolute, 3, 4);
    op!(0x7D, Adc, AbsoluteX, 3, 4, +);
    op!(0x79, Adc, AbsoluteY, 3, 4, +);
    op!(0x61, Adc, IndirectX, 2, 6);
    op!(0x71, Adc, IndirectY, 2, 5, +);
    op!(0xE9, Sbc, Immediate, 2, 2);
    op!(0xE5, Sbc, ZeroPage, 2, 3);
    op!(0xF5, Sbc, ZeroPageX, 2, 4);
    op!(0xED, Sbc, Absolute, 3, 4);
    op!(0xFD, Sbc, AbsoluteX, 3, 4, +);
    op!(0xF9, Sbc, AbsoluteY, 3, 4, +);
    op!(0xE1, Sbc, IndirectX, 2, 6);
    op!(0xF1, Sbc, IndirectY, 2, 5, +);

    // Logic
    op!(0x29, And, Immediate, 2, 2);
    op!(0x25, And, ZeroPage, 2, 3);
    op!(0x35, And, ZeroPageX, 2, 4);
    op!(0x2D, And, Absolute, 3, 4);
    op!(0x3D, And, AbsoluteX, 3, 4, +);
    op!(0x39, And, AbsoluteY, 3, 4, +);
    op!(0x21, And, IndirectX, 2, 6);
    op!(0x31, And, IndirectY, 2, 5, +);
    op!(0x09, Ora, Immediate, 2, 2);
    op!(0x05, Ora, ZeroPage, 2, 3);
    op!(0x15, Ora, ZeroPageX, 2, 4);
    op!(0x0D, Ora, Absolute, 3, 4);
    op!(0x1D, Ora, AbsoluteX, 3, 4, +);
    op!(0x19, Ora, AbsoluteY, 3, 4, +);
    op!(0x01, Ora, IndirectX, 2, 6);
    op!(0x11, Ora, IndirectY, 2, 5, +);
    op!(0x49, Eor, Immediate, 2, 2);
    op!(0x45, Eor, ZeroPage, 2, 3);
    op!(0x55, Eor, ZeroPageX, 2, 4);
    op!(0x4D, Eor, Absolute, 3, 4);
    op!(0x5D, Eor, AbsoluteX, 3, 4, +);
    op!(0x59, Eor, AbsoluteY, 3, 4, +);
    op!(0x41, Eor, IndirectX, 2, 6);
    op!(0x51, Eor, IndirectY, 2, 5, +);
    op!(0x24, Bit, ZeroPage, 2, 3);
    op!(0x2C, Bit, Absolute, 3, 4);

    // Compare
    op!(0xC9, Cmp, Immediate, 2, 2);
    op!(0xC5, Cmp, ZeroPage, 2, 3);
    op!(0xD5, Cmp, ZeroPageX, 2, 4);
    op!(0xCD, Cmp, Absolute, 3, 4);
    op!(0xDD, Cmp, AbsoluteX, 3, 4, +);
    op!(0xD9, Cmp, AbsoluteY, 3, 4, +);
    op!(0xC1, Cmp, IndirectX, 2, 6);
    op!(0xD1, Cmp, IndirectY, 2, 5, +);
    op!(0xE0, Cpx, Immediate, 2, 2);
    op!(0xE4, Cpx, ZeroPage, 2, 3);
    op!(0xEC, Cpx, Absolute, 3, 4);
    op!(0xC0, Cpy, Immediate, 2, 2);
    op!(0xC4, Cpy, ZeroPage, 2, 3);
    op!(0xCC, Cpy, Absolute, 3, 4);

    // Increment / decrement
    op!(0xE6, Inc, ZeroPage, 2, 5);
    op!(0xF6, Inc, ZeroPageX, 2, 6);
    op!(0xEE, Inc, Absolute, 3, 6);
    op!(0xFE, Inc, AbsoluteX, 3, 7);
    op!(0xC6, Dec, ZeroPage, 2, 5);
    op!(0xD6, Dec, ZeroPageX, 2, 6);
    op!(0xCE, Dec, Absolute, 3, 6);
    op!(0xDE, Dec, AbsoluteX, 3, 7);
    op!(0xE8, Inx, Implied, 1, 2);
    op!(0xC8, Iny, Implied, 1, 2);
    op!(0xCA, Dex, Implied, 1, 2);
    op!(0x88, Dey, Implied, 1, 2);

    // Shift / rotate
    op!(0x0A, Asl, Accumulator, 1, 2);
    op!(0x06, Asl, ZeroPage, 2, 5);
    op!(0x16, Asl, ZeroPageX, 2, 6);
    op!(0x0E, Asl, Absolute, 3, 6);
    op!(0x1E, Asl, AbsoluteX, 3, 7);
    op!(0x4A, Lsr, Accumulator, 1, 2);
    op!(0x46, Lsr, ZeroPage, 2, 5);
    op!(0x56, Lsr, ZeroPageX, 2, 6);
    op!(0x4E, Lsr, Absolute, 3, 6);
    op!(0x5E, Lsr, AbsoluteX, 3, 7);
    op!(0x2A, Rol, Accumulator, 1, 2);
    op!(0x26, Rol, ZeroPage, 2, 5);
    op!(0x36, Rol, ZeroPageX, 2, 6);
    op!(0x2E, Rol, Absolute, 3, 6);
    op!(0x3E, Rol, AbsoluteX, 3, 7);
    op!(0x6A, Ror, Accumulator, 1, 2);
    op!(0x66, Ror, ZeroPage, 2, 5);
    op!(0x76, Ror, ZeroPageX, 2, 6);
    op!(0x6E, Ror, Absolute, 3, 6);
    op!(0x7E, Ror, AbsoluteX, 3, 7);

    // Jump / subroutine
    op!(0x4C, Jmp, Absolute, 3, 3);
    op!(0x6C, Jmp, Indirect, 3, 5);
    op!(0x20, Jsr, Absolute, 3, 6);
    op!(0x60, Rts, Implied, 1, 6);
    op!(0x40, Rti, Implied, 1, 6);

    // Branches: base 2, +1 taken, +1 more on page cross (handled in branch logic)
    op!(0x90, Bcc, Relative, 2, 2);
    op!(0xB0, Bcs, Relative, 2, 2);
    op!(0xF0, Beq, Relative, 2, 2);
    op!(0xD0, Bne, Relative, 2, 2);
    op!(0x30, Bmi, Relative, 2, 2);
    op!(0x10, Bpl, Relative, 2, 2);
    op!(0x50, Bvc, Relative, 2, 2);
    op!(0x70, Bvs, Relative, 2, 2);

    // Stack
    op!(0x48, Pha, Implied, 1, 3);
    op!(0x08, Php, Implied, 1, 3);
    op!(0x68, Pla, Implied, 1, 4);
    op!(0x28, Plp, Implied, 1, 4);

    // Flags
    op!(0x18, Clc, Implied, 1, 2);
    op!(0xD8, Cld, Implied, 1, 2);
    op!(0x58, Cli, Implied, 1, 2);
    op!(0xB8, Clv, Implied, 1, 2);
    op!(0x38, Sec, Implied, 1, 2);
    op!(0xF8, Sed, Implied, 1, 2);
    op!(0x78, Sei, Implied, 1, 2);

    // Software interrupt and the one official NOP
    op!(0x00, Brk, Implied, 1, 7);
    op!(0xEA, Nop, Implied, 1, 2);

    t
}

/// Total opcode table: every byte value 0–255 has an entry.
pub static OPCODES: [Opcode; 256] = build_table();
