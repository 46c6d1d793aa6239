use crate::{
    bus::Bus,
    cpu::flags::{
        FLAG_BREAK, FLAG_CARRY, FLAG_DECIMAL, FLAG_INTERRUPT_DISABLE, FLAG_NEGATIVE, FLAG_OVERFLOW,
        FLAG_UNUSED, FLAG_ZERO,
    },
    cpu::opcodes::{Mnemonic, Mode, OPCODES, Opcode},
};

const VECTOR_NMI: u16 = 0xFFFA;
const VECTOR_RESET: u16 = 0xFFFC;
const VECTOR_IRQ: u16 = 0xFFFE;

/// Resolved operand location for one instruction.
#[derive(Debug, Clone, Copy)]
pub enum Operand {
    /// No operand bytes; the accumulator stands in where a value is needed.
    Implied,
    /// The accumulator is the explicit operand (shift/rotate A forms).
    Accumulator,
    /// Effective 16-bit address for reads and write-back.
    Address(u16),
    /// Signed branch displacement, consumed but not yet applied.
    Relative(i8),
}

pub struct CPU<B: Bus> {
    pub a: u8,
    pub x: u8,
    pub y: u8,
    pub sp: u8,
    pub pc: u16,
    pub status: u8,
    pub cycles: usize,
    pub bus: B,
    nmi_pending: bool,
    irq_pending: bool,
}

impl<B: Bus> CPU<B> {
    pub fn new(bus: B) -> Self {
        Self {
            a: 0,
            x: 0,
            y: 0,
            sp: 0xFD,
            pc: 0,
            status: FLAG_INTERRUPT_DISABLE | FLAG_UNUSED,
            cycles: 0,
            bus,
            nmi_pending: false,
            irq_pending: false,
        }
    }

    /// Hardware reset: registers cleared, PC loaded from $FFFC, 7 cycles.
    /// Memory is untouched.
    pub fn reset(&mut self) {
        let lo = self.bus.read(VECTOR_RESET) as u16;
        let hi = self.bus.read(VECTOR_RESET + 1) as u16;
        self.pc = (hi << 8) | lo;

        self.sp = 0xFD; // hardware leaves S at $FD, not $FF
        self.status = FLAG_INTERRUPT_DISABLE | FLAG_UNUSED;

        self.a = 0;
        self.x = 0;
        self.y = 0;

        self.nmi_pending = false;
        self.irq_pending = false;

        self.cycles = 7;
    }

    /// Request a non-maskable interrupt. Serviced before the next opcode
    /// fetch regardless of the InterruptDisable flag.
    pub fn signal_nmi(&mut self) {
        self.nmi_pending = true;
    }

    /// Request a maskable interrupt. Stays pending until a step finds the
    /// InterruptDisable flag clear.
    pub fn signal_irq(&mut self) {
        self.irq_pending = true;
    }

    /// Execute one full instruction (plus any interrupt entry due at this
    /// boundary) and return the cycles it consumed.
    pub fn step(&mut self) -> usize {
        let start = self.cycles;

        if self.nmi_pending {
            self.nmi_pending = false;
            self.nmi();
        } else if self.irq_pending && !self.flag(FLAG_INTERRUPT_DISABLE) {
            self.irq_pending = false;
            self.irq();
        }

        let opcode = self.fetch_byte();
        let descriptor = &OPCODES[opcode as usize];

        let (operand, page_crossed) = self.resolve_operand(descriptor.mode);
        self.execute(descriptor, operand);

        self.cycles += descriptor.cycles as usize;
        if descriptor.page_penalty && page_crossed {
            self.cycles += 1;
        }

        self.cycles - start
    }

    fn fetch_byte(&mut self) -> u8 {
        let byte = self.bus.read(self.pc);
        self.pc = self.pc.wrapping_add(1);
        byte
    }

    fn fetch_word(&mut self) -> u16 {
        let lo = self.fetch_byte() as u16;
        let hi = self.fetch_byte() as u16;
        (hi << 8) | lo
    }

    /// Nestest-style trace of the instruction at the current PC, taken before
    /// it executes: PC, raw bytes, mnemonic, registers, cumulative cycles.
    pub fn trace_line(&mut self) -> String {
        let opcode = self.bus.read(self.pc);
        let descriptor = &OPCODES[opcode as usize];

        let mut raw = format!("{:02X}", opcode);
        for i in 1..descriptor.bytes as u16 {
            raw.push_str(&format!(" {:02X}", self.bus.read(self.pc.wrapping_add(i))));
        }

        format!(
            "{:04X}  {:<8}  {} A:{:02X} X:{:02X} Y:{:02X} P:{:02X} SP:{:02X} CYC:{}",
            self.pc,
            raw,
            descriptor.mnemonic.name(),
            self.a,
            self.x,
            self.y,
            self.status,
            self.sp,
            self.cycles
        )
    }

    // --- addressing-mode resolution ---

    /// Consume the operand bytes for `mode` and produce the operand location,
    /// plus whether an indexed effective address crossed a page boundary.
    fn resolve_operand(&mut self, mode: Mode) -> (Operand, bool) {
        match mode {
            Mode::Implied => (Operand::Implied, false),
            Mode::Accumulator => (Operand::Accumulator, false),
            Mode::Immediate => {
                let addr = self.pc;
                self.pc = self.pc.wrapping_add(1);
                (Operand::Address(addr), false)
            }
            Mode::ZeroPage => {
                let addr = self.fetch_byte() as u16;
                (Operand::Address(addr), false)
            }
            Mode::ZeroPageX => {
                // Index wraps within the zero page, never into page 1
                let addr = self.fetch_byte().wrapping_add(self.x) as u16;
                (Operand::Address(addr), false)
            }
            Mode::ZeroPageY => {
                let addr = self.fetch_byte().wrapping_add(self.y) as u16;
                (Operand::Address(addr), false)
            }
            Mode::Relative => {
                let offset = self.fetch_byte() as i8;
                (Operand::Relative(offset), false)
            }
            Mode::Absolute => {
                let addr = self.fetch_word();
                (Operand::Address(addr), false)
            }
            Mode::AbsoluteX => {
                let base = self.fetch_word();
                let addr = base.wrapping_add(self.x as u16);
                (Operand::Address(addr), (base & 0xFF00) != (addr & 0xFF00))
            }
            Mode::AbsoluteY => {
                let base = self.fetch_word();
                let addr = base.wrapping_add(self.y as u16);
                (Operand::Address(addr), (base & 0xFF00) != (addr & 0xFF00))
            }
            Mode::Indirect => {
                let ptr = self.fetch_word();
                let lo = self.bus.read(ptr) as u16;
                // 6502 bug: the pointer high byte is fetched without carrying
                // into the next page, so ($xxFF) reads its high byte from $xx00
                let hi_addr = (ptr & 0xFF00) | (ptr.wrapping_add(1) & 0x00FF);
                let hi = self.bus.read(hi_addr) as u16;
                (Operand::Address((hi << 8) | lo), false)
            }
            Mode::IndirectX => {
                let ptr = self.fetch_byte().wrapping_add(self.x);
                let lo = self.bus.read(ptr as u16) as u16;
                let hi = self.bus.read(ptr.wrapping_add(1) as u16) as u16;
                (Operand::Address((hi << 8) | lo), false)
            }
            Mode::IndirectY => {
                let zp = self.fetch_byte();
                let lo = self.bus.read(zp as u16) as u16;
                let hi = self.bus.read(zp.wrapping_add(1) as u16) as u16;
                let base = (hi << 8) | lo;
                let addr = base.wrapping_add(self.y as u16);
                (Operand::Address(addr), (base & 0xFF00) != (addr & 0xFF00))
            }
        }
    }

    /// Read the operand value: memory for addressed operands, the accumulator
    /// for Implied/Accumulator forms.
    fn operand_value(&mut self, operand: Operand) -> u8 {
        match operand {
            Operand::Address(addr) => self.bus.read(addr),
            Operand::Implied | Operand::Accumulator => self.a,
            Operand::Relative(_) => 0,
        }
    }

    /// Write a result back to where the operand came from.
    fn write_back(&mut self, operand: Operand, value: u8) {
        match operand {
            Operand::Address(addr) => self.bus.write(addr, value),
            Operand::Implied | Operand::Accumulator => self.a = value,
            Operand::Relative(_) => {}
        }
    }

    // --- dispatch ---

    fn execute(&mut self, descriptor: &Opcode, operand: Operand) {
        match descriptor.mnemonic {
            Mnemonic::Lda => self.lda(operand),
            Mnemonic::Ldx => self.ldx(operand),
            Mnemonic::Ldy => self.ldy(operand),
            Mnemonic::Sta => self.write_back(operand, self.a),
            Mnemonic::Stx => self.write_back(operand, self.x),
            Mnemonic::Sty => self.write_back(operand, self.y),
            Mnemonic::Tax => self.tax(),
            Mnemonic::Tay => self.tay(),
            Mnemonic::Tsx => self.tsx(),
            Mnemonic::Txa => self.txa(),
            Mnemonic::Txs => self.sp = self.x,
            Mnemonic::Tya => self.tya(),
            Mnemonic::Adc => self.adc(operand),
            Mnemonic::Sbc => self.sbc(operand),
            Mnemonic::And => self.and(operand),
            Mnemonic::Ora => self.ora(operand),
            Mnemonic::Eor => self.eor(operand),
            Mnemonic::Bit => self.bit(operand),
            Mnemonic::Cmp => self.compare(self.a, operand),
            Mnemonic::Cpx => self.compare(self.x, operand),
            Mnemonic::Cpy => self.compare(self.y, operand),
            Mnemonic::Inc => self.inc(operand),
            Mnemonic::Dec => self.dec(operand),
            Mnemonic::Inx => self.inx(),
            Mnemonic::Iny => self.iny(),
            Mnemonic::Dex => self.dex(),
            Mnemonic::Dey => self.dey(),
            Mnemonic::Asl => self.asl(operand),
            Mnemonic::Lsr => self.lsr(operand),
            Mnemonic::Rol => self.rol(operand),
            Mnemonic::Ror => self.ror(operand),
            Mnemonic::Jmp => self.jmp(operand),
            Mnemonic::Jsr => self.jsr(operand),
            Mnemonic::Rts => self.rts(),
            Mnemonic::Rti => self.rti(),
            Mnemonic::Bcc => self.branch(!self.flag(FLAG_CARRY), operand),
            Mnemonic::Bcs => self.branch(self.flag(FLAG_CARRY), operand),
            Mnemonic::Bne => self.branch(!self.flag(FLAG_ZERO), operand),
            Mnemonic::Beq => self.branch(self.flag(FLAG_ZERO), operand),
            Mnemonic::Bpl => self.branch(!self.flag(FLAG_NEGATIVE), operand),
            Mnemonic::Bmi => self.branch(self.flag(FLAG_NEGATIVE), operand),
            Mnemonic::Bvc => self.branch(!self.flag(FLAG_OVERFLOW), operand),
            Mnemonic::Bvs => self.branch(self.flag(FLAG_OVERFLOW), operand),
            Mnemonic::Pha => self.pha(),
            Mnemonic::Php => self.php(),
            Mnemonic::Pla => self.pla(),
            Mnemonic::Plp => self.plp(),
            Mnemonic::Clc => self.set_flag(FLAG_CARRY, false),
            Mnemonic::Sec => self.set_flag(FLAG_CARRY, true),
            Mnemonic::Cld => self.set_flag(FLAG_DECIMAL, false),
            Mnemonic::Sed => self.set_flag(FLAG_DECIMAL, true),
            Mnemonic::Cli => self.set_flag(FLAG_INTERRUPT_DISABLE, false),
            Mnemonic::Sei => self.set_flag(FLAG_INTERRUPT_DISABLE, true),
            Mnemonic::Clv => self.set_flag(FLAG_OVERFLOW, false),
            Mnemonic::Brk => self.brk(),
            Mnemonic::Nop => {}
            Mnemonic::Ill => {} // unofficial opcode: execute as a no-op
        }
    }

    // --- flag access ---

    fn flag(&self, mask: u8) -> bool {
        self.status & mask != 0
    }

    fn set_flag(&mut self, mask: u8, on: bool) {
        if on {
            self.status |= mask;
        } else {
            self.status &= !mask;
        }
    }

    fn update_zero_and_negative_flags(&mut self, value: u8) {
        self.set_flag(FLAG_ZERO, value == 0);
        self.set_flag(FLAG_NEGATIVE, value & 0x80 != 0);
    }

    // --- load / transfer ---

    fn lda(&mut self, operand: Operand) {
        self.a = self.operand_value(operand);
        self.update_zero_and_negative_flags(self.a);
    }

    fn ldx(&mut self, operand: Operand) {
        self.x = self.operand_value(operand);
        self.update_zero_and_negative_flags(self.x);
    }

    fn ldy(&mut self, operand: Operand) {
        self.y = self.operand_value(operand);
        self.update_zero_and_negative_flags(self.y);
    }

    fn tax(&mut self) {
        self.x = self.a;
        self.update_zero_and_negative_flags(self.x);
    }

    fn tay(&mut self) {
        self.y = self.a;
        self.update_zero_and_negative_flags(self.y);
    }

    fn tsx(&mut self) {
        self.x = self.sp;
        self.update_zero_and_negative_flags(self.x);
    }

    fn txa(&mut self) {
        self.a = self.x;
        self.update_zero_and_negative_flags(self.a);
    }

    fn tya(&mut self) {
        self.a = self.y;
        self.update_zero_and_negative_flags(self.a);
    }

    // --- arithmetic ---

    /// Shared ADC core. SBC feeds the ones'-complement of its operand through
    /// the same path; the Decimal flag never participates on the 2A03.
    fn add_with_carry(&mut self, value: u8) {
        let carry_in = self.flag(FLAG_CARRY) as u16;
        let sum = self.a as u16 + value as u16 + carry_in;
        let result = sum as u8;

        self.set_flag(FLAG_CARRY, sum > 0xFF);
        self.set_flag(
            FLAG_OVERFLOW,
            (!(self.a ^ value) & (self.a ^ result)) & 0x80 != 0,
        );

        self.a = result;
        self.update_zero_and_negative_flags(result);
    }

    fn adc(&mut self, operand: Operand) {
        let value = self.operand_value(operand);
        self.add_with_carry(value);
    }

    fn sbc(&mut self, operand: Operand) {
        let value = self.operand_value(operand);
        self.add_with_carry(value ^ 0xFF);
    }

    fn compare(&mut self, register: u8, operand: Operand) {
        let value = self.operand_value(operand);
        let result = register.wrapping_sub(value);

        self.set_flag(FLAG_CARRY, register >= value);
        self.update_zero_and_negative_flags(result);
    }

    // --- logic ---

    fn and(&mut self, operand: Operand) {
        self.a &= self.operand_value(operand);
        self.update_zero_and_negative_flags(self.a);
    }

    fn ora(&mut self, operand: Operand) {
        self.a |= self.operand_value(operand);
        self.update_zero_and_negative_flags(self.a);
    }

    fn eor(&mut self, operand: Operand) {
        self.a ^= self.operand_value(operand);
        self.update_zero_and_negative_flags(self.a);
    }

    fn bit(&mut self, operand: Operand) {
        let value = self.operand_value(operand);

        self.set_flag(FLAG_ZERO, self.a & value == 0);
        self.set_flag(FLAG_NEGATIVE, value & 0x80 != 0);
        self.set_flag(FLAG_OVERFLOW, value & 0x40 != 0);
    }

    // --- increment / decrement ---

    fn inc(&mut self, operand: Operand) {
        let value = self.operand_value(operand).wrapping_add(1);
        self.write_back(operand, value);
        self.update_zero_and_negative_flags(value);
    }

    fn dec(&mut self, operand: Operand) {
        let value = self.operand_value(operand).wrapping_sub(1);
        self.write_back(operand, value);
        self.update_zero_and_negative_flags(value);
    }

    fn inx(&mut self) {
        self.x = self.x.wrapping_add(1);
        self.update_zero_and_negative_flags(self.x);
    }

    fn iny(&mut self) {
        self.y = self.y.wrapping_add(1);
        self.update_zero_and_negative_flags(self.y);
    }

    fn dex(&mut self) {
        self.x = self.x.wrapping_sub(1);
        self.update_zero_and_negative_flags(self.x);
    }

    fn dey(&mut self) {
        self.y = self.y.wrapping_sub(1);
        self.update_zero_and_negative_flags(self.y);
    }

    // --- shift / rotate (accumulator or memory, by addressing mode) ---

    fn asl(&mut self, operand: Operand) {
        let value = self.operand_value(operand);

        self.set_flag(FLAG_CARRY, value & 0x80 != 0);
        let result = value << 1;

        self.write_back(operand, result);
        self.update_zero_and_negative_flags(result);
    }

    fn lsr(&mut self, operand: Operand) {
        let value = self.operand_value(operand);

        self.set_flag(FLAG_CARRY, value & 0x01 != 0);
        let result = value >> 1;

        self.write_back(operand, result);
        self.update_zero_and_negative_flags(result);
    }

    fn rol(&mut self, operand: Operand) {
        let value = self.operand_value(operand);
        let old_carry = self.flag(FLAG_CARRY) as u8;

        self.set_flag(FLAG_CARRY, value & 0x80 != 0);
        let result = (value << 1) | old_carry;

        self.write_back(operand, result);
        self.update_zero_and_negative_flags(result);
    }

    fn ror(&mut self, operand: Operand) {
        let value = self.operand_value(operand);
        let old_carry = self.flag(FLAG_CARRY) as u8;

        self.set_flag(FLAG_CARRY, value & 0x01 != 0);
        let result = (value >> 1) | (old_carry << 7);

        self.write_back(operand, result);
        self.update_zero_and_negative_flags(result);
    }

    // --- control flow ---

    fn jmp(&mut self, operand: Operand) {
        if let Operand::Address(addr) = operand {
            self.pc = addr;
        }
    }

    fn jsr(&mut self, operand: Operand) {
        if let Operand::Address(addr) = operand {
            // Push the address of the JSR's last byte; RTS adds 1 on return
            let return_addr = self.pc.wrapping_sub(1);
            self.push((return_addr >> 8) as u8);
            self.push(return_addr as u8);

            self.pc = addr;
        }
    }

    fn rts(&mut self) {
        let lo = self.pop() as u16;
        let hi = self.pop() as u16;
        self.pc = ((hi << 8) | lo).wrapping_add(1);
    }

    fn rti(&mut self) {
        let status = self.pop();
        self.status = (status & !FLAG_BREAK) | FLAG_UNUSED;

        let lo = self.pop() as u16;
        let hi = self.pop() as u16;
        self.pc = (hi << 8) | lo;
    }

    fn branch(&mut self, condition: bool, operand: Operand) {
        let Operand::Relative(offset) = operand else {
            return;
        };

        if condition {
            let old_pc = self.pc;
            self.pc = self.pc.wrapping_add(offset as u16);
            self.cycles += 1;

            if (old_pc & 0xFF00) != (self.pc & 0xFF00) {
                self.cycles += 1;
            }
        }
    }

    // --- stack ---

    fn pha(&mut self) {
        self.push(self.a);
    }

    fn php(&mut self) {
        // Break and Unused read as 1 in the pushed copy only
        self.push(self.status | FLAG_BREAK | FLAG_UNUSED);
    }

    fn pla(&mut self) {
        self.a = self.pop();
        self.update_zero_and_negative_flags(self.a);
    }

    fn plp(&mut self) {
        let value = self.pop();
        self.status = (value & !FLAG_BREAK) | FLAG_UNUSED;
    }

    fn push(&mut self, value: u8) {
        let addr = 0x0100 | self.sp as u16;
        self.bus.write(addr, value);
        self.sp = self.sp.wrapping_sub(1);
    }

    fn pop(&mut self) -> u8 {
        self.sp = self.sp.wrapping_add(1);
        let addr = 0x0100 | self.sp as u16;
        self.bus.read(addr)
    }

    // --- interrupt entry sequences ---

    fn brk(&mut self) {
        self.pc = self.pc.wrapping_add(1); // skip the padding byte

        self.push((self.pc >> 8) as u8);
        self.push(self.pc as u8);
        self.push(self.status | FLAG_BREAK | FLAG_UNUSED);

        self.set_flag(FLAG_INTERRUPT_DISABLE, true);

        let lo = self.bus.read(VECTOR_IRQ) as u16;
        let hi = self.bus.read(VECTOR_IRQ + 1) as u16;
        self.pc = (hi << 8) | lo;
    }

    fn nmi(&mut self) {
        self.push((self.pc >> 8) as u8);
        self.push(self.pc as u8);
        self.push((self.status & !FLAG_BREAK) | FLAG_UNUSED);

        self.set_flag(FLAG_INTERRUPT_DISABLE, true);

        let lo = self.bus.read(VECTOR_NMI) as u16;
        let hi = self.bus.read(VECTOR_NMI + 1) as u16;
        self.pc = (hi << 8) | lo;

        self.cycles += 8;
    }

    fn irq(&mut self) {
        self.push((self.pc >> 8) as u8);
        self.push(self.pc as u8);
        self.push((self.status & !FLAG_BREAK) | FLAG_UNUSED);

        self.set_flag(FLAG_INTERRUPT_DISABLE, true);

        let lo = self.bus.read(VECTOR_IRQ) as u16;
        let hi = self.bus.read(VECTOR_IRQ + 1) as u16;
        self.pc = (hi << 8) | lo;

        self.cycles += 7;
    }
}
