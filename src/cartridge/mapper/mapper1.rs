//! Mapper 1 (MMC1): bank switching via a 5-bit serial shift register.
//!
//! [MMC1](https://www.nesdev.org/wiki/MMC1): five consecutive writes to
//! $8000–$FFFF each shift in one data bit (LSB first); the fifth write commits
//! the value to the register selected by the address of that final write:
//! $8000–$9FFF control, $A000–$BFFF CHR bank 0, $C000–$DFFF CHR bank 1,
//! $E000–$FFFF PRG bank. A write with bit 7 set at any point clears the shift
//! register and forces the control register's PRG mode to 3. Control bits:
//! 0–1 mirroring, 2–3 PRG bank mode, 4 CHR bank mode. Battery boards carry
//! 8 KiB PRG RAM at $6000–$7FFF.

use crate::cartridge::mapper::{Mirroring, Space, mapper::Mapper};

const PRG_BANK_SIZE: usize = 0x4000;
const CHR_BANK_SIZE: usize = 0x1000;

pub struct Mapper1 {
    prg_rom: Vec<u8>,
    chr: Vec<u8>,
    chr_is_ram: bool,
    prg_ram: Vec<u8>,

    shift_reg: u8,
    shift_count: u8,

    control: u8,
    chr_bank_0: u8,
    chr_bank_1: u8,
    prg_bank: u8,

    // Derived from the registers above; recomputed on every register change.
    // Always bank-size multiples inside the backing buffers.
    prg_offsets: [usize; 2],
    chr_offsets: [usize; 2],
}

impl Mapper1 {
    pub fn new(prg_rom: Vec<u8>, chr: Vec<u8>, chr_is_ram: bool) -> Self {
        let mut mapper = Self {
            prg_rom,
            chr,
            chr_is_ram,
            prg_ram: vec![0; 8 * 1024],
            shift_reg: 0,
            shift_count: 0,
            control: 0x0C,
            chr_bank_0: 0,
            chr_bank_1: 0,
            prg_bank: 0,
            prg_offsets: [0; 2],
            chr_offsets: [0; 2],
        };
        mapper.update_offsets();
        mapper
    }

    fn prg_bank_count(&self) -> usize {
        self.prg_rom.len() / PRG_BANK_SIZE
    }

    fn chr_bank_count(&self) -> usize {
        self.chr.len() / CHR_BANK_SIZE
    }

    /// Recompute the visible bank offsets from the control and bank registers.
    fn update_offsets(&mut self) {
        let prg_count = self.prg_bank_count();
        let prg_bank = self.prg_bank as usize % prg_count;

        match (self.control >> 2) & 0b11 {
            // 32 KiB mode: low bank bit ignored
            0 | 1 => {
                let bank = prg_bank & !1;
                let hi = (bank + 1).min(prg_count - 1);
                self.prg_offsets = [bank * PRG_BANK_SIZE, hi * PRG_BANK_SIZE];
            }
            // First bank fixed at $8000, switch at $C000
            2 => self.prg_offsets = [0, prg_bank * PRG_BANK_SIZE],
            // Switch at $8000, last bank fixed at $C000
            _ => {
                self.prg_offsets = [
                    prg_bank * PRG_BANK_SIZE,
                    (prg_count - 1) * PRG_BANK_SIZE,
                ];
            }
        }

        let chr_count = self.chr_bank_count();
        if self.control & 0x10 == 0 {
            // One 8 KiB bank: low bank bit ignored
            let bank = (self.chr_bank_0 as usize % chr_count) & !1;
            self.chr_offsets = [bank * CHR_BANK_SIZE, (bank + 1) * CHR_BANK_SIZE];
        } else {
            // Two independent 4 KiB banks
            self.chr_offsets = [
                (self.chr_bank_0 as usize % chr_count) * CHR_BANK_SIZE,
                (self.chr_bank_1 as usize % chr_count) * CHR_BANK_SIZE,
            ];
        }
    }

    fn load_register(&mut self, addr: u16, value: u8) {
        match addr {
            0x8000..=0x9FFF => self.control = value & 0x1F,
            0xA000..=0xBFFF => self.chr_bank_0 = value & 0x1F,
            0xC000..=0xDFFF => self.chr_bank_1 = value & 0x1F,
            _ => self.prg_bank = value & 0x0F,
        }
        self.update_offsets();
    }
}

impl Mapper for Mapper1 {
    fn read(&self, addr: u16, space: Space) -> u8 {
        match space {
            Space::Program => match addr {
                0x6000..=0x7FFF => self.prg_ram[(addr - 0x6000) as usize],
                0x8000..=0xBFFF => self.prg_rom[self.prg_offsets[0] + (addr - 0x8000) as usize],
                0xC000..=0xFFFF => self.prg_rom[self.prg_offsets[1] + (addr - 0xC000) as usize],
                _ => 0,
            },
            Space::Pattern => match addr {
                0x0000..=0x0FFF => self.chr[self.chr_offsets[0] + addr as usize],
                0x1000..=0x1FFF => self.chr[self.chr_offsets[1] + (addr - 0x1000) as usize],
                _ => 0,
            },
        }
    }

    fn write(&mut self, addr: u16, space: Space, data: u8) {
        match space {
            Space::Program => match addr {
                0x6000..=0x7FFF => self.prg_ram[(addr - 0x6000) as usize] = data,
                0x8000..=0xFFFF => {
                    // Bit 7 aborts the sequence and forces PRG mode 3
                    if data & 0x80 != 0 {
                        self.shift_reg = 0;
                        self.shift_count = 0;
                        self.control |= 0x0C;
                        self.update_offsets();
                        return;
                    }

                    self.shift_reg >>= 1;
                    self.shift_reg |= (data & 1) << 4;
                    self.shift_count += 1;

                    if self.shift_count == 5 {
                        let value = self.shift_reg;
                        self.shift_reg = 0;
                        self.shift_count = 0;
                        self.load_register(addr, value);
                    }
                }
                _ => {}
            },
            Space::Pattern => {
                if self.chr_is_ram && addr < 0x2000 {
                    let offset = match addr {
                        0x0000..=0x0FFF => self.chr_offsets[0] + addr as usize,
                        _ => self.chr_offsets[1] + (addr - 0x1000) as usize,
                    };
                    self.chr[offset] = data;
                }
            }
        }
    }

    fn reset(&mut self) {
        self.shift_reg = 0;
        self.shift_count = 0;
        self.control = 0x0C;
        self.chr_bank_0 = 0;
        self.chr_bank_1 = 0;
        self.prg_bank = 0;
        self.update_offsets();
    }

    /// Mirroring from control bits 0–1.
    fn mirroring(&self) -> Mirroring {
        match self.control & 0b11 {
            0 => Mirroring::OneScreenLower,
            1 => Mirroring::OneScreenUpper,
            2 => Mirroring::Vertical,
            _ => Mirroring::Horizontal,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 8 PRG banks and 4 CHR (4 KiB) banks, each filled with its index.
    fn mapper() -> Mapper1 {
        let mut prg = vec![0u8; 8 * PRG_BANK_SIZE];
        for (i, chunk) in prg.chunks_mut(PRG_BANK_SIZE).enumerate() {
            chunk.fill(i as u8);
        }
        let mut chr = vec![0u8; 4 * CHR_BANK_SIZE];
        for (i, chunk) in chr.chunks_mut(CHR_BANK_SIZE).enumerate() {
            chunk.fill(0x10 + i as u8);
        }
        Mapper1::new(prg, chr, false)
    }

    /// Shift `value` into the register selected by `addr`, LSB first.
    fn serial_write(m: &mut Mapper1, addr: u16, value: u8) {
        for i in 0..5 {
            m.write(addr, Space::Program, (value >> i) & 1);
        }
    }

    #[test]
    fn powers_on_in_prg_mode_3() {
        let m = mapper();
        assert_eq!(m.read(0x8000, Space::Program), 0);
        assert_eq!(m.read(0xC000, Space::Program), 7); // last bank fixed
    }

    #[test]
    fn five_writes_commit_prg_bank() {
        let mut m = mapper();
        serial_write(&mut m, 0xE000, 3);
        assert_eq!(m.read(0x8000, Space::Program), 3);
        assert_eq!(m.read(0xC000, Space::Program), 7);
    }

    #[test]
    fn bit7_write_clears_shift_progress() {
        let mut m = mapper();
        // Three bits of a would-be bank 7, then an abort
        m.write(0xE000, Space::Program, 1);
        m.write(0xE000, Space::Program, 1);
        m.write(0xE000, Space::Program, 1);
        m.write(0xE000, Space::Program, 0x80);
        // A fresh 5-write sequence is unaffected by the aborted bits
        serial_write(&mut m, 0xE000, 2);
        assert_eq!(m.read(0x8000, Space::Program), 2);
    }

    #[test]
    fn bit7_write_forces_prg_mode_3() {
        let mut m = mapper();
        // Mode 2: first bank fixed, $C000 switchable
        serial_write(&mut m, 0x8000, 0b01000);
        serial_write(&mut m, 0xE000, 5);
        assert_eq!(m.read(0x8000, Space::Program), 0);
        assert_eq!(m.read(0xC000, Space::Program), 5);

        m.write(0x8000, Space::Program, 0x80);
        assert_eq!(m.read(0xC000, Space::Program), 7);
    }

    #[test]
    fn mode_0_switches_32k_ignoring_low_bit() {
        let mut m = mapper();
        serial_write(&mut m, 0x8000, 0b00000);
        serial_write(&mut m, 0xE000, 5); // odd bank: low bit ignored
        assert_eq!(m.read(0x8000, Space::Program), 4);
        assert_eq!(m.read(0xC000, Space::Program), 5);
    }

    #[test]
    fn chr_4k_mode_switches_halves_independently() {
        let mut m = mapper();
        serial_write(&mut m, 0x8000, 0b11100); // CHR mode 1, PRG mode 3
        serial_write(&mut m, 0xA000, 2);
        serial_write(&mut m, 0xC000, 1);
        assert_eq!(m.read(0x0000, Space::Pattern), 0x12);
        assert_eq!(m.read(0x1000, Space::Pattern), 0x11);
    }

    #[test]
    fn chr_8k_mode_ignores_low_bit() {
        let mut m = mapper();
        serial_write(&mut m, 0x8000, 0b01100); // CHR mode 0
        serial_write(&mut m, 0xA000, 3);
        assert_eq!(m.read(0x0000, Space::Pattern), 0x12);
        assert_eq!(m.read(0x1000, Space::Pattern), 0x13);
    }

    #[test]
    fn prg_ram_window_is_readable_and_writable() {
        let mut m = mapper();
        m.write(0x6123, Space::Program, 0x5A);
        assert_eq!(m.read(0x6123, Space::Program), 0x5A);
    }

    #[test]
    fn reset_restores_power_on_banks() {
        let mut m = mapper();
        serial_write(&mut m, 0xE000, 4);
        m.reset();
        assert_eq!(m.read(0x8000, Space::Program), 0);
        assert_eq!(m.read(0xC000, Space::Program), 7);
    }

    #[test]
    fn mirroring_follows_control_bits() {
        let mut m = mapper();
        serial_write(&mut m, 0x8000, 0b01110);
        assert_eq!(m.mirroring(), Mirroring::Vertical);
        serial_write(&mut m, 0x8000, 0b01111);
        assert_eq!(m.mirroring(), Mirroring::Horizontal);
    }
}
