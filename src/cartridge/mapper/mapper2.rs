//! Mapper 2 (UxROM): one switchable 16 KiB PRG bank plus a fixed last bank.
//!
//! [UxROM](https://www.nesdev.org/wiki/UxROM): any write to $8000–$FFFF latches
//! the low 4 bits of the data as the bank visible at $8000–$BFFF; $C000–$FFFF
//! always shows the last 16 KiB of PRG. CHR is 8 KiB RAM on these boards.

use crate::cartridge::mapper::{Mirroring, Space, mapper::Mapper};

const PRG_BANK_SIZE: usize = 0x4000;

pub struct Mapper2 {
    prg_rom: Vec<u8>,
    chr_ram: Vec<u8>,
    mirroring: Mirroring,
    /// Byte offset of the bank at $8000; always a multiple of 16 KiB.
    bank0_offset: usize,
    /// Byte offset of the fixed bank at $C000.
    bank1_offset: usize,
}

impl Mapper2 {
    pub fn new(prg_rom: Vec<u8>, mirroring: Mirroring) -> Self {
        let mut mapper = Self {
            prg_rom,
            chr_ram: vec![0; 8 * 1024],
            mirroring,
            bank0_offset: 0,
            bank1_offset: 0,
        };
        mapper.reset();
        mapper
    }

    fn bank_count(&self) -> usize {
        self.prg_rom.len() / PRG_BANK_SIZE
    }
}

impl Mapper for Mapper2 {
    fn read(&self, addr: u16, space: Space) -> u8 {
        match space {
            Space::Program => match addr {
                0x8000..=0xBFFF => self.prg_rom[self.bank0_offset + (addr - 0x8000) as usize],
                0xC000..=0xFFFF => self.prg_rom[self.bank1_offset + (addr - 0xC000) as usize],
                _ => 0,
            },
            Space::Pattern => match addr {
                0x0000..=0x1FFF => self.chr_ram[addr as usize],
                _ => 0,
            },
        }
    }

    fn write(&mut self, addr: u16, space: Space, data: u8) {
        match space {
            Space::Program => {
                if addr >= 0x8000 {
                    let bank = (data & 0x0F) as usize % self.bank_count();
                    self.bank0_offset = bank * PRG_BANK_SIZE;
                }
            }
            Space::Pattern => {
                if addr < 0x2000 {
                    self.chr_ram[addr as usize] = data;
                }
            }
        }
    }

    fn reset(&mut self) {
        self.bank0_offset = 0;
        self.bank1_offset = (self.bank_count() - 1) * PRG_BANK_SIZE;
    }

    fn mirroring(&self) -> Mirroring {
        self.mirroring
    }
}
