//! Mapper 0 (NROM): no bank switching, 16/32 KiB PRG, 8 KiB CHR.

use crate::cartridge::mapper::{Mirroring, Space, mapper::Mapper};

/// NROM: PRG is a fixed window (a 16 KiB ROM is mirrored across both halves
/// of $8000–$FFFF), CHR is a flat 8 KiB array writable only when RAM-backed.
pub struct Mapper0 {
    prg_rom: Vec<u8>,
    chr: Vec<u8>,
    chr_is_ram: bool,
    mirroring: Mirroring,
}

impl Mapper0 {
    pub fn new(prg_rom: Vec<u8>, chr: Vec<u8>, chr_is_ram: bool, mirroring: Mirroring) -> Self {
        Self {
            prg_rom,
            chr,
            chr_is_ram,
            mirroring,
        }
    }
}

impl Mapper for Mapper0 {
    fn read(&self, addr: u16, space: Space) -> u8 {
        match space {
            Space::Program => match addr {
                0x8000..=0xFFFF => {
                    let mut offset = (addr - 0x8000) as usize;
                    if self.prg_rom.len() == 16 * 1024 {
                        offset %= 16 * 1024;
                    }
                    self.prg_rom[offset]
                }
                _ => 0, // no SRAM on NROM boards
            },
            Space::Pattern => match addr {
                0x0000..=0x1FFF => self.chr[addr as usize],
                _ => 0,
            },
        }
    }

    fn write(&mut self, addr: u16, space: Space, data: u8) {
        match space {
            Space::Program => {} // PRG ROM, no registers
            Space::Pattern => {
                if self.chr_is_ram && addr < 0x2000 {
                    self.chr[addr as usize] = data;
                }
            }
        }
    }

    fn reset(&mut self) {}

    fn mirroring(&self) -> Mirroring {
        self.mirroring
    }
}
