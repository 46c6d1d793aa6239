//! Mapper trait: PRG/CHR memory access, bank-select state, and mirroring.

use crate::cartridge::mapper::{Mirroring, Space};

/// Trait for NES cartridge mappers. The bus routes all cartridge-range CPU
/// accesses here in Program space; an external PPU uses Pattern space.
pub trait Mapper {
    /// Read a byte. Program space covers SRAM ($6000–$7FFF) and PRG
    /// ($8000–$FFFF); Pattern space covers CHR ($0000–$1FFF).
    fn read(&self, addr: u16, space: Space) -> u8;
    /// Write a byte: SRAM, CHR RAM, or mapper registers. PRG ROM never
    /// changes; bank-select registers live under the PRG window.
    fn write(&mut self, addr: u16, space: Space, data: u8);
    /// Return bank-select state to its power-on configuration.
    fn reset(&mut self);
    /// Current nametable mirroring for the PPU.
    fn mirroring(&self) -> Mirroring;
}
