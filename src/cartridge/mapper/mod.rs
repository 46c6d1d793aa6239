//! NES mappers for PRG/CHR memory mapping.
//!
//! Mapper0 (NROM), Mapper1 (MMC1), Mapper2 (UxROM), and common types.

/// Which cartridge address space an access targets: CPU program space
/// ($6000–$FFFF) or PPU pattern space ($0000–$1FFF).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Space {
    Program,
    Pattern,
}

/// Nametable mirroring mode, reported to the PPU collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mirroring {
    Horizontal,
    Vertical,
    OneScreenLower,
    OneScreenUpper,
}

pub mod mapper;

pub mod mapper0;
pub mod mapper1;
pub mod mapper2;
