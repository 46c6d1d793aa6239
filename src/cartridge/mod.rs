//! NES cartridge loading and mapper support.
//!
//! - **cartridge**: Parses iNES (.nes) images, holds header metadata and the mapper.
//! - **mapper**: NROM (0), MMC1 (1), UxROM (2); PRG/CHR bank switching.

pub mod cartridge;
pub mod mapper;

pub use mapper::{Mirroring, Space};
