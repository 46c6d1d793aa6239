//! NES cartridge loading from the iNES format (.nes files).
//!
//! [iNES](https://www.nesdev.org/wiki/INES): 16-byte header (magic "NES\x1A",
//! PRG size in 16 KiB units, CHR size in 8 KiB units, flags 6–7 for mirroring,
//! battery, trainer, and mapper number), an optional 512-byte trainer, then
//! PRG ROM, then CHR ROM. A CHR size of zero means the board carries 8 KiB of
//! CHR RAM instead. Header problems are load-time errors; nothing in here can
//! fail once the cartridge is constructed.

use std::fs;
use std::io;
use std::path::Path;

use thiserror::Error;

use crate::cartridge::mapper::mapper::Mapper;
use crate::cartridge::mapper::mapper0::Mapper0;
use crate::cartridge::mapper::mapper1::Mapper1;
use crate::cartridge::mapper::mapper2::Mapper2;
use crate::cartridge::mapper::{Mirroring, Space};

const NES_MAGIC: [u8; 4] = [0x4E, 0x45, 0x53, 0x1A]; // "NES\x1A"
const HEADER_SIZE: usize = 16;
const TRAINER_SIZE: usize = 512;
const PRG_BANK_SIZE: usize = 16 * 1024;
const CHR_BANK_SIZE: usize = 8 * 1024;

/// Errors raised while loading or parsing a .nes image.
#[derive(Debug, Error)]
pub enum CartridgeError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("invalid ROM format: {0}")]
    InvalidRomFormat(String),

    #[error("unsupported mapper {0}")]
    UnsupportedMapper(u8),
}

/// A loaded cartridge: header metadata plus the mapper that implements all
/// cartridge-space reads and writes.
pub struct Cartridge {
    pub prg_banks: u8,
    pub chr_banks: u8,
    pub mapper_id: u8,
    pub mirroring: Mirroring,
    pub has_battery: bool,
    pub has_trainer: bool,
    pub mapper: Box<dyn Mapper>,
}

impl Cartridge {
    /// Load a cartridge from a .nes file on disk.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, CartridgeError> {
        let data = fs::read(path)?;
        Self::from_bytes(&data)
    }

    /// Parse a cartridge from an in-memory iNES image.
    pub fn from_bytes(data: &[u8]) -> Result<Self, CartridgeError> {
        if data.len() < HEADER_SIZE {
            return Err(CartridgeError::InvalidRomFormat(
                "file shorter than the 16-byte iNES header".to_string(),
            ));
        }
        if data[0..4] != NES_MAGIC {
            return Err(CartridgeError::InvalidRomFormat(
                "missing NES magic number".to_string(),
            ));
        }

        let prg_banks = data[4];
        let chr_banks = data[5];
        if prg_banks == 0 {
            return Err(CartridgeError::InvalidRomFormat(
                "no PRG ROM banks".to_string(),
            ));
        }
        let flags6 = data[6];
        let flags7 = data[7];

        let mirroring = if flags6 & 0x01 != 0 {
            Mirroring::Vertical
        } else {
            Mirroring::Horizontal
        };
        let has_battery = flags6 & 0x02 != 0;
        let has_trainer = flags6 & 0x04 != 0;
        let mapper_id = (flags6 >> 4) | (flags7 & 0xF0);

        let prg_size = prg_banks as usize * PRG_BANK_SIZE;
        let chr_size = chr_banks as usize * CHR_BANK_SIZE;

        let prg_start = HEADER_SIZE + if has_trainer { TRAINER_SIZE } else { 0 };
        let chr_start = prg_start + prg_size;
        if data.len() < chr_start + chr_size {
            return Err(CartridgeError::InvalidRomFormat(format!(
                "file truncated: expected {} bytes of PRG/CHR data",
                prg_size + chr_size
            )));
        }

        let prg_rom = data[prg_start..chr_start].to_vec();
        // No CHR ROM means the board has 8 KiB of CHR RAM
        let chr_is_ram = chr_banks == 0;
        let chr = if chr_is_ram {
            vec![0; CHR_BANK_SIZE]
        } else {
            data[chr_start..chr_start + chr_size].to_vec()
        };

        let mapper: Box<dyn Mapper> = match mapper_id {
            0 => Box::new(Mapper0::new(prg_rom, chr, chr_is_ram, mirroring)),
            1 => Box::new(Mapper1::new(prg_rom, chr, chr_is_ram)),
            2 => Box::new(Mapper2::new(prg_rom, mirroring)),
            id => return Err(CartridgeError::UnsupportedMapper(id)),
        };

        Ok(Self {
            prg_banks,
            chr_banks,
            mapper_id,
            mirroring,
            has_battery,
            has_trainer,
            mapper,
        })
    }

    pub fn read(&self, addr: u16, space: Space) -> u8 {
        self.mapper.read(addr, space)
    }

    pub fn write(&mut self, addr: u16, space: Space, data: u8) {
        self.mapper.write(addr, space, data);
    }

    /// Return the mapper's bank-select state to its power-on configuration.
    pub fn reset(&mut self) {
        self.mapper.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image(prg_banks: u8, chr_banks: u8, flags6: u8, flags7: u8) -> Vec<u8> {
        let trainer = if flags6 & 0x04 != 0 { TRAINER_SIZE } else { 0 };
        let mut data = vec![
            0u8;
            HEADER_SIZE
                + trainer
                + prg_banks as usize * PRG_BANK_SIZE
                + chr_banks as usize * CHR_BANK_SIZE
        ];
        data[0..4].copy_from_slice(&NES_MAGIC);
        data[4] = prg_banks;
        data[5] = chr_banks;
        data[6] = flags6;
        data[7] = flags7;
        data
    }

    #[test]
    fn parses_header_metadata() {
        let cart = Cartridge::from_bytes(&image(2, 1, 0b0000_0011, 0)).unwrap();
        assert_eq!(cart.prg_banks, 2);
        assert_eq!(cart.chr_banks, 1);
        assert_eq!(cart.mapper_id, 0);
        assert_eq!(cart.mirroring, Mirroring::Vertical);
        assert!(cart.has_battery);
        assert!(!cart.has_trainer);
    }

    #[test]
    fn mapper_id_combines_both_flag_nibbles() {
        let cart = Cartridge::from_bytes(&image(1, 1, 0x20, 0x00)).unwrap();
        assert_eq!(cart.mapper_id, 2);
    }

    #[test]
    fn bad_magic_is_invalid_rom_format() {
        let mut data = image(1, 1, 0, 0);
        data[0] = b'X';
        assert!(matches!(
            Cartridge::from_bytes(&data),
            Err(CartridgeError::InvalidRomFormat(_))
        ));
    }

    #[test]
    fn truncated_file_is_invalid_rom_format() {
        let data = image(2, 1, 0, 0);
        assert!(matches!(
            Cartridge::from_bytes(&data[..data.len() - 100]),
            Err(CartridgeError::InvalidRomFormat(_))
        ));
    }

    #[test]
    fn unknown_mapper_is_unsupported() {
        assert!(matches!(
            Cartridge::from_bytes(&image(1, 1, 0x40, 0x00)),
            Err(CartridgeError::UnsupportedMapper(4))
        ));
    }

    #[test]
    fn trainer_block_is_skipped() {
        let mut data = image(1, 1, 0b0000_0100, 0);
        // First PRG byte sits after header + trainer
        data[HEADER_SIZE + TRAINER_SIZE] = 0x99;
        let cart = Cartridge::from_bytes(&data).unwrap();
        assert!(cart.has_trainer);
        assert_eq!(cart.read(0x8000, Space::Program), 0x99);
    }

    #[test]
    fn zero_chr_banks_means_chr_ram() {
        let mut cart = Cartridge::from_bytes(&image(1, 0, 0, 0)).unwrap();
        cart.write(0x0000, Space::Pattern, 0x77);
        assert_eq!(cart.read(0x0000, Space::Pattern), 0x77);
    }
}
