//! Memory bus and address decoding.
//!
//! Maps the CPU's 64 KiB address space to internal RAM and the cartridge.

use crate::cartridge::{Space, cartridge::Cartridge};

/// Trait for memory access used by the CPU. Both functions are total: every
/// address in 0x0000–0xFFFF reads some byte and accepts a write.
pub trait Bus {
    fn read(&mut self, addr: u16) -> u8;
    fn write(&mut self, addr: u16, data: u8);
}

/// Main system bus: 2 KiB internal RAM plus the cartridge.
///
/// PPU/APU register ranges have no device behind them in this core; they
/// follow the open-bus policy (reads 0, writes discarded) like any other
/// unmapped address.
pub struct SystemBus {
    pub ram: [u8; 2048],
    pub cart: Cartridge,
}

impl SystemBus {
    pub fn new(cart: Cartridge) -> Self {
        Self {
            ram: [0; 2048],
            cart,
        }
    }
}

impl Bus for SystemBus {
    fn read(&mut self, addr: u16) -> u8 {
        match addr {
            // Internal RAM (mirrored 4x in 0x0000-0x1FFF)
            0x0000..=0x1FFF => self.ram[(addr & 0x07FF) as usize],
            // Cartridge SRAM window and PRG ROM
            0x6000..=0xFFFF => self.cart.read(addr, Space::Program),
            // No mapped device: open bus
            _ => 0,
        }
    }

    fn write(&mut self, addr: u16, data: u8) {
        match addr {
            0x0000..=0x1FFF => self.ram[(addr & 0x07FF) as usize] = data,
            // Cartridge: SRAM or mapper registers (PRG ROM itself is read-only)
            0x6000..=0xFFFF => self.cart.write(addr, Space::Program, data),
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cartridge::cartridge::Cartridge;

    fn nrom_image(prg_banks: u8) -> Vec<u8> {
        let mut rom = vec![0u8; 16 + prg_banks as usize * 16384 + 8192];
        rom[0..4].copy_from_slice(b"NES\x1A");
        rom[4] = prg_banks;
        rom[5] = 1;
        rom
    }

    fn bus() -> SystemBus {
        let cart = Cartridge::from_bytes(&nrom_image(1)).unwrap();
        SystemBus::new(cart)
    }

    #[test]
    fn ram_is_mirrored_every_2k() {
        let mut bus = bus();
        bus.write(0x0000, 0xAB);
        assert_eq!(bus.read(0x0800), 0xAB);
        assert_eq!(bus.read(0x1000), 0xAB);
        assert_eq!(bus.read(0x1800), 0xAB);
    }

    #[test]
    fn unmapped_addresses_read_zero_and_swallow_writes() {
        let mut bus = bus();
        bus.write(0x2002, 0xFF);
        bus.write(0x4016, 0xFF);
        assert_eq!(bus.read(0x2002), 0);
        assert_eq!(bus.read(0x4016), 0);
        assert_eq!(bus.read(0x5000), 0);
    }

    #[test]
    fn cartridge_range_delegates_to_mapper() {
        let mut rom = nrom_image(1);
        rom[16] = 0x42; // first PRG byte, visible at $8000
        let cart = Cartridge::from_bytes(&rom).unwrap();
        let mut bus = SystemBus::new(cart);
        assert_eq!(bus.read(0x8000), 0x42);
        // 16 KiB PRG is mirrored into the upper half of the window
        assert_eq!(bus.read(0xC000), 0x42);
    }
}
