//! Famicore: the processing core of the NES (Nintendo Entertainment System).
//!
//! Implements the parts of the console documented on the
//! [NESdev Wiki](https://www.nesdev.org/wiki/NES_reference_guide) that need
//! bit-exact arithmetic and cycle-accurate timing: the Ricoh 2A03's 6502 CPU,
//! the CPU memory bus, and cartridge mapper bank switching. Rendering, audio,
//! and input are external collaborators that talk to this core through the bus
//! and mapper interfaces.
//!
//! ## Modules (NESdev references)
//!
//! - **bus** – [CPU memory map](https://www.nesdev.org/wiki/CPU_memory_map): 2 KiB
//!   RAM mirrored to $1FFF, cartridge at $6000–$FFFF, open bus elsewhere
//! - **cartridge** – [iNES](https://www.nesdev.org/wiki/INES) loading;
//!   [Mapper](https://www.nesdev.org/wiki/Mapper) NROM (0), MMC1 (1), UxROM (2)
//! - **cpu** – [6502](https://www.nesdev.org/wiki/CPU): table-driven dispatch over
//!   all 256 opcodes, documented hardware quirks, [NMI](https://www.nesdev.org/wiki/NMI)/IRQ/reset

pub mod bus;
pub mod cartridge;
pub mod cpu;
