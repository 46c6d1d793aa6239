//! 6502 CPU emulation for the NES.
//!
//! Table-driven dispatch: every opcode byte indexes a 256-entry descriptor
//! table (mnemonic, addressing mode, length, cycles) and a single execute
//! match keyed on the mnemonic tag performs the semantic effect. Unofficial
//! opcodes fall back to a one-cycle no-op. The Bus trait covers all memory
//! and I/O access.

pub mod cpu;
pub mod flags;
pub mod opcodes;
