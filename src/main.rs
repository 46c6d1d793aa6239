//! NES core trace runner.
//!
//! Loads a cartridge and executes instructions, printing a nestest-style
//! trace line per step. Usage: famicore <path/to/game.nes> [steps]

use std::env;
use std::process;

use ansi_term::Colour::{Green, Red};
use famicore::{bus::SystemBus, cartridge::cartridge::Cartridge, cpu::cpu::CPU};

const DEFAULT_STEPS: usize = 100;

fn main() {
    let mut args = env::args().skip(1);
    let Some(path) = args.next() else {
        eprintln!("usage: famicore <path/to/game.nes> [steps]");
        process::exit(2);
    };
    let steps = args
        .next()
        .and_then(|s| s.parse().ok())
        .unwrap_or(DEFAULT_STEPS);

    let cart = match Cartridge::load(&path) {
        Ok(cart) => cart,
        Err(err) => {
            eprintln!("{} {}", Red.bold().paint("ERROR"), err);
            process::exit(1);
        }
    };

    eprintln!(
        "{} loaded {}: mapper {}, {}x16K PRG, {}x8K CHR",
        Green.bold().paint("INFO"),
        path,
        cart.mapper_id,
        cart.prg_banks,
        cart.chr_banks
    );

    let bus = SystemBus::new(cart);
    let mut cpu = CPU::new(bus);
    cpu.reset();

    for _ in 0..steps {
        println!("{}", cpu.trace_line());
        cpu.step();
    }
}
