//! Tick throughput across grid sizes.

use std::time::Instant;

use torus_life::{Automaton, Initial, LifeError, logging, presets};
use tracing::info;

fn time_ticks(size: u32, initial: Initial, iterations: u64) -> Result<f64, LifeError> {
    let mut life = Automaton::new(size, size, initial)?;
    let start = Instant::now();
    life.step(iterations)?;
    Ok(start.elapsed().as_secs_f64() * 1000.0 / iterations as f64)
}

fn main() -> Result<(), LifeError> {
    logging::init_tracing();
    println!("=== Game of Life tick benchmark ===\n");

    let sizes = [64, 128, 256, 512, 1024, 2048];
    let iterations = 20;

    println!(
        "{:>10} {:>12} {:>12} {:>14} {:>10}",
        "Size", "Random", "Interleaved", "Glider", "Mcells/s"
    );
    println!("{:-<62}", "");

    for size in sizes {
        let random_ms = time_ticks(size, Initial::Random { seed: 0x5EED }, iterations)?;
        let interleaved_ms = time_ticks(size, Initial::Interleaved, iterations)?;
        let glider_ms = time_ticks(size, presets::glider().centred(size, size), iterations)?;

        let cells = size as f64 * size as f64;
        println!(
            "{:>10} {:>12.3} {:>12.3} {:>14.3} {:>10.1}",
            format!("{}x{}", size, size),
            random_ms,
            interleaved_ms,
            glider_ms,
            cells / (random_ms / 1000.0) / 1_000_000.0,
        );
    }

    let size = 1024u32;
    let bytes = Automaton::new(size, size, Initial::Dead)?.cells_view().byte_len();
    info!(size, bytes, "packed buffer, double-buffered in memory");
    Ok(())
}
