//! coding-sim: demo binary for the source- and channel-coding library.
//!
//! Runs one compression trial (sparse Bernoulli source -> compress ->
//! decompress -> verify) and one transmission trial (sample payload ->
//! channel code -> noisy channel -> decode -> verify), printing a
//! summary of each.

mod config;
mod input_gen;

use coding_sim_core::channel::ChannelConfig;
use coding_sim_core::pipeline::{compress, decompress, transmit};
use coding_sim_core::{source, stats, verify};
use config::Config;

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();

    let config = match Config::from_args(&args) {
        Ok(config) => config,
        Err(msg) => {
            eprintln!("error: {msg}");
            eprintln!("try --help");
            std::process::exit(2);
        }
    };

    if config.print_config {
        config.print();
    }

    if let Err(err) = run(&config) {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run(config: &Config) -> coding_sim_core::Result<()> {
    // === Source coding trial ===
    let seq = source::bernoulli(config.n, config.p, config.seed)?;
    let compressed = compress(config.method, &seq)?;
    let decoded = decompress(config.method, &compressed.bits, config.n)?;
    let outcome = verify::verify_bits(&seq, &decoded);

    let comp_stats = stats::CompressionStats {
        source_bits: seq.len(),
        compressed_bits: compressed.bits.len(),
    };
    comp_stats.print_summary(config.p, &outcome);

    // first few runs, the way the demo's diagnostic table shows them
    if !compressed.runs.is_empty() {
        println!("first runs (start, delta):");
        for block in compressed.runs.iter().take(10) {
            println!("  {:>8}  {:>8}", block.start, block.delta);
        }
    }
    println!();

    // === Channel coding trial ===
    let payload = input_gen::generate_payload(config.seed, config.payload_bytes);
    let channel_config = ChannelConfig {
        flip_rate: config.flip_rate,
        seed: config.seed,
    };
    let result = transmit(config.code, channel_config, &payload)?;

    let trans_stats = stats::TransmissionStats {
        source_bytes: payload.len(),
        transmitted_bytes: result.encoded.len(),
        bits_flipped: result
            .noise_mask
            .iter()
            .map(|b| b.count_ones() as usize)
            .sum(),
        residual_byte_errors: stats::count_byte_errors(&payload, &result.decoded),
    };
    trans_stats.print_summary();

    let channel_outcome = verify::verify_bytes(&payload, &result.decoded);
    println!("Verification: {channel_outcome}");

    Ok(())
}
