//! Configuration for the coding-sim application.
//!
//! Handles parsing command-line arguments and generating sensible
//! defaults. The tool works with ZERO arguments; pass --seed for a fully
//! deterministic run. All resolved values can be printed so runs are
//! reproducible.

use coding_sim_core::pipeline::{CodeSelector, Method};
use coding_sim_core::runlength::EventBit;

/// Complete configuration for one demo run.
#[derive(Debug, Clone)]
pub struct Config {
    // === Source coding ===
    /// Bernoulli probability of a 1 bit
    pub p: f64,

    /// Source sequence length in bits
    pub n: usize,

    /// Compression method
    pub method: Method,

    // === Channel coding ===
    /// Per-bit flip probability of the channel
    pub flip_rate: f64,

    /// Channel code selector (numeric, 0-5)
    pub code: CodeSelector,

    /// Bytes of sample data pushed through the channel
    pub payload_bytes: usize,

    // === Behavior ===
    /// Random seed for determinism
    pub seed: u64,

    /// Whether to print the resolved configuration
    pub print_config: bool,
}

impl Config {
    /// Parse configuration from command-line arguments.
    pub fn from_args(args: &[String]) -> Result<Self, String> {
        let mut p: Option<f64> = None;
        let mut n: Option<usize> = None;
        let mut method_name: Option<String> = None;
        let mut flip_rate: Option<f64> = None;
        let mut code_id: Option<u8> = None;
        let mut payload_bytes: Option<usize> = None;
        let mut seed: Option<u64> = None;
        let mut print_config = false;

        let mut i = 0;
        while i < args.len() {
            match args[i].as_str() {
                "--p" => {
                    i += 1;
                    if i >= args.len() {
                        return Err("--p requires a number".to_string());
                    }
                    p = Some(args[i].parse().map_err(|_| "invalid p")?);
                }
                "--n" => {
                    i += 1;
                    if i >= args.len() {
                        return Err("--n requires a number".to_string());
                    }
                    n = Some(args[i].parse().map_err(|_| "invalid n")?);
                }
                "--method" => {
                    i += 1;
                    if i >= args.len() {
                        return Err("--method requires a name".to_string());
                    }
                    method_name = Some(args[i].clone());
                }
                "--f" => {
                    i += 1;
                    if i >= args.len() {
                        return Err("--f requires a number".to_string());
                    }
                    flip_rate = Some(args[i].parse().map_err(|_| "invalid f")?);
                }
                "--code" => {
                    i += 1;
                    if i >= args.len() {
                        return Err("--code requires a number".to_string());
                    }
                    code_id = Some(args[i].parse().map_err(|_| "invalid code")?);
                }
                "--payload-bytes" => {
                    i += 1;
                    if i >= args.len() {
                        return Err("--payload-bytes requires a number".to_string());
                    }
                    payload_bytes = Some(args[i].parse().map_err(|_| "invalid payload-bytes")?);
                }
                "--seed" => {
                    i += 1;
                    if i >= args.len() {
                        return Err("--seed requires a number".to_string());
                    }
                    seed = Some(args[i].parse().map_err(|_| "invalid seed")?);
                }
                "--print-config" => {
                    print_config = true;
                }
                "--help" | "-h" => {
                    print_help();
                    std::process::exit(0);
                }
                _ => {
                    return Err(format!("unknown argument: {}", args[i]));
                }
            }
            i += 1;
        }

        // Determine seed (explicit or time-based)
        let seed = seed.unwrap_or_else(|| {
            use std::time::{SystemTime, UNIX_EPOCH};
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|t| t.as_millis() as u64)
                .unwrap_or(0)
        });

        let p = p.unwrap_or(0.001);
        let method = match method_name.as_deref().unwrap_or("runlength") {
            "runlength" => Method::RunLength(EventBit::Ones),
            "runlength-zeros" => Method::RunLength(EventBit::Zeros),
            "arithmetic" => Method::Arithmetic { p },
            other => return Err(format!("unknown method: {other}")),
        };

        let code = CodeSelector::from_id(code_id.unwrap_or(1)).map_err(|e| e.to_string())?;

        Ok(Config {
            p,
            n: n.unwrap_or(50_000),
            method,
            flip_rate: flip_rate.unwrap_or(0.07),
            code,
            payload_bytes: payload_bytes.unwrap_or(4096),
            seed,
            print_config,
        })
    }

    /// Print the configuration in human-readable form.
    pub fn print(&self) {
        println!("=== Configuration ===");
        println!("Seed: {}", self.seed);
        println!();
        println!("Source: n = {} bits, p = {}", self.n, self.p);
        println!("Method: {:?}", self.method);
        println!();
        println!("Channel: f = {:.2}%", self.flip_rate * 100.0);
        println!("Code: {:?}", self.code);
        println!("Payload: {} bytes", self.payload_bytes);
        println!();
    }
}

fn print_help() {
    println!("coding-sim: source and channel coding over noisy binary data");
    println!();
    println!("USAGE:");
    println!("    coding-sim [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("    --p <PROB>            Bernoulli probability of a 1 (default: 0.001)");
    println!("    --n <BITS>            Source length in bits (default: 50000)");
    println!("    --method <NAME>       runlength | runlength-zeros | arithmetic");
    println!("                          (default: runlength)");
    println!();
    println!("    --f <PROB>            Channel bit-flip probability (default: 0.07)");
    println!("    --code <N>            0 passthrough, 1-4 repetition x3/x5/x7/x9,");
    println!("                          5 nibble ECC (default: 1)");
    println!("    --payload-bytes <N>   Channel demo payload size (default: 4096)");
    println!();
    println!("    --seed <N>            Random seed for determinism");
    println!("    --print-config        Print resolved configuration");
    println!("    --help, -h            Print this help");
    println!();
    println!("EXAMPLES:");
    println!("    coding-sim                              # random seed, defaults");
    println!("    coding-sim --seed 42 --method arithmetic");
    println!("    coding-sim --code 5 --f 0.02            # nibble ECC, gentle noise");
    println!();
}
