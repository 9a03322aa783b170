//! tonescript CLI — render a notation script file to a mono WAV file.

use std::path::PathBuf;
use std::process;

use clap::Parser;

use tonescript::script::{ErrorKind, Renderer};
use tonescript::synth::RenderEnvironment;
use tonescript::wav::{self, BitDepth};

#[derive(Parser)]
#[command(name = "tonescript", version, about = "Compile a notation script into a WAV file")]
struct Cli {
    /// Path to the input script.
    input: PathBuf,

    /// Path for the output WAV file. Omitted: the script is only checked.
    output: Option<PathBuf>,

    /// Starting tempo in beats per minute.
    #[arg(long, default_value_t = 160.0)]
    bpm: f64,

    /// Output gain in [0, 1].
    #[arg(long, default_value_t = 0.25)]
    gain: f64,

    /// Pulse duty cycle in (0, 1).
    #[arg(long, default_value_t = 0.125)]
    duty: f64,

    /// Output sample rate in Hz.
    #[arg(long, default_value_t = 44100)]
    sample_rate: u32,

    /// Output bit depth: 8 or 16.
    #[arg(long, default_value_t = 8)]
    bits: u16,
}

/// Range-check the numeric flags and resolve the output format.
fn validate(cli: &Cli) -> Result<BitDepth, String> {
    if cli.bpm <= 0.0 {
        return Err(format!("tempo must be greater than 0, got {}", cli.bpm));
    }
    if cli.duty <= 0.0 || cli.duty >= 1.0 {
        return Err(format!("duty cycle must be within (0, 1), got {}", cli.duty));
    }
    if cli.sample_rate == 0 {
        return Err("sample rate must be greater than 0".to_string());
    }
    match cli.bits {
        8 => Ok(BitDepth::Int8),
        16 => Ok(BitDepth::Int16),
        other => Err(format!("unsupported bit depth: {other} (use 8 or 16)")),
    }
}

fn main() {
    let cli = Cli::parse();

    let depth = match validate(&cli) {
        Ok(depth) => depth,
        Err(msg) => {
            eprintln!("{msg}");
            process::exit(1);
        }
    };

    let source = match std::fs::read_to_string(&cli.input) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("failed to open input file {}: {e}", cli.input.display());
            process::exit(1);
        }
    };

    let mut env = RenderEnvironment::with_pulse(cli.sample_rate, cli.duty);
    env.set_tempo(cli.bpm);
    env.set_gain(cli.gain);

    let samples = match Renderer::render(&source, &mut env) {
        Ok(samples) => samples,
        Err(e) => {
            eprintln!("{e}");
            let code = match e.kind {
                ErrorKind::LexError => 51,
                ErrorKind::ParseError => 52,
            };
            process::exit(code);
        }
    };

    let seconds = samples.len() as f64 / cli.sample_rate as f64;
    println!(
        "rendered {} samples ({seconds:.2}s at {} Hz)",
        samples.len(),
        cli.sample_rate
    );

    match cli.output {
        Some(path) => {
            if let Err(e) = wav::write_wav_file(&path, cli.sample_rate, depth, &samples) {
                eprintln!("failed to write output file {}: {e}", path.display());
                process::exit(53);
            }
            println!("wrote {}", path.display());
        }
        None => println!("no output path given; nothing written"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cli(args: &[&str]) -> Cli {
        let argv = std::iter::once("tonescript").chain(args.iter().copied());
        Cli::try_parse_from(argv).unwrap()
    }

    #[test]
    fn defaults_match_documented_values() {
        let cli = cli(&["score.txt"]);
        assert_eq!(cli.bpm, 160.0);
        assert_eq!(cli.gain, 0.25);
        assert_eq!(cli.duty, 0.125);
        assert_eq!(cli.sample_rate, 44100);
        assert_eq!(cli.bits, 8);
        assert!(cli.output.is_none());
    }

    #[test]
    fn flags_override_defaults() {
        let cli = cli(&["score.txt", "out.wav", "--bpm", "90", "--bits", "16"]);
        assert_eq!(cli.bpm, 90.0);
        assert_eq!(cli.bits, 16);
        assert_eq!(cli.output, Some(PathBuf::from("out.wav")));
    }

    #[test]
    fn default_arguments_validate() {
        assert_eq!(validate(&cli(&["score.txt"])).unwrap(), BitDepth::Int8);
        assert_eq!(
            validate(&cli(&["score.txt", "--bits", "16"])).unwrap(),
            BitDepth::Int16
        );
    }

    #[test]
    fn zero_sample_rate_rejected() {
        let err = validate(&cli(&["score.txt", "--sample-rate", "0"])).unwrap_err();
        assert!(err.contains("sample rate"));
    }

    #[test]
    fn non_positive_bpm_rejected() {
        assert!(validate(&cli(&["score.txt", "--bpm", "0"])).is_err());
        assert!(validate(&cli(&["score.txt", "--bpm=-10"])).is_err());
    }

    #[test]
    fn duty_outside_unit_interval_rejected() {
        assert!(validate(&cli(&["score.txt", "--duty", "0"])).is_err());
        assert!(validate(&cli(&["score.txt", "--duty", "1"])).is_err());
    }

    #[test]
    fn unsupported_bit_depth_rejected() {
        let err = validate(&cli(&["score.txt", "--bits", "24"])).unwrap_err();
        assert!(err.contains("24"));
    }

    #[test]
    fn missing_input_path_is_a_usage_error() {
        assert!(Cli::try_parse_from(["tonescript"]).is_err());
    }
}
