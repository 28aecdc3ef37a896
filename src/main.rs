//! fastz - Impedance Network Calculator
//!
//! Evaluates series/parallel impedance networks written in the fastz
//! expression notation.
//!
//! # Usage
//!
//! ```bash
//! fastz show "Z1:(Zp:(R[10] ‖ C[0.2e-9] ‖ La[100e-9]) + Lb[5e-9])"
//! fastz eval --file network.z --freq 1e6 --freq 10e6 --set La=120e-9
//! fastz breakfreq --file network.z --labels "R C"
//! fastz bode --file network.z --start 1e6 --stop 1e9 --zlines Zp --refzlines "R C La Lb"
//! ```

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use fastz::{
    bode::bode_curves,
    dsl,
    error::{FastzError, Result},
    impedance::validate_overrides,
    sweep::logspace,
    Impedance, Overrides,
};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// Impedance network calculator
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// Where the network expression comes from.
#[derive(Args, Debug)]
struct NetworkArg {
    /// Impedance expression, e.g. "(R[10] || C[1e-6]) + L[1e-9]"
    #[arg(value_name = "EXPRESSION", required_unless_present = "file")]
    expression: Option<String>,

    /// Read the expression from a file instead
    #[arg(short, long, value_name = "FILE", conflicts_with = "expression")]
    file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the network and the label of every node
    Show {
        #[command(flatten)]
        network: NetworkArg,
    },
    /// Evaluate the complex impedance at one or more frequencies
    Eval {
        #[command(flatten)]
        network: NetworkArg,
        /// Frequency in Hz (repeatable)
        #[arg(long = "freq", required = true)]
        frequencies: Vec<f64>,
        /// Override an element value, LABEL=VALUE (repeatable)
        #[arg(long = "set", value_name = "LABEL=VALUE", value_parser = parse_override)]
        overrides: Vec<(String, f64)>,
    },
    /// Compute the break frequency between two elements
    Breakfreq {
        #[command(flatten)]
        network: NetworkArg,
        /// Two whitespace-separated element labels, e.g. "R C"
        #[arg(long, value_name = "LABELS")]
        labels: String,
        /// Override an element value, LABEL=VALUE (repeatable)
        #[arg(long = "set", value_name = "LABEL=VALUE", value_parser = parse_override)]
        overrides: Vec<(String, f64)>,
    },
    /// Write Bode magnitude curves as CSV
    Bode {
        #[command(flatten)]
        network: NetworkArg,
        /// Sweep start frequency in Hz
        #[arg(long)]
        start: f64,
        /// Sweep stop frequency in Hz
        #[arg(long)]
        stop: f64,
        /// Number of logarithmically spaced points
        #[arg(long, default_value_t = 1000)]
        points: usize,
        /// Sub-impedances to include, "label[:hpos] ..."
        #[arg(long, default_value = "")]
        zlines: String,
        /// Reference curves to include, "label[:hpos] ..."
        #[arg(long, default_value = "")]
        refzlines: String,
        /// Override an element value, LABEL=VALUE (repeatable)
        #[arg(long = "set", value_name = "LABEL=VALUE", value_parser = parse_override)]
        overrides: Vec<(String, f64)>,
        /// Output CSV file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn parse_override(arg: &str) -> std::result::Result<(String, f64), String> {
    let (label, value) = arg
        .split_once('=')
        .ok_or_else(|| format!("expected LABEL=VALUE, got '{}'", arg))?;
    let value = value
        .trim()
        .parse::<f64>()
        .map_err(|e| format!("invalid value for '{}': {}", label, e))?;
    Ok((label.trim().to_string(), value))
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Show { network } => cmd_show(&load(&network)?),
        Commands::Eval {
            network,
            frequencies,
            overrides,
        } => cmd_eval(&load(&network)?, &frequencies, &collect_overrides(overrides)),
        Commands::Breakfreq {
            network,
            labels,
            overrides,
        } => cmd_breakfreq(&load(&network)?, &labels, &collect_overrides(overrides)),
        Commands::Bode {
            network,
            start,
            stop,
            points,
            zlines,
            refzlines,
            overrides,
            output,
        } => {
            let network = load(&network)?;
            let frequencies = logspace(start, stop, points)?;
            cmd_bode(
                &network,
                &frequencies,
                &zlines,
                &refzlines,
                &collect_overrides(overrides),
                output.as_deref(),
            )
        }
    }
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn load(arg: &NetworkArg) -> Result<Impedance> {
    let network = match (&arg.expression, &arg.file) {
        (_, Some(path)) => dsl::parse_file(path)?,
        (Some(expression), None) => dsl::parse(expression)?,
        (None, None) => return Err(FastzError::parse(1, "no expression given")),
    };
    info!(label = %network.label(), "network loaded");
    Ok(network)
}

fn collect_overrides(pairs: Vec<(String, f64)>) -> Overrides {
    pairs.into_iter().collect()
}

fn cmd_show(network: &Impedance) -> Result<()> {
    let mut out = io::stdout().lock();
    writeln!(out, "{}", network)?;
    for node in network.iter() {
        writeln!(out, "  {:<8} {}", node.label(), node.kind())?;
    }
    Ok(())
}

fn cmd_eval(network: &Impedance, frequencies: &[f64], overrides: &Overrides) -> Result<()> {
    validate_overrides(network, overrides)?;
    let values = network.evaluate_sweep(frequencies, overrides)?;

    let mut out = io::stdout().lock();
    writeln!(out, "{:>14} {:>14} {:>14} {:>14} {:>10}", "freq_hz", "re_ohm", "im_ohm", "mag_ohm", "phase_deg")?;
    for (f, z) in frequencies.iter().zip(&values) {
        writeln!(
            out,
            "{:>14.6e} {:>14.6e} {:>14.6e} {:>14.6e} {:>10.3}",
            f,
            z.re,
            z.im,
            z.norm(),
            z.arg().to_degrees()
        )?;
    }
    Ok(())
}

fn cmd_breakfreq(network: &Impedance, labels: &str, overrides: &Overrides) -> Result<()> {
    validate_overrides(network, overrides)?;
    let frequency = network.breakfreq_with(labels, overrides)?;
    debug!(labels, frequency, "break frequency computed");
    println!("{:e}", frequency);
    Ok(())
}

fn cmd_bode(
    network: &Impedance,
    frequencies: &[f64],
    zlines: &str,
    refzlines: &str,
    overrides: &Overrides,
    output: Option<&Path>,
) -> Result<()> {
    validate_overrides(network, overrides)?;
    let curves = bode_curves(network, frequencies, zlines, refzlines, overrides)?;

    let mut out: Box<dyn Write> = match output {
        Some(path) => Box::new(BufWriter::new(File::create(path)?)),
        None => Box::new(BufWriter::new(io::stdout().lock())),
    };

    let header = curves
        .iter()
        .map(|c| c.label.as_str())
        .collect::<Vec<_>>()
        .join(",");
    writeln!(out, "freq_hz,{}", header)?;
    for (i, f) in frequencies.iter().enumerate() {
        let row = curves
            .iter()
            .map(|c| format!("{:e}", c.magnitudes[i]))
            .collect::<Vec<_>>()
            .join(",");
        writeln!(out, "{:e},{}", f, row)?;
    }
    out.flush()?;
    Ok(())
}
