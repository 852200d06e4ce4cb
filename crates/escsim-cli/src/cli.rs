//! Command-line arguments

use clap::{Parser, ValueEnum};
use escsim_core::run::{RunConfig, Variant, DEFAULT_DELAY_SECS, DEFAULT_POWER};
use escsim_core::transport::{DEFAULT_ADDRESS, DEFAULT_PORT};

/// Emission loop flavour as accepted on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum VariantArg {
    /// Fixed power, time reported as elapsed seconds
    Continuous,
    /// Integer tick time, optional step powers
    Sweep,
}

impl From<VariantArg> for Variant {
    fn from(arg: VariantArg) -> Self {
        match arg {
            VariantArg::Continuous => Variant::Continuous,
            VariantArg::Sweep => Variant::Sweep,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "udpsim", version)]
#[command(about = "UDP Simulator: synthetic ESC telemetry over UDP", long_about = None)]
pub struct Cli {
    /// UDP IP address
    #[arg(short, long, default_value = DEFAULT_ADDRESS)]
    pub address: String,

    /// UDP port num
    #[arg(short, long, default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Num seconds to run simulator (runs until Ctrl-C if omitted)
    #[arg(short, long)]
    pub timeout: Option<f64>,

    /// ESC power level as a percentage [10-100]
    #[arg(long, default_value_t = DEFAULT_POWER)]
    pub power: u8,

    /// Test configuration [1: single, 2: cross_02, 3: cross_13, 4: all_4]
    #[arg(long, default_value_t = 4)]
    pub config: u8,

    /// Stepwise power intervals (selects the sweep variant)
    #[arg(long, num_args = 0..)]
    pub steps: Option<Vec<u8>>,

    /// Emission variant (default: sweep when --steps is given, else continuous)
    #[arg(long, value_enum)]
    pub variant: Option<VariantArg>,

    /// Sleep for delay seconds between UDP send
    #[arg(short, long, default_value_t = DEFAULT_DELAY_SECS)]
    pub delay: f64,

    /// Print verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Convert parsed arguments into run settings
    pub fn into_run_config(self) -> RunConfig {
        let variant = match (self.variant, &self.steps) {
            (Some(variant), _) => variant.into(),
            (None, Some(_)) => Variant::Sweep,
            (None, None) => Variant::Continuous,
        };

        RunConfig {
            address: self.address,
            port: self.port,
            timeout: self.timeout,
            power: self.power,
            config: self.config,
            steps: self.steps,
            delay: self.delay,
            variant,
            verbose: self.verbose,
        }
    }
}
