use log::*;
use structopt::StructOpt;

use dim_control::dimmer::Mode;

#[derive(Debug, StructOpt)]
#[structopt(name = "console_sim", about = "Two-channel LED dimmer simulator")]
pub struct Opts {
    #[structopt(short, long)]
    pub verbose: bool,
    #[structopt(short, long)]
    pub debug: bool,
    #[structopt(short, long)]
    pub trace: bool,

    /// one, two or tunable
    #[structopt(short, long, default_value = "tunable", parse(try_from_str = parse_mode))]
    pub mode: Mode,
    /// Channel current at 100%, 65535 = 700mA
    #[structopt(short, long, default_value = "32768")]
    pub current: u16,
    #[structopt(long, default_value = "1966")]
    pub analog_min: u16,
    #[structopt(long, default_value = "5")]
    pub pwm_min: u8,
    /// Raw 10 bit sample of the supply voltage
    #[structopt(long, default_value = "214")]
    pub supply_raw: u16,
}

pub fn parse_mode(mode: &str) -> Result<Mode, String> {
    match mode {
        "one" => Ok(Mode::OneChannel),
        "two" => Ok(Mode::TwoChannel),
        "tunable" => Ok(Mode::Tunable),
        _ => Err(format!("unknown mode {}, expected one, two or tunable", mode)),
    }
}

impl Opts {
    pub fn get_loglevel(&self) -> LevelFilter {
        if self.trace {
            LevelFilter::Trace
        } else if self.debug {
            LevelFilter::Debug
        } else if self.verbose {
            LevelFilter::Info
        } else {
            LevelFilter::Warn
        }
    }

    /// Logs go to stderr, redirect them to keep the terminal UI intact
    pub fn start_logger(&self) {
        env_logger::Builder::new()
            .filter_module("dim_control", self.get_loglevel())
            .filter_module(env!("CARGO_CRATE_NAME"), self.get_loglevel())
            .format_timestamp_millis()
            .init();
        info!("Starting console_sim v{}...", env!("CARGO_PKG_VERSION"));
        debug!(
            "mode {:?}, current {}, analog_min {}, pwm_min {}",
            self.mode, self.current, self.analog_min, self.pwm_min
        );
    }
}
