//! Ms5805 command-line utility
//!
//! Copyright 2026 The sensor-ms5805 Authors

extern crate embedded_hal;
extern crate linux_embedded_hal;
use linux_embedded_hal::{I2cdev, Delay};

extern crate structopt;
use structopt::StructOpt;

extern crate humantime;
use humantime::{Duration as HumanDuration};

#[macro_use] extern crate log;
extern crate simplelog;
use simplelog::{TermLogger, LevelFilter};

extern crate sensor_ms5805;
use sensor_ms5805::{Ms5805, Resolution};

#[derive(StructOpt)]
#[structopt(name = "ms5805-util")]
/// A Command Line Interface (CLI) for interacting with a local Ms5805 pressure sensor over I2C
pub struct Options {

    /// Specify the i2c interface to use to connect to the ms5805 device
    #[structopt(short="d", long = "i2c", default_value = "/dev/i2c-1", env = "MS5805_I2C")]
    i2c: String,

    /// Oversampling resolution (256, 512, 1024, 2048, 4096 or 8192)
    #[structopt(short = "r", long = "resolution", default_value = "8192")]
    pub resolution: Resolution,

    /// Specify period for taking measurements
    #[structopt(short = "p", long = "sample-period", default_value="1s")]
    pub period: HumanDuration,

    /// Number of measurements to take before exiting (runs forever if unset)
    #[structopt(short = "n", long = "count")]
    pub count: Option<usize>,

    /// Number of allowed I2C errors (consecutive measurement attempts) prior to exiting
    #[structopt(long = "allowed-errors", default_value="3")]
    pub allowed_errors: usize,

    /// Reset the device prior to sampling
    #[structopt(long = "reset")]
    pub reset: bool,

    /// Enable verbose logging
    #[structopt(long = "log-level", default_value = "info")]
    level: LevelFilter,
}

fn main() {
    // Load options
    let opts = Options::from_args();

    // Setup logging
    if let Err(e) = TermLogger::init(opts.level, simplelog::Config::default()) {
        eprintln!("Error initialising logger: {:?}", e);
    }

    debug!("Connecting to I2C device");
    let i2c = match I2cdev::new(&opts.i2c) {
        Ok(v) => v,
        Err(e) => {
            error!("Error opening I2C device '{}': {:?}", &opts.i2c, e);
            std::process::exit(-1);
        }
    };

    debug!("Connecting to MS5805");
    let mut sensor = Ms5805::new(i2c, Delay);
    if let Err(e) = sensor.begin() {
        error!("Error connecting to MS5805: {:?}", e);
        std::process::exit(-2);
    }

    if opts.reset {
        debug!("Resetting sensor");
        if let Err(e) = sensor.reset() {
            error!("Error resetting sensor: {:?} ({:?})", e, e.status());
            std::process::exit(-3);
        }
        std::thread::sleep(std::time::Duration::from_millis(3));
    }

    sensor.set_resolution(opts.resolution);
    debug!("Using resolution OSR{}", opts.resolution);

    let mut errors = 0;
    let mut taken = 0;

    loop {
        debug!("Starting sensor read cycle");

        match sensor.read_temperature_and_pressure() {
            Ok(m) => {
                info!("Temperature: {:.2} C, Pressure: {:.2} mbar", m.temperature, m.pressure);
                errors = 0;
                taken += 1;
            },
            Err(e) => {
                warn!("Error reading sensor data: {:?} ({:?})", e, e.status());
                errors += 1;
            },
        }

        if errors > opts.allowed_errors {
            error!("Exceeded maximum allowed I2C errors");
            std::process::exit(-4);
        }

        if let Some(n) = opts.count {
            if taken >= n {
                break;
            }
        }

        // Wait for the next sample period
        std::thread::sleep(*opts.period);
    }
}
