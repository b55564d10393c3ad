//! Ms5805 pressure and temperature sensor driver
//!
//! Copyright 2026 The sensor-ms5805 Authors

use core::fmt::Debug;
use core::marker::PhantomData;

#[macro_use] extern crate log;

extern crate embedded_hal;
use embedded_hal::blocking::delay::DelayMs;
use embedded_hal::blocking::i2c;

pub mod base;
pub mod calibration;
pub mod compensation;
pub mod device;

use base::Base;
use calibration::Coefficients;
use device::*;

pub use device::Resolution;

/// Ms5805 sensor object
/// This is generic over an I2C connector, a blocking delay and the associated error type
pub struct Ms5805<Conn, Delay, Err> {
    conn: Conn,
    delay: Delay,
    resolution: Resolution,
    coefficients: Option<Coefficients>,
    _err: PhantomData<Err>,
}

/// Ms5805 error object
#[derive(Debug)]
pub enum Error<ConnErr> {
    /// Underlying bus fault
    Conn(ConnErr),
    /// Device did not acknowledge its address
    NoAcknowledge,
    /// ADC returned a zero sample, which the device never produces
    ZeroSample(Channel),
    /// PROM coefficients failed the CRC check
    Crc{ expected: u8, computed: u8 },
}

impl <ConnErr> From<ConnErr> for Error<ConnErr> {
    fn from(conn_err: ConnErr) -> Self {
        Error::Conn(conn_err)
    }
}

/// Coarse device status codes
#[derive(PartialEq, Clone, Copy, Debug)]
pub enum Status {
    Ok,
    NoAcknowledge,
    TransferError,
    CrcError,
}

impl <ConnErr> Error<ConnErr> {
    /// Status code for this error
    pub fn status(&self) -> Status {
        match self {
            Error::Conn(_) | Error::ZeroSample(_) => Status::TransferError,
            Error::NoAcknowledge => Status::NoAcknowledge,
            Error::Crc{..} => Status::CrcError,
        }
    }
}

impl <T, ConnErr> From<&Result<T, Error<ConnErr>>> for Status {
    fn from(r: &Result<T, Error<ConnErr>>) -> Self {
        match r {
            Ok(_) => Status::Ok,
            Err(e) => e.status(),
        }
    }
}

/// Ms5805 measurement object
#[derive(PartialEq, Clone, Debug)]
pub struct Measurement {
    /// Temperature in degrees celsius
    /// Range: -40 - 85 C
    pub temperature: f32,
    /// Pressure in millibar
    /// Range: 10 - 2000 mbar
    pub pressure: f32,
}

impl <Conn, Delay, Err> Ms5805 <Conn, Delay, Err> where
    Conn: i2c::Read<Error=Err> + i2c::Write<Error=Err>,
    Delay: DelayMs<u32>,
    Err: Debug,
{
    /// Create a new Ms5805 sensor instance
    /// No bus traffic occurs until the first call
    pub fn new(conn: Conn, delay: Delay) -> Self {
        Ms5805{
            conn,
            delay,
            resolution: Resolution::default(),
            coefficients: None,
            _err: PhantomData,
        }
    }

    /// Check the device is present on the bus
    pub fn begin(&mut self) -> Result<(), Error<Err>> {
        match self.conn.probe() {
            true => {
                debug!("Found Ms5805 at address {:#04x}", DEFAULT_ADDRESS);
                Ok(())
            },
            false => {
                warn!("No Ms5805 found at address {:#04x}", DEFAULT_ADDRESS);
                Err(Error::NoAcknowledge)
            },
        }
    }

    /// Check whether the device acknowledges its address
    pub fn is_connected(&mut self) -> bool {
        self.conn.probe()
    }

    /// Set the oversampling resolution used by subsequent reads
    pub fn set_resolution(&mut self, resolution: Resolution) {
        self.resolution = resolution;
    }

    /// Fetch the current oversampling resolution
    pub fn resolution(&self) -> Resolution {
        self.resolution
    }

    /// Reset the underlying device
    /// Cached coefficients are kept, the PROM contents do not change
    pub fn reset(&mut self) -> Result<(), Error<Err>> {
        self.conn.write_command(Command::Reset as u8)
    }

    /// Calibration coefficients, if they have been loaded
    pub fn coefficients(&self) -> Option<&Coefficients> {
        self.coefficients.as_ref()
    }

    /// Read temperature and pressure, loading the calibration coefficients on first use
    pub fn read_temperature_and_pressure(&mut self) -> Result<Measurement, Error<Err>> {
        let coeffs = self.ensure_coefficients()?;

        // Pressure compensation depends on temperature, so temperature comes first
        let adc_temperature = self.convert(Channel::Temperature)?;
        let adc_pressure = self.convert(Channel::Pressure)?;

        let c = compensation::compensate(adc_temperature, adc_pressure, &coeffs);

        Ok(c.measurement())
    }

    /// Release the underlying connector and delay
    pub fn free(self) -> (Conn, Delay) {
        (self.conn, self.delay)
    }

    fn ensure_coefficients(&mut self) -> Result<Coefficients, Error<Err>> {
        if let Some(c) = self.coefficients {
            return Ok(c);
        }

        let c = self.load_coefficients()?;
        self.coefficients = Some(c);

        Ok(c)
    }

    /// Read and validate the PROM coefficient table
    fn load_coefficients(&mut self) -> Result<Coefficients, Error<Err>> {
        debug!("Loading PROM coefficients");

        let mut words = [0u16; COEFFICIENT_COUNT];

        for (i, w) in words.iter_mut().enumerate() {
            let mut buff = [0u8; 2];
            self.conn.read_command(prom_command(i as u8), &mut buff)?;
            *w = u16::from_be_bytes(buff);
        }

        debug!("PROM: {:04x?}", words);

        Coefficients::from_prom(&words)
    }

    /// Run a conversion on the provided channel and read back the raw 24-bit sample
    fn convert(&mut self, channel: Channel) -> Result<u32, Error<Err>> {
        let cmd = conversion_command(channel, self.resolution);

        self.conn.write_command(cmd)?;

        self.delay.delay_ms(self.resolution.conversion_time_ms());

        let mut buff = [0u8; 3];
        self.conn.read_command(Command::ReadAdc as u8, &mut buff)?;

        let v = (buff[0] as u32) << 16 | (buff[1] as u32) << 8 | (buff[2] as u32);

        debug!("{:?} sample: {} (resolution: {})", channel, v, self.resolution);

        if v == 0 {
            warn!("Zero {:?} sample", channel);
            return Err(Error::ZeroSample(channel));
        }

        Ok(v)
    }
}
