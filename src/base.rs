//! Base communication implementation for interacting with Ms5805 device
//!
//! Copyright 2026 The sensor-ms5805 Authors

use core::fmt::Debug;

use embedded_hal::blocking::i2c;

use crate::{Error};
use crate::device::*;

/// Base API for reading and writing to the device
/// This should not be required by consumers, but is exposed to support alternate transports
pub trait Base<Err> {
    /// Check whether the device acknowledges its address, without side effects
    fn probe(&mut self) -> bool;
    /// Write a single byte command to the device
    fn write_command(&mut self, command: u8) -> Result<(), Error<Err>>;
    /// Write a command to the device then read `data.len()` bytes back
    fn read_command(&mut self, command: u8, data: &mut [u8]) -> Result<(), Error<Err>>;
}

/// Helper for device CRC-4 calculation over the padded PROM table
///
/// The CRC nibble in the top of word 0 and the padding word 7 are
/// treated as zero, the input is not modified.
pub fn crc4(prom: &[u16; COEFFICIENT_COUNT + 1]) -> u8 {
    let mut words = *prom;
    words[0] &= 0x0FFF;
    words[COEFFICIENT_COUNT] = 0;

    let mut rem: u16 = 0;

    // For each byte, MSB first
    for cnt in 0..(COEFFICIENT_COUNT + 1) * 2 {
        let w = words[cnt >> 1];
        rem ^= match cnt % 2 {
            0 => w >> 8,
            _ => w & 0x00FF,
        };

        for _bit in 0..8 {
            if rem & 0x8000 != 0 {
                rem = (rem << 1) ^ CRC_POLY;
            } else {
                rem = rem << 1;
            }
        }
    }

    ((rem >> 12) & 0x000F) as u8
}

/// Base implementation for I2C devices
impl <Conn, Err> Base<Err> for Conn where
    Conn: i2c::Read<Error=Err> + i2c::Write<Error=Err>,
    Err: Debug,
{
    fn probe(&mut self) -> bool {
        self.write(DEFAULT_ADDRESS, &[]).is_ok()
    }

    fn write_command(&mut self, command: u8) -> Result<(), Error<Err>> {
        trace!("Writing command: {:#04x}", command);

        if let Err(e) = self.write(DEFAULT_ADDRESS, &[command]) {
            return Err(classify(self, e));
        }

        Ok(())
    }

    fn read_command(&mut self, command: u8, data: &mut [u8]) -> Result<(), Error<Err>> {
        trace!("Writing command: {:#04x}", command);

        // First write the read command
        if let Err(e) = self.write(DEFAULT_ADDRESS, &[command]) {
            return Err(classify(self, e));
        }

        // Then, read the data back
        if let Err(e) = self.read(DEFAULT_ADDRESS, data) {
            return Err(classify(self, e));
        }

        trace!("Read data: {:x?}", data);

        Ok(())
    }
}

/// Split a failed transaction into an absent device or a bus fault
/// by checking whether the device still acknowledges its address
fn classify<Conn, Err>(conn: &mut Conn, err: Err) -> Error<Err> where
    Conn: i2c::Write<Error=Err>,
    Err: Debug,
{
    match conn.write(DEFAULT_ADDRESS, &[]) {
        Ok(_) => {
            debug!("Bus error with device present: {:?}", err);
            Error::Conn(err)
        },
        Err(_) => {
            debug!("Device did not acknowledge: {:?}", err);
            Error::NoAcknowledge
        },
    }
}
