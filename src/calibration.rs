//! Ms5805 factory calibration coefficients
//!
//! Copyright 2026 The sensor-ms5805 Authors

use crate::{Error};
use crate::base::crc4;
use crate::device::COEFFICIENT_COUNT;

/// Factory calibration coefficients read from PROM
/// Only constructed from a table that passed the CRC check
#[derive(PartialEq, Clone, Copy, Debug)]
pub struct Coefficients {
    /// Word 0: CRC nibble (top 4 bits) and factory defined bits
    pub crc: u16,
    /// C1: Pressure sensitivity | SENS_T1
    pub pressure_sensitivity: u16,
    /// C2: Pressure offset | OFF_T1
    pub pressure_offset: u16,
    /// C3: Temperature coefficient of pressure sensitivity | TCS
    pub temp_coeff_of_pressure_sensitivity: u16,
    /// C4: Temperature coefficient of pressure offset | TCO
    pub temp_coeff_of_pressure_offset: u16,
    /// C5: Reference temperature | T_REF
    pub reference_temperature: u16,
    /// C6: Temperature coefficient of the temperature | TEMPSENS
    pub temp_coeff_of_temperature: u16,
}

impl Coefficients {
    /// Validate the PROM words and build the coefficient table
    pub fn from_prom<Err>(words: &[u16; COEFFICIENT_COUNT]) -> Result<Self, Error<Err>> {
        let mut prom = [0u16; COEFFICIENT_COUNT + 1];
        prom[..COEFFICIENT_COUNT].copy_from_slice(words);

        let expected = (words[0] >> 12) as u8;
        let computed = crc4(&prom);
        if expected != computed {
            warn!("PROM CRC mismatch (expected: {:#x} computed: {:#x})", expected, computed);
            return Err(Error::Crc{ expected, computed });
        }

        Ok(Coefficients {
            crc: words[0],
            pressure_sensitivity: words[1],
            pressure_offset: words[2],
            temp_coeff_of_pressure_sensitivity: words[3],
            temp_coeff_of_pressure_offset: words[4],
            reference_temperature: words[5],
            temp_coeff_of_temperature: words[6],
        })
    }

    /// Rebuild the zero padded PROM table
    pub fn prom(&self) -> [u16; COEFFICIENT_COUNT + 1] {
        [
            self.crc,
            self.pressure_sensitivity,
            self.pressure_offset,
            self.temp_coeff_of_pressure_sensitivity,
            self.temp_coeff_of_pressure_offset,
            self.reference_temperature,
            self.temp_coeff_of_temperature,
            0,
        ]
    }
}
