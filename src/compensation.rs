//! Ms5805 fixed-point temperature and pressure compensation
//!
//! Copyright 2026 The sensor-ms5805 Authors

use crate::Measurement;
use crate::calibration::Coefficients;

/// Reference temperature (20.00 C) in hundredths of a degree
const TEMP_REF: i64 = 2000;

/// Threshold for the additional very-low temperature correction (-15.00 C)
const TEMP_LOW: i64 = -1500;

/// Second order compensation terms
#[derive(PartialEq, Clone, Copy, Debug)]
pub struct SecondOrder {
    pub t2: i64,
    pub off2: i64,
    pub sens2: i64,
}

/// Integer compensation result
#[derive(PartialEq, Clone, Copy, Debug)]
pub struct Compensated {
    /// Temperature in hundredths of a degree celsius, second order corrected
    pub temperature: i64,
    /// Pressure in hundredths of a millibar
    pub pressure: i64,
}

impl Compensated {
    pub fn measurement(&self) -> Measurement {
        Measurement {
            temperature: self.temperature as f32 / 100.0,
            pressure: self.pressure as f32 / 100.0,
        }
    }
}

/// Second order correction for the first order temperature `temp` and delta `d_t`
pub fn second_order(temp: i64, d_t: i64) -> SecondOrder {
    if temp >= TEMP_REF {
        return SecondOrder {
            t2: (5 * d_t * d_t) >> 38,
            off2: 0,
            sens2: 0,
        };
    }

    let low = (temp - TEMP_REF) * (temp - TEMP_REF);
    let mut off2 = 61 * low / 16;
    let mut sens2 = 29 * low / 16;

    if temp < TEMP_LOW {
        let very_low = (temp - TEMP_LOW) * (temp - TEMP_LOW);
        off2 += 17 * very_low;
        sens2 += 9 * very_low;
    }

    SecondOrder {
        t2: (3 * d_t * d_t) >> 33,
        off2,
        sens2,
    }
}

/// Compensate raw 24-bit ADC samples using the factory coefficients
pub fn compensate(adc_temperature: u32, adc_pressure: u32, coeffs: &Coefficients) -> Compensated {
    // Difference between actual and reference temperature, dT = D2 - T_REF
    let d_t = adc_temperature as i32 - ((coeffs.reference_temperature as i32) << 8);
    let d_t = d_t as i64;

    // First order temperature, TEMP = 20C + dT * TEMPSENS
    let temp = TEMP_REF + ((d_t * coeffs.temp_coeff_of_temperature as i64) >> 23);

    let so = second_order(temp, d_t);

    // Offset at actual temperature, OFF = OFF_T1 + TCO * dT
    let off = ((coeffs.pressure_offset as i64) << 17)
        + ((coeffs.temp_coeff_of_pressure_offset as i64 * d_t) >> 6)
        - so.off2;

    // Sensitivity at actual temperature, SENS = SENS_T1 + TCS * dT
    let sens = ((coeffs.pressure_sensitivity as i64) << 16)
        + ((coeffs.temp_coeff_of_pressure_sensitivity as i64 * d_t) >> 7)
        - so.sens2;

    // Temperature compensated pressure, P = D1 * SENS - OFF
    let pressure = (((adc_pressure as i64 * sens) >> 21) - off) >> 15;

    debug!("Compensation dT: {} TEMP: {} T2: {} OFF: {} SENS: {} P: {}",
        d_t, temp, so.t2, off, sens, pressure);

    Compensated {
        temperature: temp - so.t2,
        pressure,
    }
}
