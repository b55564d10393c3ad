//! Ms5805 device definitions
//!
//! Copyright 2026 The sensor-ms5805 Authors

use core::fmt;
use core::str::FromStr;

/// Ms5805 default I2C address
/// (note this is shifted left 1 bit on the wire)
pub const DEFAULT_ADDRESS: u8 = 0x76;

/// PROM read command for address 0, subsequent words are `PROM_STRIDE` apart
pub const PROM_BASE: u8 = Command::ReadProm as u8;
pub const PROM_STRIDE: u8 = 2;

/// Number of PROM words holding the CRC and calibration coefficients
pub const COEFFICIENT_COUNT: usize = 7;

pub const CRC_POLY: u16 = 0x3000;

/// Ms5805 I2C Command
/// Commands are single bytes, conversion commands are combined with the resolution bits
#[derive(PartialEq, Clone, Copy, Debug)]
pub enum Command {
    /// Reset the device and reload the PROM into the internal register
    Reset = 0x1E,

    /// Start a pressure (D1) conversion
    /// OR'd with `Resolution::command_bits`
    ConvertPressure = 0x40,

    /// Start a temperature (D2) conversion
    /// OR'd with `Resolution::command_bits`
    ConvertTemperature = 0x50,

    /// Read back the 24-bit result of the last conversion
    ReadAdc = 0x00,

    /// Read a 16-bit PROM word
    /// OR'd with the word address times `PROM_STRIDE`
    ReadProm = 0xA0,
}

/// ADC conversion channel
#[derive(PartialEq, Clone, Copy, Debug)]
pub enum Channel {
    Temperature,
    Pressure,
}

impl Channel {
    /// Base conversion command for the channel
    pub fn command(&self) -> Command {
        match self {
            Channel::Temperature => Command::ConvertTemperature,
            Channel::Pressure => Command::ConvertPressure,
        }
    }
}

/// Oversampling resolution, a higher resolution means a longer conversion time
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
#[repr(u8)]
pub enum Resolution {
    Osr256 = 0,
    Osr512 = 1,
    Osr1024 = 2,
    Osr2048 = 3,
    Osr4096 = 4,
    Osr8192 = 5,
}

impl Resolution {
    /// Bits OR'd into the conversion command
    pub fn command_bits(&self) -> u8 {
        (*self as u8) * 2
    }

    /// Maximum conversion time in milliseconds
    pub fn conversion_time_ms(&self) -> u32 {
        match self {
            Resolution::Osr256 => 1,
            Resolution::Osr512 => 2,
            Resolution::Osr1024 => 3,
            Resolution::Osr2048 => 5,
            Resolution::Osr4096 => 9,
            Resolution::Osr8192 => 17,
        }
    }

    /// Oversampling ratio
    pub fn ratio(&self) -> u16 {
        256 << (*self as u8)
    }
}

impl Default for Resolution {
    fn default() -> Self {
        Resolution::Osr8192
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.ratio())
    }
}

impl FromStr for Resolution {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let v = s.strip_prefix("osr")
            .or_else(|| s.strip_prefix("OSR"))
            .unwrap_or(s);

        match v {
            "256" => Ok(Resolution::Osr256),
            "512" => Ok(Resolution::Osr512),
            "1024" => Ok(Resolution::Osr1024),
            "2048" => Ok(Resolution::Osr2048),
            "4096" => Ok(Resolution::Osr4096),
            "8192" => Ok(Resolution::Osr8192),
            _ => Err(format!("unsupported resolution '{}' (expected 256..8192)", s)),
        }
    }
}

/// Build the conversion command for a channel at the given resolution
pub fn conversion_command(channel: Channel, resolution: Resolution) -> u8 {
    channel.command() as u8 | resolution.command_bits()
}

/// Build the PROM read command for word `index`
pub fn prom_command(index: u8) -> u8 {
    PROM_BASE + index * PROM_STRIDE
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_conversion_commands() {
        let tests = &[
            (Resolution::Osr256, 0x50, 0x40),
            (Resolution::Osr512, 0x52, 0x42),
            (Resolution::Osr1024, 0x54, 0x44),
            (Resolution::Osr2048, 0x56, 0x46),
            (Resolution::Osr4096, 0x58, 0x48),
            (Resolution::Osr8192, 0x5A, 0x4A),
        ];

        for t in tests {
            assert_eq!(conversion_command(Channel::Temperature, t.0), t.1);
            assert_eq!(conversion_command(Channel::Pressure, t.0), t.2);
        }
    }

    #[test]
    fn test_prom_commands() {
        let expected = [0xA0, 0xA2, 0xA4, 0xA6, 0xA8, 0xAA, 0xAC, 0xAE];
        for (i, c) in expected.iter().enumerate() {
            assert_eq!(prom_command(i as u8), *c);
        }
    }

    #[test]
    fn test_conversion_times_increase() {
        let res = [
            Resolution::Osr256, Resolution::Osr512, Resolution::Osr1024,
            Resolution::Osr2048, Resolution::Osr4096, Resolution::Osr8192,
        ];
        let times: Vec<u32> = res.iter().map(|r| r.conversion_time_ms()).collect();
        assert_eq!(times, vec![1, 2, 3, 5, 9, 17]);
    }

    #[test]
    fn test_parse_resolution() {
        assert_eq!("256".parse::<Resolution>(), Ok(Resolution::Osr256));
        assert_eq!("osr4096".parse::<Resolution>(), Ok(Resolution::Osr4096));
        assert_eq!("OSR8192".parse::<Resolution>(), Ok(Resolution::Osr8192));
        assert!("300".parse::<Resolution>().is_err());
        assert_eq!(Resolution::Osr2048.to_string(), "2048");
    }
}
