//! Indicator LED codes

use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// State of the reader's indicator LED
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Indicator {
    #[default]
    None = 0x00,
    Red = 0x01,
    Green = 0x02,
}

impl Indicator {
    pub fn name(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Red => "red",
            Self::Green => "green",
        }
    }
}

impl From<Indicator> for u8 {
    fn from(indicator: Indicator) -> u8 {
        indicator as u8
    }
}

impl TryFrom<u8> for Indicator {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self> {
        match value {
            0x00 => Ok(Self::None),
            0x01 => Ok(Self::Red),
            0x02 => Ok(Self::Green),
            _ => Err(Error::Validation(format!("unknown indicator code {}", value))),
        }
    }
}

impl FromStr for Indicator {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" | "off" => Ok(Self::None),
            "red" => Ok(Self::Red),
            "green" => Ok(Self::Green),
            other => Err(Error::Parse(format!("unknown indicator {:?}", other))),
        }
    }
}

impl fmt::Display for Indicator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indicator_codes() {
        assert_eq!(u8::from(Indicator::None), 0);
        assert_eq!(u8::from(Indicator::Red), 1);
        assert_eq!(u8::from(Indicator::Green), 2);
        assert_eq!(Indicator::try_from(2).unwrap(), Indicator::Green);
        assert!(Indicator::try_from(3).is_err());
    }

    #[test]
    fn test_indicator_parse() {
        assert_eq!("RED".parse::<Indicator>().unwrap(), Indicator::Red);
        assert_eq!("off".parse::<Indicator>().unwrap(), Indicator::None);
        assert!("blue".parse::<Indicator>().is_err());
    }
}
