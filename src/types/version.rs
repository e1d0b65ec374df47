//! Minecraft versions and the text component dialects they speak.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A release version such as `1.21.5`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MinecraftVersion {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
}

impl MinecraftVersion {
    pub const fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self { major, minor, patch }
    }

    /// The dialect used by this version.
    pub fn dialect(&self) -> Dialect {
        if *self >= Dialect::MODERN_SINCE {
            Dialect::Modern
        } else {
            Dialect::Legacy
        }
    }
}

impl FromStr for MinecraftVersion {
    type Err = Error;

    /// Parse `major.minor` or `major.minor.patch`.
    fn from_str(s: &str) -> Result<Self> {
        let invalid = || Error::InvalidVersion(s.to_string());
        let parts: Vec<&str> = s.trim().split('.').collect();
        if parts.len() < 2 || parts.len() > 3 {
            return Err(invalid());
        }

        let mut numbers = [0u32; 3];
        for (i, part) in parts.iter().enumerate() {
            numbers[i] = part.parse().map_err(|_| invalid())?;
        }

        Ok(Self::new(numbers[0], numbers[1], numbers[2]))
    }
}

impl fmt::Display for MinecraftVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

/// Grammar and field-shape variant of text components.
///
/// Minecraft 1.21.5 moved text components from JSON to SNBT and renamed the
/// interactivity fields, so everything before it is [`Legacy`](Self::Legacy).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    /// Before 1.21.5: JSON, `clickEvent` / `hoverEvent`.
    Legacy,
    /// 1.21.5 and later: SNBT, `click_event` / `hover_event`.
    Modern,
}

impl Dialect {
    /// First version speaking the modern dialect.
    pub const MODERN_SINCE: MinecraftVersion = MinecraftVersion::new(1, 21, 5);

    /// Resolve the dialect for a version string like `"1.20.4"`.
    pub fn from_version(version: &str) -> Result<Self> {
        Ok(version.parse::<MinecraftVersion>()?.dialect())
    }

    /// Whether `\s`, `\x`, `\U` and `\N{}` escapes are understood.
    pub fn extended_escapes(&self) -> bool {
        matches!(self, Dialect::Modern)
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Dialect::Legacy => "legacy (<1.21.5)",
            Dialect::Modern => "modern (1.21.5+)",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_version() {
        assert_eq!("1.21.5".parse::<MinecraftVersion>().unwrap(), MinecraftVersion::new(1, 21, 5));
        assert_eq!("1.21".parse::<MinecraftVersion>().unwrap(), MinecraftVersion::new(1, 21, 0));
        assert!("1".parse::<MinecraftVersion>().is_err());
        assert!("1.x.2".parse::<MinecraftVersion>().is_err());
        assert!("1.2.3.4".parse::<MinecraftVersion>().is_err());
    }

    #[test]
    fn test_dialect_split() {
        assert_eq!(Dialect::from_version("1.20.4").unwrap(), Dialect::Legacy);
        assert_eq!(Dialect::from_version("1.21.4").unwrap(), Dialect::Legacy);
        assert_eq!(Dialect::from_version("1.21.5").unwrap(), Dialect::Modern);
        assert_eq!(Dialect::from_version("1.21.10").unwrap(), Dialect::Modern);
        assert_eq!(Dialect::from_version("1.22").unwrap(), Dialect::Modern);
    }
}
