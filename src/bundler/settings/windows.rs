//! NSIS compression setting.

use crate::bundler::error::Error;
use std::{fmt, str::FromStr};

/// NSIS compression algorithm.
///
/// Controls the `SetCompressor` directive of the generated script. See
/// <https://nsis.sourceforge.io/Reference/SetCompressor>.
///
/// # Comparison
///
/// | Algorithm | Speed | Size | Notes |
/// |-----------|-------|------|-------|
/// | Zlib | Fast | Medium | Good balance |
/// | Bzip2 | Medium | Small | Better compression |
/// | LZMA | Slowest | Smallest | Best compression (default) |
///
/// # Configuration
///
/// ```toml
/// [installer]
/// compression = "lzma"
/// ```
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum NsisCompression {
    /// zlib compression.
    Zlib,

    /// bzip2 compression - smaller than zlib.
    Bzip2,

    /// LZMA compression - smallest size, slowest (default).
    #[default]
    Lzma,
}

impl NsisCompression {
    /// All accepted values, in the order they are documented.
    pub const ALL: [NsisCompression; 3] = [Self::Zlib, Self::Bzip2, Self::Lzma];

    /// Name as written in the `SetCompressor` directive.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Zlib => "zlib",
            Self::Bzip2 => "bzip2",
            Self::Lzma => "lzma",
        }
    }
}

impl fmt::Display for NsisCompression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NsisCompression {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == value)
            .ok_or_else(|| Error::InvalidOption {
                option: "compression",
                value: value.to_string(),
                reason: "must be 'zlib', 'bzip2' or 'lzma'".to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_algorithms() {
        assert_eq!("zlib".parse::<NsisCompression>().unwrap(), NsisCompression::Zlib);
        assert_eq!("bzip2".parse::<NsisCompression>().unwrap(), NsisCompression::Bzip2);
        assert_eq!("lzma".parse::<NsisCompression>().unwrap(), NsisCompression::Lzma);
    }

    #[test]
    fn rejects_anything_else() {
        for bad in ["none", "LZMA", "zstd", ""] {
            let err = bad.parse::<NsisCompression>().unwrap_err();
            assert!(err.is_validation(), "{bad} should be a validation error");
        }
    }
}
