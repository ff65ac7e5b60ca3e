use std::str::FromStr;

/// Metadata of an encoded symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Meta {
    pub version: Version,
    pub ecl: Ecl,
}

impl Meta {
    /// Side length in modules of a symbol with this metadata.
    pub fn dimension(&self) -> usize {
        self.version.dimension()
    }
}

/// Version of a QR symbol, which determines its size. Valid numbers are in the range 1..=40.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Version(u8);

impl Version {
    pub const MIN: Self = Self(1);
    pub const MAX: Self = Self(40);

    /// Construct a new version given its number.
    /// # Example
    /// ```
    /// use qrdot_core::Version;
    /// assert!(Version::new(1).is_some());
    /// assert!(Version::new(0).is_none());
    /// assert!(Version::new(41).is_none());
    /// ```
    pub const fn new(number: u8) -> Option<Self> {
        match number {
            1..=40 => Some(Self(number)),
            _ => None,
        }
    }

    /// Get the version number.
    pub fn number(self) -> u8 {
        self.0
    }

    /// Side length of the symbol in modules.
    /// # Example
    /// ```
    /// use qrdot_core::Version;
    /// assert_eq!(Version::MIN.dimension(), 21);
    /// assert_eq!(Version::MAX.dimension(), 177);
    /// ```
    pub fn dimension(self) -> usize {
        17 + self.0 as usize * 4
    }
}

impl std::fmt::Display for Version {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "V{}", self.number())
    }
}

/// Error correction level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Ecl {
    /// Low: 7% recovery rate.
    L,
    /// Medium: 15% recovery rate.
    M,
    /// Quartile: 25% recovery rate.
    Q,
    /// High: 30% recovery rate.
    #[default]
    H,
}

impl std::fmt::Display for Ecl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Ecl::L => "L",
            Ecl::M => "M",
            Ecl::Q => "Q",
            Ecl::H => "H",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown error correction level '{0}', expected one of L, M, Q, H")]
pub struct UnknownEcl(pub String);

impl FromStr for Ecl {
    type Err = UnknownEcl;

    /// Parse a level by letter or by name, ignoring case.
    /// # Example
    /// ```
    /// use qrdot_core::Ecl;
    /// assert_eq!("q".parse(), Ok(Ecl::Q));
    /// assert_eq!("High".parse(), Ok(Ecl::H));
    /// assert!("x".parse::<Ecl>().is_err());
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "l" | "low" => Ok(Ecl::L),
            "m" | "medium" => Ok(Ecl::M),
            "q" | "quartile" => Ok(Ecl::Q),
            "h" | "high" => Ok(Ecl::H),
            _ => Err(UnknownEcl(s.to_owned())),
        }
    }
}
