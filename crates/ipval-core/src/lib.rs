//! Core IPv4 address type for ipval
//!
//! This crate provides the foundational type used throughout the ipval
//! workspace:
//! - [`Ipv4Address`] - a validated dotted-decimal IPv4 address
//! - [`AddressError`] - error type for address parsing
//!
//! # Examples
//!
//! ```
//! use ipval_core::Ipv4Address;
//!
//! let addr = Ipv4Address::parse("192.168.0.1")?;
//! assert_eq!(addr.to_u32(), 0xC0A80001);
//! assert_eq!(addr.to_string(), "192.168.0.1");
//! # Ok::<(), ipval_core::AddressError>(())
//! ```

use serde::de;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Address errors
#[derive(Error, Debug)]
pub enum AddressError {
    /// Input is not a dotted-decimal IPv4 address
    #[error("'{0}' is not a valid IPv4 address")]
    InvalidAddress(String),
}

/// Result type alias for address operations
pub type Result<T> = std::result::Result<T, AddressError>;

/// A validated IPv4 address
///
/// Stored as the big-endian `u32` value of its four octets (first octet in
/// bits 31-24). Values are immutable once constructed; derive a new address
/// instead of mutating.
///
/// Ordering and hashing follow the numeric value, so `9.0.0.0` sorts before
/// `10.0.0.0`.
///
/// # Examples
///
/// ```
/// use ipval_core::Ipv4Address;
///
/// let addr = Ipv4Address::parse("255.255.255.255")?;
/// assert_eq!(addr.to_u32(), 4_294_967_295);
/// # Ok::<(), ipval_core::AddressError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Ipv4Address(u32);

impl Ipv4Address {
    /// Build an address from four octets, most significant first
    ///
    /// # Examples
    ///
    /// ```
    /// use ipval_core::Ipv4Address;
    ///
    /// let addr = Ipv4Address::new(127, 0, 0, 1);
    /// assert_eq!(addr.to_u32(), 0x7F000001);
    /// ```
    pub const fn new(a: u8, b: u8, c: u8, d: u8) -> Self {
        Self(u32::from_be_bytes([a, b, c, d]))
    }

    /// Check whether `text` is a valid dotted-decimal IPv4 address
    ///
    /// Valid means exactly four `.`-separated segments, each a non-empty run
    /// of decimal digits (no sign, no whitespace) with value in 0-255.
    /// Leading zeros are accepted: `"001"` denotes 1.
    ///
    /// # Examples
    ///
    /// ```
    /// use ipval_core::Ipv4Address;
    ///
    /// assert!(Ipv4Address::is_valid("10.0.0.1"));
    /// assert!(Ipv4Address::is_valid("001.002.003.004"));
    /// assert!(!Ipv4Address::is_valid("1.256.2.3"));
    /// assert!(!Ipv4Address::is_valid("1.2.3"));
    /// ```
    pub fn is_valid(text: &str) -> bool {
        Self::pack(text).is_some()
    }

    /// Parse a dotted-decimal IPv4 address
    ///
    /// The four octets are packed most-significant-first: the first segment
    /// lands in bits 31-24.
    ///
    /// # Arguments
    ///
    /// * `text` - Dotted-decimal address string (e.g. `"192.168.0.1"`)
    ///
    /// # Examples
    ///
    /// ```
    /// use ipval_core::Ipv4Address;
    ///
    /// let addr = Ipv4Address::parse("127.0.0.1")?;
    /// assert_eq!(addr.to_u32(), 0x7F000001);
    ///
    /// assert!(Ipv4Address::parse("100.200.300.400").is_err());
    /// # Ok::<(), ipval_core::AddressError>(())
    /// ```
    pub fn parse(text: &str) -> Result<Self> {
        Self::pack(text)
            .map(Self)
            .ok_or_else(|| AddressError::InvalidAddress(text.to_string()))
    }

    /// Pack four dotted octets into a big-endian u32
    fn pack(text: &str) -> Option<u32> {
        let parts: Vec<&str> = text.split('.').collect();
        if parts.len() != 4 {
            return None;
        }

        let mut value = 0u32;
        for (i, part) in parts.iter().enumerate() {
            let octet = parse_octet(part)?;
            value |= (octet as u32) << (24 - i * 8);
        }

        Some(value)
    }

    /// Integer value of the address
    ///
    /// Unsigned 32-bit: `255.255.255.255` is `4_294_967_295`, never a
    /// negative number.
    pub const fn to_u32(self) -> u32 {
        self.0
    }

    /// The four octets, most significant first
    pub const fn octets(self) -> [u8; 4] {
        self.0.to_be_bytes()
    }
}

/// Parse one address segment: decimal digits only, value 0-255
///
/// The digits-only guard rejects the sign and whitespace forms that
/// `u8::from_str` would otherwise accept (`"+1"`, `" 1"`).
fn parse_octet(part: &str) -> Option<u8> {
    if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    part.parse().ok()
}

impl fmt::Display for Ipv4Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.{}.{}.{}",
            (self.0 >> 24) & 0xFF,
            (self.0 >> 16) & 0xFF,
            (self.0 >> 8) & 0xFF,
            self.0 & 0xFF
        )
    }
}

impl FromStr for Ipv4Address {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl From<u32> for Ipv4Address {
    fn from(value: u32) -> Self {
        Ipv4Address(value)
    }
}

impl From<Ipv4Address> for u32 {
    fn from(addr: Ipv4Address) -> Self {
        addr.0
    }
}

impl From<[u8; 4]> for Ipv4Address {
    fn from(octets: [u8; 4]) -> Self {
        Ipv4Address(u32::from_be_bytes(octets))
    }
}

impl Serialize for Ipv4Address {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Ipv4Address {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let text = String::deserialize(deserializer)?;
        Ipv4Address::parse(&text).map_err(de::Error::custom)
    }
}
