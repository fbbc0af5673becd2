//! Subnet notation parsing and range queries
//!
//! Normalizes the accepted textual subnet notations into a canonical
//! network/mask pair and answers containment and derived-address queries:
//! - CIDR bit count (`"192.168.1.0/24"`)
//! - Explicit dotted-decimal mask (`"192.168.1.0/255.255.255.0"`)
//! - Wildcard octets (`"192.168.1.*"`)
//! - A bare address, treated as a host route (`"10.0.0.138"` = /32)
//!
//! # Examples
//!
//! ```
//! use ipval_subnet::Subnet;
//!
//! let subnet = Subnet::parse("192.168.10.10/26")?;
//! assert_eq!(subnet.network().to_string(), "192.168.10.0");
//! assert_eq!(subnet.mask().to_string(), "255.255.255.192");
//! assert_eq!(subnet.broadcast().to_string(), "192.168.10.63");
//! assert!(subnet.is_in_range("192.168.10.63")?);
//! assert!(!subnet.is_in_range("192.168.10.64")?);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use ipval_core::{Ipv4Address, Result as AddressResult};
use serde::de;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Subnet errors
#[derive(Error, Debug)]
pub enum SubnetError {
    /// Input matches none of the accepted subnet notations
    #[error("'{0}' is not a valid subnet")]
    InvalidSubnet(String),
}

/// Result type alias for subnet operations
pub type Result<T> = std::result::Result<T, SubnetError>;

/// A subnet as a network address / network mask pair
///
/// Construction normalizes any accepted notation and enforces two
/// invariants: the mask is a contiguous run of 1-bits followed by 0-bits,
/// and the network address has no set bits outside the mask. Host bits in
/// the supplied base address are masked off, not rejected, so
/// `192.168.10.10/26` and `192.168.10.0/26` denote the same subnet.
///
/// # Examples
///
/// ```
/// use ipval_subnet::Subnet;
///
/// let a = Subnet::parse("192.168.123.*")?;
/// let b = Subnet::parse("192.168.123.0/24")?;
/// assert_eq!(a, b);
/// assert_eq!(a.to_string(), "192.168.123.0/255.255.255.0");
/// # Ok::<(), ipval_subnet::SubnetError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Subnet {
    network: Ipv4Address,
    mask: Ipv4Address,
}

impl Subnet {
    /// Parse any accepted subnet notation
    ///
    /// # Arguments
    ///
    /// * `text` - Subnet in wildcard, CIDR, explicit-mask or bare-address
    ///   notation
    ///
    /// # Examples
    ///
    /// ```
    /// use ipval_subnet::Subnet;
    ///
    /// let subnet = Subnet::parse("10.0.0.0/8")?;
    /// assert_eq!(subnet.mask().to_string(), "255.0.0.0");
    ///
    /// assert!(Subnet::parse("10.*.0.*").is_err());
    /// # Ok::<(), ipval_subnet::SubnetError>(())
    /// ```
    pub fn parse(text: &str) -> Result<Self> {
        let (base, mask) = normalize(text)
            .ok_or_else(|| SubnetError::InvalidSubnet(text.to_string()))?;

        Ok(Self {
            network: Ipv4Address::from(base & mask),
            mask: Ipv4Address::from(mask),
        })
    }

    /// Check whether `text` is a valid subnet in any accepted notation
    ///
    /// # Examples
    ///
    /// ```
    /// use ipval_subnet::Subnet;
    ///
    /// assert!(Subnet::is_valid("192.168.100.0/24"));
    /// assert!(Subnet::is_valid("10.0.*.*"));
    /// assert!(Subnet::is_valid("127.0.0.1"));
    /// assert!(!Subnet::is_valid("192.168.100.0/33"));
    /// ```
    pub fn is_valid(text: &str) -> bool {
        normalize(text).is_some()
    }

    /// Network address (lowest address in the subnet)
    pub fn network(&self) -> Ipv4Address {
        self.network
    }

    /// Network mask
    pub fn mask(&self) -> Ipv4Address {
        self.mask
    }

    /// Broadcast address (highest address in the subnet)
    ///
    /// Every bit outside the mask is set.
    pub fn broadcast(&self) -> Ipv4Address {
        Ipv4Address::from(self.network.to_u32() | !self.mask.to_u32())
    }

    /// Number of leading 1-bits in the mask
    ///
    /// Well-defined because the mask invariant guarantees a contiguous
    /// prefix: 24 for `255.255.255.0`, 0 for `0.0.0.0`.
    pub fn prefix_len(&self) -> u8 {
        self.mask.to_u32().count_ones() as u8
    }

    /// Check whether an already-parsed address falls inside the subnet
    ///
    /// # Arguments
    ///
    /// * `addr` - Address to test
    pub fn contains(&self, addr: Ipv4Address) -> bool {
        (addr.to_u32() & self.mask.to_u32()) == self.network.to_u32()
    }

    /// Check whether a textual address falls inside the subnet
    ///
    /// The argument is re-validated; a malformed address is an error, never
    /// a silent `false`.
    ///
    /// # Examples
    ///
    /// ```
    /// use ipval_subnet::Subnet;
    ///
    /// let subnet = Subnet::parse("10.0.0.0/8")?;
    /// assert!(subnet.is_in_range("10.0.1.2")?);
    /// assert!(!subnet.is_in_range("11.0.0.0")?);
    /// assert!(subnet.is_in_range("10.0.1").is_err());
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn is_in_range(&self, addr: &str) -> AddressResult<bool> {
        let addr = Ipv4Address::parse(addr)?;
        Ok(self.contains(addr))
    }
}

/// Normalize any accepted subnet notation into a (base, mask) integer pair
///
/// One function with ordered detection branches: wildcard before slash
/// before bare address. The base may still carry host bits; the caller
/// masks them off.
fn normalize(text: &str) -> Option<(u32, u32)> {
    if text.contains('*') {
        // Wildcard notation: four segments, each either '*' or an octet.
        // Digit segments contribute their value under mask octet 255, star
        // segments contribute 0 under mask octet 0.
        let parts: Vec<&str> = text.split('.').collect();
        if parts.len() != 4 {
            return None;
        }

        let mut base = 0u32;
        let mut mask = 0u32;
        let mut got_star = false;
        for (i, part) in parts.iter().enumerate() {
            let shift = 24 - i * 8;
            if *part == "*" {
                got_star = true;
            } else {
                // No digit segment may appear after the first star
                if got_star {
                    return None;
                }
                let octet = parse_decimal(part)?;
                base |= (octet as u32) << shift;
                mask |= 0xFF << shift;
            }
        }

        Some((base, mask))
    } else if text.contains('/') {
        // Slash notation: the mask part is everything after the first
        // slash, either a dotted-decimal mask or a CIDR bit count.
        let (addr_text, mask_text) = text.split_once('/')?;
        let base = Ipv4Address::parse(addr_text).ok()?.to_u32();

        if Ipv4Address::is_valid(mask_text) {
            let mask = Ipv4Address::parse(mask_text).ok()?.to_u32();
            if !is_valid_mask(mask) {
                return None;
            }
            Some((base, mask))
        } else {
            let bits = parse_decimal(mask_text).filter(|bits| *bits <= 32)?;
            Some((base, mask_from_bits(bits)))
        }
    } else {
        // A bare valid address is a host route
        let base = Ipv4Address::parse(text).ok()?.to_u32();
        Some((base, u32::MAX))
    }
}

/// Parse a decimal segment: digits only (no sign, no whitespace), leading
/// zeros accepted
fn parse_decimal(text: &str) -> Option<u8> {
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    text.parse().ok()
}

/// Check that a mask is a contiguous run of 1-bits followed by 0-bits
///
/// All-ones and all-zeros both pass; a 1-bit after a 0-bit does not, so
/// `255.255.1.0` is rejected.
fn is_valid_mask(mask: u32) -> bool {
    mask == mask_from_bits(mask.leading_ones() as u8)
}

/// Convert a CIDR bit count (0-32) to the mask with that many leading 1s
fn mask_from_bits(bits: u8) -> u32 {
    if bits == 0 {
        0
    } else {
        !((1u64 << (32 - bits)) - 1) as u32
    }
}

impl fmt::Display for Subnet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.network, self.mask)
    }
}

impl FromStr for Subnet {
    type Err = SubnetError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl Serialize for Subnet {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Subnet {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let text = String::deserialize(deserializer)?;
        Subnet::parse(&text).map_err(de::Error::custom)
    }
}
