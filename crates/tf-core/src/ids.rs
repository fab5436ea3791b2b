//! Device identifiers.
//!
//! Two kinds of identity exist:
//!
//! - [`DeviceId`]: dense index of a device in the fleet's `Vec`s.  Cheap,
//!   `Copy`, and the key used everywhere inside the emulator.
//! - [`DeviceIdentity`]: the 48-bit hardware address a device reports on the
//!   wire (`IDENTITY` field of the payload).

use std::fmt;
use std::str::FromStr;

use rand::Rng;

use crate::CoreError;

/// Generate a typed ID wrapper around a primitive integer.
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty);) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis struct $name(pub $inner);

        impl $name {
            /// Cast to `usize` for direct use as a `Vec` index.
            #[inline(always)]
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl TryFrom<usize> for $name {
            type Error = std::num::TryFromIntError;
            fn try_from(n: usize) -> Result<$name, Self::Error> {
                <$inner>::try_from(n).map($name)
            }
        }
    };
}

typed_id! {
    /// Index of a device in fleet storage.
    pub struct DeviceId(u32);
}

// ── DeviceIdentity ────────────────────────────────────────────────────────────

/// A 48-bit hardware address rendered as 12 upper-case hex digits with no
/// separators (e.g. `0A1B2C3D4E5F`).
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DeviceIdentity(pub [u8; 6]);

impl DeviceIdentity {
    /// Draw a random address whose first hex digit is even.
    pub fn random<R: Rng>(rng: &mut R) -> Self {
        let mut bytes = [0u8; 6];
        rng.fill(&mut bytes);
        bytes[0] &= 0xEF;
        DeviceIdentity(bytes)
    }

    /// The address as a big-endian integer (upper 16 bits zero).
    #[inline]
    pub fn as_u64(self) -> u64 {
        self.0.iter().fold(0u64, |acc, &b| (acc << 8) | b as u64)
    }
}

impl fmt::Display for DeviceIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for b in self.0 {
            write!(f, "{b:02X}")?;
        }
        Ok(())
    }
}

impl FromStr for DeviceIdentity {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.len() != 12 || !s.is_ascii() {
            return Err(CoreError::InvalidIdentity(s.to_owned()));
        }
        let mut bytes = [0u8; 6];
        for (i, byte) in bytes.iter_mut().enumerate() {
            *byte = u8::from_str_radix(&s[i * 2..i * 2 + 2], 16)
                .map_err(|_| CoreError::InvalidIdentity(s.to_owned()))?;
        }
        Ok(DeviceIdentity(bytes))
    }
}
