// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Fixed-size key material.
//!
//! None of these are parsed as curve points; they are compared and forwarded
//! as opaque bytes. On the wire a node encodes them as arrays of byte values.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{KernelError, KernelResult};

macro_rules! fixed_bytes {
    ($(#[$meta:meta])* $name:ident, $len:expr) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash)]
        pub struct $name(pub [u8; $len]);

        impl $name {
            pub const LEN: usize = $len;

            pub fn from_slice(bytes: &[u8]) -> KernelResult<Self> {
                let arr: [u8; $len] = bytes.try_into().map_err(|_| KernelError::InvalidLength {
                    expected: $len,
                    found: bytes.len(),
                })?;
                Ok(Self(arr))
            }

            pub fn from_hex(s: &str) -> KernelResult<Self> {
                let bytes = hex::decode(s.trim()).map_err(|e| KernelError::InvalidHex(e.to_string()))?;
                Self::from_slice(&bytes)
            }

            pub fn as_bytes(&self) -> &[u8; $len] {
                &self.0
            }

            pub fn to_hex(&self) -> String {
                hex::encode(self.0)
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self([0u8; $len])
            }
        }

        impl std::fmt::Debug for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}({})", stringify!($name), self.to_hex())
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.to_hex())
            }
        }

        impl std::str::FromStr for $name {
            type Err = KernelError;

            fn from_str(s: &str) -> KernelResult<Self> {
                Self::from_hex(s)
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.collect_seq(self.0.iter())
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let bytes = Vec::<u8>::deserialize(deserializer)?;
                Self::from_slice(&bytes).map_err(D::Error::custom)
            }
        }
    };
}

fixed_bytes!(
    /// Compressed public key identifying an oracle.
    OraclePublicKey,
    33
);

fixed_bytes!(
    /// Commitment point binding the oracle's signature to one publication.
    RPoint,
    33
);

fixed_bytes!(
    /// Oracle signature over an attested value.
    OracleSignature,
    32
);
