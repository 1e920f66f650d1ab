//! Fixed-length credentials and console identity issued by a prior registration.
use std::{fmt, str::FromStr};

use hex::FromHexError;

/// Length in bytes of both the registration key and the morning token.
pub const CREDENTIAL_LEN: usize = 16;
/// Length in bytes of a console hardware address.
pub const MAC_LEN: usize = 6;

macro_rules! credential_blob {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash)]
        pub struct $name([u8; CREDENTIAL_LEN]);

        impl $name {
            pub const fn from_bytes(bytes: [u8; CREDENTIAL_LEN]) -> Self {
                Self(bytes)
            }

            /// Copy `bytes` and zero-fill the remainder. Returns `None` when
            /// more than 16 bytes are supplied.
            pub fn from_prefix(bytes: &[u8]) -> Option<Self> {
                if bytes.len() > CREDENTIAL_LEN {
                    return None;
                }
                let mut blob = [0u8; CREDENTIAL_LEN];
                blob[..bytes.len()].copy_from_slice(bytes);
                Some(Self(blob))
            }

            /// Decode exactly 32 hex digits.
            pub fn from_hex(input: &str) -> Result<Self, FromHexError> {
                let mut blob = [0u8; CREDENTIAL_LEN];
                hex::decode_to_slice(input.trim(), &mut blob)?;
                Ok(Self(blob))
            }

            pub fn to_hex(&self) -> String {
                hex::encode(self.0)
            }

            pub const fn as_bytes(&self) -> &[u8; CREDENTIAL_LEN] {
                &self.0
            }
        }

        // Credentials never show up in logs.
        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(concat!(stringify!($name), "(<redacted>)"))
            }
        }
    };
}

credential_blob!(
    /// Registration key ("regist key") bound to one console.
    RegistKey
);

credential_blob!(
    /// Session ("morning") token bound to one console.
    MorningToken
);

/// Console generation and firmware family the session targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConsoleTarget {
    Ps4Unknown,
    Ps4V8,
    Ps4V9,
    #[default]
    Ps4V10,
    Ps5Unknown,
    Ps5V1,
}

impl ConsoleTarget {
    pub const fn as_str(&self) -> &'static str {
        match self {
            ConsoleTarget::Ps4Unknown => "ps4_unknown",
            ConsoleTarget::Ps4V8 => "ps4_8",
            ConsoleTarget::Ps4V9 => "ps4_9",
            ConsoleTarget::Ps4V10 => "ps4_10",
            ConsoleTarget::Ps5Unknown => "ps5_unknown",
            ConsoleTarget::Ps5V1 => "ps5_1",
        }
    }

    pub const fn is_ps5(&self) -> bool {
        matches!(self, ConsoleTarget::Ps5Unknown | ConsoleTarget::Ps5V1)
    }
}

impl fmt::Display for ConsoleTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ConsoleTarget {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "ps4_unknown" => Ok(ConsoleTarget::Ps4Unknown),
            "ps4_8" => Ok(ConsoleTarget::Ps4V8),
            "ps4_9" => Ok(ConsoleTarget::Ps4V9),
            "ps4_10" => Ok(ConsoleTarget::Ps4V10),
            "ps5_unknown" => Ok(ConsoleTarget::Ps5Unknown),
            "ps5_1" => Ok(ConsoleTarget::Ps5V1),
            other => Err(format!(
                "unknown console target `{other}` (expected one of ps4_unknown, ps4_8, ps4_9, ps4_10, ps5_unknown, ps5_1)"
            )),
        }
    }
}

/// Hardware (MAC) address of a registered console.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct HostMac([u8; MAC_LEN]);

impl HostMac {
    pub const fn as_bytes(&self) -> &[u8; MAC_LEN] {
        &self.0
    }
}

impl FromStr for HostMac {
    type Err = FromHexError;

    /// Accepts `aabbccddeeff` as well as `aa:bb:cc:dd:ee:ff` / `aa-bb-...`.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let digits: String = value
            .trim()
            .chars()
            .filter(|c| *c != ':' && *c != '-')
            .collect();
        let mut bytes = [0u8; MAC_LEN];
        hex::decode_to_slice(digits, &mut bytes)?;
        Ok(Self(bytes))
    }
}

impl fmt::Display for HostMac {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.0.iter().map(|b| format!("{b:02x}")).collect();
        f.write_str(&parts.join(":"))
    }
}
