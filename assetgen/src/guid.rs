// FGuid: four 32-bit words, written by the engine as 32 hex digits.

use std::fmt;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FGuid {
    pub a: u32,
    pub b: u32,
    pub c: u32,
    pub d: u32,
}

impl FGuid {
    /// Number of hex digits in the `Digits` text form.
    pub const DIGITS: usize = 32;

    pub const fn new(a: u32, b: u32, c: u32, d: u32) -> Self {
        Self { a, b, c, d }
    }

    pub const fn nil() -> Self {
        Self::new(0, 0, 0, 0)
    }

    pub fn is_nil(&self) -> bool {
        *self == Self::nil()
    }

    /// Parse either the 32-digit form or the dashed 8-4-4-4-12 form.
    pub fn parse_str(s: &str) -> Option<Self> {
        let digits: String = s
            .trim_matches(|c| c == '{' || c == '}')
            .chars()
            .filter(|c| *c != '-')
            .collect();
        if digits.len() != Self::DIGITS || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }

        let word = |start: usize| u32::from_str_radix(&digits[start..start + 8], 16).ok();
        Some(Self {
            a: word(0)?,
            b: word(8)?,
            c: word(16)?,
            d: word(24)?,
        })
    }
}

impl fmt::Display for FGuid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:08X}{:08X}{:08X}{:08X}", self.a, self.b, self.c, self.d)
    }
}

impl Serialize for FGuid {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for FGuid {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct FGuidVisitor;

        impl Visitor<'_> for FGuidVisitor {
            type Value = FGuid;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a GUID string of 32 hex digits")
            }

            fn visit_str<E: de::Error>(self, value: &str) -> Result<FGuid, E> {
                FGuid::parse_str(value).ok_or_else(|| E::custom(format!("invalid GUID `{value}`")))
            }
        }

        deserializer.deserialize_str(FGuidVisitor)
    }
}
