//! Waiting-line capacity bound.

use std::fmt;

/// Maximum number of agents a station's waiting line may hold.
///
/// Servers are not counted: a station with `c` servers and
/// `Capacity::Finite(k)` holds at most `c + k` agents in total.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
pub enum Capacity {
    Finite(u32),
    #[default]
    Unbounded,
}

impl Capacity {
    /// `true` if a waiting line of length `waiting` cannot accept another agent.
    #[inline]
    pub fn is_reached(self, waiting: usize) -> bool {
        match self {
            Capacity::Finite(k) => waiting >= k as usize,
            Capacity::Unbounded => false,
        }
    }

    #[inline]
    pub fn is_unbounded(self) -> bool {
        matches!(self, Capacity::Unbounded)
    }
}

impl fmt::Display for Capacity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Capacity::Finite(k) => write!(f, "{k}"),
            Capacity::Unbounded => f.write_str("inf"),
        }
    }
}

// Serialized as a plain integer or the string "inf".
#[cfg(feature = "serde")]
mod serde_impl {
    use serde::de::{self, Deserializer, Visitor};
    use serde::{Deserialize, Serialize, Serializer};

    use super::Capacity;

    impl Serialize for Capacity {
        fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
            match self {
                Capacity::Finite(k) => s.serialize_u32(*k),
                Capacity::Unbounded => s.serialize_str("inf"),
            }
        }
    }

    struct CapacityVisitor;

    impl Visitor<'_> for CapacityVisitor {
        type Value = Capacity;

        fn expecting(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.write_str("a non-negative integer or \"inf\"")
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<Capacity, E> {
            u32::try_from(v)
                .map(Capacity::Finite)
                .map_err(|_| E::custom(format!("capacity {v} out of range")))
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<Capacity, E> {
            u64::try_from(v)
                .map_err(|_| E::custom(format!("capacity must not be negative, got {v}")))
                .and_then(|v| self.visit_u64(v))
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<Capacity, E> {
            match v.trim() {
                "inf" | "infinite" | "unbounded" => Ok(Capacity::Unbounded),
                other => Err(E::custom(format!("invalid capacity {other:?}"))),
            }
        }
    }

    impl<'de> Deserialize<'de> for Capacity {
        fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Capacity, D::Error> {
            d.deserialize_any(CapacityVisitor)
        }
    }
}
