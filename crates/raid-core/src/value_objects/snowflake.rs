//! Snowflake ID - 64-bit time-ordered identifier for raids, slots and signups
//!
//! Layout:
//! - Bits 63-22: milliseconds since [`Snowflake::EPOCH`]
//! - Bits 21-12: worker ID (0-1023)
//! - Bits 11-0:  per-millisecond sequence

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::sync::atomic::{AtomicI64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

/// Time-ordered 64-bit identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Snowflake(i64);

impl Snowflake {
    /// Custom epoch: 2025-01-01 00:00:00 UTC (milliseconds)
    pub const EPOCH: i64 = 1_735_689_600_000;

    #[inline]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    #[inline]
    pub const fn into_inner(self) -> i64 {
        self.0
    }

    /// Milliseconds since the Unix epoch encoded in the ID
    #[inline]
    pub fn timestamp(&self) -> i64 {
        (self.0 >> 22) + Self::EPOCH
    }

    #[inline]
    pub fn worker_id(&self) -> u16 {
        ((self.0 >> 12) & 0x3FF) as u16
    }

    pub fn parse(s: &str) -> Result<Self, SnowflakeParseError> {
        s.trim()
            .parse::<i64>()
            .map(Snowflake)
            .map_err(|_| SnowflakeParseError::InvalidFormat)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SnowflakeParseError {
    #[error("invalid snowflake format")]
    InvalidFormat,
}

impl fmt::Display for Snowflake {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for Snowflake {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl From<Snowflake> for i64 {
    fn from(id: Snowflake) -> Self {
        id.0
    }
}

impl std::str::FromStr for Snowflake {
    type Err = SnowflakeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Snowflake::parse(s)
    }
}

// Serialized as a string so JavaScript clients keep full precision
impl Serialize for Snowflake {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Snowflake {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Int(i64),
            Str(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Int(value) => Ok(Snowflake(value)),
            Raw::Str(value) => Snowflake::parse(&value).map_err(serde::de::Error::custom),
        }
    }
}

/// Lock-free, strictly increasing Snowflake generator
///
/// Each call returns an ID greater than every ID previously handed out by
/// this generator. When more than 4096 IDs are requested within one
/// millisecond the generator borrows from the next millisecond instead of
/// spinning.
pub struct SnowflakeGenerator {
    worker_bits: i64,
    last: AtomicI64,
}

impl SnowflakeGenerator {
    /// # Panics
    /// Panics if `worker_id >= 1024`
    pub fn new(worker_id: u16) -> Self {
        assert!(worker_id < 1024, "Worker ID must be < 1024");
        Self {
            worker_bits: i64::from(worker_id) << 12,
            last: AtomicI64::new(0),
        }
    }

    pub fn generate(&self) -> Snowflake {
        let floor = ((now_millis() - Snowflake::EPOCH).max(0) << 22) | self.worker_bits;
        let previous = self
            .last
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |last| {
                Some(floor.max(self.next_after(last)))
            })
            .unwrap_or_default();

        Snowflake::new(floor.max(self.next_after(previous)))
    }

    pub fn worker_id(&self) -> u16 {
        (self.worker_bits >> 12) as u16
    }

    // Next sequence value for this worker, carrying into the timestamp bits
    fn next_after(&self, last: i64) -> i64 {
        if last == 0 {
            return 0;
        }
        let sequence = (last & 0xFFF) + 1;
        if sequence > 0xFFF {
            (((last >> 22) + 1) << 22) | self.worker_bits
        } else {
            (last & !0xFFF) | sequence
        }
    }
}

impl Default for SnowflakeGenerator {
    fn default() -> Self {
        Self::new(0)
    }
}

fn now_millis() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_snowflake_parse() {
        assert_eq!(Snowflake::parse("123456789").unwrap().into_inner(), 123_456_789);
        assert_eq!(Snowflake::parse(" 42 ").unwrap(), Snowflake::new(42));
        assert!(Snowflake::parse("raid").is_err());
    }

    #[test]
    fn test_snowflake_serde() {
        let sf = Snowflake::new(123_456_789_012_345_678);
        let json = serde_json::to_string(&sf).unwrap();
        assert_eq!(json, "\"123456789012345678\"");

        let from_str: Snowflake = serde_json::from_str(&json).unwrap();
        let from_int: Snowflake = serde_json::from_str("12345").unwrap();
        assert_eq!(from_str, sf);
        assert_eq!(from_int, Snowflake::new(12345));
    }

    #[test]
    fn test_generator_is_strictly_increasing() {
        let gen = SnowflakeGenerator::new(3);
        let mut previous = gen.generate();
        for _ in 0..10_000 {
            let next = gen.generate();
            assert!(next > previous);
            assert_eq!(next.worker_id(), 3);
            previous = next;
        }
    }

    #[test]
    fn test_generator_timestamp_is_recent() {
        let gen = SnowflakeGenerator::default();
        let id = gen.generate();
        assert!((now_millis() - id.timestamp()).abs() < 5_000);
    }

    #[test]
    fn test_generator_thread_safety() {
        let gen = Arc::new(SnowflakeGenerator::new(1));
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let gen = Arc::clone(&gen);
                thread::spawn(move || (0..1000).map(|_| gen.generate()).collect::<Vec<_>>())
            })
            .collect();

        let mut all = HashSet::new();
        for handle in handles {
            for id in handle.join().unwrap() {
                assert!(all.insert(id), "duplicate snowflake {id}");
            }
        }
        assert_eq!(all.len(), 4000);
    }
}
