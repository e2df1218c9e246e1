use crate::store::traits::IdGenerator;
use chrono::Utc;
use rand::distributions::Alphanumeric;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Random v4 UUIDs. The default strategy.
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidIdGenerator;

impl IdGenerator for UuidIdGenerator {
    fn next_id(&self) -> String {
        uuid::Uuid::new_v4().to_string()
    }
}

/// Counter starting at 1. Unique per generator instance only; suited to tests
/// and single-process demos.
#[derive(Debug)]
pub struct SequentialIdGenerator {
    next: AtomicU64,
}

impl SequentialIdGenerator {
    pub fn new() -> Self {
        Self::starting_at(1)
    }

    pub fn starting_at(first: u64) -> Self {
        Self {
            next: AtomicU64::new(first),
        }
    }
}

impl Default for SequentialIdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl IdGenerator for SequentialIdGenerator {
    fn next_id(&self) -> String {
        self.next.fetch_add(1, Ordering::Relaxed).to_string()
    }
}

/// Legacy scheme: milliseconds since the epoch, plus a random base-36 suffix
/// for batch inserts.
///
/// Uniqueness is probabilistic only. Two single inserts in the same
/// millisecond get the same id; batch ids collide if the suffixes do.
#[derive(Debug, Default, Clone, Copy)]
pub struct TimestampIdGenerator;

const BATCH_SUFFIX_LEN: usize = 13;

impl IdGenerator for TimestampIdGenerator {
    fn next_id(&self) -> String {
        Utc::now().timestamp_millis().to_string()
    }

    fn next_batch_id(&self) -> String {
        let suffix: String = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(BATCH_SUFFIX_LEN)
            .map(|c| char::from(c).to_ascii_lowercase())
            .collect();
        format!("{}{}", self.next_id(), suffix)
    }
}

/// Identifier strategy selectable from configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdStrategy {
    #[default]
    Uuid,
    Sequential,
    Timestamp,
}

impl IdStrategy {
    pub fn build(&self) -> Arc<dyn IdGenerator> {
        match self {
            IdStrategy::Uuid => Arc::new(UuidIdGenerator),
            IdStrategy::Sequential => Arc::new(SequentialIdGenerator::new()),
            IdStrategy::Timestamp => Arc::new(TimestampIdGenerator),
        }
    }
}

impl FromStr for IdStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "uuid" => Ok(IdStrategy::Uuid),
            "sequential" => Ok(IdStrategy::Sequential),
            "timestamp" => Ok(IdStrategy::Timestamp),
            other => Err(format!(
                "unknown id strategy '{}' (expected uuid, sequential or timestamp)",
                other
            )),
        }
    }
}
