use chrono::{DateTime, SecondsFormat, Utc};
use rand::Rng;

const SEED_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const SEED_LEN: usize = 10;

pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Always reports the same instant.
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// ISO-8601 with millisecond precision and a `Z` suffix.
pub fn format_timestamp(at: &DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Polynomial hash over the UTF-16 code units of `seed`, wrapping at 2^32.
pub fn seed_hash(seed: &str) -> u32 {
    seed.encode_utf16()
        .fold(0u32, |acc, unit| acc.wrapping_mul(31).wrapping_add(u32::from(unit)))
}

/// Index of the winner in a pool of `count` entries.
///
/// The wall-clock milliseconds are added to the seed hash, so the same seed
/// only reproduces a pick at the same instant. `None` for an empty pool.
pub fn pick_index(seed: &str, now_ms: i64, count: usize) -> Option<usize> {
    if count == 0 {
        return None;
    }
    let now_ms = u64::try_from(now_ms).unwrap_or(0);
    let total = u64::from(seed_hash(seed)) + now_ms;
    Some((total % count as u64) as usize)
}

pub fn random_seed() -> String {
    let mut rng = rand::thread_rng();
    (0..SEED_LEN)
        .map(|_| SEED_ALPHABET[rng.gen_range(0..SEED_ALPHABET.len())] as char)
        .collect()
}
