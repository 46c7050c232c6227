//! Seed derivation for shared daily boards.
//!
//! Everyone who shares a phrase gets the same board. The phrase changes once
//! per game day, and the game day rolls over at 15:29 UTC.

use rand::Rng;
use std::ops::RangeInclusive;
use std::time::{SystemTime, UNIX_EPOCH};

/// Range the per-user random seed is drawn from.
pub const USER_SEED_RANGE: RangeInclusive<i64> = 1..=69420;

/// Seconds after midnight UTC at which a new game day starts.
const DAY_ROLLOVER_SECS: i64 = (15 * 60 + 29) * 60;

/// Largest seed handed to the shuffle; keeps the sine counter exact in `f64`.
const MAX_SEED: u64 = 2_147_483_647;

/// Inputs to [`generate_seed_phrase`]. Everything environmental is supplied
/// by the caller; nothing here reads storage or the system clock.
#[derive(Debug, Clone)]
pub struct SeedContext {
    pub version: u32,
    pub name: String,
    /// Persisted per-user random value, usually drawn once from [`USER_SEED_RANGE`].
    pub user_seed: i64,
    pub unix_time_secs: i64,
    pub timezone: String,
    pub languages: Vec<String>,
}

impl SeedContext {
    /// Context stamped with the current system time.
    pub fn now(version: u32, name: impl Into<String>, user_seed: i64) -> Self {
        let unix_time_secs = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs() as i64)
            .unwrap_or_default();
        Self {
            version,
            name: name.into(),
            user_seed,
            unix_time_secs,
            timezone: String::new(),
            languages: Vec::new(),
        }
    }
}

/// Uniform integer in `min..=max`, redrawn while it equals `last`.
///
/// A single-value range returns that value even if it equals `last`, and a
/// reversed range collapses to `min`.
pub fn random_int<R: Rng>(rng: &mut R, min: i64, max: i64, last: Option<i64>) -> i64 {
    if max <= min {
        return min;
    }
    loop {
        let value = rng.random_range(min..=max);
        if Some(value) != last {
            return value;
        }
    }
}

/// Builds the phrase for the current game day: version, UTC day, zero-based
/// month and year, then timezone, languages, user seed and name, with every
/// non-alphanumeric character removed.
pub fn generate_seed_phrase(ctx: &SeedContext) -> String {
    let days = (ctx.unix_time_secs - DAY_ROLLOVER_SECS).div_euclid(86_400);
    let (year, month, day) = civil_from_days(days);

    let languages = if ctx.languages.is_empty() {
        "en".to_string()
    } else {
        ctx.languages.join(",")
    };

    let raw = format!(
        "{}{}{}{}{}{}{}{}",
        ctx.version,
        day,
        month - 1,
        year,
        ctx.timezone,
        languages,
        ctx.user_seed,
        ctx.name
    );
    raw.chars().filter(char::is_ascii_alphanumeric).collect()
}

/// Folds a phrase into a shuffle seed in `1..=2147483647` (FNV-1a, reduced).
pub fn seed_from_phrase(phrase: &str) -> i64 {
    let mut hash: u64 = 0xcbf2_9ce4_8422_2325;
    for byte in phrase.bytes() {
        hash ^= u64::from(byte);
        hash = hash.wrapping_mul(0x0100_0000_01b3);
    }
    (hash % MAX_SEED + 1) as i64
}

// Days since 1970-01-01 to (year, month 1..=12, day 1..=31), proleptic Gregorian.
fn civil_from_days(days: i64) -> (i64, u32, u32) {
    let z = days + 719_468;
    let era = z.div_euclid(146_097);
    let doe = z.rem_euclid(146_097);
    let yoe = (doe - doe / 1460 + doe / 36_524 - doe / 146_096) / 365;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let day = (doy - (153 * mp + 2) / 5 + 1) as u32;
    let month = (if mp < 10 { mp + 3 } else { mp - 9 }) as u32;
    let year = yoe + era * 400 + i64::from(month <= 2);
    (year, month, day)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn context(unix_time_secs: i64) -> SeedContext {
        SeedContext {
            version: 3,
            name: "streamer".into(),
            user_seed: 4242,
            unix_time_secs,
            timezone: "Europe/Warsaw".into(),
            languages: vec!["en-US".into(), "pl".into()],
        }
    }

    #[test]
    fn test_civil_from_days() {
        assert_eq!(civil_from_days(0), (1970, 1, 1));
        assert_eq!(civil_from_days(19_792), (2024, 3, 10));
        assert_eq!(civil_from_days(-1), (1969, 12, 31));
    }

    #[test]
    fn test_phrase_after_rollover() {
        // 2024-03-10 16:00 UTC
        assert_eq!(generate_seed_phrase(&context(1_710_086_400)), "31022024EuropeWarsawenUSpl4242streamer");
    }

    #[test]
    fn test_phrase_before_rollover_uses_previous_day() {
        // 2024-03-10 15:28:59 UTC
        assert_eq!(generate_seed_phrase(&context(1_710_084_539)), "3922024EuropeWarsawenUSpl4242streamer");
        // 2024-01-01 03:00 UTC belongs to the last game day of 2023
        assert_eq!(generate_seed_phrase(&context(1_704_078_000)), "331112023EuropeWarsawenUSpl4242streamer");
    }

    #[test]
    fn test_phrase_defaults_language() {
        let mut ctx = context(1_710_086_400);
        ctx.languages.clear();
        ctx.timezone.clear();
        assert_eq!(generate_seed_phrase(&ctx), "31022024en4242streamer");
    }

    #[test]
    fn test_seed_from_phrase() {
        assert_eq!(seed_from_phrase("abc"), 1_400_937_345);
        assert_eq!(seed_from_phrase(""), 470_244_594);
        assert_eq!(seed_from_phrase("abc"), seed_from_phrase("abc"));
    }

    #[test]
    fn test_random_int_avoids_last() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            let v = random_int(&mut rng, 1, 3, Some(2));
            assert!(v == 1 || v == 3, "got {v}");
        }
        assert_eq!(random_int(&mut rng, 5, 5, Some(5)), 5);
        let drawn = random_int(&mut rng, *USER_SEED_RANGE.start(), *USER_SEED_RANGE.end(), None);
        assert!(USER_SEED_RANGE.contains(&drawn));
    }
}
