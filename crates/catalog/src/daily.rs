//! Date-seeded selection for the daily pick.
//!
//! The generator is pinned: SHA-256 of the `YYYY-MM-DD` string seeds a
//! ChaCha8 stream, which first draws the page in `1..=5` and then the
//! sample indices. Any implementation following the same recipe picks the
//! same movies for the same date.

use std::ops::RangeInclusive;

use chrono::NaiveDate;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use sha2::{Digest, Sha256};

pub const DAILY_PAGES: RangeInclusive<u32> = 1..=5;
pub const DAILY_PICKS: usize = 3;

/// Format used both as the seed input and as the `date` field of the response.
pub fn date_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

pub struct DailyPicker {
    rng: ChaCha8Rng,
}

impl DailyPicker {
    pub fn for_date(date: NaiveDate) -> Self {
        Self::from_key(&date_key(date))
    }

    pub fn from_key(key: &str) -> Self {
        let digest = Sha256::digest(key.as_bytes());
        let mut seed = [0u8; 32];
        seed.copy_from_slice(&digest);
        Self {
            rng: ChaCha8Rng::from_seed(seed),
        }
    }

    /// Upstream page to fetch. Must be drawn before [`Self::sample_indices`].
    pub fn page(&mut self) -> u32 {
        self.rng.gen_range(DAILY_PAGES)
    }

    /// Up to [`DAILY_PICKS`] distinct indices into a page of `len` results,
    /// in the order the generator produced them.
    pub fn sample_indices(&mut self, len: usize) -> Vec<usize> {
        rand::seq::index::sample(&mut self.rng, len, len.min(DAILY_PICKS)).into_vec()
    }
}

/// Pick items out of `items` by index, keeping the index order.
pub fn take_indices<T>(items: Vec<T>, indices: &[usize]) -> Vec<T> {
    let mut slots: Vec<Option<T>> = items.into_iter().map(Some).collect();
    indices
        .iter()
        .filter_map(|&i| slots.get_mut(i).and_then(Option::take))
        .collect()
}
