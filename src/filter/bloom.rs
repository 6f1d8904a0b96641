//! Bloom Filter policy.
//!
//! A space-efficient probabilistic data structure used to test whether a key
//! is a member of a set. False positive matches are possible, but false
//! negatives are not.
//!
//! Filter layout:
//! ```text
//! [bit array: ceil(n * bits_per_key / 8) bytes][probe count: 1 byte]
//! ```
//! Bit `p` lives in byte `p / 8` at bit offset `p % 8`. The trailing probe
//! count makes each filter self-describing, so filters built under one
//! configuration remain readable under another.

use crate::config::{FilterConfig, MAX_PROBES};
use crate::error::{Error, Result};
use crate::filter::FilterPolicy;
use crate::hash::bloom_hash;

/// Policy name shared with LevelDB-compatible engines.
const POLICY_NAME: &str = "leveldb.BuiltinBloomFilter2";

/// Second hash for double hashing: the first rotated right by 17 bits.
///
/// See Kirsch and Mitzenmacher, "Less Hashing, Same Performance" (2006).
#[inline]
fn probe_delta(h: u32) -> u32 {
    h.rotate_right(17)
}

/// BloomFilterPolicy builds per-level Bloom filters.
///
/// # Example
/// ```
/// use levelbloom::filter::{BloomFilterPolicy, FilterPolicy};
/// use levelbloom::FilterConfig;
///
/// let policy = BloomFilterPolicy::new(FilterConfig::new(vec![10, 10, 4]));
///
/// let mut block = Vec::new();
/// policy.create_filter(&[b"key1", b"key2"], 0, &mut block).unwrap();
///
/// assert!(policy.key_may_match(b"key1", &block));
/// assert!(policy.key_may_match(b"key2", &block));
/// // key3 might return true (false positive) or false
/// ```
#[derive(Debug, Clone)]
pub struct BloomFilterPolicy {
    config: FilterConfig,
}

impl BloomFilterPolicy {
    /// Create a policy over an immutable per-level configuration.
    pub fn new(config: FilterConfig) -> Self {
        Self { config }
    }

    /// The configuration filters are built with.
    pub fn config(&self) -> &FilterConfig {
        &self.config
    }
}

impl FilterPolicy for BloomFilterPolicy {
    fn name(&self) -> &'static str {
        POLICY_NAME
    }

    /// Append a filter for `keys` to `dst`.
    ///
    /// Sizing is `keys.len() * bits_per_key` rounded up to whole bytes. When
    /// that is zero bits (no keys, or a level with zero bits per key) only the
    /// probe count byte is appended and the filter never matches.
    fn create_filter(&self, keys: &[&[u8]], level: usize, dst: &mut Vec<u8>) -> Result<()> {
        let (bits_per_key, num_probes) = match (
            self.config.bits_per_key(level),
            self.config.probes(level),
        ) {
            (Some(bits), Some(k)) => (bits, k),
            _ => {
                return Err(Error::invalid_argument(format!(
                    "level {} out of range ({} levels configured)",
                    level,
                    self.config.num_levels()
                )))
            }
        };

        let bytes = match keys
            .len()
            .checked_mul(bits_per_key)
            .and_then(|bits| bits.checked_add(7))
        {
            Some(bits) => bits / 8,
            None => {
                return Err(Error::invalid_argument(format!(
                    "filter for {} keys at {} bits per key overflows",
                    keys.len(),
                    bits_per_key
                )))
            }
        };

        log::trace!("Creating filter for {} keys at level {}", keys.len(), level);

        let bits = bytes * 8;

        let init_size = dst.len();
        dst.resize(init_size + bytes, 0);
        dst.push(num_probes);

        if bits == 0 {
            return Ok(());
        }

        let array = &mut dst[init_size..init_size + bytes];
        for key in keys {
            let mut h = bloom_hash(key);
            let delta = probe_delta(h);
            for _ in 0..num_probes {
                let bitpos = h as usize % bits;
                array[bitpos / 8] |= 1 << (bitpos % 8);
                h = h.wrapping_add(delta);
            }
        }

        Ok(())
    }

    fn key_may_match(&self, key: &[u8], filter: &[u8]) -> bool {
        BloomFilterView::new(filter).may_contain(key)
    }
}

/// How a filter blob is interpreted, decided by its length and trailing byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlobFormat {
    /// Shorter than two bytes. Never matches.
    Empty,
    /// Trailing byte above the probe limit, reserved for other encodings.
    /// Always matches.
    Reserved(u8),
    /// A Bloom filter with its embedded probe count.
    Bloom {
        /// Number of probes per key.
        num_probes: u8,
        /// Number of bits in the bit array.
        num_bits: usize,
    },
}

impl BlobFormat {
    /// Classify a filter blob.
    pub fn of(filter: &[u8]) -> Self {
        let len = filter.len();
        if len < 2 {
            return BlobFormat::Empty;
        }

        let k = filter[len - 1];
        if k > MAX_PROBES {
            return BlobFormat::Reserved(k);
        }

        BlobFormat::Bloom {
            num_probes: k,
            num_bits: (len - 1) * 8,
        }
    }
}

/// Borrowed, read-only view of a filter blob.
///
/// Only what the blob itself carries is used; the reader's own configuration
/// plays no part in a lookup.
#[derive(Debug, Clone, Copy)]
pub struct BloomFilterView<'a> {
    data: &'a [u8],
    format: BlobFormat,
}

impl<'a> BloomFilterView<'a> {
    /// Wrap a filter blob.
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            format: BlobFormat::of(data),
        }
    }

    /// How this blob is interpreted.
    pub fn format(&self) -> BlobFormat {
        self.format
    }

    /// Embedded probe count, if this is a Bloom filter.
    pub fn num_probes(&self) -> Option<u8> {
        match self.format {
            BlobFormat::Bloom { num_probes, .. } => Some(num_probes),
            _ => None,
        }
    }

    /// Size of the bit array in bits, if this is a Bloom filter.
    pub fn num_bits(&self) -> Option<usize> {
        match self.format {
            BlobFormat::Bloom { num_bits, .. } => Some(num_bits),
            _ => None,
        }
    }

    /// Check if a key may exist in the set.
    ///
    /// Returns `true` if the key might exist (with possible false positives).
    /// Returns `false` if the key definitely does not exist.
    pub fn may_contain(&self, key: &[u8]) -> bool {
        let (num_probes, bits) = match self.format {
            BlobFormat::Empty => return false,
            BlobFormat::Reserved(_) => return true,
            BlobFormat::Bloom {
                num_probes,
                num_bits,
            } => (num_probes, num_bits),
        };

        let mut h = bloom_hash(key);
        let delta = probe_delta(h);
        for _ in 0..num_probes {
            let bitpos = h as usize % bits;
            if self.data[bitpos / 8] & (1 << (bitpos % 8)) == 0 {
                return false; // Definitely not present
            }
            h = h.wrapping_add(delta);
        }

        true
    }

    /// Estimate the false positive rate after inserting `num_keys` keys.
    ///
    /// p = (1 - e^(-kn/m))^k, where k = probes, n = keys, m = bits.
    /// An empty blob never matches (0.0); a reserved one always does (1.0).
    pub fn estimated_false_positive_rate(&self, num_keys: usize) -> f64 {
        match self.format {
            BlobFormat::Empty => 0.0,
            BlobFormat::Reserved(_) => 1.0,
            BlobFormat::Bloom {
                num_probes,
                num_bits,
            } => {
                if num_keys == 0 {
                    return 0.0;
                }
                let k = num_probes as f64;
                let n = num_keys as f64;
                let m = num_bits as f64;
                (1.0 - (-k * n / m).exp()).powf(k)
            }
        }
    }
}

/// Theoretical false positive rate for `bits_per_key` bits and `num_probes`
/// probes per key.
pub fn theoretical_false_positive_rate(bits_per_key: usize, num_probes: u8) -> f64 {
    if bits_per_key == 0 {
        return 1.0;
    }
    let k = num_probes as f64;
    (1.0 - (-k / bits_per_key as f64).exp()).powf(k)
}
