//! Filter policies for efficient key existence checking.
//!
//! A storage engine builds one filter per set of keys written into a level and
//! stores the returned bytes alongside its data blocks. Before reading a block
//! it asks the filter whether the key could be there at all.

pub mod bloom;

pub use bloom::{theoretical_false_positive_rate, BlobFormat, BloomFilterPolicy, BloomFilterView};

use crate::error::Result;

/// Filter policy trait for building and probing filter blobs.
pub trait FilterPolicy: Send + Sync {
    /// Name of the policy, stored next to filter blocks so that a reader can
    /// tell whether it understands them.
    fn name(&self) -> &'static str;

    /// Append a filter summarizing `keys` to `dst`, sized for `level`.
    ///
    /// Bytes already in `dst` are left untouched.
    fn create_filter(&self, keys: &[&[u8]], level: usize, dst: &mut Vec<u8>) -> Result<()>;

    /// Check if `key` may be in the set summarized by `filter`.
    ///
    /// Returns `false` only if the key is definitely absent.
    fn key_may_match(&self, key: &[u8], filter: &[u8]) -> bool;
}

/// Check `key` against a Bloom filter blob without a policy instance.
///
/// The blob carries its own probe count, so no configuration is needed.
pub fn key_may_match(key: &[u8], filter: &[u8]) -> bool {
    BloomFilterView::new(filter).may_contain(key)
}
