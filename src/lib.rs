//! # levelbloom - Per-Level Bloom Filters for LSM-Tree Storage Engines
//!
//! A storage engine builds one filter for each set of keys it writes into a
//! level and stores the filter bytes next to the data. On lookup, the filter
//! answers "definitely absent" or "possibly present", skipping disk reads for
//! keys that cannot be there.
//!
//! ## Architecture
//!
//! - **Configuration**: target bits per key for each storage level, with the
//!   probe count derived once at startup
//! - **Filter Policy**: builds a filter blob for a level and probes blobs for
//!   keys
//! - **Filter View**: decodes a blob using only the probe count it carries, so
//!   filters built with older settings stay readable
//!
//! ## Example Usage
//!
//! ```rust
//! use levelbloom::{BloomFilterPolicy, FilterConfig, FilterOptions, FilterPolicy};
//!
//! # fn main() -> Result<(), levelbloom::Error> {
//! // Tighter filters on the upper levels
//! let options = FilterOptions::new().bits_per_key_per_level(vec![14, 12, 10, 10, 8, 8, 6]);
//! let policy = BloomFilterPolicy::new(FilterConfig::from_options(&options)?);
//!
//! let keys: [&[u8]; 3] = [b"apple", b"banana", b"cherry"];
//! let mut block = Vec::new();
//! policy.create_filter(&keys, 2, &mut block)?;
//!
//! assert!(policy.key_may_match(b"banana", &block));
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

// Module declarations
pub mod config;
pub mod error;
pub mod filter;
pub mod hash;

// Re-exports
pub use config::{FilterConfig, FilterOptions};
pub use error::{Error, Result};
pub use filter::{key_may_match, BloomFilterPolicy, BloomFilterView, FilterPolicy};
