//! Hash function shared by filter construction and lookup.
//!
//! This is the murmur-style 32-bit hash used by LevelDB. Filters written by
//! any engine using the same function and seed can be read here, and the
//! reverse.

/// Seed used for every Bloom filter hash. Build and query must agree.
pub const BLOOM_HASH_SEED: u32 = 0xbc9f1d34;

const M: u32 = 0xc6a4a793;
const R: u32 = 24;

/// Hash `data` with the given `seed`.
pub fn hash(data: &[u8], seed: u32) -> u32 {
    let mut h = seed ^ (data.len() as u32).wrapping_mul(M);

    let mut chunks = data.chunks_exact(4);
    for chunk in &mut chunks {
        let mut word = [0u8; 4];
        word.copy_from_slice(chunk);
        let w = u32::from_le_bytes(word);
        h = h.wrapping_add(w);
        h = h.wrapping_mul(M);
        h ^= h >> 16;
    }

    let rest = chunks.remainder();
    if rest.len() == 3 {
        h = h.wrapping_add((rest[2] as u32) << 16);
    }
    if rest.len() >= 2 {
        h = h.wrapping_add((rest[1] as u32) << 8);
    }
    if !rest.is_empty() {
        h = h.wrapping_add(rest[0] as u32);
        h = h.wrapping_mul(M);
        h ^= h >> R;
    }

    h
}

/// Hash a key for Bloom filter probing.
#[inline]
pub fn bloom_hash(key: &[u8]) -> u32 {
    hash(key, BLOOM_HASH_SEED)
}
