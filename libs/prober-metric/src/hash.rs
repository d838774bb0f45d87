use std::hash::Hasher;

use crate::metric::Tag;

const OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
const PRIME: u64 = 0x0000_0100_0000_01b3;

/// 64-bit FNV-1a.
///
/// The identity hash is persisted by downstream aggregators, so the
/// constants and byte order here must never change.
#[derive(Debug, Clone, Copy)]
pub struct Fnv1a(u64);

impl Default for Fnv1a {
    fn default() -> Self {
        Self(OFFSET_BASIS)
    }
}

impl Hasher for Fnv1a {
    fn write(&mut self, bytes: &[u8]) {
        for &b in bytes {
            self.0 ^= u64::from(b);
            self.0 = self.0.wrapping_mul(PRIME);
        }
    }

    fn finish(&self) -> u64 {
        self.0
    }
}

/// Identity hash over `name` and `tags`.
///
/// Layout: `name \n (key \n value \n)*`. `tags` must already be sorted by
/// key, which holds for every `Metric`. Fields, time and kind are excluded.
pub fn hash_id(name: &str, tags: &[Tag]) -> u64 {
    let mut h = Fnv1a::default();
    h.write(name.as_bytes());
    h.write(b"\n");
    for tag in tags {
        h.write(tag.key.as_bytes());
        h.write(b"\n");
        h.write(tag.value.as_bytes());
        h.write(b"\n");
    }
    h.finish()
}
