//! MurmurHash3, x86 32-bit variant.

/// Hashes `data` with MurmurHash3 x86_32 and returns the signed view,
/// matching the common `i32` convention of mmh3 bindings.
pub fn murmur3_32_signed(data: &[u8], seed: u32) -> i32 {
    mur3::murmurhash3_x86_32(data, seed) as i32
}
