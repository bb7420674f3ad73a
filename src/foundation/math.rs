const FNV_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

fn fnv1a(mut h: u64, bytes: &[u8]) -> u64 {
    for &b in bytes {
        h ^= u64::from(b);
        h = h.wrapping_mul(FNV_PRIME);
    }
    h
}

/// Stateless per-pixel hash in `[0, 1)`, used for deterministic speckle noise.
pub(crate) fn hash_unit(seed: u64, x: u32, y: u32) -> f64 {
    let h = fnv1a(seed ^ FNV_OFFSET, &x.to_le_bytes());
    let h = fnv1a(h, &y.to_le_bytes());
    // Top 53 bits map exactly onto an f64 mantissa.
    ((h >> 11) as f64) / ((1u64 << 53) as f64)
}

/// `x * y / 255`, rounded.
pub(crate) fn mul_div255(x: u16, y: u16) -> u8 {
    ((u32::from(x) * u32::from(y) + 127) / 255) as u8
}

pub(crate) fn unit_to_u8(v: f64) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
