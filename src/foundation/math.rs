/// Hermite smoothstep; returns 0 for degenerate edges instead of dividing by zero.
pub(crate) fn smoothstep(edge0: f64, edge1: f64, x: f64) -> f64 {
    let span = edge1 - edge0;
    if span == 0.0 || !span.is_finite() {
        return if x >= edge1 { 1.0 } else { 0.0 };
    }
    let t = ((x - edge0) / span).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// `clamp` that maps NaN to `lo`.
pub(crate) fn clamp_finite(v: f64, lo: f64, hi: f64) -> f64 {
    if v.is_nan() { lo } else { v.clamp(lo, hi) }
}

pub(crate) fn fract(v: f64) -> f64 {
    v - v.floor()
}

/// Classic `fract(sin(k) * 43758.5453)` shader hash, keyed by cell index and time slice.
pub(crate) fn slice_hash(index: usize, slice: f64) -> f64 {
    let seed = (((index + 1) as f64) * 12.9898 + slice * 78.233).sin() * 43758.5453;
    fract(seed)
}

/// SplitMix64 finalizer.
pub(crate) fn mix64(mut z: u64) -> u64 {
    z = z.wrapping_add(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

/// Deterministic value in `[0, 1)` for `(seed, index, salt)`.
pub(crate) fn unit_hash(seed: u64, index: u64, salt: u64) -> f64 {
    let h = mix64(seed ^ mix64(index ^ mix64(salt)));
    // Top 53 bits map exactly onto the f64 mantissa.
    ((h >> 11) as f64) / ((1u64 << 53) as f64)
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
