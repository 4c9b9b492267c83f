pub(crate) fn mul_div255_u16(x: u16, y: u16) -> u16 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u16
}

pub(crate) fn mul_div255_u8(x: u16, y: u16) -> u8 {
    mul_div255_u16(x, y) as u8
}

pub(crate) fn add_sat_u8(a: u8, b: u8) -> u8 {
    a.saturating_add(b)
}

/// Euclidean remainder: the result lies in `[0, m)` for any finite `v` and `m > 0`.
pub fn wrap_mod(v: f64, m: f64) -> f64 {
    let r = ((v % m) + m) % m;
    // `(-tiny % m) + m` can round up to exactly `m`.
    if r >= m { 0.0 } else { r }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
