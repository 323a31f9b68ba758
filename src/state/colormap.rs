/// Number of entries in the "plasma" lookup table.
pub const LUT_SIZE: usize = 256;

/// Known "plasma" colors keyed by their lookup-table index, ascending.
///
/// Entries between two anchors are interpolated linearly.
pub const PLASMA: [(usize, [u8; 3]); 23] = [
    (0, [0x0d, 0x08, 0x87]),
    (28, [0x46, 0x03, 0x9f]),
    (32, [0x4c, 0x02, 0xa1]),
    (36, [0x53, 0x02, 0xa3]),
    (57, [0x72, 0x01, 0xa8]),
    (64, [0x7e, 0x03, 0xa8]),
    (73, [0x8b, 0x0a, 0xa5]),
    (85, [0x9c, 0x17, 0x9e]),
    (96, [0xa9, 0x23, 0x95]),
    (109, [0xb8, 0x32, 0x89]),
    (113, [0xbd, 0x37, 0x86]),
    (128, [0xcc, 0x47, 0x78]),
    (142, [0xd8, 0x57, 0x6b]),
    (146, [0xdb, 0x5c, 0x68]),
    (160, [0xe6, 0x6c, 0x5c]),
    (170, [0xed, 0x79, 0x53]),
    (182, [0xf4, 0x88, 0x49]),
    (192, [0xf8, 0x95, 0x40]),
    (198, [0xfb, 0x9f, 0x3a]),
    (219, [0xfe, 0xbd, 0x2a]),
    (224, [0xfd, 0xc5, 0x27]),
    (227, [0xfd, 0xca, 0x26]),
    (255, [0xf0, 0xf9, 0x21]),
];

/// Color of lookup-table entry `index` (clamped to the table).
pub fn plasma_entry(index: usize) -> [u8; 3] {
    let index = index.min(LUT_SIZE - 1);
    let upper = PLASMA
        .iter()
        .position(|&(i, _)| i >= index)
        .unwrap_or(PLASMA.len() - 1);
    let (hi_idx, hi) = PLASMA[upper];
    if hi_idx == index || upper == 0 {
        return hi;
    }

    let (lo_idx, lo) = PLASMA[upper - 1];
    let frac = (index - lo_idx) as f64 / (hi_idx - lo_idx) as f64;
    let mix = |c: usize| (lo[c] as f64 + (hi[c] as f64 - lo[c] as f64) * frac).round() as u8;
    [mix(0), mix(1), mix(2)]
}

/// Sample the ramp at `t` in [0, 1]; `t` selects entry `floor(t * 256)`, the top end
/// mapping to the last entry.
pub fn plasma(t: f64) -> [u8; 3] {
    let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.0 };
    plasma_entry((t * LUT_SIZE as f64).floor() as usize)
}

/// Color for column `index` of `count`, spreading the columns over the whole ramp.
pub fn color_for_index(index: usize, count: usize) -> [u8; 3] {
    if count <= 1 {
        return plasma(0.0);
    }
    plasma(index as f64 / (count - 1) as f64)
}
