use randomize::PCG32;

/// Generate a pseudorandom seed for the PRNG.
pub fn generate_seed() -> (u64, u64) {
    use byteorder::{ByteOrder, NativeEndian};
    use getrandom::getrandom;

    let mut seed = [0_u8; 16];

    if let Err(err) = getrandom(&mut seed) {
        log::warn!("getrandom failed ({err}), falling back to the clock");
        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_nanos())
            .unwrap_or_default();
        NativeEndian::write_u128(&mut seed, nanos);
    }

    (
        NativeEndian::read_u64(&seed[0..8]),
        NativeEndian::read_u64(&seed[8..16]),
    )
}

/// Uniform random helpers over a PCG32 stream.
pub struct Dice {
    rng: PCG32,
}

impl Dice {
    pub fn new() -> Self {
        Self::from_seed(generate_seed())
    }

    pub fn from_seed(seed: (u64, u64)) -> Self {
        Self { rng: seed.into() }
    }

    /// Integer in `lo..=hi`. The bounds may come in either order.
    pub fn int(&mut self, lo: i64, hi: i64) -> i64 {
        let (lo, hi) = if lo <= hi { (lo, hi) } else { (hi, lo) };
        let span = hi.abs_diff(lo).wrapping_add(1);
        if span == 0 {
            return self.next_u64() as i64;
        }
        // draws above the last whole multiple of `span` would favour low values
        if let Ok(span) = u32::try_from(span) {
            let zone = u32::MAX - u32::MAX % span;
            loop {
                let v = self.rng.next_u32();
                if v < zone {
                    return lo.wrapping_add(i64::from(v % span));
                }
            }
        }
        let zone = u64::MAX - u64::MAX % span;
        loop {
            let v = self.next_u64();
            if v < zone {
                return lo.wrapping_add((v % span) as i64);
            }
        }
    }

    fn next_u64(&mut self) -> u64 {
        (u64::from(self.rng.next_u32()) << 32) | u64::from(self.rng.next_u32())
    }

    /// Float in `lo..hi`.
    pub fn float(&mut self, lo: f64, hi: f64) -> f64 {
        let unit = randomize::f32_half_open_right(self.rng.next_u32()) as f64;
        lo + (hi - lo) * unit
    }

    pub fn index(&mut self, len: usize) -> usize {
        debug_assert!(len > 0);
        self.int(0, len as i64 - 1) as usize
    }

    pub fn pick<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        if items.is_empty() {
            return None;
        }
        items.get(self.index(items.len()))
    }
}

impl Default for Dice {
    fn default() -> Self {
        Self::new()
    }
}
