#[derive(Clone, Copy, Debug)]
pub struct SeededRng {
    state: u32,
}

impl SeededRng {
    pub fn new(seed: u32) -> Self {
        Self {
            state: if seed == 0 { 0xDEAD_BEEF } else { seed },
        }
    }

    pub fn state(&self) -> u32 {
        self.state
    }

    pub fn next(&mut self) -> u32 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.state = x;
        self.state
    }

    /// Uniform in [0, 1).
    pub fn next_f64(&mut self) -> f64 {
        self.next() as f64 / 4_294_967_296.0
    }

    /// Uniform in [min, max).
    pub fn next_range_f64(&mut self, min: f64, max: f64) -> f64 {
        debug_assert!(max > min);
        min + self.next_f64() * (max - min)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_seed_is_remapped() {
        let mut a = SeededRng::new(0);
        let mut b = SeededRng::new(0xDEAD_BEEF);
        assert_eq!(a.next(), b.next());
    }

    #[test]
    fn float_draws_stay_in_range() {
        let mut rng = SeededRng::new(0x1234_5678);
        for _ in 0..1_000 {
            let value = rng.next_range_f64(-1.5, 1.5);
            assert!((-1.5..1.5).contains(&value));
        }
    }
}
