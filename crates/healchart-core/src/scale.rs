// File: crates/healchart-core/src/scale.rs
// Summary: Value-to-pixel scale transforms shared by every series renderer.

/// Maps a data value (percent or fixed heal) to a pixel coordinate.
pub trait Scale {
    fn map(&self, v: f64) -> f64;
}

impl<F> Scale for F
where
    F: Fn(f64) -> f64,
{
    #[inline]
    fn map(&self, v: f64) -> f64 {
        self(v)
    }
}

/// Linear map from `[d0, d1]` onto `[r0, r1]`. Ranges may be inverted (y axes).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LinearScale {
    pub d0: f64,
    pub d1: f64,
    pub r0: f64,
    pub r1: f64,
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        let mut s = Self { d0: domain.0, d1: domain.1, r0: range.0, r1: range.1 };
        if (s.d1 - s.d0).abs() < 1e-12 { s.d1 = s.d0 + 1.0; }
        s
    }

    #[inline]
    pub fn to_px(&self, v: f64) -> f64 {
        let span = self.d1 - self.d0;
        self.r0 + (v - self.d0) / span * (self.r1 - self.r0)
    }

    /// Pixel back to data value, e.g. to report the pointer position.
    #[inline]
    pub fn invert(&self, px: f64) -> f64 {
        let span = self.r1 - self.r0;
        if span.abs() < 1e-12 { return self.d0; }
        self.d0 + (px - self.r0) / span * (self.d1 - self.d0)
    }

    /// Widen the domain to round tick boundaries.
    pub fn nice(mut self, count: usize) -> Self {
        let step = tick_step(self.d0, self.d1, count);
        if step > 0.0 && step.is_finite() {
            self.d0 = (self.d0 / step).floor() * step;
            self.d1 = (self.d1 / step).ceil() * step;
        }
        self
    }

    /// Round tick values inside the domain, roughly `count` of them.
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        let (lo, hi) = if self.d0 <= self.d1 { (self.d0, self.d1) } else { (self.d1, self.d0) };
        let step = tick_step(lo, hi, count);
        if !(step > 0.0 && step.is_finite()) { return vec![lo]; }
        let first = (lo / step).ceil() as i64;
        let last = (hi / step).floor() as i64;
        (first..=last).map(|i| i as f64 * step).collect()
    }
}

impl Scale for LinearScale {
    #[inline]
    fn map(&self, v: f64) -> f64 {
        self.to_px(v)
    }
}

/// 1, 2 or 5 times a power of ten, close to `(hi - lo) / count`.
fn tick_step(lo: f64, hi: f64, count: usize) -> f64 {
    let span = (hi - lo).abs();
    if span <= 0.0 || count == 0 { return 0.0; }
    let raw = span / count as f64;
    let power = 10f64.powf(raw.log10().floor());
    let err = raw / power;
    let factor = if err >= 7.07 { 10.0 } else if err >= 3.16 { 5.0 } else if err >= 1.41 { 2.0 } else { 1.0 };
    factor * power
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_and_inverts_flipped_range() {
        let y = LinearScale::new((0.0, 100.0), (500.0, 100.0));
        assert_eq!(y.to_px(0.0), 500.0);
        assert_eq!(y.to_px(100.0), 100.0);
        assert_eq!(y.invert(300.0), 50.0);
    }

    #[test]
    fn nice_rounds_domain_outward() {
        let s = LinearScale::new((0.0, 1437.0), (0.0, 1.0)).nice(10);
        assert_eq!((s.d0, s.d1), (0.0, 1600.0));
        assert_eq!(s.ticks(10), vec![0.0, 200.0, 400.0, 600.0, 800.0, 1000.0, 1200.0, 1400.0, 1600.0]);
    }

    #[test]
    fn degenerate_domain_is_widened() {
        let s = LinearScale::new((5.0, 5.0), (0.0, 10.0));
        assert_eq!(s.d1, 6.0);
        assert!(s.to_px(5.5).is_finite());
    }

    #[test]
    fn closures_are_scales() {
        let double = |v: f64| v * 2.0;
        let s: &dyn Scale = &double;
        assert_eq!(s.map(21.0), 42.0);
    }
}
