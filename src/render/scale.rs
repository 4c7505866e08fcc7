//! Minimal value-to-pixel scales for chart layout.

/// Maps a numeric domain onto a pixel range linearly. A degenerate domain
/// maps everything to the range start.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    domain: (f64, f64),
    range: (f64, f64),
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        LinearScale { domain, range }
    }

    pub fn apply(&self, value: f64) -> f64 {
        let span = self.domain.1 - self.domain.0;
        if span == 0.0 {
            return self.range.0;
        }
        let t = (value - self.domain.0) / span;
        self.range.0 + t * (self.range.1 - self.range.0)
    }

    /// Evenly spaced domain values for axis ticks, endpoints included.
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        if count < 2 {
            return vec![self.domain.0];
        }
        let step = (self.domain.1 - self.domain.0) / (count - 1) as f64;
        (0..count).map(|i| self.domain.0 + step * i as f64).collect()
    }
}

/// Divides a pixel range into equal bands with inner padding, one band per
/// discrete domain entry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BandScale {
    len: usize,
    range: (f64, f64),
    padding: f64,
}

impl BandScale {
    /// `padding` is the fraction of each step left empty (0.0..1.0).
    pub fn new(len: usize, range: (f64, f64), padding: f64) -> Self {
        BandScale {
            len,
            range,
            padding,
        }
    }

    fn step(&self) -> f64 {
        if self.len == 0 {
            return 0.0;
        }
        (self.range.1 - self.range.0) / self.len as f64
    }

    /// Left edge of band `index`.
    pub fn position(&self, index: usize) -> f64 {
        self.range.0 + self.step() * index as f64 + self.step() * self.padding / 2.0
    }

    pub fn bandwidth(&self) -> f64 {
        self.step() * (1.0 - self.padding)
    }

    /// Center of band `index`.
    pub fn center(&self, index: usize) -> f64 {
        self.position(index) + self.bandwidth() / 2.0
    }
}

/// Places `len` points evenly across a range with half-step outer padding,
/// like the point scale the line chart's x axis uses.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointScale {
    len: usize,
    range: (f64, f64),
}

impl PointScale {
    pub fn new(len: usize, range: (f64, f64)) -> Self {
        PointScale { len, range }
    }

    pub fn position(&self, index: usize) -> f64 {
        if self.len == 0 {
            return self.range.0;
        }
        let step = (self.range.1 - self.range.0) / self.len as f64;
        self.range.0 + step * (index as f64 + 0.5)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear_scale() {
        let s = LinearScale::new((0.0, 100.0), (0.0, 200.0));
        assert_eq!(s.apply(0.0), 0.0);
        assert_eq!(s.apply(50.0), 100.0);
        assert_eq!(s.apply(100.0), 200.0);
    }

    #[test]
    fn test_linear_scale_inverted_range() {
        // y axes run top-down
        let s = LinearScale::new((0.0, 10.0), (100.0, 0.0));
        assert_eq!(s.apply(10.0), 0.0);
        assert_eq!(s.apply(0.0), 100.0);
    }

    #[test]
    fn test_linear_degenerate_domain() {
        let s = LinearScale::new((5.0, 5.0), (0.0, 100.0));
        assert_eq!(s.apply(5.0), 0.0);
    }

    #[test]
    fn test_band_scale_fills_range() {
        let s = BandScale::new(4, (0.0, 100.0), 0.2);
        assert_eq!(s.bandwidth(), 20.0);
        assert_eq!(s.position(0), 2.5);
        assert!(s.position(3) + s.bandwidth() <= 100.0);
    }

    #[test]
    fn test_point_scale_centers() {
        let s = PointScale::new(2, (0.0, 100.0));
        assert_eq!(s.position(0), 25.0);
        assert_eq!(s.position(1), 75.0);
    }
}
