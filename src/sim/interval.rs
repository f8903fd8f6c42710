/// A time window over a plotted series, in seconds.
///
/// Not required to be ordered on creation (the user may drag backward);
/// consumers must call `normalized()` before using the bounds.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Interval {
    pub start_s: f64,
    pub end_s: f64,
}

impl Interval {
    pub fn new(start_s: f64, end_s: f64) -> Self {
        Self { start_s, end_s }
    }

    /// Ordered copy with `start_s <= end_s`. Idempotent.
    pub fn normalized(&self) -> Self {
        Self {
            start_s: self.start_s.min(self.end_s),
            end_s: self.start_s.max(self.end_s),
        }
    }

    pub fn width_s(&self) -> f64 {
        (self.end_s - self.start_s).abs()
    }

    pub fn contains(&self, t: f64) -> bool {
        let n = self.normalized();
        t >= n.start_s && t <= n.end_s
    }

    /// Clamp both bounds into `[domain.start_s, domain.end_s]`.
    pub fn clamp_to(&self, domain: Interval) -> Self {
        let d = domain.normalized();
        Self {
            start_s: self.start_s.clamp(d.start_s, d.end_s),
            end_s: self.end_s.clamp(d.start_s, d.end_s),
        }
    }
}
