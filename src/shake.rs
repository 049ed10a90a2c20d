//! Screen-shake effect timing.
//!
//! Pure model of the jitter: the browser display samples [`ShakeEffect::frame`]
//! from a ~16 ms interval and clears the interval once it reports
//! [`ShakeFrame::Done`].

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ShakeFrame {
    Offset { x: f64, y: f64 },
    Done,
}

impl ShakeFrame {
    pub fn css_transform(&self) -> String {
        match self {
            ShakeFrame::Offset { x, y } => format!("translate({x:.2}px, {y:.2}px)"),
            ShakeFrame::Done => "translate(0px, 0px)".to_string(),
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct ShakeEffect {
    started_ms: f64,
    duration_ms: f64,
    intensity_px: f64,
}

impl ShakeEffect {
    pub fn new(started_ms: f64, duration_ms: f64, intensity_px: f64) -> Self {
        Self {
            started_ms,
            duration_ms,
            intensity_px,
        }
    }

    /// Restart the shake window from `now_ms`.
    pub fn restart(&mut self, now_ms: f64) {
        self.started_ms = now_ms;
    }

    pub fn is_done(&self, now_ms: f64) -> bool {
        now_ms - self.started_ms >= self.duration_ms
    }

    /// `rx`/`ry` are unit samples in `[0, 1)`; offsets land in
    /// `[-intensity/2, intensity/2)`.
    pub fn frame(&self, now_ms: f64, rx: f64, ry: f64) -> ShakeFrame {
        if self.is_done(now_ms) {
            return ShakeFrame::Done;
        }
        ShakeFrame::Offset {
            x: (rx - 0.5) * self.intensity_px,
            y: (ry - 0.5) * self.intensity_px,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offsets_bounded_by_intensity() {
        let fx = ShakeEffect::new(0.0, 100.0, 10.0);
        assert_eq!(fx.frame(16.0, 0.0, 0.5), ShakeFrame::Offset { x: -5.0, y: 0.0 });
        match fx.frame(32.0, 0.999, 0.25) {
            ShakeFrame::Offset { x, y } => {
                assert!(x < 5.0 && x > 4.9);
                assert!((y + 2.5).abs() < 1e-9);
            }
            ShakeFrame::Done => panic!("shake ended early"),
        }
    }

    #[test]
    fn ends_after_duration_and_restarts() {
        let mut fx = ShakeEffect::new(1_000.0, 100.0, 10.0);
        assert!(!fx.is_done(1_099.0));
        assert_eq!(fx.frame(1_100.0, 0.3, 0.3), ShakeFrame::Done);
        fx.restart(1_100.0);
        assert!(!fx.is_done(1_150.0));
    }

    #[test]
    fn done_resets_transform() {
        assert_eq!(ShakeFrame::Done.css_transform(), "translate(0px, 0px)");
        assert_eq!(
            ShakeFrame::Offset { x: 1.5, y: -2.0 }.css_transform(),
            "translate(1.50px, -2.00px)"
        );
    }
}
