//! Easing curve evaluation.
//!
//! The wheel and needle curves are cubic Beziers in the CSS timing-function
//! form: control points pin the shape, `y_at` solves the parametric x for a
//! wall-clock progress and returns the eased progress.

use spindle_types::EasingKind;

/// Wheel deceleration: stays close to linear through the spin, then brakes
/// hard over the last stretch.
const WHEEL_STOP: CubicBezier = CubicBezier::new(0.4, 0.4, 0.15, 1.0);

/// Needle sweep: slow wind-up, fast middle, gentle finish.
const NEEDLE_SWEEP: CubicBezier = CubicBezier::new(0.42, 0.0, 0.58, 1.0);

/// Evaluate an easing curve at normalized time `t`.
///
/// Input is clamped to `[0, 1]`; every curve maps 0 to 0 and 1 to 1 and is
/// monotone in between, so playback can never overshoot its endpoints.
#[must_use]
pub fn ease(kind: EasingKind, t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    match kind {
        EasingKind::Linear => t,
        EasingKind::WheelStop => WHEEL_STOP.y_at(t),
        EasingKind::NeedleSweep => NEEDLE_SWEEP.y_at(t),
    }
}

/// Cubic Bezier through (0,0) and (1,1) with two control points.
#[derive(Debug, Clone, Copy)]
struct CubicBezier {
    x1: f64,
    y1: f64,
    x2: f64,
    y2: f64,
}

impl CubicBezier {
    const fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self { x1, y1, x2, y2 }
    }

    fn sample_x(&self, s: f64) -> f64 {
        bezier_component(self.x1, self.x2, s)
    }

    fn sample_y(&self, s: f64) -> f64 {
        bezier_component(self.y1, self.y2, s)
    }

    fn sample_x_derivative(&self, s: f64) -> f64 {
        let a = 1.0 + 3.0 * self.x1 - 3.0 * self.x2;
        let b = self.x2 - 2.0 * self.x1;
        let c = self.x1;
        3.0 * a * s * s + 6.0 * b * s + 3.0 * c
    }

    /// Eased progress for wall-clock progress `x` in `[0, 1]`.
    fn y_at(&self, x: f64) -> f64 {
        if x <= 0.0 {
            return 0.0;
        }
        if x >= 1.0 {
            return 1.0;
        }
        self.sample_y(self.solve_s(x))
    }

    /// Invert x(s) = x: Newton iterations, bisection when the derivative
    /// gets too flat to trust.
    fn solve_s(&self, x: f64) -> f64 {
        let mut s = x;
        for _ in 0..8 {
            let error = self.sample_x(s) - x;
            if error.abs() < 1e-7 {
                return s;
            }
            let slope = self.sample_x_derivative(s);
            if slope.abs() < 1e-6 {
                break;
            }
            s -= error / slope;
        }

        let (mut lo, mut hi) = (0.0_f64, 1.0_f64);
        s = x;
        for _ in 0..32 {
            let error = self.sample_x(s) - x;
            if error.abs() < 1e-7 {
                break;
            }
            if error > 0.0 {
                hi = s;
            } else {
                lo = s;
            }
            s = (lo + hi) / 2.0;
        }
        s
    }
}

/// One component of a cubic Bezier anchored at 0 and 1, at parameter `s`.
fn bezier_component(p1: f64, p2: f64, s: f64) -> f64 {
    let inv = 1.0 - s;
    3.0 * inv * inv * s * p1 + 3.0 * inv * s * s * p2 + s * s * s
}
