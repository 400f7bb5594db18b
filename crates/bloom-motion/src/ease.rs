//! Easing curves.

use std::f32::consts::PI;

/// Maps linear progress `t` in `[0, 1]` to eased progress.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Ease {
    /// Constant velocity.
    Linear,
    /// Half a cosine wave; slow at both ends.
    SineInOut,
    /// Quadratic acceleration.
    Power1In,
    /// Quadratic deceleration.
    Power1Out,
    /// Cubic deceleration.
    Power2Out,
    /// Quartic deceleration.
    Power3Out,
    /// `cubic-bezier(0.42, 0, 0.58, 1)`.
    EaseInOut,
    /// CSS-style cubic bezier through `(0, 0)`, `(x1, y1)`, `(x2, y2)`, `(1, 1)`.
    CubicBezier(f32, f32, f32, f32),
}

impl Ease {
    /// Apply the curve. Input is clamped to `[0, 1]`.
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Ease::Linear => t,
            Ease::SineInOut => -((PI * t).cos() - 1.0) / 2.0,
            Ease::Power1In => t * t,
            Ease::Power1Out => 1.0 - (1.0 - t).powi(2),
            Ease::Power2Out => 1.0 - (1.0 - t).powi(3),
            Ease::Power3Out => 1.0 - (1.0 - t).powi(4),
            Ease::EaseInOut => cubic_bezier(0.42, 0.0, 0.58, 1.0, t),
            Ease::CubicBezier(x1, y1, x2, y2) => cubic_bezier(x1, y1, x2, y2, t),
        }
    }
}

fn bezier_axis(a1: f32, a2: f32, s: f32) -> f32 {
    let inv = 1.0 - s;
    3.0 * inv * inv * s * a1 + 3.0 * inv * s * s * a2 + s * s * s
}

fn bezier_axis_slope(a1: f32, a2: f32, s: f32) -> f32 {
    let inv = 1.0 - s;
    3.0 * inv * inv * a1 + 6.0 * inv * s * (a2 - a1) + 3.0 * s * s * (1.0 - a2)
}

/// Solve the curve's x(s) = t for s, then return y(s).
fn cubic_bezier(x1: f32, y1: f32, x2: f32, y2: f32, t: f32) -> f32 {
    if t <= 0.0 {
        return 0.0;
    }
    if t >= 1.0 {
        return 1.0;
    }

    // Newton-Raphson first; fall back to bisection on flat slopes.
    let mut s = t;
    for _ in 0..8 {
        let err = bezier_axis(x1, x2, s) - t;
        if err.abs() < 1e-5 {
            return bezier_axis(y1, y2, s);
        }
        let slope = bezier_axis_slope(x1, x2, s);
        if slope.abs() < 1e-6 {
            break;
        }
        s = (s - err / slope).clamp(0.0, 1.0);
    }

    let (mut lo, mut hi) = (0.0_f32, 1.0_f32);
    s = t;
    for _ in 0..32 {
        let x = bezier_axis(x1, x2, s);
        if (x - t).abs() < 1e-5 {
            break;
        }
        if x < t {
            lo = s;
        } else {
            hi = s;
        }
        s = (lo + hi) / 2.0;
    }
    bezier_axis(y1, y2, s)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Ease; 8] = [
        Ease::Linear,
        Ease::SineInOut,
        Ease::Power1In,
        Ease::Power1Out,
        Ease::Power2Out,
        Ease::Power3Out,
        Ease::EaseInOut,
        Ease::CubicBezier(0.22, 1.0, 0.36, 1.0),
    ];

    #[test]
    fn test_endpoints_are_fixed() {
        for ease in ALL {
            assert!(ease.apply(0.0).abs() < 1e-4, "{ease:?} at 0");
            assert!((ease.apply(1.0) - 1.0).abs() < 1e-4, "{ease:?} at 1");
        }
    }

    #[test]
    fn test_input_is_clamped() {
        assert_eq!(Ease::Power1In.apply(-3.0), 0.0);
        assert_eq!(Ease::Power1In.apply(7.0), 1.0);
    }

    #[test]
    fn test_sine_in_out_is_symmetric() {
        assert!((Ease::SineInOut.apply(0.5) - 0.5).abs() < 1e-5);
        let a = Ease::SineInOut.apply(0.2);
        let b = Ease::SineInOut.apply(0.8);
        assert!((a + b - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_linear_bezier_matches_linear() {
        let ease = Ease::CubicBezier(0.25, 0.25, 0.75, 0.75);
        for i in 0..=10 {
            let t = i as f32 / 10.0;
            assert!((ease.apply(t) - t).abs() < 1e-3);
        }
    }

    #[test]
    fn test_out_curves_lead_linear() {
        for ease in [Ease::Power1Out, Ease::Power2Out, Ease::Power3Out] {
            assert!(ease.apply(0.3) > 0.3);
        }
        assert!(Ease::Power1In.apply(0.3) < 0.3);
        // Snappy digit curve is nearly done halfway through.
        assert!(Ease::CubicBezier(0.22, 1.0, 0.36, 1.0).apply(0.5) > 0.85);
    }

    #[test]
    fn test_monotonic() {
        for ease in ALL {
            let mut previous = 0.0;
            for i in 1..=100 {
                let value = ease.apply(i as f32 / 100.0);
                assert!(value + 1e-4 >= previous, "{ease:?} dipped at {i}");
                previous = value;
            }
        }
    }
}
