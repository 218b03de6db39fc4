use flow_core::SetupError;

/// Easing curve applied by [`Timeline`](super::Timeline).
///
/// The exponent variants shape the curve: `EaseIn(2.0)` is quadratic, larger
/// values bend harder.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum BlendFunc {
    #[default]
    Linear,
    /// Smoothstep (cubic Hermite with zero tangents).
    Cubic,
    EaseIn(f32),
    EaseOut(f32),
    EaseInOut(f32),
}

impl BlendFunc {
    pub(crate) fn validate(self) -> Result<Self, SetupError> {
        match self {
            Self::EaseIn(exp) | Self::EaseOut(exp) | Self::EaseInOut(exp)
                if exp == 0.0 || !exp.is_finite() =>
            {
                Err(SetupError::InvalidValue {
                    what: "blend exponent",
                    reason: "must be finite and non-zero",
                })
            }
            _ => Ok(self),
        }
    }

    /// Maps linear progress `alpha` in `[0, 1]` onto the curve.
    pub fn apply(self, alpha: f32) -> f32 {
        let alpha = alpha.clamp(0.0, 1.0);
        match self {
            Self::Linear => alpha,
            Self::Cubic => alpha * alpha * (3.0 - 2.0 * alpha),
            Self::EaseIn(exp) => alpha.powf(exp),
            Self::EaseOut(exp) => alpha.powf(exp.recip()),
            Self::EaseInOut(exp) => {
                if alpha < 0.5 {
                    0.5 * (2.0 * alpha).powf(exp)
                } else {
                    1.0 - 0.5 * (2.0 * (1.0 - alpha)).powf(exp)
                }
            }
        }
    }

    /// Blends between `start` and `stop`.
    pub fn interpolate<T: Lerp>(self, start: T, stop: T, alpha: f32) -> T {
        start.lerp(stop, self.apply(alpha))
    }
}

/// Values a [`Timeline`](super::Timeline) can blend.
///
/// Implemented for `f32` and for fixed-size `f32` arrays, which cover vectors
/// (`[f32; 3]`) and colours (`[f32; 4]`).
pub trait Lerp: Copy + PartialEq + 'static {
    fn lerp(self, stop: Self, alpha: f32) -> Self;
}

impl Lerp for f32 {
    fn lerp(self, stop: Self, alpha: f32) -> Self {
        self + (stop - self) * alpha
    }
}

impl<const N: usize> Lerp for [f32; N] {
    fn lerp(self, stop: Self, alpha: f32) -> Self {
        std::array::from_fn(|i| self[i].lerp(stop[i], alpha))
    }
}
