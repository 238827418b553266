//! Linear interpolation over animatable value types

use hearth_core::Bhs;

/// A value that supports linear interpolation toward another value
///
/// Implementors form a vector space for the purposes of animation: the
/// interpolated value is `start + (end - start) * fraction` for a fraction
/// in `[0, 1]`. Covers plain numeric brightness and component-wise color
/// triples.
pub trait Lerp: Copy {
    fn lerp(self, end: Self, fraction: f64) -> Self;
}

impl Lerp for f64 {
    fn lerp(self, end: Self, fraction: f64) -> Self {
        self + (end - self) * fraction
    }
}

impl Lerp for Bhs {
    fn lerp(self, end: Self, fraction: f64) -> Self {
        Bhs::new(
            lerp_channel(self.brightness as f64, end.brightness as f64, fraction) as u8,
            lerp_channel(self.hue as f64, end.hue as f64, fraction) as u16,
            lerp_channel(self.saturation as f64, end.saturation as f64, fraction) as u8,
        )
    }
}

fn lerp_channel(start: f64, end: f64, fraction: f64) -> f64 {
    (start + (end - start) * fraction).round()
}
