//! Brightness presets for pleasant light

use hearth_core::Bhs;

const DAYLIGHT_HUE: u16 = 34495;
const DAYLIGHT_SAT: u8 = 232;
const MOONLIGHT_HUE: u16 = 47000;
const MOONLIGHT_SAT: u8 = 255;

/// A pleasant daytime light at the given relative brightness
///
/// # Panics
///
/// Panics if `brightness` is outside `[0, 1]`.
pub fn daylight(brightness: f64) -> Bhs {
    Bhs::new(scale_brightness(brightness), DAYLIGHT_HUE, DAYLIGHT_SAT)
}

/// A pleasant light to sleep by at the given relative brightness
///
/// # Panics
///
/// Panics if `brightness` is outside `[0, 1]`.
pub fn moonlight(brightness: f64) -> Bhs {
    Bhs::new(scale_brightness(brightness), MOONLIGHT_HUE, MOONLIGHT_SAT)
}

fn scale_brightness(brightness: f64) -> u8 {
    assert!(
        (0.0..=1.0).contains(&brightness),
        "relative brightness must be in [0, 1], got {brightness}"
    );
    (255.0 * brightness).round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_daylight() {
        assert_eq!(daylight(1.0), Bhs::new(255, 34495, 232));
        assert_eq!(daylight(0.0), Bhs::new(0, 34495, 232));
        assert_eq!(daylight(0.5).brightness, 128);
    }

    #[test]
    fn test_moonlight() {
        assert_eq!(moonlight(1.0), Bhs::new(255, 47000, 255));
        assert_eq!(moonlight(0.0), Bhs::new(0, 47000, 255));
    }

    #[test]
    #[should_panic(expected = "relative brightness")]
    fn test_brightness_above_range_panics() {
        daylight(1.1);
    }

    #[test]
    #[should_panic(expected = "relative brightness")]
    fn test_brightness_below_range_panics() {
        moonlight(-0.1);
    }
}
