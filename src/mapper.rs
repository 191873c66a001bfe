/// Maps a raw sensor reading to a source intensity level.
///
/// The reading saturates at `hard_cap`; anything non-finite (the sensor
/// endpoint is not under our control) degrades to the idle floor rather
/// than erroring. The result is always in `[idle_floor, max_level]`, so a
/// small flame stays visible even with nobody on the sensor.
pub fn map_reading(reading: f64, hard_cap: f64, idle_floor: u8, max_level: u8) -> u8 {
    let floor = idle_floor.min(max_level);
    let ratio = (reading / hard_cap).clamp(0.0, 1.0);
    let level = (ratio * f64::from(max_level)).round();
    if !level.is_finite() {
        return floor;
    }
    (level as u8).clamp(floor, max_level)
}

#[cfg(test)]
mod tests {
    use super::*;

    const CAP: f64 = 150.0;
    const FLOOR: u8 = 5;
    const MAX: u8 = 44;

    #[test]
    fn zero_reading_holds_idle_floor() {
        assert_eq!(map_reading(0.0, CAP, FLOOR, MAX), FLOOR);
    }

    #[test]
    fn cap_reading_saturates() {
        assert_eq!(map_reading(CAP, CAP, FLOOR, MAX), MAX);
    }

    #[test]
    fn over_cap_does_not_overshoot() {
        assert_eq!(map_reading(CAP * 2.0, CAP, FLOOR, MAX), MAX);
        assert_eq!(map_reading(f64::INFINITY, CAP, FLOOR, MAX), MAX);
    }

    #[test]
    fn invalid_reading_degrades_to_floor() {
        assert_eq!(map_reading(f64::NAN, CAP, FLOOR, MAX), FLOOR);
        assert_eq!(map_reading(0.0, 0.0, FLOOR, MAX), FLOOR);
    }

    #[test]
    fn negative_reading_clamps_to_floor() {
        assert_eq!(map_reading(-30.0, CAP, FLOOR, MAX), FLOOR);
    }

    #[test]
    fn midpoint_rounds_to_nearest_level() {
        assert_eq!(map_reading(75.0, CAP, FLOOR, MAX), 22);
    }

    #[test]
    fn floor_above_max_is_capped() {
        assert_eq!(map_reading(0.0, CAP, 10, 3), 3);
    }
}
