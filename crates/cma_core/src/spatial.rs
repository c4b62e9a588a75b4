//! Spatial helpers for positions reported in game units.

pub type Vec3 = nalgebra::Vector3<f64>;

/// One game unit is 0.75 inch.
/// https://developer.valvesoftware.com/wiki/Dimensions
const UNITS_TO_METERS: f64 = 0.01905;

/// Distance between two points in meters.
pub fn distance_meters(a: &Vec3, b: &Vec3) -> f64 {
    (a - b).norm() * UNITS_TO_METERS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance_is_scaled_to_meters() {
        let a = Vec3::new(0.0, 0.0, 0.0);
        let b = Vec3::new(100.0, 0.0, 0.0);
        assert!((distance_meters(&a, &b) - 1.905).abs() < 1e-9);
    }
}
