pub use point::Point3D;
pub use strength::SignalDbm;
pub use unit::*;


pub mod point;
pub mod strength;
pub mod unit;


#[cfg(test)]
mod tests {
    use super::*;

    const ORIGIN: Point3D = Point3D { x: 0.0, y: 0.0, z: 0.0 };


    #[test]
    fn distance_to_another_point() {
        let some_point = Point3D::new(5.0, 0.0, 0.0);

        assert_eq!(0.0, ORIGIN.distance_to(&ORIGIN));
        assert_eq!(5.0, ORIGIN.distance_to(&some_point));
        assert_eq!(
            ORIGIN.distance_to(&some_point),
            some_point.distance_to(&ORIGIN)
        );
    }

    #[test]
    fn wavelength_at_wifi_frequencies() {
        let wavelength = wave_length_in_meters(5.18e9);

        assert!((wavelength - 0.0579).abs() < 1e-4);
    }

    #[test]
    fn dbm_milliwatt_conversion_roundtrip() {
        let milliwatts = dbm_to_milliwatts(10.0);

        assert!((milliwatts - 10.0).abs() < 1e-9);
        assert!((milliwatts_to_dbm(milliwatts) - 10.0).abs() < 1e-9);
        assert!((dbm_to_milliwatts(0.0) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn propagation_delay_is_distance_over_c() {
        let delay = propagation_delay_in_secs(SPEED_OF_LIGHT);

        assert!((delay - 1.0).abs() < 1e-12);
        assert_eq!(0.0, propagation_delay_in_secs(0.0));
    }
}
