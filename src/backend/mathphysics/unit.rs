pub type Second = f64;
pub type Meter = f64;
pub type MeterPerSecond = f64;
pub type Hertz = f64;
pub type Decibel = f64;
pub type BitsPerSecond = f64;


pub const SPEED_OF_LIGHT: MeterPerSecond = 299_792_458.0;


#[must_use]
pub fn wave_length_in_meters(frequency: Hertz) -> Meter {
    SPEED_OF_LIGHT / frequency
}

#[must_use]
pub fn propagation_delay_in_secs(distance: Meter) -> Second {
    distance / SPEED_OF_LIGHT
}

#[must_use]
pub fn dbm_to_milliwatts(dbm: Decibel) -> f64 {
    10.0_f64.powf(dbm / 10.0)
}

#[must_use]
pub fn milliwatts_to_dbm(milliwatts: f64) -> Decibel {
    10.0 * milliwatts.log10()
}
