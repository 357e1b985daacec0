use std::f64::consts::PI;

use rand::Rng;
use rand_distr::{Distribution, Gamma};

use super::mathphysics::{
    dbm_to_milliwatts, milliwatts_to_dbm, wave_length_in_meters, Decibel,
    Hertz, Meter, Point3D, SignalDbm
};


// Free-space loss is evaluated at this distance for anything closer.
const FRIIS_MIN_DISTANCE: Meter = 0.5;

// Log-distance path loss exponents for the near, middle and far segments.
const NEAR_EXPONENT: f64   = 1.9;
const MIDDLE_EXPONENT: f64 = 3.8;
const FAR_EXPONENT: f64    = 3.8;


/// Propagation-loss model of the wireless channel. Exactly one model is
/// attached to the channel per trial, and each variant carries its own
/// parameter set.
#[derive(Clone, Debug, PartialEq)]
pub enum PropagationLossModel {
    Friis {
        frequency: Hertz,
        system_loss: f64,
    },
    FixedRss {
        rss: SignalDbm,
    },
    ThreeLogDistance {
        distance0: Meter,
        distance1: Meter,
        distance2: Meter,
        reference_loss: Decibel,
    },
    TwoRayGround {
        frequency: Hertz,
        min_distance: Meter,
        system_loss: f64,
        height_above_z: Meter,
    },
    Nakagami {
        distance1: Meter,
        distance2: Meter,
        m0: f64,
        m1: f64,
        m2: f64,
    },
}

impl PropagationLossModel {
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Friis { .. }            => "Friis",
            Self::FixedRss { .. }         => "FixedRSS",
            Self::ThreeLogDistance { .. } => "ThreeLogDistance",
            Self::TwoRayGround { .. }     => "TwoRayGround",
            Self::Nakagami { .. }         => "Nakagami",
        }
    }

    /// Received power at `rx` for a transmission from `tx`, gains excluded.
    pub fn rx_power<R: Rng>(
        &self,
        tx_power: SignalDbm,
        tx: &Point3D,
        rx: &Point3D,
        rng: &mut R
    ) -> SignalDbm {
        let distance = tx.distance_to(rx);

        match self {
            Self::Friis { frequency, system_loss } =>
                tx_power - friis_loss(distance, *frequency, *system_loss),
            Self::FixedRss { rss } => *rss,
            Self::ThreeLogDistance {
                distance0, distance1, distance2, reference_loss
            } => tx_power - three_log_distance_loss(
                distance,
                *distance0,
                *distance1,
                *distance2,
                *reference_loss
            ),
            Self::TwoRayGround {
                frequency, min_distance, system_loss, height_above_z
            } => two_ray_ground_rx_power(
                tx_power,
                tx,
                rx,
                *frequency,
                *min_distance,
                *system_loss,
                *height_above_z
            ),
            Self::Nakagami { distance1, distance2, m0, m1, m2 } =>
                nakagami_rx_power(
                    tx_power,
                    distance,
                    *distance1,
                    *distance2,
                    *m0,
                    *m1,
                    *m2,
                    rng
                ),
        }
    }
}


fn friis_loss(
    distance: Meter,
    frequency: Hertz,
    system_loss: f64
) -> Decibel {
    let distance = distance.max(FRIIS_MIN_DISTANCE);
    let wavelength = wave_length_in_meters(frequency);

    let numerator = wavelength * wavelength;
    let denominator =
        16.0 * PI * PI * distance * distance * system_loss;

    -10.0 * (numerator / denominator).log10()
}

fn three_log_distance_loss(
    distance: Meter,
    distance0: Meter,
    distance1: Meter,
    distance2: Meter,
    reference_loss: Decibel
) -> Decibel {
    if distance < distance0 {
        0.0
    } else if distance < distance1 {
        reference_loss
            + 10.0 * NEAR_EXPONENT * (distance / distance0).log10()
    } else if distance < distance2 {
        reference_loss
            + 10.0 * NEAR_EXPONENT * (distance1 / distance0).log10()
            + 10.0 * MIDDLE_EXPONENT * (distance / distance1).log10()
    } else {
        reference_loss
            + 10.0 * NEAR_EXPONENT * (distance1 / distance0).log10()
            + 10.0 * MIDDLE_EXPONENT * (distance2 / distance1).log10()
            + 10.0 * FAR_EXPONENT * (distance / distance2).log10()
    }
}

fn two_ray_ground_rx_power(
    tx_power: SignalDbm,
    tx: &Point3D,
    rx: &Point3D,
    frequency: Hertz,
    min_distance: Meter,
    system_loss: f64,
    height_above_z: Meter
) -> SignalDbm {
    let distance = tx.distance_to(rx);

    if distance <= min_distance {
        return tx_power;
    }

    let tx_height = tx.z + height_above_z;
    let rx_height = rx.z + height_above_z;
    let wavelength = wave_length_in_meters(frequency);

    // The plane-earth approximation only holds beyond the crossover
    // distance; free-space loss applies before it.
    let crossover = 4.0 * PI * tx_height * rx_height / wavelength;

    if distance < crossover {
        tx_power - friis_loss(distance, frequency, system_loss)
    } else {
        let gain = (tx_height * tx_height * rx_height * rx_height)
            / (distance.powi(4) * system_loss);

        tx_power + 10.0 * gain.log10()
    }
}

#[allow(clippy::too_many_arguments)]
fn nakagami_rx_power<R: Rng>(
    tx_power: SignalDbm,
    distance: Meter,
    distance1: Meter,
    distance2: Meter,
    m0: f64,
    m1: f64,
    m2: f64,
    rng: &mut R
) -> SignalDbm {
    let m = if distance < distance1 {
        m0
    } else if distance < distance2 {
        m1
    } else {
        m2
    };

    // Mean-preserving Gamma fading of the received power.
    let power_milliwatts = dbm_to_milliwatts(tx_power.value());
    let fading = Gamma::new(m, power_milliwatts / m)
        .expect("Nakagami shape and scale are positive");

    SignalDbm::new(milliwatts_to_dbm(fading.sample(rng)))
}
