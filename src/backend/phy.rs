use super::mathphysics::{Decibel, Hertz, SignalDbm};


pub const DEFAULT_TX_POWER: SignalDbm       = SignalDbm::new(16.0206);
pub const DEFAULT_RX_SENSITIVITY: SignalDbm = SignalDbm::new(-82.0);

const CHANNEL_BANDWIDTH: Hertz   = 40e6;
const NOISE_FIGURE: Decibel      = 7.0;
const THERMAL_NOISE_DBM_PER_HZ: f64 = -174.0;


/// Signal and noise readings delivered with every packet reception event.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SignalNoiseDbm {
    pub signal: SignalDbm,
    pub noise: SignalDbm,
}


/// Transmission and reception parameters of one Wi-Fi radio. Both
/// endpoints of a trial share the same configuration.
#[derive(Clone, Copy, Debug)]
pub struct WifiPhy {
    pub tx_power: SignalDbm,
    pub tx_gain: Decibel,
    pub rx_gain: Decibel,
    pub rx_sensitivity: SignalDbm,
}

impl WifiPhy {
    #[must_use]
    pub fn new(
        tx_power: SignalDbm,
        tx_gain: Decibel,
        rx_gain: Decibel
    ) -> Self {
        Self {
            tx_power,
            tx_gain,
            rx_gain,
            rx_sensitivity: DEFAULT_RX_SENSITIVITY,
        }
    }

    /// Power radiated into the channel, antenna gain included.
    #[must_use]
    pub fn effective_tx_power(&self) -> SignalDbm {
        self.tx_power + self.tx_gain
    }

    /// Signal level seen by the receive chain for a given channel
    /// output power.
    #[must_use]
    pub fn received_signal(&self, rx_power: SignalDbm) -> SignalDbm {
        rx_power + self.rx_gain
    }

    #[must_use]
    pub fn receives(&self, signal: SignalDbm) -> bool {
        signal >= self.rx_sensitivity
    }

    #[must_use]
    pub fn noise_floor(&self) -> SignalDbm {
        SignalDbm::new(
            THERMAL_NOISE_DBM_PER_HZ
                + 10.0 * CHANNEL_BANDWIDTH.log10()
                + NOISE_FIGURE
        )
    }
}

impl Default for WifiPhy {
    fn default() -> Self {
        Self::new(DEFAULT_TX_POWER, 0.0, 0.0)
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gains_are_applied_on_both_sides() {
        let phy = WifiPhy::new(SignalDbm::new(10.0), 1.0, 1.0);

        assert_eq!(SignalDbm::new(11.0), phy.effective_tx_power());
        assert_eq!(
            SignalDbm::new(-74.0),
            phy.received_signal(SignalDbm::new(-75.0))
        );
    }

    #[test]
    fn reception_is_gated_by_sensitivity() {
        let phy = WifiPhy::new(SignalDbm::new(10.0), 1.0, 1.0);

        assert!(phy.receives(SignalDbm::new(-75.0)));
        assert!(phy.receives(DEFAULT_RX_SENSITIVITY));
        assert!(!phy.receives(SignalDbm::new(-82.1)));
    }

    #[test]
    fn noise_floor_for_a_40mhz_channel() {
        let noise = WifiPhy::default().noise_floor();

        assert!((noise.value() - -90.98).abs() < 0.01);
    }
}
