use std::fmt;
use std::ops;

use impl_ops::{
    _impl_binary_op_borrowed_borrowed, _impl_binary_op_borrowed_owned,
    _impl_binary_op_internal, _impl_binary_op_owned_borrowed,
    _impl_binary_op_owned_owned, _parse_binary_op, impl_op, impl_op_ex
};

use super::unit::Decibel;


/// Signal power level in dBm, as reported per received packet by the PHY.
#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd)]
pub struct SignalDbm(f64);

impl SignalDbm {
    #[must_use]
    pub const fn new(value: f64) -> Self {
        Self(value)
    }

    #[must_use]
    pub fn value(&self) -> f64 {
        self.0
    }
}

impl fmt::Display for SignalDbm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl_op_ex!(
    + |a: &SignalDbm, b: &Decibel| -> SignalDbm {
        SignalDbm(a.0 + b)
    }
);

impl_op_ex!(
    - |a: &SignalDbm, b: &Decibel| -> SignalDbm {
        SignalDbm(a.0 - b)
    }
);

impl_op_ex!(
    - |a: &SignalDbm, b: &SignalDbm| -> Decibel {
        a.0 - b.0
    }
);


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gain_and_loss_arithmetic() {
        let tx_power = SignalDbm::new(10.0);

        assert_eq!(SignalDbm::new(11.0), tx_power + 1.0);
        assert_eq!(SignalDbm::new(-36.0), tx_power - 46.0);
        assert_eq!(46.0, tx_power - SignalDbm::new(-36.0));
    }

    #[test]
    fn ordering_follows_power() {
        assert!(SignalDbm::new(-75.0) > SignalDbm::new(-82.0));
        assert!(SignalDbm::new(-90.0) < SignalDbm::new(-82.0));
    }
}
