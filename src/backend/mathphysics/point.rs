use super::unit::Meter;


#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point3D {
    pub x: Meter,
    pub y: Meter,
    pub z: Meter,
}

impl Point3D {
    #[must_use]
    pub fn new(x: Meter, y: Meter, z: Meter) -> Self {
        Self { x, y, z }
    }

    #[must_use]
    pub fn distance_to(&self, other: &Self) -> Meter {
        (
            (self.x - other.x).powi(2) +
            (self.y - other.y).powi(2) +
            (self.z - other.z).powi(2)
        ).sqrt()
    }
}
