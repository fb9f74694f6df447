// rf-core/src/units.rs

use uom::si::f64::{
    Energy as UomEnergy, Power as UomPower, ThermodynamicTemperature as UomThermodynamicTemperature,
    Time as UomTime,
};

// Public canonical unit types (SI, f64)
pub type Energy = UomEnergy;
pub type Power = UomPower;
pub type Temperature = UomThermodynamicTemperature;
pub type Time = UomTime;

#[inline]
pub fn celsius(v: f64) -> Temperature {
    use uom::si::thermodynamic_temperature::degree_celsius;
    Temperature::new::<degree_celsius>(v)
}

#[inline]
pub fn w(v: f64) -> Power {
    use uom::si::power::watt;
    Power::new::<watt>(v)
}

#[inline]
pub fn joules(v: f64) -> Energy {
    use uom::si::energy::joule;
    Energy::new::<joule>(v)
}

#[inline]
pub fn s(v: f64) -> Time {
    use uom::si::time::second;
    Time::new::<second>(v)
}

/// Energy in kilowatt-hours, the unit appliance consumption is quoted in.
#[inline]
pub fn to_kwh(e: Energy) -> f64 {
    use uom::si::energy::kilowatt_hour;
    e.get::<kilowatt_hour>()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn celsius_is_offset_from_kelvin() {
        use uom::si::thermodynamic_temperature::kelvin;
        let t = celsius(-18.0);
        assert!((t.get::<kelvin>() - 255.15).abs() < 1e-9);
    }

    #[test]
    fn one_kilowatt_hour() {
        let e = joules(3.6e6);
        assert!((to_kwh(e) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn constructors_smoke() {
        let _p = w(100.0);
        assert_eq!(s(60.0), s(30.0) + s(30.0));
    }
}
