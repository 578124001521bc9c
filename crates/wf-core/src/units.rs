// wf-core/src/units.rs

use uom::si::f64::{Length as UomLength, Time as UomTime, Velocity as UomVelocity};

// Public canonical unit types (SI, f64)
pub type Length = UomLength;
pub type Time = UomTime;
pub type Velocity = UomVelocity;

#[inline]
pub fn km(v: f64) -> Length {
    use uom::si::length::kilometer;
    Length::new::<kilometer>(v)
}

#[inline]
pub fn kmph(v: f64) -> Velocity {
    use uom::si::velocity::kilometer_per_hour;
    Velocity::new::<kilometer_per_hour>(v)
}

#[inline]
pub fn minutes(v: f64) -> Time {
    use uom::si::time::minute;
    Time::new::<minute>(v)
}

#[inline]
pub fn as_minutes(t: Time) -> f64 {
    use uom::si::time::minute;
    t.get::<minute>()
}

/// Time to cover `distance` out and back at `speed`, in minutes.
///
/// Zero when either the distance or the speed is not positive.
pub fn round_trip_minutes(distance: Length, speed: Velocity) -> f64 {
    if distance.value <= 0.0 || speed.value <= 0.0 {
        return 0.0;
    }
    let t: Time = (distance * 2.0) / speed;
    as_minutes(t)
}

/// Fixed fireground conventions. These are the field-manual roundings, not the exact
/// SI conversions, so they are kept as plain numbers.
pub mod constants {
    /// Liters per US gallon.
    pub const L_PER_GAL: f64 = 3.785;
    /// Gallons of water per metric ton of tank capacity.
    pub const GAL_PER_TON: f64 = 264.0;
    /// Liters per metric ton of water.
    pub const L_PER_TON: f64 = 1000.0;
    /// psi per kgf/cm².
    pub const PSI_PER_KGF_CM2: f64 = 14.223;
    /// Equivalent inner diameter of a supply line (inch).
    pub const HOSE_D_INCH: f64 = 2.3;
    /// Coefficient of the closed-form discharge formula `Q = c·d²·√P` (gpm, inch, psi).
    pub const DISCHARGE_COEFF: f64 = 29.7;
    /// Flow of a 1.5-inch handline nozzle (gpm).
    pub const NOZZLE_15_GPM: f64 = 100.0;
    /// Flow of a 2.5-inch handline nozzle (gpm).
    pub const NOZZLE_25_GPM: f64 = 200.0;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors_smoke() {
        let _d = km(0.5);
        let _v = kmph(60.0);
        let _t = minutes(5.0);
    }

    #[test]
    fn minutes_round_trip() {
        assert!((as_minutes(minutes(7.5)) - 7.5).abs() < 1e-12);
    }

    #[test]
    fn round_trip_is_two_legs() {
        let t = round_trip_minutes(km(0.5), kmph(60.0));
        assert!((t - 1.0).abs() < 1e-9);

        let t = round_trip_minutes(km(10.0), kmph(40.0));
        assert!((t - 30.0).abs() < 1e-9);
    }

    #[test]
    fn round_trip_degenerate_is_zero() {
        assert_eq!(round_trip_minutes(km(0.0), kmph(60.0)), 0.0);
        assert_eq!(round_trip_minutes(km(1.0), kmph(0.0)), 0.0);
        assert_eq!(round_trip_minutes(km(-1.0), kmph(60.0)), 0.0);
    }
}
