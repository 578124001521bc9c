//! Physical conventions the engine's formulas are written against.

use serde::{Deserialize, Serialize};
use wf_core::units::constants;

/// Unit conversions and hydraulic coefficients used by every formula.
///
/// The defaults are the fireground roundings from [`wf_core::units::constants`]. A
/// different hose or unit convention is a different instance of this struct, the
/// formulas stay the same.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HydraulicConstants {
    pub l_per_gal: f64,
    pub gal_per_ton: f64,
    pub l_per_ton: f64,
    pub psi_per_kgf_cm2: f64,
    pub hose_d_inch: f64,
    pub discharge_coeff: f64,
    pub nozzle_15_gpm: f64,
    pub nozzle_25_gpm: f64,
}

impl Default for HydraulicConstants {
    fn default() -> Self {
        Self {
            l_per_gal: constants::L_PER_GAL,
            gal_per_ton: constants::GAL_PER_TON,
            l_per_ton: constants::L_PER_TON,
            psi_per_kgf_cm2: constants::PSI_PER_KGF_CM2,
            hose_d_inch: constants::HOSE_D_INCH,
            discharge_coeff: constants::DISCHARGE_COEFF,
            nozzle_15_gpm: constants::NOZZLE_15_GPM,
            nozzle_25_gpm: constants::NOZZLE_25_GPM,
        }
    }
}

impl HydraulicConstants {
    /// Theoretical flow of one supply line at `pressure_kgf_cm2` (gpm).
    ///
    /// ```text
    /// Q = c · d² · √(P · psi_per_kgf_cm2)
    /// ```
    pub fn line_flow_gpm(&self, pressure_kgf_cm2: f64) -> f64 {
        let p_psi = pressure_kgf_cm2 * self.psi_per_kgf_cm2;
        let d = self.hose_d_inch;
        self.discharge_coeff * d * d * p_psi.sqrt()
    }

    #[inline]
    pub fn tons_to_gal(&self, tons: f64) -> f64 {
        tons * self.gal_per_ton
    }

    #[inline]
    pub fn tons_to_liters(&self, tons: f64) -> f64 {
        tons * self.l_per_ton
    }

    #[inline]
    pub fn liters_to_gal(&self, liters: f64) -> f64 {
        liters / self.l_per_gal
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_flow_at_three_kgf() {
        let c = HydraulicConstants::default();
        let expected = 29.7 * 2.3 * 2.3 * (3.0_f64 * 14.223).sqrt();
        assert!((c.line_flow_gpm(3.0) - expected).abs() < 1e-9);
        assert!((c.line_flow_gpm(3.0) - 1026.3).abs() < 0.1);
    }

    #[test]
    fn line_flow_zero_pressure() {
        assert_eq!(HydraulicConstants::default().line_flow_gpm(0.0), 0.0);
    }

    #[test]
    fn conversions() {
        let c = HydraulicConstants::default();
        assert_eq!(c.tons_to_gal(10.0), 2640.0);
        assert_eq!(c.tons_to_liters(2.0), 2000.0);
        assert!((c.liters_to_gal(3785.0) - 1000.0).abs() < 1e-9);
    }

    #[test]
    fn swapped_hose_scales_with_diameter_squared() {
        let narrow = HydraulicConstants::default();
        let wide = HydraulicConstants {
            hose_d_inch: narrow.hose_d_inch * 2.0,
            ..narrow
        };
        let ratio = wide.line_flow_gpm(5.0) / narrow.line_flow_gpm(5.0);
        assert!((ratio - 4.0).abs() < 1e-9);
    }
}
