//! Temperature conversion and display rounding.

const KELVIN_OFFSET: f64 = 273.15;

/// Number of decimals used when displaying a temperature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Precision {
    #[default]
    Tenths,
    Hundredths,
}

impl Precision {
    pub const fn decimals(self) -> usize {
        match self {
            Precision::Tenths => 1,
            Precision::Hundredths => 2,
        }
    }
}

pub fn kelvin_to_celsius(kelvin: f64) -> f64 {
    kelvin - KELVIN_OFFSET
}

/// Round half away from zero to `precision`.
pub fn round_to(value: f64, precision: Precision) -> f64 {
    let factor = 10f64.powi(precision.decimals() as i32);
    let rounded = (value * factor).round() / factor;
    // Avoid printing "-0.0".
    if rounded == 0.0 { 0.0 } else { rounded }
}

/// Kelvin to a Celsius string with exactly `precision` decimals, e.g. "27.0".
pub fn format_celsius(kelvin: f64, precision: Precision) -> String {
    let celsius = round_to(kelvin_to_celsius(kelvin), precision);
    format!("{:.*}", precision.decimals(), celsius)
}
