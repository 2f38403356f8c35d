//! Display-unit conversions, rendered to two decimal places as strings.

/// Kelvin to Celsius with the display convention's whole-number 273 offset
/// (not 273.15).
pub fn convert_kelvin_to_celsius(kelvin: f64) -> String {
    format!("{:.2}", kelvin - 273.0)
}

/// Hectopascal to millimetres of mercury.
pub fn convert_hpa_to_mm_hg(hpa: f64) -> String {
    format!("{:.2}", hpa * 0.750061561303)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kelvin_to_celsius_uses_the_273_offset() {
        assert_eq!(convert_kelvin_to_celsius(300.0), "27.00");
        // 273.15 would give "0.00" here; the display offset is 273 exactly.
        assert_eq!(convert_kelvin_to_celsius(273.15), "0.15");
        assert_eq!(convert_kelvin_to_celsius(273.0), "0.00");
    }

    #[test]
    fn kelvin_below_offset_goes_negative() {
        assert_eq!(convert_kelvin_to_celsius(263.5), "-9.50");
    }

    #[test]
    fn hpa_to_mm_hg() {
        assert_eq!(convert_hpa_to_mm_hg(1000.0), "750.06");
        assert_eq!(convert_hpa_to_mm_hg(1013.25), "760.00");
        assert_eq!(convert_hpa_to_mm_hg(0.0), "0.00");
    }
}
