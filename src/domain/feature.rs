//! Feature descriptors for the solar power forecasting model.
//!
//! The table order is the column order the network was trained with.

use serde::Serialize;

/// Number of model input dimensions.
pub const FEATURE_COUNT: usize = 20;

/// Resolution of every control in the form.
pub const STEP: f64 = 0.01;

/// How a feature is edited in the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ControlKind {
    /// Bounded continuous slider
    Slider,
    /// Free-typed bounded numeric entry
    NumericEntry,
}

impl ControlKind {
    /// Pick the control kind for a feature name.
    ///
    /// Precipitation, snowfall and cloud cover readings are typed in, the rest are slid.
    #[must_use]
    pub fn for_feature(name: &str) -> Self {
        if name.contains("total_precipitation_sfc")
            || name.contains("snowfall_amount_sfc")
            || name.contains("cloud_cover")
        {
            Self::NumericEntry
        } else {
            Self::Slider
        }
    }
}

/// Static metadata for one model input dimension.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FeatureDescriptor {
    pub name: &'static str,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub control: ControlKind,
}

impl FeatureDescriptor {
    const fn slider(name: &'static str, min: f64, max: f64, mean: f64) -> Self {
        Self {
            name,
            min,
            max,
            mean,
            control: ControlKind::Slider,
        }
    }

    const fn entry(name: &'static str, min: f64, max: f64, mean: f64) -> Self {
        Self {
            name,
            min,
            max,
            mean,
            control: ControlKind::NumericEntry,
        }
    }

    /// Human-readable label, e.g. `Temperature 2 M Above Gnd`.
    #[must_use]
    pub fn label(&self) -> String {
        humanize(self.name)
    }

    /// Whether `value` lies within `[min, max]`.
    #[must_use]
    pub fn contains(&self, value: f64) -> bool {
        (self.min..=self.max).contains(&value)
    }

    /// Round to the control step, then clamp into range.
    #[must_use]
    pub fn snap(&self, value: f64) -> f64 {
        round_to_step(value).clamp(self.min, self.max)
    }

    /// Coarse adjustment step: 1% of the range, never below [`STEP`].
    #[must_use]
    pub fn coarse_step(&self) -> f64 {
        round_to_step((self.max - self.min) / 100.0).max(STEP)
    }
}

/// Round to two decimals.
#[must_use]
pub fn round_to_step(value: f64) -> f64 {
    (value / STEP).round() * STEP
}

/// Replace underscores with spaces and title-case each word.
///
/// A letter is upper-cased when it follows a non-letter and lower-cased otherwise,
/// so `MSL` becomes `Msl` and `900_mb` becomes `900 Mb`.
#[must_use]
pub fn humanize(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut prev_is_letter = false;
    for c in name.chars() {
        let c = if c == '_' { ' ' } else { c };
        if c.is_alphabetic() {
            if prev_is_letter {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_is_letter = true;
        } else {
            out.push(c);
            prev_is_letter = false;
        }
    }
    out
}

/// Model input features, in training order.
pub static FEATURES: [FeatureDescriptor; FEATURE_COUNT] = [
    FeatureDescriptor::slider("temperature_2_m_above_gnd", -5.35, 34.90, 15.07),
    FeatureDescriptor::slider("relative_humidity_2_m_above_gnd", 7.00, 100.00, 51.36),
    FeatureDescriptor::slider("mean_sea_level_pressure_MSL", 997.50, 1046.80, 1019.34),
    FeatureDescriptor::entry("total_precipitation_sfc", 0.00, 3.20, 0.03),
    FeatureDescriptor::entry("snowfall_amount_sfc", 0.00, 1.68, 0.00),
    FeatureDescriptor::entry("total_cloud_cover_sfc", 0.00, 100.00, 34.06),
    FeatureDescriptor::entry("high_cloud_cover_high_cld_lay", 0.00, 100.00, 14.46),
    FeatureDescriptor::entry("medium_cloud_cover_mid_cld_lay", 0.00, 100.00, 20.02),
    FeatureDescriptor::entry("low_cloud_cover_low_cld_lay", 0.00, 100.00, 21.37),
    FeatureDescriptor::slider("shortwave_radiation_backwards_sfc", 0.00, 952.30, 387.76),
    FeatureDescriptor::slider("wind_speed_10_m_above_gnd", 0.00, 23.36, 6.00),
    FeatureDescriptor::slider("wind_direction_10_m_above_gnd", 0.54, 360.00, 195.08),
    FeatureDescriptor::slider("wind_speed_80_m_above_gnd", 0.00, 66.88, 18.98),
    FeatureDescriptor::slider("wind_direction_80_m_above_gnd", 1.12, 360.00, 191.17),
    FeatureDescriptor::slider("wind_speed_900_mb", 0.00, 61.11, 16.36),
    FeatureDescriptor::slider("wind_direction_900_mb", 1.12, 360.00, 192.45),
    FeatureDescriptor::slider("wind_gust_10_m_above_gnd", 0.72, 84.96, 20.58),
    FeatureDescriptor::slider("angle_of_incidence", 3.76, 121.64, 50.84),
    FeatureDescriptor::slider("zenith", 17.73, 128.42, 59.98),
    FeatureDescriptor::slider("azimuth", 54.38, 289.05, 169.17),
];

/// Feature names in training order.
#[must_use]
pub fn feature_names() -> Vec<&'static str> {
    FEATURES.iter().map(|d| d.name).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_means_within_bounds() {
        for d in FEATURES.iter() {
            assert!(d.min < d.max, "{}: empty range", d.name);
            assert!(d.contains(d.mean), "{}: mean outside range", d.name);
        }
    }

    #[test]
    fn test_control_kind_matches_rule() {
        for d in FEATURES.iter() {
            assert_eq!(d.control, ControlKind::for_feature(d.name), "{}", d.name);
        }
        let entries = FEATURES
            .iter()
            .filter(|d| d.control == ControlKind::NumericEntry)
            .count();
        assert_eq!(entries, 6);
    }

    #[test]
    fn test_humanize_labels() {
        assert_eq!(humanize("temperature_2_m_above_gnd"), "Temperature 2 M Above Gnd");
        assert_eq!(
            humanize("mean_sea_level_pressure_MSL"),
            "Mean Sea Level Pressure Msl"
        );
        assert_eq!(humanize("wind_speed_900_mb"), "Wind Speed 900 Mb");
        assert_eq!(humanize("zenith"), "Zenith");
    }

    #[test]
    fn test_snap_rounds_and_clamps() {
        let d = FEATURES[0];
        assert!((d.snap(15.074) - 15.07).abs() < 1e-9);
        assert!((d.snap(-100.0) - d.min).abs() < f64::EPSILON);
        assert!((d.snap(100.0) - d.max).abs() < f64::EPSILON);
    }

    #[test]
    fn test_coarse_step() {
        // precipitation: 3.20 / 100 = 0.032 -> 0.03
        assert!((FEATURES[3].coarse_step() - 0.03).abs() < 1e-9);
        // pressure: 49.3 / 100 = 0.493 -> 0.49
        assert!((FEATURES[2].coarse_step() - 0.49).abs() < 1e-9);
    }

    #[test]
    fn test_feature_names_order() {
        let names = feature_names();
        assert_eq!(names.len(), FEATURE_COUNT);
        assert_eq!(names[0], "temperature_2_m_above_gnd");
        assert_eq!(names[19], "azimuth");
    }
}
