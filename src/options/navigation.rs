use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::animation::EasingFunction;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Navigation", inline)]
#[serde(default)]
/// Pan, inertia, orbit and boundary-correction tunables.
pub struct NavigationOptions {
    /// How long panning coasts after a drag ends. 0 stops immediately,
    /// 1 disables inertia.
    #[schemars(title = "Pan Inertia", range(min = 0.0, max = 1.0), extend("step" = 0.05))]
    pub inertia_translate: f64,
    /// Inertia factor for orbit spins.
    #[schemars(title = "Spin Inertia", range(min = 0.0, max = 1.0), extend("step" = 0.05))]
    pub inertia_spin: f64,
    /// Inertia factor for zoom drags.
    #[schemars(title = "Zoom Inertia", range(min = 0.0, max = 1.0), extend("step" = 0.05))]
    pub inertia_zoom: f64,
    /// Decayed movement length, in pixels, at which inertia stops.
    #[schemars(skip)]
    pub inertia_stop_threshold: f64,
    /// Length of the snap-back animation in milliseconds.
    #[schemars(title = "Snap-back Duration", range(min = 0, max = 10000), extend("step" = 100))]
    pub correction_duration_ms: u64,
    /// Easing of the snap-back animation.
    #[schemars(skip)]
    pub correction_easing: EasingFunction,
    /// Fraction of the map half extent added to the bound that triggers a
    /// snap-back.
    #[schemars(skip)]
    pub trigger_margin: f64,
    /// Fraction of the map half extent added to the bound the camera is
    /// hard-clamped to.
    #[schemars(skip)]
    pub clamp_margin: f64,
    /// Full turns per surface width of horizontal orbit drag.
    #[schemars(title = "Spin Rate", range(min = 0.1, max = 4.0), extend("step" = 0.05))]
    pub spin_rate: f64,
    /// Fraction of the view distance travelled per surface height of zoom
    /// drag.
    #[schemars(title = "Zoom Rate", range(min = 0.1, max = 8.0), extend("step" = 0.1))]
    pub zoom_rate: f64,
    /// Largest angle between the view direction and straight down.
    #[schemars(title = "Max Tilt", range(min = 0.0, max = 89.0), extend("step" = 1.0))]
    pub max_tilt_degrees: f64,
    /// Closest the camera may zoom to the point it orbits.
    #[schemars(skip)]
    pub min_zoom_distance: f64,
}

impl Default for NavigationOptions {
    fn default() -> Self {
        Self {
            inertia_translate: 0.9,
            inertia_spin: 0.9,
            inertia_zoom: 0.8,
            inertia_stop_threshold: 0.5,
            correction_duration_ms: 3000,
            correction_easing: EasingFunction::ExponentialOut,
            trigger_margin: 0.0,
            clamp_margin: 0.5,
            spin_rate: 1.0,
            zoom_rate: 2.0,
            max_tilt_degrees: 80.0,
            min_zoom_distance: 100.0,
        }
    }
}

impl NavigationOptions {
    /// Copy with every field forced into its valid range.
    #[must_use]
    pub fn sanitized(&self) -> Self {
        let defaults = Self::default();
        let mut out = self.clone();
        out.inertia_translate = unit(self.inertia_translate, defaults.inertia_translate, "inertia_translate");
        out.inertia_spin = unit(self.inertia_spin, defaults.inertia_spin, "inertia_spin");
        out.inertia_zoom = unit(self.inertia_zoom, defaults.inertia_zoom, "inertia_zoom");
        out.inertia_stop_threshold = non_negative(
            self.inertia_stop_threshold,
            defaults.inertia_stop_threshold,
            "inertia_stop_threshold",
        );
        out.trigger_margin = non_negative(self.trigger_margin, defaults.trigger_margin, "trigger_margin");
        out.clamp_margin = non_negative(self.clamp_margin, defaults.clamp_margin, "clamp_margin");
        out.spin_rate = non_negative(self.spin_rate, defaults.spin_rate, "spin_rate");
        out.zoom_rate = non_negative(self.zoom_rate, defaults.zoom_rate, "zoom_rate");
        out.min_zoom_distance =
            non_negative(self.min_zoom_distance, defaults.min_zoom_distance, "min_zoom_distance");
        if !(0.0..=89.0).contains(&self.max_tilt_degrees) {
            log::warn!(
                "max_tilt_degrees {} out of range, clamping",
                self.max_tilt_degrees
            );
            out.max_tilt_degrees = if self.max_tilt_degrees.is_nan() {
                defaults.max_tilt_degrees
            } else {
                self.max_tilt_degrees.clamp(0.0, 89.0)
            };
        }
        out
    }
}

fn unit(value: f64, fallback: f64, name: &str) -> f64 {
    if value.is_nan() {
        log::warn!("{name} is NaN, using {fallback}");
        return fallback;
    }
    if !(0.0..=1.0).contains(&value) {
        log::warn!("{name} {value} outside [0, 1], clamping");
    }
    value.clamp(0.0, 1.0)
}

fn non_negative(value: f64, fallback: f64, name: &str) -> f64 {
    if !value.is_finite() {
        log::warn!("{name} is not finite, using {fallback}");
        return fallback;
    }
    if value < 0.0 {
        log::warn!("{name} {value} is negative, clamping to 0");
        return 0.0;
    }
    value
}
