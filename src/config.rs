// config.rs - Simulation parameters
//
// Keys match the names the host UI uses (`gravity`, `applyMass`, ...). Bad
// numbers are clamped rather than rejected; only unknown keys and non-finite
// values produce errors.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{Error, Result};

/// Highest trail opacity factor; 1.0 would never clear old frames
pub const MAX_MOTION_BLUR: f32 = 0.99;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SimConfig {
    /// Downward acceleration in pixels per second squared
    pub gravity: f32,
    /// Scale gravity by particle mass
    pub apply_mass: bool,
    /// Color channel decay per second
    pub fade_rate: f32,
    /// Cycle the active color through the spectrum
    pub auto_color: bool,
    /// Spray satellite particles around each spawn
    pub add_splatters: bool,
    /// Frequency of the white-mix cycle for new particles
    pub color_fade_damping: f32,
    /// Trail strength; the background is filled at 1 - this opacity
    pub motion_blur_factor: f32,
    /// Spectrum step frequency for automatic coloring
    pub auto_color_speed: f32,
    /// Let the wandering path draw when no pointer is active
    pub auto_move: bool,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            gravity: 100.0,
            apply_mass: true,
            fade_rate: 50.0,
            auto_color: true,
            add_splatters: true,
            color_fade_damping: 0.5,
            motion_blur_factor: 0.5,
            auto_color_speed: 0.5,
            auto_move: true,
        }
    }
}

impl SimConfig {
    /// Parse a (possibly partial) JSON object; missing keys keep defaults
    pub fn from_json(json: &str) -> Result<Self> {
        let cfg: SimConfig = serde_json::from_str(json)?;
        Ok(cfg.sanitized())
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Set one parameter by name. Boolean keys treat any non-zero value as true.
    pub fn set(&mut self, key: &str, value: f64) -> Result<()> {
        if !value.is_finite() {
            return Err(Error::InvalidValue { key: key.to_string(), value });
        }
        let v = value as f32;
        match key {
            "gravity" => self.gravity = v,
            "applyMass" => self.apply_mass = value != 0.0,
            "fadeRate" => self.fade_rate = v,
            "autoColor" => self.auto_color = value != 0.0,
            "addSplatters" => self.add_splatters = value != 0.0,
            "colorFadeDamping" => self.color_fade_damping = v,
            "motionBlurFactor" => self.motion_blur_factor = v,
            "autoColorSpeed" => self.auto_color_speed = v,
            "autoMove" => self.auto_move = value != 0.0,
            _ => return Err(Error::UnknownParam(key.to_string())),
        }
        *self = self.clone().sanitized();
        debug!(key, value, "parameter set");
        Ok(())
    }

    pub fn set_flag(&mut self, key: &str, on: bool) -> Result<()> {
        self.set(key, if on { 1.0 } else { 0.0 })
    }

    /// Clamp every field into its usable range
    pub fn sanitized(mut self) -> Self {
        let d = SimConfig::default();

        self.gravity = non_negative("gravity", self.gravity, d.gravity);
        self.fade_rate = non_negative("fadeRate", self.fade_rate, d.fade_rate);
        self.color_fade_damping = finite_or(self.color_fade_damping, d.color_fade_damping);
        self.auto_color_speed = finite_or(self.auto_color_speed, d.auto_color_speed);

        let blur = finite_or(self.motion_blur_factor, d.motion_blur_factor);
        self.motion_blur_factor = blur.clamp(0.0, MAX_MOTION_BLUR);
        if blur != self.motion_blur_factor {
            warn!(value = blur, "motionBlurFactor clamped");
        }
        self
    }
}

#[inline]
fn finite_or(v: f32, fallback: f32) -> f32 {
    if v.is_finite() { v } else { fallback }
}

fn non_negative(key: &str, v: f32, fallback: f32) -> f32 {
    let v = finite_or(v, fallback);
    if v < 0.0 {
        warn!(key, value = v, "negative parameter clamped to 0");
        return 0.0;
    }
    v
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_host_ui() {
        let c = SimConfig::default();
        assert_eq!(c.gravity, 100.0);
        assert!(c.apply_mass);
        assert_eq!(c.fade_rate, 50.0);
        assert!(c.auto_color && c.add_splatters && c.auto_move);
        assert_eq!(c.motion_blur_factor, 0.5);
    }

    #[test]
    fn set_by_key() {
        let mut c = SimConfig::default();
        c.set("gravity", 250.0).unwrap();
        c.set("applyMass", 0.0).unwrap();
        c.set_flag("addSplatters", false).unwrap();
        c.set("autoColorSpeed", 1.5).unwrap();
        assert_eq!(c.gravity, 250.0);
        assert!(!c.apply_mass);
        assert!(!c.add_splatters);
        assert_eq!(c.auto_color_speed, 1.5);
    }

    #[test]
    fn unknown_key_is_an_error() {
        let mut c = SimConfig::default();
        let err = c.set("wind", 3.0).unwrap_err();
        assert!(matches!(err, Error::UnknownParam(k) if k == "wind"));
    }

    #[test]
    fn non_finite_value_is_rejected() {
        let mut c = SimConfig::default();
        assert!(matches!(
            c.set("gravity", f64::NAN),
            Err(Error::InvalidValue { .. })
        ));
        assert_eq!(c.gravity, 100.0);
    }

    #[test]
    fn out_of_range_values_are_clamped() {
        let mut c = SimConfig::default();
        c.set("fadeRate", -5.0).unwrap();
        c.set("gravity", -1.0).unwrap();
        c.set("motionBlurFactor", 1.0).unwrap();
        assert_eq!(c.fade_rate, 0.0);
        assert_eq!(c.gravity, 0.0);
        assert_eq!(c.motion_blur_factor, MAX_MOTION_BLUR);
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let c = SimConfig::from_json(r#"{ "gravity": 40, "autoColor": false }"#).unwrap();
        assert_eq!(c.gravity, 40.0);
        assert!(!c.auto_color);
        assert_eq!(c.fade_rate, 50.0);
    }

    #[test]
    fn json_round_trip_uses_camel_case() {
        let json = SimConfig::default().to_json().unwrap();
        assert!(json.contains("\"motionBlurFactor\""));
        assert_eq!(SimConfig::from_json(&json).unwrap(), SimConfig::default());
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(matches!(SimConfig::from_json("{ gravity"), Err(Error::Json(_))));
    }
}
