//! Tunnel configuration
//!
//! Every parameter is runtime-tunable; the world reads the config fresh
//! on each tick, so changes take effect on the next frame without a reset.

use std::fmt;
use std::ops::RangeInclusive;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Environment variable naming a JSON config file for the binaries
pub const CONFIG_ENV: &str = "ZTUNNEL_CONFIG";

/// All tunnel parameters
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TunnelConfig {
    /// Viewpoint travel increment per tick
    pub speed: f64,
    /// Spacing between consecutive rings along the travel axis
    pub node_interval: f64,
    /// Perspective focal distance
    pub focal_length: f64,
    /// Generation / cull horizon ahead of the viewpoint
    pub view_distance: f64,
    /// Root ring cross-section size
    pub tunnel_size: f64,
    /// Roll increment per generated ring (radians)
    pub rotation_speed: f64,
    /// Hue increment per generated ring
    pub color_shift: f64,
    /// Root ring hue
    pub initial_hue: f64,
    /// Per-ring size multiplier
    pub scale_factor: f64,
    /// Noise sampling frequency along the travel axis. Zero = straight tunnel.
    pub noise_scale: f64,
    /// Lateral X offsets span [-lateral_range_x, lateral_range_x]
    pub lateral_range_x: f64,
    /// Lateral Y offsets span [-lateral_range_y, lateral_range_y]
    pub lateral_range_y: f64,
    /// Noise domain offset decorrelating Y from X
    pub noise_y_offset: f64,
    /// Chance that a generated ring is a void
    pub void_probability: f64,
    /// Distance ahead of the viewpoint where the camera looks for its guide ring
    pub lookahead: f64,
    /// Fraction of the remaining lateral gap closed per tick
    pub camera_smoothing: f64,
    /// Travel coordinate past which the origin is rebased (also the subtracted offset)
    pub rebase_threshold: f64,
    /// Hue wraps modulo this value
    pub hue_range: f64,
    /// Alpha of non-void face fills
    pub fill_alpha: f64,
    /// Wireframe stroke width in pixels
    pub stroke_width: f64,
    /// RNG / noise seed. `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl Default for TunnelConfig {
    fn default() -> Self {
        Self {
            speed: 1.0,
            node_interval: 10.0,
            focal_length: 60.0,
            view_distance: 2000.0,
            tunnel_size: 300.0,
            rotation_speed: 0.2,
            color_shift: 5.0,
            initial_hue: 0.0,
            scale_factor: 0.99999,
            noise_scale: 0.0,
            lateral_range_x: 2000.0,
            lateral_range_y: 1000.0,
            noise_y_offset: 100.0,
            void_probability: 0.05,
            lookahead: 400.0,
            camera_smoothing: 0.5,
            rebase_threshold: 5000.0,
            hue_range: 360.0,
            fill_alpha: 0.3,
            stroke_width: 2.0,
            seed: None,
        }
    }
}

/// Tuning-panel bounds: (field name, range)
pub const TUNING_BOUNDS: &[(&str, RangeInclusive<f64>)] = &[
    ("speed", -2.0..=2.0),
    ("node_interval", 2.0..=100.0),
    ("focal_length", 10.0..=200.0),
    ("view_distance", 500.0..=6000.0),
    ("tunnel_size", 10.0..=500.0),
    ("rotation_speed", 0.0..=0.2),
    ("color_shift", 0.0..=360.0),
    ("initial_hue", 0.0..=360.0),
    ("scale_factor", 0.9..=1.0),
    ("noise_scale", 0.0..=0.01),
    ("void_probability", 0.0..=1.0),
    ("camera_smoothing", 0.01..=1.0),
];

/// Configuration loading / validation error
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(serde_json::Error),
    Invalid {
        field: &'static str,
        value: f64,
        reason: &'static str,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "failed to read config: {}", e),
            ConfigError::Parse(e) => write!(f, "failed to parse config: {}", e),
            ConfigError::Invalid { field, value, reason } => {
                write!(f, "invalid {} = {}: {}", field, value, reason)
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(e) => Some(e),
            ConfigError::Parse(e) => Some(e),
            ConfigError::Invalid { .. } => None,
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Parse(e)
    }
}

fn invalid(field: &'static str, value: f64, reason: &'static str) -> ConfigError {
    ConfigError::Invalid { field, value, reason }
}

impl TunnelConfig {
    /// Parse and validate a JSON document. Missing fields take defaults.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: TunnelConfig = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_json(&text)?;
        debug!(path = %path.display(), "Config loaded");
        Ok(config)
    }

    /// Load from the file named by `ZTUNNEL_CONFIG`, or defaults when unset
    pub fn from_env() -> Result<Self, ConfigError> {
        match std::env::var(CONFIG_ENV) {
            Ok(path) => Self::load(path),
            Err(_) => Ok(Self::default()),
        }
    }

    /// Reject values that would break the chain or projection invariants
    pub fn validate(&self) -> Result<(), ConfigError> {
        let fields: [(&'static str, f64); 20] = [
            ("speed", self.speed),
            ("node_interval", self.node_interval),
            ("focal_length", self.focal_length),
            ("view_distance", self.view_distance),
            ("tunnel_size", self.tunnel_size),
            ("rotation_speed", self.rotation_speed),
            ("color_shift", self.color_shift),
            ("initial_hue", self.initial_hue),
            ("scale_factor", self.scale_factor),
            ("noise_scale", self.noise_scale),
            ("lateral_range_x", self.lateral_range_x),
            ("lateral_range_y", self.lateral_range_y),
            ("noise_y_offset", self.noise_y_offset),
            ("void_probability", self.void_probability),
            ("lookahead", self.lookahead),
            ("camera_smoothing", self.camera_smoothing),
            ("rebase_threshold", self.rebase_threshold),
            ("hue_range", self.hue_range),
            ("fill_alpha", self.fill_alpha),
            ("stroke_width", self.stroke_width),
        ];
        for (field, value) in fields {
            if !value.is_finite() {
                return Err(invalid(field, value, "must be finite"));
            }
        }

        if self.node_interval <= 0.0 {
            return Err(invalid("node_interval", self.node_interval, "must be positive"));
        }
        if self.focal_length <= 0.0 {
            return Err(invalid("focal_length", self.focal_length, "must be positive"));
        }
        if self.view_distance <= 0.0 {
            return Err(invalid("view_distance", self.view_distance, "must be positive"));
        }
        if self.tunnel_size <= 0.0 {
            return Err(invalid("tunnel_size", self.tunnel_size, "must be positive"));
        }
        if self.scale_factor <= 0.0 || self.scale_factor > 1.0 {
            return Err(invalid("scale_factor", self.scale_factor, "must be within (0, 1]"));
        }
        if self.hue_range <= 0.0 {
            return Err(invalid("hue_range", self.hue_range, "must be positive"));
        }
        if self.rebase_threshold <= 0.0 {
            return Err(invalid("rebase_threshold", self.rebase_threshold, "must be positive"));
        }
        if !(0.0..=1.0).contains(&self.void_probability) {
            return Err(invalid("void_probability", self.void_probability, "must be within [0, 1]"));
        }
        if !(0.0..=1.0).contains(&self.fill_alpha) {
            return Err(invalid("fill_alpha", self.fill_alpha, "must be within [0, 1]"));
        }
        if self.camera_smoothing <= 0.0 || self.camera_smoothing > 1.0 {
            return Err(invalid("camera_smoothing", self.camera_smoothing, "must be within (0, 1]"));
        }
        if self.lookahead < 0.0 {
            return Err(invalid("lookahead", self.lookahead, "must not be negative"));
        }
        if self.stroke_width < 0.0 {
            return Err(invalid("stroke_width", self.stroke_width, "must not be negative"));
        }
        Ok(())
    }

    /// Copy with every tunable clamped into its tuning-panel range
    pub fn clamped(&self) -> Self {
        let mut out = self.clone();
        for (field, range) in TUNING_BOUNDS {
            let Some(slot) = out.field_mut(field) else {
                continue;
            };
            let clamped = slot.clamp(*range.start(), *range.end());
            if clamped != *slot {
                debug!(field, from = *slot, to = clamped, "Config value clamped");
                *slot = clamped;
            }
        }
        out
    }

    /// Restore one tunable to its default value
    pub fn reset_field(&mut self, field: &str) {
        let mut defaults = Self::default();
        if let (Some(slot), Some(default)) = (self.field_mut(field), defaults.field_mut(field)) {
            *slot = *default;
        }
    }

    /// Mutable access to a tunable by name
    pub fn field_mut(&mut self, field: &str) -> Option<&mut f64> {
        let slot = match field {
            "speed" => &mut self.speed,
            "node_interval" => &mut self.node_interval,
            "focal_length" => &mut self.focal_length,
            "view_distance" => &mut self.view_distance,
            "tunnel_size" => &mut self.tunnel_size,
            "rotation_speed" => &mut self.rotation_speed,
            "color_shift" => &mut self.color_shift,
            "initial_hue" => &mut self.initial_hue,
            "scale_factor" => &mut self.scale_factor,
            "noise_scale" => &mut self.noise_scale,
            "void_probability" => &mut self.void_probability,
            "camera_smoothing" => &mut self.camera_smoothing,
            _ => return None,
        };
        Some(slot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = TunnelConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.noise_scale, 0.0);
        assert_eq!(config.rebase_threshold, 5000.0);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let config = TunnelConfig::from_json(r#"{"speed": 2.5, "seed": 7}"#).unwrap();
        assert_eq!(config.speed, 2.5);
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.node_interval, 10.0);
        assert_eq!(config.tunnel_size, 300.0);
    }

    #[test]
    fn test_rejects_bad_node_interval() {
        let err = TunnelConfig::from_json(r#"{"node_interval": -10}"#).unwrap_err();
        match err {
            ConfigError::Invalid { field, .. } => assert_eq!(field, "node_interval"),
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_rejects_malformed_json() {
        let err = TunnelConfig::from_json("{ speed: ").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_rejects_out_of_range_probability() {
        let config = TunnelConfig {
            void_probability: 1.5,
            ..TunnelConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_growing_scale_factor() {
        let err = TunnelConfig::from_json(r#"{"scale_factor": 5.0}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "scale_factor", .. }));

        let growing = TunnelConfig {
            scale_factor: 1.1,
            ..TunnelConfig::default()
        };
        assert!(growing.validate().is_err());
        // The tuning panel cannot reach a growth factor either
        assert_eq!(growing.clamped().scale_factor, 1.0);
        assert!(growing.clamped().validate().is_ok());

        let constant = TunnelConfig {
            scale_factor: 1.0,
            ..TunnelConfig::default()
        };
        assert!(constant.validate().is_ok());
    }

    #[test]
    fn test_clamped_respects_tuning_bounds() {
        let config = TunnelConfig {
            speed: 10.0,
            scale_factor: 0.5,
            view_distance: 100.0,
            ..TunnelConfig::default()
        };
        let clamped = config.clamped();
        assert_eq!(clamped.speed, 2.0);
        assert_eq!(clamped.scale_factor, 0.9);
        assert_eq!(clamped.view_distance, 500.0);
        // Untouched fields survive
        assert_eq!(clamped.lookahead, config.lookahead);
    }

    #[test]
    fn test_every_bound_has_a_field() {
        let mut config = TunnelConfig::default();
        for (field, _) in TUNING_BOUNDS {
            assert!(config.field_mut(field).is_some(), "no field for {}", field);
        }
        assert!(config.field_mut("missing").is_none());
    }

    #[test]
    fn test_reset_field() {
        let mut config = TunnelConfig {
            speed: -1.5,
            rotation_speed: 0.05,
            ..TunnelConfig::default()
        };
        config.reset_field("speed");
        config.reset_field("unknown");
        assert_eq!(config.speed, 1.0);
        assert_eq!(config.rotation_speed, 0.05);
    }
}
