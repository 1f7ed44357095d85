//! Centralized navigation options with TOML preset support.
//!
//! Camera projection and navigation tunables are consolidated here. Options
//! serialize to/from TOML so view presets can be stored on disk.

mod camera;
mod navigation;

use std::path::Path;

pub use camera::CameraOptions;
pub use navigation::NavigationOptions;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::ColumbusError;

/// Top-level options container. All sub-structs use `#[serde(default)]` so
/// partial TOML files (e.g. only overriding `[navigation]`) work correctly.
#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema,
)]
#[serde(default)]
pub struct Options {
    /// Camera projection parameters.
    pub camera: CameraOptions,
    /// Pan, inertia, orbit and boundary-correction parameters.
    pub navigation: NavigationOptions,
}

impl Options {
    /// Generate JSON Schema describing the UI-exposed options.
    #[must_use]
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Options)
    }

    /// Load options from a TOML file. Missing fields use defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ColumbusError::Io`] if the file cannot be read and
    /// [`ColumbusError::OptionsParse`] if it is not valid options TOML.
    pub fn load(path: &Path) -> Result<Self, ColumbusError> {
        let content = std::fs::read_to_string(path).map_err(ColumbusError::Io)?;
        toml::from_str(&content)
            .map_err(|e| ColumbusError::OptionsParse(e.to_string()))
    }

    /// Save options to a TOML file (pretty-printed).
    ///
    /// # Errors
    ///
    /// Returns [`ColumbusError::Io`] if the file or its parent directory
    /// cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), ColumbusError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| ColumbusError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(ColumbusError::Io)?;
        }
        std::fs::write(path, content).map_err(ColumbusError::Io)
    }

    /// List available preset names (TOML file stems) in a directory.
    #[must_use]
    pub fn list_presets(dir: &Path) -> Vec<String> {
        let mut names = Vec::new();
        if let Ok(entries) = std::fs::read_dir(dir) {
            for entry in entries.flatten() {
                let path = entry.path();
                if path.extension().is_some_and(|ext| ext == "toml") {
                    if let Some(stem) =
                        path.file_stem().and_then(|s| s.to_str())
                    {
                        names.push(stem.to_owned());
                    }
                }
            }
        }
        names.sort();
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_round_trips_through_toml() {
        let opts = Options::default();
        let toml_str = toml::to_string_pretty(&opts).unwrap();
        let parsed: Options = toml::from_str(&toml_str).unwrap();
        assert_eq!(opts, parsed);
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let toml_str = r"
[navigation]
inertia_translate = 0.5
correction_easing = 'linear'
";
        let opts: Options = toml::from_str(toml_str).unwrap();
        assert_eq!(opts.navigation.inertia_translate, 0.5);
        assert_eq!(
            opts.navigation.correction_easing,
            crate::animation::EasingFunction::Linear
        );
        // Everything else should be default
        assert_eq!(opts.navigation.clamp_margin, 0.5);
        assert_eq!(opts.camera.fovy, 60.0);
    }

    #[test]
    fn save_load_and_list_presets() {
        let dir = std::env::temp_dir()
            .join(format!("columbus-presets-{}", std::process::id()));
        let mut opts = Options::default();
        opts.navigation.inertia_translate = 0.75;
        opts.save(&dir.join("coasting.toml")).unwrap();
        std::fs::write(dir.join("notes.txt"), "ignored").unwrap();

        assert_eq!(Options::list_presets(&dir), vec!["coasting".to_owned()]);
        let loaded = Options::load(&dir.join("coasting.toml")).unwrap();
        assert_eq!(loaded, opts);

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn load_reports_parse_errors() {
        let dir = std::env::temp_dir()
            .join(format!("columbus-bad-preset-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("broken.toml");
        std::fs::write(&path, "[navigation\n").unwrap();

        assert!(matches!(
            Options::load(&path),
            Err(ColumbusError::OptionsParse(_))
        ));
        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn schema_has_expected_properties() {
        let schema_value =
            serde_json::to_value(Options::json_schema()).unwrap();
        let props = schema_value["properties"].as_object().unwrap();

        assert!(props.contains_key("camera"));
        assert!(props.contains_key("navigation"));

        let navigation = &props["navigation"]["properties"];
        assert!(navigation.get("inertia_translate").is_some());
        assert!(navigation.get("max_tilt_degrees").is_some());
        assert!(navigation.get("clamp_margin").is_none());
        assert!(navigation.get("correction_easing").is_none());

        let camera = &props["camera"]["properties"];
        assert!(camera.get("fovy").is_some());
        assert!(camera.get("near").is_none());
    }
}
