//! Configuration loading and management.

use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};
use stampy_core::Orientation;

/// Application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Layout of `stampy graph` output. Unknown names mean horizontal.
    pub orientation: Orientation,
}

impl Config {
    /// Loads configuration, optionally from a specific file.
    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, figment::Error> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Load from default config location
        if let Some(config_dir) = dirs_config_path() {
            figment = figment.merge(Toml::file(config_dir.join("config.toml")));
        }

        // Load from specified config file
        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        // Load from environment variables (STAMPY_*)
        figment = figment.merge(Env::prefixed("STAMPY_"));

        figment.extract()
    }

    /// Applies a `--orientation` flag over the loaded value.
    #[must_use]
    pub fn with_orientation(mut self, name: Option<&str>) -> Self {
        if let Some(name) = name {
            self.orientation = Orientation::from_name(name);
        }
        self
    }
}

/// Returns the platform-specific config directory for stampy.
///
/// On Linux: `~/.config/stampy`
pub fn dirs_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("stampy"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(toml: &str) -> Config {
        Figment::from(Serialized::defaults(Config::default()))
            .merge(Toml::string(toml))
            .extract()
            .unwrap()
    }

    #[test]
    fn test_default_orientation_is_horizontal() {
        assert_eq!(Config::default().orientation, Orientation::Horizontal);
    }

    #[test]
    fn test_toml_selects_vertical() {
        let config = extract(r#"orientation = "vertical""#);
        assert_eq!(config.orientation, Orientation::Vertical);
    }

    #[test]
    fn test_unknown_orientation_falls_back() {
        let config = extract(r#"orientation = "upside-down""#);
        assert_eq!(config.orientation, Orientation::Horizontal);
    }

    #[test]
    fn test_non_string_orientation_falls_back() {
        for toml in [
            "orientation = 1",
            "orientation = true",
            "orientation = 2.5",
            "orientation = [\"vertical\"]",
            "[orientation]\nname = \"vertical\"",
        ] {
            assert_eq!(extract(toml).orientation, Orientation::Horizontal, "{toml}");
        }
    }

    #[test]
    fn test_numeric_env_style_orientation_falls_back() {
        // `STAMPY_ORIENTATION=0` reaches the config as an unsigned integer.
        let config: Config = Figment::from(Serialized::defaults(Config::default()))
            .merge(Serialized::default("orientation", 0_u64))
            .extract()
            .unwrap();
        assert_eq!(config.orientation, Orientation::Horizontal);
    }

    #[test]
    fn test_missing_config_file_uses_defaults() {
        let temp = tempfile::tempdir().unwrap();
        let config = Config::load_from(Some(&temp.path().join("absent.toml"))).unwrap();
        assert_eq!(config.orientation, Orientation::Horizontal);
    }

    #[test]
    fn test_config_file_is_read() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("config.toml");
        std::fs::write(&path, "orientation = \"vertical\"\n").unwrap();
        let config = Config::load_from(Some(&path)).unwrap();
        assert_eq!(config.orientation, Orientation::Vertical);
    }

    #[test]
    fn test_flag_overrides_config() {
        let config = Config {
            orientation: Orientation::Vertical,
        };
        assert_eq!(
            config.clone().with_orientation(None).orientation,
            Orientation::Vertical
        );
        assert_eq!(
            config.with_orientation(Some("horizontal")).orientation,
            Orientation::Horizontal
        );
    }

    #[test]
    fn test_dirs_config_path_ends_with_stampy() {
        if let Some(path) = dirs_config_path() {
            assert_eq!(path.file_name().unwrap(), "stampy");
        }
    }
}
