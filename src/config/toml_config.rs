use crate::config::{delay_from_seconds, validate_provider};
use crate::core::catalog::ZoneCatalog;
use crate::core::generator::{DEFAULT_CANVAS_HEIGHT, DEFAULT_CANVAS_WIDTH, DEFAULT_MARGIN};
use crate::core::transition::DEFAULT_TRANSITION_DELAY;
use crate::core::{AngularPolicy, ConfigProvider, Point, Zone};
use crate::utils::error::{LayoutError, Result};
use crate::utils::validation::Validate;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    pub canvas: Option<CanvasConfig>,
    pub transition: Option<TransitionConfig>,
    pub seed: Option<u64>,
    /// Replaces the standard catalog when present.
    pub zones: Option<Vec<ZoneConfig>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CanvasConfig {
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub margin: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TransitionConfig {
    pub delay_seconds: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ZoneConfig {
    pub name: String,
    pub center: [f64; 2],
    pub outer_radius: f64,
    pub inner_radius: Option<f64>,
    #[serde(default = "default_policy")]
    pub policy: AngularPolicy,
    pub color: Option<String>,
}

fn default_policy() -> AngularPolicy {
    AngularPolicy::FullCircle
}

impl TryFrom<&ZoneConfig> for Zone {
    type Error = LayoutError;

    fn try_from(config: &ZoneConfig) -> Result<Self> {
        let zone = Zone::new(
            config.name.clone(),
            Point::new(config.center[0], config.center[1]),
            config.outer_radius,
            config.inner_radius,
            config.policy,
        )?;
        Ok(match &config.color {
            Some(color) => zone.with_color(color.clone()),
            None => zone,
        })
    }
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(LayoutError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| LayoutError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${FLOOR_PLAN_DELAY})
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| LayoutError::ConfigValidationError {
            field: "environment".to_string(),
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn delay_seconds(&self) -> f64 {
        self.transition
            .as_ref()
            .and_then(|t| t.delay_seconds)
            .unwrap_or(DEFAULT_TRANSITION_DELAY.as_secs_f64())
    }

    /// Zones from the file, or `None` to fall back to the standard plan.
    pub fn zone_catalog(&self) -> Result<Option<ZoneCatalog>> {
        let Some(zones) = &self.zones else {
            return Ok(None);
        };
        let zones = zones.iter().map(Zone::try_from).collect::<Result<Vec<_>>>()?;
        ZoneCatalog::from_zones(zones).map(Some)
    }

    /// 驗證配置的合理性
    pub fn validate_config(&self) -> Result<()> {
        validate_provider(self, self.delay_seconds())?;
        if let Some(zones) = &self.zones {
            if zones.is_empty() {
                return Err(LayoutError::MissingConfigError {
                    field: "zones".to_string(),
                });
            }
        }
        self.zone_catalog()?;
        Ok(())
    }
}

impl ConfigProvider for TomlConfig {
    fn canvas_width(&self) -> f64 {
        self.canvas
            .as_ref()
            .and_then(|c| c.width)
            .unwrap_or(DEFAULT_CANVAS_WIDTH)
    }

    fn canvas_height(&self) -> f64 {
        self.canvas
            .as_ref()
            .and_then(|c| c.height)
            .unwrap_or(DEFAULT_CANVAS_HEIGHT)
    }

    fn margin(&self) -> f64 {
        self.canvas
            .as_ref()
            .and_then(|c| c.margin)
            .unwrap_or(DEFAULT_MARGIN)
    }

    fn transition_delay(&self) -> Duration {
        delay_from_seconds(self.transition.as_ref().and_then(|t| t.delay_seconds))
    }

    fn seed(&self) -> Option<u64> {
        self.seed
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_empty_config_uses_plan_defaults() {
        let config = TomlConfig::from_toml_str("").unwrap();
        assert_eq!(config.canvas_width(), 1320.0);
        assert_eq!(config.canvas_height(), 600.0);
        assert_eq!(config.margin(), 10.0);
        assert_eq!(config.transition_delay(), Duration::from_secs(5));
        assert!(config.zone_catalog().unwrap().is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_full_config() {
        let toml_content = r#"
seed = 42

[canvas]
width = 1000.0
height = 800.0
margin = 20.0

[transition]
delay_seconds = 2.5

[[zones]]
name = "Lobby"
center = [500.0, 400.0]
outer_radius = 120.0
policy = { kind = "semicircle", start = 0.0, end = 3.14159 }
color = "rgba(1, 2, 3, 0.2)"

[[zones]]
name = "Desks"
center = [500.0, 400.0]
outer_radius = 300.0
inner_radius = 150.0
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.seed(), Some(42));
        assert_eq!(config.canvas_width(), 1000.0);
        assert_eq!(config.margin(), 20.0);
        assert_eq!(config.transition_delay(), Duration::from_millis(2500));
        assert!(config.validate().is_ok());

        let catalog = config.zone_catalog().unwrap().unwrap();
        assert_eq!(catalog.len(), 2);
        let lobby = catalog.get("Lobby").unwrap();
        assert_eq!(lobby.policy(), AngularPolicy::Semicircle { start: 0.0, end: 3.14159 });
        assert_eq!(lobby.color(), Some("rgba(1, 2, 3, 0.2)"));
        assert_eq!(catalog.get("Desks").unwrap().policy(), AngularPolicy::FullCircle);
    }

    #[test]
    fn test_malformed_zone_fails_validation() {
        let toml_content = r#"
[[zones]]
name = "Broken"
center = [0.0, 0.0]
outer_radius = 100.0
inner_radius = 150.0
"#;
        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        let err = config.validate().unwrap_err();
        assert!(matches!(err, LayoutError::InvalidZoneError { .. }));
    }

    #[test]
    fn test_duplicate_zone_fails_validation() {
        let toml_content = r#"
[[zones]]
name = "Twice"
center = [0.0, 0.0]
outer_radius = 10.0

[[zones]]
name = "Twice"
center = [0.0, 0.0]
outer_radius = 20.0
"#;
        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert!(matches!(
            config.validate().unwrap_err(),
            LayoutError::DuplicateZoneError { .. }
        ));
    }

    #[test]
    fn test_invalid_canvas_and_delay() {
        let config = TomlConfig::from_toml_str("[canvas]\nwidth = 15.0\n").unwrap();
        assert!(config.validate().is_err());

        let config = TomlConfig::from_toml_str("[transition]\ndelay_seconds = -3.0\n").unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("FLOOR_PLAN_TEST_DELAY", "1.5");

        let config =
            TomlConfig::from_toml_str("[transition]\ndelay_seconds = ${FLOOR_PLAN_TEST_DELAY}\n")
                .unwrap();
        assert_eq!(config.transition_delay(), Duration::from_millis(1500));

        std::env::remove_var("FLOOR_PLAN_TEST_DELAY");
    }

    #[test]
    fn test_syntax_error_is_reported() {
        let err = TomlConfig::from_toml_str("[canvas\nwidth = 1").unwrap_err();
        assert!(matches!(err, LayoutError::ConfigValidationError { .. }));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[canvas]\nheight = 900.0\n")
            .unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.canvas_height(), 900.0);
    }
}
