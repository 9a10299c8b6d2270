use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistogramConfig {
    #[serde(default = "default_bins")]
    pub bins: i64,
    #[serde(default)]
    pub left: Option<f64>, // data minimum when None
    #[serde(default)]
    pub right: Option<f64>, // data maximum when None
}

fn default_bins() -> i64 {
    10
}

impl Default for HistogramConfig {
    fn default() -> Self {
        Self {
            bins: default_bins(),
            left: None,
            right: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct DisplayConfig {
    #[serde(default)]
    pub bar_width: Option<usize>, // falls back to terminal width when None
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub histogram: HistogramConfig,
    #[serde(default)]
    pub display: DisplayConfig,
}

impl Config {
    pub fn config_path() -> PathBuf {
        if let Ok(env_path) = std::env::var("HISTO_CONFIG") {
            return PathBuf::from(env_path); // $HISTO_CONFIG overrides default config path
        }
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("histo")
            .join("config.toml")
    }

    pub fn load() -> crate::Result<Self> {
        Self::load_from(&Self::config_path())
    }

    pub fn load_from(path: &Path) -> crate::Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let cfg: Self =
            toml::from_str(&content).map_err(|e| crate::HistoError::Config(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Bounds must be finite; TOML happily parses `nan` and `inf`.
    pub fn validate(&self) -> crate::Result<()> {
        for (side, v) in [("left", self.histogram.left), ("right", self.histogram.right)] {
            if let Some(v) = v.filter(|v| !v.is_finite()) {
                return Err(crate::HistoError::Config(format!(
                    "histogram.{side} must be a finite number, got {v}"
                )));
            }
        }
        Ok(())
    }

    pub fn save_to(&self, path: &Path) -> crate::Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(path, self.to_toml()?)?;
        Ok(())
    }

    pub fn to_toml(&self) -> crate::Result<String> {
        toml::to_string_pretty(self).map_err(|e| crate::HistoError::Config(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = Config::load_from(&dir.path().join("nope.toml")).unwrap();
        assert_eq!(cfg.histogram.bins, 10);
        assert!(cfg.histogram.left.is_none());
        assert!(cfg.display.bar_width.is_none());
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[histogram]\nleft = -2.5\n").unwrap();
        let cfg = Config::load_from(&path).unwrap();
        assert_eq!(cfg.histogram.bins, 10);
        assert_eq!(cfg.histogram.left, Some(-2.5));
        assert!(cfg.histogram.right.is_none());
    }

    #[test]
    fn save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let mut cfg = Config::default();
        cfg.histogram.bins = 4;
        cfg.display.bar_width = Some(20);
        cfg.save_to(&path).unwrap();
        let back = Config::load_from(&path).unwrap();
        assert_eq!(back.histogram.bins, 4);
        assert_eq!(back.display.bar_width, Some(20));
    }

    #[test]
    fn non_finite_bounds_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        for body in ["[histogram]\nleft = nan\n", "[histogram]\nright = -inf\n"] {
            std::fs::write(&path, body).unwrap();
            let err = Config::load_from(&path).unwrap_err();
            assert!(err.to_string().contains("must be a finite number"), "{err}");
        }
    }

    #[test]
    fn malformed_toml_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[histogram\nbins = ").unwrap();
        assert!(matches!(Config::load_from(&path), Err(crate::HistoError::Config(_))));
    }
}
