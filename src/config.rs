//! Loading study-session defaults from TOML.
//!
//! ```toml
//! mode = "quiz"
//! topic = "nsfr"
//! category = "rsf"
//! rng_seed = 42
//! pass_threshold = 80
//! content_pack = "my-cards.toml"
//! ```
//!
//! Every key is optional. Command-line flags override file values.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{error, info};

use crate::drill_engine::models::{ClassificationCategory, DrillMode, DrillRequest, Topic};
use crate::drill_engine::scoring::DEFAULT_PASS_THRESHOLD;
use crate::error::DrillError;

/// Environment variable naming the config file.
pub const CONFIG_ENV: &str = "BASEL_DRILL_CONFIG";

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub mode: DrillMode,
    pub topic: Topic,
    pub category: ClassificationCategory,
    pub rng_seed: Option<u64>,
    pub pass_threshold: u32,
    /// Extra content merged over the built-in bank.
    pub content_pack: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            mode: DrillMode::Quiz,
            topic: Topic::Lcr,
            category: ClassificationCategory::Hqla,
            rng_seed: None,
            pass_threshold: DEFAULT_PASS_THRESHOLD,
            content_pack: None,
        }
    }
}

impl AppConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, DrillError> {
        Ok(toml::from_str(s)?)
    }

    /// Read a config file. A relative `content_pack` is resolved against the
    /// config file's directory.
    pub fn load(path: &Path) -> Result<Self, DrillError> {
        let text = std::fs::read_to_string(path).map_err(|source| DrillError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut cfg: Self = toml::from_str(&text).map_err(|source| DrillError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        if let (Some(pack), Some(dir)) = (cfg.content_pack.as_ref(), path.parent()) {
            if pack.is_relative() {
                cfg.content_pack = Some(dir.join(pack));
            }
        }
        info!(path = %path.display(), "loaded config");
        Ok(cfg)
    }

    /// Load from `BASEL_DRILL_CONFIG` if set. A missing variable yields the
    /// defaults; an unreadable or invalid file is logged and also yields the
    /// defaults.
    pub fn load_from_env() -> Self {
        let Ok(path) = std::env::var(CONFIG_ENV) else {
            return Self::default();
        };
        match Self::load(Path::new(&path)) {
            Ok(cfg) => cfg,
            Err(e) => {
                error!(%path, error = %e, "ignoring config file");
                Self::default()
            }
        }
    }

    pub fn request(&self) -> DrillRequest {
        DrillRequest {
            mode: self.mode,
            topic: self.topic,
            category: self.category,
            rng_seed: self.rng_seed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        assert_eq!(AppConfig::from_toml_str("").unwrap(), AppConfig::default());
    }

    #[test]
    fn partial_file_overrides_only_given_keys() {
        let cfg = AppConfig::from_toml_str("mode = \"flashcards\"\ntopic = \"bonds\"\nrng_seed = 9\n").unwrap();
        assert_eq!(cfg.mode, DrillMode::Flashcards);
        assert_eq!(cfg.topic, Topic::Bonds);
        assert_eq!(cfg.category, ClassificationCategory::Hqla);
        assert_eq!(cfg.pass_threshold, DEFAULT_PASS_THRESHOLD);

        let req = cfg.request();
        assert_eq!(req.rng_seed, Some(9));
        assert_eq!(req.mode, DrillMode::Flashcards);
    }

    #[test]
    fn unknown_keys_and_values_are_rejected() {
        assert!(matches!(AppConfig::from_toml_str("colour = \"blue\"\n"), Err(DrillError::Toml(_))));
        assert!(matches!(AppConfig::from_toml_str("topic = \"basel4\"\n"), Err(DrillError::Toml(_))));
    }

    #[test]
    fn relative_content_pack_resolves_next_to_config() {
        let dir = std::env::temp_dir().join(format!("basel_drill_cfg_{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.toml");
        std::fs::write(&path, "content_pack = \"pack.toml\"\npass_threshold = 70\n").unwrap();

        let cfg = AppConfig::load(&path).unwrap();
        assert_eq!(cfg.content_pack, Some(dir.join("pack.toml")));
        assert_eq!(cfg.pass_threshold, 70);

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn invalid_file_reports_its_path() {
        let dir = std::env::temp_dir().join(format!("basel_drill_badcfg_{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.toml");
        std::fs::write(&path, "mode = \"essay\"\n").unwrap();

        let err = AppConfig::load(&path).unwrap_err();
        assert!(matches!(err, DrillError::Parse { path: ref p, .. } if *p == path));
        assert!(err.to_string().starts_with(&format!("failed to parse {}", path.display())));

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
