use anyhow::{bail, Context, Result};
use mixforge_schemas::{file_formats::MixFile, mix::MixDesign};
use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Looked up in the working directory when no `--config` is given.
pub const DEFAULT_CONFIG_PATH: &str = "mixforge.yaml";
pub const DEFAULT_MODEL_PATH: &str = "data/concrete_strength_model.json";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Host settings read from `mixforge.yaml`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub model_path: PathBuf,
    pub evaluation_log: Option<PathBuf>,
    pub output_format: OutputFormat,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            model_path: PathBuf::from(DEFAULT_MODEL_PATH),
            evaluation_log: None,
            output_format: OutputFormat::Text,
        }
    }
}

impl AppConfig {
    /// Loads an explicitly named file, or the default file if one exists.
    ///
    /// A missing default file yields the built-in defaults; a missing explicit
    /// file is an error.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let path = match explicit {
            Some(path) => {
                if !path.is_file() {
                    bail!("Configuration file not found: {:?}", path);
                }
                path.to_path_buf()
            }
            None => {
                let default = PathBuf::from(DEFAULT_CONFIG_PATH);
                if !default.is_file() {
                    return Ok(Self::default());
                }
                default
            }
        };

        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read configuration from {:?}", path))?;
        let config: AppConfig = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse YAML from {:?}", path))?;
        Ok(config)
    }
}

/// Reads a mix request file (YAML, or JSON since YAML is a superset).
pub fn load_mix_file(path: &Path) -> Result<MixDesign> {
    let content =
        fs::read_to_string(path).with_context(|| format!("Failed to read mix file {:?}", path))?;
    let file: MixFile = serde_yaml::from_str(&content)
        .with_context(|| format!("Failed to parse mix file {:?}", path))?;
    Ok(file.mix)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_config_is_parsed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mixforge.yaml");
        fs::write(
            &path,
            "model_path: models/forest.json\nevaluation_log: runs/log.csv\noutput_format: json\n",
        )
        .unwrap();

        let config = AppConfig::load(Some(path.as_path())).unwrap();
        assert_eq!(config.model_path, PathBuf::from("models/forest.json"));
        assert_eq!(config.evaluation_log, Some(PathBuf::from("runs/log.csv")));
        assert_eq!(config.output_format, OutputFormat::Json);
    }

    #[test]
    fn partial_config_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("partial.yaml");
        fs::write(&path, "evaluation_log: log.csv\n").unwrap();

        let config = AppConfig::load(Some(path.as_path())).unwrap();
        assert_eq!(config.model_path, PathBuf::from(DEFAULT_MODEL_PATH));
        assert_eq!(config.output_format, OutputFormat::Text);
    }

    #[test]
    fn default_model_path_points_at_bundled_model() {
        let bundled = Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("..")
            .join(AppConfig::default().model_path);
        assert!(bundled.is_file(), "{:?}", bundled);

        let shipped = Path::new(env!("CARGO_MANIFEST_DIR")).join("../mixforge.yaml");
        let config = AppConfig::load(Some(shipped.as_path())).unwrap();
        assert_eq!(config.model_path, PathBuf::from(DEFAULT_MODEL_PATH));
    }

    #[test]
    fn missing_explicit_config_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(AppConfig::load(Some(dir.path().join("absent.yaml").as_path())).is_err());
    }

    #[test]
    fn mix_file_accepts_yaml_and_json() {
        let dir = tempfile::tempdir().unwrap();
        let yaml = dir.path().join("mix.yaml");
        fs::write(
            &yaml,
            "schema_version: \"1.0\"\nmix:\n  cement: 350\n  blast_furnace_slag: 0\n  fly_ash: 0\n  water: 175\n  superplasticizer: 0\n  coarse_aggregate: 1000\n  fine_aggregate: 800\n  age: 7\n",
        )
        .unwrap();
        let mix = load_mix_file(&yaml).unwrap();
        assert_eq!(mix.cement, 350.0);
        assert_eq!(mix.curing_age_days, 7);

        let json = dir.path().join("mix.json");
        fs::write(
            &json,
            r#"{"schema_version":"1.0","mix":{"cement":300,"blast_furnace_slag":50,"fly_ash":30,"water":180,"superplasticizer":5.0,"coarse_aggregate":900,"fine_aggregate":700,"age":28}}"#,
        )
        .unwrap();
        assert_eq!(load_mix_file(&json).unwrap(), MixDesign::default());
    }
}
