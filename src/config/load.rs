//! Configuration loading from files and the environment.

use std::path::{Path, PathBuf};

use tracing::debug;

use super::{ConfigError, SiteConfig};

/// Environment variables starting with this prefix override config values,
/// e.g. `SHORTSITE_SITE_URL` or `SHORTSITE_THEME__DEFAULT_MODE`.
pub const ENV_PREFIX: &str = "SHORTSITE";

impl SiteConfig {
    /// Load the config from a YAML file, falling back to defaults when the
    /// file does not exist.
    ///
    /// Relative paths in the config are resolved against the file's directory.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        debug!(path = %path.display(), exists = path.exists(), "loading config");

        let settings = ::config::Config::builder()
            .add_source(
                ::config::File::from(path)
                    .format(::config::FileFormat::Yaml)
                    .required(false),
            )
            .add_source(
                ::config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?;

        let mut config: SiteConfig = settings.try_deserialize()?;
        config.validate()?;
        config.resolve_paths(&base_path_from_config(path));
        Ok(config)
    }

    /// Check values that deserialize fine but cannot be used.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let markdown = &self.markdown;
        if !(1..=6).contains(&markdown.toc_min_level) || !(1..=6).contains(&markdown.toc_max_level)
        {
            return Err(ConfigError::Validation(format!(
                "markdown toc levels must be between 1 and 6 (got {}..{})",
                markdown.toc_min_level, markdown.toc_max_level
            )));
        }
        if markdown.toc_min_level > markdown.toc_max_level {
            return Err(ConfigError::Validation(format!(
                "markdown.toc_min_level ({}) is greater than markdown.toc_max_level ({})",
                markdown.toc_min_level, markdown.toc_max_level
            )));
        }
        if self.site_url.trim().is_empty() {
            return Err(ConfigError::Validation(
                "site_url must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    fn resolve_paths(&mut self, base_path: &Path) {
        if let Some(dir) = &self.templates_dir {
            self.templates_dir = Some(resolve(base_path, dir));
        }
        self.static_dir = resolve(base_path, &self.static_dir);
    }
}

fn resolve(base_path: &Path, path: &Path) -> PathBuf {
    if path.is_relative() {
        base_path.join(path)
    } else {
        path.to_path_buf()
    }
}

/// Get the base path from a config file path (its parent directory).
pub fn base_path_from_config(config_path: &Path) -> PathBuf {
    config_path
        .parent()
        .map(|p| p.to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = SiteConfig::load(&dir.path().join("config.yaml")).unwrap();
        assert_eq!(config.site_name, "My Static Site");
        assert_eq!(config.theme.default_mode, "light");
        assert_eq!(config.markdown.toc_min_level, 2);
        assert_eq!(config.static_dir, dir.path().join("static"));
        assert!(config.templates_dir.is_none());
    }

    #[test]
    fn test_load_yaml_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(
            &path,
            r#"
site_name: Docs
site_url: https://docs.example.org/
templates_dir: theme
theme:
  default_mode: dark
  logo: /logo.svg
markdown:
  toc_max_level: 3
"#,
        )
        .unwrap();

        let config = SiteConfig::load(&path).unwrap();
        assert_eq!(config.site_name, "Docs");
        assert_eq!(config.site_url, "https://docs.example.org/");
        assert_eq!(config.site_description, "A static site built from Markdown");
        assert_eq!(config.theme.default_mode, "dark");
        assert_eq!(config.theme.primary_color, "#0d6efd");
        assert_eq!(
            config.theme.extra.get("logo"),
            Some(&serde_json::Value::String("/logo.svg".to_string()))
        );
        assert_eq!(config.markdown.toc_min_level, 2);
        assert_eq!(config.markdown.toc_max_level, 3);
        assert_eq!(config.templates_dir, Some(dir.path().join("theme")));
    }

    #[test]
    fn test_invalid_toc_levels_rejected() {
        let mut config = SiteConfig::default();
        config.markdown.toc_min_level = 5;
        config.markdown.toc_max_level = 3;
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));

        config.markdown.toc_min_level = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_default_config_round_trips_through_yaml() {
        let text = serde_yaml::to_string(&SiteConfig::default()).unwrap();
        let parsed: SiteConfig = serde_yaml::from_str(&text).unwrap();
        assert_eq!(parsed.site_name, "My Static Site");
        assert_eq!(parsed.highlight_theme, "dracula");
    }

    #[test]
    fn test_base_path_from_config() {
        assert_eq!(
            base_path_from_config(Path::new("/project/config.yaml")),
            PathBuf::from("/project")
        );
        assert_eq!(
            base_path_from_config(Path::new("config.yaml")),
            PathBuf::from("")
        );
    }
}
