use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::outbound::ApiSettings;

const APP_DIR: &str = "textblocks";
const LOCAL_FILE: &str = ".textblocksrc";

/// Defaults that can be stored in a config file as command-line flags.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ConfigFlags {
    pub no_outline: bool,
    pub outline: bool,
    pub api_url: Option<String>,
    pub method: Option<String>,
    pub language: Option<String>,
    /// Name of the environment variable holding the API key.
    pub api_key_env: Option<String>,
    pub log_file: Option<PathBuf>,
}

impl ConfigFlags {
    /// Merge two flag sets. Switches from either side stay on; valued
    /// options from `other` win.
    pub fn union(&self, other: &Self) -> Self {
        Self {
            no_outline: self.no_outline || other.no_outline,
            outline: self.outline || other.outline,
            api_url: other.api_url.clone().or_else(|| self.api_url.clone()),
            method: other.method.clone().or_else(|| self.method.clone()),
            language: other.language.clone().or_else(|| self.language.clone()),
            api_key_env: other
                .api_key_env
                .clone()
                .or_else(|| self.api_key_env.clone()),
            log_file: other.log_file.clone().or_else(|| self.log_file.clone()),
        }
    }

    /// Whether the outline pane starts open. `--outline` beats `--no-outline`.
    pub const fn outline_visible(&self) -> bool {
        self.outline || !self.no_outline
    }

    /// Language used for audio file names.
    pub fn language(&self) -> &str {
        self.language.as_deref().unwrap_or("spanish")
    }

    /// Resolve endpoint settings, reading the API key from the environment.
    pub fn api_settings(&self) -> ApiSettings {
        let api_key = self
            .api_key_env
            .as_deref()
            .and_then(|var| std::env::var(var).ok());
        let mut settings = ApiSettings {
            api_key,
            ..ApiSettings::default()
        };
        if let Some(url) = &self.api_url {
            settings.url.clone_from(url);
        }
        if let Some(method) = &self.method {
            settings.method.clone_from(method);
        }
        settings
    }

    fn set_option(&mut self, name: &str, value: String) {
        match name {
            "--api-url" => self.api_url = Some(value),
            "--method" => self.method = Some(value.to_ascii_uppercase()),
            "--language" => self.language = Some(value.to_ascii_lowercase()),
            "--api-key-env" => self.api_key_env = Some(value),
            "--log-file" => self.log_file = Some(PathBuf::from(value)),
            _ => {}
        }
    }
}

pub fn global_config_path() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        if let Some(appdata) = std::env::var_os("APPDATA") {
            return PathBuf::from(appdata).join(APP_DIR).join("config");
        }
    }

    #[cfg(target_os = "macos")]
    {
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home)
                .join("Library")
                .join("Application Support")
                .join(APP_DIR)
                .join("config");
        }
    }

    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    {
        if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME") {
            return PathBuf::from(xdg).join(APP_DIR).join("config");
        }
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home)
                .join(".config")
                .join(APP_DIR)
                .join("config");
        }
    }

    PathBuf::from(LOCAL_FILE)
}

pub fn local_override_path() -> PathBuf {
    PathBuf::from(LOCAL_FILE)
}

pub fn load_config_flags(path: &Path) -> Result<ConfigFlags> {
    if !path.exists() {
        return Ok(ConfigFlags::default());
    }
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    let tokens = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .flat_map(|line| line.split_whitespace().map(ToOwned::to_owned))
        .collect::<Vec<_>>();
    Ok(parse_flag_tokens(&tokens))
}

pub fn save_config_flags(path: &Path, flags: &ConfigFlags) -> Result<()> {
    let mut lines = vec!["# textblocks defaults (saved with --save)".to_string()];
    if flags.no_outline {
        lines.push("--no-outline".to_string());
    }
    if flags.outline {
        lines.push("--outline".to_string());
    }
    if let Some(url) = &flags.api_url {
        lines.push(format!("--api-url {url}"));
    }
    if let Some(method) = &flags.method {
        lines.push(format!("--method {method}"));
    }
    if let Some(language) = &flags.language {
        lines.push(format!("--language {language}"));
    }
    if let Some(var) = &flags.api_key_env {
        lines.push(format!("--api-key-env {var}"));
    }
    if let Some(path) = &flags.log_file {
        lines.push(format!("--log-file {}", path.display()));
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create config dir {}", parent.display()))?;
    }
    fs::write(path, format!("{}\n", lines.join("\n")))
        .with_context(|| format!("Failed to write config {}", path.display()))
}

pub fn clear_config_flags(path: &Path) -> Result<()> {
    if path.exists() {
        fs::remove_file(path).with_context(|| format!("Failed to remove {}", path.display()))?;
    }
    Ok(())
}

/// Extract known flags from a token list. Unknown tokens are skipped.
///
/// Valued options accept both `--name value` and `--name=value`.
pub fn parse_flag_tokens(tokens: &[String]) -> ConfigFlags {
    let mut flags = ConfigFlags::default();
    let mut i = 0;
    while i < tokens.len() {
        match tokens[i].as_str() {
            "--no-outline" => flags.no_outline = true,
            "--outline" => flags.outline = true,
            _ => {
                if let Some((name, value, consumed)) = valued_option(tokens, i) {
                    flags.set_option(name, value);
                    i += consumed;
                    continue;
                }
            }
        }
        i += 1;
    }
    flags
}

const VALUED_OPTIONS: &[&str] = &[
    "--api-url",
    "--method",
    "--language",
    "--api-key-env",
    "--log-file",
];

/// Read a valued option at `i`. Returns the option name, its value and how
/// many tokens it used.
fn valued_option(tokens: &[String], i: usize) -> Option<(&'static str, String, usize)> {
    let token = tokens[i].as_str();
    for &name in VALUED_OPTIONS {
        if token == name {
            let value = tokens.get(i + 1)?;
            return Some((name, value.clone(), 2));
        }
        if let Some(value) = token
            .strip_prefix(name)
            .and_then(|rest| rest.strip_prefix('='))
        {
            return Some((name, value.to_string(), 1));
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn tokens(args: &[&str]) -> Vec<String> {
        args.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_parse_flag_tokens_extracts_known_flags() {
        let args = tokens(&[
            "textblocks",
            "--no-outline",
            "--api-url",
            "https://tts.example/api",
            "--method=put",
            "--language",
            "French",
            "--api-key-env=TTS_KEY",
            "--log-file",
            "tb.log",
            "notes.txt",
        ]);
        let flags = parse_flag_tokens(&args);
        assert!(flags.no_outline);
        assert!(!flags.outline);
        assert_eq!(flags.api_url.as_deref(), Some("https://tts.example/api"));
        assert_eq!(flags.method.as_deref(), Some("PUT"));
        assert_eq!(flags.language.as_deref(), Some("french"));
        assert_eq!(flags.api_key_env.as_deref(), Some("TTS_KEY"));
        assert_eq!(flags.log_file, Some(PathBuf::from("tb.log")));
    }

    #[test]
    fn test_valued_option_without_value_is_ignored() {
        let flags = parse_flag_tokens(&tokens(&["--api-url"]));
        assert_eq!(flags, ConfigFlags::default());
    }

    #[test]
    fn test_config_union_merges_cli_over_file_for_options() {
        let file = ConfigFlags {
            no_outline: true,
            language: Some("german".to_string()),
            api_url: Some("http://file".to_string()),
            ..ConfigFlags::default()
        };
        let cli = ConfigFlags {
            language: Some("dutch".to_string()),
            ..ConfigFlags::default()
        };
        let merged = file.union(&cli);
        assert!(merged.no_outline);
        assert_eq!(merged.language(), "dutch");
        assert_eq!(merged.api_url.as_deref(), Some("http://file"));
    }

    #[test]
    fn test_outline_visibility() {
        assert!(ConfigFlags::default().outline_visible());
        let hidden = ConfigFlags {
            no_outline: true,
            ..ConfigFlags::default()
        };
        assert!(!hidden.outline_visible());
        let both = ConfigFlags {
            outline: true,
            ..hidden
        };
        assert!(both.outline_visible());
    }

    #[test]
    fn test_api_settings_defaults() {
        let settings = ConfigFlags::default().api_settings();
        assert!(settings.url.is_empty());
        assert_eq!(settings.method, "POST");
        assert!(settings.api_key.is_none());
    }

    #[test]
    fn test_save_load_and_clear_config() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(".textblocksrc");
        let flags = ConfigFlags {
            outline: true,
            api_url: Some("http://localhost:8080/tts".to_string()),
            method: Some("PATCH".to_string()),
            language: Some("korean".to_string()),
            api_key_env: Some("TTS_KEY".to_string()),
            log_file: Some(PathBuf::from("tb.log")),
            ..ConfigFlags::default()
        };

        save_config_flags(&path, &flags).unwrap();
        let loaded = load_config_flags(&path).unwrap();
        assert_eq!(loaded, flags);

        clear_config_flags(&path).unwrap();
        assert!(!path.exists());
    }
}
