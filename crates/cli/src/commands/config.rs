use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use staffdesk_core::config::{AppConfig, LoadOptions};
use toml::Value;

struct ConfigLine {
    key: &'static str,
    env_key: &'static str,
    value: String,
}

pub fn run() -> String {
    let config = match AppConfig::load(LoadOptions::default()) {
        Ok(config) => config,
        Err(error) => return format!("config validation failed: {error}"),
    };

    let config_file_path = detect_config_path();
    let config_file_doc = load_config_file_doc(config_file_path.as_deref());

    let mut lines = vec!["effective config (source precedence: env > file > default):".to_string()];

    for line in config_lines(&config) {
        let source = field_source(
            line.key,
            Some(line.env_key),
            config_file_doc.as_ref(),
            config_file_path.as_deref(),
        );
        lines.push(render_line(line.key, &line.value, source));
    }

    lines.join("\n")
}

fn config_lines(config: &AppConfig) -> Vec<ConfigLine> {
    let llm_api_key = if config.llm.api_key.is_some() { "<redacted>" } else { "<unset>" };

    vec![
        ConfigLine {
            key: "database.url",
            env_key: "STAFFDESK_DATABASE_URL",
            value: config.database.url.clone(),
        },
        ConfigLine {
            key: "database.max_connections",
            env_key: "STAFFDESK_DATABASE_MAX_CONNECTIONS",
            value: config.database.max_connections.to_string(),
        },
        ConfigLine {
            key: "database.timeout_secs",
            env_key: "STAFFDESK_DATABASE_TIMEOUT_SECS",
            value: config.database.timeout_secs.to_string(),
        },
        ConfigLine {
            key: "llm.base_url",
            env_key: "STAFFDESK_LLM_BASE_URL",
            value: config.llm.base_url.clone(),
        },
        ConfigLine {
            key: "llm.model",
            env_key: "STAFFDESK_LLM_MODEL",
            value: config.llm.model.clone(),
        },
        ConfigLine {
            key: "llm.api_key",
            env_key: "STAFFDESK_LLM_API_KEY",
            value: llm_api_key.to_string(),
        },
        ConfigLine {
            key: "llm.timeout_secs",
            env_key: "STAFFDESK_LLM_TIMEOUT_SECS",
            value: config.llm.timeout_secs.to_string(),
        },
        ConfigLine {
            key: "logging.level",
            env_key: "STAFFDESK_LOGGING_LEVEL",
            value: config.logging.level.clone(),
        },
        ConfigLine {
            key: "logging.format",
            env_key: "STAFFDESK_LOGGING_FORMAT",
            value: format!("{:?}", config.logging.format),
        },
    ]
}

fn detect_config_path() -> Option<PathBuf> {
    let root = PathBuf::from("staffdesk.toml");
    if root.exists() {
        return Some(root);
    }

    let nested = PathBuf::from("config/staffdesk.toml");
    if nested.exists() {
        return Some(nested);
    }

    None
}

fn load_config_file_doc(path: Option<&Path>) -> Option<Value> {
    let path = path?;
    let raw = fs::read_to_string(path).ok()?;
    raw.parse::<Value>().ok()
}

fn field_source(
    key_path: &str,
    env_key: Option<&str>,
    config_file_doc: Option<&Value>,
    config_file_path: Option<&Path>,
) -> String {
    if let Some(env_key) = env_key {
        if env::var_os(env_key).is_some() {
            return format!("env ({env_key})");
        }
    }

    if let Some(doc) = config_file_doc {
        if contains_path(doc, key_path) {
            let file_path = config_file_path
                .map(|path| path.display().to_string())
                .unwrap_or_else(|| "config file".to_string());
            return format!("file ({file_path})");
        }
    }

    "default".to_string()
}

fn contains_path(root: &Value, key_path: &str) -> bool {
    let mut current = root;
    for key in key_path.split('.') {
        let Some(next) = current.get(key) else {
            return false;
        };
        current = next;
    }
    true
}

fn render_line(key: &str, value: &str, source: String) -> String {
    format!("- {key} = {value} (source: {source})")
}
