use axum::http::HeaderValue;
use quill_writer::prompt::DEFAULT_MODEL;
use quill_writer::WriterConfig;

/// Environment variables that must be set; there are no defaults for secrets.
pub const REQUIRED_VARS: &[&str] = &["OPENAI_API_KEY", "DB_PASSWORD"];

/// Startup configuration failure. Lists every offending variable at once.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variables: {}", .0.join(", "))]
    Missing(Vec<&'static str>),

    #[error("Invalid environment variables: {}", .0.join("; "))]
    Invalid(Vec<String>),
}

/// A secret value whose `Debug` output is redacted.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Secret(String);

impl Secret {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl std::fmt::Debug for Secret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("***")
    }
}

/// PostgreSQL connection settings.
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: Secret,
    pub name: String,
    pub max_connections: u32,
}

/// Text-generation API settings.
#[derive(Debug, Clone)]
pub struct OpenAiConfig {
    pub api_key: Secret,
    pub api_url: String,
    pub model: String,
}

impl OpenAiConfig {
    pub fn writer_config(&self) -> WriterConfig {
        WriterConfig {
            api_key: self.api_key.expose().to_string(),
            api_url: self.api_url.clone(),
            model: self.model.clone(),
        }
    }
}

/// Server configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `5000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `120`). Generation calls
    /// routinely take tens of seconds.
    pub request_timeout_secs: u64,
    pub database: DatabaseConfig,
    pub openai: OpenAiConfig,
}

/// Accumulates malformed values while reading variables.
struct Reader<F> {
    lookup: F,
    invalid: Vec<String>,
}

impl<F: Fn(&str) -> Option<String>> Reader<F> {
    fn string(&self, key: &str, default: &str) -> String {
        (self.lookup)(key)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| default.to_string())
    }

    fn secret(&self, key: &str) -> Secret {
        Secret::new(self.string(key, ""))
    }

    fn parse<T: std::str::FromStr>(&mut self, key: &str, default: T) -> T {
        let raw = self.string(key, "");
        if raw.is_empty() {
            return default;
        }
        raw.parse().unwrap_or_else(|_| {
            self.invalid.push(format!("{key}={raw:?} is not a valid number"));
            default
        })
    }
}

/// Plain SQL identifier: `[A-Za-z_][A-Za-z0-9_]*`.
fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

impl ServerConfig {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::load(|key| std::env::var(key).ok())
    }

    /// Load configuration through `lookup`, with defaults.
    ///
    /// | Env Var                | Default                      |
    /// |------------------------|------------------------------|
    /// | `HOST`                 | `0.0.0.0`                    |
    /// | `PORT`                 | `5000`                       |
    /// | `CORS_ORIGINS`         | `http://localhost:5000`      |
    /// | `REQUEST_TIMEOUT_SECS` | `120`                        |
    /// | `DB_HOST`              | `localhost`                  |
    /// | `DB_PORT`              | `5432`                       |
    /// | `DB_USER`              | `postgres`                   |
    /// | `DB_PASSWORD`          | required                     |
    /// | `DB_NAME`              | `blog_generator`             |
    /// | `DB_MAX_CONNECTIONS`   | `5`                          |
    /// | `OPENAI_API_KEY`       | required                     |
    /// | `OPENAI_API_URL`       | `https://api.openai.com/v1`  |
    /// | `OPENAI_MODEL`         | `gpt-4o-mini`                |
    ///
    /// Malformed values are all reported in one [`ConfigError::Invalid`].
    /// Missing secrets are not an error here; see [`ServerConfig::validate`].
    pub fn load(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut reader = Reader {
            lookup,
            invalid: Vec::new(),
        };

        let host = reader.string("HOST", "0.0.0.0");
        let port = reader.parse("PORT", 5000u16);
        let request_timeout_secs = reader.parse("REQUEST_TIMEOUT_SECS", 120u64);

        let cors_origins: Vec<String> = reader
            .string("CORS_ORIGINS", "http://localhost:5000")
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        for origin in &cors_origins {
            if origin.parse::<HeaderValue>().is_err() {
                reader
                    .invalid
                    .push(format!("CORS_ORIGINS contains invalid origin {origin:?}"));
            }
        }

        let database = DatabaseConfig {
            host: reader.string("DB_HOST", "localhost"),
            port: reader.parse("DB_PORT", 5432u16),
            user: reader.string("DB_USER", "postgres"),
            password: reader.secret("DB_PASSWORD"),
            name: reader.string("DB_NAME", "blog_generator"),
            max_connections: reader.parse("DB_MAX_CONNECTIONS", 5u32),
        };
        if !is_identifier(&database.name) {
            reader.invalid.push(format!(
                "DB_NAME={:?} must contain only letters, digits and underscores",
                database.name
            ));
        }

        let openai = OpenAiConfig {
            api_key: reader.secret("OPENAI_API_KEY"),
            api_url: reader.string("OPENAI_API_URL", "https://api.openai.com/v1"),
            model: reader.string("OPENAI_MODEL", DEFAULT_MODEL),
        };

        if !reader.invalid.is_empty() {
            return Err(ConfigError::Invalid(reader.invalid));
        }

        Ok(Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            database,
            openai,
        })
    }

    /// Check every required secret is present, naming all missing ones.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let missing: Vec<&'static str> = REQUIRED_VARS
            .iter()
            .copied()
            .filter(|var| match *var {
                "OPENAI_API_KEY" => self.openai.api_key.is_empty(),
                "DB_PASSWORD" => self.database.password.is_empty(),
                _ => false,
            })
            .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Missing(missing))
        }
    }
}
