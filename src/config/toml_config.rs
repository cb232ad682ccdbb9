use crate::utils::error::{PetError, Result};
use crate::utils::validation::{validate_range, validate_url, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::OnceLock;

pub const DOG_API_URL: &str = "https://api.thedogapi.com/v1";
pub const CAT_API_URL: &str = "https://api.thecatapi.com/v1";
pub const DOG_CEO_URL: &str = "https://dog.ceo/api";
pub const PETFINDER_URL: &str = "https://api.petfinder.com/v2";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub http: HttpConfig,
    #[serde(default = "BreedApiConfig::dog")]
    pub dog_api: BreedApiConfig,
    #[serde(default = "BreedApiConfig::cat")]
    pub cat_api: BreedApiConfig,
    #[serde(default)]
    pub dog_ceo: DogCeoConfig,
    #[serde(default)]
    pub petfinder: PetfinderConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    pub timeout_seconds: u64,
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: 15,
            user_agent: concat!("pet-finder/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

/// TheDogAPI and TheCatAPI share one schema; only the base URL and key differ.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BreedApiConfig {
    pub base_url: String,
    #[serde(default)]
    pub api_key: Option<String>,
}

impl BreedApiConfig {
    pub fn dog() -> Self {
        Self {
            base_url: DOG_API_URL.to_string(),
            api_key: None,
        }
    }

    pub fn cat() -> Self {
        Self {
            base_url: CAT_API_URL.to_string(),
            api_key: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DogCeoConfig {
    pub base_url: String,
}

impl Default for DogCeoConfig {
    fn default() -> Self {
        Self {
            base_url: DOG_CEO_URL.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PetfinderConfig {
    pub base_url: String,
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
}

impl Default for PetfinderConfig {
    fn default() -> Self {
        Self {
            base_url: PETFINDER_URL.to_string(),
            client_id: None,
            client_secret: None,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            http: HttpConfig::default(),
            dog_api: BreedApiConfig::dog(),
            cat_api: BreedApiConfig::cat(),
            dog_ceo: DogCeoConfig::default(),
            petfinder: PetfinderConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load the configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(PetError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// Parse the configuration from a TOML string.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        let config: AppConfig = toml::from_str(&processed_content)
            .map_err(|e| PetError::config(format!("TOML parsing error: {}", e)))?;

        Ok(config.normalized())
    }

    /// Defaults plus credentials from the environment; used when no config
    /// file is given.
    pub fn from_env() -> Self {
        let env = |name: &str| std::env::var(name).ok();

        let mut config = AppConfig::default();
        config.dog_api.api_key = env("DOG_API_KEY");
        config.cat_api.api_key = env("CAT_API_KEY");
        config.petfinder.client_id = env("PETFINDER_CLIENT_ID");
        config.petfinder.client_secret = env("PETFINDER_CLIENT_SECRET");
        config.normalized()
    }

    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => {
                tracing::info!("📁 Loading configuration from: {}", path.display());
                Self::from_file(path)
            }
            None => {
                tracing::debug!("No config file given, using defaults and environment");
                Ok(Self::from_env())
            }
        }
    }

    /// Replace `${VAR}` references (e.g. `${DOG_API_KEY}`); unset variables are left as-is.
    fn substitute_env_vars(content: &str) -> String {
        static ENV_REF: OnceLock<Regex> = OnceLock::new();
        let re = ENV_REF.get_or_init(|| {
            Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)\}").expect("static regex")
        });

        re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        })
        .into_owned()
    }

    /// Blank secrets and `${VAR}` references left unresolved count as unset.
    fn normalized(mut self) -> Self {
        for slot in [
            &mut self.dog_api.api_key,
            &mut self.cat_api.api_key,
            &mut self.petfinder.client_id,
            &mut self.petfinder.client_secret,
        ] {
            let unset = slot
                .as_deref()
                .map(|v| v.trim().is_empty() || v.trim_start().starts_with("${"))
                .unwrap_or(false);
            if unset {
                *slot = None;
            }
        }
        self
    }
}

impl Validate for AppConfig {
    fn validate(&self) -> Result<()> {
        validate_url("dog_api.base_url", &self.dog_api.base_url)?;
        validate_url("cat_api.base_url", &self.cat_api.base_url)?;
        validate_url("dog_ceo.base_url", &self.dog_ceo.base_url)?;
        validate_url("petfinder.base_url", &self.petfinder.base_url)?;
        validate_range("http.timeout_seconds", self.http.timeout_seconds, 1, 300)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = AppConfig::from_toml_str("").unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.dog_api.base_url, DOG_API_URL);
        assert_eq!(config.http.timeout_seconds, 15);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_full_config() {
        let toml_content = r#"
[http]
timeout_seconds = 5

[dog_api]
base_url = "http://localhost:9000/v1"
api_key = "live_abc"

[petfinder]
client_id = "id-1"
client_secret = "secret-1"
"#;

        let config = AppConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.http.timeout_seconds, 5);
        assert!(config.http.user_agent.starts_with("pet-finder/"));
        assert_eq!(config.dog_api.base_url, "http://localhost:9000/v1");
        assert_eq!(config.dog_api.api_key.as_deref(), Some("live_abc"));
        assert_eq!(config.cat_api.base_url, CAT_API_URL);
        assert_eq!(config.petfinder.base_url, PETFINDER_URL);
        assert_eq!(config.petfinder.client_id.as_deref(), Some("id-1"));
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("PET_FINDER_TEST_DOG_KEY", "from-env");

        let toml_content = r#"
[dog_api]
base_url = "https://api.thedogapi.com/v1"
api_key = "${PET_FINDER_TEST_DOG_KEY}"

[petfinder]
client_id = "${PET_FINDER_TEST_UNSET_VARIABLE}"
"#;

        let config = AppConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.dog_api.api_key.as_deref(), Some("from-env"));
        assert_eq!(config.petfinder.client_id, None);

        std::env::remove_var("PET_FINDER_TEST_DOG_KEY");
    }

    #[test]
    fn test_config_validation() {
        let toml_content = r#"
[dog_ceo]
base_url = "invalid-url"
"#;
        let config = AppConfig::from_toml_str(toml_content).unwrap();
        assert!(config.validate().is_err());

        let zero_timeout = AppConfig::from_toml_str("[http]\ntimeout_seconds = 0\n").unwrap();
        assert!(zero_timeout.validate().is_err());
    }

    #[test]
    fn test_malformed_toml_is_config_error() {
        let err = AppConfig::from_toml_str("[http\ntimeout_seconds = ").unwrap_err();
        assert!(matches!(err, PetError::ConfigError { .. }));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[cat_api]\nbase_url = \"https://cats.example.com/v1\"\napi_key = \"  \"\n")
            .unwrap();

        let config = AppConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.cat_api.base_url, "https://cats.example.com/v1");
        assert_eq!(config.cat_api.api_key, None);
    }
}
