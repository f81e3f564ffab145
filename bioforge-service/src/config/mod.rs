use crate::models::model::{
    ModelMap, HUGGINGFACE_MODELS, MOCK_MODELS, OPENROUTER_MODELS, TOGETHER_MODELS,
};
use secrecy::Secret;
use service_core::config as core_config;
use service_core::error::AppError;
use service_core::middleware::AllowedOrigins;
use std::env;
use std::time::Duration;

const DEFAULT_UPSTREAM_TIMEOUT_SECS: u64 = 60;
const DEFAULT_TAVILY_BASE_URL: &str = "https://api.tavily.com";
const DEFAULT_OPENROUTER_REFERER: &str = "http://localhost:3001";
const DEFAULT_OPENROUTER_TITLE: &str = "AgentNet BioForge";

#[derive(Debug, Clone)]
pub struct BioforgeConfig {
    pub common: core_config::Config,
    pub generation: GenerationConfig,
    pub search: SearchConfig,
    pub upstream_timeout: Duration,
    pub cors_allowed_origins: AllowedOrigins,
}

#[derive(Debug, Clone)]
pub struct GenerationConfig {
    pub backend: GenerationBackend,
    pub api_key: Secret<String>,
    pub base_url: String,
    /// Sent as `HTTP-Referer` to OpenRouter for app attribution.
    pub referer: String,
    /// Sent as `X-Title` to OpenRouter for app attribution.
    pub title: String,
}

#[derive(Debug, Clone)]
pub struct SearchConfig {
    pub backend: SearchBackend,
    pub api_key: Secret<String>,
    pub base_url: String,
}

/// Hosted chat-completion API used for generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationBackend {
    OpenRouter,
    Together,
    HuggingFace,
    /// In-process echo provider, no credentials needed.
    Mock,
}

impl GenerationBackend {
    pub fn parse(value: &str) -> Result<Self, AppError> {
        match value.trim().to_ascii_lowercase().as_str() {
            "openrouter" => Ok(GenerationBackend::OpenRouter),
            "together" | "togetherai" => Ok(GenerationBackend::Together),
            "huggingface" | "hf" => Ok(GenerationBackend::HuggingFace),
            "mock" => Ok(GenerationBackend::Mock),
            other => Err(AppError::ConfigError(anyhow::anyhow!(
                "Unknown GENERATION_PROVIDER '{}'",
                other
            ))),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            GenerationBackend::OpenRouter => "openrouter",
            GenerationBackend::Together => "together",
            GenerationBackend::HuggingFace => "huggingface",
            GenerationBackend::Mock => "mock",
        }
    }

    pub fn default_base_url(self) -> &'static str {
        match self {
            GenerationBackend::OpenRouter => "https://openrouter.ai/api/v1",
            GenerationBackend::Together => "https://api.together.xyz/v1",
            GenerationBackend::HuggingFace => "https://router.huggingface.co/v1",
            GenerationBackend::Mock => "",
        }
    }

    pub fn models(self) -> &'static ModelMap {
        match self {
            GenerationBackend::OpenRouter => &OPENROUTER_MODELS,
            GenerationBackend::Together => &TOGETHER_MODELS,
            GenerationBackend::HuggingFace => &HUGGINGFACE_MODELS,
            GenerationBackend::Mock => &MOCK_MODELS,
        }
    }
}

/// Hosted web-search API used for evidence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchBackend {
    Tavily,
    Mock,
}

impl SearchBackend {
    pub fn parse(value: &str) -> Result<Self, AppError> {
        match value.trim().to_ascii_lowercase().as_str() {
            "tavily" => Ok(SearchBackend::Tavily),
            "mock" => Ok(SearchBackend::Mock),
            other => Err(AppError::ConfigError(anyhow::anyhow!(
                "Unknown SEARCH_PROVIDER '{}'",
                other
            ))),
        }
    }
}

impl BioforgeConfig {
    pub fn load() -> Result<Self, AppError> {
        let common_config = core_config::Config::load()?;
        Self::from_source(common_config, |key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup. `load` uses the
    /// process environment; tests pass a map.
    pub fn from_source<F>(common: core_config::Config, lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let is_prod = lookup("ENVIRONMENT").unwrap_or_else(|| "dev".to_string()) == "prod";
        let get = |key: &str, default: Option<&str>| get_var(&lookup, key, default, is_prod);

        let generation_backend =
            GenerationBackend::parse(&get("GENERATION_PROVIDER", Some("openrouter"))?)?;

        // Attribution headers are only sent to OpenRouter.
        let (referer, title) = if generation_backend == GenerationBackend::OpenRouter {
            (
                get("OPENROUTER_REFERER", Some(DEFAULT_OPENROUTER_REFERER))?,
                get("OPENROUTER_TITLE", Some(DEFAULT_OPENROUTER_TITLE))?,
            )
        } else {
            (
                DEFAULT_OPENROUTER_REFERER.to_string(),
                DEFAULT_OPENROUTER_TITLE.to_string(),
            )
        };
        let generation = GenerationConfig {
            backend: generation_backend,
            api_key: Secret::new(secret_for(
                &lookup,
                "GENERATION_API_KEY",
                generation_backend == GenerationBackend::Mock,
                is_prod,
            )?),
            base_url: trim_base(get(
                "GENERATION_BASE_URL",
                Some(generation_backend.default_base_url()),
            )?),
            referer,
            title,
        };

        let search_backend = SearchBackend::parse(&get("SEARCH_PROVIDER", Some("tavily"))?)?;
        let search = SearchConfig {
            backend: search_backend,
            api_key: Secret::new(secret_for(
                &lookup,
                "TAVILY_API_KEY",
                search_backend == SearchBackend::Mock,
                is_prod,
            )?),
            base_url: trim_base(get("TAVILY_BASE_URL", Some(DEFAULT_TAVILY_BASE_URL))?),
        };

        let timeout_secs = get(
            "UPSTREAM_TIMEOUT_SECS",
            Some(&DEFAULT_UPSTREAM_TIMEOUT_SECS.to_string()),
        )?;
        let timeout_secs: u64 = timeout_secs.parse().map_err(|e| {
            AppError::ConfigError(anyhow::anyhow!(
                "UPSTREAM_TIMEOUT_SECS '{}' is not a number: {}",
                timeout_secs,
                e
            ))
        })?;

        Ok(BioforgeConfig {
            common,
            generation,
            search,
            upstream_timeout: Duration::from_secs(timeout_secs),
            cors_allowed_origins: AllowedOrigins::parse(&get("CORS_ALLOWED_ORIGINS", Some("*"))?),
        })
    }
}

fn trim_base(url: String) -> String {
    url.trim_end_matches('/').to_string()
}

/// API keys have no default. They may be absent only for mock backends.
fn secret_for<F>(lookup: &F, key: &str, is_mock: bool, is_prod: bool) -> Result<String, AppError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key).filter(|v| !v.is_empty()) {
        Some(val) => Ok(val),
        None if is_mock => Ok(String::new()),
        None => get_var(lookup, key, None, is_prod),
    }
}

fn get_var<F>(lookup: &F, key: &str, default: Option<&str>, is_prod: bool) -> Result<String, AppError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(val) => Ok(val),
        None => {
            if is_prod {
                Err(AppError::ConfigError(anyhow::anyhow!(
                    "{} is required in production but not set",
                    key
                )))
            } else if let Some(def) = default {
                Ok(def.to_string())
            } else {
                Err(AppError::ConfigError(anyhow::anyhow!(
                    "{} is required but not set",
                    key
                )))
            }
        }
    }
}
