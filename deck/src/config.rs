//! Configuration for the deck slideshow builder.
//!
//! Settings come from `DECK_*` environment variables (a `.env` file is
//! loaded by the binary first) or from the fluent [`DeckConfigBuilder`].
//! Everything is validated up front so a bad value fails before any agent
//! or NASA call is made.
//!
//! | variable | default |
//! |---|---|
//! | `DECK_APIM_ENDPOINT` | (required for agent commands) |
//! | `DECK_APIM_KEY` | (required for agent commands) |
//! | `DECK_DEPLOYMENT` | `gpt-4.1-mini` |
//! | `DECK_API_VERSION` | `2024-10-21` |
//! | `DECK_TEMPERATURE` | unset |
//! | `DECK_MAX_TOKENS` | unset |
//! | `DECK_MAX_ATTEMPTS` | `10` |
//! | `DECK_MAX_ITERATIONS` | `40`, or `3 * attempts + 2` when larger |
//! | `DECK_MAX_SEARCH_RESULTS` | `8` |
//! | `DECK_MAX_CANDIDATES` | `5` |
//! | `DECK_NASA_BASE_URL` | `https://images-api.nasa.gov` |
//! | `DECK_NASA_TIMEOUT_SECS` | `30` |
//! | `DECK_YEAR_START` / `DECK_YEAR_END` | `1960` / `2026` |
//! | `DECK_LOG_LEVEL` | `info` |
//! | `DECK_DEBUG_LEVEL` | `normal` |

use deck_model::azure::{DEFAULT_API_VERSION, DEFAULT_DEPLOYMENT};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// Upper bound for `max_attempts`.
pub const MAX_ATTEMPTS_LIMIT: u32 = 100;

/// Upper bound for `max_iterations` to prevent runaway loops.
pub const MAX_ITERATIONS_LIMIT: usize = 1000;

/// Upper bound for `max_tokens`.
pub const MAX_TOKENS_LIMIT: u32 = 1_000_000;

/// Default public NASA Images API.
pub const NASA_API_BASE: &str = "https://images-api.nasa.gov";

/// Validation error with context and suggestions.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// The field that failed validation
    pub field: String,
    /// Description of the error
    pub message: String,
    /// Suggested fix or valid values
    pub suggestion: Option<String>,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)?;
        if let Some(ref suggestion) = self.suggestion {
            write!(f, ". {}", suggestion)?;
        }
        Ok(())
    }
}

impl ValidationError {
    /// Create a new validation error.
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self { field: field.into(), message: message.into(), suggestion: None }
    }

    /// Attach a suggestion.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }
}

impl std::error::Error for ValidationError {}

/// Terminal output verbosity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DebugLevel {
    /// Only errors and the final result
    Minimal,
    /// Slide-by-slide progress
    #[default]
    Normal,
    /// Every workflow event
    Verbose,
    /// Everything, including graph steps and tracing output
    Debug,
}

impl DebugLevel {
    pub fn is_normal(&self) -> bool {
        !matches!(self, Self::Minimal)
    }

    pub fn is_verbose(&self) -> bool {
        matches!(self, Self::Verbose | Self::Debug)
    }

    pub fn is_debug(&self) -> bool {
        matches!(self, Self::Debug)
    }
}

impl fmt::Display for DebugLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Minimal => "minimal",
            Self::Normal => "normal",
            Self::Verbose => "verbose",
            Self::Debug => "debug",
        };
        f.write_str(name)
    }
}

impl FromStr for DebugLevel {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "minimal" => Ok(Self::Minimal),
            "normal" => Ok(Self::Normal),
            "verbose" => Ok(Self::Verbose),
            "debug" => Ok(Self::Debug),
            other => Err(ValidationError::new("debug_level", format!("Unknown level '{other}'"))
                .with_suggestion("Use one of: minimal, normal, verbose, debug")),
        }
    }
}

/// Chat model access through the API Management gateway.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelSettings {
    /// Gateway endpoint including the `/openai` suffix
    pub endpoint: String,
    /// Subscription key sent as the `api-key` header
    #[serde(skip_serializing)]
    pub api_key: String,
    pub deployment: String,
    pub api_version: String,
    pub temperature: Option<f32>,
    pub max_tokens: Option<u32>,
}

impl Default for ModelSettings {
    fn default() -> Self {
        Self {
            endpoint: String::new(),
            api_key: String::new(),
            deployment: DEFAULT_DEPLOYMENT.to_string(),
            api_version: DEFAULT_API_VERSION.to_string(),
            temperature: None,
            max_tokens: None,
        }
    }
}

impl ModelSettings {
    /// Validate values that are present; credentials are checked separately.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.endpoint.is_empty()
            && !self.endpoint.starts_with("http://")
            && !self.endpoint.starts_with("https://")
        {
            return Err(ValidationError::new(
                "endpoint",
                format!("Endpoint '{}' must start with http:// or https://", self.endpoint),
            )
            .with_suggestion("Use the gateway URL, e.g. https://apim-xxx.azure-api.net/openai"));
        }

        if self.deployment.trim().is_empty() {
            return Err(ValidationError::new("deployment", "Deployment name cannot be empty")
                .with_suggestion(format!("Set DECK_DEPLOYMENT or use default '{DEFAULT_DEPLOYMENT}'")));
        }

        if let Some(temp) = self.temperature {
            if !temp.is_finite() || !(0.0..=2.0).contains(&temp) {
                return Err(ValidationError::new(
                    "temperature",
                    format!("Temperature {temp} is outside 0.0..=2.0"),
                ));
            }
        }

        if let Some(tokens) = self.max_tokens {
            if tokens == 0 || tokens > MAX_TOKENS_LIMIT {
                return Err(ValidationError::new(
                    "max_tokens",
                    format!("Max tokens {tokens} must be between 1 and {MAX_TOKENS_LIMIT}"),
                ));
            }
        }

        Ok(())
    }

    /// Agent commands need both endpoint and key.
    pub fn require_credentials(&self) -> Result<(), ValidationError> {
        if self.endpoint.is_empty() {
            return Err(ValidationError::new("endpoint", "No model endpoint configured")
                .with_suggestion("Set DECK_APIM_ENDPOINT to your API Management gateway URL"));
        }
        if self.api_key.is_empty() {
            return Err(ValidationError::new("api_key", "No model API key configured")
                .with_suggestion("Set DECK_APIM_KEY to your subscription key"));
        }
        Ok(())
    }
}

/// Limits for the per-slide selection workflow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkflowSettings {
    /// Search/select/review attempts before the judge decides
    pub max_attempts: u32,
    /// Hard ceiling on workflow steps per slide
    pub max_iterations: usize,
    /// Images requested per search
    pub max_search_results: usize,
    /// Candidates shown to the researcher
    pub max_candidates: usize,
}

impl Default for WorkflowSettings {
    fn default() -> Self {
        Self { max_attempts: 10, max_iterations: 40, max_search_results: 8, max_candidates: 5 }
    }
}

impl WorkflowSettings {
    /// Steps needed to exhaust every attempt and still reach the judge.
    pub fn recommended_iterations(&self) -> usize {
        3 * self.max_attempts as usize + 2
    }

    /// Raise `max_iterations` so every attempt and the judge fit under it.
    pub fn cover_attempts(&mut self) {
        self.max_iterations = self.max_iterations.max(self.recommended_iterations());
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.max_attempts == 0 || self.max_attempts > MAX_ATTEMPTS_LIMIT {
            return Err(ValidationError::new(
                "max_attempts",
                format!("Max attempts {} must be between 1 and {MAX_ATTEMPTS_LIMIT}", self.max_attempts),
            )
            .with_suggestion("Set DECK_MAX_ATTEMPTS (recommended: 10)"));
        }

        if self.max_iterations == 0 {
            return Err(ValidationError::new("max_iterations", "Max iterations must be greater than 0")
                .with_suggestion(format!(
                    "Set DECK_MAX_ITERATIONS to at least {}",
                    self.recommended_iterations()
                )));
        }

        if self.max_iterations > MAX_ITERATIONS_LIMIT {
            return Err(ValidationError::new(
                "max_iterations",
                format!(
                    "Max iterations {} exceeds safety limit of {}",
                    self.max_iterations, MAX_ITERATIONS_LIMIT
                ),
            )
            .with_suggestion(format!(
                "Use a value between 1 and {} to prevent runaway loops",
                MAX_ITERATIONS_LIMIT
            )));
        }

        if self.max_search_results == 0 {
            return Err(ValidationError::new("max_search_results", "Must request at least 1 image"));
        }

        if self.max_candidates == 0 {
            return Err(ValidationError::new("max_candidates", "Must show at least 1 candidate"));
        }

        Ok(())
    }
}

/// NASA Images API access.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NasaSettings {
    pub base_url: String,
    pub timeout_secs: u64,
    pub year_start: u16,
    pub year_end: u16,
}

impl Default for NasaSettings {
    fn default() -> Self {
        Self { base_url: NASA_API_BASE.to_string(), timeout_secs: 30, year_start: 1960, year_end: 2026 }
    }
}

impl NasaSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(ValidationError::new(
                "nasa_base_url",
                format!("Base URL '{}' must start with http:// or https://", self.base_url),
            )
            .with_suggestion(format!("Use the default '{NASA_API_BASE}'")));
        }

        if self.timeout_secs == 0 {
            return Err(ValidationError::new("nasa_timeout_secs", "Timeout must be greater than 0"));
        }

        if self.year_start > self.year_end {
            return Err(ValidationError::new(
                "year_start",
                format!("Year range {}..{} is empty", self.year_start, self.year_end),
            ));
        }

        Ok(())
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TelemetryConfig {
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self { log_level: "info".to_string() }
    }
}

impl TelemetryConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.to_lowercase().as_str()) {
            return Err(ValidationError::new(
                "log_level",
                format!("Invalid log level '{}'", self.log_level),
            )
            .with_suggestion(format!("Valid log levels: {:?}", valid_levels)));
        }
        Ok(())
    }
}

/// Main configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeckConfig {
    pub model: ModelSettings,
    pub workflow: WorkflowSettings,
    pub nasa: NasaSettings,
    pub telemetry: TelemetryConfig,
    pub debug_level: DebugLevel,
}

impl DeckConfig {
    /// Create a builder starting from defaults.
    pub fn builder() -> DeckConfigBuilder {
        DeckConfigBuilder::default()
    }

    /// Load and validate configuration from `DECK_*` environment variables.
    pub fn from_env() -> Result<Self, ValidationError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load and validate configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ValidationError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(endpoint) = lookup("DECK_APIM_ENDPOINT") {
            config.model.endpoint = endpoint.trim_end_matches('/').to_string();
        }
        if let Some(key) = lookup("DECK_APIM_KEY") {
            config.model.api_key = key;
        }
        if let Some(deployment) = lookup("DECK_DEPLOYMENT") {
            config.model.deployment = deployment;
        }
        if let Some(version) = lookup("DECK_API_VERSION") {
            config.model.api_version = version;
        }
        config.model.temperature = parse_var(&lookup, "DECK_TEMPERATURE", "temperature")?;
        config.model.max_tokens = parse_var(&lookup, "DECK_MAX_TOKENS", "max_tokens")?;

        if let Some(v) = parse_var(&lookup, "DECK_MAX_ATTEMPTS", "max_attempts")? {
            config.workflow.max_attempts = v;
        }
        match parse_var(&lookup, "DECK_MAX_ITERATIONS", "max_iterations")? {
            Some(v) => config.workflow.max_iterations = v,
            None => config.workflow.cover_attempts(),
        }
        if let Some(v) = parse_var(&lookup, "DECK_MAX_SEARCH_RESULTS", "max_search_results")? {
            config.workflow.max_search_results = v;
        }
        if let Some(v) = parse_var(&lookup, "DECK_MAX_CANDIDATES", "max_candidates")? {
            config.workflow.max_candidates = v;
        }

        if let Some(url) = lookup("DECK_NASA_BASE_URL") {
            config.nasa.base_url = url.trim_end_matches('/').to_string();
        }
        if let Some(v) = parse_var(&lookup, "DECK_NASA_TIMEOUT_SECS", "nasa_timeout_secs")? {
            config.nasa.timeout_secs = v;
        }
        if let Some(v) = parse_var(&lookup, "DECK_YEAR_START", "year_start")? {
            config.nasa.year_start = v;
        }
        if let Some(v) = parse_var(&lookup, "DECK_YEAR_END", "year_end")? {
            config.nasa.year_end = v;
        }

        if let Some(level) = lookup("DECK_LOG_LEVEL") {
            config.telemetry.log_level = level;
        }
        if let Some(level) = lookup("DECK_DEBUG_LEVEL") {
            config.debug_level = level.parse()?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Validate every section.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.model.validate()?;
        self.workflow.validate()?;
        self.nasa.validate()?;
        self.telemetry.validate()?;

        if self.workflow.max_iterations < self.workflow.recommended_iterations() {
            return Err(ValidationError::new(
                "max_iterations",
                format!(
                    "Max iterations {} cannot reach the judge after {} attempts",
                    self.workflow.max_iterations, self.workflow.max_attempts
                ),
            )
            .with_suggestion(format!(
                "Set DECK_MAX_ITERATIONS to at least {} or unset it",
                self.workflow.recommended_iterations()
            )));
        }

        Ok(())
    }
}

fn parse_var<T, F>(lookup: &F, var: &str, field: &str) -> Result<Option<T>, ValidationError>
where
    T: FromStr,
    T::Err: fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    match lookup(var) {
        None => Ok(None),
        Some(raw) => raw.trim().parse().map(Some).map_err(|e| {
            ValidationError::new(field, format!("Invalid {var} '{raw}': {e}"))
                .with_suggestion(format!("Unset {var} to use the default"))
        }),
    }
}

/// Builder for DeckConfig with fluent API.
#[derive(Debug, Clone, Default)]
pub struct DeckConfigBuilder {
    config: DeckConfig,
}

impl DeckConfigBuilder {
    /// Set the gateway endpoint and key.
    pub fn endpoint(mut self, endpoint: impl Into<String>, api_key: impl Into<String>) -> Self {
        self.config.model.endpoint = endpoint.into();
        self.config.model.api_key = api_key.into();
        self
    }

    /// Set the model deployment name.
    pub fn deployment(mut self, deployment: impl Into<String>) -> Self {
        self.config.model.deployment = deployment.into();
        self
    }

    /// Set the attempt budget per slide, raising the step ceiling to match.
    pub fn max_attempts(mut self, attempts: u32) -> Self {
        self.config.workflow.max_attempts = attempts;
        self.config.workflow.cover_attempts();
        self
    }

    /// Set the per-slide step ceiling.
    pub fn max_iterations(mut self, iterations: usize) -> Self {
        self.config.workflow.max_iterations = iterations;
        self
    }

    /// Set the NASA API base URL.
    pub fn nasa_base_url(mut self, url: impl Into<String>) -> Self {
        self.config.nasa.base_url = url.into();
        self
    }

    /// Set the output verbosity.
    pub fn debug_level(mut self, level: DebugLevel) -> Self {
        self.config.debug_level = level;
        self
    }

    /// Build the configuration, validating it first.
    pub fn build(self) -> Result<DeckConfig, ValidationError> {
        self.config.validate()?;
        Ok(self.config)
    }

    /// Build the configuration without validation.
    pub fn build_unchecked(self) -> DeckConfig {
        self.config
    }
}
