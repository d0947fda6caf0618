//! Configuration for the companion.
//!
//! Maps directly to `companion.toml`. Every section and field is optional;
//! missing values fall back to the defaults below.

use serde::{Deserialize, Serialize};

use crate::error::{CompanionError, Result};
use crate::persona::DEFAULT_NAME;
use crate::topics::DEFAULT_RECENT_CAPACITY;

/// Top-level configuration, loadable from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CompanionConfig {
    /// General settings.
    #[serde(default)]
    pub general: GeneralConfig,
    /// Initiative engine tuning.
    #[serde(default)]
    pub initiative: InitiativeConfig,
    /// Remote completion settings.
    #[serde(default)]
    pub llm: LlmConfig,
    /// Interactive session settings.
    #[serde(default)]
    pub session: SessionConfig,
}

impl CompanionConfig {
    /// Load configuration from a TOML string.
    ///
    /// # Errors
    /// Returns `CompanionError::Config` if the TOML is invalid or fails validation.
    pub fn from_toml(toml_str: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(toml_str).map_err(|e| CompanionError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &std::path::Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Check cross-field constraints.
    ///
    /// # Errors
    /// Returns `CompanionError::Config` describing the first violated constraint.
    pub fn validate(&self) -> Result<()> {
        self.initiative.validate()?;
        if self.llm.history_limit == 0 {
            return Err(CompanionError::Config(
                "llm.history_limit must be at least 1".into(),
            ));
        }
        if self.session.idle_prompt_secs == 0 {
            return Err(CompanionError::Config(
                "session.idle_prompt_secs must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Sub-configs
// ---------------------------------------------------------------------------

/// General settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Log level: trace, debug, info, warn, error.
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// The persona's name.
    #[serde(default = "default_persona_name")]
    pub persona_name: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            persona_name: default_persona_name(),
        }
    }
}

/// Weights of the initiative-need score. They sum to 1.0 by default.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InitiativeWeights {
    /// The user went quiet for longer than the pause threshold.
    pub pause_duration: f64,
    /// A run of short replies.
    pub short_messages: f64,
    /// Topic interest has sagged.
    pub low_interest: f64,
    /// The persona has energy to spare.
    pub high_energy: f64,
    /// Past initiatives landed well.
    pub initiative_success: f64,
}

impl Default for InitiativeWeights {
    fn default() -> Self {
        Self {
            pause_duration: 0.3,
            short_messages: 0.2,
            low_interest: 0.2,
            high_energy: 0.1,
            initiative_success: 0.2,
        }
    }
}

impl InitiativeWeights {
    fn all(&self) -> [f64; 5] {
        [
            self.pause_duration,
            self.short_messages,
            self.low_interest,
            self.high_energy,
            self.initiative_success,
        ]
    }
}

/// Initiative engine tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InitiativeConfig {
    /// Silence (seconds) after which the last message counts as a long pause.
    pub long_pause_secs: f64,
    /// Starting gap (seconds) between initiatives.
    pub initial_interval_secs: f64,
    /// Lower bound of the self-tuned gap.
    pub min_interval_secs: f64,
    /// Upper bound of the self-tuned gap.
    pub max_interval_secs: f64,
    /// Gap multiplier after a well-received initiative.
    pub success_interval_factor: f64,
    /// Gap multiplier after an ignored initiative.
    pub failure_interval_factor: f64,
    /// Score the weighted factors must exceed.
    pub score_threshold: f64,
    /// Factor weights.
    pub weights: InitiativeWeights,
    /// Messages shorter than this (chars) count as short.
    pub short_message_chars: usize,
    /// Short messages needed to saturate the short-message factor.
    pub short_message_saturation: u32,
    /// Short messages that, with a long pause, force an initiative.
    pub short_message_trigger: u32,
    /// Topic interest below this counts as low.
    pub low_interest_below: u8,
    /// Energy above this counts as high.
    pub high_energy_above: u8,
    /// Chance of steering to a favorite topic when one is available.
    pub favorite_topic_probability: f64,
    /// Size of the recent-topics window.
    pub recent_topic_capacity: usize,
    /// A reply longer than this (chars) makes an initiative successful.
    pub success_reply_chars: usize,
}

impl Default for InitiativeConfig {
    fn default() -> Self {
        Self {
            long_pause_secs: 20.0,
            initial_interval_secs: 60.0,
            min_interval_secs: 30.0,
            max_interval_secs: 180.0,
            success_interval_factor: 0.9,
            failure_interval_factor: 1.2,
            score_threshold: 0.6,
            weights: InitiativeWeights::default(),
            short_message_chars: 15,
            short_message_saturation: 3,
            short_message_trigger: 2,
            low_interest_below: 30,
            high_energy_above: 70,
            favorite_topic_probability: 0.3,
            recent_topic_capacity: DEFAULT_RECENT_CAPACITY,
            success_reply_chars: 20,
        }
    }
}

impl InitiativeConfig {
    /// Check the tuning is internally consistent.
    ///
    /// # Errors
    /// Returns `CompanionError::Config` describing the first violated constraint.
    pub fn validate(&self) -> Result<()> {
        let fail = |msg: &str| Err(CompanionError::Config(msg.to_string()));

        if !(self.min_interval_secs > 0.0 && self.min_interval_secs <= self.max_interval_secs) {
            return fail("initiative.min_interval_secs must be positive and <= max_interval_secs");
        }
        if !(self.min_interval_secs..=self.max_interval_secs).contains(&self.initial_interval_secs)
        {
            return fail("initiative.initial_interval_secs must lie within the interval bounds");
        }
        if !(self.success_interval_factor > 0.0 && self.success_interval_factor <= 1.0) {
            return fail("initiative.success_interval_factor must be in (0, 1]");
        }
        if self.failure_interval_factor < 1.0 {
            return fail("initiative.failure_interval_factor must be >= 1");
        }
        if !(0.0..=1.0).contains(&self.favorite_topic_probability) {
            return fail("initiative.favorite_topic_probability must be in [0, 1]");
        }
        if self.weights.all().iter().any(|w| !w.is_finite() || *w < 0.0) {
            return fail("initiative.weights must be finite and non-negative");
        }
        if self.short_message_saturation == 0 {
            return fail("initiative.short_message_saturation must be at least 1");
        }
        if self.recent_topic_capacity == 0 {
            return fail("initiative.recent_topic_capacity must be at least 1");
        }
        if !(self.long_pause_secs.is_finite() && self.long_pause_secs >= 0.0) {
            return fail("initiative.long_pause_secs must be finite and non-negative");
        }
        Ok(())
    }
}

/// Which remote completion backend to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    /// OpenAI-compatible `/v1/chat/completions` (needs an API key).
    OpenAi,
    /// Ollama `/api/chat` running locally.
    Ollama,
    /// Canned replies only.
    None,
}

/// Remote completion settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// Backend kind.
    pub provider: ProviderKind,
    /// Base URL; defaults depend on the provider when unset.
    pub base_url: Option<String>,
    /// Model name.
    pub model: String,
    /// Maximum tokens to generate per reply.
    pub max_tokens: u32,
    /// Sampling temperature.
    pub temperature: f32,
    /// Per-request timeout in milliseconds.
    pub timeout_ms: u64,
    /// Extra attempts after a failed request.
    pub max_retries: u32,
    /// Most recent conversation turns forwarded with each request.
    pub history_limit: usize,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: ProviderKind::OpenAi,
            base_url: None,
            model: "gpt-3.5-turbo".to_string(),
            max_tokens: 150,
            temperature: 0.7,
            timeout_ms: 30_000,
            max_retries: 1,
            history_limit: 10,
        }
    }
}

impl LlmConfig {
    /// Base URL to use, falling back to the provider's usual endpoint.
    #[must_use]
    pub fn resolved_base_url(&self) -> String {
        if let Some(url) = &self.base_url {
            return url.trim_end_matches('/').to_string();
        }
        match self.provider {
            ProviderKind::OpenAi => "https://api.openai.com".to_string(),
            ProviderKind::Ollama => "http://localhost:11434".to_string(),
            ProviderKind::None => String::new(),
        }
    }
}

/// Interactive session settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Seconds of silence at the prompt before the companion speaks up.
    pub idle_prompt_secs: u64,
    /// Inputs that end the session (matched case-insensitively).
    pub exit_commands: Vec<String>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            idle_prompt_secs: 40,
            exit_commands: vec!["exit".to_string(), "quit".to_string()],
        }
    }
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_persona_name() -> String {
    DEFAULT_NAME.to_string()
}
