//! Command-line and environment configuration for the `piopio` binary.
//!
//! Every setting is a flag that falls back to an environment variable and
//! then to a default. `.env` is loaded before parsing, so its values count
//! as environment.

use std::time::Duration;

use clap::Parser;
use secrecy::SecretString;

use piopio_infra::llm::openai::DEFAULT_OPENAI_BASE_URL;
use piopio_infra::speech::elevenlabs::DEFAULT_ELEVENLABS_BASE_URL;
use piopio_observe::tracing_setup::LogFormat;
use piopio_types::persona::{
    DEFAULT_MAX_OUTPUT_TOKENS, DEFAULT_MAX_SENTENCES, DEFAULT_MODEL, DEFAULT_PERSONA_NAME,
    DEFAULT_PERSONA_STYLE, PersonaConfig,
};
use piopio_types::speech::{DEFAULT_SPEECH_MODEL, SpeechConfig};

/// Chat and text-to-speech relay for the PíoPío persona.
#[derive(Parser, Debug)]
#[command(name = "piopio", version, about, long_about = None)]
pub struct Cli {
    /// Interface to bind.
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to listen on.
    #[arg(long, env = "PORT", default_value_t = 3000)]
    pub port: u16,

    /// Comma-separated browser origins allowed to call the relay, or `*`.
    #[arg(long, env = "ALLOWED_ORIGIN", default_value = "*")]
    pub allowed_origin: String,

    #[arg(long, env = "PERSONA_NAME", default_value = DEFAULT_PERSONA_NAME)]
    pub persona_name: String,

    #[arg(long, env = "PERSONA_STYLE", default_value = DEFAULT_PERSONA_STYLE)]
    pub persona_style: String,

    /// Maximum sentences per answer, stated in the system prompt.
    #[arg(long, env = "MAX_SENTENCES", default_value_t = DEFAULT_MAX_SENTENCES)]
    pub max_sentences: u32,

    /// Output token cap per completion.
    #[arg(long, env = "MAX_OUTPUT_TOKENS", default_value_t = DEFAULT_MAX_OUTPUT_TOKENS)]
    pub max_output_tokens: u32,

    #[arg(long, env = "OPENAI_MODEL", default_value = DEFAULT_MODEL)]
    pub openai_model: String,

    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    pub openai_api_key: Option<String>,

    #[arg(long, env = "OPENAI_BASE_URL", default_value = DEFAULT_OPENAI_BASE_URL)]
    pub openai_base_url: String,

    #[arg(long, env = "ELEVENLABS_API_KEY", hide_env_values = true)]
    pub elevenlabs_api_key: Option<String>,

    #[arg(long, env = "ELEVENLABS_VOICE_ID")]
    pub elevenlabs_voice_id: Option<String>,

    #[arg(long, env = "ELEVENLABS_MODEL_ID", default_value = DEFAULT_SPEECH_MODEL)]
    pub elevenlabs_model_id: String,

    #[arg(long, env = "ELEVENLABS_BASE_URL", default_value = DEFAULT_ELEVENLABS_BASE_URL)]
    pub elevenlabs_base_url: String,

    /// Idle seconds before a session's history is discarded.
    #[arg(long, env = "SESSION_TTL_SECS", default_value_t = 1800)]
    pub session_ttl_secs: u64,

    /// Log output format: `pretty` or `json`.
    #[arg(long, env = "LOG_FORMAT", default_value_t = LogFormat::Pretty)]
    pub log_format: LogFormat,

    /// Export spans to stdout via OpenTelemetry.
    #[arg(long, env = "PIOPIO_OTEL")]
    pub otel: bool,

    /// Suppress all log output except errors.
    #[arg(short, long)]
    pub quiet: bool,

    /// Detailed output (-v for debug, -vv for trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    pub fn persona(&self) -> PersonaConfig {
        PersonaConfig {
            name: self.persona_name.clone(),
            style: self.persona_style.clone(),
            max_sentences: self.max_sentences,
            max_output_tokens: self.max_output_tokens,
            model: self.openai_model.clone(),
        }
    }

    pub fn speech_config(&self) -> SpeechConfig {
        SpeechConfig {
            api_key: non_blank(&self.elevenlabs_api_key).map(SecretString::from),
            voice_id: non_blank(&self.elevenlabs_voice_id),
            model_id: self.elevenlabs_model_id.clone(),
        }
    }

    pub fn openai_api_key(&self) -> Option<SecretString> {
        non_blank(&self.openai_api_key).map(SecretString::from)
    }

    pub fn session_ttl(&self) -> Duration {
        Duration::from_secs(self.session_ttl_secs)
    }

    /// Filter used when `RUST_LOG` is unset.
    pub fn default_log_filter(&self) -> &'static str {
        match self.verbose {
            0 if self.quiet => "error",
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    }
}

fn non_blank(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
