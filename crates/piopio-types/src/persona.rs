//! Persona configuration.
//!
//! `PersonaConfig` is process-wide and read-only after startup. All fields
//! have defaults matching the stock PíoPío character.

/// Character and output limits used for every chat call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonaConfig {
    pub name: String,
    pub style: String,

    /// Upper bound on sentences per answer, stated in the system prompt.
    pub max_sentences: u32,

    /// Output token cap sent with every completion request.
    pub max_output_tokens: u32,

    /// Completion model identifier.
    pub model: String,
}

pub const DEFAULT_PERSONA_NAME: &str = "PíoPío AI";
pub const DEFAULT_PERSONA_STYLE: &str =
    "Eres un pajarito tierno que responde con cariño, claridad y buena onda.";
pub const DEFAULT_MAX_SENTENCES: u32 = 2;
pub const DEFAULT_MAX_OUTPUT_TOKENS: u32 = 90;
pub const DEFAULT_MODEL: &str = "gpt-4.1-mini";

impl Default for PersonaConfig {
    fn default() -> Self {
        Self {
            name: DEFAULT_PERSONA_NAME.to_string(),
            style: DEFAULT_PERSONA_STYLE.to_string(),
            max_sentences: DEFAULT_MAX_SENTENCES,
            max_output_tokens: DEFAULT_MAX_OUTPUT_TOKENS,
            model: DEFAULT_MODEL.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_persona_default_values() {
        let persona = PersonaConfig::default();
        assert_eq!(persona.name, "PíoPío AI");
        assert_eq!(persona.max_sentences, 2);
        assert_eq!(persona.max_output_tokens, 90);
        assert_eq!(persona.model, "gpt-4.1-mini");
    }
}
