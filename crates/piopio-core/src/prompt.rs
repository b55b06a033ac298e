//! System prompt builder for the relay persona.
//!
//! The prompt is a pure function of [`PersonaConfig`]: the same
//! configuration always yields the same string, byte for byte.

use piopio_types::persona::PersonaConfig;

/// Builds the system instruction injected ahead of every conversation.
///
/// Layout:
/// ```text
/// Eres {name}.
/// {style}
///
/// Reglas:
/// - Sé breve: máximo {max_sentences} frases.
/// - Tono: ...
/// - No uses markdown.
/// - Devuelve solo el texto de la respuesta, ...
/// ```
pub struct SystemPromptBuilder;

impl SystemPromptBuilder {
    pub fn build(persona: &PersonaConfig) -> String {
        let rules = [
            format!("Sé breve: máximo {} frases.", persona.max_sentences),
            "Tono: cálido, cercano, con toques tiernos (sin exagerar).".to_string(),
            "No uses markdown.".to_string(),
            "Devuelve solo el texto de la respuesta, sin comillas ni etiquetas.".to_string(),
        ];

        let rule_lines: Vec<String> = rules.iter().map(|r| format!("- {r}")).collect();

        format!(
            "Eres {}.\n{}\n\nReglas:\n{}",
            persona.name,
            persona.style,
            rule_lines.join("\n")
        )
        .trim()
        .to_string()
    }
}
