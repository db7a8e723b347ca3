// Model-format helpers shared by every prompt sent through the client.
// Each service that needs LLM calls defines its own prompts.rs alongside it.

const INST_OPEN: &str = "<s>[INST] ";
const INST_CLOSE: &str = " [/INST]";

/// Wraps a plain prompt in Mistral's instruct tags.
pub fn instruct(prompt: &str) -> String {
    format!("{INST_OPEN}{}{INST_CLOSE}", prompt.trim())
}
