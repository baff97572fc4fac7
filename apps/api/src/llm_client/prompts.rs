// Shared prompt fragments for text-model calls.
// Each service that needs model calls defines its own prompts.rs alongside it.

/// Closing instruction appended to prompts that expect a bare JSON document.
/// Titan has no system prompt, so this rides at the end of the user prompt.
pub const JSON_ONLY_INSTRUCTION: &str =
    "Do not include any explanations or text outside the JSON.";
