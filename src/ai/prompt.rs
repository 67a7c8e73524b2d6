//! Prompt building utilities for AI requests.
//!
//! The prompt is the same for every tier; the tier only selects which model
//! receives it.

/// System prompt that defines the AI assistant's behavior.
pub const SYSTEM_PROMPT: &str = r#"You are a shell command safety expert. You review commands that a user is about to run and explain, plainly and briefly, what they do and how risky they are.

You never execute commands. You always answer with a single JSON object and nothing else."#;

/// Build the analysis request for a single command.
///
/// The caller must reject blank input before getting here.
pub fn build_prompt(command: &str) -> String {
    let mut prompt = String::new();

    prompt.push_str("Analyze the following shell command:\n\n");
    prompt.push_str(command);
    prompt.push_str("\n\n");

    prompt.push_str("Provide:\n");
    prompt.push_str("1. A brief explanation of what the command does, in at most 4 sentences.\n");
    prompt.push_str(
        "2. A safety level: one of \"Safe\", \"Potentially Dangerous\" or \"Extremely Dangerous\".\n",
    );
    prompt.push_str("3. Up to 4 potential risks, as short bullet items.\n");
    prompt.push_str("4. Up to 4 recommendations for running it more safely, as short bullet items.\n\n");

    // Keys must match what the parser validates
    prompt.push_str("Format your response as a JSON object with these keys:\n");
    prompt.push_str("{\n");
    prompt.push_str("  \"explanation\": \"<explanation>\",\n");
    prompt.push_str("  \"safety\": \"<safety level>\",\n");
    prompt.push_str("  \"risks\": [\"<risk>\", ...],\n");
    prompt.push_str("  \"recommendations\": [\"<recommendation>\", ...]\n");
    prompt.push_str("}\n");

    prompt
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_prompt_embeds_command() {
        let prompt = build_prompt("rm -rf ./build");

        assert!(prompt.contains("\n\nrm -rf ./build\n\n"));
        assert!(prompt.contains("at most 4 sentences"));
        assert!(prompt.contains("Extremely Dangerous"));
    }

    #[test]
    fn test_build_prompt_requests_json_keys() {
        let prompt = build_prompt("ls");

        for key in ["\"explanation\"", "\"safety\"", "\"risks\"", "\"recommendations\""] {
            assert!(prompt.contains(key), "missing key {}", key);
        }
        assert!(prompt.contains("JSON object"));
    }

    #[test]
    fn test_build_prompt_is_deterministic() {
        assert_eq!(build_prompt("cat /etc/passwd"), build_prompt("cat /etc/passwd"));
    }

    #[test]
    fn test_build_prompt_keeps_command_literal() {
        let command = "echo \"$(whoami)\" | tee `date`.log";
        assert!(build_prompt(command).contains(command));
    }
}
