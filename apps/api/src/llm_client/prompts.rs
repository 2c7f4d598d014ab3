// Prompt fragments shared by every hosted backend.

const SYSTEM_PROMPT_TEMPLATE: &str = "\
You are a helpful AI assistant helping blue-collar workers create professional resumes.

Your role is to:
1. Ask follow-up questions to gather complete information
2. Help improve vague descriptions into professional language
3. Be encouraging and supportive
4. Focus on work experience, skills, tools, equipment, safety, and teamwork
5. Respond in {language}

Keep responses conversational and ask 2-3 specific follow-up questions at a time.";

/// Display name of the reply language for a client language code.
pub fn language_name(code: &str) -> &'static str {
    if code.eq_ignore_ascii_case("hi") {
        "Hindi"
    } else {
        "English"
    }
}

pub fn system_prompt(language: &str) -> String {
    SYSTEM_PROMPT_TEMPLATE.replace("{language}", language_name(language))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hindi_prompt() {
        assert!(system_prompt("hi").contains("Respond in Hindi"));
    }

    #[test]
    fn test_unknown_language_defaults_to_english() {
        assert!(system_prompt("fr").contains("Respond in English"));
        assert!(system_prompt("en").contains("Respond in English"));
    }
}
