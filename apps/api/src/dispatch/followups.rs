use once_cell::sync::Lazy;
use regex::Regex;

const MAX_FOLLOW_UPS: usize = 3;
const MAX_QUESTION_CHARS: usize = 100;
const MIN_QUESTION_CHARS: usize = 10;

static ORDINAL_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*\d+[.)]\s*").expect("ordinal pattern must compile"));

/// Picks up to three short question lines from a model reply, in order.
pub fn extract_follow_up_questions(response: &str) -> Vec<String> {
    response
        .lines()
        .map(|line| ORDINAL_MARKER.replace(line, "").trim().to_string())
        .filter(|candidate| {
            let chars = candidate.chars().count();
            candidate.contains('?') && chars < MAX_QUESTION_CHARS && chars > MIN_QUESTION_CHARS
        })
        .take(MAX_FOLLOW_UPS)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_caps_at_three_in_order() {
        let response = "\
Great, thanks for sharing!
1. What was your exact job title?
2. How long did you work there?
3. Which tools did you use every day?
4. Did you lead a team of any size?
5. Do you hold any safety certifications?";
        assert_eq!(
            extract_follow_up_questions(response),
            vec![
                "What was your exact job title?",
                "How long did you work there?",
                "Which tools did you use every day?",
            ]
        );
    }

    #[test]
    fn test_long_and_tiny_lines_are_skipped() {
        let long = format!("{}?", "a".repeat(120));
        let response = format!("{long}\nWhy?\nWhere do you live now?");
        assert_eq!(
            extract_follow_up_questions(&response),
            vec!["Where do you live now?"]
        );
    }

    #[test]
    fn test_statements_are_not_questions() {
        assert!(extract_follow_up_questions("Thanks.\nTell me more about your job.").is_empty());
        assert!(extract_follow_up_questions("").is_empty());
    }
}
