//! Ordered pattern rules. A `RuleChain` evaluates its rules in sequence and the
//! first rule that yields an accepted capture wins.

use regex::Regex;

/// How a captured phrase is turned into a stored value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transform {
    Verbatim,
    /// Whitespace and trailing sentence punctuation removed.
    Trimmed,
    /// First letter upper-cased, the rest untouched.
    Capitalized,
    /// Every word upper-cased at its first letter and lower-cased elsewhere.
    TitleCased,
}

impl Transform {
    pub fn apply(self, raw: &str) -> String {
        match self {
            Transform::Verbatim => raw.to_string(),
            Transform::Trimmed => raw
                .trim()
                .trim_end_matches(['.', '!', '?', ';'])
                .trim_end()
                .to_string(),
            Transform::Capitalized => capitalize(raw),
            Transform::TitleCased => title_case(raw),
        }
    }
}

/// A single pattern with the capture group it reads and the transform applied
/// to that capture. Captures found in `reject` (compared case-insensitively)
/// are skipped in favour of the next match of the same pattern.
#[derive(Debug)]
pub struct Rule {
    regex: Regex,
    group: usize,
    transform: Transform,
    reject: &'static [&'static str],
}

impl Rule {
    pub fn new(pattern: &str, transform: Transform) -> Self {
        Self {
            regex: Regex::new(pattern).expect("extraction pattern must compile"),
            group: 1,
            transform,
            reject: &[],
        }
    }

    pub fn group(mut self, group: usize) -> Self {
        self.group = group;
        self
    }

    pub fn rejecting(mut self, words: &'static [&'static str]) -> Self {
        self.reject = words;
        self
    }

    /// Raw text of the first accepted capture, before the transform.
    pub fn capture<'t>(&self, text: &'t str) -> Option<&'t str> {
        self.regex
            .captures_iter(text)
            .filter_map(|caps| caps.get(self.group))
            .map(|m| m.as_str())
            .find(|raw| {
                !self
                    .reject
                    .iter()
                    .any(|word| raw.trim().eq_ignore_ascii_case(word))
            })
    }

    pub fn apply(&self, text: &str) -> Option<String> {
        self.capture(text)
            .map(|raw| self.transform.apply(raw))
            .filter(|value| !value.is_empty())
    }

    pub fn is_match(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }
}

#[derive(Debug)]
pub struct RuleChain {
    rules: Vec<Rule>,
}

impl RuleChain {
    pub fn new(rules: Vec<Rule>) -> Self {
        Self { rules }
    }

    pub fn first_match(&self, text: &str) -> Option<String> {
        self.rules.iter().find_map(|rule| rule.apply(text))
    }
}

/// True if the lower-cased text contains any of the keywords.
pub fn contains_any(lower: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|k| lower.contains(k))
}

pub fn capitalize(raw: &str) -> String {
    let mut chars = raw.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

pub fn title_case(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut at_word_start = true;
    for c in raw.chars() {
        if c.is_alphanumeric() || c == '_' {
            if at_word_start {
                out.extend(c.to_uppercase());
            } else {
                out.extend(c.to_lowercase());
            }
            at_word_start = false;
        } else {
            out.push(c);
            at_word_start = true;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_case_normalizes_inner_capitals() {
        assert_eq!(title_case("BuildCo"), "Buildco");
        assert_eq!(title_case("power tools"), "Power Tools");
        assert_eq!(title_case("o'brien-smith"), "O'Brien-Smith");
    }

    #[test]
    fn test_capitalize_keeps_tail() {
        assert_eq!(capitalize("priya"), "Priya");
        assert_eq!(capitalize("mcAdams"), "McAdams");
        assert_eq!(capitalize(""), "");
    }

    #[test]
    fn test_trimmed_drops_trailing_punctuation() {
        assert_eq!(Transform::Trimmed.apply("  Austin. "), "Austin");
    }

    #[test]
    fn test_rule_skips_rejected_capture() {
        let rule = Rule::new(r"(?i)\bi am (\w+)", Transform::Capitalized).rejecting(&["a"]);
        assert_eq!(rule.apply("I am a driver, but I am sam"), Some("Sam".to_string()));
        assert_eq!(rule.apply("I am a driver"), None);
    }

    #[test]
    fn test_chain_order_decides_precedence() {
        let chain = RuleChain::new(vec![
            Rule::new(r"(?i)\bat (\w+)", Transform::TitleCased),
            Rule::new(r"(?i)\bfor (\w+)", Transform::TitleCased),
        ]);
        assert_eq!(
            chain.first_match("worked for Acme at Globex"),
            Some("Globex".to_string())
        );
        assert_eq!(chain.first_match("worked for Acme"), Some("Acme".to_string()));
    }
}
