//! Rewrites informal first-person phrasing into résumé language.

use once_cell::sync::Lazy;
use regex::Regex;

const IMPROVEMENTS: &[(&str, &str)] = &[
    ("i deliver", "Delivered"),
    ("i work", "Worked"),
    ("i do", "Performed"),
    ("i help", "Assisted"),
    ("i make", "Manufactured"),
    ("i build", "Built"),
    ("i drive", "Operated delivery vehicles"),
    ("i use", "Utilized"),
    ("i know", "Demonstrated proficiency in"),
];

static SUBSTITUTIONS: Lazy<Vec<(Regex, &'static str)>> = Lazy::new(|| {
    IMPROVEMENTS
        .iter()
        .map(|(informal, professional)| {
            let pattern = format!(r"(?i)\b{}\b", regex::escape(informal));
            (
                Regex::new(&pattern).expect("improvement pattern must compile"),
                *professional,
            )
        })
        .collect()
});

/// Replaces the first occurrence of each informal phrase in table order.
/// Text outside the matched phrases is left as written.
pub fn improve_description(text: &str) -> String {
    SUBSTITUTIONS
        .iter()
        .fold(text.to_string(), |acc, (pattern, professional)| {
            pattern.replace(&acc, *professional).into_owned()
        })
}
