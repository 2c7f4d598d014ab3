use crate::interview::gaps::{Field, MissingField};
use crate::models::resume::{ResumeRecord, Section};

pub const CLOSING_QUESTION: &str =
    "Thanks! We have most details. Would you like to add any certifications or achievements?";
pub const GENERIC_QUESTION: &str = "Please share any additional details you would like to include.";
pub const TRADE_TITLE_QUESTION: &str = "What was your exact job title? (e.g., Construction Laborer, Delivery Associate, Machine Operator)";

const TRADE_KEYWORDS: &[&str] = &["construction", "delivery", "factory", "driver", "operator"];

/// Question bound to each gap, in asking order. The first entry present in the
/// missing list wins.
const PRIORITY: &[(Section, Field, &str)] = &[
    (Section::PersonalInfo, Field::Name, "What is your full name?"),
    (Section::PersonalInfo, Field::Title, "What is your job title?"),
    (
        Section::WorkExperience,
        Field::Title,
        "What was your exact job title in your most recent job?",
    ),
    (
        Section::WorkExperience,
        Field::Company,
        "What was the company or employer name?",
    ),
    (
        Section::WorkExperience,
        Field::Duration,
        "How long did you work there? (e.g., 2 years, 8 months)",
    ),
    (
        Section::WorkExperience,
        Field::Tools,
        "What tools, machines, or equipment did you use on the job?",
    ),
    (
        Section::WorkExperience,
        Field::Description,
        "What were your main responsibilities? (e.g., operated machines, managed deliveries)",
    ),
    (Section::PersonalInfo, Field::Email, "What is your email address?"),
    (Section::PersonalInfo, Field::Phone, "What is your phone number?"),
    (
        Section::PersonalInfo,
        Field::Location,
        "What city and state are you located in?",
    ),
    (
        Section::Skills,
        Field::Skills,
        "List 3–5 skills or tools you are good at.",
    ),
    (
        Section::Education,
        Field::Degree,
        "What is your highest degree or training certificate?",
    ),
    (
        Section::Education,
        Field::Institution,
        "What is the name of the school or training center?",
    ),
    (Section::Education, Field::Year, "What year did you complete it?"),
    (Section::Languages, Field::Languages, "Which languages do you speak?"),
];

pub fn next_question(missing: &[MissingField], record: &ResumeRecord) -> String {
    if missing.is_empty() {
        return CLOSING_QUESTION.to_string();
    }

    let hit = PRIORITY
        .iter()
        .find(|(section, field, _)| missing.contains(&MissingField::new(*section, *field)));

    match hit {
        Some((Section::WorkExperience, Field::Title, _)) if mentions_trade(record) => {
            TRADE_TITLE_QUESTION.to_string()
        }
        Some((_, _, question)) => question.to_string(),
        None => GENERIC_QUESTION.to_string(),
    }
}

/// Whether the titles and descriptions already on the record name a trade.
fn mentions_trade(record: &ResumeRecord) -> bool {
    let mut text = record.personal_info.title.clone().unwrap_or_default();
    for job in &record.work_experience {
        text.push(' ');
        text.push_str(&job.title);
        text.push(' ');
        text.push_str(&job.description);
    }
    let text = text.to_lowercase();
    TRADE_KEYWORDS.iter().any(|k| text.contains(k))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::resume::WorkExperience;

    fn gap(section: Section, field: Field) -> MissingField {
        MissingField::new(section, field)
    }

    #[test]
    fn test_no_gaps_asks_closing_question() {
        assert_eq!(next_question(&[], &ResumeRecord::default()), CLOSING_QUESTION);
    }

    #[test]
    fn test_name_outranks_work_title() {
        let missing = [
            gap(Section::WorkExperience, Field::Title),
            gap(Section::PersonalInfo, Field::Name),
        ];
        assert_eq!(
            next_question(&missing, &ResumeRecord::default()),
            "What is your full name?"
        );
    }

    #[test]
    fn test_work_fields_outrank_contact_details() {
        let missing = [
            gap(Section::PersonalInfo, Field::Email),
            gap(Section::WorkExperience, Field::Tools),
        ];
        assert_eq!(
            next_question(&missing, &ResumeRecord::default()),
            "What tools, machines, or equipment did you use on the job?"
        );
    }

    #[test]
    fn test_trade_context_refines_title_question() {
        let record = ResumeRecord {
            work_experience: vec![WorkExperience {
                description: "Delivered parcels across the Delivery zone".into(),
                ..Default::default()
            }],
            ..Default::default()
        };
        let missing = [gap(Section::WorkExperience, Field::Title)];
        assert_eq!(next_question(&missing, &record), TRADE_TITLE_QUESTION);
        assert_eq!(
            next_question(&missing, &ResumeRecord::default()),
            "What was your exact job title in your most recent job?"
        );
    }

    #[test]
    fn test_unknown_gap_falls_back_to_generic_prompt() {
        let missing = [gap(Section::Certifications, Field::Name)];
        assert_eq!(
            next_question(&missing, &ResumeRecord::default()),
            GENERIC_QUESTION
        );
    }
}
