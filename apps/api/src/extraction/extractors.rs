//! Field extractors. Each one reads a single utterance and writes only into its
//! own section of the accumulating record.

use chrono::{DateTime, Duration, Utc};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::extraction::description::improve_description;
use crate::extraction::patterns::{capitalize, contains_any, title_case, Rule, RuleChain, Transform};
use crate::extraction::ExtractionError;
use crate::models::resume::{
    Certification, Education, Language, PersonalInfo, ResumeRecord, Section, WorkExperience,
};

const WORK_KEYWORDS: &[&str] = &["work", "job", "employed"];
const DESCRIPTION_KEYWORDS: &[&str] = &["responsible", "duties", "did"];
const EDUCATION_KEYWORDS: &[&str] = &["school", "college", "university", "training"];
const DEGREE_KEYWORDS: &[&str] = &["high school", "college", "university", "training", "certificate"];
const CERTIFICATION_KEYWORDS: &[&str] = &["certification", "certificate", "license"];

const SKILL_KEYWORDS: &[&str] = &[
    "tools",
    "equipment",
    "machines",
    "software",
    "certifications",
    "power tools",
    "hand tools",
    "safety",
    "teamwork",
    "communication",
    "problem solving",
    "attention to detail",
    "quality control",
];

/// Words that follow "I am" / "I'm" without being a name. Includes the
/// adjectives used by the canned quick replies.
const NOT_A_NAME: &[&str] = &[
    "a", "an", "the", "from", "in", "at", "not", "looking", "working", "based", "located",
    "living", "good", "willing", "able", "ready", "happy", "interested", "available", "fast",
    "new", "currently", "also", "still",
];

const DEFAULT_PROFICIENCY: &str = "Fluent";
const DAYS_PER_YEAR: i64 = 365;

static NAME: Lazy<RuleChain> = Lazy::new(|| {
    RuleChain::new(vec![
        Rule::new(r"(?i)my name is (\w+)", Transform::Capitalized).rejecting(NOT_A_NAME),
        Rule::new(r"(?i)\bi['’]m (\w+)", Transform::Capitalized).rejecting(NOT_A_NAME),
        Rule::new(r"(?i)\bi am (\w+)", Transform::Capitalized).rejecting(NOT_A_NAME),
        Rule::new(r"(?i)call me (\w+)", Transform::Capitalized).rejecting(NOT_A_NAME),
    ])
});

static EMAIL: Lazy<Rule> =
    Lazy::new(|| Rule::new(r"[\w.-]+@[\w.-]+\.\w+", Transform::Verbatim).group(0));

static PHONE: Lazy<Rule> =
    Lazy::new(|| Rule::new(r"([0-9]{3}[-.\s]?[0-9]{3}[-.\s]?[0-9]{4})", Transform::Verbatim));

static LOCATION: Lazy<RuleChain> = Lazy::new(|| {
    RuleChain::new(vec![
        Rule::new(r"(?i)i live in ([^,]+)", Transform::Trimmed),
        Rule::new(r"(?i)i['’]m from ([^,]+)", Transform::Trimmed),
        Rule::new(r"(?i)located in ([^,]+)", Transform::Trimmed),
        Rule::new(r"(?i)based in ([^,]+)", Transform::Trimmed),
    ])
});

/// One word, optionally followed by a role noun ("construction worker").
const ROLE_PHRASE: &str = r"(\w+(?:\s+(?:worker|driver|operator|laborer|labourer|helper|assistant|associate|technician|mechanic|cook|cleaner|electrician|plumber|carpenter|welder))?)";

static JOB_TITLE: Lazy<RuleChain> = Lazy::new(|| {
    RuleChain::new(vec![
        Rule::new(&format!(r"(?i)\bi was an? {ROLE_PHRASE}"), Transform::TitleCased),
        Rule::new(&format!(r"(?i)\bi worked as an? {ROLE_PHRASE}"), Transform::TitleCased),
        Rule::new(&format!(r"(?i)\bi am an? {ROLE_PHRASE}"), Transform::TitleCased),
        Rule::new(r"(?i)(\w+ worker)", Transform::TitleCased),
        Rule::new(r"(?i)(\w+ driver)", Transform::TitleCased),
        Rule::new(r"(?i)(\w+ operator)", Transform::TitleCased),
    ])
});

static COMPANY: Lazy<RuleChain> = Lazy::new(|| {
    RuleChain::new(vec![
        Rule::new(r"(?i)\bat (\p{L}\w*)", Transform::TitleCased),
        Rule::new(r"(?i)\bfor (\p{L}\w*)", Transform::TitleCased),
        Rule::new(r"(?i)\bwith (\p{L}\w*)", Transform::TitleCased),
    ])
});

static DURATION: Lazy<Vec<Rule>> = Lazy::new(|| {
    vec![
        Rule::new(r"(?i)([0-9]+) years?", Transform::Verbatim),
        Rule::new(r"(?i)([0-9]+) months?", Transform::Verbatim),
        Rule::new(r"(?i)\bfor ([0-9]+)", Transform::Verbatim),
    ]
});

static TOOLS: Lazy<Vec<Rule>> = Lazy::new(|| {
    vec![
        Rule::new(
            r"(?i)(?:used|operated|handled|worked with) ([a-z0-9\- ]+?)(?:\.|,|;|$)",
            Transform::Verbatim,
        ),
        Rule::new(
            r"(?i)(?:tools?|machines?|equipment) like ([a-z0-9\- ,]+)",
            Transform::Verbatim,
        ),
    ]
});

static TOOL_SEPARATOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i),| and ").expect("tool separator must compile"));

static FREE_SKILLS: Lazy<Vec<Rule>> = Lazy::new(|| {
    vec![
        Rule::new(r"(?i)(\w+ tools?)", Transform::TitleCased),
        Rule::new(r"(?i)(\w+ equipment)", Transform::TitleCased),
        Rule::new(r"(?i)(\w+ machines?)", Transform::TitleCased),
    ]
});

/// A 19xx/20xx year that is not the tail of a dashed number.
static YEAR: Lazy<Rule> =
    Lazy::new(|| Rule::new(r"(?:^|[^0-9-])((?:19|20)[0-9]{2})\b", Transform::Verbatim));

static LANGUAGE_PAIR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(\w+) and (\w+)").expect("language pattern must compile"));

static LANGUAGE_SINGLE: Lazy<Vec<Rule>> = Lazy::new(|| {
    vec![
        Rule::new(r"(?i)speak (\w+)", Transform::Capitalized),
        Rule::new(r"(?i)(\w+) language", Transform::Capitalized),
    ]
});

static CERTIFICATION_NAME: Lazy<RuleChain> = Lazy::new(|| {
    RuleChain::new(vec![
        Rule::new(r"(?i)(\w+ certification)", Transform::TitleCased),
        Rule::new(r"(?i)(\w+ license)", Transform::TitleCased),
        Rule::new(r"(?i)(\w+ certificate)", Transform::TitleCased),
    ])
});

/// A user utterance with its lower-cased form for keyword tests.
#[derive(Debug)]
pub struct Utterance<'a> {
    pub text: &'a str,
    pub lower: String,
}

impl<'a> Utterance<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            text,
            lower: text.to_lowercase(),
        }
    }
}

/// The fixed extractor set, in application order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Extractor {
    PersonalInfo,
    WorkExperience,
    Skills,
    Education,
    Languages,
    Certifications,
}

pub const EXTRACTORS: [Extractor; 6] = [
    Extractor::PersonalInfo,
    Extractor::WorkExperience,
    Extractor::Skills,
    Extractor::Education,
    Extractor::Languages,
    Extractor::Certifications,
];

impl Extractor {
    pub fn section(self) -> Section {
        match self {
            Extractor::PersonalInfo => Section::PersonalInfo,
            Extractor::WorkExperience => Section::WorkExperience,
            Extractor::Skills => Section::Skills,
            Extractor::Education => Section::Education,
            Extractor::Languages => Section::Languages,
            Extractor::Certifications => Section::Certifications,
        }
    }

    pub fn apply(
        self,
        utterance: &Utterance<'_>,
        now: DateTime<Utc>,
        record: &mut ResumeRecord,
    ) -> Result<(), ExtractionError> {
        match self {
            Extractor::PersonalInfo => {
                extract_personal_info(utterance, &mut record.personal_info);
                Ok(())
            }
            Extractor::WorkExperience => {
                if let Some(entry) = extract_work_experience(utterance, now)? {
                    record.work_experience.push(entry);
                }
                Ok(())
            }
            Extractor::Skills => {
                extract_skills(utterance, &mut record.skills);
                Ok(())
            }
            Extractor::Education => {
                record.education.extend(extract_education(utterance));
                Ok(())
            }
            Extractor::Languages => {
                record.languages.extend(extract_languages(utterance));
                Ok(())
            }
            Extractor::Certifications => {
                record.certifications.extend(extract_certification(utterance));
                Ok(())
            }
        }
    }
}

/// Singular fields keep the first value ever found.
pub fn extract_personal_info(utterance: &Utterance<'_>, info: &mut PersonalInfo) {
    let text = utterance.text;

    if info.name.is_none() {
        info.name = NAME.first_match(text);
    }
    if info.email.is_none() {
        info.email = EMAIL.apply(text);
    }
    if info.phone.is_none() {
        info.phone = PHONE.apply(text);
    }
    if info.location.is_none() {
        info.location = LOCATION.first_match(text);
    }
    if info.title.is_none() && contains_any(&utterance.lower, WORK_KEYWORDS) {
        info.title = JOB_TITLE.first_match(text);
    }
}

/// Builds one work entry from an utterance that talks about work. Returns
/// `None` when the utterance is off-topic or yields nothing usable.
pub fn extract_work_experience(
    utterance: &Utterance<'_>,
    now: DateTime<Utc>,
) -> Result<Option<WorkExperience>, ExtractionError> {
    if !contains_any(&utterance.lower, WORK_KEYWORDS) {
        return Ok(None);
    }
    let text = utterance.text;

    let mut entry = WorkExperience {
        title: JOB_TITLE.first_match(text).unwrap_or_default(),
        company: COMPANY.first_match(text).unwrap_or_default(),
        ..Default::default()
    };

    if let Some(raw) = DURATION.iter().find_map(|rule| rule.capture(text)) {
        let years: u32 = raw
            .parse()
            .map_err(|_| ExtractionError::Duration(raw.to_string()))?;
        if years > 0 {
            let span = Duration::try_days(i64::from(years) * DAYS_PER_YEAR)
                .ok_or(ExtractionError::DateRange { years })?;
            let start = now
                .checked_sub_signed(span)
                .ok_or(ExtractionError::DateRange { years })?;
            entry.start_date = Some(start);
            entry.end_date = Some(now);
        }
    }

    if contains_any(&utterance.lower, DESCRIPTION_KEYWORDS) {
        entry.description = improve_description(text);
    }

    for rule in TOOLS.iter() {
        if let Some(raw) = rule.capture(text) {
            entry.tools.extend(
                TOOL_SEPARATOR
                    .split(raw)
                    .map(str::trim)
                    .filter(|tool| !tool.is_empty())
                    .map(title_case),
            );
        }
    }

    Ok(entry.has_content().then_some(entry))
}

pub fn extract_skills(utterance: &Utterance<'_>, skills: &mut Vec<String>) {
    let found = SKILL_KEYWORDS
        .iter()
        .filter(|keyword| utterance.lower.contains(*keyword))
        .map(|keyword| title_case(keyword))
        .chain(FREE_SKILLS.iter().filter_map(|rule| rule.apply(utterance.text)));

    for skill in found {
        if !skills.contains(&skill) {
            skills.push(skill);
        }
    }
}

pub fn extract_education(utterance: &Utterance<'_>) -> Option<Education> {
    if !contains_any(&utterance.lower, EDUCATION_KEYWORDS) {
        return None;
    }
    let degree = DEGREE_KEYWORDS
        .iter()
        .find(|keyword| utterance.lower.contains(*keyword))
        .map(|keyword| title_case(keyword))?;

    Some(Education {
        degree,
        institution: String::new(),
        year: YEAR.apply(utterance.text).unwrap_or_default(),
    })
}

/// Every language pattern contributes; the pair pattern yields two entries.
/// Duplicates are removed later by the cleanup pass.
pub fn extract_languages(utterance: &Utterance<'_>) -> Vec<Language> {
    let text = utterance.text;
    let mut languages = Vec::new();

    let mut push = |raw: &str| {
        languages.push(Language {
            language: capitalize(raw),
            proficiency: DEFAULT_PROFICIENCY.to_string(),
        })
    };

    if let Some(name) = LANGUAGE_SINGLE[0].capture(text) {
        push(name);
    }
    if let Some(caps) = LANGUAGE_PAIR.captures(text) {
        push(&caps[1]);
        push(&caps[2]);
    }
    if let Some(name) = LANGUAGE_SINGLE[1].capture(text) {
        push(name);
    }

    languages
}

pub fn extract_certification(utterance: &Utterance<'_>) -> Option<Certification> {
    if !contains_any(&utterance.lower, CERTIFICATION_KEYWORDS) {
        return None;
    }
    let name = CERTIFICATION_NAME.first_match(utterance.text)?;

    Some(Certification {
        name,
        year: YEAR.apply(utterance.text).unwrap_or_default(),
    })
}
