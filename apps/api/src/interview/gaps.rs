use serde::{Deserialize, Serialize};

use crate::models::resume::{ResumeRecord, Section};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    Name,
    Title,
    Email,
    Phone,
    Location,
    Company,
    Duration,
    Tools,
    Description,
    Skills,
    Degree,
    Institution,
    Year,
    Languages,
}

/// A required field that the record does not populate yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MissingField {
    pub section: Section,
    pub field: Field,
}

impl MissingField {
    pub const fn new(section: Section, field: Field) -> Self {
        Self { section, field }
    }
}

fn blank(value: &Option<String>) -> bool {
    value.as_deref().map_or(true, str::is_empty)
}

/// Lists unfilled fields in a fixed order. Only the first work and the first
/// education entry are inspected.
pub fn find_missing(record: &ResumeRecord) -> Vec<MissingField> {
    let mut missing = Vec::new();
    let mut push = |section, field| missing.push(MissingField::new(section, field));

    let info = &record.personal_info;
    for (value, field) in [
        (&info.name, Field::Name),
        (&info.title, Field::Title),
        (&info.email, Field::Email),
        (&info.phone, Field::Phone),
        (&info.location, Field::Location),
    ] {
        if blank(value) {
            push(Section::PersonalInfo, field);
        }
    }

    match record.work_experience.first() {
        None => {
            for field in [
                Field::Title,
                Field::Company,
                Field::Duration,
                Field::Tools,
                Field::Description,
            ] {
                push(Section::WorkExperience, field);
            }
        }
        Some(job) => {
            if job.title.is_empty() {
                push(Section::WorkExperience, Field::Title);
            }
            if job.company.is_empty() {
                push(Section::WorkExperience, Field::Company);
            }
            if !job.has_duration() {
                push(Section::WorkExperience, Field::Duration);
            }
            if job.tools.is_empty() {
                push(Section::WorkExperience, Field::Tools);
            }
            if job.description.is_empty() {
                push(Section::WorkExperience, Field::Description);
            }
        }
    }

    if record.skills.is_empty() {
        push(Section::Skills, Field::Skills);
    }

    match record.education.first() {
        None => {
            for field in [Field::Degree, Field::Institution, Field::Year] {
                push(Section::Education, field);
            }
        }
        Some(edu) => {
            if edu.degree.is_empty() {
                push(Section::Education, Field::Degree);
            }
            if edu.institution.is_empty() {
                push(Section::Education, Field::Institution);
            }
            if edu.year.is_empty() {
                push(Section::Education, Field::Year);
            }
        }
    }

    if record.languages.is_empty() {
        push(Section::Languages, Field::Languages);
    }

    missing
}
