use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const PLACEHOLDER_NAME: &str = "Your Name";
pub const PLACEHOLDER_TITLE: &str = "Professional";

/// Top-level sections of a [`ResumeRecord`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Section {
    PersonalInfo,
    WorkExperience,
    Skills,
    Education,
    Languages,
    Certifications,
}

impl Section {
    pub fn as_str(self) -> &'static str {
        match self {
            Section::PersonalInfo => "personalInfo",
            Section::WorkExperience => "workExperience",
            Section::Skills => "skills",
            Section::Education => "education",
            Section::Languages => "languages",
            Section::Certifications => "certifications",
        }
    }
}

impl std::fmt::Display for Section {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The structured résumé assembled from a conversation transcript.
///
/// Field names and nesting are consumed positionally by the document renderer,
/// so the serialized shape must stay camelCase and stable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeRecord {
    pub personal_info: PersonalInfo,
    pub work_experience: Vec<WorkExperience>,
    pub education: Vec<Education>,
    pub skills: Vec<String>,
    pub languages: Vec<Language>,
    pub certifications: Vec<Certification>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_info: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkExperience {
    pub title: String,
    pub company: String,
    pub description: String,
    #[serde(default)]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub end_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub achievements: Vec<String>,
    #[serde(default)]
    pub tools: Vec<String>,
}

impl WorkExperience {
    /// True once the entry carries something worth appending to the record.
    pub fn has_content(&self) -> bool {
        !self.title.is_empty()
            || !self.company.is_empty()
            || !self.description.is_empty()
            || !self.tools.is_empty()
    }

    /// Both dates present.
    pub fn has_duration(&self) -> bool {
        self.start_date.is_some() && self.end_date.is_some()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Education {
    pub degree: String,
    pub institution: String,
    pub year: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Language {
    pub language: String,
    pub proficiency: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Certification {
    pub name: String,
    pub year: String,
}

impl ResumeRecord {
    /// Resets one section to its empty state.
    pub fn clear_section(&mut self, section: Section) {
        match section {
            Section::PersonalInfo => self.personal_info = PersonalInfo::default(),
            Section::WorkExperience => self.work_experience.clear(),
            Section::Skills => self.skills.clear(),
            Section::Education => self.education.clear(),
            Section::Languages => self.languages.clear(),
            Section::Certifications => self.certifications.clear(),
        }
    }

    /// A record is worth returning when any section has content or a personal
    /// field holds something other than its placeholder default. The summary is
    /// always synthesized, so it does not count.
    pub fn has_meaningful_data(&self) -> bool {
        if !self.work_experience.is_empty() || !self.skills.is_empty() || !self.education.is_empty()
        {
            return true;
        }

        let info = &self.personal_info;
        [
            &info.name,
            &info.title,
            &info.email,
            &info.phone,
            &info.location,
            &info.additional_info,
        ]
        .into_iter()
        .flatten()
        .any(|value| {
            !value.is_empty() && value != PLACEHOLDER_NAME && value != PLACEHOLDER_TITLE
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_record_is_not_meaningful() {
        assert!(!ResumeRecord::default().has_meaningful_data());
    }

    #[test]
    fn test_placeholders_alone_are_not_meaningful() {
        let record = ResumeRecord {
            personal_info: PersonalInfo {
                name: Some(PLACEHOLDER_NAME.to_string()),
                title: Some(PLACEHOLDER_TITLE.to_string()),
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(!record.has_meaningful_data());
    }

    #[test]
    fn test_generated_summary_is_not_meaningful() {
        let record = ResumeRecord {
            personal_info: PersonalInfo {
                summary: Some("Experienced professional with ...".to_string()),
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(!record.has_meaningful_data());
    }

    #[test]
    fn test_real_email_is_meaningful() {
        let record = ResumeRecord {
            personal_info: PersonalInfo {
                email: Some("sam@example.com".to_string()),
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(record.has_meaningful_data());
    }

    #[test]
    fn test_record_serializes_camel_case_shape() {
        let record = ResumeRecord {
            work_experience: vec![WorkExperience {
                title: "Delivery Driver".to_string(),
                ..Default::default()
            }],
            ..Default::default()
        };
        let json = serde_json::to_value(&record).unwrap();
        assert!(json.get("personalInfo").is_some());
        assert!(json.get("certifications").is_some());
        let job = &json["workExperience"][0];
        assert_eq!(job["title"], "Delivery Driver");
        assert!(job.get("startDate").is_some());
        assert!(job["tools"].as_array().unwrap().is_empty());
    }
}
