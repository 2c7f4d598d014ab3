use std::collections::HashSet;

use crate::models::resume::{ResumeRecord, WorkExperience, PLACEHOLDER_NAME, PLACEHOLDER_TITLE};

const SUMMARY_OPENING: &str = "Experienced professional with ";
const SUMMARY_CLOSING: &str = "Demonstrated ability to work effectively in team environments \
with strong attention to detail and commitment to safety standards.";
const SECONDS_PER_YEAR: f64 = 365.0 * 24.0 * 60.0 * 60.0;

/// Normalizes an assembled record. Running it twice changes nothing.
pub fn clean(record: &mut ResumeRecord) {
    dedup_in_order(&mut record.skills, |skill| skill.clone());
    for job in &mut record.work_experience {
        dedup_in_order(&mut job.tools, |tool| tool.clone());
    }
    dedup_in_order(&mut record.languages, |lang| lang.language.clone());

    let info = &mut record.personal_info;
    if info.name.as_deref().map_or(true, str::is_empty) {
        info.name = Some(PLACEHOLDER_NAME.to_string());
    }
    if info.title.as_deref().map_or(true, str::is_empty) {
        info.title = Some(PLACEHOLDER_TITLE.to_string());
    }
    if info.summary.as_deref().map_or(true, str::is_empty) {
        let summary = generate_summary(record);
        record.personal_info.summary = Some(summary);
    }
}

/// Keeps the first item for every key, preserving order.
fn dedup_in_order<T, K, F>(items: &mut Vec<T>, key: F)
where
    K: Eq + std::hash::Hash,
    F: Fn(&T) -> K,
{
    let mut seen = HashSet::new();
    items.retain(|item| seen.insert(key(item)));
}

/// Years on the record: exact span for dated entries, one year otherwise.
pub fn total_years(jobs: &[WorkExperience]) -> f64 {
    jobs.iter()
        .map(|job| match (job.start_date, job.end_date) {
            (Some(start), Some(end)) => (end - start).num_seconds() as f64 / SECONDS_PER_YEAR,
            _ => 1.0,
        })
        .sum()
}

pub fn generate_summary(record: &ResumeRecord) -> String {
    let mut summary = String::from(SUMMARY_OPENING);

    if !record.work_experience.is_empty() {
        let years = total_years(&record.work_experience).round() as i64;
        summary.push_str(&format!("{years} years of experience in "));
    }

    if !record.skills.is_empty() {
        let top: Vec<&str> = record.skills.iter().take(3).map(String::as_str).collect();
        summary.push_str(&format!("{}. ", top.join(", ")));
    }

    summary.push_str(SUMMARY_CLOSING);
    summary
}
