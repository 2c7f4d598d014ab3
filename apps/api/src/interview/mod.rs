//! Gap analysis and next-question selection over an assembled record.

pub mod gaps;
pub mod questions;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::extraction::assemble;
use crate::interview::gaps::{find_missing, MissingField};
use crate::interview::questions::next_question;
use crate::models::conversation::{user_utterances, ConversationTurn};
use crate::models::resume::ResumeRecord;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NextQuestion {
    pub question: String,
    pub missing: Vec<MissingField>,
    /// `None` when the transcript carries nothing meaningful yet.
    pub resume_data: Option<ResumeRecord>,
}

/// Assembles the transcript and picks the question to ask next. Gaps are
/// computed on an empty record when there is no meaningful data.
pub fn plan_next_question(turns: &[ConversationTurn], now: DateTime<Utc>) -> NextQuestion {
    let resume_data = assemble(&user_utterances(turns), now).into_meaningful();
    let record = resume_data.clone().unwrap_or_default();
    let missing = find_missing(&record);
    let question = next_question(&missing, &record);

    NextQuestion {
        question,
        missing,
        resume_data,
    }
}
