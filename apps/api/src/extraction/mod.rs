//! Résumé extraction: folds the fixed extractor set over every user utterance,
//! then normalizes the result.
//!
//! Extraction is deterministic for a given `now`; the record is rebuilt from
//! the whole transcript on every turn.

pub mod cleanup;
pub mod description;
pub mod extractors;
pub mod patterns;

use chrono::{DateTime, Utc};
use thiserror::Error;
use tracing::warn;

use crate::extraction::extractors::{Utterance, EXTRACTORS};
use crate::models::conversation::{user_utterances, ConversationTurn};
use crate::models::resume::{ResumeRecord, Section};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ExtractionError {
    #[error("duration '{0}' is not a usable count")]
    Duration(String),

    #[error("a span of {years} years falls outside the supported date range")]
    DateRange { years: u32 },
}

/// Output of one assembly pass. `degraded` lists sections whose extractor
/// failed; those sections are empty in `record`.
#[derive(Debug, Clone, PartialEq)]
pub struct Assembly {
    pub record: ResumeRecord,
    pub degraded: Vec<(Section, ExtractionError)>,
}

impl Assembly {
    pub fn is_degraded(&self, section: Section) -> bool {
        self.degraded.iter().any(|(s, _)| *s == section)
    }

    /// The record, or `None` when nothing meaningful was extracted.
    pub fn into_meaningful(self) -> Option<ResumeRecord> {
        self.record
            .has_meaningful_data()
            .then_some(self.record)
    }
}

pub fn assemble<S: AsRef<str>>(utterances: &[S], now: DateTime<Utc>) -> Assembly {
    let mut assembly = Assembly {
        record: ResumeRecord::default(),
        degraded: Vec::new(),
    };

    for raw in utterances {
        let utterance = Utterance::new(raw.as_ref());
        for extractor in EXTRACTORS {
            let section = extractor.section();
            if assembly.is_degraded(section) {
                continue;
            }
            if let Err(e) = extractor.apply(&utterance, now, &mut assembly.record) {
                warn!(section = %section, error = %e, "Extractor failed; section left empty");
                assembly.record.clear_section(section);
                assembly.degraded.push((section, e));
            }
        }
    }

    cleanup::clean(&mut assembly.record);
    assembly
}

/// Builds the record from the user turns of a transcript.
pub fn extract_resume_data(turns: &[ConversationTurn], now: DateTime<Utc>) -> Option<ResumeRecord> {
    assemble(&user_utterances(turns), now).into_meaningful()
}
