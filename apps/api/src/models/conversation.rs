use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TurnType {
    User,
    Ai,
}

/// One entry of the client-held transcript. The service never stores these;
/// every request carries the full history.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationTurn {
    #[serde(rename = "type")]
    pub turn_type: TurnType,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_thinking: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub follow_up_questions: Option<Vec<String>>,
}

impl ConversationTurn {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            turn_type: TurnType::User,
            text: text.into(),
            timestamp: None,
            is_thinking: None,
            follow_up_questions: None,
        }
    }

    #[cfg(test)]
    pub fn ai(text: impl Into<String>) -> Self {
        Self {
            turn_type: TurnType::Ai,
            ..Self::user(text)
        }
    }

    pub fn is_user(&self) -> bool {
        self.turn_type == TurnType::User
    }
}

/// Texts of the user turns, in transcript order.
pub fn user_utterances(turns: &[ConversationTurn]) -> Vec<&str> {
    turns
        .iter()
        .filter(|t| t.is_user())
        .map(|t| t.text.as_str())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_turn_deserializes_client_shape() {
        let json = r#"{
            "type": "ai",
            "text": "What was your job title?",
            "timestamp": "2024-05-01T10:00:00Z",
            "isThinking": false,
            "followUpQuestions": ["I was a driver"]
        }"#;
        let turn: ConversationTurn = serde_json::from_str(json).unwrap();
        assert_eq!(turn.turn_type, TurnType::Ai);
        assert_eq!(turn.is_thinking, Some(false));
        assert_eq!(turn.follow_up_questions.unwrap().len(), 1);
    }

    #[test]
    fn test_user_utterances_skips_ai_turns() {
        let turns = vec![
            ConversationTurn::ai("Hi! Tell me about your work."),
            ConversationTurn::user("I drive trucks"),
            ConversationTurn::ai("Great."),
            ConversationTurn::user("for 4 years"),
        ];
        assert_eq!(user_utterances(&turns), vec!["I drive trucks", "for 4 years"]);
    }
}
