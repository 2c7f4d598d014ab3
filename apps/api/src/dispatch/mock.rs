//! Deterministic replies used when no hosted backend is available, or when
//! one refuses a turn for quota or credential reasons.

use crate::dispatch::TurnReply;
use crate::models::conversation::ConversationTurn;

/// A fixed reply with its quick-reply suggestions.
#[derive(Debug, Clone, Copy)]
pub struct CannedReply {
    pub text: &'static str,
    pub follow_ups: &'static [&'static str],
}

impl CannedReply {
    pub fn to_reply(self) -> TurnReply {
        TurnReply {
            text: self.text.to_string(),
            follow_up_questions: self.follow_ups.iter().map(|s| s.to_string()).collect(),
        }
    }
}

pub const INITIAL: CannedReply = CannedReply {
    text: "Great! I'd like to learn more about your work experience. Can you tell me:\n\n1. What was your exact job title?\n2. How long did you work there?\n3. What were your main responsibilities?",
    follow_ups: &[
        "I was a construction worker",
        "I worked as a delivery driver",
        "I was a factory machine operator",
    ],
};

pub const CONSTRUCTION: CannedReply = CannedReply {
    text: "Excellent! Construction work is valuable experience. Let me ask a few more questions:\n\n1. What type of construction did you do? (residential, commercial, roads, etc.)\n2. What tools and equipment did you use?\n3. Did you work with a team? How many people?\n4. Any safety certifications or training?",
    follow_ups: &[
        "Mostly residential buildings",
        "Road and bridge construction",
        "Commercial construction projects",
    ],
};

pub const DELIVERY: CannedReply = CannedReply {
    text: "Delivery work shows reliability and customer service skills! Tell me more:\n\n1. What did you deliver? (food, packages, documents, etc.)\n2. What area did you cover?\n3. Did you use any apps or GPS systems?\n4. How did you handle customer interactions?",
    follow_ups: &[
        "Food delivery for restaurants",
        "Package delivery for courier services",
        "Document delivery for offices",
    ],
};

pub const FACTORY: CannedReply = CannedReply {
    text: "Factory work demonstrates precision and attention to detail! I'd like to know:\n\n1. What type of products did you help manufacture?\n2. What machines or equipment did you operate?\n3. Did you work on an assembly line?\n4. Any quality control responsibilities?",
    follow_ups: &[
        "Automotive parts manufacturing",
        "Electronics assembly",
        "Food processing and packaging",
    ],
};

pub const ASK_WORK: CannedReply = CannedReply {
    text: "That's helpful information! Now let's talk about your work experience. What type of work have you done? Please tell me about your most recent or most relevant job.",
    follow_ups: &[
        "I worked in construction",
        "I was a delivery driver",
        "I worked in a factory",
    ],
};

pub const ASK_SKILLS: CannedReply = CannedReply {
    text: "Great! Now let's talk about your skills and what you're good at. What tools, equipment, or machines are you experienced with?",
    follow_ups: &[
        "I can use power tools",
        "I'm good with computers",
        "I have safety certifications",
    ],
};

pub const ASK_EDUCATION: CannedReply = CannedReply {
    text: "Excellent! Let's also include your education and training. What's your highest level of education? Any special training or certifications?",
    follow_ups: &[
        "High school diploma",
        "Some college courses",
        "Vocational training",
    ],
};

pub const FINAL_DETAILS: CannedReply = CannedReply {
    text: "You're doing great! I have most of the information I need. Just a few more questions:\n\n1. What languages do you speak?\n2. Are you willing to travel or relocate for work?\n3. Any additional information you'd like to include?",
    follow_ups: &[
        "I speak English and Spanish",
        "I'm willing to travel within the state",
        "I have a clean driving record",
    ],
};

/// Static answer for a turn whose backend failed for reasons other than quota.
pub const BASIC: CannedReply = CannedReply {
    text: "Thank you for that information! I'm here to help you create a great resume. Could you tell me more about your work experience, skills, or education?",
    follow_ups: &[
        "I have work experience",
        "I want to talk about my skills",
        "Let me tell you about my education",
    ],
};

/// Conversations this short still get the opening prompt.
const SHORT_CONVERSATION_TURNS: usize = 2;

/// Trade keywords checked against the current message, in order.
const TRADE_REPLIES: &[(&[&str], CannedReply)] = &[
    (&["construction", "builder"], CONSTRUCTION),
    (&["delivery", "driver"], DELIVERY),
    (&["factory", "manufacturing"], FACTORY),
];

/// Topics the contextual responder checks, in asking order. The first topic no
/// user turn has mentioned decides the reply.
const TOPICS: &[(&[&str], CannedReply)] = &[
    (&["work", "job"], ASK_WORK),
    (&["tools", "equipment"], ASK_SKILLS),
    (&["school", "training"], ASK_EDUCATION),
];

pub fn mock_reply(message: &str, history: &[ConversationTurn]) -> CannedReply {
    let lower = message.to_lowercase();

    if let Some((_, reply)) = TRADE_REPLIES
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|k| lower.contains(k)))
    {
        return *reply;
    }

    if history.len() <= SHORT_CONVERSATION_TURNS {
        return INITIAL;
    }

    contextual_reply(history)
}

pub fn contextual_reply(history: &[ConversationTurn]) -> CannedReply {
    let user_texts: Vec<String> = history
        .iter()
        .filter(|t| t.is_user())
        .map(|t| t.text.to_lowercase())
        .collect();

    let mentioned =
        |keywords: &[&str]| user_texts.iter().any(|text| keywords.iter().any(|k| text.contains(k)));

    TOPICS
        .iter()
        .find(|(keywords, _)| !mentioned(keywords))
        .map(|(_, reply)| *reply)
        .unwrap_or(FINAL_DETAILS)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transcript(user_lines: &[&str]) -> Vec<ConversationTurn> {
        user_lines
            .iter()
            .flat_map(|line| [ConversationTurn::ai("Tell me more."), ConversationTurn::user(*line)])
            .collect()
    }

    #[test]
    fn test_trade_keywords_win_over_history() {
        let long = transcript(&["a", "b", "c"]);
        assert_eq!(
            mock_reply("I was a Delivery driver", &long).text,
            DELIVERY.text
        );
        assert_eq!(mock_reply("home builder", &[]).text, CONSTRUCTION.text);
        assert_eq!(mock_reply("manufacturing line", &[]).text, FACTORY.text);
    }

    #[test]
    fn test_short_conversation_gets_initial_prompt() {
        assert_eq!(mock_reply("hello", &[]).text, INITIAL.text);
        assert_eq!(mock_reply("hello", &transcript(&["hi"])).text, INITIAL.text);
    }

    #[test]
    fn test_contextual_topics_in_order() {
        let history = transcript(&["hi", "my name is Ana"]);
        assert_eq!(mock_reply("ok", &history).text, ASK_WORK.text);

        let history = transcript(&["hi", "I had a job at a warehouse"]);
        assert_eq!(mock_reply("ok", &history).text, ASK_SKILLS.text);

        let history = transcript(&["my job was packing", "I used tools daily"]);
        assert_eq!(mock_reply("ok", &history).text, ASK_EDUCATION.text);

        let history = transcript(&["my job was packing", "I used tools", "high school"]);
        assert_eq!(mock_reply("ok", &history).text, FINAL_DETAILS.text);
    }

    #[test]
    fn test_ai_turns_do_not_count_as_topics() {
        let history = vec![
            ConversationTurn::ai("Tell me about your job and tools and school"),
            ConversationTurn::user("hi"),
            ConversationTurn::ai("?"),
        ];
        assert_eq!(contextual_reply(&history).text, ASK_WORK.text);
    }

    #[test]
    fn test_every_canned_reply_has_at_most_three_follow_ups() {
        for reply in [
            INITIAL,
            CONSTRUCTION,
            DELIVERY,
            FACTORY,
            ASK_WORK,
            ASK_SKILLS,
            ASK_EDUCATION,
            FINAL_DETAILS,
            BASIC,
        ] {
            assert!(!reply.text.is_empty());
            assert!(reply.follow_ups.len() <= 3);
        }
    }
}
