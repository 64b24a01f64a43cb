// ABOUTME: Context extraction from chat history using pattern matching
// ABOUTME: Pulls structured fitness stats out of the last message in a conversation
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Structured context extraction from free-text chat messages
//!
//! The mobile client embeds the user's live stats in the final message of
//! each conversation as a `userName=..., Goal=..., H=..cm, W=..kg,
//! Water_Today=..ml, Diet_Today=...` block. Extraction is all-or-nothing:
//! either every field matches and a full [`ExtractedContext`] is returned,
//! or `None` and the prompt builder falls back to defaults.
//!
//! The pattern is a single literal shape with no tolerance for reordered
//! or missing fields. A structured side-channel (explicit JSON fields in
//! the request) would be more robust; until the client sends one, this
//! parser stays deliberately strict.

use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

use crate::llm::ChatMessage;

// Field labels match case-insensitively; Diet_Today runs to a literal `]`
// or end of string so free-text values like "1500kcal / 40g protein" survive.
static CONTEXT_PATTERN: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(
        r"(?i)userName=(?P<first_name>.*?),\s*Goal=(?P<goal>.*?),\s*H=(?P<height>.*?)cm,\s*W=(?P<weight>.*?)kg,\s*Water_Today=(?P<water>.*?)ml,\s*Diet_Today=(?P<diet>.*?)(?:\]|$)",
    )
    .ok()
});

/// Live user stats parsed from the last chat message
///
/// All fields are kept as strings: the values flow straight into the
/// system instruction and are never used for arithmetic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedContext {
    /// User's first name
    pub first_name: String,
    /// Stated fitness goal
    pub goal: String,
    /// Height in centimeters
    pub height: String,
    /// Weight in kilograms
    pub weight: String,
    /// Water consumed today in milliliters
    pub water: String,
    /// Free-text nutrition summary for today
    pub diet: String,
}

/// Extract structured user context from the last message of a conversation
///
/// Returns `None` when the history is empty or the last message does not
/// contain the full context block. Partial matches never produce a partial
/// context. When the block appears more than once, only the first
/// occurrence is used.
#[must_use]
pub fn extract_user_context(messages: &[ChatMessage]) -> Option<ExtractedContext> {
    let last_content = match messages.last() {
        Some(message) => message.content.as_str(),
        None => {
            debug!("No messages in history, skipping context extraction");
            return None;
        }
    };

    let pattern = CONTEXT_PATTERN.as_ref()?;
    let captures = pattern.captures(last_content)?;

    let field = |name: &str| {
        captures
            .name(name)
            .map(|m| m.as_str().trim().to_owned())
            .unwrap_or_default()
    };

    let context = ExtractedContext {
        first_name: field("first_name"),
        goal: field("goal"),
        height: field("height"),
        weight: field("weight"),
        water: field("water"),
        diet: field("diet"),
    };

    debug!(user = %context.first_name, "Extracted live context from chat history");

    Some(context)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    fn history(content: &str) -> Vec<ChatMessage> {
        vec![ChatMessage::user(content)]
    }

    #[test]
    fn test_full_context_extracted_and_trimmed() {
        let messages = history(
            "userName=Sam, Goal=Hypertrophy, H=180cm, W=80kg, Water_Today=1200ml, Diet_Today=1500kcal / 40g protein]",
        );

        let context = extract_user_context(&messages).unwrap();
        assert_eq!(context.first_name, "Sam");
        assert_eq!(context.goal, "Hypertrophy");
        assert_eq!(context.height, "180");
        assert_eq!(context.weight, "80");
        assert_eq!(context.water, "1200");
        assert_eq!(context.diet, "1500kcal / 40g protein");
    }

    #[test]
    fn test_diet_terminates_at_end_of_string_without_bracket() {
        let messages = history(
            "userName=Ana, Goal=Endurance, H=165cm, W=60kg, Water_Today=800ml, Diet_Today=oats and eggs",
        );

        let context = extract_user_context(&messages).unwrap();
        assert_eq!(context.diet, "oats and eggs");
    }

    #[test]
    fn test_empty_history_returns_none() {
        assert!(extract_user_context(&[]).is_none());
    }

    #[test]
    fn test_missing_field_returns_none() {
        // Water_Today is absent; extraction is all-or-nothing
        let messages =
            history("userName=Sam, Goal=Hypertrophy, H=180cm, W=80kg, Diet_Today=1500kcal]");
        assert!(extract_user_context(&messages).is_none());
    }

    #[test]
    fn test_reordered_fields_return_none() {
        let messages = history(
            "Goal=Hypertrophy, userName=Sam, H=180cm, W=80kg, Water_Today=1200ml, Diet_Today=1500kcal]",
        );
        assert!(extract_user_context(&messages).is_none());
    }

    #[test]
    fn test_labels_match_case_insensitively() {
        let messages = history(
            "USERNAME=Sam, goal=Cutting, h=175cm, w=70kg, WATER_TODAY=500ml, diet_today=2000kcal]",
        );

        let context = extract_user_context(&messages).unwrap();
        assert_eq!(context.goal, "Cutting");
        assert_eq!(context.water, "500");
    }

    #[test]
    fn test_context_embedded_in_longer_message() {
        let messages = history(
            "Here are my stats [userName=Sam, Goal=Hypertrophy, H=180cm, W=80kg, Water_Today=1200ml, Diet_Today=1500kcal] what should I eat tonight?",
        );

        let context = extract_user_context(&messages).unwrap();
        assert_eq!(context.first_name, "Sam");
        assert_eq!(context.diet, "1500kcal");
    }

    #[test]
    fn test_first_of_multiple_occurrences_wins() {
        let messages = history(
            "userName=Sam, Goal=Bulking, H=180cm, W=80kg, Water_Today=1200ml, Diet_Today=1500kcal] \
             userName=Max, Goal=Cutting, H=170cm, W=65kg, Water_Today=300ml, Diet_Today=900kcal]",
        );

        let context = extract_user_context(&messages).unwrap();
        assert_eq!(context.first_name, "Sam");
        assert_eq!(context.goal, "Bulking");
    }

    #[test]
    fn test_only_last_message_is_inspected() {
        let messages = vec![
            ChatMessage::user(
                "userName=Sam, Goal=Hypertrophy, H=180cm, W=80kg, Water_Today=1200ml, Diet_Today=1500kcal]",
            ),
            ChatMessage::assistant("Great progress today!"),
        ];
        assert!(extract_user_context(&messages).is_none());
    }

    #[test]
    fn test_values_with_surrounding_whitespace_are_trimmed() {
        let messages = history(
            "userName= Sam , Goal= Hypertrophy , H= 180 cm, W= 80 kg, Water_Today= 1200 ml, Diet_Today= 1500kcal ]",
        );

        let context = extract_user_context(&messages).unwrap();
        assert_eq!(context.first_name, "Sam");
        assert_eq!(context.height, "180");
        assert_eq!(context.diet, "1500kcal");
    }
}
