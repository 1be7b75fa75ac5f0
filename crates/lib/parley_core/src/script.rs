//! The scripted conversation.
//!
//! A session runs through three stages, chosen purely from how many user
//! messages are stored for it (counting the message being answered):
//!
//! | User turn | Stage          | Prompt asks the model to…                      |
//! |-----------|----------------|------------------------------------------------|
//! | 1         | `AskFrequency` | ask how often the user reads the source        |
//! | 2         | `AskBalance`   | ask whether the source covers topics fairly    |
//! | 3+        | `WrapUp`       | thank the user and close this part of the study |

/// Survey answer that means "see the free-text field".
pub const OTHER_ANSWER: &str = "Other";

/// Reply stored and returned when the model cannot be reached.
pub const FALLBACK_REPLY: &str =
    "I'm sorry, I'm having trouble processing your message. Could you try again?";

/// Where a session is in the script.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    AskFrequency,
    AskBalance,
    WrapUp,
}

impl Stage {
    /// Stage for the `n`th user message of a session (1-based).
    ///
    /// Zero cannot happen once the current message is stored; it falls
    /// through to `WrapUp` like any count past the script.
    pub fn for_user_turn(n: usize) -> Self {
        match n {
            1 => Stage::AskFrequency,
            2 => Stage::AskBalance,
            _ => Stage::WrapUp,
        }
    }

    /// Whether this stage closes the conversation.
    pub fn is_final(self) -> bool {
        self == Stage::WrapUp
    }
}

/// The news source named by a survey answer.
pub fn resolve_news_source<'a>(answer: &'a str, other: Option<&'a str>) -> &'a str {
    match other {
        Some(other) if answer == OTHER_ANSWER && !other.is_empty() => other,
        _ => answer,
    }
}

/// Build the prompt sent to the model for `stage`.
pub fn build_prompt(stage: Stage, source: &str, message: &str) -> String {
    match stage {
        Stage::AskFrequency => format!(
            "The user's favorite news source is {source}. They said: '{message}'. \
             Ask them how often they consume news from {source}."
        ),
        Stage::AskBalance => format!(
            "The user's favorite news source is {source}. They said: '{message}'. \
             Ask them if they think {source} provides balanced coverage of important topics."
        ),
        Stage::WrapUp => format!(
            "The user said: '{message}'. \
             Thank them for sharing their thoughts and tell them we've completed this part of the study."
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stages_follow_user_turns() {
        assert_eq!(Stage::for_user_turn(1), Stage::AskFrequency);
        assert_eq!(Stage::for_user_turn(2), Stage::AskBalance);
        assert_eq!(Stage::for_user_turn(3), Stage::WrapUp);
        assert_eq!(Stage::for_user_turn(10), Stage::WrapUp);
        assert_eq!(Stage::for_user_turn(0), Stage::WrapUp);
    }

    #[test]
    fn only_wrap_up_is_final() {
        assert!(!Stage::AskFrequency.is_final());
        assert!(!Stage::AskBalance.is_final());
        assert!(Stage::WrapUp.is_final());
    }

    #[test]
    fn other_answer_uses_free_text() {
        assert_eq!(resolve_news_source("Other", Some("Reuters")), "Reuters");
    }

    #[test]
    fn other_answer_without_text_keeps_answer() {
        assert_eq!(resolve_news_source("Other", None), "Other");
        assert_eq!(resolve_news_source("Other", Some("")), "Other");
    }

    #[test]
    fn listed_answer_ignores_free_text() {
        assert_eq!(resolve_news_source("TikTok", Some("Reuters")), "TikTok");
    }

    #[test]
    fn frequency_prompt() {
        let prompt = build_prompt(Stage::AskFrequency, "CNN", "I like it");
        assert_eq!(
            prompt,
            "The user's favorite news source is CNN. They said: 'I like it'. \
             Ask them how often they consume news from CNN."
        );
    }

    #[test]
    fn balance_prompt() {
        let prompt = build_prompt(Stage::AskBalance, "FOX", "Every day");
        assert_eq!(
            prompt,
            "The user's favorite news source is FOX. They said: 'Every day'. \
             Ask them if they think FOX provides balanced coverage of important topics."
        );
    }

    #[test]
    fn wrap_up_prompt_omits_source() {
        let prompt = build_prompt(Stage::WrapUp, "Twitter", "Mostly");
        assert_eq!(
            prompt,
            "The user said: 'Mostly'. Thank them for sharing their thoughts \
             and tell them we've completed this part of the study."
        );
        assert!(!prompt.contains("Twitter"));
    }
}
