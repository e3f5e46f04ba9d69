//! Mode transition table.
//!
//! A message is first reduced to a set of boolean [`Signals`]. The table
//! below is then scanned top to bottom and the first rule whose source mode
//! and guard both match decides the next mode. When no rule matches the chat
//! stays where it is: specialised modes are sticky and only leave on the
//! signals listed for them.
//!
//! Entering a specialised mode waits for the next message (the trigger
//! phrase carries no content yet). Leaving one continues processing, since
//! the message that caused the exit is a real request.

use serde::Serialize;
use tracing::info;

use super::exit::{is_image_exit, is_prompt_exit};
use super::Mode;
use crate::brain::analysis::MessageAnalysis;
use crate::brain::intent::Intent;
use crate::brain::keywords::{contains_any, mentions_image_vocabulary, PLATFORM_KEYWORDS};

/// Minimum create-prompt confidence that switches into prompt authoring.
pub const PROMPT_ACTIVATION_THRESHOLD: f32 = 0.7;

/// Why a transition happened (or did not)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TransitionReason {
    /// Confident request to build a prompt
    PromptRequested,
    /// Request for an image, interface or diagram
    ImageRequested,
    /// Exit phrase from a specialised mode
    ExplicitExit,
    /// Navigation request while designing an image
    NavigationRequested,
    /// Question about the platform while designing an image
    PlatformQuestion,
    /// Specialised mode kept despite the message
    Sticky,
    /// Normal chat, nothing to switch
    NoChange,
}

/// Boolean facts about a message that drive the table
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Signals {
    /// create_prompt with confidence >= 0.7
    pub prompt_requested: bool,
    /// Visual generation request that is not itself a prompt request
    pub image_requested: bool,
    /// navigate intent
    pub navigation: bool,
    /// general/question intent about courses, communities, the platform,
    /// with no image vocabulary in it
    pub platform_question: bool,
    /// Exit phrase valid in prompt authoring
    pub prompt_exit: bool,
    /// Exit phrase valid in image-schema authoring
    pub image_exit: bool,
}

impl Signals {
    /// Reduce an analysed message to the facts the table needs
    pub fn from_analysis(analysis: &MessageAnalysis) -> Self {
        let intent = &analysis.intent;
        let lower = analysis.message.trim().to_lowercase();

        Self {
            prompt_requested: intent.is(Intent::CreatePrompt, PROMPT_ACTIVATION_THRESHOLD),
            // When both detectors fire the message is about a prompt whose
            // subject happens to be visual
            image_requested: analysis.image.is_image_request()
                && intent.intent != Intent::CreatePrompt,
            navigation: intent.intent == Intent::Navigate,
            platform_question: matches!(intent.intent, Intent::General | Intent::Question)
                && contains_any(&lower, PLATFORM_KEYWORDS)
                && !mentions_image_vocabulary(&lower),
            prompt_exit: is_prompt_exit(&analysis.message),
            image_exit: is_image_exit(&analysis.message),
        }
    }
}

/// One row of the transition table
struct Rule {
    from: Mode,
    guard: fn(&Signals) -> bool,
    to: Mode,
    reason: TransitionReason,
    continue_processing: bool,
}

/// Transition rules in priority order
const RULES: &[Rule] = &[
    // Normal
    Rule {
        from: Mode::Normal,
        guard: |s| s.prompt_requested,
        to: Mode::PromptAuthoring,
        reason: TransitionReason::PromptRequested,
        continue_processing: false,
    },
    Rule {
        from: Mode::Normal,
        guard: |s| s.image_requested,
        to: Mode::ImageSchemaAuthoring,
        reason: TransitionReason::ImageRequested,
        continue_processing: false,
    },
    // Prompt authoring
    Rule {
        from: Mode::PromptAuthoring,
        guard: |s| s.prompt_exit,
        to: Mode::Normal,
        reason: TransitionReason::ExplicitExit,
        continue_processing: true,
    },
    Rule {
        from: Mode::PromptAuthoring,
        guard: |s| s.image_requested,
        to: Mode::ImageSchemaAuthoring,
        reason: TransitionReason::ImageRequested,
        continue_processing: false,
    },
    // Image-schema authoring
    Rule {
        from: Mode::ImageSchemaAuthoring,
        guard: |s| s.prompt_requested,
        to: Mode::PromptAuthoring,
        reason: TransitionReason::PromptRequested,
        continue_processing: false,
    },
    Rule {
        from: Mode::ImageSchemaAuthoring,
        guard: |s| s.navigation,
        to: Mode::Normal,
        reason: TransitionReason::NavigationRequested,
        continue_processing: true,
    },
    Rule {
        from: Mode::ImageSchemaAuthoring,
        guard: |s| s.platform_question,
        to: Mode::Normal,
        reason: TransitionReason::PlatformQuestion,
        continue_processing: true,
    },
    Rule {
        from: Mode::ImageSchemaAuthoring,
        guard: |s| s.image_exit,
        to: Mode::Normal,
        reason: TransitionReason::ExplicitExit,
        continue_processing: true,
    },
];

/// Outcome of feeding one message to the table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Transition {
    /// Mode before the message
    pub from: Mode,
    /// Mode after the message
    pub to: Mode,
    pub reason: TransitionReason,
    /// Fixed message to show the user, present whenever the mode changed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub acknowledgement: Option<&'static str>,
    /// False means: show the acknowledgement and wait for the next message
    pub continue_processing: bool,
}

impl Transition {
    fn stay(mode: Mode) -> Self {
        Self {
            from: mode,
            to: mode,
            reason: if mode.is_specialized() {
                TransitionReason::Sticky
            } else {
                TransitionReason::NoChange
            },
            acknowledgement: None,
            continue_processing: true,
        }
    }

    /// True if the mode changed
    pub fn changed(&self) -> bool {
        self.from != self.to
    }
}

/// Apply the table to precomputed signals
pub fn apply(current: Mode, signals: &Signals) -> Transition {
    RULES
        .iter()
        .find(|rule| rule.from == current && (rule.guard)(signals))
        .map(|rule| Transition {
            from: current,
            to: rule.to,
            reason: rule.reason,
            acknowledgement: Some(rule.to.acknowledgement()),
            continue_processing: rule.continue_processing,
        })
        .unwrap_or_else(|| Transition::stay(current))
}

/// Decide the next mode for an analysed message. Never fails.
pub fn next_transition(current: Mode, analysis: &MessageAnalysis) -> Transition {
    let signals = Signals::from_analysis(analysis);
    let transition = apply(current, &signals);

    if transition.changed() {
        info!(
            from = %transition.from,
            to = %transition.to,
            reason = ?transition.reason,
            continue_processing = transition.continue_processing,
            "Mode transition"
        );
    }

    transition
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_rule_changes_mode() {
        for rule in RULES {
            assert_ne!(rule.from, rule.to);
        }
    }

    #[test]
    fn test_entering_waits_and_leaving_continues() {
        for rule in RULES {
            let entering = rule.to.is_specialized();
            assert_eq!(rule.continue_processing, !entering);
        }
    }

    #[test]
    fn test_no_signals_keeps_mode() {
        for mode in Mode::ALL {
            let t = apply(mode, &Signals::default());
            assert_eq!(t.to, mode);
            assert!(t.continue_processing);
            assert!(t.acknowledgement.is_none());
        }
    }

    #[test]
    fn test_prompt_exit_beats_image_request() {
        let signals = Signals {
            prompt_exit: true,
            image_requested: true,
            ..Signals::default()
        };
        let t = apply(Mode::PromptAuthoring, &signals);
        assert_eq!(t.to, Mode::Normal);
        assert_eq!(t.reason, TransitionReason::ExplicitExit);
    }

    #[test]
    fn test_prompt_request_ignored_while_authoring_prompts() {
        let signals = Signals {
            prompt_requested: true,
            navigation: true,
            ..Signals::default()
        };
        let t = apply(Mode::PromptAuthoring, &signals);
        assert_eq!(t.to, Mode::PromptAuthoring);
        assert_eq!(t.reason, TransitionReason::Sticky);
    }
}
