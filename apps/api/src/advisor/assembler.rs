//! Prompt assembly: renders the grounding result into an annotation on the
//! user message and builds the ordered turn list for the completion request.

use crate::advisor::prompts::ADVISOR_SYSTEM;
use crate::advisor::retrieval::GroundingResult;
use crate::llm_client::{ChatTurn, CompletionRequest};
use crate::models::message::ChatMessageRow;

/// Builds the completion request for one inbound message.
///
/// `recent` is the last up-to-6 stored turns, oldest first. Any stored turn
/// whose content equals the raw message is excluded — the inbound message
/// was already persisted before assembly, and it must appear exactly once,
/// as the final user turn carrying the grounding annotation.
pub fn assemble(
    message: &str,
    grounding: &GroundingResult,
    recent: &[ChatMessageRow],
) -> CompletionRequest {
    let annotation = render_grounding(grounding);

    let mut turns: Vec<ChatTurn> = recent
        .iter()
        .filter(|m| m.content != message)
        .map(|m| ChatTurn {
            role: m.role.clone(),
            content: m.content.clone(),
        })
        .collect();

    turns.push(ChatTurn {
        role: "user".to_string(),
        content: format!("{message}{annotation}"),
    });

    CompletionRequest {
        system: ADVISOR_SYSTEM.to_string(),
        turns,
    }
}

/// Renders the grounding result as the natural-language annotation appended
/// to the raw message. `NotApplicable` renders as nothing at all.
fn render_grounding(grounding: &GroundingResult) -> String {
    match grounding {
        GroundingResult::NotApplicable => String::new(),
        GroundingResult::NoMatches {
            subject,
            min_level,
            max_level,
        } => format!(
            "\n\n[SYSTEM NOTE]: I searched for {subject} courses \
             (Level {min_level}-{max_level}) but found 0 matches in the catalog."
        ),
        GroundingResult::Matches {
            subject,
            min_level,
            max_level,
            sort,
            ranked,
        } => {
            let listing = ranked
                .iter()
                .map(|c| format!("{} (Avg GPA: {:.2})", c.code, c.class_average))
                .collect::<Vec<_>>()
                .join("; ");
            format!(
                "\n\n[SYSTEM DATA]: I used your active filters \
                 (Subject: {subject}, Level: {min_level}-{max_level}). \
                 Here are the matches sorted by {}: {listing}. \
                 These are real crowd-sourced statistics. Discuss these specific \
                 courses using your own knowledge of their titles and content.",
                sort.label()
            )
        }
    }
}
