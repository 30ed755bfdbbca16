//! Turn orchestration: the one place with externally observable side
//! effects (profile writes, message log writes).

use tracing::debug;

use crate::advisor::{assembler, intent, retrieval};
use crate::errors::AppError;
use crate::state::AppState;
use crate::store;

/// How many stored turns are replayed into the completion request.
const HISTORY_WINDOW: i64 = 6;

/// Runs one full advisory pass for an inbound message and returns the reply.
///
/// Sequence: append user turn -> resolve profile -> extract intent (persist
/// if updated) -> rank catalog -> assemble prompt -> invoke completion ->
/// append assistant turn. Side effects already committed when a later step
/// fails are not rolled back; the caller sees one opaque failure.
pub async fn handle_turn(
    state: &AppState,
    username: &str,
    message: &str,
) -> Result<String, AppError> {
    let user = store::users::get_or_create(&state.db, username).await?;
    store::messages::append(&state.db, user.id, "user", message).await?;

    let (profile, updated) = intent::extract(message, &user.profile());
    if updated {
        debug!(
            username,
            subject = ?profile.subject,
            min_level = profile.min_level,
            max_level = profile.max_level,
            "search profile updated"
        );
        store::users::update_profile(&state.db, user.id, &profile).await?;
    }

    let catalog = store::courses::all(&state.db).await?;
    let grounding = retrieval::rank(message, &profile, &catalog);

    let recent = store::messages::recent(&state.db, user.id, HISTORY_WINDOW).await?;
    let request = assembler::assemble(message, &grounding, &recent);

    let reply = state.llm.invoke(&request).await;

    store::messages::append(&state.db, user.id, "assistant", &reply).await?;
    Ok(reply)
}
