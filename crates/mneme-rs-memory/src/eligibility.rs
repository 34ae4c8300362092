//! Cheap checks that run before any search IO.

use crate::error::RecallSkip;
use crate::settings::RecallSettings;

/// Decide whether a turn is worth a search. First failing rule wins.
///
/// Length is counted in characters, not bytes.
pub fn check_eligibility(
    settings: &RecallSettings,
    message: &str,
    is_heartbeat: bool,
) -> Result<(), RecallSkip> {
    let length = message.chars().count();
    if length < settings.min_message_length {
        return Err(RecallSkip::MessageTooShort {
            length,
            min: settings.min_message_length,
        });
    }
    if is_heartbeat && settings.skip_heartbeats {
        return Err(RecallSkip::Heartbeat);
    }
    Ok(())
}
