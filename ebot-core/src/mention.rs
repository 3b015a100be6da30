//! Shared pure functions for recipient @-mention handling.
//!
//! Used by the message handler to strip the bot's own mention from inbound text before
//! command matching, so "@EchoBot show members" and "show members" resolve the same way.

use crate::types::Activity;

/// Returns true if any mention entity targets the activity's recipient (the bot).
#[inline]
pub fn is_recipient_mentioned(activity: &Activity) -> bool {
    let Some(recipient) = &activity.recipient else {
        return false;
    };
    activity.entities.iter().any(|entity| {
        entity.kind == "mention"
            && entity
                .mentioned
                .as_ref()
                .is_some_and(|mentioned| mentioned.id == recipient.id)
    })
}

/// Strips every mention of the recipient from the activity text and trims the result.
///
/// The entity's literal mention text is removed when present; otherwise the
/// `<at>name</at>` form is removed for the mentioned account's name.
pub fn remove_recipient_mention(activity: &Activity) -> String {
    let mut text = activity.text.clone().unwrap_or_default();

    if let Some(recipient) = &activity.recipient {
        for entity in &activity.entities {
            if entity.kind != "mention" {
                continue;
            }
            let Some(mentioned) = &entity.mentioned else {
                continue;
            };
            if mentioned.id != recipient.id {
                continue;
            }

            if let Some(mention_text) = &entity.text {
                text = text.replace(mention_text.as_str(), "");
            } else if let Some(name) = &mentioned.name {
                text = text.replace(&format!("<at>{}</at>", name), "");
            }
        }
    }

    text.trim().to_string()
}
