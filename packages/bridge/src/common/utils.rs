/// Build the Festa page where a room can be linked to an event.
///
/// Room ids contain `!` and `:`, so the id is percent-encoded into the path.
pub fn link_event_url(festa_url: &str, room_id: &str) -> String {
    format!("{}/link-chat/{}", festa_url, urlencoding::encode(room_id))
}

/// Strip a `@local:domain` user id down to its local part for friendly log
/// lines. Ids that don't look like that come back unchanged.
pub fn username_localpart(user_id: &str) -> &str {
    match (user_id.strip_prefix('@'), user_id.find(':')) {
        (Some(_), Some(colon)) => &user_id[1..colon],
        _ => user_id,
    }
}
