#[derive(Debug, Clone, PartialEq)]
pub enum UserAction {
    Quit,
    ToggleHelp,
    NextTrack,
    PrevTrack,
    TogglePlay,
    ShowLyrics,
    ShowQueue,
    /// `None` clears the filter.
    SetArtist(Option<String>),
    SubmitMood(String),
    SearchSongs(String),
    EnqueueSongs(String),
    Unknown(String),
}

/// Lines starting with `:` are commands; anything else is a mood description.
pub fn map_line_to_action(line: &str) -> Option<UserAction> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }

    let Some(command) = line.strip_prefix(':') else {
        return Some(UserAction::SubmitMood(line.to_string()));
    };

    let (name, arg) = match command.split_once(char::is_whitespace) {
        Some((name, arg)) => (name, arg.trim()),
        None => (command, ""),
    };
    let arg = (!arg.is_empty()).then(|| arg.to_string());

    let action = match (name.to_ascii_lowercase().as_str(), arg) {
        ("q" | "quit", _) => UserAction::Quit,
        ("?" | "h" | "help", _) => UserAction::ToggleHelp,
        ("n" | "next", _) => UserAction::NextTrack,
        ("p" | "prev", _) => UserAction::PrevTrack,
        ("play" | "pause" | "space", _) => UserAction::TogglePlay,
        ("l" | "lyrics", _) => UserAction::ShowLyrics,
        ("list" | "queue", _) => UserAction::ShowQueue,
        ("artist", arg) => UserAction::SetArtist(arg),
        ("song" | "s", Some(q)) => UserAction::SearchSongs(q),
        ("more" | "add", Some(q)) => UserAction::EnqueueSongs(q),
        ("mood" | "m", Some(text)) => UserAction::SubmitMood(text),
        _ => UserAction::Unknown(line.to_string()),
    };
    Some(action)
}
