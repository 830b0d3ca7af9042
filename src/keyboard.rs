use winit::keyboard::{Key, NamedKey};

/// What a key press asks the app to do.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    ToggleMode,
    RequestWish,
    Quit,
}

#[inline]
pub fn action_for_key(key: &str) -> Option<Action> {
    match key {
        " " | "Space" => Some(Action::ToggleMode),
        "w" | "W" => Some(Action::RequestWish),
        "Escape" => Some(Action::Quit),
        _ => None,
    }
}

/// Map a winit logical key onto an [`Action`].
pub fn action_for_logical_key(key: &Key) -> Option<Action> {
    match key {
        Key::Named(NamedKey::Space) => Some(Action::ToggleMode),
        Key::Named(NamedKey::Escape) => Some(Action::Quit),
        Key::Character(c) => action_for_key(c.as_str()),
        _ => None,
    }
}
