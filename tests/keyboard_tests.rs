// Key string to action mapping for the native shell.

use tree_app::{action_for_key, Action};

#[test]
fn space_toggles_mode() {
    assert_eq!(action_for_key(" "), Some(Action::ToggleMode));
}

#[test]
fn w_requests_a_wish_in_either_case() {
    assert_eq!(action_for_key("w"), Some(Action::RequestWish));
    assert_eq!(action_for_key("W"), Some(Action::RequestWish));
}

#[test]
fn escape_quits() {
    assert_eq!(action_for_key("Escape"), Some(Action::Quit));
}

#[test]
fn other_keys_are_ignored() {
    for key in ["a", "1", "Enter", "", "ww"] {
        assert_eq!(action_for_key(key), None, "key {key:?}");
    }
}
