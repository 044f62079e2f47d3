//! Input alphabet for the cooking minigame.
//!
//! Gameplay uses four symbol keys (Q W E R) plus Enter to confirm a serve.
//! Space is a hold key (stirring, scooping), digits and Backspace drive the
//! ingredient-scan screen. DOM `KeyboardEvent::key` strings are translated
//! here once so the rest of the crate never sees browser types.

/// Number of symbol keys in the gameplay alphabet.
pub const SYM_COUNT: u8 = 4;

/// On-screen labels for the symbol keys, indexed by `Key::Sym` payload.
pub const KEY_LABELS: [&str; SYM_COUNT as usize] = ["Q", "W", "E", "R"];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    /// One of the four gameplay symbols (0 = Q .. 3 = R).
    Sym(u8),
    Enter,
    Space,
    Digit(u8),
    Backspace,
}

impl Key {
    pub fn label(&self) -> &'static str {
        match self {
            Key::Sym(i) => KEY_LABELS[*i as usize % KEY_LABELS.len()],
            Key::Enter => "ENTER",
            Key::Space => "SPACE",
            Key::Digit(_) => "0-9",
            Key::Backspace => "BKSP",
        }
    }
}

/// Translate a DOM `KeyboardEvent::key` value. Unmapped keys return `None`
/// and are ignored by the game entirely.
pub fn from_dom_key(key: &str) -> Option<Key> {
    match key {
        "Enter" => return Some(Key::Enter),
        " " | "Spacebar" => return Some(Key::Space),
        "Backspace" => return Some(Key::Backspace),
        _ => {}
    }
    let mut chars = key.chars();
    let (Some(c), None) = (chars.next(), chars.next()) else {
        return None;
    };
    if let Some(d) = c.to_digit(10) {
        return Some(Key::Digit(d as u8));
    }
    let upper = c.to_ascii_uppercase();
    KEY_LABELS
        .iter()
        .position(|l| l.chars().next() == Some(upper))
        .map(|i| Key::Sym(i as u8))
}
