//! Reply keyboard helpers

use teloxide::types::{KeyboardButton, KeyboardMarkup};

/// Build a reply keyboard with one button per row
pub fn reply_keyboard<S: AsRef<str>>(labels: &[S]) -> KeyboardMarkup {
    let rows: Vec<Vec<KeyboardButton>> = labels
        .iter()
        .map(|label| vec![KeyboardButton::new(label.as_ref())])
        .collect();

    KeyboardMarkup::new(rows)
}
