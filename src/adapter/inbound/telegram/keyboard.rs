//! Inline keyboards.

use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup};

use super::callback::CallbackAction;
use crate::domain::{EntryField, EntryId};

/// Exercises offered on the stats screen.
const EXERCISE_BUTTONS: usize = 10;

/// Button label length before truncation.
const LABEL_CHARS: usize = 25;

fn button(text: impl Into<String>, action: &CallbackAction) -> InlineKeyboardButton {
    InlineKeyboardButton::callback(text, action.to_string())
}

fn edit(entry: EntryId, field: EntryField, label: &str) -> InlineKeyboardButton {
    button(label, &CallbackAction::Edit { entry, field })
}

/// Edit buttons under a logged set: two rows of fields, then delete.
#[must_use]
pub fn entry_edit_keyboard(entry: EntryId) -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![
        vec![
            edit(entry, EntryField::Exercise, "Упражнение"),
            edit(entry, EntryField::Weight, "Вес"),
        ],
        vec![
            edit(entry, EntryField::Reps, "Повторы"),
            edit(entry, EntryField::Comment, "Коммент"),
        ],
        vec![button("🗑 Удалить", &CallbackAction::Delete(entry))],
    ])
}

#[must_use]
pub fn confirm_delete_keyboard(entry: EntryId) -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![vec![
        button("✅ Да, удалить", &CallbackAction::ConfirmDelete(entry)),
        button("❌ Отмена", &CallbackAction::CancelDelete(entry)),
    ]])
}

#[must_use]
pub fn cancel_keyboard() -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![vec![button("❌ Отмена", &CallbackAction::Cancel)]])
}

/// Page switcher; `None` when everything fits on one page.
#[must_use]
pub fn history_keyboard(page: usize, total_pages: usize) -> Option<InlineKeyboardMarkup> {
    if total_pages <= 1 {
        return None;
    }
    let mut row = Vec::with_capacity(3);
    if page > 0 {
        row.push(button("◀️ Назад", &CallbackAction::HistoryPage(page - 1)));
    }
    row.push(button(
        format!("{}/{}", page + 1, total_pages),
        &CallbackAction::Noop,
    ));
    if page + 1 < total_pages {
        row.push(button("Вперёд ▶️", &CallbackAction::HistoryPage(page + 1)));
    }
    Some(InlineKeyboardMarkup::new(vec![row]))
}

/// One button per exercise for drill-down; `None` for an empty list.
#[must_use]
pub fn exercise_list_keyboard(exercises: &[String]) -> Option<InlineKeyboardMarkup> {
    let rows: Vec<Vec<InlineKeyboardButton>> = exercises
        .iter()
        .take(EXERCISE_BUTTONS)
        .map(|name| vec![button(label(name), &CallbackAction::exercise_stats(name))])
        .collect();
    (!rows.is_empty()).then(|| InlineKeyboardMarkup::new(rows))
}

fn label(name: &str) -> String {
    if name.chars().count() > LABEL_CHARS {
        let cut: String = name.chars().take(LABEL_CHARS).collect();
        format!("{cut}...")
    } else {
        name.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use teloxide::types::InlineKeyboardButtonKind;

    fn data(keyboard: &InlineKeyboardMarkup) -> Vec<Vec<String>> {
        keyboard
            .inline_keyboard
            .iter()
            .map(|row| {
                row.iter()
                    .map(|b| match &b.kind {
                        InlineKeyboardButtonKind::CallbackData(d) => d.clone(),
                        other => panic!("unexpected button {other:?}"),
                    })
                    .collect()
            })
            .collect()
    }

    #[test]
    fn entry_keyboard_layout() {
        let kb = entry_edit_keyboard(EntryId::new(9));
        assert_eq!(
            data(&kb),
            vec![
                vec!["edit:9:exercise".to_string(), "edit:9:weight".to_string()],
                vec!["edit:9:reps".to_string(), "edit:9:comment".to_string()],
                vec!["delete:9".to_string()],
            ]
        );
        assert_eq!(kb.inline_keyboard[2][0].text, "🗑 Удалить");
    }

    #[test]
    fn confirm_and_cancel_keyboards() {
        assert_eq!(
            data(&confirm_delete_keyboard(EntryId::new(3))),
            vec![vec!["confirm_delete:3".to_string(), "cancel_delete:3".to_string()]]
        );
        assert_eq!(data(&cancel_keyboard()), vec![vec!["cancel".to_string()]]);
    }

    #[test]
    fn history_navigation() {
        assert!(history_keyboard(0, 1).is_none());
        assert!(history_keyboard(0, 0).is_none());

        let first = history_keyboard(0, 3).unwrap();
        assert_eq!(data(&first), vec![vec!["noop".to_string(), "history:1".to_string()]]);
        assert_eq!(first.inline_keyboard[0][0].text, "1/3");

        let middle = history_keyboard(1, 3).unwrap();
        assert_eq!(
            data(&middle),
            vec![vec![
                "history:0".to_string(),
                "noop".to_string(),
                "history:2".to_string()
            ]]
        );

        let last = history_keyboard(2, 3).unwrap();
        assert_eq!(data(&last), vec![vec!["history:1".to_string(), "noop".to_string()]]);
    }

    #[test]
    fn exercise_list_is_capped_and_labels_truncated() {
        let mut names: Vec<String> = (0..12).map(|i| format!("упражнение {i:02}")).collect();
        names[0] = "очень длинное название упражнения с блоком".to_string();

        let kb = exercise_list_keyboard(&names).unwrap();
        assert_eq!(kb.inline_keyboard.len(), 10);
        assert_eq!(
            kb.inline_keyboard[0][0].text,
            "очень длинное название уп..."
        );
        assert!(exercise_list_keyboard(&[]).is_none());
    }
}
