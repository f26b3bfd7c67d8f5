//! Screen presenter.
//!
//! Pure functions from session state and catalog data to [`ScreenState`].
//! Nothing here reads a store or the catalog.

use pickset_core::catalog::{Category, Interest, InterestIndex};
use pickset_core::session::{ChangeSummary, EditStats, Session};
use std::collections::HashMap;

use crate::screen::{ActionLabel, Button, ButtonLabel, ScreenKind, ScreenState};
use crate::tokens;

/// Buttons per row in category and interest grids.
const GRID_COLUMNS: usize = 2;

const ROOT: &str = "edit";

/// Category overview with per-category progress.
pub fn categories(
    categories: &[Category],
    index: &InterestIndex,
    session: &Session,
    stats: EditStats,
) -> ScreenState {
    let mut totals: HashMap<&str, usize> = HashMap::new();
    for interest in index.values() {
        *totals.entry(interest.category_key.as_str()).or_insert(0) += 1;
    }

    let category_buttons = categories
        .iter()
        .map(|category| {
            Button::new(
                ButtonLabel::Category {
                    category_key: category.key.clone(),
                    selected: stats.category_counts.get(&category.key),
                    total: totals.get(category.key.as_str()).copied().unwrap_or(0),
                },
                tokens::edit_category(&category.key),
            )
        })
        .collect();

    let mut buttons = grid(category_buttons);
    buttons.push(vec![
        Button::action(ActionLabel::EditPrimary, tokens::EDIT_PRIMARY),
        Button::action(ActionLabel::Preview, tokens::PREVIEW_CHANGES),
    ]);
    buttons.push(undo_row(session, Button::action(ActionLabel::Cancel, tokens::CANCEL)));

    ScreenState {
        kind: ScreenKind::Categories,
        breadcrumb: breadcrumb(&[]),
        stats: Some(stats),
        summary: None,
        buttons,
        notice: None,
    }
}

/// One category with a toggle per interest and mass actions.
pub fn category(
    category_key: &str,
    interests: &[Interest],
    session: &Session,
    stats: EditStats,
) -> ScreenState {
    let interest_buttons = interests
        .iter()
        .map(|interest| {
            Button::new(
                ButtonLabel::Interest {
                    key_name: interest.key_name.clone(),
                    selected: session.is_selected(interest.id),
                    primary: session.is_primary(interest.id),
                },
                tokens::toggle_interest(interest.id),
            )
        })
        .collect();

    let mut buttons = grid(interest_buttons);
    buttons.push(vec![
        Button::new(
            ButtonLabel::SelectAll {
                category_key: category_key.to_string(),
            },
            tokens::mass_select(category_key),
        ),
        Button::new(
            ButtonLabel::ClearAll {
                category_key: category_key.to_string(),
            },
            tokens::mass_clear(category_key),
        ),
    ]);
    buttons.push(undo_row(
        session,
        Button::action(ActionLabel::Back, tokens::BACK_TO_CATEGORIES),
    ));

    ScreenState {
        kind: ScreenKind::Category {
            category_key: category_key.to_string(),
        },
        breadcrumb: breadcrumb(&[category_key]),
        stats: Some(stats),
        summary: None,
        buttons,
        notice: None,
    }
}

/// Primary picker. Only selected interests are offered, in catalog order.
pub fn primary_picker(
    catalog_order: &[Interest],
    session: &Session,
    limit: usize,
    stats: EditStats,
) -> ScreenState {
    let candidates = catalog_order
        .iter()
        .filter(|interest| session.is_selected(interest.id))
        .map(|interest| {
            Button::new(
                ButtonLabel::Interest {
                    key_name: interest.key_name.clone(),
                    selected: true,
                    primary: session.is_primary(interest.id),
                },
                tokens::toggle_primary(interest.id),
            )
        })
        .collect();

    let mut buttons = grid(candidates);
    buttons.push(vec![Button::action(
        ActionLabel::Back,
        tokens::BACK_TO_CATEGORIES,
    )]);

    ScreenState {
        kind: ScreenKind::PrimaryPicker { limit },
        breadcrumb: breadcrumb(&["primary"]),
        stats: Some(stats),
        summary: None,
        buttons,
        notice: None,
    }
}

pub fn preview(summary: ChangeSummary, stats: EditStats) -> ScreenState {
    ScreenState {
        kind: ScreenKind::Preview,
        breadcrumb: breadcrumb(&["preview"]),
        stats: Some(stats),
        summary: Some(summary),
        buttons: vec![
            vec![
                Button::action(ActionLabel::Save, tokens::SAVE),
                Button::action(ActionLabel::Cancel, tokens::CANCEL),
            ],
            vec![Button::action(ActionLabel::Back, tokens::BACK_TO_CATEGORIES)],
        ],
        notice: None,
    }
}

pub fn saved(changes: usize, summary: ChangeSummary) -> ScreenState {
    terminal(ScreenKind::Saved { changes }, Some(summary))
}

pub fn cancelled(discarded_changes: usize) -> ScreenState {
    terminal(ScreenKind::Cancelled { discarded_changes }, None)
}

pub fn session_expired() -> ScreenState {
    terminal(ScreenKind::SessionExpired, None)
}

pub fn unavailable() -> ScreenState {
    terminal(ScreenKind::Unavailable, None)
}

/// Screens that end the flow; the only way on is a new edit.
fn terminal(kind: ScreenKind, summary: Option<ChangeSummary>) -> ScreenState {
    ScreenState {
        kind,
        breadcrumb: breadcrumb(&[]),
        stats: None,
        summary,
        buttons: vec![vec![Button::action(
            ActionLabel::StartEdit,
            tokens::START_EDIT,
        )]],
        notice: None,
    }
}

fn breadcrumb(path: &[&str]) -> Vec<String> {
    std::iter::once(ROOT)
        .chain(path.iter().copied())
        .map(str::to_string)
        .collect()
}

fn grid(buttons: Vec<Button>) -> Vec<Vec<Button>> {
    buttons
        .chunks(GRID_COLUMNS)
        .map(<[Button]>::to_vec)
        .collect()
}

/// Undo is only offered while there is something to undo.
fn undo_row(session: &Session, trailing: Button) -> Vec<Button> {
    let mut row = Vec::with_capacity(2);
    if session.has_changes() {
        row.push(Button::action(ActionLabel::Undo, tokens::UNDO));
    }
    row.push(trailing);
    row
}
