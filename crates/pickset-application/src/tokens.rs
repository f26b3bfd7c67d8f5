//! Interaction tokens carried by editor buttons.
//!
//! Exact tokens name a whole action. Prefix tokens carry one parameter
//! (an interest id or a category key) appended to the prefix.

use pickset_core::selection::InterestId;

pub const START_EDIT: &str = "isolated_start_edit";
pub const EDIT_PRIMARY: &str = "isolated_edit_primary";
pub const PREVIEW_CHANGES: &str = "isolated_preview_changes";
pub const BACK_TO_CATEGORIES: &str = "isolated_back_to_categories";
pub const UNDO: &str = "isolated_undo";
pub const SAVE: &str = "isolated_save";
pub const CANCEL: &str = "isolated_cancel";

pub const EDIT_CATEGORY_PREFIX: &str = "isolated_edit_category_";
pub const TOGGLE_PRIMARY_PREFIX: &str = "isolated_toggle_primary_";
pub const TOGGLE_INTEREST_PREFIX: &str = "isolated_toggle_interest_";
pub const MASS_SELECT_PREFIX: &str = "isolated_mass_select_";
pub const MASS_CLEAR_PREFIX: &str = "isolated_mass_clear_";

pub fn edit_category(category_key: &str) -> String {
    format!("{EDIT_CATEGORY_PREFIX}{category_key}")
}

pub fn toggle_primary(interest_id: InterestId) -> String {
    format!("{TOGGLE_PRIMARY_PREFIX}{interest_id}")
}

pub fn toggle_interest(interest_id: InterestId) -> String {
    format!("{TOGGLE_INTEREST_PREFIX}{interest_id}")
}

pub fn mass_select(category_key: &str) -> String {
    format!("{MASS_SELECT_PREFIX}{category_key}")
}

pub fn mass_clear(category_key: &str) -> String {
    format!("{MASS_CLEAR_PREFIX}{category_key}")
}

/// Parses an interest id parameter. Only plain decimal ids are accepted.
pub fn parse_interest_id(param: &str) -> Option<InterestId> {
    if param.is_empty() || !param.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    param.parse().ok()
}

/// Parses a category key parameter.
pub fn parse_category_key(param: &str) -> Option<&str> {
    (!param.is_empty()).then_some(param)
}
