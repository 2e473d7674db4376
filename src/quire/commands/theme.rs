use crate::commands::{CmdMessage, CmdResult};
use crate::document::DocumentStore;
use crate::error::Result;
use crate::model::Theme;

pub fn toggle(store: &mut DocumentStore) -> Result<CmdResult> {
    let theme = store.toggle_theme();
    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!("Theme: {}", theme.as_str())));
    Ok(result.with_theme(theme))
}

pub fn set(store: &mut DocumentStore, theme: Theme) -> Result<CmdResult> {
    store.set_theme(theme);
    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!("Theme: {}", theme.as_str())));
    Ok(result.with_theme(theme))
}
