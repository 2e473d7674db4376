use crate::commands::{CmdMessage, CmdResult, ListedPage};
use crate::document::DocumentStore;
use crate::error::{QuireError, Result};

pub fn create(store: &mut DocumentStore, title: &str, icon: &str) -> Result<CmdResult> {
    let page = store.create_page(title, icon).clone();
    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Page created: {} {}",
        page.icon, page.title
    )));
    Ok(result.with_affected_pages(vec![page]))
}

/// Out-of-range selections are ignored: the result is empty and nothing changes.
pub fn select(store: &mut DocumentStore, index: usize) -> Result<CmdResult> {
    match store.select_page(index) {
        Ok(page) => Ok(CmdResult::default().with_affected_pages(vec![page.clone()])),
        Err(QuireError::InvalidSelection(idx)) => {
            tracing::debug!("ignoring selection of missing page {}", idx);
            Ok(CmdResult::default())
        }
        Err(e) => Err(e),
    }
}

pub fn rename(store: &mut DocumentStore, title: &str) -> Result<CmdResult> {
    let page = store.update_active_title(title).clone();
    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!("Page renamed: {}", page.title)));
    Ok(result.with_affected_pages(vec![page]))
}

pub fn write(store: &mut DocumentStore, content: String) -> Result<CmdResult> {
    let page = store.update_active_content(content).clone();
    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!("Page updated: {}", page.title)));
    Ok(result.with_affected_pages(vec![page]))
}

pub fn delete(store: &mut DocumentStore) -> Result<CmdResult> {
    let removed = store.delete_active_page()?;
    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Page deleted: {}",
        removed.title
    )));
    result.add_message(CmdMessage::info(format!(
        "Now on: {}",
        store.active_page().title
    )));
    Ok(result.with_affected_pages(vec![removed]))
}

pub fn duplicate(store: &mut DocumentStore) -> Result<CmdResult> {
    let copy = store.duplicate_active_page().clone();
    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!("Page duplicated: {}", copy.title)));
    Ok(result.with_affected_pages(vec![copy]))
}

pub fn list(store: &DocumentStore) -> Result<CmdResult> {
    let active = store.active_index();
    let listed = store
        .pages()
        .iter()
        .enumerate()
        .map(|(i, page)| ListedPage {
            index: i + 1,
            page: page.clone(),
            active: i == active,
        })
        .collect();
    Ok(CmdResult::default().with_listed_pages(listed))
}
