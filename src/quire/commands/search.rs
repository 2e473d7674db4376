use crate::commands::{CmdMessage, CmdResult, ListedPage};
use crate::document::DocumentStore;
use crate::error::Result;

pub fn run(store: &DocumentStore, query: &str) -> Result<CmdResult> {
    let active = store.active_index();
    let listed: Vec<ListedPage> = store
        .search_pages(query)
        .into_iter()
        .map(|(i, page)| ListedPage {
            index: i + 1,
            page: page.clone(),
            active: i == active,
        })
        .collect();

    let mut result = CmdResult::default();
    if listed.is_empty() {
        result.add_message(CmdMessage::info(format!("No pages match \"{}\".", query)));
    }
    Ok(result.with_listed_pages(listed))
}
