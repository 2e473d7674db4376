use crate::commands::CmdResult;
use crate::document::DocumentStore;
use crate::error::Result;

pub fn run(store: &DocumentStore) -> Result<CmdResult> {
    Ok(CmdResult::default().with_stats(store.compute_stats()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_every_page() {
        let mut store = DocumentStore::default();
        store.create_page("Two", "");
        store.update_active_content("<p>one two three</p>".into());
        let stats = run(&store).unwrap().stats.unwrap();
        assert_eq!(stats.page_count, 2);
        assert!(stats.total_words >= 3);
    }
}
