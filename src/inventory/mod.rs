//! Loading inventories.
//!
//! Inventories are served in pages. Each page carries raw item stubs and a table of
//! descriptions shared between items. Items are merged with their descriptions and the pages
//! are concatenated in the order they were fetched.

mod item;
mod page;

pub use item::{InventoryItem, ItemDescription, merge_description};
pub use page::{InventoryPage, InventoryResponse};

use crate::error::Error;
use crate::types::ContextId;
use std::collections::HashSet;
use futures::Future;

/// Fetches every page of an inventory and aggregates the merged items.
///
/// `fetch_page` is called with the cursor for the next page (`None` for the first page). The
/// next page is only requested once the previous one has been classified and merged. Any
/// failure aborts the whole load; no partial inventory is returned.
pub async fn aggregate_pages<F, Fut>(
    contextid: ContextId,
    mut fetch_page: F,
) -> Result<Vec<InventoryItem>, Error>
where
    F: FnMut(Option<String>) -> Fut,
    Fut: Future<Output = Result<InventoryResponse, Error>>,
{
    let mut inventory: Vec<InventoryItem> = Vec::new();
    let mut start: Option<String> = None;
    let mut seen_cursors: HashSet<String> = HashSet::new();

    loop {
        let page = fetch_page(start.clone()).await?.into_page()?;
        let more = page.more;
        let more_start = page.more_start.clone();

        inventory.append(&mut page.into_items(contextid));

        if !more {
            return Ok(inventory);
        }

        // shouldn't occur, but we wouldn't want to call this endlessly if it does...
        let Some(more_start) = more_start.filter(|cursor| seen_cursors.insert(cursor.clone())) else {
            log::debug!("loading inventory: more pages declared without a new cursor");
            return Err(Error::MalformedResponse);
        };

        start = Some(more_start);
    }
}
