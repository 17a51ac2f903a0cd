//! Store plus selector, mutated together.

use livelist_protocol::{Category, Room};
use tokio::sync::watch;

use crate::{ActiveCategorySelector, CategoryStore};

/// The complete list state of one view-model.
///
/// Every mutation goes through here so that the store change and the
/// matching publish happen in one call. Readers of the presenting list
/// never observe a store change before it is published.
#[derive(Debug, Default)]
pub struct ListState {
    store: CategoryStore,
    selector: ActiveCategorySelector,
}

impl ListState {
    pub fn new(initial: Category) -> Self {
        Self {
            store: CategoryStore::new(),
            selector: ActiveCategorySelector::new(initial),
        }
    }

    pub fn store(&self) -> &CategoryStore {
        &self.store
    }

    pub fn active(&self) -> Category {
        self.selector.active()
    }

    /// Content of the active category.
    pub fn active_content(&self) -> &[Room] {
        self.store.get(self.selector.active())
    }

    pub fn subscribe(&self) -> watch::Receiver<Vec<Room>> {
        self.selector.presenting().subscribe()
    }

    pub fn presenting(&self) -> Vec<Room> {
        self.selector.presenting().current()
    }

    pub fn set_active(&mut self, category: Category) {
        let previous = self.selector.active();
        self.selector.set_active(category, self.store.get(category));
        tracing::info!(
            from = %previous,
            to = %category,
            rooms = self.store.len(category),
            "presenting category switched"
        );
    }

    pub fn append(&mut self, category: Category, rooms: Vec<Room>) {
        let added = rooms.len();
        let mutation = self.store.append(category, rooms);
        let published = self.selector.on_store_mutated(&mutation);
        tracing::debug!(
            %category,
            added,
            total = mutation.content.len(),
            published,
            "rooms appended"
        );
    }

    pub fn replace(&mut self, category: Category, rooms: Vec<Room>) {
        let mutation = self.store.replace(category, rooms);
        let published = self.selector.on_store_mutated(&mutation);
        tracing::debug!(
            %category,
            total = mutation.content.len(),
            published,
            "rooms replaced"
        );
    }
}
