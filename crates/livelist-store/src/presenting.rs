//! The observable output list and the active-category selector.

use livelist_protocol::{Category, Room};
use tokio::sync::watch;

use crate::Mutation;

/// The room list currently on screen.
///
/// Backed by a `watch` channel: subscribers see the latest value as soon
/// as they subscribe and are woken on every publish. Publishing works
/// with or without subscribers.
#[derive(Debug)]
pub struct PresentingList {
    sender: watch::Sender<Vec<Room>>,
}

impl PresentingList {
    pub fn new() -> Self {
        let (sender, _) = watch::channel(Vec::new());
        Self { sender }
    }

    /// Returns a receiver whose current value is the list as of now.
    pub fn subscribe(&self) -> watch::Receiver<Vec<Room>> {
        self.sender.subscribe()
    }

    /// Clones the current value.
    pub fn current(&self) -> Vec<Room> {
        self.sender.borrow().clone()
    }

    fn publish(&self, content: &[Room]) {
        self.sender.send_replace(content.to_vec());
    }
}

impl Default for PresentingList {
    fn default() -> Self {
        Self::new()
    }
}

/// Tracks which category is presenting and decides what gets published.
///
/// Invariant: the presenting list only ever holds the content of one
/// category, the active one.
#[derive(Debug, Default)]
pub struct ActiveCategorySelector {
    active: Category,
    presenting: PresentingList,
}

impl ActiveCategorySelector {
    pub fn new(initial: Category) -> Self {
        Self {
            active: initial,
            presenting: PresentingList::new(),
        }
    }

    pub fn active(&self) -> Category {
        self.active
    }

    pub fn presenting(&self) -> &PresentingList {
        &self.presenting
    }

    /// Switches to `category` and publishes `content`, even when the
    /// category did not change.
    pub fn set_active(&mut self, category: Category, content: &[Room]) {
        self.active = category;
        self.presenting.publish(content);
    }

    /// Publishes the mutated content if it belongs to the active
    /// category. Returns whether anything was published.
    pub fn on_store_mutated(&self, mutation: &Mutation<'_>) -> bool {
        if mutation.category != self.active {
            return false;
        }
        self.presenting.publish(mutation.content);
        true
    }
}

#[cfg(test)]
mod tests {
    use livelist_protocol::RoleDescriptor;

    use super::*;

    fn room(id: u32) -> Room {
        Room::new(id.to_string(), RoleDescriptor::owner("u", "n", id))
            .unwrap()
    }

    #[test]
    fn test_presenting_list_starts_empty() {
        let list = PresentingList::new();
        assert!(list.current().is_empty());
        assert!(list.subscribe().borrow().is_empty());
    }

    #[test]
    fn test_late_subscriber_sees_latest_value() {
        let mut selector = ActiveCategorySelector::default();
        selector.set_active(Category::Pk, &[room(1), room(2)]);

        let rx = selector.presenting().subscribe();
        assert_eq!(rx.borrow().len(), 2);
    }

    #[test]
    fn test_set_active_publishes_even_if_unchanged() {
        let mut selector = ActiveCategorySelector::new(Category::Multi);
        let mut rx = selector.presenting().subscribe();
        rx.mark_unchanged();

        selector.set_active(Category::Multi, &[]);
        assert!(rx.has_changed().unwrap());
    }

    #[test]
    fn test_mutation_of_active_category_is_published() {
        let selector = ActiveCategorySelector::new(Category::Single);
        let rooms = [room(5)];
        let published = selector.on_store_mutated(&Mutation {
            category: Category::Single,
            content: &rooms,
        });

        assert!(published);
        assert_eq!(selector.presenting().current(), rooms.to_vec());
    }

    #[test]
    fn test_mutation_of_other_category_is_ignored() {
        let selector = ActiveCategorySelector::new(Category::Single);
        let mut rx = selector.presenting().subscribe();
        rx.mark_unchanged();

        let rooms = [room(5)];
        let published = selector.on_store_mutated(&Mutation {
            category: Category::Virtual,
            content: &rooms,
        });

        assert!(!published);
        assert!(!rx.has_changed().unwrap());
        assert!(selector.presenting().current().is_empty());
    }
}
