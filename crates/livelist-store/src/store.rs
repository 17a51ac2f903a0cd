//! The per-category room lists.

use livelist_protocol::{Category, Room};

/// Notification produced by every [`CategoryStore`] mutation.
///
/// Carries the category and its full content after the change, so the
/// receiver never has to read the store back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mutation<'a> {
    pub category: Category,
    pub content: &'a [Room],
}

/// One ordered list of rooms per category.
///
/// Order is server order. [`append`](Self::append) is used for
/// pagination, [`replace`](Self::replace) for refreshes. Both always
/// succeed; validation happens before rooms ever reach the store.
#[derive(Debug, Clone, Default)]
pub struct CategoryStore {
    lists: [Vec<Room>; Category::COUNT],
}

impl CategoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, category: Category) -> &[Room] {
        &self.lists[category.index()]
    }

    pub fn len(&self, category: Category) -> usize {
        self.lists[category.index()].len()
    }

    pub fn is_empty(&self, category: Category) -> bool {
        self.lists[category.index()].is_empty()
    }

    /// The pagination cursor: the last room currently held.
    pub fn last(&self, category: Category) -> Option<&Room> {
        self.lists[category.index()].last()
    }

    /// Adds `rooms` after the existing content. No de-duplication.
    pub fn append(
        &mut self,
        category: Category,
        rooms: Vec<Room>,
    ) -> Mutation<'_> {
        let list = &mut self.lists[category.index()];
        list.extend(rooms);
        Mutation {
            category,
            content: list.as_slice(),
        }
    }

    /// Discards the existing content and stores `rooms` instead.
    pub fn replace(
        &mut self,
        category: Category,
        rooms: Vec<Room>,
    ) -> Mutation<'_> {
        let list = &mut self.lists[category.index()];
        *list = rooms;
        Mutation {
            category,
            content: list.as_slice(),
        }
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

    fn ids(rooms: &[Room]) -> Vec<&str> {
        rooms.iter().map(Room::room_id).collect()
    }

    #[test]
    fn test_new_store_is_empty_for_every_category() {
        let store = CategoryStore::new();
        for c in Category::ALL {
            assert!(store.is_empty(c));
            assert_eq!(store.len(c), 0);
            assert!(store.last(c).is_none());
        }
    }

    #[test]
    fn test_append_keeps_order_and_reports_full_content() {
        let mut store = CategoryStore::new();
        store.append(Category::Pk, vec![room(1), room(2)]);
        let mutation = store.append(Category::Pk, vec![room(3), room(4)]);

        assert_eq!(mutation.category, Category::Pk);
        assert_eq!(ids(mutation.content), ["1", "2", "3", "4"]);
        assert_eq!(store.last(Category::Pk).map(Room::room_id), Some("4"));
    }

    #[test]
    fn test_append_does_not_deduplicate() {
        let mut store = CategoryStore::new();
        store.append(Category::Multi, vec![room(1)]);
        store.append(Category::Multi, vec![room(1)]);
        assert_eq!(ids(store.get(Category::Multi)), ["1", "1"]);
    }

    #[test]
    fn test_replace_discards_previous_content() {
        let mut store = CategoryStore::new();
        store.append(Category::Single, vec![room(1), room(2), room(3)]);
        let mutation = store.replace(Category::Single, vec![room(9)]);

        assert_eq!(ids(mutation.content), ["9"]);
        assert_eq!(store.len(Category::Single), 1);
    }

    #[test]
    fn test_categories_are_independent() {
        let mut store = CategoryStore::new();
        store.append(Category::Virtual, vec![room(1)]);
        store.replace(Category::Shopping, vec![room(2), room(3)]);

        assert_eq!(ids(store.get(Category::Virtual)), ["1"]);
        assert_eq!(ids(store.get(Category::Shopping)), ["2", "3"]);
        assert!(store.is_empty(Category::Multi));
    }
}
