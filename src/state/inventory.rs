/// Inventory — named item slots holding either a count or a possession flag.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Storage kind for one inventory entry. A given item name keeps its kind
/// for the lifetime of a save.
///
/// Untagged so saves read as a plain map of name to number-or-bool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ItemSlot {
    Count(u32),
    Flag(bool),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct Inventory {
    items: FxHashMap<String, ItemSlot>,
}

impl Inventory {
    /// Seed or overwrite an item slot. Item kinds are established here;
    /// [`Inventory::add_item`] will not create new entries.
    pub fn register(&mut self, name: &str, slot: ItemSlot) {
        self.items.insert(name.to_string(), slot);
    }

    pub fn slot(&self, name: &str) -> Option<ItemSlot> {
        self.items.get(name).copied()
    }

    /// Counted items are held when the count is positive; flag items when
    /// the flag is set. Unknown names are never held.
    pub fn has_item(&self, name: &str) -> bool {
        match self.items.get(name) {
            Some(ItemSlot::Count(n)) => *n > 0,
            Some(ItemSlot::Flag(b)) => *b,
            None => false,
        }
    }

    /// Consume one of a counted item. Returns `false` without mutation for
    /// empty counts, flag items, and unknown names. Flag items are not
    /// consumable through this path — once set they stay available.
    pub fn use_item(&mut self, name: &str) -> bool {
        match self.items.get_mut(name) {
            Some(ItemSlot::Count(n)) if *n > 0 => {
                *n -= 1;
                true
            }
            _ => false,
        }
    }

    /// Add to a counted item or set a flag item. Names not registered in the
    /// starting inventory are silently ignored.
    pub fn add_item(&mut self, name: &str, amount: u32) {
        match self.items.get_mut(name) {
            Some(ItemSlot::Count(n)) => *n = n.saturating_add(amount),
            Some(ItemSlot::Flag(b)) => *b = true,
            None => {}
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, ItemSlot)> {
        self.items.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stocked() -> Inventory {
        let mut inv = Inventory::default();
        inv.register("water", ItemSlot::Count(3));
        inv.register("sedative", ItemSlot::Count(0));
        inv.register("vest", ItemSlot::Flag(true));
        inv.register("music_box", ItemSlot::Flag(false));
        inv
    }

    #[test]
    fn has_item_counted() {
        let inv = stocked();
        assert!(inv.has_item("water"));
        assert!(!inv.has_item("sedative"));
    }

    #[test]
    fn has_item_flag() {
        let inv = stocked();
        assert!(inv.has_item("vest"));
        assert!(!inv.has_item("music_box"));
    }

    #[test]
    fn has_item_unknown_is_false() {
        let inv = stocked();
        assert!(!inv.has_item("lantern"));
    }

    #[test]
    fn use_item_decrements() {
        let mut inv = stocked();
        assert!(inv.use_item("water"));
        assert_eq!(inv.slot("water"), Some(ItemSlot::Count(2)));
    }

    #[test]
    fn use_item_at_zero_fails_without_mutation() {
        let mut inv = stocked();
        assert!(!inv.use_item("sedative"));
        assert_eq!(inv.slot("sedative"), Some(ItemSlot::Count(0)));
    }

    #[test]
    fn use_item_on_flag_is_noop() {
        let mut inv = stocked();
        assert!(!inv.use_item("vest"));
        assert_eq!(inv.slot("vest"), Some(ItemSlot::Flag(true)));
    }

    #[test]
    fn use_item_unknown_fails() {
        let mut inv = stocked();
        assert!(!inv.use_item("lantern"));
    }

    #[test]
    fn add_item_counted() {
        let mut inv = stocked();
        inv.add_item("water", 2);
        assert_eq!(inv.slot("water"), Some(ItemSlot::Count(5)));
    }

    #[test]
    fn add_item_sets_flag() {
        let mut inv = stocked();
        inv.add_item("music_box", 1);
        assert_eq!(inv.slot("music_box"), Some(ItemSlot::Flag(true)));
    }

    #[test]
    fn add_item_unregistered_is_noop() {
        let mut inv = stocked();
        inv.add_item("lantern", 1);
        assert!(inv.slot("lantern").is_none());
        assert_eq!(inv.len(), 4);
    }
}
