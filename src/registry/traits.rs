//! Common trait for registries that store named items.

/// Common trait for registries that store named items.
///
/// Maps string names to values and exposes the read-side operations every
/// registry shares: existence checks, lookups, counting and name listing.
///
/// # Example
///
/// ```
/// use pathicon::models::IconDefinition;
/// use pathicon::registry::{IconStore, Registry};
///
/// let mut store = IconStore::new();
/// store.replace(IconDefinition::new("check", vec!["M20 6L9 17l-5-5".to_string()]));
///
/// assert!(store.contains("check"));
/// assert_eq!(store.len(), 1);
/// ```
pub trait Registry<V> {
    /// Check if an item with the given name exists in the registry.
    fn contains(&self, name: &str) -> bool;

    /// Get an item by name.
    ///
    /// Returns `None` if no item with the given name exists.
    fn get(&self, name: &str) -> Option<&V>;

    /// Get the number of items in the registry.
    fn len(&self) -> usize;

    /// Check if the registry is empty.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Clear all items from the registry.
    fn clear(&mut self);

    /// Get an iterator over all names in the registry.
    fn names(&self) -> Box<dyn Iterator<Item = &String> + '_>;
}
