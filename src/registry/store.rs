//! Icon definition store.

use std::collections::HashMap;

use crate::models::IconDefinition;

use super::traits::Registry;

/// Name to definition mapping. Pure data, no document side effects.
#[derive(Debug, Clone, Default)]
pub struct IconStore {
    icons: HashMap<String, IconDefinition>,
}

impl IconStore {
    pub fn new() -> Self {
        Self { icons: HashMap::new() }
    }

    /// Insert or replace. Returns the previous definition, if any.
    pub fn replace(&mut self, definition: IconDefinition) -> Option<IconDefinition> {
        self.icons.insert(definition.name.clone(), definition)
    }

    /// All definitions, ordered by name.
    pub fn sorted(&self) -> Vec<&IconDefinition> {
        let mut defs: Vec<&IconDefinition> = self.icons.values().collect();
        defs.sort_by(|a, b| a.name.cmp(&b.name));
        defs
    }
}

impl Registry<IconDefinition> for IconStore {
    fn contains(&self, name: &str) -> bool {
        self.icons.contains_key(name)
    }

    fn get(&self, name: &str) -> Option<&IconDefinition> {
        self.icons.get(name)
    }

    fn len(&self) -> usize {
        self.icons.len()
    }

    fn clear(&mut self) {
        self.icons.clear();
    }

    fn names(&self) -> Box<dyn Iterator<Item = &String> + '_> {
        Box::new(self.icons.keys())
    }
}
