//! Static registry of valid states

use indexmap::{IndexMap, IndexSet};

use crate::NestedState;

/// The universe of valid nested states, fixed at construction
///
/// Maps each category to its set of valid subcategories. The registry never
/// changes after construction; the machine consults it on every transition.
#[derive(Debug, Clone, Default)]
pub struct StateRegistry {
    states: IndexMap<String, IndexSet<String>>,
}

impl StateRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from (category, subcategories) pairs
    pub fn from_categories<C, S, I, V>(categories: I) -> Self
    where
        I: IntoIterator<Item = (C, V)>,
        V: IntoIterator<Item = S>,
        C: Into<String>,
        S: Into<String>,
    {
        let mut registry = Self::new();
        for (category, subcategories) in categories {
            let category = category.into();
            for subcategory in subcategories {
                registry.add(category.clone(), subcategory);
            }
        }
        registry
    }

    /// Add a valid (category, subcategory) pair
    pub fn add(&mut self, category: impl Into<String>, subcategory: impl Into<String>) {
        self.states
            .entry(category.into())
            .or_default()
            .insert(subcategory.into());
    }

    /// Check whether a state is a member of the registry
    pub fn contains(&self, state: &NestedState) -> bool {
        self.states
            .get(state.category())
            .is_some_and(|subs| subs.contains(state.subcategory()))
    }

    /// Check whether a category is known, regardless of subcategory
    pub fn contains_category(&self, category: &str) -> bool {
        self.states.contains_key(category)
    }

    /// Every valid `"category:subcategory"` string, flattened
    pub fn all_states(&self) -> Vec<String> {
        self.states
            .iter()
            .flat_map(|(category, subs)| {
                subs.iter()
                    .map(move |sub| format!("{}:{}", category, sub))
            })
            .collect()
    }

    /// Iterate over the registered categories
    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.states.keys().map(String::as_str)
    }

    /// Total number of valid states
    pub fn len(&self) -> usize {
        self.states.values().map(IndexSet::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}
