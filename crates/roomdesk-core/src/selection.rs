//! Row Selection
//!
//! Set of checked record ids on a list.

use std::collections::HashSet;
use std::hash::Hash;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection<Id: Eq + Hash> {
    ids: HashSet<Id>,
}

impl<Id: Eq + Hash> Default for Selection<Id> {
    fn default() -> Self {
        Self { ids: HashSet::new() }
    }
}

impl<Id: Clone + Eq + Hash> Selection<Id> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip one id, returning whether it is now selected
    pub fn toggle(&mut self, id: Id) -> bool {
        if self.ids.remove(&id) {
            false
        } else {
            self.ids.insert(id);
            true
        }
    }

    /// Check every visible id, or uncheck them all if they already are.
    /// Ids outside `visible` are left untouched.
    pub fn toggle_all(&mut self, visible: &[Id]) {
        if self.all_selected(visible) {
            for id in visible {
                self.ids.remove(id);
            }
        } else {
            self.ids.extend(visible.iter().cloned());
        }
    }

    /// True when `visible` is non-empty and every id in it is checked
    pub fn all_selected(&self, visible: &[Id]) -> bool {
        !visible.is_empty() && visible.iter().all(|id| self.ids.contains(id))
    }

    pub fn contains(&self, id: &Id) -> bool {
        self.ids.contains(id)
    }

    pub fn remove(&mut self, id: &Id) {
        self.ids.remove(id);
    }

    pub fn retain(&mut self, keep: impl FnMut(&Id) -> bool) {
        self.ids.retain(keep);
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Id> {
        self.ids.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_all_is_idempotent_pair() {
        let visible = vec![1, 2, 3];
        let mut selection = Selection::new();

        selection.toggle_all(&visible);
        assert_eq!(selection.len(), 3);

        selection.toggle_all(&visible);
        assert!(selection.is_empty());
    }

    #[test]
    fn test_toggle_all_with_partial_selection_checks_rest() {
        let mut selection = Selection::new();
        selection.toggle(2);
        selection.toggle_all(&[1, 2, 3]);
        assert_eq!(selection.len(), 3);
    }

    #[test]
    fn test_toggle_all_leaves_other_pages_alone() {
        let mut selection = Selection::new();
        selection.toggle(9);
        selection.toggle_all(&[1, 2]);
        selection.toggle_all(&[1, 2]);
        assert!(selection.contains(&9));
        assert_eq!(selection.len(), 1);
    }

    #[test]
    fn test_toggle_all_on_empty_page_does_nothing() {
        let mut selection: Selection<u32> = Selection::new();
        selection.toggle_all(&[]);
        assert!(selection.is_empty());
        assert!(!selection.all_selected(&[]));
    }
}
