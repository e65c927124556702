//! Index over a flat list of parent-linked records.
//!
//! The store keeps three views of the same records in step:
//! - `items`: every record in insertion order
//! - `by_id`: id -> record
//! - `children_of`: parent key (including `None` for roots) -> direct children
//!
//! Records are shared between the views via `Rc`, so the store is `!Send`.

use std::collections::{HashMap, HashSet, VecDeque};
use std::rc::Rc;

use tracing::{debug, instrument};

use crate::domain::entities::{Key, TreeItem};

#[derive(Debug, Default)]
pub struct TreeStore {
    items: Vec<Rc<TreeItem>>,
    by_id: HashMap<Key, Rc<TreeItem>>,
    children_of: HashMap<Option<Key>, Vec<Rc<TreeItem>>>,
}

impl TreeStore {
    /// Build the store from an initial list.
    ///
    /// Ids are expected to be unique and the parent links acyclic; neither is
    /// checked. Parents may appear after their children in `items`.
    #[instrument(level = "debug", skip(items), fields(count = items.len()))]
    pub fn new(items: Vec<TreeItem>) -> Self {
        let items: Vec<Rc<TreeItem>> = items.into_iter().map(Rc::new).collect();
        let mut by_id = HashMap::with_capacity(items.len());
        let mut children_of: HashMap<Option<Key>, Vec<Rc<TreeItem>>> = HashMap::new();

        for item in &items {
            by_id.insert(item.id.clone(), Rc::clone(item));
            children_of.entry(item.parent.clone()).or_default();
        }

        // second pass keeps each children-list in input order
        for item in &items {
            if let Some(children) = children_of.get_mut(&item.parent) {
                children.push(Rc::clone(item));
            }
        }

        Self {
            items,
            by_id,
            children_of,
        }
    }

    /// All records in insertion order.
    pub fn get_all(&self) -> &[Rc<TreeItem>] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn contains(&self, id: &Key) -> bool {
        self.by_id.contains_key(id)
    }

    pub fn get_item(&self, id: &Key) -> Option<&TreeItem> {
        self.by_id.get(id).map(Rc::as_ref)
    }

    /// Direct children of `id`, empty if it has none or is unknown.
    pub fn get_children(&self, id: &Key) -> &[Rc<TreeItem>] {
        self.children_under(&Some(id.clone()))
    }

    /// Records without a parent.
    pub fn roots(&self) -> &[Rc<TreeItem>] {
        self.children_under(&None)
    }

    fn children_under(&self, parent: &Option<Key>) -> &[Rc<TreeItem>] {
        self.children_of
            .get(parent)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Every descendant of `id` in level order, `id` itself excluded.
    #[instrument(level = "trace", skip(self))]
    pub fn get_all_children(&self, id: &Key) -> Vec<&TreeItem> {
        self.descendants(id).into_iter().map(Rc::as_ref).collect()
    }

    fn descendants(&self, id: &Key) -> Vec<&Rc<TreeItem>> {
        let mut result = Vec::new();
        let mut queue = VecDeque::new();
        queue.push_back(id);

        while let Some(current) = queue.pop_front() {
            for child in self.get_children(current) {
                result.push(child);
                queue.push_back(&child.id);
            }
        }

        result
    }

    /// `[self, parent, ..., root]`, or empty if `id` is unknown.
    ///
    /// A parent key with no record ends the chain.
    #[instrument(level = "trace", skip(self))]
    pub fn get_all_parents(&self, id: &Key) -> Vec<&TreeItem> {
        let mut chain = Vec::new();
        let mut current = self.get_item(id);

        while let Some(item) = current {
            chain.push(item);
            current = item.parent.as_ref().and_then(|parent| self.get_item(parent));
        }

        chain
    }

    /// Ids from the root down to `id`, rendered as strings.
    pub fn get_data_path(&self, id: &Key) -> Vec<String> {
        let mut path: Vec<String> = self
            .get_all_parents(id)
            .into_iter()
            .map(|item| item.id.to_string())
            .collect();
        path.reverse();
        path
    }

    /// Append a record.
    ///
    /// An existing record with the same id is shadowed in the id lookup but
    /// stays in the flat list and its parent's children-list. The parent does
    /// not have to exist.
    #[instrument(level = "debug", skip(self, item), fields(id = %item.id))]
    pub fn add_item(&mut self, item: TreeItem) {
        let item = Rc::new(item);
        if self.by_id.insert(item.id.clone(), Rc::clone(&item)).is_some() {
            debug!("id already present, shadowing previous record");
        }
        self.children_of
            .entry(item.parent.clone())
            .or_default()
            .push(Rc::clone(&item));
        self.items.push(item);
    }

    /// Remove `id` together with its whole subtree. Unknown ids are ignored.
    #[instrument(level = "debug", skip(self))]
    pub fn remove_item(&mut self, id: &Key) {
        let Some(item) = self.by_id.get(id) else {
            debug!("no record to remove");
            return;
        };

        let mut doomed: Vec<Rc<TreeItem>> = vec![Rc::clone(item)];
        doomed.extend(self.descendants(id).into_iter().cloned());
        debug!(count = doomed.len(), "removing subtree");

        let identities: HashSet<*const TreeItem> = doomed.iter().map(Rc::as_ptr).collect();
        self.items
            .retain(|item| !identities.contains(&Rc::as_ptr(item)));

        for item in &doomed {
            self.by_id.remove(&item.id);
            self.detach(item);
            self.children_of.remove(&Some(item.id.clone()));
        }
    }

    /// Replace the record carrying `item.id`, moving it if the parent changed.
    ///
    /// Unknown ids are ignored. Descendants keep pointing at the same id, so
    /// a reparented record takes its subtree along.
    #[instrument(level = "debug", skip(self, item), fields(id = %item.id))]
    pub fn update_item(&mut self, item: TreeItem) {
        let Some(previous) = self.by_id.get(&item.id).cloned() else {
            debug!("no record to update");
            return;
        };

        let item = Rc::new(item);
        if let Some(slot) = self.items.iter_mut().find(|i| Rc::ptr_eq(&**i, &previous)) {
            *slot = Rc::clone(&item);
        }
        self.by_id.insert(item.id.clone(), Rc::clone(&item));

        if previous.parent != item.parent {
            debug!(from = ?previous.parent, to = ?item.parent, "reparenting");
            self.detach(&previous);
            self.children_of
                .entry(item.parent.clone())
                .or_default()
                .push(item);
        } else if let Some(siblings) = self.children_of.get_mut(&item.parent) {
            if let Some(pos) = siblings.iter().position(|s| Rc::ptr_eq(s, &previous)) {
                siblings[pos] = item;
            }
        }
    }

    /// Drop this exact record from its parent's children-list.
    fn detach(&mut self, item: &Rc<TreeItem>) {
        if let Some(siblings) = self.children_of.get_mut(&item.parent) {
            if let Some(pos) = siblings.iter().position(|s| Rc::ptr_eq(s, item)) {
                siblings.remove(pos);
            }
        }
    }
}

impl FromIterator<TreeItem> for TreeStore {
    fn from_iter<I: IntoIterator<Item = TreeItem>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
