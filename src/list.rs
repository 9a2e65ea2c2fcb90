//! The generic owning container behind every `listOfX` element.

use std::fmt;
use std::slice;

use crate::base::{ReadContext, SedBase, SedObject};
use crate::error::{SedOperationError, SedResult};
use crate::namespaces::SedNamespaces;
use crate::typecode::TypeCode;

/// An object that can be stored in a [`SedListOf`].
///
/// Concrete elements use `&mut Self` as their mutable view. The enums over
/// related elements (changes, ranges, outputs, ...) use a view enum of
/// mutable references instead, so an item can be edited in place but not
/// replaced by an item of another kind.
pub trait ListItem: SedObject + Clone + 'static {
    /// Mutable access handed out by [`SedListOf::get_mut`].
    type Mut<'a>;

    /// Tag of the list element holding items of this kind.
    const LIST_ELEMENT_NAME: &'static str;

    /// Item type a new list declares.
    const LIST_ITEM_TYPE: TypeCode;

    fn view_mut(&mut self) -> Self::Mut<'_>;

    /// Creates an empty item for a nested element of a list being read.
    fn create_item(name: &str, namespaces: &SedNamespaces) -> Option<Self>;
}

/// An ordered sequence of owned items.
///
/// Order is document order. Every item's type code is accepted by the
/// declared item type; [`TypeCode::Unknown`] accepts any item.
#[derive(Clone, PartialEq)]
pub struct SedListOf<T: ListItem> {
    base: SedBase,
    items: Vec<T>,
    item_type_code: TypeCode,
}

impl<T: ListItem> SedListOf<T> {
    pub fn new(level: u32, version: u32) -> Result<Self, crate::error::SedConstructorError> {
        Ok(Self::with_namespaces(SedNamespaces::new(level, version)?))
    }

    pub fn with_namespaces(namespaces: SedNamespaces) -> Self {
        SedListOf {
            base: SedBase::new(namespaces),
            items: Vec::new(),
            item_type_code: T::LIST_ITEM_TYPE,
        }
    }

    pub fn size(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn item_type_code(&self) -> TypeCode {
        self.item_type_code
    }

    /// Narrows or widens the accepted item type.
    ///
    /// Fails with `InvalidObject` when an item already in the list would no
    /// longer be accepted.
    pub fn set_item_type_code(&mut self, type_code: TypeCode) -> SedResult {
        if self
            .items
            .iter()
            .any(|item| !type_code.accepts(item.type_code()))
        {
            return Err(SedOperationError::InvalidObject);
        }
        self.item_type_code = type_code;
        Ok(())
    }

    pub fn is_valid_type_for_list(&self, item: &T) -> bool {
        self.item_type_code.accepts(item.type_code())
    }

    /// Appends a copy of `item`; the caller keeps the original.
    pub fn append(&mut self, item: &T) -> SedResult {
        self.append_and_own(item.clone())
    }

    /// Appends `item`, taking ownership of it.
    pub fn append_and_own(&mut self, item: T) -> SedResult {
        let location = self.items.len();
        self.insert_and_own(location, item)
    }

    /// Inserts a copy of `item` at `location`. Inserting at `size()` appends.
    pub fn insert(&mut self, location: usize, item: &T) -> SedResult {
        self.insert_and_own(location, item.clone())
    }

    /// # Returns
    ///
    /// `IndexExceedsSize` when `location > size()`, `InvalidObject` when the
    /// item is not accepted. The list is unchanged on failure.
    pub fn insert_and_own(&mut self, location: usize, mut item: T) -> SedResult {
        if location > self.items.len() {
            return Err(SedOperationError::IndexExceedsSize);
        }
        if !self.is_valid_type_for_list(&item) {
            return Err(SedOperationError::InvalidObject);
        }

        item.connect_to_parent(&self.child_link());
        self.items.insert(location, item);
        Ok(())
    }

    /// Appends copies of every item of `other`.
    ///
    /// All items are checked before any is copied, so on failure nothing
    /// has been appended.
    pub fn append_from(&mut self, other: &SedListOf<T>) -> SedResult {
        if other.item_type_code != self.item_type_code
            && !self.item_type_code.accepts(other.item_type_code)
        {
            return Err(SedOperationError::InvalidObject);
        }
        if !other.iter().all(|item| self.is_valid_type_for_list(item)) {
            return Err(SedOperationError::InvalidObject);
        }

        let link = self.child_link();
        for item in other.iter() {
            let mut copy = item.clone();
            copy.connect_to_parent(&link);
            self.items.push(copy);
        }
        Ok(())
    }

    /// Appends `item` and hands back mutable access to it.
    pub(crate) fn push_and_get(&mut self, item: T) -> Option<&mut T> {
        self.append_and_own(item).ok()?;
        self.items.last_mut()
    }

    /// The item at `index`, or `None` when out of range.
    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<T::Mut<'_>> {
        self.items.get_mut(index).map(T::view_mut)
    }

    /// The first item whose `id` is `id`.
    pub fn get_by_id(&self, id: &str) -> Option<&T> {
        if id.is_empty() {
            return None;
        }
        self.items.iter().find(|item| item.id() == id)
    }

    pub fn get_by_id_mut(&mut self, id: &str) -> Option<T::Mut<'_>> {
        if id.is_empty() {
            return None;
        }
        self.items
            .iter_mut()
            .find(|item| item.id() == id)
            .map(T::view_mut)
    }

    /// Detaches and returns the item at `index`; the caller becomes its owner.
    pub fn remove(&mut self, index: usize) -> Option<T> {
        if index >= self.items.len() {
            return None;
        }
        let mut item = self.items.remove(index);
        item.connect_to_parent(&Default::default());
        Some(item)
    }

    pub fn remove_by_id(&mut self, id: &str) -> Option<T> {
        let index = self
            .items
            .iter()
            .position(|item| !id.is_empty() && item.id() == id)?;
        self.remove(index)
    }

    /// Empties the list.
    ///
    /// With `do_delete` the items are dropped. Otherwise they are detached
    /// and handed back to the caller.
    pub fn clear(&mut self, do_delete: bool) -> Vec<T> {
        let mut items = std::mem::take(&mut self.items);
        if do_delete {
            return Vec::new();
        }
        for item in items.iter_mut() {
            item.connect_to_parent(&Default::default());
        }
        items
    }
}

impl<T: ListItem> Default for SedListOf<T> {
    fn default() -> Self {
        Self::with_namespaces(SedNamespaces::default())
    }
}

impl<T: ListItem> fmt::Debug for SedListOf<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct(T::LIST_ELEMENT_NAME)
            .field("item_type_code", &self.item_type_code)
            .field("items", &self.items)
            .finish()
    }
}

impl<'a, T: ListItem> IntoIterator for &'a SedListOf<T> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl<T: ListItem> SedObject for SedListOf<T> {
    fn base(&self) -> &SedBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut SedBase {
        &mut self.base
    }

    fn type_code(&self) -> TypeCode {
        TypeCode::ListOf
    }

    fn element_name(&self) -> &str {
        T::LIST_ELEMENT_NAME
    }

    fn list_item_type(&self) -> Option<TypeCode> {
        Some(self.item_type_code)
    }

    fn create_object(&mut self, name: &str, _ctx: &mut ReadContext<'_>) -> Option<&mut dyn SedObject> {
        let item = T::create_item(name, self.base.namespaces())?;
        if !self.is_valid_type_for_list(&item) {
            return None;
        }
        self.items.push(item);
        self.items.last_mut().map(|item| item as &mut dyn SedObject)
    }

    fn should_write(&self) -> bool {
        !self.items.is_empty()
    }

    fn children(&self) -> Vec<&dyn SedObject> {
        self.items.iter().map(|item| item as &dyn SedObject).collect()
    }

    fn children_mut(&mut self) -> Vec<&mut dyn SedObject> {
        self.items
            .iter_mut()
            .map(|item| item as &mut dyn SedObject)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::elements::{SedChange, SedChangeAttribute, SedDataSet, SedRemoveXml};

    fn data_set(id: &str) -> SedDataSet {
        let mut data_set = SedDataSet::default();
        data_set.set_id(id).expect("Invalid id");
        data_set
    }

    fn letters() -> SedListOf<SedDataSet> {
        let mut list = SedListOf::default();
        for id in ["a", "b", "c"] {
            list.append(&data_set(id)).expect("Failed to append");
        }
        list
    }

    #[test]
    fn test_get_and_remove_by_id() {
        let mut list = letters();
        assert_eq!(list.get(1).map(|item| item.id()), Some("b"));

        let removed = list.remove_by_id("a").expect("Missing item");
        assert_eq!(removed.id(), "a");
        assert!(removed.base().parent_link().is_detached());
        assert_eq!(list.get(0).map(|item| item.id()), Some("b"));
        assert!(list.get_by_id("a").is_none());
        assert_eq!(list.size(), 2);
    }

    #[test]
    fn test_append_keeps_caller_copy() {
        let mut list = SedListOf::default();
        let mut original = data_set("x");
        list.append(&original).expect("Failed to append");

        original.set_label("changed").expect("Failed to set label");
        assert!(!list.get(0).expect("Missing item").is_set_label());
        assert_eq!(list.get(0), Some(&data_set("x")));
    }

    #[test]
    fn test_items_are_linked_to_list() {
        let list = letters();
        let item = list.get(2).expect("Missing item");
        let parent = item.base().parent_link().parent().expect("Missing parent");
        assert_eq!(parent.type_code, TypeCode::ListOf);
        assert_eq!(parent.element_name, "listOfDataSets");
    }

    #[test]
    fn test_insert_bounds() {
        let mut list = letters();
        assert_eq!(
            list.insert(4, &data_set("d")),
            Err(SedOperationError::IndexExceedsSize)
        );
        assert_eq!(list.size(), 3);

        list.insert(3, &data_set("d")).expect("Failed to insert");
        list.insert(0, &data_set("z")).expect("Failed to insert");
        let ids: Vec<_> = list.iter().map(|item| item.id().to_string()).collect();
        assert_eq!(ids, ["z", "a", "b", "c", "d"]);
    }

    #[test]
    fn test_narrowed_list_rejects_other_kinds() {
        let mut list: SedListOf<SedChange> = SedListOf::default();
        list.set_item_type_code(TypeCode::ChangeAttribute)
            .expect("Failed to narrow");

        let result = list.append(&SedChange::from(SedRemoveXml::default()));
        assert_eq!(result, Err(SedOperationError::InvalidObject));
        assert!(list.is_empty());

        list.append(&SedChange::from(SedChangeAttribute::default()))
            .expect("Failed to append");
        assert_eq!(
            list.set_item_type_code(TypeCode::RemoveXml),
            Err(SedOperationError::InvalidObject)
        );
    }

    #[test]
    fn test_append_from_is_all_or_nothing() {
        let mut mixed: SedListOf<SedChange> = SedListOf::default();
        mixed
            .append(&SedChange::from(SedChangeAttribute::default()))
            .expect("Failed to append");
        mixed
            .append(&SedChange::from(SedRemoveXml::default()))
            .expect("Failed to append");

        let mut narrow: SedListOf<SedChange> = SedListOf::default();
        narrow
            .set_item_type_code(TypeCode::ChangeAttribute)
            .expect("Failed to narrow");
        assert_eq!(
            narrow.append_from(&mixed),
            Err(SedOperationError::InvalidObject)
        );
        assert!(narrow.is_empty());

        let mut wide: SedListOf<SedChange> = SedListOf::default();
        wide.append_from(&mixed).expect("Failed to append");
        assert_eq!(wide.size(), 2);
    }

    #[test]
    fn test_clear_without_delete_returns_items() {
        let mut list = letters();
        let items = list.clear(false);
        assert_eq!(list.size(), 0);
        assert_eq!(items.len(), 3);
        assert_eq!(items[1].id(), "b");
        assert!(items[1].base().parent_link().is_detached());

        let mut list = letters();
        assert!(list.clear(true).is_empty());
        assert!(list.is_empty());
    }

    #[test]
    fn test_mutable_view_edits_in_place() {
        let mut list = letters();
        list.get_by_id_mut("b")
            .expect("Missing item")
            .set_label("B")
            .expect("Failed to set label");
        assert_eq!(list.get(1).map(|item| item.label()), Some("B"));
        assert!(list.get_mut(3).is_none());
    }

    #[test]
    fn test_deep_search() {
        let list = letters();
        assert_eq!(list.element_by_sid("c").map(|item| item.id()), Some("c"));
        assert_eq!(list.all_elements().len(), 3);
        assert!(list.element_by_sid("").is_none());
    }
}
