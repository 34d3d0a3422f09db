use std::any::Any;
use std::collections::HashMap;
use std::sync::{Arc, Weak};

use crate::error::{Error, Result};

/// A resolved association: a single `Arc<T>` or a list `Arc<Vec<Arc<T>>>`,
/// type-erased so one cache can hold every resource type.
pub type Association = Arc<dyn Any + Send + Sync>;

/// Association key (explicit name or selector) to resolved value.
pub type Associations = HashMap<String, Association>;

/// One entry of a resource's association cache.
///
/// Carried values point back up the graph (document to folder, folder to
/// workspace) and are held weakly, so parents and the children they cache
/// never form a reference cycle.
pub(crate) enum Slot {
    Resolved(Association),
    Carried(Weak<dyn Any + Send + Sync>),
}

impl Slot {
    /// The cached value; `None` once a carried parent has been dropped.
    pub(crate) fn value(&self) -> Option<Association> {
        match self {
            Slot::Resolved(value) => Some(value.clone()),
            Slot::Carried(weak) => weak.upgrade(),
        }
    }
}

pub(crate) type Slots = HashMap<String, Slot>;

pub(crate) fn carry(carried: Associations) -> impl Iterator<Item = (String, Slot)> {
    carried
        .into_iter()
        .map(|(key, value)| (key, Slot::Carried(Arc::downgrade(&value))))
}

pub(crate) fn downcast<T: Any + Send + Sync>(key: &str, value: &Association) -> Result<Arc<T>> {
    value
        .clone()
        .downcast::<T>()
        .map_err(|_| Error::AssociationType(key.to_owned()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn downcast_checks_the_stored_type() {
        let value: Association = Arc::new(vec![Arc::new(7u32)]);
        assert_eq!(*downcast::<Vec<Arc<u32>>>("n", &value).unwrap()[0], 7);
        assert!(matches!(
            downcast::<u32>("n", &value),
            Err(Error::AssociationType(key)) if key == "n"
        ));
    }

    #[test]
    fn carried_slots_follow_the_parent_lifetime() {
        let parent = Arc::new(5u32);
        let mut carried = Associations::new();
        carried.insert("parent".to_owned(), parent.clone());

        let slots: Slots = carry(carried).collect();
        let value = slots["parent"].value().unwrap();
        assert!(Arc::ptr_eq(&downcast::<u32>("parent", &value).unwrap(), &parent));

        drop(value);
        drop(parent);
        assert!(slots["parent"].value().is_none());
    }
}
