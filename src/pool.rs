use std::sync::Arc;

use dashmap::DashMap;
use parking_lot::RwLock;
use tracing::debug;

use crate::{
    error::{LookupError, PoolError},
    model::ClassDecl,
};

/// Previously generated classes and interfaces, available as superclass and
/// interface candidates. Append-only for the duration of a run.
///
/// Appends take the write lock on the ordered list, so concurrent inserts are
/// serialized; candidate selection only needs the read lock, and name lookups
/// go through the registry without touching the list.
#[derive(Debug)]
pub struct HierarchyPool {
    max_depth: usize,
    classes: RwLock<Vec<Arc<ClassDecl>>>,
    registry: DashMap<Arc<str>, Arc<ClassDecl>>,
}

impl HierarchyPool {
    pub fn new(max_depth: usize) -> Self {
        HierarchyPool {
            max_depth,
            classes: RwLock::new(vec![]),
            registry: DashMap::new(),
        }
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Freezes `class` and registers it. Refuses classes that would break the
    /// pool invariant: unique names, acyclic chains no deeper than `max_depth`.
    pub fn insert(&self, class: ClassDecl) -> Result<Arc<ClassDecl>, PoolError> {
        let mut classes = self.classes.write();
        if self.registry.contains_key(class.name()) {
            return Err(PoolError::DuplicateName(class.name().to_string()));
        }
        if class.ancestors().any(|a| a.name() == class.name()) {
            return Err(PoolError::SelfAncestor(class.name().to_string()));
        }
        let depth = class.depth();
        if depth > self.max_depth {
            return Err(PoolError::DepthExceeded {
                name: class.name().to_string(),
                depth,
                max: self.max_depth,
            });
        }

        let class = Arc::new(class);
        self.registry
            .insert(Arc::clone(&class.class_name), Arc::clone(&class));
        classes.push(Arc::clone(&class));
        debug!(class = class.name(), depth, "registered class");
        Ok(class)
    }

    pub fn get(&self, name: &str) -> Result<Arc<ClassDecl>, LookupError> {
        self.registry
            .get(name)
            .map(|entry| Arc::clone(entry.value()))
            .ok_or_else(|| LookupError::NotFound {
                what: format!("class `{name}`"),
                owner: "hierarchy pool".to_string(),
            })
    }

    /// Abstract classes that can be extended without exceeding `max_depth`.
    pub fn superclass_candidates(&self) -> Vec<Arc<ClassDecl>> {
        self.classes
            .read()
            .iter()
            .filter(|c| c.is_abstract() && !c.is_interface())
            .filter(|c| c.depth() < self.max_depth)
            .cloned()
            .collect()
    }

    pub fn interface_candidates(&self) -> Vec<Arc<ClassDecl>> {
        self.classes
            .read()
            .iter()
            .filter(|c| c.is_interface())
            .cloned()
            .collect()
    }

    /// All registered classes in insertion order.
    pub fn snapshot(&self) -> Vec<Arc<ClassDecl>> {
        self.classes.read().clone()
    }

    pub fn len(&self) -> usize {
        self.classes.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.read().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::ClassAccessFlag;

    fn abstract_class(name: &str) -> ClassDecl {
        ClassDecl::new(name, ClassAccessFlag::PUBLIC | ClassAccessFlag::ABSTRACT)
    }

    #[test]
    fn test_insert_and_get() {
        let pool = HierarchyPool::new(3);
        assert!(pool.is_empty());
        let a = pool.insert(abstract_class("A")).unwrap();
        assert_eq!(pool.get("A").unwrap().name(), a.name());
        assert!(matches!(pool.get("B"), Err(LookupError::NotFound { .. })));
        assert_eq!(pool.len(), 1);
    }

    #[test]
    fn test_duplicate_name() {
        let pool = HierarchyPool::new(3);
        pool.insert(abstract_class("A")).unwrap();
        assert_eq!(
            pool.insert(abstract_class("A")).unwrap_err(),
            PoolError::DuplicateName("A".to_string())
        );
    }

    #[test]
    fn test_depth_limit() {
        let pool = HierarchyPool::new(1);
        let a = pool.insert(abstract_class("A")).unwrap();
        let mut b = abstract_class("B");
        b.set_super_class(Arc::clone(&a));
        let b = pool.insert(b).unwrap();

        // B is at the limit, only A can still be extended
        let names: Vec<_> = pool
            .superclass_candidates()
            .iter()
            .map(|c| c.name().to_string())
            .collect();
        assert_eq!(names, ["A"]);

        let mut c = abstract_class("C");
        c.set_super_class(b);
        assert!(matches!(
            pool.insert(c),
            Err(PoolError::DepthExceeded { depth: 2, max: 1, .. })
        ));
    }

    #[test]
    fn test_self_ancestor() {
        let pool = HierarchyPool::new(3);
        let a = Arc::new(abstract_class("A"));
        let mut again = abstract_class("A");
        again.set_super_class(a);
        assert_eq!(
            pool.insert(again).unwrap_err(),
            PoolError::SelfAncestor("A".to_string())
        );
    }

    #[test]
    fn test_candidates_by_kind() {
        let pool = HierarchyPool::new(3);
        pool.insert(abstract_class("A")).unwrap();
        pool.insert(ClassDecl::new("Concrete", ClassAccessFlag::PUBLIC))
            .unwrap();
        pool.insert(ClassDecl::new(
            "I",
            ClassAccessFlag::PUBLIC | ClassAccessFlag::INTERFACE | ClassAccessFlag::ABSTRACT,
        ))
        .unwrap();

        assert_eq!(pool.superclass_candidates().len(), 1);
        assert_eq!(pool.interface_candidates()[0].name(), "I");
        assert_eq!(pool.snapshot().len(), 3);
    }
}
