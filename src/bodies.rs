use std::collections::HashMap;
use std::sync::Arc;

use crate::model::{CONSTRUCTOR_NAME, ClassDecl, ConstructorDecl, MethodDecl};

/// Stable identity of a method or constructor: owning class, name and
/// parameter count. Generated members never overload by parameter type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MemberId {
    pub(crate) class_name: Arc<str>,
    pub(crate) name: Arc<str>,
    pub(crate) arity: usize,
}

impl MemberId {
    pub fn new(class_name: &str, name: &str, arity: usize) -> Self {
        MemberId {
            class_name: Arc::from(class_name),
            name: Arc::from(name),
            arity,
        }
    }

    pub fn constructor(class: &ClassDecl, constructor: &ConstructorDecl) -> Self {
        let arity = constructor
            .method_descriptor()
            .map(|d| d.parameters().len())
            .unwrap_or(0);
        MemberId {
            class_name: Arc::clone(&class.class_name),
            name: Arc::from(CONSTRUCTOR_NAME),
            arity,
        }
    }

    pub fn method(class: &ClassDecl, method: &MethodDecl) -> Self {
        let arity = method
            .method_descriptor()
            .map(|d| d.parameters().len())
            .unwrap_or(0);
        MemberId {
            class_name: Arc::clone(&class.class_name),
            name: Arc::clone(&method.name),
            arity,
        }
    }
}

impl std::fmt::Display for MemberId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}/{}", self.class_name, self.name, self.arity)
    }
}

/// Source text of synthesized bodies, braces included, e.g. `"{\n\tx = 1;\n}\n"`.
#[derive(Debug, Default)]
pub struct MethodBodies {
    bodies: HashMap<MemberId, String>,
}

impl MethodBodies {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn insert(&mut self, id: MemberId, body: String) {
        self.bodies.insert(id, body);
    }

    pub fn get(&self, id: &MemberId) -> Option<&str> {
        self.bodies.get(id).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        consts::{ClassAccessFlag, MethodAccessFlag},
        descriptor::MethodDescriptor,
    };

    #[test]
    fn test_member_ids() {
        let class = ClassDecl::new("Foo", ClassAccessFlag::PUBLIC);
        let method = MethodDecl::new(MethodAccessFlag::PUBLIC, "run", &MethodDescriptor::void_no_args());
        let constructor =
            ConstructorDecl::new(MethodAccessFlag::PUBLIC, &MethodDescriptor::void_no_args());

        assert_eq!(MemberId::method(&class, &method), MemberId::new("Foo", "run", 0));
        assert_eq!(
            MemberId::constructor(&class, &constructor).to_string(),
            "Foo.<init>/0"
        );
    }

    #[test]
    fn test_body_table() {
        let mut bodies = MethodBodies::new();
        assert!(bodies.is_empty());
        bodies.insert(MemberId::new("Foo", "run", 0), "{\n}\n".to_string());
        assert_eq!(bodies.get(&MemberId::new("Foo", "run", 0)), Some("{\n}\n"));
        assert_eq!(bodies.get(&MemberId::new("Bar", "run", 0)), None);
        assert_eq!(bodies.len(), 1);
    }
}
