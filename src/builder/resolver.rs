//! Abstract-method obligations a new class inherits.
//!
//! Declarations are resolved nearest-first along the superclass chain: an
//! abstract method redeclared concretely by a nearer ancestor is satisfied,
//! and a concrete method redeclared abstract by a nearer ancestor is an
//! obligation again.

use std::collections::{HashMap, HashSet};
use std::iter;
use std::sync::Arc;

use crate::model::{ClassDecl, MethodSignature};

/// `class` followed by its explicit ancestors.
fn chain(class: &ClassDecl) -> impl Iterator<Item = &ClassDecl> {
    iter::once(class).chain(class.ancestors().map(|a| &**a))
}

/// For every signature on the chain, whether its nearest declaration is concrete.
fn nearest_declarations(class: &ClassDecl) -> HashMap<MethodSignature, bool> {
    let mut nearest = HashMap::new();
    for class in chain(class) {
        for method in &class.methods {
            nearest
                .entry(method.signature())
                .or_insert(!method.is_abstract());
        }
    }
    nearest
}

/// Abstract methods declared by `superclass` and its ancestors that are still
/// unimplemented, in declaration order, nearest class first. The walk stops at
/// the first concrete class.
pub fn obligations(superclass: &ClassDecl) -> Vec<MethodSignature> {
    let nearest = nearest_declarations(superclass);
    let mut seen = HashSet::new();
    let mut out = vec![];
    for class in chain(superclass) {
        if !class.is_abstract() {
            break;
        }
        for method in class.methods.iter().filter(|m| m.is_abstract()) {
            let signature = method.signature();
            let satisfied = nearest.get(&signature).copied().unwrap_or(false);
            if !satisfied && seen.insert(signature.clone()) {
                out.push(signature);
            }
        }
    }
    out
}

/// Interface methods a class with `superclass` and the attached `interfaces`
/// must implement: methods of interfaces implemented along the chain, then of
/// the attached ones, each followed by its super-interfaces. Methods with a
/// concrete declaration on the chain are dropped.
pub fn interface_obligations(
    superclass: Option<&ClassDecl>,
    interfaces: &[Arc<ClassDecl>],
) -> Vec<MethodSignature> {
    let nearest = superclass.map(nearest_declarations).unwrap_or_default();

    let mut sources: Vec<Arc<ClassDecl>> = vec![];
    if let Some(superclass) = superclass {
        for class in chain(superclass) {
            sources.extend(class.all_interfaces());
        }
    }
    for interface in interfaces {
        sources.push(Arc::clone(interface));
        sources.extend(interface.all_interfaces());
    }

    let mut seen_interfaces = HashSet::new();
    let mut seen = HashSet::new();
    let mut out = vec![];
    for interface in sources {
        if !seen_interfaces.insert(Arc::clone(&interface.class_name)) {
            continue;
        }
        for method in interface.methods.iter().filter(|m| m.is_abstract()) {
            let signature = method.signature();
            if nearest.get(&signature).copied().unwrap_or(false) {
                continue;
            }
            if seen.insert(signature.clone()) {
                out.push(signature);
            }
        }
    }
    out
}

/// Superclass obligations followed by interface obligations, deduplicated.
pub fn all_obligations(
    superclass: Option<&ClassDecl>,
    interfaces: &[Arc<ClassDecl>],
) -> Vec<MethodSignature> {
    let mut out = superclass.map(obligations).unwrap_or_default();
    let mut seen: HashSet<_> = out.iter().cloned().collect();
    for signature in interface_obligations(superclass, interfaces) {
        if seen.insert(signature.clone()) {
            out.push(signature);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        consts::{ClassAccessFlag, MethodAccessFlag},
        descriptor::MethodDescriptor,
        model::MethodDecl,
    };

    fn abstract_method(name: &str) -> MethodDecl {
        MethodDecl::new(
            MethodAccessFlag::PUBLIC | MethodAccessFlag::ABSTRACT,
            name,
            &MethodDescriptor::void_no_args(),
        )
    }

    fn concrete_method(name: &str) -> MethodDecl {
        MethodDecl::new(MethodAccessFlag::PUBLIC, name, &MethodDescriptor::void_no_args())
    }

    fn class(
        name: &str,
        is_abstract: bool,
        super_class: Option<&Arc<ClassDecl>>,
        methods: Vec<MethodDecl>,
    ) -> Arc<ClassDecl> {
        let mut flags = ClassAccessFlag::PUBLIC;
        if is_abstract {
            flags |= ClassAccessFlag::ABSTRACT;
        }
        let mut class = ClassDecl::new(name, flags);
        if let Some(super_class) = super_class {
            class.set_super_class(Arc::clone(super_class));
        }
        for method in methods {
            class.add_method(method);
        }
        Arc::new(class)
    }

    fn interface(name: &str, extends: &[&Arc<ClassDecl>], methods: &[&str]) -> Arc<ClassDecl> {
        let mut interface = ClassDecl::new(
            name,
            ClassAccessFlag::PUBLIC | ClassAccessFlag::INTERFACE | ClassAccessFlag::ABSTRACT,
        );
        for parent in extends {
            interface.add_interface(Arc::clone(parent));
        }
        for method in methods {
            interface.add_method(abstract_method(method));
        }
        Arc::new(interface)
    }

    fn names(signatures: &[MethodSignature]) -> Vec<&str> {
        signatures.iter().map(|s| s.name()).collect()
    }

    #[test]
    fn test_direct_obligations() {
        let a = class("A", true, None, vec![abstract_method("foo"), concrete_method("bar")]);
        assert_eq!(names(&obligations(&a)), ["foo"]);
    }

    #[test]
    fn test_transitive_obligations() {
        let a = class("A", true, None, vec![abstract_method("foo"), abstract_method("baz")]);
        let b = class("B", true, Some(&a), vec![concrete_method("foo"), abstract_method("qux")]);
        assert_eq!(names(&obligations(&b)), ["qux", "baz"]);
    }

    #[test]
    fn test_redeclared_abstract() {
        let a = class("A", true, None, vec![concrete_method("foo")]);
        let b = class("B", true, Some(&a), vec![abstract_method("foo")]);
        assert_eq!(names(&obligations(&b)), ["foo"]);
    }

    #[test]
    fn test_walk_stops_at_concrete_ancestor() {
        let a = class("A", true, None, vec![abstract_method("foo")]);
        let b = class("B", false, Some(&a), vec![concrete_method("foo")]);
        let c = class("C", true, Some(&b), vec![abstract_method("bar")]);
        assert_eq!(names(&obligations(&c)), ["bar"]);
        assert!(obligations(&b).is_empty());
    }

    #[test]
    fn test_interface_obligations() {
        let i = interface("I", &[], &["alpha"]);
        let j = interface("J", &[&i], &["beta", "foo"]);
        let a = class("A", true, None, vec![concrete_method("foo")]);

        let found = interface_obligations(Some(&*a), &[Arc::clone(&j)]);
        assert_eq!(names(&found), ["beta", "alpha"]);

        let found = interface_obligations(None, &[j, i]);
        assert_eq!(names(&found), ["beta", "foo", "alpha"]);
    }

    #[test]
    fn test_all_obligations_dedup() {
        let i = interface("I", &[], &["foo", "bar"]);
        let a = class("A", true, None, vec![abstract_method("foo")]);
        let found = all_obligations(Some(&*a), &[i]);
        assert_eq!(names(&found), ["foo", "bar"]);
        assert!(all_obligations(None, &[]).is_empty());
    }

    #[test]
    fn test_ancestor_interfaces_contribute() {
        let i = interface("I", &[], &["run"]);
        let mut base = ClassDecl::new("Base", ClassAccessFlag::PUBLIC | ClassAccessFlag::ABSTRACT);
        base.add_interface(i);
        let base = Arc::new(base);
        assert_eq!(names(&interface_obligations(Some(&*base), &[])), ["run"]);
    }
}
