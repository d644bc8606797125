use std::collections::HashSet;
use std::sync::Arc;

use crate::model::ClassDecl;

/// Explicit superclasses of a class, nearest first. The root type is not
/// yielded.
pub struct Ancestors<'a> {
    next: Option<&'a Arc<ClassDecl>>,
}

impl<'a> Iterator for Ancestors<'a> {
    type Item = &'a Arc<ClassDecl>;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = current.superclass();
        Some(current)
    }
}

impl ClassDecl {
    pub fn ancestors(&self) -> Ancestors<'_> {
        Ancestors {
            next: self.superclass(),
        }
    }

    /// Number of explicit superclasses between this class and the root type.
    pub fn depth(&self) -> usize {
        self.ancestors().count()
    }

    /// Every interface reachable from `interfaces`, including
    /// super-interfaces, in first-seen order.
    pub fn all_interfaces(&self) -> Vec<Arc<ClassDecl>> {
        let mut seen = HashSet::new();
        let mut out = vec![];
        collect_interfaces(&self.interfaces, &mut seen, &mut out);
        out
    }
}

fn collect_interfaces(
    interfaces: &[Arc<ClassDecl>],
    seen: &mut HashSet<Arc<str>>,
    out: &mut Vec<Arc<ClassDecl>>,
) {
    for interface in interfaces {
        if !seen.insert(Arc::clone(&interface.class_name)) {
            continue;
        }
        out.push(Arc::clone(interface));
        collect_interfaces(&interface.interfaces, seen, out);
    }
}

pub fn is_same_or_sub_class_of(source: &ClassDecl, target: &ClassDecl) -> bool {
    if source.class_name == target.class_name {
        return true;
    }
    if let Some(super_class) = source.superclass() {
        return is_same_or_sub_class_of(super_class, target);
    }
    false
}

pub fn is_class_implements(class: &ClassDecl, interface: &ClassDecl) -> bool {
    for class_intf in &class.interfaces {
        if class_intf.class_name == interface.class_name
            || is_class_implements(class_intf, interface)
        {
            return true;
        }
    }
    if let Some(super_class) = class.superclass() {
        return is_class_implements(super_class, interface);
    }
    false
}
