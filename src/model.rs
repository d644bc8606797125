use std::sync::Arc;

use once_cell::sync::Lazy;

pub use inheritance::*;

use crate::{
    consts::{ClassAccessFlag, FieldAccessFlag, MethodAccessFlag},
    descriptor::{FieldType, MethodDescriptor, resolve_field_descriptor, resolve_method_descriptor},
    error::LookupError,
};

mod inheritance;

pub const ROOT_CLASS_NAME: &str = "java/lang/Object";

/// Name used for constructors in signatures and body-table keys.
pub const CONSTRUCTOR_NAME: &str = "<init>";

/// Implicit superclass of every class that extends nothing explicitly.
pub static ROOT_CLASS: Lazy<Arc<ClassDecl>> =
    Lazy::new(|| Arc::new(ClassDecl::new(ROOT_CLASS_NAME, ClassAccessFlag::PUBLIC)));

/// One synthesized class or interface.
///
/// A `ClassDecl` is populated while it is owned by a builder, then frozen by
/// moving it into an `Arc`. Superclass and interface links point at frozen
/// declarations only, so the superclass chain cannot contain a cycle.
#[derive(Debug)]
pub struct ClassDecl {
    pub(crate) access_flags: ClassAccessFlag,
    pub(crate) class_name: Arc<str>,
    pub(crate) super_class: Option<Arc<ClassDecl>>,
    pub(crate) interfaces: Vec<Arc<ClassDecl>>,
    pub(crate) fields: Vec<FieldDecl>,
    pub(crate) constructors: Vec<ConstructorDecl>,
    pub(crate) methods: Vec<MethodDecl>,
}

impl ClassDecl {
    pub fn new(name: &str, access_flags: ClassAccessFlag) -> Self {
        ClassDecl {
            access_flags,
            class_name: Arc::from(name),
            super_class: None,
            interfaces: vec![],
            fields: vec![],
            constructors: vec![],
            methods: vec![],
        }
    }

    pub fn set_super_class(&mut self, super_class: Arc<ClassDecl>) {
        self.super_class = Some(super_class);
    }

    pub fn add_interface(&mut self, interface: Arc<ClassDecl>) {
        self.interfaces.push(interface);
    }

    pub fn add_field(&mut self, field: FieldDecl) {
        self.fields.push(field);
    }

    pub fn add_constructor(&mut self, constructor: ConstructorDecl) {
        self.constructors.push(constructor);
    }

    pub fn add_method(&mut self, method: MethodDecl) {
        self.methods.push(method);
    }

    pub fn name(&self) -> &str {
        &self.class_name
    }

    pub fn simple_name(&self) -> &str {
        self.class_name
            .rsplit_once('/')
            .map(|(_, simple)| simple)
            .unwrap_or(&self.class_name)
    }

    pub fn access_flags(&self) -> ClassAccessFlag {
        self.access_flags
    }

    pub fn is_abstract(&self) -> bool {
        self.access_flags.contains(ClassAccessFlag::ABSTRACT)
    }

    pub fn is_interface(&self) -> bool {
        self.access_flags.contains(ClassAccessFlag::INTERFACE)
    }

    pub fn is_root(&self) -> bool {
        self.super_class.is_none() && self.class_name.as_ref() == ROOT_CLASS_NAME
    }

    /// The explicit superclass; `None` when the class extends the root type.
    pub fn superclass(&self) -> Option<&Arc<ClassDecl>> {
        self.super_class.as_ref().filter(|s| !s.is_root())
    }

    pub fn interfaces(&self) -> &[Arc<ClassDecl>] {
        &self.interfaces
    }

    pub fn fields(&self) -> &[FieldDecl] {
        &self.fields
    }

    pub fn constructors(&self) -> &[ConstructorDecl] {
        &self.constructors
    }

    pub fn methods(&self) -> &[MethodDecl] {
        &self.methods
    }

    pub fn field(&self, name: &str) -> Result<&FieldDecl, LookupError> {
        self.fields
            .iter()
            .find(|f| f.name.as_ref() == name)
            .ok_or_else(|| LookupError::NotFound {
                what: format!("field `{name}`"),
                owner: self.class_name.to_string(),
            })
    }

    pub fn declared_method(&self, signature: &MethodSignature) -> Option<&MethodDecl> {
        self.methods.iter().find(|m| m.signature() == *signature)
    }

    pub fn has_method_named(&self, name: &str) -> bool {
        self.methods.iter().any(|m| m.name.as_ref() == name)
    }

    pub fn has_field_named(&self, name: &str) -> bool {
        self.fields.iter().any(|f| f.name.as_ref() == name)
    }
}

#[derive(Debug, Clone)]
pub struct FieldDecl {
    pub(crate) access_flags: FieldAccessFlag,
    pub(crate) name: Arc<str>,
    pub(crate) descriptor: Arc<str>,
    // compile-time constant, rendered on the declaration line
    pub(crate) constant_value: Option<String>,
}

impl FieldDecl {
    pub fn new(access_flags: FieldAccessFlag, name: &str, field_type: &FieldType) -> Self {
        Self::with_descriptor(access_flags, name, &field_type.to_descriptor())
    }

    pub fn with_descriptor(access_flags: FieldAccessFlag, name: &str, descriptor: &str) -> Self {
        FieldDecl {
            access_flags,
            name: Arc::from(name),
            descriptor: Arc::from(descriptor),
            constant_value: None,
        }
    }

    pub fn with_constant(mut self, constant: String) -> Self {
        self.constant_value = Some(constant);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn access_flags(&self) -> FieldAccessFlag {
        self.access_flags
    }

    pub fn constant_value(&self) -> Option<&str> {
        self.constant_value.as_deref()
    }

    pub fn field_type(&self) -> Result<FieldType, LookupError> {
        resolve_field_descriptor(&self.descriptor)
    }
}

#[derive(Debug, Clone)]
pub struct ConstructorDecl {
    pub(crate) access_flags: MethodAccessFlag,
    pub(crate) descriptor: Arc<str>,
}

impl ConstructorDecl {
    pub fn new(access_flags: MethodAccessFlag, descriptor: &MethodDescriptor) -> Self {
        Self::with_descriptor(access_flags, &descriptor.to_descriptor())
    }

    pub fn with_descriptor(access_flags: MethodAccessFlag, descriptor: &str) -> Self {
        ConstructorDecl {
            access_flags,
            descriptor: Arc::from(descriptor),
        }
    }

    pub fn access_flags(&self) -> MethodAccessFlag {
        self.access_flags
    }

    pub fn signature(&self) -> MethodSignature {
        MethodSignature {
            name: Arc::from(CONSTRUCTOR_NAME),
            descriptor: Arc::clone(&self.descriptor),
        }
    }

    pub fn method_descriptor(&self) -> Result<MethodDescriptor, LookupError> {
        resolve_method_descriptor(&self.descriptor)
    }
}

#[derive(Debug, Clone)]
pub struct MethodDecl {
    pub(crate) access_flags: MethodAccessFlag,
    pub(crate) name: Arc<str>,
    pub(crate) descriptor: Arc<str>,
}

impl MethodDecl {
    pub fn new(access_flags: MethodAccessFlag, name: &str, descriptor: &MethodDescriptor) -> Self {
        Self::with_descriptor(access_flags, name, &descriptor.to_descriptor())
    }

    pub fn with_descriptor(access_flags: MethodAccessFlag, name: &str, descriptor: &str) -> Self {
        MethodDecl {
            access_flags,
            name: Arc::from(name),
            descriptor: Arc::from(descriptor),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn access_flags(&self) -> MethodAccessFlag {
        self.access_flags
    }

    pub fn is_abstract(&self) -> bool {
        self.access_flags.contains(MethodAccessFlag::ABSTRACT)
    }

    pub fn signature(&self) -> MethodSignature {
        MethodSignature {
            name: Arc::clone(&self.name),
            descriptor: Arc::clone(&self.descriptor),
        }
    }

    pub fn method_descriptor(&self) -> Result<MethodDescriptor, LookupError> {
        resolve_method_descriptor(&self.descriptor)
    }
}

/// Name plus raw descriptor; two methods with equal signatures override
/// each other.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MethodSignature {
    pub(crate) name: Arc<str>,
    pub(crate) descriptor: Arc<str>,
}

impl MethodSignature {
    pub fn new(name: &str, descriptor: &str) -> Self {
        MethodSignature {
            name: Arc::from(name),
            descriptor: Arc::from(descriptor),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn descriptor(&self) -> &str {
        &self.descriptor
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_class() {
        assert!(ROOT_CLASS.is_root());
        assert_eq!(ROOT_CLASS.simple_name(), "Object");
        assert!(ROOT_CLASS.superclass().is_none());
    }

    #[test]
    fn test_superclass_hides_root() {
        let mut class = ClassDecl::new("Foo", ClassAccessFlag::PUBLIC);
        class.set_super_class(Arc::clone(&ROOT_CLASS));
        assert!(class.superclass().is_none());
        assert!(!class.is_root());

        let parent = Arc::new(ClassDecl::new("Bar", ClassAccessFlag::PUBLIC));
        class.set_super_class(Arc::clone(&parent));
        assert_eq!(class.superclass().map(|s| s.name()), Some("Bar"));
    }

    #[test]
    fn test_field_lookup() {
        let mut class = ClassDecl::new("Foo", ClassAccessFlag::PUBLIC);
        class.add_field(FieldDecl::new(FieldAccessFlag::PRIVATE, "count", &FieldType::Int));
        assert_eq!(class.field("count").unwrap().field_type(), Ok(FieldType::Int));
        assert!(matches!(
            class.field("missing"),
            Err(LookupError::NotFound { .. })
        ));
        assert!(class.has_field_named("count"));
    }

    #[test]
    fn test_method_signature() {
        let method = MethodDecl::new(
            MethodAccessFlag::PUBLIC | MethodAccessFlag::ABSTRACT,
            "run",
            &MethodDescriptor::void_no_args(),
        );
        assert!(method.is_abstract());
        assert_eq!(method.signature(), MethodSignature::new("run", "()V"));

        let mut class = ClassDecl::new("Foo", ClassAccessFlag::PUBLIC);
        class.add_method(method);
        assert!(class.declared_method(&MethodSignature::new("run", "()V")).is_some());
        assert!(class.declared_method(&MethodSignature::new("run", "()I")).is_none());
    }

    #[test]
    fn test_constructor_signature() {
        let constructor =
            ConstructorDecl::new(MethodAccessFlag::PUBLIC, &MethodDescriptor::void_no_args());
        assert_eq!(constructor.signature().name(), CONSTRUCTOR_NAME);
        assert!(constructor.method_descriptor().unwrap().parameters().is_empty());
    }
}
