//! Construction of one class or interface against the configuration and the
//! hierarchy pool.
//!
//! Construction never aborts: a step whose precondition cannot be met (no
//! superclass candidate, a body that fails its structural check, a name
//! collision that survives retries) is logged and skipped, and the class is
//! still registered with whatever the remaining steps produced.

use std::sync::Arc;

use rand::{RngCore, seq::SliceRandom};
use tracing::{debug, debug_span, warn};

use crate::{
    bodies::{MemberId, MethodBodies},
    config::Configuration,
    consts::{ClassAccessFlag, FieldAccessFlag, MethodAccessFlag},
    descriptor::{FieldType, MethodDescriptor},
    error::{BuildError, PoolError},
    model::{ClassDecl, ConstructorDecl, FieldDecl, MethodDecl, MethodSignature, ROOT_CLASS},
    pool::HierarchyPool,
    synth::{NameKind, Synthesizers, check_body},
};

pub mod resolver;

/// Retries before a colliding member name is given up on.
const MAX_NAME_ATTEMPTS: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassKind {
    Abstract,
    Concrete,
}

impl ClassKind {
    pub fn access_flags(&self) -> ClassAccessFlag {
        match self {
            ClassKind::Abstract => ClassAccessFlag::PUBLIC | ClassAccessFlag::ABSTRACT,
            ClassKind::Concrete => ClassAccessFlag::PUBLIC,
        }
    }
}

pub struct ClassBuilder<'a> {
    config: &'a Configuration,
    pool: &'a HierarchyPool,
    bodies: &'a mut MethodBodies,
    synth: &'a mut Synthesizers,
    rng: &'a mut dyn RngCore,
}

impl<'a> ClassBuilder<'a> {
    pub fn new(
        config: &'a Configuration,
        pool: &'a HierarchyPool,
        bodies: &'a mut MethodBodies,
        synth: &'a mut Synthesizers,
        rng: &'a mut dyn RngCore,
    ) -> Self {
        Self {
            config,
            pool,
            bodies,
            synth,
            rng,
        }
    }

    /// Builds a class named `name` and registers it in the pool. Only the
    /// registration can fail, when `name` is already taken.
    pub fn build(&mut self, name: &str, kind: ClassKind) -> Result<Arc<ClassDecl>, PoolError> {
        let _span = debug_span!("build_class", class = name, ?kind).entered();
        let mut class = ClassDecl::new(name, kind.access_flags());

        match self.select_superclass() {
            Ok(super_class) => {
                debug!(super_class = super_class.name(), "attached superclass");
                class.set_super_class(super_class);
            }
            Err(err) => {
                debug!(%err, "extending root type");
                class.set_super_class(Arc::clone(&ROOT_CLASS));
            }
        }

        match self.select_interfaces() {
            Ok(interfaces) => {
                for interface in interfaces {
                    debug!(interface = interface.name(), "attached interface");
                    class.add_interface(interface);
                }
            }
            Err(err) => debug!(%err, "no interfaces attached"),
        }

        let obligations =
            resolver::all_obligations(class.superclass().map(|s| &**s), class.interfaces());
        for signature in obligations {
            self.implement_obligation(&mut class, &signature);
        }

        let assignments = self.add_fields(&mut class);
        self.add_constructor(&mut class, &assignments);

        if kind == ClassKind::Abstract {
            let abstract_methods = self.config.abstract_methods.draw(self.rng);
            self.add_abstract_methods(&mut class, abstract_methods);
        }
        let concrete_methods = self.config.concrete_methods.draw(self.rng);
        self.add_concrete_methods(&mut class, concrete_methods);

        self.pool.insert(class)
    }

    /// Builds an interface: constants, abstract method signatures and
    /// optionally some earlier interfaces it extends.
    pub fn build_interface(&mut self, name: &str) -> Result<Arc<ClassDecl>, PoolError> {
        let _span = debug_span!("build_interface", interface = name).entered();
        let mut interface = ClassDecl::new(
            name,
            ClassAccessFlag::PUBLIC | ClassAccessFlag::INTERFACE | ClassAccessFlag::ABSTRACT,
        );

        match self.select_interfaces() {
            Ok(parents) => {
                for parent in parents {
                    interface.add_interface(parent);
                }
            }
            Err(err) => debug!(%err, "interface extends nothing"),
        }

        for _ in 0..self.config.interface_constants.draw(self.rng) {
            let name = match self.fresh_name(NameKind::Constant, &interface, |c, n| {
                c.has_field_named(n)
            }) {
                Ok(name) => name,
                Err(err) => {
                    warn!(%err, "skipping constant");
                    continue;
                }
            };
            let field_type = FieldType::random_primitive(self.rng);
            let value = self.synth.literals.literal_for(self.rng, &field_type);
            let flags = FieldAccessFlag::PUBLIC | FieldAccessFlag::STATIC | FieldAccessFlag::FINAL;
            interface.add_field(FieldDecl::new(flags, &name, &field_type).with_constant(value));
        }

        let methods = self.config.interface_methods.draw(self.rng);
        self.add_abstract_methods(&mut interface, methods);

        self.pool.insert(interface)
    }

    /// A class or interface name not registered in the pool yet.
    pub fn class_name(&mut self, kind: NameKind) -> String {
        let mut name = String::new();
        for _ in 0..MAX_NAME_ATTEMPTS {
            name = self.synth.names.generate(self.rng, kind);
            if self.pool.get(&name).is_err() {
                return name;
            }
        }
        format!("{name}{}", self.pool.len())
    }

    fn select_superclass(&mut self) -> Result<Arc<ClassDecl>, BuildError> {
        let candidates = self.pool.superclass_candidates();
        candidates
            .choose(&mut *self.rng)
            .cloned()
            .ok_or(BuildError::NoCandidate { slot: "superclass" })
    }

    fn select_interfaces(&mut self) -> Result<Vec<Arc<ClassDecl>>, BuildError> {
        let candidates = self.pool.interface_candidates();
        if candidates.is_empty() {
            return Err(BuildError::NoCandidate { slot: "interface" });
        }
        let count = self.config.interfaces.draw(self.rng);
        Ok(candidates
            .choose_multiple(&mut *self.rng, count)
            .cloned()
            .collect())
    }

    /// Adds a concrete override for an inherited abstract method. A body that
    /// cannot be synthesized leaves the override in place with an empty body.
    fn implement_obligation(&mut self, class: &mut ClassDecl, signature: &MethodSignature) {
        if class.declared_method(signature).is_some() {
            return;
        }
        let method = MethodDecl::with_descriptor(
            MethodAccessFlag::PUBLIC,
            signature.name(),
            signature.descriptor(),
        );
        if let Err(err) = method.method_descriptor() {
            warn!(%err, method = signature.name(), "cannot implement obligation");
            return;
        }

        let statements = self.config.statements.draw(self.rng);
        match self.synth.bodies.synthesize(
            self.rng,
            self.synth.literals.as_mut(),
            class.name(),
            &method,
            statements,
        ) {
            Ok(body) => self.bodies.insert(MemberId::method(class, &method), body),
            Err(err) => warn!(%err, "override keeps an empty body"),
        }
        class.add_method(method);
    }

    /// Adds private fields of random primitive types and returns one
    /// constructor assignment line per field, in declaration order.
    fn add_fields(&mut self, class: &mut ClassDecl) -> Vec<String> {
        let mut assignments = vec![];
        for _ in 0..self.config.fields.draw(self.rng) {
            let name = match self.fresh_name(NameKind::Field, class, |c, n| c.has_field_named(n)) {
                Ok(name) => name,
                Err(err) => {
                    warn!(%err, "skipping field");
                    continue;
                }
            };
            let field_type = FieldType::random_primitive(self.rng);
            class.add_field(FieldDecl::new(FieldAccessFlag::PRIVATE, &name, &field_type));

            match assigned_type(class, &name) {
                Ok(field_type) => {
                    let value = self.synth.literals.literal_for(self.rng, &field_type);
                    assignments.push(format!("\t{name} = {value};\n"));
                }
                Err(err) => warn!(%err, "field left unassigned"),
            }
        }
        assignments
    }

    fn add_constructor(&mut self, class: &mut ClassDecl, assignments: &[String]) {
        let body = format!("{{\n{}}}\n", assignments.concat());
        if let Err(reason) = check_body(&body) {
            let err = BuildError::BodySynthesisFailed {
                member: format!("{}.<init>", class.name()),
                reason,
            };
            warn!(%err, "skipping constructor");
            return;
        }
        let constructor =
            ConstructorDecl::new(MethodAccessFlag::PUBLIC, &MethodDescriptor::void_no_args());
        self.bodies
            .insert(MemberId::constructor(class, &constructor), body);
        class.add_constructor(constructor);
    }

    fn add_abstract_methods(&mut self, class: &mut ClassDecl, count: usize) {
        for _ in 0..count {
            let name = match self.fresh_name(NameKind::Method, class, |c, n| c.has_method_named(n))
            {
                Ok(name) => name,
                Err(err) => {
                    warn!(%err, "skipping abstract method");
                    continue;
                }
            };
            class.add_method(MethodDecl::new(
                MethodAccessFlag::PUBLIC | MethodAccessFlag::ABSTRACT,
                &name,
                &MethodDescriptor::void_no_args(),
            ));
        }
    }

    fn add_concrete_methods(&mut self, class: &mut ClassDecl, count: usize) {
        for _ in 0..count {
            let name = match self.fresh_name(NameKind::Method, class, |c, n| c.has_method_named(n))
            {
                Ok(name) => name,
                Err(err) => {
                    warn!(%err, "skipping concrete method");
                    continue;
                }
            };
            let method = MethodDecl::new(
                MethodAccessFlag::PUBLIC,
                &name,
                &MethodDescriptor::void_no_args(),
            );
            let statements = self.config.statements.draw(self.rng);
            match self.synth.bodies.synthesize(
                self.rng,
                self.synth.literals.as_mut(),
                class.name(),
                &method,
                statements,
            ) {
                Ok(body) => {
                    self.bodies.insert(MemberId::method(class, &method), body);
                    class.add_method(method);
                }
                Err(err) => warn!(%err, "skipping concrete method"),
            }
        }
    }

    fn fresh_name(
        &mut self,
        kind: NameKind,
        class: &ClassDecl,
        taken: impl Fn(&ClassDecl, &str) -> bool,
    ) -> Result<String, BuildError> {
        let mut name = String::new();
        for _ in 0..MAX_NAME_ATTEMPTS {
            name = self.synth.names.generate(self.rng, kind);
            if !taken(class, &name) {
                return Ok(name);
            }
        }
        Err(BuildError::NameCollision {
            name,
            owner: class.name().to_string(),
        })
    }
}

/// Type of the field `name` as declared on `class`.
fn assigned_type(class: &ClassDecl, name: &str) -> Result<FieldType, BuildError> {
    Ok(class.field(name)?.field_type()?)
}
