//! Collaborators the builder draws names, literals and method bodies from.
//!
//! All of them take the run's RNG as an argument instead of owning one, so a
//! whole run is reproducible from a single seed.

use rand::RngCore;

pub use literals::RandomLiterals;
pub use names::RandomNames;
pub use statements::StatementBodies;

use crate::{descriptor::FieldType, error::BuildError, model::MethodDecl};

mod literals;
mod names;
mod statements;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameKind {
    Class,
    Interface,
    Field,
    Method,
    Constant,
}

pub trait NameGenerator {
    /// A fresh identifier. Implementations should avoid repeats within a run;
    /// the builder still rejects names that collide inside one class.
    fn generate(&mut self, rng: &mut dyn RngCore, kind: NameKind) -> String;
}

pub trait LiteralGenerator {
    /// Source literal assignable to a field of `field_type`.
    fn literal_for(&mut self, rng: &mut dyn RngCore, field_type: &FieldType) -> String;
}

pub trait BodySynthesizer {
    /// Body text for a concrete method of `owner`, braces included, in the
    /// same shape as constructor bodies: `{\n\t<stmt>\n}\n`.
    fn synthesize(
        &mut self,
        rng: &mut dyn RngCore,
        literals: &mut dyn LiteralGenerator,
        owner: &str,
        method: &MethodDecl,
        statements: usize,
    ) -> Result<String, BuildError>;
}

pub struct Synthesizers {
    pub names: Box<dyn NameGenerator>,
    pub literals: Box<dyn LiteralGenerator>,
    pub bodies: Box<dyn BodySynthesizer>,
}

impl Default for Synthesizers {
    fn default() -> Self {
        Synthesizers {
            names: Box::new(RandomNames::new()),
            literals: Box::new(RandomLiterals),
            bodies: Box::new(StatementBodies),
        }
    }
}

/// Structural check applied to every synthesized body before it is accepted.
pub fn check_body(body: &str) -> Result<(), String> {
    if !body.starts_with('{') || !body.ends_with("}\n") {
        return Err("body must be a brace-delimited block ending in a newline".to_string());
    }
    let mut depth = 0i32;
    for ch in body.chars() {
        match ch {
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth < 0 {
                    return Err("unbalanced `}`".to_string());
                }
            }
            _ => {}
        }
    }
    if depth != 0 {
        return Err("unbalanced `{`".to_string());
    }
    Ok(())
}
