//! Syllable-based identifier generator.
//!
//! Produces names like `Korvan`, `melTisar`, `DAN_QUIN`.

use std::collections::HashSet;

use rand::{Rng, RngCore};

use crate::synth::{NameGenerator, NameKind};

const SYLLABLES: &[&str] = &[
    "ka", "lo", "mi", "ra", "ten", "vo", "zu", "bel", "cor", "dan", "fen", "gil", "har", "jun",
    "kel", "mor", "nav", "pel", "quin", "sar", "tor", "vex", "wil", "yar", "bo", "ti", "nu",
];

/// Words a generated identifier must never be: Java keywords and literals,
/// plus the `java.lang` names generated bodies refer to.
const RESERVED: &[&str] = &[
    "abstract", "assert", "boolean", "break", "byte", "case", "catch", "char", "class", "const",
    "continue", "default", "do", "double", "else", "enum", "extends", "final", "finally",
    "float", "for", "goto", "if", "implements", "import", "instanceof", "int", "interface",
    "long", "native", "new", "package", "private", "protected", "public", "return", "short",
    "static", "strictfp", "super", "switch", "synchronized", "this", "throw", "throws",
    "transient", "try", "void", "volatile", "while", "true", "false", "null", "var", "record",
    "yield", "Object", "String", "System",
];

const MAX_ATTEMPTS: usize = 16;

/// Names unique across a run: a name is never handed out twice.
#[derive(Debug, Default)]
pub struct RandomNames {
    issued: HashSet<String>,
    counter: usize,
}

impl RandomNames {
    pub fn new() -> Self {
        Default::default()
    }

    fn candidate(rng: &mut dyn RngCore, kind: NameKind) -> String {
        let count = rng.gen_range(2..=3);
        let parts: Vec<&str> = (0..count)
            .map(|_| SYLLABLES[rng.gen_range(0..SYLLABLES.len())])
            .collect();
        match kind {
            NameKind::Class | NameKind::Interface => parts.iter().map(|p| capitalize(p)).collect(),
            NameKind::Field | NameKind::Method => {
                let mut name = parts[0].to_string();
                name.extend(parts[1..].iter().map(|p| capitalize(p)));
                name
            }
            NameKind::Constant => parts
                .iter()
                .map(|p| p.to_uppercase())
                .collect::<Vec<_>>()
                .join("_"),
        }
    }
}

impl NameGenerator for RandomNames {
    fn generate(&mut self, rng: &mut dyn RngCore, kind: NameKind) -> String {
        for _ in 0..MAX_ATTEMPTS {
            let name = Self::candidate(rng, kind);
            if !RESERVED.contains(&name.as_str()) && self.issued.insert(name.clone()) {
                return name;
            }
        }
        // syllable space exhausted for this shape, fall back to a numbered name
        loop {
            self.counter += 1;
            let name = format!("{}{}", Self::candidate(rng, kind), self.counter);
            if self.issued.insert(name.clone()) {
                return name;
            }
        }
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn generate_is_deterministic_with_seed() {
        let mut rng1 = rand::rngs::StdRng::seed_from_u64(12345);
        let mut rng2 = rand::rngs::StdRng::seed_from_u64(12345);
        let mut names1 = RandomNames::new();
        let mut names2 = RandomNames::new();
        for kind in [NameKind::Class, NameKind::Field, NameKind::Method] {
            assert_eq!(
                names1.generate(&mut rng1, kind),
                names2.generate(&mut rng2, kind)
            );
        }
    }

    #[test]
    fn generate_never_repeats() {
        let mut rng = rand::rngs::StdRng::seed_from_u64(42);
        let mut names = RandomNames::new();
        let mut seen = HashSet::new();
        for _ in 0..2000 {
            let name = names.generate(&mut rng, NameKind::Field);
            assert!(seen.insert(name.clone()), "repeated name {name}");
        }
    }

    #[test]
    fn names_follow_kind_casing() {
        let mut rng = rand::rngs::StdRng::seed_from_u64(7);
        let mut names = RandomNames::new();

        let class = names.generate(&mut rng, NameKind::Class);
        assert!(class.chars().next().unwrap().is_ascii_uppercase(), "{class}");

        let method = names.generate(&mut rng, NameKind::Method);
        assert!(method.chars().next().unwrap().is_ascii_lowercase(), "{method}");

        let constant = names.generate(&mut rng, NameKind::Constant);
        assert!(
            constant.chars().all(|c| c.is_ascii_uppercase() || c == '_'),
            "{constant}"
        );
    }

    #[test]
    fn names_are_identifiers() {
        let mut rng = rand::rngs::StdRng::seed_from_u64(99);
        let mut names = RandomNames::new();
        for _ in 0..200 {
            let name = names.generate(&mut rng, NameKind::Interface);
            assert!(name.chars().all(|c| c.is_ascii_alphanumeric()));
            assert!(!RESERVED.contains(&name.as_str()));
        }
    }
}
