//! A whole generation run: interfaces, then abstract classes, then concrete
//! classes, all drawn from one seeded RNG.

use std::sync::Arc;

use rand::{SeedableRng, rngs::StdRng};
use tracing::{info, warn};

use crate::{
    bodies::MethodBodies,
    builder::{ClassBuilder, ClassKind},
    config::Configuration,
    model::ClassDecl,
    pool::HierarchyPool,
    render::render,
    synth::{NameKind, Synthesizers},
};

pub struct Generator {
    config: Configuration,
    synth: Synthesizers,
    seed: u64,
}

impl Generator {
    pub fn new(config: Configuration, seed: u64) -> Self {
        Generator {
            config,
            synth: Synthesizers::default(),
            seed,
        }
    }

    pub fn with_synthesizers(mut self, synth: Synthesizers) -> Self {
        self.synth = synth;
        self
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn run(mut self) -> Generation {
        let mut rng = StdRng::seed_from_u64(self.seed);
        let pool = HierarchyPool::new(self.config.inheritance_hierarchy.max);
        let mut bodies = MethodBodies::new();
        let run = self.config.run.clone();

        let mut builder =
            ClassBuilder::new(&self.config, &pool, &mut bodies, &mut self.synth, &mut rng);
        for _ in 0..run.interfaces {
            let name = builder.class_name(NameKind::Interface);
            if let Err(err) = builder.build_interface(&name) {
                warn!(%err, "interface dropped");
            }
        }
        for (count, kind) in [
            (run.abstract_classes, ClassKind::Abstract),
            (run.concrete_classes, ClassKind::Concrete),
        ] {
            for _ in 0..count {
                let name = builder.class_name(NameKind::Class);
                if let Err(err) = builder.build(&name, kind) {
                    warn!(%err, "class dropped");
                }
            }
        }

        info!(seed = self.seed, classes = pool.len(), "generation finished");
        Generation {
            seed: self.seed,
            pool,
            bodies,
        }
    }
}

/// The classes and bodies produced by one run.
#[derive(Debug)]
pub struct Generation {
    seed: u64,
    pool: HierarchyPool,
    bodies: MethodBodies,
}

impl Generation {
    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn pool(&self) -> &HierarchyPool {
        &self.pool
    }

    pub fn bodies(&self) -> &MethodBodies {
        &self.bodies
    }

    pub fn classes(&self) -> Vec<Arc<ClassDecl>> {
        self.pool.snapshot()
    }

    pub fn render(&self, class: &ClassDecl) -> String {
        render(class, &self.bodies)
    }

    /// Every class in pool order, paired with its declaration text.
    pub fn render_all(&self) -> Vec<(Arc<ClassDecl>, String)> {
        self.pool
            .snapshot()
            .into_iter()
            .map(|class| {
                let text = render(&class, &self.bodies);
                (class, text)
            })
            .collect()
    }
}
