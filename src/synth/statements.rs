use rand::RngCore;

use crate::{
    descriptor::FieldType,
    error::BuildError,
    model::MethodDecl,
    synth::{BodySynthesizer, LiteralGenerator, check_body},
};

/// Bodies made of local declarations initialized from literals, followed by
/// a print of the last local.
#[derive(Debug, Default, Clone, Copy)]
pub struct StatementBodies;

impl BodySynthesizer for StatementBodies {
    fn synthesize(
        &mut self,
        rng: &mut dyn RngCore,
        literals: &mut dyn LiteralGenerator,
        owner: &str,
        method: &MethodDecl,
        statements: usize,
    ) -> Result<String, BuildError> {
        let mut body = String::from("{\n");
        for i in 1..=statements {
            let local_type = FieldType::random_primitive(rng);
            let value = literals.literal_for(rng, &local_type);
            body += &format!("\t{} var{i} = {value};\n", local_type.source_name());
        }
        if statements > 0 {
            body += &format!("\tSystem.out.println(var{statements});\n");
        }
        body += "}\n";

        check_body(&body).map_err(|reason| BuildError::BodySynthesisFailed {
            member: format!("{owner}.{}", method.name()),
            reason,
        })?;
        Ok(body)
    }
}
