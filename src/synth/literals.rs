use rand::{Rng, RngCore};

use crate::{descriptor::FieldType, synth::LiteralGenerator};

const STRING_CLASS: &str = "java/lang/String";

/// Random literals, each within the value range of its type.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomLiterals;

impl LiteralGenerator for RandomLiterals {
    fn literal_for(&mut self, rng: &mut dyn RngCore, field_type: &FieldType) -> String {
        match field_type {
            FieldType::Boolean => {
                if rng.gen_bool(0.5) {
                    "true".to_string()
                } else {
                    "false".to_string()
                }
            }
            FieldType::Byte => {
                let val: i8 = rng.gen_range(-128..=127);
                val.to_string()
            }
            FieldType::Short => {
                let val: i16 = rng.gen_range(-1000..=1000);
                val.to_string()
            }
            FieldType::Int => {
                let val: i32 = rng.gen_range(-1000..1000);
                val.to_string()
            }
            FieldType::Long => {
                let val: i64 = rng.gen_range(-100_000..100_000);
                format!("{val}L")
            }
            FieldType::Float => {
                let val: f32 = rng.gen_range(0.0_f32..100.0_f32);
                format!("{val:.2}f")
            }
            FieldType::Double => {
                let val: f64 = rng.gen_range(0.0..1000.0);
                format!("{val:.3}")
            }
            FieldType::Char => {
                let val = rng.gen_range(b'a'..=b'z') as char;
                format!("'{val}'")
            }
            FieldType::Object(class_name) if class_name == STRING_CLASS => {
                let id = rng.gen_range(0..100);
                format!("\"str{id}\"")
            }
            FieldType::Object(_) | FieldType::Array(_) => "null".to_string(),
        }
    }
}
