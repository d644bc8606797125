use nom::{
    IResult, Parser,
    branch::alt,
    bytes::complete::take_until,
    character::complete::{char, one_of},
    combinator::{eof, map},
    multi::many0,
    sequence::delimited,
};
use rand::{Rng, RngCore};

use crate::error::LookupError;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldDescriptor(pub(crate) FieldType);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodDescriptor {
    pub(crate) parameters: Vec<FieldType>,
    pub(crate) return_type: ReturnType,
}

pub type ReturnType = Option<FieldType>;

#[derive(Debug, PartialEq, Eq, Clone, Hash)]
pub enum FieldType {
    Byte,
    Char,
    Double,
    Float,
    Int,
    Long,
    Object(String),
    Short,
    Boolean,
    Array(Box<FieldType>),
}

impl FieldType {
    pub fn is_primitive(&self) -> bool {
        !matches!(self, FieldType::Object(_) | FieldType::Array(_))
    }

    pub fn to_descriptor(&self) -> String {
        match self {
            FieldType::Byte => "B".to_string(),
            FieldType::Char => "C".to_string(),
            FieldType::Double => "D".to_string(),
            FieldType::Float => "F".to_string(),
            FieldType::Int => "I".to_string(),
            FieldType::Long => "J".to_string(),
            FieldType::Short => "S".to_string(),
            FieldType::Boolean => "Z".to_string(),
            FieldType::Object(class_name) => format!("L{class_name};"),
            FieldType::Array(element) => format!("[{}", element.to_descriptor()),
        }
    }

    /// Name as written in a declaration: `int`, `String`, `long[]`.
    pub fn source_name(&self) -> String {
        match self {
            FieldType::Byte => "byte".to_string(),
            FieldType::Char => "char".to_string(),
            FieldType::Double => "double".to_string(),
            FieldType::Float => "float".to_string(),
            FieldType::Int => "int".to_string(),
            FieldType::Long => "long".to_string(),
            FieldType::Short => "short".to_string(),
            FieldType::Boolean => "boolean".to_string(),
            FieldType::Object(class_name) => class_name
                .rsplit_once('/')
                .map(|(_, simple)| simple)
                .unwrap_or(class_name)
                .to_string(),
            FieldType::Array(element) => format!("{}[]", element.source_name()),
        }
    }

    /// Default field-type policy: `int`, `long`, `double` and `boolean`
    /// dominate, the narrower primitives show up occasionally.
    pub fn random_primitive(rng: &mut dyn RngCore) -> Self {
        match rng.gen_range(0..20) {
            0..=5 => FieldType::Int,
            6..=8 => FieldType::Long,
            9..=11 => FieldType::Double,
            12..=14 => FieldType::Boolean,
            15 => FieldType::Byte,
            16 => FieldType::Short,
            17 => FieldType::Char,
            _ => FieldType::Float,
        }
    }
}

impl MethodDescriptor {
    /// `()V`, the only shape this generator synthesizes.
    pub fn void_no_args() -> Self {
        MethodDescriptor {
            parameters: vec![],
            return_type: None,
        }
    }

    pub fn parameters(&self) -> &[FieldType] {
        &self.parameters
    }

    pub fn return_type(&self) -> Option<&FieldType> {
        self.return_type.as_ref()
    }

    pub fn to_descriptor(&self) -> String {
        let parameters: String = self.parameters.iter().map(FieldType::to_descriptor).collect();
        let return_type = self
            .return_type
            .as_ref()
            .map(FieldType::to_descriptor)
            .unwrap_or_else(|| "V".to_string());
        format!("({parameters}){return_type}")
    }

    pub fn return_source_name(&self) -> String {
        self.return_type
            .as_ref()
            .map(FieldType::source_name)
            .unwrap_or_else(|| "void".to_string())
    }
}

/// Parses a whole field descriptor, mapping nom failures to a lookup error.
pub fn resolve_field_descriptor(descriptor: &str) -> Result<FieldType, LookupError> {
    parse_field_descriptor(descriptor)
        .map(|(_, FieldDescriptor(field_type))| field_type)
        .map_err(|err| LookupError::InvalidDescriptor {
            descriptor: descriptor.to_string(),
            reason: format!("{err:?}"),
        })
}

pub fn resolve_method_descriptor(descriptor: &str) -> Result<MethodDescriptor, LookupError> {
    parse_method_descriptor(descriptor)
        .map(|(_, method)| method)
        .map_err(|err| LookupError::InvalidDescriptor {
            descriptor: descriptor.to_string(),
            reason: format!("{err:?}"),
        })
}

pub fn parse_field_descriptor(input: &str) -> IResult<&str, FieldDescriptor> {
    let (input, field_type) = parse_field_type(input)?;
    eof(input)?;
    Ok((input, FieldDescriptor(field_type)))
}

pub fn parse_method_descriptor(input: &str) -> IResult<&str, MethodDescriptor> {
    let (input, parameters) =
        delimited(char('('), many0(parse_field_type), char(')')).parse(input)?;

    let (input, return_type) = parse_return_type_descriptor(input)?;

    eof(input)?;
    Ok((
        input,
        MethodDescriptor {
            parameters,
            return_type,
        },
    ))
}

pub fn parse_return_type_descriptor(input: &str) -> IResult<&str, ReturnType> {
    alt((map(parse_field_type, Some), parse_void_type)).parse(input)
}

fn parse_field_type(input: &str) -> IResult<&str, FieldType> {
    alt((parse_base_type, parse_object_type, parse_array_type)).parse(input)
}

fn parse_base_type(input: &str) -> IResult<&str, FieldType> {
    let (input, ch) = one_of("BCDFIJSZ").parse(input)?;
    let field_type = match ch {
        'B' => FieldType::Byte,
        'C' => FieldType::Char,
        'D' => FieldType::Double,
        'F' => FieldType::Float,
        'I' => FieldType::Int,
        'J' => FieldType::Long,
        'S' => FieldType::Short,
        _ => FieldType::Boolean,
    };
    Ok((input, field_type))
}

fn parse_object_type(input: &str) -> IResult<&str, FieldType> {
    let (input, _) = char('L').parse(input)?;

    let (input, class_name) = take_until(";").parse(input)?;

    let (input, _) = char(';').parse(input)?;

    Ok((input, FieldType::Object(class_name.to_string())))
}

fn parse_array_type(input: &str) -> IResult<&str, FieldType> {
    let (input, _) = char('[').parse(input)?;

    let (input, field_type) = parse_field_type(input)?;

    Ok((input, FieldType::Array(Box::new(field_type))))
}

fn parse_void_type(input: &str) -> IResult<&str, Option<FieldType>> {
    let (input, _) = char('V').parse(input)?;
    Ok((input, None))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_field_descriptors() {
        assert_eq!(resolve_field_descriptor("I").unwrap(), FieldType::Int);
        assert_eq!(
            resolve_field_descriptor("Ljava/lang/String;").unwrap(),
            FieldType::Object("java/lang/String".to_string())
        );
        assert_eq!(
            resolve_field_descriptor("[[J").unwrap(),
            FieldType::Array(Box::new(FieldType::Array(Box::new(FieldType::Long))))
        );
        assert!(resolve_field_descriptor("Q").is_err());
        assert!(resolve_field_descriptor("II").is_err());
    }

    #[test]
    fn test_method_descriptors() {
        let method = resolve_method_descriptor("(IZLjava/lang/Object;)V").unwrap();
        assert_eq!(method.parameters().len(), 3);
        assert_eq!(method.return_type(), None);
        assert_eq!(method.return_source_name(), "void");

        let method = resolve_method_descriptor("()D").unwrap();
        assert_eq!(method.return_type(), Some(&FieldType::Double));

        assert!(resolve_method_descriptor("(I").is_err());
        assert!(resolve_method_descriptor("()").is_err());
    }

    #[test]
    fn test_descriptor_text() {
        assert_eq!(MethodDescriptor::void_no_args().to_descriptor(), "()V");
        let field = FieldType::Array(Box::new(FieldType::Object("a/b/C".to_string())));
        assert_eq!(field.to_descriptor(), "[La/b/C;");
        assert_eq!(field.source_name(), "C[]");
        assert_eq!(resolve_field_descriptor(&field.to_descriptor()).unwrap(), field);
    }

    #[test]
    fn test_random_primitive_is_primitive() {
        let mut rng = rand::rngs::StdRng::seed_from_u64(7);
        for _ in 0..100 {
            assert!(FieldType::random_primitive(&mut rng).is_primitive());
        }
    }
}
