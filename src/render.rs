//! Declaration text for a frozen class.
//!
//! Rendering is a pure function of the class and the body table. Queries that
//! fail while rendering (an unparsable descriptor) are logged and the element
//! is left out; rendering itself never fails.

use tracing::warn;

use crate::{
    bodies::{MemberId, MethodBodies},
    model::{ClassDecl, ConstructorDecl, FieldDecl, MethodDecl},
};

const EMPTY_BODY: &str = "{\n}\n";

pub fn render(class: &ClassDecl, bodies: &MethodBodies) -> String {
    let mut out = header(class);
    out += " {\n";

    let fields: String = class
        .fields()
        .iter()
        .filter_map(|field| render_field(class, field))
        .collect();
    let constructors: Vec<String> = class
        .constructors()
        .iter()
        .map(|constructor| render_constructor(class, constructor, bodies))
        .collect();
    let methods: Vec<String> = class
        .methods()
        .iter()
        .filter_map(|method| render_method(class, method, bodies))
        .collect();

    let groups = [fields, constructors.concat(), methods.join("\n")];
    let groups: Vec<&str> = groups
        .iter()
        .map(String::as_str)
        .filter(|group| !group.is_empty())
        .collect();
    out += &groups.join("\n");

    out += "}\n";
    out
}

fn header(class: &ClassDecl) -> String {
    let kind = if class.is_interface() { "interface" } else { "class" };
    let keywords = class.access_flags().keywords();
    let mut header = if keywords.is_empty() {
        format!("{kind} {}", class.simple_name())
    } else {
        format!("{keywords} {kind} {}", class.simple_name())
    };

    let interfaces: Vec<&str> = class.interfaces().iter().map(|i| i.simple_name()).collect();
    if class.is_interface() {
        if !interfaces.is_empty() {
            header += &format!(" extends {}", interfaces.join(", "));
        }
        return header;
    }

    if let Some(super_class) = class.superclass() {
        header += &format!(" extends {}", super_class.simple_name());
    }
    if !interfaces.is_empty() {
        header += &format!(" implements {}", interfaces.join(", "));
    }
    header
}

fn render_field(class: &ClassDecl, field: &FieldDecl) -> Option<String> {
    let field_type = match field.field_type() {
        Ok(field_type) => field_type,
        Err(err) => {
            warn!(class = class.name(), field = field.name(), %err, "field omitted");
            return None;
        }
    };
    let mut line = format!(
        "\t{}{} {}",
        prefix(field.access_flags().keywords()),
        field_type.source_name(),
        field.name()
    );
    if let Some(constant) = field.constant_value() {
        line += &format!(" = {constant}");
    }
    line += ";\n";
    Some(line)
}

fn render_constructor(
    class: &ClassDecl,
    constructor: &ConstructorDecl,
    bodies: &MethodBodies,
) -> String {
    let parameters = match constructor.method_descriptor() {
        Ok(descriptor) => descriptor
            .parameters()
            .iter()
            .enumerate()
            .map(|(i, parameter)| format!("{} var{}", parameter.source_name(), i + 1))
            .collect::<Vec<_>>()
            .join(", "),
        Err(err) => {
            warn!(class = class.name(), %err, "constructor parameters left blank");
            String::new()
        }
    };
    let body = bodies
        .get(&MemberId::constructor(class, constructor))
        .unwrap_or(EMPTY_BODY);
    format!(
        "\t{}{}({parameters}) {}",
        prefix(constructor.access_flags().keywords()),
        class.simple_name(),
        indent_body(body)
    )
}

fn render_method(class: &ClassDecl, method: &MethodDecl, bodies: &MethodBodies) -> Option<String> {
    let descriptor = match method.method_descriptor() {
        Ok(descriptor) => descriptor,
        Err(err) => {
            warn!(class = class.name(), method = method.name(), %err, "method omitted");
            return None;
        }
    };
    let parameters = descriptor
        .parameters()
        .iter()
        .enumerate()
        .map(|(i, parameter)| format!("{} var{}", parameter.source_name(), i + 1))
        .collect::<Vec<_>>()
        .join(", ");
    let signature = format!(
        "\t{}{} {}({parameters})",
        prefix(method.access_flags().keywords()),
        descriptor.return_source_name(),
        method.name()
    );
    if method.is_abstract() {
        return Some(signature + ";\n");
    }
    let body = bodies
        .get(&MemberId::method(class, method))
        .unwrap_or(EMPTY_BODY);
    Some(format!("{signature} {}", indent_body(body)))
}

/// Modifier keywords followed by a space, or nothing for an empty set.
fn prefix(keywords: String) -> String {
    if keywords.is_empty() {
        keywords
    } else {
        keywords + " "
    }
}

/// Shifts a `{\n...}\n` body one indent level to the right. The final newline
/// is not indented, so the closing brace line carries no trailing tab.
fn indent_body(body: &str) -> String {
    let body = body.strip_suffix('\n').unwrap_or(body);
    format!("{}\n", body.replace('\n', "\n\t"))
}
