use crate::ast::Param;

/// Name of the receiver parameter every method gets.
pub const RECEIVER_NAME: &str = "this";

/// `type name` for one parameter or field.
pub fn typed_name(c_type: &str, name: &str) -> String {
    format!("{} {}", c_type, name)
}

/// Comma-joined parameter list, without the surrounding parentheses.
pub fn param_list(params: &[Param]) -> String {
    params
        .iter()
        .map(|p| typed_name(&p.param_type, &p.name))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Parameter list for a method lowered to a free function: a pointer to
/// the class record first, then the declared parameters.
pub fn method_param_list(class_name: &str, params: &[Param]) -> String {
    let receiver = typed_name(&format!("{}*", class_name), RECEIVER_NAME);
    if params.is_empty() {
        receiver
    } else {
        format!("{}, {}", receiver, param_list(params))
    }
}

pub fn method_name(class_name: &str, method: &str) -> String {
    format!("{}_{}", class_name, method)
}
