//! Emitters for the two artifacts of a compilation unit.

mod builder;
mod implementation;
mod interface;

pub use builder::CodeBuilder;
pub use implementation::ImplementationEmitter;
pub use interface::InterfaceEmitter;

use crate::ast::Method;

/// C++ spelling of a Charj type: `a.B` becomes `a::B` and `T[]` becomes
/// `std::vector<T>`.
pub fn cpp_type(ty: &str) -> String {
    match ty.strip_suffix("[]") {
        Some(element) => format!("std::vector<{}>", cpp_type(element)),
        None => ty.replace('.', "::"),
    }
}

/// `name(T a, U b)` with C++ parameter types.
pub(crate) fn cpp_signature(method: &Method) -> String {
    let params = method
        .params
        .iter()
        .map(|p| format!("{} {}", cpp_type(&p.ty), p.name))
        .collect::<Vec<_>>()
        .join(", ");
    format!("{}({})", method.name, params)
}

/// Lines of a method body with surrounding blank lines dropped and the
/// common leading indentation removed.
pub(crate) fn body_lines(body: &str) -> Vec<&str> {
    let lines: Vec<&str> = body.lines().map(str::trim_end).collect();
    let Some(first) = lines.iter().position(|l| !l.is_empty()) else {
        return Vec::new();
    };
    let last = lines.iter().rposition(|l| !l.is_empty()).unwrap_or(first);
    let lines = &lines[first..=last];

    let margin = lines
        .iter()
        .filter(|l| !l.is_empty())
        .map(|l| l.bytes().take_while(|b| matches!(b, b' ' | b'\t')).count())
        .min()
        .unwrap_or(0);

    lines
        .iter()
        .map(|&l| if l.is_empty() { l } else { &l[margin..] })
        .collect()
}
