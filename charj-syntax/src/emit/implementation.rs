use charj_core::{Emitter, PassKind};

use super::{CodeBuilder, body_lines, cpp_signature, cpp_type};
use crate::ast::{ClassDecl, CompilationUnit, Method};

/// Renders the `.cc` implementation: a C++ class definition per class
/// followed by its out-of-line method bodies, between the generated
/// `.decl.h` and `.def.h` includes.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImplementationEmitter;

impl Emitter<CompilationUnit> for ImplementationEmitter {
    fn pass(&self) -> PassKind {
        PassKind::Implementation
    }

    fn render(&self, unit: &CompilationUnit) -> String {
        let module = unit.module_name();
        CodeBuilder::standard()
            .line(&format!("#include \"{}.decl.h\"", module))
            .each(&unit.classes, |b, class| {
                let b = definition(b.blank(), class);
                b.each(class.methods(), |b, m| body(b.blank(), class, m))
            })
            .blank()
            .line(&format!("#include \"{}.def.h\"", module))
            .build()
    }
}

fn definition(builder: CodeBuilder, class: &ClassDecl) -> CodeBuilder {
    let base = match &class.base {
        Some(base) => cpp_type(base),
        None => format!("CBase_{}", class.name),
    };
    let header = format!("class {} : public {} {{", class.name, base);
    let has_methods = class.methods().next().is_some();
    let has_fields = class.fields().next().is_some();

    builder.block(&header, "};", |b| {
        b.when(has_methods, |b| {
            b.dedent()
                .line("public:")
                .indent()
                .each(class.methods(), |b, m| b.line(&format!("{};", declaration(m))))
        })
        .when(has_methods && has_fields, CodeBuilder::blank)
        .when(has_fields, |b| {
            b.dedent()
                .line("private:")
                .indent()
                .each(class.fields(), |b, f| {
                    b.line(&format!("{} {};", cpp_type(&f.ty), f.name))
                })
        })
    })
}

fn declaration(method: &Method) -> String {
    match &method.return_type {
        Some(ty) => format!("{} {}", cpp_type(ty), cpp_signature(method)),
        None => cpp_signature(method),
    }
}

fn body(builder: CodeBuilder, class: &ClassDecl, method: &Method) -> CodeBuilder {
    let qualified = format!("{}::{}", class.name, cpp_signature(method));
    let header = match &method.return_type {
        Some(ty) => format!("{} {}", cpp_type(ty), qualified),
        None => qualified,
    };
    builder
        .line(&header)
        .block("{", "}", |b| b.lines(body_lines(&method.body)))
}
