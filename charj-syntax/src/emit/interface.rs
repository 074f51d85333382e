use charj_core::{Emitter, PassKind};

use super::{CodeBuilder, cpp_signature, cpp_type};
use crate::ast::{ClassDecl, CompilationUnit, Method};

/// Renders the `.ci` interface: one `chare` per class inside a `module`,
/// with an `entry` for every constructor and `void` method.
#[derive(Debug, Clone, Copy, Default)]
pub struct InterfaceEmitter;

impl Emitter<CompilationUnit> for InterfaceEmitter {
    fn pass(&self) -> PassKind {
        PassKind::Interface
    }

    fn render(&self, unit: &CompilationUnit) -> String {
        let header = format!("module {} {{", unit.module_name());
        CodeBuilder::standard()
            .block(&header, "};", |b| b.each(&unit.classes, chare))
            .build()
    }
}

fn chare(builder: CodeBuilder, class: &ClassDecl) -> CodeBuilder {
    let header = match &class.base {
        Some(base) => format!("chare {} : {} {{", class.name, cpp_type(base)),
        None => format!("chare {} {{", class.name),
    };
    builder.block(&header, "};", |b| {
        b.each(class.methods().filter(|m| m.is_entry()), |b, m| b.line(&entry(m)))
    })
}

fn entry(method: &Method) -> String {
    match &method.return_type {
        Some(ty) => format!("entry {} {};", ty, cpp_signature(method)),
        None => format!("entry {};", cpp_signature(method)),
    }
}
