//! Syntax tree of a Charj compilation unit.

use charj_core::Location;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompilationUnit {
    /// Dotted package name, e.g. `a.b`.
    pub package: Option<String>,
    pub classes: Vec<ClassDecl>,
}

impl CompilationUnit {
    /// Name of the generated module: the package with dots replaced by
    /// underscores, or `main`.
    pub fn module_name(&self) -> String {
        self.package
            .as_deref()
            .map(|p| p.replace('.', "_"))
            .unwrap_or_else(|| "main".to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassDecl {
    pub name: String,
    pub base: Option<String>,
    pub members: Vec<Member>,
    pub location: Location,
}

impl ClassDecl {
    pub fn fields(&self) -> impl Iterator<Item = &Field> {
        self.members.iter().filter_map(|m| match m {
            Member::Field(f) => Some(f),
            Member::Method(_) => None,
        })
    }

    /// Constructors and methods in declaration order.
    pub fn methods(&self) -> impl Iterator<Item = &Method> {
        self.members.iter().filter_map(|m| match m {
            Member::Method(m) => Some(m),
            Member::Field(_) => None,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Member {
    Field(Field),
    Method(Method),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub ty: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Method {
    /// `None` for a constructor.
    pub return_type: Option<String>,
    pub name: String,
    pub params: Vec<Param>,
    /// Text between the braces, untouched.
    pub body: String,
}

impl Method {
    pub fn is_constructor(&self) -> bool {
        self.return_type.is_none()
    }

    /// Constructors and `void` methods can be invoked remotely.
    pub fn is_entry(&self) -> bool {
        matches!(self.return_type.as_deref(), None | Some("void"))
    }

    /// `name(type a, type b)`
    pub fn signature(&self) -> String {
        let params = self
            .params
            .iter()
            .map(|p| format!("{} {}", p.ty, p.name))
            .collect::<Vec<_>>()
            .join(", ");
        format!("{}({})", self.name, params)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Param {
    pub ty: String,
    pub name: String,
}
