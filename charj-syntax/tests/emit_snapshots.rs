//! Snapshot tests for the interface and implementation emitters.
//!
//! Run `cargo insta review` to update snapshots when making intentional changes.

use charj_core::{PassKind, SourceCursor, SourceParser};
use charj_syntax::{Parser, frontend};

const HELLO: &str = r#"
package demo.hello;

/* A greeter chare. */
class Hello {
    int count;
    String[] names;

    Hello(int n) {
        count = n;
    }

    void greet(int times) {
        for (int i = 0; i < times; i++) {
            CkPrintf("hello %d\n", i);
        }
    }

    // not an entry method
    int total() { return count; }
}

class Loud extends Hello {
    Loud(int n) { }
}
"#;

fn render(kind: PassKind) -> String {
    let frontend = frontend().expect("emitters registered for their passes");
    let tree = frontend
        .parser()
        .parse(&mut SourceCursor::new(HELLO))
        .expect("sample parses");
    frontend.emitter(kind).render(&tree)
}

#[test]
fn test_interface() {
    insta::assert_snapshot!("interface", render(PassKind::Interface));
}

#[test]
fn test_implementation() {
    insta::assert_snapshot!("implementation", render(PassKind::Implementation));
}

#[test]
fn test_rendering_is_deterministic() {
    for kind in PassKind::ALL {
        assert_eq!(render(kind), render(kind));
    }
}

#[test]
fn test_empty_unit_renders_empty_module() {
    let frontend = frontend().unwrap();
    let tree = Parser.parse(&mut SourceCursor::new("")).unwrap();

    assert_eq!(
        frontend.emitter(PassKind::Interface).render(&tree),
        "module main {\n};\n"
    );
    assert_eq!(
        frontend.emitter(PassKind::Implementation).render(&tree),
        "#include \"main.decl.h\"\n\n#include \"main.def.h\"\n"
    );
}

#[test]
fn test_parse_error_points_at_token() {
    let err = Parser
        .parse(&mut SourceCursor::new("class Broken {\n    void f() {}\n    int\n}\n"))
        .unwrap_err();

    assert_eq!(err.message, "expected member name, found '}'");
    assert_eq!(err.location.map(|l| (l.line, l.column)), Some((4, 0)));
}
