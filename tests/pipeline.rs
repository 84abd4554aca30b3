// End-to-end tests for the source-to-C pipeline

use minic::ast::{Declaration, Statement};
use minic::c_codegen::{CCodeGen, PRELUDE};
use minic::error::CompileError;
use minic::lexer::tokenize;
use minic::{compile, parse_source};

#[test]
fn test_noop_function() {
    let program = parse_source("void noop() { }").expect("Parsing failed");
    match program.declarations.as_slice() {
        [Declaration::Function(f)] => {
            assert!(f.params.is_empty());
            assert!(f.body.is_empty());
        }
        other => panic!("unexpected declarations: {:?}", other),
    }

    let c = compile("void noop() { }").expect("Compilation failed");
    assert_eq!(c, format!("{}void noop() {{\n}}\n\n", PRELUDE));
}

#[test]
fn test_class_with_parent_field_and_method() {
    let source = "class Foo : Bar { int x; int get() { x; } }";
    let c = compile(source).expect("Compilation failed");

    let expected = "typedef struct Foo {\n    int x;\n} Foo;\n\n\
                    int Foo_get(Foo* this) {\n    x;\n}\n\n";
    assert_eq!(c, format!("{}{}", PRELUDE, expected));
    assert_eq!(c.matches("Foo_get").count(), 1);
}

#[test]
fn test_class_body_expressions_are_accepted_and_dropped() {
    let c = compile("class A { x; int y; }").expect("Compilation failed");
    assert_eq!(c, format!("{}typedef struct A {{\n    int y;\n}} A;\n\n", PRELUDE));

    let c = compile("class A { x; }").expect("Compilation failed");
    assert_eq!(c, format!("{}typedef struct A {{\n}} A;\n\n", PRELUDE));
}

#[test]
fn test_full_program() {
    let source = r#"
class Animal {
    string name = "generic";
    int legs = 4;
    void speak(string sound, int times) {
        sound;
        times;
    }
}

class Dog : Animal {
    int tricks;
}

int main() {
    int count = 3;
    float ratio = 0.5;
    string greeting = "hi\n";
    count;
    0;
}
"#;

    let c = compile(source).expect("Compilation failed");
    let expected = r#"#include <stdio.h>
#include <stdlib.h>
#include <string.h>

typedef struct Animal {
    string name;
    int legs;
} Animal;

void Animal_speak(Animal* this, string sound, int times) {
    sound;
    times;
}

typedef struct Dog {
    int tricks;
} Dog;

int main() {
    int count = 3;
    float ratio = 0.5;
    string greeting = "hi\n";
    count;
    0;
}

"#;
    assert_eq!(c, expected);
}

#[test]
fn test_return_is_an_ordinary_identifier() {
    let source = "int add(int a, int b) { return a; }";
    let program = parse_source(source).expect("Parsing failed");
    let Declaration::Function(add) = &program.declarations[0] else {
        panic!("expected a function");
    };
    assert_eq!(add.body.len(), 1);
    assert!(matches!(&add.body[0], Statement::VarDecl(decl) if decl.var_type == "return" && decl.name == "a"));

    // The declaration path still prints valid C for this shape.
    let c = compile(source).expect("Compilation failed");
    assert!(c.contains("int add(int a, int b) {\n    return a;\n}\n"));
}

#[test]
fn test_generated_declarations_lex_cleanly() {
    let sources = [
        "void noop() { }",
        "class Foo : Bar { int x = 1; int get(int y) { x; \"s\\\"q\"; } }",
        "int main() { int a = 2.5; a; }",
    ];

    for source in sources {
        let program = parse_source(source).expect("Parsing failed");
        let body = CCodeGen::default().generate_declarations(&program);
        assert!(tokenize(&body).is_ok(), "re-lexing failed for:\n{}", body);
    }
}

#[test]
fn test_lex_fault_reports_position() {
    let err = compile("void f() {\n  x @ y;\n}").unwrap_err();
    match err {
        CompileError::Lex(e) => {
            let loc = e.location();
            assert_eq!((loc.line, loc.column), (2, 4));
        }
        other => panic!("expected a lex error, got {:?}", other),
    }
}

#[test]
fn test_parse_fault_aborts_whole_program() {
    let err = compile("void ok() { }\nvoid broken( { }").unwrap_err();
    match err {
        CompileError::Parse(e) => assert_eq!(e.location().line, 2),
        other => panic!("expected a parse error, got {:?}", other),
    }
}
