mod common;
use common::*;
use expect_test::expect;

// Functions
#[test]
fn test_function_with_body() {
    expect![[r#"
        File@0:0..2:1 "test.borm"
          Function@0:0..2:1 "add"
            Type@0:0..0:3 "int"
            Keyword@0:4..0:12 "function"
            Name@0:13..0:16 "add"
            Text@0:16..0:17 "("
            Type@0:17..0:29 "int a, int b"
            Text@0:29..0:30 ")"
            Block@0:31..2:1 ""
              Text@0:31..0:32 "{"
              Text@1:4..1:10 "return"
              Text@1:11..1:12 "a"
              Text@1:12..1:13 ";"
              Text@2:0..2:1 "}"
    "#]]
    .assert_eq(&dump("int function add(int a, int b) {\n    return a;\n}"));
}

#[test]
fn test_function_prototype() {
    expect![[r#"
        File@0:0..0:21 "test.borm"
          Declaration@0:0..0:21 "init"
            Type@0:0..0:4 "void"
            Keyword@0:5..0:13 "function"
            Name@0:14..0:18 "init"
            Text@0:18..0:19 "("
            Text@0:19..0:20 ")"
            Text@0:20..0:21 ";"
    "#]]
    .assert_eq(&dump("void function init();"));
}

#[test]
fn test_function_without_body_or_semicolon() {
    expect![[r#"
        File@0:0..0:16 "test.borm"
          Function!@0:0..0:16 "f"
            ! Function declarations must be closed with a semi colon.
            Type@0:0..0:3 "int"
            Keyword@0:4..0:12 "function"
            Name@0:13..0:14 "f"
            Text@0:14..0:15 "("
            Text@0:15..0:16 ")"
    "#]]
    .assert_eq(&dump("int function f()"));
}

#[test]
fn test_unclosed_function_body() {
    expect![[r#"
        File@0:0..1:8 "test.borm"
          Function@0:0..1:8 "f"
            Type@0:0..0:3 "int"
            Keyword@0:4..0:12 "function"
            Name@0:13..0:14 "f"
            Text@0:14..0:15 "("
            Text@0:15..0:16 ")"
            Block!@0:17..1:8 ""
              ! Unclosed function body
              Text@0:17..0:18 "{"
              Declaration@1:2..1:8 "int x;"
                Type@1:2..1:5 "int"
                Variable@1:6..1:7 "x"
                Text@1:7..1:8 ";"
    "#]]
    .assert_eq(&dump("int function f() {\n  int x;"));
}

#[test]
fn test_body_on_next_line() {
    let tree = parse("test.borm", "void function main()\n{\n}");
    assert!(collect_bad(&tree).is_empty());
    let function = tree.node(tree.node(tree.root()).children()[0]);
    assert_eq!(function.kind(), SyntaxKind::Function);
    let block = tree.node(*function.children().last().unwrap());
    assert_eq!(block.kind(), SyntaxKind::Block);
}

#[test]
fn test_nested_braces_and_quoted_braces() {
    let source = "void function main() {\n    string s = \"}\";\n    if (x) { y; }\n}\nint after;";
    let tree = parse("test.borm", source);
    let top: Vec<_> = tree
        .node(tree.root())
        .children()
        .iter()
        .map(|&id| tree.node(id).kind())
        .collect();
    assert_eq!(top, vec![SyntaxKind::Function, SyntaxKind::Declaration]);
    assert!(collect_bad(&tree).is_empty());
}

#[test]
fn test_function_errors() {
    insta::assert_snapshot!(render_diagnostics("int function"), @r"
    Function: A function must have a name
    Function: Function declarations must be closed with a semi colon.
    ");
    insta::assert_snapshot!(render_diagnostics("int function;"), @"Declaration: A function must have a name");
    insta::assert_snapshot!(render_diagnostics("int function f;"), @"Declaration: Malformed function declaration");
    insta::assert_snapshot!(render_diagnostics("int function f(a;"), @"Declaration: Malformed function declaration");
    insta::assert_snapshot!(render_diagnostics("int function f() x;"), @"Declaration: Malformed function declaration");
    insta::assert_snapshot!(render_diagnostics("void main();"), @"Declaration: Malformed function declaration");
    insta::assert_snapshot!(render_diagnostics("void"), @"Declaration: void is not an expression");
}

// Variables
#[test]
fn test_string_declaration_keeps_spacing() {
    expect![[r#"
        File@0:0..0:22 "test.borm"
          Declaration@0:0..0:22 "string s = \"hi there\";"
            Type@0:0..0:6 "string"
            Variable@0:7..0:8 "s"
            Text@0:9..0:10 "="
            Value@0:11..0:21 "\"hi there\""
            Text@0:21..0:22 ";"
    "#]]
    .assert_eq(&dump("string s = \"hi there\";"));
}

#[test]
fn test_declaration_without_spaces() {
    expect![[r#"
        File@0:0..0:10 "test.borm"
          Declaration@0:0..0:10 "double d=1"
            ! Expected ';' at the end of a declaration
            Type@0:0..0:6 "double"
            Variable@0:7..0:8 "d"
            Text@0:8..0:9 "="
            Value@0:9..0:10 "1"
    "#]]
    .assert_eq(&dump("double d=1"));
}

#[test]
fn test_declaration_errors() {
    insta::assert_snapshot!(render_diagnostics("int;"), @"Declaration: A declaration must have a name");
    insta::assert_snapshot!(render_diagnostics("int x =;"), @"Declaration: Expected a value after '='");
    insta::assert_snapshot!(render_diagnostics("bool 2b = true;"), @"Variable: `2b` is not a valid variable name");
    insta::assert_snapshot!(render_diagnostics("char a b;"), @"Variable: `a b` is not a valid variable name");
    insta::assert_snapshot!(render_diagnostics("float"), @"Declaration: float is not an expression");
}

#[test]
fn test_two_statements_on_one_line() {
    let tree = parse("test.borm", "int a; int b = 2;");
    let values: Vec<_> = tree
        .node(tree.root())
        .children()
        .iter()
        .map(|&id| tree.node(id).value().to_string())
        .collect();
    assert_eq!(values, vec!["int a;", "int b = 2;"]);
}

#[test]
fn test_malformed_head_keeps_its_tokens() {
    expect![[r#"
        File@0:0..0:15 "test.borm"
          Declaration!@0:0..0:15 ""
            ! Malformed function declaration
            Type@0:0..0:4 "void"
            Text@0:5..0:14 "f(x) junk"
            Text@0:14..0:15 ";"
    "#]]
    .assert_eq(&dump("void f(x) junk;"));
}

#[test]
fn test_tab_does_not_split_words() {
    let tree = parse("test.borm", "int\tx;");
    let values: Vec<_> = tree
        .node(tree.root())
        .children()
        .iter()
        .map(|&id| tree.node(id).value().to_string())
        .collect();
    assert_eq!(values, vec!["int\tx", ";"]);
}

// Text
#[test]
fn test_quoted_slashes_are_not_comments() {
    let tree = parse("test.borm", "print(\"a // b\");");
    let kinds: Vec<_> = tree
        .node(tree.root())
        .children()
        .iter()
        .map(|&id| tree.node(id).kind())
        .collect();
    assert!(kinds.iter().all(|&kind| kind == SyntaxKind::Text));
    assert_eq!(kinds.len(), 10);
}
