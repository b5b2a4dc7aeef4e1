use cyntax::error::{LexErrorKind, SyntaxErrorKind};
use cyntax::parser::{BinaryOp, Import, Kind, Literal, Node};
use cyntax::render::{render, DEFAULT_WIDTH};
use cyntax::semantic::{Symbol, SymbolTable};
use cyntax::{parse, Tokenizer, TokenKind};
use pretty_assertions::assert_eq;

fn tree(source: &str) -> String {
    let program = parse(source, "<test>").unwrap();
    render(&program, DEFAULT_WIDTH)
}

fn first_statement(source: &str) -> Node {
    let mut program = parse(source, "<test>").unwrap();
    program.children.remove(0)
}

#[test]
fn single_binary_expression() {
    let cases = [
        ("7 + 2;", BinaryOp::Add),
        ("7 - 2;", BinaryOp::Sub),
        ("7 * 2;", BinaryOp::Mul),
        ("7 / 2;", BinaryOp::Div),
        ("7 == 2;", BinaryOp::Eq),
        ("7 != 2;", BinaryOp::NotEq),
        ("7 < 2;", BinaryOp::Less),
        ("7 > 2;", BinaryOp::Greater),
        ("7 <= 2;", BinaryOp::LessEq),
        ("7 >= 2;", BinaryOp::GreaterEq),
    ];

    for (source, op) in cases {
        let node = first_statement(source);
        assert_eq!(node.tag(), Kind::BinaryExpr, "{}", source);
        assert_eq!(node.operator().map(|o| o.op), Some(op), "{}", source);
        assert_eq!(node.left().and_then(Node::as_literal), Some(&Literal::Integer(7)));
        assert_eq!(node.right().and_then(Node::as_literal), Some(&Literal::Integer(2)));
    }
}

#[test]
fn multiplication_binds_tighter_than_addition() {
    let expected = "\
Program
└── +
    ├── /
    │   ├── *
    │   │   ├── 4
    │   │   └── 5
    │   └── 2
    └── 3
";
    assert_eq!(tree("4 * 5 / 2 + 3;"), expected);
}

#[test]
fn addition_after_multiplication_on_the_right() {
    let expected = "\
Program
└── +
    ├── 3
    └── *
        ├── 4
        └── 5
";
    assert_eq!(tree("3 + 4 * 5;"), expected);
}

#[test]
fn equal_precedence_associates_left() {
    let expected = "\
Program
└── /
    ├── /
    │   ├── 8
    │   └── 4
    └── 2
";
    assert_eq!(tree("8 / 4 / 2;"), expected);
    assert_eq!(tree("8/4/2;"), expected);
}

#[test]
fn several_statements_in_order() {
    let expected = "\
Program
├── Import (std{...})
├── 1
└── -
    ├── Console
    └── 'c'
";
    assert_eq!(tree("import std.Console;\n1;\nConsole - 'c';\n"), expected);
}

#[test]
fn import_with_members_and_alias() {
    let node = first_statement("import std.{Console, Debug} -> Temp;");
    assert_eq!(
        node.as_import(),
        Some(&Import {
            module_name: "std".to_string(),
            symbols: vec!["Console".to_string(), "Debug".to_string()],
            alias: Some("Temp".to_string()),
        })
    );
}

#[test]
fn bare_import() {
    let node = first_statement("import hello;");
    assert_eq!(
        node.as_import(),
        Some(&Import {
            module_name: "hello".to_string(),
            symbols: vec![],
            alias: None,
        })
    );
}

#[test]
fn repeated_import_parses_twice() {
    let program = parse("import std; import std;", "<test>").unwrap();
    let modules: Vec<_> = program
        .children
        .iter()
        .filter_map(Node::as_import)
        .map(|i| i.module_name.as_str())
        .collect();
    assert_eq!(modules, vec!["std", "std"]);
}

#[test]
fn one_table_serves_several_parses() {
    let mut symbols = SymbolTable::new();
    cyntax::parser::parse("import std.Console;", "<first>", &mut symbols).unwrap();
    let program =
        cyntax::parser::parse("import std.Console; Console;", "<second>", &mut symbols).unwrap();
    assert_eq!(program.children.len(), 2);
}

#[test]
fn undefined_identifier_points_at_the_name() {
    let err = parse("6 + one;", "<test>").unwrap_err();
    assert_eq!(err.syntax_kind(), Some(SyntaxErrorKind::UndefinedIdentifier));
    assert!(err.message().contains("'one'"));
    assert_eq!((err.location().line, err.location().column), (1, 5));
    assert_eq!(err.to_string(), "<test>:1:5: error(syntax): variable 'one' not defined");
}

#[test]
fn undefined_identifier_on_later_line() {
    let err = parse("1;\n\n  2 * two;", "<test>").unwrap_err();
    assert_eq!((err.location().line, err.location().column), (3, 7));
}

#[test]
fn caller_supplied_symbols_are_visible() {
    let mut symbols = SymbolTable::new();
    symbols.add(Symbol::ident("one"));
    let program = cyntax::parser::parse("6 + one;", "<test>", &mut symbols).unwrap();
    assert_eq!(
        program.children[0].right().and_then(Node::identifier_name),
        Some("one")
    );
}

#[test]
fn missing_terminator() {
    let err = parse("4 + 5", "<test>").unwrap_err();
    assert_eq!(err.syntax_kind(), Some(SyntaxErrorKind::MissingTerminator));

    let err = parse("4 + 5 // no semicolon\n", "<test>").unwrap_err();
    assert_eq!(err.syntax_kind(), Some(SyntaxErrorKind::MissingTerminator));
}

#[test]
fn unterminated_block_comment() {
    let err = parse("/* never closed", "<test>").unwrap_err();
    assert_eq!(err.lex_kind(), Some(LexErrorKind::UnterminatedComment));
    assert_eq!((err.location().line, err.location().column), (1, 1));
}

#[test]
fn scope_discipline() {
    let mut symbols = SymbolTable::new();
    symbols.push();
    symbols.add(Symbol::ident("X"));
    symbols.pop().unwrap();
    assert!(!symbols.is_defined("X"));

    let err = symbols.pop().unwrap_err();
    assert_eq!(err.syntax_kind(), Some(SyntaxErrorKind::ScopeUnderflow));
    assert_eq!(err.location().to_string(), "<symbols>:0:0");
}

#[test]
fn parsing_is_deterministic() {
    let source = "import std.{A, B} -> S;\n/* c */ 1 + 2 * 3 - 4 / 5 <= 6;\nS == null;";
    let first = parse(source, "<test>").unwrap();
    let second = parse(source, "<test>").unwrap();
    assert_eq!(first, second);
}

#[test]
fn tokens_cover_the_source() {
    let source = "import std;\n1 + 0x2f;";
    let tokens = Tokenizer::new(source, "<test>").tokenize().unwrap();
    let rebuilt: String = tokens
        .iter()
        .filter(|t| !t.is_eof())
        .map(|t| t.value)
        .collect();
    assert_eq!(rebuilt, source);
    assert_eq!(tokens.last().map(|t| t.kind), Some(TokenKind::Eof));
}
