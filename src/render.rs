//! Text rendering of syntax trees
//!
//! ```text
//! Program
//! ├── Import (std{...})
//! └── +
//!     ├── 1
//!     └── *
//!         ├── 2
//!         └── 3
//! ```

use crate::parser::{Import, Literal, Node, NodeKind};

/// Widest line [`render`] produces unless told otherwise
pub const DEFAULT_WIDTH: usize = 130;

const BRANCH: &str = "├── ";
const LAST_BRANCH: &str = "└── ";
const PIPE: &str = "│   ";
const SPACE: &str = "    ";
const ELLIPSIS: char = '…';

/// Anything that can be drawn as a tree
pub trait TreeNode: Sized {
    /// One-line description of this node
    fn label(&self) -> String;

    /// Longer description used by [`render_expanded`]
    fn detailed_label(&self) -> String {
        self.label()
    }

    fn children(&self) -> &[Self];
}

impl TreeNode for Node {
    fn label(&self) -> String {
        match &self.kind {
            NodeKind::Program => "Program".to_string(),
            NodeKind::Identifier { name } => name.clone(),
            NodeKind::Import(import) => import_label(import, false),
            NodeKind::Literal(value) => literal_label(value),
            NodeKind::BinaryExpr(operator) => operator.symbol.to_string(),
            NodeKind::NumberType(number) => number.name.to_string(),
        }
    }

    fn detailed_label(&self) -> String {
        match &self.kind {
            NodeKind::Import(import) => import_label(import, true),
            _ => self.label(),
        }
    }

    fn children(&self) -> &[Node] {
        &self.children
    }
}

/// `Import (std{...} as io)`, or `Import (std/{Console, Debug} as io)` expanded
fn import_label(import: &Import, expanded: bool) -> String {
    let mut label = format!("Import ({}", import.module_name);
    if !import.symbols.is_empty() {
        if expanded {
            label.push_str(&format!("/{{{}}}", import.symbols.join(", ")));
        } else {
            label.push_str("{...}");
        }
    }
    if let Some(alias) = &import.alias {
        label.push_str(" as ");
        label.push_str(alias);
    }
    label.push(')');
    label
}

fn literal_label(value: &Literal) -> String {
    match value {
        Literal::Null => "null".to_string(),
        Literal::Bool(b) => b.to_string(),
        Literal::Char(c) => format!("'{}'", c.escape_default()),
        Literal::Integer(n) => n.to_string(),
        Literal::Double(d) => d.to_string(),
        Literal::String(s) => format!("\"{}\"", s.escape_default()),
    }
}

/// Draw `root` and its descendants, one node per line, no line wider than
/// `max_width` characters
pub fn render<T: TreeNode>(root: &T, max_width: usize) -> String {
    let mut out = String::new();
    draw(root, "", "", max_width, false, &mut out);
    out
}

/// Like [`render`], using each node's detailed label
pub fn render_expanded<T: TreeNode>(root: &T, max_width: usize) -> String {
    let mut out = String::new();
    draw(root, "", "", max_width, true, &mut out);
    out
}

fn draw<T: TreeNode>(
    node: &T,
    connector: &str,
    indent: &str,
    max_width: usize,
    expanded: bool,
    out: &mut String,
) {
    let label = if expanded { node.detailed_label() } else { node.label() };
    let prefix = format!("{}{}", indent, connector);
    out.push_str(&prefix);
    out.push_str(&fit(&label, max_width.saturating_sub(prefix.chars().count())));
    out.push('\n');

    let child_indent = match connector {
        "" => indent.to_string(),
        LAST_BRANCH => format!("{}{}", indent, SPACE),
        _ => format!("{}{}", indent, PIPE),
    };

    let children = node.children();
    for (i, child) in children.iter().enumerate() {
        let connector = if i + 1 == children.len() { LAST_BRANCH } else { BRANCH };
        draw(child, connector, &child_indent, max_width, expanded, out);
    }
}

/// Cut `label` to `room` characters, marking the cut with an ellipsis
fn fit(label: &str, room: usize) -> String {
    if label.chars().count() <= room {
        return label.to_string();
    }
    if room == 0 {
        return String::new();
    }
    let mut cut: String = label.chars().take(room - 1).collect();
    cut.push(ELLIPSIS);
    cut
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SourceLocation;
    use crate::parser::{BinaryOperator, NumberType};
    use crate::lexer::TokenKind;
    use pretty_assertions::assert_eq;

    fn at() -> SourceLocation {
        SourceLocation::at(1, 1)
    }

    fn int(n: u64) -> Node {
        Node::literal(Literal::Integer(n), at())
    }

    fn op(kind: TokenKind) -> BinaryOperator {
        BinaryOperator::for_token(kind).unwrap()
    }

    #[test]
    fn test_render_nested_tree() {
        let product = Node::binary(op(TokenKind::Star), int(2), int(3), at());
        let sum = Node::binary(op(TokenKind::Plus), int(1), product, at());
        let import = Node::import(
            Import {
                module_name: "std".to_string(),
                symbols: vec!["Console".to_string()],
                alias: None,
            },
            at(),
        );
        let program = Node::program(vec![import, sum], at());

        let expected = "\
Program
├── Import (std{...})
└── +
    ├── 1
    └── *
        ├── 2
        └── 3
";
        assert_eq!(render(&program, DEFAULT_WIDTH), expected);
    }

    #[test]
    fn test_pipe_continues_under_open_branch() {
        let left = Node::binary(op(TokenKind::Minus), int(1), int(2), at());
        let sum = Node::binary(op(TokenKind::Plus), left, int(3), at());
        let expected = "\
+
├── -
│   ├── 1
│   └── 2
└── 3
";
        assert_eq!(render(&sum, DEFAULT_WIDTH), expected);
    }

    #[test]
    fn test_import_labels() {
        let import = Node::import(
            Import {
                module_name: "std".to_string(),
                symbols: vec!["Console".to_string(), "Debug".to_string()],
                alias: Some("io".to_string()),
            },
            at(),
        );
        assert_eq!(import.label(), "Import (std{...} as io)");
        assert_eq!(import.detailed_label(), "Import (std/{Console, Debug} as io)");

        let bare = Node::import(
            Import {
                module_name: "hello".to_string(),
                ..Import::default()
            },
            at(),
        );
        assert_eq!(bare.label(), "Import (hello)");
        assert_eq!(render_expanded(&bare, DEFAULT_WIDTH), "Import (hello)\n");
    }

    #[test]
    fn test_leaf_labels() {
        let labels: Vec<_> = vec![
            Node::literal(Literal::Null, at()),
            Node::literal(Literal::Bool(true), at()),
            Node::literal(Literal::Char('\n'), at()),
            Node::literal(Literal::Double(2.5), at()),
            Node::literal(Literal::String("hi".to_string()), at()),
            Node::identifier("count", at()),
            Node::number_type(NumberType::lookup("u16").unwrap(), at()),
        ]
        .iter()
        .map(TreeNode::label)
        .collect();
        assert_eq!(labels, vec!["null", "true", "'\\n'", "2.5", "\"hi\"", "count", "u16"]);
    }

    #[test]
    fn test_long_labels_are_truncated() {
        let name = "a".repeat(40);
        let program = Node::program(vec![Node::identifier(name, at())], at());
        let rendered = render(&program, 10);
        assert_eq!(rendered, "Program\n└── aaaaa…\n");
        assert!(rendered.lines().all(|line| line.chars().count() <= 10));
    }

    #[test]
    fn test_fit() {
        assert_eq!(fit("short", 10), "short");
        assert_eq!(fit("exactly", 7), "exactly");
        assert_eq!(fit("toolong", 4), "too…");
        assert_eq!(fit("x", 0), "");
    }
}
