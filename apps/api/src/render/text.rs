use std::fmt::Write;

use crate::compose::tree::{DocumentTree, Node};

/// Plain-text rendering of the composed tree, one banner per page.
pub fn render_text(tree: &DocumentTree) -> String {
    let mut out = String::new();
    for page in &tree.pages {
        let _ = writeln!(out, "--- page {} ---", page.number);
        for block in &page.blocks {
            if let Some(heading) = &block.heading {
                let _ = writeln!(out, "\n{}", heading.to_uppercase());
                let _ = writeln!(out, "{}", "-".repeat(heading.chars().count()));
            }
            for node in &block.nodes {
                write_node(&mut out, node);
            }
        }
        out.push('\n');
    }
    out
}

fn write_node(out: &mut String, node: &Node) {
    match node {
        Node::Name { text } => {
            let _ = writeln!(out, "{text}");
        }
        Node::ContactLine { items } => {
            let _ = writeln!(out, "{}", Node::joined_contact(items));
        }
        Node::Table { header, rows } => {
            let _ = writeln!(out, "{}", header.join(" | "));
            for row in rows {
                let _ = writeln!(out, "{}", row.join(" | "));
            }
        }
        Node::Paragraph { text } => {
            let _ = writeln!(out, "{text}");
        }
        Node::Item {
            title,
            subtitle,
            aside,
            lines,
        } => {
            let _ = match subtitle {
                Some(sub) => writeln!(out, "{title}, {sub}    {aside}"),
                None => writeln!(out, "{title}    {aside}"),
            };
            for line in lines.iter().filter(|l| !l.is_empty()) {
                let _ = writeln!(out, "  {line}");
            }
        }
        Node::LabeledList { label, text } => {
            let _ = writeln!(out, "{label} {text}");
        }
    }
}
