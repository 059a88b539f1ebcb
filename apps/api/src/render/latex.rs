//! LaTeX source for the institutional template.
//!
//! The output is a standalone document that any TeX engine can compile: A4 with
//! 0.45in margins, Helvetica body at 10pt, 17pt bold name, ruled uppercase section
//! headings and a bordered education table. TeX does its own page breaking, so blocks
//! continued across pages in the composed tree are emitted as one contiguous run.

use crate::compose::tree::{Block, DocumentTree, Node};

const PREAMBLE: &str = r"\documentclass[10pt]{article}
\usepackage[a4paper,margin=0.45in]{geometry}
\usepackage[T1]{fontenc}
\usepackage[scaled]{helvet}
\usepackage{tabularx}
\renewcommand{\familydefault}{\sfdefault}
\renewcommand{\baselinestretch}{1.15}
\setlength{\parindent}{0pt}
\setlength{\parskip}{0pt}
\pagestyle{empty}
\newcommand{\resumesection}[1]{\vspace{8pt}{\fontsize{12}{14}\selectfont\bfseries\MakeUppercase{#1}}\par\vspace{1pt}\hrule\vspace{4pt}}
\begin{document}
";

const POSTAMBLE: &str = "\\end{document}\n";

/// Renders the full document.
pub fn render_latex(tree: &DocumentTree) -> String {
    let mut out = String::from(PREAMBLE);
    for block in tree.blocks() {
        write_block(&mut out, block);
    }
    out.push_str(POSTAMBLE);
    out
}

fn write_block(out: &mut String, block: &Block) {
    if let Some(heading) = &block.heading {
        out.push_str(&format!("\\resumesection{{{}}}\n", escape(heading)));
    }
    for node in &block.nodes {
        write_node(out, node);
    }
}

fn write_node(out: &mut String, node: &Node) {
    match node {
        Node::Name { text } => {
            out.push_str(&format!(
                "\\begin{{center}}{{\\fontsize{{17}}{{20}}\\selectfont\\bfseries {}}}\\end{{center}}\n",
                escape(text)
            ));
        }
        Node::ContactLine { items } => {
            let joined = items
                .iter()
                .map(|i| escape(i))
                .collect::<Vec<_>>()
                .join(" \\textbar{} ");
            out.push_str(&format!("\\begin{{center}}{joined}\\end{{center}}\n"));
        }
        Node::Table { header, rows } => {
            out.push_str("\\begin{tabularx}{\\textwidth}{|X|X|l|l|}\n\\hline\n");
            let header_cells: Vec<String> = header
                .iter()
                .map(|h| format!("\\textbf{{{}}}", escape(h)))
                .collect();
            out.push_str(&format!("{} \\\\\n\\hline\n", header_cells.join(" & ")));
            for row in rows {
                let cells: Vec<String> = row.iter().map(|c| escape(c)).collect();
                out.push_str(&format!("{} \\\\\n\\hline\n", cells.join(" & ")));
            }
            out.push_str("\\end{tabularx}\n");
        }
        Node::Paragraph { text } => {
            let body = escape_multiline(text);
            if !body.is_empty() {
                out.push_str(&format!("{body}\\par\n"));
            }
        }
        Node::Item {
            title,
            subtitle,
            aside,
            lines,
        } => {
            out.push_str(&format!("\\textbf{{{}}}", escape(title)));
            if let Some(sub) = subtitle {
                out.push_str(&format!(", \\textit{{{}}}", escape(sub)));
            }
            out.push_str(&format!("\\hfill {}\\par\n", escape(aside)));
            for body in lines.iter().map(|l| escape_multiline(l)).filter(|b| !b.is_empty()) {
                out.push_str(&format!("{{\\leftskip=1em {body}\\par}}\n"));
            }
            out.push_str("\\vspace{4pt}\n");
        }
        Node::LabeledList { label, text } => {
            out.push_str(&format!(
                "\\textbf{{{}}} {}\\par\n",
                escape(label),
                escape(text)
            ));
        }
    }
}

/// Escapes free-form text that may span lines.
///
/// Leading and trailing blank lines are dropped, runs of blank lines become a paragraph
/// break, and `\newline` only ever sits between two non-empty lines.
pub fn escape_multiline(text: &str) -> String {
    let mut paragraphs: Vec<Vec<String>> = Vec::new();
    let mut current: Vec<String> = Vec::new();
    for line in text.lines() {
        if line.trim().is_empty() {
            if !current.is_empty() {
                paragraphs.push(std::mem::take(&mut current));
            }
        } else {
            current.push(escape(line.trim_end()));
        }
    }
    if !current.is_empty() {
        paragraphs.push(current);
    }

    paragraphs
        .iter()
        .map(|lines| lines.join("\\newline{}"))
        .collect::<Vec<_>>()
        .join("\\par\n")
}

/// Escapes TeX special characters in single-line user text. Line breaks become spaces.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\textbackslash{}"),
            '&' | '%' | '$' | '#' | '_' | '{' | '}' => {
                out.push('\\');
                out.push(c);
            }
            '~' => out.push_str("\\textasciitilde{}"),
            '^' => out.push_str("\\textasciicircum{}"),
            '<' => out.push_str("\\textless{}"),
            '>' => out.push_str("\\textgreater{}"),
            '|' => out.push_str("\\textbar{}"),
            '\n' | '\r' => out.push(' '),
            _ => out.push(c),
        }
    }
    out
}
