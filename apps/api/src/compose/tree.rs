//! The composed document: pages of styled blocks, ready for a renderer.

use serde::{Deserialize, Serialize};

use crate::layout::PageSetup;

/// Separator shown between contact items on a header line.
pub const CONTACT_SEPARATOR: &str = "|";

/// Top-level template sections, in the fixed order they appear on the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockKind {
    Header,
    Education,
    Objective,
    Experience,
    Projects,
    Skills,
    Achievements,
    Responsibilities,
}

impl BlockKind {
    /// Heading printed above the block. The header block has none.
    pub fn heading(self) -> Option<&'static str> {
        match self {
            BlockKind::Header => None,
            BlockKind::Education => Some("Education"),
            BlockKind::Objective => Some("Objective"),
            BlockKind::Experience => Some("Work Experience"),
            BlockKind::Projects => Some("Projects"),
            BlockKind::Skills => Some("Technical Skills"),
            BlockKind::Achievements => Some("Achievements"),
            BlockKind::Responsibilities => Some("Position of Responsibility"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Node {
    /// The candidate's name, already uppercased.
    Name { text: String },
    /// One row of contact details, shown joined by [`CONTACT_SEPARATOR`].
    ContactLine { items: Vec<String> },
    Table {
        header: Vec<String>,
        rows: Vec<Vec<String>>,
    },
    Paragraph { text: String },
    /// A titled entry: bold title, optional italic subtitle, right-aligned aside,
    /// followed by indented body lines.
    Item {
        title: String,
        subtitle: Option<String>,
        aside: String,
        lines: Vec<String>,
    },
    LabeledList { label: String, text: String },
}

impl Node {
    /// The contact items joined with visible separators.
    pub fn joined_contact(items: &[String]) -> String {
        items.join(&format!(" {CONTACT_SEPARATOR} "))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    pub kind: BlockKind,
    /// `None` for the header and for the continuation of a block split across pages.
    pub heading: Option<String>,
    pub nodes: Vec<Node>,
    /// True when this is the tail of a block that started on an earlier page.
    pub continued: bool,
}

impl Block {
    pub fn new(kind: BlockKind, nodes: Vec<Node>) -> Self {
        Block {
            kind,
            heading: kind.heading().map(str::to_string),
            nodes,
            continued: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    pub number: u16,
    pub blocks: Vec<Block>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentTree {
    pub page: PageSetup,
    pub pages: Vec<Page>,
}

impl DocumentTree {
    /// All blocks in document order, across pages.
    pub fn blocks(&self) -> impl Iterator<Item = &Block> {
        self.pages.iter().flat_map(|p| p.blocks.iter())
    }

    /// Block kinds in order, with split blocks counted once.
    pub fn block_kinds(&self) -> Vec<BlockKind> {
        self.blocks()
            .filter(|b| !b.continued)
            .map(|b| b.kind)
            .collect()
    }

    /// All nodes belonging to blocks of `kind`, including continuations.
    pub fn nodes_of(&self, kind: BlockKind) -> Vec<&Node> {
        self.blocks()
            .filter(|b| b.kind == kind)
            .flat_map(|b| b.nodes.iter())
            .collect()
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }
}
