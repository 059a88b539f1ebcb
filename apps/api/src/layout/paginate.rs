//! Page flow for the composed document.
//!
//! Node heights are estimated from the template's font sizes and spacing plus the static
//! metric tables; blocks are then laid out top to bottom and split at node boundaries
//! when a page fills up.
//!
//! # Rules
//! - A block heading always travels with the block's first node.
//! - A block split across pages keeps its heading on the first piece only; later pieces
//!   are marked `continued`.
//! - A node taller than a whole page is placed on its own page instead of being split.

use serde::{Deserialize, Serialize};

use crate::compose::tree::{Block, BlockKind, DocumentTree, Node, Page};
use crate::layout::font_metrics::{get_metrics, FontFamily, PageSetup};

// Template type sizes (pt).
const NAME_SIZE: f32 = 17.0;
const HEADING_SIZE: f32 = 12.0;
const TITLE_SIZE: f32 = 10.0;
const SMALL_SIZE: f32 = 9.0;

// Template spacing (pt).
const NAME_GAP: f32 = 4.0;
const HEADER_BOTTOM: f32 = 18.0;
const HEADING_SPACING: f32 = 16.0;
const CELL_PADDING: f32 = 2.0;
const PARAGRAPH_GAP: f32 = 7.0;
const DESCRIPTION_INDENT: f32 = 7.0;
const DESCRIPTION_GAP: f32 = 1.0;
const ITEM_GAP: f32 = 6.0;
const SKILL_GAP: f32 = 3.0;

// ────────────────────────────────────────────────────────────────────────────
// Height estimation
// ────────────────────────────────────────────────────────────────────────────

fn text_lines(text: &str, font: FontFamily, size_pt: f32, width_pt: f32) -> u16 {
    get_metrics(font).estimated_lines(text, width_pt / size_pt)
}

/// Estimated height of a node in points.
pub fn node_height(node: &Node, setup: &PageSetup) -> f32 {
    let width = setup.text_width_pt();
    let small_line = setup.line_pt(SMALL_SIZE);
    let description_width = width - DESCRIPTION_INDENT;

    match node {
        Node::Name { .. } => setup.line_pt(NAME_SIZE) + NAME_GAP,
        Node::ContactLine { .. } => small_line,
        Node::Table { header, rows } => {
            let columns = header.len().max(1) as f32;
            let cell_width = width / columns - 2.0 * CELL_PADDING;
            std::iter::once(header)
                .chain(rows.iter())
                .map(|row| {
                    let lines = row
                        .iter()
                        .map(|cell| {
                            text_lines(cell, FontFamily::Helvetica, SMALL_SIZE, cell_width)
                        })
                        .max()
                        .unwrap_or(0)
                        .max(1);
                    f32::from(lines) * small_line + 2.0 * CELL_PADDING
                })
                .sum()
        }
        Node::Paragraph { text } => {
            let lines = text_lines(text, FontFamily::Helvetica, SMALL_SIZE, width);
            f32::from(lines) * small_line + PARAGRAPH_GAP
        }
        Node::Item {
            subtitle, lines, ..
        } => {
            let title_line = setup.line_pt(TITLE_SIZE);
            let heading = if subtitle.is_some() {
                2.0 * title_line
            } else {
                title_line
            };
            let body: f32 = lines
                .iter()
                .map(|line| {
                    let n = text_lines(line, FontFamily::Helvetica, SMALL_SIZE, description_width);
                    f32::from(n) * small_line + DESCRIPTION_GAP
                })
                .sum();
            heading + body + ITEM_GAP
        }
        Node::LabeledList { text, .. } => {
            let n = text_lines(text, FontFamily::Helvetica, SMALL_SIZE, description_width);
            setup.line_pt(TITLE_SIZE) + DESCRIPTION_GAP + f32::from(n) * small_line + SKILL_GAP
        }
    }
}

/// Space a block takes besides its nodes: the header rule, or the section heading.
fn block_overhead(block: &Block, setup: &PageSetup) -> f32 {
    if block.kind == BlockKind::Header {
        HEADER_BOTTOM
    } else if block.heading.is_some() {
        setup.line_pt(HEADING_SIZE) + HEADING_SPACING
    } else {
        0.0
    }
}

pub fn block_height(block: &Block, setup: &PageSetup) -> f32 {
    block_overhead(block, setup)
        + block
            .nodes
            .iter()
            .map(|n| node_height(n, setup))
            .sum::<f32>()
}

// ────────────────────────────────────────────────────────────────────────────
// Pagination
// ────────────────────────────────────────────────────────────────────────────

struct Paginator {
    pages: Vec<Page>,
    current: Vec<Block>,
    used: f32,
}

impl Paginator {
    fn break_page(&mut self) {
        let number = u16::try_from(self.pages.len() + 1).unwrap_or(u16::MAX);
        self.pages.push(Page {
            number,
            blocks: std::mem::take(&mut self.current),
        });
        self.used = 0.0;
    }

    fn finish(mut self) -> Vec<Page> {
        if !self.current.is_empty() || self.pages.is_empty() {
            self.break_page();
        }
        self.pages
    }
}

/// Lays blocks out on pages of `setup`'s size.
pub fn paginate(blocks: Vec<Block>, setup: &PageSetup) -> Vec<Page> {
    let available = setup.usable_height_pt();
    let mut paginator = Paginator {
        pages: Vec::new(),
        current: Vec::new(),
        used: 0.0,
    };

    for block in blocks {
        let mut piece = Block {
            kind: block.kind,
            heading: block.heading,
            nodes: Vec::new(),
            continued: false,
        };

        for node in block.nodes {
            let height = node_height(&node, setup);
            let mut needed = height;
            if piece.nodes.is_empty() {
                needed += block_overhead(&piece, setup);
            }

            if paginator.used + needed > available && paginator.used > 0.0 {
                if !piece.nodes.is_empty() {
                    let tail = Block {
                        kind: piece.kind,
                        heading: None,
                        nodes: Vec::new(),
                        continued: true,
                    };
                    paginator.current.push(std::mem::replace(&mut piece, tail));
                    needed = height + block_overhead(&piece, setup);
                }
                paginator.break_page();
            }

            paginator.used += needed;
            piece.nodes.push(node);
        }

        if !piece.nodes.is_empty() {
            paginator.current.push(piece);
        }
    }

    paginator.finish()
}

// ────────────────────────────────────────────────────────────────────────────
// Fill analysis
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FillVerdict {
    /// Everything fits on a single page.
    OnePage,
    /// Content spills onto additional pages.
    Overflow {
        #[serde(rename = "extraPages")]
        extra_pages: usize,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageFillAnalysis {
    pub page_count: usize,
    /// Fraction of the last page's usable height that is occupied (0.0 – 1.0).
    pub last_page_fill: f32,
    pub verdict: FillVerdict,
}

pub fn analyze_fill(tree: &DocumentTree) -> PageFillAnalysis {
    let available = tree.page.usable_height_pt();
    let last_used: f32 = tree
        .pages
        .last()
        .map(|p| p.blocks.iter().map(|b| block_height(b, &tree.page)).sum())
        .unwrap_or(0.0);

    let page_count = tree.pages.len();
    let verdict = if page_count <= 1 {
        FillVerdict::OnePage
    } else {
        FillVerdict::Overflow {
            extra_pages: page_count - 1,
        }
    };

    PageFillAnalysis {
        page_count,
        last_page_fill: (last_used / available).clamp(0.0, 1.0),
        verdict,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
