//! Maps a resume document onto the fixed institutional template.
//!
//! Composition is a pure function of the document: no clock, no randomness, no shared
//! state. Section order is fixed and never depends on content:
//! Header, Education, Objective, Experience, Projects, Skills, Achievements,
//! Position of Responsibility.

use crate::compose::tree::{Block, BlockKind, DocumentTree, Node};
use crate::form::sections::SkillCategory;
use crate::layout::{a4_page_setup, paginate};
use crate::models::resume::{PersonalInfo, ResumeDocument, Skills};

/// Placeholder for an education row with no grade.
pub const MISSING_GRADE: &str = "-";

pub const EDUCATION_COLUMNS: [&str; 4] = ["Degree", "Institution", "Year", "CPI/Percentage"];

/// Composes and paginates `doc` on the A4 template page.
pub fn compose(doc: &ResumeDocument) -> DocumentTree {
    let page = a4_page_setup();
    let pages = paginate(compose_blocks(doc), &page);
    DocumentTree { page, pages }
}

/// The template blocks for `doc`, before pagination.
pub fn compose_blocks(doc: &ResumeDocument) -> Vec<Block> {
    [
        Some(header_block(&doc.personal)),
        Some(education_block(doc)),
        objective_block(doc),
        experience_block(doc),
        projects_block(doc),
        skills_block(&doc.skills),
        achievements_block(doc),
        responsibilities_block(doc),
    ]
    .into_iter()
    .flatten()
    .collect()
}

fn header_block(personal: &PersonalInfo) -> Block {
    let mut nodes = vec![
        Node::Name {
            text: personal.full_name.to_uppercase(),
        },
        Node::ContactLine {
            items: vec![
                personal.email.clone(),
                personal.phone.clone(),
                personal.address.clone(),
            ],
        },
    ];

    let links: Vec<String> = [
        personal.linkedin.as_deref().map(|l| format!("LinkedIn: {l}")),
        personal.github.as_deref().map(|g| format!("GitHub: {g}")),
    ]
    .into_iter()
    .flatten()
    .collect();
    if !links.is_empty() {
        nodes.push(Node::ContactLine { items: links });
    }

    Block::new(BlockKind::Header, nodes)
}

fn education_block(doc: &ResumeDocument) -> Block {
    let rows = doc
        .education
        .iter()
        .map(|e| {
            let grade = if e.grade.is_empty() {
                MISSING_GRADE.to_string()
            } else {
                e.grade.clone()
            };
            vec![e.degree.clone(), e.institution.clone(), e.year.clone(), grade]
        })
        .collect();

    Block::new(
        BlockKind::Education,
        vec![Node::Table {
            header: EDUCATION_COLUMNS.iter().map(|c| c.to_string()).collect(),
            rows,
        }],
    )
}

fn objective_block(doc: &ResumeDocument) -> Option<Block> {
    if doc.summary.overview.is_empty() {
        return None;
    }
    Some(Block::new(
        BlockKind::Objective,
        vec![Node::Paragraph {
            text: doc.summary.overview.clone(),
        }],
    ))
}

/// Builds a block from the qualifying items only; no block when none qualify.
fn gated_block(kind: BlockKind, items: Vec<Node>) -> Option<Block> {
    if items.is_empty() {
        None
    } else {
        Some(Block::new(kind, items))
    }
}

fn experience_block(doc: &ResumeDocument) -> Option<Block> {
    let items = doc
        .experience
        .iter()
        .filter(|e| !e.title.is_empty() || !e.company.is_empty())
        .map(|e| Node::Item {
            title: e.title.clone(),
            subtitle: Some(e.company.clone()),
            aside: format!("{} - {}", e.start_date, e.end_date),
            lines: vec![e.description.clone()],
        })
        .collect();
    gated_block(BlockKind::Experience, items)
}

fn projects_block(doc: &ResumeDocument) -> Option<Block> {
    let items = doc
        .projects
        .iter()
        .filter(|p| !p.title.is_empty())
        .map(|p| {
            let mut lines = Vec::with_capacity(2);
            if let Some(tech) = p.technologies.as_deref().filter(|t| !t.is_empty()) {
                lines.push(format!("Technologies: {tech}"));
            }
            lines.push(p.bio.clone());
            Node::Item {
                title: p.title.clone(),
                subtitle: None,
                aside: p.time.clone(),
                lines,
            }
        })
        .collect();
    gated_block(BlockKind::Projects, items)
}

fn skills_block(skills: &Skills) -> Option<Block> {
    let lists = skills.lists();
    let nodes: Vec<Node> = SkillCategory::ALL
        .iter()
        .zip(lists)
        .filter_map(|(category, list)| {
            let items: Vec<&str> = list
                .iter()
                .map(String::as_str)
                .filter(|s| !s.is_empty())
                .collect();
            if items.is_empty() {
                None
            } else {
                Some(Node::LabeledList {
                    label: category.label().to_string(),
                    text: items.join(", "),
                })
            }
        })
        .collect();
    gated_block(BlockKind::Skills, nodes)
}

fn achievements_block(doc: &ResumeDocument) -> Option<Block> {
    let items = doc
        .achievements
        .iter()
        .filter(|a| !a.title.is_empty())
        .map(|a| Node::Item {
            title: a.title.clone(),
            subtitle: None,
            aside: a.year.clone(),
            lines: vec![a.description.clone()],
        })
        .collect();
    gated_block(BlockKind::Achievements, items)
}

fn responsibilities_block(doc: &ResumeDocument) -> Option<Block> {
    let items = doc
        .por
        .iter()
        .filter(|p| !p.position.is_empty())
        .map(|p| Node::Item {
            title: p.position.clone(),
            subtitle: Some(p.organization.clone()),
            aside: p.duration.clone(),
            lines: vec![p.description.clone()],
        })
        .collect();
    gated_block(BlockKind::Responsibilities, items)
}
