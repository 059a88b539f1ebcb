use serde::{Deserialize, Serialize};

use crate::form::sections::SectionId;
use crate::models::resume::ResumeDocument;

/// Per-section "filled in" indicators. Derived on every read, never stored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionFlags {
    pub personal: bool,
    pub education: bool,
    pub summary: bool,
    pub experience: bool,
    pub projects: bool,
    pub skills: bool,
    pub achievements: bool,
    pub por: bool,
}

impl CompletionFlags {
    pub fn get(&self, section: SectionId) -> bool {
        match section {
            SectionId::Personal => self.personal,
            SectionId::Education => self.education,
            SectionId::Summary => self.summary,
            SectionId::Experience => self.experience,
            SectionId::Projects => self.projects,
            SectionId::Skills => self.skills,
            SectionId::Achievements => self.achievements,
            SectionId::Por => self.por,
        }
    }

    pub fn completed_count(&self) -> usize {
        SectionId::ALL.iter().filter(|s| self.get(**s)).count()
    }
}

pub fn completion(doc: &ResumeDocument) -> CompletionFlags {
    CompletionFlags {
        personal: personal_complete(doc),
        education: education_complete(doc),
        summary: summary_complete(doc),
        experience: experience_complete(doc),
        projects: projects_complete(doc),
        skills: skills_complete(doc),
        achievements: achievements_complete(doc),
        por: por_complete(doc),
    }
}

pub fn personal_complete(doc: &ResumeDocument) -> bool {
    let p = &doc.personal;
    [&p.full_name, &p.email, &p.phone, &p.address]
        .iter()
        .all(|f| !f.is_empty())
}

pub fn education_complete(doc: &ResumeDocument) -> bool {
    doc.education
        .iter()
        .any(|e| !e.degree.is_empty() && !e.institution.is_empty())
}

pub fn summary_complete(doc: &ResumeDocument) -> bool {
    !doc.summary.overview.is_empty()
}

pub fn experience_complete(doc: &ResumeDocument) -> bool {
    doc.experience
        .iter()
        .any(|e| !e.title.is_empty() && !e.company.is_empty())
}

pub fn projects_complete(doc: &ResumeDocument) -> bool {
    doc.projects.iter().any(|p| !p.title.is_empty())
}

pub fn skills_complete(doc: &ResumeDocument) -> bool {
    doc.skills.has_any()
}

pub fn achievements_complete(doc: &ResumeDocument) -> bool {
    doc.achievements.iter().any(|a| !a.title.is_empty())
}

pub fn por_complete(doc: &ResumeDocument) -> bool {
    doc.por.iter().any(|p| !p.position.is_empty())
}
