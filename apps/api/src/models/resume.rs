use serde::{Deserialize, Serialize};

/// Stable synthetic identity of a list entry. Never shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryId(pub String);

impl EntryId {
    pub fn new(prefix: &str, seq: u64) -> Self {
        EntryId(format!("{prefix}_{seq}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for EntryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalInfo {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub overview: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EducationEntry {
    pub id: EntryId,
    pub degree: String,
    pub institution: String,
    pub year: String,
    pub grade: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExperienceEntry {
    pub id: EntryId,
    pub title: String,
    pub company: String,
    pub start_date: String,
    pub end_date: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectEntry {
    pub id: EntryId,
    pub title: String,
    pub time: String,
    pub bio: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub technologies: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AchievementEntry {
    pub id: EntryId,
    pub title: String,
    pub description: String,
    pub year: String,
}

/// Position of responsibility.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PorEntry {
    pub id: EntryId,
    pub position: String,
    pub organization: String,
    pub duration: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Skills {
    pub programming: Vec<String>,
    pub technologies: Vec<String>,
    pub tools: Vec<String>,
    pub databases: Vec<String>,
}

impl Skills {
    /// All four lists in template order.
    pub fn lists(&self) -> [&Vec<String>; 4] {
        [
            &self.programming,
            &self.technologies,
            &self.tools,
            &self.databases,
        ]
    }

    pub fn has_any(&self) -> bool {
        self.lists()
            .iter()
            .any(|list| list.iter().any(|s| !s.is_empty()))
    }
}

/// The resume being edited. One instance per editing session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResumeDocument {
    pub personal: PersonalInfo,
    pub education: Vec<EducationEntry>,
    pub summary: Summary,
    pub experience: Vec<ExperienceEntry>,
    pub projects: Vec<ProjectEntry>,
    pub skills: Skills,
    pub achievements: Vec<AchievementEntry>,
    pub por: Vec<PorEntry>,
}

/// Behaviour shared by every repeatable entry type.
pub trait Entry: Clone {
    /// Prefix used when generating ids for this entry type.
    const ID_PREFIX: &'static str;

    fn blank(id: EntryId) -> Self;
    fn id(&self) -> &EntryId;
}

impl Entry for EducationEntry {
    const ID_PREFIX: &'static str = "edu";

    fn blank(id: EntryId) -> Self {
        EducationEntry {
            id,
            degree: String::new(),
            institution: String::new(),
            year: String::new(),
            grade: String::new(),
        }
    }

    fn id(&self) -> &EntryId {
        &self.id
    }
}

impl Entry for ExperienceEntry {
    const ID_PREFIX: &'static str = "exp";

    fn blank(id: EntryId) -> Self {
        ExperienceEntry {
            id,
            title: String::new(),
            company: String::new(),
            start_date: String::new(),
            end_date: String::new(),
            description: String::new(),
        }
    }

    fn id(&self) -> &EntryId {
        &self.id
    }
}

impl Entry for ProjectEntry {
    const ID_PREFIX: &'static str = "proj";

    fn blank(id: EntryId) -> Self {
        ProjectEntry {
            id,
            title: String::new(),
            time: String::new(),
            bio: String::new(),
            technologies: None,
        }
    }

    fn id(&self) -> &EntryId {
        &self.id
    }
}

impl Entry for AchievementEntry {
    const ID_PREFIX: &'static str = "ach";

    fn blank(id: EntryId) -> Self {
        AchievementEntry {
            id,
            title: String::new(),
            description: String::new(),
            year: String::new(),
        }
    }

    fn id(&self) -> &EntryId {
        &self.id
    }
}

impl Entry for PorEntry {
    const ID_PREFIX: &'static str = "por";

    fn blank(id: EntryId) -> Self {
        PorEntry {
            id,
            position: String::new(),
            organization: String::new(),
            duration: String::new(),
            description: String::new(),
        }
    }

    fn id(&self) -> &EntryId {
        &self.id
    }
}

/// Sequence number of the placeholder entries created by [`ResumeDocument::blank`].
pub const FIRST_ENTRY_SEQ: u64 = 1;

impl ResumeDocument {
    /// A fresh document: blank scalar fields, empty skills, and one placeholder per list.
    pub fn blank() -> Self {
        fn placeholder<E: Entry>() -> Vec<E> {
            vec![E::blank(EntryId::new(E::ID_PREFIX, FIRST_ENTRY_SEQ))]
        }

        ResumeDocument {
            personal: PersonalInfo::default(),
            education: placeholder(),
            summary: Summary::default(),
            experience: placeholder(),
            projects: placeholder(),
            skills: Skills::default(),
            achievements: placeholder(),
            por: placeholder(),
        }
    }
}

/// Normalizes an optional text field: empty input clears it.
pub fn optional_text(value: String) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}
