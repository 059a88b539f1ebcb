//! Closed enumerations of resume sections and their editable fields.

use serde::{Deserialize, Serialize};

use crate::models::resume::{
    optional_text, AchievementEntry, EducationEntry, ExperienceEntry, PersonalInfo,
    PorEntry, ProjectEntry, Summary,
};

/// Every section of the resume form, in form order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionId {
    Personal,
    Education,
    Summary,
    Experience,
    Projects,
    Skills,
    Achievements,
    Por,
}

impl SectionId {
    pub const ALL: [SectionId; 8] = [
        SectionId::Personal,
        SectionId::Education,
        SectionId::Summary,
        SectionId::Experience,
        SectionId::Projects,
        SectionId::Skills,
        SectionId::Achievements,
        SectionId::Por,
    ];

    pub fn title(self) -> &'static str {
        match self {
            SectionId::Personal => "Personal Information",
            SectionId::Education => "Education",
            SectionId::Summary => "Objective",
            SectionId::Experience => "Work Experience",
            SectionId::Projects => "Projects",
            SectionId::Skills => "Technical Skills",
            SectionId::Achievements => "Achievements",
            SectionId::Por => "Position of Responsibility",
        }
    }
}

/// The list-shaped sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListSection {
    Education,
    Experience,
    Projects,
    Achievements,
    Por,
}

impl ListSection {
    pub const ALL: [ListSection; 5] = [
        ListSection::Education,
        ListSection::Experience,
        ListSection::Projects,
        ListSection::Achievements,
        ListSection::Por,
    ];
}

impl From<ListSection> for SectionId {
    fn from(section: ListSection) -> Self {
        match section {
            ListSection::Education => SectionId::Education,
            ListSection::Experience => SectionId::Experience,
            ListSection::Projects => SectionId::Projects,
            ListSection::Achievements => SectionId::Achievements,
            ListSection::Por => SectionId::Por,
        }
    }
}

impl std::fmt::Display for ListSection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(SectionId::from(*self).title())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PersonalField {
    FullName,
    Email,
    Phone,
    Address,
    Linkedin,
    Github,
}

impl PersonalField {
    pub fn apply(self, personal: &mut PersonalInfo, value: String) {
        match self {
            PersonalField::FullName => personal.full_name = value,
            PersonalField::Email => personal.email = value,
            PersonalField::Phone => personal.phone = value,
            PersonalField::Address => personal.address = value,
            PersonalField::Linkedin => personal.linkedin = optional_text(value),
            PersonalField::Github => personal.github = optional_text(value),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SummaryField {
    Overview,
}

impl SummaryField {
    pub fn apply(self, summary: &mut Summary, value: String) {
        match self {
            SummaryField::Overview => summary.overview = value,
        }
    }
}

/// A field of one of the non-list sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "section", content = "field", rename_all = "snake_case")]
pub enum ScalarField {
    Personal(PersonalField),
    Summary(SummaryField),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EducationField {
    Degree,
    Institution,
    Year,
    Grade,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ExperienceField {
    Title,
    Company,
    StartDate,
    EndDate,
    Description,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ProjectField {
    Title,
    Time,
    Bio,
    Technologies,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AchievementField {
    Title,
    Description,
    Year,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PorField {
    Position,
    Organization,
    Duration,
    Description,
}

/// A field of a list entry. The variant names the list it belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "section", content = "field", rename_all = "snake_case")]
pub enum EntryField {
    Education(EducationField),
    Experience(ExperienceField),
    Projects(ProjectField),
    Achievements(AchievementField),
    Por(PorField),
}

impl EntryField {
    pub fn section(self) -> ListSection {
        match self {
            EntryField::Education(_) => ListSection::Education,
            EntryField::Experience(_) => ListSection::Experience,
            EntryField::Projects(_) => ListSection::Projects,
            EntryField::Achievements(_) => ListSection::Achievements,
            EntryField::Por(_) => ListSection::Por,
        }
    }
}

impl EducationField {
    pub fn apply(self, entry: &mut EducationEntry, value: String) {
        match self {
            EducationField::Degree => entry.degree = value,
            EducationField::Institution => entry.institution = value,
            EducationField::Year => entry.year = value,
            EducationField::Grade => entry.grade = value,
        }
    }
}

impl ExperienceField {
    pub fn apply(self, entry: &mut ExperienceEntry, value: String) {
        match self {
            ExperienceField::Title => entry.title = value,
            ExperienceField::Company => entry.company = value,
            ExperienceField::StartDate => entry.start_date = value,
            ExperienceField::EndDate => entry.end_date = value,
            ExperienceField::Description => entry.description = value,
        }
    }
}

impl ProjectField {
    pub fn apply(self, entry: &mut ProjectEntry, value: String) {
        match self {
            ProjectField::Title => entry.title = value,
            ProjectField::Time => entry.time = value,
            ProjectField::Bio => entry.bio = value,
            ProjectField::Technologies => entry.technologies = optional_text(value),
        }
    }
}

impl AchievementField {
    pub fn apply(self, entry: &mut AchievementEntry, value: String) {
        match self {
            AchievementField::Title => entry.title = value,
            AchievementField::Description => entry.description = value,
            AchievementField::Year => entry.year = value,
        }
    }
}

impl PorField {
    pub fn apply(self, entry: &mut PorEntry, value: String) {
        match self {
            PorField::Position => entry.position = value,
            PorField::Organization => entry.organization = value,
            PorField::Duration => entry.duration = value,
            PorField::Description => entry.description = value,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkillCategory {
    Programming,
    Technologies,
    Tools,
    Databases,
}

impl SkillCategory {
    pub const ALL: [SkillCategory; 4] = [
        SkillCategory::Programming,
        SkillCategory::Technologies,
        SkillCategory::Tools,
        SkillCategory::Databases,
    ];

    /// Label used for this category in the composed document.
    pub fn label(self) -> &'static str {
        match self {
            SkillCategory::Programming => "Programming Languages:",
            SkillCategory::Technologies => "Technologies & Frameworks:",
            SkillCategory::Tools => "Tools & Platforms:",
            SkillCategory::Databases => "Databases:",
        }
    }
}
