//! The Form State Manager for a single editing session.
//!
//! All operations are synchronous and run one at a time on behalf of a single writer.
//! Each operation replaces exactly one sub-structure of the document, so a reader holding
//! the session lock never sees a half-applied change.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::form::completion::{completion, CompletionFlags};
use crate::form::sections::{
    EntryField, ListSection, ScalarField, SectionId, SkillCategory,
};
use crate::models::resume::{Entry, EntryId, ResumeDocument, FIRST_ENTRY_SEQ};
use crate::models::user::Identity;

#[derive(Debug, Error, PartialEq)]
pub enum FormError {
    #[error("{section} has no entry at index {index} (it has {len})")]
    EntryOutOfRange {
        section: ListSection,
        index: usize,
        len: usize,
    },
}

/// One user-initiated mutation, as sent by the editor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum FormCommand {
    UpdateScalarField {
        field: ScalarField,
        value: String,
    },
    UpdateListField {
        index: usize,
        field: EntryField,
        value: String,
    },
    AddEntry {
        section: ListSection,
    },
    RemoveEntry {
        section: ListSection,
        index: usize,
    },
    UpdateSkillList {
        category: SkillCategory,
        #[serde(rename = "rawText")]
        raw_text: String,
    },
    ToggleSection {
        section: SectionId,
    },
}

/// What a command did to the form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum CommandOutcome {
    Applied,
    /// The command was valid but left the form unchanged (e.g. removing the last entry).
    Unchanged,
    Added { id: EntryId },
}

#[derive(Debug, Clone)]
pub struct FormState {
    document: ResumeDocument,
    open_sections: BTreeSet<SectionId>,
    next_entry_seq: u64,
    identity_applied: bool,
}

impl Default for FormState {
    fn default() -> Self {
        Self::new()
    }
}

impl FormState {
    /// A fresh editing session with only the personal section expanded.
    pub fn new() -> Self {
        FormState {
            document: ResumeDocument::blank(),
            open_sections: BTreeSet::from([SectionId::Personal]),
            next_entry_seq: FIRST_ENTRY_SEQ + 1,
            identity_applied: false,
        }
    }

    /// A fresh session pre-filled from the authenticated identity.
    pub fn for_identity(identity: &Identity) -> Self {
        let mut state = Self::new();
        state.prefill_identity(identity);
        state
    }

    pub fn document(&self) -> &ResumeDocument {
        &self.document
    }

    pub fn open_sections(&self) -> &BTreeSet<SectionId> {
        &self.open_sections
    }

    /// Copies name and email from the identity into the personal section.
    ///
    /// Runs at most once per session; returns false when it was already applied.
    pub fn prefill_identity(&mut self, identity: &Identity) -> bool {
        if self.identity_applied {
            return false;
        }
        self.document.personal.full_name = identity.prefill_name().to_string();
        self.document.personal.email = identity.email.clone();
        self.identity_applied = true;
        true
    }

    pub fn update_scalar_field(&mut self, field: ScalarField, value: String) {
        match field {
            ScalarField::Personal(f) => f.apply(&mut self.document.personal, value),
            ScalarField::Summary(f) => f.apply(&mut self.document.summary, value),
        }
    }

    /// Replaces one field of the entry at `index`. The entry id and sibling entries are untouched.
    pub fn update_list_field(
        &mut self,
        index: usize,
        field: EntryField,
        value: String,
    ) -> Result<(), FormError> {
        let doc = &mut self.document;
        match field {
            EntryField::Education(f) => {
                with_entry(&mut doc.education, field.section(), index, |e| f.apply(e, value))
            }
            EntryField::Experience(f) => {
                with_entry(&mut doc.experience, field.section(), index, |e| f.apply(e, value))
            }
            EntryField::Projects(f) => {
                with_entry(&mut doc.projects, field.section(), index, |e| f.apply(e, value))
            }
            EntryField::Achievements(f) => {
                with_entry(&mut doc.achievements, field.section(), index, |e| f.apply(e, value))
            }
            EntryField::Por(f) => {
                with_entry(&mut doc.por, field.section(), index, |e| f.apply(e, value))
            }
        }
    }

    /// Appends a blank entry with a fresh id and returns that id.
    pub fn add_entry(&mut self, section: ListSection) -> EntryId {
        let seq = &mut self.next_entry_seq;
        let doc = &mut self.document;
        match section {
            ListSection::Education => push_blank(&mut doc.education, seq),
            ListSection::Experience => push_blank(&mut doc.experience, seq),
            ListSection::Projects => push_blank(&mut doc.projects, seq),
            ListSection::Achievements => push_blank(&mut doc.achievements, seq),
            ListSection::Por => push_blank(&mut doc.por, seq),
        }
    }

    /// Removes the entry at `index` unless it is the last one in its list.
    ///
    /// Returns `Ok(false)` when the list has a single entry and nothing was removed.
    pub fn remove_entry(&mut self, section: ListSection, index: usize) -> Result<bool, FormError> {
        let doc = &mut self.document;
        match section {
            ListSection::Education => remove_at(&mut doc.education, section, index),
            ListSection::Experience => remove_at(&mut doc.experience, section, index),
            ListSection::Projects => remove_at(&mut doc.projects, section, index),
            ListSection::Achievements => remove_at(&mut doc.achievements, section, index),
            ListSection::Por => remove_at(&mut doc.por, section, index),
        }
    }

    /// Replaces a skills list with the comma-separated items of `raw_text`.
    pub fn update_skill_list(&mut self, category: SkillCategory, raw_text: &str) {
        let items = parse_skill_list(raw_text);
        let skills = &mut self.document.skills;
        match category {
            SkillCategory::Programming => skills.programming = items,
            SkillCategory::Technologies => skills.technologies = items,
            SkillCategory::Tools => skills.tools = items,
            SkillCategory::Databases => skills.databases = items,
        }
    }

    /// Flips whether `section` is expanded in the editor.
    pub fn toggle_section(&mut self, section: SectionId) {
        if !self.open_sections.remove(&section) {
            self.open_sections.insert(section);
        }
    }

    pub fn completion_flags(&self) -> CompletionFlags {
        completion(&self.document)
    }

    pub fn apply(&mut self, command: FormCommand) -> Result<CommandOutcome, FormError> {
        let outcome = match command {
            FormCommand::UpdateScalarField { field, value } => {
                self.update_scalar_field(field, value);
                CommandOutcome::Applied
            }
            FormCommand::UpdateListField {
                index,
                field,
                value,
            } => {
                self.update_list_field(index, field, value)?;
                CommandOutcome::Applied
            }
            FormCommand::AddEntry { section } => CommandOutcome::Added {
                id: self.add_entry(section),
            },
            FormCommand::RemoveEntry { section, index } => {
                if self.remove_entry(section, index)? {
                    CommandOutcome::Applied
                } else {
                    debug!(%section, "refusing to remove the last entry");
                    CommandOutcome::Unchanged
                }
            }
            FormCommand::UpdateSkillList { category, raw_text } => {
                self.update_skill_list(category, &raw_text);
                CommandOutcome::Applied
            }
            FormCommand::ToggleSection { section } => {
                self.toggle_section(section);
                CommandOutcome::Applied
            }
        };
        Ok(outcome)
    }
}

/// Splits comma-separated input into trimmed, non-empty items, keeping input order.
pub fn parse_skill_list(raw_text: &str) -> Vec<String> {
    raw_text
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn with_entry<E>(
    list: &mut [E],
    section: ListSection,
    index: usize,
    update: impl FnOnce(&mut E),
) -> Result<(), FormError> {
    let len = list.len();
    let entry = list.get_mut(index).ok_or(FormError::EntryOutOfRange {
        section,
        index,
        len,
    })?;
    update(entry);
    Ok(())
}

fn push_blank<E: Entry>(list: &mut Vec<E>, seq: &mut u64) -> EntryId {
    // Documents loaded from elsewhere may already use ids ahead of the counter.
    let id = loop {
        let candidate = EntryId::new(E::ID_PREFIX, *seq);
        *seq += 1;
        if !list.iter().any(|e| e.id() == &candidate) {
            break candidate;
        }
    };
    list.push(E::blank(id.clone()));
    id
}

fn remove_at<E>(list: &mut Vec<E>, section: ListSection, index: usize) -> Result<bool, FormError> {
    let len = list.len();
    if index >= len {
        return Err(FormError::EntryOutOfRange {
            section,
            index,
            len,
        });
    }
    if len <= 1 {
        return Ok(false);
    }
    list.remove(index);
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::sections::{
        EducationField, ExperienceField, PersonalField, PorField, ProjectField, SummaryField,
    };
    use std::collections::HashSet;

    fn identity() -> Identity {
        Identity {
            display_name: "Asha Rao".to_string(),
            email: "asha@example.com".to_string(),
        }
    }

    fn list_len(state: &FormState, section: ListSection) -> usize {
        let doc = state.document();
        match section {
            ListSection::Education => doc.education.len(),
            ListSection::Experience => doc.experience.len(),
            ListSection::Projects => doc.projects.len(),
            ListSection::Achievements => doc.achievements.len(),
            ListSection::Por => doc.por.len(),
        }
    }

    fn list_ids(state: &FormState, section: ListSection) -> Vec<EntryId> {
        let doc = state.document();
        match section {
            ListSection::Education => doc.education.iter().map(|e| e.id.clone()).collect(),
            ListSection::Experience => doc.experience.iter().map(|e| e.id.clone()).collect(),
            ListSection::Projects => doc.projects.iter().map(|e| e.id.clone()).collect(),
            ListSection::Achievements => doc.achievements.iter().map(|e| e.id.clone()).collect(),
            ListSection::Por => doc.por.iter().map(|e| e.id.clone()).collect(),
        }
    }

    #[test]
    fn test_new_state_opens_personal_only() {
        let state = FormState::new();
        assert!(state.open_sections().contains(&SectionId::Personal));
        assert_eq!(state.open_sections().len(), 1);
    }

    #[test]
    fn test_remove_last_entry_is_noop_for_every_section() {
        for section in ListSection::ALL {
            let mut state = FormState::new();
            assert_eq!(state.remove_entry(section, 0), Ok(false));
            assert_eq!(list_len(&state, section), 1);
        }
    }

    #[test]
    fn test_add_entry_grows_by_one_with_fresh_id() {
        for section in ListSection::ALL {
            let mut state = FormState::new();
            for _ in 0..3 {
                let before = list_ids(&state, section);
                let id = state.add_entry(section);
                let after = list_ids(&state, section);
                assert_eq!(after.len(), before.len() + 1);
                assert!(!before.contains(&id));
                assert_eq!(after.last(), Some(&id));
            }
            let unique: HashSet<_> = list_ids(&state, section).into_iter().collect();
            assert_eq!(unique.len(), 4);
        }
    }

    #[test]
    fn test_add_entry_never_reuses_removed_id() {
        let mut state = FormState::new();
        let id = state.add_entry(ListSection::Experience);
        assert_eq!(state.remove_entry(ListSection::Experience, 1), Ok(true));
        let next = state.add_entry(ListSection::Experience);
        assert_ne!(id, next);
    }

    #[test]
    fn test_add_entry_skips_ids_already_present() {
        let mut state = FormState::new();
        state.document.projects[0].id = EntryId::new("proj", 2);
        let id = state.add_entry(ListSection::Projects);
        assert_eq!(id.as_str(), "proj_3");
    }

    #[test]
    fn test_remove_entry_removes_only_target() {
        let mut state = FormState::new();
        let second = state.add_entry(ListSection::Por);
        let third = state.add_entry(ListSection::Por);
        assert_eq!(state.remove_entry(ListSection::Por, 0), Ok(true));
        assert_eq!(list_ids(&state, ListSection::Por), vec![second, third]);
    }

    #[test]
    fn test_remove_entry_out_of_range() {
        let mut state = FormState::new();
        state.add_entry(ListSection::Education);
        let err = state.remove_entry(ListSection::Education, 5).unwrap_err();
        assert_eq!(
            err,
            FormError::EntryOutOfRange {
                section: ListSection::Education,
                index: 5,
                len: 2
            }
        );
        assert_eq!(list_len(&state, ListSection::Education), 2);
    }

    #[test]
    fn test_update_list_field_keeps_id_and_siblings() {
        let mut state = FormState::new();
        state.add_entry(ListSection::Experience);
        let before = state.document().experience[0].clone();

        state
            .update_list_field(
                1,
                EntryField::Experience(ExperienceField::Title),
                "Engineer".to_string(),
            )
            .unwrap();

        let doc = state.document();
        assert_eq!(doc.experience[0], before);
        assert_eq!(doc.experience[1].title, "Engineer");
        assert_eq!(doc.experience[1].id.as_str(), "exp_2");
    }

    #[test]
    fn test_update_list_field_out_of_range_leaves_document_unchanged() {
        let mut state = FormState::new();
        let before = state.document().clone();
        let result = state.update_list_field(
            3,
            EntryField::Education(EducationField::Degree),
            "B.Tech".to_string(),
        );
        assert!(matches!(
            result,
            Err(FormError::EntryOutOfRange { index: 3, len: 1, .. })
        ));
        assert_eq!(state.document(), &before);
    }

    #[test]
    fn test_update_scalar_field_allows_empty() {
        let mut state = FormState::new();
        state.update_scalar_field(
            ScalarField::Personal(PersonalField::Phone),
            "+91 99999".to_string(),
        );
        state.update_scalar_field(ScalarField::Personal(PersonalField::Phone), String::new());
        state.update_scalar_field(
            ScalarField::Summary(SummaryField::Overview),
            "Systems engineer".to_string(),
        );
        assert_eq!(state.document().personal.phone, "");
        assert_eq!(state.document().summary.overview, "Systems engineer");
    }

    #[test]
    fn test_update_skill_list_trims_drops_empty_keeps_duplicates() {
        let mut state = FormState::new();
        state.update_skill_list(SkillCategory::Programming, " Go, , Rust ,Go");
        assert_eq!(state.document().skills.programming, vec!["Go", "Rust", "Go"]);
    }

    #[test]
    fn test_update_skill_list_replaces_previous_value() {
        let mut state = FormState::new();
        state.update_skill_list(SkillCategory::Tools, "Git, Docker");
        state.update_skill_list(SkillCategory::Tools, " ,, ");
        assert!(state.document().skills.tools.is_empty());
    }

    #[test]
    fn test_toggle_twice_restores_open_set() {
        let mut state = FormState::new();
        let original = state.open_sections().clone();
        for section in SectionId::ALL {
            state.toggle_section(section);
            state.toggle_section(section);
            assert_eq!(state.open_sections(), &original);
        }
    }

    #[test]
    fn test_toggle_opens_and_closes() {
        let mut state = FormState::new();
        state.toggle_section(SectionId::Skills);
        assert!(state.open_sections().contains(&SectionId::Skills));
        state.toggle_section(SectionId::Personal);
        assert!(!state.open_sections().contains(&SectionId::Personal));
    }

    #[test]
    fn test_prefill_identity_runs_once() {
        let mut state = FormState::for_identity(&identity());
        assert_eq!(state.document().personal.full_name, "Asha Rao");
        assert_eq!(state.document().personal.email, "asha@example.com");

        state.update_scalar_field(
            ScalarField::Personal(PersonalField::FullName),
            "Asha R.".to_string(),
        );
        assert!(!state.prefill_identity(&identity()));
        assert_eq!(state.document().personal.full_name, "Asha R.");
    }

    #[test]
    fn test_apply_dispatches_commands() {
        let mut state = FormState::new();
        let added = state
            .apply(FormCommand::AddEntry {
                section: ListSection::Projects,
            })
            .unwrap();
        assert_eq!(
            added,
            CommandOutcome::Added {
                id: EntryId::new("proj", 2)
            }
        );

        state
            .apply(FormCommand::UpdateListField {
                index: 1,
                field: EntryField::Projects(ProjectField::Technologies),
                value: "Rust, Axum".to_string(),
            })
            .unwrap();
        assert_eq!(
            state.document().projects[1].technologies.as_deref(),
            Some("Rust, Axum")
        );

        let removed = state
            .apply(FormCommand::RemoveEntry {
                section: ListSection::Achievements,
                index: 0,
            })
            .unwrap();
        assert_eq!(removed, CommandOutcome::Unchanged);
    }

    #[test]
    fn test_command_wire_format() {
        let json = r#"{
            "op": "update_list_field",
            "index": 0,
            "field": {"section": "por", "field": "position"},
            "value": "Coordinator"
        }"#;
        let command: FormCommand = serde_json::from_str(json).unwrap();
        assert_eq!(
            command,
            FormCommand::UpdateListField {
                index: 0,
                field: EntryField::Por(PorField::Position),
                value: "Coordinator".to_string(),
            }
        );

        let json = r#"{"op": "update_skill_list", "category": "databases", "rawText": "Postgres"}"#;
        assert!(serde_json::from_str::<FormCommand>(json).is_ok());
    }

    #[test]
    fn test_parse_skill_list_preserves_order() {
        assert_eq!(parse_skill_list("c, b, a"), vec!["c", "b", "a"]);
        assert!(parse_skill_list("").is_empty());
    }
}
