use log::debug;

use crate::form::edit::{Edit, EntryField, Field, FormError, IdGenerator, Section};
use crate::models::resume::ResumeRecord;

/// Receives the full record after every successful change.
pub trait RecordObserver {
    fn record_changed(&mut self, record: &ResumeRecord);
}

/// Owns the canonical record. Every operator builds a replacement record and
/// notifies the observer before returning; there is no batching.
pub struct FormController<O: RecordObserver> {
    record: ResumeRecord,
    ids: IdGenerator,
    observer: O,
}

impl<O: RecordObserver> FormController<O> {
    pub fn new(record: ResumeRecord, observer: O) -> Self {
        Self {
            record,
            ids: IdGenerator::default(),
            observer,
        }
    }

    pub fn record(&self) -> &ResumeRecord {
        &self.record
    }

    #[cfg(test)]
    pub fn observer(&self) -> &O {
        &self.observer
    }

    pub fn apply(&mut self, edit: Edit) -> Result<&ResumeRecord, FormError> {
        debug!("applying edit: {:?}", edit);
        let next = edit.apply(&self.record, &mut self.ids)?;
        self.record = next;
        self.observer.record_changed(&self.record);
        Ok(&self.record)
    }

    pub fn set_field(&mut self, field: Field, value: impl Into<String>) -> Result<&ResumeRecord, FormError> {
        self.apply(Edit::SetField {
            field,
            value: value.into(),
        })
    }

    pub fn set_skills(&mut self, input: impl Into<String>) -> Result<&ResumeRecord, FormError> {
        self.apply(Edit::SetSkills(input.into()))
    }

    pub fn add_entry(&mut self, section: Section) -> Result<&ResumeRecord, FormError> {
        self.apply(Edit::AddEntry(section))
    }

    pub fn remove_entry(&mut self, section: Section, index: usize) -> Result<&ResumeRecord, FormError> {
        self.apply(Edit::RemoveEntry { section, index })
    }

    pub fn update_entry(
        &mut self,
        section: Section,
        index: usize,
        field: &str,
        value: impl Into<String>,
    ) -> Result<&ResumeRecord, FormError> {
        let field = EntryField::parse(section, field)?;
        self.apply(Edit::UpdateEntry {
            index,
            field,
            value: value.into(),
        })
    }

    pub fn reset(&mut self) -> Result<&ResumeRecord, FormError> {
        self.apply(Edit::Reset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        snapshots: Vec<ResumeRecord>,
    }

    impl RecordObserver for Recorder {
        fn record_changed(&mut self, record: &ResumeRecord) {
            self.snapshots.push(record.clone());
        }
    }

    fn controller() -> FormController<Recorder> {
        FormController::new(ResumeRecord::seed(), Recorder::default())
    }

    #[test]
    fn test_every_change_notifies_with_latest_record() {
        let mut form = controller();
        form.set_field(Field::Email, "jane@example.com").unwrap();
        form.set_skills("Rust, Go").unwrap();

        let snapshots = &form.observer().snapshots;
        assert_eq!(snapshots.len(), 2);
        assert_eq!(snapshots[1].email, "jane@example.com");
        assert_eq!(snapshots[1].skills, vec!["Rust".to_string(), "Go".to_string()]);
        assert_eq!(&snapshots[1], form.record());
    }

    #[test]
    fn test_edit_sequence_matches_sequential_fold() {
        let edits = vec![
            Edit::SetField {
                field: Field::FullName,
                value: "Jane Doe".to_string(),
            },
            Edit::SetSkills("Rust, Tokio".to_string()),
            Edit::RemoveEntry {
                section: Section::WorkExperience,
                index: 0,
            },
            Edit::UpdateEntry {
                index: 0,
                field: EntryField::parse(Section::WorkExperience, "company").unwrap(),
                value: "Acme".to_string(),
            },
            Edit::SetField {
                field: Field::FullName,
                value: "Jane Q. Doe".to_string(),
            },
        ];

        let mut form = controller();
        for edit in edits.clone() {
            form.apply(edit).unwrap();
        }

        let mut ids = IdGenerator::default();
        let expected = edits
            .iter()
            .try_fold(ResumeRecord::seed(), |record, edit| edit.apply(&record, &mut ids))
            .unwrap();

        assert_eq!(form.record(), &expected);
        assert_eq!(form.record().full_name, "Jane Q. Doe");
        assert_eq!(form.record().work_experience[0].company, "Acme");
    }

    #[test]
    fn test_failed_edit_leaves_record_and_observer_untouched() {
        let mut form = controller();
        let err = form.remove_entry(Section::Education, 3).unwrap_err();

        assert!(matches!(err, FormError::IndexOutOfRange { .. }));
        assert_eq!(form.record(), &ResumeRecord::seed());
        assert!(form.observer().snapshots.is_empty());
    }

    #[test]
    fn test_removed_ids_are_never_reissued() {
        let mut form = controller();
        form.add_entry(Section::WorkExperience).unwrap();
        let added = form.record().work_experience[2].id.clone();
        form.remove_entry(Section::WorkExperience, 2).unwrap();
        form.add_entry(Section::WorkExperience).unwrap();

        assert_ne!(form.record().work_experience[2].id, added);
    }

    #[test]
    fn test_reset_restores_seed() {
        let mut form = controller();
        form.set_field(Field::FullName, "Someone Else").unwrap();
        form.reset().unwrap();
        assert_eq!(form.record(), &ResumeRecord::seed());
    }
}
