use std::path::{Path, PathBuf};

use log::{debug, info};

use crate::chat::gateway::EnhancedResume;
use crate::export::ExportError;
use crate::export::download::export_as_downloadable_html;
use crate::export::print::{PrintPreview, export_as_print_preview};
use crate::form::controller::FormController;
use crate::form::edit::{Edit, Field, FormError, Section, SectionTarget};
use crate::models::design::DesignChoice;
use crate::models::resume::ResumeRecord;
use crate::preview::composer::{PreviewComposer, RenderedPreview};
use crate::store::kv::KeyValueStore;
use crate::store::persistence::PersistenceShim;

/// One editing session: the canonical record, the design choice next to it,
/// and the mounted preview (if any). Every edit re-renders a mounted preview.
pub struct Session<S: KeyValueStore> {
    form: FormController<PersistenceShim<S>>,
    design: DesignChoice,
    preview: Option<RenderedPreview>,
}

impl<S: KeyValueStore> Session<S> {
    pub fn open(shim: PersistenceShim<S>, design: DesignChoice) -> Self {
        let record = shim.load();
        info!("session opened for {}", record.full_name);

        Self {
            form: FormController::new(record, shim),
            design,
            preview: None,
        }
    }

    pub fn record(&self) -> &ResumeRecord {
        self.form.record()
    }

    pub fn design(&self) -> &DesignChoice {
        &self.design
    }

    pub fn preview(&self) -> Option<&RenderedPreview> {
        self.preview.as_ref()
    }

    pub fn set_design(&mut self, design: DesignChoice) {
        self.design = design;
        self.refresh_preview();
    }

    pub fn mount_preview(&mut self) -> &RenderedPreview {
        let preview = self.render();
        self.preview.insert(preview)
    }

    pub fn gallery(&self) -> Vec<RenderedPreview> {
        PreviewComposer::render_gallery(self.form.record(), &self.design.accent)
    }

    pub fn set_field(&mut self, field: Field, value: impl Into<String>) -> Result<&ResumeRecord, FormError> {
        self.form.set_field(field, value)?;
        self.changed()
    }

    pub fn set_skills(&mut self, input: impl Into<String>) -> Result<&ResumeRecord, FormError> {
        self.form.set_skills(input)?;
        self.changed()
    }

    pub fn add_entry(&mut self, section: Section) -> Result<&ResumeRecord, FormError> {
        self.form.add_entry(section)?;
        self.changed()
    }

    pub fn remove_entry(&mut self, section: Section, index: usize) -> Result<&ResumeRecord, FormError> {
        self.form.remove_entry(section, index)?;
        self.changed()
    }

    pub fn update_entry(
        &mut self,
        section: Section,
        index: usize,
        field: &str,
        value: impl Into<String>,
    ) -> Result<&ResumeRecord, FormError> {
        self.form.update_entry(section, index, field, value)?;
        self.changed()
    }

    pub fn reset(&mut self) -> Result<&ResumeRecord, FormError> {
        self.form.reset()?;
        self.changed()
    }

    pub fn apply_section_enhancement(
        &mut self,
        target: SectionTarget,
        text: impl Into<String>,
    ) -> Result<&ResumeRecord, FormError> {
        info!("applying enhancement to {}", target.label());
        self.form.apply(Edit::ApplyEnhancement {
            target,
            text: text.into(),
        })?;
        self.changed()
    }

    pub fn apply_resume_enhancement(&mut self, enhanced: &EnhancedResume) -> Result<&ResumeRecord, FormError> {
        info!("applying whole-resume enhancement");
        self.form.apply(enhanced.to_edit())?;
        self.changed()
    }

    pub fn export_html(&self, dir: &Path) -> Result<PathBuf, ExportError> {
        export_as_downloadable_html(
            self.preview.as_ref(),
            &self.form.record().full_name,
            &self.design.accent,
            dir,
        )
    }

    pub fn print_preview(&self) -> Result<PrintPreview, ExportError> {
        export_as_print_preview(
            self.preview.as_ref(),
            &self.form.record().full_name,
            &self.design.accent,
        )
    }

    fn render(&self) -> RenderedPreview {
        PreviewComposer::render(self.form.record(), self.design.template, &self.design.accent)
    }

    fn changed(&mut self) -> Result<&ResumeRecord, FormError> {
        self.refresh_preview();
        Ok(self.form.record())
    }

    fn refresh_preview(&mut self) {
        if self.preview.is_some() {
            debug!("re-rendering mounted preview");
            self.preview = Some(self.render());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::design::TemplateName;
    use crate::store::kv::MemoryStore;
    use crate::store::persistence::DEFAULT_STORAGE_KEY;

    fn session() -> Session<MemoryStore> {
        Session::open(
            PersistenceShim::new(MemoryStore::default(), DEFAULT_STORAGE_KEY),
            DesignChoice::default(),
        )
    }

    #[test]
    fn test_export_before_preview_is_unavailable_and_record_untouched() {
        let session = session();
        let dir = tempfile::tempdir().unwrap();

        let err = session.export_html(dir.path()).unwrap_err();
        assert!(matches!(err, ExportError::Unavailable));
        assert!(matches!(session.print_preview(), Err(ExportError::Unavailable)));

        assert_eq!(*session.record(), ResumeRecord::seed());
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_mounted_preview_follows_edits_and_design() {
        let mut session = session();
        session.mount_preview();

        session.set_field(Field::FullName, "Jane Doe").unwrap();
        assert!(session.preview().unwrap().markup.contains("Jane Doe"));

        session.set_design(DesignChoice {
            template: TemplateName::Creative,
            accent: "teal".parse().unwrap(),
        });
        let preview = session.preview().unwrap();
        assert_eq!(preview.template, TemplateName::Creative);
        assert!(preview.markup.contains("#14b8a6"));
    }

    #[test]
    fn test_edits_are_persisted_as_they_happen() {
        let mut session = session();
        session.add_entry(Section::Education).unwrap();

        let saved = session.form.observer().load();
        assert_eq!(saved, *session.record());
        assert_eq!(saved.education.len(), 2);
    }

    #[test]
    fn test_export_writes_named_file() {
        let mut session = session();
        session.set_field(Field::FullName, "Jane Doe").unwrap();
        session.mount_preview();

        let dir = tempfile::tempdir().unwrap();
        let path = session.export_html(dir.path()).unwrap();
        assert!(path.ends_with("Jane_Doe_Resume.html"));
    }

    #[test]
    fn test_section_enhancement_replaces_only_target() {
        let mut session = session();
        session
            .apply_section_enhancement(SectionTarget::Experience(1), "- Rebuilt billing.")
            .unwrap();

        let record = session.record();
        assert_eq!(record.work_experience[1].description, "- Rebuilt billing.");
        assert_eq!(
            record.work_experience[0].description,
            ResumeRecord::seed().work_experience[0].description
        );

        let err = session
            .apply_section_enhancement(SectionTarget::Experience(9), "x")
            .unwrap_err();
        assert!(matches!(err, FormError::IndexOutOfRange { .. }));
    }

    #[test]
    fn test_resume_enhancement_for_removed_entry_is_ignored() {
        let mut session = session();
        let enhanced = EnhancedResume {
            professional_summary: "New summary.".to_string(),
            work_experience: vec![
                crate::chat::gateway::EnhancedDescription {
                    description: "first".to_string(),
                },
                crate::chat::gateway::EnhancedDescription {
                    description: "second".to_string(),
                },
            ],
            entry_ids: vec!["work1".to_string(), "work2".to_string()],
        };

        session.remove_entry(Section::WorkExperience, 0).unwrap();
        session.apply_resume_enhancement(&enhanced).unwrap();

        let record = session.record();
        assert_eq!(record.professional_summary, "New summary.");
        assert_eq!(record.work_experience.len(), 1);
        assert_eq!(record.work_experience[0].id, "work2");
        assert_eq!(record.work_experience[0].description, "second");
    }
}
