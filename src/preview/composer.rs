use log::debug;
use rayon::prelude::*;

use crate::models::design::{AccentColor, TemplateName};
use crate::models::resume::ResumeRecord;
use crate::preview::templates::{classic, creative, executive, minimalist, modern};

/// A rendered template. `markup` is the outer HTML of the preview root, which
/// is all the export pipeline ever sees of the preview.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedPreview {
    pub template: TemplateName,
    pub accent: AccentColor,
    pub markup: String,
}

pub struct PreviewComposer;

impl PreviewComposer {
    /// Names coming from the user go through [`TemplateName::resolve`] first,
    /// so an unrecognized name lands here as the baseline template.
    pub fn render(record: &ResumeRecord, template: TemplateName, accent: &AccentColor) -> RenderedPreview {
        let markup = match template {
            TemplateName::Classic => classic::render(record, accent),
            TemplateName::Modern => modern::render(record, accent),
            TemplateName::Executive => executive::render(record, accent),
            TemplateName::Creative => creative::render(record, accent),
            TemplateName::Minimalist => minimalist::render(record, accent),
        };
        debug!("rendered {} template ({} bytes)", template, markup.len());

        RenderedPreview {
            template,
            accent: accent.clone(),
            markup,
        }
    }

    /// Renders every template at once, in picker order.
    pub fn render_gallery(record: &ResumeRecord, accent: &AccentColor) -> Vec<RenderedPreview> {
        TemplateName::ALL
            .par_iter()
            .map(|template| Self::render(record, *template, accent))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn accent() -> AccentColor {
        "#f43f5e".parse().unwrap()
    }

    #[test]
    fn test_unknown_template_name_uses_classic() {
        let record = ResumeRecord::seed();
        let preview = PreviewComposer::render(&record, TemplateName::resolve("holographic"), &accent());
        assert_eq!(preview.template, TemplateName::Classic);
        assert!(preview.markup.starts_with("<div data-template=\"classic\""));
    }

    #[test]
    fn test_switching_templates_never_mutates_record() {
        let record = ResumeRecord::seed();
        for template in TemplateName::ALL {
            PreviewComposer::render(&record, template, &accent());
            assert_eq!(record, ResumeRecord::seed());
        }
    }

    #[test]
    fn test_accent_only_flows_through_custom_property() {
        let record = ResumeRecord::seed();
        for preview in PreviewComposer::render_gallery(&record, &accent()) {
            assert_eq!(
                preview.markup.matches("#f43f5e").count(),
                2,
                "{} should mention the accent only on its root",
                preview.template
            );
            assert!(preview.markup.contains("--accent-color: #f43f5e;"));
        }
    }

    #[test]
    fn test_gallery_renders_every_template_in_order() {
        let gallery = PreviewComposer::render_gallery(&ResumeRecord::seed(), &accent());
        let order: Vec<_> = gallery.iter().map(|p| p.template).collect();
        assert_eq!(order, TemplateName::ALL.to_vec());
    }

    #[test]
    fn test_user_text_is_escaped_and_markers_stripped() {
        let mut record = ResumeRecord::seed();
        record.full_name = "<script>Eve</script>".to_string();
        record.work_experience[0].description = "- Cut costs by 20% & more".to_string();

        let preview = PreviewComposer::render(&record, TemplateName::Executive, &accent());

        assert!(!preview.markup.contains("<script>"));
        assert!(preview.markup.contains("&lt;script&gt;Eve&lt;/script&gt;"));
        assert!(preview.markup.contains(">Cut costs by 20% &amp; more</li>"));
    }

    #[test]
    fn test_empty_sections_are_omitted() {
        let mut record = ResumeRecord::seed();
        record.skills.clear();
        record.education.clear();

        let preview = PreviewComposer::render(&record, TemplateName::Classic, &accent());

        assert!(!preview.markup.contains("Core Competencies"));
        assert!(!preview.markup.contains(">Education<"));
        assert!(preview.markup.contains("Professional Experience"));
    }
}
