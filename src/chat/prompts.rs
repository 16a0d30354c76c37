use serde_json::{Value, json};

use crate::models::resume::ResumeRecord;

const ENHANCE_SECTION_TEMPLATE: &str = include_str!("enhance_section.txt");
const ENHANCE_RESUME_TEMPLATE: &str = include_str!("enhance_resume.txt");
const COVER_LETTER_TEMPLATE: &str = include_str!("cover_letter.txt");

pub fn enhance_section(original_text: &str, guidance: &str, section_label: &str) -> String {
    let guidance = match guidance.trim() {
        "" => String::new(),
        guidance => format!("Additional guidance from the candidate: \"{}\"", guidance),
    };

    ENHANCE_SECTION_TEMPLATE
        .replace("{section_label}", section_label)
        .replace("{guidance}", &guidance)
        .replace("{original_text}", original_text)
}

pub fn enhance_resume(record: &ResumeRecord) -> String {
    let work_experience = record
        .work_experience
        .iter()
        .enumerate()
        .map(|(i, exp)| {
            format!(
                "  - Job {n}: {} at {}\n  - Current Description {n}: \"{}\"",
                exp.job_title,
                exp.company,
                exp.description,
                n = i + 1
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    ENHANCE_RESUME_TEMPLATE
        .replace("{professional_summary}", &record.professional_summary)
        .replace("{work_experience}", &work_experience)
}

pub fn cover_letter(record: &ResumeRecord, job_description: &str) -> String {
    let recent_job = record
        .work_experience
        .first()
        .map(|exp| format!("{} at {}", exp.job_title, exp.company))
        .unwrap_or_else(|| "No recent job listed".to_string());

    let highlights = record
        .work_experience
        .iter()
        .map(|exp| format!("- {} at {}:\n{}", exp.job_title, exp.company, exp.description))
        .collect::<Vec<_>>()
        .join("\n\n");

    COVER_LETTER_TEMPLATE
        .replace("{candidate_name}", &record.full_name)
        .replace("{recent_job}", &recent_job)
        .replace("{skills}", &record.skills.join(", "))
        .replace("{professional_summary}", &record.professional_summary)
        .replace("{experience_highlights}", &highlights)
        .replace("{job_description}", job_description)
}

pub fn enhanced_text_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "enhancedText": {
                "type": "string",
                "description": "The rewritten section text."
            }
        },
        "required": ["enhancedText"]
    })
}

pub fn enhanced_resume_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "professionalSummary": {
                "type": "string",
                "description": "An enhanced, professional summary (3-5 sentences)."
            },
            "workExperience": {
                "type": "array",
                "description": "An array of enhanced work experience descriptions.",
                "items": {
                    "type": "object",
                    "properties": {
                        "description": {
                            "type": "string",
                            "description": "An enhanced, achievement-oriented description for a single job, using bullet points starting with strong action verbs."
                        }
                    },
                    "required": ["description"]
                }
            }
        },
        "required": ["professionalSummary", "workExperience"]
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enhance_section_embeds_label_text_and_guidance() {
        let prompt = enhance_section("Built stuff.", "make it quantify impact", "Work Experience");
        assert!(prompt.contains("\"Work Experience\" section"));
        assert!(prompt.contains("\"Built stuff.\""));
        assert!(prompt.contains("make it quantify impact"));
        assert!(!prompt.contains("{section_label}"));
    }

    #[test]
    fn test_enhance_section_without_guidance_drops_placeholder() {
        let prompt = enhance_section("Built stuff.", "   ", "Professional Summary");
        assert!(!prompt.contains("{guidance}"));
        assert!(!prompt.contains("Additional guidance"));
    }

    #[test]
    fn test_enhance_resume_lists_every_job_in_order() {
        let prompt = enhance_resume(&ResumeRecord::seed());
        let first = prompt.find("Job 1: Senior Software Engineer at Innovate Solutions Inc.").unwrap();
        let second = prompt.find("Job 2: Software Engineer at Tech Forward LLC").unwrap();
        assert!(first < second);
    }

    #[test]
    fn test_cover_letter_handles_empty_history() {
        let mut record = ResumeRecord::seed();
        record.work_experience.clear();
        let prompt = cover_letter(&record, "Rust engineer at Ferrous Co.");
        assert!(prompt.contains("Most Recent Job: No recent job listed"));
        assert!(prompt.contains("\"Rust engineer at Ferrous Co.\""));
    }
}
