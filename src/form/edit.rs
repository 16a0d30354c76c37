use std::str::FromStr;

use chrono::Utc;
use thiserror::Error;

use crate::models::resume::{Education, EntryId, ResumeRecord, WorkExperience};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormError {
    #[error("unknown field '{0}'")]
    UnknownField(String),

    #[error("unknown section '{0}' (expected work-experience or education)")]
    UnknownSection(String),

    #[error("{section} has no entry #{}", .index + 1)]
    IndexOutOfRange { section: Section, index: usize },

    #[error("field '{field}' does not belong to {section}")]
    FieldNotInSection { section: Section, field: String },
}

/// Scalar fields of the resume record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    FullName,
    Email,
    PhoneNumber,
    LinkedIn,
    Github,
    Website,
    ProfessionalSummary,
}

impl FromStr for Field {
    type Err = FormError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "fullname" | "name" => Ok(Field::FullName),
            "email" => Ok(Field::Email),
            "phonenumber" | "phone" => Ok(Field::PhoneNumber),
            "linkedin" => Ok(Field::LinkedIn),
            "github" => Ok(Field::Github),
            "website" | "site" => Ok(Field::Website),
            "professionalsummary" | "summary" => Ok(Field::ProfessionalSummary),
            _ => Err(FormError::UnknownField(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    WorkExperience,
    Education,
}

impl Section {
    fn id_prefix(&self) -> &'static str {
        match self {
            Section::WorkExperience => "work",
            Section::Education => "edu",
        }
    }
}

impl std::fmt::Display for Section {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Section::WorkExperience => f.write_str("work experience"),
            Section::Education => f.write_str("education"),
        }
    }
}

impl FromStr for Section {
    type Err = FormError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "workexperience" | "experience" | "work" => Ok(Section::WorkExperience),
            "education" | "edu" => Ok(Section::Education),
            _ => Err(FormError::UnknownSection(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExperienceField {
    JobTitle,
    Company,
    StartDate,
    EndDate,
    Description,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EducationField {
    Degree,
    School,
    GradDate,
}

/// A field inside a list entry, already checked against its section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryField {
    Experience(ExperienceField),
    Education(EducationField),
}

impl EntryField {
    pub fn parse(section: Section, name: &str) -> Result<Self, FormError> {
        let field = match (section, normalize(name).as_str()) {
            (Section::WorkExperience, "jobtitle" | "title") => {
                EntryField::Experience(ExperienceField::JobTitle)
            }
            (Section::WorkExperience, "company") => EntryField::Experience(ExperienceField::Company),
            (Section::WorkExperience, "startdate" | "start") => {
                EntryField::Experience(ExperienceField::StartDate)
            }
            (Section::WorkExperience, "enddate" | "end") => {
                EntryField::Experience(ExperienceField::EndDate)
            }
            (Section::WorkExperience, "description") => {
                EntryField::Experience(ExperienceField::Description)
            }
            (Section::Education, "degree") => EntryField::Education(EducationField::Degree),
            (Section::Education, "school") => EntryField::Education(EducationField::School),
            (Section::Education, "graddate" | "date") => {
                EntryField::Education(EducationField::GradDate)
            }
            _ => {
                return Err(FormError::FieldNotInSection {
                    section,
                    field: name.to_string(),
                });
            }
        };
        Ok(field)
    }

    fn section(&self) -> Section {
        match self {
            EntryField::Experience(_) => Section::WorkExperience,
            EntryField::Education(_) => Section::Education,
        }
    }
}

/// What an AI enhancement replaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionTarget {
    Summary,
    Experience(usize),
}

impl SectionTarget {
    pub fn label(&self) -> String {
        match self {
            SectionTarget::Summary => "Professional Summary".to_string(),
            SectionTarget::Experience(index) => format!("Work Experience #{}", index + 1),
        }
    }

    pub fn original_text<'a>(&self, record: &'a ResumeRecord) -> Option<&'a str> {
        match self {
            SectionTarget::Summary => Some(record.professional_summary.as_str()),
            SectionTarget::Experience(index) => record
                .work_experience
                .get(*index)
                .map(|exp| exp.description.as_str()),
        }
    }
}

/// Hands out entry ids of the form `work<millis>` / `edu<millis>`. Ids are
/// strictly increasing, so a deleted id is never handed out again.
#[derive(Debug, Default)]
pub struct IdGenerator {
    last: i64,
}

impl IdGenerator {
    pub fn next(&mut self, section: Section, record: &ResumeRecord) -> EntryId {
        let mut stamp = Utc::now().timestamp_millis().max(self.last + 1);
        loop {
            let id = format!("{}{}", section.id_prefix(), stamp);
            if !record.contains_id(&id) {
                self.last = stamp;
                return id;
            }
            stamp += 1;
        }
    }
}

/// A single form operation. Applying an edit builds a new record and leaves
/// the input untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Edit {
    SetField { field: Field, value: String },
    SetSkills(String),
    AddEntry(Section),
    RemoveEntry { section: Section, index: usize },
    UpdateEntry { index: usize, field: EntryField, value: String },
    ApplyEnhancement { target: SectionTarget, text: String },
    /// Whole-resume enhancement; descriptions are keyed by entry id and
    /// entries missing from the list keep their text.
    ApplyResumeEnhancement { summary: String, descriptions: Vec<(EntryId, String)> },
    Reset,
}

impl Edit {
    pub fn apply(&self, record: &ResumeRecord, ids: &mut IdGenerator) -> Result<ResumeRecord, FormError> {
        let mut next = record.clone();

        match self {
            Edit::SetField { field, value } => {
                let slot = match field {
                    Field::FullName => &mut next.full_name,
                    Field::Email => &mut next.email,
                    Field::PhoneNumber => &mut next.phone_number,
                    Field::LinkedIn => &mut next.linked_in,
                    Field::Github => &mut next.github,
                    Field::Website => &mut next.website,
                    Field::ProfessionalSummary => &mut next.professional_summary,
                };
                *slot = value.clone();
            }
            Edit::SetSkills(input) => next.skills = parse_skills(input),
            Edit::AddEntry(Section::WorkExperience) => {
                let id = ids.next(Section::WorkExperience, record);
                next.work_experience.push(WorkExperience::empty(id));
            }
            Edit::AddEntry(Section::Education) => {
                let id = ids.next(Section::Education, record);
                next.education.push(Education::empty(id));
            }
            Edit::RemoveEntry { section, index } => {
                check_index(record, *section, *index)?;
                match section {
                    Section::WorkExperience => {
                        next.work_experience.remove(*index);
                    }
                    Section::Education => {
                        next.education.remove(*index);
                    }
                }
            }
            Edit::UpdateEntry { index, field, value } => {
                check_index(record, field.section(), *index)?;
                let value = value.clone();
                match field {
                    EntryField::Experience(field) => {
                        let exp = &mut next.work_experience[*index];
                        match field {
                            ExperienceField::JobTitle => exp.job_title = value,
                            ExperienceField::Company => exp.company = value,
                            ExperienceField::StartDate => exp.start_date = value,
                            ExperienceField::EndDate => exp.end_date = value,
                            ExperienceField::Description => exp.description = value,
                        }
                    }
                    EntryField::Education(field) => {
                        let edu = &mut next.education[*index];
                        match field {
                            EducationField::Degree => edu.degree = value,
                            EducationField::School => edu.school = value,
                            EducationField::GradDate => edu.grad_date = value,
                        }
                    }
                }
            }
            Edit::ApplyEnhancement { target, text } => match target {
                SectionTarget::Summary => next.professional_summary = text.clone(),
                SectionTarget::Experience(index) => {
                    check_index(record, Section::WorkExperience, *index)?;
                    next.work_experience[*index].description = text.clone();
                }
            },
            Edit::ApplyResumeEnhancement { summary, descriptions } => {
                next.professional_summary = summary.clone();
                for exp in next.work_experience.iter_mut() {
                    if let Some((_, text)) = descriptions.iter().find(|(id, _)| *id == exp.id) {
                        exp.description = text.clone();
                    }
                }
            }
            Edit::Reset => next = ResumeRecord::seed(),
        }

        Ok(next)
    }
}

/// Parses comma-separated skill input: split, trim, drop empty tokens.
/// Commas inside a skill cannot be escaped.
pub fn parse_skills(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|skill| !skill.is_empty())
        .map(String::from)
        .collect()
}

fn check_index(record: &ResumeRecord, section: Section, index: usize) -> Result<(), FormError> {
    let len = match section {
        Section::WorkExperience => record.work_experience.len(),
        Section::Education => record.education.len(),
    };
    if index < len {
        Ok(())
    } else {
        Err(FormError::IndexOutOfRange { section, index })
    }
}

fn normalize(name: &str) -> String {
    name.chars()
        .filter(|c| !matches!(c, '-' | '_' | ' '))
        .flat_map(char::to_lowercase)
        .collect()
}
