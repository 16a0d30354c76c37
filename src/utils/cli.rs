use std::path::PathBuf;

use clap::builder::RangedU64ValueParser;
use clap::{Args as ClapArgs, Parser, Subcommand, ValueEnum};
use log::{LevelFilter, warn};

use crate::form::edit::{Field, Section};
use crate::models::design::{AccentColor, DesignChoice, TemplateName};

#[derive(Parser, Debug)]
#[command(name = "resume-studio")]
#[command(about = "Edit, preview, enhance and export a resume from the terminal", long_about = None)]
pub struct Args {
    /// Path to the configuration file
    #[arg(short, long, value_name = "FILE", default_value = "config.toml", global = true)]
    pub config: PathBuf,

    /// Sets the logger's verbosity level
    #[arg(short, long, value_name = "VERBOSITY", default_value_t = LevelFilter::Info, global = true)]
    pub verbosity: LevelFilter,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the saved resume
    Show,

    /// Set a top-level field (full-name, email, phone, linkedin, github, website, summary)
    Set { field: Field, value: String },

    /// Replace the skill list with comma-separated input
    Skills { skills: String },

    /// Append an empty entry to a section
    Add { section: Section },

    /// Remove the entry at a 1-based position
    Remove {
        section: Section,
        #[arg(value_parser = RangedU64ValueParser::<usize>::new().range(1..))]
        position: usize,
    },

    /// Update one field of the entry at a 1-based position
    Update {
        section: Section,
        #[arg(value_parser = RangedU64ValueParser::<usize>::new().range(1..))]
        position: usize,
        field: String,
        value: String,
    },

    /// Replace the resume with the sample data
    Reset {
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Render the resume with a template
    Preview {
        #[command(flatten)]
        design: DesignArgs,

        /// Write the markup here instead of stdout
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Render every template side by side
    Gallery {
        /// Accent color (#rrggbb or palette name)
        #[arg(short, long)]
        accent: Option<AccentColor>,

        /// Directory for the rendered pages
        #[arg(short, long, value_name = "DIR")]
        dir: Option<PathBuf>,
    },

    /// List templates and accent palette
    Templates,

    /// Ask the AI to rewrite one section
    Enhance {
        target: EnhanceTarget,

        /// 1-based work experience position
        #[arg(short, long, default_value_t = 1, value_parser = RangedU64ValueParser::<usize>::new().range(1..))]
        index: usize,

        /// Extra instructions for the rewrite
        #[arg(short, long, default_value = "")]
        guidance: String,

        /// Apply without asking
        #[arg(short, long)]
        yes: bool,
    },

    /// Ask the AI to rewrite the summary and every work experience
    EnhanceAll {
        /// Apply without asking
        #[arg(short, long)]
        yes: bool,
    },

    /// Draft a cover letter for a job description
    CoverLetter {
        #[command(flatten)]
        job: JobSource,

        /// Write the letter here instead of stdout
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Export the rendered resume
    Export {
        format: ExportFormat,

        #[command(flatten)]
        design: DesignArgs,

        /// Output directory
        #[arg(short, long, value_name = "DIR")]
        dir: Option<PathBuf>,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum EnhanceTarget {
    Summary,
    Experience,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExportFormat {
    Html,
    Pdf,
}

#[derive(ClapArgs, Debug, Clone, Default)]
pub struct DesignArgs {
    /// Template name; unknown names fall back to classic
    #[arg(short, long)]
    pub template: Option<String>,

    /// Accent color (#rrggbb or palette name)
    #[arg(short, long)]
    pub accent: Option<AccentColor>,
}

impl DesignArgs {
    pub fn choice(&self, defaults: &DesignChoice) -> DesignChoice {
        let template = match &self.template {
            Some(name) => {
                if name.parse::<TemplateName>().is_err() {
                    warn!("unknown template '{}', using classic", name);
                }
                TemplateName::resolve(name)
            }
            None => defaults.template,
        };

        DesignChoice {
            template,
            accent: self.accent.clone().unwrap_or_else(|| defaults.accent.clone()),
        }
    }
}

#[derive(ClapArgs, Debug, Clone)]
#[group(required = true, multiple = false)]
pub struct JobSource {
    /// Path to file containing job description
    #[arg(long, value_name = "FILE")]
    pub job_file: Option<PathBuf>,

    /// URL to the job posting
    #[arg(long, value_name = "URL")]
    pub job_url: Option<String>,

    /// Job description text
    #[arg(long, value_name = "TEXT")]
    pub job_text: Option<String>,
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition_is_consistent() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_parses_typed_edit_targets() {
        let args = Args::try_parse_from(["resume-studio", "set", "full-name", "Jane Doe"]).unwrap();
        match args.command {
            Command::Set { field, value } => {
                assert_eq!(field, Field::FullName);
                assert_eq!(value, "Jane Doe");
            }
            other => panic!("unexpected command: {:?}", other),
        }

        assert!(Args::try_parse_from(["resume-studio", "set", "shoe-size", "9"]).is_err());
        assert!(Args::try_parse_from(["resume-studio", "remove", "education", "0"]).is_err());
    }

    #[test]
    fn test_cover_letter_needs_exactly_one_source() {
        assert!(Args::try_parse_from(["resume-studio", "cover-letter"]).is_err());
        assert!(
            Args::try_parse_from(["resume-studio", "cover-letter", "--job-text", "a", "--job-url", "http://x"])
                .is_err()
        );
        assert!(Args::try_parse_from(["resume-studio", "cover-letter", "--job-text", "Rust role"]).is_ok());
    }

    #[test]
    fn test_design_args_fall_back_to_defaults_and_classic() {
        let defaults = DesignChoice {
            template: TemplateName::Modern,
            accent: "rose".parse().unwrap(),
        };

        assert_eq!(DesignArgs::default().choice(&defaults), defaults);

        let args = DesignArgs {
            template: Some("holographic".to_string()),
            accent: None,
        };
        assert_eq!(args.choice(&defaults).template, TemplateName::Classic);
    }
}
