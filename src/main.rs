mod chat;
mod export;
mod form;
mod models;
mod preview;
mod scraper;
mod session;
mod store;
mod utils;

use std::path::Path;

use clap::Parser;
use colored::Colorize;
use eyre::{Result, eyre};
use log::{debug, info};

use crate::chat::gateway::EnhancementGateway;
use crate::chat::service::GeminiService;
use crate::export::document::{ExportDocument, ExportKind};
use crate::export::download::resume_file_stem;
use crate::export::print::{CommandPrinter, FontStylesheetProbe};
use crate::form::edit::SectionTarget;
use crate::models::design::{PALETTE, TemplateName};
use crate::models::resume::{ResumeRecord, description_lines};
use crate::scraper::job::get_job_description;
use crate::session::Session;
use crate::store::kv::FileStore;
use crate::store::persistence::PersistenceShim;
use crate::utils::cli::{Args, Command, DesignArgs, EnhanceTarget, ExportFormat};
use crate::utils::config::{Config, config};
use crate::utils::log::Logger;
use crate::utils::notify;

type FileSession = Session<FileStore>;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    Logger::init(args.verbosity);

    info!(
        "starting resume-studio {}",
        format!("v{}", env!("CARGO_PKG_VERSION")).magenta()
    );

    let config: Config = config(args.config)?;

    let shim = PersistenceShim::new(
        FileStore::new(config.storage.dir.clone()),
        config.storage.key.clone(),
    );
    let mut session = Session::open(shim, config.design.choice());

    match args.command {
        Command::Show => show(session.record()),
        Command::Set { field, value } => {
            session.set_field(field, value)?;
            notify::success("Resume updated.");
        }
        Command::Skills { skills } => {
            let record = session.set_skills(skills)?;
            notify::success(&format!("Saved {} skills.", record.skills.len()));
        }
        Command::Add { section } => {
            session.add_entry(section)?;
            notify::success(&format!("Added an empty {} entry.", section));
        }
        Command::Remove { section, position } => {
            session.remove_entry(section, position - 1)?;
            notify::success(&format!("Removed {} entry #{}.", section, position));
        }
        Command::Update {
            section,
            position,
            field,
            value,
        } => {
            session.update_entry(section, position - 1, &field, value)?;
            notify::success("Resume updated.");
        }
        Command::Reset { yes } => {
            if yes || notify::confirm("Replace your resume with the sample data?")? {
                session.reset()?;
                notify::success("Resume reset to sample data.");
            } else {
                notify::notice("Reset cancelled.");
            }
        }
        Command::Preview { design, output } => {
            session.set_design(design.choice(session.design()));
            session.mount_preview();

            if let Some(preview) = session.preview() {
                match output {
                    Some(path) => {
                        let document = ExportDocument::assemble(
                            &preview.markup,
                            &session.record().full_name,
                            &preview.accent,
                            ExportKind::Download,
                        );
                        tokio::fs::write(&path, document.html()).await?;
                        notify::success(&format!("Preview written to {}", path.display()));
                    }
                    None => println!("{}", preview.markup),
                }
            }
        }
        Command::Gallery { accent, dir } => {
            let design = DesignArgs {
                template: None,
                accent,
            };
            session.set_design(design.choice(session.design()));
            let dir = dir.unwrap_or_else(|| config.export.dir.clone());
            gallery(&session, &dir).await?;
        }
        Command::Templates => templates(),
        Command::Enhance {
            target,
            index,
            guidance,
            yes,
        } => {
            let target = match target {
                EnhanceTarget::Summary => SectionTarget::Summary,
                EnhanceTarget::Experience => SectionTarget::Experience(index - 1),
            };
            enhance(&mut session, &config, target, &guidance, yes).await?;
        }
        Command::EnhanceAll { yes } => enhance_all(&mut session, &config, yes).await?,
        Command::CoverLetter { job, output } => {
            let job_description = get_job_description(&job).await?;
            let gateway = gateway(&config)?;

            let letter = match gateway
                .generate_cover_letter(session.record(), &job_description)
                .await
            {
                Ok(letter) => letter,
                Err(e) => {
                    notify::failure(&e.user_message());
                    return Ok(());
                }
            };

            match output {
                Some(path) => {
                    tokio::fs::write(&path, &letter).await?;
                    notify::success(&format!("Cover letter written to {}", path.display()));
                }
                None => println!("{}", letter),
            }
        }
        Command::Export {
            format,
            design,
            dir,
        } => {
            session.set_design(design.choice(session.design()));
            session.mount_preview();
            let dir = dir.unwrap_or_else(|| config.export.dir.clone());

            match format {
                ExportFormat::Html => match session.export_html(&dir) {
                    Ok(path) => notify::success(&format!("Exported to {}", path.display())),
                    Err(e) => notify::failure(&e.to_string()),
                },
                ExportFormat::Pdf => export_pdf(&session, &config, &dir).await?,
            }
        }
    }

    Ok(())
}

fn gateway(config: &Config) -> Result<EnhancementGateway<GeminiService>> {
    let service = GeminiService::new(
        config.llm.resolved_api_key(),
        config.llm.model.clone(),
        config.llm.endpoint.clone(),
    )?;
    debug!("using {} for AI requests", service.model());

    Ok(EnhancementGateway::new(service))
}

async fn enhance(
    session: &mut FileSession,
    config: &Config,
    target: SectionTarget,
    guidance: &str,
    yes: bool,
) -> Result<()> {
    let label = target.label();
    let original = target
        .original_text(session.record())
        .ok_or_else(|| eyre!("there is no {}", label))?
        .to_string();

    let gateway = gateway(config)?;
    let suggestion = match gateway.enhance_section(&original, guidance, &label).await {
        Ok(text) => text,
        Err(e) => {
            notify::failure(&e.user_message());
            return Ok(());
        }
    };

    notify::comparison(&label, &original, &suggestion);

    if yes || notify::confirm("Apply this suggestion?")? {
        session.apply_section_enhancement(target, suggestion)?;
        notify::success(&format!("{} updated.", label));
    } else {
        notify::notice("Suggestion discarded.");
    }

    Ok(())
}

async fn enhance_all(session: &mut FileSession, config: &Config, yes: bool) -> Result<()> {
    let gateway = gateway(config)?;
    let enhanced = match gateway.enhance_whole_resume(session.record()).await {
        Ok(enhanced) => enhanced,
        Err(e) => {
            notify::failure(&e.user_message());
            return Ok(());
        }
    };

    let record = session.record();
    notify::comparison(
        &SectionTarget::Summary.label(),
        &record.professional_summary,
        &enhanced.professional_summary,
    );
    for (index, (exp, suggestion)) in record
        .work_experience
        .iter()
        .zip(&enhanced.work_experience)
        .enumerate()
    {
        notify::comparison(
            &SectionTarget::Experience(index).label(),
            &exp.description,
            &suggestion.description,
        );
    }
    if enhanced.unmatched() > 0 {
        notify::notice(&format!(
            "{} work experience entries had no suggestion and stay as they are.",
            enhanced.unmatched()
        ));
    }

    if yes || notify::confirm("Apply these suggestions?")? {
        session.apply_resume_enhancement(&enhanced)?;
        notify::success("Resume enhanced.");
    } else {
        notify::notice("Suggestions discarded.");
    }

    Ok(())
}

async fn export_pdf(session: &FileSession, config: &Config, dir: &Path) -> Result<()> {
    let mut print_preview = match session.print_preview() {
        Ok(print_preview) => print_preview,
        Err(e) => {
            notify::failure(&e.to_string());
            return Ok(());
        }
    };

    let probe = FontStylesheetProbe::new()?;
    if let Err(e) = print_preview
        .wait_until_ready(&probe, &config.export.readiness_policy())
        .await
    {
        notify::failure(&e.to_string());
        return Ok(());
    }

    debug!("print document ready ({} bytes)", print_preview.document().html().len());

    tokio::fs::create_dir_all(dir).await?;
    let output = dir.join(format!("{}.pdf", resume_file_stem(&session.record().full_name)));
    let printer = CommandPrinter::new(config.export.print_command.clone());

    match print_preview.print(&printer, &output).await {
        Ok(path) => notify::success(&format!("Printed to {}", path.display())),
        Err(e) => notify::failure(&e.to_string()),
    }

    Ok(())
}

async fn gallery(session: &FileSession, dir: &Path) -> Result<()> {
    tokio::fs::create_dir_all(dir).await?;

    let name = &session.record().full_name;
    for preview in session.gallery() {
        let document = ExportDocument::assemble(&preview.markup, name, &preview.accent, ExportKind::Download);
        let path = dir.join(format!("gallery-{}.html", preview.template));
        tokio::fs::write(&path, document.html()).await?;
        debug!("wrote {}", path.display());

        println!("{:<12} {}", preview.template.label().bold(), path.display());
    }

    Ok(())
}

fn templates() {
    println!("{}", "Templates".cyan().bold());
    for template in TemplateName::ALL {
        println!("  {:<12} {}", template.as_str(), template.label().dimmed());
    }

    println!("\n{}", "Accent palette".cyan().bold());
    for (name, hex) in PALETTE {
        println!("  {:<12} {}", name, hex);
    }
}

fn show(record: &ResumeRecord) {
    println!("{}", record.full_name.bold());
    for (label, value) in [
        ("email", &record.email),
        ("phone", &record.phone_number),
        ("linkedin", &record.linked_in),
        ("github", &record.github),
        ("website", &record.website),
    ] {
        if !value.is_empty() {
            println!("  {:<9} {}", label.dimmed(), value);
        }
    }

    println!("\n{}", SectionTarget::Summary.label().cyan().bold());
    println!("{}", record.professional_summary);

    if !record.skills.is_empty() {
        println!("\n{}", "Skills".cyan().bold());
        println!("{}", record.skills.join(", "));
    }

    println!("\n{}", "Work Experience".cyan().bold());
    for (i, exp) in record.work_experience.iter().enumerate() {
        println!(
            "{}. {} at {} ({} - {})",
            i + 1,
            exp.job_title.bold(),
            exp.company,
            exp.start_date,
            exp.end_date
        );
        for line in description_lines(&exp.description) {
            println!("   • {}", line);
        }
    }

    println!("\n{}", "Education".cyan().bold());
    for (i, edu) in record.education.iter().enumerate() {
        println!("{}. {}, {} ({})", i + 1, edu.degree.bold(), edu.school, edu.grad_date);
    }
}
