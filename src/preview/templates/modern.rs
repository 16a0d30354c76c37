use crate::models::design::AccentColor;
use crate::models::resume::ResumeRecord;
use crate::preview::html::{
    LINK_ICON, MAIL_ICON, PHONE_ICON, bullets, escape, external_href, link, mailto, root, tel,
};

const SIDEBAR_LINK: &str = "flex items-center gap-2 text-white/90 hover:text-white";

fn sidebar_section(title: &str, body: &str) -> String {
    format!(
        "<section class=\"mt-8\"><h3 class=\"text-xs font-bold uppercase tracking-widest text-white/70 mb-3\">{}</h3>{}</section>",
        title, body
    )
}

fn main_section(title: &str, body: &str) -> String {
    format!(
        "<section class=\"mb-8\"><h2 class=\"text-xl font-bold text-[--accent-color] uppercase tracking-wide mb-4\">{}</h2>{}</section>",
        title, body
    )
}

/// Two-column layout: an accent-filled sidebar with contact details, skills
/// and education next to the summary and experience.
pub fn render(record: &ResumeRecord, accent: &AccentColor) -> String {
    let mut sidebar = format!(
        "<aside class=\"w-full md:w-1/3 bg-[--accent-color] text-white p-6 md:p-8\"><h1 class=\"text-3xl font-bold leading-tight\">{}</h1>",
        escape(&record.full_name)
    );
    if let Some(headline) = record.headline() {
        sidebar.push_str(&format!(
            "<p class=\"mt-2 text-white/80 font-medium\">{}</p>",
            escape(headline)
        ));
    }

    let mut contacts = String::new();
    contacts.push_str(&link(&mailto(&record.email), &record.email, Some(MAIL_ICON), SIDEBAR_LINK));
    contacts.push_str(&link(&tel(&record.phone_number), &record.phone_number, Some(PHONE_ICON), SIDEBAR_LINK));
    for profile in [&record.linked_in, &record.github, &record.website] {
        contacts.push_str(&link(&external_href(profile), profile, Some(LINK_ICON), SIDEBAR_LINK));
    }
    sidebar.push_str(&sidebar_section(
        "Contact",
        &format!("<div class=\"space-y-2 text-sm\">{}</div>", contacts),
    ));

    if !record.skills.is_empty() {
        let chips: String = record
            .skills
            .iter()
            .map(|skill| {
                format!(
                    "<span class=\"bg-white/20 text-white text-xs font-medium px-2 py-1 rounded\">{}</span>",
                    escape(skill)
                )
            })
            .collect();
        sidebar.push_str(&sidebar_section(
            "Skills",
            &format!("<div class=\"flex flex-wrap gap-2\">{}</div>", chips),
        ));
    }

    if !record.education.is_empty() {
        let entries: String = record
            .education
            .iter()
            .map(|edu| {
                format!(
                    "<div data-entry=\"{}\" class=\"mb-3 last:mb-0 text-sm\"><h4 class=\"font-bold\">{}</h4><p class=\"text-white/80\">{}</p><p class=\"text-white/60 text-xs\">{}</p></div>",
                    escape(&edu.id),
                    escape(&edu.degree),
                    escape(&edu.school),
                    escape(&edu.grad_date)
                )
            })
            .collect();
        sidebar.push_str(&sidebar_section("Education", &entries));
    }
    sidebar.push_str("</aside>");

    let mut main = String::from("<main class=\"w-full md:w-2/3 p-6 md:p-8\">");
    main.push_str(&main_section(
        "Profile",
        &format!(
            "<p class=\"text-slate-700 leading-relaxed text-sm md:text-base\">{}</p>",
            escape(&record.professional_summary)
        ),
    ));

    if !record.work_experience.is_empty() {
        let entries: String = record
            .work_experience
            .iter()
            .map(|exp| {
                format!(
                    "<div data-entry=\"{}\" class=\"mb-6 last:mb-0\"><h3 class=\"text-lg font-bold text-slate-800\">{}</h3><div class=\"flex justify-between items-baseline text-sm\"><span class=\"font-semibold text-[--accent-color]\">{}</span><span class=\"text-slate-500\">{} - {}</span></div><ul class=\"mt-2 pl-4 text-sm space-y-1 list-disc list-outside\">{}</ul></div>",
                    escape(&exp.id),
                    escape(&exp.job_title),
                    escape(&exp.company),
                    escape(&exp.start_date),
                    escape(&exp.end_date),
                    bullets(&exp.description, "text-slate-700")
                )
            })
            .collect();
        main.push_str(&main_section("Experience", &entries));
    }
    main.push_str("</main>");

    root(
        "modern",
        "w-[210mm] min-h-[297mm] bg-white shadow-2xl rounded-lg border border-slate-200 font-sans flex flex-col md:flex-row overflow-hidden",
        accent,
        &format!("{}{}", sidebar, main),
    )
}
