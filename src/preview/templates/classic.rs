use crate::models::design::AccentColor;
use crate::models::resume::ResumeRecord;
use crate::preview::html::{
    LINK_ICON, MAIL_ICON, PHONE_ICON, bullets, escape, external_href, link, mailto, root, tel,
};

const CONTACT_CLASS: &str = "flex items-center space-x-2 text-slate-700 hover:text-[--accent-color] transition-colors";

fn section(title: &str, body: &str) -> String {
    format!(
        "<div class=\"mt-6\"><h2 class=\"text-lg md:text-xl font-bold text-[--accent-color] border-b-2 border-slate-200 pb-1 mb-3 font-serif\">{}</h2>{}</div>",
        title, body
    )
}

pub fn render(record: &ResumeRecord, accent: &AccentColor) -> String {
    let mut contacts = String::new();
    contacts.push_str(&link(&mailto(&record.email), &record.email, Some(MAIL_ICON), CONTACT_CLASS));
    contacts.push_str(&link(&tel(&record.phone_number), &record.phone_number, Some(PHONE_ICON), CONTACT_CLASS));
    for profile in [&record.linked_in, &record.github, &record.website] {
        contacts.push_str(&link(&external_href(profile), profile, Some(LINK_ICON), CONTACT_CLASS));
    }

    let mut body = format!(
        "<header class=\"text-center mb-6 md:mb-8\"><h1 class=\"text-3xl sm:text-4xl font-bold text-slate-800 tracking-tight\">{}</h1><div class=\"mt-3 flex justify-center items-center flex-wrap gap-x-4 gap-y-2 text-xs sm:text-sm\">{}</div></header><main>",
        escape(&record.full_name),
        contacts
    );

    body.push_str(&section(
        "Professional Summary",
        &format!(
            "<p class=\"text-slate-700 leading-relaxed text-sm md:text-base\">{}</p>",
            escape(&record.professional_summary)
        ),
    ));

    if !record.skills.is_empty() {
        let chips: String = record
            .skills
            .iter()
            .map(|skill| {
                format!(
                    "<span class=\"bg-slate-100 text-slate-700 text-xs sm:text-sm font-medium px-3 py-1 rounded-full\">{}</span>",
                    escape(skill)
                )
            })
            .collect();
        body.push_str(&section(
            "Core Competencies",
            &format!("<div class=\"flex flex-wrap gap-2\">{}</div>", chips),
        ));
    }

    if !record.work_experience.is_empty() {
        let entries: String = record
            .work_experience
            .iter()
            .map(|exp| {
                format!(
                    "<div data-entry=\"{}\" class=\"mb-5 last:mb-0\"><div class=\"flex flex-col sm:flex-row sm:justify-between sm:items-baseline\"><h3 class=\"text-md md:text-lg font-bold text-slate-800\">{}</h3><p class=\"text-xs sm:text-sm font-medium text-slate-600\">{} - {}</p></div><h4 class=\"text-sm md:text-md font-semibold text-slate-600 mb-2\">{}</h4><ul class=\"pl-4 text-sm md:text-base space-y-1\">{}</ul></div>",
                    escape(&exp.id),
                    escape(&exp.job_title),
                    escape(&exp.start_date),
                    escape(&exp.end_date),
                    escape(&exp.company),
                    bullets(&exp.description, "text-slate-700 mb-1 list-disc list-inside")
                )
            })
            .collect();
        body.push_str(&section("Professional Experience", &entries));
    }

    if !record.education.is_empty() {
        let entries: String = record
            .education
            .iter()
            .map(|edu| {
                format!(
                    "<div data-entry=\"{}\" class=\"flex flex-col sm:flex-row sm:justify-between sm:items-baseline mb-2 last:mb-0\"><div><h3 class=\"text-md md:text-lg font-bold text-slate-800\">{}</h3><p class=\"text-sm md:text-md text-slate-600\">{}</p></div><p class=\"text-xs sm:text-sm font-medium text-slate-600\">{}</p></div>",
                    escape(&edu.id),
                    escape(&edu.degree),
                    escape(&edu.school),
                    escape(&edu.grad_date)
                )
            })
            .collect();
        body.push_str(&section("Education", &entries));
    }

    body.push_str("</main>");

    root(
        "classic",
        "w-[210mm] min-h-[297mm] bg-white p-6 md:p-8 lg:p-12 shadow-2xl rounded-lg border border-slate-200 font-serif",
        accent,
        &body,
    )
}
