use crate::models::design::AccentColor;
use crate::models::resume::ResumeRecord;
use crate::preview::html::{
    LINK_ICON, MAIL_ICON, PHONE_ICON, bullets, escape, external_href, link, mailto, root, tel,
};

const CONTACT_CLASS: &str = "flex items-center gap-2 hover:text-[--accent-color]";

fn section(title: &str, body: &str) -> String {
    format!(
        "<section class=\"mt-8\"><h2 class=\"text-sm font-bold uppercase tracking-widest text-[--accent-color] pb-2 text-center\">{}</h2><div class=\"mt-4\">{}</div></section>",
        title, body
    )
}

/// Centered layout with a monogram badge and a timeline of experience.
pub fn render(record: &ResumeRecord, accent: &AccentColor) -> String {
    let initial = record
        .full_name
        .chars()
        .next()
        .map(|c| escape(&c.to_string()))
        .unwrap_or_default();

    let mut contacts = String::new();
    contacts.push_str(&link(&mailto(&record.email), &record.email, Some(MAIL_ICON), CONTACT_CLASS));
    contacts.push_str(&link(&tel(&record.phone_number), &record.phone_number, Some(PHONE_ICON), CONTACT_CLASS));
    contacts.push_str(&link(&external_href(&record.website), &record.website, Some(LINK_ICON), CONTACT_CLASS));

    let mut body = format!(
        "<header class=\"text-center\"><div class=\"w-20 h-20 sm:w-24 sm:h-24 rounded-full bg-[--accent-color-light] mx-auto flex items-center justify-center\"><span class=\"text-3xl sm:text-4xl font-bold text-[--accent-color]\">{}</span></div><h1 class=\"text-3xl sm:text-4xl font-bold text-slate-800 tracking-tight mt-4\">{}</h1><h2 class=\"text-md sm:text-lg text-slate-500 font-medium mt-1\">{}</h2><div class=\"mt-4 flex justify-center items-center flex-wrap flex-col sm:flex-row gap-x-6 gap-y-2 text-xs sm:text-sm text-slate-600\">{}</div></header><main>",
        initial,
        escape(&record.full_name),
        escape(record.headline().unwrap_or_default()),
        contacts
    );

    body.push_str(&section(
        "About Me",
        &format!(
            "<p class=\"text-slate-700 leading-relaxed text-center max-w-2xl mx-auto text-sm sm:text-base\">{}</p>",
            escape(&record.professional_summary)
        ),
    ));

    if !record.skills.is_empty() {
        let chips: String = record
            .skills
            .iter()
            .map(|skill| {
                format!(
                    "<span class=\"bg-slate-100 text-slate-700 text-xs sm:text-sm font-medium px-3 py-2 sm:px-4 rounded-full\">{}</span>",
                    escape(skill)
                )
            })
            .collect();
        body.push_str(&section(
            "Skills",
            &format!("<div class=\"flex flex-wrap gap-2 sm:gap-3 justify-center\">{}</div>", chips),
        ));
    }

    if !record.work_experience.is_empty() {
        let entries: String = record
            .work_experience
            .iter()
            .map(|exp| {
                format!(
                    "<div data-entry=\"{}\" class=\"mb-8 last:mb-0 pl-8 relative\"><div class=\"absolute -left-[11px] top-1 w-5 h-5 bg-white border-2 border-[--accent-color] rounded-full\"></div><p class=\"text-xs sm:text-sm font-medium text-slate-500\">{} - {}</p><h3 class=\"text-md sm:text-lg font-bold text-slate-800 mt-1\">{}</h3><h4 class=\"text-sm sm:text-md font-semibold text-slate-600 mb-2\">{}</h4><ul class=\"text-sm space-y-1 list-disc list-outside ml-4\">{}</ul></div>",
                    escape(&exp.id),
                    escape(&exp.start_date),
                    escape(&exp.end_date),
                    escape(&exp.job_title),
                    escape(&exp.company),
                    bullets(&exp.description, "text-slate-600 mb-2")
                )
            })
            .collect();
        body.push_str(&section(
            "Experience",
            &format!(
                "<div class=\"relative border-l-2 border-[--accent-color-light] ml-4 lg:ml-auto lg:mr-auto max-w-2xl\">{}</div>",
                entries
            ),
        ));
    }

    if !record.education.is_empty() {
        let entries: String = record
            .education
            .iter()
            .map(|edu| {
                format!(
                    "<div data-entry=\"{}\" class=\"text-center mb-2 last:mb-0\"><h3 class=\"text-md sm:text-lg font-bold text-slate-800\">{}</h3><p class=\"text-sm sm:text-md text-slate-600\">{} &middot; {}</p></div>",
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
        "creative",
        "w-[210mm] min-h-[297mm] bg-white shadow-2xl rounded-lg border border-slate-200 font-sans p-6 md:p-8 lg:p-12",
        accent,
        &body,
    )
}
