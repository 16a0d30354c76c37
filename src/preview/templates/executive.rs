use crate::models::design::AccentColor;
use crate::models::resume::ResumeRecord;
use crate::preview::html::{
    LINK_ICON, MAIL_ICON, PHONE_ICON, bullets, escape, external_href, link, mailto, root, tel,
};

const CONTACT_CLASS: &str = "flex items-center gap-3 text-slate-800 hover:text-[--accent-color]";

fn main_section(title: &str, body: &str) -> String {
    format!(
        "<section class=\"mb-6\"><h2 class=\"font-serif text-xl md:text-2xl font-bold text-slate-800 border-b-2 border-slate-200 pb-2 mb-3\">{}</h2>{}</section>",
        title, body
    )
}

fn sidebar_section(title: &str, body: &str) -> String {
    format!(
        "<section class=\"mb-6\"><h3 class=\"font-serif text-md md:text-lg font-bold text-[--accent-color] uppercase tracking-wider\">{}</h3><div class=\"w-1/4 border-b-2 border-[--accent-color] my-2\"></div>{}</section>",
        title, body
    )
}

pub fn render(record: &ResumeRecord, accent: &AccentColor) -> String {
    let mut body = format!(
        "<header class=\"p-6 md:p-8 lg:p-10 bg-slate-50 border-b-4 border-[--accent-color] rounded-t-lg\"><h1 class=\"font-serif text-3xl sm:text-4xl md:text-5xl font-bold text-slate-800 tracking-tight\">{}</h1>",
        escape(&record.full_name)
    );
    if let Some(headline) = record.headline() {
        body.push_str(&format!(
            "<h2 class=\"font-sans text-lg md:text-xl text-slate-600 font-medium mt-1\">{}</h2>",
            escape(headline)
        ));
    }
    body.push_str("</header><div class=\"flex flex-col md:flex-row\">");

    let mut main = String::from("<main class=\"w-full md:w-2/3 p-6 md:p-8 lg:p-10\">");
    main.push_str(&main_section(
        "Summary",
        &format!(
            "<p class=\"text-slate-700 leading-relaxed text-sm sm:text-base\">{}</p>",
            escape(&record.professional_summary)
        ),
    ));
    if !record.work_experience.is_empty() {
        let entries: String = record
            .work_experience
            .iter()
            .map(|exp| {
                format!(
                    "<div data-entry=\"{}\" class=\"mb-5 last:mb-0\"><div class=\"flex flex-col sm:flex-row sm:justify-between sm:items-baseline\"><h3 class=\"text-md md:text-lg font-bold text-slate-800\">{}</h3><p class=\"text-xs sm:text-sm font-medium text-slate-500\">{} - {}</p></div><h4 class=\"text-sm md:text-md font-semibold text-slate-600 mb-2\">{}</h4><ul class=\"pl-4 text-sm sm:text-base space-y-1 list-disc list-outside\">{}</ul></div>",
                    escape(&exp.id),
                    escape(&exp.job_title),
                    escape(&exp.start_date),
                    escape(&exp.end_date),
                    escape(&exp.company),
                    bullets(&exp.description, "text-slate-700 mb-1")
                )
            })
            .collect();
        main.push_str(&main_section("Experience", &entries));
    }
    main.push_str("</main>");

    let mut aside = String::from(
        "<aside class=\"w-full md:w-1/3 p-6 md:p-8 lg:p-10 bg-slate-50 border-t-2 md:border-t-0 md:border-l-2 border-slate-200\">",
    );
    let mut contacts = String::new();
    contacts.push_str(&link(&mailto(&record.email), &record.email, Some(MAIL_ICON), CONTACT_CLASS));
    contacts.push_str(&link(&tel(&record.phone_number), &record.phone_number, Some(PHONE_ICON), CONTACT_CLASS));
    for profile in [&record.website, &record.linked_in, &record.github] {
        contacts.push_str(&link(&external_href(profile), profile, Some(LINK_ICON), CONTACT_CLASS));
    }
    aside.push_str(&sidebar_section(
        "Contact",
        &format!("<div class=\"space-y-3 text-sm\">{}</div>", contacts),
    ));

    if !record.skills.is_empty() {
        let items: String = record
            .skills
            .iter()
            .map(|skill| format!("<li class=\"text-slate-800\">{}</li>", escape(skill)))
            .collect();
        aside.push_str(&sidebar_section(
            "Skills",
            &format!("<ul class=\"text-sm space-y-1\">{}</ul>", items),
        ));
    }

    if !record.education.is_empty() {
        let entries: String = record
            .education
            .iter()
            .map(|edu| {
                format!(
                    "<div data-entry=\"{}\" class=\"mb-3 last:mb-0 text-sm\"><h4 class=\"font-bold text-slate-800\">{}</h4><p class=\"text-slate-600\">{}</p><p class=\"text-slate-500 text-xs\">{}</p></div>",
                    escape(&edu.id),
                    escape(&edu.degree),
                    escape(&edu.school),
                    escape(&edu.grad_date)
                )
            })
            .collect();
        aside.push_str(&sidebar_section("Education", &entries));
    }
    aside.push_str("</aside>");

    body.push_str(&main);
    body.push_str(&aside);
    body.push_str("</div>");

    root(
        "executive",
        "w-[210mm] min-h-[297mm] bg-white shadow-2xl rounded-lg border border-slate-200 font-sans",
        accent,
        &body,
    )
}
