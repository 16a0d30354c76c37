use crate::models::design::AccentColor;
use crate::models::resume::ResumeRecord;
use crate::preview::html::{bullets, escape, external_href, link, mailto, root, tel};

const LINK_CLASS: &str = "hover:text-[--accent-color]";
const DIVIDER: &str = "<span class=\"text-slate-300\">|</span>";

fn section(title: &str, body: &str, first: bool) -> String {
    format!(
        "<section class=\"{}\"><h2 class=\"text-sm font-bold uppercase tracking-[0.2em] text-slate-500 pb-2 mb-4\">{}</h2>{}</section>",
        if first { "mt-6" } else { "mt-10" },
        title,
        body
    )
}

pub fn render(record: &ResumeRecord, accent: &AccentColor) -> String {
    let mut contacts: Vec<String> = vec![
        link(&mailto(&record.email), &record.email, None, LINK_CLASS),
        link(&tel(&record.phone_number), &record.phone_number, None, LINK_CLASS),
    ];
    for (profile, label) in [
        (&record.linked_in, "LinkedIn"),
        (&record.github, "GitHub"),
        (&record.website, "Website"),
    ] {
        if !profile.is_empty() {
            contacts.push(link(&external_href(profile), label, None, LINK_CLASS));
        }
    }
    contacts.retain(|c| !c.is_empty());

    let mut body = format!(
        "<header class=\"text-left mb-10\"><h1 class=\"text-5xl font-bold text-slate-800 tracking-tight\">{}</h1><div class=\"w-16 border-b-2 border-[--accent-color] my-4\"></div><div class=\"mt-4 flex items-center flex-wrap gap-x-6 gap-y-2 text-sm text-slate-500 font-medium\">{}</div></header><main>",
        escape(&record.full_name),
        contacts.join(DIVIDER)
    );

    body.push_str(&format!(
        "<p class=\"text-slate-700 leading-relaxed text-lg\">{}</p>",
        escape(&record.professional_summary)
    ));

    if !record.work_experience.is_empty() {
        let entries: String = record
            .work_experience
            .iter()
            .map(|exp| {
                format!(
                    "<div data-entry=\"{}\" class=\"grid grid-cols-4 gap-4 mb-6 last:mb-0\"><div class=\"col-span-1 text-sm text-slate-500 font-medium\"><p>{} -</p><p>{}</p></div><div class=\"col-span-3\"><h3 class=\"text-lg font-bold text-slate-800\">{}</h3><h4 class=\"text-md font-semibold text-slate-600 mb-3\">{}</h4><ul class=\"text-sm space-y-1 list-disc list-outside ml-4\">{}</ul></div></div>",
                    escape(&exp.id),
                    escape(&exp.start_date),
                    escape(&exp.end_date),
                    escape(&exp.job_title),
                    escape(&exp.company),
                    bullets(&exp.description, "text-slate-600 mb-2 leading-relaxed")
                )
            })
            .collect();
        body.push_str(&section("Experience", &entries, true));
    }

    if !record.skills.is_empty() {
        body.push_str(&section(
            "Skills",
            &format!(
                "<div class=\"grid grid-cols-4 gap-4\"><div class=\"col-span-1\"></div><div class=\"col-span-3\"><p class=\"text-slate-600 leading-relaxed\">{}</p></div></div>",
                escape(&record.skills.join(", "))
            ),
            false,
        ));
    }

    if !record.education.is_empty() {
        let entries: String = record
            .education
            .iter()
            .map(|edu| {
                format!(
                    "<div data-entry=\"{}\" class=\"grid grid-cols-4 gap-4 mb-2 last:mb-0\"><div class=\"col-span-1 text-sm text-slate-500 font-medium\"><p>{}</p></div><div class=\"col-span-3\"><h3 class=\"text-lg font-bold text-slate-800\">{}</h3><p class=\"text-md text-slate-600\">{}</p></div></div>",
                    escape(&edu.id),
                    escape(&edu.grad_date),
                    escape(&edu.degree),
                    escape(&edu.school)
                )
            })
            .collect();
        body.push_str(&section("Education", &entries, false));
    }

    body.push_str("</main>");

    root(
        "minimalist",
        "bg-white shadow-2xl rounded-lg border border-slate-200 font-sans p-10 lg:p-14",
        accent,
        &body,
    )
}
