use std::fmt::Write;

use crate::domain::Item;

#[derive(Debug, Clone, Default)]
pub struct LinkedContent {
    pub summaries: Vec<(String, String)>,
    pub fetch_allowed: bool,
    pub url_count: usize,
}

pub fn note_filename(date: &str, id: &str) -> String {
    format!("{date}-{id}.md")
}

pub fn render_note(item: &Item, category: &str, saved_at: &str, linked: &LinkedContent) -> String {
    let mut body = String::new();
    for (url, summary) in &linked.summaries {
        let _ = write!(body, "### {url}\n\n{summary}\n\n");
    }
    let linked_section = if !body.is_empty() {
        body.as_str()
    } else if linked.fetch_allowed {
        "(no links or summaries available)"
    } else {
        "(summaries skipped)"
    };

    format!(
        "# Bookmark\n\n\
         **ID:** {id}\n\
         **Saved:** {saved_at}\n\
         **Category:** {category}\n\n\
         ## Content\n\n{content}\n\n\
         ## Thread\n\n{thread}\n\n\
         ## Linked Content\n\n{linked_section}\n\n\
         ---\n\
         *Auto-saved via bookmark-router*\n",
        id = item.id,
        content = item.raw_text,
        thread = or_placeholder(&item.thread_text, "(no thread)"),
    )
}

pub fn render_task_prompt(item: &Item, linked: &LinkedContent) -> String {
    let mut resources = String::new();
    for (url, summary) in &linked.summaries {
        let _ = write!(resources, "Link: {url}\n{summary}\n\n");
    }
    let resources = if !resources.is_empty() {
        resources
    } else if !linked.fetch_allowed && linked.url_count > 0 {
        "Summaries skipped".to_string()
    } else {
        "No links available".to_string()
    };

    format!(
        "# Implementation Task from Bookmark\n\n\
         ## Context\n{context}\n\n\
         ## Thread\n{thread}\n\n\
         ## Linked Resources\n{resources}\n\n\
         ## Your Task\n\
         Implement this based on the context above:\n\
         1. Read and understand the full context\n\
         2. Implement the solution\n\
         3. Test it works\n\
         4. Provide usage examples\n\n\
         Start by asking any clarifying questions, then proceed with implementation.\n",
        context = item.raw_text,
        thread = or_placeholder(&item.thread_text, "(no thread)"),
    )
}

fn or_placeholder<'a>(value: &'a str, placeholder: &'a str) -> &'a str {
    if value.trim().is_empty() {
        placeholder
    } else {
        value
    }
}
