use std::fmt::Write;

use crate::domain::{Catalog, Item};

pub fn build_prompt(item: &Item, catalog: &Catalog) -> String {
    let mut prompt = String::from("Categorize this bookmark into ONE category:\n\n");

    for category in catalog.categories() {
        let description = match category.description.trim() {
            "" => "No description provided",
            text => text,
        };
        let _ = writeln!(prompt, "- {}: {}", category.name, description);
    }

    let url_count = item.urls().len();
    let _ = write!(
        prompt,
        "\nPost: {}\nThread: {}\nURLs: {}\n\n",
        or_placeholder(item.headline(), "(no post text)"),
        or_placeholder(&item.thread_text, "(no thread)"),
        url_count,
    );
    let _ = writeln!(
        prompt,
        "Return JSON: {{\"category\": \"{}\", \"needsUrlContent\": true/false}}",
        catalog.names().join("|")
    );
    prompt
}

fn or_placeholder<'a>(value: &'a str, placeholder: &'a str) -> &'a str {
    if value.trim().is_empty() {
        placeholder
    } else {
        value
    }
}
