use crate::domain::{normalize_key, Item};

pub const NOTIFY_PREVIEW: usize = 300;
pub const SHORT_PREVIEW: usize = 200;
pub const PROMPT_PREVIEW: usize = 400;
pub const MAX_NOTIFY_SUMMARIES: usize = 3;

const RAZOR_TASK_HINTS: [&str; 4] = ["skill", "cli", "tool", "workflow"];

pub fn truncate(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

pub fn notify_message(category: &str, item: &Item, is_default: bool) -> String {
    let preview = truncate(item.headline(), NOTIFY_PREVIEW);
    if is_default {
        format!("Unclear bookmark. Where should this go? Post: {preview}")
    } else {
        format!("Bookmark categorized as {category}. Post: {preview}")
    }
}

pub fn saved_message(category: &str, item: &Item) -> String {
    format!(
        "Saved bookmark ({category}) to vault. Post: {}",
        truncate(item.headline(), SHORT_PREVIEW)
    )
}

pub fn removed_message(category: &str, item: &Item) -> String {
    format!(
        "Removed bookmark ({category}): {}",
        truncate(item.headline(), SHORT_PREVIEW)
    )
}

pub fn task_message(prompt_path: &str, prompt: &str) -> String {
    format!(
        "Task ready. Prompt saved to {prompt_path}. Preview: {}",
        truncate(prompt, PROMPT_PREVIEW)
    )
}

pub fn razor_message(item: &Item) -> String {
    let preview = truncate(item.headline(), SHORT_PREVIEW);
    let text = item.combined_text().to_lowercase();
    if RAZOR_TASK_HINTS.iter().any(|hint| text.contains(hint)) {
        format!("Razor task queued for implementation. Post: {preview}")
    } else {
        format!("Razor tip saved. Post: {preview}")
    }
}

pub fn summary_message(category: &str, item: &Item, summaries: &[(String, String)]) -> String {
    let prefix = if normalize_key(category) == "readlater" {
        "Read later".to_string()
    } else {
        format!("Summary ({category})")
    };
    let mut message = format!("{prefix}: {}", truncate(item.headline(), SHORT_PREVIEW));
    if !summaries.is_empty() {
        let blocks: Vec<String> = summaries
            .iter()
            .take(MAX_NOTIFY_SUMMARIES)
            .map(|(url, summary)| format!("{url}\n{}", truncate(summary, SHORT_PREVIEW)))
            .collect();
        message.push_str("\n\nSummaries:\n");
        message.push_str(&blocks.join("\n\n"));
    }
    message
}
