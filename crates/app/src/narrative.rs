use std::fmt::Write;

use daybook_core::DailySummary;

const FOOTER: &str = "---\n*Generated by Daybook*\n";

fn list_or_none(items: &[String], render: impl Fn(&str) -> String) -> String {
    if items.is_empty() {
        return "_None_".to_string();
    }
    items
        .iter()
        .map(|item| render(item))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn render_markdown(summary: &DailySummary) -> String {
    let mut md = String::new();
    let _ = writeln!(md, "# Daily Report: {}\n", summary.date);
    let _ = writeln!(md, "## Flow State");
    let _ = writeln!(md, "**Score:** {}/100", summary.flow_score);
    let _ = writeln!(md, "**Emotion:** {}\n", summary.dominant_emotion);
    let _ = writeln!(md, "## Narrative\n{}\n", summary.summary_text);
    let tags = if summary.tags.is_empty() {
        "_None_".to_string()
    } else {
        summary.tags.join(" ")
    };
    let _ = writeln!(md, "## Tags\n{}\n", tags);
    let _ = writeln!(
        md,
        "## Top Activities\n{}\n",
        list_or_none(&summary.top_activities, |item| format!("- {item}"))
    );
    if let Some(visual) = summary.visual_context_text() {
        let _ = writeln!(md, "## Visual Context\n{}\n", visual);
    }
    md.push_str(FOOTER);
    md
}
