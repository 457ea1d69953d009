use std::io::{self, Write};

use chrono::Local;
use timeline_core::{SyncPhase, TimelineViewModel, TweetRowView};

const TEXT_PREVIEW_CHARS: usize = 60;

/// Receives transient operator messages.
pub(crate) trait NotificationSink {
    fn notify(&self, text: &str);
}

/// Prints notifications to stdout with a local timestamp.
pub(crate) struct ConsoleNotifier;

impl NotificationSink for ConsoleNotifier {
    fn notify(&self, text: &str) {
        print_lines(&[format_notice(&Local::now().format("%H:%M:%S").to_string(), text)]);
    }
}

pub(crate) fn format_notice(timestamp: &str, text: &str) -> String {
    format!("[notice {timestamp}] {text}")
}

pub(crate) fn render(view: &TimelineViewModel) -> Vec<String> {
    let phase = match view.phase {
        SyncPhase::Idle => "idle",
        SyncPhase::Fetching => "fetching",
    };
    let newest = view
        .newest_id
        .as_ref()
        .map(|id| id.to_string())
        .unwrap_or_else(|| "-".to_string());

    let mut lines = Vec::with_capacity(view.tweets.len() + 1);
    lines.push(format!(
        "== {} tweets | newest {} | poll {} | {} responses applied ==",
        view.tweet_count, newest, phase, view.applied_responses
    ));
    lines.extend(view.tweets.iter().map(render_row));
    lines
}

fn render_row(row: &TweetRowView) -> String {
    let star = if row.favorited { '*' } else { ' ' };
    format!(
        "{star} {:>20}  @{:<16} {} img  {}",
        row.id.as_str(),
        row.screen_name,
        row.image_count,
        preview(&row.text)
    )
}

fn preview(text: &str) -> String {
    let single_line = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if single_line.chars().count() <= TEXT_PREVIEW_CHARS {
        return single_line;
    }
    let mut cut: String = single_line.chars().take(TEXT_PREVIEW_CHARS - 1).collect();
    cut.push('…');
    cut
}

pub(crate) fn print_lines(lines: &[String]) {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    for line in lines {
        // Closed stdout just means nobody is watching.
        let _ = writeln!(out, "{line}");
    }
    let _ = out.flush();
}

#[cfg(test)]
mod tests {
    use super::*;
    use timeline_core::TweetId;

    fn row(id: &str, favorited: bool, text: &str) -> TweetRowView {
        TweetRowView {
            id: TweetId::new(id),
            favorited,
            screen_name: "alice".to_string(),
            image_count: 2,
            text: text.to_string(),
        }
    }

    #[test]
    fn renders_header_and_rows_in_view_order() {
        let view = TimelineViewModel {
            phase: SyncPhase::Idle,
            tweet_count: 2,
            newest_id: Some(TweetId::new("9")),
            tweets: vec![row("9", true, "newer"), row("3", false, "older")],
            applied_responses: 4,
        };

        let lines = render(&view);

        assert_eq!(lines.len(), 3);
        assert_eq!(
            lines[0],
            "== 2 tweets | newest 9 | poll idle | 4 responses applied =="
        );
        assert!(lines[1].starts_with('*'));
        assert!(lines[1].ends_with("newer"));
        assert!(lines[2].starts_with(' '));
        assert!(lines[2].contains("@alice"));
    }

    #[test]
    fn long_text_is_truncated_to_one_line() {
        let text = format!("line one\nline two {}", "x".repeat(100));
        let shown = preview(&text);
        assert!(!shown.contains('\n'));
        assert_eq!(shown.chars().count(), TEXT_PREVIEW_CHARS);
        assert!(shown.ends_with('…'));
    }

    #[test]
    fn notice_format() {
        assert_eq!(
            format_notice("12:00:00", "Force refresh triggered"),
            "[notice 12:00:00] Force refresh triggered"
        );
    }
}
