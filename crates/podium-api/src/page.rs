//! HTML presentation of a [`Leaderboard`].
//!
//! Pure string assembly over the view-model; the ranking itself lives in
//! `podium-core`.
use time::{OffsetDateTime, UtcOffset};

use podium_core::{
    board::{Leaderboard, RankedEntry, TaskBoard},
    ranking::format_score,
};
use podium_model::format_timestamp;

const STYLE: &str = "\
body { font-family: Arial, sans-serif; margin: 40px; }
h1 { color: #333; }
table { border-collapse: collapse; width: 100%; margin-bottom: 24px; }
th, td { border: 1px solid #ccc; padding: 8px; text-align: center; }
th { background-color: #f2f2f2; }
.warning { color: #a15c00; }
.logo { height: 64px; }
";

/// Presentation settings for the HTML page.
#[derive(Debug, Clone)]
pub struct PageOptions {
    pub title: String,
    /// Seconds between automatic client-side reloads.
    pub refresh_secs: u32,
    /// Optional logo image URL shown above the title.
    pub logo_url: Option<String>,
    /// Offset used for every displayed timestamp.
    pub offset: UtcOffset,
}

impl Default for PageOptions {
    fn default() -> Self {
        Self {
            title: "Live Leaderboard".to_string(),
            refresh_secs: 15,
            logo_url: None,
            offset: UtcOffset::UTC,
        }
    }
}

/// Render the full page. `now` only feeds the "Last updated" line.
pub fn render_page(board: &Leaderboard, opts: &PageOptions, now: OffsetDateTime) -> String {
    let title = escape(&opts.title);
    let mut out = String::with_capacity(4096);

    out.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
    out.push_str(&format!("<title>{title}</title>\n"));
    out.push_str(&format!(
        "<meta http-equiv=\"refresh\" content=\"{}\">\n",
        opts.refresh_secs
    ));
    out.push_str(&format!("<style>\n{STYLE}</style>\n</head>\n<body>\n"));

    if let Some(logo) = &opts.logo_url {
        out.push_str(&format!(
            "<img class=\"logo\" src=\"{}\" alt=\"logo\">\n",
            escape(logo)
        ));
    }
    out.push_str(&format!("<h1>{title}</h1>\n"));
    out.push_str(&format!(
        "<p>Last updated: {}</p>\n",
        format_timestamp(now.to_offset(opts.offset))
    ));

    if board.is_empty() {
        out.push_str("<h2>No submissions yet!</h2>\n");
    } else {
        for task in &board.tasks {
            task_section(&mut out, task, opts.offset);
        }
        complete_log(&mut out, &board.complete_log, opts.offset);
        out.push_str(
            "<form method=\"post\" action=\"/reset\">\
             <button type=\"submit\">Reset all tasks</button></form>\n",
        );
    }

    out.push_str("</body>\n</html>\n");
    out
}

fn task_section(out: &mut String, task: &TaskBoard, offset: UtcOffset) {
    let key = escape(task.task.as_str());
    let metric = escape(&task.metric);

    out.push_str("<section>\n");
    // Submissions without a task land in the implicit one; it gets no task label.
    if task.task.is_default() {
        out.push_str("<h2>Submissions</h2>\n");
    } else {
        out.push_str(&format!("<h2>Task: {key}</h2>\n"));
    }
    out.push_str(&format!("<p>Ranked by {metric}</p>\n"));

    if task.unrankable > 0 {
        out.push_str(&format!(
            "<p class=\"warning\">{} submission(s) without \"{metric}\" are not ranked.</p>\n",
            task.unrankable
        ));
    }

    out.push_str("<h3>Podium</h3>\n<table>\n<tr><th>Rank</th><th>Team</th><th>Host</th>");
    out.push_str(&format!("<th>{metric}</th></tr>\n"));
    for entry in &task.podium {
        out.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
            entry.rank,
            escape(entry.submission.name()),
            escape(entry.submission.host()),
            entry.display_score()
        ));
    }
    out.push_str("</table>\n");

    out.push_str("<h3>All submissions</h3>\n<table>\n<tr><th>Rank</th><th>Team</th><th>Host</th>");
    for col in &task.columns {
        out.push_str(&format!("<th>{}</th>", escape(col)));
    }
    out.push_str("<th>Submitted</th></tr>\n");
    for entry in &task.full_log {
        out.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td>{}</td>",
            entry.rank,
            escape(entry.submission.name()),
            escape(entry.submission.host())
        ));
        for col in &task.columns {
            let cell = entry
                .submission
                .results()
                .get(col)
                .map(format_score)
                .unwrap_or_else(|| "-".to_string());
            out.push_str(&format!("<td>{cell}</td>"));
        }
        out.push_str(&format!(
            "<td>{}</td></tr>\n",
            format_timestamp(entry.submission.timestamp().to_offset(offset))
        ));
    }
    out.push_str("</table>\n");

    out.push_str(&format!(
        "<form method=\"post\" action=\"/reset/{}\">\
         <button type=\"submit\">Reset {key}</button></form>\n",
        encode_segment(task.task.as_str())
    ));
    out.push_str("</section>\n");
}

fn complete_log(out: &mut String, entries: &[RankedEntry], offset: UtcOffset) {
    out.push_str("<h2>Complete submission log</h2>\n<table>\n");
    out.push_str(
        "<tr><th>Submitted</th><th>Task</th><th>Team</th><th>Host</th><th>Score</th></tr>\n",
    );
    for entry in entries {
        let sub = &entry.submission;
        out.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
            format_timestamp(sub.timestamp().to_offset(offset)),
            escape(sub.task().as_str()),
            escape(sub.name()),
            escape(sub.host()),
            entry.display_score()
        ));
    }
    out.push_str("</table>\n");
}

fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Percent-encode a task key for use as a single path segment.
fn encode_segment(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for b in s.bytes() {
        if b.is_ascii_alphanumeric() || matches!(b, b'-' | b'_' | b'.' | b'~') {
            out.push(b as char);
        } else {
            out.push_str(&format!("%{b:02X}"));
        }
    }
    out
}
