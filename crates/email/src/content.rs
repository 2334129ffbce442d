//! Task report email content
//!
//! Canonical content generators for the "all tasks" report, shared by the
//! SES and mock email services.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const TASKS_REPORT_SUBJECT: &str = "All tasks in the system";

const CELL: &str = "<td style='padding: 8px;'>";
const HEADER_CELL: &str = "<th style='padding: 8px;'>";
const DATE_FORMAT: &str = "%d.%m.%Y %H:%M";

/// One task row in the report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportTask {
    pub title: String,
    pub description: String,
    /// Human-readable status description
    pub status: String,
    pub created_at: DateTime<Utc>,
}

/// Generate plain-text body for the tasks report.
pub fn tasks_report_text(tasks: &[ReportTask]) -> String {
    let mut text = format!(
        "{}\n\nTotal tasks: {}\n\n",
        TASKS_REPORT_SUBJECT,
        tasks.len()
    );

    if tasks.is_empty() {
        text.push_str("No tasks yet\n");
        return text;
    }

    for (index, task) in tasks.iter().enumerate() {
        text.push_str(&format!(
            "{}. {} [{}] - created {}\n   {}\n",
            index + 1,
            task.title,
            task.status,
            task.created_at.format(DATE_FORMAT),
            display_or_dash(&task.description)
        ));
    }

    text
}

/// Generate HTML table body for the tasks report.
pub fn tasks_report_html(tasks: &[ReportTask]) -> String {
    let mut html = String::from("<html><body>");
    html.push_str(&format!("<h2>{}</h2>", TASKS_REPORT_SUBJECT));
    html.push_str(&format!("<p>Total tasks: {}</p>", tasks.len()));

    if tasks.is_empty() {
        html.push_str("<p>No tasks yet</p>");
    } else {
        html.push_str("<table border='1' style='border-collapse: collapse; width: 100%;'>");
        html.push_str("<tr style='background-color: #f2f2f2;'>");
        for header in ["#", "Title", "Description", "Status", "Created"] {
            html.push_str(&format!("{}{}</th>", HEADER_CELL, header));
        }
        html.push_str("</tr>");

        for (index, task) in tasks.iter().enumerate() {
            html.push_str("<tr>");
            html.push_str(&format!("{}{}</td>", CELL, index + 1));
            html.push_str(&format!("{}{}</td>", CELL, escape_html(&task.title)));
            html.push_str(&format!(
                "{}{}</td>",
                CELL,
                escape_html(display_or_dash(&task.description))
            ));
            html.push_str(&format!("{}{}</td>", CELL, escape_html(&task.status)));
            html.push_str(&format!(
                "{}{}</td>",
                CELL,
                task.created_at.format(DATE_FORMAT)
            ));
            html.push_str("</tr>");
        }
        html.push_str("</table>");
    }

    html.push_str("</body></html>");
    html
}

fn display_or_dash(value: &str) -> &str {
    if value.trim().is_empty() {
        "-"
    } else {
        value
    }
}

// Task fields are user input and end up inside markup.
fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
