//! Markdown and HTML report generation

use super::VerificationReport;
use crate::presentation::ResultView;
use std::fmt::Write;

pub fn generate(report: &VerificationReport) -> String {
    let view = ResultView::from_verdict(&report.verdict);
    let mut md = String::new();

    let _ = writeln!(md, "# Signature Verification Report\n");
    let _ = writeln!(md, "**Verdict:** {}\n", view.status_label);
    let _ = writeln!(
        md,
        "**Confidence Score:** {}% ({} confidence)\n",
        view.confidence_percent, view.band
    );

    let _ = writeln!(md, "## Image\n");
    let _ = writeln!(md, "| Property | Value |");
    let _ = writeln!(md, "|----------|-------|");
    let _ = writeln!(md, "| File | {} |", escape_cell(&report.file_name));
    let _ = writeln!(md, "| Type | {} |", escape_cell(&report.mime_type));
    let _ = writeln!(md, "| Size | {} bytes |", report.size_bytes);
    let _ = writeln!(md, "| SHA-256 | `{}` |", report.sha256);
    let _ = writeln!(md);

    if !view.sub_scores.is_empty() {
        let _ = writeln!(md, "## Match Details\n");
        let _ = writeln!(md, "| Aspect | Score |");
        let _ = writeln!(md, "|--------|-------|");
        for bar in &view.sub_scores {
            let _ = writeln!(md, "| {} | {}% |", bar.label, bar.percent);
        }
        let _ = writeln!(md);
    }

    if let Some(reference) = &view.reference_signature {
        let _ = writeln!(md, "## Reference Signature\n");
        let _ = writeln!(md, "![Reference signature]({})\n", reference);
    }

    let _ = writeln!(
        md,
        "---\n*Generated {}*",
        report.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    );
    md
}

pub fn generate_html(report: &VerificationReport) -> String {
    let view = ResultView::from_verdict(&report.verdict);
    let mut html = String::new();

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
    html.push_str("<title>Signature Verification Report</title>\n</head>\n<body>\n");
    let _ = writeln!(html, "<h1>Signature Verification Report</h1>");
    let _ = writeln!(
        html,
        "<p class=\"{}\"><strong>{}</strong></p>",
        view.status_class, view.status_label
    );
    let _ = writeln!(
        html,
        "<p>Confidence Score: <span class=\"{}\">{}%</span></p>",
        view.band.text_class(),
        view.confidence_percent
    );

    html.push_str("<table>\n");
    let _ = writeln!(html, "<tr><th>File</th><td>{}</td></tr>", escape(&report.file_name));
    let _ = writeln!(html, "<tr><th>Type</th><td>{}</td></tr>", escape(&report.mime_type));
    let _ = writeln!(html, "<tr><th>Size</th><td>{} bytes</td></tr>", report.size_bytes);
    let _ = writeln!(html, "<tr><th>SHA-256</th><td><code>{}</code></td></tr>", report.sha256);
    html.push_str("</table>\n");

    if !view.sub_scores.is_empty() {
        html.push_str("<ul>\n");
        for bar in &view.sub_scores {
            let _ = writeln!(html, "<li>{}: {}%</li>", bar.label, bar.percent);
        }
        html.push_str("</ul>\n");
    }

    if let Some(reference) = &view.reference_signature {
        let _ = writeln!(
            html,
            "<p>Compared against reference signature:</p>\n<img src=\"{}\" alt=\"Reference signature\">",
            escape(reference)
        );
    }

    let _ = writeln!(
        html,
        "<footer>Generated {}</footer>",
        report.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    );
    html.push_str("</body>\n</html>\n");
    html
}

/// Keep user text inside a single table cell
fn escape_cell(text: &str) -> String {
    text.replace('\\', "\\\\")
        .replace('|', "\\|")
        .replace(['\r', '\n'], " ")
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
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
