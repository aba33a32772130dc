//! HTML rendering for the dashboard pages.
//!
//! Pages are plain strings. Every value that can come from a request or the
//! data files goes through [`escape_html`].

use std::fmt::Write as _;

use digidash_core::FirmYearRecord;
use digidash_service::{ComparisonView, FirmView, IndustryMembersView, RankingView, TrendView};

use crate::query_types::IndustryQuery;

/// Embedded body of the home page with the four lookup forms
const HOME_HTML: &str = include_str!("home.html");

const STYLE: &str = "body{font-family:sans-serif;background:#f8f9fa;margin:0}\
    .container{max-width:1100px;margin:0 auto;padding:16px}\
    .center{text-align:center}\
    .hint{background:#e7f1ff;border-radius:6px;padding:12px;margin:12px 0}\
    .card{background:#fff;border-radius:6px;box-shadow:0 1px 4px #0002;padding:16px;margin:20px 0}\
    input{padding:6px;margin-right:8px}\
    table{border-collapse:collapse;margin:12px 0}\
    th,td{border:1px solid #ccc;padding:4px 8px}\
    img{max-width:100%}\
    .btn{display:inline-block;padding:6px 12px;background:#6c757d;color:#fff;border-radius:4px;text-decoration:none}";

const BACK_LINK: &str = r#"<a href="/" class="btn">Back to home</a>"#;

pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
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

fn layout(title: &str, body: &str) -> String {
    format!(
        "<!doctype html>\n<html><head><meta charset=\"utf-8\">\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\
         <title>{}</title><style>{STYLE}</style></head>\n\
         <body><div class=\"container\">\n{body}\n</div></body></html>\n",
        escape_html(title)
    )
}

fn format_index(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_owned(), |v| format!("{v:.3}"))
}

fn chart_img(data_uri: &str, alt: &str) -> String {
    format!(r#"<img src="{data_uri}" alt="{}">"#, escape_html(alt))
}

fn records_table(records: &[FirmYearRecord]) -> String {
    let mut table = String::from(
        "<table>\n<tr><th>Stock code</th><th>Firm name</th><th>Industry code</th>\
         <th>Industry name</th><th>Composite index</th><th>Normalized index (0-100)</th></tr>\n",
    );
    for r in records {
        let _ = writeln!(
            table,
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
            escape_html(&r.firm_code),
            escape_html(&r.firm_name),
            escape_html(&r.industry_code),
            escape_html(&r.industry_name),
            format_index(r.composite_index),
            format_index(r.normalized_index),
        );
    }
    table.push_str("</table>");
    table
}

fn hidden_input(name: &str, value: Option<&str>) -> String {
    format!(
        r#"<input type="hidden" name="{name}" value="{}">"#,
        escape_html(value.unwrap_or_default().trim())
    )
}

pub fn home_page() -> String {
    layout("Digital transformation dashboard", HOME_HTML)
}

/// Short message with a link back home; used for every error outcome.
pub fn message_page(message: &str) -> String {
    layout("Digital transformation dashboard", &format!("<h5>{}</h5>\n{BACK_LINK}", escape_html(message)))
}

pub fn firm_page(view: &FirmView) -> String {
    let heading = format!(
        "{} ({}) (industry: {})",
        view.firm_name, view.firm_code, view.industry_name
    );
    let body = format!(
        "<h4>{}</h4>\n{}\n<div>{BACK_LINK}</div>",
        escape_html(&heading),
        chart_img(&view.chart.data_uri(), &heading),
    );
    layout(&view.firm_name, &body)
}

pub fn comparison_page(view: &ComparisonView) -> String {
    let heading = format!("{} vs {}: both indices", view.first_code, view.second_code);
    let body = format!(
        "<h4>{}</h4>\n{}\n<div>{BACK_LINK}</div>",
        escape_html(&heading),
        chart_img(&view.chart.data_uri(), &heading),
    );
    layout(&heading, &body)
}

pub fn industry_trend_page(view: &TrendView) -> String {
    let heading = format!("{} industry: yearly digital transformation indices", view.label);
    let body = format!(
        "<h4>{}</h4>\n{}\n<div>{BACK_LINK}</div>",
        escape_html(&heading),
        chart_img(&view.chart.data_uri(), &heading),
    );
    layout(&heading, &body)
}

/// Ranking chart and top-firm table. With `full_list` the page links to the
/// complete ranked list for the same industry and year.
pub fn ranking_page(view: &RankingView, full_list: Option<&IndustryQuery>) -> String {
    let heading = format!("{} {} industry: both indices of top firms", view.year, view.label);
    let mut body = format!(
        "<h4>{}</h4>\n{}\n",
        escape_html(&heading),
        chart_img(&view.chart.data_uri(), &heading),
    );
    if let Some(query) = full_list {
        let _ = write!(
            body,
            "<h5>Top {} of {} firms</h5>\n{}\n",
            view.top.len(),
            view.total,
            records_table(&view.top)
        );
        let _ = write!(
            body,
            "<form action=\"/industry_full\" method=\"get\" target=\"_blank\">{}{}{}\
             <button type=\"submit\">View full list (new page)</button></form>\n",
            hidden_input("ind_code", query.ind_code.as_deref()),
            hidden_input("ind_name", query.ind_name.as_deref()),
            hidden_input("year", Some(view.year.to_string().as_str())),
        );
    }
    body.push_str(BACK_LINK);
    layout(&heading, &body)
}

pub fn members_page(view: &IndustryMembersView) -> String {
    let heading = format!("{} {} industry: all firms ranked by composite index", view.year, view.label);
    let body = format!(
        "<h4>{}</h4>\n<p>{} firms</p>\n{}\n<div>{BACK_LINK}</div>",
        escape_html(&heading),
        view.members.len(),
        records_table(&view.members),
    );
    layout(&heading, &body)
}
