use std::fmt::Write;

use serde::Serialize;
use serde_json::Value;

use crate::area::{AreaResult, CandidateResult};
use crate::cli::OutputFormat;

/// Print `value` as pretty JSON, or as the text produced by `render`
pub fn output<T, F>(output_format: &OutputFormat, value: &T, render: F) -> anyhow::Result<()>
where
    T: Serialize,
    F: FnOnce(&T) -> String,
{
    match output_format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(value)?),
        OutputFormat::Text => println!("{}", render(value)),
    }
    Ok(())
}

pub fn render_years(years: &[i32]) -> String {
    let years: Vec<String> = years.iter().map(|y| y.to_string()).collect();
    format!("Election years: {}", years.join(", "))
}

pub fn render_health(server: &str, health: &Value) -> String {
    let field = |name: &str| health.get(name).and_then(|v| v.as_str()).unwrap_or("unknown").to_string();
    format!("Server: {}\nStatus: {}\nDatabase: {}", server, field("status"), field("database"))
}

fn render_candidates(out: &mut String, indent: &str, candidates: &[CandidateResult]) {
    for c in candidates {
        let elected = if c.is_elected { " *" } else { "" };
        let _ = writeln!(out, "{}{} ({}): {}{}", indent, c.name, c.party_name, c.total_votes, elected);
    }
}

/// Text report: parent chain, the area with its totals and candidates, then sub-areas
pub fn render_area(result: &AreaResult) -> String {
    let mut out = String::new();
    let area = &result.area;

    if !result.parent_areas.is_empty() {
        let chain: Vec<&str> = result.parent_areas.iter().map(|p| p.name.as_str()).collect();
        let _ = writeln!(out, "{} > {}", chain.join(" > "), area.name);
    }
    let _ = writeln!(out, "{} {} ({})", result.year, area.name, area.code);
    let _ = writeln!(
        out,
        "Votes: {} total, {} valid, {} invalid; turnout {:.2}%",
        area.total_votes, area.valid_votes, area.invalid_votes, area.voter_turnout
    );

    if !area.candidates.is_empty() {
        let _ = writeln!(out, "Candidates:");
        render_candidates(&mut out, "  ", &area.candidates);
    }

    if !area.history.is_empty() {
        let _ = writeln!(out, "History:");
        for h in &area.history {
            let _ = writeln!(out, "  {} {}: {}", h.year, h.party_name, h.total_votes);
        }
    }

    if !result.sub_areas.is_empty() {
        let _ = writeln!(out, "Sub-areas:");
        for sub in &result.sub_areas {
            let _ = writeln!(
                out,
                "  {} ({}): {} votes, turnout {:.2}%",
                sub.name, sub.code, sub.total_votes, sub.voter_turnout
            );
            render_candidates(&mut out, "    ", &sub.candidates);
        }
    }

    out.trim_end().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::area::{AreaCode, AreaDetail, HistoryEntry, ParentArea, SubArea};
    use serde_json::json;

    fn result() -> AreaResult {
        AreaResult {
            year: 2024,
            area: AreaDetail {
                code: AreaCode::new("63", "000", "010", "0000"),
                name: "松山區".into(),
                valid_votes: 120,
                invalid_votes: 3,
                total_votes: 123,
                voter_turnout: 71.5,
                candidates: vec![CandidateResult {
                    name: "甲".into(),
                    party_name: "甲黨".into(),
                    total_votes: 80,
                    is_elected: true,
                }],
                history: vec![HistoryEntry { year: 2020, party_name: "甲黨".into(), total_votes: 70 }],
            },
            sub_areas: vec![SubArea {
                code: AreaCode::new("63", "000", "010", "0001"),
                name: "莊敬里".into(),
                candidates: vec![],
                total_votes: 0,
                voter_turnout: 0.0,
            }],
            parent_areas: vec![
                ParentArea { code: AreaCode::new("00", "000", "000", "0000"), name: "全國".into() },
                ParentArea { code: AreaCode::new("63", "000", "000", "0000"), name: "臺北市".into() },
            ],
        }
    }

    #[test]
    fn renders_area_report() {
        let text = render_area(&result());
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "全國 > 臺北市 > 松山區");
        assert_eq!(lines[1], "2024 松山區 (63-000-010-0000)");
        assert_eq!(lines[2], "Votes: 123 total, 120 valid, 3 invalid; turnout 71.50%");
        assert!(text.contains("  甲 (甲黨): 80 *"));
        assert!(text.contains("  2020 甲黨: 70"));
        assert!(text.ends_with("  莊敬里 (63-000-010-0001): 0 votes, turnout 0.00%"));
    }

    #[test]
    fn renders_years_and_health() {
        assert_eq!(render_years(&[2024, 2020]), "Election years: 2024, 2020");
        let text = render_health("http://localhost:3000", &json!({"status": "degraded", "database": "unavailable"}));
        assert_eq!(text, "Server: http://localhost:3000\nStatus: degraded\nDatabase: unavailable");
    }
}
