//! Plain-text rendering of an accuracy report.

use std::fmt::Write;

use crate::config::form_link;
use crate::model::{AccuracyReport, CoverageIssue};

/// Render the report as independent sections, one line per entry.
pub fn render_text(report: &AccuracyReport) -> String {
    let mut out = String::new();
    let link = |id: &str| form_link(&report.meta.link_base, id);

    let _ = writeln!(
        out,
        "Form accuracy for {} (engine {}, {})",
        report.meta.competition, report.meta.engine_version, report.meta.run_at
    );

    section(&mut out, "Mismatched Forms", report.mismatched_forms.len());
    for m in &report.mismatched_forms {
        let _ = writeln!(
            out,
            "  match {:<4} team {:<6} {:<28} {}",
            m.match_number,
            m.team_number,
            m.field,
            link(&m.form_id)
        );
    }

    section(&mut out, "Mismatched Auto Line with TBA", report.mismatched_auto_line.len());
    for m in &report.mismatched_auto_line {
        let recorded = if m.recorded { "crossed" } else { "not crossed" };
        let _ = writeln!(
            out,
            "  match {:<4} team {:<6} {} robot {}  form: {}, TBA: {}  {}",
            m.match_number,
            m.team_number,
            m.alliance,
            m.robot,
            recorded,
            m.authoritative,
            link(&m.form_id)
        );
    }

    section(&mut out, "Mismatched Endgame Status with TBA", report.mismatched_endgame.len());
    for m in &report.mismatched_endgame {
        let _ = writeln!(
            out,
            "  match {:<4} team {:<6} {} robot {}  form: {}, TBA: {}  {}",
            m.match_number,
            m.team_number,
            m.alliance,
            m.robot,
            m.recorded,
            m.authoritative,
            link(&m.form_id)
        );
    }

    section(&mut out, "Unverifiable", report.unverifiable.len());
    for u in &report.unverifiable {
        let _ = writeln!(
            out,
            "  match {:<4} team {:<6} {} form(s): {}",
            u.match_number, u.team_number, u.form_count, u.reason
        );
    }

    section(&mut out, "Alliance Coverage", report.alliance_coverage.len());
    for a in &report.alliance_coverage {
        match &a.issue {
            CoverageIssue::IncompleteAlliance { form_count, expected } => {
                let _ = writeln!(
                    out,
                    "  match {:<4} {:<5} {form_count} of {expected} forms",
                    a.match_number, a.alliance
                );
            }
            CoverageIssue::SplitPair { teams: [first, second] } => {
                let _ = writeln!(
                    out,
                    "  match {:<4} {:<5} uneven scouting between teams {first} and {second}",
                    a.match_number, a.alliance
                );
            }
        }
    }

    let s = &report.summary;
    let _ = writeln!(
        out,
        "\n{} forms in {} groups, {} verified against {} matches: {} discrepancies, {} unverifiable",
        s.forms_checked,
        s.team_groups,
        s.groups_verified,
        s.matches_available,
        s.discrepancies(),
        s.unverifiable
    );

    out
}

fn section(out: &mut String, title: &str, count: usize) {
    let _ = writeln!(out, "\n{title} ({count})");
    if count == 0 {
        let _ = writeln!(out, "  none");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{CheckOptions, CompetitionKey};
    use crate::engine::{run, AccuracyInput};
    use crate::group::{group_by_alliance, group_by_team};
    use crate::model::Alliance;
    use crate::test_support::{alliance, breakdown, form, played};

    #[test]
    fn renders_sections_with_links() {
        let mut a = form("aaa", 10, 254, Alliance::Blue);
        a.parked = true;
        let mut b = form("bbb", 10, 254, Alliance::Blue);
        b.parked = true;
        b.scout_score = 1.0;
        let forms = vec![a, b];
        let input = AccuracyInput {
            competition: CompetitionKey::parse("2024txdal").unwrap(),
            team_groups: group_by_team(&forms),
            alliance_groups: group_by_alliance(&forms),
            matches: vec![played(
                10,
                alliance([1, 254, 3], Some(breakdown(["Yes"; 3], ["Parked"; 3]))),
                alliance([4, 5, 6], Some(breakdown(["No"; 3], ["None"; 3]))),
            )],
        };
        let options = CheckOptions {
            link_base: "https://scout.example.org".into(),
            ..CheckOptions::default()
        };

        let text = render_text(&run(&options, &input));
        assert!(text.contains("Mismatched Forms (1)"));
        assert!(text.contains("scoutScore"));
        assert!(text.contains("https://scout.example.org/records/stand-forms/bbb"));
        assert!(text.contains("Mismatched Auto Line with TBA (2)"));
        assert!(text.contains("form: not crossed, TBA: Yes"));
        assert!(text.contains("Mismatched Endgame Status with TBA (0)\n  none"));
        assert!(text.contains("Alliance Coverage (1)"));
        assert!(text.contains("2 of 6 forms"));
    }
}
