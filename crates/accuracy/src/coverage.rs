use crate::group::pair_alliance_group;
use crate::model::{AllianceGroup, CoverageAnomaly, CoverageIssue};

/// Scouting coverage problems per (match, alliance).
///
/// A group with the wrong number of forms is reported as incomplete. A full
/// group is paired by team; a pair whose two forms name different teams means
/// one robot was scouted too often and its neighbour too rarely.
pub fn alliance_coverage(groups: &[AllianceGroup], expected: usize) -> Vec<CoverageAnomaly> {
    let mut anomalies = Vec::new();

    for group in groups {
        let Some(pairs) = pair_alliance_group(group, expected) else {
            log::debug!(
                "match {} {}: {} forms, expected {}",
                group.match_number,
                group.alliance,
                group.forms.len(),
                expected
            );
            anomalies.push(CoverageAnomaly {
                match_number: group.match_number,
                alliance: group.alliance,
                issue: CoverageIssue::IncompleteAlliance {
                    form_count: group.forms.len(),
                    expected,
                },
            });
            continue;
        };

        for pair in pairs {
            let [first, second] = pair.forms;
            if first.team_number != second.team_number {
                anomalies.push(CoverageAnomaly {
                    match_number: pair.match_number,
                    alliance: group.alliance,
                    issue: CoverageIssue::SplitPair {
                        teams: [first.team_number, second.team_number],
                    },
                });
            }
        }
    }

    anomalies
}
