use std::collections::HashMap;

use crate::model::{
    Alliance, AllianceBreakdown, AuthoritativeMatch, MatchNumber, TeamNumber, UnverifiableReason,
};

/// Lookup from match number to its authoritative result.
pub struct MatchIndex<'a> {
    by_number: HashMap<MatchNumber, &'a AuthoritativeMatch>,
}

/// A match with two well-formed alliances whose breakdowns are both present.
#[derive(Debug, Clone, Copy)]
pub struct JoinedMatch<'a> {
    pub result: &'a AuthoritativeMatch,
    pub blue: &'a AllianceBreakdown,
    pub red: &'a AllianceBreakdown,
}

/// Where a team played in a joined match.
#[derive(Debug, Clone, Copy)]
pub struct Slot<'a> {
    pub alliance: Alliance,
    /// 0-based slot within the alliance.
    pub index: usize,
    pub breakdown: &'a AllianceBreakdown,
}

impl<'a> MatchIndex<'a> {
    /// Index matches by number. A later match with the same number replaces
    /// an earlier one.
    pub fn build(matches: &'a [AuthoritativeMatch]) -> Self {
        let mut by_number = HashMap::with_capacity(matches.len());
        for m in matches {
            if let Some(previous) = by_number.insert(m.match_number, m) {
                log::warn!(
                    "match number {} appears twice ({} and {}); using {}",
                    m.match_number,
                    previous.key,
                    m.key,
                    m.key
                );
            }
        }
        Self { by_number }
    }

    pub fn len(&self) -> usize {
        self.by_number.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_number.is_empty()
    }

    pub fn get(&self, match_number: MatchNumber) -> Option<&'a AuthoritativeMatch> {
        self.by_number.get(&match_number).copied()
    }

    /// Join a match number against the index.
    pub fn join(&self, match_number: MatchNumber) -> Result<JoinedMatch<'a>, UnverifiableReason> {
        let result = self.get(match_number).ok_or(UnverifiableReason::NoMatchResult)?;
        if !(result.blue.is_well_formed() && result.red.is_well_formed()) {
            return Err(UnverifiableReason::MalformedAlliance);
        }
        match (&result.blue.breakdown, &result.red.breakdown) {
            (Some(blue), Some(red)) => Ok(JoinedMatch { result, blue, red }),
            _ => Err(UnverifiableReason::MissingBreakdown),
        }
    }
}

impl<'a> JoinedMatch<'a> {
    /// Locate a team by its key: blue alliance first, then red.
    pub fn locate(&self, team: TeamNumber) -> Option<Slot<'a>> {
        if let Some(index) = self.result.blue.slot_of(team) {
            return Some(Slot { alliance: Alliance::Blue, index, breakdown: self.blue });
        }
        self.result
            .red
            .slot_of(team)
            .map(|index| Slot { alliance: Alliance::Red, index, breakdown: self.red })
    }
}

impl Slot<'_> {
    /// 1-based robot number as used by the results API.
    pub fn robot(&self) -> u8 {
        self.index as u8 + 1
    }
}
