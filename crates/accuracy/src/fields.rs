//! Tracked observation fields.
//!
//! The set of count fields that two scouts watching the same robot must
//! agree on. The declaration below generates the struct, the wire-name list
//! and the field-by-field comparison from one schema, so adding a field is a
//! one-line change.

use serde::{Deserialize, Serialize};

macro_rules! tracked_fields {
    ($( $(#[$doc:meta])* $field:ident => $wire:literal ),+ $(,)?) => {
        /// Count observations recorded on a stand form.
        ///
        /// Every field takes part in the cross-form equality check.
        #[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
        pub struct Observations {
            $(
                $(#[$doc])*
                #[serde(rename = $wire, default)]
                pub $field: u32,
            )+
        }

        impl Observations {
            /// Wire names of every tracked field, in declaration order.
            pub const FIELD_NAMES: &'static [&'static str] = &[$($wire),+];

            /// First field (wire name) whose value differs from `other`.
            pub fn first_divergence(&self, other: &Self) -> Option<&'static str> {
                $(
                    if self.$field != other.$field {
                        return Some($wire);
                    }
                )+
                None
            }

            /// `(wire name, value)` pairs in declaration order.
            pub fn values(&self) -> Vec<(&'static str, u32)> {
                vec![$(($wire, self.$field)),+]
            }
        }
    };
}

tracked_fields! {
    auto_amp_notes => "autoAmpNotes",
    auto_speaker_notes => "autoSpeakerNotes",
    auto_notes_missed => "autoNotesMissed",
    teleop_amp_notes => "teleopAmpNotes",
    teleop_speaker_notes => "teleopSpeakerNotes",
    /// Speaker notes scored while the speaker was amplified.
    teleop_amplified_speaker_notes => "teleopAmplifiedSpeakerNotes",
    teleop_notes_missed => "teleopNotesMissed",
    /// Notes passed across the field rather than scored.
    shuttle_notes => "shuttleNotes",
    trap_notes => "trapNotes",
    trap_attempts => "trapAttempts",
    /// Robots hanging on the same chain, including this one.
    number_on_chain => "numberOnChain",
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equal_observations_have_no_divergence() {
        let a = Observations { auto_amp_notes: 2, trap_notes: 1, ..Default::default() };
        let b = a.clone();
        assert_eq!(a.first_divergence(&b), None);
    }

    #[test]
    fn reports_first_field_in_declaration_order() {
        let a = Observations::default();
        let b = Observations {
            teleop_amp_notes: 1,
            number_on_chain: 2,
            ..Default::default()
        };
        assert_eq!(a.first_divergence(&b), Some("teleopAmpNotes"));
    }

    #[test]
    fn field_names_cover_every_value() {
        let obs = Observations::default();
        let names: Vec<&str> = obs.values().into_iter().map(|(n, _)| n).collect();
        assert_eq!(names, Observations::FIELD_NAMES);
        assert_eq!(Observations::FIELD_NAMES.len(), 11);
    }

    #[test]
    fn deserializes_camel_case_with_defaults() {
        let obs: Observations =
            serde_json::from_str(r#"{"autoSpeakerNotes": 3, "trapAttempts": 1}"#).unwrap();
        assert_eq!(obs.auto_speaker_notes, 3);
        assert_eq!(obs.trap_attempts, 1);
        assert_eq!(obs.shuttle_notes, 0);
    }
}
