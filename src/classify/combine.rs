//! Multi-hand label combining.
//!
//! Merges the 0-2 per-hand labels of a frame into one `CombinedLabel`. Two
//! hands showing the same gesture become their own paired identity so that
//! e.g. a double open palm routes differently from a single one.

use crate::Gesture;

/// The merged gesture label for one frame.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum CombinedLabel {
    /// No hands, or nothing recognized on any hand.
    None,
    /// Exactly one hand, showing this gesture.
    Single(Gesture),
    /// Two hands, both showing this gesture. Distinct from `Single` of the
    /// same gesture; the two are routed to different action classes.
    BothSame(Gesture),
    /// Two hands with differing or partially recognized gestures, in
    /// hand-detection order. Always non-empty.
    Mixed(Vec<Gesture>),
}

impl CombinedLabel {
    /// Hands that contributed to this label.
    pub fn hand_count(&self) -> u8 {
        match self {
            CombinedLabel::None => 0,
            CombinedLabel::Single(_) => 1,
            CombinedLabel::BothSame(_) | CombinedLabel::Mixed(_) => 2,
        }
    }

    /// The configuration-mapping key for this label, when it has one.
    ///
    /// Mixed labels are observable (status display, logs) but carry no
    /// binding; they resolve to no action.
    pub fn mapping_key(&self) -> Option<&'static str> {
        match self {
            CombinedLabel::Single(g) => Some(g.key()),
            CombinedLabel::BothSame(g) => Some(g.paired_key()),
            CombinedLabel::None | CombinedLabel::Mixed(_) => None,
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, CombinedLabel::None)
    }
}

impl std::fmt::Display for CombinedLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CombinedLabel::None => f.write_str("none"),
            CombinedLabel::Single(g) => f.write_str(g.key()),
            CombinedLabel::BothSame(g) => f.write_str(g.paired_key()),
            CombinedLabel::Mixed(gestures) => {
                for (i, g) in gestures.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    f.write_str(g.key())?;
                }
                Ok(())
            }
        }
    }
}

/// Combine per-hand labels into the frame's label. The slice holds one entry
/// per detected hand (0-2), in hand-detection order.
pub fn combine(labels: &[Option<Gesture>]) -> CombinedLabel {
    match labels {
        [] => CombinedLabel::None,
        [Some(g)] => CombinedLabel::Single(*g),
        [None] => CombinedLabel::None,
        [Some(a), Some(b)] if a == b => CombinedLabel::BothSame(*a),
        pair => {
            let recognized: Vec<Gesture> = pair.iter().flatten().copied().collect();
            if recognized.is_empty() {
                CombinedLabel::None
            } else {
                CombinedLabel::Mixed(recognized)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_hands_is_none() {
        assert_eq!(combine(&[]), CombinedLabel::None);
    }

    #[test]
    fn single_hand_passes_through() {
        assert_eq!(
            combine(&[Some(Gesture::Stop)]),
            CombinedLabel::Single(Gesture::Stop)
        );
        assert_eq!(combine(&[None]), CombinedLabel::None);
    }

    #[test]
    fn two_identical_hands_form_the_paired_marker() {
        let label = combine(&[Some(Gesture::Stop), Some(Gesture::Stop)]);
        assert_eq!(label, CombinedLabel::BothSame(Gesture::Stop));
        // Never conflated with the single-hand gesture.
        assert_ne!(label, CombinedLabel::Single(Gesture::Stop));
        assert_eq!(label.mapping_key(), Some("is_two_stops"));
        assert_eq!(label.hand_count(), 2);
    }

    #[test]
    fn differing_hands_join_in_detection_order() {
        assert_eq!(
            combine(&[Some(Gesture::Like), Some(Gesture::Stop)]),
            CombinedLabel::Mixed(vec![Gesture::Like, Gesture::Stop])
        );
    }

    #[test]
    fn partially_recognized_pair_keeps_the_recognized_label() {
        let label = combine(&[None, Some(Gesture::Okay)]);
        assert_eq!(label, CombinedLabel::Mixed(vec![Gesture::Okay]));
        assert_eq!(label.hand_count(), 2);
        assert_eq!(label.mapping_key(), None);
    }

    #[test]
    fn two_unrecognized_hands_are_none() {
        assert_eq!(combine(&[None, None]), CombinedLabel::None);
    }

    #[test]
    fn display_joins_mixed_labels() {
        let label = combine(&[Some(Gesture::Like), Some(Gesture::Stop)]);
        assert_eq!(label.to_string(), "is_like, is_stop");
        assert_eq!(
            combine(&[Some(Gesture::Stop), Some(Gesture::Stop)]).to_string(),
            "is_two_stops"
        );
    }
}
