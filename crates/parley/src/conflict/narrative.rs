//! Summary, interaction and recommendation text for a scored conversation.

use super::scorer::Tendency;
use super::Tier;

/// Score gap above which one participant is named the primary escalator.
pub const IMBALANCE_GAP: u8 = 30;

/// One participant's final standing, in participant order.
#[derive(Debug, Clone, Copy)]
pub struct Standing<'a> {
    pub name: &'a str,
    pub score: u8,
    pub tendency: Tendency,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Pattern<'a> {
    Imbalance { low: &'a str, high: &'a str },
    MutualEscalation,
    MutualDeEscalation,
    Mixed,
}

fn classify<'a>(standings: &[Standing<'a>]) -> Pattern<'a> {
    // Only a two-person exchange has a single primary escalator.
    if let [first, second] = standings {
        let (low, high) = if second.score < first.score {
            (second, first)
        } else {
            (first, second)
        };
        if high.score - low.score > IMBALANCE_GAP {
            return Pattern::Imbalance {
                low: low.name,
                high: high.name,
            };
        }
    }

    if standings.iter().all(|s| s.tendency == Tendency::Escalates) {
        Pattern::MutualEscalation
    } else if standings.iter().all(|s| s.tendency == Tendency::DeEscalates) {
        Pattern::MutualDeEscalation
    } else {
        Pattern::Mixed
    }
}

/// "A", "A and B", "A, B and C"
fn join_names(names: &[&str]) -> String {
    match names {
        [] => String::new(),
        [only] => only.to_string(),
        [init @ .., last] => format!("{} and {}", init.join(", "), last),
    }
}

fn names_with<'a>(standings: &[Standing<'a>], tendency: Tendency) -> Vec<&'a str> {
    standings
        .iter()
        .filter(|s| s.tendency == tendency)
        .map(|s| s.name)
        .collect()
}

pub fn summarize(standings: &[Standing<'_>]) -> String {
    if standings.is_empty() {
        return "No participants could be assessed.".to_string();
    }

    if let Pattern::Imbalance { low, high } = classify(standings) {
        return format!(
            "{low} appears to be the primary escalator in this conversation, while {high} attempts to maintain constructive communication."
        );
    }

    let escalating = names_with(standings, Tendency::Escalates);
    let de_escalating = names_with(standings, Tendency::DeEscalates);
    let mixed = names_with(standings, Tendency::Mixed);

    if escalating.len() == standings.len() {
        return "All participants show escalating communication patterns.".to_string();
    }
    if de_escalating.len() == standings.len() {
        return "All participants show de-escalating communication patterns.".to_string();
    }
    if mixed.len() == standings.len() {
        return "All participants show mixed communication patterns, alternating between escalation and de-escalation.".to_string();
    }

    let verb = |names: &[&str], plural: &'static str, singular: &'static str| {
        if names.len() == 1 {
            singular
        } else {
            plural
        }
    };

    let mut sentences = Vec::new();
    if !escalating.is_empty() {
        sentences.push(format!(
            "{} {} to escalate conflict.",
            join_names(&escalating),
            verb(&escalating, "tend", "tends")
        ));
    }
    if !de_escalating.is_empty() {
        sentences.push(format!(
            "{} {} to de-escalate conflict.",
            join_names(&de_escalating),
            verb(&de_escalating, "tend", "tends")
        ));
    }
    if !mixed.is_empty() {
        sentences.push(format!(
            "{} {} a mixed pattern.",
            join_names(&mixed),
            verb(&mixed, "show", "shows")
        ));
    }

    sentences.join(" ")
}

/// Narrative of how the participants interact. `None` for the free tier.
pub fn interaction(standings: &[Standing<'_>], tier: Tier) -> Option<String> {
    if !tier.includes_narrative() || standings.is_empty() {
        return None;
    }

    let text = match classify(standings) {
        Pattern::Imbalance { low, high } => format!(
            "{low} repeatedly raises the temperature of the exchange, while {high} tends to respond by trying to calm things down. This imbalance can leave {high} carrying most of the repair work."
        ),
        Pattern::MutualEscalation => "Both sides are feeding the conflict: each escalation is met with another, so disagreements tend to spiral rather than resolve.".to_string(),
        Pattern::MutualDeEscalation => "The exchange stays constructive: participants acknowledge each other's points and steer disagreements toward resolution.".to_string(),
        Pattern::Mixed => "The conversation moves between escalation and repair, and neither side consistently drives the conflict.".to_string(),
    };

    Some(text)
}

/// Advice list; pro and instant tiers receive additional, more specific
/// items. `None` for the free tier.
pub fn recommendations(standings: &[Standing<'_>], tier: Tier) -> Option<Vec<String>> {
    if !tier.includes_narrative() || standings.is_empty() {
        return None;
    }

    let (base, detailed): (Vec<String>, Vec<String>) = match classify(standings) {
        Pattern::Imbalance { low, high } => (
            vec![
                format!("{low} could pause before responding when frustrated and name the feeling instead of the accusation."),
                format!("{high} can keep setting calm boundaries while asking for specific changes."),
            ],
            vec![
                "Agree on a time-out signal either person can use when a discussion starts to escalate.".to_string(),
                format!("{low} could restate {high}'s point before answering it, to respond to what was said rather than what was assumed."),
            ],
        ),
        Pattern::MutualEscalation => (
            vec![
                "Take a break when messages get heated and return to the topic once both of you are calm.".to_string(),
                "Replace absolute statements such as \"you always\" or \"you never\" with specific, recent examples.".to_string(),
            ],
            vec![
                "Use \"I feel ... when ...\" statements to describe impact without assigning blame.".to_string(),
                "Consider a structured conversation or a counselor to break the escalation cycle.".to_string(),
            ],
        ),
        Pattern::MutualDeEscalation => (
            vec![
                "Keep acknowledging each other's perspective; it is clearly working.".to_string(),
                "Continue clarifying intentions early when a misunderstanding appears.".to_string(),
            ],
            vec![
                "Revisit unresolved topics while the tone is positive rather than letting them build up.".to_string(),
                "Notice which phrases helped calm things down and use them deliberately in harder conversations.".to_string(),
            ],
        ),
        Pattern::Mixed => (
            vec![
                "Notice the moments where the conversation turns and slow down at those points.".to_string(),
                "Check your understanding of the other person's point before responding.".to_string(),
            ],
            vec![
                "Agree on ground rules for difficult topics, such as no interrupting and no name-calling.".to_string(),
                "Follow up on tense exchanges later to repair and clarify what each person meant.".to_string(),
            ],
        ),
    };

    let mut items = base;
    if tier.is_detailed() {
        items.extend(detailed);
    }
    Some(items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn standing(name: &str, score: u8) -> Standing<'_> {
        Standing {
            name,
            score,
            tendency: Tendency::from_score(score),
        }
    }

    #[test]
    fn test_primary_escalator() {
        let standings = [standing("Alex", 20), standing("Jamie", 80)];
        assert_eq!(
            summarize(&standings),
            "Alex appears to be the primary escalator in this conversation, while Jamie attempts to maintain constructive communication."
        );
    }

    #[test]
    fn test_gap_of_exactly_thirty_is_not_imbalance() {
        let standings = [standing("Alex", 40), standing("Jamie", 70)];
        assert_eq!(
            summarize(&standings),
            "Jamie tends to de-escalate conflict. Alex shows a mixed pattern."
        );
    }

    #[test]
    fn test_all_de_escalating() {
        let standings = [standing("A", 75), standing("B", 90)];
        assert_eq!(
            summarize(&standings),
            "All participants show de-escalating communication patterns."
        );
    }

    #[test]
    fn test_set_membership_sentences() {
        let standings = [
            standing("A", 35),
            standing("B", 30),
            standing("C", 60),
        ];
        assert_eq!(
            summarize(&standings),
            "A and B tend to escalate conflict. C shows a mixed pattern."
        );
    }

    #[test]
    fn test_wide_gap_among_three_is_not_imbalance() {
        let standings = [
            standing("A", 10),
            standing("B", 50),
            standing("C", 90),
        ];
        assert_eq!(
            summarize(&standings),
            "A tends to escalate conflict. C tends to de-escalate conflict. B shows a mixed pattern."
        );
        assert!(interaction(&standings, Tier::Pro)
            .unwrap()
            .starts_with("The conversation moves between escalation and repair"));
    }

    #[test]
    fn test_primary_escalator_listed_second() {
        let standings = [standing("Jamie", 85), standing("Alex", 15)];
        assert!(summarize(&standings).starts_with("Alex appears to be the primary escalator"));
    }

    #[test]
    fn test_join_names() {
        assert_eq!(join_names(&["A"]), "A");
        assert_eq!(join_names(&["A", "B"]), "A and B");
        assert_eq!(join_names(&["A", "B", "C"]), "A, B and C");
    }

    #[test]
    fn test_free_tier_has_no_narrative() {
        let standings = [standing("A", 20), standing("B", 25)];
        assert_eq!(interaction(&standings, Tier::Free), None);
        assert_eq!(recommendations(&standings, Tier::Free), None);
    }

    #[test]
    fn test_detailed_tiers_get_more_recommendations() {
        let standings = [standing("A", 20), standing("B", 25)];
        let personal = recommendations(&standings, Tier::Personal).unwrap();
        let pro = recommendations(&standings, Tier::Pro).unwrap();
        assert_eq!(personal.len(), 2);
        assert_eq!(pro.len(), 4);
        assert_eq!(pro[..2], personal[..]);
        assert!(interaction(&standings, Tier::Personal)
            .unwrap()
            .starts_with("Both sides are feeding the conflict"));
    }

    #[test]
    fn test_imbalance_recommendations_name_participants() {
        let standings = [standing("Alex", 10), standing("Jamie", 90)];
        let items = recommendations(&standings, Tier::Instant).unwrap();
        assert!(items[0].starts_with("Alex could pause"));
        assert!(items[3].contains("Jamie's point"));
    }
}
