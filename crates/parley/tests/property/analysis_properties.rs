use std::collections::HashSet;

use parley::conflict::{analyze_conflict_dynamics, Quote, Tendency, Tier};
use parley::signals::detect_red_flags;
use proptest::prelude::*;

const SPEAKERS: [&str; 3] = ["Alex", "Jamie", "Sam"];

const NEUTRAL_LINES: [&str; 6] = [
    "Want to grab dinner at 7?",
    "Sure, the usual place",
    "Running ten minutes behind",
    "Can you pick up milk on the way",
    "The meeting moved to Thursday",
    "See you soon",
];

const LOADED_LINES: [&str; 12] = [
    "You never listen to me!",
    "You always do this",
    "That never happened",
    "I'm done talking about this.",
    "If you leave, I'll hurt myself",
    "After everything I've done for you",
    "Must be nice",
    "You're being dramatic",
    "It's all your fault",
    "I didn't realize that",
    "Maybe I overreacted",
    "I'm keeping the kids",
];

const ESCALATING_QUOTES: [&str; 6] = [
    "This is stupid",
    "I hate this",
    "Stop yelling",
    "You're pathetic",
    "That's useless",
    "I'm sick of this",
];

const MIXED_QUOTES: [&str; 8] = [
    "You never listen",
    "I understand, let's clarify",
    "Sorry, I hear you",
    "Whatever!",
    "That's not what happened",
    "Thanks for your support",
    "hello",
    "You're crazy! Shut up!",
];

fn transcript(lines: impl Strategy<Value = &'static str>) -> impl Strategy<Value = String> {
    prop::collection::vec((prop::sample::select(SPEAKERS.to_vec()), lines), 0..24).prop_map(
        |pairs| {
            pairs
                .into_iter()
                .map(|(speaker, line)| format!("{speaker}: {line}"))
                .collect::<Vec<_>>()
                .join("\n")
        },
    )
}

fn quote_list(
    speakers: Vec<&'static str>,
    texts: Vec<&'static str>,
    max: usize,
) -> impl Strategy<Value = Vec<Quote>> {
    prop::collection::vec(
        (prop::sample::select(speakers), prop::sample::select(texts)),
        1..max,
    )
    .prop_map(|pairs| {
        pairs
            .into_iter()
            .map(|(speaker, text)| Quote {
                speaker: speaker.to_string(),
                quote: text.to_string(),
                analysis: String::new(),
            })
            .collect()
    })
}

fn any_line() -> impl Strategy<Value = &'static str> {
    prop_oneof![
        prop::sample::select(NEUTRAL_LINES.to_vec()),
        prop::sample::select(LOADED_LINES.to_vec()),
    ]
}

fn names(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

proptest! {
    #[test]
    fn neutral_transcripts_raise_no_flags(conversation in transcript(prop::sample::select(NEUTRAL_LINES.to_vec()))) {
        prop_assert!(detect_red_flags(&conversation, None).is_empty());
    }

    #[test]
    fn at_most_one_flag_per_type(conversation in transcript(any_line())) {
        let flags = detect_red_flags(&conversation, None);
        let types: HashSet<&str> = flags.iter().map(|f| f.flag_type.as_str()).collect();
        prop_assert_eq!(types.len(), flags.len());
    }

    #[test]
    fn every_flag_carries_an_attributed_example(conversation in transcript(any_line())) {
        for flag in detect_red_flags(&conversation, None) {
            prop_assert!(!flag.examples.is_empty());
            prop_assert!(SPEAKERS.contains(&flag.examples[0].from.as_str()));
            prop_assert_eq!(flag.participant.as_deref(), Some(flag.examples[0].from.as_str()));
        }
    }

    #[test]
    fn healthy_score_skips_detection(
        conversation in transcript(any_line()),
        health in 85.0f64..=100.0,
    ) {
        prop_assert!(detect_red_flags(&conversation, Some(health)).is_empty());
    }

    #[test]
    fn supportive_utterances_are_never_examples(
        conversation in transcript(prop_oneof![
            any_line(),
            prop::sample::select(LOADED_LINES.to_vec()).prop_map(|line| match line {
                "You never listen to me!" => "Thank you, you never let me down",
                "Must be nice" => "Must be nice, I'm so grateful for you",
                "You always do this" => "You always do this, I'm always here for you",
                "It's all your fault" => "You never help, you're so ungrateful",
                other => other,
            }),
        ])
    ) {
        let supportive = ["thank you", "grateful", "always here for you"];
        for flag in detect_red_flags(&conversation, None) {
            for example in &flag.examples {
                let text = example.text.to_lowercase();
                prop_assert!(
                    !supportive.iter().any(|phrase| text.contains(phrase)),
                    "{} used supportive example {:?}", flag.flag_type, example.text
                );
            }
        }
    }

    #[test]
    fn scores_stay_in_range(
        quotes in quote_list(SPEAKERS.to_vec(), MIXED_QUOTES.to_vec(), 40),
        tier in prop::sample::select(vec![Tier::Free, Tier::Personal, Tier::Pro, Tier::Instant]),
    ) {
        let result = analyze_conflict_dynamics(&quotes, &names(&SPEAKERS), tier).unwrap();
        prop_assert_eq!(result.participants.len(), SPEAKERS.len());
        for dynamics in result.participants.values() {
            prop_assert!(dynamics.score <= 100);
            prop_assert_eq!(dynamics.tendency, Tendency::from_score(dynamics.score));
            prop_assert!(dynamics.examples.len() <= tier.example_limit());
        }
    }

    #[test]
    fn free_tier_never_discloses_examples(
        quotes in quote_list(vec!["A", "B"], MIXED_QUOTES.to_vec(), 20),
    ) {
        let result = analyze_conflict_dynamics(&quotes, &names(&["A", "B"]), Tier::Free).unwrap();
        prop_assert!(result.participants.values().all(|p| p.examples.is_empty()));
        prop_assert!(result.interaction.is_none());
        prop_assert!(result.recommendations.is_none());
    }

    #[test]
    fn two_low_scorers_both_escalate(
        first in quote_list(vec!["A"], ESCALATING_QUOTES.to_vec(), 6),
        second in quote_list(vec!["B"], ESCALATING_QUOTES.to_vec(), 6),
    ) {
        let all: Vec<Quote> = first.into_iter().chain(second).collect();
        let result = analyze_conflict_dynamics(&all, &names(&["A", "B"]), Tier::Pro).unwrap();
        for dynamics in result.participants.values() {
            prop_assert_eq!(dynamics.tendency, Tendency::Escalates);
            prop_assert!(dynamics.score <= 30);
        }
    }

    #[test]
    fn missing_inputs_yield_none(
        quotes in quote_list(SPEAKERS.to_vec(), MIXED_QUOTES.to_vec(), 10),
        tier in ".{0,12}",
    ) {
        let tier = Tier::parse(&tier);
        prop_assert!(analyze_conflict_dynamics(&[], &names(&SPEAKERS), tier).is_none());
        prop_assert!(analyze_conflict_dynamics(&quotes, &[], tier).is_none());
    }
}
