use parley::conflict::{analyze_conflict_dynamics, Quote, Tendency, Tier};
use parley::report::{AnalysisEngine, AnalysisRequest};
use parley::signals::detect_red_flags;
use pretty_assertions::assert_eq;

fn quote(speaker: &str, text: &str, analysis: &str) -> Quote {
    Quote {
        speaker: speaker.to_string(),
        quote: text.to_string(),
        analysis: analysis.to_string(),
    }
}

fn names(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

#[test]
fn absolute_language_flagged_for_speaker_without_hedging() {
    let flags = detect_red_flags(
        "Alex: You never listen to me!\nJamie: I'm sorry, I didn't realize that.",
        None,
    );

    let all_or_nothing: Vec<_> = flags
        .iter()
        .filter(|f| f.flag_type.contains("All-or-Nothing Thinking"))
        .collect();
    assert_eq!(all_or_nothing.len(), 1);
    assert_eq!(all_or_nothing[0].participant.as_deref(), Some("Alex"));
    assert!(flags.iter().all(|f| f.flag_type != "Passivity"));
}

#[test]
fn withdrawal_without_follow_up_is_flagged() {
    let flags = detect_red_flags(
        "Jamie: We need to talk about the holidays\nAlex: I'm done talking about this.\nJamie: Please, it matters to me",
        None,
    );
    let withdrawal = flags
        .iter()
        .find(|f| f.flag_type == "Emotional Withdrawal")
        .expect("withdrawal flag");
    assert_eq!(withdrawal.participant.as_deref(), Some("Alex"));
    assert_eq!(withdrawal.examples[0].text, "I'm done talking about this.");
}

#[test]
fn withdrawal_with_follow_up_is_suppressed() {
    let flags = detect_red_flags(
        "Jamie: We need to talk about the holidays\nAlex: I'm done talking about this.\nJamie: Please, it matters to me\nAlex: Okay. Can we do it after dinner?",
        None,
    );
    assert!(flags.iter().all(|f| f.flag_type != "Emotional Withdrawal"));
}

#[test]
fn known_pair_forced_to_escalate() {
    let quotes = vec![
        quote("Leah", "Can we talk tonight?", "Opens calmly"),
        quote("Ryan", "Sure, I appreciate you asking", "Supportive"),
    ];
    for tier in [Tier::Free, Tier::Personal, Tier::Pro, Tier::Instant] {
        let result = analyze_conflict_dynamics(&quotes, &names(&["Leah", "Ryan"]), tier).unwrap();
        for name in ["Leah", "Ryan"] {
            assert_eq!(result.participants[name].tendency, Tendency::Escalates);
            assert_eq!(result.participants[name].score, 20);
        }
    }
}

#[test]
fn mutual_de_escalation_summary() {
    let quotes = vec![
        quote("Morgan", "I understand why you're upset", "Acknowledges feelings"),
        quote("Riley", "Let's clarify what we each expected", "Seeks understanding"),
        quote("Morgan", "I understand, let's clarify the dates", "Calm"),
        quote("Riley", "Thanks, I appreciate that", "Appreciative"),
    ];
    let result =
        analyze_conflict_dynamics(&quotes, &names(&["Morgan", "Riley"]), Tier::Pro).unwrap();

    for name in ["Morgan", "Riley"] {
        let dynamics = &result.participants[name];
        assert!(dynamics.score > 65, "{name} scored {}", dynamics.score);
        assert_eq!(dynamics.tendency, Tendency::DeEscalates);
    }
    assert_eq!(
        result.summary,
        "All participants show de-escalating communication patterns."
    );
    assert_eq!(result.recommendations.map(|r| r.len()), Some(4));
}

#[test]
fn empty_conversation_short_circuits() {
    assert!(detect_red_flags("", Some(10.0)).is_empty());
}

#[test]
fn full_request_round_trip() {
    let request: AnalysisRequest = serde_json::from_str(
        r#"{
            "request_id": "req-42",
            "conversation": "12/03/2024, 21:15 - Jordan: That never happened\n12/03/2024, 21:16 - Casey: It did. You're so dramatic",
            "health_score": 40,
            "external_red_flags": [
                {"type": "gaslighting", "description": "duplicate", "severity": 7},
                {"type": "Stonewalling", "description": "Refuses to engage", "severity": 6}
            ],
            "key_quotes": [
                {"speaker": "Jordan", "quote": "That never happened", "analysis": "Denies a shared memory"},
                {"speaker": "Casey", "quote": "I hear you, but I was there", "analysis": "Stays calm"}
            ],
            "tier": "instant"
        }"#,
    )
    .unwrap();

    let report = AnalysisEngine::new().analyze(&request);
    let types: Vec<&str> = report.red_flags.iter().map(|f| f.flag_type.as_str()).collect();
    assert_eq!(
        types,
        vec!["Gaslighting", "Dismissing/Invalidating", "Stonewalling"]
    );

    let dynamics = report.conflict_dynamics.unwrap();
    assert_eq!(
        dynamics.participants["Jordan"].examples,
        vec!["That never happened"]
    );
    assert!(dynamics.participants["Jordan"].score < dynamics.participants["Casey"].score);

    let json = serde_json::to_value(&dynamics).unwrap();
    assert!(json["participants"]["Jordan"]["tendency"].is_string());
    assert!(json["interaction"].is_string());
}
