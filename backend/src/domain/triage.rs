//! Keyword-driven symptom triage and intake follow-up.
//!
//! Both responders are pure functions over lower-cased free text, driven by
//! fixed rule tables declared as data so individual rules can be tested and
//! reordered without touching control flow. There is no model and no state;
//! any conversation history lives entirely in the caller.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Disclaimer attached to every triage assessment.
pub const TRIAGE_DISCLAIMER: &str = "This is not medical advice. Please consult a real doctor.";

/// Condition reported when no triage rule matches.
const GENERAL_CONDITION: &str = "General / non-specific illness – further evaluation needed";

/// Open-ended prompt returned when no follow-up keyword matches.
const OPEN_PROMPT: &str =
    "Can you describe your main symptom, when it started, and what makes it better or worse?";

/// One triage rule.
///
/// Matches when at least one `any` substring occurs (vacuously true when the
/// list is empty) and every `all` substring occurs.
struct TriageRule {
    any: &'static [&'static str],
    all: &'static [&'static str],
    condition: &'static str,
}

impl TriageRule {
    fn matches(&self, text: &str) -> bool {
        let any_ok = self.any.is_empty() || self.any.iter().any(|needle| text.contains(needle));
        let all_ok = self.all.iter().all(|needle| text.contains(needle));
        any_ok && all_ok
    }
}

/// Triage rules, evaluated in priority order. Every matching rule
/// contributes its condition; the order here is the order of the output.
const TRIAGE_RULES: &[TriageRule] = &[
    TriageRule {
        any: &["chest pain", "shortness of breath"],
        all: &[],
        condition: "Cardiac issue / emergency – seek urgent care",
    },
    TriageRule {
        any: &[],
        all: &["fever", "cough"],
        condition: "Viral or bacterial respiratory infection",
    },
    TriageRule {
        any: &[],
        all: &["headache", "vomit"],
        condition: "Migraine or raised intracranial pressure",
    },
];

/// Follow-up rules: the first keyword found in the message selects the
/// question. Order matters; "fever" wins over "pain" when both occur.
const FOLLOW_UP_RULES: &[(&str, &str)] = &[
    (
        "fever",
        "How long have you had the fever and how high has it gone?",
    ),
    (
        "pain",
        "Where is the pain located and how severe is it from 1 to 10?",
    ),
    (
        "breath",
        "Are you short of breath at rest, or only on exertion?",
    ),
];

/// Result of a symptom triage pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct TriageAssessment {
    /// Conditions suggested by the matching rules, in rule order.
    pub possible_conditions: Vec<String>,
    /// Fixed disclaimer; always present.
    pub advice: String,
}

/// Assess free-text symptoms against the triage rule table.
///
/// All matching rules contribute a condition, in table order; when nothing
/// matches, the generic fallback condition is reported instead.
pub fn assess_symptoms(symptoms: &str) -> TriageAssessment {
    let text = symptoms.to_lowercase();

    let mut possible_conditions: Vec<String> = TRIAGE_RULES
        .iter()
        .filter(|rule| rule.matches(&text))
        .map(|rule| rule.condition.to_owned())
        .collect();

    if possible_conditions.is_empty() {
        possible_conditions.push(GENERAL_CONDITION.to_owned());
    }

    TriageAssessment {
        possible_conditions,
        advice: TRIAGE_DISCLAIMER.to_owned(),
    }
}

/// Pick the intake follow-up question for a chat message.
///
/// Returns exactly one canned question: the first rule whose keyword occurs
/// in the lower-cased message, or the open-ended prompt when none do.
pub fn intake_follow_up(message: &str) -> &'static str {
    let text = message.to_lowercase();

    FOLLOW_UP_RULES
        .iter()
        .find(|(keyword, _)| text.contains(keyword))
        .map_or(OPEN_PROMPT, |&(_, question)| question)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn fever_and_cough_suggest_respiratory_infection() {
        let assessment = assess_symptoms("I have a fever and a cough");
        assert_eq!(
            assessment.possible_conditions,
            vec!["Viral or bacterial respiratory infection".to_owned()]
        );
        assert_eq!(assessment.advice, TRIAGE_DISCLAIMER);
    }

    #[test]
    fn unmatched_symptoms_fall_back_to_generic_condition() {
        let assessment = assess_symptoms("I feel generally unwell");
        assert_eq!(
            assessment.possible_conditions,
            vec![GENERAL_CONDITION.to_owned()]
        );
        assert_eq!(assessment.advice, TRIAGE_DISCLAIMER);
    }

    #[test]
    fn multiple_matches_are_reported_in_rule_order() {
        let assessment = assess_symptoms("Chest pain plus a fever and bad cough");
        assert_eq!(
            assessment.possible_conditions,
            vec![
                "Cardiac issue / emergency – seek urgent care".to_owned(),
                "Viral or bacterial respiratory infection".to_owned(),
            ]
        );
    }

    #[rstest]
    #[case("shortness of breath on stairs", "Cardiac issue / emergency – seek urgent care")]
    #[case("headache and vomiting since morning", "Migraine or raised intracranial pressure")]
    fn single_rule_matches(#[case] symptoms: &str, #[case] expected: &str) {
        let assessment = assess_symptoms(symptoms);
        assert_eq!(assessment.possible_conditions, vec![expected.to_owned()]);
    }

    #[test]
    fn fever_alone_does_not_match_the_respiratory_rule() {
        let assessment = assess_symptoms("running a fever");
        assert_eq!(
            assessment.possible_conditions,
            vec![GENERAL_CONDITION.to_owned()]
        );
    }

    #[test]
    fn matching_is_case_insensitive() {
        let assessment = assess_symptoms("CHEST PAIN");
        assert_eq!(
            assessment.possible_conditions,
            vec!["Cardiac issue / emergency – seek urgent care".to_owned()]
        );
    }

    #[rstest]
    #[case("I have a fever", "How long have you had the fever and how high has it gone?")]
    #[case(
        "my chest hurts with pain",
        "Where is the pain located and how severe is it from 1 to 10?"
    )]
    #[case(
        "short of breath when walking",
        "Are you short of breath at rest, or only on exertion?"
    )]
    #[case("I have a headache", OPEN_PROMPT)]
    fn follow_up_picks_the_first_matching_keyword(#[case] message: &str, #[case] expected: &str) {
        assert_eq!(intake_follow_up(message), expected);
    }

    #[test]
    fn fever_takes_precedence_over_pain() {
        let reply = intake_follow_up("fever and pain everywhere");
        assert_eq!(
            reply,
            "How long have you had the fever and how high has it gone?"
        );
    }
}
