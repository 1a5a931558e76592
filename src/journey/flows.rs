//! The clinical data-entry journeys.

use super::JourneyMap;
use crate::core::Result;
use crate::model::{Programme, UserRole};
use std::collections::{BTreeMap, BTreeSet};

pub const PATIENT_PAGE: &str = "patient";
pub const CHECK_ANSWERS: &str = "check-answers";

/// State the journey predicates read: who is signed in, what they have
/// answered so far in this journey, and which feature flags are on.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlowState {
    pub role: UserRole,
    pub programme: Programme,
    pub answers: BTreeMap<String, String>,
    pub flags: BTreeSet<String>,
}

impl FlowState {
    pub fn new(role: UserRole) -> Self {
        Self {
            role,
            ..Self::default()
        }
    }

    pub fn answer(mut self, question: &str, value: &str) -> Self {
        self.answers.insert(question.to_string(), value.to_string());
        self
    }

    pub fn flag(mut self, name: &str) -> Self {
        self.flags.insert(name.to_string());
        self
    }

    pub fn programme(mut self, programme: Programme) -> Self {
        self.programme = programme;
        self
    }

    pub fn answered(&self, question: &str, value: &str) -> bool {
        self.answers.get(question).map(String::as_str) == Some(value)
    }

    pub fn has_flag(&self, name: &str) -> bool {
        self.flags.contains(name)
    }
}

/// Recording a parent's consent response.
///
/// A missing response goes straight to check answers. Health questions only
/// follow consent; nurses and pharmacists triage in the same pass when any
/// answer raised a concern.
pub fn consent() -> Result<JourneyMap<FlowState>> {
    JourneyMap::builder("consent")
        .fallback(PATIENT_PAGE)
        .terminal(CHECK_ANSWERS)
        .step("parent")
        .step("decision")
        .step_skip_if("health-questions", |s: &FlowState| !s.answered("decision", "given"))
        .step_skip_if("triage", |s: &FlowState| {
            !(s.answered("decision", "given")
                && s.answered("health-concerns", "yes")
                && s.role.is_prescriber())
        })
        .step_skip_if("refusal-reason", |s: &FlowState| !s.answered("decision", "refused"))
        .step_skip_if("refusal-details", |s: &FlowState| {
            !s.answered("decision", "refused")
                || !["medical", "already-vaccinated", "elsewhere"]
                    .iter()
                    .any(|reason| s.answered("refusal-reason", reason))
        })
        .fork("decision", CHECK_ANSWERS, |s: &FlowState| {
            s.answered("decision", "no-response")
        })
        .build()
}

pub fn triage() -> Result<JourneyMap<FlowState>> {
    JourneyMap::builder("triage")
        .fallback(PATIENT_PAGE)
        .terminal(CHECK_ANSWERS)
        .step("outcome")
        .step_skip_if("delay-until", |s: &FlowState| {
            !s.answered("outcome", "delay-vaccination")
        })
        .step("notes")
        .build()
}

/// Recording a vaccination at a session.
///
/// Healthcare assistants need a patient specific direction when the `psd`
/// flag is on, except for programmes they may give under the national
/// protocol. The nasal flu vaccine has no injection site to record.
pub fn vaccination() -> Result<JourneyMap<FlowState>> {
    JourneyMap::builder("vaccination")
        .fallback(PATIENT_PAGE)
        .terminal(CHECK_ANSWERS)
        .step("pre-screening")
        .step_skip_if("instruction", |s: &FlowState| {
            !(s.role == UserRole::HealthcareAssistant
                && s.has_flag("psd")
                && !s.programme.allows_healthcare_assistant())
        })
        .step_skip_if("site", |s: &FlowState| {
            !s.answered("ready", "yes") || s.programme == Programme::Flu
        })
        .step_skip_if("batch", |s: &FlowState| !s.answered("ready", "yes"))
        .step_skip_if("outcome", |s: &FlowState| s.answered("ready", "yes"))
        .step("notes")
        .build()
}

/// Uploading a cohort, vaccination or class list file.
pub fn upload() -> Result<JourneyMap<FlowState>> {
    JourneyMap::builder("upload")
        .fallback("uploads")
        .terminal("summary")
        .step("type")
        .step_skip_if("school", |s: &FlowState| !s.answered("type", "class-list"))
        .step_skip_if("year-groups", |s: &FlowState| !s.answered("type", "class-list"))
        .step("file")
        .fork("type", "file", |s: &FlowState| s.has_flag("single-school"))
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_flows_build() {
        assert!(consent().is_ok());
        assert!(triage().is_ok());
        assert!(vaccination().is_ok());
        assert!(upload().is_ok());
    }

    #[test]
    fn test_flow_state_answers() {
        let state = FlowState::new(UserRole::Nurse)
            .answer("decision", "given")
            .flag("psd");
        assert!(state.answered("decision", "given"));
        assert!(!state.answered("decision", "refused"));
        assert!(state.has_flag("psd"));
        assert!(!state.has_flag("other"));
    }
}
