//! End-to-end lookups through the engine against the in-memory store.

use dxgraph_core::prelude::*;
use dxgraph_store::{GraphSnapshot, MemoryGraphStore};
use std::collections::BTreeSet;

fn clinic() -> GraphSnapshot {
    GraphSnapshot::new()
        .node(NodeLabel::Symptom, "fever")
        .node(NodeLabel::Symptom, "cough")
        .node(NodeLabel::Symptom, "fatigue")
        .node(NodeLabel::Disease, "Flu")
        .node(NodeLabel::Disease, "Anemia")
        .node(NodeLabel::Medicine, "Paracetamol")
        .relation(RelationType::Indicates, "fever", "Flu")
        .relation(RelationType::Indicates, "cough", "Flu")
        .relation(RelationType::Indicates, "fatigue", "Anemia")
        .relation(RelationType::TreatedBy, "Flu", "Paracetamol")
}

fn engine(policy: Policy) -> MatchingEngine<MemoryGraphStore> {
    let store = MemoryGraphStore::from_snapshot(&clinic()).unwrap();
    MatchingEngine::new(store).with_policy(policy)
}

#[test]
fn any_single_symptom_finds_multi_symptom_disease() {
    let outcome = engine(Policy::Any).find_diseases("fever").unwrap();
    assert_eq!(
        outcome,
        LookupOutcome::Matches(vec![DiseaseMatch::new("Flu", ["Paracetamol"])])
    );
}

#[test]
fn exact_single_symptom_skips_multi_symptom_disease() {
    let outcome = engine(Policy::ExactSet).find_diseases("fever").unwrap();
    assert_eq!(outcome, LookupOutcome::NoMatch);
    assert!(outcome.matches().is_empty());
}

#[test]
fn exact_full_symptom_set_finds_disease() {
    let outcome = engine(Policy::ExactSet).find_diseases("fever,cough").unwrap();
    assert_eq!(outcome.matches(), &[DiseaseMatch::new("Flu", ["Paracetamol"])]);

    // Order and repetition in the input do not matter.
    let again = engine(Policy::ExactSet).find_diseases(" cough , fever, cough").unwrap();
    assert_eq!(again, outcome);
}

#[test]
fn disease_without_treatment_is_reported_with_no_medicines() {
    for policy in [Policy::Any, Policy::ExactSet] {
        let outcome = engine(policy).find_diseases("fatigue").unwrap();
        assert_eq!(outcome.matches(), &[DiseaseMatch::new("Anemia", Vec::<String>::new())]);
    }
}

#[test]
fn empty_input_reports_no_input() {
    let engine = engine(Policy::Any);
    assert_eq!(engine.find_diseases("").unwrap(), LookupOutcome::NoInput);
    assert_eq!(engine.find_diseases("  ,, ").unwrap(), LookupOutcome::NoInput);
}

#[test]
fn medicine_reached_twice_is_listed_once() {
    let snapshot = clinic().relation(RelationType::TreatedBy, "Flu", "Paracetamol");
    let store = MemoryGraphStore::from_snapshot(&snapshot).unwrap();
    let matches = MatchingEngine::new(store)
        .match_names(["cough"], Policy::Any)
        .unwrap();
    assert_eq!(matches, vec![DiseaseMatch::new("Flu", ["Paracetamol"])]);
}

#[test]
fn any_results_contain_exact_results_on_sample_graph() {
    let store = MemoryGraphStore::from_snapshot(&GraphSnapshot::sample()).unwrap();
    let engine = MatchingEngine::new(store);

    let queries: &[&[&str]] = &[
        &["fever"],
        &["fever", "cough"],
        &["cough", "sneezing"],
        &["fever", "chills", "sweating"],
        &["headache", "fatigue"],
    ];
    for names in queries {
        let set = SymptomSet::new(names.iter().copied()).unwrap();
        let any = engine.match_symptoms(&set, Policy::Any).unwrap();
        let exact = engine.match_symptoms(&set, Policy::ExactSet).unwrap();

        let any_names: BTreeSet<&str> = any.iter().map(|m| m.disease.as_str()).collect();
        for m in &exact {
            assert!(any_names.contains(m.disease.as_str()), "{} missing from ANY for {names:?}", m.disease);
        }
        // Every query here names known symptoms.
        assert!(!any.is_empty());
    }
}

#[test]
fn sample_graph_lookups() {
    let store = MemoryGraphStore::from_snapshot(&GraphSnapshot::sample()).unwrap();
    let engine = MatchingEngine::new(store);

    let cough = engine.find_diseases("cough").unwrap();
    assert_eq!(
        cough.matches(),
        &[
            DiseaseMatch::new("Common Cold", ["Vitamin C", "Zinc"]),
            DiseaseMatch::new("Flu", ["Ibuprofen", "Paracetamol"]),
        ]
    );

    let malaria = engine
        .match_names(["sweating", "chills", "fever"], Policy::ExactSet)
        .unwrap();
    assert_eq!(malaria, vec![DiseaseMatch::new("Malaria", ["Artemisinin", "Chloroquine"])]);

    let symptoms = engine.symptom_names().unwrap();
    assert_eq!(symptoms.len(), 7);
    assert!(symptoms.windows(2).all(|w| w[0] < w[1]));

    let counts = engine.graph_counts().unwrap();
    assert_eq!(counts.diseases, 5);
    assert_eq!(counts.indicates, 9);
    assert_eq!(counts.treated_by, 8);
}

#[test]
fn lookups_are_repeatable() {
    let engine = engine(Policy::Any);
    let first = engine.find_diseases("fever, fatigue").unwrap();
    assert_eq!(first.matches().len(), 2);
    for _ in 0..10 {
        assert_eq!(engine.find_diseases("fatigue,fever").unwrap(), first);
    }
}
