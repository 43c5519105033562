//! Matching engine: selects diseases for a symptom set and aggregates
//! their medicines.
//!
//! The engine:
//! 1. Normalizes the raw input into a [`SymptomSet`] (or reports `NoInput`)
//! 2. Asks the store for candidate diseases (indicated by any queried symptom)
//! 3. Merges rows per disease (symptom sets and medicine sets are unioned)
//! 4. Keeps the diseases the [`Policy`] accepts
//! 5. Returns one record per disease, sorted by name, medicines sorted and distinct
//!
//! It holds no state between calls beyond its store handle and default policy.

use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, trace};

use crate::error::{QueryFailure, Result};
use crate::normalize::symptom_set;
use crate::policy::Policy;
use crate::query::{fields, Binding, PatternQuery, QueryParams};
use crate::store::GraphStore;
use crate::types::{DiseaseMatch, GraphCounts, LookupOutcome, SymptomSet};

/// The symptom-to-disease matching engine.
#[derive(Debug, Clone)]
pub struct MatchingEngine<S> {
    store: S,
    policy: Policy,
}

impl<S: GraphStore> MatchingEngine<S> {
    /// Create an engine over `store` using [`Policy::Any`].
    pub fn new(store: S) -> Self {
        Self {
            store,
            policy: Policy::default(),
        }
    }

    pub fn with_policy(mut self, policy: Policy) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> Policy {
        self.policy
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Look up a raw, comma-separated symptom string with the engine's policy.
    ///
    /// Blank input returns [`LookupOutcome::NoInput`] without querying the
    /// store.
    pub fn find_diseases(&self, raw: &str) -> Result<LookupOutcome> {
        let Some(symptoms) = symptom_set(raw) else {
            debug!("no symptoms in input, store not queried");
            return Ok(LookupOutcome::NoInput);
        };
        let matches = self.match_symptoms(&symptoms, self.policy)?;
        Ok(LookupOutcome::from_matches(matches))
    }

    /// Match a collection of symptom names. Fails with
    /// [`LookupError::EmptyInput`](crate::error::LookupError::EmptyInput)
    /// if there are none.
    pub fn match_names<I, N>(&self, names: I, policy: Policy) -> Result<Vec<DiseaseMatch>>
    where
        I: IntoIterator<Item = N>,
        N: Into<String>,
    {
        let symptoms = SymptomSet::new(names)?;
        self.match_symptoms(&symptoms, policy)
    }

    /// Return every disease qualifying for `symptoms` under `policy`.
    ///
    /// An empty vector means nothing matched; store failures are errors.
    pub fn match_symptoms(&self, symptoms: &SymptomSet, policy: Policy) -> Result<Vec<DiseaseMatch>> {
        let query = PatternQuery::diseases(policy);
        let params = QueryParams::for_symptoms(symptoms);

        debug!(%policy, %symptoms, "querying candidate diseases");
        let rows = self.store.execute(&query, &params)?;
        let candidates = merge_rows(&rows)?;

        let matches: Vec<DiseaseMatch> = candidates
            .into_iter()
            .filter_map(|(disease, candidate)| {
                let qualifies = policy.qualifies(symptoms, &candidate.symptoms);
                trace!(%disease, qualifies, "policy check");
                qualifies.then(|| DiseaseMatch {
                    disease,
                    medicines: candidate.medicines.into_iter().collect(),
                })
            })
            .collect();

        debug!(rows = rows.len(), matches = matches.len(), "lookup complete");
        Ok(matches)
    }

    /// All symptom names the store knows, distinct and sorted.
    pub fn symptom_names(&self) -> Result<Vec<String>> {
        let rows = self.store.execute(&PatternQuery::SymptomNames, &QueryParams::none())?;
        let names = rows
            .iter()
            .map(|row| row.str_field(fields::SYMPTOM).map(str::to_string))
            .collect::<std::result::Result<BTreeSet<String>, QueryFailure>>()?;
        Ok(names.into_iter().collect())
    }

    /// Node and relation counts.
    pub fn graph_counts(&self) -> Result<GraphCounts> {
        let rows = self.store.execute(&PatternQuery::Counts, &QueryParams::none())?;
        let mut counts = GraphCounts::default();
        for row in &rows {
            let label = row.str_field(fields::LABEL)?;
            if !counts.record(label, row.u64_field(fields::COUNT)?) {
                trace!(label, "ignoring count for unknown label");
            }
        }
        Ok(counts)
    }
}

#[derive(Debug, Default)]
struct Candidate {
    symptoms: BTreeSet<String>,
    medicines: BTreeSet<String>,
}

/// Group rows by disease. A store may return one row per matching symptom
/// or per medicine path; those collapse here.
fn merge_rows(rows: &[Binding]) -> std::result::Result<BTreeMap<String, Candidate>, QueryFailure> {
    let mut merged: BTreeMap<String, Candidate> = BTreeMap::new();
    for row in rows {
        let disease = row.str_field(fields::DISEASE)?;
        let symptoms = row.str_list_field(fields::SYMPTOMS)?;
        let medicines = row.str_list_field(fields::MEDICINES)?;

        let entry = merged.entry(disease.to_string()).or_default();
        entry.symptoms.extend(symptoms.into_iter().map(str::to_string));
        entry.medicines.extend(medicines.into_iter().map(str::to_string));
    }
    Ok(merged)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LookupError;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    /// Test double: a list of (disease, symptoms, medicines) answering the
    /// candidate pattern the way a graph database would.
    struct FixtureStore {
        diseases: Vec<(&'static str, Vec<&'static str>, Vec<&'static str>)>,
        /// Emit one row per matching symptom instead of one per disease.
        row_per_symptom: bool,
        calls: AtomicUsize,
    }

    impl FixtureStore {
        fn new(diseases: Vec<(&'static str, Vec<&'static str>, Vec<&'static str>)>) -> Self {
            Self {
                diseases,
                row_per_symptom: false,
                calls: AtomicUsize::new(0),
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }

        fn row(disease: &str, symptoms: &[&str], medicines: &[&str]) -> Binding {
            Binding::new()
                .with(fields::DISEASE, disease)
                .with(fields::SYMPTOMS, symptoms.iter().map(|s| s.to_string()).collect::<Vec<_>>())
                .with(fields::MEDICINES, medicines.iter().map(|s| s.to_string()).collect::<Vec<_>>())
        }
    }

    impl GraphStore for FixtureStore {
        fn execute(&self, query: &PatternQuery, params: &QueryParams)
            -> std::result::Result<Vec<Binding>, QueryFailure> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match query {
                PatternQuery::DiseasesBySymptoms { .. } => {
                    let mut rows = Vec::new();
                    for (disease, symptoms, medicines) in &self.diseases {
                        let hits = params
                            .symptoms
                            .iter()
                            .filter(|q| symptoms.iter().any(|s| *s == q.as_str()))
                            .count();
                        let copies = if self.row_per_symptom { hits } else { hits.min(1) };
                        for _ in 0..copies {
                            rows.push(Self::row(disease, symptoms, medicines));
                        }
                    }
                    Ok(rows)
                }
                PatternQuery::SymptomNames => Ok(self
                    .diseases
                    .iter()
                    .flat_map(|(_, symptoms, _)| symptoms.iter())
                    .map(|s| Binding::new().with(fields::SYMPTOM, *s))
                    .collect()),
                PatternQuery::Counts => Ok(vec![
                    Binding::new().with(fields::LABEL, "Disease").with(fields::COUNT, self.diseases.len() as u64),
                    Binding::new().with(fields::LABEL, "Patient").with(fields::COUNT, 7u64),
                ]),
            }
        }
    }

    struct FailingStore;

    impl GraphStore for FailingStore {
        fn execute(&self, _: &PatternQuery, _: &QueryParams)
            -> std::result::Result<Vec<Binding>, QueryFailure> {
            Err(QueryFailure::Timeout(Duration::from_secs(5)))
        }
    }

    fn clinic() -> FixtureStore {
        FixtureStore::new(vec![
            ("Flu", vec!["fever", "cough"], vec!["Paracetamol"]),
            ("Anemia", vec!["fatigue"], vec![]),
            ("Cold", vec!["cough", "sneezing"], vec!["Zinc", "Vitamin C", "Zinc"]),
            ("Malaria", vec!["fever", "chills", "sweating"], vec!["Chloroquine", "Artemisinin"]),
        ])
    }

    fn names(matches: &[DiseaseMatch]) -> Vec<&str> {
        matches.iter().map(|m| m.disease.as_str()).collect()
    }

    #[test]
    fn any_policy_returns_every_intersecting_disease() {
        let engine = MatchingEngine::new(clinic());
        let outcome = engine.find_diseases("fever").unwrap();
        assert_eq!(
            outcome.matches(),
            &[
                DiseaseMatch::new("Flu", ["Paracetamol"]),
                DiseaseMatch::new("Malaria", ["Artemisinin", "Chloroquine"]),
            ]
        );
    }

    #[test]
    fn exact_policy_rejects_partial_symptom_sets() {
        let engine = MatchingEngine::new(clinic()).with_policy(Policy::ExactSet);
        assert_eq!(engine.find_diseases("fever").unwrap(), LookupOutcome::NoMatch);

        let outcome = engine.find_diseases("cough, fever").unwrap();
        assert_eq!(outcome.matches(), &[DiseaseMatch::new("Flu", ["Paracetamol"])]);
    }

    #[test]
    fn exact_policy_rejects_supersets_of_disease_symptoms() {
        let engine = MatchingEngine::new(clinic());
        let matches = engine
            .match_names(["fever", "cough", "fatigue"], Policy::ExactSet)
            .unwrap();
        assert!(matches.is_empty());
    }

    #[test]
    fn any_is_a_superset_of_exact() {
        let engine = MatchingEngine::new(clinic());
        let query = SymptomSet::new(["cough", "sneezing"]).unwrap();
        let any = engine.match_symptoms(&query, Policy::Any).unwrap();
        let exact = engine.match_symptoms(&query, Policy::ExactSet).unwrap();
        assert_eq!(names(&any), vec!["Cold", "Flu"]);
        assert_eq!(names(&exact), vec!["Cold"]);
        assert!(exact.iter().all(|m| any.contains(m)));
    }

    #[test]
    fn disease_without_medicines_is_reported() {
        let engine = MatchingEngine::new(clinic()).with_policy(Policy::ExactSet);
        let outcome = engine.find_diseases("fatigue").unwrap();
        assert_eq!(outcome.matches(), &[DiseaseMatch::new("Anemia", Vec::<String>::new())]);
    }

    #[test]
    fn medicines_are_deduplicated() {
        let engine = MatchingEngine::new(clinic());
        let matches = engine.match_names(["sneezing"], Policy::Any).unwrap();
        assert_eq!(matches[0].medicines, vec!["Vitamin C", "Zinc"]);
    }

    #[test]
    fn duplicate_rows_collapse_to_one_record_per_disease() {
        let mut store = clinic();
        store.row_per_symptom = true;
        let engine = MatchingEngine::new(store);
        let matches = engine.match_names(["fever", "chills", "sweating"], Policy::Any).unwrap();
        assert_eq!(names(&matches), vec!["Flu", "Malaria"]);
    }

    #[test]
    fn blank_input_never_reaches_the_store() {
        let store = clinic();
        let engine = MatchingEngine::new(&store);
        assert_eq!(engine.find_diseases("").unwrap(), LookupOutcome::NoInput);
        assert_eq!(engine.find_diseases(" ,  , ").unwrap(), LookupOutcome::NoInput);
        assert_eq!(store.calls(), 0);
    }

    #[test]
    fn empty_name_collection_is_an_input_error() {
        let engine = MatchingEngine::new(clinic());
        let err = engine.match_names(Vec::<String>::new(), Policy::Any).unwrap_err();
        assert_eq!(err, LookupError::EmptyInput);
    }

    #[test]
    fn unknown_symptom_is_no_match_not_error() {
        let engine = MatchingEngine::new(clinic());
        assert_eq!(engine.find_diseases("Fever").unwrap(), LookupOutcome::NoMatch);
    }

    #[test]
    fn store_failure_is_surfaced_not_emptied() {
        let engine = MatchingEngine::new(FailingStore);
        let err = engine.find_diseases("fever").unwrap_err();
        assert_eq!(
            err,
            LookupError::QueryFailure(QueryFailure::Timeout(Duration::from_secs(5)))
        );
    }

    #[test]
    fn malformed_rows_are_query_failures() {
        struct BadRows;
        impl GraphStore for BadRows {
            fn execute(&self, _: &PatternQuery, _: &QueryParams)
                -> std::result::Result<Vec<Binding>, QueryFailure> {
                Ok(vec![Binding::new().with(fields::DISEASE, "Flu")])
            }
        }
        let err = MatchingEngine::new(BadRows).find_diseases("fever").unwrap_err();
        assert_eq!(err, LookupError::QueryFailure(QueryFailure::Binding("symptoms".into())));
    }

    #[test]
    fn repeated_lookups_are_identical() {
        let engine = MatchingEngine::new(clinic());
        let first = engine.find_diseases("cough, fever").unwrap();
        for _ in 0..5 {
            assert_eq!(engine.find_diseases("fever ,cough").unwrap(), first);
        }
    }

    #[test]
    fn engine_is_shareable_across_threads() {
        let engine = Arc::new(MatchingEngine::new(Arc::new(clinic())));
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let engine = Arc::clone(&engine);
                std::thread::spawn(move || engine.find_diseases("fever").unwrap())
            })
            .collect();
        for handle in handles {
            assert_eq!(names(handle.join().unwrap().matches()), vec!["Flu", "Malaria"]);
        }
    }

    #[test]
    fn lists_symptoms_and_counts() {
        let engine = MatchingEngine::new(clinic());
        let symptoms = engine.symptom_names().unwrap();
        assert_eq!(symptoms, vec!["chills", "cough", "fatigue", "fever", "sneezing", "sweating"]);

        let counts = engine.graph_counts().unwrap();
        assert_eq!(counts.diseases, 4);
        assert_eq!(counts.nodes(), 4);
    }
}
