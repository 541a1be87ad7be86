//! Property-based tests for the aggregation engine
//!
//! These tests verify invariants that should hold for any survey dataset:
//! - Conversion multiplies by the table rate and leaves the base currency unchanged
//! - Every record is either contributed or accounted for in the batch report
//! - Top-N rankings are bounded, ordered, and carry exact counts
//! - Chained filters equal one combined filter; an empty filter is the identity

use std::sync::Arc;

use proptest::prelude::*;
use salary_survey_insights::currency::{CurrencyConverter, ExchangeRateTable};
use salary_survey_insights::processing::{
    RecordFilter, Sanitizer, filter, group_by_average, top_n_by_frequency,
};
use salary_survey_insights::types::{GroupKey, ListField, SurveyDataSet, SurveyField, SurveyRecord};

const COUNTRIES: &[&str] = &["France", "Germany", "Spain"];
const ROLES: &[&str] = &[
    "Developer, back-end",
    "Developer, front-end",
    "Data scientist",
];
const CURRENCIES: &[&str] = &["EUR\tEuropean Euro", "USD\tUS Dollar", "XTS\tTesting", "NA"];
const SYSTEMS: &[&str] = &["Windows", "Linux", "MacOS", "ChromeOS"];
const EXPERIENCE: &[&str] = &["1-2 years", "5-9 years"];
const ROLE_FILTERS: &[&str] = &["", "Developer", "Data scientist", "back-end"];

/// Generate one survey record; any column may be absent
fn survey_record() -> impl Strategy<Value = SurveyRecord> {
    (
        prop::option::of(prop::sample::select(COUNTRIES)),
        prop::option::of(prop::sample::select(ROLES)),
        prop::option::of(prop::sample::select(CURRENCIES)),
        prop::option::of(prop_oneof![
            (0u32..2_000_000).prop_map(|n| n.to_string()),
            Just("NA".to_string()),
        ]),
        prop::option::of(prop::sample::select(EXPERIENCE)),
        prop::collection::vec(prop::sample::select(SYSTEMS), 0..4),
    )
        .prop_map(|(country, role, currency, comp, years, systems)| {
            let mut pairs: Vec<(&str, String)> = Vec::new();
            if let Some(c) = country {
                pairs.push(("Country", c.to_string()));
            }
            if let Some(r) = role {
                pairs.push(("DevType", r.to_string()));
            }
            if let Some(c) = currency {
                pairs.push(("Currency", c.to_string()));
            }
            if let Some(c) = comp {
                pairs.push(("CompTotal", c));
            }
            if let Some(y) = years {
                pairs.push(("YearsCodePro", y.to_string()));
            }
            if !systems.is_empty() {
                pairs.push(("OpSysProfessionaluse", systems.join(";")));
            }
            SurveyRecord::from_pairs(pairs)
        })
}

fn survey_dataset() -> impl Strategy<Value = SurveyDataSet> {
    prop::collection::vec(survey_record(), 0..40).prop_map(SurveyDataSet::new)
}

/// Count occurrences of `label` the way the ranking should see them
fn occurrences(ds: &SurveyDataSet, dev_type: &str, label: &str) -> usize {
    ds.iter()
        .filter(|r| {
            dev_type.is_empty()
                || r.text(SurveyField::DevType)
                    .is_some_and(|d| d.contains(dev_type))
        })
        .filter_map(|r| r.text(SurveyField::OpSysProfessionalUse))
        .flat_map(|s| s.split(';'))
        .filter(|item| *item == label)
        .count()
}

proptest! {
    /// Property: converting through the table is a plain multiplication
    #[test]
    fn prop_conversion_multiplies_by_rate(amount in 0.0f64..1_000_000.0, rate in 0.001f64..10.0) {
        let table = ExchangeRateTable::new("EUR", [("USD", rate)]).unwrap();
        let converter = CurrencyConverter::new(Arc::new(table));

        prop_assert_eq!(converter.convert(amount, "USD").unwrap(), amount * rate);
        prop_assert_eq!(converter.convert(amount, "EUR").unwrap(), amount);
        prop_assert!(converter.convert(amount, "XTS").is_err());
    }

    /// Property: every record handed to an average is either in a bucket or in the report
    #[test]
    fn prop_averages_account_for_every_record(ds in survey_dataset()) {
        let out = group_by_average(
            &ds,
            GroupKey::Experience,
            &CurrencyConverter::default(),
            &Sanitizer::default(),
        );

        prop_assert_eq!(out.report.records_seen, ds.record_count());
        prop_assert_eq!(out.report.contributed + out.report.rejected(), ds.record_count());
        prop_assert!(out.series.len() <= out.report.contributed);
        for entry in &out.series.entries {
            prop_assert!(entry.value.is_finite());
            prop_assert!(entry.value >= 0.0);
        }
    }

    /// Property: top-N is bounded by n, sorted descending, and reports exact counts
    #[test]
    fn prop_top_n_is_bounded_ordered_and_exact(
        ds in survey_dataset(),
        n in 0usize..6,
        role in prop::sample::select(ROLE_FILTERS),
    ) {
        let out = top_n_by_frequency(&ds, ListField::OperatingSystems, role, n);

        prop_assert!(out.series.len() <= n);
        for pair in out.series.entries.windows(2) {
            prop_assert!(pair[0].count >= pair[1].count);
        }
        for entry in &out.series.entries {
            prop_assert_eq!(entry.count, occurrences(&ds, role, &entry.label));
        }

        // Anything left out can never outrank the last kept entry.
        if let Some(last) = out.series.entries.last() {
            for label in SYSTEMS {
                if out.series.get(label).is_none() {
                    prop_assert!(occurrences(&ds, role, label) <= last.count);
                }
            }
        }
    }

    /// Property: filtering by country then role equals filtering by both at once
    #[test]
    fn prop_filters_compose(
        ds in survey_dataset(),
        country in prop::sample::select(COUNTRIES),
        role in prop::sample::select(ROLE_FILTERS),
    ) {
        let chained = filter(&filter(&ds, &RecordFilter::new(country, "")), &RecordFilter::new("", role));
        let combined = filter(&ds, &RecordFilter::new(country, role));
        prop_assert_eq!(chained, combined);
    }

    /// Property: an empty filter returns the dataset unchanged
    #[test]
    fn prop_empty_filter_is_identity(ds in survey_dataset()) {
        prop_assert_eq!(filter(&ds, &RecordFilter::default()), ds);
    }
}
