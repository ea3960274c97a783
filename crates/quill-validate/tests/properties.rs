//! Property tests for the step validation engine.

use proptest::prelude::*;

use quill_model::{DraftRecord, Field};
use quill_validate::{RuleSet, validate, validate_all};

proptest! {
    #[test]
    fn blank_required_fields_are_exactly_the_reported_ones(
        step in 1usize..=3,
        padding in "[ \t]{0,4}",
    ) {
        let rules = RuleSet::blog();
        let draft = DraftRecord {
            title: padding.clone(),
            category: padding.clone(),
            description: padding.clone(),
            tags: padding.clone(),
            author_name: padding,
        };
        let errors = validate(&rules, step, &draft);
        let required: Vec<Field> = rules.step(step).unwrap().required_fields().collect();
        let reported: Vec<Field> = errors.keys().collect();
        prop_assert_eq!(reported, required);
        for (field, message) in errors.iter() {
            prop_assert_eq!(message, format!("{} is required", field.label()));
        }
    }

    #[test]
    fn titles_within_bounds_pass(title in "[a-zA-Z][a-zA-Z ]{1,97}[a-zA-Z]") {
        let draft = DraftRecord {
            title,
            category: "News".into(),
            ..Default::default()
        };
        prop_assert!(validate(&RuleSet::blog(), 1, &draft).is_empty());
    }

    #[test]
    fn validation_is_pure(title in ".{0,20}", description in ".{0,40}") {
        let rules = RuleSet::blog();
        let draft = DraftRecord {
            title,
            description,
            ..Default::default()
        };
        prop_assert_eq!(validate_all(&rules, &draft), validate_all(&rules, &draft));
    }
}
