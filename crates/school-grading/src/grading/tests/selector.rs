use crate::grading::{
    select_grader, Curriculum, CurriculumGrader, Grader, GradingInput, LetterGrade,
    RuleVersion, PAPER_ALPHABET, WEIGHTED_ALPHABET,
};

#[test]
fn levels_partition_into_three_families() {
    for level in ["P4", "P5", "P6", "P7"] {
        assert_eq!(Curriculum::from_level(level), Some(Curriculum::LowerPrimary));
    }
    for level in ["S1", "S2", "S3", "S4"] {
        assert_eq!(Curriculum::from_level(level), Some(Curriculum::LowerSecondary));
    }
    for level in ["S5", "S6"] {
        assert_eq!(
            Curriculum::from_level(level),
            Some(Curriculum::AdvancedSecondary)
        );
    }
}

#[test]
fn unknown_levels_have_no_grader() {
    for level in ["", "P1", "P3", "P8", "S7", "S0", "Senior 5", "A-level"] {
        assert!(select_grader(level).is_none(), "{level:?} should not resolve");
    }
}

#[test]
fn levels_are_trimmed_and_case_insensitive() {
    assert_eq!(
        Curriculum::from_level(" s6 "),
        Some(Curriculum::AdvancedSecondary)
    );
    assert_eq!(Curriculum::from_level("p4"), Some(Curriculum::LowerPrimary));
}

#[test]
fn selected_grader_matches_its_curriculum() {
    let cases = [
        ("P5", Curriculum::LowerPrimary, RuleVersion::PrimaryV1),
        ("S3", Curriculum::LowerSecondary, RuleVersion::NcdcV1),
        ("S5", Curriculum::AdvancedSecondary, RuleVersion::UaceV1),
    ];

    for (level, curriculum, rule_version) in cases {
        let grader = select_grader(level).expect("level resolves");
        assert_eq!(grader.curriculum(), curriculum);
        assert_eq!(grader.rule_version(), rule_version);
        assert_eq!(curriculum.rule_version(), rule_version);
    }
}

#[test]
fn alphabets_follow_the_grader_family() {
    let primary = select_grader("P7").expect("primary");
    let advanced = select_grader("S6").expect("advanced");

    assert_eq!(primary.alphabet(), &WEIGHTED_ALPHABET[..]);
    assert_eq!(advanced.alphabet(), &PAPER_ALPHABET[..]);
}

#[test]
fn grader_dispatch_grades_through_the_variant() {
    let grader = select_grader("P6").expect("primary");
    assert!(matches!(grader, Grader::LowerPrimary(_)));

    let result = grader
        .grade(&GradingInput::Components {
            component_a: 32.0,
            component_b: 48.0,
            max_a: 40.0,
            max_b: 60.0,
        })
        .expect("weighted input accepted");
    assert_eq!(result.final_grade(), LetterGrade::A);

    let grader = select_grader("S6").expect("advanced");
    let result = grader
        .grade(&GradingInput::Papers {
            marks: vec![80.0, 70.0],
        })
        .expect("paper input accepted");
    assert_eq!(result.final_grade(), LetterGrade::A);
    assert_eq!(result.paper_codes().map(|codes| codes.len()), Some(2));
}

#[test]
fn curriculum_serializes_in_snake_case() {
    let json = serde_json::to_string(&Curriculum::AdvancedSecondary).expect("serializes");
    assert_eq!(json, "\"advanced_secondary\"");
    assert_eq!(Curriculum::LowerSecondary.to_string(), "lower-secondary");
}
