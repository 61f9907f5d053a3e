//! Property-Based Tests for generators and level bounds
//!
//! Tests the following invariants:
//! - Level bounds: windowed levels stay integral in [1, 10], continuous levels stay >= 1 at 2 dp
//! - Confidence convergence: repeated successes never lower confidence, never exceed 1
//! - Option uniqueness: the correct answer appears exactly once, at the recorded index
//! - Arithmetic digit budget at level 1 and the forced 2..=9 single-digit factor

use std::sync::Arc;

use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use flowscroll_engine::generators::build_multiplication;
use flowscroll_engine::types::round2;
use flowscroll_engine::validation::correct_choice;
use flowscroll_engine::{
    build_result, create_task_of_type, generate, update_level, Level, NoopAnalytics, Regime,
    RegulatorConfig, ResultRecorder, Session, Solution, TaskContent, TaskType, UserStats,
};

// ============================================================================
// Arbitrary Generators
// ============================================================================

fn arb_task_type() -> impl Strategy<Value = TaskType> {
    (0..TaskType::ALL.len()).prop_map(|i| TaskType::ALL[i])
}

fn arb_continuous_type() -> impl Strategy<Value = TaskType> {
    arb_task_type().prop_filter("continuous regime", |ty| ty.regime() == Regime::Continuous)
}

fn arb_choice_type() -> impl Strategy<Value = TaskType> {
    prop_oneof![
        Just(TaskType::MathSequence),
        Just(TaskType::LangOddOneOut),
        Just(TaskType::LangConnect),
        Just(TaskType::LangFlag),
        Just(TaskType::LangMap),
    ]
}

/// (type, success, skipped, time spent)
fn arb_outcome() -> impl Strategy<Value = (TaskType, bool, bool, u64)> {
    (arb_task_type(), any::<bool>(), any::<bool>(), 0u64..120_000)
}

fn assert_level_in_bounds(level: Level) {
    match level {
        Level::Discrete(level) => assert!((1..=10).contains(&level.get())),
        Level::Continuous(level) => {
            let v = level.get();
            assert!(v >= 1.0, "{v}");
            assert_eq!(round2(v), v);
        }
    }
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_levels_stay_in_bounds(outcomes in prop::collection::vec(arb_outcome(), 1..80), seed in any::<u64>()) {
        let recorder = ResultRecorder::new(Arc::new(NoopAnalytics));
        let session = Session::starting_at(0);
        let config = RegulatorConfig::default();
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut profile = UserStats::with_user_id("p1");

        for (i, (ty, success, skipped, time)) in outcomes.into_iter().enumerate() {
            let task = create_task_of_type(ty, profile.raw_level(ty), &mut rng);
            let result = build_result(&task, success, time, skipped, &session, i as i64 * 1_000);
            recorder.append(&mut profile, result.clone());
            let update = update_level(&mut profile, &result, &config);
            assert_level_in_bounds(update.level);
            assert_level_in_bounds(profile.level(ty));
            prop_assert_eq!(profile.raw_level(ty), update.level.value());
        }
    }

    #[test]
    fn prop_confidence_converges_monotonically(
        ty in arb_continuous_type(),
        times in prop::collection::vec(0u64..60_000, 1..40),
    ) {
        let recorder = ResultRecorder::new(Arc::new(NoopAnalytics));
        let session = Session::starting_at(0);
        let config = RegulatorConfig::default();
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let mut profile = UserStats::with_user_id("p5");
        let mut previous = config.continuous.default_confidence;

        for time in times {
            let task = create_task_of_type(ty, profile.raw_level(ty), &mut rng);
            let result = build_result(&task, true, time, false, &session, 0);
            recorder.append(&mut profile, result.clone());
            update_level(&mut profile, &result, &config);
            let confidence = profile.confidence(ty).unwrap();
            prop_assert!(confidence >= previous);
            prop_assert!(confidence <= 1.0);
            previous = confidence;
        }
    }

    #[test]
    fn prop_correct_option_appears_exactly_once(ty in arb_choice_type(), level in 1.0f64..40.0, seed in any::<u64>()) {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let task = create_task_of_type(ty, level, &mut rng);
        let (options, index) = task.content().choices().expect("multiple choice content");
        prop_assert!(index < options.len());
        prop_assert_eq!(correct_choice(&task), Some(index));
        let correct = &options[index];
        prop_assert_eq!(options.iter().filter(|o| *o == correct).count(), 1);

        match (task.content(), task.solution()) {
            (TaskContent::Sequence { options, .. }, Solution::Number(answer)) => {
                prop_assert_eq!(options[index], *answer);
            }
            (TaskContent::Connect { answer, .. }, _) => prop_assert_eq!(correct, answer),
            (TaskContent::Flag { country_name, .. }, _) | (TaskContent::Map { country_name, .. }, _) => {
                prop_assert_eq!(correct, country_name);
            }
            (TaskContent::OddOneOut { options, .. }, _) => {
                let mut sorted = options.clone();
                sorted.sort();
                sorted.dedup();
                prop_assert_eq!(sorted.len(), options.len());
            }
            (other, _) => prop_assert!(false, "unexpected content {:?}", other),
        }
    }

    #[test]
    fn prop_every_generator_handles_any_level(ty in arb_task_type(), level in prop_oneof![0.0f64..200.0, Just(f64::NAN), Just(f64::INFINITY)], seed in any::<u64>()) {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let generated = generate(ty, level, &mut rng);
        prop_assert!(!generated.question.is_empty());
        prop_assert_ne!(generated.content, TaskContent::Empty);
    }
}

// ============================================================================
// Arithmetic scenarios
// ============================================================================

#[test]
fn test_level_one_addition_uses_single_digits() {
    let mut rng = ChaCha8Rng::seed_from_u64(2024);
    for _ in 0..500 {
        let generated = generate(TaskType::MathAddition, 1.0, &mut rng);
        let TaskContent::Arithmetic { a, b, .. } = generated.content else {
            panic!("arithmetic content expected");
        };
        assert!((1..=9).contains(&a) && (1..=9).contains(&b), "{a} + {b}");
        assert_eq!(generated.question, format!("{a} + {b}"));
        assert_eq!(generated.solution, Solution::Number(a + b));
    }
}

#[test]
fn test_three_by_one_multiplication_avoids_trivial_factor() {
    let mut rng = ChaCha8Rng::seed_from_u64(31);
    for _ in 0..500 {
        let generated = build_multiplication(3.0, (3, 1), &mut rng);
        let TaskContent::Arithmetic { a, b, .. } = generated.content else {
            panic!("arithmetic content expected");
        };
        assert!((100..=999).contains(&a), "{a}");
        assert!((2..=9).contains(&b), "{b}");
        assert_eq!(generated.solution, Solution::Number(a * b));
    }
}

#[test]
fn test_level_one_multiplication_may_use_one() {
    let mut rng = ChaCha8Rng::seed_from_u64(8);
    let saw_one = (0..2_000).any(|_| {
        let generated = build_multiplication(1.0, (1, 1), &mut rng);
        matches!(generated.content, TaskContent::Arithmetic { a: 1, .. } | TaskContent::Arithmetic { b: 1, .. })
    });
    assert!(saw_one);
}

#[test]
fn test_subtraction_never_negative() {
    let mut rng = ChaCha8Rng::seed_from_u64(77);
    for level in 1..=10 {
        for _ in 0..100 {
            let generated = generate(TaskType::MathSubtraction, level as f64, &mut rng);
            let Solution::Number(answer) = generated.solution else {
                panic!("numeric solution expected");
            };
            assert!(answer >= 0);
        }
    }
}
