//! End-to-end behaviour of the engine through its public API.

use fill_engine::{BlankRef, EngineOptions, ExerciseConfig, FillEngine, SentenceConfig};
use proptest::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;

fn build(sentences: &[(&str, &str)], distractors: &[&str], options: EngineOptions) -> FillEngine {
    let config = ExerciseConfig::new(
        sentences
            .iter()
            .map(|(id, raw)| SentenceConfig::new(*id, *raw))
            .collect(),
        distractors.iter().map(|d| d.to_string()).collect(),
    )
    .with_options(options);
    FillEngine::new(&config, &mut StdRng::seed_from_u64(2024))
}

fn sorted_pool(engine: &FillEngine) -> Vec<String> {
    let mut words = engine.pool().words().to_vec();
    words.sort();
    words
}

/// Every word in the pool or in a blank, sorted.
fn all_words(engine: &FillEngine) -> Vec<String> {
    let mut words = engine.pool().words().to_vec();
    for sentence in engine.sentences() {
        words.extend(sentence.placed_words().map(str::to_string));
    }
    words.sort();
    words
}

fn scenario_a() -> FillEngine {
    build(
        &[("s1", "Den [stora] hunden sprang")],
        &["lilla"],
        EngineOptions::default(),
    )
}

#[test]
fn scenario_a_wrong_word_completes_but_blocks_progress() {
    let mut engine = scenario_a();
    assert_eq!(sorted_pool(&engine), vec!["lilla", "stora"]);

    assert!(engine.place("lilla", "s1", 0));

    let sentence = engine.sentence("s1").unwrap();
    assert_eq!(sentence.blank(0).unwrap().is_correct, Some(false));
    assert!(sentence.is_complete());
    assert!(!sentence.is_all_correct());
    assert!(!engine.can_progress());
}

#[test]
fn scenario_b_remove_restores_pool() {
    let mut engine = scenario_a();
    engine.place("lilla", "s1", 0);

    assert!(engine.remove_from_blank("s1", 0));

    let sentence = engine.sentence("s1").unwrap();
    assert_eq!(sentence.blank(0).unwrap().filled_word, None);
    assert!(!sentence.is_complete());
    assert_eq!(sorted_pool(&engine), vec!["lilla", "stora"]);
}

#[test]
fn scenario_c_correct_word_unlocks_progress() {
    let mut engine = scenario_a();
    engine.place("lilla", "s1", 0);
    engine.remove_from_blank("s1", 0);

    assert!(engine.place("stora", "s1", 0));

    let sentence = engine.sentence("s1").unwrap();
    assert_eq!(sentence.blank(0).unwrap().is_correct, Some(true));
    assert!(sentence.is_complete());
    assert!(sentence.is_all_correct());
    assert!(engine.can_progress());
}

#[test]
fn scenario_d_shared_answer_is_evaluated_per_blank() {
    let mut engine = build(
        &[("s1", "Hon [springer] hem"), ("s2", "Han [springer] till bussen")],
        &[],
        EngineOptions::default(),
    );
    // Answers are deduplicated, so only one copy exists
    assert_eq!(engine.pool().len(), 1);

    assert!(engine.place("springer", "s1", 0));

    assert_eq!(
        engine.blank(&BlankRef::new("s1", 0)).unwrap().is_correct,
        Some(true)
    );
    let other = engine.blank(&BlankRef::new("s2", 0)).unwrap();
    assert_eq!(other.filled_word, None);
    assert_eq!(other.is_correct, None);
    assert!(!engine.can_progress());
}

#[test]
fn swap_exchanges_words_and_updates_correctness() {
    let mut engine = build(
        &[("s1", "[Vi] äter [lunch]"), ("s2", "Klockan är [tolv]")],
        &[],
        EngineOptions::default(),
    );
    engine.place("lunch", "s1", 0);
    engine.place("tolv", "s2", 0);

    assert!(engine.begin_drag("lunch", Some(BlankRef::new("s1", 0))));
    assert!(engine.drop_on_blank("s2", 0));

    let a = engine.blank(&BlankRef::new("s1", 0)).unwrap();
    let b = engine.blank(&BlankRef::new("s2", 0)).unwrap();
    assert_eq!(a.filled_word.as_deref(), Some("tolv"));
    assert_eq!(a.is_correct, Some(false));
    assert_eq!(b.filled_word.as_deref(), Some("lunch"));
    assert_eq!(b.is_correct, Some(false));
}

#[test]
fn completion_reads_are_stable() {
    let mut engine = scenario_a();
    engine.place("lilla", "s1", 0);
    assert_eq!(engine.completion(), engine.completion());
    assert_eq!(engine.view(), engine.view());
}

#[test]
fn progress_only_when_every_blank_correct() {
    let mut engine = build(
        &[("s1", "[Jag] heter [Anna]"), ("s2", "Hon är [glad]")],
        &["ledsen"],
        EngineOptions::default(),
    );
    engine.place("Jag", "s1", 0);
    engine.place("Anna", "s1", 1);
    assert!(!engine.can_progress());

    engine.place("ledsen", "s2", 0);
    assert!(engine.completion().all_complete);
    assert!(!engine.can_progress());

    engine.place("glad", "s2", 0);
    assert!(engine.can_progress());
    assert!(engine.pool().contains("ledsen"));
}

#[derive(Debug, Clone)]
enum Op {
    Place(usize, usize, usize),
    Remove(usize, usize),
    DragBetween(usize, usize, usize, usize),
    DragToPool(usize, usize),
    DragPoolWord(usize, usize, usize),
}

const SENTENCES: [(&str, &str); 3] = [
    ("s0", "[Jag] har en [katt]"),
    ("s1", "Katten [sover] på [mattan]"),
    ("s2", "Hon [har] en [katt] och en [hund]"),
];

const VOCAB: [&str; 9] = [
    "Jag", "katt", "sover", "mattan", "har", "hund", "fisk", "vaknar", "okänd",
];

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0..9usize, 0..4usize, 0..4usize).prop_map(|(w, s, b)| Op::Place(w, s, b)),
        (0..4usize, 0..4usize).prop_map(|(s, b)| Op::Remove(s, b)),
        (0..4usize, 0..4usize, 0..4usize, 0..4usize)
            .prop_map(|(s, b, t, c)| Op::DragBetween(s, b, t, c)),
        (0..4usize, 0..4usize).prop_map(|(s, b)| Op::DragToPool(s, b)),
        (0..9usize, 0..4usize, 0..4usize).prop_map(|(w, s, b)| Op::DragPoolWord(w, s, b)),
    ]
}

fn sentence_id(idx: usize) -> String {
    format!("s{idx}")
}

fn apply(engine: &mut FillEngine, op: &Op) {
    match *op {
        Op::Place(w, s, b) => {
            engine.place(VOCAB[w], &sentence_id(s), b);
        }
        Op::Remove(s, b) => {
            engine.remove_from_blank(&sentence_id(s), b);
        }
        Op::DragBetween(s, b, t, c) => {
            let source = BlankRef::new(sentence_id(s), b);
            let word = engine
                .blank(&source)
                .and_then(|blank| blank.filled_word.clone())
                .unwrap_or_else(|| "okänd".to_string());
            engine.begin_drag(word, Some(source));
            engine.drop_on_blank(&sentence_id(t), c);
        }
        Op::DragToPool(s, b) => {
            let source = BlankRef::new(sentence_id(s), b);
            let word = engine
                .blank(&source)
                .and_then(|blank| blank.filled_word.clone())
                .unwrap_or_default();
            engine.begin_drag(word, Some(source));
            engine.drop_on_pool();
        }
        Op::DragPoolWord(w, s, b) => {
            engine.begin_drag(VOCAB[w], None);
            engine.drop_on_blank(&sentence_id(s), b);
        }
    }
}

proptest! {
    #[test]
    fn words_are_never_lost_or_duplicated(
        ops in proptest::collection::vec(op_strategy(), 0..60),
        allow_swap in any::<bool>(),
    ) {
        let options = EngineOptions { allow_swap, ..EngineOptions::default() };
        let mut engine = build(&SENTENCES, &["fisk", "vaknar"], options);
        let initial = all_words(&engine);

        for op in &ops {
            apply(&mut engine, op);
            prop_assert_eq!(&all_words(&engine), &initial);
        }
    }

    #[test]
    fn correctness_is_local_to_each_blank(
        ops in proptest::collection::vec(op_strategy(), 0..40),
    ) {
        let mut engine = build(&SENTENCES, &["fisk"], EngineOptions::default());
        for op in &ops {
            apply(&mut engine, op);
        }

        for sentence in engine.sentences() {
            for blank in sentence.blanks() {
                let expected = blank
                    .filled_word
                    .as_ref()
                    .map(|word| *word == blank.expected_answer);
                prop_assert_eq!(blank.is_correct, expected);
            }
        }
    }

    #[test]
    fn progress_matches_blank_states(
        ops in proptest::collection::vec(op_strategy(), 0..80),
    ) {
        let mut engine = build(&SENTENCES, &[], EngineOptions::default());
        for op in &ops {
            apply(&mut engine, op);
        }

        let every_blank_correct = engine
            .sentences()
            .iter()
            .flat_map(|s| s.blanks())
            .all(|b| b.is_correct == Some(true));
        prop_assert_eq!(engine.can_progress(), every_blank_correct);
    }

    #[test]
    fn every_valid_exercise_can_be_finished(
        blanks in proptest::collection::vec(proptest::collection::vec(0..6usize, 0..3), 1..4),
        distractors in proptest::collection::vec(0..6usize, 0..3),
        ops in proptest::collection::vec(op_strategy(), 0..30),
    ) {
        const WORDS: [&str; 6] = ["är", "har", "bor", "katt", "hund", "stora"];

        let sentences: Vec<SentenceConfig> = blanks
            .iter()
            .enumerate()
            .map(|(idx, answers)| {
                let raw: String = answers.iter().map(|w| format!(" [{}]", WORDS[*w])).collect();
                SentenceConfig::new(sentence_id(idx), format!("Hon{raw} nu"))
            })
            .collect();
        let config = ExerciseConfig::new(
            sentences,
            distractors.iter().map(|w| WORDS[*w].to_string()).collect(),
        );
        if config.validate().is_err() {
            return Ok(());
        }

        let mut engine = FillEngine::new(&config, &mut StdRng::seed_from_u64(11));
        for op in &ops {
            apply(&mut engine, op);
        }

        // Clear the board, then put every answer where it belongs
        let targets: Vec<(String, usize, String)> = engine
            .sentences()
            .iter()
            .flat_map(|s| {
                s.blanks()
                    .enumerate()
                    .map(|(idx, b)| (s.id.clone(), idx, b.expected_answer.clone()))
                    .collect::<Vec<_>>()
            })
            .collect();
        for (id, idx, _) in &targets {
            engine.remove_from_blank(id, *idx);
        }
        for (id, idx, answer) in &targets {
            prop_assert!(engine.place(answer.clone(), id, *idx));
        }
        prop_assert!(engine.can_progress());
    }
}
