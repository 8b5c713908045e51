//! Blank-filling exercise engine.
//!
//! Sentences are written as templates with bracketed answers
//! (`"Den [stora] hunden sprang"`). The engine parses them, builds a
//! shuffled word pool from the answers plus distractors, and lets the
//! learner place, remove, and swap words until every blank is filled.
//!
//! # Flow
//!
//! 1. [`ExerciseConfig`] arrives from lesson content
//! 2. [`FillEngine::new`] parses templates and builds the [`WordPool`]
//! 3. Drag/drop or click handlers call the entry points on [`FillEngine`]
//! 4. [`FillEngine::completion`] and [`FillEngine::view`] are derived fresh
//!    after every change
//!
//! ```
//! use fill_engine::{ExerciseConfig, FillEngine, SentenceConfig};
//! use rand::SeedableRng;
//!
//! let config = ExerciseConfig::new(
//!     vec![SentenceConfig::new("s1", "Den [stora] hunden sprang")],
//!     vec!["lilla".to_string()],
//! );
//! let mut engine = FillEngine::new(&config, &mut rand::rngs::StdRng::seed_from_u64(1));
//!
//! engine.place("stora", "s1", 0);
//! assert!(engine.can_progress());
//! ```

pub mod completion;
pub mod config;
pub mod engine;
pub mod pool;
pub mod projection;
pub mod sentence;
pub mod template;

pub use completion::{Completion, Score, evaluate};
pub use config::{ConfigError, EngineOptions, ExerciseConfig, SentenceConfig};
pub use engine::{BlankRef, DragContext, FillEngine};
pub use pool::{WordPool, build_pool};
pub use projection::{BlankState, ExerciseView, SegmentView, SentenceView};
pub use sentence::{Blank, Segment, Sentence};
pub use template::{parse_sentence, parse_template};
