//! WASM module for offline lessons.
//!
//! Runs the blank-filling engine in the browser so an exercise downloaded
//! from `/lessons/{id}/content.json` keeps working without the server.
//! Everything crosses the boundary as strings, numbers, and JSON text.

use fill_engine::{BlankRef, ExerciseConfig, FillEngine, parse_template};
use rand::SeedableRng;
use rand::rngs::StdRng;
use wasm_bindgen::prelude::*;

#[cfg(feature = "console_error_panic_hook")]
pub use console_error_panic_hook::set_once as set_panic_hook;

/// Initialize panic hook for better error messages in browser console
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    set_panic_hook();
}

/// A live exercise owned by the page.
///
/// Construction never fails: a config that cannot be parsed produces an
/// unconfigured exercise, and the reason is available from `error()`.
#[wasm_bindgen]
pub struct ExerciseHandle {
    engine: FillEngine,
    error: Option<String>,
}

#[wasm_bindgen]
impl ExerciseHandle {
    /// config_json: `{"sentences": [{"id", "raw_text"}], "distractors": [...], ...}`
    /// seed: shuffle seed for the word pool (e.g. from `Math.random()`)
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: &str, seed: u32) -> ExerciseHandle {
        let mut rng = StdRng::seed_from_u64(u64::from(seed));

        let (config, error) = match serde_json::from_str::<ExerciseConfig>(config_json) {
            Ok(config) => {
                let error = config.validate().err().map(|e| e.to_string());
                (config, error)
            }
            Err(e) => (
                ExerciseConfig::default(),
                Some(format!("Failed to parse exercise config: {}", e)),
            ),
        };

        ExerciseHandle {
            engine: FillEngine::new(&config, &mut rng),
            error,
        }
    }

    pub fn error(&self) -> Option<String> {
        self.error.clone()
    }

    #[wasm_bindgen(js_name = isConfigured)]
    pub fn is_configured(&self) -> bool {
        self.engine.is_configured()
    }

    #[wasm_bindgen(js_name = beginDrag)]
    pub fn begin_drag(&mut self, word: &str) -> bool {
        self.engine.begin_drag(word, None)
    }

    #[wasm_bindgen(js_name = beginDragFromBlank)]
    pub fn begin_drag_from_blank(&mut self, word: &str, sentence_id: &str, blank_index: usize) -> bool {
        self.engine
            .begin_drag(word, Some(BlankRef::new(sentence_id, blank_index)))
    }

    #[wasm_bindgen(js_name = endDrag)]
    pub fn end_drag(&mut self) {
        self.engine.end_drag();
    }

    #[wasm_bindgen(js_name = dragOver)]
    pub fn drag_over(&mut self, sentence_id: &str, blank_index: usize) -> bool {
        self.engine.drag_over(BlankRef::new(sentence_id, blank_index))
    }

    #[wasm_bindgen(js_name = dragLeave)]
    pub fn drag_leave(&mut self) {
        self.engine.drag_leave();
    }

    #[wasm_bindgen(js_name = dropOnBlank)]
    pub fn drop_on_blank(&mut self, sentence_id: &str, blank_index: usize) -> bool {
        self.engine.drop_on_blank(sentence_id, blank_index)
    }

    #[wasm_bindgen(js_name = dropOnPool)]
    pub fn drop_on_pool(&mut self) -> bool {
        self.engine.drop_on_pool()
    }

    pub fn place(&mut self, word: &str, sentence_id: &str, blank_index: usize) -> bool {
        self.engine.place(word, sentence_id, blank_index)
    }

    #[wasm_bindgen(js_name = removeFromBlank)]
    pub fn remove_from_blank(&mut self, sentence_id: &str, blank_index: usize) -> bool {
        self.engine.remove_from_blank(sentence_id, blank_index)
    }

    #[wasm_bindgen(js_name = canProgress)]
    pub fn can_progress(&self) -> bool {
        self.engine.can_progress()
    }

    /// Full view model as JSON (sentences, pool, blank states, completion).
    #[wasm_bindgen(js_name = viewJson)]
    pub fn view_json(&self) -> String {
        to_json(&self.engine.view())
    }

    /// Returns JSON: {"score": {"correct", "total"}, "all_complete", "all_correct", "can_progress"}
    #[wasm_bindgen(js_name = completionJson)]
    pub fn completion_json(&self) -> String {
        to_json(&self.engine.completion())
    }
}

/// Check an exercise config without building it.
///
/// Returns JSON: {"valid": bool, "error": string|null}
#[wasm_bindgen(js_name = validateConfig)]
pub fn validate_config(config_json: &str) -> String {
    let error = match serde_json::from_str::<ExerciseConfig>(config_json) {
        Ok(config) => config.validate().err().map(|e| e.to_string()),
        Err(e) => Some(format!("Failed to parse exercise config: {}", e)),
    };

    serde_json::json!({
        "valid": error.is_none(),
        "error": error,
    })
    .to_string()
}

/// Parse one sentence template into segments (for authoring previews).
#[wasm_bindgen(js_name = parseTemplate)]
pub fn parse_template_json(raw_text: &str) -> String {
    to_json(&parse_template(raw_text))
}

fn to_json<T: serde::Serialize>(value: &T) -> String {
    match serde_json::to_string(value) {
        Ok(json) => json,
        Err(e) => serde_json::json!({
            "error": format!("Failed to serialize: {}", e)
        })
        .to_string(),
    }
}
