//! Exercise handlers for fill-in-the-blank moments.
//!
//! Every action mutates the session's engine and answers with the
//! re-rendered moment partial, which the page swaps into `#moment`.

use askama::Template;
use axum::extract::State;
use axum::response::Response;
use axum::Form;
use fill_engine::{BlankRef, FillEngine, SegmentView};
use serde::Deserialize;
use serde_json::json;

use super::lessons::render_moment;
use super::session::{in_session, LessonSession};
use crate::content::FillSentenceMoment;
use crate::player::LessonPlayer;
use crate::state::AppState;

/// One segment of a rendered sentence.
pub struct SegmentCell {
  pub is_blank: bool,
  pub text: String,
  pub index: usize,
  pub filled: bool,
  /// CSS state: empty, hover, pending, correct, incorrect
  pub state: &'static str,
  /// `hx-vals` JSON addressing this blank
  pub vals: String,
}

/// A word waiting in the pool.
pub struct PoolWord {
  pub word: String,
  /// `hx-vals` JSON for picking the word up
  pub vals: String,
}

pub struct SentenceRow {
  pub id: String,
  pub segments: Vec<SegmentCell>,
}

/// HTMX partial for a fill-in-the-blank moment.
#[derive(Template)]
#[template(path = "exercises/fill_sentence.html")]
pub struct FillSentenceTemplate {
  pub title: String,
  pub instructions: String,
  pub configured: bool,
  pub sentences: Vec<SentenceRow>,
  pub pool: Vec<PoolWord>,
  pub dragged_word: String,
  pub score_correct: usize,
  pub score_total: usize,
  pub all_complete: bool,
  pub reveal_feedback: bool,
  pub can_progress: bool,
  pub position: usize,
  pub moment_count: usize,
  pub guide_text: String,
  pub guide_visible: bool,
}

/// Build the partial for the player's current fill moment.
pub fn render_fill_sentence(
  player: &LessonPlayer,
  moment: &FillSentenceMoment,
  engine: &FillEngine,
) -> String {
  let view = engine.view();

  let sentences = view
    .sentences
    .into_iter()
    .map(|sentence| SentenceRow {
      segments: sentence
        .segments
        .into_iter()
        .map(|segment| match segment {
          SegmentView::Text { content } => SegmentCell {
            is_blank: false,
            text: content,
            index: 0,
            filled: false,
            state: "text",
            vals: String::new(),
          },
          SegmentView::Blank { index, word, state } => SegmentCell {
            is_blank: true,
            filled: word.is_some(),
            text: word.unwrap_or_default(),
            index,
            state: state.as_str(),
            vals: json!({ "sentence_id": sentence.id, "blank_index": index }).to_string(),
          },
        })
        .collect(),
      id: sentence.id,
    })
    .collect();

  let pool = view
    .pool
    .into_iter()
    .map(|word| PoolWord {
      vals: json!({ "word": word }).to_string(),
      word,
    })
    .collect();

  let template = FillSentenceTemplate {
    title: moment.title.clone().unwrap_or_default(),
    instructions: moment.instructions.clone().unwrap_or_default(),
    configured: view.configured,
    sentences,
    pool,
    dragged_word: view.dragged_word.unwrap_or_default(),
    score_correct: view.completion.score.correct,
    score_total: view.completion.score.total,
    all_complete: view.completion.all_complete,
    reveal_feedback: view.reveal_feedback,
    can_progress: player.can_progress(),
    position: player.index() + 1,
    moment_count: player.moment_count(),
    guide_text: player.guide().text().unwrap_or_default().to_string(),
    guide_visible: player.guide().is_visible(),
  };

  template.render().unwrap_or_default()
}

/// Apply `op` to the current engine (if the moment has one) and re-render.
fn exercise_action(
  state: &AppState,
  session: LessonSession,
  action: &'static str,
  op: impl FnOnce(&mut FillEngine) -> bool,
) -> Response {
  in_session(state, session, |player| {
    if let Some(engine) = player.engine_mut() {
      let changed = op(engine);
      tracing::debug!(action, changed, "exercise action");
    }
    render_moment(player)
  })
}

/// Form data for click-to-place.
#[derive(Deserialize)]
pub struct PlaceForm {
  pub word: String,
  pub sentence_id: String,
  pub blank_index: usize,
}

/// Form data addressing one blank.
#[derive(Deserialize)]
pub struct BlankForm {
  pub sentence_id: String,
  pub blank_index: usize,
}

/// Form data for starting a drag. Source fields are set when the word
/// is dragged out of a filled blank.
#[derive(Deserialize)]
pub struct DragForm {
  pub word: String,
  pub sentence_id: Option<String>,
  pub blank_index: Option<usize>,
}

/// Form data for drag-over tracking. Empty means the pointer left.
#[derive(Deserialize)]
pub struct HoverForm {
  pub sentence_id: Option<String>,
  pub blank_index: Option<usize>,
}

pub async fn place(
  State(state): State<AppState>,
  session: LessonSession,
  Form(form): Form<PlaceForm>,
) -> Response {
  exercise_action(&state, session, "place", |engine| {
    engine.place(form.word, &form.sentence_id, form.blank_index)
  })
}

pub async fn remove(
  State(state): State<AppState>,
  session: LessonSession,
  Form(form): Form<BlankForm>,
) -> Response {
  exercise_action(&state, session, "remove", |engine| {
    engine.remove_from_blank(&form.sentence_id, form.blank_index)
  })
}

pub async fn begin_drag(
  State(state): State<AppState>,
  session: LessonSession,
  Form(form): Form<DragForm>,
) -> Response {
  let source = match (form.sentence_id, form.blank_index) {
    (Some(sentence_id), Some(blank_index)) => Some(BlankRef::new(sentence_id, blank_index)),
    _ => None,
  };
  exercise_action(&state, session, "begin_drag", |engine| {
    engine.begin_drag(form.word, source)
  })
}

pub async fn hover(
  State(state): State<AppState>,
  session: LessonSession,
  Form(form): Form<HoverForm>,
) -> Response {
  exercise_action(&state, session, "hover", |engine| {
    match (form.sentence_id, form.blank_index) {
      (Some(sentence_id), Some(blank_index)) => {
        engine.drag_over(BlankRef::new(sentence_id, blank_index))
      }
      _ => {
        engine.drag_leave();
        true
      }
    }
  })
}

pub async fn drop_on_blank(
  State(state): State<AppState>,
  session: LessonSession,
  Form(form): Form<BlankForm>,
) -> Response {
  exercise_action(&state, session, "drop_on_blank", |engine| {
    engine.drop_on_blank(&form.sentence_id, form.blank_index)
  })
}

pub async fn drop_on_pool(State(state): State<AppState>, session: LessonSession) -> Response {
  exercise_action(&state, session, "drop_on_pool", FillEngine::drop_on_pool)
}

pub async fn end_drag(State(state): State<AppState>, session: LessonSession) -> Response {
  exercise_action(&state, session, "end_drag", |engine| {
    engine.end_drag();
    true
  })
}
