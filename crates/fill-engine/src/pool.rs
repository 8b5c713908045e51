//! Word pool: the draggable candidates not currently placed in a blank.

use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use crate::sentence::Sentence;

/// Ordered multiset of candidate words, in display order.
///
/// The order is shuffled once at build time and never again. Words
/// returned from blanks are appended at the end.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WordPool {
    words: Vec<String>,
}

impl WordPool {
    pub fn new(words: Vec<String>) -> Self {
        Self { words }
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.iter().any(|w| w == word)
    }

    /// Take one copy of `word` out of the pool. Returns false if absent.
    pub fn take(&mut self, word: &str) -> bool {
        match self.words.iter().position(|w| w == word) {
            Some(idx) => {
                self.words.remove(idx);
                true
            }
            None => false,
        }
    }

    /// Return a word to the pool.
    pub fn put_back(&mut self, word: String) {
        self.words.push(word);
    }
}

/// Collect expected answers (deduplicated, first-seen order) followed by
/// every distractor, then shuffle once.
///
/// Distractors are not deduplicated against answers: a distractor equal to
/// an answer yields two copies. Config validation rejects that case.
pub fn build_pool<R: Rng + ?Sized>(
    sentences: &[Sentence],
    distractors: &[String],
    rng: &mut R,
) -> WordPool {
    let mut words: Vec<String> = Vec::new();

    for blank in sentences.iter().flat_map(Sentence::blanks) {
        if !words.contains(&blank.expected_answer) {
            words.push(blank.expected_answer.clone());
        }
    }
    words.extend(distractors.iter().cloned());

    words.shuffle(rng);
    WordPool::new(words)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template::parse_sentence;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn sorted(pool: &WordPool) -> Vec<String> {
        let mut words = pool.words().to_vec();
        words.sort();
        words
    }

    #[test]
    fn test_build_pool_deduplicates_answers() {
        let sentences = vec![
            parse_sentence("s1", "Hon [springer] fort"),
            parse_sentence("s2", "Han [springer] också, [men] långsamt"),
        ];
        let mut rng = StdRng::seed_from_u64(7);
        let pool = build_pool(&sentences, &["går".to_string()], &mut rng);

        assert_eq!(sorted(&pool), vec!["går", "men", "springer"]);
    }

    #[test]
    fn test_build_pool_keeps_distractor_colliding_with_answer() {
        let sentences = vec![parse_sentence("s1", "Den [stora] hunden")];
        let mut rng = StdRng::seed_from_u64(1);
        let pool = build_pool(&sentences, &["stora".to_string()], &mut rng);

        assert_eq!(pool.len(), 2);
        assert!(pool.words().iter().all(|w| w == "stora"));
    }

    #[test]
    fn test_build_pool_same_seed_same_order() {
        let sentences = vec![parse_sentence("s1", "[a] [b] [c] [d] [e]")];
        let distractors = vec!["f".to_string(), "g".to_string()];

        let first = build_pool(&sentences, &distractors, &mut StdRng::seed_from_u64(42));
        let second = build_pool(&sentences, &distractors, &mut StdRng::seed_from_u64(42));
        assert_eq!(first, second);
        assert_eq!(first.len(), 7);
    }

    #[test]
    fn test_take_removes_one_copy() {
        let mut pool = WordPool::new(vec!["x".into(), "y".into(), "x".into()]);
        assert!(pool.take("x"));
        assert_eq!(pool.words(), &["y".to_string(), "x".to_string()]);
        assert!(!pool.take("z"));
        assert_eq!(pool.len(), 2);
    }

    #[test]
    fn test_put_back_appends() {
        let mut pool = WordPool::new(vec!["a".into()]);
        pool.put_back("b".into());
        assert_eq!(pool.words(), &["a".to_string(), "b".to_string()]);
    }
}
