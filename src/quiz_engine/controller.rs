//! Session controller: the only entry point a transport layer talks to.
//!
//! ## Lifecycle
//!
//! ```text
//! Idle ──start──▶ LevelSelect ──select_level──▶ AwaitingAnswer
//!                                                  │ submit_answer
//!                                ┌─────────────────┴──────────────┐
//!                                ▼                                ▼
//!                   Scored ──advance──▶ AwaitingAnswer        GameOver ──restart──▶ LevelSelect
//! ```
//!
//! Sessions live in a registry keyed by player id. Each entry has its own
//! lock, so operations on one player are serialized while different players
//! proceed in parallel. The registry lock is only held long enough to look
//! an entry up.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use log::{debug, info, warn};
use rand::{rngs::StdRng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::quiz_engine::{
    config::QuizConfig,
    error::{QuizError, Result},
    levels::LevelRegistry,
    models::{GameMode, PlayerId, Question, Tier},
    session::{PlayerSession, SessionState},
    store::UserStore,
};

// ---------------------------------------------------------------------------
// Results handed back to the transport
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelChoice {
    pub level_id: String,
    pub mode: GameMode,
    pub tier: Tier,
    pub points: u32,
}

/// What to offer a player who has just (re)started.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelMenu {
    pub player_id: PlayerId,
    pub levels: Vec<LevelChoice>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnswerOutcome {
    Correct {
        points_awarded: u32,
        score: u32,
        coins: u32,
        next_level_id: String,
    },
    Incorrect {
        correct_answer: String,
        lives_left: u32,
        next_level_id: String,
    },
    /// Lives exhausted. Only `restart_session` continues from here.
    GameOver {
        correct_answer: String,
        final_score: u32,
        final_coins: u32,
    },
}

impl AnswerOutcome {
    pub fn is_correct(&self) -> bool {
        matches!(self, AnswerOutcome::Correct { .. })
    }
}

// ---------------------------------------------------------------------------
// Controller
// ---------------------------------------------------------------------------

struct SessionSlot {
    state: SessionState,
    session: PlayerSession,
    rng: StdRng,
    /// Level `advance` serves next; set only in `Scored`.
    next_level_id: Option<String>,
}

pub struct SessionController {
    config: QuizConfig,
    levels: LevelRegistry,
    store: Arc<dyn UserStore>,
    sessions: Mutex<HashMap<PlayerId, Arc<Mutex<SessionSlot>>>>,
    rng_seed: Option<u64>,
}

impl SessionController {
    /// Validates `config` up front; an invalid one never serves a question.
    pub fn new(config: QuizConfig, levels: LevelRegistry, store: Arc<dyn UserStore>) -> Result<Self> {
        config.validate()?;
        levels.validate()?;
        if levels.is_empty() {
            return Err(QuizError::Configuration("level registry is empty".into()));
        }
        info!(
            "quiz controller ready: {} levels, {} starting lives",
            levels.len(),
            config.starting_lives
        );
        Ok(SessionController {
            config,
            levels,
            store,
            sessions: Mutex::new(HashMap::new()),
            rng_seed: None,
        })
    }

    /// Seed every session's RNG from `seed` and the player id, making whole
    /// games reproducible.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng_seed = Some(seed);
        self
    }

    pub fn levels(&self) -> &LevelRegistry {
        &self.levels
    }

    pub fn config(&self) -> &QuizConfig {
        &self.config
    }

    fn new_rng(&self, player_id: PlayerId) -> StdRng {
        match self.rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed ^ (player_id as u64).rotate_left(17)),
            None       => StdRng::from_entropy(),
        }
    }

    fn slot(&self, player_id: PlayerId) -> Option<Arc<Mutex<SessionSlot>>> {
        let sessions = self.sessions.lock().unwrap_or_else(|e| e.into_inner());
        sessions.get(&player_id).cloned()
    }

    fn slot_or_insert(&self, player_id: PlayerId) -> Arc<Mutex<SessionSlot>> {
        let mut sessions = self.sessions.lock().unwrap_or_else(|e| e.into_inner());
        sessions
            .entry(player_id)
            .or_insert_with(|| {
                Arc::new(Mutex::new(SessionSlot {
                    state: SessionState::Idle,
                    session: PlayerSession::new(self.config.starting_lives),
                    rng: self.new_rng(player_id),
                    next_level_id: None,
                }))
            })
            .clone()
    }

    /// Run `f` with exclusive access to one player's session.
    ///
    /// `f` must do all fallible work before mutating, so an `Err` leaves the
    /// session exactly as it was.
    fn with_session<T>(
        &self,
        player_id: PlayerId,
        f: impl FnOnce(&mut SessionSlot) -> Result<T>,
    ) -> Result<T> {
        let slot = self.slot(player_id).ok_or(QuizError::SessionLost(player_id))?;
        let mut guard = slot.lock().unwrap_or_else(|e| e.into_inner());
        f(&mut guard)
    }

    fn menu(&self, player_id: PlayerId) -> LevelMenu {
        LevelMenu {
            player_id,
            levels: self
                .levels
                .iter()
                .map(|(id, cfg)| LevelChoice {
                    level_id: id.to_string(),
                    mode: cfg.mode,
                    tier: cfg.tier,
                    points: cfg.points,
                })
                .collect(),
        }
    }

    fn reset_slot(&self, player_id: PlayerId) {
        let slot = self.slot_or_insert(player_id);
        let mut guard = slot.lock().unwrap_or_else(|e| e.into_inner());
        guard.session.reset();
        guard.next_level_id = None;
        guard.state = SessionState::LevelSelect;
    }

    // -----------------------------------------------------------------------
    // Operations
    // -----------------------------------------------------------------------

    /// Register the user if unseen, then reset (or create) the session.
    pub fn start_session(&self, player_id: PlayerId, display_name: &str) -> LevelMenu {
        match self.store.get_user_stats(player_id) {
            Ok(Some(_)) => {}
            Ok(None) => {
                if let Err(e) = self.store.ensure_user_exists(player_id, display_name) {
                    warn!("user store: could not add player {}: {}", player_id, e);
                }
            }
            Err(e) => warn!("user store: lookup failed for player {}: {}", player_id, e),
        }
        self.reset_slot(player_id);
        info!("player {} started a session", player_id);
        self.menu(player_id)
    }

    /// Reset from any state, including after `SessionLost` or `GameOver`.
    pub fn restart_session(&self, player_id: PlayerId) -> LevelMenu {
        self.reset_slot(player_id);
        info!("player {} restarted", player_id);
        self.menu(player_id)
    }

    /// Serve the first question of `level_id`.
    pub fn select_level(&self, player_id: PlayerId, level_id: &str) -> Result<Question> {
        let question = self.with_session(player_id, |slot| {
            match slot.state {
                SessionState::Idle => return Err(QuizError::SessionLost(player_id)),
                SessionState::GameOver => return Err(QuizError::GameFinished(player_id)),
                _ => {}
            }
            let level = self.levels.get(level_id)?;
            let question = level.generate(&mut slot.rng, &self.config)?;
            slot.session.active_level_id = Some(level_id.to_string());
            slot.session.active_question = Some(question.clone());
            slot.next_level_id = None;
            slot.state = SessionState::AwaitingAnswer;
            Ok(question)
        });
        match &question {
            Ok(q) => debug!("player {} on {}: question {}", player_id, level_id, q.question_id),
            Err(e) => debug!("player {} could not start {}: {}", player_id, level_id, e),
        }
        question
    }

    /// Serve the follow-up question after a scored answer.
    ///
    /// While a question is still pending it is returned again unchanged.
    pub fn advance(&self, player_id: PlayerId) -> Result<Question> {
        self.with_session(player_id, |slot| match slot.state {
            SessionState::AwaitingAnswer => slot
                .session
                .active_question
                .clone()
                .ok_or(QuizError::SessionLost(player_id)),
            SessionState::Scored => {
                let next_id = slot
                    .next_level_id
                    .clone()
                    .ok_or(QuizError::SessionLost(player_id))?;
                let question = self.levels.get(&next_id)?.generate(&mut slot.rng, &self.config)?;
                debug!("player {} advanced to {}: question {}", player_id, next_id, question.question_id);
                slot.session.active_level_id = Some(next_id);
                slot.session.active_question = Some(question.clone());
                slot.next_level_id = None;
                slot.state = SessionState::AwaitingAnswer;
                Ok(question)
            }
            SessionState::GameOver => Err(QuizError::GameFinished(player_id)),
            SessionState::Idle | SessionState::LevelSelect => Err(QuizError::SessionLost(player_id)),
        })
    }

    /// Evaluate option `index` of the pending question.
    ///
    /// The chosen option must equal the correct answer exactly; no case or
    /// whitespace folding is applied.
    pub fn submit_answer(&self, player_id: PlayerId, index: i64) -> Result<AnswerOutcome> {
        let outcome = self.with_session(player_id, |slot| {
            let question = slot
                .session
                .active_question
                .as_ref()
                .ok_or(QuizError::SessionLost(player_id))?;
            let len = question.options.len();
            let idx = usize::try_from(index)
                .ok()
                .filter(|i| *i < len)
                .ok_or(QuizError::InvalidIndex { index, len })?;
            let level_id = slot
                .session
                .active_level_id
                .as_deref()
                .ok_or(QuizError::SessionLost(player_id))?;
            let level = self.levels.get(level_id)?;

            let correct = question.options[idx] == question.correct_answer;
            let correct_answer = question.correct_answer.clone();
            let next_level_id = level.next_level_id.clone();

            if correct {
                slot.session.record_correct(level.points);
            } else {
                slot.session.record_wrong();
            }
            slot.session.active_question = None;
            slot.session.active_level_id = None;

            let session = &slot.session;
            let outcome = if session.is_over() {
                slot.next_level_id = None;
                slot.state = SessionState::GameOver;
                AnswerOutcome::GameOver {
                    correct_answer,
                    final_score: session.score,
                    final_coins: session.coins,
                }
            } else {
                slot.next_level_id = Some(next_level_id.clone());
                slot.state = SessionState::Scored;
                if correct {
                    AnswerOutcome::Correct {
                        points_awarded: level.points,
                        score: session.score,
                        coins: session.coins,
                        next_level_id,
                    }
                } else {
                    AnswerOutcome::Incorrect {
                        correct_answer,
                        lives_left: session.lives,
                        next_level_id,
                    }
                }
            };
            Ok((correct, outcome))
        });

        let (correct, outcome) = match outcome {
            Ok(v) => v,
            Err(e) => {
                debug!("player {} answer {} rejected: {}", player_id, index, e);
                return Err(e);
            }
        };

        if let AnswerOutcome::GameOver { final_score, final_coins, .. } = &outcome {
            info!(
                "player {} game over: score {} coins {}",
                player_id, final_score, final_coins
            );
        } else {
            debug!("player {} answered {}: correct={}", player_id, index, correct);
        }
        self.record_stats(player_id, correct);
        Ok(outcome)
    }

    /// Parse a raw option index (e.g. button payload) and submit it.
    pub fn submit_answer_text(&self, player_id: PlayerId, raw: &str) -> Result<AnswerOutcome> {
        let index: i64 = raw
            .trim()
            .parse()
            .map_err(|_| QuizError::InvalidAnswer(raw.to_string()))?;
        self.submit_answer(player_id, index)
    }

    fn record_stats(&self, player_id: PlayerId, won: bool) {
        if let Err(e) = self.store.record_outcome(player_id, won) {
            warn!("user store: could not record outcome for {}: {}", player_id, e);
        }
        if won {
            if let Err(e) = self.store.add_coins(player_id, 1) {
                warn!("user store: could not credit coin to {}: {}", player_id, e);
            }
        }
    }

    // -----------------------------------------------------------------------
    // Inspection / teardown
    // -----------------------------------------------------------------------

    pub fn state(&self, player_id: PlayerId) -> SessionState {
        self.slot(player_id)
            .map(|slot| slot.lock().unwrap_or_else(|e| e.into_inner()).state)
            .unwrap_or(SessionState::Idle)
    }

    pub fn snapshot(&self, player_id: PlayerId) -> Option<PlayerSession> {
        self.slot(player_id)
            .map(|slot| slot.lock().unwrap_or_else(|e| e.into_inner()).session.clone())
    }

    /// Drop a player's session. Returns whether one existed.
    pub fn end_session(&self, player_id: PlayerId) -> bool {
        let mut sessions = self.sessions.lock().unwrap_or_else(|e| e.into_inner());
        let existed = sessions.remove(&player_id).is_some();
        if existed {
            info!("player {} session ended", player_id);
        }
        existed
    }

    pub fn active_sessions(&self) -> usize {
        self.sessions.lock().unwrap_or_else(|e| e.into_inner()).len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quiz_engine::store::MemoryUserStore;

    fn controller() -> (SessionController, Arc<MemoryUserStore>) {
        let store = Arc::new(MemoryUserStore::new());
        let c = SessionController::new(QuizConfig::default(), LevelRegistry::builtin(), store.clone())
            .unwrap()
            .with_seed(2024);
        (c, store)
    }

    fn wrong_index(q: &Question) -> i64 {
        q.options.iter().position(|o| *o != q.correct_answer).unwrap() as i64
    }

    fn right_index(q: &Question) -> i64 {
        q.correct_index().unwrap() as i64
    }

    #[test]
    fn start_registers_user_once_and_lists_levels() {
        let (c, store) = controller();
        let menu = c.start_session(1, "ivan");
        assert_eq!(menu.player_id, 1);
        assert_eq!(menu.levels.len(), 9);
        assert_eq!(c.state(1), SessionState::LevelSelect);
        c.start_session(1, "someone-else");
        assert_eq!(store.get_user_stats(1).unwrap().unwrap().username, "ivan");
    }

    #[test]
    fn select_level_sets_active_question() {
        let (c, _) = controller();
        c.start_session(1, "ivan");
        let q = c.select_level(1, "caesar_easy").unwrap();
        let snap = c.snapshot(1).unwrap();
        assert_eq!(snap.active_level_id.as_deref(), Some("caesar_easy"));
        assert_eq!(snap.active_question, Some(q));
        assert_eq!(c.state(1), SessionState::AwaitingAnswer);
    }

    #[test]
    fn unknown_level_keeps_level_select() {
        let (c, _) = controller();
        c.start_session(1, "ivan");
        let err = c.select_level(1, "nope").unwrap_err();
        assert!(matches!(err, QuizError::UnknownLevel(ref id) if id == "nope"));
        assert_eq!(c.state(1), SessionState::LevelSelect);
        assert!(c.snapshot(1).unwrap().active_question.is_none());
    }

    #[test]
    fn select_without_session_is_session_lost() {
        let (c, _) = controller();
        assert!(matches!(c.select_level(9, "caesar_easy"), Err(QuizError::SessionLost(9))));
        assert_eq!(c.state(9), SessionState::Idle);
    }

    #[test]
    fn correct_answer_scores_and_waits_for_advance() {
        let (c, store) = controller();
        c.start_session(1, "ivan");
        let q = c.select_level(1, "word_game_medium").unwrap();
        let out = c.submit_answer(1, right_index(&q)).unwrap();
        assert_eq!(
            out,
            AnswerOutcome::Correct {
                points_awarded: 20,
                score: 20,
                coins: 1,
                next_level_id: "word_game_medium".into()
            }
        );
        assert_eq!(c.state(1), SessionState::Scored);
        assert!(c.snapshot(1).unwrap().active_question.is_none());
        let stats = store.get_user_stats(1).unwrap().unwrap();
        assert_eq!((stats.wins, stats.coins), (1, 1));

        let next = c.advance(1).unwrap();
        assert_eq!(next.tier, Tier::Medium);
        assert_eq!(next.mode, GameMode::WordGuess);
        assert_eq!(c.state(1), SessionState::AwaitingAnswer);
    }

    #[test]
    fn invalid_index_leaves_question_untouched() {
        let (c, _) = controller();
        c.start_session(1, "ivan");
        let q = c.select_level(1, "caesar_decrypt_easy").unwrap();
        let len = q.options.len() as i64;
        for bad in [len, -1, i64::MAX, i64::MIN] {
            let err = c.submit_answer(1, bad).unwrap_err();
            assert!(matches!(err, QuizError::InvalidIndex { index, .. } if index == bad));
        }
        let snap = c.snapshot(1).unwrap();
        assert_eq!(snap.active_question, Some(q));
        assert_eq!(snap.lives, 5);
        assert_eq!(c.state(1), SessionState::AwaitingAnswer);
    }

    #[test]
    fn non_numeric_answer_is_rejected() {
        let (c, _) = controller();
        c.start_session(1, "ivan");
        let q = c.select_level(1, "caesar_easy").unwrap();
        assert!(matches!(c.submit_answer_text(1, "two"), Err(QuizError::InvalidAnswer(_))));
        assert_eq!(c.snapshot(1).unwrap().active_question, Some(q.clone()));
        let out = c.submit_answer_text(1, &format!(" {} ", right_index(&q))).unwrap();
        assert!(out.is_correct());
    }

    #[test]
    fn answering_twice_is_session_lost() {
        let (c, _) = controller();
        c.start_session(1, "ivan");
        let q = c.select_level(1, "caesar_easy").unwrap();
        c.submit_answer(1, wrong_index(&q)).unwrap();
        assert!(matches!(c.submit_answer(1, 0), Err(QuizError::SessionLost(1))));
    }

    #[test]
    fn five_wrong_answers_reach_game_over() {
        let (c, store) = controller();
        c.start_session(1, "ivan");
        let mut q = c.select_level(1, "caesar_easy").unwrap();
        for expected_lives in [4, 3, 2, 1] {
            match c.submit_answer(1, wrong_index(&q)).unwrap() {
                AnswerOutcome::Incorrect { lives_left, correct_answer, .. } => {
                    assert_eq!(lives_left, expected_lives);
                    assert_eq!(correct_answer, q.correct_answer);
                }
                other => panic!("expected Incorrect, got {other:?}"),
            }
            assert!(!c.snapshot(1).unwrap().is_over());
            q = c.advance(1).unwrap();
        }
        let out = c.submit_answer(1, wrong_index(&q)).unwrap();
        assert_eq!(
            out,
            AnswerOutcome::GameOver { correct_answer: q.correct_answer.clone(), final_score: 0, final_coins: 0 }
        );
        assert_eq!(c.state(1), SessionState::GameOver);
        assert!(matches!(c.advance(1), Err(QuizError::GameFinished(1))));
        assert!(matches!(c.select_level(1, "caesar_easy"), Err(QuizError::GameFinished(1))));
        assert_eq!(store.get_user_stats(1).unwrap().unwrap().losses, 5);
    }

    #[test]
    fn restart_from_game_over_resets_everything() {
        let (c, _) = controller();
        c.start_session(1, "ivan");
        let mut q = c.select_level(1, "word_game_easy").unwrap();
        c.submit_answer(1, right_index(&q)).unwrap();
        for _ in 0..5 {
            q = c.advance(1).unwrap();
            c.submit_answer(1, wrong_index(&q)).unwrap();
        }
        assert_eq!(c.state(1), SessionState::GameOver);
        assert_eq!(c.snapshot(1).unwrap().score, 10);

        c.restart_session(1);
        assert_eq!(c.state(1), SessionState::LevelSelect);
        assert_eq!(c.snapshot(1).unwrap(), PlayerSession::default());
    }

    #[test]
    fn reselecting_replaces_pending_question() {
        let (c, _) = controller();
        c.start_session(1, "ivan");
        c.select_level(1, "caesar_easy").unwrap();
        let q = c.select_level(1, "word_game_hard").unwrap();
        assert_eq!(q.options.len(), 8);
        let snap = c.snapshot(1).unwrap();
        assert_eq!(snap.active_level_id.as_deref(), Some("word_game_hard"));
        assert_eq!(c.advance(1).unwrap(), q);
    }

    #[test]
    fn end_session_returns_to_idle() {
        let (c, _) = controller();
        c.start_session(1, "ivan");
        assert_eq!(c.active_sessions(), 1);
        assert!(c.end_session(1));
        assert!(!c.end_session(1));
        assert_eq!(c.state(1), SessionState::Idle);
        assert!(matches!(c.advance(1), Err(QuizError::SessionLost(1))));
    }

    #[test]
    fn answered_question_clears_active_level_and_advance_follows_chain() {
        use crate::quiz_engine::levels::LevelConfig;
        use std::collections::BTreeMap;

        let levels: BTreeMap<String, LevelConfig> = [
            ("warmup", GameMode::CipherEncode, Tier::Easy, 10, "finale"),
            ("finale", GameMode::WordGuess, Tier::Hard, 30, "finale"),
        ]
        .into_iter()
        .map(|(id, mode, tier, points, next)| {
            (id.to_string(), LevelConfig { mode, tier, points, next_level_id: next.to_string() })
        })
        .collect();
        let store = Arc::new(MemoryUserStore::new());
        let c = SessionController::new(QuizConfig::default(), LevelRegistry::new(levels).unwrap(), store)
            .unwrap()
            .with_seed(5);
        c.start_session(1, "ivan");

        let q = c.select_level(1, "warmup").unwrap();
        let out = c.submit_answer(1, right_index(&q)).unwrap();
        assert!(matches!(out, AnswerOutcome::Correct { ref next_level_id, .. } if next_level_id == "finale"));
        assert_eq!(c.state(1), SessionState::Scored);
        assert_eq!(c.snapshot(1).unwrap().active_level_id, None);

        let next = c.advance(1).unwrap();
        assert_eq!((next.mode, next.tier), (GameMode::WordGuess, Tier::Hard));
        assert_eq!(c.snapshot(1).unwrap().active_level_id.as_deref(), Some("finale"));

        let mut q = next;
        loop {
            if let AnswerOutcome::GameOver { .. } = c.submit_answer(1, wrong_index(&q)).unwrap() {
                break;
            }
            assert_eq!(c.snapshot(1).unwrap().active_level_id, None);
            q = c.advance(1).unwrap();
        }
        let snap = c.snapshot(1).unwrap();
        assert_eq!((snap.active_level_id, snap.active_question), (None, None));
        assert!(matches!(c.advance(1), Err(QuizError::GameFinished(1))));
    }

    #[test]
    fn invalid_config_is_rejected_at_construction() {
        let mut config = QuizConfig::default();
        config.word_guess.hard.option_count = 50;
        let store = Arc::new(MemoryUserStore::new());
        let res = SessionController::new(config, LevelRegistry::builtin(), store);
        assert!(matches!(res, Err(QuizError::Configuration(_))));
    }
}
