//! Runs every strategy and keeps the longest result.

use crate::core::{ExtractionAttempt, SelectionOutcome, Strategy};
use rayon::prelude::*;
use tracing::debug;

/// Runs all strategies on the rayon pool and picks a winner.
pub fn select(bytes: &[u8]) -> SelectionOutcome {
    select_with(bytes, true)
}

/// Runs all strategies, concurrently when `parallel`, and picks a winner.
///
/// Concurrency only changes wall time: attempts are collected in
/// declaration order either way, and every attempt finishes before the
/// reduction starts.
pub fn select_with(bytes: &[u8], parallel: bool) -> SelectionOutcome {
    pick_longest(run_attempts(bytes, parallel))
}

/// One attempt per strategy, in declaration order.
pub fn run_attempts(bytes: &[u8], parallel: bool) -> Vec<ExtractionAttempt> {
    if parallel {
        Strategy::ALL.par_iter().map(|s| s.attempt(bytes)).collect()
    } else {
        Strategy::ALL.iter().map(|s| s.attempt(bytes)).collect()
    }
}

/// Strictly longest successful attempt wins; ties go to the earlier one.
pub fn pick_longest(attempts: Vec<ExtractionAttempt>) -> SelectionOutcome {
    let mut best: Option<(usize, usize)> = None;
    for (idx, attempt) in attempts.iter().enumerate() {
        let score = attempt.score();
        if score == 0 {
            continue;
        }
        match best {
            Some((_, best_score)) if score <= best_score => {}
            _ => best = Some((idx, score)),
        }
    }

    match best {
        Some((idx, score)) => {
            let winner = attempts[idx].strategy;
            let text = attempts[idx].text.clone();
            debug!(%winner, chars = score, "strategy selected");
            SelectionOutcome {
                winner: Some(winner),
                text,
                attempts,
            }
        }
        None => {
            debug!("no strategy recovered any text");
            SelectionOutcome::none(attempts)
        }
    }
}
