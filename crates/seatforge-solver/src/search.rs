//! The attempt loop shared by every generation mode.
//!
//! Attempts are pure functions of `(base seed, attempt index)` and run
//! through an immutable [`AttemptRunner`], so they may execute anywhere.
//! Their candidates are funnelled, in attempt order, through one
//! [`PlanPool`] that owns the uniqueness check and the accepted plans.

use rayon::prelude::*;
use rayon::ThreadPool;
use seatforge_core::{IdGenerator, SeatingPlan, TableSeating};
use tracing::{debug, trace};

use crate::group::AtomicGroup;
use crate::placer::PlanPlacer;
use crate::scope::{attempt_rng, GenerationScope};
use crate::scorer::PlanScorer;
use crate::strategy::Strategy;
use crate::termination::{ExternalTermination, Termination};
use crate::uniqueness::UniquenessFilter;

/// Outcome of one attempt, before filtering.
#[derive(Debug)]
pub(crate) struct Candidate {
    pub attempt: u64,
    pub strategy: Strategy,
    pub tables: Option<Vec<TableSeating>>,
}

/// Runs single attempts: strategy ordering followed by greedy placement.
#[derive(Debug)]
pub(crate) struct AttemptRunner<'a> {
    groups: &'a [AtomicGroup],
    placer: PlanPlacer<'a>,
}

impl<'a> AttemptRunner<'a> {
    pub fn new(groups: &'a [AtomicGroup], placer: PlanPlacer<'a>) -> Self {
        Self { groups, placer }
    }

    pub fn run(&self, attempt: u64, base_seed: u64) -> Candidate {
        let strategy = Strategy::for_attempt(attempt);
        let mut rng = attempt_rng(base_seed, attempt);
        let order = strategy.order(self.groups, &mut rng);
        Candidate {
            attempt,
            strategy,
            tables: self.placer.place(&order, &mut rng),
        }
    }
}

/// Single aggregator for candidates: uniqueness, scoring, id assignment.
#[derive(Debug)]
pub(crate) struct PlanPool<'a> {
    filter: UniquenessFilter,
    scorer: PlanScorer<'a>,
    ids: &'a dyn IdGenerator,
}

impl<'a> PlanPool<'a> {
    pub fn new(filter: UniquenessFilter, scorer: PlanScorer<'a>, ids: &'a dyn IdGenerator) -> Self {
        Self {
            filter,
            scorer,
            ids,
        }
    }

    /// Records the candidate and returns the plan when it was accepted.
    pub fn offer<'s>(
        &self,
        scope: &'s mut GenerationScope,
        candidate: Candidate,
    ) -> Option<&'s SeatingPlan> {
        scope.statistics_mut().record_attempt(candidate.strategy);

        let Some(tables) = candidate.tables else {
            scope.statistics_mut().placement_failures += 1;
            trace!(
                event = "attempt_failed",
                attempt = candidate.attempt,
                strategy = candidate.strategy.name(),
            );
            return None;
        };

        if !self.filter.is_unique(&tables, scope.plans()) {
            scope.statistics_mut().duplicates_rejected += 1;
            trace!(
                event = "plan_rejected_duplicate",
                attempt = candidate.attempt,
                strategy = candidate.strategy.name(),
            );
            return None;
        }

        let score = self.scorer.score(&tables);
        let mut plan = SeatingPlan::new(self.ids.next_id("plan"), tables);
        plan.score = score;
        debug!(
            event = "plan_accepted",
            attempt = candidate.attempt,
            strategy = candidate.strategy.name(),
            score = %score,
        );
        Some(scope.accept(plan))
    }
}

/// A running search: attempts feed the pool until the termination fires
/// or the cancellation flag is set.
#[derive(Debug)]
pub(crate) struct Search<'a, T> {
    runner: AttemptRunner<'a>,
    pool: PlanPool<'a>,
    termination: T,
    cancel: Option<ExternalTermination>,
    cancelled: bool,
    scope: GenerationScope,
}

impl<'a, T: Termination> Search<'a, T> {
    pub fn new(
        runner: AttemptRunner<'a>,
        pool: PlanPool<'a>,
        termination: T,
        mut scope: GenerationScope,
    ) -> Self {
        scope.start_generating();
        Self {
            runner,
            pool,
            termination,
            cancel: None,
            cancelled: false,
            scope,
        }
    }

    pub fn with_cancel(mut self, cancel: Option<ExternalTermination>) -> Self {
        self.cancel = cancel;
        self
    }

    /// Checks cancellation first, so `was_cancelled` reports only a stop the
    /// flag actually caused.
    pub fn is_terminated(&mut self) -> bool {
        if self.cancel.as_ref().is_some_and(ExternalTermination::is_set) {
            self.cancelled = true;
            return true;
        }
        self.termination.is_terminated(&self.scope)
    }

    pub fn was_cancelled(&self) -> bool {
        self.cancelled
    }

    pub fn attempts(&self) -> u64 {
        self.scope.attempt_count()
    }

    pub fn scope(&self) -> &GenerationScope {
        &self.scope
    }

    /// Runs the next attempt on the calling thread.
    pub fn step(&mut self) -> Option<&SeatingPlan> {
        let candidate = self
            .runner
            .run(self.scope.attempt_count(), self.scope.base_seed());
        self.pool.offer(&mut self.scope, candidate)
    }

    /// Runs up to `size` attempts concurrently, then offers their candidates
    /// in attempt order. Candidates produced after the termination fired are
    /// discarded, so the pool matches a sequential run with the same seed.
    pub fn step_batch(&mut self, size: usize, threads: Option<&ThreadPool>) {
        let start = self.scope.attempt_count();
        let seed = self.scope.base_seed();
        let runner = &self.runner;
        let batch = || -> Vec<Candidate> {
            (0..size)
                .into_par_iter()
                .map(|i| runner.run(start + i as u64, seed))
                .collect()
        };
        let candidates = match threads {
            Some(pool) => pool.install(batch),
            None => batch(),
        };

        for candidate in candidates {
            if self.is_terminated() {
                break;
            }
            self.pool.offer(&mut self.scope, candidate);
        }
    }

    pub fn finish(self) -> GenerationScope {
        self.scope
    }
}
