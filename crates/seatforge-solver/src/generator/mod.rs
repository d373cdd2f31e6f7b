//! The generation orchestrator.
//!
//! A run moves through validation, conflict checking, group building,
//! search and ranking. Any gate may abort the run; the caller always gets a
//! [`GenerationResult`] back, never a panic or an `Err`.

use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use rayon::ThreadPoolBuilder;
use seatforge_config::{GeneratorConfig, ThreadCount};
use seatforge_core::{
    ConstraintConflict, GenerationMessage, IdGenerator, SeatForgeError, SeatingPlan,
    SeatingProblem, SequentialIdGenerator,
};
use tokio::sync::mpsc::UnboundedSender;
use tracing::{info, warn};

use crate::conflict::ConflictDetector;
use crate::group::{AtomicGroup, GroupBuilder};
use crate::placer::{PlanPlacer, Stranding};
use crate::priority::PriorityPolicy;
use crate::result::{GenerationResult, Outcome, Stage};
use crate::scope::GenerationScope;
use crate::scorer::PlanScorer;
use crate::search::{AttemptRunner, PlanPool, Search};
use crate::statistics::GenerationStatistics;
use crate::termination::{
    AttemptCountTermination, ExternalTermination, OrTermination, PlanCountTermination,
    Termination, TimeTermination,
};
use crate::uniqueness::UniquenessFilter;
use crate::validation::{validate, ValidationReport};

type GenerationTermination = OrTermination<(
    AttemptCountTermination,
    PlanCountTermination,
    Option<TimeTermination>,
)>;

/// Output of the gates that run before the search.
struct Prepared {
    groups: Vec<AtomicGroup>,
    messages: Vec<GenerationMessage>,
    conflicts: Vec<ConstraintConflict>,
}

enum Preparation {
    Ready(Prepared),
    Aborted(GenerationResult),
}

/// Generates ranked, mutually distinct seating plans.
///
/// # Example
///
/// ```
/// use seatforge_config::GeneratorConfig;
/// use seatforge_core::{Guest, SeatingProblem, Table};
/// use seatforge_solver::PlanGenerator;
///
/// let problem = SeatingProblem::new(
///     vec![Guest::single("a", "Ann"), Guest::single("b", "Bo")],
///     vec![Table::new("t1", 2)],
/// );
/// let result = PlanGenerator::new(GeneratorConfig::new().with_random_seed(1)).generate(&problem);
///
/// assert_eq!(result.plans.len(), 1);
/// assert_eq!(result.plans[0].total_seated(), 2);
/// ```
#[derive(Debug)]
pub struct PlanGenerator {
    config: GeneratorConfig,
    premium: bool,
    priority: PriorityPolicy,
    ids: Arc<dyn IdGenerator>,
    cancel: Option<Arc<AtomicBool>>,
}

impl Default for PlanGenerator {
    fn default() -> Self {
        Self::new(GeneratorConfig::default())
    }
}

impl PlanGenerator {
    pub fn new(config: GeneratorConfig) -> Self {
        Self {
            config,
            premium: false,
            priority: PriorityPolicy::default(),
            ids: Arc::new(SequentialIdGenerator::new()),
            cancel: None,
        }
    }

    /// Selects the premium budget instead of the free one.
    pub fn premium(mut self, premium: bool) -> Self {
        self.premium = premium;
        self
    }

    pub fn with_priority(mut self, priority: PriorityPolicy) -> Self {
        self.priority = priority;
        self
    }

    /// Source of conflict and plan ids.
    pub fn with_id_generator(mut self, ids: Arc<dyn IdGenerator>) -> Self {
        self.ids = ids;
        self
    }

    /// Cancellation token, checked before every attempt and at every yield.
    pub fn with_cancel_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancel = Some(flag);
        self
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Diagnoses the problem without generating anything.
    pub fn detect_conflicts(
        &self,
        problem: &SeatingProblem,
        include_adjacency: bool,
    ) -> Vec<ConstraintConflict> {
        ConflictDetector::new(self.ids.as_ref())
            .with_adjacency_checks(include_adjacency)
            .detect(problem)
    }

    /// Runs the whole pipeline on the calling thread.
    pub fn generate(&self, problem: &SeatingProblem) -> GenerationResult {
        let mut prepared = match self.prepare(problem) {
            Preparation::Ready(prepared) => prepared,
            Preparation::Aborted(result) => return result,
        };
        let groups = std::mem::take(&mut prepared.groups);

        let mut search = self.start_search(problem, &groups);
        while !search.is_terminated() {
            search.step();
        }
        self.finish(search, prepared)
    }

    /// Like [`generate`](Self::generate), yielding to the tokio scheduler
    /// every `yield_interval` attempts.
    pub async fn generate_async(&self, problem: &SeatingProblem) -> GenerationResult {
        self.run_async(problem, None).await
    }

    /// Like [`generate_async`](Self::generate_async), also streaming every
    /// accepted plan through `sender` as soon as it is accepted. A closed
    /// receiver does not stop the search.
    pub async fn generate_with_channel(
        &self,
        problem: &SeatingProblem,
        sender: UnboundedSender<SeatingPlan>,
    ) -> GenerationResult {
        self.run_async(problem, Some(&sender)).await
    }

    /// Runs attempts in batches on a rayon pool sized by `thread_count`.
    ///
    /// For a fixed seed the plans equal those of [`generate`](Self::generate).
    pub fn generate_parallel(&self, problem: &SeatingProblem) -> GenerationResult {
        let mut prepared = match self.prepare(problem) {
            Preparation::Ready(prepared) => prepared,
            Preparation::Aborted(result) => return result,
        };
        let groups = std::mem::take(&mut prepared.groups);

        let pool = match self.config.thread_count {
            ThreadCount::Count(n) => match ThreadPoolBuilder::new().num_threads(n).build() {
                Ok(pool) => Some(pool),
                Err(err) => {
                    warn!(event = "thread_pool_unavailable", threads = n, error = %err);
                    None
                }
            },
            ThreadCount::Auto | ThreadCount::None => None,
        };
        let batch = pool
            .as_ref()
            .map_or_else(rayon::current_num_threads, |p| p.current_num_threads())
            * 2;

        let mut search = self.start_search(problem, &groups);
        while !search.is_terminated() {
            if self.config.thread_count == ThreadCount::None {
                search.step();
            } else {
                search.step_batch(batch, pool.as_ref());
            }
        }
        self.finish(search, prepared)
    }

    async fn run_async(
        &self,
        problem: &SeatingProblem,
        sender: Option<&UnboundedSender<SeatingPlan>>,
    ) -> GenerationResult {
        let mut prepared = match self.prepare(problem) {
            Preparation::Ready(prepared) => prepared,
            Preparation::Aborted(result) => return result,
        };
        let groups = std::mem::take(&mut prepared.groups);

        let interval = self.config.yield_interval.0.max(1);
        let mut search = self.start_search(problem, &groups);
        while !search.is_terminated() {
            if let Some(plan) = search.step() {
                if let Some(sender) = sender {
                    let _ = sender.send(plan.clone());
                }
            }
            if search.attempts() % interval == 0 {
                tokio::task::yield_now().await;
            }
        }
        self.finish(search, prepared)
    }

    /// Validating, conflict checking and building.
    fn prepare(&self, problem: &SeatingProblem) -> Preparation {
        let ValidationReport { errors, warnings } = validate(problem);
        let mut messages: Vec<GenerationMessage> = warnings
            .into_iter()
            .map(GenerationMessage::warning)
            .collect();
        if !errors.is_empty() {
            let error = SeatForgeError::Validation(errors.join("; "));
            messages.extend(errors.into_iter().map(GenerationMessage::error));
            return self.abort(Stage::Validating, error, messages, Vec::new());
        }

        let conflicts = self.detect_conflicts(problem, true);
        for conflict in &conflicts {
            messages.push(if conflict.is_critical() {
                GenerationMessage::error(conflict.description.clone())
            } else {
                GenerationMessage::warning(conflict.description.clone())
            });
        }
        if let Some(critical) = conflicts.iter().find(|c| c.is_critical()) {
            let error = SeatForgeError::CriticalConflict(critical.description.clone());
            return self.abort(Stage::ConflictChecking, error, messages, conflicts);
        }

        let groups = GroupBuilder::new(&self.priority).build(problem);
        let placer = PlanPlacer::new(
            problem,
            &groups,
            &self.priority,
            self.config.restriction_policy,
        );
        let stranded = groups.iter().find_map(|g| {
            let reason = placer.check_feasible(g).err()?;
            let names = g
                .members
                .iter()
                .map(|&m| problem.guests[m].name.as_str())
                .collect::<Vec<_>>()
                .join(", ");
            Some(match reason {
                Stranding::TooLarge {
                    occupancy,
                    max_capacity,
                } => format!(
                    "The group {names} must share a table but needs {occupancy} seats; the largest table has {max_capacity}"
                ),
                Stranding::NoAllowedTable { occupancy } => format!(
                    "No table allowed by the restrictions of the group {names} has {occupancy} seats"
                ),
            })
        });
        if let Some(reason) = stranded {
            let error = SeatForgeError::Validation(reason);
            return self.abort(Stage::Building, error, messages, conflicts);
        }

        Preparation::Ready(Prepared {
            groups,
            messages,
            conflicts,
        })
    }

    fn abort(
        &self,
        stage: Stage,
        error: SeatForgeError,
        messages: Vec<GenerationMessage>,
        conflicts: Vec<ConstraintConflict>,
    ) -> Preparation {
        info!(event = "generation_aborted", stage = %stage, reason = %error);
        Preparation::Aborted(GenerationResult::aborted(
            stage,
            error,
            messages,
            conflicts,
            GenerationStatistics::new(),
        ))
    }

    fn start_search<'a>(
        &'a self,
        problem: &'a SeatingProblem,
        groups: &'a [AtomicGroup],
    ) -> Search<'a, GenerationTermination> {
        let budget = self.config.budget(self.premium);
        let placer = PlanPlacer::new(problem, groups, &self.priority, self.config.restriction_policy);
        let pool = PlanPool::new(
            UniquenessFilter::new(self.config.uniqueness),
            PlanScorer::new(problem, self.config.scoring),
            self.ids.as_ref(),
        );
        let termination = OrTermination::new((
            AttemptCountTermination::new(budget.max_attempts),
            PlanCountTermination::new(budget.target_plans),
            self.config.time_limit().map(TimeTermination::new),
        ));
        let search = Search::new(
            AttemptRunner::new(groups, placer),
            pool,
            termination,
            GenerationScope::with_seed(self.config.random_seed),
        )
        .with_cancel(self.cancel.clone().map(ExternalTermination::new));

        info!(
            event = "generation_start",
            guest_count = problem.guests.len(),
            table_count = problem.tables.len(),
            group_count = groups.len(),
            max_attempts = budget.max_attempts,
            target_plans = budget.target_plans,
            seed = search.scope().base_seed(),
        );
        search
    }

    /// Ranking and the final verdict.
    fn finish<T: Termination>(&self, search: Search<'_, T>, prepared: Prepared) -> GenerationResult {
        let Prepared {
            mut messages,
            conflicts,
            ..
        } = prepared;
        let cancelled = search.was_cancelled();
        let (mut plans, statistics) = search.finish().finish();

        if plans.is_empty() {
            let error = if cancelled {
                SeatForgeError::Cancelled
            } else {
                SeatForgeError::Exhausted {
                    attempts: statistics.attempts,
                }
            };
            info!(event = "generation_aborted", stage = %Stage::Searching, reason = %error);
            return GenerationResult::aborted(
                Stage::Searching,
                error,
                messages,
                conflicts,
                statistics,
            );
        }
        if cancelled {
            messages.push(GenerationMessage::warning(format!(
                "Generation was cancelled after {} plans",
                plans.len()
            )));
        }

        plans.sort_by(|a, b| b.score.cmp(&a.score));

        info!(
            event = "generation_end",
            plans = plans.len(),
            attempts = statistics.attempts,
            duration_ms = statistics.duration.as_millis() as u64,
        );
        GenerationResult {
            plans,
            messages,
            conflicts,
            statistics,
            outcome: Outcome::Done,
            error: None,
        }
    }
}

#[cfg(test)]
mod tests;
