//! Enumeration Driver: grows the DAG size `n` from 1 to a cutoff, building a fresh
//! encoding at each step, until the backend reports SAT or the cutoff is exhausted.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use log::{debug, info};

use crate::dag::encode_dag;
use crate::decode::decode;
use crate::error::{LearnerError, Result};
use crate::formula::Formula;
use crate::operators::OperatorSet;
use crate::semantics::{encode_separation, encode_semantics};
use crate::solver::{SolveResult, Solver};
use crate::trace::Sample;
use crate::vars::VarTable;

/// A cooperative cancellation flag shared between the driver and whatever external harness
/// is enforcing a wall-clock budget on the whole learning run (see the component design's
/// concurrency section). Cheap enough to clone and poll from inside `check()`'s backend
/// interrupt callback, or between enumeration steps.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken(Arc<AtomicBool>);

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum LearnResult {
    Found { formula: Formula, nodes: usize, elapsed: Duration },
    NotFound { cutoff: usize, elapsed: Duration },
}

/// Interval the watcher thread sleeps between polls of the cancellation token while
/// `solve()` is in flight. Short enough that a cancellation request lands promptly without
/// busy-looping.
const CANCEL_POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Runs `solver.solve()`, and if `cancel` is set, spawns a watcher thread that polls the
/// token and calls the backend's own [`crate::solver::CancelHandle::interrupt`] the moment
/// it fires — the "(a) aborts the current `check()`" half of the component design's
/// cancellation contract (the "(b) prevents starting the next `n` iteration" half is the
/// per-iteration check in [`learn`]).
fn solve_cancelable<S: Solver>(solver: &mut S, cancel: Option<&CancellationToken>) -> SolveResult {
    let Some(token) = cancel else {
        return solver.solve();
    };

    let done = Arc::new(AtomicBool::new(false));
    let watcher = {
        let token = token.clone();
        let handle = solver.cancel_handle();
        let done = Arc::clone(&done);
        thread::spawn(move || {
            while !done.load(Ordering::SeqCst) {
                if token.is_cancelled() {
                    handle.interrupt();
                    return;
                }
                thread::sleep(CANCEL_POLL_INTERVAL);
            }
        })
    };

    let result = solver.solve();
    done.store(true, Ordering::SeqCst);
    let _ = watcher.join();
    result
}

fn validate(num_atoms: usize, positives: &Sample, negatives: &Sample) -> Result<()> {
    if num_atoms == 0 {
        return Err(LearnerError::EmptyAtomicPropositions);
    }
    if positives.is_empty() && negatives.is_empty() {
        return Err(LearnerError::EmptySample);
    }
    Ok(())
}

/// Runs the full `n = 1..=cutoff` search described in the component design, against the
/// given backend. `atom_names` is only used for rendering the returned formula.
pub fn learn<S: Solver>(
    solver: &mut S,
    num_atoms: usize,
    operators: &OperatorSet,
    positives: &Sample,
    negatives: &Sample,
    cutoff: usize,
    cancel: Option<&CancellationToken>,
) -> Result<LearnResult> {
    validate(num_atoms, positives, negatives)?;
    let started = Instant::now();

    for n in 1..=cutoff {
        if cancel.is_some_and(CancellationToken::is_cancelled) {
            return Err(LearnerError::Cancelled { n });
        }

        info!("learn: trying DAG size n={n}");
        solver.reset();
        let mut vars = VarTable::new();

        encode_dag(solver, &mut vars, n, num_atoms, operators);
        debug!("learn: n={n} after DAG encoding: {} vars", vars.len());

        encode_semantics(solver, &mut vars, n, num_atoms, operators, positives, negatives);
        debug!("learn: n={n} after semantic encoding: {} vars", vars.len());

        encode_separation(solver, &mut vars, n, positives, negatives);

        match solve_cancelable(solver, cancel) {
            SolveResult::Sat => {
                let formula = decode(solver, &vars, n, num_atoms, operators);
                let elapsed = started.elapsed();
                info!("learn: found formula of size {} at n={n} after {elapsed:?}", formula.size());
                return Ok(LearnResult::Found { formula, nodes: n, elapsed });
            }
            SolveResult::Unsat => {
                debug!("learn: n={n} is UNSAT, growing");
            }
            SolveResult::Unknown => {
                if cancel.is_some_and(CancellationToken::is_cancelled) {
                    return Err(LearnerError::Cancelled { n });
                }
                return Err(LearnerError::BackendError {
                    message: format!("backend returned UNKNOWN at n={n}"),
                });
            }
        }
    }

    let elapsed = started.elapsed();
    info!("learn: cutoff {cutoff} exhausted after {elapsed:?}");
    Ok(LearnResult::NotFound { cutoff, elapsed })
}
