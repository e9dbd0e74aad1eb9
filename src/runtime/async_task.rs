//! Async execution for the `$( … )` bracket (spec §4.7), grounded on the
//! teacher's task-id-plus-callback pattern in
//! `runtime/execution_context.rs`. Since the evaluator's shared state is
//! `Rc`/`RefCell` rather than `Arc`/`Mutex` (spec §4.7 "the variable table
//! is shared across sub-evaluators of the same root" — single-threaded
//! sharing is enough and keeps `Reference` cheap to clone), async bodies
//! run on a `tokio::task::LocalSet` via `spawn_local` instead of a
//! multi-threaded `spawn`.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use tokio::sync::oneshot;

use crate::error::CantusError;
use crate::values::value_container::ValueContainer;

pub type TaskId = u64;

/// One in-flight or completed async task (spec §4.7: "the caller receives
/// an integer task id").
pub struct AsyncTask {
    pub id: TaskId,
    pub result: Rc<RefCell<Option<Result<ValueContainer, CantusError>>>>,
}

/// Owns the table of outstanding task ids and a drain delay for
/// `stop_all` (spec §5 cancellation): in-flight tasks get a short grace
/// period to observe the cancellation flag before the evaluator considers
/// itself stopped.
#[derive(Default)]
pub struct AsyncRegistry {
    next_id: RefCell<TaskId>,
    tasks: RefCell<HashMap<TaskId, Rc<RefCell<Option<Result<ValueContainer, CantusError>>>>>>,
}

impl AsyncRegistry {
    pub fn new() -> Self {
        AsyncRegistry::default()
    }

    /// Schedules `body` to run on the current `LocalSet` and returns the
    /// task id immediately; the caller polls `poll_result` or supplies a
    /// callback lambda invoked by the host once the task completes.
    pub fn spawn(&self, body: impl std::future::Future<Output = Result<ValueContainer, CantusError>> + 'static) -> TaskId {
        let id = {
            let mut next = self.next_id.borrow_mut();
            let id = *next;
            *next += 1;
            id
        };
        let slot = Rc::new(RefCell::new(None));
        self.tasks.borrow_mut().insert(id, Rc::clone(&slot));

        let (tx, rx) = oneshot::channel();
        tokio::task::spawn_local(async move {
            let outcome = body.await;
            let _ = tx.send(outcome);
        });
        tokio::task::spawn_local(async move {
            if let Ok(outcome) = rx.await {
                *slot.borrow_mut() = Some(outcome);
            }
        });
        id
    }

    pub fn poll_result(&self, id: TaskId) -> Option<Result<ValueContainer, CantusError>> {
        self.tasks.borrow().get(&id).and_then(|slot| slot.borrow().clone())
    }

    /// Grace period before a cancellation is considered fully drained
    /// (spec §5), long enough for a spawned task's next `.await` point to
    /// observe the cancellation flag.
    pub async fn drain_delay() {
        tokio::time::sleep(std::time::Duration::from_millis(50)).await;
    }
}
