/*!
# Algorithm Framework

Every algorithm in this crate follows the same lifecycle:

```text
NotRunning --compute--> Running --+--> Finished
                           |      +--> Aborted   (error during the run)
                           +--cancel--> PendingAbortion --> Aborted
```

An algorithm is constructed with the visited graph, its strategies and a required
[`CancelHandle`]. [`Algorithm::compute`] runs it exactly once; results are read afterwards
through the algorithm's accessors. [`Algorithm::reset`] returns it to `NotRunning` so it
can be computed again.

Cancellation is cooperative: long running loops poll the handle and return early (without
an error). A [`CancelFlag`] can be shared between several algorithms, triggered from
another thread or from inside an event listener.
*/

use std::{
    fmt,
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
};

use tracing::{debug, warn};

use crate::{error::*, events::Event, vertex::Vertex};

/// Lifecycle state of an algorithm
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ComputationState {
    #[default]
    NotRunning,
    Running,
    PendingAbortion,
    Finished,
    Aborted,
}

/// Source of cooperative cancellation requests
pub trait CancelManager: Send + Sync + fmt::Debug {
    /// Returns *true* once cancellation was requested
    fn is_cancelling(&self) -> bool;

    /// Requests cancellation
    fn cancel(&self);

    /// Clears a previous request
    fn reset_cancel(&self);
}

/// Shared cancellation handle every algorithm is constructed with
pub type CancelHandle = Arc<dyn CancelManager>;

/// Atomic cancellation flag.
///
/// Clones share the same flag.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag {
    flag: Arc<AtomicBool>,
}

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a handle sharing this flag
    pub fn handle(&self) -> CancelHandle {
        Arc::new(self.clone())
    }
}

impl CancelManager for CancelFlag {
    fn is_cancelling(&self) -> bool {
        self.flag.load(Ordering::Acquire)
    }

    fn cancel(&self) {
        self.flag.store(true, Ordering::Release);
    }

    fn reset_cancel(&self) {
        self.flag.store(false, Ordering::Release);
    }
}

/// A handle that never requests cancellation
#[derive(Debug, Clone, Copy, Default)]
pub struct NeverCancel;

impl NeverCancel {
    pub fn handle() -> CancelHandle {
        Arc::new(NeverCancel)
    }
}

impl CancelManager for NeverCancel {
    fn is_cancelling(&self) -> bool {
        false
    }

    fn cancel(&self) {}

    fn reset_cancel(&self) {}
}

/// State machine and lifecycle events shared by all algorithms
pub struct AlgorithmCore {
    state: ComputationState,
    cancel: CancelHandle,
    state_changed: Event<ComputationState>,
    started: Event<()>,
    finished: Event<()>,
    aborted: Event<()>,
}

impl AlgorithmCore {
    pub fn new(cancel: CancelHandle) -> Self {
        Self {
            state: ComputationState::NotRunning,
            cancel,
            state_changed: Event::new(),
            started: Event::new(),
            finished: Event::new(),
            aborted: Event::new(),
        }
    }

    pub fn state(&self) -> ComputationState {
        self.state
    }

    /// The injected cancellation handle
    pub fn cancel_handle(&self) -> &CancelHandle {
        &self.cancel
    }

    /// Returns *true* if cancellation was requested
    pub fn is_cancelling(&self) -> bool {
        self.cancel.is_cancelling()
    }

    /// Fired with the new state on every transition
    pub fn state_changed(&self) -> &Event<ComputationState> {
        &self.state_changed
    }

    pub fn started(&self) -> &Event<()> {
        &self.started
    }

    pub fn finished(&self) -> &Event<()> {
        &self.finished
    }

    pub fn aborted(&self) -> &Event<()> {
        &self.aborted
    }

    fn set_state(&mut self, state: ComputationState) {
        if self.state != state {
            self.state = state;
            self.state_changed.fire(&state);
        }
    }

    fn begin(&mut self) -> Result<()> {
        if self.state != ComputationState::NotRunning {
            return Err(GraphError::invalid_operation(format!(
                "cannot compute in state {:?}; reset the algorithm first",
                self.state
            )));
        }
        self.set_state(ComputationState::Running);
        self.started.fire(&());
        Ok(())
    }

    fn end(&mut self) {
        if self.is_cancelling() {
            self.set_state(ComputationState::Aborted);
            self.aborted.fire(&());
        } else {
            self.set_state(ComputationState::Finished);
            self.finished.fire(&());
        }
    }

    fn fail(&mut self) {
        self.set_state(ComputationState::Aborted);
        self.aborted.fire(&());
    }

    fn request_cancel(&mut self) {
        self.cancel.cancel();
        if self.state == ComputationState::Running {
            self.set_state(ComputationState::PendingAbortion);
        }
    }

    fn reset(&mut self) {
        self.cancel.reset_cancel();
        self.set_state(ComputationState::NotRunning);
    }
}

impl fmt::Debug for AlgorithmCore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AlgorithmCore")
            .field("state", &self.state)
            .field("cancelling", &self.is_cancelling())
            .finish()
    }
}

/// Lifecycle shared by all algorithms.
///
/// Implementors provide access to their [`AlgorithmCore`], an `initialize` step resetting
/// all results and the actual `internal_compute`.
pub trait Algorithm {
    fn core(&self) -> &AlgorithmCore;

    fn core_mut(&mut self) -> &mut AlgorithmCore;

    /// Resets all result-bearing state. Must be idempotent.
    fn initialize(&mut self) -> Result<()>;

    /// Runs the algorithm. Returns early (with `Ok`) once cancellation is requested.
    fn internal_compute(&mut self) -> Result<()>;

    fn state(&self) -> ComputationState {
        self.core().state()
    }

    /// Returns *true* if cancellation was requested
    fn is_cancelling(&self) -> bool {
        self.core().is_cancelling()
    }

    /// Runs the algorithm to completion, cancellation or failure.
    ///
    /// Fails with `InvalidOperation` unless the algorithm is `NotRunning`. An error raised by
    /// the algorithm itself moves it to `Aborted` and is returned.
    fn compute(&mut self) -> Result<()> {
        let algorithm = std::any::type_name::<Self>();
        self.core_mut().begin()?;
        debug!(algorithm, "computation started");

        match self.initialize().and_then(|_| self.internal_compute()) {
            Ok(()) => {
                self.core_mut().end();
                debug!(algorithm, state = ?self.state(), "computation ended");
                Ok(())
            }
            Err(err) => {
                warn!(algorithm, %err, "computation aborted");
                self.core_mut().fail();
                Err(err)
            }
        }
    }

    /// Requests cooperative cancellation through the injected handle
    fn cancel(&mut self) {
        self.core_mut().request_cancel();
    }

    /// Returns a finished or aborted algorithm to `NotRunning` and clears the cancellation
    /// request
    fn reset(&mut self) {
        self.core_mut().reset();
    }
}

/// Optional root vertex of a rooted algorithm
#[derive(Debug)]
pub struct RootVertex<V> {
    root: Option<V>,
    root_changed: Event<Option<V>>,
}

impl<V> Default for RootVertex<V> {
    fn default() -> Self {
        Self {
            root: None,
            root_changed: Event::new(),
        }
    }
}

impl<V: Vertex> RootVertex<V> {
    pub fn get(&self) -> Option<&V> {
        self.root.as_ref()
    }

    /// Sets the root; fires `root_changed` if the root actually changed
    pub fn set(&mut self, root: V) {
        if self.root.as_ref() != Some(&root) {
            self.root = Some(root);
            self.root_changed.fire(&self.root);
        }
    }

    pub fn clear(&mut self) {
        if self.root.take().is_some() {
            self.root_changed.fire(&None);
        }
    }

    /// Fired with the new root whenever it changes
    pub fn root_changed(&self) -> &Event<Option<V>> {
        &self.root_changed
    }

    /// Returns the root if it is set and contained in the graph.
    ///
    /// Fails with `InvalidOperation` if no root is set and with `VertexNotFound` if
    /// `contains` rejects it.
    pub fn require(&self, contains: impl FnOnce(&V) -> bool) -> Result<V> {
        let root = self
            .root
            .as_ref()
            .ok_or_else(|| GraphError::invalid_operation("root vertex not set"))?;
        if !contains(root) {
            return Err(GraphError::VertexNotFound);
        }
        Ok(root.clone())
    }
}

/// Algorithms starting from a root vertex
pub trait RootedAlgorithm: Algorithm {
    type Root: Vertex;

    fn root_vertex(&self) -> &RootVertex<Self::Root>;

    fn root_vertex_mut(&mut self) -> &mut RootVertex<Self::Root>;

    fn set_root(&mut self, root: Self::Root) {
        self.root_vertex_mut().set(root);
    }

    fn try_get_root(&self) -> Option<&Self::Root> {
        self.root_vertex().get()
    }

    fn clear_root(&mut self) {
        self.root_vertex_mut().clear();
    }

    /// Sets `root` and computes
    fn compute_from(&mut self, root: Self::Root) -> Result<()> {
        self.set_root(root);
        self.compute()
    }
}
