//! Frame-based deferred tasks.
//!
//! The host drives everything from a single per-frame update. Waiting for
//! an animation is expressed as a task due a number of frames from now,
//! never as blocking. Due tasks are taken one at a time, so cancelling a
//! task always works until the moment it starts. Each task remembers the
//! scheduler generation it was created in; `cancel_all` bumps the
//! generation, so a task already taken can still be recognised as stale.

/// Handle for cancelling a scheduled task.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TaskId(u64);

/// Work deferred until a frame, run against a context `C`.
pub type Task<C, E> = Box<dyn FnOnce(&mut C) -> Result<(), E>>;

/// A task whose frame has come.
pub struct DueTask<C, E> {
    pub id: TaskId,
    pub generation: u32,
    pub run: Task<C, E>,
}

struct Pending<C, E> {
    id: TaskId,
    due: u64,
    generation: u32,
    run: Task<C, E>,
}

/// Queue of frame-delayed tasks.
pub struct FrameScheduler<C, E> {
    frame: u64,
    generation: u32,
    next_id: u64,
    pending: Vec<Pending<C, E>>,
}

impl<C, E> Default for FrameScheduler<C, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C, E> FrameScheduler<C, E> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            frame: 0,
            generation: 0,
            next_id: 0,
            pending: Vec::new(),
        }
    }

    /// Frames ticked so far.
    #[must_use]
    pub fn frame(&self) -> u64 {
        self.frame
    }

    #[must_use]
    pub fn generation(&self) -> u32 {
        self.generation
    }

    /// Number of tasks waiting.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Run `task` once `delay` more frames have been ticked. A delay of 0
    /// runs on the next tick.
    pub fn schedule(&mut self, delay: u64, task: impl FnOnce(&mut C) -> Result<(), E> + 'static) -> TaskId {
        let id = TaskId(self.next_id);
        self.next_id += 1;
        self.pending.push(Pending {
            id,
            due: self.frame + delay.max(1),
            generation: self.generation,
            run: Box::new(task),
        });
        id
    }

    /// Drop one task. Returns false if it already ran or never existed.
    pub fn cancel(&mut self, id: TaskId) -> bool {
        let before = self.pending.len();
        self.pending.retain(|task| task.id != id);
        self.pending.len() != before
    }

    /// Drop every pending task and start a new generation.
    pub fn cancel_all(&mut self) -> usize {
        let dropped = self.pending.len();
        self.pending.clear();
        self.generation += 1;
        dropped
    }

    /// Start the next frame. Tasks due by then are taken one at a time
    /// with `next_due`.
    pub fn advance_frame(&mut self) -> u64 {
        self.frame += 1;
        self.frame
    }

    /// Take the earliest-scheduled task that is due this frame.
    ///
    /// Tasks stay queued until taken, so a running task can still cancel a
    /// sibling due on the same frame.
    pub fn next_due(&mut self) -> Option<DueTask<C, E>> {
        let frame = self.frame;
        let index = self.pending.iter().position(|task| task.due <= frame)?;
        let task = self.pending.remove(index);
        Some(DueTask {
            id: task.id,
            generation: task.generation,
            run: task.run,
        })
    }

    /// Whether a task was created before the latest `cancel_all`.
    #[must_use]
    pub fn is_stale(&self, task: &DueTask<C, E>) -> bool {
        task.generation != self.generation
    }
}

impl<C, E> std::fmt::Debug for FrameScheduler<C, E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FrameScheduler")
            .field("frame", &self.frame)
            .field("generation", &self.generation)
            .field("pending", &self.pending.len())
            .finish()
    }
}
