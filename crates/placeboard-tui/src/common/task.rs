use tokio_util::sync::CancellationToken;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskId(pub u64);

#[derive(Debug, Default)]
pub struct TaskSeq {
    next: u64,
}

impl TaskSeq {
    pub fn next_id(&mut self) -> TaskId {
        let id = TaskId(self.next);
        self.next = self.next.wrapping_add(1);
        id
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskKind {
    Seasons,
    Stats,
    Trend,
    Salary,
    Resumes,
    Apply,
    OpenResume,
}

#[derive(Debug, Clone)]
pub struct TaskStarted {
    pub id: TaskId,
    pub cancel: Option<CancellationToken>,
}

#[derive(Debug)]
pub struct TaskCompleted<E> {
    pub id: TaskId,
    pub result: E,
}

/// Task lifecycle state (stored in AppState, mutated only by reducer).
///
/// The reducer claims an id with `begin` when it emits the effect, so a
/// completion from a superseded task is rejected even if it arrives before
/// the new task's `TaskStarted`.
#[derive(Debug, Default, Clone)]
pub struct TaskState {
    pub active: Option<TaskId>,
    pub cancel: Option<CancellationToken>,
}

impl TaskState {
    pub fn is_running(&self) -> bool {
        self.active.is_some()
    }

    /// Claims `id` as the active task and returns the superseded task's token.
    pub fn begin(&mut self, id: TaskId) -> Option<CancellationToken> {
        self.active = Some(id);
        self.cancel.take()
    }

    pub fn on_started(&mut self, started: &TaskStarted) {
        if self.active == Some(started.id) {
            self.cancel = started.cancel.clone();
        } else if let Some(cancel) = &started.cancel {
            // Superseded before it was even registered.
            cancel.cancel();
        }
    }

    pub fn finish_if_active(&mut self, id: TaskId) -> bool {
        let ok = self.active == Some(id);
        if ok {
            self.active = None;
            self.cancel = None;
        }
        ok
    }
}

#[derive(Debug, Default, Clone)]
pub struct Tasks {
    pub seasons: TaskState,
    pub stats: TaskState,
    pub trend: TaskState,
    pub salary: TaskState,
    pub resumes: TaskState,
    pub apply: TaskState,
    pub open_resume: TaskState,
}

impl Tasks {
    pub fn state(&self, kind: TaskKind) -> &TaskState {
        match kind {
            TaskKind::Seasons => &self.seasons,
            TaskKind::Stats => &self.stats,
            TaskKind::Trend => &self.trend,
            TaskKind::Salary => &self.salary,
            TaskKind::Resumes => &self.resumes,
            TaskKind::Apply => &self.apply,
            TaskKind::OpenResume => &self.open_resume,
        }
    }

    pub fn state_mut(&mut self, kind: TaskKind) -> &mut TaskState {
        match kind {
            TaskKind::Seasons => &mut self.seasons,
            TaskKind::Stats => &mut self.stats,
            TaskKind::Trend => &mut self.trend,
            TaskKind::Salary => &mut self.salary,
            TaskKind::Resumes => &mut self.resumes,
            TaskKind::Apply => &mut self.apply,
            TaskKind::OpenResume => &mut self.open_resume,
        }
    }

    pub fn is_any_running(&self) -> bool {
        self.seasons.is_running()
            || self.stats.is_running()
            || self.trend.is_running()
            || self.salary.is_running()
            || self.resumes.is_running()
            || self.apply.is_running()
            || self.open_resume.is_running()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_begin_supersedes_previous_task() {
        let mut seq = TaskSeq::default();
        let mut state = TaskState::default();

        let first = seq.next_id();
        assert!(state.begin(first).is_none());
        let token = CancellationToken::new();
        state.on_started(&TaskStarted {
            id: first,
            cancel: Some(token.clone()),
        });

        let second = seq.next_id();
        let superseded = state.begin(second).unwrap();
        superseded.cancel();
        assert!(token.is_cancelled());

        assert!(!state.finish_if_active(first));
        assert!(state.finish_if_active(second));
        assert!(!state.is_running());
    }

    #[test]
    fn test_late_started_event_for_stale_task_cancels_it() {
        let mut seq = TaskSeq::default();
        let mut state = TaskState::default();
        let stale = seq.next_id();
        let current = seq.next_id();
        state.begin(current);

        let token = CancellationToken::new();
        state.on_started(&TaskStarted {
            id: stale,
            cancel: Some(token.clone()),
        });
        assert!(token.is_cancelled());
        assert!(state.cancel.is_none());
    }
}
