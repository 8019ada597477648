//! Test doubles: a virtual-time scheduler and a storage backend with
//! scriptable failures.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::{Rc, Weak};
use std::time::Duration;

use crate::notice::Scheduler;
use crate::storage::{MemoryStorage, StorageBackend, StorageError};

struct ScheduledTask {
    id: u64,
    due: Duration,
    task: Box<dyn FnOnce()>,
}

#[derive(Default)]
struct Timeline {
    now: Duration,
    next_id: u64,
    tasks: Vec<ScheduledTask>,
}

/// Scheduler driven by [`ManualScheduler::advance`]
#[derive(Clone, Default)]
pub struct ManualScheduler {
    timeline: Rc<RefCell<Timeline>>,
}

pub struct ManualHandle {
    id: u64,
    timeline: Weak<RefCell<Timeline>>,
}

impl Drop for ManualHandle {
    fn drop(&mut self) {
        if let Some(timeline) = self.timeline.upgrade() {
            timeline.borrow_mut().tasks.retain(|t| t.id != self.id);
        }
    }
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pending(&self) -> usize {
        self.timeline.borrow().tasks.len()
    }

    /// Move time forward, running every task that falls due, in order
    pub fn advance(&self, by: Duration) {
        let target = self.timeline.borrow().now + by;
        loop {
            let next = {
                let mut timeline = self.timeline.borrow_mut();
                let due = timeline
                    .tasks
                    .iter()
                    .enumerate()
                    .filter(|(_, t)| t.due <= target)
                    .min_by_key(|(_, t)| (t.due, t.id))
                    .map(|(index, _)| index);
                match due {
                    Some(index) => {
                        let task = timeline.tasks.remove(index);
                        timeline.now = task.due;
                        Some(task.task)
                    }
                    None => {
                        timeline.now = target;
                        None
                    }
                }
            };
            match next {
                Some(task) => task(),
                None => break,
            }
        }
    }
}

impl Scheduler for ManualScheduler {
    type Handle = ManualHandle;

    fn schedule(&self, delay: Duration, task: Box<dyn FnOnce()>) -> ManualHandle {
        let mut timeline = self.timeline.borrow_mut();
        let id = timeline.next_id;
        timeline.next_id += 1;
        let due = timeline.now + delay;
        timeline.tasks.push(ScheduledTask { id, due, task });
        ManualHandle {
            id,
            timeline: Rc::downgrade(&self.timeline),
        }
    }
}

#[derive(Default)]
struct Script {
    write_failures: VecDeque<StorageError>,
    read_failure: Option<StorageError>,
    write_attempts: usize,
}

/// Memory storage whose next writes or reads can be made to fail
#[derive(Clone, Default)]
pub struct ScriptedStorage {
    memory: MemoryStorage,
    script: Rc<RefCell<Script>>,
}

impl ScriptedStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_next_write(&self, err: StorageError) {
        self.script.borrow_mut().write_failures.push_back(err);
    }

    pub fn fail_reads(&self, err: StorageError) {
        self.script.borrow_mut().read_failure = Some(err);
    }

    pub fn write_attempts(&self) -> usize {
        self.script.borrow().write_attempts
    }

    pub fn memory(&self) -> &MemoryStorage {
        &self.memory
    }
}

impl StorageBackend for ScriptedStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        if let Some(err) = self.script.borrow().read_failure.clone() {
            return Err(err);
        }
        self.memory.get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let failure = {
            let mut script = self.script.borrow_mut();
            script.write_attempts += 1;
            script.write_failures.pop_front()
        };
        match failure {
            Some(err) => Err(err),
            None => self.memory.set_item(key, value),
        }
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        self.memory.remove_item(key)
    }
}
