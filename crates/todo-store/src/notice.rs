//! Error Notification Channel
//!
//! A transient, self-expiring storage notice. Each activation is numbered;
//! the expiry task armed for it only ever clears that same activation, so a
//! late timer can neither clear a newer notice nor revive a cleared one.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use crate::config::NOTICE_TIMEOUT;

/// Runs deferred work; dropping the returned handle cancels the task
pub trait Scheduler {
    type Handle;

    fn schedule(&self, delay: Duration, task: Box<dyn FnOnce()>) -> Self::Handle;
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Notice {
    #[default]
    Clear,
    Active { message: String, generation: u64 },
}

impl Notice {
    pub fn is_active(&self) -> bool {
        matches!(self, Notice::Active { .. })
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            Notice::Active { message, .. } => Some(message),
            Notice::Clear => None,
        }
    }
}

type Listener = Rc<dyn Fn(Option<&str>)>;

#[derive(Default)]
struct ChannelState {
    notice: Notice,
    generation: u64,
    listeners: Vec<Listener>,
}

pub struct NotificationChannel<S: Scheduler> {
    state: Rc<RefCell<ChannelState>>,
    pending: RefCell<Option<S::Handle>>,
    scheduler: S,
    timeout: Duration,
}

impl<S: Scheduler> NotificationChannel<S> {
    pub fn new(scheduler: S, timeout: Duration) -> Self {
        Self {
            state: Rc::default(),
            pending: RefCell::new(None),
            scheduler,
            timeout,
        }
    }

    pub fn with_default_timeout(scheduler: S) -> Self {
        Self::new(scheduler, NOTICE_TIMEOUT)
    }

    pub fn notice(&self) -> Notice {
        self.state.borrow().notice.clone()
    }

    pub fn message(&self) -> Option<String> {
        self.state.borrow().notice.message().map(str::to_string)
    }

    pub fn is_active(&self) -> bool {
        self.state.borrow().notice.is_active()
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Called with the new message, or `None` when the notice clears
    pub fn on_change(&self, listener: impl Fn(Option<&str>) + 'static) {
        self.state.borrow_mut().listeners.push(Rc::new(listener));
    }

    /// Enter (or re-enter) the active state and restart the expiry timer
    pub fn raise(&self, message: impl Into<String>) {
        let message = message.into();
        let generation = {
            let mut state = self.state.borrow_mut();
            state.generation += 1;
            state.notice = Notice::Active {
                message: message.clone(),
                generation: state.generation,
            };
            state.generation
        };

        let weak = Rc::downgrade(&self.state);
        let handle = self.scheduler.schedule(
            self.timeout,
            Box::new(move || {
                if let Some(state) = weak.upgrade() {
                    expire(&state, generation);
                }
            }),
        );
        // Replacing the handle cancels the superseded timer
        drop(self.pending.replace(Some(handle)));

        notify(&self.state, Some(&message));
    }

    /// Return to clear and cancel any pending expiry
    pub fn clear(&self) {
        drop(self.pending.take());
        let was_active = {
            let mut state = self.state.borrow_mut();
            std::mem::take(&mut state.notice).is_active()
        };
        if was_active {
            notify(&self.state, None);
        }
    }
}

fn expire(state: &Rc<RefCell<ChannelState>>, generation: u64) {
    let expired = {
        let mut state = state.borrow_mut();
        let current = matches!(
            state.notice,
            Notice::Active { generation: active, .. } if active == generation
        );
        if current {
            state.notice = Notice::Clear;
        }
        current
    };
    if expired {
        log::debug!("Storage notice {} expired", generation);
        notify(state, None);
    }
}

fn notify(state: &Rc<RefCell<ChannelState>>, message: Option<&str>) {
    let listeners = state.borrow().listeners.clone();
    for listener in listeners {
        listener(message);
    }
}
