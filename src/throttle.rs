use std::cell::RefCell;
use std::rc::Rc;

use gloo_timers::callback::Timeout;
use web_sys::js_sys::Date;

/// What a throttled call should do right now.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Gate {
    /// Run the callback immediately.
    Run,
    /// Cooldown still active; schedule a trailing run one interval from now.
    Defer,
}

/// Timing policy behind [`throttle`], kept free of timers so it can be
/// driven with explicit timestamps.
#[derive(Debug, Clone)]
pub struct ThrottleGate {
    interval_ms: f64,
    last_run: Option<f64>,
}

impl ThrottleGate {
    pub fn new(interval_ms: f64) -> Self {
        Self { interval_ms, last_run: None }
    }

    pub fn check(&mut self, now: f64) -> Gate {
        match self.last_run {
            Some(last) if now - last < self.interval_ms => Gate::Defer,
            _ => {
                self.last_run = Some(now);
                Gate::Run
            }
        }
    }

    /// Records a trailing run. The timestamp is the one of the call that
    /// scheduled it, not the moment the timer fired.
    pub fn mark(&mut self, called_at: f64) {
        self.last_run = Some(called_at);
    }
}

/// Where deferred runs come from. Dropping a handle cancels its task.
pub trait Scheduler {
    type Handle;

    fn now(&self) -> f64;
    fn schedule(&self, delay_ms: u32, task: Box<dyn FnOnce()>) -> Self::Handle;
}

/// `setTimeout` and `Date.now` through gloo.
pub struct BrowserScheduler;

impl Scheduler for BrowserScheduler {
    type Handle = Timeout;

    fn now(&self) -> f64 {
        Date::now()
    }

    fn schedule(&self, delay_ms: u32, task: Box<dyn FnOnce()>) -> Timeout {
        Timeout::new(delay_ms, task)
    }
}

/// Wraps `callback` so it runs at most once per `interval_ms`. Calls made
/// during the cooldown collapse into a single trailing run; each new one
/// replaces the previously pending timer.
pub fn throttle<F>(interval_ms: u32, callback: F) -> impl FnMut()
where
    F: FnMut() + 'static,
{
    throttle_with(BrowserScheduler, interval_ms, callback)
}

pub fn throttle_with<S, F>(scheduler: S, interval_ms: u32, callback: F) -> impl FnMut()
where
    S: Scheduler + 'static,
    F: FnMut() + 'static,
{
    let callback = Rc::new(RefCell::new(callback));
    let gate = Rc::new(RefCell::new(ThrottleGate::new(interval_ms as f64)));
    let pending: Rc<RefCell<Option<S::Handle>>> = Rc::new(RefCell::new(None));

    move || {
        let now = scheduler.now();
        let decision = gate.borrow_mut().check(now);
        match decision {
            Gate::Run => {
                pending.borrow_mut().take();
                (callback.borrow_mut())();
            }
            Gate::Defer => {
                let callback = callback.clone();
                let gate = gate.clone();
                let handle = scheduler.schedule(
                    interval_ms,
                    Box::new(move || {
                        gate.borrow_mut().mark(now);
                        (callback.borrow_mut())();
                    }),
                );
                // Replacing the slot drops, and so cancels, the older task.
                *pending.borrow_mut() = Some(handle);
            }
        }
    }
}
