use std::time::Duration;

use chat_launcher_core::{ScheduledTask, Scheduler};
use gloo_timers::callback::Timeout;

pub(super) struct TimeoutScheduler;

pub(super) struct PendingTimeout(Timeout);

impl ScheduledTask for PendingTimeout {
    fn cancel(self) {
        // Clears the browser timer; the returned closure is dropped unrun.
        let _ = self.0.cancel();
    }
}

impl Scheduler for TimeoutScheduler {
    type Task = PendingTimeout;

    fn schedule(&mut self, delay: Duration, task: Box<dyn FnOnce()>) -> PendingTimeout {
        let millis = u32::try_from(delay.as_millis()).unwrap_or(u32::MAX);
        PendingTimeout(Timeout::new(millis, task))
    }
}
