//! Work/break state machine. [WorkTimer::evaluate] is pure: it takes the previous
//! [SessionState] and the current sample, and hands back the next state together with at most
//! one [Decision]. All I/O stays in the [monitor](super::monitor).

use chrono::{DateTime, TimeDelta, Utc};

/// Durations governing when reminders are issued. `nudge_interval` is expected to be no longer
/// than `work_duration`, but that is not enforced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerPolicy {
    /// Continuous work allowed before a break is due.
    pub work_duration: TimeDelta,
    /// Idle time that counts as a break.
    pub idle_threshold: TimeDelta,
    /// Cadence of reminders once the break is overdue.
    pub nudge_interval: TimeDelta,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionState {
    /// Start of the current uninterrupted work session.
    pub session_start: DateTime<Utc>,
    pub overdue: bool,
    pub last_nudge: DateTime<Utc>,
    /// Amount of work past the limit as of the last nudge. Display only.
    pub overdue_time: TimeDelta,
}

impl SessionState {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            session_start: now,
            overdue: false,
            last_nudge: now,
            overdue_time: TimeDelta::zero(),
        }
    }

    /// Work time accumulated in this session. A clock that went backwards yields zero.
    pub fn elapsed(&self, now: DateTime<Utc>) -> TimeDelta {
        (now - self.session_start).max(TimeDelta::zero())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// Work limit reached for the first time in this session.
    BreakDue {
        session_start: DateTime<Utc>,
        elapsed: TimeDelta,
        idle_threshold: TimeDelta,
    },
    /// Repeated reminder while the break stays overdue.
    OverdueNudge {
        session_start: DateTime<Utc>,
        overdue_time: TimeDelta,
        nudge_interval: TimeDelta,
        idle_threshold: TimeDelta,
    },
}

#[derive(Debug, Clone)]
pub struct WorkTimer {
    policy: TimerPolicy,
}

impl WorkTimer {
    pub fn new(policy: TimerPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &TimerPolicy {
        &self.policy
    }

    /// Advances the state machine by one sample. Rules are checked in order and the first match
    /// wins: a qualifying break resets the session, then the first crossing of the work limit,
    /// then a due nudge.
    pub fn evaluate(
        &self,
        state: SessionState,
        idle: TimeDelta,
        now: DateTime<Utc>,
    ) -> (SessionState, Option<Decision>) {
        let elapsed = state.elapsed(now);

        if idle >= self.policy.idle_threshold {
            return (SessionState::new(now), None);
        }

        if !state.overdue && elapsed >= self.policy.work_duration {
            let next = SessionState {
                overdue: true,
                last_nudge: now,
                ..state
            };
            let decision = Decision::BreakDue {
                session_start: state.session_start,
                elapsed,
                idle_threshold: self.policy.idle_threshold,
            };
            return (next, Some(decision));
        }

        if state.overdue && now - state.last_nudge >= self.policy.nudge_interval {
            let overdue_time = (elapsed - self.policy.work_duration).max(TimeDelta::zero());
            let next = SessionState {
                last_nudge: now,
                overdue_time,
                ..state
            };
            let decision = Decision::OverdueNudge {
                session_start: state.session_start,
                overdue_time,
                nudge_interval: self.policy.nudge_interval,
                idle_threshold: self.policy.idle_threshold,
            };
            return (next, Some(decision));
        }

        (state, None)
    }
}
