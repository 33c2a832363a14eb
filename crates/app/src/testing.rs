//! In-memory doubles for the ports, shared by the unit tests of this crate.

use std::collections::VecDeque;
use std::future::Future;
use std::sync::Mutex;
use std::time::Duration;

use pumpscript_domain::error::PumpScriptError;
use pumpscript_domain::id::CommandId;
use pumpscript_domain::key::{Key, StepDirection};
use pumpscript_domain::phase::CommandPhase;
use pumpscript_domain::result::CommandResult;
use pumpscript_domain::screen::{AttributeKind, Screen, ScreenType};

use crate::ports::{Clock, CommandObserver, Observation, PumpNavigator};

// ── Fake navigator ─────────────────────────────────────────────

/// Scripted pump display.
///
/// The display walks through a queue of screens; only
/// `wait_for_screen_update` advances it, and the last screen sticks. A
/// transition request that succeeds jumps straight to its target. Step
/// presses move a single live value.
pub struct FakeNavigator {
    state: Mutex<FakeState>,
}

struct FakeState {
    screens: VecDeque<Screen>,
    after_confirm: Option<Vec<Screen>>,
    transition_results: VecDeque<bool>,
    transition_requests: u32,
    navigation_presses: u32,
    confirm_presses: u32,
    live_value: i64,
    step_size: i64,
    dropped_presses: u32,
    stale_reads: VecDeque<i64>,
    step_presses: Vec<(u32, StepDirection)>,
    live_reads: u32,
}

impl FakeNavigator {
    pub fn showing(screens: &[ScreenType]) -> Self {
        Self::showing_screens(screens.iter().copied().map(Screen::new).collect())
    }

    pub fn showing_screens(screens: Vec<Screen>) -> Self {
        Self {
            state: Mutex::new(FakeState {
                screens: screens.into(),
                after_confirm: None,
                transition_results: VecDeque::new(),
                transition_requests: 0,
                navigation_presses: 0,
                confirm_presses: 0,
                live_value: 0,
                step_size: 10,
                dropped_presses: 0,
                stale_reads: VecDeque::new(),
                step_presses: Vec::new(),
                live_reads: 0,
            }),
        }
    }

    /// Replace the screen queue with `screens` on the next confirm press.
    pub fn after_confirm(&self, screens: Vec<Screen>) {
        self.state.lock().unwrap().after_confirm = Some(screens);
    }

    /// Results for the next transition requests; `false` once exhausted.
    pub fn queue_transition_results(&self, results: &[bool]) {
        self.state
            .lock()
            .unwrap()
            .transition_results
            .extend(results.iter().copied());
    }

    pub fn set_live_value(&self, value: i64) {
        self.state.lock().unwrap().live_value = value;
    }

    pub fn set_step_size(&self, step_size: i64) {
        self.state.lock().unwrap().step_size = step_size;
    }

    /// Ignore the next `count` step presses.
    pub fn drop_next_presses(&self, count: u32) {
        self.state.lock().unwrap().dropped_presses = count;
    }

    /// Readings returned before the live value, oldest first.
    pub fn queue_stale_reads(&self, values: &[i64]) {
        self.state
            .lock()
            .unwrap()
            .stale_reads
            .extend(values.iter().copied());
    }

    pub fn transition_requests(&self) -> u32 {
        self.state.lock().unwrap().transition_requests
    }

    pub fn navigation_presses(&self) -> u32 {
        self.state.lock().unwrap().navigation_presses
    }

    pub fn confirm_presses(&self) -> u32 {
        self.state.lock().unwrap().confirm_presses
    }

    pub fn step_presses(&self) -> Vec<(u32, StepDirection)> {
        self.state.lock().unwrap().step_presses.clone()
    }

    pub fn live_reads(&self) -> u32 {
        self.state.lock().unwrap().live_reads
    }

    /// Whether anything at all was asked of the pump.
    pub fn untouched(&self) -> bool {
        let state = self.state.lock().unwrap();
        state.transition_requests == 0
            && state.navigation_presses == 0
            && state.confirm_presses == 0
            && state.step_presses.is_empty()
            && state.live_reads == 0
    }

    fn transition(&self, target: ScreenType) -> bool {
        let mut state = self.state.lock().unwrap();
        state.transition_requests += 1;
        let reached = state.transition_results.pop_front().unwrap_or(false);
        if reached {
            state.screens = VecDeque::from([Screen::new(target)]);
        }
        reached
    }

    fn read_live(&self) -> i64 {
        let mut state = self.state.lock().unwrap();
        state.live_reads += 1;
        match state.stale_reads.pop_front() {
            Some(stale) => stale,
            None => state.live_value,
        }
    }
}

impl PumpNavigator for FakeNavigator {
    fn current_screen(&self) -> impl Future<Output = Result<Screen, PumpScriptError>> + Send {
        let screen = self
            .state
            .lock()
            .unwrap()
            .screens
            .front()
            .cloned()
            .unwrap_or_else(|| Screen::new(ScreenType::Other));
        async move { Ok(screen) }
    }

    fn go_to_screen_of_type(
        &self,
        target: ScreenType,
        _timeout: Duration,
    ) -> impl Future<Output = Result<bool, PumpScriptError>> + Send {
        let reached = self.transition(target);
        async move { Ok(reached) }
    }

    fn enter_sub_menu(
        &self,
        _from: ScreenType,
        to: ScreenType,
        _key: Key,
        _timeout: Duration,
    ) -> impl Future<Output = Result<bool, PumpScriptError>> + Send {
        let reached = self.transition(to);
        async move { Ok(reached) }
    }

    fn press_navigation_key(&self) -> impl Future<Output = Result<(), PumpScriptError>> + Send {
        self.state.lock().unwrap().navigation_presses += 1;
        async { Ok(()) }
    }

    fn press_confirm_key(&self) -> impl Future<Output = Result<(), PumpScriptError>> + Send {
        let mut state = self.state.lock().unwrap();
        state.confirm_presses += 1;
        if let Some(screens) = state.after_confirm.take() {
            state.screens = screens.into();
        }
        async { Ok(()) }
    }

    fn press(
        &self,
        steps: u32,
        direction: StepDirection,
        _per_step_delay: Duration,
    ) -> impl Future<Output = Result<(), PumpScriptError>> + Send {
        let mut state = self.state.lock().unwrap();
        state.step_presses.push((steps, direction));
        if state.dropped_presses > 0 {
            state.dropped_presses -= 1;
        } else {
            let delta = i64::from(steps) * state.step_size;
            match direction {
                StepDirection::Increase => state.live_value += delta,
                StepDirection::Decrease => state.live_value -= delta,
            }
        }
        async { Ok(()) }
    }

    fn wait_for_screen_update(
        &self,
        _timeout: Duration,
    ) -> impl Future<Output = Result<(), PumpScriptError>> + Send {
        let mut state = self.state.lock().unwrap();
        if state.screens.len() > 1 {
            state.screens.pop_front();
        }
        async { Ok(()) }
    }

    fn read_live_number(
        &self,
        _kind: AttributeKind,
    ) -> impl Future<Output = Result<i64, PumpScriptError>> + Send {
        let value = self.read_live();
        async move { Ok(value) }
    }

    fn read_live_duration(&self) -> impl Future<Output = Result<i64, PumpScriptError>> + Send {
        let value = self.read_live();
        async move { Ok(value) }
    }
}

// ── Instant clock ──────────────────────────────────────────────

/// Records requested sleeps and returns at once.
#[derive(Default)]
pub struct InstantClock {
    sleeps: Mutex<Vec<Duration>>,
}

impl InstantClock {
    pub fn sleeps(&self) -> Vec<Duration> {
        self.sleeps.lock().unwrap().clone()
    }
}

impl Clock for InstantClock {
    fn sleep(&self, duration: Duration) -> impl Future<Output = ()> + Send {
        self.sleeps.lock().unwrap().push(duration);
        async {}
    }
}

// ── Spy observer ───────────────────────────────────────────────

#[derive(Default)]
pub struct SpyObserver {
    phases: Mutex<Vec<CommandPhase>>,
    attempts: Mutex<Vec<(CommandPhase, u32, Observation)>>,
    alerts: Mutex<Vec<Screen>>,
    finished: Mutex<Vec<(CommandId, bool, String)>>,
}

impl SpyObserver {
    pub fn phases(&self) -> Vec<CommandPhase> {
        self.phases.lock().unwrap().clone()
    }

    pub fn attempts(&self) -> Vec<(CommandPhase, u32, Observation)> {
        self.attempts.lock().unwrap().clone()
    }

    pub fn alerts(&self) -> Vec<Screen> {
        self.alerts.lock().unwrap().clone()
    }

    /// `(id, success, message)` of every finished command.
    pub fn finished_commands(&self) -> Vec<(CommandId, bool, String)> {
        self.finished.lock().unwrap().clone()
    }
}

impl CommandObserver for SpyObserver {
    fn phase_entered(&self, _id: CommandId, phase: CommandPhase) {
        self.phases.lock().unwrap().push(phase);
    }

    fn attempt(&self, _id: CommandId, phase: CommandPhase, attempt: u32, observation: Observation) {
        self.attempts
            .lock()
            .unwrap()
            .push((phase, attempt, observation));
    }

    fn alert_acknowledged(&self, _id: CommandId, alert: &Screen) {
        self.alerts.lock().unwrap().push(alert.clone());
    }

    fn finished(&self, id: CommandId, result: &CommandResult) {
        self.finished
            .lock()
            .unwrap()
            .push((id, result.success, result.message.clone()));
    }
}
