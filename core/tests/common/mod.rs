// tests/common/mod.rs
#![allow(dead_code)] // Not every test binary uses every helper

use once_cell::sync::Lazy;
use parking_lot::Mutex;
use sequitur::{Sequence, SequenceError, SequenceExt, TRACE_TARGET};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tracing::field::{Field, Visit};
use tracing::{Dispatch, Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::{EnvFilter, Layer};

// --- Common Error Type for Tests ---
#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum TestError {
  #[error("foo")]
  Foo,

  #[error("test step failed: {0}")]
  Step(String),
}

impl From<TestError> for SequenceError {
  fn from(err: TestError) -> Self {
    SequenceError::step(err)
  }
}

// --- Expected outcome of a scenario ---
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpectedFault {
  None,
  Panic,
  Cancelled,
  Foo,
}

impl ExpectedFault {
  pub fn matches(self, actual: Option<&SequenceError>) -> bool {
    match (self, actual) {
      (ExpectedFault::None, None) => true,
      (ExpectedFault::Panic, Some(fault)) => fault.is_panic(),
      (ExpectedFault::Cancelled, Some(fault)) => fault.is_cancelled(),
      (ExpectedFault::Foo, Some(fault)) => fault.downcast_ref::<TestError>() == Some(&TestError::Foo),
      _ => false,
    }
  }
}

#[derive(Debug, Clone, Copy)]
pub struct Outcome {
  pub result: &'static str,
  pub last_step: &'static str,
  pub fault: ExpectedFault,
}

pub type ScenarioFn = fn(&mut dyn Sequence) -> String;

/// Runs `scenario` against `seq` and checks the accumulated result, the last
/// step name and the stored fault.
pub fn check_scenario(name: &str, seq: &mut dyn Sequence, scenario: ScenarioFn, expected: Outcome) {
  let result = scenario(seq);
  assert_eq!(result, expected.result, "[{name}] result");
  assert_eq!(seq.last_step(), expected.last_step, "[{name}] last step");
  assert!(
    expected.fault.matches(seq.error()),
    "[{name}] expected fault {:?}, obtained {:?}",
    expected.fault,
    seq.error()
  );
}

// --- Shared scenarios ---

/// "letter a" succeeds, "misbehave" panics, "letter b" never runs; catch appends "z".
pub fn scenario_recover(seq: &mut dyn Sequence) -> String {
  let mut result = String::new();

  seq.step("letter a", || -> Result<(), SequenceError> {
    result.push('a');
    Ok(())
  });

  seq.step("misbehave", || -> Result<(), SequenceError> { panic!("foobar") });

  seq.step("letter b", || -> Result<(), SequenceError> {
    result.push('b');
    Ok(())
  });

  seq.catch(|_, _| result.push('z'));

  result
}

/// Three successful steps; catch is a no-op, the first then appends "d", the second is ignored.
pub fn scenario_then(seq: &mut dyn Sequence) -> String {
  let mut result = String::new();

  seq.step("letter a", || -> Result<(), SequenceError> {
    result.push('a');
    Ok(())
  });

  seq.step("letter b", || -> Result<(), SequenceError> {
    result.push('b');
    Ok(())
  });

  seq.step("letter c", || -> Result<(), SequenceError> {
    result.push('c');
    Ok(())
  });

  seq.catch(|_, _| result.push('z'));
  seq.then(|| result.push('d'));
  seq.then(|| result.push('e'));

  result
}

/// Like `scenario_then`, but the first step is slow.
pub fn scenario_then_delayed(seq: &mut dyn Sequence) -> String {
  let mut result = String::new();

  seq.step("letter a", || -> Result<(), SequenceError> {
    std::thread::sleep(Duration::from_millis(50));
    result.push('a');
    Ok(())
  });

  seq.step("letter b", || -> Result<(), SequenceError> {
    result.push('b');
    Ok(())
  });

  seq.step("letter c", || -> Result<(), SequenceError> {
    result.push('c');
    Ok(())
  });

  seq.catch(|_, _| result.push('z'));
  seq.then(|| result.push('d'));
  seq.then(|| result.push('e'));

  result
}

/// "letter b" returns `TestError::Foo`; "letter c" never runs; catch appends "z", then is ignored.
pub fn scenario_catch(seq: &mut dyn Sequence) -> String {
  let mut result = String::new();

  seq.step("letter a", || -> Result<(), TestError> {
    result.push('a');
    Ok(())
  });

  seq.step("letter b", || -> Result<(), TestError> {
    result.push('b');
    Err(TestError::Foo)
  });

  seq.step("letter c", || -> Result<(), TestError> {
    result.push('c');
    Ok(())
  });

  seq.catch(|_, _| result.push('z'));
  seq.then(|| result.push('d'));

  result
}

// --- Helper for Tracing Setup (call once per test run if needed) ---
static TRACING_INIT: Lazy<()> = Lazy::new(|| {
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));
  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_test_writer() // Important for tests to capture output
    .try_init()
    .ok(); // Allow multiple initializations in tests (ok if fails)
});

pub fn setup_tracing() {
  Lazy::force(&TRACING_INIT);
}

// --- Recording sink for asserting exact trace sequences ---

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recorded {
  pub level: Level,
  pub message: String,
  pub step: Option<String>,
  pub error: Option<String>,
}

impl Recorded {
  pub fn new(level: Level, message: &str) -> Self {
    let step = message
      .strip_prefix("starting: ")
      .or_else(|| message.strip_prefix("skipped: "))
      .unwrap_or(message);
    Self {
      level,
      message: message.to_string(),
      step: Some(step.to_string()),
      error: None,
    }
  }

  pub fn with_error(mut self, error: impl fmt::Display) -> Self {
    self.error = Some(error.to_string());
    self
  }
}

/// Layer that keeps every event emitted under `TRACE_TARGET`.
#[derive(Clone, Default)]
pub struct RecordingLayer {
  events: Arc<Mutex<Vec<Recorded>>>,
}

impl RecordingLayer {
  pub fn events(&self) -> Vec<Recorded> {
    self.events.lock().clone()
  }

  pub fn reset(&self) {
    self.events.lock().clear();
  }

  pub fn subscriber(&self) -> impl Subscriber + Send + Sync + 'static {
    tracing_subscriber::registry().with(self.clone())
  }

  pub fn dispatch(&self) -> Dispatch {
    Dispatch::new(self.subscriber())
  }
}

impl<S: Subscriber> Layer<S> for RecordingLayer {
  fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
    if event.metadata().target() != TRACE_TARGET {
      return;
    }
    let mut visitor = RecordingVisitor::default();
    event.record(&mut visitor);
    self.events.lock().push(Recorded {
      level: *event.metadata().level(),
      message: visitor.message,
      step: visitor.step,
      error: visitor.error,
    });
  }
}

#[derive(Default)]
struct RecordingVisitor {
  message: String,
  step: Option<String>,
  error: Option<String>,
}

impl Visit for RecordingVisitor {
  fn record_str(&mut self, field: &Field, value: &str) {
    match field.name() {
      "step" => self.step = Some(value.to_string()),
      "error" => self.error = Some(value.to_string()),
      _ => self.record_debug(field, &value),
    }
  }

  fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
    match field.name() {
      "message" => self.message = format!("{value:?}"),
      "step" => self.step = Some(format!("{value:?}")),
      "error" => self.error = Some(format!("{value:?}")),
      _ => {}
    }
  }
}
