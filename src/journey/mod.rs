//! Multi-step form routing.
//!
//! A [`JourneyMap`] is an ordered list of steps. Each step may carry a skip
//! predicate and any number of forks (`target`, predicate) that jump straight
//! ahead when they hold. A step is skipped for a state when its own predicate
//! holds or when an active fork earlier on the route jumps over it. The map
//! keeps no position of its own: every call re-derives where the user is from
//! the step they are on and the state the predicates read.

pub mod flows;

use crate::core::{Result, StoreError};
use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashMap;
use tracing::trace;

lazy_static! {
    static ref STEP_PATH: Regex =
        Regex::new(r"^[a-z0-9][a-z0-9-]*(?:/[a-z0-9][a-z0-9-]*)*$").unwrap();
}

/// Predicate over request or session state.
pub type Predicate<S> = Box<dyn Fn(&S) -> bool + Send + Sync>;

struct Fork<S> {
    target: String,
    when: Predicate<S>,
}

struct StepDef<S> {
    path: String,
    skip: Option<Predicate<S>>,
    forks: Vec<Fork<S>>,
}

impl<S> StepDef<S> {
    fn skipped(&self, state: &S) -> bool {
        self.skip.as_ref().is_some_and(|skip| skip(state))
    }

    fn active_fork(&self, state: &S) -> Option<&str> {
        self.forks
            .iter()
            .find(|fork| (fork.when)(state))
            .map(|fork| fork.target.as_str())
    }
}

/// Where a step sits relative to the declared steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Position {
    Fallback,
    Step(usize),
    Terminal,
}

/// Back and next addresses for the step being shown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JourneyPaths<'a> {
    pub back: &'a str,
    pub next: &'a str,
}

pub struct JourneyMap<S> {
    name: String,
    fallback: String,
    terminal: String,
    steps: Vec<StepDef<S>>,
    index: HashMap<String, usize>,
}

impl<S> JourneyMap<S> {
    pub fn builder(name: &str) -> JourneyBuilder<S> {
        JourneyBuilder::new(name)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn fallback(&self) -> &str {
        &self.fallback
    }

    pub fn terminal(&self) -> &str {
        &self.terminal
    }

    /// Declared steps in order, skipped or not.
    pub fn steps(&self) -> Vec<&str> {
        self.steps.iter().map(|step| step.path.as_str()).collect()
    }

    pub fn contains(&self, step: &str) -> bool {
        self.index.contains_key(step) || step == self.fallback || step == self.terminal
    }

    /// The step after `current`: the first later step that is not skipped,
    /// or the terminal step once none is left.
    ///
    /// An active fork on `current` lands on its target, since every step it
    /// jumps over is skipped.
    pub fn next(&self, current: &str, state: &S) -> Result<&str> {
        let position = self.position(current)?;
        let route = self.route(state);
        let next = match position {
            Position::Terminal => None,
            Position::Fallback => route.first().copied(),
            Position::Step(i) => route.iter().find(|&&j| j > i).copied(),
        }
        .map_or(self.terminal.as_str(), |j| self.steps[j].path.as_str());
        trace!(journey = %self.name, from = %current, to = %next, "next step");
        Ok(next)
    }

    /// The step before `current`: the nearest earlier step that is not
    /// skipped, or the fallback entry point when there is none.
    pub fn back(&self, current: &str, state: &S) -> Result<&str> {
        let position = self.position(current)?;
        let route = self.route(state);
        let back = match position {
            Position::Fallback => None,
            Position::Terminal => route.last().copied(),
            Position::Step(i) => route.iter().rev().find(|&&j| j < i).copied(),
        }
        .map_or(self.fallback.as_str(), |j| self.steps[j].path.as_str());
        trace!(journey = %self.name, from = %current, to = %back, "back step");
        Ok(back)
    }

    /// Whether `step` is bypassed for this state, by its own predicate or by
    /// a fork. The fallback and terminal are never skipped.
    pub fn is_skipped(&self, step: &str, state: &S) -> Result<bool> {
        Ok(match self.position(step)? {
            Position::Step(i) => !self.route(state).contains(&i),
            Position::Fallback | Position::Terminal => false,
        })
    }

    pub fn paths(&self, current: &str, state: &S) -> Result<JourneyPaths<'_>> {
        Ok(JourneyPaths {
            back: self.back(current, state)?,
            next: self.next(current, state)?,
        })
    }

    /// Every step the state visits, from the first to the last before the terminal step.
    pub fn reachable(&self, state: &S) -> Vec<&str> {
        self.route(state)
            .into_iter()
            .map(|i| self.steps[i].path.as_str())
            .collect()
    }

    fn route(&self, state: &S) -> Vec<usize> {
        let mut route = Vec::new();
        let mut cursor = self.open_index_from(0, state);
        while let Some(i) = cursor {
            route.push(i);
            cursor = match self.steps[i].active_fork(state) {
                Some(target) => self
                    .index
                    .get(target)
                    .and_then(|&j| self.open_index_from(j, state)),
                None => self.open_index_from(i + 1, state),
            };
        }
        route
    }

    fn position(&self, step: &str) -> Result<Position> {
        if let Some(&i) = self.index.get(step) {
            return Ok(Position::Step(i));
        }
        if step == self.fallback {
            return Ok(Position::Fallback);
        }
        if step == self.terminal {
            return Ok(Position::Terminal);
        }
        Err(StoreError::UnknownStep {
            journey: self.name.clone(),
            step: step.to_string(),
        })
    }

    fn open_index_from(&self, start: usize, state: &S) -> Option<usize> {
        (start..self.steps.len()).find(|&i| !self.steps[i].skipped(state))
    }
}

impl<S> std::fmt::Debug for JourneyMap<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JourneyMap")
            .field("name", &self.name)
            .field("fallback", &self.fallback)
            .field("terminal", &self.terminal)
            .field("steps", &self.steps())
            .finish()
    }
}

/// Declares a [`JourneyMap`]; every mistake surfaces from [`JourneyBuilder::build`].
pub struct JourneyBuilder<S> {
    name: String,
    fallback: Option<String>,
    terminal: Option<String>,
    steps: Vec<StepDef<S>>,
    forks: Vec<(String, String, Predicate<S>)>,
}

impl<S> JourneyBuilder<S> {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            fallback: None,
            terminal: None,
            steps: Vec::new(),
            forks: Vec::new(),
        }
    }

    /// Entry point `back` returns to from the first step.
    pub fn fallback(mut self, path: &str) -> Self {
        self.fallback = Some(path.to_string());
        self
    }

    /// Completion step `next` reaches once the steps run out.
    pub fn terminal(mut self, path: &str) -> Self {
        self.terminal = Some(path.to_string());
        self
    }

    pub fn step(mut self, path: &str) -> Self {
        self.steps.push(StepDef {
            path: path.to_string(),
            skip: None,
            forks: Vec::new(),
        });
        self
    }

    pub fn step_skip_if(
        mut self,
        path: &str,
        skip: impl Fn(&S) -> bool + Send + Sync + 'static,
    ) -> Self {
        self.steps.push(StepDef {
            path: path.to_string(),
            skip: Some(Box::new(skip)),
            forks: Vec::new(),
        });
        self
    }

    /// From `from`, jump straight to `to` when `when` holds. Forks on one
    /// step are tried in declaration order.
    pub fn fork(
        mut self,
        from: &str,
        to: &str,
        when: impl Fn(&S) -> bool + Send + Sync + 'static,
    ) -> Self {
        self.forks
            .push((from.to_string(), to.to_string(), Box::new(when)));
        self
    }

    pub fn build(self) -> Result<JourneyMap<S>> {
        let invalid = |msg: String| StoreError::InvalidJourney(format!("{}: {}", self.name, msg));

        let fallback = self
            .fallback
            .clone()
            .filter(|path| !path.is_empty())
            .ok_or_else(|| invalid("missing fallback".to_string()))?;
        let terminal = self
            .terminal
            .clone()
            .filter(|path| !path.is_empty())
            .ok_or_else(|| invalid("missing terminal step".to_string()))?;
        if fallback == terminal {
            return Err(invalid(format!("fallback and terminal are both '{}'", terminal)));
        }

        let mut index = HashMap::new();
        for (i, step) in self.steps.iter().enumerate() {
            if !STEP_PATH.is_match(&step.path) {
                return Err(invalid(format!("malformed step path '{}'", step.path)));
            }
            if step.path == fallback || step.path == terminal {
                return Err(invalid(format!(
                    "step '{}' clashes with the fallback or terminal",
                    step.path
                )));
            }
            if index.insert(step.path.clone(), i).is_some() {
                return Err(invalid(format!("duplicate step '{}'", step.path)));
            }
        }

        let mut steps = self.steps;
        for (from, to, when) in self.forks {
            let Some(&i) = index.get(&from) else {
                return Err(StoreError::UnknownStep {
                    journey: self.name.clone(),
                    step: from,
                });
            };
            let forward = match index.get(&to) {
                Some(&j) => j > i,
                None => to == terminal,
            };
            if !forward {
                return Err(StoreError::InvalidJourney(format!(
                    "{}: fork from '{}' must target a later step or the terminal, got '{}'",
                    self.name, from, to
                )));
            }
            steps[i].forks.push(Fork { target: to, when });
        }

        Ok(JourneyMap {
            name: self.name,
            fallback,
            terminal,
            steps,
            index,
        })
    }
}
