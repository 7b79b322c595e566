use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use waitgate::condition::{ConditionEvaluator, EvalFuture, Evaluation};
use waitgate::errors::WaitgateError;

enum Step {
    Result(Result<Evaluation, WaitgateError>),
    /// Never completes, like a request to a registry that never answers.
    Stall,
}

/// A fake evaluator that:
/// - returns queued results (or stalls), one per tick
/// - repeats "not met" once the queue is empty
/// - records how many ticks were started.
pub struct ScriptedEvaluator {
    steps: VecDeque<Step>,
    ticks: Arc<Mutex<u32>>,
}

impl ScriptedEvaluator {
    pub fn new(ticks: Arc<Mutex<u32>>) -> Self {
        Self {
            steps: VecDeque::new(),
            ticks,
        }
    }

    pub fn then(mut self, result: Result<Evaluation, WaitgateError>) -> Self {
        self.steps.push_back(Step::Result(result));
        self
    }

    pub fn then_not_met(self, times: usize) -> Self {
        (0..times).fold(self, |s, i| {
            s.then(Ok(Evaluation::not_met(format!("not yet ({})", i + 1))))
        })
    }

    pub fn then_stall(mut self) -> Self {
        self.steps.push_back(Step::Stall);
        self
    }
}

impl ConditionEvaluator for ScriptedEvaluator {
    fn evaluate(&mut self) -> EvalFuture<'_> {
        {
            let mut guard = self.ticks.lock().unwrap();
            *guard += 1;
        }
        match self.steps.pop_front() {
            Some(Step::Result(next)) => Box::pin(async move { next }),
            Some(Step::Stall) => Box::pin(std::future::pending()),
            None => Box::pin(async { Ok(Evaluation::not_met("still waiting")) }),
        }
    }
}
