use crate::task::{Step, Task, TaskError};

/// Simulates an I/O-heavy process: five rounds, each an "IO wait" yield
/// followed by a "result processing" yield — ten yields total, matching
/// `io_bound.py`.
pub struct IoBound {
    i: u32,
    phase: Phase,
    done: bool,
}

enum Phase {
    Waiting,
    Processing,
}

impl IoBound {
    pub fn new() -> Self {
        IoBound {
            i: 1,
            phase: Phase::Waiting,
            done: false,
        }
    }
}

impl Default for IoBound {
    fn default() -> Self {
        Self::new()
    }
}

impl Task for IoBound {
    fn step(&mut self) -> Result<Step, TaskError> {
        if self.done {
            return Ok(Step::Done(Some(
                "IO task completed, data processed".to_string(),
            )));
        }
        if self.i > 5 {
            self.done = true;
            return Ok(Step::Done(Some(
                "IO task completed, data processed".to_string(),
            )));
        }
        match self.phase {
            Phase::Waiting => {
                let msg = format!("IO waiting {}", self.i);
                self.phase = Phase::Processing;
                Ok(Step::Yield(msg))
            }
            Phase::Processing => {
                let result = self.i * 2;
                let msg = format!("IO result processing: {result}");
                self.phase = Phase::Waiting;
                self.i += 1;
                Ok(Step::Yield(msg))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn produces_ten_yields_then_done() {
        let mut task = IoBound::new();
        let mut yields = 0;
        loop {
            match task.step().unwrap() {
                Step::Yield(_) => yields += 1,
                Step::Done(v) => {
                    assert_eq!(v, Some("IO task completed, data processed".to_string()));
                    break;
                }
            }
        }
        assert_eq!(yields, 10);
    }
}
