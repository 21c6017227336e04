use crate::task::{Step, Task, TaskError};

const N: usize = 100;

/// Computes the first 100 Fibonacci numbers, yielding one initialization
/// message followed by 98 per-term updates (indices 2..100), then returns
/// the full stringified sequence. Matches `fibonacci.py`'s loop structure;
/// its initialization yield text is translated from the original's
/// Chinese ("初始化完成") rather than carried over verbatim.
pub struct Fibonacci {
    sequence: Vec<u64>,
    i: usize,
    initialized: bool,
    done: bool,
}

impl Fibonacci {
    pub fn new() -> Self {
        Fibonacci {
            sequence: vec![0, 1],
            i: 2,
            initialized: false,
            done: false,
        }
    }
}

impl Default for Fibonacci {
    fn default() -> Self {
        Self::new()
    }
}

impl Task for Fibonacci {
    fn step(&mut self) -> Result<Step, TaskError> {
        if self.done {
            return Ok(Step::Done(Some(format!("{:?}", self.sequence))));
        }
        if !self.initialized {
            self.initialized = true;
            return Ok(Step::Yield("Fibonacci sequence initialized".to_string()));
        }
        if self.i < N {
            let next = self.sequence[self.i - 1] + self.sequence[self.i - 2];
            self.sequence.push(next);
            let msg = format!("F({}) = {next}", self.i);
            self.i += 1;
            Ok(Step::Yield(msg))
        } else {
            self.done = true;
            Ok(Step::Done(Some(format!("{:?}", self.sequence))))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn produces_ninety_nine_yields_then_done() {
        let mut task = Fibonacci::new();
        let mut yields = 0;
        loop {
            match task.step().unwrap() {
                Step::Yield(_) => yields += 1,
                Step::Done(_) => break,
            }
        }
        assert_eq!(yields, 99);
    }
}
