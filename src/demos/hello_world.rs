use crate::task::{Step, Task, TaskError};

/// Accumulates `sum(0..10)` one term at a time, yielding the running sum
/// after each addition, then returns the final total. Ten `Yield`s plus
/// one terminal `Done` — eleven `step()` calls total, so under a forced
/// 1-unit burst the clock lands on 11 once this terminates alone.
pub struct HelloWorld {
    i: u32,
    sum: u32,
    done: bool,
}

impl HelloWorld {
    pub fn new() -> Self {
        HelloWorld {
            i: 0,
            sum: 0,
            done: false,
        }
    }
}

impl Default for HelloWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl Task for HelloWorld {
    fn step(&mut self) -> Result<Step, TaskError> {
        if self.done {
            return Ok(Step::Done(Some(format!("Final result: {}", self.sum))));
        }
        if self.i < 10 {
            self.sum += self.i;
            self.i += 1;
            Ok(Step::Yield(format!("Calculating: {}", self.sum)))
        } else {
            self.done = true;
            Ok(Step::Done(Some(format!("Final result: {}", self.sum))))
        }
    }
}
