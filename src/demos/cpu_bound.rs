use crate::task::{Step, Task, TaskError};

/// Simulates a long CPU-intensive process: seven outer iterations, each
/// doing progressively more inner work before yielding a progress report.
/// Matches `cpu_bound.py`'s `for i in range(1, 8)` structure.
pub struct CpuBound {
    i: u32,
    result: u32,
    done: bool,
}

impl CpuBound {
    pub fn new() -> Self {
        CpuBound {
            i: 1,
            result: 0,
            done: false,
        }
    }
}

impl Default for CpuBound {
    fn default() -> Self {
        Self::new()
    }
}

impl Task for CpuBound {
    fn step(&mut self) -> Result<Step, TaskError> {
        if self.done {
            return Ok(Step::Done(Some(self.result.to_string())));
        }
        if self.i <= 7 {
            for j in 0..(self.i * 1000) {
                self.result = self.result.wrapping_add(j % 10);
            }
            let pct = self.i * 15;
            let msg = format!(
                "Calculation progress: {pct}%, current result: {}",
                self.result
            );
            self.i += 1;
            Ok(Step::Yield(msg))
        } else {
            self.done = true;
            Ok(Step::Done(Some(self.result.to_string())))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn produces_seven_yields_then_done() {
        let mut task = CpuBound::new();
        let mut yields = 0;
        loop {
            match task.step().unwrap() {
                Step::Yield(_) => yields += 1,
                Step::Done(_) => break,
            }
        }
        assert_eq!(yields, 7);
    }
}
