use crate::task::{Step, Task, TaskError};

/// A minimal-work process: three progress yields, then returns the sum
/// `0+1+2`. Matches `short_task.py` exactly, including the literal return
/// value `"Short task result: 3"`.
pub struct ShortTask {
    i: u32,
    result: u32,
}

impl ShortTask {
    pub fn new() -> Self {
        ShortTask { i: 0, result: 0 }
    }
}

impl Default for ShortTask {
    fn default() -> Self {
        Self::new()
    }
}

impl Task for ShortTask {
    fn step(&mut self) -> Result<Step, TaskError> {
        if self.i < 3 {
            self.result += self.i;
            self.i += 1;
            let pct = (self.i as f64) / 3.0 * 100.0;
            Ok(Step::Yield(format!("Short task progress: {pct}%")))
        } else {
            Ok(Step::Done(Some(format!(
                "Short task result: {}",
                self.result
            ))))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_expected_return_value() {
        let mut task = ShortTask::new();
        for _ in 0..3 {
            assert!(matches!(task.step().unwrap(), Step::Yield(_)));
        }
        assert_eq!(
            task.step().unwrap(),
            Step::Done(Some("Short task result: 3".to_string()))
        );
    }
}
