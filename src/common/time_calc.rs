use std::time::Duration;

/// Accumulates per-stage durations across inference runs.
#[derive(Debug, Default)]
pub struct TimeCalc {
    n: usize,
    duration: Vec<Duration>,
}

#[allow(dead_code)]
impl TimeCalc {
    pub fn total(&self) -> Duration {
        self.duration.iter().sum::<Duration>()
    }

    pub fn n(&self) -> usize {
        if self.duration.is_empty() {
            0
        } else {
            self.n / self.duration.len()
        }
    }

    pub fn avg(&self) -> Duration {
        let n = self.n();
        if n == 0 {
            Duration::ZERO
        } else {
            self.total() / n as u32
        }
    }

    pub fn avg_i(&self, i: usize) -> Duration {
        let n = self.n();
        if n == 0 || i >= self.duration.len() {
            Duration::ZERO
        } else {
            self.duration[i] / n as u32
        }
    }

    pub fn ts(&self) -> &Vec<Duration> {
        &self.duration
    }

    pub fn add_or_push(&mut self, i: usize, x: Duration) {
        match self.duration.get_mut(i) {
            Some(elem) => *elem += x,
            None => {
                if i >= self.duration.len() {
                    self.duration.push(x)
                }
            }
        }
        self.n += 1;
    }

    pub fn clear(&mut self) {
        self.n = Default::default();
        self.duration = Default::default();
    }
}
