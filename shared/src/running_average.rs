use std::collections::VecDeque;

/// Mean of the last `window` samples.
#[derive(Clone, Debug)]
pub struct RunningAverage {
    window: usize,
    samples: VecDeque<f64>,
    sum: f64,
}

impl RunningAverage {
    pub fn new(window: usize) -> Self {
        Self {
            window: window.max(1),
            samples: VecDeque::with_capacity(window),
            sum: 0.0,
        }
    }

    pub fn sample(&mut self, value: f64) {
        if self.samples.len() == self.window {
            if let Some(oldest) = self.samples.pop_front() {
                self.sum -= oldest;
            }
        }
        self.samples.push_back(value);
        self.sum += value;
    }

    /// Zero until the first sample arrives.
    pub fn average(&self) -> f64 {
        if self.samples.is_empty() {
            0.0
        } else {
            self.sum / self.samples.len() as f64
        }
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}
