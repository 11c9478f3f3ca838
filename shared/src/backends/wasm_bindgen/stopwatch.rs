/// Measures wall-clock time for diagnostics. Never feeds the simulation.
pub struct Stopwatch {
    start_ms: f64,
}

impl Stopwatch {
    pub fn start() -> Self {
        Self {
            start_ms: js_sys::Date::now(),
        }
    }

    pub fn elapsed_ms(&self) -> f64 {
        js_sys::Date::now() - self.start_ms
    }
}
