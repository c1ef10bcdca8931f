use super::input_buffer::InputBuffer;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellState {
    running: bool,
    ticks: usize,
    input: InputBuffer,
}

impl Default for ShellState {
    fn default() -> Self {
        Self {
            running: true,
            ticks: 0,
            input: InputBuffer::default(),
        }
    }
}

impl ShellState {
    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn stop(&mut self) {
        self.running = false;
    }

    /// Idle ticks seen so far; drives the connecting spinner.
    pub fn ticks(&self) -> usize {
        self.ticks
    }

    pub fn tick(&mut self) {
        self.ticks = self.ticks.wrapping_add(1);
    }

    pub fn input(&self) -> &InputBuffer {
        &self.input
    }

    pub fn input_mut(&mut self) -> &mut InputBuffer {
        &mut self.input
    }
}
