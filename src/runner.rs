use super::driver::EmberDriver;
use super::frame_clock::FrameClock;
use super::surface::Surface;
use log::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DriverCommand {
    Resize { width: u32, height: u32 },
    Reset,
    Stop,
}

// Handle to a running ember loop. The loop owns the driver until `stop`
// hands it back. Dropping the handle also ends the loop.
pub struct RunHandle<S: Surface> {
    command_tx: crossbeam_channel::Sender<DriverCommand>,
    thread: Option<std::thread::JoinHandle<EmberDriver<S>>>,
}

impl<S: Surface> RunHandle<S> {
    pub fn resize(&self, width: u32, height: u32) {
        self.send(DriverCommand::Resize { width, height });
    }

    pub fn reset(&self) {
        self.send(DriverCommand::Reset);
    }

    // Stops the loop and returns the driver in whatever state the last frame
    // left it. `None` if the loop thread panicked.
    pub fn stop(mut self) -> Option<EmberDriver<S>> {
        self.send(DriverCommand::Stop);
        let thread = self.thread.take()?;
        match thread.join() {
            Ok(driver) => Some(driver),
            Err(_) => {
                warn!("Ember loop panicked before stopping");
                None
            }
        }
    }

    fn send(&self, command: DriverCommand) {
        // A closed channel means the loop is already gone.
        let _ = self.command_tx.send(command);
    }
}

impl<S: Surface> Drop for RunHandle<S> {
    fn drop(&mut self) {
        if self.thread.is_some() {
            self.send(DriverCommand::Stop);
        }
    }
}

// Runs the driver on its own thread. Frames, resizes and resets are all
// handled on that one thread, one at a time.
pub fn spawn<S: Surface + Send + 'static>(driver: EmberDriver<S>) -> RunHandle<S> {
    let (command_tx, command_rx) = crossbeam_channel::unbounded::<DriverCommand>();
    let thread = std::thread::spawn(move || run(driver, command_rx));
    RunHandle {
        command_tx,
        thread: Some(thread),
    }
}

fn run<S: Surface>(
    mut driver: EmberDriver<S>,
    command_rx: crossbeam_channel::Receiver<DriverCommand>,
) -> EmberDriver<S> {
    let mut clock = FrameClock::new(driver.params().frame_interval());
    let frames = crossbeam_channel::tick(clock.frame_budget);
    info!("Entering ember loop, {:?} per frame", clock.frame_budget);
    loop {
        crossbeam_channel::select! {
            recv(command_rx) -> msg => match msg {
                Ok(DriverCommand::Resize { width, height }) => driver.resize(width, height),
                Ok(DriverCommand::Reset) => driver.reset(),
                Ok(DriverCommand::Stop) | Err(_) => break,
            },
            recv(frames) -> msg => match msg {
                Ok(at) => {
                    let delta_t = clock.tick_at(at);
                    driver.tick(delta_t);
                }
                Err(_) => break,
            },
        }
    }
    info!(
        "Ember loop stopped after {} frames ({} over budget)",
        driver.frames(),
        clock.overruns()
    );
    driver
}
