use super::field::EmberField;
use super::field_params::FieldParams;
use super::surface::Surface;
use log::{info, trace};
use rand::rngs::StdRng;

// Owns the surface and the ember field and applies the three kinds of
// events to them: frames, resizes and periodic resets.
#[derive(Debug)]
pub struct EmberDriver<S: Surface> {
    params: FieldParams,
    surface: S,
    field: EmberField,
    since_reset: std::time::Duration,
    frames: u64,
    resets: u64,
}

impl<S: Surface> EmberDriver<S> {
    // Sizes the surface to the configured viewport and spawns the first field.
    pub fn new(mut surface: S, params: FieldParams, rng: StdRng) -> Self {
        surface.resize(params.viewport_width, params.viewport_height);
        let field = EmberField::new(params.ember_count, surface.extent(), params.ember, rng);
        info!(
            "Ember field ready: {} embers on {}x{}",
            field.len(),
            surface.width(),
            surface.height()
        );
        EmberDriver {
            params,
            surface,
            field,
            since_reset: std::time::Duration::default(),
            frames: 0,
            resets: 0,
        }
    }

    pub fn frame(&mut self) {
        self.surface.clear();
        self.field.step(&mut self.surface);
        self.frames += 1;
        trace!("Frame {} done", self.frames);
    }

    // Particles are left where they are, they wrap against the new bounds on
    // their next update.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == self.surface.width() && height == self.surface.height() {
            return;
        }
        info!("Resizing: ({}, {})", width, height);
        self.surface.resize(width, height);
    }

    pub fn reset(&mut self) {
        self.field.reset(self.surface.extent());
        self.since_reset = std::time::Duration::default();
        self.resets += 1;
        info!("Ember field reset ({} so far)", self.resets);
    }

    // Feeds elapsed wall-clock time to the reset timer. Returns how many
    // resets fired.
    pub fn advance(&mut self, elapsed: std::time::Duration) -> u32 {
        let interval = self.params.reset_interval();
        if interval == std::time::Duration::default() {
            return 0;
        }
        self.since_reset += elapsed;
        let mut fired = 0;
        while self.since_reset >= interval {
            let carry = self.since_reset - interval;
            self.reset();
            self.since_reset = carry;
            fired += 1;
        }
        fired
    }

    pub fn tick(&mut self, elapsed: std::time::Duration) {
        self.advance(elapsed);
        self.frame();
    }

    pub fn params(&self) -> &FieldParams {
        &self.params
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn field(&self) -> &EmberField {
        &self.field
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn resets(&self) -> u64 {
        self.resets
    }

    pub fn into_surface(self) -> S {
        self.surface
    }
}
