use super::ember::Ember;
use super::field_params::EmberParams;
use super::surface::Surface;
use cgmath::Vector2;
use log::debug;
use rand::rngs::StdRng;

// The full set of live embers. The set is only ever replaced as a whole.
#[derive(Debug)]
pub struct EmberField {
    embers: Vec<Ember>,
    count: usize,
    params: EmberParams,
    next_id: u64,
    rng: StdRng,
}

impl EmberField {
    pub fn new(count: usize, extent: Vector2<f32>, params: EmberParams, rng: StdRng) -> Self {
        let mut field = EmberField {
            embers: Vec::with_capacity(count),
            count,
            params,
            next_id: 0,
            rng,
        };
        field.reset(extent);
        field
    }

    // Discards every ember and spawns a fresh set of the same size.
    pub fn reset(&mut self, extent: Vector2<f32>) {
        self.embers.clear();
        for _ in 0..self.count {
            let id = self.next_id;
            self.next_id += 1;
            self.embers
                .push(Ember::spawn(id, &mut self.rng, extent, &self.params));
        }
        debug!(
            "Spawned {} embers in {}x{}",
            self.count, extent.x, extent.y
        );
    }

    // Updates every ember, then draws them all in collection order.
    pub fn step<S: Surface + ?Sized>(&mut self, surface: &mut S) {
        self.update(surface.extent());
        self.draw(surface);
    }

    pub fn update(&mut self, extent: Vector2<f32>) {
        for ember in self.embers.iter_mut() {
            ember.update(&mut self.rng, extent, &self.params);
        }
    }

    pub fn draw<S: Surface + ?Sized>(&self, surface: &mut S) {
        for ember in &self.embers {
            ember.draw(surface);
        }
    }

    pub fn embers(&self) -> &[Ember] {
        &self.embers
    }

    pub fn ids(&self) -> Vec<u64> {
        self.embers.iter().map(|e| e.id).collect()
    }

    pub fn len(&self) -> usize {
        self.embers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.embers.is_empty()
    }
}
