use super::field_params::EmberParams;
use super::surface::{Color, Paint, RadialGradient, Surface};
use cgmath::Vector2;
use rand::Rng;

// Range of the random initial velocity on each axis, centered on zero.
const INITIAL_VELOCITY_SPREAD: f32 = 0.2;

// Radii of the three glow layers, as multiples of the ember size.
const OUTER_GLOW_SCALE: f32 = 5.0;
const INNER_GLOW_SCALE: f32 = 2.5;
const CORE_SCALE: f32 = 0.7;

// One glowing particle.
#[derive(Debug, Clone, PartialEq)]
pub struct Ember {
    pub id: u64,
    // Surface pixel coordinates, +y is down.
    pub position: Vector2<f32>,
    pub velocity: Vector2<f32>,
    pub size: f32,
    pub brightness: f32,
    // Never read after spawn.
    pub brightness_direction: f32,
    pub wobble_phase: f32,
    pub wobble_speed: f32,
    pub flicker_speed: f32,
    // Never read after spawn.
    pub red_intensity: f32,
}

impl Ember {
    // Every attribute is drawn independently. `extent` is the surface size.
    pub fn spawn<R: Rng + ?Sized>(
        id: u64,
        rng: &mut R,
        extent: Vector2<f32>,
        params: &EmberParams,
    ) -> Self {
        let position = Vector2::new(rng.gen::<f32>() * extent.x, rng.gen::<f32>() * extent.y);
        let velocity = Vector2::new(
            (rng.gen::<f32>() - 0.5) * INITIAL_VELOCITY_SPREAD,
            (rng.gen::<f32>() - 0.5) * INITIAL_VELOCITY_SPREAD - params.drift,
        );
        Ember {
            id,
            position,
            velocity,
            size: rng.gen::<f32>() * 0.75 + 0.5,
            brightness: rng.gen::<f32>() * 0.4 + 0.4,
            brightness_direction: if rng.gen_bool(0.5) { 1.0 } else { -1.0 },
            wobble_phase: rng.gen::<f32>() * std::f32::consts::PI * 2.0,
            wobble_speed: rng.gen::<f32>() * 0.015 + 0.008,
            red_intensity: rng.gen::<f32>() * 0.3 + 0.7,
            flicker_speed: rng.gen::<f32>() * 0.05 + 0.02,
        }
    }

    pub fn update<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        extent: Vector2<f32>,
        params: &EmberParams,
    ) {
        self.position += self.velocity;
        self.position.x = wrap(self.position.x, extent.x);
        self.position.y = wrap(self.position.y, extent.y);

        self.brightness += (rng.gen::<f32>() - 0.5) * self.flicker_speed;
        self.brightness = self
            .brightness
            .max(params.min_brightness)
            .min(params.max_brightness);

        // Wobble: a periodic push on the velocity, damped and then capped.
        self.wobble_phase += self.wobble_speed;
        self.velocity.x += self.wobble_phase.cos() * params.wobble_force;
        self.velocity.y += self.wobble_phase.sin() * params.wobble_force;
        self.velocity *= params.damping;
        self.velocity.x = cap_magnitude(self.velocity.x, params.max_velocity);
        self.velocity.y = cap_magnitude(self.velocity.y, params.max_velocity);
    }

    pub fn draw<S: Surface + ?Sized>(&self, surface: &mut S) {
        let b = self.brightness;
        let outer = RadialGradient::new()
            .with_stop(0.0, Color::rgba(255, 100, 0, b * 0.5))
            .with_stop(0.4, Color::rgba(255, 50, 0, b * 0.2))
            .with_stop(1.0, Color::rgba(255, 0, 0, 0.0));
        surface.fill_circle(
            self.position,
            self.size * OUTER_GLOW_SCALE,
            &Paint::Radial(outer),
        );

        let inner = RadialGradient::new()
            .with_stop(0.0, Color::rgba(255, 200, 0, b * 0.8))
            .with_stop(0.6, Color::rgba(255, 100, 0, b * 0.4))
            .with_stop(1.0, Color::rgba(255, 50, 0, 0.0));
        surface.fill_circle(
            self.position,
            self.size * INNER_GLOW_SCALE,
            &Paint::Radial(inner),
        );

        surface.fill_circle(
            self.position,
            self.size * CORE_SCALE,
            &Paint::Solid(Color::rgba(255, 220, 100, b)),
        );
    }
}

// Toroidal wrap: leaving one side puts the coordinate exactly on the other
// bound, it is not taken modulo the extent.
fn wrap(v: f32, extent: f32) -> f32 {
    let v = if v < 0.0 { extent } else { v };
    if v > extent {
        0.0
    } else {
        v
    }
}

fn cap_magnitude(v: f32, max: f32) -> f32 {
    if v.abs() > max {
        max * v.signum()
    } else {
        v
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::Vector2;
    use rand::SeedableRng;

    #[derive(Default)]
    struct RecordingSurface {
        width: u32,
        height: u32,
        fills: Vec<(Vector2<f32>, f32, Paint)>,
    }

    impl Surface for RecordingSurface {
        fn width(&self) -> u32 {
            self.width
        }
        fn height(&self) -> u32 {
            self.height
        }
        fn resize(&mut self, width: u32, height: u32) {
            self.width = width;
            self.height = height;
        }
        fn clear(&mut self) {
            self.fills.clear();
        }
        fn fill_circle(&mut self, center: Vector2<f32>, radius: f32, paint: &Paint) {
            self.fills.push((center, radius, paint.clone()));
        }
    }

    fn rng() -> rand::rngs::StdRng {
        rand::rngs::StdRng::seed_from_u64(7)
    }

    fn still_ember(position: Vector2<f32>, velocity: Vector2<f32>) -> Ember {
        Ember {
            id: 0,
            position,
            velocity,
            size: 1.0,
            brightness: 0.5,
            brightness_direction: 1.0,
            wobble_phase: 0.0,
            wobble_speed: 0.0,
            flicker_speed: 0.0,
            red_intensity: 1.0,
        }
    }

    #[test]
    fn spawn_ranges() {
        let mut rng = rng();
        let extent = Vector2::new(800.0, 600.0);
        let params = EmberParams::default();
        for id in 0..1000 {
            let ember = Ember::spawn(id, &mut rng, extent, &params);
            assert_eq!(ember.id, id);
            assert!(ember.position.x >= 0.0 && ember.position.x <= extent.x);
            assert!(ember.position.y >= 0.0 && ember.position.y <= extent.y);
            assert!(ember.velocity.x.abs() <= 0.1);
            assert!(ember.velocity.y >= -0.15 && ember.velocity.y <= 0.05);
            assert!(ember.size >= 0.5 && ember.size <= 1.25);
            assert!(ember.brightness >= 0.4 && ember.brightness <= 0.8);
            assert!(ember.brightness_direction == 1.0 || ember.brightness_direction == -1.0);
            assert!(ember.wobble_phase >= 0.0 && ember.wobble_phase <= 2.0 * std::f32::consts::PI);
            assert!(ember.wobble_speed >= 0.008 && ember.wobble_speed <= 0.023);
            assert!(ember.flicker_speed >= 0.02 && ember.flicker_speed <= 0.07);
            assert!(ember.red_intensity >= 0.7 && ember.red_intensity <= 1.0);
        }
    }

    #[test]
    fn drifts_upward_on_average() {
        let mut rng = rng();
        let params = EmberParams::default();
        let n = 2000;
        let mean_vy: f32 = (0..n)
            .map(|id| Ember::spawn(id, &mut rng, Vector2::new(10.0, 10.0), &params).velocity.y)
            .sum::<f32>()
            / n as f32;
        assert!(mean_vy < -0.03);
    }

    #[test]
    fn invariants_hold_over_many_updates() {
        let mut rng = rng();
        let extent = Vector2::new(320.0, 240.0);
        let params = EmberParams::default();
        let mut embers: Vec<Ember> = (0..6)
            .map(|id| Ember::spawn(id, &mut rng, extent, &params))
            .collect();
        for _ in 0..5000 {
            for ember in embers.iter_mut() {
                ember.update(&mut rng, extent, &params);
                assert!(ember.brightness >= 0.2 && ember.brightness <= 0.8);
                assert!(ember.velocity.x.abs() <= 0.8);
                assert!(ember.velocity.y.abs() <= 0.8);
                assert!(ember.position.x >= 0.0 && ember.position.x <= extent.x);
                assert!(ember.position.y >= 0.0 && ember.position.y <= extent.y);
            }
        }
    }

    #[test]
    fn wraps_to_exact_opposite_bound() {
        let mut rng = rng();
        let params = EmberParams::default();
        let extent = Vector2::new(100.0, 50.0);

        let mut ember = still_ember(Vector2::new(100.0, 10.0), Vector2::new(1.0, 0.0));
        ember.update(&mut rng, extent, &params);
        assert_eq!(ember.position.x, 0.0);

        let mut ember = still_ember(Vector2::new(0.0, 10.0), Vector2::new(-0.5, 0.0));
        ember.update(&mut rng, extent, &params);
        assert_eq!(ember.position.x, 100.0);

        let mut ember = still_ember(Vector2::new(10.0, 0.0), Vector2::new(0.0, -0.5));
        ember.update(&mut rng, extent, &params);
        assert_eq!(ember.position.y, 50.0);

        let mut ember = still_ember(Vector2::new(10.0, 50.0), Vector2::new(0.0, 0.5));
        ember.update(&mut rng, extent, &params);
        assert_eq!(ember.position.y, 0.0);
    }

    #[test]
    fn wrap_resets_rather_than_modulo() {
        assert_eq!(wrap(101.0, 100.0), 0.0);
        assert_eq!(wrap(250.0, 100.0), 0.0);
        assert_eq!(wrap(-30.0, 100.0), 100.0);
        assert_eq!(wrap(100.0, 100.0), 100.0);
        assert_eq!(wrap(0.0, 100.0), 0.0);
    }

    #[test]
    fn out_of_range_after_shrink_wraps_on_next_update() {
        let mut rng = rng();
        let params = EmberParams::default();
        let mut ember = still_ember(Vector2::new(500.0, 400.0), Vector2::new(0.0, 0.0));
        ember.update(&mut rng, Vector2::new(200.0, 100.0), &params);
        assert_eq!(ember.position, Vector2::new(0.0, 0.0));
    }

    #[test]
    fn wobble_force_is_damped_and_capped() {
        let mut rng = rng();
        let params = EmberParams::default();
        let extent = Vector2::new(1000.0, 1000.0);

        let mut ember = still_ember(Vector2::new(500.0, 500.0), Vector2::new(0.0, 0.0));
        ember.wobble_speed = 0.0;
        ember.update(&mut rng, extent, &params);
        // cos(0) pushes x, sin(0) leaves y.
        assert!((ember.velocity.x - 0.025 * 0.97).abs() < 1e-6);
        assert!(ember.velocity.y.abs() < 1e-6);

        let mut ember = still_ember(Vector2::new(500.0, 500.0), Vector2::new(5.0, -5.0));
        ember.update(&mut rng, extent, &params);
        assert_eq!(ember.velocity.x, 0.8);
        assert_eq!(ember.velocity.y, -0.8);
    }

    #[test]
    fn brightness_is_clamped() {
        let mut rng = rng();
        let params = EmberParams::default();
        let extent = Vector2::new(10.0, 10.0);
        let mut ember = still_ember(Vector2::new(5.0, 5.0), Vector2::new(0.0, 0.0));
        ember.brightness = 3.0;
        ember.update(&mut rng, extent, &params);
        assert_eq!(ember.brightness, 0.8);
        ember.brightness = -1.0;
        ember.update(&mut rng, extent, &params);
        assert_eq!(ember.brightness, 0.2);
    }

    #[test]
    fn draws_three_layers_around_position() {
        let mut surface = RecordingSurface::default();
        surface.resize(100, 100);
        let mut ember = still_ember(Vector2::new(40.0, 60.0), Vector2::new(0.0, 0.0));
        ember.size = 2.0;
        ember.brightness = 0.6;
        ember.draw(&mut surface);

        assert_eq!(surface.fills.len(), 3);
        let radii: Vec<f32> = surface.fills.iter().map(|f| f.1).collect();
        assert_eq!(radii, vec![10.0, 5.0, 1.4]);
        assert!(surface.fills.iter().all(|f| f.0 == ember.position));

        match &surface.fills[0].2 {
            Paint::Radial(gradient) => {
                let stops = gradient.stops();
                assert_eq!(stops.len(), 3);
                assert!((stops[0].color.a - 0.3).abs() < 1e-6);
                assert_eq!(stops[2].color.a, 0.0);
            }
            other => panic!("expected a gradient, got {:?}", other),
        }
        assert_eq!(
            surface.fills[2].2,
            Paint::Solid(Color::rgba(255, 220, 100, 0.6))
        );
    }
}
