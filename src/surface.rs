use cgmath::Vector2;

// A color with 8 bit sRGB channels and a straight (non premultiplied) alpha.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Color {
    pub const fn rgba(r: u8, g: u8, b: u8, a: f32) -> Self {
        Color { r, g, b, a }
    }

    pub const TRANSPARENT: Color = Color::rgba(0, 0, 0, 0.0);

    fn lerp(&self, other: &Color, t: f32) -> Color {
        let mix = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * t).round() as u8;
        Color {
            r: mix(self.r, other.r),
            g: mix(self.g, other.g),
            b: mix(self.b, other.b),
            a: self.a + (other.a - self.a) * t,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ColorStop {
    // Fraction of the gradient radius, in [0, 1].
    pub offset: f32,
    pub color: Color,
}

// A gradient that radiates from the center of the filled circle out to its edge.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RadialGradient {
    stops: Vec<ColorStop>,
}

impl RadialGradient {
    pub fn new() -> Self {
        RadialGradient { stops: vec![] }
    }

    pub fn with_stop(mut self, offset: f32, color: Color) -> Self {
        let offset = offset.max(0.0).min(1.0);
        let index = self
            .stops
            .iter()
            .position(|stop| stop.offset > offset)
            .unwrap_or_else(|| self.stops.len());
        self.stops.insert(index, ColorStop { offset, color });
        self
    }

    pub fn stops(&self) -> &[ColorStop] {
        &self.stops
    }

    // Color at `t`, the distance from the center as a fraction of the radius.
    // Outside the first and last stops the end colors are held.
    pub fn color_at(&self, t: f32) -> Color {
        let (first, last) = match (self.stops.first(), self.stops.last()) {
            (Some(first), Some(last)) => (first, last),
            _ => return Color::TRANSPARENT,
        };
        if t <= first.offset {
            return first.color;
        }
        if t >= last.offset {
            return last.color;
        }
        for pair in self.stops.windows(2) {
            let (lo, hi) = (&pair[0], &pair[1]);
            if t <= hi.offset {
                let span = hi.offset - lo.offset;
                if span <= 0.0 {
                    return hi.color;
                }
                return lo.color.lerp(&hi.color, (t - lo.offset) / span);
            }
        }
        last.color
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Paint {
    Solid(Color),
    Radial(RadialGradient),
}

impl Paint {
    pub fn color_at(&self, t: f32) -> Color {
        match self {
            Paint::Solid(color) => *color,
            Paint::Radial(gradient) => gradient.color_at(t),
        }
    }
}

// The 2D raster that embers are drawn onto. Dimensions are in pixels and are
// owned by whoever hosts the surface.
pub trait Surface {
    fn width(&self) -> u32;
    fn height(&self) -> u32;
    fn resize(&mut self, width: u32, height: u32);
    fn clear(&mut self);
    fn fill_circle(&mut self, center: Vector2<f32>, radius: f32, paint: &Paint);

    fn extent(&self) -> Vector2<f32> {
        Vector2::new(self.width() as f32, self.height() as f32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Color = Color::rgba(255, 0, 0, 1.0);
    const BLUE: Color = Color::rgba(0, 0, 255, 0.0);

    #[test]
    fn stops_are_kept_sorted() {
        let gradient = RadialGradient::new()
            .with_stop(1.0, BLUE)
            .with_stop(0.0, RED)
            .with_stop(0.5, RED);
        let offsets: Vec<f32> = gradient.stops().iter().map(|s| s.offset).collect();
        assert_eq!(offsets, vec![0.0, 0.5, 1.0]);
    }

    #[test]
    fn interpolates_between_stops() {
        let gradient = RadialGradient::new().with_stop(0.0, RED).with_stop(1.0, BLUE);
        assert_eq!(gradient.color_at(0.0), RED);
        assert_eq!(gradient.color_at(1.0), BLUE);
        let mid = gradient.color_at(0.5);
        assert_eq!(mid.r, 128);
        assert_eq!(mid.b, 128);
        assert!((mid.a - 0.5).abs() < 1e-6);
    }

    #[test]
    fn holds_end_colors() {
        let gradient = RadialGradient::new().with_stop(0.25, RED).with_stop(0.75, BLUE);
        assert_eq!(gradient.color_at(0.0), RED);
        assert_eq!(gradient.color_at(2.0), BLUE);
    }

    #[test]
    fn empty_gradient_is_transparent() {
        assert_eq!(RadialGradient::new().color_at(0.3), Color::TRANSPARENT);
    }

    #[test]
    fn solid_paint_ignores_distance() {
        let paint = Paint::Solid(RED);
        assert_eq!(paint.color_at(0.0), paint.color_at(0.9));
    }
}
