use super::surface::{Paint, Surface};
use cgmath::Vector2;

// CPU raster surface. Pixels are stored as straight-alpha RGBA8, row major,
// and every fill is composited with source-over.
#[derive(Debug, Clone)]
pub struct Canvas {
    image: image::RgbaImage,
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> Self {
        Canvas {
            image: image::RgbaImage::new(width, height),
        }
    }

    pub fn image(&self) -> &image::RgbaImage {
        &self.image
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<image::Rgba<u8>> {
        if x < self.image.width() && y < self.image.height() {
            Some(*self.image.get_pixel(x, y))
        } else {
            None
        }
    }

    pub fn save_png(&self, path: &std::path::Path) -> image::ImageResult<()> {
        self.image.save_with_format(path, image::ImageFormat::Png)
    }

    fn blend(dst: &mut image::Rgba<u8>, src: [f32; 3], src_alpha: f32) {
        if src_alpha <= 0.0 {
            return;
        }
        let dst_alpha = dst[3] as f32 / 255.0;
        let out_alpha = src_alpha + dst_alpha * (1.0 - src_alpha);
        for c in 0..3 {
            let blended =
                (src[c] * src_alpha + dst[c] as f32 * dst_alpha * (1.0 - src_alpha)) / out_alpha;
            dst[c] = blended.round().max(0.0).min(255.0) as u8;
        }
        dst[3] = (out_alpha * 255.0).round().max(0.0).min(255.0) as u8;
    }
}

impl Surface for Canvas {
    fn width(&self) -> u32 {
        self.image.width()
    }

    fn height(&self) -> u32 {
        self.image.height()
    }

    fn resize(&mut self, width: u32, height: u32) {
        if width == self.image.width() && height == self.image.height() {
            return;
        }
        self.image = image::RgbaImage::new(width, height);
    }

    fn clear(&mut self) {
        for pixel in self.image.pixels_mut() {
            *pixel = image::Rgba([0, 0, 0, 0]);
        }
    }

    fn fill_circle(&mut self, center: Vector2<f32>, radius: f32, paint: &Paint) {
        if radius <= 0.0 || self.image.width() == 0 || self.image.height() == 0 {
            return;
        }
        let max_x = self.image.width() as f32 - 1.0;
        let max_y = self.image.height() as f32 - 1.0;
        let x_start = (center.x - radius).floor().max(0.0);
        let x_end = (center.x + radius).ceil().min(max_x);
        let y_start = (center.y - radius).floor().max(0.0);
        let y_end = (center.y + radius).ceil().min(max_y);
        if x_start > x_end || y_start > y_end {
            return;
        }

        for y in (y_start as u32)..=(y_end as u32) {
            for x in (x_start as u32)..=(x_end as u32) {
                // Sample at the pixel center.
                let dx = x as f32 + 0.5 - center.x;
                let dy = y as f32 + 0.5 - center.y;
                let distance = (dx * dx + dy * dy).sqrt();
                if distance > radius {
                    continue;
                }
                let color = paint.color_at(distance / radius);
                let alpha = color.a.max(0.0).min(1.0);
                Canvas::blend(
                    self.image.get_pixel_mut(x, y),
                    [color.r as f32, color.g as f32, color.b as f32],
                    alpha,
                );
            }
        }
    }
}
