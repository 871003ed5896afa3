//! Software RGBA8 canvas.
//!
//! The canvas keeps its pixels between frames, so a low-alpha
//! [`fade`](DrawSurface::fade) leaves trails like an HTML canvas does.
//! The pixels are sRGB with straight alpha and are composited source-over.
//! The layout matches `TextureFormat::Rgba8UnormSrgb`, so the buffer can be
//! copied straight into an `Image`.

use bevy::prelude::*;

use crate::surface::DrawSurface;

#[derive(Clone, Debug, Default)]
pub struct PixelCanvas {
    width: u32,
    height: u32,
    pixels: Vec<[u8; 4]>,
}

impl PixelCanvas {
    pub fn new(size: UVec2) -> Self {
        Self {
            width: size.x,
            height: size.y,
            pixels: vec![[0; 4]; (size.x * size.y) as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn dimensions(&self) -> UVec2 {
        UVec2::new(self.width, self.height)
    }

    /// Pixel at `(x, y)`, or `None` outside the canvas.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        (x < self.width && y < self.height).then(|| self.pixels[(y * self.width + x) as usize])
    }

    /// Row-major RGBA8 bytes.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    /// Composite `src` (straight sRGB + alpha) scaled by `coverage` onto one pixel.
    fn blend(&mut self, x: i32, y: i32, src: [f32; 4], coverage: f32) {
        if x < 0 || y < 0 || x as u32 >= self.width || y as u32 >= self.height {
            return;
        }
        let alpha = (src[3] * coverage).clamp(0.0, 1.0);
        if alpha <= 0.0 {
            return;
        }

        let dst = &mut self.pixels[(y as u32 * self.width + x as u32) as usize];
        let dst_alpha = dst[3] as f32 / 255.0;
        let out_alpha = alpha + dst_alpha * (1.0 - alpha);
        if out_alpha <= 0.0 {
            *dst = [0; 4];
            return;
        }

        for channel in 0..3 {
            let d = dst[channel] as f32 / 255.0;
            let c = (src[channel] * alpha + d * dst_alpha * (1.0 - alpha)) / out_alpha;
            dst[channel] = (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        }
        dst[3] = (out_alpha * 255.0).round() as u8;
    }

    /// Visit every pixel centre within `reach` of `center`. The callback
    /// gets the distance from the centre.
    fn for_disk(&mut self, center: Vec2, reach: f32, mut shade: impl FnMut(&mut Self, i32, i32, f32)) {
        if reach <= 0.0 || self.width == 0 || self.height == 0 {
            return;
        }
        let x0 = ((center.x - reach).floor() as i32).max(0);
        let y0 = ((center.y - reach).floor() as i32).max(0);
        let x1 = ((center.x + reach).ceil() as i32).min(self.width as i32 - 1);
        let y1 = ((center.y + reach).ceil() as i32).min(self.height as i32 - 1);

        for y in y0..=y1 {
            for x in x0..=x1 {
                let d = Vec2::new(x as f32 + 0.5, y as f32 + 0.5).distance(center);
                if d <= reach {
                    shade(self, x, y, d);
                }
            }
        }
    }
}

fn straight(color: Color) -> [f32; 4] {
    let c = color.to_srgba();
    [c.red, c.green, c.blue, c.alpha]
}

/// Non-zero winding number of `p` with respect to the closed polygon.
fn winding(points: &[Vec2], p: Vec2) -> i32 {
    let mut w = 0;
    for (i, a) in points.iter().enumerate() {
        let b = points[(i + 1) % points.len()];
        let side = (b.x - a.x) * (p.y - a.y) - (p.x - a.x) * (b.y - a.y);
        if a.y <= p.y {
            if b.y > p.y && side > 0.0 {
                w += 1;
            }
        } else if b.y <= p.y && side < 0.0 {
            w -= 1;
        }
    }
    w
}

impl DrawSurface for PixelCanvas {
    fn size(&self) -> Vec2 {
        Vec2::new(self.width as f32, self.height as f32)
    }

    fn resize(&mut self, size: UVec2) {
        *self = Self::new(size);
    }

    fn clear(&mut self) {
        self.pixels.fill([0; 4]);
    }

    fn fade(&mut self, color: Color, alpha: f32) {
        let src = straight(color.with_alpha(alpha));
        for y in 0..self.height as i32 {
            for x in 0..self.width as i32 {
                self.blend(x, y, src, 1.0);
            }
        }
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        let src = straight(color);
        self.for_disk(center, radius + 0.5, |canvas, x, y, d| {
            let coverage = (radius - d + 0.5).clamp(0.0, 1.0);
            canvas.blend(x, y, src, coverage);
        });
    }

    fn radial_gradient_fill(&mut self, center: Vec2, radius: f32, color: Color) {
        let src = straight(color);
        self.for_disk(center, radius, |canvas, x, y, d| {
            canvas.blend(x, y, src, 1.0 - d / radius);
        });
    }

    fn stroke_circle(&mut self, center: Vec2, radius: f32, width: f32, color: Color) {
        let src = straight(color);
        let half = width * 0.5;
        self.for_disk(center, radius + half + 0.5, |canvas, x, y, d| {
            let coverage = (half - (d - radius).abs() + 0.5).clamp(0.0, 1.0);
            canvas.blend(x, y, src, coverage);
        });
    }

    fn fill_polygon(&mut self, points: &[Vec2], color: Color) {
        if points.len() < 3 || self.width == 0 || self.height == 0 {
            return;
        }
        let src = straight(color);
        let (min, max) = points
            .iter()
            .fold((Vec2::MAX, Vec2::MIN), |(lo, hi), p| (lo.min(*p), hi.max(*p)));
        let x0 = (min.x.floor() as i32).max(0);
        let y0 = (min.y.floor() as i32).max(0);
        let x1 = (max.x.ceil() as i32).min(self.width as i32 - 1);
        let y1 = (max.y.ceil() as i32).min(self.height as i32 - 1);

        for y in y0..=y1 {
            for x in x0..=x1 {
                let p = Vec2::new(x as f32 + 0.5, y as f32 + 0.5);
                if winding(points, p) != 0 {
                    self.blend(x, y, src, 1.0);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn canvas() -> PixelCanvas {
        PixelCanvas::new(UVec2::new(64, 48))
    }

    #[test]
    fn filled_circle_covers_center_only() {
        let mut c = canvas();
        c.fill_circle(Vec2::new(20.0, 20.0), 5.0, Color::srgb(1.0, 0.0, 0.0));
        assert_eq!(c.pixel(20, 20), Some([255, 0, 0, 255]));
        assert_eq!(c.pixel(40, 40), Some([0, 0, 0, 0]));
    }

    #[test]
    fn fade_accumulates_toward_overlay_color() {
        let mut c = canvas();
        c.fill_circle(Vec2::new(10.0, 10.0), 4.0, Color::WHITE);
        for _ in 0..100 {
            c.fade(Color::BLACK, 0.1);
        }
        let [r, g, b, a] = c.pixel(10, 10).unwrap();
        assert!(r <= 5 && g <= 5 && b <= 5);
        assert_eq!(a, 255);
        // An untouched pixel ends up nearly opaque black as well.
        let [_, _, _, a] = c.pixel(60, 40).unwrap();
        assert!(a > 250);
    }

    #[test]
    fn glow_fades_from_center() {
        let mut c = canvas();
        c.radial_gradient_fill(Vec2::new(32.0, 24.0), 10.0, Color::WHITE);
        let center = c.pixel(32, 24).unwrap()[3];
        let rim = c.pixel(32 + 8, 24).unwrap()[3];
        assert!(center > rim);
        assert_eq!(c.pixel(32 + 11, 24).unwrap()[3], 0);
    }

    #[test]
    fn stroke_leaves_center_empty() {
        let mut c = canvas();
        c.stroke_circle(Vec2::new(32.0, 24.0), 10.0, 1.0, Color::WHITE);
        assert_eq!(c.pixel(32, 24).unwrap()[3], 0);
        assert!(c.pixel(42, 24).unwrap()[3] > 0);
    }

    #[test]
    fn star_polygon_fills_its_core() {
        let mut c = canvas();
        let center = Vec2::new(32.0, 24.0);
        let points: Vec<Vec2> = (0..5)
            .map(|i| center + Vec2::from_angle((i * 144) as f32 * std::f32::consts::PI / 180.0) * 15.0)
            .collect();
        c.fill_polygon(&points, Color::WHITE);
        assert_eq!(c.pixel(32, 24).unwrap()[3], 255);
    }

    #[test]
    fn resize_reallocates_and_clears() {
        let mut c = canvas();
        c.fill_circle(Vec2::new(5.0, 5.0), 3.0, Color::WHITE);
        c.resize(UVec2::new(10, 4));
        assert_eq!(c.dimensions(), UVec2::new(10, 4));
        assert_eq!(c.as_bytes().len(), 10 * 4 * 4);
        assert!(c.as_bytes().iter().all(|b| *b == 0));
    }

    #[test]
    fn drawing_off_canvas_is_ignored() {
        let mut c = canvas();
        c.fill_circle(Vec2::new(-50.0, -50.0), 5.0, Color::WHITE);
        c.fill_circle(Vec2::new(1000.0, 10.0), 5.0, Color::WHITE);
        assert!(c.as_bytes().iter().all(|b| *b == 0));
    }
}
