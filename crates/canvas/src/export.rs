//! Snapshot export: rasterize the canvas and write PNG or PDF files.
//!
//! Export always renders at 1.0x so the file reflects logical geometry,
//! whatever zoom the author is working at. The previous zoom is restored
//! even when writing the file fails.

use crate::EditorCanvas;
use anyhow::{Context, Result};
use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};
use model::{CanvasElement, CanvasPoint, ElementKind, Hsla, CANVAS_HEIGHT, CANVAS_WIDTH};
use std::io::Write as _;
use std::ops::{Deref, DerefMut};
use std::path::Path;

/// JPEG quality for the image embedded in PDF exports.
const PDF_JPEG_QUALITY: u8 = 90;

/// Forces zoom to 1.0 for the lifetime of the guard and puts the author's
/// zoom back on drop, so an export that errors out partway never leaves
/// the canvas stuck at the wrong zoom.
struct ZoomRestore<'a> {
    canvas: &'a mut EditorCanvas,
    previous: f32,
}

impl<'a> ZoomRestore<'a> {
    fn new(canvas: &'a mut EditorCanvas) -> Self {
        let previous = canvas.viewport.zoom();
        canvas.viewport.set_zoom(1.0);
        Self { canvas, previous }
    }
}

impl Drop for ZoomRestore<'_> {
    fn drop(&mut self) {
        self.canvas.viewport.set_zoom(self.previous);
    }
}

impl Deref for ZoomRestore<'_> {
    type Target = EditorCanvas;

    fn deref(&self) -> &EditorCanvas {
        self.canvas
    }
}

impl DerefMut for ZoomRestore<'_> {
    fn deref_mut(&mut self) -> &mut EditorCanvas {
        self.canvas
    }
}

/// Rasterize the canvas at 1.0x into an RGBA bitmap.
pub fn render_snapshot(canvas: &mut EditorCanvas) -> RgbaImage {
    let guard = ZoomRestore::new(canvas);
    let mut img = RgbaImage::from_pixel(
        CANVAS_WIDTH as u32,
        CANVAS_HEIGHT as u32,
        Rgba([255, 255, 255, 255]),
    );
    for element in &guard.elements {
        if element.is_renderable() {
            draw_element(&mut img, element);
        }
    }
    img
}

/// Write the canvas as a PNG file.
pub fn export_png(canvas: &mut EditorCanvas, path: &Path) -> Result<()> {
    report("png", path, write_png(canvas, path))
}

/// Write the canvas as a single-page PDF.
///
/// The page carries the rasterized canvas as a JPEG image object, one
/// canvas pixel per PDF point.
pub fn export_pdf(canvas: &mut EditorCanvas, path: &Path) -> Result<()> {
    report("pdf", path, write_pdf(canvas, path))
}

fn report(kind: &str, path: &Path, result: Result<()>) -> Result<()> {
    match &result {
        Ok(()) => log::info!("exported {kind} to {}", path.display()),
        Err(err) => log::error!("{kind} export to {} failed: {err:#}", path.display()),
    }
    result
}

fn write_png(canvas: &mut EditorCanvas, path: &Path) -> Result<()> {
    let img = render_snapshot(canvas);
    img.save_with_format(path, ImageFormat::Png)
        .with_context(|| format!("writing png to {}", path.display()))?;
    Ok(())
}

fn write_pdf(canvas: &mut EditorCanvas, path: &Path) -> Result<()> {
    let img = render_snapshot(canvas);
    let (width, height) = img.dimensions();

    let rgb = DynamicImage::ImageRgba8(img).to_rgb8();
    let mut jpeg = Vec::new();
    JpegEncoder::new_with_quality(&mut jpeg, PDF_JPEG_QUALITY)
        .encode_image(&rgb)
        .context("encoding page image")?;

    let bytes = build_pdf(&jpeg, width, height);
    std::fs::write(path, bytes).with_context(|| format!("writing pdf to {}", path.display()))?;
    Ok(())
}

/// Assemble a minimal single-page PDF around a DCT-encoded (JPEG) image.
fn build_pdf(jpeg: &[u8], width: u32, height: u32) -> Vec<u8> {
    let mut out = Vec::new();
    let mut offsets = Vec::new();

    let content = format!("q {width} 0 0 {height} 0 0 cm /Im0 Do Q");

    out.extend_from_slice(b"%PDF-1.4\n");

    let objects: Vec<Vec<u8>> = vec![
        b"<< /Type /Catalog /Pages 2 0 R >>".to_vec(),
        b"<< /Type /Pages /Kids [3 0 R] /Count 1 >>".to_vec(),
        format!(
            "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 {width} {height}] \
             /Contents 4 0 R /Resources << /XObject << /Im0 5 0 R >> >> >>"
        )
        .into_bytes(),
        {
            let mut obj = format!("<< /Length {} >>\nstream\n", content.len()).into_bytes();
            obj.extend_from_slice(content.as_bytes());
            obj.extend_from_slice(b"\nendstream");
            obj
        },
        {
            let mut obj = format!(
                "<< /Type /XObject /Subtype /Image /Width {width} /Height {height} \
                 /ColorSpace /DeviceRGB /BitsPerComponent 8 /Filter /DCTDecode \
                 /Length {} >>\nstream\n",
                jpeg.len()
            )
            .into_bytes();
            obj.extend_from_slice(jpeg);
            obj.extend_from_slice(b"\nendstream");
            obj
        },
    ];

    for (index, body) in objects.iter().enumerate() {
        offsets.push(out.len());
        let _ = write!(out, "{} 0 obj\n", index + 1);
        out.extend_from_slice(body);
        out.extend_from_slice(b"\nendobj\n");
    }

    let xref_start = out.len();
    let _ = write!(out, "xref\n0 {}\n", objects.len() + 1);
    out.extend_from_slice(b"0000000000 65535 f \n");
    for offset in &offsets {
        let _ = write!(out, "{offset:010} 00000 n \n");
    }
    let _ = write!(
        out,
        "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{xref_start}\n%%EOF\n",
        objects.len() + 1
    );
    out
}

// === Rasterizer ===

fn draw_element(img: &mut RgbaImage, element: &CanvasElement) {
    let x = element.position.x();
    let y = element.position.y();
    let w = element.size.width();
    let h = element.size.height();
    let radius = element
        .style
        .corner_radius
        .unwrap_or(0.0)
        .min(w / 2.0)
        .min(h / 2.0);
    let border_width = element.style.border_width.unwrap_or(0.0);

    if let Some(background) = element.style.background {
        fill_rounded_rect(img, x, y, w, h, radius, background);
    }
    if border_width > 0.0 {
        if let Some(border) = element.style.border_color {
            stroke_rounded_rect(img, x, y, w, h, radius, border_width, border);
        }
    }

    match element.kind {
        ElementKind::Text | ElementKind::Image => {
            let font_size = element.style.font_size.unwrap_or(match element.kind {
                ElementKind::Image => h * 0.6,
                _ => 20.0,
            });
            let color = element.style.font_color.unwrap_or(Hsla::black());
            draw_content(img, element, &element.content, font_size, color);
        }
        ElementKind::Shape | ElementKind::Audio => {}
    }
}

fn blend_pixel(img: &mut RgbaImage, px: i32, py: i32, color: Hsla) {
    if px < 0 || py < 0 || px as u32 >= img.width() || py as u32 >= img.height() {
        return;
    }
    let [r, g, b, a] = color.to_rgba().to_u8();
    if a == 0 {
        return;
    }
    let dst = img.get_pixel_mut(px as u32, py as u32);
    let alpha = a as f32 / 255.0;
    for (d, s) in dst.0.iter_mut().take(3).zip([r, g, b]) {
        *d = (s as f32 * alpha + *d as f32 * (1.0 - alpha)).round() as u8;
    }
    dst.0[3] = 255;
}

/// Signed containment test for a rounded rectangle, sampled at pixel
/// centers.
fn inside_rounded_rect(px: f32, py: f32, x: f32, y: f32, w: f32, h: f32, radius: f32) -> bool {
    if px < x || py < y || px > x + w || py > y + h {
        return false;
    }
    if radius <= 0.0 {
        return true;
    }
    // Corner circles.
    let cx = px.clamp(x + radius, x + w - radius);
    let cy = py.clamp(y + radius, y + h - radius);
    let dx = px - cx;
    let dy = py - cy;
    dx * dx + dy * dy <= radius * radius
}

fn fill_rounded_rect(img: &mut RgbaImage, x: f32, y: f32, w: f32, h: f32, radius: f32, color: Hsla) {
    let x0 = x.floor().max(0.0) as i32;
    let y0 = y.floor().max(0.0) as i32;
    let x1 = (x + w).ceil() as i32;
    let y1 = (y + h).ceil() as i32;
    for py in y0..y1 {
        for px in x0..x1 {
            if inside_rounded_rect(px as f32 + 0.5, py as f32 + 0.5, x, y, w, h, radius) {
                blend_pixel(img, px, py, color);
            }
        }
    }
}

fn stroke_rounded_rect(
    img: &mut RgbaImage,
    x: f32,
    y: f32,
    w: f32,
    h: f32,
    radius: f32,
    width: f32,
    color: Hsla,
) {
    let x0 = x.floor().max(0.0) as i32;
    let y0 = y.floor().max(0.0) as i32;
    let x1 = (x + w).ceil() as i32;
    let y1 = (y + h).ceil() as i32;
    let inner_radius = (radius - width).max(0.0);
    for py in y0..y1 {
        for px in x0..x1 {
            let sx = px as f32 + 0.5;
            let sy = py as f32 + 0.5;
            let on_ring = inside_rounded_rect(sx, sy, x, y, w, h, radius)
                && !inside_rounded_rect(
                    sx,
                    sy,
                    x + width,
                    y + width,
                    w - 2.0 * width,
                    h - 2.0 * width,
                    inner_radius,
                );
            if on_ring {
                blend_pixel(img, px, py, color);
            }
        }
    }
}

/// Render an element's content string, centered in its bounds.
///
/// ASCII goes through the built-in bitmap font; anything outside ASCII
/// (emoji asset tokens, non-Latin scripts) renders as a filled disc
/// placeholder since the exporter carries no shaping engine.
fn draw_content(img: &mut RgbaImage, element: &CanvasElement, text: &str, font_size: f32, color: Hsla) {
    let chars: Vec<char> = text.chars().collect();
    if chars.is_empty() {
        return;
    }
    let scale = (font_size / GLYPH_HEIGHT as f32).max(0.5);
    let cell_w = (GLYPH_WIDTH + 1) as f32 * scale;
    let text_w = cell_w * chars.len() as f32;
    let text_h = GLYPH_HEIGHT as f32 * scale;

    let center = element.centered_position_for(model::CanvasSize::new(text_w, text_h));
    let mut cursor = CanvasPoint::new(center.x().max(element.position.x()), center.y());

    for ch in chars {
        if ch.is_ascii() {
            draw_glyph(img, cursor, ch, scale, color);
        } else {
            draw_disc(img, cursor, text_h, color);
        }
        cursor = CanvasPoint::new(cursor.x() + cell_w, cursor.y());
    }
}

fn draw_glyph(img: &mut RgbaImage, origin: CanvasPoint, ch: char, scale: f32, color: Hsla) {
    let rows = glyph(ch);
    for (row, bits) in rows.iter().enumerate() {
        for col in 0..GLYPH_WIDTH {
            if bits & (1 << (GLYPH_WIDTH - 1 - col)) != 0 {
                let x = origin.x() + col as f32 * scale;
                let y = origin.y() + row as f32 * scale;
                fill_rounded_rect(img, x, y, scale, scale, 0.0, color);
            }
        }
    }
}

fn draw_disc(img: &mut RgbaImage, origin: CanvasPoint, diameter: f32, color: Hsla) {
    let r = diameter / 2.0;
    fill_rounded_rect(img, origin.x(), origin.y(), diameter, diameter, r, color);
}

// === Bitmap font ===

const GLYPH_WIDTH: usize = 5;
const GLYPH_HEIGHT: usize = 7;

type Glyph = [u8; GLYPH_HEIGHT];

/// 5x7 glyph rows, top to bottom, bit 4 leftmost. Lowercase maps to
/// uppercase; unknown printable ASCII renders as a hollow box.
fn glyph(ch: char) -> Glyph {
    match ch.to_ascii_uppercase() {
        ' ' => [0; 7],
        'A' => [0b01110, 0b10001, 0b10001, 0b11111, 0b10001, 0b10001, 0b10001],
        'B' => [0b11110, 0b10001, 0b10001, 0b11110, 0b10001, 0b10001, 0b11110],
        'C' => [0b01110, 0b10001, 0b10000, 0b10000, 0b10000, 0b10001, 0b01110],
        'D' => [0b11110, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b11110],
        'E' => [0b11111, 0b10000, 0b10000, 0b11110, 0b10000, 0b10000, 0b11111],
        'F' => [0b11111, 0b10000, 0b10000, 0b11110, 0b10000, 0b10000, 0b10000],
        'G' => [0b01110, 0b10001, 0b10000, 0b10111, 0b10001, 0b10001, 0b01111],
        'H' => [0b10001, 0b10001, 0b10001, 0b11111, 0b10001, 0b10001, 0b10001],
        'I' => [0b01110, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110],
        'J' => [0b00111, 0b00010, 0b00010, 0b00010, 0b00010, 0b10010, 0b01100],
        'K' => [0b10001, 0b10010, 0b10100, 0b11000, 0b10100, 0b10010, 0b10001],
        'L' => [0b10000, 0b10000, 0b10000, 0b10000, 0b10000, 0b10000, 0b11111],
        'M' => [0b10001, 0b11011, 0b10101, 0b10101, 0b10001, 0b10001, 0b10001],
        'N' => [0b10001, 0b11001, 0b10101, 0b10011, 0b10001, 0b10001, 0b10001],
        'O' => [0b01110, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01110],
        'P' => [0b11110, 0b10001, 0b10001, 0b11110, 0b10000, 0b10000, 0b10000],
        'Q' => [0b01110, 0b10001, 0b10001, 0b10001, 0b10101, 0b10010, 0b01101],
        'R' => [0b11110, 0b10001, 0b10001, 0b11110, 0b10100, 0b10010, 0b10001],
        'S' => [0b01111, 0b10000, 0b10000, 0b01110, 0b00001, 0b00001, 0b11110],
        'T' => [0b11111, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100],
        'U' => [0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01110],
        'V' => [0b10001, 0b10001, 0b10001, 0b10001, 0b01010, 0b01010, 0b00100],
        'W' => [0b10001, 0b10001, 0b10001, 0b10101, 0b10101, 0b10101, 0b01010],
        'X' => [0b10001, 0b10001, 0b01010, 0b00100, 0b01010, 0b10001, 0b10001],
        'Y' => [0b10001, 0b10001, 0b01010, 0b00100, 0b00100, 0b00100, 0b00100],
        'Z' => [0b11111, 0b00001, 0b00010, 0b00100, 0b01000, 0b10000, 0b11111],
        '0' => [0b01110, 0b10001, 0b10011, 0b10101, 0b11001, 0b10001, 0b01110],
        '1' => [0b00100, 0b01100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110],
        '2' => [0b01110, 0b10001, 0b00001, 0b00010, 0b00100, 0b01000, 0b11111],
        '3' => [0b11111, 0b00010, 0b00100, 0b00010, 0b00001, 0b10001, 0b01110],
        '4' => [0b00010, 0b00110, 0b01010, 0b10010, 0b11111, 0b00010, 0b00010],
        '5' => [0b11111, 0b10000, 0b11110, 0b00001, 0b00001, 0b10001, 0b01110],
        '6' => [0b00110, 0b01000, 0b10000, 0b11110, 0b10001, 0b10001, 0b01110],
        '7' => [0b11111, 0b00001, 0b00010, 0b00100, 0b01000, 0b01000, 0b01000],
        '8' => [0b01110, 0b10001, 0b10001, 0b01110, 0b10001, 0b10001, 0b01110],
        '9' => [0b01110, 0b10001, 0b10001, 0b01111, 0b00001, 0b00010, 0b01100],
        '.' => [0b00000, 0b00000, 0b00000, 0b00000, 0b00000, 0b01100, 0b01100],
        ',' => [0b00000, 0b00000, 0b00000, 0b00000, 0b01100, 0b00100, 0b01000],
        '!' => [0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b00000, 0b00100],
        '?' => [0b01110, 0b10001, 0b00001, 0b00010, 0b00100, 0b00000, 0b00100],
        '-' => [0b00000, 0b00000, 0b00000, 0b11111, 0b00000, 0b00000, 0b00000],
        '+' => [0b00000, 0b00100, 0b00100, 0b11111, 0b00100, 0b00100, 0b00000],
        '\'' => [0b00100, 0b00100, 0b01000, 0b00000, 0b00000, 0b00000, 0b00000],
        ':' => [0b00000, 0b01100, 0b01100, 0b00000, 0b01100, 0b01100, 0b00000],
        '/' => [0b00001, 0b00010, 0b00010, 0b00100, 0b01000, 0b01000, 0b10000],
        _ => [0b11111, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b11111],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ShapeToken;
    use std::path::PathBuf;

    fn temp_path(ext: &str) -> PathBuf {
        std::env::temp_dir().join(format!("chitra-export-{}.{ext}", uuid::Uuid::new_v4()))
    }

    #[test]
    fn snapshot_has_canvas_dimensions_and_white_background() {
        let mut canvas = EditorCanvas::new();
        let img = render_snapshot(&mut canvas);
        assert_eq!(img.dimensions(), (800, 600));
        assert_eq!(img.get_pixel(0, 0).0, [255, 255, 255, 255]);
    }

    #[test]
    fn snapshot_renders_elements_at_logical_geometry() {
        let mut canvas = EditorCanvas::new();
        canvas.add_shape(ShapeToken::Rectangle);
        canvas.set_zoom(2.0);

        let img = render_snapshot(&mut canvas);
        // Shape defaults to (100, 100) 100x100 regardless of zoom.
        assert_ne!(img.get_pixel(150, 150).0, [255, 255, 255, 255]);
        assert_eq!(img.get_pixel(50, 50).0, [255, 255, 255, 255]);
    }

    #[test]
    fn snapshot_restores_zoom() {
        let mut canvas = EditorCanvas::new();
        canvas.set_zoom(1.7);
        let _ = render_snapshot(&mut canvas);
        assert!((canvas.viewport.zoom() - 1.7).abs() < 1e-6);
    }

    #[test]
    fn failed_export_still_restores_zoom() {
        let mut canvas = EditorCanvas::new();
        canvas.set_zoom(0.5);
        let bad = PathBuf::from("/nonexistent-dir/never/out.png");
        assert!(export_png(&mut canvas, &bad).is_err());
        assert_eq!(canvas.viewport.zoom(), 0.5);
    }

    #[test]
    fn png_export_writes_a_file() {
        let mut canvas = EditorCanvas::new();
        canvas.add_text();
        let path = temp_path("png");
        export_png(&mut canvas, &path).unwrap();
        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(&bytes[..4], &[0x89, b'P', b'N', b'G']);
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn pdf_export_writes_a_pdf_header_and_trailer() {
        let mut canvas = EditorCanvas::new();
        canvas.add_shape(ShapeToken::Circle);
        let path = temp_path("pdf");
        export_pdf(&mut canvas, &path).unwrap();
        let bytes = std::fs::read(&path).unwrap();
        assert!(bytes.starts_with(b"%PDF-1.4"));
        assert!(bytes.ends_with(b"%%EOF\n"));
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn pdf_structure_references_the_image_object() {
        let pdf = build_pdf(&[0xFF, 0xD8, 0xFF, 0xD9], 800, 600);
        let text = String::from_utf8_lossy(&pdf);
        assert!(text.contains("/DCTDecode"));
        assert!(text.contains("/MediaBox [0 0 800 600]"));
        assert!(text.contains("/Im0 Do"));
    }
}
