// output.rs - PNG export of a pixel surface

use std::path::Path;

use image::RgbaImage;

use splatter_engine::{PixelSurface, Result, Surface};

/// Write the surface as an opaque PNG. Unpainted pixels come out black.
pub fn write_png(path: &Path, surface: &PixelSurface) -> Result<()> {
    let mut rgba = surface.as_rgba().to_vec();
    for px in rgba.chunks_exact_mut(4) {
        px[3] = 255;
    }
    let img = RgbaImage::from_raw(surface.width(), surface.height(), rgba)
        .ok_or_else(|| std::io::Error::other("surface buffer does not match its dimensions"))?;
    img.save(path)?;
    Ok(())
}
