use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use image::{ImageFormat, RgbaImage};
use tiny_skia::Pixmap;

/// File name of the `index`-th exported frame.
pub fn frame_file_name(index: u64) -> String {
    format!("frame-{index:04}.png")
}

/// Path of the `index`-th exported frame inside `dir`.
pub fn frame_path(dir: &Path, index: u64) -> PathBuf {
    dir.join(frame_file_name(index))
}

/// Converts premultiplied pixmap pixels into a straight-alpha RGBA image.
pub fn to_rgba_image(pixmap: &Pixmap) -> Result<RgbaImage> {
    let mut data = Vec::with_capacity(pixmap.data().len());
    for pixel in pixmap.pixels() {
        let color = pixel.demultiply();
        data.extend_from_slice(&[color.red(), color.green(), color.blue(), color.alpha()]);
    }
    RgbaImage::from_raw(pixmap.width(), pixmap.height(), data).ok_or_else(|| {
        anyhow!(
            "pixel buffer does not match a {}x{} image",
            pixmap.width(),
            pixmap.height()
        )
    })
}

/// Writes `pixmap` to `path` as PNG.
pub fn write_png(pixmap: &Pixmap, path: &Path) -> Result<()> {
    let image = to_rgba_image(pixmap)?;
    image
        .save_with_format(path, ImageFormat::Png)
        .with_context(|| format!("failed to write frame to {}", path.display()))?;
    tracing::debug!(path = %path.display(), "wrote frame");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tiny_skia::Color;

    #[test]
    fn frame_names_are_zero_padded() {
        assert_eq!(frame_file_name(0), "frame-0000.png");
        assert_eq!(frame_file_name(42), "frame-0042.png");
        assert_eq!(
            frame_path(Path::new("out"), 7),
            Path::new("out").join("frame-0007.png")
        );
    }

    #[test]
    fn export_demultiplies_alpha() {
        let mut pixmap = Pixmap::new(2, 1).expect("pixmap");
        pixmap.fill(Color::from_rgba8(200, 100, 0, 128));
        let image = to_rgba_image(&pixmap).expect("image");
        let pixel = image.get_pixel(1, 0);
        assert!((i32::from(pixel[0]) - 200).abs() <= 2, "{pixel:?}");
        assert_eq!(pixel[3], 128);
    }

    #[test]
    fn png_round_trips_through_disk() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = frame_path(dir.path(), 0);
        let mut pixmap = Pixmap::new(3, 2).expect("pixmap");
        pixmap.fill(Color::from_rgba8(10, 20, 30, 255));
        write_png(&pixmap, &path).expect("write");

        let decoded = image::open(&path).expect("open").to_rgba8();
        assert_eq!(decoded.dimensions(), (3, 2));
        assert_eq!(decoded.get_pixel(2, 1).0, [10, 20, 30, 255]);
    }
}
