//! PNG export of a rendered figure
//!
//! The window asks the backend for a screenshot once the figure has settled,
//! writes the captured frame and closes itself.

use crate::error::{PlotError, Result};
use egui::ColorImage;
use image::RgbaImage;
use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::rc::Rc;

/// Frames drawn before the capture is requested, so text and plot bounds
/// have been laid out
const SETTLE_FRAMES: u32 = 3;

/// Shared slot the window writes its save result into
pub(crate) type Outcome = Rc<RefCell<Option<Result<()>>>>;

/// Convert a captured frame into an `image` buffer with straight alpha
pub fn to_rgba_image(image: &ColorImage) -> Result<RgbaImage> {
    let [w, h] = image.size;
    let raw: Vec<u8> = image
        .pixels
        .iter()
        .flat_map(|p| p.to_srgba_unmultiplied())
        .collect();
    RgbaImage::from_raw(w as u32, h as u32, raw).ok_or_else(|| {
        PlotError::ImageExport(format!(
            "pixel buffer does not match a {}x{} image",
            w, h
        ))
    })
}

/// Write a captured frame as PNG
pub fn save_png(image: &ColorImage, path: &Path) -> Result<()> {
    to_rgba_image(image)?
        .save(path)
        .map_err(|e| PlotError::ImageExport(format!("{}: {}", path.display(), e)))
}

/// One-shot screenshot of the viewport
pub(crate) struct Snapshot {
    path: PathBuf,
    frames: u32,
    requested: bool,
    outcome: Outcome,
}

impl Snapshot {
    pub fn new(path: PathBuf) -> (Self, Outcome) {
        let outcome = Outcome::default();
        let snapshot = Self {
            path,
            frames: 0,
            requested: false,
            outcome: Rc::clone(&outcome),
        };
        (snapshot, outcome)
    }

    /// Drive the capture; call after each frame is drawn. Returns true once
    /// the image has been handled and the window can close.
    pub fn on_frame(&mut self, ctx: &egui::Context) -> bool {
        let captured = ctx.input(|i| {
            i.events.iter().rev().find_map(|e| match e {
                egui::Event::Screenshot { image, .. } => Some(image.clone()),
                _ => None,
            })
        });

        if let Some(image) = captured {
            let result = save_png(&image, &self.path);
            match &result {
                Ok(()) => tracing::info!(path = %self.path.display(), "saved figure"),
                Err(e) => tracing::error!("failed to save figure: {}", e),
            }
            *self.outcome.borrow_mut() = Some(result);
            return true;
        }

        if !self.requested {
            self.frames += 1;
            if self.frames >= SETTLE_FRAMES {
                ctx.send_viewport_cmd(egui::ViewportCommand::Screenshot(Default::default()));
                self.requested = true;
            }
        }
        ctx.request_repaint();
        false
    }
}

/// Result left in `outcome` after the window closed
pub(crate) fn take_outcome(outcome: &Outcome) -> Result<()> {
    outcome.borrow_mut().take().unwrap_or_else(|| {
        Err(PlotError::ImageExport(
            "window closed before the figure was captured".to_string(),
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image_of(size: [usize; 2], pixels: &[[u8; 4]]) -> ColorImage {
        let raw: Vec<u8> = pixels.iter().flatten().copied().collect();
        ColorImage::from_rgba_unmultiplied(size, &raw)
    }

    #[test]
    fn test_to_rgba_image_keeps_layout() {
        let white = [255, 255, 255, 255];
        let mut pixels = vec![white; 6];
        pixels[1] = [200, 10, 20, 255];
        pixels[5] = [0, 0, 0, 255];

        let out = to_rgba_image(&image_of([3, 2], &pixels)).unwrap();

        assert_eq!(out.dimensions(), (3, 2));
        assert_eq!(out.get_pixel(1, 0).0, [200, 10, 20, 255]);
        assert_eq!(out.get_pixel(2, 1).0, [0, 0, 0, 255]);
        assert_eq!(out.get_pixel(0, 1).0, white);
    }

    #[test]
    fn test_to_rgba_image_unmultiplies_alpha() {
        let px = to_rgba_image(&image_of([1, 1], &[[200, 100, 0, 128]]))
            .unwrap()
            .get_pixel(0, 0)
            .0;

        assert_eq!(px[3], 128);
        assert!((px[0] as i32 - 200).abs() <= 2);
        assert!((px[1] as i32 - 100).abs() <= 2);
    }

    #[test]
    fn test_save_png_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("figure.png");

        save_png(&image_of([4, 4], &[[255, 0, 0, 255]; 16]), &path).unwrap();

        let loaded = image::open(&path).unwrap().to_rgba8();
        assert_eq!(loaded.dimensions(), (4, 4));
        assert_eq!(loaded.get_pixel(3, 3).0, [255, 0, 0, 255]);
    }

    #[test]
    fn test_save_png_rejects_unknown_extension() {
        let dir = tempfile::tempdir().unwrap();
        let err = save_png(&image_of([1, 1], &[[0, 0, 0, 255]]), &dir.path().join("figure.xyz"))
            .unwrap_err();
        assert!(matches!(err, PlotError::ImageExport(_)));
    }

    #[test]
    fn test_missing_capture_is_an_error() {
        let (_snapshot, outcome) = Snapshot::new(PathBuf::from("unused.png"));
        assert!(matches!(take_outcome(&outcome), Err(PlotError::ImageExport(_))));

        *outcome.borrow_mut() = Some(Ok(()));
        assert!(take_outcome(&outcome).is_ok());
    }
}
