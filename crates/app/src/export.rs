//! Exporting the composed page
//!
//! Saves the current surface as a PNG. A full save also writes the
//! annotation list next to the image so the markup survives outside the
//! app's own storage.

use pagemark_core::{AnnotationList, Surface};
use std::path::{Path, PathBuf};

/// Result of an export, ready to show as a toast.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportOutcome {
    pub success: bool,
    pub message: String,
}

impl ExportOutcome {
    fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }

    fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}

/// Default file name for a single-page screenshot.
pub fn screenshot_file_name(page: u32) -> String {
    format!("page-{page}.png")
}

/// Sidecar path for the annotation list: the image path with
/// `.annotations.json` appended.
fn annotations_sidecar_path(image_path: &Path) -> PathBuf {
    let mut name = image_path.as_os_str().to_os_string();
    name.push(".annotations.json");
    PathBuf::from(name)
}

/// Write the surface to `path` as a PNG.
pub fn write_surface_png(surface: &Surface, path: &Path) -> Result<(), String> {
    if surface.is_empty() {
        return Err("nothing rendered yet".to_string());
    }
    let image = image::RgbaImage::from_raw(
        surface.width(),
        surface.height(),
        surface.pixels().to_vec(),
    )
    .ok_or_else(|| "surface buffer does not match its dimensions".to_string())?;
    image.save(path).map_err(|e| e.to_string())
}

/// Save the composed page and its annotation sidecar.
pub fn save_composed(
    surface: &Surface,
    annotations: &AnnotationList,
    path: &Path,
) -> ExportOutcome {
    if let Err(err) = write_surface_png(surface, path) {
        return ExportOutcome::failed(format!("save failed: {err}"));
    }

    let sidecar = annotations_sidecar_path(path);
    let json = match serde_json::to_vec_pretty(annotations) {
        Ok(json) => json,
        Err(err) => return ExportOutcome::failed(format!("save failed: {err}")),
    };
    if let Err(err) = std::fs::write(&sidecar, json) {
        return ExportOutcome::failed(format!("save failed: {err}"));
    }

    ExportOutcome::ok(format!("saved {}", path.display()))
}

/// Save the current page image alone.
pub fn save_screenshot(surface: &Surface, path: &Path) -> ExportOutcome {
    match write_surface_png(surface, path) {
        Ok(()) => ExportOutcome::ok(format!("saved {}", path.display())),
        Err(err) => ExportOutcome::failed(format!("screenshot failed: {err}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagemark_core::Annotation;
    use tempfile::TempDir;

    #[test]
    fn screenshot_name_includes_page_number() {
        assert_eq!(screenshot_file_name(4), "page-4.png");
    }

    #[test]
    fn sidecar_path_appends_suffix() {
        let sidecar = annotations_sidecar_path(Path::new("/tmp/out.png"));
        assert_eq!(sidecar, Path::new("/tmp/out.png.annotations.json"));
    }

    #[test]
    fn empty_surface_does_not_export() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.png");
        assert!(write_surface_png(&Surface::empty(), &path).is_err());
        assert!(!path.exists());
    }

    #[test]
    fn save_composed_writes_image_and_sidecar() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.png");
        let surface = Surface::new(8, 8);
        let annotations =
            AnnotationList::from_items(vec![Annotation::new(1, 0.5, 0.5, "note")]);

        let outcome = save_composed(&surface, &annotations, &path);
        assert!(outcome.success, "{}", outcome.message);
        assert!(path.exists());

        let sidecar = std::fs::read(annotations_sidecar_path(&path)).unwrap();
        let restored: AnnotationList = serde_json::from_slice(&sidecar).unwrap();
        assert_eq!(restored.items(), annotations.items());
    }

    #[test]
    fn screenshot_writes_a_decodable_png() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("page-1.png");
        let mut surface = Surface::new(4, 2);
        surface.fill([10, 20, 30, 0xff]);

        let outcome = save_screenshot(&surface, &path);
        assert!(outcome.success, "{}", outcome.message);

        let decoded = image::open(&path).unwrap().to_rgba8();
        assert_eq!(decoded.dimensions(), (4, 2));
        assert_eq!(decoded.get_pixel(0, 0).0, [10, 20, 30, 0xff]);
    }
}
