//! Chart settings and text rendering
//!
//! plotters draws text through `ab_glyph`, which needs a TrueType font
//! registered at runtime. The configured font is used when it can be read,
//! otherwise the DejaVu Sans copy shipped in `assets/`.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use plotters::style::{register_font, FontStyle, RGBColor};
use tracing::{debug, warn};

use crate::error::ChartError;

/// Font family name every chart asks for
pub const FONT_FAMILY: &str = "sans-serif";

pub(crate) const BAR_FILL: RGBColor = RGBColor(76, 114, 176);
pub(crate) const BOX_FILL: RGBColor = RGBColor(221, 132, 82);
pub(crate) const OUTLINE: RGBColor = RGBColor(60, 60, 60);

static BUNDLED_FONT: &[u8] = include_bytes!("../assets/DejaVuSans.ttf");

static REGISTERED: Mutex<Option<FontSource>> = Mutex::new(None);

/// Where the registered chart font came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FontSource {
    File(PathBuf),
    Bundled,
}

/// Size and appearance of the rendered charts
///
/// # Example
///
/// ```rust
/// use infra_charts::ChartSettings;
///
/// let settings = ChartSettings::new(1200, 750).bins(30);
/// assert_eq!(settings.width, 1200);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSettings {
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
    /// Number of histogram bins
    pub bins: usize,
    /// TrueType font used for captions and labels
    pub font_path: Option<PathBuf>,
}

impl ChartSettings {
    /// Creates settings for charts of the given pixel size
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            bins: 50,
            font_path: None,
        }
    }

    /// Sets the number of histogram bins (default: 50)
    pub fn bins(mut self, bins: usize) -> Self {
        self.bins = bins.max(1);
        self
    }

    /// Sets the font file used for text
    pub fn font_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.font_path = Some(path.into());
        self
    }
}

impl Default for ChartSettings {
    fn default() -> Self {
        Self::new(800, 500)
    }
}

/// Registers the chart font for [`FONT_FAMILY`]
///
/// The registration is process-wide and keyed on the requested path: asking
/// for the font already registered is a no-op, asking for a different file
/// replaces it. Without a preference any registered font is kept. An unreadable
/// or unparsable file falls back to the bundled font.
///
/// # Errors
///
/// * `ChartError::Render` if the bundled font cannot be registered
pub fn ensure_font(preferred: Option<&Path>) -> Result<FontSource, ChartError> {
    let mut registered = REGISTERED.lock().unwrap_or_else(PoisonError::into_inner);

    match (preferred, registered.as_ref()) {
        (None, Some(current)) => return Ok(current.clone()),
        (Some(path), Some(FontSource::File(current))) if current == path => {
            return Ok(FontSource::File(current.clone()));
        }
        _ => {}
    }

    if let Some(path) = preferred {
        if try_register(path) {
            debug!(font = %path.display(), "Chart font registered");
            let source = FontSource::File(path.to_path_buf());
            *registered = Some(source.clone());
            return Ok(source);
        }
        warn!(font = %path.display(), "Configured font is unusable, using the bundled font");
    }

    if registered.as_ref() != Some(&FontSource::Bundled) {
        register_font(FONT_FAMILY, FontStyle::Normal, BUNDLED_FONT)
            .map_err(|_| ChartError::render("font", "bundled font could not be parsed"))?;
        debug!("Bundled chart font registered");
        *registered = Some(FontSource::Bundled);
    }
    Ok(FontSource::Bundled)
}

fn try_register(path: &Path) -> bool {
    let Ok(bytes) = fs::read(path) else {
        return false;
    };
    // plotters keeps a reference to the font data for the life of the process
    let bytes: &'static [u8] = Box::leak(bytes.into_boxed_slice());
    register_font(FONT_FAMILY, FontStyle::Normal, bytes).is_ok()
}

/// Formats an axis value with thousands separators and no decimals
pub(crate) fn thousands(value: &f64) -> String {
    core_kernel::format_thousands(*value, 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = ChartSettings::default();
        assert_eq!((settings.width, settings.height), (800, 500));
        assert_eq!(settings.bins, 50);
        assert!(settings.font_path.is_none());
    }

    #[test]
    fn test_bins_are_at_least_one() {
        assert_eq!(ChartSettings::default().bins(0).bins, 1);
    }

    #[test]
    fn test_missing_font_file_falls_back_to_bundled_font() {
        let source = ensure_font(Some(Path::new("/nonexistent/NoSuchFont.ttf"))).unwrap();
        assert_eq!(source, FontSource::Bundled);
    }

    #[test]
    fn test_unparsable_font_file_falls_back_to_bundled_font() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Broken.ttf");
        fs::write(&path, b"not a font").unwrap();

        assert_eq!(ensure_font(Some(&path)).unwrap(), FontSource::Bundled);
    }

    #[test]
    fn test_configured_font_is_registered_per_path() {
        let dir = tempfile::tempdir().unwrap();
        let first = dir.path().join("First.ttf");
        let second = dir.path().join("Second.ttf");
        fs::write(&first, BUNDLED_FONT).unwrap();
        fs::write(&second, BUNDLED_FONT).unwrap();

        assert_eq!(ensure_font(Some(&first)).unwrap(), FontSource::File(first.clone()));
        assert_eq!(ensure_font(Some(&second)).unwrap(), FontSource::File(second.clone()));
        assert_eq!(ensure_font(Some(&second)).unwrap(), FontSource::File(second));
    }

    #[test]
    fn test_some_font_is_always_available() {
        assert!(ensure_font(None).is_ok());
    }

    #[test]
    fn test_axis_labels_use_thousands_separators() {
        assert_eq!(thousands(&71610.0), "71,610");
        assert_eq!(thousands(&1_250_000.4), "1,250,000");
    }
}
