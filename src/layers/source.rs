use std::fmt;
use std::path::{Path, PathBuf};

use image::RgbaImage;
use tracing::debug;

use crate::error::DecodeError;

/// The four stacked inputs, bottom to top
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Layer {
    Background,
    Center,
    Logo,
    Banner,
}

impl Layer {
    /// All layers in paint order
    pub const ALL: [Layer; 4] = [Layer::Background, Layer::Center, Layer::Logo, Layer::Banner];

    pub fn name(&self) -> &'static str {
        match self {
            Layer::Background => "background",
            Layer::Center => "center",
            Layer::Logo => "logo",
            Layer::Banner => "banner",
        }
    }
}

impl fmt::Display for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Paths of all four layers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourcePaths {
    pub background: PathBuf,
    pub center: PathBuf,
    pub logo: PathBuf,
    pub banner: PathBuf,
}

impl SourcePaths {
    pub fn path(&self, layer: Layer) -> &Path {
        match layer {
            Layer::Background => &self.background,
            Layer::Center => &self.center,
            Layer::Logo => &self.logo,
            Layer::Banner => &self.banner,
        }
    }
}

/// Layer paths as chosen so far; any of them may still be missing
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceSelection {
    background: Option<PathBuf>,
    center: Option<PathBuf>,
    logo: Option<PathBuf>,
    banner: Option<PathBuf>,
}

impl SourceSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set or clear the path for one layer
    pub fn set(&mut self, layer: Layer, path: Option<PathBuf>) {
        *self.slot_mut(layer) = path;
    }

    pub fn get(&self, layer: Layer) -> Option<&Path> {
        match layer {
            Layer::Background => self.background.as_deref(),
            Layer::Center => self.center.as_deref(),
            Layer::Logo => self.logo.as_deref(),
            Layer::Banner => self.banner.as_deref(),
        }
    }

    /// True once every layer has a path
    pub fn is_complete(&self) -> bool {
        Layer::ALL.iter().all(|layer| self.get(*layer).is_some())
    }

    /// Turn the selection into concrete paths, naming the first missing layer otherwise
    pub fn resolve(&self) -> Result<SourcePaths, DecodeError> {
        let require = |layer: Layer| {
            self.get(layer)
                .map(Path::to_path_buf)
                .ok_or(DecodeError::NotSelected { layer })
        };

        Ok(SourcePaths {
            background: require(Layer::Background)?,
            center: require(Layer::Center)?,
            logo: require(Layer::Logo)?,
            banner: require(Layer::Banner)?,
        })
    }

    fn slot_mut(&mut self, layer: Layer) -> &mut Option<PathBuf> {
        match layer {
            Layer::Background => &mut self.background,
            Layer::Center => &mut self.center,
            Layer::Logo => &mut self.logo,
            Layer::Banner => &mut self.banner,
        }
    }
}

impl From<SourcePaths> for SourceSelection {
    fn from(paths: SourcePaths) -> Self {
        Self {
            background: Some(paths.background),
            center: Some(paths.center),
            logo: Some(paths.logo),
            banner: Some(paths.banner),
        }
    }
}

/// Decoded RGBA pixels for all four layers
#[derive(Debug, Clone)]
pub struct SourceImages {
    pub background: RgbaImage,
    pub center: RgbaImage,
    pub logo: RgbaImage,
    pub banner: RgbaImage,
}

impl SourceImages {
    /// Decode every layer from disk, adding an opaque alpha channel where missing
    pub fn load(paths: &SourcePaths) -> Result<Self, DecodeError> {
        Ok(Self {
            background: load_layer(Layer::Background, &paths.background)?,
            center: load_layer(Layer::Center, &paths.center)?,
            logo: load_layer(Layer::Logo, &paths.logo)?,
            banner: load_layer(Layer::Banner, &paths.banner)?,
        })
    }
}

/// Decode a single layer image as RGBA8
pub fn load_layer(layer: Layer, path: &Path) -> Result<RgbaImage, DecodeError> {
    if !path.is_file() {
        return Err(DecodeError::NotFound {
            layer,
            path: path.display().to_string(),
        });
    }

    let decoded = image::open(path).map_err(|e| DecodeError::InvalidImage {
        layer,
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;

    let rgba = decoded.into_rgba8();
    debug!("Loaded {} layer {:?}: {}x{}", layer, path, rgba.width(), rgba.height());
    Ok(rgba)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage, Rgba};
    use tempfile::tempdir;

    #[test]
    fn test_selection_resolve_names_first_missing_layer() {
        let mut selection = SourceSelection::new();
        selection.set(Layer::Background, Some(PathBuf::from("bg.png")));
        selection.set(Layer::Center, Some(PathBuf::from("center.jpg")));

        assert!(!selection.is_complete());
        match selection.resolve() {
            Err(DecodeError::NotSelected { layer }) => assert_eq!(layer, Layer::Logo),
            other => panic!("unexpected result: {:?}", other),
        }

        selection.set(Layer::Logo, Some(PathBuf::from("logo.png")));
        selection.set(Layer::Banner, Some(PathBuf::from("banner.webp")));
        let paths = selection.resolve().unwrap();
        assert_eq!(paths.path(Layer::Banner), Path::new("banner.webp"));

        selection.set(Layer::Center, None);
        assert!(!selection.is_complete());
    }

    #[test]
    fn test_load_layer_adds_opaque_alpha() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("rgb.png");
        RgbImage::from_pixel(4, 3, Rgb([10, 20, 30])).save(&path).unwrap();

        let rgba = load_layer(Layer::Center, &path).unwrap();
        assert_eq!(rgba.dimensions(), (4, 3));
        assert_eq!(*rgba.get_pixel(2, 1), Rgba([10, 20, 30, 255]));
    }

    #[test]
    fn test_load_layer_missing_file() {
        let dir = tempdir().unwrap();
        let result = load_layer(Layer::Background, &dir.path().join("absent.png"));
        assert!(matches!(
            result,
            Err(DecodeError::NotFound { layer: Layer::Background, .. })
        ));
    }

    #[test]
    fn test_load_layer_rejects_garbage() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("broken.png");
        std::fs::write(&path, b"definitely not a png").unwrap();

        let result = load_layer(Layer::Banner, &path);
        assert!(matches!(
            result,
            Err(DecodeError::InvalidImage { layer: Layer::Banner, .. })
        ));
    }
}
