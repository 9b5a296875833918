use gdk_pixbuf::Pixbuf;
use gtk4::gdk;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Images loaded at a fixed square size and turned into `T`, kept per path.
pub struct ScaledImageCache<T> {
    size: i32,
    entries: HashMap<PathBuf, T>,
}

impl<T: Clone> ScaledImageCache<T> {
    pub fn new(size: i32) -> Self {
        Self {
            size: size.max(1),
            entries: HashMap::new(),
        }
    }

    pub fn size(&self) -> i32 {
        self.size
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Failures are not cached, a later call retries the file.
    pub fn get_or_load(&mut self, path: &Path, build: impl FnOnce(&Pixbuf) -> T) -> Option<T> {
        if let Some(entry) = self.entries.get(path) {
            return Some(entry.clone());
        }

        let pixbuf = match Pixbuf::from_file_at_scale(path, self.size, self.size, false) {
            Ok(pixbuf) => pixbuf,
            Err(e) => {
                log::error!("Failed to load cursor image {}: {}", path.display(), e);
                return None;
            }
        };

        let entry = build(&pixbuf);
        self.entries.insert(path.to_path_buf(), entry.clone());
        Some(entry)
    }
}

/// Custom cursors built from image files, scaled to a square and kept per path.
pub struct CursorCache {
    images: ScaledImageCache<gdk::Cursor>,
}

impl CursorCache {
    pub fn new(size: i32) -> Self {
        Self {
            images: ScaledImageCache::new(size),
        }
    }

    pub fn size(&self) -> i32 {
        self.images.size()
    }

    /// `None` means the image could not be used and the widget keeps its default cursor.
    pub fn get(&mut self, path: &Path) -> Option<gdk::Cursor> {
        self.images.get_or_load(path, |pixbuf| {
            let texture = gdk::Texture::for_pixbuf(pixbuf);
            let fallback = gdk::Cursor::from_name("default", None);
            gdk::Cursor::from_texture(&texture, 0, 0, fallback.as_ref())
        })
    }

    pub fn get_optional(&mut self, path: Option<&Path>) -> Option<gdk::Cursor> {
        path.and_then(|p| self.get(p))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gdk_pixbuf::Colorspace;
    use std::cell::Cell;

    fn write_png(name: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("knobdeck-{}-{}.png", name, std::process::id()));
        let pixbuf = Pixbuf::new(Colorspace::Rgb, true, 8, 8, 8).unwrap();
        pixbuf.fill(0xff0000ff);
        pixbuf.savev(&path, "png", &[]).unwrap();
        path
    }

    #[test]
    fn test_missing_image_falls_back_to_default_cursor() {
        let mut cache = CursorCache::new(32);
        assert!(cache.get(Path::new("/nonexistent/cursors/pin.png")).is_none());
        assert!(cache.get_optional(None).is_none());
        assert!(cache.images.is_empty());
    }

    #[test]
    fn test_size_is_at_least_one_pixel() {
        assert_eq!(CursorCache::new(0).size(), 1);
        assert_eq!(CursorCache::new(48).size(), 48);
    }

    #[test]
    fn test_loaded_image_is_scaled_and_cached() {
        let path = write_png("cached");
        let mut cache: ScaledImageCache<(i32, i32)> = ScaledImageCache::new(32);
        let builds = Cell::new(0);
        let build = |p: &Pixbuf| {
            builds.set(builds.get() + 1);
            (p.width(), p.height())
        };

        assert_eq!(cache.get_or_load(&path, build), Some((32, 32)));
        assert_eq!(cache.get_or_load(&path, build), Some((32, 32)));
        assert_eq!(cache.len(), 1);
        assert_eq!(builds.get(), 1);

        std::fs::remove_file(&path).unwrap();
        assert_eq!(cache.get_or_load(&path, build), Some((32, 32)));
        assert_eq!(builds.get(), 1);
    }

    #[test]
    fn test_failed_load_is_retried() {
        let path = std::env::temp_dir().join(format!("knobdeck-retry-{}.png", std::process::id()));
        let _ = std::fs::remove_file(&path);
        let mut cache: ScaledImageCache<i32> = ScaledImageCache::new(16);

        assert_eq!(cache.get_or_load(&path, |p| p.width()), None);
        assert!(cache.is_empty());

        let written = write_png("retry");
        std::fs::rename(&written, &path).unwrap();
        assert_eq!(cache.get_or_load(&path, |p| p.width()), Some(16));
        std::fs::remove_file(&path).unwrap();
    }
}
