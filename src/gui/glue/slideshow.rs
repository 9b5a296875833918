use gdk_pixbuf::Pixbuf;
use std::path::{Path, PathBuf};

/// Background images shown one after another, wrapping around.
pub struct Slideshow {
    slides: Vec<PathBuf>,
    current: usize,
    image: Option<Pixbuf>,
}

impl Slideshow {
    pub fn new(slides: Vec<PathBuf>) -> Self {
        let mut slideshow = Self {
            slides,
            current: 0,
            image: None,
        };
        slideshow.load_current();
        slideshow
    }

    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    /// A single slide never changes, so there is nothing to schedule.
    pub fn is_animated(&self) -> bool {
        self.slides.len() > 1
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current_path(&self) -> Option<&Path> {
        self.slides.get(self.current).map(PathBuf::as_path)
    }

    pub fn image(&self) -> Option<&Pixbuf> {
        self.image.as_ref()
    }

    pub fn advance(&mut self) {
        if self.slides.is_empty() {
            return;
        }
        self.current = (self.current + 1) % self.slides.len();
        self.load_current();
    }

    /// Swaps the slide list, starting over from the first one.
    pub fn replace(&mut self, slides: Vec<PathBuf>) {
        if slides == self.slides {
            return;
        }
        self.slides = slides;
        self.current = 0;
        self.load_current();
    }

    fn load_current(&mut self) {
        self.image = self
            .current_path()
            .and_then(|path| match Pixbuf::from_file(path) {
                Ok(pixbuf) => Some(pixbuf),
                Err(e) => {
                    log::warn!("Failed to load slide {}: {}", path.display(), e);
                    None
                }
            });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slides(n: usize) -> Vec<PathBuf> {
        (0..n)
            .map(|i| PathBuf::from(format!("/nonexistent/slide-{i}.png")))
            .collect()
    }

    #[test]
    fn test_advance_wraps_around() {
        let mut show = Slideshow::new(slides(3));
        assert_eq!(show.current_index(), 0);

        show.advance();
        show.advance();
        assert_eq!(show.current_path(), Some(Path::new("/nonexistent/slide-2.png")));

        show.advance();
        assert_eq!(show.current_index(), 0);
        assert!(show.image().is_none());
    }

    #[test]
    fn test_empty_slideshow_is_inert() {
        let mut show = Slideshow::new(Vec::new());
        show.advance();
        assert!(show.is_empty());
        assert!(!show.is_animated());
        assert_eq!(show.current_path(), None);
    }

    #[test]
    fn test_replace_restarts_from_first_slide() {
        let mut show = Slideshow::new(slides(3));
        show.advance();

        show.replace(slides(3));
        assert_eq!(show.current_index(), 1);

        show.replace(slides(2));
        assert_eq!(show.current_index(), 0);
        assert!(show.is_animated());
    }
}
