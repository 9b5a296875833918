use crate::config::WordRange;

/// Collaborators that react to knob changes. Every hook defaults to doing nothing, so an
/// implementor only provides the ones it actually has.
pub trait Downstream {
    fn year_changed(&mut self, _year: i32) {}

    fn set_year_weighting(&mut self, _year: i32) {}

    fn sentence_length_changed(&mut self, _range: WordRange) {}

    fn regenerate(&mut self) {}
}

/// No collaborators at all.
#[derive(Debug, Default, Clone, Copy)]
pub struct Detached;

impl Downstream for Detached {}
