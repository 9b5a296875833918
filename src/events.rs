use crate::config::WordRange;
use crate::gui::panel::Downstream;
use async_channel::Sender;

#[derive(Debug, Clone)]
pub enum AppEvent {
    YearChanged(i32),
    SentenceLengthChanged(WordRange),
    Regenerate,
    ConfigReload,
}

/// Forwards knob reactions to the UI thread. Never blocks: a full channel drops the event.
pub struct EventSink {
    tx: Sender<AppEvent>,
}

impl EventSink {
    pub fn new(tx: Sender<AppEvent>) -> Self {
        Self { tx }
    }

    fn emit(&self, event: AppEvent) {
        if let Err(e) = self.tx.try_send(event) {
            log::warn!("Dropping UI event: {}", e);
        }
    }
}

impl Downstream for EventSink {
    fn year_changed(&mut self, year: i32) {
        self.emit(AppEvent::YearChanged(year));
    }

    fn sentence_length_changed(&mut self, range: WordRange) {
        self.emit(AppEvent::SentenceLengthChanged(range));
    }

    fn regenerate(&mut self) {
        self.emit(AppEvent::Regenerate);
    }
}
