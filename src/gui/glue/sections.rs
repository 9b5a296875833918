use crate::config::{PanelConfig, SectionConfig, SectionName};
use std::path::Path;

#[derive(Debug, Clone, PartialEq)]
pub struct SectionContent<'a> {
    pub title: &'a str,
    pub body: &'a str,
    pub cursor: Option<&'a Path>,
}

/// Content area switched by the navigation buttons. Anything not configured shows the
/// welcome text.
#[derive(Debug, Clone)]
pub struct SectionPanel {
    welcome_title: String,
    welcome_body: String,
    sections: Vec<SectionConfig>,
    current: Option<usize>,
}

impl SectionPanel {
    pub fn new(config: &PanelConfig) -> Self {
        Self {
            welcome_title: config.welcome_title.clone(),
            welcome_body: config.welcome_body.clone(),
            sections: config.sections.clone(),
            current: None,
        }
    }

    pub fn sections(&self) -> &[SectionConfig] {
        &self.sections
    }

    pub fn current_name(&self) -> Option<&SectionName> {
        self.current.map(|i| &self.sections[i].name)
    }

    pub fn select(&mut self, name: &SectionName) -> SectionContent<'_> {
        self.current = self.sections.iter().position(|s| &s.name == name);
        if self.current.is_none() {
            log::debug!("Unknown section '{}', showing welcome", name);
        }
        self.content()
    }

    pub fn content(&self) -> SectionContent<'_> {
        match self.current.map(|i| &self.sections[i]) {
            Some(section) => SectionContent {
                title: &section.title,
                body: &section.body,
                cursor: section.cursor.as_deref(),
            },
            None => SectionContent {
                title: &self.welcome_title,
                body: &self.welcome_body,
                cursor: None,
            },
        }
    }

    /// Picks up a reloaded config, staying on the same section if it still exists.
    pub fn reload(&mut self, config: &PanelConfig) {
        let current = self.current_name().cloned();
        *self = Self::new(config);
        if let Some(name) = current {
            self.select(&name);
        }
    }
}
