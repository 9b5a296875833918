use gtk::gdk;
use gtk::prelude::*;
use gtk4 as gtk;
use palette::Srgba;

pub struct ThemeColors {
    pub indicator: Srgba<f64>,
    pub range_arc: Srgba<f64>,
    pub center_dot: Srgba<f64>,
}

impl Default for ThemeColors {
    fn default() -> Self {
        Self {
            indicator: Srgba::new(1.0, 1.0, 1.0, 1.0),
            range_arc: Srgba::new(1.0, 1.0, 1.0, 0.25),
            center_dot: Srgba::new(1.0, 1.0, 1.0, 1.0),
        }
    }
}

impl ThemeColors {
    pub fn from_context(context: &gtk::StyleContext) -> Self {
        let fallback = Self::default();
        Self {
            indicator: Self::lookup_color(
                context,
                "knob_indicator_color",
                fallback.indicator,
                None,
            ),
            range_arc: Self::lookup_color(
                context,
                "knob_range_color",
                fallback.range_arc,
                Some(0.25),
            ),
            center_dot: Self::lookup_color(
                context,
                "knob_indicator_color",
                fallback.center_dot,
                None,
            ),
        }
    }

    fn lookup_color(
        context: &gtk::StyleContext,
        name: &str,
        fallback: Srgba<f64>,
        alpha_override: Option<f64>,
    ) -> Srgba<f64> {
        context
            .lookup_color(name)
            .map(|c| {
                let (r, g, b, a) = (
                    c.red() as f64,
                    c.green() as f64,
                    c.blue() as f64,
                    c.alpha() as f64,
                );
                Srgba::new(r, g, b, alpha_override.unwrap_or(a))
            })
            .unwrap_or(fallback)
    }
}

pub fn load_css() {
    let provider = gtk::CssProvider::new();
    let css_data = "
@define-color knob_indicator_color #ffffff;
@define-color knob_range_color #ffffff;

.knobdeck-surface {
    background-color: #111111;
}
.knobdeck-window.system-off .knobdeck-surface {
    opacity: 0.6;
}
.powered-off {
    opacity: 0.3;
}
.knobdeck-nav, .knobdeck-status, .text-display, .content {
    padding: 12px;
}
.year-display {
    font-size: 24px;
    font-weight: bold;
}
";
    provider.load_from_data(css_data);

    if let Some(display) = gdk::Display::default() {
        gtk::style_context_add_provider_for_display(
            &display,
            &provider,
            gtk::STYLE_PROVIDER_PRIORITY_APPLICATION,
        );
    }
}
