use crate::config::{self, Config, SectionName, WordRange};
use crate::events::AppEvent;
use crate::geometry::{Point, Size};
use crate::gui::glue::{CursorCache, SectionPanel, Slideshow};
use crate::gui::panel::{self, InterfaceController, PointerAction, Power};
use crate::gui::theme::{self, ThemeColors};
use crate::gui::window;
use gtk::prelude::*;
use gtk4 as gtk;
use relm4::prelude::*;
use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;

pub struct AppModel {
    pub controller: Rc<RefCell<InterfaceController>>,
    pub slideshow: Rc<RefCell<Slideshow>>,
    pub sections: SectionPanel,
    pub cursors: CursorCache,
    pub config: Config,
    pub config_path: PathBuf,
    pub powered: bool,
    pub year_text: String,
    pub output_text: String,
    pub section_title: String,
    pub section_body: String,
    surface_grabbed: bool,
    slide_timer: Option<glib::SourceId>,
    pub root: gtk::ApplicationWindow,
    pub drawing_area: gtk::DrawingArea,
    pub year_display: gtk::Label,
    pub text_display: gtk::Label,
    pub content_box: gtk::Box,
    pub nav: gtk::Box,
    pub toggle_on: gtk::Picture,
    pub toggle_off: gtk::Picture,
}

#[derive(Debug)]
pub enum AppMsg {
    PointerDown(Point),
    PointerMove(Point),
    PointerUp,
    TogglePower,
    YearChanged(i32),
    SentenceLengthChanged(WordRange),
    Regenerate,
    SelectSection(SectionName),
    NextSlide,
    ConfigReload,
    Quit,
}

impl From<AppEvent> for AppMsg {
    fn from(event: AppEvent) -> Self {
        match event {
            AppEvent::YearChanged(y) => AppMsg::YearChanged(y),
            AppEvent::SentenceLengthChanged(r) => AppMsg::SentenceLengthChanged(r),
            AppEvent::Regenerate => AppMsg::Regenerate,
            AppEvent::ConfigReload => AppMsg::ConfigReload,
        }
    }
}

#[relm4::component(pub)]
impl SimpleComponent for AppModel {
    type Init = (
        InterfaceController,
        Config,
        PathBuf,
        async_channel::Receiver<AppEvent>,
    );
    type Input = AppMsg;
    type Output = ();

    view! {
        #[root]
        #[name = "window"]
        gtk::ApplicationWindow {
            set_title: Some("Knobdeck"),
            set_default_width: 1280,
            set_default_height: 800,
            add_css_class: "knobdeck-window",

            add_controller = gtk::EventControllerKey {
                connect_key_pressed[sender] => move |_, key, _, _| {
                    if key == gtk::gdk::Key::Escape {
                        sender.input(AppMsg::Quit);
                        return glib::Propagation::Stop;
                    }
                    glib::Propagation::Proceed
                }
            },

            gtk::Box {
                set_orientation: gtk::Orientation::Horizontal,

                #[name = "nav"]
                gtk::Box {
                    set_orientation: gtk::Orientation::Vertical,
                    set_spacing: 6,
                    add_css_class: "knobdeck-nav",
                },

                gtk::Box {
                    set_orientation: gtk::Orientation::Vertical,
                    set_hexpand: true,
                    set_spacing: 6,

                    #[name = "drawing_area"]
                    gtk::DrawingArea {
                        set_hexpand: true,
                        set_vexpand: true,
                        set_content_width: 960,
                        set_content_height: 540,
                        add_css_class: "knobdeck-surface",

                        // drag keeps delivering to this widget until release, wherever the pointer goes
                        add_controller = gtk::GestureDrag {
                            set_button: 1,
                            connect_drag_begin[sender] => move |_, x, y| {
                                sender.input(AppMsg::PointerDown(Point::new(x, y)));
                            },
                            connect_drag_update[sender] => move |gesture, dx, dy| {
                                if let Some((x, y)) = gesture.start_point() {
                                    sender.input(AppMsg::PointerMove(Point::new(x + dx, y + dy)));
                                }
                            },
                            connect_drag_end[sender] => move |_, _, _| {
                                sender.input(AppMsg::PointerUp);
                            },
                        }
                    },

                    gtk::Box {
                        set_orientation: gtk::Orientation::Horizontal,
                        set_spacing: 12,
                        add_css_class: "knobdeck-status",

                        gtk::Button {
                            set_label: "Power",
                            add_css_class: "toggle-switch",
                            connect_clicked[sender] => move |_| {
                                sender.input(AppMsg::TogglePower);
                            },
                        },

                        #[name = "toggle_on"]
                        gtk::Picture {
                            set_can_shrink: true,
                            #[watch]
                            set_visible: model.powered,
                        },

                        #[name = "toggle_off"]
                        gtk::Picture {
                            set_can_shrink: true,
                            #[watch]
                            set_visible: !model.powered,
                        },

                        #[name = "year_display"]
                        gtk::Label {
                            add_css_class: "year-display",
                            #[watch]
                            set_label: &model.year_text,
                        },
                    },

                    #[name = "text_display"]
                    gtk::Label {
                        set_wrap: true,
                        set_xalign: 0.0,
                        add_css_class: "text-display",
                        #[watch]
                        set_label: &model.output_text,
                    },

                    #[name = "content_box"]
                    gtk::Box {
                        set_orientation: gtk::Orientation::Vertical,
                        set_spacing: 6,
                        add_css_class: "content",

                        gtk::Label {
                            set_xalign: 0.0,
                            add_css_class: "title-2",
                            #[watch]
                            set_label: &model.section_title,
                        },

                        gtk::Label {
                            set_wrap: true,
                            set_xalign: 0.0,
                            #[watch]
                            set_label: &model.section_body,
                        },
                    },
                }
            }
        }
    }

    fn init(
        init: Self::Init,
        root: Self::Root,
        sender: ComponentSender<Self>,
    ) -> ComponentParts<Self> {
        let (controller, config, config_path, rx) = init;

        theme::load_css();

        let powered = controller.power().is_on();
        let year_text = controller.year().map(|y| y.to_string()).unwrap_or_default();
        let sections = SectionPanel::new(&config.panel);
        let welcome = sections.content();
        let (section_title, section_body) = (welcome.title.to_string(), welcome.body.to_string());

        let model = AppModel {
            controller: Rc::new(RefCell::new(controller)),
            slideshow: Rc::new(RefCell::new(Slideshow::new(config.slideshow.slides.clone()))),
            sections,
            cursors: CursorCache::new(config.cursor.size),
            config,
            config_path,
            powered,
            year_text,
            output_text: String::new(),
            section_title,
            section_body,
            surface_grabbed: false,
            slide_timer: None,
            root: root.clone(),
            drawing_area: gtk::DrawingArea::default(),
            year_display: gtk::Label::default(),
            text_display: gtk::Label::default(),
            content_box: gtk::Box::default(),
            nav: gtk::Box::default(),
            toggle_on: gtk::Picture::default(),
            toggle_off: gtk::Picture::default(),
        };

        let widgets = view_output!();

        let mut model = model;
        model.drawing_area = widgets.drawing_area.clone();
        model.year_display = widgets.year_display.clone();
        model.text_display = widgets.text_display.clone();
        model.content_box = widgets.content_box.clone();
        model.nav = widgets.nav.clone();
        model.toggle_on = widgets.toggle_on.clone();
        model.toggle_off = widgets.toggle_off.clone();

        let controller_draw = model.controller.clone();
        let slideshow_draw = model.slideshow.clone();
        widgets
            .drawing_area
            .set_draw_func(move |drawing_area, cr, width, height| {
                let style_context = drawing_area.style_context();
                let colors = ThemeColors::from_context(&style_context);
                let displayed = Size::new(width as f64, height as f64);
                let slideshow = slideshow_draw.borrow();
                if let Err(e) = panel::draw(
                    cr,
                    &controller_draw.borrow(),
                    slideshow.image(),
                    &colors,
                    displayed,
                ) {
                    log::error!("Drawing error: {}", e);
                }
            });

        let sender_clone = sender.clone();
        relm4::spawn(async move {
            while let Ok(event) = rx.recv().await {
                sender_clone.input(AppMsg::from(event));
            }
        });

        model.apply_assets(&sender);
        let power = model.controller.borrow().power();
        model.apply_power(power);
        if model.powered {
            model.output_text = model.describe_output();
        }

        ComponentParts { model, widgets }
    }

    fn update(&mut self, msg: Self::Input, sender: ComponentSender<Self>) {
        match msg {
            AppMsg::PointerDown(point) => {
                let viewport = window::viewport_of(&self.drawing_area);
                let action = self.controller.borrow_mut().pointer_down(point, viewport);
                self.after_pointer(action);
            }
            AppMsg::PointerMove(point) => {
                let viewport = window::viewport_of(&self.drawing_area);
                let action = self.controller.borrow_mut().pointer_move(point, viewport);
                self.after_pointer(action);
            }
            AppMsg::PointerUp => {
                let action = self.controller.borrow_mut().pointer_up();
                self.after_pointer(action);
            }
            AppMsg::TogglePower => {
                let power = self.controller.borrow_mut().toggle_power();
                self.apply_power(power);
            }
            AppMsg::YearChanged(year) => {
                self.year_text = year.to_string();
            }
            AppMsg::SentenceLengthChanged(range) => {
                log::debug!("Sentence length now {} words", range);
            }
            AppMsg::Regenerate => {
                self.output_text = self.describe_output();
            }
            AppMsg::SelectSection(name) => self.select_section(&name),
            AppMsg::NextSlide => {
                self.slideshow.borrow_mut().advance();
                self.drawing_area.queue_draw();
            }
            AppMsg::ConfigReload => match config::load_config(&self.config_path) {
                Ok(new_config) => {
                    if let Err(e) = self.controller.borrow_mut().reconfigure(&new_config) {
                        log::error!("Rejected reloaded config: {}", e);
                        return;
                    }
                    self.config = new_config;
                    self.cursors = CursorCache::new(self.config.cursor.size);
                    self.sections.reload(&self.config.panel);
                    self.slideshow
                        .borrow_mut()
                        .replace(self.config.slideshow.slides.clone());
                    self.apply_assets(&sender);
                    self.drawing_area.queue_draw();
                    log::info!("Configuration reloaded");
                }
                Err(e) => log::error!("Failed to reload config: {}", e),
            },
            AppMsg::Quit => self.root.close(),
        }
    }
}

impl AppModel {
    fn after_pointer(&mut self, action: PointerAction) {
        if action.should_redraw {
            self.drawing_area.queue_draw();
        }

        let grabbed = self.controller.borrow().is_capturing();
        if grabbed != self.surface_grabbed {
            self.surface_grabbed = grabbed;
            self.apply_surface_cursor();
        }
    }

    fn apply_surface_cursor(&mut self) {
        let cursor = if self.surface_grabbed {
            window::grabbing_cursor()
        } else {
            self.cursors
                .get_optional(self.config.cursor.surface.as_deref())
        };
        self.drawing_area.set_cursor(cursor.as_ref());
    }

    fn apply_power(&mut self, power: Power) {
        self.powered = power.is_on();
        window::set_class(&self.root, "system-off", !self.powered);
        window::set_class(&self.year_display, "powered-off", !self.powered);
        window::set_class(&self.text_display, "powered-off", !self.powered);
    }

    fn describe_output(&self) -> String {
        let controller = self.controller.borrow();
        let year = controller.year().map(|y| y.to_string()).unwrap_or_default();
        let length = controller
            .length_option()
            .map(|o| o.to_string())
            .unwrap_or_default();
        format!(
            "{}: {} sentences, {} words",
            year,
            length,
            controller.sentence_length()
        )
    }

    fn select_section(&mut self, name: &SectionName) {
        let content = self.sections.select(name);
        self.section_title = content.title.to_string();
        self.section_body = content.body.to_string();
        let cursor = self.cursors.get_optional(content.cursor);
        self.content_box.set_cursor(cursor.as_ref());
    }

    /// Everything that is derived from config paths: toggle images, cursors, navigation and
    /// the slide timer.
    fn apply_assets(&mut self, sender: &ComponentSender<Self>) {
        self.toggle_on
            .set_filename(self.config.power.on_image.as_deref());
        self.toggle_off
            .set_filename(self.config.power.off_image.as_deref());

        self.apply_surface_cursor();

        let current = self.sections.content();
        self.section_title = current.title.to_string();
        self.section_body = current.body.to_string();
        let cursor = self.cursors.get_optional(current.cursor);
        self.content_box.set_cursor(cursor.as_ref());

        self.populate_nav(sender);
        self.restart_slide_timer(sender);
    }

    fn populate_nav(&mut self, sender: &ComponentSender<Self>) {
        window::clear_children(&self.nav);

        for section in self.sections.sections() {
            let button = gtk::Button::with_label(&section.title);
            button.add_css_class(&format!("nav-{}", section.name));
            let cursor = self.cursors.get_optional(section.cursor.as_deref());
            button.set_cursor(cursor.as_ref());

            let sender = sender.clone();
            let name = section.name.clone();
            button.connect_clicked(move |_| {
                sender.input(AppMsg::SelectSection(name.clone()));
            });
            self.nav.append(&button);
        }
    }

    fn restart_slide_timer(&mut self, sender: &ComponentSender<Self>) {
        if let Some(id) = self.slide_timer.take() {
            id.remove();
        }
        if !self.slideshow.borrow().is_animated() {
            return;
        }

        let sender = sender.clone();
        self.slide_timer = Some(glib::timeout_add_seconds_local(
            self.config.slideshow.interval_secs.max(1),
            move || {
                sender.input(AppMsg::NextSlide);
                glib::ControlFlow::Continue
            },
        ));
    }
}
