use log::debug;
use std::collections::{BTreeMap, BTreeSet};

pub const OPEN_CLASS: &str = "is-open";
pub const ROOT_OPEN_CLASS: &str = "menu-open";
pub const ARIA_EXPANDED: &str = "aria-expanded";
pub const ARIA_HIDDEN: &str = "aria-hidden";

// The bits of a page element the menu reads and writes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Element {
    classes: BTreeSet<String>,
    attributes: BTreeMap<String, String>,
}

impl Element {
    pub fn new() -> Self {
        Element::default()
    }

    pub fn with_class(mut self, class: &str) -> Self {
        self.classes.insert(class.to_string());
        self
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.contains(class)
    }

    pub fn toggle_class(&mut self, class: &str, on: bool) {
        if on {
            self.classes.insert(class.to_string());
        } else {
            self.classes.remove(class);
        }
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    pub fn set_attribute(&mut self, name: &str, value: &str) {
        self.attributes.insert(name.to_string(), value.to_string());
    }
}

// Where a click on the overlay landed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ClickTarget {
    // The overlay background itself.
    Overlay,
    // A navigation link, or something nested inside one.
    MenuLink,
    // Any other content inside the overlay.
    Content,
}

#[derive(Debug, Clone, PartialEq)]
pub enum MenuEvent {
    ToggleClick,
    OverlayClick { target: ClickTarget },
    KeyDown { key: String },
    // The page was restored from the back/forward cache.
    PageShow,
}

// Slide-out navigation overlay. The open state lives entirely in the element
// classes and attributes; nothing else is stored.
#[derive(Debug, Clone, PartialEq)]
pub struct Menu {
    toggle: Element,
    overlay: Element,
    root: Element,
}

impl Menu {
    // Returns `None` when either the toggle or the overlay is missing from the
    // page, in which case there is no menu to drive.
    pub fn attach(toggle: Option<Element>, overlay: Option<Element>, root: Element) -> Option<Self> {
        let (toggle, overlay) = match (toggle, overlay) {
            (Some(toggle), Some(overlay)) => (toggle, overlay),
            _ => {
                debug!("Menu toggle or overlay missing, menu disabled");
                return None;
            }
        };
        Some(Menu {
            toggle,
            overlay,
            root,
        })
    }

    pub fn set_menu_state(&mut self, is_open: bool) {
        self.overlay.toggle_class(OPEN_CLASS, is_open);
        self.root.toggle_class(ROOT_OPEN_CLASS, is_open);
        self.toggle
            .set_attribute(ARIA_EXPANDED, &is_open.to_string());
        self.overlay
            .set_attribute(ARIA_HIDDEN, &(!is_open).to_string());
        debug!("Menu {}", if is_open { "opened" } else { "closed" });
    }

    pub fn open(&mut self) {
        self.set_menu_state(true);
    }

    pub fn close(&mut self) {
        self.set_menu_state(false);
    }

    pub fn toggle(&mut self) {
        let is_open = self.is_open();
        self.set_menu_state(!is_open);
    }

    pub fn is_open(&self) -> bool {
        self.overlay.has_class(OPEN_CLASS)
    }

    pub fn handle(&mut self, event: &MenuEvent) {
        match event {
            MenuEvent::ToggleClick => self.toggle(),
            MenuEvent::OverlayClick { target } => match target {
                ClickTarget::Overlay | ClickTarget::MenuLink => self.close(),
                ClickTarget::Content => {}
            },
            MenuEvent::KeyDown { key } if key == "Escape" => self.close(),
            MenuEvent::KeyDown { .. } => {}
            MenuEvent::PageShow => self.close(),
        }
    }

    pub fn toggle_element(&self) -> &Element {
        &self.toggle
    }

    pub fn overlay_element(&self) -> &Element {
        &self.overlay
    }

    pub fn root_element(&self) -> &Element {
        &self.root
    }
}
