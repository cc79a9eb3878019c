use std::cell::RefCell;
use std::rc::Rc;

use gloo_events::EventListener;
use web_sys::{Document, Element, HtmlElement, Window};

use crate::dom::{self, toggle_class};

pub const ICON_OPEN: &str = "menu";
pub const ICON_CLOSE: &str = "close";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuState {
    Closed,
    Open,
}

pub trait MenuView {
    fn set_expanded(&mut self, expanded: bool);
    fn set_panel_open(&mut self, open: bool);
    fn set_scroll_locked(&mut self, locked: bool);
    fn set_icon(&mut self, glyph: &str);
}

#[derive(Debug, Clone)]
pub struct MenuController {
    state: MenuState,
    breakpoint: f64,
}

impl MenuController {
    #[cfg(test)]
    pub fn new(breakpoint: f64) -> Self {
        Self::with_state(MenuState::Closed, breakpoint)
    }

    pub fn with_state(state: MenuState, breakpoint: f64) -> Self {
        Self { state, breakpoint }
    }

    #[cfg(test)]
    pub fn state(&self) -> MenuState {
        self.state
    }

    pub fn toggle(&mut self, view: &mut dyn MenuView) {
        self.state = match self.state {
            MenuState::Closed => MenuState::Open,
            MenuState::Open => MenuState::Closed,
        };
        let open = self.state == MenuState::Open;
        view.set_expanded(open);
        view.set_panel_open(open);
        view.set_scroll_locked(open);
        view.set_icon(if open { ICON_CLOSE } else { ICON_OPEN });
    }

    /// A navigation link was followed. Only the mobile layout closes the panel.
    pub fn link_clicked(&mut self, viewport_width: f64, view: &mut dyn MenuView) -> bool {
        if viewport_width < self.breakpoint && self.state == MenuState::Open {
            self.toggle(view);
            return true;
        }
        false
    }

    /// Growing past the breakpoint while open would leave the body scroll-locked
    /// under the desktop layout.
    pub fn resized(&mut self, viewport_width: f64, view: &mut dyn MenuView) -> bool {
        if viewport_width >= self.breakpoint && self.state == MenuState::Open {
            self.toggle(view);
            return true;
        }
        false
    }
}

pub struct MenuElements {
    pub toggle: Element,
    pub panel: Element,
    pub body: HtmlElement,
    pub icon: Option<Element>,
}

impl MenuView for MenuElements {
    fn set_expanded(&mut self, expanded: bool) {
        let value = if expanded { "true" } else { "false" };
        if let Err(e) = self.toggle.set_attribute("aria-expanded", value) {
            log::warn!("aria-expanded update failed: {:?}", e);
        }
    }

    fn set_panel_open(&mut self, open: bool) {
        if let Err(e) = toggle_class(&self.panel, "nav-menu--open", open) {
            log::warn!("nav panel class update failed: {:?}", e);
        }
    }

    fn set_scroll_locked(&mut self, locked: bool) {
        if let Err(e) = toggle_class(&self.body, "menu-open", locked) {
            log::warn!("body scroll lock update failed: {:?}", e);
        }
    }

    fn set_icon(&mut self, glyph: &str) {
        if let Some(icon) = &self.icon {
            icon.set_text_content(Some(glyph));
        }
    }
}

fn viewport_width(window: &Window) -> f64 {
    window.inner_width().ok().and_then(|w| w.as_f64()).unwrap_or(0.0)
}

/// Binds the toggle button, every `.nav-link` and window resizes.
pub fn bind(window: &Window, document: &Document, breakpoint: f64) -> Vec<EventListener> {
    let toggle = document.query_selector(".menu-toggle").ok().flatten();
    let panel = document.query_selector(".nav-menu").ok().flatten();
    let (Some(toggle), Some(panel), Some(body)) = (toggle, panel, document.body()) else {
        log::debug!("menu toggle or panel missing, mobile menu disabled");
        return Vec::new();
    };

    let state = if toggle.get_attribute("aria-expanded").as_deref() == Some("true") {
        MenuState::Open
    } else {
        MenuState::Closed
    };
    let icon = toggle.query_selector(".material-symbols-outlined").ok().flatten();
    let view = Rc::new(RefCell::new(MenuElements { toggle: toggle.clone(), panel, body, icon }));
    let controller = Rc::new(RefCell::new(MenuController::with_state(state, breakpoint)));
    let mut listeners = Vec::new();

    {
        let (view, controller) = (view.clone(), controller.clone());
        listeners.push(EventListener::new(&toggle, "click", move |_| {
            controller.borrow_mut().toggle(&mut *view.borrow_mut());
        }));
    }

    for link in dom::query_all(document, ".nav-link") {
        let (view, controller, window) = (view.clone(), controller.clone(), window.clone());
        listeners.push(EventListener::new(&link, "click", move |_| {
            controller.borrow_mut().link_clicked(viewport_width(&window), &mut *view.borrow_mut());
        }));
    }

    let target = window.clone();
    listeners.push(EventListener::new(window, "resize", move |_| {
        controller.borrow_mut().resized(viewport_width(&target), &mut *view.borrow_mut());
    }));

    listeners
}
