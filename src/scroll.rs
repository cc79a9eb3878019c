use gloo_events::EventListener;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, Window};

use crate::config::SiteConfig;
use crate::dom;
use crate::throttle::throttle;

/// Header mutations the scroll engine needs.
pub trait HeaderView {
    fn set_scrolled(&mut self, scrolled: bool);
    fn set_hidden(&mut self, hidden: bool);
    fn height(&self) -> f64;
}

pub trait FabView {
    fn set_visible(&mut self, visible: bool);
}

/// Navigation links, addressed by the section id they point at.
pub trait NavView {
    /// Marks the link for `section` active and clears every other one.
    /// `None` clears them all.
    fn set_active(&mut self, section: Option<&str>);
}

#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    pub id: String,
    pub top: f64,
}

/// Everything one scroll tick decides.
#[derive(Debug, Clone, PartialEq)]
pub struct ScrollFrame {
    pub scrolled: bool,
    pub header_hidden: bool,
    pub fab_visible: bool,
    pub active_section: Option<String>,
}

#[derive(Debug, Clone, Copy)]
pub struct ScrollThresholds {
    pub header: f64,
    pub fab: f64,
    pub section_margin: f64,
}

impl Default for ScrollThresholds {
    fn default() -> Self {
        Self { header: 100.0, fab: 300.0, section_margin: 100.0 }
    }
}

/// Owns the previous offset so direction can be inferred between ticks.
#[derive(Debug, Clone)]
pub struct ScrollEngine {
    thresholds: ScrollThresholds,
    last_offset: f64,
}

impl ScrollEngine {
    pub fn new(thresholds: ScrollThresholds) -> Self {
        Self { thresholds, last_offset: 0.0 }
    }

    #[cfg(test)]
    pub fn last_offset(&self) -> f64 {
        self.last_offset
    }

    pub fn tick(&mut self, offset: f64, header_height: f64, sections: &[Section]) -> ScrollFrame {
        let scrolled = offset > self.thresholds.header;
        let header_hidden = scrolled && offset > self.last_offset;
        self.last_offset = offset.max(0.0);

        ScrollFrame {
            scrolled,
            header_hidden,
            fab_visible: offset > self.thresholds.fab,
            active_section: self.active_section(offset, header_height, sections),
        }
    }

    fn active_section(&self, offset: f64, header_height: f64, sections: &[Section]) -> Option<String> {
        sections
            .iter()
            .filter(|s| offset >= s.top - header_height - self.thresholds.section_margin)
            .last()
            .map(|s| s.id.clone())
    }

    /// Runs one tick and pushes the result into whichever views are present.
    pub fn apply(
        &mut self,
        offset: f64,
        sections: &[Section],
        header: Option<&mut dyn HeaderView>,
        fab: Option<&mut dyn FabView>,
        nav: &mut dyn NavView,
    ) -> ScrollFrame {
        let header_height = header.as_ref().map(|h| h.height()).unwrap_or(0.0);
        let frame = self.tick(offset, header_height, sections);
        if let Some(header) = header {
            header.set_scrolled(frame.scrolled);
            header.set_hidden(frame.header_hidden);
        }
        if let Some(fab) = fab {
            fab.set_visible(frame.fab_visible);
        }
        nav.set_active(frame.active_section.as_deref());
        frame
    }
}

pub struct HeaderElement(pub HtmlElement);

impl HeaderView for HeaderElement {
    fn set_scrolled(&mut self, scrolled: bool) {
        if let Err(e) = dom::toggle_class(&self.0, "scrolled", scrolled) {
            log::warn!("header class update failed: {:?}", e);
        }
    }

    fn set_hidden(&mut self, hidden: bool) {
        let transform = if hidden { "translateY(-100%)" } else { "translateY(0)" };
        if let Err(e) = self.0.style().set_property("transform", transform) {
            log::warn!("header transform update failed: {:?}", e);
        }
    }

    fn height(&self) -> f64 {
        self.0.offset_height() as f64
    }
}

pub struct FabElement(pub HtmlElement);

impl FabView for FabElement {
    fn set_visible(&mut self, visible: bool) {
        let (opacity, visibility) = if visible { ("1", "visible") } else { ("0", "hidden") };
        if let Err(e) = dom::set_styles(&self.0, &[("opacity", opacity), ("visibility", visibility)]) {
            log::warn!("fab visibility update failed: {:?}", e);
        }
    }
}

pub struct NavLinks(pub Vec<Element>);

impl NavView for NavLinks {
    fn set_active(&mut self, section: Option<&str>) {
        let target = section.map(|id| format!("#{}", id));
        for link in &self.0 {
            let active = target.is_some() && link.get_attribute("href") == target;
            if let Err(e) = dom::toggle_class(link, "active", active) {
                log::warn!("nav link class update failed: {:?}", e);
            }
        }
    }
}

/// `section[id]` in document order with their current layout offsets.
pub fn read_sections(sections: &[HtmlElement]) -> Vec<Section> {
    sections
        .iter()
        .filter_map(|s| {
            let id = s.get_attribute("id")?;
            Some(Section { id, top: s.offset_top() as f64 })
        })
        .collect()
}

/// Hooks the engine to a throttled window scroll listener.
pub fn bind(window: &Window, document: &Document, header: Option<HtmlElement>, config: &SiteConfig) -> EventListener {
    let mut header = header.map(HeaderElement);
    let mut fab = dom::query_html(document, ".fab").map(FabElement);
    match fab.as_mut() {
        Some(fab) => fab.set_visible(false),
        None => log::debug!("no .fab on this page"),
    }
    let mut nav = NavLinks(dom::query_all(document, ".nav-link"));
    let sections: Vec<HtmlElement> = dom::query_all(document, "section[id]")
        .into_iter()
        .filter_map(|el| el.dyn_into::<HtmlElement>().ok())
        .collect();

    let mut engine = ScrollEngine::new(ScrollThresholds {
        header: config.header_threshold,
        fab: config.fab_threshold,
        section_margin: config.section_margin,
    });
    let target = window.clone();
    let mut on_scroll = throttle(config.scroll_throttle_ms, move || {
        let offset = target.page_y_offset().unwrap_or(0.0);
        engine.apply(
            offset,
            &read_sections(&sections),
            header.as_mut().map(|h| h as &mut dyn HeaderView),
            fab.as_mut().map(|f| f as &mut dyn FabView),
            &mut nav,
        );
    });

    EventListener::new(window, "scroll", move |_| on_scroll())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct FakeHeader {
        scrolled: bool,
        hidden: bool,
        height: f64,
    }

    impl HeaderView for FakeHeader {
        fn set_scrolled(&mut self, scrolled: bool) {
            self.scrolled = scrolled;
        }
        fn set_hidden(&mut self, hidden: bool) {
            self.hidden = hidden;
        }
        fn height(&self) -> f64 {
            self.height
        }
    }

    #[derive(Default)]
    struct FakeFab(Option<bool>);

    impl FabView for FakeFab {
        fn set_visible(&mut self, visible: bool) {
            self.0 = Some(visible);
        }
    }

    #[derive(Default)]
    struct FakeNav(Vec<(String, bool)>);

    impl FakeNav {
        fn with(ids: &[&str]) -> Self {
            Self(ids.iter().map(|id| (id.to_string(), false)).collect())
        }
        fn active(&self) -> Vec<&str> {
            self.0.iter().filter(|(_, a)| *a).map(|(id, _)| id.as_str()).collect()
        }
    }

    impl NavView for FakeNav {
        fn set_active(&mut self, section: Option<&str>) {
            for (id, active) in self.0.iter_mut() {
                *active = Some(id.as_str()) == section;
            }
        }
    }

    fn sections() -> Vec<Section> {
        vec![
            Section { id: "inicio".into(), top: 0.0 },
            Section { id: "servicos".into(), top: 800.0 },
            Section { id: "contato".into(), top: 2000.0 },
        ]
    }

    #[test]
    fn header_stays_plain_up_to_threshold() {
        let mut engine = ScrollEngine::new(ScrollThresholds::default());
        for offset in [0.0, 40.0, 99.0, 100.0, 20.0] {
            let frame = engine.tick(offset, 64.0, &[]);
            assert!(!frame.scrolled, "offset {}", offset);
            assert!(!frame.header_hidden, "offset {}", offset);
        }
    }

    #[test]
    fn header_hides_going_down_and_shows_going_up() {
        let mut engine = ScrollEngine::new(ScrollThresholds::default());
        let frame = engine.tick(150.0, 64.0, &[]);
        assert!(frame.scrolled);
        assert!(frame.header_hidden);

        let frame = engine.tick(400.0, 64.0, &[]);
        assert!(frame.header_hidden);

        let frame = engine.tick(350.0, 64.0, &[]);
        assert!(frame.scrolled);
        assert!(!frame.header_hidden);
    }

    #[test]
    fn negative_overscroll_is_stored_as_zero() {
        let mut engine = ScrollEngine::new(ScrollThresholds::default());
        engine.tick(-30.0, 0.0, &[]);
        assert_eq!(engine.last_offset(), 0.0);
    }

    #[test]
    fn fab_visibility_is_offset_above_300() {
        let mut engine = ScrollEngine::new(ScrollThresholds::default());
        assert!(!engine.tick(0.0, 0.0, &[]).fab_visible);
        assert!(!engine.tick(300.0, 0.0, &[]).fab_visible);
        assert!(engine.tick(301.0, 0.0, &[]).fab_visible);
        assert!(!engine.tick(120.0, 0.0, &[]).fab_visible);
    }

    #[test]
    fn active_section_is_last_one_reached() {
        let mut engine = ScrollEngine::new(ScrollThresholds::default());
        // 800 - 64 - 100 = 636
        assert_eq!(engine.tick(635.0, 64.0, &sections()).active_section.as_deref(), Some("inicio"));
        assert_eq!(engine.tick(636.0, 64.0, &sections()).active_section.as_deref(), Some("servicos"));
        assert_eq!(engine.tick(5000.0, 64.0, &sections()).active_section.as_deref(), Some("contato"));
    }

    #[test]
    fn no_section_reached_means_no_active_link() {
        let mut engine = ScrollEngine::new(ScrollThresholds::default());
        let late = vec![Section { id: "sobre".into(), top: 1200.0 }];
        assert_eq!(engine.tick(10.0, 64.0, &late).active_section, None);
    }

    #[test]
    fn apply_pushes_frame_into_views() {
        let mut engine = ScrollEngine::new(ScrollThresholds::default());
        let mut header = FakeHeader { height: 64.0, ..Default::default() };
        let mut fab = FakeFab::default();
        let mut nav = FakeNav::with(&["inicio", "servicos", "contato"]);

        engine.apply(900.0, &sections(), Some(&mut header), Some(&mut fab), &mut nav);
        assert!(header.scrolled);
        assert!(header.hidden);
        assert_eq!(fab.0, Some(true));
        assert_eq!(nav.active(), vec!["servicos"]);

        engine.apply(2500.0, &sections(), Some(&mut header), Some(&mut fab), &mut nav);
        assert_eq!(nav.active(), vec!["contato"]);
    }

    #[test]
    fn missing_header_and_fab_are_skipped() {
        let mut engine = ScrollEngine::new(ScrollThresholds::default());
        let mut nav = FakeNav::with(&["inicio"]);
        let frame = engine.apply(500.0, &sections(), None, None, &mut nav);
        assert!(frame.fab_visible);
        assert_eq!(nav.active(), vec!["inicio"]);
    }
}
