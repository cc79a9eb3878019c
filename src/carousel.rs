use wasm_bindgen::JsValue;
use web_sys::{Document, Element, HtmlElement};

use crate::dom;

const READY_ATTR: &str = "data-carousel-ready";

/// The testimonial strip, reduced to what the loop setup touches.
pub trait Track {
    type Card;

    fn cards(&self) -> Vec<Self::Card>;
    fn append_copy(&mut self, card: &Self::Card) -> Result<(), JsValue>;
    fn set_duration(&mut self, duration: &str) -> Result<(), JsValue>;
    fn is_doubled(&self) -> bool;
    fn mark_doubled(&mut self) -> Result<(), JsValue>;
}

pub fn animation_duration(card_count: usize, seconds_per_card: u32) -> String {
    format!("{}s", card_count as u64 * seconds_per_card as u64)
}

/// Appends a copy of every card after the originals, in order, so the CSS
/// animation can scroll exactly one original length and loop. Returns the
/// original card count, or `None` if the track was already doubled.
///
/// The track is marked before any card is copied, so a failure part way
/// through is final and a later call never copies the cards a second time.
pub fn double<T: Track>(track: &mut T, seconds_per_card: u32) -> Result<Option<usize>, JsValue> {
    if track.is_doubled() {
        return Ok(None);
    }
    track.mark_doubled()?;
    let cards = track.cards();
    for card in &cards {
        track.append_copy(card)?;
    }
    track.set_duration(&animation_duration(cards.len(), seconds_per_card))?;
    Ok(Some(cards.len()))
}

pub struct TrackElement(pub HtmlElement);

impl Track for TrackElement {
    type Card = Element;

    fn cards(&self) -> Vec<Element> {
        let list = self.0.children();
        (0..list.length()).filter_map(|i| list.item(i)).collect()
    }

    fn append_copy(&mut self, card: &Element) -> Result<(), JsValue> {
        let copy = card.clone_node_with_deep(true)?;
        self.0.append_child(&copy)?;
        Ok(())
    }

    fn set_duration(&mut self, duration: &str) -> Result<(), JsValue> {
        self.0.style().set_property("animation-duration", duration)
    }

    fn is_doubled(&self) -> bool {
        self.0.has_attribute(READY_ATTR)
    }

    fn mark_doubled(&mut self) -> Result<(), JsValue> {
        self.0.set_attribute(READY_ATTR, "")
    }
}

pub fn init(document: &Document, seconds_per_card: u32) -> Result<Option<usize>, JsValue> {
    match dom::by_id::<HtmlElement>(document, "testimonialsTrack") {
        Some(track) => double(&mut TrackElement(track), seconds_per_card),
        None => Ok(None),
    }
}
