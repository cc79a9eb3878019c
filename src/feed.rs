use wasm_bindgen::JsValue;
use web_sys::Document;
use yew::prelude::*;

pub const FEED_CONTAINER_ID: &str = "instagram-feed";
pub const WIDGET_SCRIPT: &str = "https://cdn.lightwidget.com/widgets/lightwidget.js";

pub fn widget_url(widget_id: &str) -> String {
    format!("//lightwidget.com/widgets/{}.html", widget_id)
}

#[derive(Properties, PartialEq)]
pub struct FeedWidgetProps {
    pub widget_id: String,
}

#[function_component(FeedWidget)]
pub fn feed_widget(props: &FeedWidgetProps) -> Html {
    html! {
        <iframe
            src={widget_url(&props.widget_id)}
            scrolling="no"
            class="lightwidget-widget"
            style="width: 100%; border: 0; overflow: hidden;"
        />
    }
}

/// Swaps the static gallery for the embedded widget when one is configured.
pub fn load(document: &Document, widget_id: Option<&str>) -> Result<(), JsValue> {
    let Some(container) = document.get_element_by_id(FEED_CONTAINER_ID) else {
        return Ok(());
    };
    let Some(widget_id) = widget_id else {
        log::info!("Instagram feed: keeping the static gallery");
        return Ok(());
    };

    let script = document.create_element("script")?;
    script.set_attribute("src", WIDGET_SCRIPT)?;
    script.set_attribute("async", "")?;
    if let Some(body) = document.body() {
        body.append_child(&script)?;
    }

    container.set_inner_html("");
    yew::Renderer::<FeedWidget>::with_root_and_props(
        container,
        FeedWidgetProps { widget_id: widget_id.to_string() },
    )
    .render();
    log::debug!("Instagram feed widget {} mounted", widget_id);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn widget_url_embeds_id() {
        assert_eq!(widget_url("abc123"), "//lightwidget.com/widgets/abc123.html");
    }
}
