//! Browser glue: the canvas, the hover list, window focus and the stats
//! element.

use anyhow::Context as _;
use wasm_bindgen::{JsCast, prelude::*};
use winit::event_loop::EventLoopProxy;

use crate::{
    config::ViewerConfig,
    flow::{FlowEvent, ViewerEvent},
    hover::HoverEvent,
};

fn document() -> anyhow::Result<web_sys::Document> {
    web_sys::window()
        .and_then(|window| window.document())
        .context("no document")
}

fn js_error(e: JsValue) -> anyhow::Error {
    anyhow::anyhow!("{:?}", e)
}

pub fn canvas(id: &str) -> anyhow::Result<web_sys::HtmlCanvasElement> {
    document()?
        .get_element_by_id(id)
        .with_context(|| format!("no element #{}", id))?
        .dyn_into::<web_sys::HtmlCanvasElement>()
        .map_err(|_| anyhow::anyhow!("#{} is not a canvas", id))
}

/// The element showing the frame rate, appended to the page if missing.
pub fn stats_element(id: &str) -> Option<web_sys::Element> {
    let document = document().ok()?;
    if let Some(element) = document.get_element_by_id(id) {
        return Some(element);
    }
    let element = document.create_element("div").ok()?;
    element.set_id(id);
    document.body()?.append_child(&element).ok()?;
    Some(element)
}

fn listen<F>(target: &web_sys::EventTarget, event: &str, handler: F) -> anyhow::Result<()>
where
    F: FnMut(web_sys::Event) + 'static,
{
    let closure = Closure::<dyn FnMut(web_sys::Event)>::new(handler);
    target
        .add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
        .map_err(js_error)?;
    // The listeners live as long as the page.
    closure.forget();
    Ok(())
}

fn send(proxy: &EventLoopProxy<FlowEvent>, event: ViewerEvent) {
    if proxy.send_event(FlowEvent::Viewer(event)).is_err() {
        log::warn!("event loop is closed");
    }
}

/// Wires the DOM to the event loop: hovering a list item enters the region
/// named by its text, leaving the list leaves, window focus pauses updates.
pub(crate) fn attach_listeners(
    config: &ViewerConfig,
    proxy: EventLoopProxy<FlowEvent>,
) -> anyhow::Result<()> {
    let window = web_sys::window().context("no window")?;
    {
        let proxy = proxy.clone();
        listen(&window, "focus", move |_| {
            send(&proxy, ViewerEvent::Focus(true))
        })?;
    }
    {
        let proxy = proxy.clone();
        listen(&window, "blur", move |_| {
            send(&proxy, ViewerEvent::Focus(false))
        })?;
    }

    let list = document()?
        .query_selector(&config.list_selector)
        .map_err(js_error)?
        .with_context(|| format!("no element matches {:?}", config.list_selector))?;

    let items = list
        .query_selector_all(&config.item_selector)
        .map_err(js_error)?;
    for i in 0..items.length() {
        let Some(item) = items.item(i) else {
            continue;
        };
        let proxy = proxy.clone();
        listen(&item, "mouseover", move |event| {
            // Raw text of whatever is under the pointer, read at event time.
            let label = event
                .target()
                .and_then(|target| target.dyn_into::<web_sys::Node>().ok())
                .and_then(|node| node.text_content())
                .unwrap_or_default();
            send(&proxy, ViewerEvent::Hover(HoverEvent::Enter(label)))
        })?;
    }

    listen(&list, "mouseleave", move |_| {
        send(&proxy, ViewerEvent::Hover(HoverEvent::Leave))
    })?;

    log::info!("listening to {} list items", items.length());
    Ok(())
}

#[wasm_bindgen(start)]
pub fn run_web() -> Result<(), JsValue> {
    crate::flow::run(ViewerConfig::default()).map_err(|e| JsValue::from_str(&format!("{:#}", e)))
}
