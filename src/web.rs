//! Browser host: binds the preview to the live admin page.

use std::cell::RefCell;
use std::rc::Rc;

use futures::future::LocalBoxFuture;
use reqwest::Url;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{
    Document, DocumentReadyState, Element, Event, HtmlElement, HtmlInputElement,
    HtmlSelectElement, HtmlTextAreaElement,
};

use crate::dom::Dom;
use crate::preview::{HttpTransport, PreviewSynchronizer, PreviewTransport, locate_form};

/// Selector for the field-row container in the admin change form.
const ROW_SELECTOR: &str = ".form-row";

/// [`Dom`] over the browser document.
pub struct WebDom {
    document: Document,
}

impl WebDom {
    pub fn new(document: Document) -> Self {
        Self { document }
    }
}

impl Dom for WebDom {
    type Element = Element;

    fn element_by_id(&self, id: &str) -> Option<Element> {
        self.document.get_element_by_id(id)
    }

    fn elements_by_name(&self, name: &str) -> Vec<Element> {
        let Ok(nodes) = self.document.query_selector_all(&format!("[name=\"{name}\"]")) else {
            return Vec::new();
        };
        (0..nodes.length())
            .filter_map(|i| nodes.item(i))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .collect()
    }

    fn value(&self, element: &Element) -> String {
        if let Some(input) = element.dyn_ref::<HtmlInputElement>() {
            input.value()
        } else if let Some(select) = element.dyn_ref::<HtmlSelectElement>() {
            select.value()
        } else if let Some(area) = element.dyn_ref::<HtmlTextAreaElement>() {
            area.value()
        } else {
            String::new()
        }
    }

    fn set_value(&mut self, element: &Element, value: &str) {
        if let Some(input) = element.dyn_ref::<HtmlInputElement>() {
            input.set_value(value);
        } else if let Some(select) = element.dyn_ref::<HtmlSelectElement>() {
            select.set_value(value);
        } else if let Some(area) = element.dyn_ref::<HtmlTextAreaElement>() {
            area.set_value(value);
        }
    }

    fn is_checked(&self, element: &Element) -> bool {
        element
            .dyn_ref::<HtmlInputElement>()
            .is_some_and(HtmlInputElement::checked)
    }

    fn set_checked(&mut self, element: &Element, checked: bool) {
        if let Some(input) = element.dyn_ref::<HtmlInputElement>() {
            input.set_checked(checked);
        }
    }

    fn closest_row(&self, element: &Element) -> Option<Element> {
        element.closest(ROW_SELECTOR).ok().flatten()
    }

    fn set_displayed(&mut self, element: &Element, displayed: bool) {
        let Some(html) = element.dyn_ref::<HtmlElement>() else {
            return;
        };
        let style = html.style();
        let result = if displayed {
            style.remove_property("display").map(drop)
        } else {
            style.set_property("display", "none")
        };
        if result.is_err() {
            tracing::debug!(displayed, "could not change row display");
        }
    }

    fn is_form(&self, element: &Element) -> bool {
        element.tag_name().eq_ignore_ascii_case("form")
    }

    fn closest_form(&self, element: &Element) -> Option<Element> {
        element.closest("form").ok().flatten()
    }

    fn form_within(&self, container_id: &str) -> Option<Element> {
        self.document
            .get_element_by_id(container_id)?
            .query_selector("form")
            .ok()
            .flatten()
    }

    fn location_path(&self) -> String {
        self.document
            .location()
            .and_then(|location| location.pathname().ok())
            .unwrap_or_default()
    }
}

struct Page<T> {
    dom: RefCell<WebDom>,
    sync: RefCell<PreviewSynchronizer<T>>,
}

impl<T: PreviewTransport + 'static> Page<T> {
    /// Runs the synchronous part of a pass. The returned future applies the
    /// outcome once the response lands.
    fn pass(self: &Rc<Self>) -> Option<LocalBoxFuture<'static, ()>> {
        let pending = {
            let mut dom = self.dom.borrow_mut();
            self.sync.borrow_mut().begin_pass(&mut *dom)
        }?;
        let page = Rc::clone(self);
        Some(Box::pin(async move {
            let outcome = pending.resolve().await;
            outcome.apply(&mut *page.dom.borrow_mut());
        }))
    }

    fn refresh(self: &Rc<Self>) {
        if let Some(work) = self.pass() {
            wasm_bindgen_futures::spawn_local(work);
        }
    }
}

/// Module entry point; binds once the document has been parsed.
#[cfg_attr(coverage_nightly, coverage(off))]
#[wasm_bindgen(start)]
pub fn start() {
    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        return;
    };
    let target = document.clone();
    when_parsed(&target, target.ready_state(), move || bind(document));
}

/// Runs `ready` now, or on `DOMContentLoaded` while `state` is still loading.
fn when_parsed(
    document: &Document,
    state: DocumentReadyState,
    ready: impl FnOnce() + 'static,
) {
    if state != DocumentReadyState::Loading {
        ready();
        return;
    }
    let on_ready = Closure::once_into_js(ready);
    if document
        .add_event_listener_with_callback("DOMContentLoaded", on_ready.unchecked_ref())
        .is_err()
    {
        tracing::warn!("could not wait for DOMContentLoaded");
    }
}

#[cfg_attr(coverage_nightly, coverage(off))]
fn bind(document: Document) {
    let dom = WebDom::new(document);
    let Some(form) = locate_form(&dom) else {
        return;
    };
    let origin = web_sys::window()
        .and_then(|w| w.location().origin().ok())
        .and_then(|origin| Url::parse(&origin).ok());
    let Some(origin) = origin else {
        tracing::warn!("page origin unavailable, preview disabled");
        return;
    };
    attach(dom, &form, HttpTransport::new(origin)).refresh();
}

/// Starts a pass on every `input` and `change` event inside `form`.
fn attach<T: PreviewTransport + 'static>(
    dom: WebDom,
    form: &Element,
    transport: T,
) -> Rc<Page<T>> {
    let page = Rc::new(Page {
        dom: RefCell::new(dom),
        sync: RefCell::new(PreviewSynchronizer::new(transport)),
    });
    let handler = {
        let page = Rc::clone(&page);
        Closure::<dyn FnMut(Event)>::new(move |_event: Event| page.refresh())
    };
    for event in ["input", "change"] {
        if form
            .add_event_listener_with_callback(event, handler.as_ref().unchecked_ref())
            .is_err()
        {
            tracing::warn!(event, "could not listen for form events");
        }
    }
    handler.forget();
    page
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use std::cell::Cell;

    use wasm_bindgen_futures::JsFuture;
    use wasm_bindgen_test::*;
    use web_sys::EventInit;

    use super::*;
    use crate::model::{CSRF_FIELD_NAME, DIVIDER_FIELD_NAME, Field};
    use crate::preview::{PreviewRequest, TransportFuture, preview_path};
    use crate::random_key::KEY_LENGTH;

    wasm_bindgen_test_configure!(run_in_browser);

    const FORM_PAGE: &str = r#"
        <div id="content-main">
          <form id="obfuscation">
            <input type="hidden" name="csrfmiddlewaretoken" value="tok3n">
            <div class="form-row"><input id="id_group" name="group" value="12"></div>
            <div class="form-row"><input type="checkbox" id="id_use_random_key" name="use_random_key"></div>
            <div class="form-row"><input id="id_random_key" name="random_key" value="stale"></div>
            <div class="form-row"><div class="checkbox-row">
              <input type="checkbox" id="id_random_key_rotate_name" name="random_key_rotate_name" checked>
            </div></div>
            <div class="form-row"><input type="checkbox" id="id_random_key_rotate_position" name="random_key_rotate_position"></div>
            <div class="form-row"><select id="id_obfuscation_type" name="obfuscation_type">
              <option value="sha256_hex">SHA-256 + hex</option>
              <option value="sha256_base32" selected>SHA-256 + base32</option>
            </select></div>
            <div class="form-row"><textarea id="id_obfuscation_format" name="obfuscation_format">{name}</textarea></div>
            <div class="form-row">
              <input type="checkbox" name="divider_characters" value="┃" checked>
              <input type="checkbox" name="divider_characters" value="┇">
              <input type="checkbox" name="divider_characters" value="➖" checked>
            </div>
            <div class="form-row"><input id="id_preview" name="preview" readonly></div>
          </form>
        </div>
    "#;

    /// Replies with the group it was sent and keeps every request.
    #[derive(Clone, Default)]
    struct RecordingTransport {
        requests: Rc<RefCell<Vec<PreviewRequest>>>,
    }

    impl PreviewTransport for RecordingTransport {
        fn send(&self, request: PreviewRequest) -> TransportFuture {
            let group = request.body.get("group").unwrap_or_default().to_string();
            self.requests.borrow_mut().push(request);
            let body = serde_json::json!({ "preview": format!("{group}┃role") }).to_string();
            Box::pin(async move { Ok(body) })
        }
    }

    fn load(html: &str) -> WebDom {
        let document = web_sys::window().and_then(|w| w.document()).unwrap();
        document.body().unwrap().set_inner_html(html);
        WebDom::new(document)
    }

    fn field(dom: &WebDom, field: Field) -> Element {
        dom.element_by_id(field.element_id()).unwrap()
    }

    fn display_of(element: &Element) -> String {
        element
            .dyn_ref::<HtmlElement>()
            .unwrap()
            .style()
            .get_property_value("display")
            .unwrap()
    }

    /// Lets spawned passes run to completion.
    async fn settle() {
        for _ in 0..10 {
            JsFuture::from(js_sys::Promise::resolve(&JsValue::NULL))
                .await
                .unwrap();
        }
    }

    #[wasm_bindgen_test]
    fn closest_row_is_the_form_row_wrapper() {
        let dom = load(FORM_PAGE);
        let toggle = field(&dom, Field::RandomKeyRotateName);

        let row = dom.closest_row(&toggle).unwrap();
        assert_eq!(row.class_name(), "form-row");
        assert!(row.contains(Some(toggle.as_ref())));

        let csrf = dom.elements_by_name(CSRF_FIELD_NAME).remove(0);
        assert!(dom.closest_row(&csrf).is_none());
    }

    #[wasm_bindgen_test]
    fn set_displayed_sets_and_removes_inline_display() {
        let mut dom = load(FORM_PAGE);
        let row = dom.closest_row(&field(&dom, Field::RandomKeyRotatePosition)).unwrap();

        dom.set_displayed(&row, false);
        assert_eq!(display_of(&row), "none");
        dom.set_displayed(&row, true);
        assert_eq!(display_of(&row), "");
    }

    #[wasm_bindgen_test]
    fn elements_by_name_keeps_document_order() {
        let dom = load(FORM_PAGE);
        let values: Vec<String> = dom
            .elements_by_name(DIVIDER_FIELD_NAME)
            .iter()
            .map(|el| dom.value(el))
            .collect();
        assert_eq!(values, vec!["┃", "┇", "➖"]);
        assert!(dom.elements_by_name("no_such_field").is_empty());
    }

    #[wasm_bindgen_test]
    fn select_and_textarea_values() {
        let mut dom = load(FORM_PAGE);
        let select = field(&dom, Field::ObfuscationType);
        let area = field(&dom, Field::ObfuscationFormat);
        assert_eq!(dom.value(&select), "sha256_base32");
        assert_eq!(dom.value(&area), "{name}");

        dom.set_value(&select, "sha256_hex");
        dom.set_value(&area, "{name}-{hash}");
        assert_eq!(dom.value(&select), "sha256_hex");
        assert_eq!(dom.value(&area), "{name}-{hash}");

        let row = dom.closest_row(&select).unwrap();
        assert_eq!(dom.value(&row), "");
        assert!(!dom.is_checked(&select));
    }

    #[wasm_bindgen_test]
    fn checkbox_state_round_trips() {
        let mut dom = load(FORM_PAGE);
        let toggle = field(&dom, Field::UseRandomKey);
        assert!(!dom.is_checked(&toggle));
        dom.set_checked(&toggle, true);
        assert!(dom.is_checked(&toggle));
    }

    #[wasm_bindgen_test]
    fn binds_group_form_then_content_main_form() {
        let dom = load(FORM_PAGE);
        let form = locate_form(&dom).unwrap();
        assert!(dom.is_form(&form));
        assert_eq!(form.id(), "obfuscation");

        let dom = load(r#"<div id="content-main"><form id="other"><input name="x"></form></div>"#);
        assert_eq!(locate_form(&dom).unwrap().id(), "other");

        let dom = load(r#"<form id="stray"><input name="x"></form>"#);
        assert!(locate_form(&dom).is_none());
    }

    #[wasm_bindgen_test]
    async fn refresh_writes_preview_and_hides_rotation_rows() {
        let dom = load(FORM_PAGE);
        let form = locate_form(&dom).unwrap();
        let transport = RecordingTransport::default();
        let page = attach(dom, &form, transport.clone());

        page.pass().unwrap().await;

        let dom = page.dom.borrow();
        assert_eq!(dom.value(&field(&dom, Field::Preview)), "12┃role");
        assert_eq!(dom.value(&field(&dom, Field::RandomKey)), "");
        assert!(!dom.is_checked(&field(&dom, Field::RandomKeyRotateName)));
        let row = dom.closest_row(&field(&dom, Field::RandomKeyRotateName)).unwrap();
        assert_eq!(display_of(&row), "none");

        let requests = transport.requests.borrow();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].csrf_token, "tok3n");
        assert_eq!(requests[0].path, preview_path(&dom.location_path()));
        assert_eq!(requests[0].body.get_all(DIVIDER_FIELD_NAME), vec!["┃", "➖"]);
    }

    #[wasm_bindgen_test]
    async fn input_events_inside_the_form_start_a_pass() {
        let dom = load(FORM_PAGE);
        let form = locate_form(&dom).unwrap();
        let group = field(&dom, Field::Group);
        let toggle = field(&dom, Field::UseRandomKey);
        let transport = RecordingTransport::default();
        let page = attach(dom, &form, transport.clone());

        group.dyn_ref::<HtmlInputElement>().unwrap().set_value("77");
        let init = EventInit::new();
        init.set_bubbles(true);
        let input = Event::new_with_event_init_dict("input", &init).unwrap();
        group.dispatch_event(&input).unwrap();
        settle().await;

        assert_eq!(transport.requests.borrow().len(), 1);
        let preview = field(&page.dom.borrow(), Field::Preview);
        assert_eq!(page.dom.borrow().value(&preview), "77┃role");

        toggle.dyn_ref::<HtmlInputElement>().unwrap().set_checked(true);
        let change = Event::new_with_event_init_dict("change", &init).unwrap();
        toggle.dispatch_event(&change).unwrap();
        settle().await;

        assert_eq!(transport.requests.borrow().len(), 2);
        let dom = page.dom.borrow();
        assert_eq!(dom.value(&field(&dom, Field::RandomKey)).chars().count(), KEY_LENGTH);
        let row = dom.closest_row(&field(&dom, Field::RandomKeyRotateName)).unwrap();
        assert_eq!(display_of(&row), "");
    }

    #[wasm_bindgen_test]
    fn parsed_document_binds_immediately() {
        let document = web_sys::window().and_then(|w| w.document()).unwrap();
        let ran = Rc::new(Cell::new(false));
        let flag = Rc::clone(&ran);
        when_parsed(&document, DocumentReadyState::Complete, move || flag.set(true));
        assert!(ran.get());
    }

    #[wasm_bindgen_test]
    fn loading_document_waits_for_dom_content_loaded() {
        let document = web_sys::window().and_then(|w| w.document()).unwrap();
        let ran = Rc::new(Cell::new(false));
        let flag = Rc::clone(&ran);
        when_parsed(&document, DocumentReadyState::Loading, move || flag.set(true));
        assert!(!ran.get());

        document
            .dispatch_event(&Event::new("DOMContentLoaded").unwrap())
            .unwrap();
        assert!(ran.get());
    }
}
