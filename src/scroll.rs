use crate::config::{scroll_spec_from, StyleBinding};
use crate::dom;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

const SCROLL_STYLED_SELECTOR: &str =
    "[data-scroll-preset], [data-scroll-y], [data-scroll-opacity]";

struct StyledElement {
    style: StyleBinding,
    element: web::HtmlElement,
    target: Option<web::Element>,
}

impl StyledElement {
    fn apply(&mut self, viewport_height: f32) {
        let geometry = self.target.as_ref().map(dom::element_geometry);
        self.style.binding.update(geometry, viewport_height);
        let (transform, opacity) = self.style.css();
        let css = self.element.style();
        if let Some(t) = transform {
            _ = css.set_property("transform", &t);
        }
        if let Some(o) = opacity {
            _ = css.set_property("opacity", &o);
        }
    }
}

fn resolve_target(
    document: &web::Document,
    element: &web::HtmlElement,
    target_id: Option<&str>,
) -> Option<web::Element> {
    if let Some(id) = target_id {
        return document.get_element_by_id(id);
    }
    // Start above the styled element: its own transform must not move the
    // rect it is measured against.
    let parent = element.parent_element()?;
    parent.closest("section").ok().flatten().or(Some(parent))
}

fn collect_styled(document: &web::Document) -> Vec<StyledElement> {
    let nodes = match document.query_selector_all(SCROLL_STYLED_SELECTOR) {
        Ok(n) => n,
        Err(e) => {
            log::warn!("[scroll] selector failed: {:?}", e);
            return Vec::new();
        }
    };
    let mut styled = Vec::with_capacity(nodes.length() as usize);
    for i in 0..nodes.length() {
        let Some(element) = nodes
            .item(i)
            .and_then(|n| n.dyn_into::<web::Element>().ok())
            .and_then(dom::html_element)
        else {
            continue;
        };
        let spec = match scroll_spec_from(|k| dom::data_attr(&element, k)) {
            Ok(Some(spec)) => spec,
            Ok(None) => continue,
            Err(e) => {
                log::warn!("[scroll] ignoring element #{}: {e}", element.id());
                continue;
            }
        };
        let own_id = element.id();
        let observed = spec.observed_id(&own_id);
        if observed.is_none() && spec.target.is_some() {
            log::warn!("[scroll] #{own_id} cannot observe itself, using its section");
        }
        let target = resolve_target(document, &element, observed);
        let label = spec
            .target
            .clone()
            .unwrap_or_else(|| format!("scroll-{i}"));
        styled.push(StyledElement {
            style: StyleBinding::new(label, &spec),
            element,
            target,
        });
    }
    styled
}

/// Scroll and resize listeners driving every styled element. Independent of
/// the frame loop: these only ever write CSS on the styled elements.
pub struct ScrollWiring {
    elements: Rc<RefCell<Vec<StyledElement>>>,
    listener: Option<Closure<dyn FnMut()>>,
}

impl ScrollWiring {
    pub fn attach(document: &web::Document) -> Self {
        let elements = Rc::new(RefCell::new(collect_styled(document)));
        log::info!("[scroll] tracking {} styled elements", elements.borrow().len());

        let elements_cb = elements.clone();
        let listener = Closure::wrap(Box::new(move || {
            let vh = dom::viewport_height();
            if let Ok(mut els) = elements_cb.try_borrow_mut() {
                for el in els.iter_mut() {
                    el.apply(vh);
                }
            }
        }) as Box<dyn FnMut()>);
        if let Some(w) = web::window() {
            dom::add_listener(&w, "scroll", listener.as_ref().unchecked_ref());
            dom::add_listener(&w, "resize", listener.as_ref().unchecked_ref());
        }

        let wiring = Self {
            elements,
            listener: Some(listener),
        };
        wiring.refresh();
        wiring
    }

    /// Re-apply all styles for the current layout.
    pub fn refresh(&self) {
        let vh = dom::viewport_height();
        for el in self.elements.borrow_mut().iter_mut() {
            el.apply(vh);
        }
    }

    pub fn progress(&self) -> Vec<f32> {
        self.elements
            .borrow()
            .iter()
            .map(|e| e.style.binding.tracker.progress())
            .collect()
    }

    pub fn release(&mut self) {
        if let Some(listener) = self.listener.take() {
            if let Some(w) = web::window() {
                dom::remove_listener(&w, "scroll", listener.as_ref().unchecked_ref());
                dom::remove_listener(&w, "resize", listener.as_ref().unchecked_ref());
            }
        }
        self.elements.borrow_mut().clear();
    }
}
