use leptos::prelude::*;
use leptos::html::ElementType;
use leptos::wasm_bindgen::JsCast;
use web_sys::Element;

/// Returns the vertical distance between the top of a container and the center of an anchor
pub fn get_anchor_center_offset(
    container_top: f64,
    anchor_top: f64,
    anchor_height: f64,
) -> f64 {
    anchor_top - container_top + anchor_height / 2.0
}

/// Measures, for each anchor id, the offset of the anchor's center relative to the top of `container_ref`.
/// Anchors that are not in the document are measured as 0.
/// Returns None if the container is not mounted.
pub fn get_anchor_offsets<NR>(
    container_ref: NodeRef<NR>,
    anchor_ids: &[String],
) -> Option<Vec<f64>>
where
    NR: ElementType,
    NR::Output: Clone + AsRef<Element> + JsCast + 'static,
{
    let container = container_ref.get_untracked()?;
    let container_top = container.as_ref().get_bounding_client_rect().top();
    let document = document();
    let offsets = anchor_ids.iter().map(|anchor_id| match document.get_element_by_id(anchor_id) {
        Some(anchor) => {
            let rect = anchor.get_bounding_client_rect();
            get_anchor_center_offset(container_top, rect.top(), rect.height())
        },
        None => {
            log::trace!("Anchor {anchor_id} is not mounted, use offset 0.");
            0.0
        },
    }).collect();
    Some(offsets)
}
