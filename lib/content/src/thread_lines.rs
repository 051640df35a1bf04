use leptos::prelude::*;

use agora_core::geometry::ConnectorGeometry;
use agora_utils::colors::ThreadColor;
use agora_utils::icons::{CollapseIcon, ExpandIcon};

fn px(value: f64) -> String {
    format!("{value}px")
}

/// Lines linking the anchor of a comment to the anchors of its replies, with the button collapsing the replies
#[component]
pub fn ThreadLines(
    #[prop(into)]
    geometry: Signal<ConnectorGeometry>,
    #[prop(into)]
    is_collapsed: Signal<bool>,
    depth: usize,
    on_toggle: Callback<()>,
) -> impl IntoView {
    let line_class = format!(
        "absolute left-0 w-[3px] cursor-pointer pointer-events-auto transition-all {}",
        ThreadColor::from_depth(depth).to_bg_class(),
    );
    let curve_class = format!(
        "absolute left-0 w-7 h-10 border-l-[3px] border-b-[3px] rounded-bl-[12px] transition-all {}",
        ThreadColor::from_depth(depth).to_border_class(),
    );
    let toggle_class = format!(
        "absolute -left-[12px] w-6 h-6 rounded-full border bg-base-100 hover:bg-base-200 flex items-center justify-center \
        shadow-sm hover:shadow-md z-30 pointer-events-auto transition-all duration-200 {}",
        ThreadColor::from_depth(depth + 1).to_border_class(),
    );
    let curve_tops = move || geometry.with(|geometry| geometry.curve_tops.iter().copied().enumerate().collect::<Vec<(usize, f64)>>());

    view! {
        <div
            class="absolute left-4 pointer-events-none"
            style:top=move || px(geometry.with(|geometry| geometry.overlay_top))
        >
            <div
                class=line_class
                style:top=move || px(geometry.with(|geometry| geometry.line_top))
                style:height=move || px(geometry.with(|geometry| geometry.line_height))
                on:click=move |_| on_toggle.run(())
            />
            <For
                each=curve_tops
                key=|(index, top)| (*index, top.to_bits())
                children=move |(_, top)| view! {
                    <div class=curve_class.clone() style:top=px(top)/>
                }
            />
            <button
                class=toggle_class
                style:top=move || px(geometry.with(|geometry| geometry.toggle_top))
                aria-expanded=move || (!is_collapsed.get()).to_string()
                on:click=move |_| on_toggle.run(())
            >
            {
                move || match is_collapsed.get() {
                    true => view! { <ExpandIcon/> }.into_any(),
                    false => view! { <CollapseIcon/> }.into_any(),
                }
            }
            </button>
        </div>
    }.into_any()
}

#[cfg(test)]
mod tests {
    use crate::thread_lines::px;

    #[test]
    fn test_px() {
        assert_eq!(px(0.0), "0px");
        assert_eq!(px(24.0), "24px");
        assert_eq!(px(-85.5), "-85.5px");
    }
}
