use leptos::html;
use leptos::prelude::*;
use leptos_use::{breakpoints_tailwind, use_breakpoints};
use leptos_use::BreakpointsTailwind::Xxl;

use crate::constants::{
    SECONDS_IN_DAY, SECONDS_IN_HOUR, SECONDS_IN_MINUTE, SECONDS_IN_MONTH, SECONDS_IN_YEAR,
};
use crate::icons::{ClockIcon, DotMenuIcon};

enum TimeScale {
    Seconds,
    Minutes,
    Hours,
    Days,
    Months,
    Years,
}

impl TimeScale {
    pub fn to_str(&self, is_plural: bool, use_fullname: bool) -> &'static str {
        match (use_fullname, self) {
            (false, TimeScale::Seconds) => "s",
            (false, TimeScale::Minutes) => "m",
            (false, TimeScale::Hours) => "h",
            (false, TimeScale::Days) => "d",
            (false, TimeScale::Months) => "mo",
            (false, TimeScale::Years) => "y",
            (true, TimeScale::Seconds) => if is_plural { "seconds" } else { "second" },
            (true, TimeScale::Minutes) => if is_plural { "minutes" } else { "minute" },
            (true, TimeScale::Hours) => if is_plural { "hours" } else { "hour" },
            (true, TimeScale::Days) => if is_plural { "days" } else { "day" },
            (true, TimeScale::Months) => if is_plural { "months" } else { "month" },
            (true, TimeScale::Years) => if is_plural { "years" } else { "year" },
        }
    }
}

/// Component that displays its children in a modal dialog
#[component]
pub fn ModalDialog(
    #[prop(default = "")]
    class: &'static str,
    show_dialog: RwSignal<bool>,
    children: ChildrenFn,
    #[prop(optional)]
    modal_ref: NodeRef<html::Div>,
) -> impl IntoView {
    let dialog_class =
        move || format!("relative transform overflow-visible rounded-sm transition-all {class}");
    view! {
        <Show when=show_dialog>
            <div
                class="relative z-20"
                aria-labelledby="modal-title"
                role="dialog"
                aria-modal="true"
            >
                <div class="fixed inset-0 bg-base-200/75 transition-opacity"></div>
                <div class="fixed inset-0 z-20 w-screen overflow-auto">
                    <div class="flex min-h-full justify-center items-center">
                        <div class=dialog_class node_ref=modal_ref>
                            {children()}
                        </div>
                    </div>
                </div>
            </div>
        </Show>
    }
}

/// Overflow menu button. Entries are passed as children and displayed when the button is toggled.
#[component]
pub fn DotMenu(
    #[prop(optional)]
    children: Option<ChildrenFn>,
) -> impl IntoView {
    let show_menu = RwSignal::new(false);
    let button_class = move || match show_menu.get() {
        true => "flex items-center hover:text-gray-700 dark:hover:text-gray-300 transition-colors text-primary",
        false => "flex items-center hover:text-gray-700 dark:hover:text-gray-300 transition-colors",
    };
    let has_entries = children.is_some();
    let children = StoredValue::new(children);

    view! {
        <div class="relative">
            <button
                class=button_class
                aria-haspopup="menu"
                aria-expanded=move || show_menu.get().to_string()
                on:click=move |_| show_menu.update(|value| *value = !*value)
            >
                <DotMenuIcon/>
            </button>
            <Show when=move || show_menu.get() && has_entries>
                <div class="absolute z-30 bg-base-200 shadow-sm rounded-sm mt-1 p-1 flex flex-col gap-1">
                {
                    children.with_value(|children| children.as_ref().map(|children| children()))
                }
                </div>
            </Show>
        </div>
    }.into_any()
}

/// Component to display the time elapsed since a post or comment was created
#[component]
pub fn TimeSinceWidget(
    #[prop(into)]
    timestamp: Signal<chrono::DateTime<chrono::Utc>>
) -> impl IntoView {
    let use_fullname = use_breakpoints(breakpoints_tailwind()).ge(Xxl);
    view! {
        <div class="flex gap-1.5 items-center text-xs px-1 text-gray-500 dark:text-gray-400">
            <ClockIcon/>
            {
                move || get_elapsed_time_string(timestamp.get(), use_fullname.get())
            }
        </div>
    }.into_any()
}

pub fn get_elapsed_time_string(
    timestamp: chrono::DateTime<chrono::Utc>,
    use_fullname: bool,
) -> String {
    get_elapsed_time_string_at(timestamp, chrono::Utc::now(), use_fullname)
}

fn get_elapsed_time_string_at(
    timestamp: chrono::DateTime<chrono::Utc>,
    now: chrono::DateTime<chrono::Utc>,
    use_fullname: bool,
) -> String {
    // timestamps slightly in the future happen with client clock skew
    let seconds = now.signed_duration_since(timestamp).num_seconds().max(0);
    match seconds {
        seconds if seconds < SECONDS_IN_MINUTE => format!("{} {}", seconds, TimeScale::Seconds.to_str(seconds > 1, use_fullname)),
        seconds if seconds < SECONDS_IN_HOUR => {
            let minutes = seconds / SECONDS_IN_MINUTE;
            format!("{} {}", minutes, TimeScale::Minutes.to_str(minutes > 1, use_fullname))
        }
        seconds if seconds < SECONDS_IN_DAY => {
            let hours = seconds / SECONDS_IN_HOUR;
            format!("{} {}", hours, TimeScale::Hours.to_str(hours > 1, use_fullname))
        }
        seconds if seconds < SECONDS_IN_MONTH => {
            let days = seconds / SECONDS_IN_DAY;
            format!("{} {}", days, TimeScale::Days.to_str(days > 1, use_fullname))
        }
        seconds if seconds < SECONDS_IN_YEAR => {
            let months = seconds / SECONDS_IN_MONTH;
            format!("{} {}", months, TimeScale::Months.to_str(months > 1, use_fullname))
        }
        _ => {
            let years = seconds / SECONDS_IN_YEAR;
            format!("{} {}", years, TimeScale::Years.to_str(years > 1, use_fullname))
        }
    }
}
