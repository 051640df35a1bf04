use leptos::prelude::*;

#[component]
pub fn AuthErrorIcon(#[prop(default = "h-28 w-28")] class: &'static str) -> impl IntoView {
    view! {
        <img src="/svg/errors/alien.svg" class=class/>
    }
}

#[component]
pub fn ClockIcon(#[prop(default = "content-toolbar-icon-size")] class: &'static str) -> impl IntoView {
    view! {
        <img src="/svg/toolbar/clock.svg" class=class/>
    }
}

#[component]
pub fn CollapseIcon(#[prop(default = "h-3 w-3")] class: &'static str) -> impl IntoView {
    view! {
        <img src="/svg/minus.svg" class=class/>
    }
}

#[component]
pub fn DotMenuIcon(#[prop(default = "content-toolbar-icon-size")] class: &'static str) -> impl IntoView {
    view! {
        <img src="/svg/dot_menu.svg" class=class/>
    }
}

#[component]
pub fn ExpandIcon(#[prop(default = "h-3 w-3")] class: &'static str) -> impl IntoView {
    view! {
        <img src="/svg/plus.svg" class=class/>
    }
}

#[component]
pub fn HeartIcon(
    #[prop(into)]
    is_filled: Signal<bool>,
    #[prop(default = "content-toolbar-icon-size")]
    class: &'static str,
) -> impl IntoView {
    let src = move || match is_filled.get() {
        true => "/svg/toolbar/heart_filled.svg",
        false => "/svg/toolbar/heart.svg",
    };
    view! {
        <img src=src class=class/>
    }
}

#[component]
pub fn InternalErrorIcon(#[prop(default = "h-28 w-28")] class: &'static str) -> impl IntoView {
    view! {
        <img src="/svg/errors/landing_space_capsule.svg" class=class/>
    }
}

#[component]
pub fn InvalidRequestIcon(#[prop(default = "h-28 w-28")] class: &'static str) -> impl IntoView {
    view! {
        <img src="/svg/errors/chewbacca.svg" class=class/>
    }
}

#[component]
pub fn LoadingIcon(#[prop(default = "h-7 w-7 my-5")] class: &'static str) -> impl IntoView {
    view! {
        <div class="w-full flex items-center justify-center">
            <img src="/svg/loading.svg" class=class/>
        </div>
    }
}

#[component]
pub fn NetworkErrorIcon(#[prop(default = "h-28 w-28")] class: &'static str) -> impl IntoView {
    view! {
        <img src="/svg/errors/satellite.svg" class=class/>
    }
}

#[component]
pub fn NotFoundIcon(#[prop(default = "h-28 w-28")] class: &'static str) -> impl IntoView {
    view! {
        <img src="/svg/errors/man_on_the_moon.svg" class=class/>
    }
}

#[component]
pub fn ReplyIcon(#[prop(default = "content-toolbar-icon-size")] class: &'static str) -> impl IntoView {
    view! {
        <img src="/svg/toolbar/comment.svg" class=class/>
    }
}
