use leptos::prelude::*;
use tw_merge::tw_merge;

#[component]
pub fn Label(#[prop(optional, into)] class: String, children: Children) -> impl IntoView {
    let class = tw_merge!(
        "flex select-none items-center gap-2 text-sm font-medium leading-none peer-disabled:cursor-not-allowed peer-disabled:opacity-50",
        class
    );

    view! { <label class=class>{children()}</label> }
}
