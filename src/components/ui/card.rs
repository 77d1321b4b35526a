use leptos::prelude::*;
use leptos_ui::clx;

mod components {
    use super::*;
    clx! {Card, div, "bg-card text-card-foreground flex flex-col gap-3 rounded-xl border py-4 shadow-sm"}
    clx! {CardHeader, div, "flex w-full flex-row items-center justify-between px-4"}
    clx! {CardTitle, h2, "text-lg font-semibold leading-none"}
    clx! {CardContent, div, "space-y-3 px-4"}

    clx! {CardList, ul, "flex flex-col gap-1"}
    clx! {CardItem, li, "flex items-center [&_svg:not([class*='size-'])]:size-4 [&_svg]:shrink-0"}
}

#[allow(unused_imports)]
pub use components::*;
