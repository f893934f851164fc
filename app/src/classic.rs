//! The `/classic` page: the fixed-constant loader on its own, full width.

use leptos::{html::div, prelude::*};
use leptos_meta::{Title, TitleProps};
use motion::LoaderConfig;

use crate::components::loader;

pub fn component() -> impl IntoView {
    div().class("flex flex-col gap-4").child((
        Title(TitleProps::builder().text("trail-loader \u{2013} classic").build()),
        loader::component(LoaderConfig::classic()),
    ))
}
