//! This module defines the `home` component, the demo page of the loader.
//!
//! It shows the default tuning next to the classic one, plus an instance
//! configured from the query string (`/?speed=300&color=%23ffef5c`), which is
//! read with the same attribute names a host element would carry.

use leptos::{
    html::{div, h2, p, section},
    prelude::*,
};
use leptos_meta::{Title, TitleProps};
use leptos_router::{hooks::use_query_map, params::ParamsMap};
use motion::{ATTRIBUTE_NAMES, LoaderConfig};

use crate::components::loader;

/// Builds a loader config from the recognised query parameters.
pub fn config_from_query(params: &ParamsMap) -> LoaderConfig {
    let pairs: Vec<(&str, String)> = ATTRIBUTE_NAMES
        .iter()
        .filter_map(|name| params.get(name).map(|value| (*name, value)))
        .collect();
    LoaderConfig::from_attributes(pairs.iter().map(|(name, value)| (*name, value.as_str())))
}

fn showcase(title: &'static str, caption: String, config: LoaderConfig) -> impl IntoView {
    section().class("flex flex-col gap-3 p-4 rounded-lg bg-card").child((
        h2().class("text-lg font-semibold").child(title),
        p().class("text-xs italic text-muted-foreground").child(caption),
        loader::component(config),
    ))
}

fn describe(config: &LoaderConfig) -> String {
    format!(
        "{} px/s, a marker at most every {} ms, {} ms fade",
        config.animator.mover_speed_px_per_sec,
        config.animator.min_marker_interval_millis,
        config.fade.lifetime_millis
    )
}

/// Renders the demo page.
pub fn component() -> impl IntoView {
    let query = use_query_map();

    div().class("flex flex-col gap-6").child((
        Title(TitleProps::builder().text("trail-loader").build()),
        showcase("Default", describe(&LoaderConfig::default()), LoaderConfig::default()),
        showcase("Classic", describe(&LoaderConfig::classic()), LoaderConfig::classic()),
        // Remount whenever the query string changes; a loader reads its config once.
        move || {
            let config = query.with(config_from_query);
            showcase("From query string", describe(&config), config)
        },
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_query_gives_default_config() {
        assert_eq!(config_from_query(&ParamsMap::new()), LoaderConfig::default());
    }

    #[test]
    fn query_parameters_configure_the_loader() {
        let mut params = ParamsMap::new();
        params.insert("speed", "300".to_owned());
        params.insert("color", "red".to_owned());
        params.insert("unrelated", "1".to_owned());

        let config = config_from_query(&params);
        assert_eq!(config.animator.mover_speed_px_per_sec, 300.0);
        assert_eq!(config.color, "red");
    }

    #[test]
    fn description_names_the_tuning() {
        let text = describe(&LoaderConfig::classic());
        assert_eq!(text, "100 px/s, a marker at most every 750 ms, 750 ms fade");
    }
}
