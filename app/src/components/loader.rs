//! This module defines the `loader` component: a dot sliding across its
//! container and leaving fading copies of itself behind.
//!
//! Timing lives in the `motion` crate. This component only measures the
//! container, feeds animation-frame timestamps into the state machine and
//! mirrors the results into signals.

use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

use leptos::{
    html::{Div, div, style},
    logging,
    prelude::*,
};
use motion::{
    AnimationStateMachine, FadeStyle, LoaderConfig, TrailHost, TrailMarker, TrailMarkers, drive,
};
use wasm_bindgen::{JsCast as _, closure::Closure};
use web_sys::ResizeObserver;

/// Name of the fade keyframes for a given fade tuning.
///
/// Percentages are encoded in tenths so fractional values stay valid CSS identifiers.
fn keyframes_name(fade: &FadeStyle) -> String {
    let fade = fade.sanitized();
    format!(
        "trail-fade-{}-{}",
        (fade.ramp_in_percent * 10.0).round() as u32,
        (fade.hold_percent * 10.0).round() as u32
    )
}

fn keyframes_css(fade: &FadeStyle) -> String {
    let fade = &fade.sanitized();
    format!(
        "@keyframes {name} {{ {ramp}% {{ opacity: 1; }} {hold}% {{ opacity: 1; }} 100% {{ opacity: 0; }} }}",
        name = keyframes_name(fade),
        ramp = fade.ramp_in_percent,
        hold = fade.hold_percent,
    )
}

fn container_style(config: &LoaderConfig) -> String {
    format!(
        "position: relative; overflow: hidden; background-color: transparent; width: {}; height: {}px;",
        config.width,
        config.dot_size_px()
    )
}

fn dot_style(config: &LoaderConfig) -> String {
    let size = config.dot_size_px();
    format!(
        "position: absolute; top: 0; left: 0; width: {size}px; height: {size}px; border-radius: 50%; background-color: {};",
        config.color
    )
}

fn marker_style(config: &LoaderConfig) -> String {
    let fade = config.fade.sanitized();
    format!(
        "{} opacity: {}; animation: {} {}ms linear forwards;",
        dot_style(config),
        fade.resting_opacity,
        keyframes_name(&fade),
        fade.lifetime_millis
    )
}

fn translate_x(pixel_offset: f64) -> String {
    format!("translateX({pixel_offset}px)")
}

/// Applies a fresh container measurement and reports whether it can animate.
fn apply_container_width(machine: &mut AnimationStateMachine, width: f64) -> bool {
    machine.set_container_width(width);
    let usable = width.is_finite() && width > 0.0;
    if !usable {
        logging::debug_warn!("Loader container has no width yet; waiting for it to be laid out");
    }
    usable
}

fn now_millis() -> f64 {
    window().performance().map_or(0.0, |performance| performance.now())
}

/// Keeps requesting animation frames until `running` is cleared.
fn run_frames<F>(mut on_frame: F, running: Arc<AtomicBool>)
where
    F: FnMut(f64) + 'static,
{
    request_animation_frame(move || {
        if !running.load(Ordering::Relaxed) {
            return;
        }
        on_frame(now_millis());
        run_frames(on_frame, running);
    });
}

/// Calls back whenever the observed element's box changes size.
struct ContainerObserver {
    observer: ResizeObserver,
    _on_resize: Closure<dyn FnMut()>,
}

impl ContainerObserver {
    fn watch(element: &web_sys::Element, on_resize: impl FnMut() + 'static) -> Option<Self> {
        let on_resize = Closure::<dyn FnMut()>::new(on_resize);
        let observer = ResizeObserver::new(on_resize.as_ref().unchecked_ref()).ok()?;
        observer.observe(element);
        Some(Self {
            observer,
            _on_resize: on_resize,
        })
    }

    fn disconnect(&self) {
        self.observer.disconnect();
    }
}

/// Mirrors tick results into the signals the view reads.
#[derive(Clone, Copy)]
struct SignalHost {
    mover_offset: RwSignal<f64>,
    trail: RwSignal<TrailMarkers>,
}

impl TrailHost for SignalHost {
    fn move_mover(&mut self, pixel_offset: f64) {
        self.mover_offset.set(pixel_offset);
    }

    fn spawn_marker(&mut self, pixel_offset: f64, now_millis: f64) {
        self.trail.update(|trail| {
            trail.spawn(pixel_offset, now_millis);
        });
    }
}

/// Renders a trail loading indicator for `config`.
///
/// The animation starts once the container is mounted and stops when the
/// component is cleaned up. Any change to the container's own size
/// re-measures it, including layout changes that leave the window alone.
pub fn component(mut config: LoaderConfig) -> impl IntoView {
    config.fade = config.fade.sanitized();

    let container = NodeRef::<Div>::new();
    let machine = StoredValue::new(AnimationStateMachine::new(config.animator));
    let observer = StoredValue::new_local(None::<ContainerObserver>);
    let host = SignalHost {
        mover_offset: RwSignal::new(0.0),
        trail: RwSignal::new(TrailMarkers::new(config.fade.lifetime_millis)),
    };

    Effect::new(move || {
        let Some(element) = container.get() else {
            return;
        };
        let width = element.get_bounding_client_rect().width();
        machine.update_value(|machine| {
            apply_container_width(machine, width);
        });

        let watch = ContainerObserver::watch(&element, move || {
            if let Some(element) = container.get_untracked() {
                let width = element.get_bounding_client_rect().width();
                machine.update_value(|machine| {
                    apply_container_width(machine, width);
                });
            }
        });
        if watch.is_none() {
            logging::warn!("ResizeObserver unavailable; loader keeps its first measured width");
        }
        observer.set_value(watch);

        let running = Arc::new(AtomicBool::new(true));
        run_frames(
            move |now| {
                let mut host = host;
                machine.update_value(|machine| {
                    drive(machine, &mut host, now);
                });
                host.trail.maybe_update(|trail| trail.expire(now) > 0);
            },
            Arc::clone(&running),
        );

        on_cleanup(move || {
            running.store(false, Ordering::Relaxed);
            observer.try_update_value(|watch| {
                if let Some(watch) = watch.take() {
                    watch.disconnect();
                }
            });
        });
    });

    let mover_style = dot_style(&config);
    let trail_marker_style = marker_style(&config);
    let mover_offset = host.mover_offset;
    let trail = host.trail;

    div()
        .node_ref(container)
        .class("trail-loader")
        .style(container_style(&config))
        .child((
            style().child(keyframes_css(&config.fade)),
            For(ForProps::builder()
                .each(move || trail.with(|trail| trail.markers().to_vec()))
                .key(|marker: &TrailMarker| marker.id)
                .children(move |marker: TrailMarker| {
                    div()
                        .class("trail-loader-marker")
                        .style(format!("{trail_marker_style} transform: {};", translate_x(marker.pixel_offset)))
                })
                .build()),
            div()
                .class("trail-loader-mover")
                .style(move || format!("{mover_style} transform: {};", translate_x(mover_offset.get()))),
        ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use motion::{AnimatorConfig, TickStatus};

    #[test]
    fn keyframes_follow_fade_tuning() {
        let css = keyframes_css(&FadeStyle::default());
        assert!(css.starts_with("@keyframes trail-fade-20-850 "));
        assert!(css.contains("2% { opacity: 1; }"));
        assert!(css.contains("85% { opacity: 1; }"));
        assert!(css.contains("100% { opacity: 0; }"));
    }

    #[test]
    fn classic_keyframes_get_their_own_name() {
        let classic = LoaderConfig::classic();
        assert_eq!(keyframes_name(&classic.fade), "trail-fade-20-900");
        assert_ne!(
            keyframes_name(&classic.fade),
            keyframes_name(&FadeStyle::default())
        );
    }

    #[test]
    fn fractional_percentages_stay_valid_identifiers() {
        let fade = FadeStyle {
            hold_percent: 87.5,
            ..FadeStyle::default()
        };
        assert_eq!(keyframes_name(&fade), "trail-fade-20-875");
    }

    #[test]
    fn container_uses_width_and_dot_height() {
        let config = LoaderConfig::from_attributes([("width", "240px"), ("heightInPixels", "16")]);
        let style = container_style(&config);
        assert!(style.contains("width: 240px;"));
        assert!(style.contains("height: 16px;"));
        assert!(style.contains("overflow: hidden;"));
    }

    #[test]
    fn markers_fade_once_over_their_lifetime() {
        let config = LoaderConfig::from_attributes([("color", "red"), ("fadeDuration", "900")]);
        let style = marker_style(&config);
        assert!(style.contains("background-color: red;"));
        assert!(style.contains("opacity: 0.25;"));
        assert!(style.contains("trail-fade-20-850 900ms linear forwards"));
    }

    #[test]
    fn json_fade_values_cannot_break_the_keyframes() {
        let fade = FadeStyle {
            ramp_in_percent: -3.0,
            hold_percent: f64::NAN,
            ..FadeStyle::default()
        };
        assert_eq!(keyframes_name(&fade), "trail-fade-0-850");
        let css = keyframes_css(&fade);
        assert!(css.contains("0% { opacity: 1; }"));
        assert!(css.contains("85% { opacity: 1; }"));

        let mut config = LoaderConfig::default();
        config.fade.lifetime_millis = -10.0;
        config.fade.resting_opacity = 4.0;
        let style = marker_style(&config);
        assert!(style.contains("opacity: 1;"));
        assert!(style.contains("750ms linear forwards"));
    }

    #[test]
    fn container_size_changes_reach_the_machine() {
        let mut machine = AnimationStateMachine::new(AnimatorConfig {
            mover_width_px: 20.0,
            ..AnimatorConfig::default()
        });

        assert!(!apply_container_width(&mut machine, 0.0));
        assert_eq!(machine.tick(50.0).status, TickStatus::Inactive);

        // A parent layout change: the element grows while the window stays put.
        assert!(apply_container_width(&mut machine, 200.0));
        let first = machine.tick(100.0);
        assert!(first.is_moving());
        assert!((first.position - 0.1).abs() < 1e-9);

        assert!(apply_container_width(&mut machine, 400.0));
        let second = machine.tick(200.0);
        assert!((second.position - 0.15).abs() < 1e-9);
        assert!((second.pixel_offset - 60.0).abs() < 1e-9);
    }

    #[test]
    fn collapsed_container_pauses_without_moving_the_dot() {
        let mut machine = AnimationStateMachine::new(AnimatorConfig::new(200.0, 20.0));
        let moving = machine.tick(100.0);

        assert!(!apply_container_width(&mut machine, 0.0));
        let paused = machine.tick(200.0);
        assert_eq!(paused.status, TickStatus::Inactive);
        assert_eq!(paused.position, moving.position);
    }

    #[test]
    fn translate_uses_pixels() {
        assert_eq!(translate_x(-20.0), "translateX(-20px)");
        assert_eq!(translate_x(144.5), "translateX(144.5px)");
    }
}
