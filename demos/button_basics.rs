//! Button Basics
//!
//! Scripted pointer session against a single button widget.
//!
//! Key concepts:
//! - Building a widget with color and transform features attached
//! - Pointer translation (enter/down/up/exit) and flag-derived fallback
//! - Awaiting `settle` so every feature response has fanned back in
//!
//! Run with: cargo run --example button_basics

use petal_ui::config::{ColorSetting, Rgba, StateSettings, TransformSetting, Vec3, WidgetTransform};
use petal_ui::core::InteractionState;
use petal_ui::features::{ColorFeature, Target, TransformFeature};
use petal_ui::widget::WidgetBuilder;
use std::time::Duration;

fn color_settings() -> StateSettings<ColorSetting> {
    let fade = Duration::from_millis(80);
    StateSettings::new()
        .with(
            InteractionState::Show,
            ColorSetting {
                color: Rgba::WHITE,
                duration: fade,
            },
        )
        .with(
            InteractionState::Default,
            ColorSetting {
                color: Rgba::WHITE,
                duration: fade,
            },
        )
        .with(
            InteractionState::Hover,
            ColorSetting {
                color: Rgba::new(0.75, 0.85, 1.0, 1.0),
                duration: fade,
            },
        )
        .with(
            InteractionState::Press,
            ColorSetting {
                color: Rgba::new(0.45, 0.55, 0.9, 1.0),
                duration: Duration::from_millis(40),
            },
        )
}

fn transform_settings() -> StateSettings<TransformSetting> {
    let resting = WidgetTransform::IDENTITY;
    let raised = WidgetTransform {
        position: Vec3::new(0.0, 2.0, 0.0),
        rotation: Vec3::ZERO,
        scale: Vec3::new(1.05, 1.05, 1.05),
    };
    let pressed = WidgetTransform {
        position: Vec3::ZERO,
        rotation: Vec3::ZERO,
        scale: Vec3::new(0.95, 0.95, 0.95),
    };
    StateSettings::new()
        .with(
            InteractionState::Default,
            TransformSetting {
                target: resting,
                duration: Duration::from_millis(80),
            },
        )
        .with(
            InteractionState::Hover,
            TransformSetting {
                target: raised,
                duration: Duration::from_millis(80),
            },
        )
        .with(
            InteractionState::Press,
            TransformSetting {
                target: pressed,
                duration: Duration::from_millis(40),
            },
        )
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    env_logger::init();
    println!("=== Button Basics ===\n");

    let color = Target::new(Rgba::WHITE);
    let pose = Target::new(WidgetTransform::IDENTITY);

    let button = WidgetBuilder::new()
        .initial_state(InteractionState::Hide)
        .color_feature(ColorFeature::new().with_element(color.clone(), color_settings()))
        .transform_feature(TransformFeature::new().with_element(pose.clone(), transform_settings()))
        .build()
        .expect("widget configuration is valid");

    let mut events = button.subscribe();

    println!("Showing the button...");
    button.set_active(true, false, true);
    println!(
        "visible immediately: {}, interactive yet: {}",
        button.is_visible(),
        button.is_interactive()
    );
    button.settle().await;
    println!(
        "settled: state {:?}, interactive: {}",
        button.current_state(),
        button.is_interactive()
    );

    println!("\nPointer enters...");
    button.pointer_enter();
    button.settle().await;
    println!(
        "state {:?}, color {:?}, raised to y = {}",
        button.current_state(),
        color.get(),
        pose.get().position.y
    );

    println!("\nPointer presses...");
    button.pointer_down();
    button.settle().await;
    println!(
        "state {:?}, scale {:?}",
        button.current_state(),
        pose.get().scale
    );

    println!("\nPointer releases (still hovering, so Hover wins the fallback)...");
    button.pointer_up();
    button.settle().await;
    println!("state {:?}", button.current_state());

    println!("\nPointer leaves...");
    button.pointer_exit();
    button.settle().await;
    println!(
        "state {:?}, color back to {:?}",
        button.current_state(),
        color.get()
    );

    println!("\nEvents observed:");
    while let Ok(event) = events.try_recv() {
        println!("  {}", event.signal.name());
    }

    println!("\nTransition log:");
    for record in button.log().records() {
        println!(
            "  {} -> {} ({:?})",
            record.from.name(),
            record.to.name(),
            record.cause
        );
    }

    println!("\n=== Example Complete ===");
}
