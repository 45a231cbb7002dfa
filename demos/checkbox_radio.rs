//! Checkbox and Radio Semantics
//!
//! How the three widget variants diverge on selection.
//!
//! Key concepts:
//! - Checkboxes toggle: a second select returns the widget to Default
//! - Radio selection is monotonic; a group controller clears siblings
//! - Button selects are pure pulses that leave no state behind
//!
//! Run with: cargo run --example checkbox_radio

use petal_ui::config::{ColorSetting, Rgba, StateSettings};
use petal_ui::core::{InteractionState, WidgetVariant};
use petal_ui::features::{ColorFeature, Target};
use petal_ui::widget::{Widget, WidgetBuilder};
use std::time::Duration;

const SELECTED_GREEN: Rgba = Rgba::new(0.3, 0.9, 0.4, 1.0);

fn selection_settings() -> StateSettings<ColorSetting> {
    StateSettings::new()
        .with(
            InteractionState::Default,
            ColorSetting {
                color: Rgba::WHITE,
                duration: Duration::from_millis(40),
            },
        )
        .with(
            InteractionState::Select,
            ColorSetting {
                color: SELECTED_GREEN,
                duration: Duration::from_millis(40),
            },
        )
}

/// Selects one radio and clears every sibling. Radios never unset
/// themselves, so the group is responsible for the sweep.
async fn choose(radios: &[Widget], index: usize) {
    for (i, radio) in radios.iter().enumerate() {
        if i == index {
            radio.select(false, true);
        } else if radio.flags().is_selected {
            radio.default_state(false, false);
        }
    }
    for radio in radios {
        radio.settle().await;
    }
}

fn group_picture(radios: &[Widget]) -> String {
    radios
        .iter()
        .map(|radio| if radio.flags().is_selected { "[x]" } else { "[ ]" })
        .collect::<Vec<_>>()
        .join(" ")
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    env_logger::init();
    println!("=== Checkbox and Radio ===\n");

    let tint = Target::new(Rgba::WHITE);
    let checkbox = WidgetBuilder::new()
        .variant(WidgetVariant::Checkbox)
        .color_feature(ColorFeature::new().with_element(tint.clone(), selection_settings()))
        .build()
        .expect("widget configuration is valid");

    println!("Clicking the checkbox twice...");
    checkbox.pointer_click();
    checkbox.settle().await;
    println!(
        "first click:  selected {}, state {:?}, tint {:?}",
        checkbox.flags().is_selected,
        checkbox.current_state(),
        tint.get()
    );

    checkbox.pointer_click();
    checkbox.settle().await;
    println!(
        "second click: selected {}, state {:?}, tint {:?}",
        checkbox.flags().is_selected,
        checkbox.current_state(),
        tint.get()
    );

    println!("\nBuilding a radio group of three...");
    let radios: Vec<Widget> = (0..3)
        .map(|_| {
            WidgetBuilder::new()
                .variant(WidgetVariant::Radio)
                .build()
                .expect("widget configuration is valid")
        })
        .collect();

    choose(&radios, 0).await;
    println!("choose first:  {}", group_picture(&radios));
    choose(&radios, 2).await;
    println!("choose third:  {}", group_picture(&radios));
    choose(&radios, 2).await;
    println!("choose third again (radios never unset): {}", group_picture(&radios));

    println!("\nA button select is a pulse...");
    let button = WidgetBuilder::new().build().expect("widget configuration is valid");
    let mut events = button.subscribe();
    button.select(false, true);
    button.settle().await;
    let signal = events.try_recv().map(|event| event.signal);
    println!(
        "signal {:?}, selected flag still {}, state still {:?}",
        signal,
        button.flags().is_selected,
        button.current_state()
    );

    println!("\n=== Example Complete ===");
}
