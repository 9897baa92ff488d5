//! Status overlay refresh

use bevy::prelude::*;

use crate::ar_dice::types::*;

/// Style label text
pub fn style_label(style: DiceStyle, ledger: &DiceLedger) -> String {
    format!(
        "Style: {} · Dice: {}/{}",
        style.name(),
        ledger.available(),
        ledger.capacity()
    )
}

/// Push the current status, style and button availability to the overlay
pub fn refresh_status(
    controller: Res<GameController>,
    board: Res<StatusBoard>,
    ledger: Res<DiceLedger>,
    mut status_query: Query<&mut Text, (With<StatusText>, Without<StyleText>)>,
    mut style_query: Query<&mut Text, (With<StyleText>, Without<StatusText>)>,
    mut buttons: Query<(&ControlButton, &mut Visibility)>,
) {
    let status = board.text(controller.state());
    for mut text in status_query.iter_mut() {
        if text.0 != status {
            text.0 = status.clone();
        }
    }

    let label = style_label(controller.style(), &ledger);
    for mut text in style_query.iter_mut() {
        if text.0 != label {
            text.0 = label.clone();
        }
    }

    // Start only makes sense while scanning
    let can_start =
        controller.state() == GameState::DetectSurface && controller.tracking_supported();
    for (button, mut visibility) in buttons.iter_mut() {
        if *button == ControlButton::Start {
            let wanted = if can_start {
                Visibility::Inherited
            } else {
                Visibility::Hidden
            };
            if *visibility != wanted {
                *visibility = wanted;
            }
        }
    }
}
