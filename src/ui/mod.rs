//! HUD
//!
//! Immediate-mode overlay: combo and cooldown readout, health bars floating
//! over entities, floating damage numbers, and the QTE prompt anchored to
//! the screen edge matching its direction.

use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use crate::combat::attack::ComboAttack;
use crate::combat::events::DamageNumberEvent;
use crate::combat::qte::{QtePrompt, QteSymbol};
use crate::combat::weapons::WeaponRoster;
use crate::combat::{Enemy, Health, Player, PlayerMotion};

/// Seconds a damage number stays on screen.
const DAMAGE_NUMBER_LIFETIME: f32 = 0.8;
/// Upward drift in world units per second.
const DAMAGE_NUMBER_RISE: f32 = 55.0;

/// A floating damage number in world space, drifting up and fading out.
#[derive(Component)]
pub struct FloatingDamageNumber {
    pub amount: f32,
    pub is_crit: bool,
    pub position: Vec2,
    pub age: f32,
}

pub struct HudPlugin;

impl Plugin for HudPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (
                spawn_damage_numbers,
                tick_damage_numbers,
                draw_health_bars,
                draw_damage_numbers,
                draw_combat_panel,
                draw_qte_prompt,
            ),
        );
    }
}

fn spawn_damage_numbers(mut commands: Commands, mut events: EventReader<DamageNumberEvent>) {
    for event in events.read() {
        commands.spawn(FloatingDamageNumber {
            amount: event.amount,
            is_crit: event.is_crit,
            position: event.world_position,
            age: 0.0,
        });
    }
}

fn tick_damage_numbers(
    mut commands: Commands,
    time: Res<Time>,
    mut query: Query<(Entity, &mut FloatingDamageNumber)>,
) {
    let dt = time.delta_secs();
    for (entity, mut number) in query.iter_mut() {
        number.age += dt;
        number.position.y += DAMAGE_NUMBER_RISE * dt;
        if number.age >= DAMAGE_NUMBER_LIFETIME {
            commands.entity(entity).despawn();
        }
    }
}

fn viewport_pos(
    camera: &Camera,
    camera_transform: &GlobalTransform,
    world: Vec2,
) -> Option<egui::Pos2> {
    camera
        .world_to_viewport(camera_transform, world.extend(0.0))
        .ok()
        .map(|v| egui::pos2(v.x, v.y))
}

fn draw_health_bars(
    mut contexts: EguiContexts,
    camera_query: Query<(&Camera, &GlobalTransform), With<Camera2d>>,
    query: Query<(&Transform, &Health, Has<Player>), Or<(With<Player>, With<Enemy>)>>,
) {
    let Ok((camera, camera_transform)) = camera_query.get_single() else {
        return;
    };
    let painter = contexts
        .ctx_mut()
        .layer_painter(egui::LayerId::background());

    for (transform, health, is_player) in query.iter() {
        if !health.is_alive() {
            continue;
        }
        let anchor = transform.translation.truncate() + Vec2::new(0.0, 28.0);
        let Some(center) = viewport_pos(camera, camera_transform, anchor) else {
            continue;
        };

        let width = 40.0;
        let height = 5.0;
        let left = center.x - width / 2.0;
        let back = egui::Rect::from_min_size(
            egui::pos2(left, center.y),
            egui::vec2(width, height),
        );
        let front = egui::Rect::from_min_size(
            egui::pos2(left, center.y),
            egui::vec2(width * health.fraction(), height),
        );
        let fill = if is_player {
            egui::Color32::from_rgb(80, 200, 120)
        } else {
            egui::Color32::from_rgb(220, 80, 70)
        };
        painter.rect_filled(back, 1.0, egui::Color32::from_black_alpha(160));
        painter.rect_filled(front, 1.0, fill);
    }
}

fn draw_damage_numbers(
    mut contexts: EguiContexts,
    camera_query: Query<(&Camera, &GlobalTransform), With<Camera2d>>,
    query: Query<&FloatingDamageNumber>,
) {
    let Ok((camera, camera_transform)) = camera_query.get_single() else {
        return;
    };
    let painter = contexts
        .ctx_mut()
        .layer_painter(egui::LayerId::background());

    for number in query.iter() {
        let Some(pos) = viewport_pos(camera, camera_transform, number.position) else {
            continue;
        };
        let fade = 1.0 - (number.age / DAMAGE_NUMBER_LIFETIME).clamp(0.0, 1.0);
        let alpha = (fade * 255.0) as u8;
        let (color, size) = if number.is_crit {
            (egui::Color32::from_rgba_unmultiplied(255, 210, 60, alpha), 22.0)
        } else {
            (egui::Color32::from_rgba_unmultiplied(255, 255, 255, alpha), 15.0)
        };
        painter.text(
            pos,
            egui::Align2::CENTER_CENTER,
            format!("{:.0}", number.amount),
            egui::FontId::proportional(size),
            color,
        );
    }
}

fn draw_combat_panel(
    mut contexts: EguiContexts,
    roster: Res<WeaponRoster>,
    query: Query<(&ComboAttack, &PlayerMotion, &Health), With<Player>>,
) {
    let Ok((combo, motion, health)) = query.get_single() else {
        return;
    };
    let Some(weapon) = roster.get(combo.weapon_index) else {
        return;
    };

    egui::Window::new("combat_panel")
        .title_bar(false)
        .resizable(false)
        .anchor(egui::Align2::LEFT_TOP, egui::vec2(12.0, 12.0))
        .show(contexts.ctx_mut(), |ui| {
            ui.label(
                egui::RichText::new(&weapon.name)
                    .strong()
                    .size(16.0),
            );
            ui.label(format!(
                "Combo {}/{}",
                combo.step(),
                weapon.combo_length()
            ));
            ui.label(format!(
                "Crit {:.0}%  ({} crits / {} attacks)",
                combo.crit_chance, combo.total_crits, combo.total_attacks
            ));
            if combo.step() > 0 {
                // Time left before the combo drops back to step 0
                ui.add(
                    egui::ProgressBar::new(1.0 - combo.combo_reset_fraction(weapon))
                        .text("combo")
                        .desired_width(130.0),
                );
            }
            ui.add(
                egui::ProgressBar::new(combo.light_cooldown_fraction(weapon))
                    .text("light")
                    .desired_width(130.0),
            );
            ui.add(
                egui::ProgressBar::new(combo.burst_cooldown_fraction(weapon))
                    .text("burst")
                    .desired_width(130.0),
            );
            ui.add(
                egui::ProgressBar::new(motion.dash_cooldown_fraction())
                    .text("dash")
                    .desired_width(130.0),
            );
            ui.label(format!("HP {:.0}/{:.0}", health.current(), health.max()));
        });
}

/// Draw the current QTE prompt at the screen edge matching its direction,
/// so the key to press and where to look line up.
fn draw_qte_prompt(mut contexts: EguiContexts, prompt: Res<QtePrompt>) {
    let Some(symbol) = prompt.symbol else {
        return;
    };
    let (anchor, offset) = match symbol {
        QteSymbol::Up => (egui::Align2::CENTER_TOP, egui::vec2(0.0, 60.0)),
        QteSymbol::Down => (egui::Align2::CENTER_BOTTOM, egui::vec2(0.0, -60.0)),
        QteSymbol::Left => (egui::Align2::LEFT_CENTER, egui::vec2(60.0, 0.0)),
        QteSymbol::Right => (egui::Align2::RIGHT_CENTER, egui::vec2(-60.0, 0.0)),
    };

    egui::Window::new("qte_prompt")
        .title_bar(false)
        .resizable(false)
        .anchor(anchor, offset)
        .show(contexts.ctx_mut(), |ui| {
            ui.label(
                egui::RichText::new(symbol.label())
                    .size(42.0)
                    .strong()
                    .color(egui::Color32::from_rgb(255, 220, 80)),
            );
        });
}
