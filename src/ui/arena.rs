//! Arena Rendering
//!
//! Immediate-mode drawing of the duel with gizmos: the two duellists, their
//! status rings, projectiles, particles and dropped wands.

use bevy::math::Isometry2d;
use bevy::prelude::*;

use super::{arena_to_world, colors, rgb, ActiveDuel, AimState};
use crate::duel::constants::{ARENA_HEIGHT, ARENA_WIDTH, OPPONENT_MIN_X};
use crate::duel::{CombatantView, MatchPhase};

const BODY_RADIUS: f32 = 22.0;
const SHIELD_RADIUS: f32 = 34.0;
const STUN_RADIUS: f32 = 9.0;
const PROJECTILE_RADIUS: f32 = 6.0;
const WAND_LENGTH: f32 = 20.0;

pub fn draw_arena(mut gizmos: Gizmos, duel: Res<ActiveDuel>, aim: Res<AimState>) {
    let snapshot = duel.0.snapshot();

    gizmos.rect_2d(
        Isometry2d::IDENTITY,
        Vec2::new(ARENA_WIDTH, ARENA_HEIGHT),
        colors::ARENA_LINE,
    );
    gizmos.line_2d(
        arena_to_world(Vec2::new(OPPONENT_MIN_X, 0.0)),
        arena_to_world(Vec2::new(OPPONENT_MIN_X, ARENA_HEIGHT)),
        colors::ARENA_LINE.with_alpha(0.4),
    );

    draw_duellist(&mut gizmos, &snapshot.player, colors::PLAYER, 1.0);
    draw_duellist(&mut gizmos, &snapshot.opponent, rgb(snapshot.opponent_color), -1.0);

    for projectile in &snapshot.projectiles {
        gizmos.circle_2d(
            Isometry2d::from_translation(arena_to_world(projectile.position)),
            PROJECTILE_RADIUS,
            rgb(projectile.color),
        );
    }

    for particle in snapshot.particles {
        let alpha = particle.lifetime.clamp(0.0, 1.0);
        gizmos.circle_2d(
            Isometry2d::from_translation(arena_to_world(particle.position)),
            particle.size,
            rgb(particle.color).with_alpha(alpha),
        );
    }

    for drop in snapshot.wand_drops {
        let start = arena_to_world(drop.position);
        gizmos.line_2d(start, start + Vec2::new(WAND_LENGTH, 4.0), colors::WAND);
    }

    if snapshot.phase == MatchPhase::InProgress && aim.aiming {
        if let Some(point) = aim.point {
            let origin = duel.0.combat().cast_origin();
            gizmos.line_2d(arena_to_world(origin), arena_to_world(point), colors::AIM);
        }
    }
}

/// `facing` is +1 for right, -1 for left.
fn draw_duellist(gizmos: &mut Gizmos, view: &CombatantView, body: Color, facing: f32) {
    let centre = arena_to_world(view.position);
    gizmos.circle_2d(Isometry2d::from_translation(centre), BODY_RADIUS, body);

    if view.has_wand {
        let grip = centre + Vec2::new(facing * BODY_RADIUS * 0.6, 0.0);
        gizmos.line_2d(grip, grip + Vec2::new(facing * WAND_LENGTH, 6.0), colors::WAND);
    }
    if view.shielded {
        gizmos.circle_2d(Isometry2d::from_translation(centre), SHIELD_RADIUS, colors::SHIELD);
    }
    if view.stunned {
        let halo = centre + Vec2::new(0.0, BODY_RADIUS + STUN_RADIUS);
        gizmos.circle_2d(Isometry2d::from_translation(halo), STUN_RADIUS, colors::STUN);
    }
}
