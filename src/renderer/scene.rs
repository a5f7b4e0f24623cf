//! Builds the frame's triangle list from read-only match state

use glam::Vec2;

use super::shapes::{circle, ellipse, line, rect, ring};
use super::vertex::{Vertex, colors};
use crate::effects::Effects;
use crate::sim::{CATCH_RADIUS, PlayerRole, RunBands, Simulator};

const BALL_RADIUS: f32 = 6.0;
const PLAYER_RADIUS: f32 = 10.0;
const SEGMENTS: u32 = 32;

/// Everything a frame needs, borrowed immutably
pub struct FrameView<'a> {
    pub sim: &'a Simulator,
    pub effects: &'a Effects,
}

/// Triangle list for the frame in field coordinates (origin top-left, y down)
pub fn build_scene(view: &FrameView) -> Vec<Vertex> {
    let mut verts = Vec::with_capacity(4096);
    let size = view.sim.field_size();

    verts.extend(rect(Vec2::ZERO, size, colors::OUTFIELD));

    match view.sim {
        Simulator::Simple(field) => {
            let center = field.center();
            let bands = RunBands::simple();
            for (radius, color) in [
                (bands.six_beyond, colors::RING_SIX),
                (bands.four_beyond, colors::RING_FOUR),
            ] {
                verts.extend(ring(center, radius - 2.0, radius, color, SEGMENTS));
            }
            verts.extend(pitch(center, Vec2::new(30.0, 90.0)));

            // Batsman marker on the crease
            let bat = Vec2::new(field.bat_position(), center.y);
            verts.extend(line(
                bat + Vec2::new(0.0, -12.0),
                bat + Vec2::new(0.0, 12.0),
                4.0,
                colors::BATSMAN,
            ));
        }
        Simulator::Interactive(field) => {
            let batsman = field.batsman_pos();
            verts.extend(ellipse(size * 0.5, size * 0.42, colors::INFIELD, SEGMENTS * 2));
            verts.extend(pitch(Vec2::new(batsman.x, size.y * 0.5), Vec2::new(24.0, 200.0)));

            for player in &field.players {
                if player.role == PlayerRole::Fielder {
                    verts.extend(circle(player.pos, CATCH_RADIUS, colors::CATCH_ZONE, SEGMENTS));
                }
            }
            for player in &field.players {
                if view.effects.is_animated(player.role) {
                    let glow = PLAYER_RADIUS + 5.0;
                    verts.extend(circle(player.pos, glow, colors::POSE_GLOW, SEGMENTS));
                }
                let color = match player.role {
                    PlayerRole::Batsman => colors::BATSMAN,
                    PlayerRole::Bowler => colors::BOWLER,
                    PlayerRole::Fielder => colors::FIELDER,
                };
                verts.extend(circle(player.pos, PLAYER_RADIUS, color, SEGMENTS));
            }
        }
    }

    // Boundary rope along the field edge
    let corners = [Vec2::ZERO, Vec2::new(size.x, 0.0), size, Vec2::new(0.0, size.y)];
    for (i, &from) in corners.iter().enumerate() {
        let to = corners[(i + 1) % corners.len()];
        verts.extend(line(from, to, 2.0, colors::BOUNDARY_ROPE));
    }

    // Only a ball in play is drawn
    let ball = view.sim.ball();
    if ball.active {
        let shadow = ball.pos + Vec2::new(2.0, 3.0);
        verts.extend(circle(shadow, BALL_RADIUS, colors::BALL_SHADOW, 16));
        verts.extend(circle(ball.pos, BALL_RADIUS, colors::BALL, 16));
    }

    verts
}

/// Pitch strip with creases and stumps at both ends
fn pitch(center: Vec2, half: Vec2) -> Vec<Vertex> {
    let mut verts = rect(center - half, center + half, colors::PITCH);
    for end in [-1.0, 1.0] {
        let y = center.y + end * (half.y - 10.0);
        verts.extend(line(
            Vec2::new(center.x - half.x, y),
            Vec2::new(center.x + half.x, y),
            1.5,
            colors::CREASE,
        ));
        for dx in [-4.0, 0.0, 4.0] {
            verts.extend(circle(Vec2::new(center.x + dx, y), 1.5, colors::STUMPS, 6));
        }
    }
    verts
}
