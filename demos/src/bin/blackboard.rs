//! Marionette figure writing on a blackboard.
//!
//! Reaches from the rest pose to the board during the first second, then
//! drives the right hand around a closed figure-eight at constant speed,
//! one IK solve per frame.
//!
//! Run: `cargo run -p marionette-demos --bin blackboard [rig.toml]`

use std::env;

use marionette_core::config::RigConfig;
use marionette_demos::{BOARD_CENTER, REACH_TOLERANCE, blackboard_loop};
use marionette_ik::IkSolver;
use marionette_skeleton::presets::{human_figure, human_figure_limits};

const FRAME_DT: f64 = 1.0 / 60.0;
/// 9 seconds at 60 fps: one reach second, then two passes of the loop.
const FRAMES: u32 = 540;
const LOOP_SECONDS: f64 = 4.0;

fn main() {
    println!("=== Blackboard Writer ===\n");

    // 1. Optional rig config from the command line.
    let config = env::args().nth(1).map_or_else(RigConfig::default, |path| {
        RigConfig::from_file(&path).unwrap_or_else(|err| panic!("failed to load {path}: {err}"))
    });

    // 2. Preset figure; preset limits unless the config supplies its own.
    let mut figure = human_figure();
    let hand = figure
        .end_effector("right_hand")
        .expect("preset figure carries a right_hand end-effector");
    let limits = if config.limits.is_empty() {
        human_figure_limits()
    } else {
        config.limits
    };
    let solver = IkSolver::new(config.solver, limits);

    // 3. Drawing path and the rest pose the reach phase starts from.
    let path = blackboard_loop();
    let rest = figure.end_effector_position(hand);
    println!(
        "figure: {} segments, {} DOF",
        figure.segments().len(),
        figure.dof()
    );
    println!(
        "path: {} control points, arc length {:.2}",
        path.len(),
        path.arc_length_at(1.0)
    );
    println!("hand rest position: [{:.2}, {:.2}, {:.2}]\n", rest.x, rest.y, rest.z);

    // 4. One IK solve per frame.
    for frame in 0..FRAMES {
        let t = f64::from(frame) * FRAME_DT;
        let target = if t < 1.0 {
            rest + (BOARD_CENTER - rest) * t
        } else {
            let phase = ((t - 1.0) / LOOP_SECONDS) % 1.0;
            path.position_at(path.parameter_at_length(path.constant_velocity_length(phase)))
        };

        let result = solver.solve(&mut figure, hand, target, REACH_TOLERANCE);

        if frame % 30 == 0 {
            let hand_pos = figure.end_effector_position(hand);
            println!(
                "t={t:5.2}s  target [{:.2}, {:.2}, {:.2}]  hand [{:.2}, {:.2}, {:.2}]  err={:.3}  iters={}",
                target.x,
                target.y,
                target.z,
                hand_pos.x,
                hand_pos.y,
                hand_pos.z,
                result.position_error,
                result.iterations,
            );
        }
    }

    println!("\nBlackboard demo finished");
}
