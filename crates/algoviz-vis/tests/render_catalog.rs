//! Every catalog frame must be drawable by its algorithm's renderer.

use algoviz_core::{Advance, EngineConfig};
use algoviz_vis::{render, renderer_for, RenderError};

#[test]
fn every_frame_renders_with_its_visualizer() {
    let catalog = algoviz_algorithms::catalog();

    for info in catalog.iter() {
        let mut player = catalog.load(info.id, EngineConfig::seeded(11), None).unwrap();
        let mut frames = 0;
        loop {
            let frame = player.frame().unwrap();
            let drawn = render(info.visualizer, &frame).unwrap_or_else(|e| panic!("{}: {e}", info.id));
            assert!(!drawn.is_empty(), "{}", info.id);
            frames += 1;

            if player.step_forward().unwrap() != Advance::Stepped || frames > 5_000 {
                break;
            }
        }
    }
}

#[test]
fn other_renderers_refuse_the_frame() {
    let catalog = algoviz_algorithms::catalog();
    let player = catalog.load("bubble-sort", EngineConfig::seeded(1), Some(5)).unwrap();
    let frame = player.frame().unwrap();

    for other in catalog.iter().map(|i| i.visualizer).filter(|v| Some(*v) != player.info().map(|i| i.visualizer)) {
        assert!(matches!(
            renderer_for(other).draw(&frame),
            Err(RenderError::CannotDisplay { .. })
        ));
    }
}
