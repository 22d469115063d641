//! Oracle Ruins headless demo
//!
//! Runs a scripted session against a recording surface and prints every
//! emitted event as a JSON line. Usage: `oracle-ruins [settings.json]`.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Oracle Ruins (headless) starting...");

    if let Err(e) = demo::run() {
        log::error!("Demo failed: {}", e);
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Web hosts drive `Game` directly; nothing to run here
}

#[cfg(not(target_arch = "wasm32"))]
mod demo {
    use std::error::Error;
    use std::path::PathBuf;

    use oracle_ruins::consts::SIM_DT;
    use oracle_ruins::oracle::ScriptedWhisper;
    use oracle_ruins::renderer::DisplayList;
    use oracle_ruins::sim::DirectionalInput;
    use oracle_ruins::{Game, SceneProps, Settings};

    /// Host frame time (30 fps host, 60 Hz simulation)
    const FRAME_DT: f32 = 1.0 / 30.0;
    /// Cap on simulation steps per frame
    const MAX_SUBSTEPS: u32 = 4;

    /// Fixed-step driver mirroring a browser render loop
    struct Host {
        game: Game<DisplayList>,
        accumulator: f32,
        /// Simulated seconds since the last decay tick
        decay_clock: f32,
    }

    impl Host {
        /// Advance one host frame with the given keys held
        fn frame(&mut self, input: &DirectionalInput) {
            self.accumulator += FRAME_DT;
            let mut substeps = 0;
            while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
                self.game.tick(input, SIM_DT);
                self.accumulator -= SIM_DT;
                substeps += 1;
            }

            self.decay_clock += FRAME_DT;
            if self.decay_clock >= 1.0 {
                self.decay_clock -= 1.0;
                self.game.decay_tick();
            }
        }

        fn frames(&mut self, count: usize, input: &DirectionalInput) {
            for _ in 0..count {
                self.frame(input);
            }
        }
    }

    pub fn run() -> Result<(), Box<dyn Error>> {
        let path = std::env::args().nth(1).map(PathBuf::from);
        let settings = Settings::load_or_default(path.as_deref());

        let mut game = Game::with_standard_rooms(settings, DisplayList::new())?;
        game.subscribe(|event| match serde_json::to_string(event) {
            Ok(line) => println!("{}", line),
            Err(e) => log::warn!("Could not serialize {}: {}", event.name(), e),
        });

        let mut host = Host {
            game,
            accumulator: 0.0,
            decay_clock: 0.0,
        };
        let idle = DirectionalInput::default();
        let right = DirectionalInput {
            right: true,
            ..Default::default()
        };

        // Too far from the east exit
        host.frames(1, &idle);
        host.game.activate_exit(0)?;

        // Walk to the east wall and leave
        host.frames(90, &right);
        host.game.activate_exit(0)?;
        log::info!("Now in '{}'", host.game.current_room_id());

        // Host pulls the player back and pushes a heavy decay level
        host.game.update_props(&SceneProps {
            player_location: "starting_chamber".into(),
            decay_level: 0.62,
        });

        // Click the panel once the room is interactive
        host.frames(1, &idle);
        let panel = host
            .game
            .scene()
            .renderer()
            .arena()
            .puzzle()
            .map(|handle| handle.bounds.center());
        if let Some(panel) = panel {
            host.game.pointer_move(panel.x, panel.y);
            host.game.pointer_down(panel.x, panel.y)?;
        }

        let mut oracle = ScriptedWhisper::new(["Archive dust... truth buried..."]);
        let context = host.game.whisper_context();
        log::info!("Whisper context: {}", serde_json::to_string(&context)?);
        if let Some(whisper) = host.game.request_whisper(&mut oracle) {
            log::info!("Oracle: {}", whisper);
        }

        let canvas = host.game.scene().canvas();
        for batch in host.game.surface().tessellate() {
            let ndc: Vec<_> = batch
                .vertices
                .iter()
                .map(|v| v.to_ndc(canvas.width, canvas.height))
                .collect();
            let bytes: &[u8] = bytemuck::cast_slice(&ndc);
            log::info!(
                "{:?} layer ({:?}): {} vertices, {} bytes",
                batch.layer,
                batch.blend,
                ndc.len(),
                bytes.len()
            );
        }

        host.game.shutdown();
        Ok(())
    }
}
