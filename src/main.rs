//! The Tower headless driver
//!
//! Runs the simulation for a fixed number of frames with the demo autopilot
//! at the controls, forwarding sounds to a logging sink.

use clap::Parser;

use the_tower::audio::{AudioSink, LogAudio};
use the_tower::autopilot::Autopilot;
use the_tower::platform::{InputState, Key};
use the_tower::renderer::{Renderer, Snapshot, TextRenderer};
use the_tower::sim::{Difficulty, GamePhase, GameState, TickInput, tick};
use the_tower::Tuning;

#[derive(Parser, Debug)]
#[command(name = "the-tower")]
#[command(author, version, about = "The Tower - climb ten floors of monsters", long_about = None)]
struct Args {
    /// Run seed
    #[arg(long = "seed", default_value_t = 12345)]
    seed: u64,

    /// Frames to simulate (60 per second)
    #[arg(long = "frames", default_value_t = 3600)]
    frames: u64,

    /// Difficulty picked on the menu (easy/normal/hard)
    #[arg(long = "difficulty", default_value = "normal")]
    difficulty: String,

    /// JSON tuning file overriding the built-in balance
    #[arg(long = "tuning")]
    tuning: Option<std::path::PathBuf>,

    /// Print an ASCII frame every N frames (0 = only the last one)
    #[arg(long = "render")]
    render: Option<u64>,

    /// Print the final frame as JSON
    #[arg(long = "json")]
    json: bool,
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    let tuning = match &args.tuning {
        Some(path) => Tuning::load(path).unwrap_or_else(|e| {
            log::warn!("Ignoring tuning file {}: {}", path.display(), e);
            Tuning::default()
        }),
        None => Tuning::default(),
    };

    let difficulty = Difficulty::from_str(&args.difficulty).unwrap_or_else(|| {
        log::warn!("Unknown difficulty '{}', using Normal", args.difficulty);
        Difficulty::Normal
    });

    log::info!("The Tower (headless) seed={} frames={}", args.seed, args.frames);

    let mut state = match GameState::with_tuning(args.seed, tuning) {
        Ok(state) => state,
        Err(e) => {
            log::error!("Invalid tuning: {e}");
            std::process::exit(1);
        }
    };
    let mut input = InputState::new();
    let mut pilot = Autopilot::new();
    let mut audio = LogAudio::new();
    let mut renderer = TextRenderer::new();

    for _ in 0..args.frames {
        let frame_input = match state.phase {
            GamePhase::DifficultySelect { selected } => menu_input(&mut input, selected, difficulty),
            _ => pilot.next_input(&state),
        };
        tick(&mut state, &frame_input);
        input.clear_just_pressed();
        audio.play_all(state.drain_sounds());

        if let Some(every) = args.render.filter(|n| *n > 0) {
            if state.frame % every == 0 {
                renderer.draw(&Snapshot::capture(&state));
                println!("{}", renderer.frame());
            }
        }
    }

    let snapshot = Snapshot::capture(&state);
    if args.json {
        match snapshot.to_json() {
            Ok(json) => println!("{json}"),
            Err(e) => log::error!("Failed to serialize snapshot: {e}"),
        }
    } else {
        renderer.draw(&snapshot);
        println!("{}", renderer.frame());
    }

    let sounds: Vec<String> = audio.counts().map(|(name, n)| format!("{name}={n}")).collect();
    log::info!(
        "Stopped at frame {} on floor {} room {} ({}); sounds: {}",
        state.frame,
        state.progress.floor + 1,
        state.progress.room + 1,
        state.phase.name(),
        sounds.join(" ")
    );
}

/// Drive the difficulty menu through key presses toward `wanted`
fn menu_input(input: &mut InputState, selected: usize, wanted: Difficulty) -> TickInput {
    let key = match selected.cmp(&wanted.index()) {
        std::cmp::Ordering::Less => Key::Down,
        std::cmp::Ordering::Greater => Key::Up,
        std::cmp::Ordering::Equal => Key::Action,
    };
    let code = key.codes()[0];
    input.key_down(code);
    let frame = input.tick_input();
    input.key_up(code);
    frame
}
