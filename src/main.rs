//! Space Venture headless driver
//!
//! Plays a scripted run through the menus and the levels, logging sound
//! cues and HUD snapshots.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use space_venture::consts::FRAME_DT;
use space_venture::sim::TickInput;
use space_venture::{Game, Resolution, Screen, Settings, UiAction};

const HUD_EVERY: u32 = 120;

#[derive(Parser, Debug)]
#[command(name = "space-venture")]
#[command(about = "Headless scripted run of the Space Venture simulation")]
struct Args {
    /// RNG seed (random when omitted)
    seed: Option<u64>,
    /// Frames to simulate
    #[arg(default_value_t = 1800)]
    frames: u32,
    /// Settings JSON file
    settings: Option<PathBuf>,
    /// Override the resolution preset (e.g. 1920x1080, 720p)
    #[arg(long)]
    resolution: Option<Resolution>,
    /// Master volume for sound cues (0.0 - 1.0)
    #[arg(long, default_value_t = 1.0)]
    volume: f32,
    /// Drop every sound cue
    #[arg(long)]
    mute: bool,
    /// Pilot name typed on the character creation screen
    #[arg(long, default_value = "Pilot")]
    name: String,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut settings = match &args.settings {
        Some(path) => {
            let json = fs::read_to_string(path)
                .with_context(|| format!("reading settings from {}", path.display()))?;
            Settings::load(&json)
        }
        None => Settings::default(),
    };
    if let Some(resolution) = args.resolution {
        settings.resolution = resolution;
    }

    let seed = args.seed.unwrap_or_else(rand::random);
    log::info!(
        "Space Venture (headless) starting, seed {}, {}",
        seed,
        settings.resolution
    );

    let mut game = Game::new(seed);
    game.set_settings(settings);
    game.audio_mut().set_master_volume(args.volume);
    game.audio_mut().set_muted(args.mute);

    game.handle(UiAction::NewGame);
    for c in args.name.chars() {
        game.handle(UiAction::TypeChar(c));
    }
    game.handle(UiAction::ConfirmName);
    game.handle(UiAction::StartGame);

    for frame in 0..args.frames {
        game.frame(&scripted_input(frame), FRAME_DT);

        if frame % HUD_EVERY == 0 {
            log::info!("frame {}: {}", frame, serde_json::to_string(&game.hud())?);
        }

        match game.screen() {
            Screen::Platforming => {}
            Screen::LevelComplete => game.handle(UiAction::NextLevel),
            screen => {
                log::info!("Run ended on {:?} after {} frames", screen, frame + 1);
                break;
            }
        }
        if game.should_quit() {
            break;
        }
    }

    let hud = game.hud();
    println!(
        "level {} | score {} | currency {} | health {}/{} | cues played {}",
        hud.level,
        hud.score,
        hud.currency,
        hud.health,
        hud.max_health,
        game.audio().played()
    );
    Ok(())
}

/// Hold right, hop every second, fire every half second
fn scripted_input(frame: u32) -> TickInput {
    TickInput {
        right: true,
        jump: frame % 60 == 30,
        fire: frame % 30 == 0,
        ..Default::default()
    }
}
