//! Top-level screen state machine
//!
//! [`Game`] owns the session, the world, the RNG and the audio state,
//! decides which subsystem runs each frame, and applies every screen
//! transition. UI
//! button activations arrive as [`UiAction`]s; gameplay input arrives as a
//! [`TickInput`] once per frame.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::audio::{AudioManager, SoundCue};
use crate::consts::LEVEL_COMPLETION_BONUS;
use crate::session::{Attribute, CustomizationTab, CustomizeOption, Session};
use crate::settings::Settings;
use crate::sim::{TickInput, World, build_level, is_playable, tick};

/// Which screen is active
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Screen {
    #[default]
    MainMenu,
    Settings,
    CharacterCreation,
    CharacterCustomization,
    /// Placeholder screen, never entered
    Playing,
    /// Side-scrolling gameplay
    Platforming,
    LevelComplete,
    /// Not implemented; bounces back to the main menu on the next frame
    SpaceCombat,
}

/// A UI button activation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum UiAction {
    // Main menu
    NewGame,
    OpenSettings,
    SpaceCombat,
    Quit,
    // Settings
    CycleResolution,
    ToggleFullscreen,
    SetMusicVolume(f32),
    ToggleMusic,
    /// Settings -> main menu, customization -> creation
    Back,
    // Character creation
    TypeChar(char),
    Backspace,
    ConfirmName,
    // Character customization
    SelectTab(CustomizationTab),
    Cycle(CustomizeOption),
    RaiseAttribute(Attribute),
    LowerAttribute(Attribute),
    StartGame,
    // Pause menu
    Resume,
    // Level complete
    NextLevel,
    /// Pause menu or level complete -> main menu
    MainMenu,
}

/// Read-only HUD snapshot for the presentation layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hud {
    pub screen: Screen,
    pub level: u32,
    pub health: i32,
    pub max_health: i32,
    pub energy: i32,
    pub score: u32,
    pub currency: u32,
    pub camera_x: f32,
    pub paused: bool,
}

/// Game controller holding all cross-screen state
#[derive(Debug, Clone)]
pub struct Game<R = Pcg32> {
    screen: Screen,
    session: Session,
    settings: Settings,
    world: World,
    rng: R,
    audio: AudioManager,
    quit: bool,
}

impl Game<Pcg32> {
    /// Game with a seeded PCG generator
    pub fn new(seed: u64) -> Self {
        Self::with_rng(Pcg32::seed_from_u64(seed))
    }
}

impl<R: Rng> Game<R> {
    /// Game drawing level randomness from `rng`
    pub fn with_rng(rng: R) -> Self {
        let settings = Settings::default();
        let mut audio = AudioManager::new();
        audio.apply_settings(&settings);
        Self {
            screen: Screen::MainMenu,
            session: Session::new(),
            settings,
            world: World::new(),
            rng,
            audio,
            quit: false,
        }
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn set_settings(&mut self, settings: Settings) {
        self.settings = settings;
        self.audio.apply_settings(&self.settings);
    }

    pub fn audio(&self) -> &AudioManager {
        &self.audio
    }

    pub fn audio_mut(&mut self) -> &mut AudioManager {
        &mut self.audio
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn is_paused(&self) -> bool {
        self.screen == Screen::Platforming && self.world.paused
    }

    /// Quit was chosen from a menu
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    pub fn hud(&self) -> Hud {
        let player = &self.world.player;
        Hud {
            screen: self.screen,
            level: self.world.level,
            health: player.health,
            max_health: player.max_health,
            energy: player.energy,
            score: self.session.stats.score,
            currency: self.session.stats.currency,
            camera_x: self.world.camera_x,
            paused: self.is_paused(),
        }
    }

    fn go(&mut self, screen: Screen) {
        if self.screen != screen {
            log::info!("Screen {:?} -> {:?}", self.screen, screen);
            self.screen = screen;
        }
    }

    /// Run one frame of whatever the current screen needs
    ///
    /// Sound cues raised this frame are dispatched to the audio manager
    /// and returned.
    pub fn frame(&mut self, input: &TickInput, dt: f32) -> Vec<SoundCue> {
        let cues = match self.screen {
            Screen::Platforming => self.step_platforming(input, dt),
            Screen::SpaceCombat => {
                log::warn!("Space combat is not available");
                self.go(Screen::MainMenu);
                Vec::new()
            }
            _ => Vec::new(),
        };
        self.audio.dispatch(&cues);
        cues
    }

    fn step_platforming(&mut self, input: &TickInput, dt: f32) -> Vec<SoundCue> {
        self.world.viewport_width = self.settings.viewport_width();
        let weapon = self.session.profile.equipment.weapon;

        let mut outcome = tick(&mut self.world, input, weapon, dt);
        self.session.record_progress(&self.world.player);

        if let Some(target) = outcome.exit_reached {
            self.complete_level(target, &mut outcome.cues);
        }
        if outcome.player_defeated {
            log::info!(
                "Player defeated on level {} (score {})",
                self.world.level,
                self.world.player.score
            );
            self.world.paused = false;
            self.go(Screen::MainMenu);
        }

        outcome.cues
    }

    /// Award the completion bonus and pick the next screen
    fn complete_level(&mut self, target: u32, cues: &mut Vec<SoundCue>) {
        self.world.player.currency += LEVEL_COMPLETION_BONUS;
        self.session.record_progress(&self.world.player);

        if is_playable(target) {
            cues.push(SoundCue::LevelComplete);
            self.go(Screen::LevelComplete);
        } else {
            log::info!(
                "Run complete: score {}, currency {}",
                self.world.player.score,
                self.world.player.currency
            );
            self.go(Screen::MainMenu);
        }
    }

    /// Reset the player to the spawn point and build `level`
    fn enter_level(&mut self, level: u32) {
        let player = &mut self.world.player;
        player.reset_position();
        player.cosmetics = self.session.profile.cosmetics();

        build_level(&mut self.world, level, &mut self.rng);
        self.world.paused = false;
        self.world.viewport_width = self.settings.viewport_width();
        self.go(Screen::Platforming);
    }

    /// First level of a new run; stats start over
    fn start_run(&mut self) {
        log::info!(
            "Starting run as '{}' with the {}",
            self.session.profile.name,
            self.session.profile.equipment.weapon.name()
        );
        self.session.prime_fresh_run(&mut self.world.player);
        self.session.record_progress(&self.world.player);
        self.enter_level(1);
    }

    /// Apply a UI button activation. Actions that don't belong to the
    /// current screen are ignored.
    pub fn handle(&mut self, action: UiAction) {
        match (self.screen, action) {
            (Screen::MainMenu, UiAction::NewGame) => self.go(Screen::CharacterCreation),
            (Screen::MainMenu, UiAction::OpenSettings) => self.go(Screen::Settings),
            (Screen::MainMenu, UiAction::SpaceCombat) => self.go(Screen::SpaceCombat),
            (Screen::MainMenu, UiAction::Quit) => self.quit = true,

            (Screen::Settings, UiAction::CycleResolution) => self.settings.cycle_resolution(),
            (Screen::Settings, UiAction::ToggleFullscreen) => self.settings.toggle_fullscreen(),
            (Screen::Settings, UiAction::SetMusicVolume(v)) => {
                self.settings.set_music_volume(v);
                self.audio.apply_settings(&self.settings);
            }
            (Screen::Settings, UiAction::ToggleMusic) => {
                self.settings.toggle_music();
                self.audio.apply_settings(&self.settings);
            }
            (Screen::Settings, UiAction::Back) => self.go(Screen::MainMenu),

            (Screen::CharacterCreation, UiAction::TypeChar(c)) => self.session.name_input.push(c),
            (Screen::CharacterCreation, UiAction::Backspace) => {
                self.session.name_input.backspace()
            }
            (Screen::CharacterCreation, UiAction::ConfirmName) => {
                self.session.profile.name = self.session.name_input.as_str().to_string();
                self.go(Screen::CharacterCustomization);
            }

            (Screen::CharacterCustomization, UiAction::SelectTab(tab)) => self.session.tab = tab,
            (Screen::CharacterCustomization, UiAction::Cycle(option)) => {
                self.session.profile.cycle(option)
            }
            (Screen::CharacterCustomization, UiAction::RaiseAttribute(attr)) => {
                self.session.profile.attributes.raise(attr);
            }
            (Screen::CharacterCustomization, UiAction::LowerAttribute(attr)) => {
                self.session.profile.attributes.lower(attr);
            }
            (Screen::CharacterCustomization, UiAction::Back) => {
                self.go(Screen::CharacterCreation)
            }
            (Screen::CharacterCustomization, UiAction::StartGame) => self.start_run(),

            (Screen::Platforming, UiAction::Resume) if self.world.paused => {
                self.world.paused = false
            }
            (Screen::Platforming, UiAction::MainMenu) if self.world.paused => {
                self.world.paused = false;
                self.go(Screen::MainMenu);
            }
            (Screen::Platforming, UiAction::Quit) if self.world.paused => self.quit = true,

            (Screen::LevelComplete, UiAction::NextLevel) => {
                let target = self.world.exit.target_level;
                self.enter_level(target);
            }
            (Screen::LevelComplete, UiAction::MainMenu) => {
                self.session.record_progress(&self.world.player);
                self.go(Screen::MainMenu);
            }

            (screen, action) => log::warn!("Ignoring {:?} on {:?}", action, screen),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{FRAME_DT, MAX_HEALTH};
    use crate::session::Weapon;
    use crate::sim::MAX_LEVEL;

    fn idle() -> TickInput {
        TickInput::default()
    }

    fn playing(seed: u64) -> Game {
        let mut game = Game::new(seed);
        game.handle(UiAction::NewGame);
        for c in "Nova".chars() {
            game.handle(UiAction::TypeChar(c));
        }
        game.handle(UiAction::ConfirmName);
        game.handle(UiAction::StartGame);
        game
    }

    fn touch_exit(game: &mut Game) -> Vec<SoundCue> {
        game.world.player.rect.x = game.world.exit.rect.x;
        game.world.player.rect.y = game.world.exit.rect.y;
        game.frame(&idle(), FRAME_DT)
    }

    #[test]
    fn test_new_run_flow() {
        let game = playing(1);
        assert_eq!(game.screen(), Screen::Platforming);
        assert_eq!(game.session().profile.name, "Nova");
        assert_eq!(game.world().level, 1);
        assert_eq!(game.world().player.health, MAX_HEALTH);
        assert!(game.world().player.cosmetics.helmet);
    }

    #[test]
    fn test_customization_back_returns_to_creation() {
        let mut game = Game::new(1);
        game.handle(UiAction::NewGame);
        game.handle(UiAction::ConfirmName);
        assert_eq!(game.screen(), Screen::CharacterCustomization);
        game.handle(UiAction::Cycle(CustomizeOption::Weapon));
        game.handle(UiAction::Back);
        assert_eq!(game.screen(), Screen::CharacterCreation);
        assert_eq!(game.session().profile.equipment.weapon, Weapon::PlasmaRifle);
    }

    #[test]
    fn test_space_combat_redirects() {
        let mut game = Game::new(1);
        game.handle(UiAction::SpaceCombat);
        assert_eq!(game.screen(), Screen::SpaceCombat);
        game.frame(&idle(), FRAME_DT);
        assert_eq!(game.screen(), Screen::MainMenu);
    }

    #[test]
    fn test_settings_screen() {
        let mut game = Game::new(1);
        game.handle(UiAction::OpenSettings);
        game.handle(UiAction::CycleResolution);
        game.handle(UiAction::SetMusicVolume(0.25));
        game.handle(UiAction::Back);
        assert_eq!(game.screen(), Screen::MainMenu);
        assert_eq!(game.settings().viewport_width(), 1920.0);
        assert_eq!(game.settings().music_volume, 0.25);
    }

    #[test]
    fn test_settings_screen_reaches_audio() {
        let mut game = Game::new(1);
        game.handle(UiAction::OpenSettings);
        game.handle(UiAction::SetMusicVolume(0.8));
        game.handle(UiAction::ToggleMusic);
        assert_eq!(game.audio().music_volume(), 0.8);
        assert!(game.audio().music_paused());

        game.handle(UiAction::ToggleMusic);
        assert!(!game.audio().music_paused());
    }

    #[test]
    fn test_frame_dispatches_cues() {
        let mut game = playing(1);
        let fire = TickInput {
            fire: true,
            ..Default::default()
        };
        let cues = game.frame(&fire, FRAME_DT);
        assert!(cues.contains(&SoundCue::Shoot));
        assert_eq!(game.audio().played(), cues.len() as u64);

        game.audio_mut().set_muted(true);
        game.frame(&fire, FRAME_DT);
        assert_eq!(game.audio().played(), cues.len() as u64);
    }

    #[test]
    fn test_exit_awards_bonus_once() {
        let mut game = playing(3);
        let cues = touch_exit(&mut game);
        assert_eq!(game.screen(), Screen::LevelComplete);
        assert!(cues.contains(&SoundCue::LevelComplete));
        let currency = game.world().player.currency;
        assert_eq!(currency, LEVEL_COMPLETION_BONUS);
        assert_eq!(game.session().stats.currency, currency);

        // Level complete screen doesn't simulate
        game.frame(&idle(), FRAME_DT);
        assert_eq!(game.world().player.currency, currency);
    }

    #[test]
    fn test_next_level_keeps_stats() {
        let mut game = playing(3);
        game.world.player.health = 70;
        game.world.player.score = 300;
        touch_exit(&mut game);

        game.handle(UiAction::NextLevel);
        assert_eq!(game.screen(), Screen::Platforming);
        assert_eq!(game.world().level, 2);
        assert_eq!(game.world().width, 2500.0);
        assert_eq!(game.world().player.health, 70);
        assert_eq!(game.world().player.score, 300);
        assert_eq!(game.world().player.currency, 500);
        assert_eq!(game.world().player.rect.x, 100.0);
    }

    #[test]
    fn test_final_exit_ends_run() {
        let mut game = playing(3);
        game.enter_level(MAX_LEVEL);
        let cues = touch_exit(&mut game);
        assert_eq!(game.screen(), Screen::MainMenu);
        assert!(!cues.contains(&SoundCue::LevelComplete));
        assert!(game.session().stats.currency >= LEVEL_COMPLETION_BONUS);
    }

    #[test]
    fn test_abandon_run_keeps_currency() {
        let mut game = playing(3);
        touch_exit(&mut game);
        game.handle(UiAction::MainMenu);
        assert_eq!(game.screen(), Screen::MainMenu);
        assert_eq!(game.hud().currency, 500);
    }

    #[test]
    fn test_death_returns_to_menu_and_next_run_resets() {
        let mut game = playing(5);
        game.world.player.health = 0;
        game.world.player.score = 900;
        game.frame(&idle(), FRAME_DT);
        assert_eq!(game.screen(), Screen::MainMenu);

        game.handle(UiAction::NewGame);
        game.handle(UiAction::ConfirmName);
        game.handle(UiAction::StartGame);
        assert_eq!(game.world().player.health, MAX_HEALTH);
        assert_eq!(game.world().player.score, 0);
        assert_eq!(game.hud().score, 0);
    }

    #[test]
    fn test_pause_menu() {
        let mut game = playing(1);
        let pause = TickInput {
            pause: true,
            ..Default::default()
        };
        game.frame(&pause, FRAME_DT);
        assert!(game.is_paused());
        assert!(game.hud().paused);

        game.handle(UiAction::Resume);
        assert!(!game.is_paused());

        // Pause-menu actions need the pause menu to be open
        game.handle(UiAction::MainMenu);
        assert_eq!(game.screen(), Screen::Platforming);

        game.frame(&pause, FRAME_DT);
        game.handle(UiAction::MainMenu);
        assert_eq!(game.screen(), Screen::MainMenu);
        assert!(!game.world().paused);

        game.handle(UiAction::Quit);
        assert!(game.should_quit());
    }

    #[test]
    fn test_actions_for_other_screens_are_ignored() {
        let mut game = Game::new(1);
        game.handle(UiAction::NextLevel);
        game.handle(UiAction::StartGame);
        assert_eq!(game.screen(), Screen::MainMenu);
    }

    #[test]
    fn test_camera_uses_selected_resolution() {
        let mut game = Game::new(1);
        game.handle(UiAction::OpenSettings);
        game.handle(UiAction::CycleResolution);
        game.handle(UiAction::Back);
        game.handle(UiAction::NewGame);
        game.handle(UiAction::ConfirmName);
        game.handle(UiAction::StartGame);
        game.frame(&idle(), FRAME_DT);
        assert_eq!(game.world().viewport_width, 1920.0);
        // Level 1 is narrower than the viewport: camera pinned at the origin
        assert_eq!(game.world().camera_x, 0.0);
    }
}
