//! Director plugin: wave spawning, boss trigger, portal, and level/session flow.
//!
//! Per tick (`SimSet::Director`, before the enemies move) exactly one of:
//! - spawn: quota not reached and the spawn timer ran out
//! - boss: quota reached, nobody alive, boss level, no boss yet
//! - portal: quota reached, nobody alive, boss dealt with, no portal yet
//!
//! `check_terminal` runs late in the tick (`SimSet::Terminal`) and turns a dead
//! player or a player standing in the portal into a `SessionOutcome` plus a
//! state change. Recording an outcome closes the tick chain until the next
//! transition into `Playing` clears it.

use bevy::prelude::*;
use rand::Rng;
use serde::Serialize;

use crate::common::math::{aabb, clamp, rects_overlap};
use crate::common::state::GameState;
use crate::common::tunables::Tunables;
use crate::plugins::camera::CameraRig;
use crate::plugins::core::{LevelScoped, SimRng, SimSet};
use crate::plugins::cues::Cue;
use crate::plugins::enemies::{spawn_zombie, Zombie, ZombieKind};
use crate::plugins::physics::Actor;
use crate::plugins::player::{spawn_player, Player, PlayerController, PLAYER_START_X};

/// Chance a regular spawn lands ahead of (to the right of) the player.
const AHEAD_CHANCE: f64 = 0.7;
/// How far ahead of the player the boss appears.
const BOSS_LEAD: f32 = 500.0;
/// Expected score per enemy of the quota, for ranking.
const EXPECTED_SCORE_PER_ENEMY: u32 = 100;

pub const PORTAL_SIZE: Vec2 = Vec2::new(60.0, 80.0);
/// Portal distance from the level's right edge.
const PORTAL_INSET: f32 = 150.0;
/// Pulse phase advance per tick.
const PORTAL_PULSE_STEP: f32 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum LevelTheme {
    #[default]
    Graveyard,
    City,
    Forest,
}

impl LevelTheme {
    /// Themes cycle every three levels, starting at level 1.
    pub fn for_level(level: u32) -> Self {
        match level.saturating_sub(1) % 3 {
            0 => Self::Graveyard,
            1 => Self::City,
            _ => Self::Forest,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Rank {
    S,
    A,
    B,
    C,
}

impl Rank {
    /// Rank for `score / expected`.
    pub fn from_ratio(ratio: f32) -> Self {
        if ratio >= 1.5 {
            Self::S
        } else if ratio >= 1.2 {
            Self::A
        } else if ratio >= 0.8 {
            Self::B
        } else {
            Self::C
        }
    }

    pub fn letter(self) -> char {
        match self {
            Self::S => 'S',
            Self::A => 'A',
            Self::B => 'B',
            Self::C => 'C',
        }
    }
}

/// Per-level director state. Replaced wholesale whenever a level begins.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct LevelProgress {
    pub level: u32,
    pub theme: LevelTheme,
    pub target: u32,
    pub spawned: u32,
    pub spawn_timer: u32,
    pub spawn_interval: u32,
    pub boss_spawned: bool,
    pub portal_opened: bool,
    /// Ticks played on this level. Paused ticks are not counted.
    pub elapsed_ticks: u64,
    /// Session score when the level began; rank uses the difference.
    pub score_at_start: u32,
}

impl LevelProgress {
    pub fn begin(level: u32, score_at_start: u32, tunables: &Tunables) -> Self {
        let spawn_interval = tunables.spawn_interval(level);
        Self {
            level,
            theme: LevelTheme::for_level(level),
            target: tunables.enemy_quota(level),
            spawned: 0,
            spawn_timer: spawn_interval,
            spawn_interval,
            boss_spawned: false,
            portal_opened: false,
            elapsed_ticks: 0,
            score_at_start,
        }
    }

    #[inline]
    pub fn boss_required(&self, tunables: &Tunables) -> bool {
        self.level % tunables.boss_interval == 0
    }

    #[inline]
    pub fn quota_reached(&self) -> bool {
        self.spawned >= self.target
    }

    /// Score the player is expected to earn on this level.
    #[inline]
    pub fn expected_score(&self) -> u32 {
        (self.target * EXPECTED_SCORE_PER_ENEMY).max(1)
    }
}

impl FromWorld for LevelProgress {
    fn from_world(world: &mut World) -> Self {
        let tunables = world.get_resource::<Tunables>().cloned().unwrap_or_default();
        Self::begin(1, 0, &tunables)
    }
}

/// Session-wide totals. Carried across levels, reset when a session starts.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SessionStats {
    pub score: u32,
    pub kills: u32,
    pub max_combo: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LevelSummary {
    pub level: u32,
    pub elapsed_secs: f32,
    pub kills: u32,
    pub max_combo: u32,
    pub score: u32,
    pub rank: Rank,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GameOverSummary {
    pub level: u32,
    pub score: u32,
    pub kills: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum Outcome {
    LevelComplete(LevelSummary),
    GameOver(GameOverSummary),
}

/// How the current level ended, if it has.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq)]
pub struct SessionOutcome(pub Option<Outcome>);

/// Level exit. At most one per level.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Portal {
    pub pos: Vec2,
    pub size: Vec2,
    pub active: bool,
    /// Animation phase, advanced every tick.
    pub pulse: f32,
}

impl Portal {
    pub fn at_level_end(tunables: &Tunables) -> Self {
        Self {
            pos: Vec2::new(tunables.level_length - PORTAL_INSET, tunables.ground_y - PORTAL_SIZE.y),
            size: PORTAL_SIZE,
            active: true,
            pulse: 0.0,
        }
    }

    #[inline]
    pub fn bounds(&self) -> Rect {
        aabb(self.pos, self.size)
    }
}

pub fn plugin(app: &mut App) {
    app.init_resource::<LevelProgress>()
        .init_resource::<SessionStats>()
        .init_resource::<SessionOutcome>();

    app.add_systems(FixedUpdate, direct_level.in_set(SimSet::Director))
        .add_systems(FixedUpdate, check_terminal.in_set(SimSet::Terminal));

    app.add_systems(
        OnTransition { exited: GameState::Menu, entered: GameState::Playing },
        begin_session,
    )
    .add_systems(
        OnTransition { exited: GameState::GameOver, entered: GameState::Playing },
        begin_session,
    )
    .add_systems(
        OnTransition { exited: GameState::Complete, entered: GameState::Playing },
        advance_level,
    );
}

/// Where a regular spawn lands: a random distance ahead of (usually) or
/// behind the player, flipped to the other side if it would leave the level.
pub fn spawn_x(player_x: f32, width: f32, rng: &mut SimRng, tunables: &Tunables) -> f32 {
    let max_x = tunables.level_length - width;
    let distance = rng.0.gen_range(tunables.spawn_min_buffer..=tunables.spawn_max_distance);
    let dir = if rng.0.gen_bool(AHEAD_CHANCE) { 1.0 } else { -1.0 };

    let mut x = player_x + dir * distance;
    if x < 0.0 || x > max_x {
        x = player_x - dir * distance;
    }
    clamp(x, 0.0, max_x)
}

/// Where the boss lands: `BOSS_LEAD` ahead of the player, or the same
/// distance behind when the level ends first. On a level too short for
/// either it takes the edge farther from the player.
pub fn boss_x(player: &Actor, tunables: &Tunables) -> f32 {
    let max_x = tunables.level_length - ZombieKind::Boss.stats().size.x;
    let ahead = player.pos.x + BOSS_LEAD;
    let behind = player.pos.x - BOSS_LEAD;
    if ahead <= max_x {
        ahead
    } else if behind >= 0.0 {
        behind
    } else if player.center().x < tunables.level_length * 0.5 {
        max_x
    } else {
        0.0
    }
}

/// Spawn timer, boss trigger and portal opening.
pub fn direct_level(
    mut commands: Commands,
    tunables: Res<Tunables>,
    mut rng: ResMut<SimRng>,
    mut progress: ResMut<LevelProgress>,
    q_player: Query<&Actor, With<Player>>,
    q_enemies: Query<&Actor, (With<Zombie>, Without<Player>)>,
    mut q_portals: Query<&mut Portal>,
    mut cues: MessageWriter<Cue>,
) {
    let t = &*tunables;
    progress.elapsed_ticks += 1;

    for mut portal in &mut q_portals {
        portal.pulse += PORTAL_PULSE_STEP;
    }

    let Ok(player) = q_player.single() else {
        return;
    };

    if !progress.quota_reached() {
        if progress.spawn_timer > 0 {
            progress.spawn_timer -= 1;
        }
        if progress.spawn_timer == 0 {
            let pool = ZombieKind::pool_for_level(progress.level);
            let kind = pool[rng.0.gen_range(0..pool.len())];
            let x = spawn_x(player.pos.x, kind.stats().size.x, &mut rng, t);
            spawn_zombie(&mut commands, kind, x, t);
            progress.spawned += 1;
            progress.spawn_timer = progress.spawn_interval;
            debug!("spawned {kind:?} at x={x:.0} ({}/{})", progress.spawned, progress.target);
        }
        return;
    }

    let alive = q_enemies.iter().filter(|body| !body.is_dead()).count();
    if alive > 0 {
        return;
    }

    if progress.boss_required(t) && !progress.boss_spawned {
        let x = boss_x(player, t);
        spawn_zombie(&mut commands, ZombieKind::Boss, x, t);
        progress.boss_spawned = true;
        info!("boss spawned on level {} at x={x:.0}", progress.level);
    } else if !progress.portal_opened {
        let portal = Portal::at_level_end(t);
        commands.spawn((Name::new("Portal"), portal, LevelScoped));
        progress.portal_opened = true;
        cues.write(Cue::Portal);
        info!("portal opened on level {} at {:?}", progress.level, portal.pos);
    }
}

/// Death first, then the portal.
pub fn check_terminal(
    tunables: Res<Tunables>,
    progress: Res<LevelProgress>,
    stats: Res<SessionStats>,
    mut outcome: ResMut<SessionOutcome>,
    mut next_state: ResMut<NextState<GameState>>,
    q_player: Query<&Actor, With<Player>>,
    q_portals: Query<&Portal>,
    mut cues: MessageWriter<Cue>,
) {
    let Ok(player) = q_player.single() else {
        return;
    };

    if player.is_dead() {
        let summary = GameOverSummary { level: progress.level, score: stats.score, kills: stats.kills };
        info!("game over on level {}: score {}, kills {}", summary.level, summary.score, summary.kills);
        outcome.0 = Some(Outcome::GameOver(summary));
        cues.write(Cue::GameOver);
        next_state.set(GameState::GameOver);
        return;
    }

    let bounds = player.bounds();
    let entered = q_portals
        .iter()
        .any(|portal| portal.active && rects_overlap(&bounds, &portal.bounds()));
    if !entered {
        return;
    }

    let level_score = stats.score.saturating_sub(progress.score_at_start);
    let rank = Rank::from_ratio(level_score as f32 / progress.expected_score() as f32);
    let summary = LevelSummary {
        level: progress.level,
        elapsed_secs: tunables.ticks_to_secs(progress.elapsed_ticks),
        kills: stats.kills,
        max_combo: stats.max_combo,
        score: stats.score,
        rank,
    };
    info!(
        "level {} complete in {:.1}s, rank {}",
        summary.level,
        summary.elapsed_secs,
        rank.letter()
    );
    outcome.0 = Some(Outcome::LevelComplete(summary));
    cues.write(Cue::LevelComplete);
    next_state.set(GameState::Complete);
}

/// Fresh session: new player, zeroed stats, level 1.
pub fn begin_session(
    mut commands: Commands,
    tunables: Res<Tunables>,
    mut progress: ResMut<LevelProgress>,
    mut stats: ResMut<SessionStats>,
    mut outcome: ResMut<SessionOutcome>,
    mut camera: ResMut<CameraRig>,
    q_players: Query<Entity, With<Player>>,
    q_scoped: Query<Entity, With<LevelScoped>>,
) {
    for e in q_players.iter().chain(q_scoped.iter()) {
        commands.entity(e).despawn();
    }

    spawn_player(&mut commands, &tunables);
    *stats = SessionStats::default();
    *progress = LevelProgress::begin(1, 0, &tunables);
    outcome.0 = None;
    camera.reset();

    info!("session started: level 1 ({:?}), {} enemies", progress.theme, progress.target);
}

/// Next level: keep the player, patch them up, clear the stage.
pub fn advance_level(
    mut commands: Commands,
    tunables: Res<Tunables>,
    mut progress: ResMut<LevelProgress>,
    stats: Res<SessionStats>,
    mut outcome: ResMut<SessionOutcome>,
    mut camera: ResMut<CameraRig>,
    mut q_player: Query<(&mut Actor, &mut PlayerController), With<Player>>,
    q_scoped: Query<Entity, With<LevelScoped>>,
) {
    for e in &q_scoped {
        commands.entity(e).despawn();
    }

    let t = &*tunables;
    if let Ok((mut body, mut controller)) = q_player.single_mut() {
        let restore = (body.max_health() as f32 * t.restore_health_fraction) as i32;
        body.heal(restore);
        body.place_standing(PLAYER_START_X, t);
        controller.reset_stance();
    }

    *progress = LevelProgress::begin(progress.level + 1, stats.score, t);
    outcome.0 = None;
    camera.reset();

    info!(
        "level {} started ({:?}), {} enemies, spawn every {} ticks",
        progress.level, progress.theme, progress.target, progress.spawn_interval
    );
}
