//! Run configuration.
//!
//! `RunConfig::default()` reproduces the original arcade tuning. Every section
//! can be overridden from JSON; missing fields fall back to the defaults.

use serde::{Deserialize, Serialize};

use crate::prop::PropKind;

/// Error type for configuration validation.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("viewport must be positive, got {width}x{height}")]
    InvalidViewport { width: f32, height: f32 },
    #[error("viewport height {height} leaves no coin band with margin {margin}")]
    CoinBandEmpty { height: f32, margin: f32 },
    #[error("{entity} dimension must be positive, got {value}")]
    InvalidDimension { entity: &'static str, value: f32 },
    #[error("{entity} lookahead needs positive lead and span (lead={lead}, span={span})")]
    InvalidLookahead {
        entity: &'static str,
        lead: f32,
        span: f32,
    },
    #[error("{entity} range [{min}, {max}] is empty")]
    EmptyRange {
        entity: &'static str,
        min: f32,
        max: f32,
    },
    #[error("teleport modulus {modulus} must exceed {required}")]
    ModulusTooSmall { modulus: f32, required: f32 },
    #[error("coin pool must hold at least one coin")]
    EmptyCoinPool,
    #[error("coin count range {min}..={max} is invalid for a pool of {pool}")]
    InvalidCoinCount { min: usize, max: usize, pool: usize },
    #[error("invalid config json: {0}")]
    Json(#[from] serde_json::Error),
}

/// Distance between the viewport's right edge and the start of a lookahead window.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Lead {
    /// Lead by the entity's own width.
    Width,
    /// Lead by a fixed distance.
    Fixed { distance: f32 },
}

/// Window ahead of the viewport where a recycled entity may reappear.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Lookahead {
    pub lead: Lead,
    pub span: f32,
}

impl Lookahead {
    pub const fn by_width(span: f32) -> Self {
        Self {
            lead: Lead::Width,
            span,
        }
    }

    pub const fn fixed(distance: f32, span: f32) -> Self {
        Self {
            lead: Lead::Fixed { distance },
            span,
        }
    }

    /// Resolved lead for an entity of the given width.
    pub fn lead_for(&self, width: f32) -> f32 {
        match self.lead {
            Lead::Width => width,
            Lead::Fixed { distance } => distance,
        }
    }

    /// Inclusive `[min, max]` x-range for an entity of `width` given the viewport's right edge.
    pub fn range(&self, right_edge: f32, width: f32) -> (f32, f32) {
        let min = right_edge + self.lead_for(width);
        (min, min + self.span)
    }

    /// Furthest distance past the right edge this window can place an entity.
    pub fn reach(&self, width: f32) -> f32 {
        self.lead_for(width) + self.span + width
    }

    fn validate(&self, entity: &'static str, width: f32) -> Result<(), ConfigError> {
        let lead = self.lead_for(width);
        if lead <= 0.0 || self.span <= 0.0 {
            return Err(ConfigError::InvalidLookahead {
                entity,
                lead,
                span: self.span,
            });
        }
        Ok(())
    }
}

/// Viewport dimensions in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewportConfig {
    pub width: f32,
    pub height: f32,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 640.0,
        }
    }
}

/// Background tiling that determines the teleport modulus.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TeleportConfig {
    pub tile_width: f32,
    pub tile_count: u32,
}

impl TeleportConfig {
    /// Scroll distance after which the world is shifted back.
    #[allow(clippy::cast_precision_loss)]
    pub fn modulus(&self) -> f32 {
        self.tile_width * self.tile_count as f32
    }
}

impl Default for TeleportConfig {
    fn default() -> Self {
        // 340 * 7 = 2380
        Self {
            tile_width: 340.0,
            tile_count: 7,
        }
    }
}

/// A single background decoration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PropConfig {
    pub kind: PropKind,
    pub width: f32,
    pub y: f32,
    /// Inclusive x-range used for the first placement.
    pub initial_x: [f32; 2],
    pub lookahead: Lookahead,
}

impl PropConfig {
    pub fn mouse_hole() -> Self {
        Self {
            kind: PropKind::MouseHole,
            width: 90.0,
            y: 501.0,
            initial_x: [900.0, 1500.0],
            lookahead: Lookahead::fixed(100.0, 900.0),
        }
    }

    pub fn window(initial_x: [f32; 2]) -> Self {
        Self {
            kind: PropKind::Window,
            width: 170.0,
            y: 200.0,
            initial_x,
            lookahead: Lookahead::by_width(800.0),
        }
    }

    pub fn bookcase(initial_x: [f32; 2]) -> Self {
        Self {
            kind: PropKind::Bookcase,
            width: 150.0,
            y: 580.0,
            initial_x,
            lookahead: Lookahead::by_width(800.0),
        }
    }

    /// Declared order of the default room: hole, two windows, two bookcases.
    pub fn default_room() -> Vec<Self> {
        vec![
            Self::mouse_hole(),
            Self::window([900.0, 1300.0]),
            Self::window([1600.0, 2000.0]),
            Self::bookcase([2200.0, 2700.0]),
            Self::bookcase([2900.0, 3400.0]),
        ]
    }
}

/// The periodic hazard.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HazardConfig {
    pub width: f32,
    pub height: f32,
    /// Height of the top and bottom end caps.
    pub end_height: f32,
    /// Body position relative to the visual anchor.
    pub body_offset: [f32; 2],
    pub initial_position: [f32; 2],
    pub lookahead: Lookahead,
    pub y_range: [f32; 2],
}

impl Default for HazardConfig {
    fn default() -> Self {
        Self {
            width: 64.0,
            height: 260.0,
            end_height: 28.0,
            body_offset: [-32.0, 0.0],
            initial_position: [900.0, 100.0],
            lookahead: Lookahead::by_width(1000.0),
            y_range: [0.0, 300.0],
        }
    }
}

/// The collectible coin pool.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CoinConfig {
    pub pool_size: usize,
    pub width: f32,
    /// Inclusive range for the random count picked by `spawn`.
    pub count_range: [usize; 2],
    /// Gap between the viewport's right edge and the first coin.
    pub first_gap: f32,
    /// Horizontal step between coins, in coin widths.
    pub spacing: f32,
    /// Distance kept free at the top and bottom of the viewport.
    pub band_margin: f32,
}

impl CoinConfig {
    pub fn step(&self) -> f32 {
        self.width * self.spacing
    }
}

impl Default for CoinConfig {
    fn default() -> Self {
        Self {
            pool_size: 20,
            width: 42.0,
            count_range: [1, 20],
            first_gap: 100.0,
            spacing: 1.5,
            band_margin: 100.0,
        }
    }
}

/// Player sprite dimensions and motion tuning.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayerConfig {
    pub sprite_width: f32,
    pub sprite_height: f32,
    pub flames_offset: [f32; 2],
    /// Distance between the spawn point (feet) and the bottom of the viewport.
    pub floor_inset: f32,
    pub run_speed: f32,
    /// Vertical acceleration while the jetpack fires (negative is up).
    pub thrust: f32,
    /// Horizontal velocity applied on the killing hit.
    pub kill_push: f32,
    /// Per-tick multiplier applied to horizontal velocity while dying.
    pub decay: f32,
    pub stop_threshold: f32,
}

impl PlayerConfig {
    /// Body footprint: half the sprite width and 70% of its height.
    pub fn body_size(&self) -> [f32; 2] {
        [self.sprite_width * 0.5, self.sprite_height * 0.7]
    }

    /// Body offset from the feet anchor.
    pub fn body_offset(&self) -> [f32; 2] {
        [self.sprite_width * -0.3, -self.sprite_height + 15.0]
    }
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            sprite_width: 134.0,
            sprite_height: 100.0,
            flames_offset: [-63.0, -15.0],
            floor_inset: 30.0,
            run_speed: 200.0,
            thrust: -600.0,
            kill_push: 1000.0,
            decay: 0.99,
            stop_threshold: 5.0,
        }
    }
}

/// Complete configuration of a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    pub viewport: ViewportConfig,
    pub teleport: TeleportConfig,
    pub props: Vec<PropConfig>,
    pub hazard: HazardConfig,
    pub coins: CoinConfig,
    pub player: PlayerConfig,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            viewport: ViewportConfig::default(),
            teleport: TeleportConfig::default(),
            props: PropConfig::default_room(),
            hazard: HazardConfig::default(),
            coins: CoinConfig::default(),
            player: PlayerConfig::default(),
        }
    }
}

impl RunConfig {
    /// Parses and validates a config from JSON.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn modulus(&self) -> f32 {
        self.teleport.modulus()
    }

    /// Checks the invariants the recycling and teleport logic rely on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let ViewportConfig { width, height } = self.viewport;
        if width <= 0.0 || height <= 0.0 {
            return Err(ConfigError::InvalidViewport { width, height });
        }

        let mut reach = width;
        for prop in &self.props {
            positive(prop.kind.label(), prop.width)?;
            prop.lookahead.validate(prop.kind.label(), prop.width)?;
            ordered(prop.kind.label(), prop.initial_x)?;
            reach = reach.max(prop.lookahead.reach(prop.width));
        }

        let hazard = &self.hazard;
        positive("hazard", hazard.width)?;
        positive("hazard", hazard.height)?;
        if hazard.end_height < 0.0 || hazard.end_height * 2.0 > hazard.height {
            return Err(ConfigError::InvalidDimension {
                entity: "hazard end cap",
                value: hazard.end_height,
            });
        }
        hazard.lookahead.validate("hazard", hazard.width)?;
        ordered("hazard y", hazard.y_range)?;
        reach = reach.max(hazard.lookahead.reach(hazard.width));

        let modulus = self.modulus();
        if modulus <= reach {
            return Err(ConfigError::ModulusTooSmall {
                modulus,
                required: reach,
            });
        }

        let coins = &self.coins;
        if coins.pool_size == 0 {
            return Err(ConfigError::EmptyCoinPool);
        }
        let [min, max] = coins.count_range;
        if min == 0 || min > max || max > coins.pool_size {
            return Err(ConfigError::InvalidCoinCount {
                min,
                max,
                pool: coins.pool_size,
            });
        }
        positive("coin", coins.width)?;
        positive("coin spacing", coins.spacing)?;
        if coins.first_gap <= 0.0 {
            return Err(ConfigError::InvalidLookahead {
                entity: "coin",
                lead: coins.first_gap,
                span: coins.step(),
            });
        }
        if height <= coins.band_margin * 2.0 {
            return Err(ConfigError::CoinBandEmpty {
                height,
                margin: coins.band_margin,
            });
        }

        positive("player sprite", self.player.sprite_width)?;
        positive("player sprite", self.player.sprite_height)?;
        if !(0.0..1.0).contains(&self.player.decay) {
            return Err(ConfigError::InvalidDimension {
                entity: "player decay",
                value: self.player.decay,
            });
        }
        positive("player stop threshold", self.player.stop_threshold)?;

        Ok(())
    }
}

fn positive(entity: &'static str, value: f32) -> Result<(), ConfigError> {
    if value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidDimension { entity, value })
    }
}

fn ordered(entity: &'static str, [min, max]: [f32; 2]) -> Result<(), ConfigError> {
    if min <= max {
        Ok(())
    } else {
        Err(ConfigError::EmptyRange { entity, min, max })
    }
}
