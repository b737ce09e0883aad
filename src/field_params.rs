use serde::{Deserialize, Serialize};

const DEFAULT_FPS: f64 = 60.0;

// Parameters that define the ember field. These don't change at runtime.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct FieldParams {
    pub viewport_width: u32,
    pub viewport_height: u32,

    pub fps: f64,
    pub ember_count: usize,
    pub reset_interval_ms: u64,
    pub retry_delay_ms: u64,

    #[serde(default)]
    pub ember: EmberParams,
}

// Per-ember motion and flicker tuning.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct EmberParams {
    pub wobble_force: f32,
    pub damping: f32,
    pub max_velocity: f32,
    pub min_brightness: f32,
    pub max_brightness: f32,
    // Constant upward bias on the initial vertical velocity.
    pub drift: f32,
}

impl Default for EmberParams {
    fn default() -> Self {
        EmberParams {
            wobble_force: 0.025,
            damping: 0.97,
            max_velocity: 0.8,
            min_brightness: 0.2,
            max_brightness: 0.8,
            drift: 0.05,
        }
    }
}

impl FieldParams {
    pub fn reset_interval(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.reset_interval_ms)
    }

    pub fn retry_delay(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.retry_delay_ms)
    }

    // Falls back to the default rate when `fps` is not a positive number.
    pub fn frame_interval(&self) -> std::time::Duration {
        let fps = if self.fps.is_finite() && self.fps > 0.0 {
            self.fps
        } else {
            DEFAULT_FPS
        };
        std::time::Duration::from_secs_f64(1.0 / fps)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if !self.fps.is_finite() || self.fps <= 0.0 {
            anyhow::bail!("fps must be a positive number, got {}", self.fps);
        }
        Ok(())
    }
}

impl std::str::FromStr for FieldParams {
    type Err = anyhow::Error;
    fn from_str(serialized: &str) -> Result<Self, Self::Err> {
        let params: FieldParams = toml::from_str(serialized)?;
        params.validate()?;
        Ok(params)
    }
}

impl Default for FieldParams {
    fn default() -> Self {
        FieldParams {
            viewport_width: 1280,
            viewport_height: 720,
            fps: DEFAULT_FPS,
            ember_count: 6,
            reset_interval_ms: 60_000,
            retry_delay_ms: 100,
            ember: EmberParams::default(),
        }
    }
}

pub fn read_config_from_file(path: &str) -> anyhow::Result<FieldParams> {
    let params = std::fs::read_to_string(path)?.parse()?;
    Ok(params)
}

pub fn get_config_from_default_file() -> FieldParams {
    let config_data = include_str!("../embers_config.toml");
    match config_data.parse() {
        Ok(params) => params,
        Err(e) => {
            log::error!(
                "Failed to parse config file({}): {:?}",
                "../embers_config.toml",
                e
            );
            FieldParams::default()
        }
    }
}
