//! Robot configuration – reads `striker.toml`.
//!
//! Everything has a default except the robot identity.  A missing or
//! malformed team color, player number or team number is reported by
//! [`StrikerConfig::identity`] and stops the process before the first cycle.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use striker_runtime::{CycleOrchestratorConfig, TelemetryConfig};
use striker_types::{RobotIdentity, StrikerError, TeamColor};

/// File name used when neither the command line nor `STRIKER_CONFIG` names
/// a config file.
pub const DEFAULT_CONFIG_FILE: &str = "striker.toml";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StrikerConfig {
    #[serde(default)]
    pub robot: RobotSection,
    #[serde(default)]
    pub cycle: CycleSection,
    #[serde(default)]
    pub logging: LoggingSection,
    #[serde(default)]
    pub profiling: ProfilingSection,
}

/// Identity fields stay optional at parse time so that a missing value
/// surfaces as a configuration error naming the field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RobotSection {
    #[serde(default)]
    pub team_color: Option<String>,
    #[serde(default)]
    pub player_number: Option<u8>,
    #[serde(default)]
    pub team_number: Option<u8>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CycleSection {
    #[serde(default = "default_time_step_ms")]
    pub time_step_ms: u64,
    /// `0` runs until Ctrl-C.
    #[serde(default)]
    pub max_cycles: u64,
    #[serde(default)]
    pub feed_odometry: bool,
    #[serde(default)]
    pub startup_motion_delay: Option<u32>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Compact,
    Json,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LoggingSection {
    #[serde(default)]
    pub format: LogFormat,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub otlp_endpoint: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfilingSection {
    #[serde(default)]
    pub frames: Option<u32>,
}

fn default_time_step_ms() -> u64 {
    40
}

impl Default for CycleSection {
    fn default() -> Self {
        Self {
            time_step_ms: default_time_step_ms(),
            max_cycles: 0,
            feed_odometry: false,
            startup_motion_delay: None,
        }
    }
}

impl StrikerConfig {
    /// Validate and build the robot identity.
    pub fn identity(&self) -> Result<RobotIdentity, StrikerError> {
        let color: TeamColor = self
            .robot
            .team_color
            .as_deref()
            .ok_or_else(|| StrikerError::Config("robot.team_color is not set".into()))?
            .parse()?;
        let player = self
            .robot
            .player_number
            .ok_or_else(|| StrikerError::Config("robot.player_number is not set".into()))?;
        let team = self
            .robot
            .team_number
            .ok_or_else(|| StrikerError::Config("robot.team_number is not set".into()))?;
        RobotIdentity::new(color, player, team)
    }

    /// The fixed control-loop period.  Never zero.
    pub fn time_step(&self) -> Duration {
        Duration::from_millis(self.cycle.time_step_ms.max(1))
    }

    pub fn orchestrator_config(&self, identity: RobotIdentity) -> CycleOrchestratorConfig {
        CycleOrchestratorConfig {
            feed_odometry: self.cycle.feed_odometry,
            startup_motion_delay: self.cycle.startup_motion_delay,
            profile_frames: self.profiling.frames,
            ..CycleOrchestratorConfig::new(identity)
        }
    }

    pub fn telemetry(&self, service_name: &str) -> TelemetryConfig {
        TelemetryConfig {
            json: self.logging.format == LogFormat::Json,
            otlp_endpoint: self.logging.otlp_endpoint.clone(),
            ..TelemetryConfig::new(service_name)
        }
    }
}

/// Pick the config file: the command-line argument, else `STRIKER_CONFIG`,
/// else [`DEFAULT_CONFIG_FILE`].
pub fn resolve_path(arg: Option<String>, env: Option<String>) -> PathBuf {
    arg.or(env)
        .filter(|p| !p.trim().is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE))
}

/// Load `path` and apply environment overrides.
pub fn load(path: &Path) -> Result<StrikerConfig, StrikerError> {
    let mut cfg = load_from(path)?;
    apply_env_overrides(&mut cfg);
    Ok(cfg)
}

/// Parse the config at `path`.  A missing file yields the defaults, which
/// carry no identity.
pub(crate) fn load_from(path: &Path) -> Result<StrikerConfig, StrikerError> {
    if !path.exists() {
        return Ok(StrikerConfig::default());
    }
    let raw = fs::read_to_string(path).map_err(|e| {
        StrikerError::Config(format!("failed to read config at {}: {e}", path.display()))
    })?;
    toml::from_str(&raw).map_err(|e| {
        StrikerError::Config(format!("failed to parse config at {}: {e}", path.display()))
    })
}

/// Apply `STRIKER_*` environment variable overrides to `cfg`.
///
/// | Variable | Config field |
/// |---|---|
/// | `STRIKER_TEAM_COLOR` | `robot.team_color` |
/// | `STRIKER_PLAYER_NUMBER` | `robot.player_number` |
/// | `STRIKER_TEAM_NUMBER` | `robot.team_number` |
/// | `STRIKER_TIME_STEP_MS` | `cycle.time_step_ms` |
/// | `STRIKER_LOG_FORMAT=json` | `logging.format` |
/// | `OTEL_EXPORTER_OTLP_ENDPOINT` | `logging.otlp_endpoint`, when unset in the file |
///
/// Values that do not parse are ignored.
pub fn apply_env_overrides(cfg: &mut StrikerConfig) {
    if let Ok(v) = std::env::var("STRIKER_TEAM_COLOR")
        && v.parse::<TeamColor>().is_ok()
    {
        cfg.robot.team_color = Some(v);
    }
    if let Ok(v) = std::env::var("STRIKER_PLAYER_NUMBER")
        && let Ok(n) = v.parse::<u8>()
    {
        cfg.robot.player_number = Some(n);
    }
    if let Ok(v) = std::env::var("STRIKER_TEAM_NUMBER")
        && let Ok(n) = v.parse::<u8>()
    {
        cfg.robot.team_number = Some(n);
    }
    if let Ok(v) = std::env::var("STRIKER_TIME_STEP_MS")
        && let Ok(ms) = v.parse::<u64>()
    {
        cfg.cycle.time_step_ms = ms;
    }
    if std::env::var("STRIKER_LOG_FORMAT").as_deref() == Ok("json") {
        cfg.logging.format = LogFormat::Json;
    }
    if cfg.logging.otlp_endpoint.is_none()
        && let Ok(v) = std::env::var("OTEL_EXPORTER_OTLP_ENDPOINT")
    {
        cfg.logging.otlp_endpoint = Some(v);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_config(body: &str) -> (tempfile::TempDir, PathBuf) {
        let dir = tempfile::tempdir().expect("tmp dir");
        let path = dir.path().join("striker.toml");
        fs::write(&path, body).expect("write config");
        (dir, path)
    }

    #[test]
    fn full_config_parses() {
        let (_dir, path) = write_config(
            r#"
            [robot]
            team_color = "yellow"
            player_number = 3
            team_number = 12

            [cycle]
            time_step_ms = 20
            max_cycles = 500
            feed_odometry = true
            startup_motion_delay = 5

            [logging]
            format = "json"
            otlp_endpoint = "http://localhost:4318"

            [profiling]
            frames = 100
            "#,
        );
        let cfg = load_from(&path).unwrap();

        let id = cfg.identity().unwrap();
        assert_eq!(id.team_color(), TeamColor::Yellow);
        assert_eq!(id.player_number(), 3);
        assert_eq!(id.team_number(), 12);
        assert_eq!(cfg.time_step(), Duration::from_millis(20));
        assert_eq!(cfg.cycle.max_cycles, 500);

        let orch = cfg.orchestrator_config(id);
        assert!(orch.feed_odometry);
        assert_eq!(orch.startup_motion_delay, Some(5));
        assert_eq!(orch.profile_frames, Some(100));

        let tel = cfg.telemetry("striker");
        assert!(tel.json);
        assert_eq!(tel.otlp_endpoint.as_deref(), Some("http://localhost:4318"));
    }

    #[test]
    fn defaults_fill_everything_but_identity() {
        let (_dir, path) = write_config(
            r#"
            [robot]
            team_color = "blue"
            player_number = 1
            team_number = 1
            "#,
        );
        let cfg = load_from(&path).unwrap();
        assert_eq!(cfg.cycle, CycleSection::default());
        assert_eq!(cfg.cycle.time_step_ms, 40);
        assert_eq!(cfg.logging.format, LogFormat::Compact);
        assert!(cfg.profiling.frames.is_none());
        assert!(cfg.identity().is_ok());
    }

    #[test]
    fn missing_file_has_no_identity() {
        let dir = tempfile::tempdir().expect("tmp dir");
        let cfg = load_from(&dir.path().join("absent.toml")).unwrap();
        let err = cfg.identity().unwrap_err();
        assert!(err.to_string().contains("team_color"));
    }

    #[test]
    fn unknown_team_color_is_fatal() {
        let cfg = StrikerConfig {
            robot: RobotSection {
                team_color: Some("green".into()),
                player_number: Some(1),
                team_number: Some(1),
            },
            ..StrikerConfig::default()
        };
        assert!(matches!(cfg.identity(), Err(StrikerError::Config(_))));
    }

    #[test]
    fn player_number_out_of_range_is_fatal() {
        let cfg = StrikerConfig {
            robot: RobotSection {
                team_color: Some("blue".into()),
                player_number: Some(5),
                team_number: Some(1),
            },
            ..StrikerConfig::default()
        };
        assert!(matches!(cfg.identity(), Err(StrikerError::Config(_))));
    }

    #[test]
    fn malformed_toml_is_a_config_error() {
        let (_dir, path) = write_config("[robot]\nplayer_number = \"two\"\n");
        assert!(matches!(load_from(&path), Err(StrikerError::Config(_))));
    }

    #[test]
    fn zero_time_step_is_clamped() {
        let mut cfg = StrikerConfig::default();
        cfg.cycle.time_step_ms = 0;
        assert_eq!(cfg.time_step(), Duration::from_millis(1));
    }

    #[test]
    fn resolve_path_prefers_argument_then_env() {
        assert_eq!(
            resolve_path(Some("a.toml".into()), Some("b.toml".into())),
            PathBuf::from("a.toml")
        );
        assert_eq!(resolve_path(None, Some("b.toml".into())), PathBuf::from("b.toml"));
        assert_eq!(resolve_path(None, None), PathBuf::from(DEFAULT_CONFIG_FILE));
    }

    #[test]
    fn apply_env_overrides_reads_each_variable() {
        // SAFETY: this is the only test that sets or reads `STRIKER_*`
        // variables, and it sets and clears them one after another.
        unsafe { std::env::set_var("STRIKER_TEAM_COLOR", "Yellow") };
        let mut cfg = StrikerConfig::default();
        apply_env_overrides(&mut cfg);
        assert_eq!(cfg.robot.team_color.as_deref(), Some("Yellow"));
        unsafe { std::env::remove_var("STRIKER_TEAM_COLOR") };

        unsafe { std::env::set_var("STRIKER_TEAM_COLOR", "green") };
        let mut cfg = StrikerConfig::default();
        apply_env_overrides(&mut cfg);
        assert!(cfg.robot.team_color.is_none());
        unsafe { std::env::remove_var("STRIKER_TEAM_COLOR") };

        unsafe { std::env::set_var("STRIKER_PLAYER_NUMBER", "4") };
        let mut cfg = StrikerConfig::default();
        apply_env_overrides(&mut cfg);
        assert_eq!(cfg.robot.player_number, Some(4));
        unsafe { std::env::remove_var("STRIKER_PLAYER_NUMBER") };

        unsafe { std::env::set_var("STRIKER_TEAM_NUMBER", "17") };
        let mut cfg = StrikerConfig::default();
        apply_env_overrides(&mut cfg);
        assert_eq!(cfg.robot.team_number, Some(17));
        unsafe { std::env::remove_var("STRIKER_TEAM_NUMBER") };

        unsafe { std::env::set_var("STRIKER_TIME_STEP_MS", "fast") };
        let mut cfg = StrikerConfig::default();
        apply_env_overrides(&mut cfg);
        assert_eq!(cfg.cycle.time_step_ms, 40);
        unsafe { std::env::set_var("STRIKER_TIME_STEP_MS", "20") };
        apply_env_overrides(&mut cfg);
        assert_eq!(cfg.cycle.time_step_ms, 20);
        unsafe { std::env::remove_var("STRIKER_TIME_STEP_MS") };
    }
}
