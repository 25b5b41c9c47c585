use crate::error::SkyPulseError;
use ratatui::style::Color;
use serde::{Deserialize, Serialize};

/// Which visual mode the dashboard is in. Calm pins the neutral light theme.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayMode {
    #[default]
    Vivid,
    Calm,
}

impl DisplayMode {
    pub fn toggle(self) -> Self {
        match self {
            DisplayMode::Vivid => DisplayMode::Calm,
            DisplayMode::Calm => DisplayMode::Vivid,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DisplayMode::Vivid => "vivid",
            DisplayMode::Calm => "calm",
        }
    }
}

impl std::str::FromStr for DisplayMode {
    type Err = SkyPulseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "vivid" => Ok(DisplayMode::Vivid),
            "calm" => Ok(DisplayMode::Calm),
            other => Err(SkyPulseError::Config(format!(
                "unknown display mode '{}', expected vivid or calm",
                other
            ))),
        }
    }
}

impl std::fmt::Display for DisplayMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Activity {
    Running,
    Cycling,
    Driving,
}

impl Activity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Activity::Running => "Running",
            Activity::Cycling => "Cycling",
            Activity::Driving => "Driving",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AdviceVerdict {
    Go,
    Caution,
    Avoid,
}

impl AdviceVerdict {
    pub fn as_str(&self) -> &'static str {
        match self {
            AdviceVerdict::Go => "Go",
            AdviceVerdict::Caution => "Caution",
            AdviceVerdict::Avoid => "Avoid",
        }
    }

    pub fn color(&self) -> Color {
        match self {
            AdviceVerdict::Go => Color::Green,
            AdviceVerdict::Caution => Color::Yellow,
            AdviceVerdict::Avoid => Color::Red,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            AdviceVerdict::Go => "✓",
            AdviceVerdict::Caution => "⚠",
            AdviceVerdict::Avoid => "✗",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActivityAdvice {
    pub activity: Activity,
    pub verdict: AdviceVerdict,
    pub note: &'static str,
}

impl ActivityAdvice {
    pub fn new(activity: Activity, verdict: AdviceVerdict, note: &'static str) -> Self {
        Self {
            activity,
            verdict,
            note,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Severity {
    Info,
    Warning,
    Critical,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Info => "Info",
            Severity::Warning => "Warning",
            Severity::Critical => "Critical",
        }
    }

    pub fn color(&self) -> Color {
        match self {
            Severity::Info => Color::Gray,
            Severity::Warning => Color::Yellow,
            Severity::Critical => Color::Red,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Severity::Info => "ℹ",
            Severity::Warning => "⚠",
            Severity::Critical => "!",
        }
    }
}

/// Banner shown above the dashboard; exactly one at a time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum AtmosphericAlert {
    HazardousAir { aqi: f64 },
    CriticalUv { uv: f64 },
    HighWind { speed_kmh: f64 },
    ExtremeHeat { temp_c: f64 },
    Stable,
}

impl AtmosphericAlert {
    pub fn severity(&self) -> Severity {
        match self {
            AtmosphericAlert::HazardousAir { .. } | AtmosphericAlert::ExtremeHeat { .. } => {
                Severity::Critical
            }
            AtmosphericAlert::CriticalUv { .. } | AtmosphericAlert::HighWind { .. } => {
                Severity::Warning
            }
            AtmosphericAlert::Stable => Severity::Info,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            AtmosphericAlert::HazardousAir { .. } => "Hazardous Air Quality",
            AtmosphericAlert::CriticalUv { .. } => "Critical UV Levels",
            AtmosphericAlert::HighWind { .. } => "High Wind Advisory",
            AtmosphericAlert::ExtremeHeat { .. } => "Extreme Heat",
            AtmosphericAlert::Stable => "Atmosphere Stable",
        }
    }

    pub fn message(&self) -> String {
        match self {
            AtmosphericAlert::HazardousAir { aqi } => {
                format!("AQI {:.0}. Stay indoors and keep windows closed.", aqi)
            }
            AtmosphericAlert::CriticalUv { uv } => {
                format!("UV index {:.1}. Cover up and seek shade at midday.", uv)
            }
            AtmosphericAlert::HighWind { speed_kmh } => {
                format!("Winds at {:.0} km/h. Secure loose objects.", speed_kmh)
            }
            AtmosphericAlert::ExtremeHeat { temp_c } => {
                format!("{:.1}°C outside. Hydrate and avoid exertion.", temp_c)
            }
            AtmosphericAlert::Stable => "No atmospheric hazards detected.".to_string(),
        }
    }

    pub fn is_stable(&self) -> bool {
        matches!(self, AtmosphericAlert::Stable)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    Yes,
    Limited,
    No,
    Wait,
}

impl Verdict {
    pub fn as_str(&self) -> &'static str {
        match self {
            Verdict::Yes => "YES",
            Verdict::Limited => "LIMITED",
            Verdict::No => "NO",
            Verdict::Wait => "WAIT",
        }
    }

    pub fn color(&self) -> Color {
        match self {
            Verdict::Yes => Color::Green,
            Verdict::Limited => Color::Yellow,
            Verdict::No => Color::Red,
            Verdict::Wait => Color::DarkGray,
        }
    }
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Answer to "should I go outside?"
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Decision {
    pub verdict: Verdict,
    pub title: &'static str,
    pub reason: &'static str,
    pub time_anchor: &'static str,
}

impl Decision {
    pub fn new(
        verdict: Verdict,
        title: &'static str,
        reason: &'static str,
        time_anchor: &'static str,
    ) -> Self {
        Self {
            verdict,
            title,
            reason,
            time_anchor,
        }
    }
}

/// Style token picked from weather code, AQI band and display mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ThemeClass {
    NeutralLight,
    #[default]
    NeutralDark,
    HazardRed,
    WarningAmber,
    Rain,
    Snow,
    Clear,
}

impl ThemeClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            ThemeClass::NeutralLight => "neutral-light",
            ThemeClass::NeutralDark => "neutral-dark",
            ThemeClass::HazardRed => "hazard-red",
            ThemeClass::WarningAmber => "warning-amber",
            ThemeClass::Rain => "rain",
            ThemeClass::Snow => "snow",
            ThemeClass::Clear => "clear",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DerivedSummary {
    pub score: u8,
    pub advice: Vec<ActivityAdvice>,
    pub alert: AtmosphericAlert,
    pub improvement: Option<String>,
    pub decision: Decision,
    pub theme: ThemeClass,
}

impl Default for DerivedSummary {
    fn default() -> Self {
        Self {
            score: 0,
            advice: Vec::new(),
            alert: AtmosphericAlert::Stable,
            improvement: None,
            decision: Decision::new(
                Verdict::Wait,
                "Waiting for data",
                "Weather data has not loaded yet",
                "Shortly",
            ),
            theme: ThemeClass::default(),
        }
    }
}
