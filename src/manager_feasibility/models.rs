use std::fmt;
use std::str::FromStr;
use serde::{Deserialize, Serialize};

/// Construction activity with its own weather rules
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum JobType {
    Concrete,
    Painting,
    Steel,
    Waterproof,
    Tile,
    Welding,
    Formwork,
}

impl JobType {
    pub fn key(&self) -> &'static str {
        match self {
            JobType::Concrete => "concrete",
            JobType::Painting => "painting",
            JobType::Steel => "steel",
            JobType::Waterproof => "waterproof",
            JobType::Tile => "tile",
            JobType::Welding => "welding",
            JobType::Formwork => "formwork",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            JobType::Concrete => "콘크리트 타설",
            JobType::Painting => "도장 작업",
            JobType::Steel => "고소 작업",
            JobType::Waterproof => "방수 작업",
            JobType::Tile => "조적/타일 작업",
            JobType::Welding => "용접 작업",
            JobType::Formwork => "거푸집 작업",
        }
    }
}

impl FromStr for JobType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "concrete" => Ok(JobType::Concrete),
            "painting" => Ok(JobType::Painting),
            "steel" => Ok(JobType::Steel),
            "waterproof" => Ok(JobType::Waterproof),
            "tile" => Ok(JobType::Tile),
            "welding" => Ok(JobType::Welding),
            "formwork" => Ok(JobType::Formwork),
            _ => Err(format!("unknown job type: {}", s)),
        }
    }
}

/// What the user asked to have evaluated, a single job or every job in the catalog
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum JobSelection {
    All,
    Single(JobType),
}

pub const ALL_KEY: &str = "all";
pub const ALL_LABEL: &str = "전체 작업";

impl JobSelection {
    pub fn key(&self) -> &'static str {
        match self {
            JobSelection::All => ALL_KEY,
            JobSelection::Single(job) => job.key(),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            JobSelection::All => ALL_LABEL,
            JobSelection::Single(job) => job.label(),
        }
    }
}

impl FromStr for JobSelection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == ALL_KEY {
            Ok(JobSelection::All)
        } else {
            Ok(JobSelection::Single(s.parse()?))
        }
    }
}

/// Which revision of the rule table is in effect
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleSet {
    #[default]
    Current,
    Legacy,
}

impl RuleSet {
    /// Jobs known to this rule set, in display order
    pub fn catalog(&self) -> &'static [JobType] {
        match self {
            RuleSet::Current => &[
                JobType::Concrete,
                JobType::Painting,
                JobType::Steel,
                JobType::Waterproof,
                JobType::Tile,
                JobType::Welding,
                JobType::Formwork,
            ],
            RuleSet::Legacy => &[
                JobType::Concrete,
                JobType::Painting,
                JobType::Steel,
                JobType::Waterproof,
                JobType::Tile,
            ],
        }
    }

    pub fn supports(&self, job: JobType) -> bool {
        self.catalog().contains(&job)
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum WeldingMethod {
    Smaw,
    Gmaw,
    Tig,
}

impl WeldingMethod {
    pub fn key(&self) -> &'static str {
        match self {
            WeldingMethod::Smaw => "smaw",
            WeldingMethod::Gmaw => "gmaw",
            WeldingMethod::Tig => "tig",
        }
    }
}

impl FromStr for WeldingMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "smaw" => Ok(WeldingMethod::Smaw),
            "gmaw" | "co2" => Ok(WeldingMethod::Gmaw),
            "tig" => Ok(WeldingMethod::Tig),
            _ => Err(format!("unknown welding method: {}", s)),
        }
    }
}

/// Weather readings and site facts a verdict is based on
///
/// `avg_temp` and `rain_rate` are derived by the caller from the whole forecast,
/// when absent the evaluator falls back to the single observation.
#[derive(Debug, Clone, Default)]
pub struct Conditions {
    pub temp: f64,
    pub humidity: f64,
    pub wind: f64,
    pub rain: f64,
    pub avg_temp: Option<f64>,
    pub rain_rate: Option<f64>,
    pub welding_method: Option<WeldingMethod>,
    pub preheated: bool,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Permitted,
    Prohibited,
    Cautioned,
}

impl Status {
    pub fn glyph(&self) -> &'static str {
        match self {
            Status::Permitted => "✅",
            Status::Prohibited => "❌",
            Status::Cautioned => "⚠️",
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Verdict {
    pub status: Status,
    pub reason: &'static str,
}

impl Verdict {
    pub const fn permitted() -> Self {
        Verdict { status: Status::Permitted, reason: "작업 가능" }
    }

    pub const fn prohibited(reason: &'static str) -> Self {
        Verdict { status: Status::Prohibited, reason }
    }

    pub const fn cautioned(reason: &'static str) -> Self {
        Verdict { status: Status::Cautioned, reason }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} {}", self.status.glyph(), self.reason)
    }
}

/// Outcome for one observation under a job selection
#[derive(Debug, Clone, PartialEq)]
pub enum Judgement {
    Single(Verdict),
    Composite(Vec<(JobType, Verdict)>),
}

impl Judgement {
    /// Distinct statuses in this judgement, in order of appearance
    pub fn statuses(&self) -> Vec<Status> {
        let mut statuses: Vec<Status> = Vec::new();
        let mut push = |s: Status| if !statuses.contains(&s) { statuses.push(s) };
        match self {
            Judgement::Single(v) => push(v.status),
            Judgement::Composite(parts) => parts.iter().for_each(|(_, v)| push(v.status)),
        }
        statuses
    }
}

impl fmt::Display for Judgement {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Judgement::Single(v) => write!(f, "{}", v),
            Judgement::Composite(parts) => {
                let text = parts.iter()
                    .map(|(job, v)| format!("{}: {}", job.label(), v))
                    .collect::<Vec<String>>()
                    .join(" / ");
                write!(f, "{}", text)
            }
        }
    }
}
