use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A validated plan request. All three fields are non-empty and carried
/// exactly as the caller sent them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanRequest {
    pub topic: String,
    /// Opaque label. See [`Difficulty`] for the values the UI offers.
    pub difficulty: String,
    /// Free-form duration, e.g. "4 weeks".
    pub timeframe: String,
}

/// Difficulty labels offered by the frontend. Used for diagnostics only:
/// a request with any other non-empty label is still accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
}

impl FromStr for Difficulty {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "beginner" => Ok(Difficulty::Beginner),
            "intermediate" => Ok(Difficulty::Intermediate),
            "advanced" => Ok(Difficulty::Advanced),
            _ => Err(()),
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Difficulty::Beginner => "beginner",
            Difficulty::Intermediate => "intermediate",
            Difficulty::Advanced => "advanced",
        };
        f.write_str(label)
    }
}

/// A multi-week study plan.
///
/// Model output is returned to callers as extracted, without being forced
/// through this type; it exists for the fallback plan and for consumers that
/// want a typed view of a response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LearningPlan {
    pub title: String,
    pub topic: String,
    pub difficulty: String,
    pub duration: String,
    pub weeks: Vec<WeekPlan>,
    pub resources: Vec<ResourceRef>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeekPlan {
    pub week: u32,
    pub focus: String,
    pub activities: Vec<Activity>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    pub name: String,
    pub description: String,
    pub resources: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceRef {
    pub name: String,
    #[serde(rename = "type")]
    pub resource_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

pub const FALLBACK_FOCUS: &str = "Getting Started";
pub const FALLBACK_ACTIVITY: &str = "Introduction";

impl LearningPlan {
    /// The deterministic minimal plan returned when the model is too slow or
    /// its output cannot be parsed.
    pub fn fallback(request: &PlanRequest) -> Self {
        LearningPlan {
            title: format!("Learning Plan for {}", request.topic),
            topic: request.topic.clone(),
            difficulty: request.difficulty.clone(),
            duration: request.timeframe.clone(),
            weeks: vec![WeekPlan {
                week: 1,
                focus: FALLBACK_FOCUS.to_string(),
                activities: vec![Activity {
                    name: FALLBACK_ACTIVITY.to_string(),
                    description: format!("Learn the basics of {}", request.topic),
                    resources: vec![],
                }],
            }],
            resources: vec![],
        }
    }
}
