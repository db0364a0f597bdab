use serde::{Serialize, Deserialize};
use std::path::PathBuf;

use crate::utils::http::BROWSER_USER_AGENT;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub fetch: FetchConfig,
    pub generation: GenerationConfig,
    pub pitch: PitchConfig,
    pub batch: BatchConfig,
    pub report: ReportConfig,
}

/// Site fetching settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    /// When false, no site is fetched and pitches are written from the company name alone.
    pub enabled: bool,
    pub timeout_secs: u64,
    pub user_agent: String,
    pub max_redirects: usize,
    pub max_text_chars: usize,
}

/// Generation backend settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub primary_model: String,
    pub fallback_model: String,
    pub timeout_secs: u64,
}

/// Sender persona and offer stated in every prompt
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PitchConfig {
    pub sender_company: String,
    pub sender_role: String,
    pub value_proposition: String,
    pub word_limit: usize,
}

/// Batch execution limits
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchConfig {
    pub max_concurrent: usize,
    pub token_timeout_secs: u64,
    pub requests_per_minute: u32,
}

/// Report output settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    pub output_dir: PathBuf,
    pub formats: Vec<String>,
    pub title: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            timeout_secs: 10,
            user_agent: BROWSER_USER_AGENT.to_string(),
            max_redirects: 5,
            max_text_chars: 4000,
        }
    }
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            primary_model: "gemini-1.5-flash".to_string(),
            fallback_model: "gemini-pro".to_string(),
            timeout_secs: 30,
        }
    }
}

impl Default for PitchConfig {
    fn default() -> Self {
        Self {
            sender_company: "LuSent AI Labs".to_string(),
            sender_role: "Senior B2B Sales Development Rep".to_string(),
            value_proposition: "AI Automation Services (Lead Gen, Chatbots, Workflow Automation)".to_string(),
            word_limit: 150,
        }
    }
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            max_concurrent: 4,
            token_timeout_secs: 90,
            requests_per_minute: 60,
        }
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("reports"),
            formats: vec!["csv".to_string()],
            title: "Outreach Leads".to_string(),
        }
    }
}
