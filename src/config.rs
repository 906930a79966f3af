//! Scoring configuration
//!
//! Loaded from JSON; every field falls back to its default when absent.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::RecitationError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    /// Drop elements that are very frequent in long recognized texts from match seeding
    pub autojunk: bool,
    pub autojunk_min_len: usize,
    pub score_decimals: u32,
}

impl ScoringConfig {
    pub const DEFAULT_AUTOJUNK_MIN_LEN: usize = 200;
    pub const DEFAULT_SCORE_DECIMALS: u32 = 2;
    pub const MAX_SCORE_DECIMALS: u32 = 6;

    pub fn load(path: &Path) -> Result<Self, RecitationError> {
        let data = std::fs::read_to_string(path)
            .map_err(|e| RecitationError::io("read scoring config", e))?;
        let config: Self = serde_json::from_str(&data)
            .map_err(|e| RecitationError::json("parse scoring config", e))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), RecitationError> {
        if self.score_decimals > Self::MAX_SCORE_DECIMALS {
            return Err(RecitationError::config(
                "score_decimals",
                format!("{} exceeds {}", self.score_decimals, Self::MAX_SCORE_DECIMALS),
            ));
        }
        if self.autojunk && self.autojunk_min_len == 0 {
            return Err(RecitationError::config(
                "autojunk_min_len",
                "must be > 0 when autojunk is enabled",
            ));
        }
        Ok(())
    }

    /// Length threshold handed to the matcher, `None` when autojunk is off
    pub(crate) fn autojunk_threshold(&self) -> Option<usize> {
        self.autojunk.then_some(self.autojunk_min_len)
    }
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            autojunk: false,
            autojunk_min_len: Self::DEFAULT_AUTOJUNK_MIN_LEN,
            score_decimals: Self::DEFAULT_SCORE_DECIMALS,
        }
    }
}
