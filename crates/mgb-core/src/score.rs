use serde::Deserialize;

use crate::{errors::Error, Result};

/// A score as submitted by the game client.
///
/// Form bodies always carry strings; JSON bodies may carry either a number or
/// a numeric string.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum SubmittedScore {
    Number(i64),
    Text(String),
}

impl SubmittedScore {
    /// The submitted value, if it is an integer greater than zero.
    pub fn positive(&self) -> Result<i64> {
        let value = match self {
            SubmittedScore::Number(n) => *n,
            SubmittedScore::Text(s) => s.trim().parse::<i64>().map_err(|_| Error::InvalidScore)?,
        };

        if value <= 0 {
            return Err(Error::InvalidScore);
        }
        Ok(value)
    }
}
