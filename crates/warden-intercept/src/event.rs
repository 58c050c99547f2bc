//! User decision events

use serde::{Deserialize, Serialize};

/// The decision a user takes on a risk alert. Alert surfaces report the
/// clicked button by index: 0 allows the download, 1 cancels it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Decision {
    Allow,
    Cancel,
}

impl Decision {
    pub fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Decision::Allow),
            1 => Some(Decision::Cancel),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Decision::Allow => "allow",
            Decision::Cancel => "cancel",
        }
    }
}

impl std::fmt::Display for Decision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_index() {
        assert_eq!(Decision::from_index(0), Some(Decision::Allow));
        assert_eq!(Decision::from_index(1), Some(Decision::Cancel));
        assert_eq!(Decision::from_index(2), None);
    }
}
