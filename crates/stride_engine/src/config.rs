//! Engine configuration.

/// Limits applied to inbound sync requests.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Maximum total number of records accepted in one push, across all
    /// entity types. Oversized pushes are rejected before any work starts.
    pub max_push_records: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_push_records: 1_000,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_limit() {
        assert_eq!(EngineConfig::default().max_push_records, 1_000);
    }
}
