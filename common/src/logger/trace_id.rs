use std::fmt;

use uuid::Uuid;

/// Correlation id that follows one scheduler pass or one inbound update.
#[derive(Clone, Debug)]
pub struct TraceId(String);

impl TraceId {
    pub fn new(v: impl Into<String>) -> Self {
        Self(v.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for TraceId {
    fn default() -> Self {
        Self(Uuid::new_v4().as_hyphenated().to_string())
    }
}

impl fmt::Display for TraceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_ids_are_unique() {
        let a = TraceId::default();
        let b = TraceId::default();
        assert_ne!(a.as_str(), b.as_str());
        assert_eq!(a.as_str().len(), 36);
    }

    #[test]
    fn explicit_id_round_trips_through_display() {
        let id = TraceId::new("report-1");
        assert_eq!(id.to_string(), "report-1");
    }
}
