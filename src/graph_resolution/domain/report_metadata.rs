use serde::Serialize;

/// ReportMetadata value object identifying one generated graph report
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportMetadata {
    timestamp: String,
    tool_name: String,
    tool_version: String,
    snapshot_id: String,
}

impl ReportMetadata {
    pub fn new(
        timestamp: String,
        tool_name: String,
        tool_version: String,
        snapshot_id: String,
    ) -> Self {
        Self {
            timestamp,
            tool_name,
            tool_version,
            snapshot_id,
        }
    }

    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }

    pub fn tool_name(&self) -> &str {
        &self.tool_name
    }

    pub fn tool_version(&self) -> &str {
        &self.tool_version
    }

    pub fn snapshot_id(&self) -> &str {
        &self.snapshot_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_camel_case() {
        let metadata = ReportMetadata::new(
            "2024-01-01T00:00:00Z".to_string(),
            "depgraph".to_string(),
            "0.4.0".to_string(),
            "urn:uuid:12345".to_string(),
        );

        let json = serde_json::to_value(&metadata).unwrap();
        assert_eq!(json["toolName"], "depgraph");
        assert_eq!(json["snapshotId"], "urn:uuid:12345");
        assert_eq!(metadata.timestamp(), "2024-01-01T00:00:00Z");
    }
}
