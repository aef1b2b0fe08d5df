//! Reading prior lot data handed over by a host

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::types::{LotFile, LotsizeError, Result, SizeRow};

/// Parse lot JSON: either a bare array of rows or a saved `{lotSizes, totals}` payload
pub fn parse_lot(content: &str) -> Result<Vec<SizeRow>> {
    let file: LotFile = serde_json::from_str(content)
        .map_err(|e| LotsizeError::Parse(format!("invalid lot data: {}", e)))?;
    Ok(file.into_rows())
}

/// Load prior rows from a file
pub fn load_lot(path: &Path) -> Result<Vec<SizeRow>> {
    let content = fs::read_to_string(path)?;
    let rows = parse_lot(&content)?;
    debug!(path = %path.display(), rows = rows.len(), "lot file loaded");
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_bare_rows() {
        let rows = parse_lot(r#"[{"size":"S","set":"2"},{"size":"M","set":1}]"#).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].set, "1");
    }

    #[test]
    fn test_parse_saved_payload() {
        let rows = parse_lot(
            r#"{"lotSizes":[{"size":"S","grossWt":"10.000"}],"totals":{"totalSets":2,"totalGrossWt":10,"totalNetWt":8}}"#,
        )
        .unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].gross_wt, "10.000");
    }

    #[test]
    fn test_parse_empty_array() {
        assert!(parse_lot("[]").unwrap().is_empty());
    }

    #[test]
    fn test_parse_invalid() {
        let err = parse_lot(r#"{"rows":[]}"#).unwrap_err();
        assert!(err.to_string().contains("invalid lot data"));
    }

    #[test]
    fn test_load_from_file() {
        let file = NamedTempFile::new().unwrap();
        fs::write(file.path(), r#"[{"size":"7"}]"#).unwrap();

        let rows = load_lot(file.path()).unwrap();
        assert_eq!(rows[0].size, "7");
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let err = load_lot(Path::new("/nonexistent/lot.json")).unwrap_err();
        assert!(matches!(err, LotsizeError::Io(_)));
    }
}
