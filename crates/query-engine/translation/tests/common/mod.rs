use std::fs;
use std::path::PathBuf;

use query_engine_translation::translation;

/// Translate the request of a golden test and render the resulting plan.
pub fn test_translation(testname: &str) -> anyhow::Result<String> {
    let directory = PathBuf::from("tests/goldenfiles").join(testname);
    let request = fs::read_to_string(directory.join("request.sql"))?;

    let plan = translation::translate(&request)?;

    Ok(serde_json::to_string_pretty(&plan.to_json())?)
}

/// Translate the request of a golden test that is expected to fail, and render the error.
pub fn test_translation_error(testname: &str) -> anyhow::Result<String> {
    let directory = PathBuf::from("tests/goldenfiles").join(testname);
    let request = fs::read_to_string(directory.join("request.sql"))?;

    match translation::translate(&request) {
        Ok(plan) => anyhow::bail!("expected an error, got {}", plan.to_json()),
        Err(err) => Ok(err.to_string()),
    }
}
