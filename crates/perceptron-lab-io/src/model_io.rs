use crate::error::IoResult;
use perceptron_lab_linear::Perceptron;
use perceptron_lab_pipeline::ExperimentReport;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::path::Path;

fn save_json<T: Serialize, P: AsRef<Path>>(value: &T, path: P) -> IoResult<()> {
    let json = serde_json::to_string_pretty(value)?;
    fs::write(path, json)?;
    Ok(())
}

fn load_json<T: DeserializeOwned, P: AsRef<Path>>(path: P) -> IoResult<T> {
    let json = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&json)?)
}

/// Save an experiment report as pretty-printed JSON.
pub fn save_report<P: AsRef<Path>>(report: &ExperimentReport, path: P) -> IoResult<()> {
    save_json(report, path)
}

/// Load an experiment report from JSON.
pub fn load_report<P: AsRef<Path>>(path: P) -> IoResult<ExperimentReport> {
    load_json(path)
}

/// Save a perceptron (fitted or not) to a JSON file.
pub fn save_model<P: AsRef<Path>>(model: &Perceptron, path: P) -> IoResult<()> {
    save_json(model, path)
}

/// Load a perceptron from a JSON file.
pub fn load_model<P: AsRef<Path>>(path: P) -> IoResult<Perceptron> {
    load_json(path)
}
