/*
 * Copyright © 2025, United States Government, as represented by the Administrator of
 * the National Aeronautics and Space Administration. All rights reserved.
 *
 * The “ODIN” software is licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License. You may obtain a copy
 * of the License at http://www.apache.org/licenses/LICENSE-2.0.
 *
 * Unless required by applicable law or agreed to in writing, software distributed under
 * the License is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND,
 * either express or implied. See the License for the specific language governing permissions
 * and limitations under the License.
 */

//! the two side-channel files the CLI wrapper writes alongside the response
//! document (spec §6): a structured status file carrying the response code,
//! and a progress file receiving `percent\nmessage` lines as the run
//! advances.

use std::io::Write;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::Result;
use crate::response::ResponseCode;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusFileDoc {
    pub request_id: String,
    pub response_code: ResponseCode,
    pub message: Option<String>,
}

impl StatusFileDoc {
    pub fn write_to(&self, path: impl AsRef<Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}

/// summary counters threaded back from a run for logging/progress, never
/// for control flow — `afc_engine` fills this in as it drives the pipeline.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunStats {
    pub scan_points: usize,
    pub fs_considered: usize,
    pub fs_in_range: usize,
    pub links_evaluated: usize,
    pub anomalies: usize,
}

/// appends one `percent\nmessage` record per call, matching the CLI
/// wrapper's progress-file contract.
pub struct ProgressWriter {
    file: std::fs::File,
}

impl ProgressWriter {
    pub fn create(path: impl AsRef<Path>) -> Result<Self> {
        Ok(ProgressWriter { file: std::fs::File::create(path)? })
    }

    pub fn report(&mut self, percent: u8, message: &str) -> Result<()> {
        writeln!(self.file, "{}\n{}", percent.min(100), message)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn status_file_round_trips_through_json() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("status.json");
        let doc = StatusFileDoc { request_id: "req-1".to_string(), response_code: ResponseCode::Success, message: None };
        doc.write_to(&path).unwrap();
        let back: StatusFileDoc = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(back.request_id, "req-1");
    }

    #[test]
    fn progress_writer_appends_percent_message_pairs() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("progress.txt");
        let mut writer = ProgressWriter::create(&path).unwrap();
        writer.report(10, "scanning region").unwrap();
        writer.report(150, "clamped").unwrap();
        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.contains("10\nscanning region"));
        assert!(contents.contains("100\nclamped"));
    }
}
