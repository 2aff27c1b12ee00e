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

//! the tabular FS/RAS row schema. Fields are never required to parse cleanly;
//! a field that fails to parse becomes `None` and the row is still usable for
//! whatever it does carry. Columns past the fixed 24 are an optional
//! passive-repeater chain, one `lat,lon,gain_dbi` triple per hop.

/// one FS/RAS station row as read from the tabular source.
#[derive(Debug, Clone, PartialEq)]
pub struct FsRow {
    pub database_id: Option<i64>,
    pub fsid: Option<i64>,
    pub callsign: Option<String>,
    pub status: Option<char>,
    pub radio_service: Option<String>,
    pub entity_name: Option<String>,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    pub rx_height_m: Option<f64>,
    pub height_is_agl: bool,
    pub start_freq_mhz: Option<f64>,
    pub stop_freq_mhz: Option<f64>,
    pub emission_designator: Option<String>,
    pub polarization: Option<char>,
    pub antenna_model: Option<String>,
    pub antenna_category: Option<String>,
    pub antenna_gain_dbi: Option<f64>,
    pub azimuth_deg: Option<f64>,
    pub elevation_deg: Option<f64>,
    pub mobile_flag: bool,
    pub feeder_loss_db: Option<f64>,
    pub noise_figure_db: Option<f64>,
    pub tx_lat: Option<f64>,
    pub tx_lon: Option<f64>,
    pub passive_repeaters: Vec<PassiveRepeaterHop>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PassiveRepeaterHop {
    pub lat: f64,
    pub lon: f64,
    pub gain_dbi: f64,
}

impl FsRow {
    /// parse one pipe-delimited row. `fields[0]` is assumed to be a record
    /// type/comment marker and is ignored, matching the ULS `FR`/`PA`-style
    /// leading discriminator column.
    pub fn from_fields(fields: &[&str]) -> Self {
        let get = |i: usize| -> &str { fields.get(i).copied().unwrap_or("") };

        let mut passive_repeaters = Vec::new();
        let mut i = 25;
        while i + 2 < fields.len() {
            match (
                parse_opt_f64(get(i)),
                parse_opt_f64(get(i + 1)),
                parse_opt_f64(get(i + 2)),
            ) {
                (Some(lat), Some(lon), Some(gain_dbi)) => {
                    passive_repeaters.push(PassiveRepeaterHop { lat, lon, gain_dbi });
                }
                _ => break,
            }
            i += 3;
        }

        FsRow {
            database_id: parse_opt_i64(get(1)),
            fsid: parse_opt_i64(get(2)),
            callsign: parse_opt_string(get(3)),
            status: parse_opt_char(get(4)),
            radio_service: parse_opt_string(get(5)),
            entity_name: parse_opt_string(get(6)),
            lat: parse_opt_f64(get(7)),
            lon: parse_opt_f64(get(8)),
            rx_height_m: parse_opt_f64(get(9)),
            height_is_agl: parse_opt_char(get(10)).map(|c| c == 'A').unwrap_or(true),
            start_freq_mhz: parse_opt_f64(get(11)),
            stop_freq_mhz: parse_opt_f64(get(12)),
            emission_designator: parse_opt_string(get(13)),
            polarization: parse_opt_char(get(14)),
            antenna_model: parse_opt_string(get(15)),
            antenna_category: parse_opt_string(get(16)),
            antenna_gain_dbi: parse_opt_f64(get(17)),
            azimuth_deg: parse_opt_f64(get(18)),
            elevation_deg: parse_opt_f64(get(19)),
            mobile_flag: parse_opt_char(get(20)).map(|c| c == 'Y').unwrap_or(false),
            feeder_loss_db: parse_opt_f64(get(21)),
            noise_figure_db: parse_opt_f64(get(22)),
            tx_lat: parse_opt_f64(get(23)),
            tx_lon: parse_opt_f64(get(24)),
            passive_repeaters,
        }
    }
}

pub fn parse_opt_string(s: &str) -> Option<String> {
    let s = s.trim();
    if s.is_empty() { None } else { Some(s.to_string()) }
}

pub fn parse_opt_i64(s: &str) -> Option<i64> {
    let s = s.trim();
    if s.is_empty() { None } else { s.parse().ok() }
}

pub fn parse_opt_f64(s: &str) -> Option<f64> {
    let s = s.trim();
    if s.is_empty() { None } else { s.parse().ok() }
}

pub fn parse_opt_char(s: &str) -> Option<char> {
    let s = s.trim();
    if s.is_empty() { None } else { s.chars().next() }
}

/// decodes an ITU-style emission designator's bandwidth field into MHz, e.g.
/// `"20M0"` -> 20.0, `"500K"` -> 0.5, `"1G50"` -> 1500.0. The letter stands in
/// for the decimal point and also names the unit (K/M/G Hz).
pub fn emission_bandwidth_mhz(designator: &str) -> Option<f64> {
    let designator = designator.trim();
    let unit_pos = designator.find(['K', 'M', 'G'])?;
    let (int_part, rest) = designator.split_at(unit_pos);
    let unit = rest.chars().next()?;
    let frac_part = &rest[1..];
    let frac_digits: String = frac_part.chars().take_while(|c| c.is_ascii_digit()).collect();

    let combined = if frac_digits.is_empty() {
        int_part.to_string()
    } else {
        format!("{int_part}.{frac_digits}")
    };
    let value: f64 = combined.parse().ok()?;

    let mhz = match unit {
        'K' => value / 1000.0,
        'M' => value,
        'G' => value * 1000.0,
        _ => return None,
    };
    Some(mhz)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_row() {
        let fields: Vec<&str> = vec![
            "FS", "1", "100", "W1AW", "A", "FIXED", "Acme Co", "40.0", "-105.0", "30.0", "A",
            "6100.0", "6150.0", "50M0D7W", "V", "ANT-1", "HP", "38.0", "15.0", "0.0", "N", "0.5",
            "4.0", "40.1", "-105.1",
        ];
        let row = FsRow::from_fields(&fields);
        assert_eq!(row.callsign.as_deref(), Some("W1AW"));
        assert_eq!(row.lat, Some(40.0));
        assert_eq!(row.lon, Some(-105.0));
        assert!(row.height_is_agl);
        assert_eq!(row.antenna_category.as_deref(), Some("HP"));
        assert!(!row.mobile_flag);
        assert_eq!(row.tx_lat, Some(40.1));
    }

    #[test]
    fn missing_fields_become_none_not_panic() {
        let fields: Vec<&str> = vec!["FS", "", "", "", "", "", "", "", ""];
        let row = FsRow::from_fields(&fields);
        assert_eq!(row.database_id, None);
        assert_eq!(row.lat, None);
    }

    #[test]
    fn parses_passive_repeater_chain() {
        let mut fields: Vec<&str> = vec![
            "FS", "1", "100", "W1AW", "A", "FIXED", "Acme Co", "40.0", "-105.0", "30.0", "A",
            "6100.0", "6150.0", "50M0D7W", "V", "ANT-1", "HP", "38.0", "15.0", "0.0", "N", "0.5",
            "4.0", "40.1", "-105.1",
        ];
        fields.extend(["40.5", "-105.5", "30.0"]);
        let row = FsRow::from_fields(&fields);
        assert_eq!(row.passive_repeaters.len(), 1);
        assert_eq!(row.passive_repeaters[0].gain_dbi, 30.0);
    }

    #[test]
    fn decodes_emission_bandwidth() {
        assert_eq!(emission_bandwidth_mhz("20M0D7W"), Some(20.0));
        assert_eq!(emission_bandwidth_mhz("500KF1D"), Some(0.5));
        assert_eq!(emission_bandwidth_mhz("1G50G7W"), Some(1500.0));
    }
}
