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
#![allow(unused)]

//! pure propagation and antenna models: FSPL, area-mode ITM, WINNER II,
//! P.2108 clutter, P.2109 building entry, near-field loss, and the F.699 /
//! F.1245 / F.1336 / R2-AIP-07 antenna patterns. Every function here is
//! referentially transparent — no model in this crate holds state.

pub mod antenna;
pub mod errors;
pub mod fspl;
pub mod itm;
pub mod near_field;
pub mod p2108;
pub mod p2109;
pub mod winner2;

pub use fspl::fspl_db;
