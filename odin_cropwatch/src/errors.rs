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

use serde::Serialize;
use odin_common::{define_error, net::OdinNetError, config::ConfigError};
use odin_openmeteo::OdinOpenMeteoError;

pub type Result<T> = std::result::Result<T, OdinCropwatchError>;

define_error!{ pub OdinCropwatchError =
    IOError(#[from] std::io::Error) : "IO error: {0}",
    ConfigError(#[from] ConfigError) : "config error: {0}",
    NetError(#[from] OdinNetError) : "imagery service error: {0}",
    WeatherError(#[from] OdinOpenMeteoError) : "weather error: {0}",
    JsonError(#[from] serde_json::Error) : "JSON error: {0}",
    CsvError(#[from] csv::Error) : "CSV error: {0}",
    TiffError(#[from] tiff::TiffError) : "TIFF error: {0}",
    ImageError(#[from] image::ImageError) : "image error: {0}",
    CredentialsError(String) : "malformed credentials: {0}",
    UnknownIndex(String) : "unknown index: {0}",
    DataError(String) : "invalid data: {0}"
}

/// the user visible failure classes a dashboard panel can report
#[derive(Debug,Clone,Copy,PartialEq,Eq,Serialize,strum::Display)]
pub enum FailureKind {
    ServiceUnavailable,
    Credentials,
    Data,
    Config,
}

impl OdinCropwatchError {
    pub fn kind (&self)->FailureKind {
        use OdinCropwatchError::*;
        match self {
            NetError(e) => if e.is_unauthorized() { FailureKind::Credentials } else { FailureKind::ServiceUnavailable },
            WeatherError(e) => {
                if e.is_data_error() { FailureKind::Data }
                else if let OdinOpenMeteoError::ConfigError(_) = e { FailureKind::Config }
                else if e.is_unavailable() { FailureKind::ServiceUnavailable }
                else if let OdinOpenMeteoError::NetError(_) = e { FailureKind::Credentials }
                else { FailureKind::Data }
            }
            CredentialsError(_) => FailureKind::Credentials,
            ConfigError(_) | UnknownIndex(_) => FailureKind::Config,
            IOError(_) | JsonError(_) | CsvError(_) | TiffError(_) | ImageError(_) | DataError(_) => FailureKind::Data,
        }
    }
}

pub fn data_error (msg: impl ToString)->OdinCropwatchError {
    OdinCropwatchError::DataError(msg.to_string())
}

pub fn credentials_error (msg: impl ToString)->OdinCropwatchError {
    OdinCropwatchError::CredentialsError(msg.to_string())
}

pub fn unknown_index (name: impl ToString)->OdinCropwatchError {
    OdinCropwatchError::UnknownIndex(name.to_string())
}
