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

use odin_common::{define_error, net::OdinNetError, config::ConfigError};

pub type Result<T> = std::result::Result<T, OdinOpenMeteoError>;

define_error!{ pub OdinOpenMeteoError =
    NetError(#[from] OdinNetError) : "weather service error: {0}",
    ConfigError(#[from] ConfigError) : "config error: {0}",
    JsonError(#[from] serde_json::Error) : "JSON error: {0}",
    MissingField(String) : "weather response has no field {0}"
}

impl OdinOpenMeteoError {
    /// the service could not be reached or did not respond properly
    pub fn is_unavailable (&self)->bool {
        match self {
            OdinOpenMeteoError::NetError(e) => !e.is_unauthorized(),
            _ => false
        }
    }

    /// the service responded but the reply did not have the data we need
    pub fn is_data_error (&self)->bool {
        matches!( self, OdinOpenMeteoError::MissingField(_) | OdinOpenMeteoError::JsonError(_))
    }
}

pub fn missing_field (name: impl ToString)->OdinOpenMeteoError {
    OdinOpenMeteoError::MissingField(name.to_string())
}
