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

//! lookup and deserialization of crate specific RON config files.
//!
//! Config files live in a `configs/` directory and are resolved in this order:
//!   1. `$ODIN_LOCAL/configs/❬crate❭/❬filename❭` (machine specific overrides, e.g. for credentials)
//!   2. `./configs/❬filename❭` (relative to the current working dir)
//!   3. `❬crate manifest dir❭/configs/❬filename❭` (the defaults that come with the sources)
//!
//! Absolute filenames or filenames containing a path separator are used as given.

use std::{env, fs, path::{Path,PathBuf}};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::define_error;

pub const CONFIGS: &'static str = "configs";
pub const ODIN_LOCAL: &'static str = "ODIN_LOCAL";

define_error!{ pub ConfigError =
    IOError(#[from] std::io::Error) : "config IO error: {0}",
    RonError(#[from] ron::error::SpannedError) : "config parse error: {0}",
    NotFound(String) : "config file not found: {0}"
}

pub type Result<T> = std::result::Result<T, ConfigError>;

/// candidate paths for config `filename` of crate `crate_name`, in lookup order
pub fn config_candidates (crate_name: &str, manifest_dir: &str, filename: &str) -> Vec<PathBuf> {
    let path = Path::new(filename);
    if path.is_absolute() || path.components().count() > 1 {
        return vec![ path.to_path_buf() ]
    }

    let mut candidates = Vec::with_capacity(3);
    if let Ok(local) = env::var(ODIN_LOCAL) {
        candidates.push( Path::new(&local).join(CONFIGS).join(crate_name).join(filename));
    }
    candidates.push( Path::new(CONFIGS).join(filename));
    candidates.push( Path::new(manifest_dir).join(CONFIGS).join(filename));
    candidates
}

pub fn find_config_file (crate_name: &str, manifest_dir: &str, filename: &str) -> Option<PathBuf> {
    config_candidates( crate_name, manifest_dir, filename).into_iter().find( |p| p.is_file())
}

/// this is what the [`crate::define_load_config`] macro expands into
pub fn load_config_file<C> (crate_name: &str, manifest_dir: &str, filename: &str) -> Result<C> where C: DeserializeOwned {
    let path = find_config_file( crate_name, manifest_dir, filename).ok_or_else( || ConfigError::NotFound(filename.to_string()))?;
    debug!("loading config {:?}", path);
    let data = fs::read_to_string( &path)?;
    config_from_str( &data)
}

pub fn config_from_str<C> (data: &str) -> Result<C> where C: DeserializeOwned {
    Ok( ron::de::from_str( data)? )
}
