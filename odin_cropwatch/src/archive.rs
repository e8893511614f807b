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

use async_trait::async_trait;

use crate::{errors::Result, raster::{BandSet, RasterGrid}, scene::{Band, SceneQuery, SceneRef}};

/// the interface to a (remote) earth observation archive.
///
/// Implementations have to apply all criteria of the [`SceneQuery`] (collection, area, dates and
/// cloud cover ceiling). Result order is not guaranteed, clients that need a specific order have to
/// sort themselves (see [`crate::scene::sort_scenes`]).
///
/// Band reads return the samples of the requested bands resampled to `grid`. Pixels not covered by
/// the scene are NaN.
#[async_trait]
pub trait ImageArchive: Send + Sync {
    fn name (&self)->&str;

    async fn search (&self, query: &SceneQuery)->Result<Vec<SceneRef>>;

    async fn read_bands (&self, scene: &SceneRef, bands: &[Band], grid: &RasterGrid)->Result<BandSet>;
}
