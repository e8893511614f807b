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

use tracing::{debug,info};
use odin_common::datetime::DateRange;

use crate::{
    archive::ImageArchive, errors::Result, region::Region,
    scene::{sort_scenes, QueryArea, SceneOrder, SceneQuery, SceneRef}
};

/// outcome of a scene selection. Not finding a scene is a normal result, archive failures are errors
#[derive(Debug,Clone,PartialEq)]
pub enum SceneSelection {
    Selected(SceneRef),
    NoneFound,
}

impl SceneSelection {
    pub fn scene (&self)->Option<&SceneRef> {
        match self {
            SceneSelection::Selected(scene) => Some(scene),
            SceneSelection::NoneFound => None
        }
    }
}

/// pick the least cloudy scene of `collection` that intersects `region` within `dates`.
/// This is a selection, we never combine scenes
pub async fn select_scene (archive: &dyn ImageArchive, region: &Region, dates: &DateRange, collection: &str)->Result<SceneSelection> {
    let query = SceneQuery::new( collection, QueryArea::Bounds( *region.bounds()), *dates)
        .with_order( SceneOrder::CloudCoverAscending);

    let mut scenes = archive.search( &query).await?;
    sort_scenes( &mut scenes, SceneOrder::CloudCoverAscending);
    debug!("{} candidate scenes for {region}", scenes.len());

    match scenes.into_iter().next() {
        Some(scene) => {
            info!("selected scene {scene}");
            Ok( SceneSelection::Selected(scene) )
        }
        None => {
            info!("no scene in {dates} for {region}");
            Ok( SceneSelection::NoneFound )
        }
    }
}
