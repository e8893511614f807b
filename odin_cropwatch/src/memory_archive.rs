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

use std::{collections::HashMap, sync::{Arc, atomic::{AtomicUsize,Ordering}}};
use async_trait::async_trait;
use ndarray::Array2;
use tracing::debug;

use odin_common::geo::{GeoPoint,GeoRect};
use crate::{
    archive::ImageArchive, errors::{data_error, Result}, raster::{BandSet, RasterGrid},
    scene::{sort_scenes, Band, SceneQuery, SceneRef}
};

/// function that computes the sample of a band at a given location
pub type BandSampler = Arc<dyn Fn(Band,&GeoPoint)->f32 + Send + Sync>;

/// a scene with its footprint and a sample function for its bands
#[derive(Clone)]
pub struct MemoryScene {
    pub scene: SceneRef,
    pub footprint: GeoRect,
    sampler: BandSampler,
}

impl MemoryScene {
    pub fn from_fn<F> (scene: SceneRef, footprint: GeoRect, f: F)->Self where F: Fn(Band,&GeoPoint)->f32 + Send + Sync + 'static {
        MemoryScene { scene, footprint, sampler: Arc::new(f) }
    }

    /// scene with the same value for each pixel of a band. Bands that are not listed are NaN
    pub fn uniform (scene: SceneRef, footprint: GeoRect, values: &[(Band,f32)])->Self {
        let values: HashMap<Band,f32> = values.iter().cloned().collect();
        Self::from_fn( scene, footprint, move |band,_| values.get(&band).copied().unwrap_or(f32::NAN))
    }
}

/// an in-process imagery archive. This is used for offline runs and for testing pipelines
/// without network access
#[derive(Default)]
pub struct MemoryArchive {
    scenes: Vec<MemoryScene>,
    n_reads: AtomicUsize,
}

impl MemoryArchive {
    pub fn new ()->Self { Self::default() }

    pub fn add (&mut self, scene: MemoryScene) {
        self.scenes.push( scene)
    }

    pub fn with (mut self, scene: MemoryScene)->Self {
        self.add( scene);
        self
    }

    pub fn len (&self)->usize { self.scenes.len() }

    /// number of band reads so far
    pub fn reads (&self)->usize { self.n_reads.load( Ordering::Relaxed) }
}

#[async_trait]
impl ImageArchive for MemoryArchive {
    fn name (&self)->&str { "memory" }

    async fn search (&self, query: &SceneQuery)->Result<Vec<SceneRef>> {
        let mut scenes: Vec<SceneRef> = self.scenes.iter()
            .filter( |ms| ms.scene.collection == query.collection && query.area.intersects( &ms.footprint) && query.accepts( &ms.scene))
            .map( |ms| ms.scene.clone())
            .collect();

        if let Some(order) = query.order {
            sort_scenes( &mut scenes, order);
        }
        debug!("memory archive found {} of {} scenes", scenes.len(), self.scenes.len());
        Ok(scenes)
    }

    async fn read_bands (&self, scene: &SceneRef, bands: &[Band], grid: &RasterGrid)->Result<BandSet> {
        let ms = self.scenes.iter().find( |ms| ms.scene.id == scene.id).ok_or_else( || data_error( format!("unknown scene {}", scene.id)))?;
        self.n_reads.fetch_add( 1, Ordering::Relaxed);

        let mut band_set = BandSet::new( *grid);
        for band in bands {
            let data = Array2::from_shape_fn( grid.shape(), |(row,col)| {
                let p = grid.pixel_center( row, col);
                if ms.footprint.contains( &p) { (ms.sampler)( *band, &p) } else { f32::NAN }
            });
            band_set.insert( *band, data)?;
        }
        Ok(band_set)
    }
}
