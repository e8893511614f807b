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

use std::{io::Cursor, path::Path};
use image::{ImageFormat, Rgba, RgbaImage};
use serde::Serialize;

use crate::{errors::Result, index::{is_valid, DerivedBand}};

pub type Rgb = [u8;3];

pub const RED: Rgb = [255, 0, 0];
pub const YELLOW: Rgb = [255, 255, 0];
pub const GREEN: Rgb = [0, 128, 0];
pub const WHITE: Rgb = [255, 255, 255];
pub const BLUE: Rgb = [0, 0, 255];
pub const DARK_GREEN: Rgb = [0, 100, 0];

const TRANSPARENT: Rgba<u8> = Rgba([0, 0, 0, 0]);

/// equidistant color stops that are linearly interpolated
#[derive(Debug,Clone,Copy,PartialEq,Serialize)]
pub struct Palette {
    colors: &'static [Rgb],
}

impl Palette {
    pub const fn new (colors: &'static [Rgb])->Self {
        Palette { colors }
    }

    pub fn colors (&self)->&'static [Rgb] { self.colors }

    /// color at fraction `t` (clamped to [0,1]) of the palette
    pub fn color_at (&self, t: f32)->Rgb {
        let n = self.colors.len();
        match n {
            0 => [0,0,0],
            1 => self.colors[0],
            _ => {
                let pos = t.clamp( 0.0, 1.0) * (n - 1) as f32;
                let i = (pos.floor() as usize).min( n - 2);
                let f = pos - i as f32;
                let (c0, c1) = (self.colors[i], self.colors[i+1]);
                [ lerp( c0[0], c1[0], f), lerp( c0[1], c1[1], f), lerp( c0[2], c1[2], f) ]
            }
        }
    }
}

#[inline]
fn lerp (a: u8, b: u8, f: f32)->u8 {
    (a as f32 + (b as f32 - a as f32) * f).round().clamp( 0.0, 255.0) as u8
}

/// map a derived band through the display range and palette of its index. NO_DATA pixels are transparent
pub fn colorize (band: &DerivedBand)->RgbaImage {
    let def = band.definition();
    let mut img = RgbaImage::new( band.width() as u32, band.height() as u32);

    for ((row,col), &v) in band.data.indexed_iter() {
        let px = if is_valid(v) {
            let [r,g,b] = def.palette.color_at( def.range.normalize(v));
            Rgba([r, g, b, 255])
        } else {
            TRANSPARENT
        };
        img.put_pixel( col as u32, row as u32, px);
    }
    img
}

pub fn encode_png (img: &RgbaImage)->Result<Vec<u8>> {
    let mut buf = Cursor::new( Vec::new());
    img.write_to( &mut buf, ImageFormat::Png)?;
    Ok( buf.into_inner() )
}

pub fn save_png<P: AsRef<Path>> (png: &[u8], path: P)->Result<()> {
    std::fs::write( path, png)?;
    Ok(())
}
