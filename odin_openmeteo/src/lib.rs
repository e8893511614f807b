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

#![doc = include_str!("../doc/odin_openmeteo.md")]

use std::{fmt, time::Duration};
use async_trait::async_trait;
use serde::{Serialize,Deserialize};
use reqwest::Client;
use tracing::{debug,warn};

use odin_common::{define_load_config, datetime::secs, geo::GeoPoint, net::{build_client, get_json_query}};

mod errors;
pub use errors::*;

define_load_config!{}

/// the variables we request from the `current` block of a forecast query
pub const CURRENT_VARIABLES: &str = "temperature_2m,relative_humidity_2m,wind_speed_10m";

/// what the weather panel shows while (or if) we don't have current weather data
pub const WEATHER_LOADING: &str = "Загрузка погоды...";

/* #region config *************************************************************************************************/

#[derive(Clone,Serialize,Deserialize,Debug)]
pub struct OpenMeteoConfig {
    /// forecast endpoint, e.g. https://api.open-meteo.com/v1/forecast
    pub url: String,

    /// max time to wait for a response
    pub timeout: Duration,
}

impl Default for OpenMeteoConfig {
    fn default()->Self {
        OpenMeteoConfig {
            url: "https://api.open-meteo.com/v1/forecast".to_string(),
            timeout: secs(10),
        }
    }
}

/* #endregion config */

/* #region data ***************************************************************************************************/

/// current conditions at a point. Units are the Open-Meteo defaults (°C, %, km/h)
#[derive(Clone,Copy,Serialize,Deserialize,Debug,PartialEq)]
pub struct CurrentWeather {
    pub temperature_2m: f64,
    pub relative_humidity_2m: f64,
    pub wind_speed_10m: f64,
}

// the wire format. All fields are optional so that we can report which one is missing
#[derive(Deserialize,Debug,Default)]
struct ForecastResponse {
    current: Option<CurrentBlock>,
}

#[derive(Deserialize,Debug,Default)]
struct CurrentBlock {
    time: Option<String>,
    temperature_2m: Option<f64>,
    relative_humidity_2m: Option<f64>,
    wind_speed_10m: Option<f64>,
}

impl CurrentWeather {
    /// parse the JSON reply of a forecast query with `current=temperature_2m,relative_humidity_2m,wind_speed_10m`
    pub fn from_json (json: &str)->Result<Self> {
        let response: ForecastResponse = serde_json::from_str(json)?;
        Self::from_response( response)
    }

    fn from_response (response: ForecastResponse)->Result<Self> {
        let current = response.current.ok_or_else( || missing_field("current"))?;
        Ok( CurrentWeather {
            temperature_2m: current.temperature_2m.ok_or_else( || missing_field("current.temperature_2m"))?,
            relative_humidity_2m: current.relative_humidity_2m.ok_or_else( || missing_field("current.relative_humidity_2m"))?,
            wind_speed_10m: current.wind_speed_10m.ok_or_else( || missing_field("current.wind_speed_10m"))?,
        })
    }
}

/* #endregion data */

/* #region provider ***********************************************************************************************/

/// abstraction of the weather service so that the dashboard can be run (and tested) without network access
#[async_trait]
pub trait WeatherProvider: Send + Sync {
    async fn current_weather (&self, pos: &GeoPoint)->Result<CurrentWeather>;
}

pub struct OpenMeteoClient {
    config: OpenMeteoConfig,
    client: Client,
}

impl OpenMeteoClient {
    pub fn new (config: OpenMeteoConfig)->Result<Self> {
        let client = build_client( config.timeout)?;
        Ok( OpenMeteoClient { config, client } )
    }

    pub fn config (&self)->&OpenMeteoConfig { &self.config }
}

#[async_trait]
impl WeatherProvider for OpenMeteoClient {
    async fn current_weather (&self, pos: &GeoPoint)->Result<CurrentWeather> {
        let query = [
            ("latitude", pos.latitude_degrees().to_string()),
            ("longitude", pos.longitude_degrees().to_string()),
            ("current", CURRENT_VARIABLES.to_string()),
        ];
        debug!("query current weather for {pos}");
        let response: ForecastResponse = get_json_query( &self.client, &self.config.url, &query, None).await?;
        CurrentWeather::from_response( response)
    }
}

/* #endregion provider */

/* #region panel **************************************************************************************************/

/// caption of the location panel, showing the selected coordinates with 4 decimals
pub fn coordinates_caption (pos: &GeoPoint)->String {
    format!("Координаты: \n{:.4}, {:.4}", pos.latitude_degrees(), pos.longitude_degrees())
}

#[derive(Clone,Serialize,Debug,PartialEq)]
pub struct WeatherMetric {
    pub label: &'static str,
    pub value: String,
}

/// the display values of the weather panel
#[derive(Clone,Serialize,Debug,PartialEq)]
pub struct WeatherPanel {
    pub metrics: Vec<WeatherMetric>,
}

impl WeatherPanel {
    pub fn new (wx: &CurrentWeather)->Self {
        WeatherPanel {
            metrics: vec![
                WeatherMetric { label: "Темп.", value: format!("{}°C", wx.temperature_2m) },
                WeatherMetric { label: "Влажн.", value: format!("{}%", wx.relative_humidity_2m) },
                WeatherMetric { label: "Ветер", value: format!("{} км/ч", wx.wind_speed_10m) },
            ]
        }
    }

    pub fn value_of (&self, label: &str)->Option<&str> {
        self.metrics.iter().find( |m| m.label == label).map( |m| m.value.as_str())
    }
}

impl fmt::Display for WeatherPanel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for m in &self.metrics {
            writeln!(f, "{:8} {}", m.label, m.value)?;
        }
        Ok(())
    }
}

/* #endregion panel */
