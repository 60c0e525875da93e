use serde::{Deserialize, Deserializer, Serialize};

/// JSON `null` decodes to the zero value, the same as an absent field.
fn null_default<'de, D, T>(de: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(de)?.unwrap_or_default())
}

/// One weather observation in OpenWeather "current weather" shape.
///
/// Missing and `null` fields decode to their zero value and every field is written
/// back out, so a stored reading always has the full document shape.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeatherReading {
    #[serde(deserialize_with = "null_default")]
    pub coord: Coord,
    #[serde(deserialize_with = "null_default")]
    pub weather: Vec<Condition>,
    #[serde(deserialize_with = "null_default")]
    pub base: String,
    #[serde(deserialize_with = "null_default")]
    pub main: MainMeasurements,
    #[serde(deserialize_with = "null_default")]
    pub visibility: i64,
    #[serde(deserialize_with = "null_default")]
    pub wind: Wind,
    #[serde(deserialize_with = "null_default")]
    pub rain: Rain,
    #[serde(deserialize_with = "null_default")]
    pub clouds: Clouds,
    #[serde(deserialize_with = "null_default")]
    pub dt: i64,
    #[serde(deserialize_with = "null_default")]
    pub sys: Sys,
    #[serde(deserialize_with = "null_default")]
    pub timezone: i64,
    #[serde(deserialize_with = "null_default")]
    pub id: i64,
    #[serde(deserialize_with = "null_default")]
    pub name: String,
    #[serde(deserialize_with = "null_default")]
    pub cod: i64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Coord {
    #[serde(deserialize_with = "null_default")]
    pub lon: f64,
    #[serde(deserialize_with = "null_default")]
    pub lat: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Condition {
    #[serde(deserialize_with = "null_default")]
    pub id: i64,
    #[serde(deserialize_with = "null_default")]
    pub main: String,
    #[serde(deserialize_with = "null_default")]
    pub description: String,
    #[serde(deserialize_with = "null_default")]
    pub icon: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MainMeasurements {
    #[serde(deserialize_with = "null_default")]
    pub temp: f64,
    #[serde(deserialize_with = "null_default")]
    pub feels_like: f64,
    #[serde(deserialize_with = "null_default")]
    pub temp_min: f64,
    #[serde(deserialize_with = "null_default")]
    pub temp_max: f64,
    #[serde(deserialize_with = "null_default")]
    pub pressure: i64,
    #[serde(deserialize_with = "null_default")]
    pub humidity: i64,
    #[serde(deserialize_with = "null_default")]
    pub sea_level: i64,
    #[serde(deserialize_with = "null_default")]
    pub grnd_level: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Wind {
    #[serde(deserialize_with = "null_default")]
    pub speed: f64,
    #[serde(deserialize_with = "null_default")]
    pub deg: i64,
    #[serde(deserialize_with = "null_default")]
    pub gust: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Rain {
    #[serde(rename = "1h", deserialize_with = "null_default")]
    pub one_hour: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Clouds {
    #[serde(deserialize_with = "null_default")]
    pub all: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Sys {
    #[serde(rename = "type", deserialize_with = "null_default")]
    pub kind: i64,
    #[serde(deserialize_with = "null_default")]
    pub id: i64,
    #[serde(deserialize_with = "null_default")]
    pub country: String,
    #[serde(deserialize_with = "null_default")]
    pub sunrise: i64,
    #[serde(deserialize_with = "null_default")]
    pub sunset: i64,
}
