use serde::Serialize;
use wayfare::store::StopRow;

#[derive(Debug, Clone, Serialize)]
pub struct StopDto {
    pub id: i64,
    pub code: String,
    pub name: String,
    pub lat: f64,
    pub lon: f64,
    #[serde(rename = "type")]
    pub stop_type: String,
}

impl From<StopRow> for StopDto {
    fn from(row: StopRow) -> Self {
        Self {
            id: row.id,
            code: row.code,
            name: row.name,
            lat: row.lat,
            lon: row.lon,
            stop_type: row.stop_type,
        }
    }
}
