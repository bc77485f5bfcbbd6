use crate::dto::StopDto;
use serde::Serialize;
use wayfare::store::LineRow;

#[derive(Debug, Clone, Serialize)]
pub struct LineDto {
    pub id: i64,
    pub code: String,
    pub name: String,
    #[serde(rename = "type")]
    pub line_type: String,
    pub color: String,
    pub operator_id: i64,
    pub origin: String,
    pub destination: String,
    pub stop_count: i64,
}

impl From<LineRow> for LineDto {
    fn from(row: LineRow) -> Self {
        Self {
            id: row.id,
            code: row.code,
            name: row.name,
            line_type: row.line_type,
            color: row.color,
            operator_id: row.operator_id,
            origin: row.origin,
            destination: row.destination,
            stop_count: row.stop_count,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct LineDetailDto {
    pub line: LineDto,
    pub stops: Vec<StopDto>,
}

#[derive(Debug, Clone, Serialize)]
pub struct StopDetailDto {
    pub stop: StopDto,
    pub lines: Vec<LineDto>,
}
