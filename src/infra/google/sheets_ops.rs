// Sheets v4: spreadsheet creation, sheet management, cell values and charts.

use reqwest::Url;
use serde::Deserialize;
use serde_json::{json, Value};

use super::a1_notation::{column_letters, parse_range, qualified_range, CellRange};
use super::google_workspace_client::{GoogleWorkspaceClient, SHEETS_API};
use crate::core::workspace::{RangeUpdate, SheetOp, WorkspaceError};

const VALUE_INPUT: (&str, &str) = ("valueInputOption", "USER_ENTERED");

const BASIC_CHART_TYPES: &[&str] = &[
    "BAR",
    "LINE",
    "AREA",
    "COLUMN",
    "SCATTER",
    "COMBO",
    "STEPPED_AREA",
];

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SpreadsheetSheets {
    #[serde(default)]
    sheets: Vec<SheetEntry>,
}

#[derive(Debug, Deserialize)]
struct SheetEntry {
    properties: SheetProperties,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SheetProperties {
    sheet_id: i64,
    title: String,
    #[serde(default)]
    index: i64,
    #[serde(default)]
    grid_properties: GridProperties,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GridProperties {
    #[serde(default)]
    row_count: i64,
    #[serde(default)]
    column_count: i64,
}

impl SheetProperties {
    fn to_json(&self) -> Value {
        json!({
            "sheet_id": self.sheet_id,
            "title": self.title,
            "index": self.index,
            "row_count": self.grid_properties.row_count,
            "column_count": self.grid_properties.column_count,
        })
    }
}

/// `.../spreadsheets/{id}/values/{range}` with the range percent-encoded.
fn values_url(spreadsheet_id: &str, range: &str) -> Result<String, WorkspaceError> {
    let mut url = Url::parse(SHEETS_API).map_err(|e| WorkspaceError::Http(e.to_string()))?;
    url.path_segments_mut()
        .map_err(|_| WorkspaceError::Http("Sheets API url cannot take path segments".to_string()))?
        .push(spreadsheet_id)
        .push("values")
        .push(range);
    Ok(url.to_string())
}

fn ensure_values(values: &[Vec<Value>]) -> Result<(), WorkspaceError> {
    if values.is_empty() {
        return Err(WorkspaceError::InvalidArgument("values must not be empty".to_string()));
    }
    Ok(())
}

fn ensure_span(start_index: i64, end_index: i64) -> Result<(), WorkspaceError> {
    if start_index < 0 || end_index <= start_index {
        return Err(WorkspaceError::InvalidArgument(format!(
            "invalid index span {start_index}..{end_index}"
        )));
    }
    Ok(())
}

/// Grid range over `columns` of the sheet, rows limited to the parsed range.
fn grid_range(sheet_id: i64, cells: &CellRange, start_column: u32, end_column: u32) -> Value {
    let mut range = json!({
        "sheetId": sheet_id,
        "startColumnIndex": start_column,
        "endColumnIndex": end_column,
    });
    if let Some(start_row) = cells.start_row {
        range["startRowIndex"] = json!(start_row);
    }
    if let Some(end_row) = cells.end_row {
        range["endRowIndex"] = json!(end_row);
    }
    range
}

fn source_range(sheet_id: i64, cells: &CellRange, column: u32) -> Value {
    json!({ "sourceRange": { "sources": [grid_range(sheet_id, cells, column, column + 1)] } })
}

/// Chart spec for `addChart`. The first column is the domain, every other column a series.
pub fn chart_spec(
    chart_type: &str,
    title: Option<&str>,
    sheet_id: i64,
    cells: &CellRange,
) -> Result<Value, WorkspaceError> {
    let (start_column, end_column) = match (cells.start_column, cells.end_column) {
        (Some(start), Some(end)) if end > start => (start, end),
        _ => {
            return Err(WorkspaceError::InvalidArgument(
                "chart range must name its columns, e.g. A1:B10".to_string(),
            ))
        }
    };
    let chart_type = chart_type.trim().to_ascii_uppercase();

    let mut spec = if chart_type == "PIE" {
        if end_column - start_column < 2 {
            return Err(WorkspaceError::InvalidArgument(
                "a pie chart needs a label column and a value column".to_string(),
            ));
        }
        json!({
            "pieChart": {
                "legendPosition": "RIGHT_LEGEND",
                "domain": source_range(sheet_id, cells, start_column),
                "series": source_range(sheet_id, cells, start_column + 1),
            }
        })
    } else if BASIC_CHART_TYPES.contains(&chart_type.as_str()) {
        let series: Vec<Value> = (start_column + 1..end_column)
            .map(|column| {
                json!({
                    "series": source_range(sheet_id, cells, column),
                    "targetAxis": "LEFT_AXIS",
                })
            })
            .collect();
        json!({
            "basicChart": {
                "chartType": chart_type,
                "legendPosition": "BOTTOM_LEGEND",
                "headerCount": 1,
                "domains": [{ "domain": source_range(sheet_id, cells, start_column) }],
                "series": series,
            }
        })
    } else {
        return Err(WorkspaceError::InvalidArgument(format!(
            "unsupported chart type '{chart_type}'"
        )));
    };

    if let Some(title) = title.filter(|t| !t.is_empty()) {
        spec["title"] = json!(title);
    }
    Ok(spec)
}

impl GoogleWorkspaceClient {
    /// Create a blank spreadsheet, then move it into the target folder.
    ///
    /// A failed move leaves the spreadsheet where Drive put it and is only logged.
    pub(super) async fn create_spreadsheet(&self, title: &str, folder_id: &str) -> Result<Value, WorkspaceError> {
        let created = self
            .post(SHEETS_API, &[], &json!({ "properties": { "title": title } }))
            .await?;
        let spreadsheet_id = created
            .get("spreadsheetId")
            .and_then(Value::as_str)
            .ok_or_else(|| WorkspaceError::Http("spreadsheet id missing from response".to_string()))?
            .to_string();

        if !folder_id.is_empty() {
            if let Err(err) = self.move_file(&spreadsheet_id, folder_id).await {
                tracing::warn!(
                    spreadsheet_id = %spreadsheet_id,
                    folder_id,
                    error = %err,
                    "Failed to move spreadsheet into folder"
                );
            }
        }

        tracing::info!(spreadsheet_id = %spreadsheet_id, title, "Created spreadsheet");
        Ok(json!({
            "spreadsheet_id": spreadsheet_id,
            "spreadsheet_url": created.get("spreadsheetUrl").cloned().unwrap_or(Value::Null),
            "folder_id": folder_id,
        }))
    }

    /// Copy a template or existing spreadsheet into the target folder.
    pub(super) async fn copy_spreadsheet(
        &self,
        source_id: &str,
        title: &str,
        folder_id: &str,
    ) -> Result<Value, WorkspaceError> {
        let copied = self.copy_file(source_id, title, Some(folder_id)).await?;
        let spreadsheet_id = copied
            .get("id")
            .and_then(Value::as_str)
            .ok_or_else(|| WorkspaceError::Http("copied file id missing from response".to_string()))?;

        Ok(json!({
            "spreadsheet_id": spreadsheet_id,
            "source_id": source_id,
            "folder_id": folder_id,
        }))
    }

    pub(super) async fn execute_sheet_op(&self, spreadsheet_id: &str, op: &SheetOp) -> Result<Value, WorkspaceError> {
        match op {
            SheetOp::ListSheets => {
                let sheets = self.sheet_properties(spreadsheet_id).await?;
                Ok(Value::Array(sheets.iter().map(SheetProperties::to_json).collect()))
            }
            SheetOp::AddSheet { sheet_name } => {
                let reply = self
                    .batch_update_spreadsheet(
                        spreadsheet_id,
                        vec![json!({ "addSheet": { "properties": { "title": sheet_name } } })],
                    )
                    .await?;
                Ok(reply_sheet(&reply, "addSheet"))
            }
            SheetOp::DuplicateSheet { sheet_id, new_name } => {
                let reply = self
                    .batch_update_spreadsheet(
                        spreadsheet_id,
                        vec![json!({
                            "duplicateSheet": {
                                "sourceSheetId": sheet_id,
                                "newSheetName": new_name,
                            }
                        })],
                    )
                    .await?;
                Ok(reply_sheet(&reply, "duplicateSheet"))
            }
            SheetOp::RenameSheet { sheet_id, new_name } => {
                self.batch_update_spreadsheet(
                    spreadsheet_id,
                    vec![json!({
                        "updateSheetProperties": {
                            "properties": { "sheetId": sheet_id, "title": new_name },
                            "fields": "title",
                        }
                    })],
                )
                .await?;
                Ok(json!({ "sheet_id": sheet_id, "title": new_name }))
            }
            SheetOp::GetSheetData { sheet_name, range } => {
                let url = values_url(spreadsheet_id, &qualified_range(sheet_name, range))?;
                let response = self.get(&url, &[]).await?;
                Ok(response.get("values").cloned().unwrap_or_else(|| json!([])))
            }
            SheetOp::AddRows { sheet_name, values } => {
                ensure_values(values)?;
                let range = qualified_range(sheet_name, "A1");
                let url = values_url(spreadsheet_id, &format!("{range}:append"))?;
                let response = self
                    .post(
                        &url,
                        &[VALUE_INPUT, ("insertDataOption", "INSERT_ROWS")],
                        &json!({ "values": values }),
                    )
                    .await?;
                let updates = response.get("updates").cloned().unwrap_or_default();
                Ok(json!({
                    "updated_range": updates.get("updatedRange").cloned().unwrap_or(Value::Null),
                    "updated_rows": updates.get("updatedRows").cloned().unwrap_or(json!(values.len())),
                }))
            }
            SheetOp::AddColumns { sheet_name, values } => {
                ensure_values(values)?;
                self.add_columns(spreadsheet_id, sheet_name, values).await
            }
            SheetOp::UpdateCells {
                sheet_name,
                range,
                values,
            } => {
                ensure_values(values)?;
                let url = values_url(spreadsheet_id, &qualified_range(sheet_name, range))?;
                let response = self.put(&url, &[VALUE_INPUT], &json!({ "values": values })).await?;
                Ok(json!({
                    "updated_range": response.get("updatedRange").cloned().unwrap_or(Value::Null),
                    "updated_cells": response.get("updatedCells").cloned().unwrap_or(Value::Null),
                }))
            }
            SheetOp::BatchUpdateCells { sheet_name, updates } => {
                if updates.is_empty() {
                    return Err(WorkspaceError::InvalidArgument("ranges must not be empty".to_string()));
                }
                let body = batch_values_body(sheet_name, updates);
                let response = self
                    .post(&format!("{SHEETS_API}/{spreadsheet_id}/values:batchUpdate"), &[], &body)
                    .await?;
                Ok(json!({
                    "updated_ranges": updates.len(),
                    "total_updated_cells": response.get("totalUpdatedCells").cloned().unwrap_or(Value::Null),
                }))
            }
            SheetOp::DeleteRows {
                sheet_name,
                start_index,
                end_index,
            } => {
                self.delete_dimension(spreadsheet_id, sheet_name, "ROWS", *start_index, *end_index)
                    .await
            }
            SheetOp::DeleteColumns {
                sheet_name,
                start_index,
                end_index,
            } => {
                self.delete_dimension(spreadsheet_id, sheet_name, "COLUMNS", *start_index, *end_index)
                    .await
            }
            SheetOp::CreateChart {
                chart_type,
                range,
                sheet_name,
                title,
            } => {
                let sheet = self.sheet_by_name(spreadsheet_id, sheet_name).await?;
                let cells = parse_range(range)?;
                let spec = chart_spec(chart_type, title.as_deref(), sheet.sheet_id, &cells)?;

                let reply = self
                    .batch_update_spreadsheet(
                        spreadsheet_id,
                        vec![json!({
                            "addChart": {
                                "chart": {
                                    "spec": spec,
                                    "position": {
                                        "overlayPosition": {
                                            "anchorCell": {
                                                "sheetId": sheet.sheet_id,
                                                "rowIndex": cells.start_row.unwrap_or(0),
                                                "columnIndex": cells.end_column.unwrap_or(0),
                                            }
                                        }
                                    }
                                }
                            }
                        })],
                    )
                    .await?;
                let chart_id = reply
                    .pointer("/replies/0/addChart/chart/chartId")
                    .cloned()
                    .unwrap_or(Value::Null);
                Ok(json!({ "chart_id": chart_id, "sheet_id": sheet.sheet_id }))
            }
        }
    }

    async fn sheet_properties(&self, spreadsheet_id: &str) -> Result<Vec<SheetProperties>, WorkspaceError> {
        let response = self
            .get(&format!("{SHEETS_API}/{spreadsheet_id}"), &[("fields", "sheets.properties")])
            .await?;
        let parsed: SpreadsheetSheets = serde_json::from_value(response)
            .map_err(|e| WorkspaceError::Http(format!("unexpected spreadsheet response: {e}")))?;
        Ok(parsed.sheets.into_iter().map(|s| s.properties).collect())
    }

    async fn sheet_by_name(&self, spreadsheet_id: &str, sheet_name: &str) -> Result<SheetProperties, WorkspaceError> {
        self.sheet_properties(spreadsheet_id)
            .await?
            .into_iter()
            .find(|sheet| sheet.title == sheet_name)
            .ok_or_else(|| WorkspaceError::NotFound(format!("sheet '{sheet_name}'")))
    }

    async fn batch_update_spreadsheet(
        &self,
        spreadsheet_id: &str,
        requests: Vec<Value>,
    ) -> Result<Value, WorkspaceError> {
        self.post(
            &format!("{SHEETS_API}/{spreadsheet_id}:batchUpdate"),
            &[],
            &json!({ "requests": requests }),
        )
        .await
    }

    /// Write each inner list as a new column to the right of the used area.
    async fn add_columns(
        &self,
        spreadsheet_id: &str,
        sheet_name: &str,
        columns: &[Vec<Value>],
    ) -> Result<Value, WorkspaceError> {
        let sheet = self.sheet_by_name(spreadsheet_id, sheet_name).await?;

        let existing = self
            .get(&values_url(spreadsheet_id, &qualified_range(sheet_name, ""))?, &[])
            .await?;
        let used_width = existing
            .get("values")
            .and_then(Value::as_array)
            .map(|rows| {
                rows.iter()
                    .filter_map(Value::as_array)
                    .map(Vec::len)
                    .max()
                    .unwrap_or(0)
            })
            .unwrap_or(0);

        let needed = (used_width + columns.len()) as i64;
        let missing = needed - sheet.grid_properties.column_count;
        if missing > 0 {
            self.batch_update_spreadsheet(
                spreadsheet_id,
                vec![json!({
                    "appendDimension": {
                        "sheetId": sheet.sheet_id,
                        "dimension": "COLUMNS",
                        "length": missing,
                    }
                })],
            )
            .await?;
        }

        let range = qualified_range(sheet_name, &format!("{}1", column_letters(used_width as u32)));
        let response = self
            .put(
                &values_url(spreadsheet_id, &range)?,
                &[VALUE_INPUT],
                &json!({ "range": range, "majorDimension": "COLUMNS", "values": columns }),
            )
            .await?;

        Ok(json!({
            "updated_range": response.get("updatedRange").cloned().unwrap_or(Value::Null),
            "updated_columns": response.get("updatedColumns").cloned().unwrap_or(json!(columns.len())),
        }))
    }

    async fn delete_dimension(
        &self,
        spreadsheet_id: &str,
        sheet_name: &str,
        dimension: &str,
        start_index: i64,
        end_index: i64,
    ) -> Result<Value, WorkspaceError> {
        ensure_span(start_index, end_index)?;
        let sheet = self.sheet_by_name(spreadsheet_id, sheet_name).await?;

        self.batch_update_spreadsheet(
            spreadsheet_id,
            vec![json!({
                "deleteDimension": {
                    "range": {
                        "sheetId": sheet.sheet_id,
                        "dimension": dimension,
                        "startIndex": start_index,
                        "endIndex": end_index,
                    }
                }
            })],
        )
        .await?;

        Ok(json!({ "sheet_id": sheet.sheet_id, "deleted": end_index - start_index }))
    }
}

/// `{sheet_id, title}` from the first reply of an addSheet/duplicateSheet batch.
fn reply_sheet(reply: &Value, kind: &str) -> Value {
    let properties = reply
        .pointer(&format!("/replies/0/{kind}/properties"))
        .cloned()
        .unwrap_or_default();
    json!({
        "sheet_id": properties.get("sheetId").cloned().unwrap_or(Value::Null),
        "title": properties.get("title").cloned().unwrap_or(Value::Null),
    })
}

fn batch_values_body(sheet_name: &str, updates: &[RangeUpdate]) -> Value {
    let data: Vec<Value> = updates
        .iter()
        .map(|update| {
            json!({
                "range": qualified_range(sheet_name, &update.range),
                "values": update.values,
            })
        })
        .collect();
    json!({ "valueInputOption": "USER_ENTERED", "data": data })
}
