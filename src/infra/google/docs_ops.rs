// Docs v1: text, headings, images, tables and document style.
//
// All indices are UTF-16 code unit offsets into the document body, which is
// how the Docs API counts. Tables are addressed by their start index.

use std::collections::BTreeMap;

use serde_json::{json, Map, Value};

use super::colors::optional_color;
use super::google_workspace_client::{GoogleWorkspaceClient, DOCS_API};
use crate::core::workspace::{CellPadding, DocOp, DocParagraphStyle, DocTextStyle, DocumentStyle, WorkspaceError};

const BULLET_PRESET: &str = "BULLET_DISC_CIRCLE_SQUARE";
const NUMBERED_PRESET: &str = "NUMBERED_DECIMAL_ALPHA_ROMAN";

/// Most rows or columns a single insert or delete call may touch.
const MAX_TABLE_SPAN: i64 = 1000;

pub fn utf16_len(text: &str) -> i64 {
    text.encode_utf16().count() as i64
}

fn pt(magnitude: f64) -> Value {
    json!({ "magnitude": magnitude, "unit": "PT" })
}

fn range(start_index: i64, end_index: i64) -> Value {
    json!({ "startIndex": start_index, "endIndex": end_index })
}

fn location(index: i64) -> Value {
    json!({ "index": index })
}

fn invalid(message: impl Into<String>) -> WorkspaceError {
    WorkspaceError::InvalidArgument(message.into())
}

fn ensure_index(index: i64) -> Result<(), WorkspaceError> {
    if index < 1 {
        return Err(invalid(format!("index must be at least 1, got {index}")));
    }
    Ok(())
}

fn ensure_range(start_index: i64, end_index: i64) -> Result<(), WorkspaceError> {
    ensure_index(start_index)?;
    if end_index <= start_index {
        return Err(invalid(format!("invalid range {start_index}..{end_index}")));
    }
    Ok(())
}

fn ensure_positive(name: &str, value: i64) -> Result<(), WorkspaceError> {
    if value < 1 {
        return Err(invalid(format!("{name} must be at least 1, got {value}")));
    }
    Ok(())
}

fn ensure_count(count: i64) -> Result<(), WorkspaceError> {
    ensure_positive("count", count)?;
    if count > MAX_TABLE_SPAN {
        return Err(invalid(format!("count must be at most {MAX_TABLE_SPAN}, got {count}")));
    }
    Ok(())
}

/// `index + length`, rejecting offsets past the end of the index space.
fn offset(index: i64, length: i64) -> Result<i64, WorkspaceError> {
    index
        .checked_add(length)
        .ok_or_else(|| invalid(format!("index {index} is out of range")))
}

/// Inclusive `start..=end` as a span length.
fn inclusive_span(start: i64, end: i64) -> Result<i64, WorkspaceError> {
    if start < 0 || end < start {
        return Err(invalid(format!("invalid span {start}..={end}")));
    }
    end.checked_sub(start)
        .and_then(|span| span.checked_add(1))
        .ok_or_else(|| invalid(format!("span {start}..={end} is out of range")))
}

/// `TextStyle` plus its field mask, or `None` when nothing is set.
pub fn text_style(style: &DocTextStyle) -> Result<Option<(Value, String)>, WorkspaceError> {
    let mut text_style = Map::new();
    let mut fields = Vec::new();

    if let Some(family) = &style.font_family {
        text_style.insert("weightedFontFamily".into(), json!({ "fontFamily": family }));
        fields.push("weightedFontFamily");
    }
    if let Some(size) = style.font_size {
        text_style.insert("fontSize".into(), pt(size));
        fields.push("fontSize");
    }
    for (key, value) in [
        ("bold", style.bold),
        ("italic", style.italic),
        ("underline", style.underline),
        ("strikethrough", style.strikethrough),
    ] {
        if let Some(flag) = value {
            text_style.insert(key.into(), json!(flag));
            fields.push(key);
        }
    }
    if let Some(color) = &style.foreground_color {
        text_style.insert("foregroundColor".into(), optional_color(color)?);
        fields.push("foregroundColor");
    }
    if let Some(color) = &style.background_color {
        text_style.insert("backgroundColor".into(), optional_color(color)?);
        fields.push("backgroundColor");
    }

    if fields.is_empty() {
        return Ok(None);
    }
    Ok(Some((Value::Object(text_style), fields.join(","))))
}

/// `ParagraphStyle` plus its field mask, or `None` when nothing is set.
/// Bullets are separate requests; see `bullet_request`.
pub fn paragraph_style(style: &DocParagraphStyle) -> Result<Option<(Value, String)>, WorkspaceError> {
    let mut paragraph = Map::new();
    let mut fields = Vec::new();

    if let Some(alignment) = &style.alignment {
        let alignment = alignment.to_ascii_uppercase();
        if !["START", "CENTER", "END", "JUSTIFIED"].contains(&alignment.as_str()) {
            return Err(invalid(format!("unsupported alignment '{alignment}'")));
        }
        paragraph.insert("alignment".into(), json!(alignment));
        fields.push("alignment");
    }
    if let Some(spacing) = style.line_spacing {
        paragraph.insert("lineSpacing".into(), json!(spacing * 100.0));
        fields.push("lineSpacing");
    }
    if let Some(space) = style.space_before {
        paragraph.insert("spaceAbove".into(), pt(space));
        fields.push("spaceAbove");
    }
    if let Some(space) = style.space_after {
        paragraph.insert("spaceBelow".into(), pt(space));
        fields.push("spaceBelow");
    }
    if let Some(indent) = style.first_line_indent {
        paragraph.insert("indentFirstLine".into(), pt(indent));
        fields.push("indentFirstLine");
    }

    if fields.is_empty() {
        return Ok(None);
    }
    Ok(Some((Value::Object(paragraph), fields.join(","))))
}

/// `createParagraphBullets` when a bulleted or numbered list was requested.
pub fn bullet_request(style: &DocParagraphStyle, start_index: i64, end_index: i64) -> Option<Value> {
    let preset = if style.numbered_list == Some(true) {
        NUMBERED_PRESET
    } else if style.bullet == Some(true) {
        BULLET_PRESET
    } else {
        return None;
    };
    Some(json!({
        "createParagraphBullets": {
            "range": range(start_index, end_index),
            "bulletPreset": preset,
        }
    }))
}

/// Every style request for `[start_index, end_index)`.
fn style_requests(
    start_index: i64,
    end_index: i64,
    text: &DocTextStyle,
    paragraph: &DocParagraphStyle,
) -> Result<Vec<Value>, WorkspaceError> {
    let mut requests = Vec::new();
    if let Some((style, fields)) = text_style(text)? {
        requests.push(json!({
            "updateTextStyle": {
                "range": range(start_index, end_index),
                "textStyle": style,
                "fields": fields,
            }
        }));
    }
    if let Some((style, fields)) = paragraph_style(paragraph)? {
        requests.push(json!({
            "updateParagraphStyle": {
                "range": range(start_index, end_index),
                "paragraphStyle": style,
                "fields": fields,
            }
        }));
    }
    if let Some(request) = bullet_request(paragraph, start_index, end_index) {
        requests.push(request);
    }
    Ok(requests)
}

fn table_start(table_id: &str) -> Result<i64, WorkspaceError> {
    table_id
        .trim()
        .parse::<i64>()
        .ok()
        .filter(|index| *index >= 1)
        .ok_or_else(|| invalid(format!("table id must be the table's start index, got '{table_id}'")))
}

fn cell_location(table_start: i64, row_index: i64, column_index: i64) -> Value {
    json!({
        "tableStartLocation": location(table_start),
        "rowIndex": row_index,
        "columnIndex": column_index,
    })
}

fn single_cell_range(table_start: i64, row_index: i64, column_index: i64) -> Value {
    json!({
        "tableCellLocation": cell_location(table_start, row_index, column_index),
        "rowSpan": 1,
        "columnSpan": 1,
    })
}

fn cell_border(color: &Value, width: f64) -> Value {
    json!({ "color": color, "width": pt(width), "dashStyle": "SOLID" })
}

/// `TableCellStyle` plus its field mask for background, borders and padding.
pub fn table_cell_style(
    background_color: Option<&str>,
    border_color: Option<&str>,
    border_width: Option<f64>,
    padding: Option<&CellPadding>,
) -> Result<(Value, String), WorkspaceError> {
    let mut style = Map::new();
    let mut fields = Vec::new();

    if let Some(color) = background_color {
        style.insert("backgroundColor".into(), optional_color(color)?);
        fields.push("backgroundColor");
    }
    if border_color.is_some() || border_width.is_some() {
        let color = optional_color(border_color.unwrap_or("#000000"))?;
        let border = cell_border(&color, border_width.unwrap_or(1.0));
        for side in ["borderTop", "borderBottom", "borderLeft", "borderRight"] {
            style.insert(side.into(), border.clone());
            fields.push(side);
        }
    }
    if let Some(padding) = padding {
        for (side, value) in [
            ("paddingTop", padding.top),
            ("paddingRight", padding.right),
            ("paddingBottom", padding.bottom),
            ("paddingLeft", padding.left),
        ] {
            if let Some(value) = value {
                style.insert(side.into(), pt(value));
                fields.push(side);
            }
        }
    }

    if fields.is_empty() {
        return Err(invalid("no table cell style fields given"));
    }
    Ok((Value::Object(style), fields.join(",")))
}

/// Parse a `"row,column"` content key.
pub fn parse_cell_key(key: &str) -> Result<(usize, usize), WorkspaceError> {
    let bad = || invalid(format!("cell key must look like 'row,column', got '{key}'"));
    let (row, column) = key.split_once(',').ok_or_else(bad)?;
    let row = row.trim().parse().map_err(|_| bad())?;
    let column = column.trim().parse().map_err(|_| bad())?;
    Ok((row, column))
}

fn body_content(document: &Value) -> &[Value] {
    document
        .pointer("/body/content")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

/// End index of the body, i.e. one past its final newline.
fn body_end(document: &Value) -> i64 {
    body_content(document)
        .last()
        .and_then(|e| e.get("endIndex"))
        .and_then(Value::as_i64)
        .unwrap_or(1)
}

/// Body elements that are tables, with their start index.
fn tables(document: &Value) -> impl Iterator<Item = (i64, &Value)> {
    body_content(document).iter().filter_map(|element| {
        let start = element.get("startIndex")?.as_i64()?;
        Some((start, element.get("table")?))
    })
}

fn table_at(document: &Value, table_start: i64) -> Result<&Value, WorkspaceError> {
    tables(document)
        .find(|(start, _)| *start == table_start)
        .map(|(_, table)| table)
        .ok_or_else(|| WorkspaceError::NotFound(format!("no table starts at index {table_start}")))
}

/// `[start, end)` of the text inside one cell, excluding the cell's final newline.
pub fn cell_text_range(table: &Value, row_index: usize, column_index: usize) -> Result<(i64, i64), WorkspaceError> {
    let cell = table
        .pointer(&format!("/tableRows/{row_index}/tableCells/{column_index}"))
        .ok_or_else(|| WorkspaceError::NotFound(format!("cell ({row_index}, {column_index})")))?;
    let content = cell
        .get("content")
        .and_then(Value::as_array)
        .filter(|content| !content.is_empty())
        .ok_or_else(|| WorkspaceError::NotFound(format!("content of cell ({row_index}, {column_index})")))?;

    let start = content[0].get("startIndex").and_then(Value::as_i64);
    let end = content[content.len() - 1].get("endIndex").and_then(Value::as_i64);
    match (start, end) {
        (Some(start), Some(end)) => Ok((start, end.saturating_sub(1).max(start))),
        _ => Err(WorkspaceError::NotFound(format!("indices of cell ({row_index}, {column_index})"))),
    }
}

fn table_columns(table: &Value) -> i64 {
    table.get("columns").and_then(Value::as_i64).unwrap_or(0)
}

/// Requests that insert `count` rows so the first new one lands at `row_index`.
pub fn insert_rows_requests(table_start: i64, row_index: i64, count: i64) -> Vec<Value> {
    let anchor = row_index.saturating_sub(1).max(0);
    let below = row_index > 0;
    (0..count)
        .map(|_| {
            json!({
                "insertTableRow": {
                    "tableCellLocation": cell_location(table_start, anchor, 0),
                    "insertBelow": below,
                }
            })
        })
        .collect()
}

/// Requests that insert `count` columns so the first new one lands at `column_index`.
pub fn insert_columns_requests(table_start: i64, column_index: i64, count: i64) -> Vec<Value> {
    let anchor = column_index.saturating_sub(1).max(0);
    let right = column_index > 0;
    (0..count)
        .map(|_| {
            json!({
                "insertTableColumn": {
                    "tableCellLocation": cell_location(table_start, 0, anchor),
                    "insertRight": right,
                }
            })
        })
        .collect()
}

/// `updateDocumentStyle` for margins and page colour, or `None` when neither is set.
pub fn document_style_request(style: &DocumentStyle) -> Result<Option<Value>, WorkspaceError> {
    let mut document_style = Map::new();
    let mut fields = Vec::new();

    for (key, value) in [
        ("marginTop", style.default_margin_top),
        ("marginBottom", style.default_margin_bottom),
        ("marginLeft", style.default_margin_left),
        ("marginRight", style.default_margin_right),
    ] {
        if let Some(value) = value {
            document_style.insert(key.into(), pt(value));
            fields.push(key);
        }
    }
    if let Some(color) = &style.default_page_color {
        document_style.insert("background".into(), json!({ "color": optional_color(color)? }));
        fields.push("background");
    }

    if fields.is_empty() {
        return Ok(None);
    }
    Ok(Some(json!({
        "updateDocumentStyle": {
            "documentStyle": document_style,
            "fields": fields.join(","),
        }
    })))
}

impl GoogleWorkspaceClient {
    pub(super) async fn create_document(&self, title: &str) -> Result<Value, WorkspaceError> {
        let created = self.post(DOCS_API, &[], &json!({ "title": title })).await?;
        let document_id = created
            .get("documentId")
            .cloned()
            .ok_or_else(|| WorkspaceError::Http("document id missing from response".to_string()))?;

        tracing::info!(document_id = %document_id, title, "Created document");
        Ok(json!({ "document_id": document_id, "title": title }))
    }

    async fn get_document(&self, document_id: &str) -> Result<Value, WorkspaceError> {
        self.get(&format!("{DOCS_API}/{document_id}"), &[]).await
    }

    async fn batch_update_document(&self, document_id: &str, requests: Vec<Value>) -> Result<Value, WorkspaceError> {
        self.post(
            &format!("{DOCS_API}/{document_id}:batchUpdate"),
            &[],
            &json!({ "requests": requests }),
        )
        .await
    }

    pub(super) async fn execute_doc_op(&self, document_id: &str, op: &DocOp) -> Result<Value, WorkspaceError> {
        match op {
            DocOp::InsertText {
                text,
                index,
                text_style,
                paragraph_style,
            } => {
                ensure_index(*index)?;
                if text.is_empty() {
                    return Err(invalid("text must not be empty"));
                }
                let end = offset(*index, utf16_len(text))?;
                let mut requests = vec![json!({ "insertText": { "location": location(*index), "text": text } })];
                requests.extend(style_requests(*index, end, text_style, paragraph_style)?);

                self.batch_update_document(document_id, requests).await?;
                Ok(json!({ "start_index": index, "end_index": end }))
            }
            DocOp::InsertHeading { text, level, index } => {
                ensure_index(*index)?;
                if !(1..=6).contains(level) {
                    return Err(invalid(format!("heading level must be 1-6, got {level}")));
                }
                let text = format!("{text}\n");
                let end = offset(*index, utf16_len(&text))?;
                let requests = vec![
                    json!({ "insertText": { "location": location(*index), "text": text } }),
                    json!({
                        "updateParagraphStyle": {
                            "range": range(*index, end),
                            "paragraphStyle": { "namedStyleType": format!("HEADING_{level}") },
                            "fields": "namedStyleType",
                        }
                    }),
                ];
                self.batch_update_document(document_id, requests).await?;
                Ok(json!({ "start_index": index, "end_index": end, "level": level }))
            }
            DocOp::InsertImage { image_url, index } => {
                ensure_index(*index)?;
                let reply = self
                    .batch_update_document(
                        document_id,
                        vec![json!({ "insertInlineImage": { "location": location(*index), "uri": image_url } })],
                    )
                    .await?;
                let image_id = reply
                    .pointer("/replies/0/insertInlineImage/objectId")
                    .cloned()
                    .unwrap_or(Value::Null);
                Ok(json!({ "image_id": image_id, "index": index }))
            }
            DocOp::GetDocument => self.get_document(document_id).await,
            DocOp::DeleteDocument => self.delete_file(document_id).await,
            DocOp::CreateTable { rows, columns, index } => {
                ensure_index(*index)?;
                ensure_positive("rows", *rows)?;
                ensure_positive("columns", *columns)?;
                self.batch_update_document(
                    document_id,
                    vec![json!({
                        "insertTable": { "rows": rows, "columns": columns, "location": location(*index) }
                    })],
                )
                .await?;

                let document = self.get_document(document_id).await?;
                let table_id = tables(&document)
                    .map(|(start, _)| start)
                    .find(|start| *start >= *index)
                    .map(|start| json!(start.to_string()))
                    .unwrap_or(Value::Null);
                Ok(json!({ "table_id": table_id, "rows": rows, "columns": columns }))
            }
            DocOp::UpdateTextStyle {
                start_index,
                end_index,
                style,
            } => {
                ensure_range(*start_index, *end_index)?;
                let (style, fields) = text_style(style)?.ok_or_else(|| invalid("no text style fields given"))?;
                self.batch_update_document(
                    document_id,
                    vec![json!({
                        "updateTextStyle": {
                            "range": range(*start_index, *end_index),
                            "textStyle": style,
                            "fields": fields,
                        }
                    })],
                )
                .await?;
                Ok(json!({ "start_index": start_index, "end_index": end_index }))
            }
            DocOp::UpdateParagraphStyle {
                start_index,
                end_index,
                style,
            } => {
                ensure_range(*start_index, *end_index)?;
                let requests = style_requests(*start_index, *end_index, &DocTextStyle::default(), style)?;
                if requests.is_empty() {
                    return Err(invalid("no paragraph style fields given"));
                }
                self.batch_update_document(document_id, requests).await?;
                Ok(json!({ "start_index": start_index, "end_index": end_index }))
            }
            DocOp::InsertPageBreak { index } => {
                ensure_index(*index)?;
                self.batch_update_document(
                    document_id,
                    vec![json!({ "insertPageBreak": { "location": location(*index) } })],
                )
                .await?;
                Ok(json!({ "index": index }))
            }
            DocOp::InsertHorizontalRule { index } => {
                ensure_index(*index)?;
                let end = offset(*index, 1)?;
                let black = optional_color("#000000")?;
                let requests = vec![
                    json!({ "insertText": { "location": location(*index), "text": "\n" } }),
                    json!({
                        "updateParagraphStyle": {
                            "range": range(*index, end),
                            "paragraphStyle": {
                                "borderBottom": {
                                    "color": black,
                                    "width": pt(1.0),
                                    "padding": pt(1.0),
                                    "dashStyle": "SOLID",
                                }
                            },
                            "fields": "borderBottom",
                        }
                    }),
                ];
                self.batch_update_document(document_id, requests).await?;
                Ok(json!({ "index": index }))
            }
            DocOp::UpdateTableCellContent {
                table_id,
                row_index,
                column_index,
                content,
            } => {
                let start = table_start(table_id)?;
                let document = self.get_document(document_id).await?;
                let table = table_at(&document, start)?;
                let (text_start, text_end) =
                    cell_text_range(table, index_usize(*row_index)?, index_usize(*column_index)?)?;

                let mut requests = Vec::new();
                if text_end > text_start {
                    requests.push(json!({ "deleteContentRange": { "range": range(text_start, text_end) } }));
                }
                if !content.is_empty() {
                    requests.push(json!({ "insertText": { "location": location(text_start), "text": content } }));
                }
                if !requests.is_empty() {
                    self.batch_update_document(document_id, requests).await?;
                }
                Ok(json!({ "table_id": table_id, "row_index": row_index, "column_index": column_index }))
            }
            DocOp::UpdateTableCellStyle {
                table_id,
                row_index,
                column_index,
                background_color,
                border_color,
                border_width,
                padding,
            } => {
                let start = table_start(table_id)?;
                let (style, fields) = table_cell_style(
                    background_color.as_deref(),
                    border_color.as_deref(),
                    *border_width,
                    padding.as_ref(),
                )?;
                self.batch_update_document(
                    document_id,
                    vec![json!({
                        "updateTableCellStyle": {
                            "tableRange": single_cell_range(start, *row_index, *column_index),
                            "tableCellStyle": style,
                            "fields": fields,
                        }
                    })],
                )
                .await?;
                Ok(json!({ "table_id": table_id, "row_index": row_index, "column_index": column_index }))
            }
            DocOp::UpdateTableRowStyle {
                table_id,
                row_index,
                background_color,
                height,
            } => {
                let start = table_start(table_id)?;
                let mut requests = Vec::new();
                if let Some(height) = height {
                    requests.push(json!({
                        "updateTableRowStyle": {
                            "tableStartLocation": location(start),
                            "rowIndices": [row_index],
                            "tableRowStyle": { "minRowHeight": pt(*height) },
                            "fields": "minRowHeight",
                        }
                    }));
                }
                if let Some(color) = background_color {
                    let document = self.get_document(document_id).await?;
                    let columns = table_columns(table_at(&document, start)?);
                    requests.push(json!({
                        "updateTableCellStyle": {
                            "tableRange": {
                                "tableCellLocation": cell_location(start, *row_index, 0),
                                "rowSpan": 1,
                                "columnSpan": columns.max(1),
                            },
                            "tableCellStyle": { "backgroundColor": optional_color(color)? },
                            "fields": "backgroundColor",
                        }
                    }));
                }
                if requests.is_empty() {
                    return Err(invalid("no table row style fields given"));
                }
                self.batch_update_document(document_id, requests).await?;
                Ok(json!({ "table_id": table_id, "row_index": row_index }))
            }
            DocOp::UpdateTableColumnStyle {
                table_id,
                column_index,
                width,
            } => {
                let start = table_start(table_id)?;
                let width = width.ok_or_else(|| invalid("no table column style fields given"))?;
                self.batch_update_document(
                    document_id,
                    vec![json!({
                        "updateTableColumnProperties": {
                            "tableStartLocation": location(start),
                            "columnIndices": [column_index],
                            "tableColumnProperties": { "widthType": "FIXED_WIDTH", "width": pt(width) },
                            "fields": "width,widthType",
                        }
                    })],
                )
                .await?;
                Ok(json!({ "table_id": table_id, "column_index": column_index }))
            }
            DocOp::MergeTableCells {
                table_id,
                start_row,
                start_column,
                end_row,
                end_column,
            } => {
                let start = table_start(table_id)?;
                let row_span = inclusive_span(*start_row, *end_row)?;
                let column_span = inclusive_span(*start_column, *end_column)?;
                self.batch_update_document(
                    document_id,
                    vec![json!({
                        "mergeTableCells": {
                            "tableRange": {
                                "tableCellLocation": cell_location(start, *start_row, *start_column),
                                "rowSpan": row_span,
                                "columnSpan": column_span,
                            }
                        }
                    })],
                )
                .await?;
                Ok(json!({ "table_id": table_id }))
            }
            DocOp::InsertTableRows {
                table_id,
                row_index,
                count,
            } => {
                let start = table_start(table_id)?;
                ensure_count(*count)?;
                self.batch_update_document(document_id, insert_rows_requests(start, *row_index, *count))
                    .await?;
                Ok(json!({ "table_id": table_id, "inserted": count }))
            }
            DocOp::InsertTableColumns {
                table_id,
                column_index,
                count,
            } => {
                let start = table_start(table_id)?;
                ensure_count(*count)?;
                self.batch_update_document(document_id, insert_columns_requests(start, *column_index, *count))
                    .await?;
                Ok(json!({ "table_id": table_id, "inserted": count }))
            }
            DocOp::DeleteTableRows {
                table_id,
                row_index,
                count,
            } => {
                let start = table_start(table_id)?;
                ensure_count(*count)?;
                let requests = (0..*count)
                    .map(|_| json!({ "deleteTableRow": { "tableCellLocation": cell_location(start, *row_index, 0) } }))
                    .collect();
                self.batch_update_document(document_id, requests).await?;
                Ok(json!({ "table_id": table_id, "deleted": count }))
            }
            DocOp::DeleteTableColumns {
                table_id,
                column_index,
                count,
            } => {
                let start = table_start(table_id)?;
                ensure_count(*count)?;
                let requests = (0..*count)
                    .map(|_| {
                        json!({ "deleteTableColumn": { "tableCellLocation": cell_location(start, 0, *column_index) } })
                    })
                    .collect();
                self.batch_update_document(document_id, requests).await?;
                Ok(json!({ "table_id": table_id, "deleted": count }))
            }
            DocOp::UpdateDocumentStyle { style } => self.update_document_style(document_id, style).await,
            DocOp::CreateTableWithContent { rows, columns, content } => {
                self.create_table_with_content(document_id, *rows, *columns, content)
                    .await
            }
        }
    }

    /// Margins and page colour go to the document style; font and spacing defaults
    /// are applied across the whole body.
    async fn update_document_style(&self, document_id: &str, style: &DocumentStyle) -> Result<Value, WorkspaceError> {
        let mut requests = Vec::new();
        if let Some(request) = document_style_request(style)? {
            requests.push(request);
        }

        let body_text = DocTextStyle {
            font_family: style.default_font_family.clone(),
            font_size: style.default_font_size,
            ..Default::default()
        };
        let body_paragraph = DocParagraphStyle {
            line_spacing: style.default_line_spacing,
            ..Default::default()
        };
        let touches_body = style.default_font_family.is_some()
            || style.default_font_size.is_some()
            || style.default_line_spacing.is_some();

        if touches_body {
            let document = self.get_document(document_id).await?;
            let end = body_end(&document).saturating_sub(1);
            if end > 1 {
                requests.extend(style_requests(1, end, &body_text, &body_paragraph)?);
            }
        }

        if requests.is_empty() {
            return Err(invalid("no document style fields given"));
        }
        self.batch_update_document(document_id, requests).await?;
        Ok(json!({ "document_id": document_id }))
    }

    /// Append a table at the end of the body and fill the given cells.
    async fn create_table_with_content(
        &self,
        document_id: &str,
        rows: i64,
        columns: i64,
        content: &BTreeMap<String, String>,
    ) -> Result<Value, WorkspaceError> {
        ensure_positive("rows", rows)?;
        ensure_positive("columns", columns)?;

        let mut cells = Vec::with_capacity(content.len());
        for (key, text) in content {
            let (row, column) = parse_cell_key(key)?;
            if row as i64 >= rows || column as i64 >= columns {
                return Err(invalid(format!("cell {key} is outside a {rows}x{columns} table")));
            }
            cells.push((row, column, text));
        }

        self.batch_update_document(
            document_id,
            vec![json!({
                "insertTable": { "rows": rows, "columns": columns, "endOfSegmentLocation": {} }
            })],
        )
        .await?;

        let document = self.get_document(document_id).await?;
        let (table_start, table) = tables(&document)
            .last()
            .ok_or_else(|| WorkspaceError::NotFound("inserted table".to_string()))?;

        let mut inserts = Vec::new();
        for (row, column, text) in cells {
            if text.is_empty() {
                continue;
            }
            let (start, _) = cell_text_range(table, row, column)?;
            inserts.push((start, text));
        }
        // Fill from the end so earlier indices stay valid.
        inserts.sort_by(|a, b| b.0.cmp(&a.0));
        let filled = inserts.len();

        if !inserts.is_empty() {
            let requests = inserts
                .into_iter()
                .map(|(index, text)| json!({ "insertText": { "location": location(index), "text": text } }))
                .collect();
            self.batch_update_document(document_id, requests).await?;
        }

        Ok(json!({
            "table_id": table_start.to_string(),
            "rows": rows,
            "columns": columns,
            "cells_filled": filled,
        }))
    }
}

fn index_usize(index: i64) -> Result<usize, WorkspaceError> {
    usize::try_from(index).map_err(|_| invalid(format!("index must not be negative, got {index}")))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;

    use super::*;
    use crate::core::config::{Config, FolderAliases};
    use crate::core::workspace::{WorkspaceOp, WorkspaceService};
    use crate::infra::google::AccessTokenProvider;

    struct NoToken;

    #[async_trait]
    impl AccessTokenProvider for NoToken {
        async fn access_token(&self) -> Result<String, WorkspaceError> {
            Err(WorkspaceError::Auth("no credentials in tests".to_string()))
        }
    }

    fn client() -> GoogleWorkspaceClient {
        GoogleWorkspaceClient::new(Box::new(NoToken))
    }

    fn doc(op: DocOp) -> WorkspaceOp {
        WorkspaceOp::Document {
            document_id: "D1".to_string(),
            op,
        }
    }

    fn sample_document() -> Value {
        json!({
            "body": { "content": [
                { "startIndex": 0, "endIndex": 1, "sectionBreak": {} },
                { "startIndex": 1, "endIndex": 7, "paragraph": {} },
                { "startIndex": 7, "endIndex": 20, "table": {
                    "rows": 2,
                    "columns": 2,
                    "tableRows": [
                        { "tableCells": [
                            { "startIndex": 8, "content": [{ "startIndex": 9, "endIndex": 10 }] },
                            { "startIndex": 10, "content": [{ "startIndex": 11, "endIndex": 15 }] }
                        ] },
                        { "tableCells": [
                            { "startIndex": 16, "content": [{ "startIndex": 17, "endIndex": 18 }] },
                            { "startIndex": 18, "content": [{ "startIndex": 19, "endIndex": 20 }] }
                        ] }
                    ]
                } },
                { "startIndex": 20, "endIndex": 21, "paragraph": {} }
            ] }
        })
    }

    #[test]
    fn test_utf16_length() {
        assert_eq!(utf16_len("abc"), 3);
        assert_eq!(utf16_len("é"), 1);
        assert_eq!(utf16_len("😀"), 2);
    }

    #[test]
    fn test_text_style_mask() {
        assert!(text_style(&DocTextStyle::default()).unwrap().is_none());

        let (style, fields) = text_style(&DocTextStyle {
            font_family: Some("Roboto".to_string()),
            bold: Some(true),
            underline: Some(false),
            background_color: Some("#FFFF00".to_string()),
            ..Default::default()
        })
        .unwrap()
        .unwrap();

        assert_eq!(fields, "weightedFontFamily,bold,underline,backgroundColor");
        assert_eq!(style["weightedFontFamily"]["fontFamily"], json!("Roboto"));
        assert_eq!(style["underline"], json!(false));
        assert_eq!(style["backgroundColor"]["color"]["rgbColor"]["green"], json!(1.0));
    }

    #[test]
    fn test_paragraph_style_mask() {
        let (style, fields) = paragraph_style(&DocParagraphStyle {
            alignment: Some("center".to_string()),
            line_spacing: Some(1.5),
            space_after: Some(6.0),
            ..Default::default()
        })
        .unwrap()
        .unwrap();

        assert_eq!(fields, "alignment,lineSpacing,spaceBelow");
        assert_eq!(style["alignment"], json!("CENTER"));
        assert_eq!(style["lineSpacing"], json!(150.0));

        let bad = DocParagraphStyle {
            alignment: Some("diagonal".to_string()),
            ..Default::default()
        };
        assert!(paragraph_style(&bad).is_err());
    }

    #[test]
    fn test_bullets_prefer_numbering() {
        let style = DocParagraphStyle {
            bullet: Some(true),
            numbered_list: Some(true),
            ..Default::default()
        };
        let request = bullet_request(&style, 1, 5).unwrap();
        assert_eq!(request["createParagraphBullets"]["bulletPreset"], json!(NUMBERED_PRESET));

        assert!(bullet_request(&DocParagraphStyle::default(), 1, 5).is_none());
    }

    #[test]
    fn test_style_requests_cover_every_part() {
        let requests = style_requests(
            1,
            6,
            &DocTextStyle {
                italic: Some(true),
                ..Default::default()
            },
            &DocParagraphStyle {
                bullet: Some(true),
                ..Default::default()
            },
        )
        .unwrap();

        assert_eq!(requests.len(), 2);
        assert!(requests[0].get("updateTextStyle").is_some());
        assert_eq!(requests[1]["createParagraphBullets"]["range"], json!({ "startIndex": 1, "endIndex": 6 }));
    }

    #[test]
    fn test_table_start_parsing() {
        assert_eq!(table_start("7").unwrap(), 7);
        assert_eq!(table_start(" 42 ").unwrap(), 42);
        assert!(table_start("0").is_err());
        assert!(table_start("table-1").is_err());
    }

    #[test]
    fn test_cell_text_range() {
        let document = sample_document();
        let table = table_at(&document, 7).unwrap();

        assert_eq!(cell_text_range(table, 0, 0).unwrap(), (9, 9));
        assert_eq!(cell_text_range(table, 0, 1).unwrap(), (11, 14));
        assert!(cell_text_range(table, 2, 0).is_err());

        assert!(table_at(&document, 8).is_err());
        assert_eq!(table_columns(table), 2);
        assert_eq!(body_end(&document), 21);
    }

    #[test]
    fn test_insert_row_anchors() {
        let above = insert_rows_requests(7, 0, 1);
        assert_eq!(above[0]["insertTableRow"]["insertBelow"], json!(false));
        assert_eq!(above[0]["insertTableRow"]["tableCellLocation"]["rowIndex"], json!(0));

        let below = insert_rows_requests(7, 2, 3);
        assert_eq!(below.len(), 3);
        assert_eq!(below[0]["insertTableRow"]["insertBelow"], json!(true));
        assert_eq!(below[2]["insertTableRow"]["tableCellLocation"]["rowIndex"], json!(1));
        assert_eq!(
            below[0]["insertTableRow"]["tableCellLocation"]["tableStartLocation"]["index"],
            json!(7)
        );

        let right = insert_columns_requests(7, 1, 1);
        assert_eq!(right[0]["insertTableColumn"]["insertRight"], json!(true));
        assert_eq!(right[0]["insertTableColumn"]["tableCellLocation"]["columnIndex"], json!(0));
    }

    #[test]
    fn test_table_cell_style_defaults_border() {
        let (style, fields) = table_cell_style(None, None, Some(2.0), None).unwrap();
        assert_eq!(fields, "borderTop,borderBottom,borderLeft,borderRight");
        assert_eq!(style["borderLeft"]["width"]["magnitude"], json!(2.0));
        assert_eq!(style["borderLeft"]["color"]["color"]["rgbColor"]["red"], json!(0.0));

        let padding = CellPadding {
            top: Some(4.0),
            ..Default::default()
        };
        let (_, fields) = table_cell_style(Some("#eee"), None, None, Some(&padding)).unwrap();
        assert_eq!(fields, "backgroundColor,paddingTop");

        assert!(table_cell_style(None, None, None, None).is_err());
    }

    #[test]
    fn test_cell_key_parsing() {
        assert_eq!(parse_cell_key("0,1").unwrap(), (0, 1));
        assert_eq!(parse_cell_key(" 2 , 3 ").unwrap(), (2, 3));
        assert!(parse_cell_key("1").is_err());
        assert!(parse_cell_key("a,b").is_err());
        assert!(parse_cell_key("-1,0").is_err());
    }

    #[test]
    fn test_document_style_request() {
        assert!(document_style_request(&DocumentStyle::default()).unwrap().is_none());

        let request = document_style_request(&DocumentStyle {
            default_margin_top: Some(36.0),
            default_page_color: Some("#ffffff".to_string()),
            default_font_family: Some("Arial".to_string()),
            ..Default::default()
        })
        .unwrap()
        .unwrap();
        let update = &request["updateDocumentStyle"];
        assert_eq!(update["fields"], json!("marginTop,background"));
        assert_eq!(update["documentStyle"]["background"]["color"]["color"]["rgbColor"]["red"], json!(1.0));
    }

    #[test]
    fn test_offsets_and_spans_are_checked() {
        assert_eq!(offset(1, 5).unwrap(), 6);
        assert!(matches!(offset(i64::MAX, 1), Err(WorkspaceError::InvalidArgument(_))));

        assert_eq!(inclusive_span(0, 0).unwrap(), 1);
        assert_eq!(inclusive_span(1, 3).unwrap(), 3);
        assert!(inclusive_span(2, 1).is_err());
        assert!(inclusive_span(-1, 1).is_err());
        assert!(matches!(inclusive_span(0, i64::MAX), Err(WorkspaceError::InvalidArgument(_))));

        assert!(ensure_count(MAX_TABLE_SPAN).is_ok());
        assert!(ensure_count(MAX_TABLE_SPAN + 1).is_err());
        assert!(ensure_count(0).is_err());
    }

    #[test]
    fn test_extreme_anchors_saturate() {
        let requests = insert_rows_requests(7, i64::MIN, 1);
        assert_eq!(requests[0]["insertTableRow"]["tableCellLocation"]["rowIndex"], json!(0));
        assert_eq!(requests[0]["insertTableRow"]["insertBelow"], json!(false));

        let requests = insert_columns_requests(7, i64::MIN, 1);
        assert_eq!(requests[0]["insertTableColumn"]["tableCellLocation"]["columnIndex"], json!(0));
    }

    #[tokio::test]
    async fn test_out_of_range_arguments_are_rejected_before_any_request() {
        let client = client();
        let ops = [
            DocOp::InsertText {
                text: "x".to_string(),
                index: i64::MAX,
                text_style: DocTextStyle::default(),
                paragraph_style: DocParagraphStyle::default(),
            },
            DocOp::InsertHeading {
                text: "Title".to_string(),
                level: 1,
                index: i64::MAX,
            },
            DocOp::InsertHorizontalRule { index: i64::MAX },
            DocOp::MergeTableCells {
                table_id: "7".to_string(),
                start_row: 0,
                start_column: 0,
                end_row: i64::MAX,
                end_column: 1,
            },
            DocOp::MergeTableCells {
                table_id: "7".to_string(),
                start_row: 0,
                start_column: -1,
                end_row: 1,
                end_column: 1,
            },
            DocOp::InsertTableRows {
                table_id: "7".to_string(),
                row_index: 0,
                count: i64::MAX,
            },
            DocOp::InsertTableColumns {
                table_id: "7".to_string(),
                column_index: 0,
                count: i64::MAX,
            },
            DocOp::DeleteTableRows {
                table_id: "7".to_string(),
                row_index: 0,
                count: i64::MAX,
            },
            DocOp::DeleteTableColumns {
                table_id: "7".to_string(),
                column_index: 0,
                count: MAX_TABLE_SPAN + 1,
            },
        ];

        // The token provider always fails, so reaching HTTP would give Auth instead.
        for op in &ops {
            let err = client.execute_doc_op("D1", op).await.unwrap_err();
            assert!(
                matches!(err, WorkspaceError::InvalidArgument(_)),
                "{} gave {err:?}",
                op.name()
            );
        }
    }

    #[tokio::test]
    async fn test_dispatch_returns_failure_envelope_for_overflowing_index() {
        let config = Arc::new(Config {
            client_secret_path: "secret.json".to_string(),
            token_path: "token.json".to_string(),
            folder_id: "F1".to_string(),
            folders: FolderAliases::from_iter([("main", "F1")]),
            default_folder: "main".to_string(),
        });
        let service = WorkspaceService::new(client(), config);

        let envelope = service
            .dispatch(doc(DocOp::InsertText {
                text: "x".to_string(),
                index: i64::MAX,
                text_style: DocTextStyle::default(),
                paragraph_style: DocParagraphStyle::default(),
            }))
            .await;
        assert!(!envelope.success);
        assert!(envelope.message.contains("out of range"), "{}", envelope.message);

        let envelope = service
            .dispatch(doc(DocOp::MergeTableCells {
                table_id: "7".to_string(),
                start_row: 0,
                start_column: 0,
                end_row: i64::MAX,
                end_column: 0,
            }))
            .await;
        assert!(!envelope.success);
    }
}
