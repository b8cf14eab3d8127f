// Argument schemas for every MCP tool.
//
// Field names are the wire names the tools advertise. Shared style records from the
// core layer are flattened so callers pass e.g. `font_size` at the top level.

use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::Value;

use crate::core::workspace::{
    CellPadding, DocParagraphStyle, DocTextStyle, DocumentStyle, ElementGeometry, RangeUpdate,
    ShapeFill, SlideTextStyle,
};

fn default_index() -> i64 {
    1
}

fn default_count() -> i64 {
    1
}

fn default_heading_level() -> i64 {
    1
}

fn default_image_x() -> f64 {
    100.0
}

fn default_image_y() -> f64 {
    100.0
}

fn default_image_width() -> f64 {
    400.0
}

fn default_image_height() -> f64 {
    300.0
}

fn default_line_color() -> String {
    "#000000".to_string()
}

fn default_line_width() -> f64 {
    1.0
}

fn default_line_type() -> String {
    "STRAIGHT".to_string()
}

fn default_transition_type() -> String {
    "FADE".to_string()
}

fn default_transition_duration() -> String {
    "SLOW".to_string()
}

// ============================================================================
// DRIVE
// ============================================================================

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct FileRenameParams {
    /// Drive file ID.
    pub file_id: String,
    /// Name of the copy or the new name of the file.
    pub new_name: String,
}

// ============================================================================
// SPREADSHEETS
// ============================================================================

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct CreateSpreadsheetParams {
    pub title: String,
    /// Folder alias or raw folder ID. Defaults to the configured default folder.
    #[serde(default)]
    pub folder: Option<String>,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct CreateFromTemplateParams {
    /// ID of the template spreadsheet.
    pub template_id: String,
    pub title: String,
    #[serde(default)]
    pub folder: Option<String>,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct CreateFromExistingParams {
    /// ID of the spreadsheet to copy.
    pub source_id: String,
    pub title: String,
    #[serde(default)]
    pub folder: Option<String>,
}

/// Only a spreadsheet id; omitted means the current spreadsheet.
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct SpreadsheetParams {
    #[serde(default)]
    pub spreadsheet_id: Option<String>,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct AddSheetParams {
    pub sheet_name: String,
    #[serde(default)]
    pub spreadsheet_id: Option<String>,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct SheetRenameParams {
    /// Numeric sheet ID (not the tab name).
    pub sheet_id: i64,
    pub new_name: String,
    #[serde(default)]
    pub spreadsheet_id: Option<String>,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct GetSheetDataParams {
    pub sheet_name: String,
    /// A1 range inside the sheet. Empty reads the whole sheet.
    #[serde(default)]
    pub range_name: String,
    #[serde(default)]
    pub spreadsheet_id: Option<String>,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct SheetValuesParams {
    pub sheet_name: String,
    /// Rows for `add_rows`; each inner list is one column for `add_columns`.
    pub values: Vec<Vec<Value>>,
    #[serde(default)]
    pub spreadsheet_id: Option<String>,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct UpdateCellsParams {
    pub sheet_name: String,
    /// A1 range inside the sheet, e.g. `A1:C3`.
    pub range_name: String,
    pub values: Vec<Vec<Value>>,
    #[serde(default)]
    pub spreadsheet_id: Option<String>,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct BatchUpdateCellsParams {
    pub sheet_name: String,
    pub updates: Vec<RangeUpdate>,
    #[serde(default)]
    pub spreadsheet_id: Option<String>,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct DeleteDimensionParams {
    pub sheet_name: String,
    /// Zero-based, inclusive.
    pub start_index: i64,
    /// Zero-based, exclusive.
    pub end_index: i64,
    #[serde(default)]
    pub spreadsheet_id: Option<String>,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct CreateChartParams {
    /// `BAR`, `LINE`, `AREA`, `COLUMN`, `SCATTER` or `PIE`.
    pub chart_type: String,
    /// A1 range holding the chart data.
    pub range_name: String,
    pub sheet_name: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub spreadsheet_id: Option<String>,
}

// ============================================================================
// SLIDES
// ============================================================================

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct TitleParams {
    pub title: String,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct PresentationParams {
    pub presentation_id: String,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct AddSlideParams {
    pub presentation_id: String,
    pub title: String,
    /// Body text. May be JSON, optionally wrapped in backticks; literal `\n` becomes a newline.
    pub content: String,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct AddImageParams {
    pub presentation_id: String,
    pub slide_id: String,
    pub image_url: String,
    /// Position and size in points.
    #[serde(default = "default_image_x")]
    pub x: f64,
    #[serde(default = "default_image_y")]
    pub y: f64,
    #[serde(default = "default_image_width")]
    pub width: f64,
    #[serde(default = "default_image_height")]
    pub height: f64,
    /// Rotation in degrees.
    #[serde(default)]
    pub rotation: f64,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct SearchElementsParams {
    pub presentation_id: String,
    pub slide_id: String,
    /// `SHAPE`, `IMAGE`, `TABLE`, `LINE`, `VIDEO` and so on. Omit for every element.
    #[serde(default)]
    pub element_type: Option<String>,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct SlideElementParams {
    pub presentation_id: String,
    pub slide_id: String,
    pub element_id: String,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct SlideTextStyleParams {
    pub presentation_id: String,
    pub slide_id: String,
    pub element_id: String,
    #[serde(flatten)]
    pub style: SlideTextStyle,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ShapeStyleParams {
    pub presentation_id: String,
    pub slide_id: String,
    pub element_id: String,
    #[serde(flatten)]
    pub geometry: ElementGeometry,
    #[serde(flatten)]
    pub fill: ShapeFill,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct AddShapeParams {
    pub presentation_id: String,
    pub slide_id: String,
    /// Slides shape type, e.g. `RECTANGLE`, `ELLIPSE`, `TEXT_BOX`.
    pub shape_type: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    #[serde(flatten)]
    pub fill: ShapeFill,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct AddLineParams {
    pub presentation_id: String,
    pub slide_id: String,
    pub start_x: f64,
    pub start_y: f64,
    pub end_x: f64,
    pub end_y: f64,
    #[serde(default = "default_line_color")]
    pub line_color: String,
    #[serde(default = "default_line_width")]
    pub line_width: f64,
    /// `STRAIGHT`, `BENT` or `CURVED`.
    #[serde(default = "default_line_type")]
    pub line_type: String,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct SlideBackgroundParams {
    pub presentation_id: String,
    pub slide_id: String,
    #[serde(default)]
    pub background_color: Option<String>,
    #[serde(default)]
    pub background_image_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct SlideLayoutParams {
    pub presentation_id: String,
    pub slide_id: String,
    /// `TITLE`, `TITLE_AND_BODY`, `MAIN_POINT` and so on.
    pub layout_type: String,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct SlideTransitionParams {
    pub presentation_id: String,
    pub slide_id: String,
    #[serde(default = "default_transition_type")]
    pub transition_type: String,
    /// `SLOW`, `MEDIUM` or `FAST`.
    #[serde(default = "default_transition_duration")]
    pub duration: String,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct SlideNotesParams {
    pub presentation_id: String,
    pub slide_id: String,
    pub notes_text: String,
}

// ============================================================================
// DOCS
// ============================================================================

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct DocumentParams {
    pub document_id: String,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct InsertTextParams {
    pub document_id: String,
    pub text: String,
    /// UTF-16 offset into the body; 1 is the start of the document.
    #[serde(default = "default_index")]
    pub index: i64,
    #[serde(flatten)]
    pub text_style: DocTextStyle,
    #[serde(flatten)]
    pub paragraph_style: DocParagraphStyle,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct InsertHeadingParams {
    pub document_id: String,
    pub text: String,
    /// Heading level 1 to 6.
    #[serde(default = "default_heading_level")]
    pub level: i64,
    #[serde(default = "default_index")]
    pub index: i64,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct InsertDocImageParams {
    pub document_id: String,
    pub image_url: String,
    #[serde(default = "default_index")]
    pub index: i64,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct CreateTableParams {
    pub document_id: String,
    pub rows: i64,
    pub columns: i64,
    #[serde(default = "default_index")]
    pub index: i64,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct DocTextStyleParams {
    pub document_id: String,
    pub start_index: i64,
    pub end_index: i64,
    #[serde(flatten)]
    pub style: DocTextStyle,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct DocParagraphStyleParams {
    pub document_id: String,
    pub start_index: i64,
    pub end_index: i64,
    #[serde(flatten)]
    pub style: DocParagraphStyle,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct DocIndexParams {
    pub document_id: String,
    pub index: i64,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct TableCellContentParams {
    pub document_id: String,
    /// Start index of the table, as returned by `create_table_in_document`.
    pub table_id: String,
    pub row_index: i64,
    pub column_index: i64,
    pub content: String,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct TableCellStyleParams {
    pub document_id: String,
    pub table_id: String,
    pub row_index: i64,
    pub column_index: i64,
    #[serde(default)]
    pub background_color: Option<String>,
    #[serde(default)]
    pub border_color: Option<String>,
    #[serde(default)]
    pub border_width: Option<f64>,
    #[serde(default)]
    pub padding: Option<CellPadding>,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct TableRowStyleParams {
    pub document_id: String,
    pub table_id: String,
    pub row_index: i64,
    #[serde(default)]
    pub background_color: Option<String>,
    /// Minimum row height in points.
    #[serde(default)]
    pub height: Option<f64>,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct TableColumnStyleParams {
    pub document_id: String,
    pub table_id: String,
    pub column_index: i64,
    /// Column width in points.
    #[serde(default)]
    pub width: Option<f64>,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct MergeTableCellsParams {
    pub document_id: String,
    pub table_id: String,
    pub start_row: i64,
    pub start_column: i64,
    /// Inclusive.
    pub end_row: i64,
    /// Inclusive.
    pub end_column: i64,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct TableRowsParams {
    pub document_id: String,
    pub table_id: String,
    pub row_index: i64,
    #[serde(default = "default_count")]
    pub num_rows: i64,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct TableColumnsParams {
    pub document_id: String,
    pub table_id: String,
    pub column_index: i64,
    #[serde(default = "default_count")]
    pub num_columns: i64,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct DocumentStyleParams {
    pub document_id: String,
    #[serde(flatten)]
    pub style: DocumentStyle,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct TableWithContentParams {
    pub document_id: String,
    pub rows: i64,
    pub columns: i64,
    /// Cell text keyed by `"row,column"` (zero-based).
    pub content: BTreeMap<String, String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_image_defaults() {
        let params: AddImageParams = serde_json::from_value(json!({
            "presentation_id": "P1",
            "slide_id": "s1",
            "image_url": "https://example.com/a.png"
        }))
        .unwrap();

        assert_eq!((params.x, params.y), (100.0, 100.0));
        assert_eq!((params.width, params.height), (400.0, 300.0));
        assert_eq!(params.rotation, 0.0);
    }

    #[test]
    fn test_line_and_transition_defaults() {
        let line: AddLineParams = serde_json::from_value(json!({
            "presentation_id": "P1",
            "slide_id": "s1",
            "start_x": 0.0, "start_y": 0.0, "end_x": 10.0, "end_y": 10.0
        }))
        .unwrap();
        assert_eq!(line.line_color, "#000000");
        assert_eq!(line.line_width, 1.0);
        assert_eq!(line.line_type, "STRAIGHT");

        let transition: SlideTransitionParams =
            serde_json::from_value(json!({"presentation_id": "P1", "slide_id": "s1"})).unwrap();
        assert_eq!(transition.transition_type, "FADE");
        assert_eq!(transition.duration, "SLOW");
    }

    #[test]
    fn test_flattened_text_and_paragraph_style() {
        let params: InsertTextParams = serde_json::from_value(json!({
            "document_id": "D1",
            "text": "Hello",
            "bold": true,
            "font_size": 14.0,
            "alignment": "CENTER"
        }))
        .unwrap();

        assert_eq!(params.index, 1);
        assert_eq!(params.text_style.bold, Some(true));
        assert_eq!(params.text_style.font_size, Some(14.0));
        assert_eq!(params.text_style.italic, None);
        assert_eq!(params.paragraph_style.alignment.as_deref(), Some("CENTER"));
        assert_eq!(params.paragraph_style.bullet, None);
    }

    #[test]
    fn test_spreadsheet_id_is_optional() {
        let params: AddSheetParams =
            serde_json::from_value(json!({"sheet_name": "Extra"})).unwrap();
        assert_eq!(params.spreadsheet_id, None);

        let params: SpreadsheetParams = serde_json::from_value(json!({})).unwrap();
        assert_eq!(params.spreadsheet_id, None);
    }

    #[test]
    fn test_table_row_count_defaults_to_one() {
        let params: TableRowsParams = serde_json::from_value(json!({
            "document_id": "D1",
            "table_id": "2",
            "row_index": 0
        }))
        .unwrap();
        assert_eq!(params.num_rows, 1);
    }
}
