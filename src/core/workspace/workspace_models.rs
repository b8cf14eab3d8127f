// Operation model for the Workspace delegate.
//
// Every tool call is turned into one `WorkspaceOp`. The op carries fully resolved
// arguments (folder aliases and the current spreadsheet are already applied) and
// knows how its outcome should be described in the response envelope.

use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::envelope::PayloadShape;

// ============================================================================
// SMALL ARGUMENT RECORDS
// ============================================================================

/// One range write inside a batch update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct RangeUpdate {
    /// Range inside the sheet, e.g. `A1:B2`.
    pub range: String,
    /// Row-major cell values.
    pub values: Vec<Vec<Value>>,
}

/// Padding of a table cell, in points.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct CellPadding {
    pub top: Option<f64>,
    pub right: Option<f64>,
    pub bottom: Option<f64>,
    pub left: Option<f64>,
}

/// Character formatting for Google Docs text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct DocTextStyle {
    /// Font family name.
    pub font_family: Option<String>,
    /// Font size in points.
    pub font_size: Option<f64>,
    pub bold: Option<bool>,
    pub italic: Option<bool>,
    pub underline: Option<bool>,
    pub strikethrough: Option<bool>,
    /// Text color in hex format (e.g. `#FF0000`).
    pub foreground_color: Option<String>,
    /// Highlight color in hex format (e.g. `#FFFF00`).
    pub background_color: Option<String>,
}

/// Paragraph formatting for Google Docs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct DocParagraphStyle {
    /// `START`, `CENTER`, `END` or `JUSTIFIED`.
    pub alignment: Option<String>,
    /// Line spacing multiplier (1.0 = single).
    pub line_spacing: Option<f64>,
    /// Space before the paragraph in points.
    pub space_before: Option<f64>,
    /// Space after the paragraph in points.
    pub space_after: Option<f64>,
    /// First line indent in points.
    pub first_line_indent: Option<f64>,
    /// Turn the paragraphs into a bulleted list.
    pub bullet: Option<bool>,
    /// Turn the paragraphs into a numbered list.
    pub numbered_list: Option<bool>,
}

/// Document-wide defaults for Google Docs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct DocumentStyle {
    pub default_font_family: Option<String>,
    /// Font size in points.
    pub default_font_size: Option<f64>,
    /// Line spacing multiplier.
    pub default_line_spacing: Option<f64>,
    /// Margins in points.
    pub default_margin_top: Option<f64>,
    pub default_margin_bottom: Option<f64>,
    pub default_margin_left: Option<f64>,
    pub default_margin_right: Option<f64>,
    /// Page background color in hex format.
    pub default_page_color: Option<String>,
}

/// Text formatting for a Slides text element.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SlideTextStyle {
    /// Font family name (e.g. `Arial`).
    pub font_family: Option<String>,
    /// Font size in points.
    pub font_size: Option<f64>,
    /// `NORMAL` or `BOLD`.
    pub font_weight: Option<String>,
    /// `NORMAL` or `ITALIC`.
    pub font_style: Option<String>,
    /// Text color in hex format.
    pub foreground_color: Option<String>,
    /// Text highlight color in hex format.
    pub background_color: Option<String>,
}

/// Fill and outline of a Slides shape.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ShapeFill {
    /// Fill color in hex format.
    pub fill_color: Option<String>,
    /// Border color in hex format.
    pub border_color: Option<String>,
    /// Border width in points.
    pub border_width: Option<f64>,
}

/// Optional geometry for an existing Slides element, in points.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ElementGeometry {
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub x: Option<f64>,
    pub y: Option<f64>,
}

impl ElementGeometry {
    pub fn is_empty(&self) -> bool {
        self.width.is_none() && self.height.is_none() && self.x.is_none() && self.y.is_none()
    }
}

/// Where a new spreadsheet's content comes from.
#[derive(Debug, Clone, PartialEq)]
pub enum SpreadsheetSource {
    Blank,
    Template(String),
    Existing(String),
}

// ============================================================================
// OPERATIONS
// ============================================================================

/// Operations scoped to one spreadsheet.
#[derive(Debug, Clone, PartialEq)]
pub enum SheetOp {
    ListSheets,
    AddSheet {
        sheet_name: String,
    },
    DuplicateSheet {
        sheet_id: i64,
        new_name: String,
    },
    RenameSheet {
        sheet_id: i64,
        new_name: String,
    },
    GetSheetData {
        sheet_name: String,
        range: String,
    },
    AddRows {
        sheet_name: String,
        values: Vec<Vec<Value>>,
    },
    /// Each inner vector is one new column, top to bottom.
    AddColumns {
        sheet_name: String,
        values: Vec<Vec<Value>>,
    },
    UpdateCells {
        sheet_name: String,
        range: String,
        values: Vec<Vec<Value>>,
    },
    BatchUpdateCells {
        sheet_name: String,
        updates: Vec<RangeUpdate>,
    },
    /// Zero-based, end exclusive.
    DeleteRows {
        sheet_name: String,
        start_index: i64,
        end_index: i64,
    },
    /// Zero-based, end exclusive.
    DeleteColumns {
        sheet_name: String,
        start_index: i64,
        end_index: i64,
    },
    CreateChart {
        chart_type: String,
        range: String,
        sheet_name: String,
        title: Option<String>,
    },
}

/// Operations scoped to one presentation.
#[derive(Debug, Clone, PartialEq)]
pub enum SlideOp {
    /// `content` is the already normalized slide body.
    AddSlide {
        title: String,
        content: Value,
    },
    AddImage {
        slide_id: String,
        image_url: String,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        rotation: f64,
    },
    GetPresentation,
    DeletePresentation,
    SearchElements {
        slide_id: String,
        element_type: Option<String>,
    },
    UpdateTextStyle {
        slide_id: String,
        element_id: String,
        style: SlideTextStyle,
    },
    UpdateShapeStyle {
        slide_id: String,
        element_id: String,
        geometry: ElementGeometry,
        fill: ShapeFill,
    },
    DeleteElement {
        slide_id: String,
        element_id: String,
    },
    AddShape {
        slide_id: String,
        shape_type: String,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        fill: ShapeFill,
    },
    AddLine {
        slide_id: String,
        start_x: f64,
        start_y: f64,
        end_x: f64,
        end_y: f64,
        line_color: String,
        line_width: f64,
        line_type: String,
    },
    UpdateBackground {
        slide_id: String,
        background_color: Option<String>,
        background_image_url: Option<String>,
    },
    UpdateLayout {
        slide_id: String,
        layout_type: String,
    },
    UpdateTransition {
        slide_id: String,
        transition_type: String,
        duration: String,
    },
    AddNotes {
        slide_id: String,
        notes_text: String,
    },
}

/// Operations scoped to one document. Indices are UTF-16 offsets into the body;
/// a `table_id` is the start index of the table.
#[derive(Debug, Clone, PartialEq)]
pub enum DocOp {
    InsertText {
        text: String,
        index: i64,
        text_style: DocTextStyle,
        paragraph_style: DocParagraphStyle,
    },
    InsertHeading {
        text: String,
        level: i64,
        index: i64,
    },
    InsertImage {
        image_url: String,
        index: i64,
    },
    GetDocument,
    DeleteDocument,
    CreateTable {
        rows: i64,
        columns: i64,
        index: i64,
    },
    UpdateTextStyle {
        start_index: i64,
        end_index: i64,
        style: DocTextStyle,
    },
    UpdateParagraphStyle {
        start_index: i64,
        end_index: i64,
        style: DocParagraphStyle,
    },
    InsertPageBreak {
        index: i64,
    },
    InsertHorizontalRule {
        index: i64,
    },
    UpdateTableCellContent {
        table_id: String,
        row_index: i64,
        column_index: i64,
        content: String,
    },
    UpdateTableCellStyle {
        table_id: String,
        row_index: i64,
        column_index: i64,
        background_color: Option<String>,
        border_color: Option<String>,
        border_width: Option<f64>,
        padding: Option<CellPadding>,
    },
    UpdateTableRowStyle {
        table_id: String,
        row_index: i64,
        background_color: Option<String>,
        height: Option<f64>,
    },
    UpdateTableColumnStyle {
        table_id: String,
        column_index: i64,
        width: Option<f64>,
    },
    MergeTableCells {
        table_id: String,
        start_row: i64,
        start_column: i64,
        end_row: i64,
        end_column: i64,
    },
    InsertTableRows {
        table_id: String,
        row_index: i64,
        count: i64,
    },
    InsertTableColumns {
        table_id: String,
        column_index: i64,
        count: i64,
    },
    DeleteTableRows {
        table_id: String,
        row_index: i64,
        count: i64,
    },
    DeleteTableColumns {
        table_id: String,
        column_index: i64,
        count: i64,
    },
    UpdateDocumentStyle {
        style: DocumentStyle,
    },
    /// Keys of `content` are `"row,column"`.
    CreateTableWithContent {
        rows: i64,
        columns: i64,
        content: BTreeMap<String, String>,
    },
}

/// A single delegated Workspace operation with resolved arguments.
#[derive(Debug, Clone, PartialEq)]
pub enum WorkspaceOp {
    ListFiles {
        folder_ids: Vec<String>,
    },
    CopyFile {
        file_id: String,
        new_name: String,
    },
    RenameFile {
        file_id: String,
        new_name: String,
    },
    CreateSpreadsheet {
        title: String,
        folder_id: String,
        source: SpreadsheetSource,
    },
    Spreadsheet {
        spreadsheet_id: String,
        op: SheetOp,
    },
    CreatePresentation {
        title: String,
    },
    Presentation {
        presentation_id: String,
        op: SlideOp,
    },
    CreateDocument {
        title: String,
    },
    Document {
        document_id: String,
        op: DocOp,
    },
}

// ============================================================================
// ENVELOPE DESCRIPTIONS
// ============================================================================

impl WorkspaceOp {
    /// Stable operation name for logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::ListFiles { .. } => "list_files",
            Self::CopyFile { .. } => "copy_file",
            Self::RenameFile { .. } => "rename_file",
            Self::CreateSpreadsheet { source, .. } => match source {
                SpreadsheetSource::Blank => "create_spreadsheet",
                SpreadsheetSource::Template(_) => "create_spreadsheet_from_template",
                SpreadsheetSource::Existing(_) => "create_spreadsheet_from_existing",
            },
            Self::Spreadsheet { op, .. } => op.name(),
            Self::CreatePresentation { .. } => "create_presentation",
            Self::Presentation { op, .. } => op.name(),
            Self::CreateDocument { .. } => "create_document",
            Self::Document { op, .. } => op.name(),
        }
    }

    pub fn success_message(&self) -> String {
        match self {
            Self::ListFiles { .. } => "Listed files".to_string(),
            Self::CopyFile { file_id, new_name } => {
                format!("Copied file {file_id} to {new_name}")
            }
            Self::RenameFile { file_id, new_name } => {
                format!("Renamed file {file_id} to {new_name}")
            }
            Self::CreateSpreadsheet { title, source, .. } => match source {
                SpreadsheetSource::Blank => format!("Created spreadsheet: {title}"),
                SpreadsheetSource::Template(template_id) => {
                    format!("Created spreadsheet {title} from template {template_id}")
                }
                SpreadsheetSource::Existing(source_id) => {
                    format!("Created spreadsheet {title} from {source_id}")
                }
            },
            Self::Spreadsheet { op, .. } => op.success_message(),
            Self::CreatePresentation { title } => format!("Created presentation: {title}"),
            Self::Presentation { op, .. } => op.success_message(),
            Self::CreateDocument { title } => format!("Created document: {title}"),
            Self::Document { op, .. } => op.success_message(),
        }
    }

    pub fn failure_message(&self) -> String {
        match self {
            Self::ListFiles { .. } => "Failed to list files".to_string(),
            Self::CopyFile { file_id, .. } => format!("Failed to copy file {file_id}"),
            Self::RenameFile { file_id, .. } => format!("Failed to rename file {file_id}"),
            Self::CreateSpreadsheet { title, source, .. } => match source {
                SpreadsheetSource::Blank => format!("Failed to create spreadsheet '{title}'"),
                SpreadsheetSource::Template(template_id) => {
                    format!("Failed to create spreadsheet from template {template_id}")
                }
                SpreadsheetSource::Existing(source_id) => {
                    format!("Failed to create spreadsheet from existing {source_id}")
                }
            },
            Self::Spreadsheet { op, .. } => op.failure_message(),
            Self::CreatePresentation { .. } => "Failed to create presentation".to_string(),
            Self::Presentation { op, .. } => op.failure_message(),
            Self::CreateDocument { .. } => "Failed to create document".to_string(),
            Self::Document { op, .. } => op.failure_message(),
        }
    }

    pub fn payload_shape(&self) -> PayloadShape {
        match self {
            Self::ListFiles { .. } => PayloadShape::Key("files"),
            Self::Spreadsheet { op, .. } => op.payload_shape(),
            Self::Presentation { op, .. } => op.payload_shape(),
            Self::Document { op, .. } => op.payload_shape(),
            _ => PayloadShape::Merge,
        }
    }
}

impl SheetOp {
    pub fn name(&self) -> &'static str {
        match self {
            Self::ListSheets => "list_sheets",
            Self::AddSheet { .. } => "add_sheet",
            Self::DuplicateSheet { .. } => "duplicate_sheet",
            Self::RenameSheet { .. } => "rename_sheet",
            Self::GetSheetData { .. } => "get_sheet_data",
            Self::AddRows { .. } => "add_rows",
            Self::AddColumns { .. } => "add_columns",
            Self::UpdateCells { .. } => "update_cells",
            Self::BatchUpdateCells { .. } => "batch_update_cells",
            Self::DeleteRows { .. } => "delete_rows",
            Self::DeleteColumns { .. } => "delete_columns",
            Self::CreateChart { .. } => "create_chart",
        }
    }

    pub fn success_message(&self) -> String {
        match self {
            Self::ListSheets => "Listed sheets".to_string(),
            Self::AddSheet { sheet_name } => format!("Added sheet: {sheet_name}"),
            Self::DuplicateSheet { sheet_id, new_name } => {
                format!("Duplicated sheet {sheet_id} as {new_name}")
            }
            Self::RenameSheet { sheet_id, new_name } => {
                format!("Renamed sheet {sheet_id} to {new_name}")
            }
            Self::GetSheetData { sheet_name, .. } => format!("Read data from {sheet_name}"),
            Self::AddRows { sheet_name, values } => {
                format!("Added {} rows to {sheet_name}", values.len())
            }
            Self::AddColumns { sheet_name, values } => {
                format!("Added {} columns to {sheet_name}", values.len())
            }
            Self::UpdateCells { sheet_name, range, .. } => {
                format!("Updated cells {sheet_name}!{range}")
            }
            Self::BatchUpdateCells { sheet_name, updates } => {
                format!("Updated {} ranges in {sheet_name}", updates.len())
            }
            Self::DeleteRows { sheet_name, .. } => format!("Deleted rows from {sheet_name}"),
            Self::DeleteColumns { sheet_name, .. } => {
                format!("Deleted columns from {sheet_name}")
            }
            Self::CreateChart { chart_type, .. } => format!("Created {chart_type} chart"),
        }
    }

    pub fn failure_message(&self) -> String {
        match self {
            Self::ListSheets => "Failed to list sheets".to_string(),
            Self::AddSheet { sheet_name } => format!("Failed to add sheet {sheet_name}"),
            Self::DuplicateSheet { sheet_id, .. } => {
                format!("Failed to duplicate sheet {sheet_id}")
            }
            Self::RenameSheet { sheet_id, .. } => format!("Failed to rename sheet {sheet_id}"),
            Self::GetSheetData { sheet_name, .. } => {
                format!("Failed to get data from {sheet_name}")
            }
            Self::AddRows { sheet_name, .. } => format!("Failed to add rows to {sheet_name}"),
            Self::AddColumns { sheet_name, .. } => {
                format!("Failed to add columns to {sheet_name}")
            }
            Self::UpdateCells { sheet_name, .. } => {
                format!("Failed to update cells in {sheet_name}")
            }
            Self::BatchUpdateCells { sheet_name, .. } => {
                format!("Failed to batch update cells in {sheet_name}")
            }
            Self::DeleteRows { sheet_name, .. } => {
                format!("Failed to delete rows from {sheet_name}")
            }
            Self::DeleteColumns { sheet_name, .. } => {
                format!("Failed to delete columns from {sheet_name}")
            }
            Self::CreateChart { .. } => "Failed to create chart".to_string(),
        }
    }

    pub fn payload_shape(&self) -> PayloadShape {
        match self {
            Self::ListSheets => PayloadShape::Key("sheets"),
            Self::GetSheetData { .. } => PayloadShape::Key("values"),
            _ => PayloadShape::Merge,
        }
    }
}

impl SlideOp {
    pub fn name(&self) -> &'static str {
        match self {
            Self::AddSlide { .. } => "add_slide_to_presentation",
            Self::AddImage { .. } => "add_image_to_slide",
            Self::GetPresentation => "get_presentation_details",
            Self::DeletePresentation => "delete_presentation",
            Self::SearchElements { .. } => "search_slide_elements",
            Self::UpdateTextStyle { .. } => "update_text_style",
            Self::UpdateShapeStyle { .. } => "update_shape_style",
            Self::DeleteElement { .. } => "delete_slide_element",
            Self::AddShape { .. } => "add_shape_to_slide",
            Self::AddLine { .. } => "add_line_to_slide",
            Self::UpdateBackground { .. } => "update_slide_background",
            Self::UpdateLayout { .. } => "update_slide_layout",
            Self::UpdateTransition { .. } => "update_slide_transition",
            Self::AddNotes { .. } => "add_slide_notes",
        }
    }

    pub fn success_message(&self) -> String {
        match self {
            Self::AddSlide { title, .. } => format!("Added slide: {title}"),
            Self::AddImage { .. } => "Image added successfully".to_string(),
            Self::GetPresentation => "Fetched presentation details".to_string(),
            Self::DeletePresentation => "Deleted presentation".to_string(),
            Self::SearchElements { .. } => "Searched slide elements".to_string(),
            Self::UpdateTextStyle { .. } => "Text style updated successfully".to_string(),
            Self::UpdateShapeStyle { .. } => "Shape style updated successfully".to_string(),
            Self::DeleteElement { .. } => "Element deleted successfully".to_string(),
            Self::AddShape { .. } => "Shape added successfully".to_string(),
            Self::AddLine { .. } => "Line added successfully".to_string(),
            Self::UpdateBackground { .. } => "Slide background updated successfully".to_string(),
            Self::UpdateLayout { .. } => "Slide layout updated successfully".to_string(),
            Self::UpdateTransition { .. } => "Slide transition updated successfully".to_string(),
            Self::AddNotes { .. } => "Slide notes updated successfully".to_string(),
        }
    }

    pub fn failure_message(&self) -> String {
        match self {
            Self::AddSlide { .. } => "Failed to add slide",
            Self::AddImage { .. } => "Failed to add image",
            Self::GetPresentation => "Failed to get presentation details",
            Self::DeletePresentation => "Failed to delete presentation",
            Self::SearchElements { .. } => "Failed to search slide elements",
            Self::UpdateTextStyle { .. } => "Failed to update text style",
            Self::UpdateShapeStyle { .. } => "Failed to update shape style",
            Self::DeleteElement { .. } => "Failed to delete element",
            Self::AddShape { .. } => "Failed to add shape",
            Self::AddLine { .. } => "Failed to add line",
            Self::UpdateBackground { .. } => "Failed to update slide background",
            Self::UpdateLayout { .. } => "Failed to update slide layout",
            Self::UpdateTransition { .. } => "Failed to update slide transition",
            Self::AddNotes { .. } => "Failed to update slide notes",
        }
        .to_string()
    }

    pub fn payload_shape(&self) -> PayloadShape {
        match self {
            Self::GetPresentation => PayloadShape::Key("presentation"),
            Self::SearchElements { .. } => PayloadShape::Key("elements"),
            _ => PayloadShape::Merge,
        }
    }
}

impl DocOp {
    pub fn name(&self) -> &'static str {
        match self {
            Self::InsertText { .. } => "insert_text_to_document",
            Self::InsertHeading { .. } => "insert_heading_to_document",
            Self::InsertImage { .. } => "insert_image_to_document",
            Self::GetDocument => "get_document_details",
            Self::DeleteDocument => "delete_document",
            Self::CreateTable { .. } => "create_table_in_document",
            Self::UpdateTextStyle { .. } => "update_text_style_in_document",
            Self::UpdateParagraphStyle { .. } => "update_paragraph_style_in_document",
            Self::InsertPageBreak { .. } => "insert_page_break_in_document",
            Self::InsertHorizontalRule { .. } => "insert_horizontal_rule_in_document",
            Self::UpdateTableCellContent { .. } => "update_table_cell_content",
            Self::UpdateTableCellStyle { .. } => "update_table_cell_style",
            Self::UpdateTableRowStyle { .. } => "update_table_row_style",
            Self::UpdateTableColumnStyle { .. } => "update_table_column_style",
            Self::MergeTableCells { .. } => "merge_table_cells",
            Self::InsertTableRows { .. } => "insert_table_row",
            Self::InsertTableColumns { .. } => "insert_table_column",
            Self::DeleteTableRows { .. } => "delete_table_row",
            Self::DeleteTableColumns { .. } => "delete_table_column",
            Self::UpdateDocumentStyle { .. } => "update_document_style",
            Self::CreateTableWithContent { .. } => "create_table_with_content",
        }
    }

    pub fn success_message(&self) -> String {
        match self {
            Self::InsertText { .. } => "Inserted text into document with formatting".to_string(),
            Self::InsertHeading { level, .. } => format!("Inserted heading level {level}"),
            Self::InsertImage { .. } => "Inserted image into document".to_string(),
            Self::GetDocument => "Fetched document details".to_string(),
            Self::DeleteDocument => "Deleted document".to_string(),
            Self::CreateTable { rows, columns, .. } => format!("Created {rows}x{columns} table"),
            Self::UpdateTextStyle { .. } => "Text style updated successfully".to_string(),
            Self::UpdateParagraphStyle { .. } => {
                "Paragraph style updated successfully".to_string()
            }
            Self::InsertPageBreak { .. } => "Page break inserted successfully".to_string(),
            Self::InsertHorizontalRule { .. } => {
                "Horizontal rule inserted successfully".to_string()
            }
            Self::UpdateTableCellContent { .. } => "Updated table cell content".to_string(),
            Self::UpdateTableCellStyle { .. } => {
                "Table cell style updated successfully".to_string()
            }
            Self::UpdateTableRowStyle { .. } => "Table row style updated successfully".to_string(),
            Self::UpdateTableColumnStyle { .. } => {
                "Table column style updated successfully".to_string()
            }
            Self::MergeTableCells { .. } => "Table cells merged successfully".to_string(),
            Self::InsertTableRows { .. } => "Table rows inserted successfully".to_string(),
            Self::InsertTableColumns { .. } => "Table columns inserted successfully".to_string(),
            Self::DeleteTableRows { .. } => "Table rows deleted successfully".to_string(),
            Self::DeleteTableColumns { .. } => "Table columns deleted successfully".to_string(),
            Self::UpdateDocumentStyle { .. } => "Document style updated successfully".to_string(),
            Self::CreateTableWithContent { .. } => {
                "Created table and inserted content successfully".to_string()
            }
        }
    }

    pub fn failure_message(&self) -> String {
        match self {
            Self::InsertText { .. } => "Failed to insert text",
            Self::InsertHeading { .. } => "Failed to insert heading",
            Self::InsertImage { .. } => "Failed to insert image",
            Self::GetDocument => "Failed to get document details",
            Self::DeleteDocument => "Failed to delete document",
            Self::CreateTable { .. } => "Failed to create table",
            Self::UpdateTextStyle { .. } => "Failed to update text style",
            Self::UpdateParagraphStyle { .. } => "Failed to update paragraph style",
            Self::InsertPageBreak { .. } => "Failed to insert page break",
            Self::InsertHorizontalRule { .. } => "Failed to insert horizontal rule",
            Self::UpdateTableCellContent { .. } => "Failed to update table cell content",
            Self::UpdateTableCellStyle { .. } => "Failed to update table cell style",
            Self::UpdateTableRowStyle { .. } => "Failed to update table row style",
            Self::UpdateTableColumnStyle { .. } => "Failed to update table column style",
            Self::MergeTableCells { .. } => "Failed to merge table cells",
            Self::InsertTableRows { .. } => "Failed to insert table rows",
            Self::InsertTableColumns { .. } => "Failed to insert table columns",
            Self::DeleteTableRows { .. } => "Failed to delete table rows",
            Self::DeleteTableColumns { .. } => "Failed to delete table columns",
            Self::UpdateDocumentStyle { .. } => "Failed to update document style",
            Self::CreateTableWithContent { .. } => "Failed to create table and insert content",
        }
        .to_string()
    }

    pub fn payload_shape(&self) -> PayloadShape {
        match self {
            Self::GetDocument => PayloadShape::Key("document"),
            _ => PayloadShape::Merge,
        }
    }
}
