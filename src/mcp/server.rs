use std::sync::Arc;

use rmcp::handler::server::tool::ToolRouter;
use rmcp::handler::server::wrapper::{Json, Parameters};
use rmcp::model::{ServerCapabilities, ServerInfo};
use rmcp::{tool, tool_handler, tool_router, ErrorData, ServerHandler, ServiceExt};

use crate::core::workspace::{
    DocOp, Envelope, SheetOp, SlideOp, SpreadsheetSource, WorkspaceApi, WorkspaceOp,
    WorkspaceService,
};

use super::tool_params::*;

type Service = WorkspaceService<Box<dyn WorkspaceApi>>;
type ToolResult = Result<Json<Envelope>, ErrorData>;

/// MCP front end. Every tool answers with an envelope, including on delegate failure.
#[derive(Clone)]
pub struct WorkspaceMcp {
    service: Arc<Service>,
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl WorkspaceMcp {
    pub fn new(service: Service) -> Self {
        Self {
            service: Arc::new(service),
            tool_router: Self::tool_router(),
        }
    }

    pub async fn serve_stdio(self) -> Result<(), rmcp::RmcpError> {
        let service = self.serve((tokio::io::stdin(), tokio::io::stdout())).await?;
        service.waiting().await?;
        Ok(())
    }

    async fn sheet(&self, spreadsheet_id: Option<String>, op: SheetOp) -> ToolResult {
        Ok(Json(self.service.spreadsheet(spreadsheet_id, op).await))
    }

    async fn slide(&self, presentation_id: String, op: SlideOp) -> ToolResult {
        Ok(Json(
            self.service
                .dispatch(WorkspaceOp::Presentation {
                    presentation_id,
                    op,
                })
                .await,
        ))
    }

    async fn doc(&self, document_id: String, op: DocOp) -> ToolResult {
        Ok(Json(
            self.service
                .dispatch(WorkspaceOp::Document { document_id, op })
                .await,
        ))
    }

    // ==========================================================================
    // DRIVE
    // ==========================================================================

    /// List files in every configured folder, each tagged with its folder alias.
    #[tool(name = "list_files")]
    async fn list_files(&self) -> ToolResult {
        Ok(Json(self.service.list_files().await))
    }

    /// Copy a Drive file under a new name.
    #[tool(name = "copy_file")]
    async fn copy_file(&self, params: Parameters<FileRenameParams>) -> ToolResult {
        let FileRenameParams { file_id, new_name } = params.0;
        Ok(Json(
            self.service
                .dispatch(WorkspaceOp::CopyFile { file_id, new_name })
                .await,
        ))
    }

    /// Rename a Drive file.
    #[tool(name = "rename_file")]
    async fn rename_file(&self, params: Parameters<FileRenameParams>) -> ToolResult {
        let FileRenameParams { file_id, new_name } = params.0;
        Ok(Json(
            self.service
                .dispatch(WorkspaceOp::RenameFile { file_id, new_name })
                .await,
        ))
    }

    // ==========================================================================
    // SPREADSHEETS
    // ==========================================================================

    /// Create a blank spreadsheet in a folder (alias or ID) and make it the current spreadsheet.
    #[tool(name = "create_spreadsheet")]
    async fn create_spreadsheet(&self, params: Parameters<CreateSpreadsheetParams>) -> ToolResult {
        let CreateSpreadsheetParams { title, folder } = params.0;
        Ok(Json(
            self.service
                .create_spreadsheet(title, folder, SpreadsheetSource::Blank)
                .await,
        ))
    }

    /// Create a spreadsheet from a template and make it the current spreadsheet.
    #[tool(name = "create_spreadsheet_from_template")]
    async fn create_spreadsheet_from_template(
        &self,
        params: Parameters<CreateFromTemplateParams>,
    ) -> ToolResult {
        let CreateFromTemplateParams {
            template_id,
            title,
            folder,
        } = params.0;
        Ok(Json(
            self.service
                .create_spreadsheet(title, folder, SpreadsheetSource::Template(template_id))
                .await,
        ))
    }

    /// Copy an existing spreadsheet and make the copy the current spreadsheet.
    #[tool(name = "create_spreadsheet_from_existing")]
    async fn create_spreadsheet_from_existing(
        &self,
        params: Parameters<CreateFromExistingParams>,
    ) -> ToolResult {
        let CreateFromExistingParams {
            source_id,
            title,
            folder,
        } = params.0;
        Ok(Json(
            self.service
                .create_spreadsheet(title, folder, SpreadsheetSource::Existing(source_id))
                .await,
        ))
    }

    /// List the sheets of a spreadsheet (defaults to the current spreadsheet).
    #[tool(name = "list_sheets")]
    async fn list_sheets(&self, params: Parameters<SpreadsheetParams>) -> ToolResult {
        self.sheet(params.0.spreadsheet_id, SheetOp::ListSheets).await
    }

    /// Add a sheet to a spreadsheet.
    #[tool(name = "add_sheet")]
    async fn add_sheet(&self, params: Parameters<AddSheetParams>) -> ToolResult {
        let AddSheetParams {
            sheet_name,
            spreadsheet_id,
        } = params.0;
        self.sheet(spreadsheet_id, SheetOp::AddSheet { sheet_name })
            .await
    }

    /// Duplicate a sheet under a new name.
    #[tool(name = "duplicate_sheet")]
    async fn duplicate_sheet(&self, params: Parameters<SheetRenameParams>) -> ToolResult {
        let SheetRenameParams {
            sheet_id,
            new_name,
            spreadsheet_id,
        } = params.0;
        self.sheet(spreadsheet_id, SheetOp::DuplicateSheet { sheet_id, new_name })
            .await
    }

    /// Rename a sheet.
    #[tool(name = "rename_sheet")]
    async fn rename_sheet(&self, params: Parameters<SheetRenameParams>) -> ToolResult {
        let SheetRenameParams {
            sheet_id,
            new_name,
            spreadsheet_id,
        } = params.0;
        self.sheet(spreadsheet_id, SheetOp::RenameSheet { sheet_id, new_name })
            .await
    }

    /// Read cell values from a sheet.
    #[tool(name = "get_sheet_data")]
    async fn get_sheet_data(&self, params: Parameters<GetSheetDataParams>) -> ToolResult {
        let GetSheetDataParams {
            sheet_name,
            range_name,
            spreadsheet_id,
        } = params.0;
        self.sheet(
            spreadsheet_id,
            SheetOp::GetSheetData {
                sheet_name,
                range: range_name,
            },
        )
        .await
    }

    /// Append rows after the last row with data.
    #[tool(name = "add_rows")]
    async fn add_rows(&self, params: Parameters<SheetValuesParams>) -> ToolResult {
        let SheetValuesParams {
            sheet_name,
            values,
            spreadsheet_id,
        } = params.0;
        self.sheet(spreadsheet_id, SheetOp::AddRows { sheet_name, values })
            .await
    }

    /// Append columns after the last column with data. Each inner list is one column.
    #[tool(name = "add_columns")]
    async fn add_columns(&self, params: Parameters<SheetValuesParams>) -> ToolResult {
        let SheetValuesParams {
            sheet_name,
            values,
            spreadsheet_id,
        } = params.0;
        self.sheet(spreadsheet_id, SheetOp::AddColumns { sheet_name, values })
            .await
    }

    /// Overwrite a range of cells.
    #[tool(name = "update_cells")]
    async fn update_cells(&self, params: Parameters<UpdateCellsParams>) -> ToolResult {
        let UpdateCellsParams {
            sheet_name,
            range_name,
            values,
            spreadsheet_id,
        } = params.0;
        self.sheet(
            spreadsheet_id,
            SheetOp::UpdateCells {
                sheet_name,
                range: range_name,
                values,
            },
        )
        .await
    }

    /// Overwrite several ranges of one sheet in a single request.
    #[tool(name = "batch_update_cells")]
    async fn batch_update_cells(&self, params: Parameters<BatchUpdateCellsParams>) -> ToolResult {
        let BatchUpdateCellsParams {
            sheet_name,
            updates,
            spreadsheet_id,
        } = params.0;
        self.sheet(
            spreadsheet_id,
            SheetOp::BatchUpdateCells {
                sheet_name,
                updates,
            },
        )
        .await
    }

    /// Delete rows `[start_index, end_index)` from a sheet.
    #[tool(name = "delete_rows")]
    async fn delete_rows(&self, params: Parameters<DeleteDimensionParams>) -> ToolResult {
        let DeleteDimensionParams {
            sheet_name,
            start_index,
            end_index,
            spreadsheet_id,
        } = params.0;
        self.sheet(
            spreadsheet_id,
            SheetOp::DeleteRows {
                sheet_name,
                start_index,
                end_index,
            },
        )
        .await
    }

    /// Delete columns `[start_index, end_index)` from a sheet.
    #[tool(name = "delete_columns")]
    async fn delete_columns(&self, params: Parameters<DeleteDimensionParams>) -> ToolResult {
        let DeleteDimensionParams {
            sheet_name,
            start_index,
            end_index,
            spreadsheet_id,
        } = params.0;
        self.sheet(
            spreadsheet_id,
            SheetOp::DeleteColumns {
                sheet_name,
                start_index,
                end_index,
            },
        )
        .await
    }

    /// Add a chart over a data range.
    #[tool(name = "create_chart")]
    async fn create_chart(&self, params: Parameters<CreateChartParams>) -> ToolResult {
        let CreateChartParams {
            chart_type,
            range_name,
            sheet_name,
            title,
            spreadsheet_id,
        } = params.0;
        self.sheet(
            spreadsheet_id,
            SheetOp::CreateChart {
                chart_type,
                range: range_name,
                sheet_name,
                title,
            },
        )
        .await
    }

    // ==========================================================================
    // SLIDES
    // ==========================================================================

    /// Create a new presentation.
    #[tool(name = "create_presentation")]
    async fn create_presentation(&self, params: Parameters<TitleParams>) -> ToolResult {
        Ok(Json(
            self.service
                .dispatch(WorkspaceOp::CreatePresentation {
                    title: params.0.title,
                })
                .await,
        ))
    }

    /// Add a title-and-body slide.
    #[tool(name = "add_slide_to_presentation")]
    async fn add_slide_to_presentation(&self, params: Parameters<AddSlideParams>) -> ToolResult {
        let AddSlideParams {
            presentation_id,
            title,
            content,
        } = params.0;
        Ok(Json(
            self.service
                .add_slide(presentation_id, title, &content)
                .await,
        ))
    }

    /// Place an image on a slide. Position and size are in points.
    #[tool(name = "add_image_to_slide")]
    async fn add_image_to_slide(&self, params: Parameters<AddImageParams>) -> ToolResult {
        let AddImageParams {
            presentation_id,
            slide_id,
            image_url,
            x,
            y,
            width,
            height,
            rotation,
        } = params.0;
        self.slide(
            presentation_id,
            SlideOp::AddImage {
                slide_id,
                image_url,
                x,
                y,
                width,
                height,
                rotation,
            },
        )
        .await
    }

    /// Fetch a presentation with its slides.
    #[tool(name = "get_presentation_details")]
    async fn get_presentation_details(&self, params: Parameters<PresentationParams>) -> ToolResult {
        self.slide(params.0.presentation_id, SlideOp::GetPresentation)
            .await
    }

    /// Delete a presentation.
    #[tool(name = "delete_presentation")]
    async fn delete_presentation(&self, params: Parameters<PresentationParams>) -> ToolResult {
        self.slide(params.0.presentation_id, SlideOp::DeletePresentation)
            .await
    }

    /// List the elements of a slide, optionally filtered by element type.
    #[tool(name = "search_slide_elements")]
    async fn search_slide_elements(&self, params: Parameters<SearchElementsParams>) -> ToolResult {
        let SearchElementsParams {
            presentation_id,
            slide_id,
            element_type,
        } = params.0;
        self.slide(
            presentation_id,
            SlideOp::SearchElements {
                slide_id,
                element_type,
            },
        )
        .await
    }

    /// Change the text style of a slide element.
    #[tool(name = "update_text_style")]
    async fn update_text_style(&self, params: Parameters<SlideTextStyleParams>) -> ToolResult {
        let SlideTextStyleParams {
            presentation_id,
            slide_id,
            element_id,
            style,
        } = params.0;
        self.slide(
            presentation_id,
            SlideOp::UpdateTextStyle {
                slide_id,
                element_id,
                style,
            },
        )
        .await
    }

    /// Resize, move or recolor a shape.
    #[tool(name = "update_shape_style")]
    async fn update_shape_style(&self, params: Parameters<ShapeStyleParams>) -> ToolResult {
        let ShapeStyleParams {
            presentation_id,
            slide_id,
            element_id,
            geometry,
            fill,
        } = params.0;
        self.slide(
            presentation_id,
            SlideOp::UpdateShapeStyle {
                slide_id,
                element_id,
                geometry,
                fill,
            },
        )
        .await
    }

    /// Delete an element from a slide.
    #[tool(name = "delete_slide_element")]
    async fn delete_slide_element(&self, params: Parameters<SlideElementParams>) -> ToolResult {
        let SlideElementParams {
            presentation_id,
            slide_id,
            element_id,
        } = params.0;
        self.slide(
            presentation_id,
            SlideOp::DeleteElement {
                slide_id,
                element_id,
            },
        )
        .await
    }

    /// Add a shape to a slide.
    #[tool(name = "add_shape_to_slide")]
    async fn add_shape_to_slide(&self, params: Parameters<AddShapeParams>) -> ToolResult {
        let AddShapeParams {
            presentation_id,
            slide_id,
            shape_type,
            x,
            y,
            width,
            height,
            fill,
        } = params.0;
        self.slide(
            presentation_id,
            SlideOp::AddShape {
                slide_id,
                shape_type,
                x,
                y,
                width,
                height,
                fill,
            },
        )
        .await
    }

    /// Draw a line between two points on a slide.
    #[tool(name = "add_line_to_slide")]
    async fn add_line_to_slide(&self, params: Parameters<AddLineParams>) -> ToolResult {
        let AddLineParams {
            presentation_id,
            slide_id,
            start_x,
            start_y,
            end_x,
            end_y,
            line_color,
            line_width,
            line_type,
        } = params.0;
        self.slide(
            presentation_id,
            SlideOp::AddLine {
                slide_id,
                start_x,
                start_y,
                end_x,
                end_y,
                line_color,
                line_width,
                line_type,
            },
        )
        .await
    }

    /// Set a slide background to a color or a stretched image.
    #[tool(name = "update_slide_background")]
    async fn update_slide_background(&self, params: Parameters<SlideBackgroundParams>) -> ToolResult {
        let SlideBackgroundParams {
            presentation_id,
            slide_id,
            background_color,
            background_image_url,
        } = params.0;
        self.slide(
            presentation_id,
            SlideOp::UpdateBackground {
                slide_id,
                background_color,
                background_image_url,
            },
        )
        .await
    }

    /// Change the layout of a slide.
    #[tool(name = "update_slide_layout")]
    async fn update_slide_layout(&self, params: Parameters<SlideLayoutParams>) -> ToolResult {
        let SlideLayoutParams {
            presentation_id,
            slide_id,
            layout_type,
        } = params.0;
        self.slide(
            presentation_id,
            SlideOp::UpdateLayout {
                slide_id,
                layout_type,
            },
        )
        .await
    }

    /// Change the transition of a slide.
    #[tool(name = "update_slide_transition")]
    async fn update_slide_transition(&self, params: Parameters<SlideTransitionParams>) -> ToolResult {
        let SlideTransitionParams {
            presentation_id,
            slide_id,
            transition_type,
            duration,
        } = params.0;
        self.slide(
            presentation_id,
            SlideOp::UpdateTransition {
                slide_id,
                transition_type,
                duration,
            },
        )
        .await
    }

    /// Replace the speaker notes of a slide.
    #[tool(name = "add_slide_notes")]
    async fn add_slide_notes(&self, params: Parameters<SlideNotesParams>) -> ToolResult {
        let SlideNotesParams {
            presentation_id,
            slide_id,
            notes_text,
        } = params.0;
        self.slide(
            presentation_id,
            SlideOp::AddNotes {
                slide_id,
                notes_text,
            },
        )
        .await
    }

    // ==========================================================================
    // DOCS
    // ==========================================================================

    /// Create a new document.
    #[tool(name = "create_document")]
    async fn create_document(&self, params: Parameters<TitleParams>) -> ToolResult {
        Ok(Json(
            self.service
                .dispatch(WorkspaceOp::CreateDocument {
                    title: params.0.title,
                })
                .await,
        ))
    }

    /// Insert text with optional character and paragraph formatting.
    #[tool(name = "insert_text_to_document")]
    async fn insert_text_to_document(&self, params: Parameters<InsertTextParams>) -> ToolResult {
        let InsertTextParams {
            document_id,
            text,
            index,
            text_style,
            paragraph_style,
        } = params.0;
        self.doc(
            document_id,
            DocOp::InsertText {
                text,
                index,
                text_style,
                paragraph_style,
            },
        )
        .await
    }

    /// Insert a heading paragraph.
    #[tool(name = "insert_heading_to_document")]
    async fn insert_heading_to_document(&self, params: Parameters<InsertHeadingParams>) -> ToolResult {
        let InsertHeadingParams {
            document_id,
            text,
            level,
            index,
        } = params.0;
        self.doc(document_id, DocOp::InsertHeading { text, level, index })
            .await
    }

    /// Insert an inline image from a public URL.
    #[tool(name = "insert_image_to_document")]
    async fn insert_image_to_document(&self, params: Parameters<InsertDocImageParams>) -> ToolResult {
        let InsertDocImageParams {
            document_id,
            image_url,
            index,
        } = params.0;
        self.doc(document_id, DocOp::InsertImage { image_url, index })
            .await
    }

    /// Fetch a document with its content.
    #[tool(name = "get_document_details")]
    async fn get_document_details(&self, params: Parameters<DocumentParams>) -> ToolResult {
        self.doc(params.0.document_id, DocOp::GetDocument).await
    }

    /// Delete a document.
    #[tool(name = "delete_document")]
    async fn delete_document(&self, params: Parameters<DocumentParams>) -> ToolResult {
        self.doc(params.0.document_id, DocOp::DeleteDocument).await
    }

    /// Insert an empty table. The returned `table_id` addresses it in the table tools.
    #[tool(name = "create_table_in_document")]
    async fn create_table_in_document(&self, params: Parameters<CreateTableParams>) -> ToolResult {
        let CreateTableParams {
            document_id,
            rows,
            columns,
            index,
        } = params.0;
        self.doc(
            document_id,
            DocOp::CreateTable {
                rows,
                columns,
                index,
            },
        )
        .await
    }

    /// Change character formatting of a text range.
    #[tool(name = "update_text_style_in_document")]
    async fn update_text_style_in_document(&self, params: Parameters<DocTextStyleParams>) -> ToolResult {
        let DocTextStyleParams {
            document_id,
            start_index,
            end_index,
            style,
        } = params.0;
        self.doc(
            document_id,
            DocOp::UpdateTextStyle {
                start_index,
                end_index,
                style,
            },
        )
        .await
    }

    /// Change paragraph formatting of a range, including bullets and numbering.
    #[tool(name = "update_paragraph_style_in_document")]
    async fn update_paragraph_style_in_document(
        &self,
        params: Parameters<DocParagraphStyleParams>,
    ) -> ToolResult {
        let DocParagraphStyleParams {
            document_id,
            start_index,
            end_index,
            style,
        } = params.0;
        self.doc(
            document_id,
            DocOp::UpdateParagraphStyle {
                start_index,
                end_index,
                style,
            },
        )
        .await
    }

    /// Insert a page break.
    #[tool(name = "insert_page_break_in_document")]
    async fn insert_page_break_in_document(&self, params: Parameters<DocIndexParams>) -> ToolResult {
        let DocIndexParams { document_id, index } = params.0;
        self.doc(document_id, DocOp::InsertPageBreak { index }).await
    }

    /// Insert a horizontal rule.
    #[tool(name = "insert_horizontal_rule_in_document")]
    async fn insert_horizontal_rule_in_document(
        &self,
        params: Parameters<DocIndexParams>,
    ) -> ToolResult {
        let DocIndexParams { document_id, index } = params.0;
        self.doc(document_id, DocOp::InsertHorizontalRule { index })
            .await
    }

    /// Replace the text of one table cell.
    #[tool(name = "update_table_cell_content")]
    async fn update_table_cell_content(&self, params: Parameters<TableCellContentParams>) -> ToolResult {
        let TableCellContentParams {
            document_id,
            table_id,
            row_index,
            column_index,
            content,
        } = params.0;
        self.doc(
            document_id,
            DocOp::UpdateTableCellContent {
                table_id,
                row_index,
                column_index,
                content,
            },
        )
        .await
    }

    /// Change background, borders and padding of one table cell.
    #[tool(name = "update_table_cell_style")]
    async fn update_table_cell_style(&self, params: Parameters<TableCellStyleParams>) -> ToolResult {
        let TableCellStyleParams {
            document_id,
            table_id,
            row_index,
            column_index,
            background_color,
            border_color,
            border_width,
            padding,
        } = params.0;
        self.doc(
            document_id,
            DocOp::UpdateTableCellStyle {
                table_id,
                row_index,
                column_index,
                background_color,
                border_color,
                border_width,
                padding,
            },
        )
        .await
    }

    /// Change background and minimum height of a table row.
    #[tool(name = "update_table_row_style")]
    async fn update_table_row_style(&self, params: Parameters<TableRowStyleParams>) -> ToolResult {
        let TableRowStyleParams {
            document_id,
            table_id,
            row_index,
            background_color,
            height,
        } = params.0;
        self.doc(
            document_id,
            DocOp::UpdateTableRowStyle {
                table_id,
                row_index,
                background_color,
                height,
            },
        )
        .await
    }

    /// Change the width of a table column.
    #[tool(name = "update_table_column_style")]
    async fn update_table_column_style(&self, params: Parameters<TableColumnStyleParams>) -> ToolResult {
        let TableColumnStyleParams {
            document_id,
            table_id,
            column_index,
            width,
        } = params.0;
        self.doc(
            document_id,
            DocOp::UpdateTableColumnStyle {
                table_id,
                column_index,
                width,
            },
        )
        .await
    }

    /// Merge a rectangular block of table cells.
    #[tool(name = "merge_table_cells")]
    async fn merge_table_cells(&self, params: Parameters<MergeTableCellsParams>) -> ToolResult {
        let MergeTableCellsParams {
            document_id,
            table_id,
            start_row,
            start_column,
            end_row,
            end_column,
        } = params.0;
        self.doc(
            document_id,
            DocOp::MergeTableCells {
                table_id,
                start_row,
                start_column,
                end_row,
                end_column,
            },
        )
        .await
    }

    /// Insert rows below `row_index`.
    #[tool(name = "insert_table_row")]
    async fn insert_table_row(&self, params: Parameters<TableRowsParams>) -> ToolResult {
        let TableRowsParams {
            document_id,
            table_id,
            row_index,
            num_rows,
        } = params.0;
        self.doc(
            document_id,
            DocOp::InsertTableRows {
                table_id,
                row_index,
                count: num_rows,
            },
        )
        .await
    }

    /// Insert columns right of `column_index`.
    #[tool(name = "insert_table_column")]
    async fn insert_table_column(&self, params: Parameters<TableColumnsParams>) -> ToolResult {
        let TableColumnsParams {
            document_id,
            table_id,
            column_index,
            num_columns,
        } = params.0;
        self.doc(
            document_id,
            DocOp::InsertTableColumns {
                table_id,
                column_index,
                count: num_columns,
            },
        )
        .await
    }

    /// Delete rows starting at `row_index`.
    #[tool(name = "delete_table_row")]
    async fn delete_table_row(&self, params: Parameters<TableRowsParams>) -> ToolResult {
        let TableRowsParams {
            document_id,
            table_id,
            row_index,
            num_rows,
        } = params.0;
        self.doc(
            document_id,
            DocOp::DeleteTableRows {
                table_id,
                row_index,
                count: num_rows,
            },
        )
        .await
    }

    /// Delete columns starting at `column_index`.
    #[tool(name = "delete_table_column")]
    async fn delete_table_column(&self, params: Parameters<TableColumnsParams>) -> ToolResult {
        let TableColumnsParams {
            document_id,
            table_id,
            column_index,
            num_columns,
        } = params.0;
        self.doc(
            document_id,
            DocOp::DeleteTableColumns {
                table_id,
                column_index,
                count: num_columns,
            },
        )
        .await
    }

    /// Set margins, page color and default text formatting.
    #[tool(name = "update_document_style")]
    async fn update_document_style(&self, params: Parameters<DocumentStyleParams>) -> ToolResult {
        let DocumentStyleParams { document_id, style } = params.0;
        self.doc(document_id, DocOp::UpdateDocumentStyle { style })
            .await
    }

    /// Append a table and fill its cells from a `"row,column" -> text` map.
    #[tool(name = "create_table_with_content")]
    async fn create_table_with_content(&self, params: Parameters<TableWithContentParams>) -> ToolResult {
        let TableWithContentParams {
            document_id,
            rows,
            columns,
            content,
        } = params.0;
        self.doc(
            document_id,
            DocOp::CreateTableWithContent {
                rows,
                columns,
                content,
            },
        )
        .await
    }
}

#[tool_handler]
impl ServerHandler for WorkspaceMcp {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "Google Drive, Sheets, Slides and Docs tools. Every tool returns {success, message, ...}. \
                 Spreadsheet tools default to the spreadsheet created last in this session; folders \
                 accept configured aliases or raw folder IDs."
                    .into(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}
