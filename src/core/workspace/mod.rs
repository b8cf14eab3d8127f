pub mod envelope;
pub mod slide_content;
pub mod workspace_models;
pub mod workspace_service;

pub use envelope::Envelope;
pub use workspace_models::{
    CellPadding, DocOp, DocParagraphStyle, DocTextStyle, DocumentStyle, ElementGeometry,
    RangeUpdate, ShapeFill, SheetOp, SlideOp, SlideTextStyle, SpreadsheetSource, WorkspaceOp,
};
pub use workspace_service::{WorkspaceApi, WorkspaceError, WorkspaceService};
