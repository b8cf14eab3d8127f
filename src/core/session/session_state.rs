// Session state: remembers the spreadsheet created most recently so follow-up
// sheet calls can omit the spreadsheet id.
//
// Only spreadsheets get a pointer like this. Documents and presentations always
// need an explicit id.

use tokio::sync::RwLock;

/// Per-server "current spreadsheet" pointer.
///
/// Starts empty, is overwritten by every successful spreadsheet creation and is
/// never cleared. Nothing is persisted across restarts.
#[derive(Debug, Default)]
pub struct SessionState {
    current_spreadsheet_id: RwLock<Option<String>>,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrite the current spreadsheet id. Empty ids are ignored.
    pub async fn set_current(&self, spreadsheet_id: impl Into<String>) {
        let spreadsheet_id = spreadsheet_id.into();
        if spreadsheet_id.is_empty() {
            return;
        }
        *self.current_spreadsheet_id.write().await = Some(spreadsheet_id);
    }

    pub async fn current(&self) -> Option<String> {
        self.current_spreadsheet_id.read().await.clone()
    }

    /// Prefer the explicit id; otherwise fall back to the current spreadsheet.
    ///
    /// `None` means neither was available. Callers must not treat that as a usable id.
    pub async fn resolve_or_current(&self, explicit: Option<String>) -> Option<String> {
        if let Some(id) = explicit.filter(|id| !id.is_empty()) {
            return Some(id);
        }

        let current = self.current().await;
        match &current {
            Some(id) => tracing::info!(spreadsheet_id = %id, "Using current spreadsheet ID"),
            None => tracing::warn!("No current spreadsheet ID is set"),
        }
        current
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_starts_empty() {
        let session = SessionState::new();
        assert_eq!(session.current().await, None);
        assert_eq!(session.resolve_or_current(None).await, None);
    }

    #[tokio::test]
    async fn test_explicit_id_wins() {
        let session = SessionState::new();
        session.set_current("S1").await;

        let resolved = session.resolve_or_current(Some("EXPLICIT".to_string())).await;
        assert_eq!(resolved.as_deref(), Some("EXPLICIT"));
    }

    #[tokio::test]
    async fn test_missing_or_empty_id_uses_current() {
        let session = SessionState::new();
        session.set_current("S1").await;

        assert_eq!(session.resolve_or_current(None).await.as_deref(), Some("S1"));
        assert_eq!(
            session.resolve_or_current(Some(String::new())).await.as_deref(),
            Some("S1")
        );
    }

    #[tokio::test]
    async fn test_latest_creation_overwrites() {
        let session = SessionState::new();
        session.set_current("S1").await;
        session.set_current("S2").await;
        session.set_current("").await;

        assert_eq!(session.current().await.as_deref(), Some("S2"));
    }
}
