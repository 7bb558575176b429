//! Dashboard session: the single mutable resource behind the table view.
//!
//! Fetches are spawned and report back through an unbounded channel the
//! UI loop drains via [`Session::tick`]; every fetch carries a sequence
//! number and only the most recently issued one may touch the store, so
//! a stale in-flight response can never overwrite newer state. Row
//! actions are awaited inline by the event handler and mutate the store
//! only after the backend confirmed the call.

use crate::api::{ApiResult, RecordsApi};
use crate::capabilities::{Clipboard, Notice, Notifier};
use crate::pager::{self, Pager};
use crate::rows::{self, SortDirection, SortKey};
use crate::search::SearchDebounce;
use crate::store::RecordStore;
use credscope_models::{Page, Record, Severity};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::mpsc;

/// Record field a copy action can target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyField {
    Email,
    Password,
    Url,
}

impl CopyField {
    fn label(self) -> &'static str {
        match self {
            CopyField::Email => "email",
            CopyField::Password => "password",
            CopyField::Url => "URL",
        }
    }
}

/// Completion of a background fetch.
#[derive(Debug)]
pub enum SessionEvent {
    PageLoaded { seq: u64, result: ApiResult<Page> },
}

pub struct Session {
    api: Arc<dyn RecordsApi>,
    notifier: Arc<dyn Notifier>,
    clipboard: Box<dyn Clipboard>,
    pub store: RecordStore,
    pub pager: Pager,
    pub search: SearchDebounce,
    /// Client-side free-text row filter (distinct from the server search).
    pub row_filter: String,
    pub sort: Option<(SortKey, SortDirection)>,
    /// Sequence of the most recently issued fetch; older results are stale.
    seq: u64,
    loading: bool,
    events_tx: mpsc::UnboundedSender<SessionEvent>,
    events_rx: mpsc::UnboundedReceiver<SessionEvent>,
}

impl Session {
    pub fn new(
        api: Arc<dyn RecordsApi>,
        notifier: Arc<dyn Notifier>,
        clipboard: Box<dyn Clipboard>,
        page_size: u32,
    ) -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        Self {
            api,
            notifier,
            clipboard,
            store: RecordStore::default(),
            pager: Pager::new(page_size),
            search: SearchDebounce::new(),
            row_filter: String::new(),
            sort: None,
            seq: 0,
            loading: false,
            events_tx,
            events_rx,
        }
    }

    /// Rows to render, derived from the store through the pure engine.
    pub fn visible(&self) -> Vec<&Record> {
        rows::visible_rows(self.store.records(), &self.row_filter, self.sort)
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    // ---- fetching ----------------------------------------------------

    /// Re-fetch the current page.
    pub fn refresh(&mut self) {
        self.request(self.pager.page, self.pager.page_size);
    }

    pub fn next_page(&mut self) {
        if let Some(page) = self.pager.next() {
            self.request(page, self.pager.page_size);
        }
    }

    pub fn previous_page(&mut self) {
        if let Some(page) = self.pager.previous() {
            self.request(page, self.pager.page_size);
        }
    }

    /// Request page 0 at a new size. Disallowed sizes are refused.
    pub fn set_page_size(&mut self, size: u32) {
        if !pager::is_allowed_size(size) {
            tracing::debug!(size, "refusing disallowed page size");
            return;
        }
        self.request(0, size);
    }

    /// Drive time-based work: fire a due debounced search and apply any
    /// completed fetches. Called once per UI tick.
    pub fn tick(&mut self, now: Instant) {
        if self.search.poll(now).is_some() {
            // Search restarts pagination from the first page.
            self.request(0, self.pager.page_size);
        }
        while let Ok(SessionEvent::PageLoaded { seq, result }) = self.events_rx.try_recv() {
            self.complete_fetch(seq, result);
        }
    }

    fn request(&mut self, page: u32, size: u32) {
        let seq = self.begin_fetch();
        let api = Arc::clone(&self.api);
        let filter = self.search.committed().to_string();
        let tx = self.events_tx.clone();
        tokio::spawn(async move {
            let result = api.fetch_page(page, size, &filter).await;
            let _ = tx.send(SessionEvent::PageLoaded { seq, result });
        });
    }

    fn begin_fetch(&mut self) -> u64 {
        self.seq += 1;
        self.loading = true;
        self.seq
    }

    /// Apply a fetch outcome. Results from superseded requests are
    /// discarded; a failure leaves store and pager untouched.
    pub fn complete_fetch(&mut self, seq: u64, result: ApiResult<Page>) {
        if seq != self.seq {
            tracing::debug!(seq, latest = self.seq, "discarding stale page fetch");
            return;
        }
        self.loading = false;
        match result {
            Ok(page) => {
                self.pager.apply(&page.pageable, page.total_elements);
                self.store.replace(page.content);
            }
            Err(err) => {
                tracing::warn!(error = %err, "page fetch failed");
                self.notifier
                    .notify(Notice::error(format!("Failed to load records: {err}")));
            }
        }
    }

    // ---- server search -----------------------------------------------

    /// Record a keystroke in the search prompt.
    pub fn search_typed(&mut self, text: &str, now: Instant) {
        self.search.update(text, now);
    }

    /// Explicit search submit; bypasses the quiet interval.
    pub fn submit_search(&mut self, text: &str) {
        if self.search.commit(text) {
            self.request(0, self.pager.page_size);
        }
    }

    /// Search prompt cancelled; drop any pending query.
    pub fn cancel_search(&mut self) {
        self.search.cancel();
    }

    // ---- local view --------------------------------------------------

    pub fn cycle_sort_key(&mut self) {
        self.sort = Some(match self.sort {
            Some((key, direction)) => (key.next(), direction),
            None => (SortKey::Email, SortDirection::Asc),
        });
    }

    pub fn reverse_sort(&mut self) {
        if let Some((key, direction)) = self.sort {
            self.sort = Some((key, direction.reversed()));
        }
    }

    pub fn clear_sort(&mut self) {
        self.sort = None;
    }

    // ---- row actions (optimistic-after-confirm) ----------------------

    /// Flip a record's validity via the backend, then mirror it locally.
    pub async fn toggle_validity(&mut self, id: i64) {
        let Some(record) = self.store.get(id) else {
            return;
        };
        let target = !record.valid;
        match self.api.set_validity(id, target).await {
            Ok(()) => {
                self.store.set_validity(id, target);
                let state = if target { "valid" } else { "invalid" };
                self.notifier
                    .notify(Notice::success(format!("Record {id} marked {state}")));
            }
            Err(err) => {
                tracing::warn!(id, error = %err, "validity update failed");
                self.notifier
                    .notify(Notice::error(format!("Failed to update validity: {err}")));
            }
        }
    }

    pub async fn assign_severity(&mut self, id: i64, severity: Severity) {
        if self.store.get(id).is_none() {
            return;
        }
        match self.api.set_risk(id, severity).await {
            Ok(()) => {
                self.store.set_severity(id, severity);
                self.notifier.notify(Notice::success(format!(
                    "Record {id} classified {}",
                    severity.label()
                )));
            }
            Err(err) => {
                tracing::warn!(id, error = %err, "severity update failed");
                self.notifier
                    .notify(Notice::error(format!("Failed to update severity: {err}")));
            }
        }
    }

    pub async fn delete(&mut self, id: i64) {
        if self.store.get(id).is_none() {
            return;
        }
        match self.api.delete_record(id).await {
            Ok(()) => {
                self.store.remove(id);
                self.pager.total_elements = self.pager.total_elements.saturating_sub(1);
                // Deleting the last record of the final page leaves the
                // current page index past the end; fetch the page that
                // is now last.
                if self.pager.page > self.pager.last_page() {
                    self.request(self.pager.last_page(), self.pager.page_size);
                }
                self.notifier
                    .notify(Notice::success(format!("Record {id} deleted")));
            }
            Err(err) => {
                tracing::warn!(id, error = %err, "delete failed");
                self.notifier
                    .notify(Notice::error(format!("Failed to delete record: {err}")));
            }
        }
    }

    /// Copy the full, untruncated field value to the clipboard.
    pub fn copy_field(&mut self, id: i64, field: CopyField) {
        let Some(record) = self.store.get(id) else {
            return;
        };
        let value = match field {
            CopyField::Email => record.email.clone(),
            CopyField::Password => record.password.clone(),
            CopyField::Url => record.url.clone(),
        };
        match self.clipboard.set_text(&value) {
            Ok(()) => self
                .notifier
                .notify(Notice::success(format!("Copied {} of record {id}", field.label()))),
            Err(err) => self
                .notifier
                .notify(Notice::error(format!("Clipboard error: {err}"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiError;
    use crate::capabilities::{MemoryClipboard, NoticeBuffer, NoticeLevel};
    use async_trait::async_trait;
    use credscope_models::Pageable;
    use parking_lot::Mutex;
    use std::time::Duration;

    fn record(id: i64) -> Record {
        Record {
            id,
            url: format!("https://site{id}.com"),
            email: format!("user{id}@mail.com"),
            password: "secret".to_string(),
            valid: false,
            severity: None,
        }
    }

    fn page(ids: &[i64], page_number: u32, total: u64) -> Page {
        Page {
            content: ids.iter().copied().map(record).collect(),
            pageable: Pageable {
                page_number,
                page_size: 20,
            },
            total_elements: total,
        }
    }

    #[derive(Default)]
    struct FakeApi {
        fail: bool,
        calls: Mutex<Vec<String>>,
    }

    impl FakeApi {
        fn failing() -> Self {
            Self {
                fail: true,
                ..Self::default()
            }
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().clone()
        }

        fn err() -> ApiError {
            ApiError::Status {
                status: 500,
                message: "boom".to_string(),
            }
        }
    }

    #[async_trait]
    impl RecordsApi for FakeApi {
        async fn fetch_page(&self, page_number: u32, size: u32, filter: &str) -> ApiResult<Page> {
            self.calls
                .lock()
                .push(format!("fetch page={page_number} size={size} filter={filter}"));
            if self.fail {
                return Err(Self::err());
            }
            Ok(page(&[i64::from(page_number) * 10 + 1], page_number, 100))
        }

        async fn set_validity(&self, id: i64, valid: bool) -> ApiResult<()> {
            self.calls.lock().push(format!("validity id={id} valid={valid}"));
            if self.fail { Err(Self::err()) } else { Ok(()) }
        }

        async fn set_risk(&self, id: i64, severity: Severity) -> ApiResult<()> {
            self.calls
                .lock()
                .push(format!("risk id={id} label={}", severity.label()));
            if self.fail { Err(Self::err()) } else { Ok(()) }
        }

        async fn delete_record(&self, id: i64) -> ApiResult<()> {
            self.calls.lock().push(format!("delete id={id}"));
            if self.fail { Err(Self::err()) } else { Ok(()) }
        }

        async fn upload(&self, _: &str, _: Vec<u8>, _: &str) -> ApiResult<String> {
            unimplemented!("not exercised by session tests")
        }
    }

    fn session_with(api: Arc<FakeApi>) -> (Session, NoticeBuffer) {
        let notices = NoticeBuffer::new();
        let session = Session::new(
            api,
            Arc::new(notices.clone()),
            Box::new(MemoryClipboard::default()),
            20,
        );
        (session, notices)
    }

    fn seeded_session(api: Arc<FakeApi>, ids: &[i64]) -> (Session, NoticeBuffer) {
        let (mut session, notices) = session_with(api);
        let seq = session.begin_fetch();
        session.complete_fetch(seq, Ok(page(ids, 0, ids.len() as u64)));
        (session, notices)
    }

    #[test]
    fn test_stale_fetch_result_is_discarded() {
        let (mut session, _) = session_with(Arc::new(FakeApi::default()));
        let first = session.begin_fetch();
        let second = session.begin_fetch();

        // The superseded response arrives first and must not apply.
        session.complete_fetch(first, Ok(page(&[1], 0, 1)));
        assert!(session.store.is_empty());
        assert!(session.is_loading());

        session.complete_fetch(second, Ok(page(&[2], 1, 21)));
        assert_eq!(session.store.records()[0].id, 2);
        assert_eq!(session.pager.page, 1);
        assert!(!session.is_loading());
    }

    #[test]
    fn test_stale_result_arriving_after_latest_is_still_discarded() {
        let (mut session, _) = session_with(Arc::new(FakeApi::default()));
        let first = session.begin_fetch();
        let second = session.begin_fetch();

        session.complete_fetch(second, Ok(page(&[2], 1, 21)));
        session.complete_fetch(first, Ok(page(&[1], 0, 1)));

        assert_eq!(session.store.records()[0].id, 2);
        assert_eq!(session.pager.page, 1);
    }

    #[test]
    fn test_failed_fetch_leaves_state_and_reports() {
        let (mut session, notices) = seeded_session(Arc::new(FakeApi::default()), &[1, 2]);
        let seq = session.begin_fetch();
        session.complete_fetch(seq, Err(FakeApi::err()));

        assert_eq!(session.store.len(), 2);
        assert_eq!(session.pager.page, 0);
        let drained = notices.drain();
        assert_eq!(drained.last().unwrap().level, NoticeLevel::Error);
    }

    #[tokio::test]
    async fn test_debounced_search_fires_once_from_page_zero() {
        let api = Arc::new(FakeApi::default());
        let (mut session, _) = session_with(api.clone());
        let start = Instant::now();

        session.search_typed("a", start);
        session.search_typed("ab", start + Duration::from_millis(100));
        session.tick(start + Duration::from_millis(200));
        assert!(api.calls().is_empty());

        session.tick(start + Duration::from_millis(450));
        // The fetch task runs at the next await point.
        tokio::time::sleep(Duration::from_millis(20)).await;
        let calls = api.calls();
        assert_eq!(calls, vec!["fetch page=0 size=20 filter=ab".to_string()]);
    }

    #[tokio::test]
    async fn test_page_changes_keep_committed_search() {
        let api = Arc::new(FakeApi::default());
        let (mut session, _) = seeded_session(api.clone(), &[1]);
        session.pager.total_elements = 100;
        session.submit_search("netflix");
        session.next_page();

        // Give the spawned fetches a chance to run, then drain.
        tokio::time::sleep(Duration::from_millis(20)).await;
        session.tick(Instant::now());

        let calls = api.calls();
        assert_eq!(calls[0], "fetch page=0 size=20 filter=netflix");
        assert_eq!(calls[1], "fetch page=1 size=20 filter=netflix");
    }

    #[tokio::test]
    async fn test_page_size_change_resets_to_page_zero() {
        let api = Arc::new(FakeApi::default());
        let (mut session, _) = session_with(api.clone());
        session.pager.page = 3;
        session.pager.total_elements = 100;

        session.set_page_size(50);
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert_eq!(api.calls(), vec!["fetch page=0 size=50 filter=".to_string()]);
    }

    #[tokio::test]
    async fn test_disallowed_page_size_is_refused() {
        let api = Arc::new(FakeApi::default());
        let (mut session, _) = session_with(api.clone());
        session.set_page_size(33);
        tokio::time::sleep(Duration::from_millis(10)).await;
        assert!(api.calls().is_empty());
    }

    #[tokio::test]
    async fn test_next_page_is_a_noop_at_the_upper_bound() {
        let api = Arc::new(FakeApi::default());
        let (mut session, _) = session_with(api.clone());
        session.pager.page = 4;
        session.pager.total_elements = 100;

        session.next_page();
        tokio::time::sleep(Duration::from_millis(10)).await;
        assert!(api.calls().is_empty());
    }

    #[tokio::test]
    async fn test_confirmed_toggle_flips_exactly_one_record() {
        let (mut session, notices) = seeded_session(Arc::new(FakeApi::default()), &[1, 2]);
        session.toggle_validity(1).await;

        assert!(session.store.get(1).unwrap().valid);
        assert!(!session.store.get(2).unwrap().valid);
        assert_eq!(notices.drain().last().unwrap().level, NoticeLevel::Success);
    }

    #[tokio::test]
    async fn test_failed_toggle_leaves_store_untouched() {
        let (mut session, notices) = seeded_session(Arc::new(FakeApi::failing()), &[1]);
        session.toggle_validity(1).await;

        assert!(!session.store.get(1).unwrap().valid);
        assert_eq!(notices.drain().last().unwrap().level, NoticeLevel::Error);
    }

    #[tokio::test]
    async fn test_validity_toggle_never_deletes() {
        let api = Arc::new(FakeApi::default());
        let (mut session, _) = seeded_session(api.clone(), &[1]);
        session.toggle_validity(1).await;

        let calls = api.calls();
        assert!(calls.iter().all(|call| !call.starts_with("delete")));
        assert!(session.store.get(1).is_some());
    }

    #[tokio::test]
    async fn test_severity_assignment_updates_in_place() {
        let (mut session, _) = seeded_session(Arc::new(FakeApi::default()), &[1, 2]);
        session.assign_severity(2, Severity::MuitoGrave).await;

        assert_eq!(
            session.store.get(2).unwrap().severity,
            Some(Severity::MuitoGrave)
        );
        assert_eq!(session.store.get(1).unwrap().severity, None);
    }

    #[tokio::test]
    async fn test_delete_removes_row_and_adjusts_total() {
        let (mut session, _) = seeded_session(Arc::new(FakeApi::default()), &[1, 2]);
        session.delete(1).await;

        assert!(session.store.get(1).is_none());
        assert_eq!(session.pager.total_elements, 1);
    }

    #[tokio::test]
    async fn test_deleting_the_last_row_of_the_final_page_steps_back() {
        let api = Arc::new(FakeApi::default());
        let (mut session, _) = session_with(api.clone());
        // Page 1 of a 21-record set: a single row past the 20-row page 0.
        let seq = session.begin_fetch();
        session.complete_fetch(seq, Ok(page(&[21], 1, 21)));

        session.delete(21).await;
        assert_eq!(session.pager.total_elements, 20);

        tokio::time::sleep(Duration::from_millis(20)).await;
        let calls = api.calls();
        assert!(
            calls.contains(&"fetch page=0 size=20 filter=".to_string()),
            "expected a fetch of the new last page, got {calls:?}"
        );
    }

    #[tokio::test]
    async fn test_delete_within_page_does_not_refetch() {
        let api = Arc::new(FakeApi::default());
        let (mut session, _) = seeded_session(api.clone(), &[1, 2]);
        session.delete(1).await;

        tokio::time::sleep(Duration::from_millis(20)).await;
        let fetches = api
            .calls()
            .iter()
            .filter(|call| call.starts_with("fetch"))
            .count();
        assert_eq!(fetches, 0);
    }

    #[tokio::test]
    async fn test_failed_delete_keeps_row() {
        let (mut session, notices) = seeded_session(Arc::new(FakeApi::failing()), &[1]);
        session.delete(1).await;

        assert!(session.store.get(1).is_some());
        assert_eq!(notices.drain().last().unwrap().level, NoticeLevel::Error);
    }

    #[test]
    fn test_copy_field_copies_the_full_value() {
        let api = Arc::new(FakeApi::default());
        let notices = NoticeBuffer::new();
        let clipboard = MemoryClipboard::default();
        let mut session = Session::new(
            api,
            Arc::new(notices.clone()),
            Box::new(clipboard.clone()),
            20,
        );
        let seq = session.begin_fetch();
        let mut long = record(1);
        long.password = "a-very-long-password-indeed".to_string();
        session.complete_fetch(
            seq,
            Ok(Page {
                content: vec![long],
                pageable: Pageable {
                    page_number: 0,
                    page_size: 20,
                },
                total_elements: 1,
            }),
        );

        session.copy_field(1, CopyField::Password);
        assert_eq!(
            clipboard.contents().as_deref(),
            Some("a-very-long-password-indeed")
        );
        assert_eq!(notices.drain().last().unwrap().level, NoticeLevel::Success);
    }

    #[test]
    fn test_visible_applies_local_filter_and_sort() {
        let (mut session, _) = seeded_session(Arc::new(FakeApi::default()), &[3, 1, 2]);
        session.row_filter = "mail.com".to_string();
        session.sort = Some((SortKey::Email, SortDirection::Asc));

        let ids: Vec<i64> = session.visible().iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }
}
