//! Application state and types.

use chrono::NaiveDate;
use tentrack_core::{Stats, Tent};
use tracing::{debug, error};

use super::form::TentForm;
use crate::cache::{FetchEpoch, MutationId, OPTIMISTIC_PREFIX, TentCache};
use crate::client::ClientError;
use crate::sync::{self, MutationRequest, MutationResult};

/// Application mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppMode {
    /// Dashboard with stats and tent cards.
    List,
    /// Create/edit form overlay.
    Form,
    /// Delete confirmation prompt.
    ConfirmDelete,
}

/// State of the initial load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    Loading,
    Ready,
    Failed(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Error,
}

/// One-line banner above the tent list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub text: String,
}

/// Work the event loop must start on behalf of the app.
#[derive(Debug, Clone, PartialEq)]
pub enum AppCommand {
    Refresh(FetchEpoch),
    Mutate {
        id: MutationId,
        request: MutationRequest,
    },
}

/// Result of fetching tents and stats together.
pub type FetchResult = Result<(Vec<Tent>, Stats), ClientError>;

/// TUI application state.
pub struct App {
    pub mode: AppMode,
    pub cache: TentCache,
    pub load: LoadState,
    /// Index of the highlighted card.
    pub selected: usize,
    pub form: Option<TentForm>,
    /// Id of the tent awaiting delete confirmation.
    pub pending_delete: Option<String>,
    pub notice: Option<Notice>,
    pub api_url: String,
    pub fetching: bool,
    pub should_quit: bool,
    /// Default inspection date for new tents.
    pub today: NaiveDate,
}

impl App {
    pub fn new(api_url: impl Into<String>, today: NaiveDate) -> Self {
        Self {
            mode: AppMode::List,
            cache: TentCache::new(),
            load: LoadState::Loading,
            selected: 0,
            form: None,
            pending_delete: None,
            notice: None,
            api_url: api_url.into(),
            fetching: false,
            should_quit: false,
            today,
        }
    }

    pub fn tents(&self) -> &[Tent] {
        self.cache.tents()
    }

    pub fn selected_tent(&self) -> Option<&Tent> {
        self.tents().get(self.selected)
    }

    pub fn select_next(&mut self) {
        if self.selected + 1 < self.tents().len() {
            self.selected += 1;
        }
    }

    pub const fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    fn clamp_selection(&mut self) {
        self.selected = self.selected.min(self.tents().len().saturating_sub(1));
    }

    pub fn set_notice(&mut self, level: NoticeLevel, text: impl Into<String>) {
        self.notice = Some(Notice {
            level,
            text: text.into(),
        });
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    // =========================================================================
    // Fetching
    // =========================================================================

    /// Start a refetch unless one is already running.
    pub fn request_refresh(&mut self) -> Option<AppCommand> {
        if self.fetching {
            return None;
        }
        self.fetching = true;
        Some(AppCommand::Refresh(self.cache.begin_fetch()))
    }

    /// Apply a finished fetch.
    ///
    /// A discarded result before the first successful load asks for another
    /// fetch, since the periodic refresh is far away.
    pub fn finish_fetch(&mut self, epoch: FetchEpoch, result: FetchResult) -> Option<AppCommand> {
        self.fetching = false;
        match result {
            Ok((tents, stats)) => {
                if self.cache.apply_fetch(epoch, tents, stats) {
                    self.load = LoadState::Ready;
                    self.clamp_selection();
                } else if !self.cache.is_loaded() {
                    return self.request_refresh();
                }
            }
            Err(e) => {
                error!(error = %e, "Failed to load tents");
                if self.cache.is_loaded() {
                    self.set_notice(NoticeLevel::Error, format!("Refresh failed: {e}"));
                } else {
                    self.load = LoadState::Failed(e.to_string());
                }
            }
        }
        None
    }

    // =========================================================================
    // Form
    // =========================================================================

    pub fn open_create_form(&mut self) {
        self.form = Some(TentForm::create(self.today));
        self.mode = AppMode::Form;
    }

    /// Open the form for the highlighted tent.
    pub fn open_edit_form(&mut self) {
        let Some(tent) = self.selected_tent() else {
            return;
        };
        if tent.id.starts_with(OPTIMISTIC_PREFIX) {
            self.set_notice(NoticeLevel::Info, "This tent is still being saved");
            return;
        }
        self.form = Some(TentForm::edit(tent));
        self.mode = AppMode::Form;
    }

    /// Discard the form without saving.
    pub fn close_form(&mut self) {
        self.form = None;
        self.mode = AppMode::List;
    }

    /// Validate the form and, if it passes, start the mutation it describes.
    pub fn submit_form(&mut self) -> Option<AppCommand> {
        let request = self.form.as_mut()?.submit()?;
        self.close_form();
        if matches!(request, MutationRequest::Create(_)) {
            self.selected = 0;
        }
        Some(self.start_mutation(request))
    }

    // =========================================================================
    // Delete
    // =========================================================================

    /// Ask for confirmation before deleting the highlighted tent.
    pub fn ask_delete(&mut self) {
        let Some(tent) = self.selected_tent() else {
            return;
        };
        if tent.id.starts_with(OPTIMISTIC_PREFIX) {
            self.set_notice(NoticeLevel::Info, "This tent is still being saved");
            return;
        }
        self.pending_delete = Some(tent.id.clone());
        self.mode = AppMode::ConfirmDelete;
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
        self.mode = AppMode::List;
    }

    pub fn confirm_delete(&mut self) -> Option<AppCommand> {
        let id = self.pending_delete.take()?;
        self.mode = AppMode::List;
        Some(self.start_mutation(MutationRequest::Delete { id }))
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    fn start_mutation(&mut self, request: MutationRequest) -> AppCommand {
        let id = request.begin(&mut self.cache);
        self.load = LoadState::Ready;
        self.clamp_selection();
        debug!(mutation = %id, what = %request.describe(), "Mutation started");
        AppCommand::Mutate { id, request }
    }

    /// Settle a finished mutation, surfacing failures in the notice banner.
    pub fn finish_mutation(&mut self, id: MutationId, what: &str, result: MutationResult) {
        match sync::settle(&mut self.cache, id, result) {
            Ok(None) => {}
            Ok(Some(e)) => self.set_notice(NoticeLevel::Error, format!("Could not {what}: {e}")),
            Err(e) => error!(error = %e, "Inconsistent mutation bookkeeping"),
        }
        self.cache.prune_settled();
        self.clamp_selection();
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use tentrack_core::{NewTent, TentStatus};

    use super::*;
    use crate::cache::Confirmation;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
    }

    fn tent(id: &str, status: TentStatus) -> Tent {
        NewTent {
            name: format!("Tent {id}"),
            model: "Dome".into(),
            capacity: 2.0,
            status,
            condition: String::new(),
            last_inspected: today(),
            missing_items: Vec::new(),
            damaged_items: Vec::new(),
            location: "A-1".into(),
        }
        .into_tent(id.to_string(), 0)
    }

    fn ready_app(tents: Vec<Tent>) -> App {
        let mut app = App::new("http://localhost:4000", today());
        let Some(AppCommand::Refresh(epoch)) = app.request_refresh() else {
            panic!("expected refresh");
        };
        let stats = Stats::from_tents(&tents);
        app.finish_fetch(epoch, Ok((tents, stats)));
        app
    }

    #[test]
    fn starts_loading() {
        let app = App::new("http://x", today());
        assert_eq!(app.load, LoadState::Loading);
        assert_eq!(app.mode, AppMode::List);
    }

    #[test]
    fn refresh_is_not_duplicated() {
        let mut app = App::new("http://x", today());
        assert!(app.request_refresh().is_some());
        assert!(app.request_refresh().is_none());
    }

    #[test]
    fn initial_fetch_failure_sets_error_state() {
        let mut app = App::new("http://x", today());
        let Some(AppCommand::Refresh(epoch)) = app.request_refresh() else {
            panic!("expected refresh");
        };
        app.finish_fetch(
            epoch,
            Err(ClientError::Api {
                status: 500,
                message: "boom".into(),
            }),
        );
        assert!(matches!(app.load, LoadState::Failed(ref m) if m.contains("boom")));
        assert!(!app.fetching);
    }

    #[test]
    fn later_fetch_failure_only_shows_notice() {
        let mut app = ready_app(vec![tent("a", TentStatus::Good)]);
        let Some(AppCommand::Refresh(epoch)) = app.request_refresh() else {
            panic!("expected refresh");
        };
        app.finish_fetch(epoch, Err(ClientError::Config("offline".into())));
        assert_eq!(app.load, LoadState::Ready);
        assert_eq!(app.tents().len(), 1);
        assert_eq!(app.notice.as_ref().unwrap().level, NoticeLevel::Error);
    }

    #[test]
    fn selection_stays_in_bounds() {
        let mut app = ready_app(vec![tent("a", TentStatus::Good), tent("b", TentStatus::Good)]);
        app.select_next();
        app.select_next();
        assert_eq!(app.selected, 1);
        app.select_prev();
        app.select_prev();
        assert_eq!(app.selected, 0);
    }

    #[test]
    fn create_form_submit_starts_optimistic_create() {
        let mut app = ready_app(vec![tent("a", TentStatus::Good)]);
        app.open_create_form();
        assert_eq!(app.mode, AppMode::Form);
        {
            let form = app.form.as_mut().unwrap();
            form.name = "Coleman".into();
            form.model = "Sundome".into();
            form.location = "A-1".into();
        }
        let Some(AppCommand::Mutate { id, request }) = app.submit_form() else {
            panic!("expected mutation");
        };
        assert!(matches!(request, MutationRequest::Create(_)));
        assert_eq!(app.mode, AppMode::List);
        assert!(app.form.is_none());
        assert_eq!(app.tents().len(), 2);
        assert!(app.tents()[0].id.starts_with(OPTIMISTIC_PREFIX));

        let server = tent("srv", TentStatus::Good);
        app.finish_mutation(id, "create", Ok(Confirmation::Created(server)));
        assert_eq!(app.tents()[0].id, "srv");
        assert!(app.notice.is_none());
    }

    #[test]
    fn stale_first_load_is_fetched_again() {
        let mut app = App::new("http://x", today());
        let Some(AppCommand::Refresh(first)) = app.request_refresh() else {
            panic!("expected refresh");
        };

        // A create lands while the first load is still in flight.
        app.open_create_form();
        {
            let form = app.form.as_mut().unwrap();
            form.name = "Coleman".into();
            form.model = "Sundome".into();
            form.location = "A-1".into();
        }
        assert!(app.submit_form().is_some());

        let tents = vec![tent("a", TentStatus::Good), tent("b", TentStatus::NeedsRepair)];
        let stats = Stats::from_tents(&tents);
        let Some(AppCommand::Refresh(second)) =
            app.finish_fetch(first, Ok((tents.clone(), stats)))
        else {
            panic!("expected another refresh");
        };
        assert_eq!(app.tents().len(), 1);

        assert!(app.finish_fetch(second, Ok((tents, stats))).is_none());
        assert_eq!(app.tents().len(), 2);
        assert_eq!(app.cache.stats().total, 2);
    }

    #[test]
    fn stale_fetch_after_load_waits_for_next_tick() {
        let mut app = ready_app(vec![tent("a", TentStatus::Good)]);
        let Some(AppCommand::Refresh(epoch)) = app.request_refresh() else {
            panic!("expected refresh");
        };
        app.ask_delete();
        assert!(app.confirm_delete().is_some());
        let tents = vec![tent("a", TentStatus::Good)];
        let stats = Stats::from_tents(&tents);
        assert!(app.finish_fetch(epoch, Ok((tents, stats))).is_none());
        assert!(app.tents().is_empty());
    }

    #[test]
    fn invalid_form_stays_open() {
        let mut app = ready_app(Vec::new());
        app.open_create_form();
        assert!(app.submit_form().is_none());
        assert_eq!(app.mode, AppMode::Form);
        assert!(!app.form.as_ref().unwrap().errors.is_empty());
        app.close_form();
        assert_eq!(app.mode, AppMode::List);
        assert!(app.tents().is_empty());
    }

    #[test]
    fn failed_delete_rolls_back_and_notifies() {
        let mut app = ready_app(vec![tent("a", TentStatus::MissingItems)]);
        app.ask_delete();
        assert_eq!(app.mode, AppMode::ConfirmDelete);
        let Some(AppCommand::Mutate { id, .. }) = app.confirm_delete() else {
            panic!("expected mutation");
        };
        assert!(app.tents().is_empty());
        assert_eq!(app.cache.stats().total, 0);

        app.finish_mutation(
            id,
            "delete a",
            Err(ClientError::Api {
                status: 500,
                message: "db down".into(),
            }),
        );
        assert_eq!(app.tents().len(), 1);
        assert_eq!(app.cache.stats().missing_items, 1);
        let notice = app.notice.as_ref().unwrap();
        assert_eq!(notice.level, NoticeLevel::Error);
        assert!(notice.text.contains("Could not delete a"));
    }

    #[test]
    fn cancel_delete_keeps_tent() {
        let mut app = ready_app(vec![tent("a", TentStatus::Good)]);
        app.ask_delete();
        app.cancel_delete();
        assert!(app.pending_delete.is_none());
        assert_eq!(app.tents().len(), 1);
        assert!(app.confirm_delete().is_none());
    }

    #[test]
    fn placeholders_cannot_be_edited_or_deleted() {
        let mut app = ready_app(Vec::new());
        app.open_create_form();
        {
            let form = app.form.as_mut().unwrap();
            form.name = "n".into();
            form.model = "m".into();
            form.location = "l".into();
        }
        app.submit_form().unwrap();
        app.open_edit_form();
        assert_eq!(app.mode, AppMode::List);
        app.ask_delete();
        assert_eq!(app.mode, AppMode::List);
        assert_eq!(app.notice.as_ref().unwrap().level, NoticeLevel::Info);
    }

    #[test]
    fn edit_form_prefills_selected() {
        let mut app = ready_app(vec![tent("a", TentStatus::Good), tent("b", TentStatus::Good)]);
        app.select_next();
        app.open_edit_form();
        assert_eq!(app.form.as_ref().unwrap().name, "Tent b");
    }
}
