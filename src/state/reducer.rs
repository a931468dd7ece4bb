use crate::data::repository::RemoteSportsRepository;
use crate::domain::queries::{LeagueQueries, SportsQueries};
use crate::error::Outcome;
use crate::state::app_settings::AppSettings;
use crate::state::messages::{FetchResult, Intent};
use crate::state::publisher::{StatePublisher, StateSubscription};
use crate::state::screen::{ErrorCode, ScreenState};
use crate::state::view_state::ViewState;
use log::{debug, error, warn};
use sportsdb_api::client::SportsDbApi;
use sportsdb_api::{League, Team};
use std::future::Future;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

const CHANNEL_CAPACITY: usize = 100;

/// Handle to the league browser state machine.
///
/// All mutations happen on one background task; the methods here only
/// enqueue intents, in order. Rendering code subscribes to the published
/// [`ScreenState`].
pub struct LeagueBrowser {
    intents: mpsc::Sender<Intent>,
    publisher: Arc<StatePublisher>,
    task: JoinHandle<()>,
}

impl LeagueBrowser {
    /// Start the reducer task. Must be called inside a tokio runtime.
    pub fn spawn(queries: Arc<dyn LeagueQueries>) -> Self {
        let (intent_tx, intent_rx) = mpsc::channel::<Intent>(CHANNEL_CAPACITY);
        let (result_tx, result_rx) = mpsc::channel::<FetchResult>(CHANNEL_CAPACITY);

        let state = ViewState::default();
        let publisher = Arc::new(StatePublisher::new(state.screen()));
        let reducer = Reducer::new(state, publisher.clone(), queries, result_tx);
        let task = tokio::spawn(reducer.run(intent_rx, result_rx));

        Self { intents: intent_tx, publisher, task }
    }

    /// Wire the TheSportsDB client, repository and queries from settings.
    pub fn connect(settings: &AppSettings) -> Self {
        let api = SportsDbApi::with_base_url(&settings.api_base_url)
            .timeout(settings.request_timeout);
        let repository = RemoteSportsRepository::new(api).with_missing_teams(settings.missing_teams);
        Self::spawn(Arc::new(SportsQueries::new(Arc::new(repository))))
    }

    pub async fn load_catalogue(&self) {
        self.dispatch(Intent::LoadCatalogue).await;
    }

    pub async fn on_search_changed(&self, text: impl Into<String>) {
        self.dispatch(Intent::SearchChanged { text: text.into() }).await;
    }

    pub async fn on_league_selected(&self, league: League) {
        self.dispatch(Intent::LeagueSelected { league }).await;
    }

    pub async fn on_clear_search(&self) {
        self.dispatch(Intent::ClearSearch).await;
    }

    pub async fn dispatch(&self, intent: Intent) {
        if let Err(e) = self.intents.send(intent).await {
            error!("league browser is gone, dropping {:?}", e.0);
        }
    }

    pub fn subscribe(&self) -> StateSubscription {
        self.publisher.subscribe()
    }

    /// Most recently published state.
    pub fn screen(&self) -> ScreenState {
        self.publisher.current()
    }

    /// Stop accepting intents and wait for the queued ones to be applied.
    /// Fetches still in flight are dropped.
    pub async fn shutdown(self) {
        drop(self.intents);
        if let Err(e) = self.task.await {
            error!("league browser task failed: {e}");
        }
    }
}

// ---------------------------------------------------------------------------
// Reducer task: sole owner of ViewState
// ---------------------------------------------------------------------------

struct Reducer {
    state: ViewState,
    publisher: Arc<StatePublisher>,
    queries: Arc<dyn LeagueQueries>,
    results: mpsc::Sender<FetchResult>,
    /// Monotonic stamp shared by both fetch kinds.
    generation: u64,
    pending_leagues: Option<u64>,
    pending_teams: Option<u64>,
}

impl Reducer {
    fn new(
        state: ViewState,
        publisher: Arc<StatePublisher>,
        queries: Arc<dyn LeagueQueries>,
        results: mpsc::Sender<FetchResult>,
    ) -> Self {
        Self {
            state,
            publisher,
            queries,
            results,
            generation: 0,
            pending_leagues: None,
            pending_teams: None,
        }
    }

    async fn run(
        mut self,
        mut intents: mpsc::Receiver<Intent>,
        mut results: mpsc::Receiver<FetchResult>,
    ) {
        loop {
            tokio::select! {
                biased;

                intent = intents.recv() => match intent {
                    Some(intent) => self.handle_intent(intent),
                    None => break,
                },

                Some(result) = results.recv() => self.handle_fetch_result(result),
            }
        }
        debug!("league browser stopped");
    }

    fn handle_intent(&mut self, intent: Intent) {
        match intent {
            Intent::LoadCatalogue => self.load_catalogue(),
            Intent::SearchChanged { text } => self.on_search_changed(text),
            Intent::LeagueSelected { league } => self.on_league_selected(league),
            Intent::ClearSearch => self.on_clear_search(),
        }
    }

    /// Apply one field change and publish the resulting projection.
    fn update(&mut self, mutate: impl FnOnce(&mut ViewState)) {
        mutate(&mut self.state);
        self.publisher.publish(self.state.screen());
    }

    fn next_generation(&mut self) -> u64 {
        self.generation += 1;
        self.generation
    }

    // -----------------------------------------------------------------------
    // Intents
    // -----------------------------------------------------------------------

    fn load_catalogue(&mut self) {
        self.update(|s| s.loading = true);

        let generation = self.next_generation();
        self.pending_leagues = Some(generation);
        debug!("loading league catalogue (generation {generation})");

        let queries = self.queries.clone();
        self.spawn_fetch(async move { queries.get_leagues().await }, move |outcome| {
            FetchResult::Leagues { generation, outcome }
        });
    }

    fn on_search_changed(&mut self, text: String) {
        self.invalidate_team_fetch();
        self.update(|s| s.search_text = text);
        self.update(|s| s.error = None);
        self.update(|s| s.teams.clear());
        let suggestions = self.state.matching_leagues();
        self.update(|s| s.suggestions = suggestions);
    }

    fn on_league_selected(&mut self, league: League) {
        self.update(|s| s.search_text = league.name.clone());
        self.update(|s| s.error = None);
        self.update(|s| s.loading = true);

        let generation = self.next_generation();
        self.pending_teams = Some(generation);
        debug!("loading teams for {} (generation {generation})", league.name);

        let queries = self.queries.clone();
        let league_name = league.name;
        let requested = league_name.clone();
        self.spawn_fetch(
            async move { queries.get_teams(&requested).await },
            move |outcome| FetchResult::Teams { generation, league_name, outcome },
        );
    }

    fn on_clear_search(&mut self) {
        self.invalidate_team_fetch();
        self.update(|s| s.search_text.clear());
        self.update(|s| s.teams.clear());
        self.update(|s| s.suggestions.clear());
        self.update(|s| s.error = None);
    }

    /// The user left the team view; whatever the outstanding team fetch
    /// returns no longer belongs on screen.
    fn invalidate_team_fetch(&mut self) {
        if let Some(generation) = self.pending_teams.take() {
            debug!("team fetch generation {generation} superseded by new search");
        }
    }

    // -----------------------------------------------------------------------
    // Fetch results
    // -----------------------------------------------------------------------

    fn spawn_fetch<T, F, W>(&self, fetch: F, into_result: W)
    where
        T: Send + 'static,
        F: Future<Output = Outcome<T>> + Send + 'static,
        W: FnOnce(Outcome<T>) -> FetchResult + Send + 'static,
    {
        let results = self.results.clone();
        tokio::spawn(async move {
            // A panicking query becomes SportsError::Unknown.
            let outcome = tokio::spawn(fetch).await.unwrap_or_else(|e| Err(e.into()));
            if results.send(into_result(outcome)).await.is_err() {
                debug!("league browser stopped before fetch completed");
            }
        });
    }

    fn handle_fetch_result(&mut self, result: FetchResult) {
        match result {
            FetchResult::Leagues { generation, outcome } => {
                if self.pending_leagues != Some(generation) {
                    debug!("discarding stale league catalogue (generation {generation})");
                    self.settle_loading();
                    return;
                }
                self.pending_leagues = None;
                self.on_catalogue_loaded(outcome);
            }
            FetchResult::Teams { generation, league_name, outcome } => {
                if self.pending_teams != Some(generation) {
                    debug!("discarding stale teams for {league_name} (generation {generation})");
                    self.settle_loading();
                    return;
                }
                self.pending_teams = None;
                self.on_teams_loaded(&league_name, outcome);
            }
        }
    }

    fn on_catalogue_loaded(&mut self, outcome: Outcome<Vec<League>>) {
        match outcome {
            Ok(leagues) => {
                debug!("catalogue loaded with {} leagues", leagues.len());
                self.update(|s| s.catalogue = leagues);
                // The user may have typed while the catalogue was loading.
                let suggestions = self.state.matching_leagues();
                self.update(|s| s.suggestions = suggestions);
            }
            Err(e) => {
                warn!("failed to get leagues: {e}");
                self.update(|s| s.error = Some(ErrorCode::LeaguesLoadFailed));
            }
        }
        self.update(|s| s.loading = false);
    }

    fn on_teams_loaded(&mut self, league_name: &str, outcome: Outcome<Vec<Team>>) {
        match outcome {
            Ok(teams) => {
                debug!("{} teams loaded for {league_name}", teams.len());
                self.update(|s| s.teams = teams);
            }
            Err(e) => {
                warn!("failed to get teams for {league_name}: {e}");
                self.update(|s| s.error = Some(ErrorCode::TeamsLoadFailed));
            }
        }
        self.update(|s| s.loading = false);
    }

    /// Clear the loading flag once nothing that could clear it is left in
    /// flight.
    fn settle_loading(&mut self) {
        if self.pending_leagues.is_none() && self.pending_teams.is_none() && self.state.loading {
            self.update(|s| s.loading = false);
        }
    }
}
