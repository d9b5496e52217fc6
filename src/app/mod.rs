pub mod queue;
pub mod state;

use anyhow::Result;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{info, warn};

use crate::{
    app::{
        queue::{CursorPolicy, PlaybackQueue},
        state::{LyricsView, Notification, Session},
    },
    cache::{Cache, CachedSearch},
    catalog::FallbackCatalog,
    config::Config,
    events::{map_line_to_action, UserAction},
    services::{
        build_http_client, GroqClassifier, LyricsSource, LyricsVerbosity, MoodClassifier,
        SaavnLyrics, SaavnSearch, TrackSearch, RESULT_LIMIT,
    },
    track::{RawTrack, Track},
    ui,
};

pub struct App {
    classifier: Arc<dyn MoodClassifier>,
    search: Arc<dyn TrackSearch>,
    lyrics: Arc<dyn LyricsSource>,
    catalog: FallbackCatalog,
    policy: CursorPolicy,
    lyrics_verbosity: LyricsVerbosity,
}

impl App {
    pub fn new(
        classifier: Arc<dyn MoodClassifier>,
        search: Arc<dyn TrackSearch>,
        lyrics: Arc<dyn LyricsSource>,
        catalog: FallbackCatalog,
    ) -> Self {
        App {
            classifier,
            search,
            lyrics,
            catalog,
            policy: CursorPolicy::default(),
            lyrics_verbosity: LyricsVerbosity::default(),
        }
    }

    pub fn with_policy(mut self, policy: CursorPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_lyrics_verbosity(mut self, verbosity: LyricsVerbosity) -> Self {
        self.lyrics_verbosity = verbosity;
        self
    }

    /// Wires the real HTTP adapters, with the Redis search cache in front when
    /// one is available.
    pub fn from_config(config: &Config, cache: Option<Arc<Cache>>) -> Result<Self> {
        let client = build_http_client(config.request_timeout)?;

        let classifier = Arc::new(GroqClassifier::new(
            client.clone(),
            config.classifier_url.clone(),
            config.classifier_model.clone(),
            config.groq_api_key.clone(),
        ));
        let live_search: Arc<dyn TrackSearch> =
            Arc::new(SaavnSearch::new(client.clone(), config.search_url.clone()));
        let search: Arc<dyn TrackSearch> = match cache {
            Some(cache) => Arc::new(CachedSearch::new(live_search, cache)),
            None => live_search,
        };
        let lyrics = Arc::new(SaavnLyrics::new(client, config.lyrics_url.clone()));

        Ok(App::new(classifier, search, lyrics, FallbackCatalog::default())
            .with_policy(config.cursor_policy)
            .with_lyrics_verbosity(config.lyrics_verbosity))
    }

    pub fn new_session(&self) -> Session {
        Session::new(self.policy)
    }

    /// Line-oriented loop over stdin. One session for the lifetime of the
    /// process.
    pub async fn run(&self) -> Result<()> {
        let mut session = self.new_session();
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        let mut stdout = tokio::io::stdout();

        stdout.write_all(ui::welcome().as_bytes()).await?;
        loop {
            stdout.write_all(ui::PROMPT.as_bytes()).await?;
            stdout.flush().await?;

            let Some(line) = lines.next_line().await? else {
                break;
            };
            if let Some(action) = map_line_to_action(&line) {
                self.handle_action(&mut session, action).await;
                if session.should_quit {
                    break;
                }
                stdout.write_all(ui::render(&session).as_bytes()).await?;
            }
        }
        Ok(())
    }

    // ── Action handler ────────────────────────────────────────────────────────
    pub async fn handle_action(&self, session: &mut Session, action: UserAction) {
        session.notification = None;
        match action {
            UserAction::Quit => {
                session.should_quit = true;
            }
            UserAction::ToggleHelp => {
                session.show_help = !session.show_help;
            }
            UserAction::ShowQueue => {
                session.show_help = false;
            }
            UserAction::NextTrack => self.step(session, PlaybackQueue::advance, "last"),
            UserAction::PrevTrack => self.step(session, PlaybackQueue::retreat, "first"),
            UserAction::TogglePlay => {
                let msg = match (session.toggle_play(), session.now_playing()) {
                    (Some(true), Some(track)) => Notification::info(format!("Playing: {}", track.title)),
                    (Some(false), _) => Notification::info("Paused"),
                    _ => Notification::error("Audio unavailable."),
                };
                session.set_notification(msg);
            }
            UserAction::ShowLyrics => self.load_lyrics(session).await,
            UserAction::SetArtist(artist) => {
                let msg = match &artist {
                    Some(a) => format!("Artist filter: {a}"),
                    None => "Artist filter cleared".to_string(),
                };
                session.artist_filter = artist;
                session.set_notification(Notification::info(msg));
            }
            UserAction::SubmitMood(text) => self.submit_mood(session, &text).await,
            UserAction::SearchSongs(query) => self.search_songs(session, &query, false).await,
            UserAction::EnqueueSongs(query) => self.search_songs(session, &query, true).await,
            UserAction::Unknown(line) => {
                session.set_notification(Notification::error(format!(
                    "Unknown command {line:?}. Type :help for the list."
                )));
            }
        }
    }

    async fn submit_mood(&self, session: &mut Session, text: &str) {
        let text = text.trim();
        if text.is_empty() {
            session.set_notification(Notification::error("Tell me how you're feeling first."));
            return;
        }

        session.mood = None;
        session.load_tracks(vec![]);

        let mood = match self.classifier.classify(text).await {
            Ok(mood) => mood,
            Err(e) => {
                warn!("Mood classification failed: {e}");
                session.set_notification(Notification::error(
                    "Couldn't detect your mood right now. Please try again.",
                ));
                return;
            }
        };
        session.mood = Some(mood.clone());

        let tracks = self
            .fetch_tracks(mood.as_str(), session.artist_filter.as_deref())
            .await;
        info!("Mood {mood}: {} tracks", tracks.len());

        if !tracks.is_empty() {
            let count = tracks.len();
            session.load_tracks(tracks);
            session.set_notification(Notification::info(format!(
                "Detected mood: {mood}, {count} tracks queued"
            )));
            return;
        }

        let suggestions = self.catalog.lookup(mood.as_str());
        if suggestions.is_empty() {
            session.set_notification(Notification::info("No songs found for the selected mood."));
        } else {
            session.suggestions = suggestions;
            session.set_notification(Notification::info(
                "No songs found for this mood. Showing fallback suggestions:",
            ));
        }
    }

    async fn search_songs(&self, session: &mut Session, query: &str, append: bool) {
        let tracks = self.fetch_tracks(query, session.artist_filter.as_deref()).await;
        info!("Song search {query:?}: {} tracks", tracks.len());

        if !append {
            session.mood = None;
        }

        if tracks.is_empty() {
            if !append {
                session.load_tracks(vec![]);
            }
            session.set_notification(Notification::info(format!("No songs found for {query:?}.")));
            return;
        }

        let count = tracks.len();
        if append {
            let was_empty = session.queue.is_empty();
            for track in tracks {
                session.queue.enqueue(track);
            }
            if was_empty {
                session.selection_changed();
            }
            session.suggestions.clear();
            session.set_notification(Notification::info(format!("Added {count} tracks to the queue")));
        } else {
            session.load_tracks(tracks);
            session.set_notification(Notification::info(format!("{count} tracks found")));
        }
    }

    /// Search, cap, normalize.
    async fn fetch_tracks(&self, query: &str, artist: Option<&str>) -> Vec<Track> {
        let raw: Vec<RawTrack> = self.search.search(query, artist).await;
        raw.iter().take(RESULT_LIMIT).map(Track::from_raw).collect()
    }

    fn step(&self, session: &mut Session, mv: fn(&mut PlaybackQueue) -> bool, edge: &str) {
        if session.queue.is_empty() {
            session.set_notification(Notification::error("Nothing queued. Describe your mood first."));
            return;
        }
        if mv(&mut session.queue) {
            session.selection_changed();
            if let Some(track) = session.now_playing() {
                let msg = format!("Now playing: {}", track.title);
                session.set_notification(Notification::info(msg));
            }
        } else {
            session.set_notification(Notification::info(format!("Already at the {edge} track")));
        }
    }

    async fn load_lyrics(&self, session: &mut Session) {
        let Some(track) = session.now_playing() else {
            session.set_notification(Notification::error("Nothing queued. Describe your mood first."));
            return;
        };
        let title = track.title.clone();
        let Some(id) = track.external_id.clone() else {
            session.set_notification(Notification::info("No lyrics available for this track."));
            return;
        };

        match self.lyrics.lyrics(&id).await {
            Ok(Some(text)) => {
                session.lyrics = Some(LyricsView { track_title: title, text });
            }
            Ok(None) => {
                session.set_notification(Notification::info("No lyrics available for this track."));
            }
            Err(e) => {
                warn!("Lyrics fetch for {id} failed: {e}");
                if self.lyrics_verbosity == LyricsVerbosity::Notify {
                    session.set_notification(Notification::error(format!("Couldn't load lyrics: {e}")));
                }
            }
        }
    }
}
