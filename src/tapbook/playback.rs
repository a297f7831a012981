//! # Playback controller
//!
//! Owns at most one active media playback at a time and mediates between
//! trigger events and the resolver. The controller is headless: it talks to
//! media through the [`MediaSink`] capability trait, so the same state
//! machine drives a browser `<audio>` element, a desktop audio backend, or
//! a test fake.
//!
//! ## States
//!
//! `Idle` → `Playing` on a successful trigger; back to `Idle` on natural
//! end *or* sink error (one bad file must not stall an auto-play run).
//! `Transitioning` covers the halt-old/start-new window when a trigger
//! lands while something is playing. Triggering the same UI handle that is
//! currently playing stops instead of restarting (tap-to-play /
//! tap-to-stop).
//!
//! ## Cancellation
//!
//! `trigger` resolves when the sink reports ended or error. Interruption
//! is cooperative: the caller drops the in-flight future (the controller
//! stays `Playing`) and the next `trigger`/`stop` call halts the old sink
//! before anything new starts. Because every call takes `&mut self`,
//! triggers are strictly serialized per controller and the audio and video
//! sinks are never concurrently owned.

use std::time::Duration;

use thiserror::Error;

use crate::error::{Result, TapbookError};
use crate::model::Book;
use crate::resolver::{self, MediaKind};

/// Default pause between buttons during page auto-play.
pub const DEFAULT_BUTTON_GAP: Duration = Duration::from_millis(500);

/// Sink-level playback failure. All variants are non-fatal to the
/// controller; they terminate the current trigger like a natural end.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SinkError {
    #[error("decode failure: {0}")]
    Decode(String),
    #[error("network failure: {0}")]
    Network(String),
    #[error("playback blocked: {0}")]
    Blocked(String),
}

/// The capability surface the controller needs from a media element.
/// `play` resolves on natural completion and errs on decode/network/
/// autoplay failures; `pause` + `reset` halt without an ended signal.
pub trait MediaSink {
    fn set_source(&mut self, url: &str);
    fn play(&mut self) -> impl std::future::Future<Output = std::result::Result<(), SinkError>>;
    fn pause(&mut self);
    fn reset(&mut self);
}

/// Opaque token for the UI element that triggered playback; equality is
/// all the controller needs for the toggle rule and highlight tracking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ButtonHandle(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerState {
    Idle,
    Playing,
    Transitioning,
}

impl std::fmt::Display for ControllerState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ControllerState::Idle => write!(f, "idle"),
            ControllerState::Playing => write!(f, "playing"),
            ControllerState::Transitioning => write!(f, "transitioning"),
        }
    }
}

/// What a single trigger amounted to. The sequence driver treats `Played`
/// and `PlaybackFailed` identically; the distinction exists only for
/// reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerOutcome {
    /// Playback ran to its natural end.
    Played,
    /// The sink failed mid-flight or refused to start; treated as
    /// completion so sequences keep moving.
    PlaybackFailed,
    /// Resolution failed; nothing was started.
    NoAudioFound,
    /// Same-handle toggle: the in-flight playback was stopped instead.
    Stopped,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequenceOutcome {
    Completed { played: usize, skipped: usize },
    Aborted { played: usize, skipped: usize },
}

/// One audio sink and one video sink, created lazily by the factory on
/// first use and reused for every subsequent trigger.
pub struct PlaybackController<S, F>
where
    S: MediaSink,
    F: FnMut(MediaKind) -> S,
{
    make_sink: F,
    audio: Option<S>,
    video: Option<S>,
    state: ControllerState,
    active_handle: Option<ButtonHandle>,
}

impl<S, F> PlaybackController<S, F>
where
    S: MediaSink,
    F: FnMut(MediaKind) -> S,
{
    pub fn new(make_sink: F) -> Self {
        Self {
            make_sink,
            audio: None,
            video: None,
            state: ControllerState::Idle,
            active_handle: None,
        }
    }

    pub fn state(&self) -> ControllerState {
        self.state
    }

    pub fn is_playing(&self) -> bool {
        self.state == ControllerState::Playing
    }

    /// The UI handle whose playback is in flight, for highlight rendering.
    pub fn active_handle(&self) -> Option<ButtonHandle> {
        self.active_handle
    }

    /// Force `Idle` from any state. Halts the sinks without an ended
    /// signal and clears the active mark synchronously; idempotent.
    pub fn stop(&mut self) {
        self.halt_sinks();
        self.active_handle = None;
        self.state = ControllerState::Idle;
    }

    fn halt_sinks(&mut self) {
        if let Some(sink) = &mut self.audio {
            sink.pause();
            sink.reset();
        }
        if let Some(sink) = &mut self.video {
            sink.pause();
            sink.reset();
        }
    }

    fn sink_for(&mut self, kind: MediaKind) -> &mut S {
        let make_sink = &mut self.make_sink;
        let slot = match kind {
            MediaKind::Audio => &mut self.audio,
            MediaKind::Video => &mut self.video,
        };
        slot.get_or_insert_with(|| make_sink(kind))
    }

    /// Play one button, resolving it against the book. Resolution failure
    /// is reported, never raised; a sink failure terminates the trigger
    /// like a natural completion. Passing the handle that is currently
    /// playing stops playback instead (toggle).
    pub async fn trigger(
        &mut self,
        book: &Book,
        page_id: &str,
        button_index: usize,
        handle: Option<ButtonHandle>,
    ) -> Result<TriggerOutcome> {
        if self.state != ControllerState::Idle {
            if handle.is_some() && handle == self.active_handle {
                self.stop();
                return Ok(TriggerOutcome::Stopped);
            }
            // A different target while playing: halt first, then start.
            self.state = ControllerState::Transitioning;
            self.halt_sinks();
            self.active_handle = None;
        }

        // Failures past this point must not strand `Transitioning`: the
        // sinks are already halted, so the honest report is `Idle`.
        let button = match book.button(page_id, button_index) {
            Ok(button) => button,
            Err(err) => {
                self.state = ControllerState::Idle;
                return Err(err);
            }
        };
        let media = match resolver::resolve(book, page_id, button) {
            Ok(media) => media,
            Err(TapbookError::InvalidSequenceIndex { .. }) => {
                self.state = ControllerState::Idle;
                return Ok(TriggerOutcome::NoAudioFound);
            }
            Err(err) => {
                self.state = ControllerState::Idle;
                return Err(err);
            }
        };

        self.active_handle = handle;
        self.state = ControllerState::Playing;
        let url = media.url.clone();
        let sink = self.sink_for(media.kind);
        sink.set_source(&url);
        let played = sink.play().await;

        self.active_handle = None;
        self.state = ControllerState::Idle;
        match played {
            Ok(()) => Ok(TriggerOutcome::Played),
            Err(err) => {
                log::warn!("playback of {} failed: {}", url, err);
                Ok(TriggerOutcome::PlaybackFailed)
            }
        }
    }

    /// Auto-play a page: every button in stored order, awaiting each
    /// completion, with `gap` between buttons. An unresolvable or failing
    /// button is skipped after the normal gap rather than aborting the
    /// run. `still_current` is checked before each button so the sequence
    /// aborts when the reader navigates away.
    pub async fn play_page_sequence(
        &mut self,
        book: &Book,
        page_id: &str,
        gap: Duration,
        still_current: impl Fn() -> bool,
    ) -> Result<SequenceOutcome> {
        let button_count = book.page(page_id)?.buttons.len();
        let mut played = 0;
        let mut skipped = 0;

        for index in 0..button_count {
            if !still_current() {
                self.stop();
                return Ok(SequenceOutcome::Aborted { played, skipped });
            }
            let handle = Some(ButtonHandle(index as u64));
            match self.trigger(book, page_id, index, handle).await? {
                TriggerOutcome::Played => played += 1,
                TriggerOutcome::PlaybackFailed | TriggerOutcome::NoAudioFound => skipped += 1,
                // Fresh controller state before each trigger; a toggle
                // cannot occur here.
                TriggerOutcome::Stopped => {}
            }
            // Gap between buttons only; the last one ends the sequence.
            if index + 1 < button_count {
                tokio::time::sleep(gap).await;
            }
        }

        Ok(SequenceOutcome::Completed { played, skipped })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Button, Page, PageMap};
    use std::cell::RefCell;
    use std::collections::VecDeque;
    use std::rc::Rc;
    use tokio::time::timeout;

    /// What the fake sink should do when `play` is called.
    #[derive(Debug, Clone)]
    enum PlayScript {
        Finish,
        Fail(SinkError),
        /// Never resolves; models an in-flight playback the test
        /// interrupts by dropping the trigger future.
        Hang,
    }

    #[derive(Default)]
    struct SinkLog {
        events: Vec<String>,
        script: VecDeque<PlayScript>,
    }

    #[derive(Clone)]
    struct FakeSink {
        kind: MediaKind,
        log: Rc<RefCell<SinkLog>>,
    }

    impl MediaSink for FakeSink {
        fn set_source(&mut self, url: &str) {
            self.log
                .borrow_mut()
                .events
                .push(format!("{} source {}", self.kind, url));
        }

        async fn play(&mut self) -> std::result::Result<(), SinkError> {
            let step = {
                let mut log = self.log.borrow_mut();
                log.events.push(format!("{} play", self.kind));
                log.script.pop_front().unwrap_or(PlayScript::Finish)
            };
            match step {
                PlayScript::Finish => Ok(()),
                PlayScript::Fail(err) => Err(err),
                PlayScript::Hang => std::future::pending().await,
            }
        }

        fn pause(&mut self) {
            self.log
                .borrow_mut()
                .events
                .push(format!("{} pause", self.kind));
        }

        fn reset(&mut self) {
            self.log
                .borrow_mut()
                .events
                .push(format!("{} reset", self.kind));
        }
    }

    fn controller() -> (
        PlaybackController<FakeSink, impl FnMut(MediaKind) -> FakeSink>,
        Rc<RefCell<SinkLog>>,
    ) {
        let log = Rc::new(RefCell::new(SinkLog::default()));
        let factory_log = log.clone();
        let controller = PlaybackController::new(move |kind| FakeSink {
            kind,
            log: factory_log.clone(),
        });
        (controller, log)
    }

    fn script(log: &Rc<RefCell<SinkLog>>, steps: &[PlayScript]) {
        log.borrow_mut().script = steps.iter().cloned().collect();
    }

    fn events(log: &Rc<RefCell<SinkLog>>) -> Vec<String> {
        log.borrow().events.clone()
    }

    fn book() -> Book {
        let mut page = Page {
            sequence: vec![1, 0],
            ..Default::default()
        };
        page.buttons.push(Button::new(0.5, 0.5, 0));
        page.buttons.push(Button::new(0.2, 0.2, 1));
        // pos 5 points past the two-entry sequence: unresolvable.
        page.buttons.push(Button::new(0.7, 0.7, 5));
        let mut pages = PageMap::new();
        pages.insert("p1", page);
        Book {
            audio_base: "audio/".into(),
            audio_pool: vec!["a.mp3".into(), "b.mp3".into()],
            pages,
        }
    }

    #[tokio::test]
    async fn trigger_plays_and_returns_to_idle() {
        let (mut ctl, log) = controller();
        let book = book();
        let outcome = ctl.trigger(&book, "p1", 0, None).await.unwrap();
        assert_eq!(outcome, TriggerOutcome::Played);
        assert_eq!(ctl.state(), ControllerState::Idle);
        assert_eq!(
            events(&log),
            vec!["audio source audio/b.mp3", "audio play"]
        );
    }

    #[tokio::test]
    async fn unresolvable_button_reports_no_audio_without_touching_a_sink() {
        let (mut ctl, log) = controller();
        let book = book();
        let outcome = ctl.trigger(&book, "p1", 2, None).await.unwrap();
        assert_eq!(outcome, TriggerOutcome::NoAudioFound);
        assert_eq!(ctl.state(), ControllerState::Idle);
        assert!(events(&log).is_empty());
    }

    #[tokio::test]
    async fn sink_failure_counts_as_completion() {
        let (mut ctl, log) = controller();
        script(&log, &[PlayScript::Fail(SinkError::Decode("bad frame".into()))]);
        let book = book();
        let outcome = ctl.trigger(&book, "p1", 0, None).await.unwrap();
        assert_eq!(outcome, TriggerOutcome::PlaybackFailed);
        assert_eq!(ctl.state(), ControllerState::Idle);
    }

    #[tokio::test]
    async fn video_extensions_route_to_the_video_sink() {
        let (mut ctl, log) = controller();
        let mut book = book();
        book.pages.get_mut("p1").unwrap().buttons[0].r#override = Some("clip.mp4".into());
        ctl.trigger(&book, "p1", 0, None).await.unwrap();
        assert_eq!(
            events(&log),
            vec!["video source audio/clip.mp4", "video play"]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn same_handle_toggle_stops_without_a_second_play() {
        let (mut ctl, log) = controller();
        script(&log, &[PlayScript::Hang]);
        let book = book();
        let handle = Some(ButtonHandle(7));

        {
            let fut = ctl.trigger(&book, "p1", 0, handle);
            tokio::pin!(fut);
            // Poll the trigger into its Playing state, then abandon it —
            // the caller-dropped-the-future interruption path.
            let _ = timeout(Duration::from_millis(1), &mut fut).await;
        }
        assert_eq!(ctl.state(), ControllerState::Playing);
        assert_eq!(ctl.active_handle(), handle);

        let outcome = ctl.trigger(&book, "p1", 0, handle).await.unwrap();
        assert_eq!(outcome, TriggerOutcome::Stopped);
        assert_eq!(ctl.state(), ControllerState::Idle);
        assert_eq!(ctl.active_handle(), None);

        let play_count = events(&log).iter().filter(|e| e.ends_with("play")).count();
        assert_eq!(play_count, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn a_new_target_halts_the_old_playback_first() {
        let (mut ctl, log) = controller();
        script(&log, &[PlayScript::Hang, PlayScript::Finish]);
        let book = book();

        {
            let fut = ctl.trigger(&book, "p1", 0, Some(ButtonHandle(1)));
            tokio::pin!(fut);
            let _ = timeout(Duration::from_millis(1), &mut fut).await;
        }
        assert!(ctl.is_playing());

        let outcome = ctl
            .trigger(&book, "p1", 1, Some(ButtonHandle(2)))
            .await
            .unwrap();
        assert_eq!(outcome, TriggerOutcome::Played);

        let evs = events(&log);
        // Halt of the first playback precedes the second source bind.
        let pause_at = evs.iter().position(|e| e == "audio pause").unwrap();
        let second_source = evs
            .iter()
            .position(|e| e == "audio source audio/a.mp3")
            .unwrap();
        assert!(pause_at < second_source);
    }

    #[tokio::test(start_paused = true)]
    async fn failed_trigger_while_playing_returns_to_idle() {
        let (mut ctl, log) = controller();
        script(&log, &[PlayScript::Hang]);
        let book = book();

        {
            let fut = ctl.trigger(&book, "p1", 0, Some(ButtonHandle(1)));
            tokio::pin!(fut);
            let _ = timeout(Duration::from_millis(1), &mut fut).await;
        }
        assert!(ctl.is_playing());

        // A bad target mid-playback: the error surfaces, but the halt
        // already happened and the controller must not stay in between.
        assert!(ctl
            .trigger(&book, "p1", 9, Some(ButtonHandle(2)))
            .await
            .is_err());
        assert_eq!(ctl.state(), ControllerState::Idle);
        assert_eq!(ctl.active_handle(), None);
        assert!(events(&log).contains(&"audio pause".to_string()));
    }

    #[tokio::test]
    async fn stop_is_idempotent() {
        let (mut ctl, _log) = controller();
        ctl.stop();
        ctl.stop();
        assert_eq!(ctl.state(), ControllerState::Idle);
        assert_eq!(ctl.active_handle(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn page_sequence_skips_a_broken_button_and_continues() {
        let (mut ctl, log) = controller();
        let book = book();
        // Button 2 (index 2) is unresolvable; buttons 0 and 1 play.
        let outcome = ctl
            .play_page_sequence(&book, "p1", DEFAULT_BUTTON_GAP, || true)
            .await
            .unwrap();
        assert_eq!(
            outcome,
            SequenceOutcome::Completed {
                played: 2,
                skipped: 1
            }
        );
        let evs = events(&log);
        assert!(evs.contains(&"audio source audio/b.mp3".to_string()));
        assert!(evs.contains(&"audio source audio/a.mp3".to_string()));
    }

    #[tokio::test(start_paused = true)]
    async fn page_sequence_gaps_between_buttons_not_after_the_last() {
        let (mut ctl, _log) = controller();
        let book = book();
        let started = tokio::time::Instant::now();
        ctl.play_page_sequence(&book, "p1", DEFAULT_BUTTON_GAP, || true)
            .await
            .unwrap();
        // Three buttons: two gaps separate them, none trails the last.
        assert_eq!(started.elapsed(), 2 * DEFAULT_BUTTON_GAP);
    }

    #[tokio::test(start_paused = true)]
    async fn page_sequence_aborts_when_the_page_changes() {
        let (mut ctl, _log) = controller();
        let book = book();
        let outcome = ctl
            .play_page_sequence(&book, "p1", Duration::ZERO, || false)
            .await
            .unwrap();
        assert_eq!(
            outcome,
            SequenceOutcome::Aborted {
                played: 0,
                skipped: 0
            }
        );
        assert_eq!(ctl.state(), ControllerState::Idle);
    }

    #[tokio::test]
    async fn sequence_on_a_missing_page_is_a_hard_error() {
        let (mut ctl, _log) = controller();
        let book = book();
        assert!(ctl
            .play_page_sequence(&book, "ghost", Duration::ZERO, || true)
            .await
            .is_err());
    }
}
