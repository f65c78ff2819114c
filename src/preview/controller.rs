//! The publish-preview dialog: lifecycle, event queue and live re-rendering.

use std::collections::VecDeque;
use std::fmt;

use tracing::{debug, warn};

use crate::config::PublishConfig;
use crate::options::resolve_form;
use crate::types::{EmbedTarget, FormInput};

use super::bridge::{PreviewBridge, RenderingSurface};
use super::busy::BusyIndicator;

/// The dialog chrome: markup, embed-code snippet and the options form.
pub trait DialogView {
    fn render(&mut self, title: &str, width: &str);
    fn render_embed_code(&mut self, target: &EmbedTarget);
    /// Current contents of the options form.
    fn serialize_form(&self) -> FormInput;
    fn close(&mut self);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogState {
    Constructing,
    Rendering,
    AwaitingSurfaceLoad,
    Live,
    Disposed,
}

impl fmt::Display for DialogState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DialogState::Constructing => "constructing",
            DialogState::Rendering => "rendering",
            DialogState::AwaitingSurfaceLoad => "awaiting-surface-load",
            DialogState::Live => "live",
            DialogState::Disposed => "disposed",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogEvent {
    /// Deferred kick-off of the surface's own load. Queued by `open`.
    BeginSurfaceLoad,
    /// The surface finished its initial load.
    SurfaceLoaded,
    /// A field of the options form changed.
    FormChanged,
}

/// Presentation settings for a dialog, usually taken from `PublishConfig`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialogOptions {
    pub title_prefix: String,
    pub width: String,
    pub data_url_suffix: String,
}

impl Default for DialogOptions {
    fn default() -> Self {
        DialogOptions::from(&PublishConfig::default())
    }
}

impl From<&PublishConfig> for DialogOptions {
    fn from(config: &PublishConfig) -> Self {
        DialogOptions {
            title_prefix: config.title_prefix.clone(),
            width: config.dialog_width.clone(),
            data_url_suffix: config.data_url_suffix.clone(),
        }
    }
}

pub fn display_title(prefix: &str, target: &EmbedTarget) -> String {
    format!("{prefix} {}", target.title)
}

pub struct PreviewDialog<S, B, V> {
    target: EmbedTarget,
    title: String,
    document_url: String,
    state: DialogState,
    bridge: PreviewBridge<S>,
    busy: B,
    view: V,
    queue: VecDeque<DialogEvent>,
}

impl<S, B, V> PreviewDialog<S, B, V>
where
    S: RenderingSurface,
    B: BusyIndicator,
    V: DialogView,
{
    /// Construct and render the dialog. The surface load is only queued;
    /// it starts on the next `pump`.
    pub fn open(target: EmbedTarget, surface: S, busy: B, view: V, options: &DialogOptions) -> Self {
        let mut dialog = PreviewDialog {
            title: display_title(&options.title_prefix, &target),
            document_url: target.data_url(&options.data_url_suffix),
            target,
            state: DialogState::Constructing,
            bridge: PreviewBridge::new(surface),
            busy,
            view,
            queue: VecDeque::new(),
        };

        dialog.transition(DialogState::Rendering);
        dialog.view.render(&dialog.title, &options.width);
        dialog.view.render_embed_code(&dialog.target);
        dialog.busy.show();

        dialog.queue.push_back(DialogEvent::BeginSurfaceLoad);
        dialog.transition(DialogState::AwaitingSurfaceLoad);
        dialog
    }

    pub fn post(&mut self, event: DialogEvent) {
        self.queue.push_back(event);
    }

    /// Process queued events in arrival order. Returns how many were taken
    /// off the queue.
    pub fn pump(&mut self) -> usize {
        let mut processed = 0;
        while let Some(event) = self.queue.pop_front() {
            self.handle(event);
            processed += 1;
        }
        processed
    }

    /// Post `event` and process everything queued up to and including it.
    pub fn dispatch(&mut self, event: DialogEvent) {
        self.post(event);
        self.pump();
    }

    pub fn close(&mut self) {
        if self.state == DialogState::Disposed {
            return;
        }
        self.queue.clear();
        self.busy.hide();
        self.view.close();
        self.transition(DialogState::Disposed);
    }

    fn handle(&mut self, event: DialogEvent) {
        match (self.state, event) {
            (DialogState::AwaitingSurfaceLoad, DialogEvent::BeginSurfaceLoad) => {
                if let Err(e) = self.bridge.begin_load() {
                    warn!(title = %self.title, "preview surface did not load: {e}");
                }
            }
            (DialogState::AwaitingSurfaceLoad, DialogEvent::SurfaceLoaded) => {
                self.transition(DialogState::Live);
                self.rerender();
            }
            (DialogState::Live, DialogEvent::FormChanged) => self.rerender(),
            (state, event) => debug!(%state, ?event, "ignoring dialog event"),
        }
    }

    fn rerender(&mut self) {
        self.busy.show();
        let config = resolve_form(&self.view.serialize_form());
        self.bridge.push(&self.document_url, config);
        self.busy.hide();
    }

    fn transition(&mut self, next: DialogState) {
        debug!(from = %self.state, to = %next, "dialog transition");
        self.state = next;
    }

    pub fn state(&self) -> DialogState {
        self.state
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn target(&self) -> &EmbedTarget {
        &self.target
    }

    pub fn document_url(&self) -> &str {
        &self.document_url
    }

    pub fn pushes(&self) -> usize {
        self.bridge.pushes()
    }

    pub fn surface(&self) -> &S {
        self.bridge.surface()
    }

    pub fn busy(&self) -> &B {
        &self.busy
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SurfaceError;
    use crate::types::{OptionValue, ViewerConfig};
    use proptest::prelude::*;

    #[derive(Default)]
    struct RecordingSurface {
        fail_load: bool,
        begin_calls: usize,
        loads: Vec<(String, ViewerConfig)>,
    }

    impl RenderingSurface for RecordingSurface {
        fn begin_load(&mut self) -> Result<(), SurfaceError> {
            self.begin_calls += 1;
            if self.fail_load {
                return Err(SurfaceError::LoadFailed("connection reset".into()));
            }
            Ok(())
        }

        fn load(&mut self, document_url: &str, config: ViewerConfig) {
            self.loads.push((document_url.to_string(), config));
        }
    }

    #[derive(Default)]
    struct Spinner {
        visible: bool,
        shows: usize,
    }

    impl BusyIndicator for Spinner {
        fn show(&mut self) {
            self.visible = true;
            self.shows += 1;
        }

        fn hide(&mut self) {
            self.visible = false;
        }
    }

    #[derive(Default)]
    struct FormView {
        form: FormInput,
        rendered: Option<(String, String)>,
        embed_code_for: Option<String>,
        closed: bool,
    }

    impl DialogView for FormView {
        fn render(&mut self, title: &str, width: &str) {
            self.rendered = Some((title.to_string(), width.to_string()));
        }

        fn render_embed_code(&mut self, target: &EmbedTarget) {
            self.embed_code_for = Some(target.title.clone());
        }

        fn serialize_form(&self) -> FormInput {
            self.form.clone()
        }

        fn close(&mut self) {
            self.closed = true;
        }
    }

    type TestDialog = PreviewDialog<RecordingSurface, Spinner, FormView>;

    fn target() -> EmbedTarget {
        EmbedTarget {
            title: "Budget Memo".into(),
            document_viewer_js: "https://docs.example.org/documents/12-budget-memo.js".into(),
        }
    }

    fn open_with(surface: RecordingSurface) -> TestDialog {
        PreviewDialog::open(
            target(),
            surface,
            Spinner::default(),
            FormView::default(),
            &DialogOptions::default(),
        )
    }

    #[test]
    fn open_renders_and_waits_without_starting_load() {
        let dialog = open_with(RecordingSurface::default());
        assert_eq!(dialog.state(), DialogState::AwaitingSurfaceLoad);
        assert_eq!(dialog.title(), "Embed Budget Memo");
        assert_eq!(
            dialog.view().rendered,
            Some(("Embed Budget Memo".to_string(), "90%".to_string()))
        );
        assert_eq!(dialog.view().embed_code_for.as_deref(), Some("Budget Memo"));
        assert!(dialog.busy().visible);
        assert_eq!(dialog.surface().begin_calls, 0);
        assert_eq!(dialog.pushes(), 0);
    }

    #[test]
    fn document_url_appends_suffix() {
        let dialog = open_with(RecordingSurface::default());
        assert_eq!(
            dialog.document_url(),
            "https://docs.example.org/documents/12-budget-memo.json"
        );
    }

    #[test]
    fn surface_load_goes_live_and_pushes_current_form() {
        let mut dialog = open_with(RecordingSurface::default());
        dialog.view_mut().form = FormInput::new().with("showSidebar", "on");
        dialog.pump();
        assert_eq!(dialog.surface().begin_calls, 1);
        assert_eq!(dialog.pushes(), 0);

        dialog.dispatch(DialogEvent::SurfaceLoaded);
        assert_eq!(dialog.state(), DialogState::Live);
        assert_eq!(dialog.pushes(), 1);
        let (url, config) = &dialog.surface().loads[0];
        assert!(url.ends_with(".json"));
        assert_eq!(config.show_sidebar, OptionValue::Flag(true));
        assert!(!dialog.busy().visible);
    }

    #[test]
    fn changes_before_load_are_dropped() {
        let mut dialog = open_with(RecordingSurface::default());
        dialog.post(DialogEvent::FormChanged);
        dialog.post(DialogEvent::FormChanged);
        assert_eq!(dialog.pump(), 3);
        assert_eq!(dialog.pushes(), 0);
        assert_eq!(dialog.state(), DialogState::AwaitingSurfaceLoad);
    }

    fn specific_zoom_form(zoom: &str) -> FormInput {
        FormInput::new()
            .with("zoom", "specific")
            .with("zoom_specific", zoom)
    }

    fn pushed_zooms(dialog: &TestDialog) -> Vec<OptionValue> {
        dialog
            .surface()
            .loads
            .iter()
            .map(|(_, config)| config.zoom.clone())
            .collect()
    }

    #[test]
    fn every_live_change_pushes_once_in_arrival_order() {
        let mut dialog = open_with(RecordingSurface::default());
        dialog.pump();
        dialog.dispatch(DialogEvent::SurfaceLoaded);

        for zoom in ["150", "200", "40"] {
            dialog.view_mut().form = specific_zoom_form(zoom);
            dialog.dispatch(DialogEvent::FormChanged);
        }

        assert_eq!(
            pushed_zooms(&dialog),
            [
                OptionValue::Flag(false),
                OptionValue::Number(150),
                OptionValue::Number(200),
                OptionValue::text("auto"),
            ]
        );
        assert_eq!(dialog.busy().shows, 5);
        assert!(!dialog.busy().visible);
    }

    #[test]
    fn queued_changes_are_not_coalesced() {
        let mut dialog = open_with(RecordingSurface::default());
        dialog.pump();
        dialog.dispatch(DialogEvent::SurfaceLoaded);

        dialog.view_mut().form = specific_zoom_form("300");
        dialog.post(DialogEvent::FormChanged);
        dialog.post(DialogEvent::FormChanged);
        dialog.post(DialogEvent::FormChanged);
        assert_eq!(dialog.pump(), 3);

        // Each change reads the form as it stands when processed.
        let zooms = pushed_zooms(&dialog);
        assert_eq!(zooms.len(), 4);
        assert!(zooms[1..].iter().all(|zoom| *zoom == OptionValue::Number(300)));
    }

    #[test]
    fn repeated_surface_loads_are_ignored() {
        let mut dialog = open_with(RecordingSurface::default());
        dialog.pump();
        dialog.dispatch(DialogEvent::SurfaceLoaded);
        dialog.dispatch(DialogEvent::SurfaceLoaded);
        assert_eq!(dialog.pushes(), 1);
        assert_eq!(dialog.state(), DialogState::Live);
    }

    #[test]
    fn failed_load_stalls_without_pushing() {
        let mut dialog = open_with(RecordingSurface {
            fail_load: true,
            ..Default::default()
        });
        dialog.dispatch(DialogEvent::FormChanged);
        assert_eq!(dialog.surface().begin_calls, 1);
        assert_eq!(dialog.state(), DialogState::AwaitingSurfaceLoad);
        assert_eq!(dialog.pushes(), 0);
        assert!(dialog.busy().visible);
    }

    #[test]
    fn closed_dialog_ignores_events() {
        let mut dialog = open_with(RecordingSurface::default());
        dialog.pump();
        dialog.dispatch(DialogEvent::SurfaceLoaded);
        dialog.close();
        dialog.dispatch(DialogEvent::FormChanged);
        assert_eq!(dialog.state(), DialogState::Disposed);
        assert!(dialog.view().closed);
        assert_eq!(dialog.pushes(), 1);
    }

    proptest! {
        #[test]
        fn prop_no_push_before_surface_loaded(
            early in prop::collection::vec(
                prop_oneof![Just(DialogEvent::FormChanged), Just(DialogEvent::BeginSurfaceLoad)],
                0..20,
            ),
            late_changes in 0usize..10,
        ) {
            let mut dialog = open_with(RecordingSurface::default());
            for event in early {
                dialog.dispatch(event);
                prop_assert_eq!(dialog.pushes(), 0);
            }
            dialog.dispatch(DialogEvent::SurfaceLoaded);
            for _ in 0..late_changes {
                dialog.dispatch(DialogEvent::FormChanged);
            }
            prop_assert_eq!(dialog.pushes(), 1 + late_changes);
        }
    }
}
