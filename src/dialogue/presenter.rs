/// Collaborator contracts — the presentation, audio, scene, and input
/// boundaries of the dialogue core.
///
/// The session never reaches into ambient singletons. The host passes these
/// in per call, bundled in a [`SessionIo`].

/// Implemented by the UI layer.
pub trait Presenter {
    /// Called once per reveal tick with the currently visible prefix of the
    /// node text, and once with the full text when a reveal is skipped.
    fn reveal_text(&mut self, speaker: &str, visible: &str);
    /// Display the response texts. Shown to the player indexed from 1;
    /// selections come back zero-based through `select_choice`.
    fn show_choices(&mut self, choices: &[&str]);
    fn show_continue_prompt(&mut self);
    fn hide(&mut self);
}

/// Named cue triggers, fire-and-forget.
pub trait AudioSink {
    fn play_cue(&mut self, cue: &str);
}

/// Scene transitions requested from response actions. The dialogue core has
/// no knowledge of scene internals.
pub trait SceneDirector {
    fn load_scene(&mut self, scene_id: &str);
    /// Catch-all for host-defined actions that are not scene loads.
    fn perform(&mut self, action: &str);
}

/// Exclusive input capture (pointer lock and the like), suspended for the
/// duration of a dialogue session.
pub trait InputCapture {
    fn suspend(&mut self);
    fn resume(&mut self);
}

/// The collaborator bundle threaded through session calls.
pub struct SessionIo<'a> {
    pub presenter: &'a mut dyn Presenter,
    pub audio: &'a mut dyn AudioSink,
    pub scenes: &'a mut dyn SceneDirector,
    pub input: &'a mut dyn InputCapture,
}

/// No-op collaborators for hosts (and tests) that only care about a subset.
#[derive(Debug, Default)]
pub struct NullPresenter;

impl Presenter for NullPresenter {
    fn reveal_text(&mut self, _speaker: &str, _visible: &str) {}
    fn show_choices(&mut self, _choices: &[&str]) {}
    fn show_continue_prompt(&mut self) {}
    fn hide(&mut self) {}
}

#[derive(Debug, Default)]
pub struct NullAudio;

impl AudioSink for NullAudio {
    fn play_cue(&mut self, _cue: &str) {}
}

#[derive(Debug, Default)]
pub struct NullScenes;

impl SceneDirector for NullScenes {
    fn load_scene(&mut self, _scene_id: &str) {}
    fn perform(&mut self, _action: &str) {}
}

#[derive(Debug, Default)]
pub struct NullInput;

impl InputCapture for NullInput {
    fn suspend(&mut self) {}
    fn resume(&mut self) {}
}
