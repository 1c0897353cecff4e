/// Controller states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Editing,
    PromptSaveAs,
    PromptSearch,
    /// Dirty document, waiting for the quit key to be repeated
    ConfirmQuit,
}
