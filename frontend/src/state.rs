//! Upload lifecycle state for the caption uploader, kept free of any
//! browser types so the transition table can be exercised as plain Rust.

pub const INVALID_FILE_MESSAGE: &str = "Please upload a valid image file.";
pub const SERVER_ERROR_MESSAGE: &str = "Server error";
pub const FALLBACK_ERROR_MESSAGE: &str = "Failed to generate caption.";
pub const PLACEHOLDER_CAPTION: &str = "No caption generated.";

/// How long the "Copied!" badge stays up after a copy action.
pub const COPIED_RESET_MS: u32 = 2_000;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RequestState {
    Idle,
    InFlight,
    Succeeded,
    Failed,
}

/// State of a single in-progress caption workflow. Generic over the file
/// handle so the component can store a `gloo_file::File` while tests use a
/// plain value.
///
/// The caption and the error message are mutually exclusive; every
/// transition that sets one clears the other. `selection_seq` is a
/// monotonically increasing token handed out on each accepted selection:
/// an async preview read that completes with a stale token is discarded,
/// so the most recent selection always wins.
pub struct UploaderState<F> {
    request: RequestState,
    file: Option<F>,
    preview: Option<String>,
    caption: String,
    error: String,
    copied: bool,
    selection_seq: u64,
}

impl<F> Default for UploaderState<F> {
    fn default() -> Self {
        Self {
            request: RequestState::Idle,
            file: None,
            preview: None,
            caption: String::new(),
            error: String::new(),
            copied: false,
            selection_seq: 0,
        }
    }
}

impl<F> UploaderState<F> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validates and stores a candidate file. A non-image media type is
    /// rejected on the spot and never uploaded; the previous selection, if
    /// any, is left in place. On acceptance returns the selection token
    /// the preview read must echo back through [`Self::preview_ready`].
    pub fn select_file(&mut self, file: F, mime_type: &str) -> Option<u64> {
        if !mime_type.starts_with("image/") {
            self.error = INVALID_FILE_MESSAGE.to_string();
            self.caption.clear();
            self.copied = false;
            return None;
        }

        self.selection_seq += 1;
        self.file = Some(file);
        self.preview = None;
        self.caption.clear();
        self.error.clear();
        self.copied = false;
        self.request = RequestState::Idle;
        Some(self.selection_seq)
    }

    /// Installs a derived preview data URI. Returns false when the token
    /// is stale, i.e. the selection changed while the read was running.
    pub fn preview_ready(&mut self, token: u64, data_uri: String) -> bool {
        if token != self.selection_seq || self.file.is_none() {
            return false;
        }
        self.preview = Some(data_uri);
        true
    }

    /// Starts a submission: moves to `InFlight`, wipes the previous
    /// outcome, and hands back the file to upload. No-op (returns `None`)
    /// without a selection or while a request is already running.
    pub fn begin_submit(&mut self) -> Option<&F> {
        if self.file.is_none() || self.request == RequestState::InFlight {
            return None;
        }
        self.request = RequestState::InFlight;
        self.caption.clear();
        self.error.clear();
        self.copied = false;
        self.file.as_ref()
    }

    pub fn finish_with_caption(&mut self, caption: Option<String>) {
        self.request = RequestState::Succeeded;
        self.caption = caption.unwrap_or_else(|| PLACEHOLDER_CAPTION.to_string());
        self.error.clear();
    }

    pub fn finish_with_error(&mut self, message: String) {
        self.request = RequestState::Failed;
        self.error = if message.is_empty() {
            FALLBACK_ERROR_MESSAGE.to_string()
        } else {
            message
        };
        self.caption.clear();
    }

    /// Resets everything, whatever the current state. Bumps the selection
    /// token so a preview read still in flight lands on the floor.
    pub fn clear(&mut self) {
        self.selection_seq += 1;
        self.request = RequestState::Idle;
        self.file = None;
        self.preview = None;
        self.caption.clear();
        self.error.clear();
        self.copied = false;
    }

    /// Raises the copied flag; the caller owns the reset timer. Returns
    /// false when there is no caption to copy.
    pub fn mark_copied(&mut self) -> bool {
        if self.caption.is_empty() {
            return false;
        }
        self.copied = true;
        true
    }

    pub fn reset_copied(&mut self) {
        self.copied = false;
    }

    pub fn request(&self) -> RequestState {
        self.request
    }

    pub fn is_in_flight(&self) -> bool {
        self.request() == RequestState::InFlight
    }

    pub fn file(&self) -> Option<&F> {
        self.file.as_ref()
    }

    pub fn has_file(&self) -> bool {
        self.file.is_some()
    }

    pub fn preview(&self) -> Option<&str> {
        self.preview.as_deref()
    }

    pub fn caption(&self) -> &str {
        &self.caption
    }

    pub fn error(&self) -> &str {
        &self.error
    }

    pub fn copied(&self) -> bool {
        self.copied
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> UploaderState<&'static str> {
        UploaderState::new()
    }

    #[test]
    fn starts_idle_and_empty() {
        let s = state();
        assert_eq!(s.request(), RequestState::Idle);
        assert!(!s.has_file());
        assert!(s.preview().is_none());
        assert!(s.caption().is_empty());
        assert!(s.error().is_empty());
        assert!(!s.copied());
    }

    #[test]
    fn rejects_non_image_selection() {
        let mut s = state();
        assert!(s.select_file("notes.txt", "text/plain").is_none());
        assert_eq!(s.error(), INVALID_FILE_MESSAGE);
        assert!(!s.has_file());
        assert_eq!(s.request(), RequestState::Idle);
    }

    #[test]
    fn invalid_selection_keeps_previous_file_but_clears_caption() {
        let mut s = state();
        s.select_file("dog.png", "image/png");
        s.finish_with_caption(Some("a dog".into()));
        s.mark_copied();

        assert!(s.select_file("notes.txt", "text/plain").is_none());
        assert_eq!(s.file(), Some(&"dog.png"));
        assert_eq!(s.error(), INVALID_FILE_MESSAGE);
        assert!(s.caption().is_empty());
        assert!(!s.copied());
    }

    #[test]
    fn accepts_image_and_resets_outcome() {
        let mut s = state();
        s.finish_with_error("old failure".into());

        let token = s.select_file("dog.png", "image/png");
        assert!(token.is_some());
        assert!(s.has_file());
        assert!(s.caption().is_empty());
        assert!(s.error().is_empty());
        assert!(s.preview().is_none());
        assert_eq!(s.request(), RequestState::Idle);
    }

    #[test]
    fn preview_with_current_token_is_installed() {
        let mut s = state();
        let token = s.select_file("dog.png", "image/png").unwrap();
        assert!(s.preview_ready(token, "data:image/png;base64,AAAA".into()));
        assert_eq!(s.preview(), Some("data:image/png;base64,AAAA"));
    }

    #[test]
    fn stale_preview_loses_to_later_selection() {
        let mut s = state();
        let first = s.select_file("dog.png", "image/png").unwrap();
        let second = s.select_file("cat.png", "image/png").unwrap();

        assert!(!s.preview_ready(first, "data:dog".into()));
        assert!(s.preview().is_none());
        assert!(s.preview_ready(second, "data:cat".into()));
        assert_eq!(s.preview(), Some("data:cat"));
    }

    #[test]
    fn preview_after_clear_is_discarded() {
        let mut s = state();
        let token = s.select_file("dog.png", "image/png").unwrap();
        s.clear();
        assert!(!s.preview_ready(token, "data:dog".into()));
        assert!(s.preview().is_none());
    }

    #[test]
    fn submit_without_file_is_a_noop() {
        let mut s = state();
        assert!(s.begin_submit().is_none());
        assert_eq!(s.request(), RequestState::Idle);
    }

    #[test]
    fn submit_while_in_flight_is_a_noop() {
        let mut s = state();
        s.select_file("dog.png", "image/png");
        assert!(s.begin_submit().is_some());
        assert!(s.begin_submit().is_none());
        assert_eq!(s.request(), RequestState::InFlight);
    }

    #[test]
    fn resubmission_clears_previous_result() {
        let mut s = state();
        s.select_file("dog.png", "image/png");
        s.begin_submit();
        s.finish_with_caption(Some("a dog running".into()));
        s.mark_copied();

        assert!(s.begin_submit().is_some());
        assert_eq!(s.request(), RequestState::InFlight);
        assert!(s.caption().is_empty());
        assert!(s.error().is_empty());
        assert!(!s.copied());
    }

    #[test]
    fn success_sets_exact_caption() {
        let mut s = state();
        s.select_file("dog.png", "image/png");
        s.begin_submit();
        s.finish_with_caption(Some("a dog running".into()));

        assert_eq!(s.request(), RequestState::Succeeded);
        assert_eq!(s.caption(), "a dog running");
        assert!(s.error().is_empty());
    }

    #[test]
    fn missing_caption_uses_placeholder() {
        let mut s = state();
        s.select_file("dog.png", "image/png");
        s.begin_submit();
        s.finish_with_caption(None);
        assert_eq!(s.caption(), PLACEHOLDER_CAPTION);
    }

    #[test]
    fn failure_sets_message_and_clears_caption() {
        let mut s = state();
        s.select_file("dog.png", "image/png");
        s.begin_submit();
        s.finish_with_error("network down".into());

        assert_eq!(s.request(), RequestState::Failed);
        assert_eq!(s.error(), "network down");
        assert!(s.caption().is_empty());
    }

    #[test]
    fn empty_failure_message_falls_back_to_generic() {
        let mut s = state();
        s.select_file("dog.png", "image/png");
        s.begin_submit();
        s.finish_with_error(String::new());
        assert_eq!(s.error(), FALLBACK_ERROR_MESSAGE);
    }

    #[test]
    fn clear_resets_everything() {
        let mut s = state();
        let token = s.select_file("dog.png", "image/png").unwrap();
        s.preview_ready(token, "data:dog".into());
        s.begin_submit();
        s.finish_with_caption(Some("a dog".into()));
        s.mark_copied();

        s.clear();
        assert_eq!(s.request(), RequestState::Idle);
        assert!(!s.has_file());
        assert!(s.preview().is_none());
        assert!(s.caption().is_empty());
        assert!(s.error().is_empty());
        assert!(!s.copied());
    }

    #[test]
    fn clear_works_mid_flight() {
        let mut s = state();
        s.select_file("dog.png", "image/png");
        s.begin_submit();
        s.clear();
        assert_eq!(s.request(), RequestState::Idle);
        assert!(!s.has_file());
    }

    #[test]
    fn copy_requires_a_caption() {
        let mut s = state();
        assert!(!s.mark_copied());
        assert!(!s.copied());

        s.select_file("dog.png", "image/png");
        s.begin_submit();
        s.finish_with_caption(Some("a dog".into()));
        assert!(s.mark_copied());
        assert!(s.copied());

        s.reset_copied();
        assert!(!s.copied());
    }
}
