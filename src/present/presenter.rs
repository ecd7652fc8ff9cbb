use crate::foundation::error::LegibilityResult;
use crate::session::eval_session::{Frame, LineView};

/// Consumer of composed frames, called after every render in arrival order.
pub trait Presenter {
    /// Show `frame`. Errors are reported to the caller; the session itself is unaffected.
    fn present(&mut self, frame: &Frame) -> LegibilityResult<()>;
}

impl<P: Presenter + ?Sized> Presenter for Box<P> {
    fn present(&mut self, frame: &Frame) -> LegibilityResult<()> {
        (**self).present(frame)
    }
}

/// Presenter that keeps the line state of every frame it receives. For tests and headless
/// debugging.
#[derive(Debug, Default)]
pub struct NullPresenter {
    presented: Vec<Vec<LineView>>,
}

impl NullPresenter {
    /// Create an empty presenter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of frames presented so far.
    pub fn frames(&self) -> usize {
        self.presented.len()
    }

    /// Line state of the most recent frame.
    pub fn last(&self) -> Option<&[LineView]> {
        self.presented.last().map(Vec::as_slice)
    }
}

impl Presenter for NullPresenter {
    fn present(&mut self, frame: &Frame) -> LegibilityResult<()> {
        self.presented.push(frame.lines.clone());
        Ok(())
    }
}
