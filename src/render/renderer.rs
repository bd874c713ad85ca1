//! UI renderer trait
//!
//! This module defines the `UIRenderer` trait for drawing a [`QuizView`] and managing
//! terminal lifecycle hooks such as initialization and cleanup.

use crate::error::Result;
use crate::render::view::QuizView;

/// Core trait for UI rendering
pub trait UIRenderer: Send {
    /// Draw the full frame for the given view
    fn render(&mut self, view: &QuizView) -> Result<()>;

    /// Prepare the output device
    ///
    /// For terminals this enters raw mode and the alternate screen and hides the cursor.
    fn initialize(&mut self) -> Result<()>;

    /// Restore the output device. Safe to call more than once.
    fn cleanup(&mut self) -> Result<()>;
}
