//! System clipboard

use std::borrow::Cow;

use arboard::{Clipboard, ImageData};
use image::RgbaImage;

use crate::error::PersistenceError;

/// Destination for clipboard image writes
pub trait ClipboardWriter {
    fn set_image(&mut self, image: &RgbaImage) -> Result<(), PersistenceError>;
}

/// Clipboard backed by arboard. The handle is opened on first use and kept:
/// on X11 and Wayland the copied image lives only as long as the handle.
#[derive(Default)]
pub struct ArboardClipboard {
    clipboard: Option<Clipboard>,
}

fn clipboard_error(err: arboard::Error) -> PersistenceError {
    PersistenceError::Clipboard(err.to_string())
}

impl ClipboardWriter for ArboardClipboard {
    fn set_image(&mut self, image: &RgbaImage) -> Result<(), PersistenceError> {
        let clipboard = match self.clipboard.take() {
            Some(clipboard) => clipboard,
            None => Clipboard::new().map_err(clipboard_error)?,
        };
        let clipboard = self.clipboard.insert(clipboard);
        clipboard
            .set_image(ImageData {
                width: image.width() as usize,
                height: image.height() as usize,
                bytes: Cow::Borrowed(image.as_raw()),
            })
            .map_err(clipboard_error)?;
        log::debug!("Copied {}x{} image to clipboard", image.width(), image.height());
        Ok(())
    }
}
