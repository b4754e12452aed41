//! Publishing export rasters
//!
//! This module contains:
//! - The `ExportSink` seam the session publishes through
//! - Per-job publish options resolved from the persisted preferences
//! - The desktop sink: PNG file, arboard clipboard and message dialogs

pub mod clipboard;
pub mod file;
pub mod notify;

use std::path::PathBuf;

use image::RgbaImage;

use crate::config::AppConfig;
use crate::domain::{ExportJob, ExportKind, ExportTarget, FilePrefix};
use crate::error::PersistenceError;

pub use clipboard::{ArboardClipboard, ClipboardWriter};
pub use notify::{DialogNotifier, LogNotifier, NotifyLevel, Notifier};

/// Where one raster goes
#[derive(Debug, Clone, PartialEq)]
pub struct PublishOptions {
    pub to_clipboard: bool,
    pub to_file: bool,
    pub notify: bool,
    pub destination_folder: PathBuf,
    pub prefix: FilePrefix,
    /// Set for an explicit copy, which is confirmed even without a file
    pub explicit_copy: bool,
    /// Raster is a region crop rather than the full screen
    pub region: bool,
}

impl PublishOptions {
    pub fn for_job(job: &ExportJob, config: &AppConfig) -> Self {
        let (to_clipboard, to_file) = match job.target {
            ExportTarget::Preferences => (config.copy_to_clipboard, config.auto_save_on_complete),
            ExportTarget::ClipboardOnly => (true, false),
        };
        Self {
            to_clipboard,
            to_file,
            notify: config.show_notification,
            destination_folder: config.destination_folder.clone(),
            prefix: job.kind.file_prefix(),
            explicit_copy: job.target == ExportTarget::ClipboardOnly,
            region: !matches!(job.kind, ExportKind::FullScreen { .. }),
        }
    }

    /// Whether publishing would have any effect at all
    pub fn has_destination(&self) -> bool {
        self.to_clipboard || self.to_file
    }
}

/// What a publish did
#[derive(Debug, Default)]
pub struct PublishReport {
    pub copied: bool,
    pub saved: Option<PathBuf>,
    /// Destinations that failed, in the order they were tried
    pub failures: Vec<PersistenceError>,
}

/// Consumer of finished export rasters
pub trait ExportSink {
    /// Write `raster` to every destination in `options`. A failing
    /// destination does not stop the others; failures land in the report.
    fn publish(&mut self, raster: &RgbaImage, options: &PublishOptions) -> PublishReport;
}

/// Sink writing to the system clipboard and the destination folder
pub struct DesktopSink<C = ArboardClipboard, N = DialogNotifier> {
    clipboard: C,
    notifier: N,
}

impl DesktopSink {
    pub fn new() -> Self {
        Self::with_parts(ArboardClipboard::default(), DialogNotifier::default())
    }
}

impl Default for DesktopSink {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: ClipboardWriter, N: Notifier> DesktopSink<C, N> {
    pub fn with_parts(clipboard: C, notifier: N) -> Self {
        Self {
            clipboard,
            notifier,
        }
    }

    fn failed(&mut self, err: PersistenceError, report: &mut PublishReport) {
        self.notifier.notify(
            NotifyLevel::Error,
            notify::FAILED_TITLE,
            &format!("Export failed: {err}"),
        );
        report.failures.push(err);
    }
}

impl<C: ClipboardWriter, N: Notifier> ExportSink for DesktopSink<C, N> {
    fn publish(&mut self, raster: &RgbaImage, options: &PublishOptions) -> PublishReport {
        let mut report = PublishReport::default();
        if options.to_clipboard {
            match self.clipboard.set_image(raster) {
                Ok(()) => report.copied = true,
                Err(err) => self.failed(err, &mut report),
            }
        }
        if options.to_file {
            match file::save_png(raster, &options.destination_folder, options.prefix) {
                Ok(path) => report.saved = Some(path),
                Err(err) => self.failed(err, &mut report),
            }
        }

        if options.notify {
            if let Some(path) = &report.saved {
                self.notifier.notify(
                    NotifyLevel::Info,
                    notify::SAVED_TITLE,
                    &notify::saved_message(path, report.copied),
                );
            } else if report.copied && options.explicit_copy {
                self.notifier.notify(
                    NotifyLevel::Info,
                    notify::COPIED_TITLE,
                    notify::copied_message(options.region),
                );
            }
        }
        report
    }
}
