// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Main application state and egui App implementation.
//!
//! The app owns the video source, both capture sessions and the card store,
//! and routes UI actions and key presses to them. Long captures run on a
//! worker thread that borrows the video source until it reports back.

use crate::audio::{self, Cue, CuePlayer};
use crate::config::Settings;
use crate::error::CaptureInterrupted;
use crate::io::capture::{self, CaptureJob, JobEvent, Segment, NAV_STEP};
use crate::io::export::{self, SheetImage};
use crate::io::media::{self, VideoSource, VIDEO_EXTENSIONS};
use crate::io::session_store::MemorySessionStore;
use crate::models::card::{Card, CardMeta, CardStore};
use crate::models::frame::Frame;
use crate::models::session::{KeyframeSession, SlotSession};
use crate::models::slots::SLOT_COUNT;
use crate::ui::{self, canvas, cards, properties, slots, strip, timeline, toolbar, TextureSet};
use anyhow::{Context, Result};
use std::path::PathBuf;
use std::sync::mpsc::{Receiver, TryRecvError};
use std::time::Duration;

const CARD_IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "webp", "bmp"];

/// Tool tab selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Keyframes,
    Slots,
    Cards,
}

/// Properties of the open video.
struct VideoInfo {
    name: String,
    duration: f64,
    dimensions: (u32, u32),
}

/// A capture job running on the worker thread.
struct RunningJob {
    job: CaptureJob,
    receiver: Receiver<JobEvent>,
    message: String,
}

/// Main application state.
pub struct SpritecapApp {
    tab: Tab,

    settings: Settings,
    settings_path: Option<PathBuf>,

    /// Open video; `None` while a job holds it
    video: Option<Box<dyn VideoSource>>,
    info: Option<VideoInfo>,
    position: f64,
    playing: bool,
    picture: Option<egui::TextureHandle>,

    keyframes: KeyframeSession,
    slots: SlotSession,
    cards: CardStore<MemorySessionStore>,
    card_list: Vec<CardMeta>,
    card_thumbs: Vec<Option<egui::TextureHandle>>,

    strip_textures: TextureSet,
    extracted_textures: TextureSet,
    preview_texture: Option<(egui::TextureHandle, (u32, u32))>,
    preview_on_impact: bool,
    scroll_strip: bool,

    job: Option<RunningJob>,
    cues: Box<dyn CuePlayer>,
    status: Option<String>,
}

impl Default for SpritecapApp {
    fn default() -> Self {
        Self::new()
    }
}

impl SpritecapApp {
    /// Create a new application instance with persisted settings.
    pub fn new() -> Self {
        let settings_path = Settings::default_path();
        let settings = settings_path
            .as_deref()
            .map(Settings::load)
            .unwrap_or_default();
        log::info!("Preview rate {} fps, settle {} ms", settings.preview_fps, settings.settle_ms);

        Self {
            tab: Tab::Keyframes,
            keyframes: KeyframeSession::new(settings.preview_fps),
            settings,
            settings_path,
            video: None,
            info: None,
            position: 0.0,
            playing: false,
            picture: None,
            slots: SlotSession::new(),
            cards: CardStore::new(MemorySessionStore::new()),
            card_list: Vec::new(),
            card_thumbs: Vec::new(),
            strip_textures: TextureSet::default(),
            extracted_textures: TextureSet::default(),
            preview_texture: None,
            preview_on_impact: false,
            scroll_strip: false,
            job: None,
            cues: audio::default_player(),
            status: None,
        }
    }

    fn report(&mut self, message: String) {
        log::warn!("{}", message);
        self.status = Some(message);
    }

    /// Open a video file or frame folder, replacing the current one.
    pub fn open_video(&mut self, path: PathBuf, ctx: &egui::Context) {
        if self.job.is_some() {
            log::debug!("Ignoring open while a capture is running");
            return;
        }

        match media::open_video(&path) {
            Ok(source) => {
                let name = path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_else(|| path.display().to_string());
                log::info!(
                    "Opened {} ({:.2}s, {}x{})",
                    name,
                    source.duration(),
                    source.dimensions().0,
                    source.dimensions().1
                );
                self.info = Some(VideoInfo {
                    name,
                    duration: source.duration(),
                    dimensions: source.dimensions(),
                });
                self.video = Some(source);
                self.position = 0.0;
                self.playing = false;
                self.keyframes.reset();
                self.strip_textures.clear();
                self.preview_texture = None;
                self.slots.reset();
                self.extracted_textures.clear();
                self.status = None;
                self.refresh_picture(ctx);
            }
            Err(e) => self.report(format!("Failed to open {}: {}", path.display(), e)),
        }
    }

    /// Grab the picture at the current position into the display texture.
    fn refresh_picture(&mut self, ctx: &egui::Context) {
        let Some(video) = self.video.as_mut() else {
            return;
        };
        self.position = video.position();
        match video.grab() {
            Ok(frame) => {
                self.picture = Some(ui::texture_from_image(ctx, "video_picture", &frame.image));
            }
            Err(e) => log::warn!("Failed to grab picture: {}", e),
        }
    }

    fn seek_to(&mut self, time: f64, ctx: &egui::Context) {
        let Some(video) = self.video.as_mut() else {
            return;
        };
        let target = time.clamp(0.0, video.duration());
        if let Err(e) = video.seek(target) {
            self.report(format!("Seek failed: {}", e));
            return;
        }
        self.refresh_picture(ctx);
    }

    fn step(&mut self, direction: f64, ctx: &egui::Context) {
        self.playing = false;
        self.seek_to(self.position + direction * NAV_STEP, ctx);
        self.cues.play(Cue::Cursor);
    }

    fn tick_playback(&mut self, ctx: &egui::Context) {
        if !self.playing {
            return;
        }
        let Some(duration) = self.video.as_ref().map(|v| v.duration()) else {
            self.playing = false;
            return;
        };
        let dt = ctx.input(|i| i.stable_dt) as f64;
        let next = self.position + dt;
        if next >= duration {
            self.playing = false;
        }
        self.seek_to(next, ctx);
        ctx.request_repaint();
    }

    fn toggle_play(&mut self, ctx: &egui::Context) {
        let at_end = self
            .info
            .as_ref()
            .map(|info| self.position >= info.duration)
            .unwrap_or(false);
        if !self.playing && at_end {
            self.seek_to(0.0, ctx);
        }
        self.playing = !self.playing;
    }

    fn capture_single(&mut self, ctx: &egui::Context) {
        let Some(video) = self.video.as_mut() else {
            return;
        };
        self.playing = false;
        match self.keyframes.capture_current(video.as_mut()) {
            Ok(()) => {
                self.cues.play(Cue::Select);
                self.scroll_strip = true;
            }
            Err(e) => self.report(format!("Capture failed: {}", e)),
        }
        ctx.request_repaint();
    }

    fn toggle_range(&mut self) {
        let Some(video) = self.video.as_mut() else {
            return;
        };
        self.playing = false;
        match self.keyframes.toggle_range(video.as_mut()) {
            Ok(Some(job)) => self.start_job(job),
            Ok(None) => {
                self.cues.play(Cue::Select);
                self.scroll_strip = true;
            }
            Err(e) => self.report(format!("Capture failed: {}", e)),
        }
    }

    /// Hand the video source to a worker thread for `job`.
    fn start_job(&mut self, job: CaptureJob) {
        let Some(source) = self.video.take() else {
            return;
        };
        self.playing = false;
        self.keyframes.preview.stop();
        let message = match job {
            CaptureJob::Range { .. } => "Capturing range...".to_string(),
            CaptureJob::Bulk { .. } => "Extracting frames...".to_string(),
        };
        let receiver = capture::spawn_job(source, job, self.settings.settle());
        self.job = Some(RunningJob {
            job,
            receiver,
            message,
        });
    }

    /// Drain worker messages; restores the video source when the job ends.
    fn poll_job(&mut self, ctx: &egui::Context) {
        loop {
            let Some(running) = self.job.as_mut() else {
                return;
            };
            match running.receiver.try_recv() {
                Ok(JobEvent::Progress { done, total }) => {
                    running.message = progress_message(running.job, done, total);
                }
                Ok(JobEvent::Finished { job, source, result }) => {
                    self.job = None;
                    self.video = Some(source);
                    self.finish_job(job, result, ctx);
                    return;
                }
                Err(TryRecvError::Empty) => {
                    ctx.request_repaint_after(Duration::from_millis(50));
                    return;
                }
                Err(TryRecvError::Disconnected) => {
                    self.job = None;
                    self.info = None;
                    self.picture = None;
                    self.report("Capture worker stopped unexpectedly; reopen the video".to_string());
                    return;
                }
            }
        }
    }

    fn finish_job(
        &mut self,
        job: CaptureJob,
        result: Result<Vec<Frame>, CaptureInterrupted>,
        ctx: &egui::Context,
    ) {
        match (job, result) {
            (CaptureJob::Range { .. }, Ok(frames)) => {
                self.status = Some(format!("Captured {} frames", frames.len()));
                self.keyframes.append(frames);
                self.scroll_strip = true;
                self.cues.play(Cue::Select);
            }
            (CaptureJob::Bulk { window }, Ok(frames)) => {
                self.status = Some(format!("Extracted {} frames", frames.len()));
                self.slots.load_extracted(window, frames);
                self.cues.play(Cue::Select);
            }
            (CaptureJob::Range { .. }, Err(e)) => {
                self.report(format!("Capture failed: {}", e));
                if !e.frames.is_empty() {
                    self.keyframes.append(e.frames);
                    self.scroll_strip = true;
                }
            }
            (CaptureJob::Bulk { .. }, Err(e)) => self.report(format!("Extraction failed: {}", e.source)),
        }
        self.refresh_picture(ctx);
    }

    fn toggle_preview(&mut self, now: f64) {
        if self.keyframes.preview.is_running() {
            self.keyframes.preview.stop();
            self.preview_texture = None;
            self.cues.play(Cue::Back);
        } else {
            self.playing = false;
            self.restart_preview(now);
            self.cues.play(Cue::Select);
        }
    }

    /// Start the preview over the current rotated view.
    fn restart_preview(&mut self, now: f64) {
        let len = self.keyframes.sequence.len();
        let has_impact = self.keyframes.sequence.impact().is_some();
        self.keyframes.preview.start(len, has_impact, now);
        if !self.keyframes.preview.is_running() {
            self.preview_texture = None;
        }
    }

    fn tick_preview(&mut self, ctx: &egui::Context) {
        let now = ctx.input(|i| i.time);
        if let Some(step) = self.keyframes.preview.tick(now) {
            let view = self.keyframes.ordered_view();
            if let Some(frame) = view.get(step.position) {
                let texture = ui::texture_from_image(ctx, "preview_frame", &frame.image);
                self.preview_texture = Some((texture, frame.image.dimensions()));
            }
            self.preview_on_impact = step.position == 0 && self.keyframes.sequence.impact().is_some();
            if step.cue {
                self.cues.play(Cue::Select);
            }
        }
        if let Some(wait) = self.keyframes.preview.time_until_next(now) {
            ctx.request_repaint_after(wait);
        }
    }

    fn set_fps(&mut self, fps: u32, now: f64) {
        self.keyframes.preview.set_fps(fps, now);
        self.persist_settings();
    }

    fn adjust_fps(&mut self, delta: i32, now: f64) {
        self.keyframes.preview.adjust_fps(delta, now);
        self.persist_settings();
        self.cues.play(Cue::Cursor);
    }

    fn persist_settings(&mut self) {
        let fps = self.keyframes.preview.fps();
        if self.settings.preview_fps == fps {
            return;
        }
        self.settings.preview_fps = fps;
        if let Some(path) = &self.settings_path {
            self.settings.save(path);
        }
    }

    /// Ask where to save `sheet` and write it. Returns the chosen path.
    fn save_sheet(&self, sheet: &SheetImage) -> Result<Option<PathBuf>> {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("PNG", &["png"])
            .set_file_name(&sheet.file_name)
            .save_file()
        else {
            return Ok(None);
        };
        log::info!(
            "Saving {} to {}",
            if sheet.is_screenshot { "screenshot" } else { "sprite sheet" },
            path.display()
        );
        export::save_png(&sheet.image, &path)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(Some(path))
    }

    fn export_keyframes(&mut self) {
        let result = export::export_keyframes(&self.keyframes.ordered_view(), self.keyframes.preview.fps())
            .context("Nothing to export")
            .and_then(|sheet| self.save_sheet(&sheet));
        self.finish_export(result);
    }

    fn export_slots(&mut self) {
        let result = export::export_slots(&self.slots.board)
            .context("Slot sheet not ready")
            .and_then(|sheet| self.save_sheet(&sheet));
        self.finish_export(result);
    }

    fn finish_export(&mut self, result: Result<Option<PathBuf>>) {
        match result {
            Ok(Some(path)) => {
                self.status = Some(format!("Saved {}", path.display()));
                self.cues.play(Cue::Chord);
            }
            Ok(None) => {}
            Err(e) => self.report(format!("{:#}", e)),
        }
    }

    fn reset_keyframes(&mut self) {
        if !self.keyframes.sequence.is_empty()
            && !confirm("Reset keyframes", "Discard all captured frames?")
        {
            return;
        }
        self.keyframes.reset();
        self.strip_textures.clear();
        self.preview_texture = None;
        self.cues.play(Cue::Back);
        log::info!("Keyframes reset");
    }

    fn reset_slots(&mut self) {
        if !self.slots.is_empty()
            && !confirm("Reset slots", "Discard extracted frames and slot assignments?")
        {
            return;
        }
        self.slots.reset();
        self.extracted_textures.clear();
        self.cues.play(Cue::Back);
        log::info!("Slots reset");
    }

    fn add_cards(&mut self, paths: &[PathBuf], ctx: &egui::Context) {
        match self.cards.add_files(paths) {
            Ok(list) => self.set_cards(list, ctx),
            Err(e) => self.report(format!("Failed to add cards: {}", e)),
        }
    }

    fn set_cards(&mut self, list: Vec<Card>, ctx: &egui::Context) {
        self.card_thumbs = list.iter().map(|card| card_texture(ctx, card)).collect();
        self.card_list = list.iter().map(Card::meta).collect();
    }

    fn handle_dropped_files(&mut self, ctx: &egui::Context) {
        let dropped: Vec<PathBuf> = ctx.input(|i| {
            i.raw
                .dropped_files
                .iter()
                .filter_map(|f| f.path.clone())
                .collect()
        });
        if dropped.is_empty() {
            return;
        }

        if self.tab == Tab::Cards {
            self.add_cards(&dropped, ctx);
        } else if let Some(path) = dropped.into_iter().find(|p| media::is_video_input(p)) {
            self.open_video(path, ctx);
        } else {
            self.report("Dropped file is not a supported video".to_string());
        }
    }

    /// Keyboard shortcuts. Ignored while a capture job holds the video.
    fn handle_keys(&mut self, ctx: &egui::Context) {
        if ctx.wants_keyboard_input() || self.video.is_none() {
            return;
        }
        let now = ctx.input(|i| i.time);
        let pressed = |key: egui::Key| ctx.input(|i| i.key_pressed(key));

        match self.tab {
            Tab::Keyframes => {
                let previewing = self.keyframes.preview.is_running();
                if pressed(egui::Key::ArrowLeft) {
                    if previewing {
                        self.adjust_fps(-1, now);
                    } else {
                        self.step(-1.0, ctx);
                    }
                } else if pressed(egui::Key::ArrowRight) {
                    if previewing {
                        self.adjust_fps(1, now);
                    } else {
                        self.step(1.0, ctx);
                    }
                } else if previewing {
                    // Capture keys wait until the preview stops
                } else if pressed(egui::Key::ArrowUp) || pressed(egui::Key::Enter) {
                    self.capture_single(ctx);
                } else if pressed(egui::Key::ArrowDown) {
                    self.toggle_range();
                }
            }
            Tab::Slots => {
                if pressed(egui::Key::ArrowLeft) {
                    self.step(-1.0, ctx);
                } else if pressed(egui::Key::ArrowRight) {
                    self.step(1.0, ctx);
                } else if pressed(egui::Key::Space) || pressed(egui::Key::Enter) {
                    match self.slots.assign_current(self.position) {
                        Some(slot) => {
                            log::info!("Assigned current frame to slot {}", slot + 1);
                            self.cues.play(Cue::Select);
                        }
                        None => log::debug!("No empty slot or no extracted frames"),
                    }
                } else if pressed(egui::Key::Delete) || pressed(egui::Key::Backspace) {
                    if let Some(slot) = self.slots.remove_current(self.position) {
                        log::info!("Cleared slot {}", slot + 1);
                        self.cues.play(Cue::Back);
                    }
                }
            }
            Tab::Cards => {}
        }
    }

    fn menu_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("File", |ui| {
                    let idle = self.job.is_none();
                    if ui.add_enabled(idle, egui::Button::new("Open Video...")).clicked() {
                        if let Some(path) = rfd::FileDialog::new()
                            .add_filter("Video", VIDEO_EXTENSIONS)
                            .pick_file()
                        {
                            self.open_video(path, ctx);
                        }
                        ui.close_menu();
                    }
                    if ui.add_enabled(idle, egui::Button::new("Open Frame Folder...")).clicked() {
                        if let Some(path) = rfd::FileDialog::new().pick_folder() {
                            self.open_video(path, ctx);
                        }
                        ui.close_menu();
                    }
                    ui.separator();
                    if ui.button("Quit").clicked() {
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    }
                });

                ui.menu_button("Help", |ui| {
                    if ui.button("About").clicked() {
                        self.status = Some(format!("spritecap {}", env!("CARGO_PKG_VERSION")));
                        ui.close_menu();
                    }
                });
            });
        });
    }

    fn status_bar(&self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                match &self.info {
                    Some(info) => ui.label(format!(
                        "{} · {}x{} · {}",
                        info.name,
                        info.dimensions.0,
                        info.dimensions.1,
                        timeline::format_time(info.duration)
                    )),
                    None => ui.label(egui::RichText::new("No video").weak()),
                };
                if let Some(message) = &self.status {
                    ui.separator();
                    ui.label(message);
                }
            });
        });
    }

    /// Canvas plus timeline; returns the timeline action.
    fn video_area(&self, ui: &mut egui::Ui, height: f32) -> timeline::TimelineAction {
        let previewing = self.tab == Tab::Keyframes && self.keyframes.preview.is_running();
        let content = if let Some(running) = &self.job {
            canvas::CanvasContent::Busy(&running.message)
        } else if let (true, Some((texture, size))) = (previewing, &self.preview_texture) {
            canvas::CanvasContent::Picture(texture, *size)
        } else if let (Some(texture), Some(info)) = (&self.picture, &self.info) {
            canvas::CanvasContent::Picture(texture, info.dimensions)
        } else {
            canvas::CanvasContent::Welcome
        };
        canvas::show(ui, content, height, previewing && self.preview_on_impact);

        let duration = self.info.as_ref().map(|i| i.duration).unwrap_or(0.0);
        let enabled = self.video.is_some() && !previewing;
        timeline::show(ui, self.position, duration, self.playing, enabled)
    }

    fn apply_timeline(&mut self, action: timeline::TimelineAction, ctx: &egui::Context) {
        match action {
            timeline::TimelineAction::Seek(time) => {
                self.playing = false;
                self.seek_to(time, ctx);
            }
            timeline::TimelineAction::TogglePlay => self.toggle_play(ctx),
            timeline::TimelineAction::None => {}
        }
    }

    fn keyframes_tab(&mut self, ctx: &egui::Context) {
        let now = ctx.input(|i| i.time);
        self.strip_textures.sync(
            ctx,
            "keyframe",
            self.keyframes.revision(),
            self.keyframes.sequence.frames().iter().map(|f| &f.image),
        );

        let summary = properties::KeyframeSummary {
            frame_count: self.keyframes.sequence.len(),
            impact: self.keyframes.sequence.impact(),
            range_count: self.keyframes.range_count(),
            fps: self.keyframes.preview.fps(),
            previewing: self.keyframes.preview.is_running(),
            ready: self.video.is_some(),
        };
        let properties_action = egui::SidePanel::right("properties")
            .default_width(250.0)
            .show(ctx, |ui| properties::show(ui, &summary))
            .inner;

        match properties_action {
            properties::PropertiesAction::CaptureSingle => self.capture_single(ctx),
            properties::PropertiesAction::ToggleRange => self.toggle_range(),
            properties::PropertiesAction::TogglePreview => self.toggle_preview(now),
            properties::PropertiesAction::SetFps(fps) => self.set_fps(fps, now),
            properties::PropertiesAction::Export => self.export_keyframes(),
            properties::PropertiesAction::Reset => self.reset_keyframes(),
            properties::PropertiesAction::None => {}
        }

        let scroll_to_end = std::mem::take(&mut self.scroll_strip);
        let strip_action = egui::TopBottomPanel::bottom("strip")
            .resizable(false)
            .show(ctx, |ui| {
                strip::show(
                    ui,
                    &self.strip_textures,
                    self.keyframes.sequence.len(),
                    self.keyframes.sequence.impact(),
                    scroll_to_end,
                )
            })
            .inner;

        let changed = match strip_action {
            strip::StripAction::SetImpact(index) => {
                let set = self.keyframes.set_impact(index);
                if set {
                    log::info!("Impact frame set to #{}", index + 1);
                    self.cues.play(Cue::Select);
                }
                set
            }
            strip::StripAction::Delete(index) => {
                let removed = self.keyframes.remove_frame(index);
                if removed {
                    log::info!("Deleted frame #{}", index + 1);
                    self.cues.play(Cue::Back);
                }
                removed
            }
            strip::StripAction::None => false,
        };
        if changed && self.keyframes.preview.is_running() {
            self.restart_preview(now);
        }

        self.tick_preview(ctx);

        let timeline_action = egui::CentralPanel::default()
            .show(ctx, |ui| {
                let height = (ui.available_height() - 40.0).max(120.0);
                self.video_area(ui, height)
            })
            .inner;
        self.apply_timeline(timeline_action, ctx);
    }

    fn slots_tab(&mut self, ctx: &egui::Context) {
        self.extracted_textures.sync(
            ctx,
            "extracted",
            self.slots.revision(),
            self.slots.board.frames().iter().map(|f| &f.frame.image),
        );
        let slot_textures: [Option<egui::TextureHandle>; SLOT_COUNT] = std::array::from_fn(|slot| {
            self.slots
                .board
                .slot(slot)
                .and_then(|entry| self.extracted_textures.get(entry.frame_index).cloned())
        });

        let duration = self.info.as_ref().map(|i| i.duration).unwrap_or(0.0);
        let segments: Vec<Segment> = if self.info.is_none() {
            Vec::new()
        } else if capture::needs_segment_choice(duration) {
            capture::segments(duration)
        } else {
            vec![capture::whole_video(duration)]
        };
        let current = self.slots.current_frame(self.position);

        let (timeline_action, slots_action) = egui::CentralPanel::default()
            .show(ctx, |ui| {
                let height = (ui.available_height() * 0.4).max(120.0);
                let timeline_action = self.video_area(ui, height);
                ui.separator();

                let extract = slots::show_extract_controls(
                    ui,
                    &segments,
                    self.slots.window(),
                    self.video.is_some(),
                );
                let board =
                    slots::show(ui, &self.slots, &self.extracted_textures, &slot_textures, current);
                let action = match extract {
                    slots::SlotsAction::None => board,
                    other => other,
                };
                (timeline_action, action)
            })
            .inner;
        self.apply_timeline(timeline_action, ctx);

        match slots_action {
            slots::SlotsAction::Extract(window) => self.start_job(CaptureJob::Bulk { window }),
            slots::SlotsAction::Drop { frame, slot } => {
                if self.slots.drop_on_slot(frame, slot) {
                    log::info!("Dropped frame {} on slot {}", frame, slot + 1);
                    self.cues.play(Cue::Select);
                }
            }
            slots::SlotsAction::ClearSlot(slot) => {
                if self.slots.clear_slot(slot).is_some() {
                    self.cues.play(Cue::Back);
                }
            }
            slots::SlotsAction::SeekTo(time) => {
                self.playing = false;
                self.seek_to(time, ctx);
            }
            slots::SlotsAction::Export => self.export_slots(),
            slots::SlotsAction::Reset => self.reset_slots(),
            slots::SlotsAction::None => {}
        }
    }

    fn cards_tab(&mut self, ctx: &egui::Context) {
        let action = egui::CentralPanel::default()
            .show(ctx, |ui| cards::show(ui, &self.card_list, &self.card_thumbs))
            .inner;

        match action {
            cards::CardAction::AddFiles => {
                if let Some(paths) = rfd::FileDialog::new()
                    .add_filter("Images", CARD_IMAGE_EXTENSIONS)
                    .pick_files()
                {
                    self.add_cards(&paths, ctx);
                }
            }
            cards::CardAction::Remove(id) => {
                let list = self.cards.remove(&id);
                self.set_cards(list, ctx);
            }
            cards::CardAction::Clear => {
                let list = self.cards.clear();
                self.set_cards(list, ctx);
            }
            cards::CardAction::None => {}
        }
    }
}

impl eframe::App for SpritecapApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_job(ctx);
        self.handle_dropped_files(ctx);
        self.handle_keys(ctx);
        self.tick_playback(ctx);

        self.menu_bar(ctx);

        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            toolbar::show(ui, &mut self.tab);
        });

        self.status_bar(ctx);

        match self.tab {
            Tab::Keyframes => self.keyframes_tab(ctx),
            Tab::Slots => self.slots_tab(ctx),
            Tab::Cards => self.cards_tab(ctx),
        }
    }
}

/// Ask a yes/no question in a native dialog.
fn confirm(title: &str, description: &str) -> bool {
    let answer = rfd::MessageDialog::new()
        .set_level(rfd::MessageLevel::Warning)
        .set_title(title)
        .set_description(description)
        .set_buttons(rfd::MessageButtons::YesNo)
        .show();
    matches!(answer, rfd::MessageDialogResult::Yes)
}

fn progress_message(job: CaptureJob, done: usize, total: usize) -> String {
    match job {
        CaptureJob::Range { .. } => format!("Captured {}/{} frames...", done, total),
        CaptureJob::Bulk { .. } => format!("Extracting frames {}/{}...", done, total),
    }
}

/// Decode a card's inlined image into a texture.
fn card_texture(ctx: &egui::Context, card: &Card) -> Option<egui::TextureHandle> {
    let bytes = card.image_bytes()?;
    match media::load_image(&bytes) {
        Ok(loaded) => {
            let size = [loaded.width as usize, loaded.height as usize];
            let color_image = egui::ColorImage::from_rgba_unmultiplied(size, &loaded.pixels);
            Some(ctx.load_texture(format!("card_{}", card.id), color_image, egui::TextureOptions::LINEAR))
        }
        Err(e) => {
            log::debug!("No preview for card {}: {}", card.name, e);
            None
        }
    }
}
